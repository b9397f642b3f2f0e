pub mod bookings;
pub mod models;
pub mod odds;
pub mod session;
pub mod slip;
pub mod storage;

mod memory;
pub use memory::MemoryStore;

mod file_store;
pub use file_store::FileStore;

pub use bookings::BookingLog;
pub use models::{
    BetSlipRecord, EventRef, GuestSelection, GuestSlipEntry, OfflineBooking, SelectionChoice,
    SelectionsByCategory, ServerSelection, UserProfile, OFFLINE_BOOKING_STATUS,
};
pub use session::{NavRequest, SessionSnapshot, SessionStore};
pub use slip::GuestSlipStore;
pub use storage::{keys, LocalStore};
