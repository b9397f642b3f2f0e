//! # Local persistence — key/value storage for client state
//!
//! Every piece of client-side state (the session triple, the guest bet slip,
//! the offline booking log) is persisted as a JSON string under a fixed,
//! well-known key. All reads and writes go through the [`LocalStore`] trait,
//! so the same store logic works against an in-memory map in tests
//! ([`crate::MemoryStore`]) or the filesystem in a shipped client
//! ([`crate::FileStore`]).
//!
//! ## Keys
//!
//! The fixed keys live in [`keys`]. They mirror what the views expect to find
//! after a reload: a reader that sees a missing or corrupt value under any of
//! them must treat it as "absent", never as a fatal error.

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Well-known storage keys for persisted client state.
pub mod keys {
    /// Serialized [`crate::UserProfile`] of the signed-in user.
    pub const USER: &str = "user";
    /// Bearer token sent on every authenticated request.
    pub const ACCESS_TOKEN: &str = "accessToken";
    /// Token exchanged for a fresh pair when the access token expires.
    pub const REFRESH_TOKEN: &str = "refreshToken";
    /// Full ordered list of guest [`crate::GuestSlipEntry`] items.
    pub const GUEST_SLIP: &str = "localBetSlip";
    /// Accumulated list of [`crate::OfflineBooking`] records.
    pub const OFFLINE_BOOKINGS: &str = "offlineBookedBets";
}

/// Async trait for persisting client state under fixed keys.
///
/// Values are JSON strings. Implementations never fail: a read that cannot be
/// served returns `None`, a write that cannot be performed is dropped.
pub trait LocalStore {
    fn get(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Option<String>>;
    fn put(
        &self,
        key: &str,
        value: String,
    ) -> impl std::future::Future<Output = ()>;
    fn remove(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = ()>;
}

/// Load and deserialize a persisted value, treating corrupt data as absent.
pub(crate) async fn load_json<T, S>(store: &S, key: &str) -> Option<T>
where
    T: DeserializeOwned,
    S: LocalStore,
{
    let raw = store.get(key).await?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(key, %err, "discarding corrupt persisted value");
            None
        }
    }
}

/// Serialize and persist a value under a key.
pub(crate) async fn save_json<T, S>(store: &S, key: &str, value: &T)
where
    T: Serialize,
    S: LocalStore,
{
    match serde_json::to_string(value) {
        Ok(raw) => store.put(key, raw).await,
        Err(err) => {
            tracing::error!(key, %err, "failed to serialize state for persistence");
        }
    }
}
