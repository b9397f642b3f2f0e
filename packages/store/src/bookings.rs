//! # Offline booking log
//!
//! When an unauthenticated visitor confirms a bet, the slip is not submitted
//! anywhere — it is snapshotted into an [`OfflineBooking`] record and
//! appended to a local list under its own fixed key. Records are immutable
//! once created and never synced to a server.

use rand::distributions::Alphanumeric;
use rand::Rng;

use crate::models::{GuestSlipEntry, OfflineBooking, OFFLINE_BOOKING_STATUS};
use crate::odds;
use crate::storage::{keys, load_json, save_json, LocalStore};

/// Append-only log of locally booked guest bets.
#[derive(Clone)]
pub struct BookingLog<S: LocalStore> {
    store: S,
}

impl<S: LocalStore> BookingLog<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Record a guest booking: snapshots the given entries, computes the
    /// potential winnings from the multiplier and stake, and persists the
    /// grown list before returning the new record.
    pub async fn book(
        &self,
        slip_items: Vec<GuestSlipEntry>,
        stake_amount: f64,
        total_odds: f64,
    ) -> OfflineBooking {
        let booking = OfflineBooking {
            booking_id: generate_booking_id(),
            slip_items,
            stake_amount,
            total_odds,
            potential_winnings: odds::potential_payout(total_odds, stake_amount),
            created_at: chrono::Utc::now().to_rfc3339(),
            status: OFFLINE_BOOKING_STATUS.to_string(),
        };

        let mut bookings = self.bookings().await;
        bookings.push(booking.clone());
        save_json(&self.store, keys::OFFLINE_BOOKINGS, &bookings).await;

        booking
    }

    /// The accumulated booking list. Missing or corrupt data reads as empty.
    pub async fn bookings(&self) -> Vec<OfflineBooking> {
        load_json(&self.store, keys::OFFLINE_BOOKINGS)
            .await
            .unwrap_or_default()
    }
}

/// Time-based booking identifier with a random suffix, e.g.
/// `OFFLINE-1714329600123-K3X9P2QJA`.
fn generate_booking_id() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(9)
        .map(|c| (c as char).to_ascii_uppercase())
        .collect();
    format!(
        "OFFLINE-{}-{}",
        chrono::Utc::now().timestamp_millis(),
        suffix
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use crate::models::{GuestSelection, GuestSlipEntry};
    use serde_json::json;

    fn entry() -> GuestSlipEntry {
        GuestSlipEntry {
            event_id: "e1".to_string(),
            event_description: None,
            home_team: "Home".to_string(),
            away_team: "Away".to_string(),
            selections: vec![GuestSelection {
                category: "1x2".to_string(),
                odd_key: "homeTeamWinPoint".to_string(),
                odd_value: json!(4.0),
                label: "Home Win".to_string(),
                odd_id: None,
            }],
        }
    }

    #[tokio::test]
    async fn test_booking_computes_winnings() {
        let log = BookingLog::new(MemoryStore::new());

        let booking = log.book(vec![entry()], 50.0, 4.0).await;

        assert_eq!(booking.potential_winnings, 200.0);
        assert_eq!(booking.status, OFFLINE_BOOKING_STATUS);
        assert!(booking.booking_id.starts_with("OFFLINE-"));
        assert_eq!(booking.slip_items.len(), 1);
    }

    #[tokio::test]
    async fn test_bookings_accumulate_with_unique_ids() {
        let backing = MemoryStore::new();
        let log = BookingLog::new(backing.clone());

        let first = log.book(vec![entry()], 50.0, 4.0).await;
        let second = log.book(vec![entry()], 25.0, 2.0).await;
        assert_ne!(first.booking_id, second.booking_id);

        // Persisted across a reload
        let reloaded = BookingLog::new(backing);
        let bookings = reloaded.bookings().await;
        assert_eq!(bookings.len(), 2);
        assert_eq!(bookings[0].booking_id, first.booking_id);
    }

    #[tokio::test]
    async fn test_corrupt_booking_list_reads_as_empty() {
        let backing = MemoryStore::new();
        backing
            .put(keys::OFFLINE_BOOKINGS, "not json".to_string())
            .await;

        let log = BookingLog::new(backing);
        assert!(log.bookings().await.is_empty());
    }
}
