//! # Domain models for the betting client
//!
//! Defines the records held by the client-side stores and mirrored from the
//! server. All types are `Serialize + Deserialize` in the wire shapes the
//! betting API uses (camelCase fields, Mongo-style `_id` identifiers), so the
//! same structs are persisted locally and decoded from responses.
//!
//! ## Types
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`UserProfile`] | The signed-in user's identity record, including the wallet balance shown before placing a bet. |
//! | [`GuestSlipEntry`] / [`GuestSelection`] | One event on an unauthenticated visitor's slip and the chosen outcomes within it, at most one per market category. |
//! | [`EventRef`] / [`SelectionChoice`] | Caller-side inputs when adding selections: the event's identity/display fields and the per-category pick. |
//! | [`ServerSelection`] | A server-owned in-progress selection, with its `selectedOdd` map keyed by market category. Mirrored locally for display only. |
//! | [`OfflineBooking`] | A guest's confirmed bet, recorded locally and never sent to a server. |
//! | [`BetSlipRecord`] | A finalized bet slip fetched from the booking-history endpoint. |

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identity record of the signed-in user.
///
/// Unknown profile fields are tolerated and extra fields default, so a schema
/// drift on the server never breaks session restore.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub nickname: Option<String>,
    pub email: String,
    #[serde(default)]
    pub wallet_balance: f64,
    #[serde(default)]
    pub phone_number: Option<String>,
}

impl UserProfile {
    /// Display name, falling back to the email address.
    pub fn display_name(&self) -> &str {
        self.nickname.as_deref().unwrap_or(&self.email)
    }
}

/// One chosen outcome within one market category of a guest slip entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestSelection {
    /// Market category, e.g. `"1x2"` or `"doubleChance"`.
    pub category: String,
    /// Outcome key within the category, e.g. `"homeTeamWinPoint"`.
    pub odd_key: String,
    /// Odd value as received; kept raw so non-numeric input survives
    /// ingestion and is neutralised at aggregation time.
    pub odd_value: Value,
    /// Human-readable label, e.g. `"Home Win"`.
    pub label: String,
    /// Server-assigned identifier once synced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub odd_id: Option<String>,
}

/// One event on the guest slip, with its ordered selections.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestSlipEntry {
    pub event_id: String,
    #[serde(default)]
    pub event_description: Option<String>,
    #[serde(default)]
    pub home_team: String,
    #[serde(default)]
    pub away_team: String,
    pub selections: Vec<GuestSelection>,
}

/// Event identity and display fields, as passed in by a view when the
/// visitor picks an odd.
#[derive(Clone, Debug, PartialEq)]
pub struct EventRef {
    pub id: String,
    pub description: Option<String>,
    pub home_team: String,
    pub away_team: String,
}

/// A single pick within a market category: outcome key, odd value, label.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectionChoice {
    pub outcome: String,
    pub value: Value,
    pub label: String,
    pub odd_id: Option<String>,
}

/// The caller-provided mapping of market category to pick.
pub type SelectionsByCategory = BTreeMap<String, SelectionChoice>;

/// An in-progress selection owned by the server, mirrored for display.
///
/// `selected_odd` maps market category to a `{ outcomeKey: value }` object;
/// the map may also carry an internal `_id` member that traversals skip.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerSelection {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub home_team: Option<String>,
    #[serde(default)]
    pub away_team: Option<String>,
    #[serde(default)]
    pub event_description: Option<String>,
    #[serde(default)]
    pub selected_odd: serde_json::Map<String, Value>,
}

/// Fixed status label carried by every offline booking.
pub const OFFLINE_BOOKING_STATUS: &str = "Booked Offline";

/// A guest's confirmed bet, recorded only in local storage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfflineBooking {
    pub booking_id: String,
    /// Snapshot of the guest slip at booking time.
    pub slip_items: Vec<GuestSlipEntry>,
    pub stake_amount: f64,
    pub total_odds: f64,
    pub potential_winnings: f64,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
    pub status: String,
}

/// A finalized bet slip as returned by the booking-history endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BetSlipRecord {
    #[serde(rename = "_id")]
    pub id: String,
    /// `"pending"`, `"won"` or `"lost"`.
    #[serde(default = "default_bet_status")]
    pub status: String,
    #[serde(default)]
    pub bet_amount: f64,
    #[serde(default)]
    pub total_odds: f64,
    #[serde(default)]
    pub potential_winnings: f64,
    /// Nested selection details of the finalized slip.
    #[serde(default)]
    pub odds: Vec<ServerSelection>,
    #[serde(default)]
    pub created_at: Option<String>,
}

fn default_bet_status() -> String {
    "pending".to_string()
}
