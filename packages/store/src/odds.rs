//! # Odds aggregation — combined multiplier and potential payout
//!
//! Pure, side-effect-free computation shared by the guest slip and the
//! server-backed slip. The two input shapes differ (the guest slip is a flat
//! list of selection records, the server nests outcomes inside market-category
//! objects), so both are converted to one canonical representation — a flat
//! list of [`OddsLine`] tuples — immediately upon ingestion, and a single
//! fold computes the multiplier. The displayed total must not change merely
//! because the visitor logs in mid-session.
//!
//! Invalid input never corrupts the product: a non-numeric or missing odd
//! value counts as the multiplicative identity 1, and an empty slip yields a
//! multiplier of 1 (neutral, not zero — downstream it is multiplied by a
//! stake, and zero would always read as "no payout" rather than "no bet").

use serde_json::Value;

use crate::models::{GuestSlipEntry, ServerSelection};

/// Canonical form of one selected outcome: event, market category, outcome
/// key, numeric odd value.
#[derive(Clone, Debug, PartialEq)]
pub struct OddsLine {
    pub event_id: String,
    pub category: String,
    pub outcome: String,
    pub value: f64,
}

/// Parse an odd value, accepting JSON numbers and numeric strings.
fn numeric_odd(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Flatten guest slip entries into canonical odds lines.
pub fn lines_from_guest(entries: &[GuestSlipEntry]) -> Vec<OddsLine> {
    let mut lines = Vec::new();
    for entry in entries {
        for selection in &entry.selections {
            lines.push(OddsLine {
                event_id: entry.event_id.clone(),
                category: selection.category.clone(),
                outcome: selection.odd_key.clone(),
                value: numeric_odd(&selection.odd_value).unwrap_or(1.0),
            });
        }
    }
    lines
}

/// Flatten server-fetched selections into canonical odds lines.
///
/// Skips the internal `_id` member of the `selectedOdd` map and any market
/// value that is not an object; within a market object the single
/// outcome-key/value pair present is taken.
pub fn lines_from_server(selections: &[ServerSelection]) -> Vec<OddsLine> {
    let mut lines = Vec::new();
    for selection in selections {
        for (category, market) in &selection.selected_odd {
            if category == "_id" {
                continue;
            }
            let Some(market) = market.as_object() else {
                continue;
            };
            let Some((outcome, value)) = market.iter().next() else {
                continue;
            };
            lines.push(OddsLine {
                event_id: selection.id.clone(),
                category: category.clone(),
                outcome: outcome.clone(),
                value: numeric_odd(value).unwrap_or(1.0),
            });
        }
    }
    lines
}

/// Combined multiplier: the product of all odd values. Empty input yields 1.
pub fn total_odds(lines: &[OddsLine]) -> f64 {
    lines.iter().fold(1.0, |acc, line| acc * line.value)
}

/// Payout for a stake: `multiplier * stake` when the stake is a positive
/// finite number, else 0. Never panics on malformed input.
pub fn potential_payout(multiplier: f64, stake: f64) -> f64 {
    if stake.is_finite() && stake > 0.0 && multiplier.is_finite() {
        multiplier * stake
    } else {
        0.0
    }
}

/// Parse stake form input. Rejects non-numeric, non-finite and non-positive
/// values.
pub fn parse_stake(input: &str) -> Option<f64> {
    let stake = input.trim().parse::<f64>().ok()?;
    (stake.is_finite() && stake > 0.0).then_some(stake)
}
