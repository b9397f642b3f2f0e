//! # Remote slip synchronizer
//!
//! Bridges the local guest slip and the authoritative server-side slip once a
//! session exists, and owns every network call that manipulates the slip.
//! Re-fetch-after-mutation is the only consistency mechanism: calls are
//! independent, nothing deduplicates in-flight requests, and the last
//! response to resolve wins. No call is retried automatically.
//!
//! | Operation | Endpoint |
//! |-----------|----------|
//! | [`SlipSync::fetch_current`] | `GET /user/all-placed-odds` |
//! | [`SlipSync::save_event_selections`] | `PATCH /user/place-odd/{eventId}` |
//! | [`SlipSync::place_bet`] | `POST /user/create-bet-slip` |
//! | [`SlipSync::remove_one`] | `DELETE /user/delete-placed-odd/{id}` |
//! | [`SlipSync::remove_all`] | `DELETE /user/delete-all-placed-odds` |
//! | [`SlipSync::bet_history`] | `GET /user/bet-slips` |

use std::time::Duration;

use serde_json::{json, Value};
use store::{
    BetSlipRecord, GuestSlipStore, LocalStore, NavRequest, SelectionChoice, SelectionsByCategory,
    ServerSelection, SessionStore,
};

use crate::auth::message_or;
use crate::client::ApiClient;
use crate::endpoints;
use crate::error::{expect_success, ApiError};
use crate::http::{decode_list, ApiRequest, Transport};

/// Outcome of a successfully placed bet.
#[derive(Clone, Debug)]
pub struct BetPlacement {
    /// Success message to show, the server's own when it sent one.
    pub message: String,
    /// The re-fetched slip, expected empty after finalization.
    pub selections: Vec<ServerSelection>,
    /// Where to navigate once `redirect_delay` has elapsed. Points at the
    /// booking-history view, unless the post-bet session refresh failed and
    /// logged the user out.
    pub navigate: NavRequest,
    /// How long to keep the success message on screen first.
    pub redirect_delay: Duration,
}

/// Server-backed slip operations for an authenticated session.
#[derive(Clone)]
pub struct SlipSync<T: Transport> {
    client: ApiClient<T>,
}

impl<T: Transport> SlipSync<T> {
    pub fn new(client: ApiClient<T>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient<T> {
        &self.client
    }

    /// The user's in-progress selections. A non-list body decodes as an
    /// empty list; callers keep their previously fetched view on `Err`.
    pub async fn fetch_current<S: LocalStore>(
        &self,
        session: &SessionStore<S>,
    ) -> Result<Vec<ServerSelection>, ApiError> {
        let response = self
            .client
            .send_authed(session, ApiRequest::get(endpoints::ALL_PLACED_ODDS))
            .await?;
        let response = expect_success(response)?;
        Ok(decode_list(response.body))
    }

    /// Save (or replace) the selections for one event on the server slip.
    ///
    /// The body nests each pick under its market category, as
    /// `{"selectedOdd": {category: {outcomeKey: value}}}`.
    pub async fn save_event_selections<S: LocalStore>(
        &self,
        session: &SessionStore<S>,
        event_id: &str,
        selections: &SelectionsByCategory,
    ) -> Result<(), ApiError> {
        let mut markets = serde_json::Map::new();
        for (category, choice) in selections {
            let mut outcome = serde_json::Map::new();
            outcome.insert(choice.outcome.clone(), choice.value.clone());
            markets.insert(category.clone(), Value::Object(outcome));
        }
        let mut body = serde_json::Map::new();
        body.insert("selectedOdd".to_string(), Value::Object(markets));

        let path = format!("{}/{}", endpoints::PLACE_ODD, event_id);
        let response = self
            .client
            .send_authed(session, ApiRequest::patch(path, Value::Object(body)))
            .await?;
        expect_success(response)?;
        Ok(())
    }

    /// Upload every guest slip entry to the server slip, then clear the
    /// local store. Returns the number of entries migrated.
    ///
    /// The local slip is cleared only after every upload succeeded; a
    /// partial failure surfaces the error and leaves the guest slip intact
    /// so the migration can be re-triggered. Conflicts with pre-existing
    /// server selections resolve to whatever the server keeps; nothing is
    /// merged client-side.
    pub async fn migrate_guest_to_server<S: LocalStore, G: LocalStore>(
        &self,
        session: &SessionStore<S>,
        guest: &GuestSlipStore<G>,
    ) -> Result<usize, ApiError> {
        let entries = guest.entries();
        if entries.is_empty() {
            return Ok(0);
        }

        for entry in &entries {
            let selections: SelectionsByCategory = entry
                .selections
                .iter()
                .map(|sel| {
                    (
                        sel.category.clone(),
                        SelectionChoice {
                            outcome: sel.odd_key.clone(),
                            value: sel.odd_value.clone(),
                            label: sel.label.clone(),
                            odd_id: sel.odd_id.clone(),
                        },
                    )
                })
                .collect();
            self.save_event_selections(session, &entry.event_id, &selections)
                .await?;
        }

        guest.clear().await;
        tracing::info!(count = entries.len(), "migrated guest slip to server");
        Ok(entries.len())
    }

    /// Finalize the current server slip into a bet.
    ///
    /// Pre-flight checks (stake parseable and positive, wallet balance ≥
    /// stake, at least one selection on the server slip) fail with
    /// [`ApiError::Validation`] before anything is sent; the server
    /// re-validates regardless. On success the slip is re-fetched and the
    /// session refreshed so the debited balance is visible; on failure the
    /// server's message is surfaced verbatim and nothing is mutated.
    pub async fn place_bet<S: LocalStore>(
        &self,
        session: &SessionStore<S>,
        stake_input: &str,
    ) -> Result<BetPlacement, ApiError> {
        let Some(stake) = store::odds::parse_stake(stake_input) else {
            return Err(ApiError::Validation(
                "Please add selections and enter a valid stake.".to_string(),
            ));
        };
        let Some(user) = session.current_user() else {
            return Err(ApiError::Validation(
                "User data not available. Please try again.".to_string(),
            ));
        };
        if user.wallet_balance < stake {
            return Err(ApiError::Validation(format!(
                "Insufficient funds. Your balance is ₦{}.",
                user.wallet_balance
            )));
        }

        let odd_ids: Vec<String> = self
            .fetch_current(session)
            .await?
            .into_iter()
            .map(|sel| sel.id)
            .filter(|id| !id.is_empty())
            .collect();
        if odd_ids.is_empty() {
            return Err(ApiError::Validation(
                "Your bet slip is empty. Please add selections to place a bet.".to_string(),
            ));
        }

        let response = self
            .client
            .send_authed(
                session,
                ApiRequest::post(
                    endpoints::CREATE_BET_SLIP,
                    json!({ "oddIds": odd_ids, "betAmount": stake }),
                ),
            )
            .await?;
        let response = expect_success(response)?;
        let message = message_or(&response.body, "Bet placed successfully!");

        // Best-effort resynchronization; the bet itself already succeeded.
        let selections = self.fetch_current(session).await.unwrap_or_default();
        let navigate = match self.client.refresh(session).await {
            Some(logout) => logout,
            None => NavRequest::to("/booked-bets"),
        };

        Ok(BetPlacement {
            message,
            selections,
            navigate,
            redirect_delay: self.client.config().booked_redirect_delay(),
        })
    }

    /// Delete one selection by id, then re-fetch the slip. On `Err` the
    /// caller keeps its cached view.
    pub async fn remove_one<S: LocalStore>(
        &self,
        session: &SessionStore<S>,
        selection_id: &str,
    ) -> Result<Vec<ServerSelection>, ApiError> {
        let path = format!("{}/{}", endpoints::DELETE_PLACED_ODD, selection_id);
        let response = self
            .client
            .send_authed(session, ApiRequest::delete(path))
            .await?;
        expect_success(response)?;
        self.fetch_current(session).await
    }

    /// Delete every selection, then re-fetch the (now empty) slip.
    pub async fn remove_all<S: LocalStore>(
        &self,
        session: &SessionStore<S>,
    ) -> Result<Vec<ServerSelection>, ApiError> {
        let response = self
            .client
            .send_authed(
                session,
                ApiRequest::delete(endpoints::DELETE_ALL_PLACED_ODDS),
            )
            .await?;
        expect_success(response)?;
        self.fetch_current(session).await
    }

    /// The user's finalized bet slips, newest first as the server returns
    /// them. A non-list body decodes as an empty history.
    pub async fn bet_history<S: LocalStore>(
        &self,
        session: &SessionStore<S>,
    ) -> Result<Vec<BetSlipRecord>, ApiError> {
        let response = self
            .client
            .send_authed(session, ApiRequest::get(endpoints::USER_BET_SLIPS))
            .await?;
        let response = expect_success(response)?;
        Ok(decode_list(response.body))
    }
}
