//! # Wallet endpoint
//!
//! Authenticated read of the wallet balance and payment history backing the
//! wallet page. The balance shown before placing a bet still comes from the
//! session's user record; this endpoint is the fuller, paginated view.

use serde::{Deserialize, Serialize};
use store::{LocalStore, SessionStore};

use crate::client::ApiClient;
use crate::endpoints;
use crate::error::{expect_success, ApiError};
use crate::http::{ApiRequest, Transport};

/// One payment ledger entry.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Wallet balance plus a page of payment history.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletHistory {
    #[serde(default)]
    pub wallet_balance: f64,
    #[serde(default)]
    pub payments: Vec<PaymentRecord>,
}

impl<T: Transport> ApiClient<T> {
    /// Balance and payment history, paginated. A malformed body decodes as
    /// an empty default so the wallet view keeps rendering.
    pub async fn wallet_and_payment_history<S: LocalStore>(
        &self,
        session: &SessionStore<S>,
        limit: u32,
        skip: u32,
    ) -> Result<WalletHistory, ApiError> {
        let path = format!("{}?limit={limit}&skip={skip}", endpoints::WALLET_HISTORY);
        let response = self.send_authed(session, ApiRequest::get(path)).await?;
        let response = expect_success(response)?;
        Ok(serde_json::from_value(response.body).unwrap_or_else(|err| {
            tracing::warn!(%err, "wallet history had an unexpected shape");
            WalletHistory::default()
        }))
    }
}
