//! # API crate — remote surface of the betting client
//!
//! Everything that talks to the betting server lives here: the typed
//! [`ApiClient`] with its endpoint wrappers, and the [`SlipSync`] bridge
//! between the local guest slip and the authoritative server-side slip. The
//! local stores themselves live in the `store` crate; this crate drives them
//! when the network is involved (session expiry, token refresh, guest slip
//! migration).
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`auth`] | Login, registration, password reset, token refresh |
//! | [`client`] | Shared request plumbing, cross-cutting 401/403 handling |
//! | [`config`] | TOML client configuration with production defaults |
//! | [`error`] | [`ApiError`] taxonomy (network / server / validation / session expiry) |
//! | [`events`] | Public event listing and detail reads |
//! | [`http`] | [`Transport`] seam and the `reqwest`-backed implementation |
//! | [`slip_sync`] | Server slip fetch/save/migrate/finalize |
//! | [`wallet`] | Wallet balance and payment history |

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod events;
pub mod http;
pub mod slip_sync;
pub mod wallet;

#[cfg(test)]
pub(crate) mod test_support;

/// Endpoint paths, relative to the configured API base URL.
pub mod endpoints {
    pub const LOGIN: &str = "/auth/login";
    pub const SIGNUP: &str = "/auth/signup";
    pub const REFRESH_TOKEN: &str = "/auth/refresh-token";
    pub const FORGOT_PASSWORD: &str = "/auth/forget-password";
    pub const ALL_EVENTS: &str = "/user/all-events";
    pub const LIVE_EVENTS: &str = "/live-events/rapid-api-events";
    pub const PLACE_ODD: &str = "/user/place-odd";
    pub const ALL_PLACED_ODDS: &str = "/user/all-placed-odds";
    pub const DELETE_PLACED_ODD: &str = "/user/delete-placed-odd";
    pub const DELETE_ALL_PLACED_ODDS: &str = "/user/delete-all-placed-odds";
    pub const CREATE_BET_SLIP: &str = "/user/create-bet-slip";
    pub const USER_BET_SLIPS: &str = "/user/bet-slips";
    pub const WALLET_HISTORY: &str = "/payment/wallet-and-payment-history";
}

pub use auth::{AuthSession, RegisterPayload};
pub use client::ApiClient;
pub use config::ClientConfig;
pub use error::{ApiError, SESSION_EXPIRED_MESSAGE};
pub use events::{LiveMatch, SportEvent};
pub use http::{ApiRequest, ApiResponse, HttpTransport, Method, Transport};
pub use slip_sync::{BetPlacement, SlipSync};
pub use wallet::{PaymentRecord, WalletHistory};
