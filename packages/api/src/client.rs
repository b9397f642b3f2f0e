//! # ApiClient — shared request plumbing
//!
//! Owns the transport and configuration. Endpoint wrappers live in sibling
//! modules as further `impl` blocks on [`ApiClient`]; the slip synchronizer
//! ([`crate::SlipSync`]) wraps a client of its own.
//!
//! [`ApiClient::send_authed`] is the cross-cutting 401/403 handler: every
//! authenticated call funnels through it, so session expiry is enforced in
//! one place rather than left to individual views.

use std::sync::Arc;

use store::{LocalStore, SessionStore};

use crate::config::ClientConfig;
use crate::error::{ApiError, SESSION_EXPIRED_MESSAGE};
use crate::http::{ApiRequest, ApiResponse, Transport};

/// Typed client for the betting API.
#[derive(Clone)]
pub struct ApiClient<T: Transport> {
    transport: Arc<T>,
    config: ClientConfig,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T, config: ClientConfig) -> Self {
        Self {
            transport: Arc::new(transport),
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Perform an unauthenticated exchange.
    pub(crate) async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        self.transport.send(request).await.map_err(ApiError::Network)
    }

    /// Perform an authenticated exchange.
    ///
    /// Attaches the session's bearer token; a missing token or a 401/403
    /// answer clears the session (exactly once across concurrent calls) and
    /// surfaces [`ApiError::SessionExpired`].
    pub(crate) async fn send_authed<S: LocalStore>(
        &self,
        session: &SessionStore<S>,
        mut request: ApiRequest,
    ) -> Result<ApiResponse, ApiError> {
        let Some(token) = session.access_token() else {
            let redirect = session.expire(SESSION_EXPIRED_MESSAGE).await;
            return Err(ApiError::SessionExpired { redirect });
        };
        request.token = Some(token);

        let response = self.send(request).await?;
        if response.status == 401 || response.status == 403 {
            let redirect = session.expire(SESSION_EXPIRED_MESSAGE).await;
            return Err(ApiError::SessionExpired { redirect });
        }
        Ok(response)
    }

    #[cfg(test)]
    pub(crate) fn transport_for_tests(&self) -> &T {
        &self.transport
    }
}
