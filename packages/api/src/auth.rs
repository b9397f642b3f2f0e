//! # Authentication endpoints
//!
//! Login, registration, password reset and token refresh. Refresh is the
//! networked half of the session lifecycle: the [`store::SessionStore`] owns
//! the triple, this module talks to the token endpoint and installs (or
//! clears) the result.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use store::{LocalStore, NavRequest, SessionStore, UserProfile};

use crate::client::ApiClient;
use crate::endpoints;
use crate::error::{expect_success, ApiError};
use crate::http::{ApiRequest, Transport};

/// Successful authentication payload: the user record plus both tokens.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub user: UserProfile,
    pub access_token: String,
    pub refresh_token: String,
}

/// Sign-up form payload.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPayload {
    pub nickname: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

impl<T: Transport> ApiClient<T> {
    /// Exchange credentials for a user record and token pair.
    ///
    /// The caller decides what to do with the result — typically
    /// [`store::SessionStore::login`] with the view's redirect target.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession, ApiError> {
        let response = self
            .send(ApiRequest::post(
                endpoints::LOGIN,
                json!({ "email": email, "password": password }),
            ))
            .await?;
        let response = expect_success(response)?;
        decode_auth_session(response.body, response.status)
    }

    /// Create an account. Returns the server's confirmation message.
    pub async fn register(&self, payload: &RegisterPayload) -> Result<String, ApiError> {
        let body = serde_json::to_value(payload).unwrap_or(Value::Null);
        let response = self
            .send(ApiRequest::post(endpoints::SIGNUP, body))
            .await?;
        let response = expect_success(response)?;
        Ok(message_or(&response.body, "Registration successful."))
    }

    /// Request a password-reset email. Returns the server's message.
    pub async fn forgot_password(&self, email: &str) -> Result<String, ApiError> {
        let response = self
            .send(ApiRequest::post(
                endpoints::FORGOT_PASSWORD,
                json!({ "email": email }),
            ))
            .await?;
        let response = expect_success(response)?;
        Ok(message_or(
            &response.body,
            "If that address exists, a reset link has been sent.",
        ))
    }

    /// Refresh the session's token pair.
    ///
    /// Never fails toward the caller: without a refresh token, or on any
    /// network/server failure, the session is logged out and the resulting
    /// navigation returned. On success the returned user record and token
    /// pair are installed — including a rotated refresh token if the server
    /// issued one — and `None` is returned.
    pub async fn refresh<S: LocalStore>(
        &self,
        session: &SessionStore<S>,
    ) -> Option<NavRequest> {
        let Some(refresh_token) = session.refresh_token() else {
            return Some(session.logout().await);
        };

        let response = self
            .send(ApiRequest::post(
                endpoints::REFRESH_TOKEN,
                json!({ "refreshToken": refresh_token }),
            ))
            .await;

        let auth = match response {
            Ok(response) => {
                expect_success(response).and_then(|ok| decode_auth_session(ok.body, ok.status))
            }
            Err(err) => Err(err),
        };

        match auth {
            Ok(auth) => {
                session
                    .install(auth.user, auth.access_token, auth.refresh_token)
                    .await;
                None
            }
            Err(err) => {
                tracing::error!(%err, "token refresh failed");
                Some(session.logout().await)
            }
        }
    }
}

fn decode_auth_session(body: Value, status: u16) -> Result<AuthSession, ApiError> {
    serde_json::from_value(body).map_err(|err| {
        tracing::error!(%err, "auth response had an unexpected shape");
        ApiError::Server {
            status,
            message: "Unexpected response from the server.".to_string(),
        }
    })
}

pub(crate) fn message_or(body: &Value, fallback: &str) -> String {
    body.get("message")
        .and_then(Value::as_str)
        .unwrap_or(fallback)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::http::Method;
    use crate::test_support::{auth_body, FakeTransport, TestSession};
    use serde_json::json;

    fn client(transport: FakeTransport) -> ApiClient<FakeTransport> {
        ApiClient::new(transport, ClientConfig::default())
    }

    #[tokio::test]
    async fn test_login_parses_user_and_tokens() {
        let transport = FakeTransport::new();
        transport.respond(
            Method::Post,
            endpoints::LOGIN,
            200,
            auth_body("a@b.c", "acc-1", "ref-1", 500.0),
        );

        let auth = client(transport).login("a@b.c", "pw").await.unwrap();
        assert_eq!(auth.user.email, "a@b.c");
        assert_eq!(auth.access_token, "acc-1");
        assert_eq!(auth.refresh_token, "ref-1");
    }

    #[tokio::test]
    async fn test_login_surfaces_server_message_verbatim() {
        let transport = FakeTransport::new();
        transport.respond(
            Method::Post,
            endpoints::LOGIN,
            401,
            json!({ "message": "Invalid email or password" }),
        );

        let err = client(transport).login("a@b.c", "wrong").await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid email or password");
    }

    #[tokio::test]
    async fn test_refresh_without_token_logs_out() {
        let session = TestSession::unauthenticated();
        let nav = client(FakeTransport::new()).refresh(&session.store).await;
        assert_eq!(nav.unwrap().target, "/login");
    }

    #[tokio::test]
    async fn test_refresh_installs_rotated_pair() {
        let session = TestSession::logged_in("a@b.c", 500.0).await;
        let transport = FakeTransport::new();
        transport.respond(
            Method::Post,
            endpoints::REFRESH_TOKEN,
            200,
            auth_body("a@b.c", "acc-2", "ref-2", 450.0),
        );

        let nav = client(transport).refresh(&session.store).await;
        assert!(nav.is_none());

        let snap = session.store.snapshot();
        assert_eq!(snap.access_token.as_deref(), Some("acc-2"));
        // The rotated refresh token is stored, not the old one
        assert_eq!(snap.refresh_token.as_deref(), Some("ref-2"));
        assert_eq!(snap.user.unwrap().wallet_balance, 450.0);
    }

    #[tokio::test]
    async fn test_refresh_failure_clears_session() {
        let session = TestSession::logged_in("a@b.c", 500.0).await;
        let transport = FakeTransport::new();
        transport.fail(Method::Post, endpoints::REFRESH_TOKEN, "connection reset");

        let nav = client(transport).refresh(&session.store).await;
        assert_eq!(nav.unwrap().target, "/login");
        assert!(!session.store.is_authenticated());
    }

    #[tokio::test]
    async fn test_refresh_rejection_clears_session() {
        let session = TestSession::logged_in("a@b.c", 500.0).await;
        let transport = FakeTransport::new();
        transport.respond(
            Method::Post,
            endpoints::REFRESH_TOKEN,
            401,
            json!({ "message": "Refresh token expired" }),
        );

        let nav = client(transport).refresh(&session.store).await;
        assert_eq!(nav.unwrap().target, "/login");
        assert!(!session.store.is_authenticated());
    }
}
