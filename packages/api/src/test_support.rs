//! Shared fixtures for the endpoint tests: a scripted [`Transport`] and a
//! pre-populated session over a [`MemoryStore`].

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use serde_json::{json, Value};
use store::{MemoryStore, SessionStore, UserProfile};

use crate::http::{ApiRequest, ApiResponse, Method, Transport};

type Scripted = Result<ApiResponse, String>;

/// In-memory transport with responses scripted per `(method, path)`.
///
/// Multiple responses for the same route form a queue; the final one is
/// sticky and answers every later request, so a single `respond` call covers
/// any number of retries of the same route.
#[derive(Clone, Default)]
pub(crate) struct FakeTransport {
    responses: Arc<Mutex<HashMap<(Method, String), VecDeque<Scripted>>>>,
    requests: Arc<Mutex<Vec<ApiRequest>>>,
}

impl FakeTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Script a completed exchange for `method` + `path`.
    pub(crate) fn respond(&self, method: Method, path: impl Into<String>, status: u16, body: Value) {
        self.push(method, path.into(), Ok(ApiResponse { status, body }));
    }

    /// Script a transport-level failure (request never completes).
    pub(crate) fn fail(&self, method: Method, path: impl Into<String>, error: &str) {
        self.push(method, path.into(), Err(error.to_string()));
    }

    /// Every request sent so far, in order.
    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn push(&self, method: Method, path: String, scripted: Scripted) {
        self.responses
            .lock()
            .unwrap()
            .entry((method, path))
            .or_default()
            .push_back(scripted);
    }
}

impl Transport for FakeTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, String> {
        self.requests.lock().unwrap().push(request.clone());
        let mut responses = self.responses.lock().unwrap();
        let queue = responses
            .get_mut(&(request.method, request.path.clone()))
            .ok_or_else(|| {
                format!(
                    "no scripted response for {:?} {}",
                    request.method, request.path
                )
            })?;
        if queue.len() > 1 {
            queue.pop_front().unwrap()
        } else {
            queue
                .front()
                .cloned()
                .ok_or_else(|| format!("response queue drained for {}", request.path))?
        }
    }
}

/// A session over a fresh [`MemoryStore`].
pub(crate) struct TestSession {
    pub(crate) store: SessionStore<MemoryStore>,
}

impl TestSession {
    pub(crate) fn unauthenticated() -> Self {
        Self {
            store: SessionStore::new(MemoryStore::new()),
        }
    }

    /// A session already holding tokens `"acc"` / `"ref"` and a user with
    /// the given email and wallet balance.
    pub(crate) async fn logged_in(email: &str, balance: f64) -> Self {
        let session = Self::unauthenticated();
        let user: UserProfile = serde_json::from_value(json!({
            "_id": "u1",
            "nickname": "tester",
            "email": email,
            "walletBalance": balance,
        }))
        .unwrap();
        session
            .store
            .install(user, "acc".to_string(), "ref".to_string())
            .await;
        session
    }
}

/// The auth endpoints' success body: user record plus both tokens.
pub(crate) fn auth_body(email: &str, access: &str, refresh: &str, balance: f64) -> Value {
    json!({
        "user": {
            "_id": "u1",
            "nickname": "tester",
            "email": email,
            "walletBalance": balance,
        },
        "accessToken": access,
        "refreshToken": refresh,
    })
}
