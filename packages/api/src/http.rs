//! # HTTP transport — the wire seam of the remote surface
//!
//! All network traffic goes through the [`Transport`] trait, so the endpoint
//! wrappers and the slip synchronizer can be exercised in tests against a
//! scripted fake instead of a live server. The shipped implementation is
//! [`HttpTransport`], a thin wrapper over [`reqwest::Client`] that attaches
//! the bearer token, serializes JSON bodies, and decodes whatever JSON the
//! server answers with — including error bodies.
//!
//! A transport error means the request never completed; a completed exchange
//! is always `Ok`, whatever the status code, and status handling happens one
//! layer up.

use serde::de::DeserializeOwned;
use serde_json::Value;

/// HTTP methods used by the betting API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

/// One outgoing request: method, path relative to the base URL, optional
/// bearer token, optional JSON body.
#[derive(Clone, Debug)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub token: Option<String>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            token: None,
            body: None,
        }
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            token: None,
            body: Some(body),
        }
    }

    pub fn patch(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Patch,
            path: path.into(),
            token: None,
            body: Some(body),
        }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            method: Method::Delete,
            path: path.into(),
            token: None,
            body: None,
        }
    }
}

/// A completed exchange: status code plus decoded JSON body (or `Null` when
/// the body was empty or not JSON).
#[derive(Clone, Debug)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Async trait for performing HTTP exchanges.
///
/// `Err` carries a diagnostic string and means no response was received.
pub trait Transport {
    fn send(
        &self,
        request: ApiRequest,
    ) -> impl std::future::Future<Output = Result<ApiResponse, String>>;
}

/// Production transport over [`reqwest`].
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(config: &crate::config::ClientConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .unwrap_or_else(|err| {
                tracing::warn!(%err, "falling back to default reqwest client");
                reqwest::Client::new()
            });
        Self {
            client,
            base_url: config.api.base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, String> {
        let url = format!("{}{}", self.base_url, request.path);
        let mut builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Patch => self.client.patch(&url),
            Method::Delete => self.client.delete(&url),
        };
        if let Some(token) = &request.token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|err| err.to_string())?;
        let status = response.status().as_u16();
        // Error bodies are JSON too; anything unparseable decays to Null.
        let body = response.json::<Value>().await.unwrap_or(Value::Null);
        Ok(ApiResponse { status, body })
    }
}

/// Decode a JSON array item by item, skipping malformed elements and
/// treating a non-list body as an empty list.
pub(crate) fn decode_list<T: DeserializeOwned>(body: Value) -> Vec<T> {
    let Value::Array(items) = body else {
        if !body.is_null() {
            tracing::warn!("expected a list response, got a different shape");
        }
        return Vec::new();
    };
    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(%err, "skipping malformed list element");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use store::ServerSelection;

    #[test]
    fn test_decode_list_tolerates_non_list_body() {
        let decoded: Vec<ServerSelection> = decode_list(json!({ "message": "nope" }));
        assert!(decoded.is_empty());

        let decoded: Vec<ServerSelection> = decode_list(Value::Null);
        assert!(decoded.is_empty());
    }

    #[test]
    fn test_decode_list_skips_malformed_elements() {
        let decoded: Vec<ServerSelection> = decode_list(json!([
            { "_id": "s1", "selectedOdd": { "1x2": { "homeTeamWinPoint": 1.5 } } },
            { "noId": true },
            42
        ]));
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].id, "s1");
    }
}
