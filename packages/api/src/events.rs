//! # Event listing endpoints
//!
//! Public reads (no token required) backing the event listing, event detail
//! and live-matches views. Responses are decoded defensively: a non-list
//! body or a malformed element never takes a view down. The live feed is a
//! relay of an upstream sports-data provider and nests its list under a
//! `response` member.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::ApiClient;
use crate::endpoints;
use crate::error::{expect_success, ApiError};
use crate::http::{decode_list, ApiRequest, Transport};

/// A sporting event as listed by the API, with its bettable odds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SportEvent {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub event_description: Option<String>,
    #[serde(default)]
    pub home_team: String,
    #[serde(default)]
    pub away_team: String,
    /// `"upcoming"`, `"live"` or `"finished"`.
    #[serde(default)]
    pub event_status: Option<String>,
    #[serde(default)]
    pub home_team_score: Option<i64>,
    #[serde(default)]
    pub away_team_score: Option<i64>,
    #[serde(default)]
    pub event_date: Option<String>,
    #[serde(default)]
    pub event_time: Option<String>,
    #[serde(default)]
    pub event_image: Option<String>,
    /// Market category → outcome-key/odd-value object.
    #[serde(default)]
    pub available_odds: serde_json::Map<String, serde_json::Value>,
}

/// One live fixture as relayed from the upstream sports-data feed.
///
/// Every level defaults, since the feed's schema is outside this client's
/// control and a partially filled fixture still renders as a card.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LiveMatch {
    #[serde(default)]
    pub fixture: LiveFixture,
    #[serde(default)]
    pub teams: LiveTeams,
    #[serde(default)]
    pub goals: LiveGoals,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LiveFixture {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub status: LiveStatus,
    #[serde(default)]
    pub venue: LiveVenue,
    #[serde(default)]
    pub league: Option<LiveLeague>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LiveStatus {
    /// Short code, e.g. `"1H"`, `"HT"`, `"FT"`, `"NS"`.
    #[serde(default)]
    pub short: Option<String>,
    /// Minutes played when in progress.
    #[serde(default)]
    pub elapsed: Option<i64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LiveVenue {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LiveLeague {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LiveTeams {
    #[serde(default)]
    pub home: LiveTeam,
    #[serde(default)]
    pub away: LiveTeam,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LiveTeam {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
}

/// Scoreline; `None` before kickoff.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LiveGoals {
    #[serde(default)]
    pub home: Option<i64>,
    #[serde(default)]
    pub away: Option<i64>,
}

impl<T: Transport> ApiClient<T> {
    /// All listed events. A malformed body decodes as an empty list.
    pub async fn all_events(&self) -> Result<Vec<SportEvent>, ApiError> {
        let response = self.send(ApiRequest::get(endpoints::ALL_EVENTS)).await?;
        let response = expect_success(response)?;
        Ok(decode_list(response.body))
    }

    /// One event by id.
    pub async fn event_detail(&self, event_id: &str) -> Result<SportEvent, ApiError> {
        let response = self
            .send(ApiRequest::get(format!(
                "{}/{}",
                endpoints::ALL_EVENTS,
                event_id
            )))
            .await?;
        let response = expect_success(response)?;
        serde_json::from_value(response.body).map_err(|err| {
            tracing::error!(%err, event_id, "event detail had an unexpected shape");
            ApiError::Server {
                status: response.status,
                message: "Unexpected response from the server.".to_string(),
            }
        })
    }

    /// Live fixtures relayed from the upstream feed.
    ///
    /// The feed wraps its list in `{ "response": [...], "results": N }`; a
    /// missing or non-list `response` member decodes as no live matches.
    pub async fn live_events(&self) -> Result<Vec<LiveMatch>, ApiError> {
        let response = self.send(ApiRequest::get(endpoints::LIVE_EVENTS)).await?;
        let response = expect_success(response)?;
        let matches = response
            .body
            .get("response")
            .cloned()
            .unwrap_or(Value::Null);
        if matches.is_null() {
            tracing::warn!("live events feed had no response member");
        }
        Ok(decode_list(matches))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::http::Method;
    use crate::test_support::FakeTransport;
    use serde_json::json;

    #[tokio::test]
    async fn test_all_events_decodes_listing() {
        let transport = FakeTransport::new();
        transport.respond(
            Method::Get,
            endpoints::ALL_EVENTS,
            200,
            json!([
                {
                    "_id": "e1",
                    "homeTeam": "Lions",
                    "awayTeam": "Tigers",
                    "eventStatus": "upcoming",
                    "availableOdds": { "1x2": { "homeTeamWinPoint": 1.5, "drawPoint": 3.2, "awayTeamWinPoint": 4.0 } }
                }
            ]),
        );
        let client = ApiClient::new(transport, ClientConfig::default());

        let events = client.all_events().await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].home_team, "Lions");
        assert!(events[0].available_odds.contains_key("1x2"));
    }

    #[tokio::test]
    async fn test_all_events_tolerates_object_body() {
        let transport = FakeTransport::new();
        transport.respond(
            Method::Get,
            endpoints::ALL_EVENTS,
            200,
            json!({ "unexpected": "shape" }),
        );
        let client = ApiClient::new(transport, ClientConfig::default());

        assert!(client.all_events().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_live_events_unwraps_nested_response_list() {
        let transport = FakeTransport::new();
        transport.respond(
            Method::Get,
            endpoints::LIVE_EVENTS,
            200,
            json!({
                "response": [
                    {
                        "fixture": {
                            "id": 215662,
                            "status": { "short": "1H", "elapsed": 37 },
                            "venue": { "name": "Anfield" },
                            "league": { "name": "Premier League" }
                        },
                        "teams": {
                            "home": { "name": "Liverpool", "logo": "https://cdn/l.png" },
                            "away": { "name": "Everton", "logo": "https://cdn/e.png" }
                        },
                        "goals": { "home": 2, "away": 0 }
                    }
                ],
                "results": 1
            }),
        );
        let client = ApiClient::new(transport, ClientConfig::default());

        let matches = client.live_events().await.unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].fixture.id, 215662);
        assert_eq!(matches[0].fixture.status.short.as_deref(), Some("1H"));
        assert_eq!(matches[0].teams.home.name.as_deref(), Some("Liverpool"));
        assert_eq!(matches[0].goals.home, Some(2));
        // Not-started fixtures carry no score
        assert_eq!(LiveGoals::default().home, None);
    }

    #[tokio::test]
    async fn test_live_events_tolerates_missing_response_member() {
        let transport = FakeTransport::new();
        transport.respond(
            Method::Get,
            endpoints::LIVE_EVENTS,
            200,
            json!({ "results": 0 }),
        );
        let client = ApiClient::new(transport, ClientConfig::default());

        assert!(client.live_events().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_live_events_falls_back_to_status_line_on_bare_error() {
        let transport = FakeTransport::new();
        transport.respond(Method::Get, endpoints::LIVE_EVENTS, 503, Value::Null);
        let client = ApiClient::new(transport, ClientConfig::default());

        let err = client.live_events().await.unwrap_err();
        assert_eq!(err.to_string(), "HTTP error! status: 503");
    }
}
