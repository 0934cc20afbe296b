//! Score submission to the remote ranking service
//!
//! `POST <base>/register` with `{name, time, stars}`; the service answers with
//! every stored entry. Request encoding, response decoding and the in-flight
//! guard are plain functions so they can be tested natively; only the actual
//! HTTP call is wasm-only.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Ranking service used when settings don't override it
pub const DEFAULT_RANKING_URL: &str = "https://sky-angel-api.vercel.app";

/// One score as sent to and returned by the ranking service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    /// Seconds survived
    #[serde(deserialize_with = "lenient_count")]
    pub time: u32,
    #[serde(deserialize_with = "lenient_count")]
    pub stars: u32,
}

/// Accept any JSON number for a stored count: rounded, negatives floored at 0
fn lenient_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if !value.is_finite() {
        return Err(D::Error::custom("count is not a finite number"));
    }
    Ok(value.round().clamp(0.0, u32::MAX as f64) as u32)
}

/// Ways a submission can fail
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("network error: {0}")]
    Transport(String),
    #[error("error submitting score (HTTP {status}): {body}")]
    Status { status: u16, body: String },
    #[error("malformed ranking response: {0}")]
    Json(#[from] serde_json::Error),
    #[error("a submission is already in flight")]
    InFlight,
    #[error("player name is empty")]
    EmptyName,
    #[error("no finished run to submit")]
    NotFinished,
}

/// Full register endpoint for a service base URL
pub fn register_url(base_url: &str) -> String {
    format!("{}/register", base_url.trim_end_matches('/'))
}

/// JSON request body
pub fn encode_request(entry: &ScoreEntry) -> Result<String, SubmitError> {
    Ok(serde_json::to_string(entry)?)
}

/// Interpret the service's reply: non-2xx is an error carrying the body text,
/// otherwise the body must be a JSON array. Rows that aren't entries are
/// skipped with a warning.
pub fn parse_response(status: u16, body: &str) -> Result<Vec<ScoreEntry>, SubmitError> {
    if !(200..300).contains(&status) {
        return Err(SubmitError::Status {
            status,
            body: body.to_string(),
        });
    }
    let rows: Vec<serde_json::Value> = serde_json::from_str(body)?;
    let entries = rows
        .into_iter()
        .filter_map(|row| match serde_json::from_value::<ScoreEntry>(row) {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::warn!("Skipping malformed ranking entry: {}", e);
                None
            }
        })
        .collect();
    Ok(entries)
}

/// Guards against duplicate submissions and tracks whether one has finished
/// since the last game over
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Submission {
    in_flight: bool,
    completed: bool,
}

impl Submission {
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// A submission finished (either way) since the last reset
    pub fn has_completed(&self) -> bool {
        self.completed
    }

    /// Claim the in-flight slot and build the entry to send
    pub fn begin(&mut self, name: &str, time: u32, stars: u32) -> Result<ScoreEntry, SubmitError> {
        if self.in_flight {
            return Err(SubmitError::InFlight);
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(SubmitError::EmptyName);
        }
        self.in_flight = true;
        Ok(ScoreEntry {
            name: name.to_string(),
            time,
            stars,
        })
    }

    /// Release the in-flight slot
    pub fn finish(&mut self) {
        self.in_flight = false;
        self.completed = true;
    }

    /// Forget the previous run's submission
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// HTTP client for the ranking service
#[derive(Debug, Clone)]
pub struct ScoreClient {
    base_url: String,
}

impl Default for ScoreClient {
    fn default() -> Self {
        Self::new(DEFAULT_RANKING_URL)
    }
}

impl ScoreClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn register_url(&self) -> String {
        register_url(&self.base_url)
    }

    /// POST the entry and return the service's full list
    #[cfg(target_arch = "wasm32")]
    pub async fn submit(&self, entry: &ScoreEntry) -> Result<Vec<ScoreEntry>, SubmitError> {
        use gloo_net::http::Request;

        let payload = encode_request(entry)?;
        log::info!("Submitting score: {}", payload);

        let response = Request::post(&self.register_url())
            .header("Content-Type", "application/json")
            .body(payload)
            .map_err(|e| SubmitError::Transport(e.to_string()))?
            .send()
            .await
            .map_err(|e| SubmitError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SubmitError::Transport(e.to_string()))?;
        parse_response(status, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_url() {
        assert_eq!(
            register_url("https://example.test/"),
            "https://example.test/register"
        );
        assert_eq!(
            ScoreClient::default().register_url(),
            "https://sky-angel-api.vercel.app/register"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let entry = ScoreEntry {
            name: "Ada".into(),
            time: 42,
            stars: 3,
        };
        let json: serde_json::Value = serde_json::from_str(&encode_request(&entry).unwrap()).unwrap();
        assert_eq!(json, serde_json::json!({ "name": "Ada", "time": 42, "stars": 3 }));
    }

    #[test]
    fn test_parse_success() {
        let body = r#"[{"name":"a","time":10,"stars":2},{"name":"b","time":5,"stars":7,"id":"x1"}]"#;
        let entries = parse_response(200, body).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].stars, 7);
    }

    #[test]
    fn test_parse_tolerates_odd_rows() {
        let body = r#"[
            {"name":"neg","time":-4,"stars":2},
            {"name":"frac","time":12.6,"stars":1.2},
            {"name":"nostars","time":3},
            {"time":5,"stars":5},
            {"name":"ok","time":8,"stars":3}
        ]"#;
        let entries = parse_response(200, body).unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["neg", "frac", "ok"]);
        assert_eq!(entries[0].time, 0);
        assert_eq!((entries[1].time, entries[1].stars), (13, 1));
    }

    #[test]
    fn test_parse_error_status_keeps_body() {
        let err = parse_response(503, "down for maintenance").unwrap_err();
        match &err {
            SubmitError::Status { status, body } => {
                assert_eq!(*status, 503);
                assert_eq!(body, "down for maintenance");
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert!(err.to_string().contains("down for maintenance"));
    }

    #[test]
    fn test_parse_malformed_json() {
        assert!(matches!(
            parse_response(200, "<html>oops</html>"),
            Err(SubmitError::Json(_))
        ));
        // An object where an array is expected is malformed too
        assert!(matches!(
            parse_response(201, r#"{"name":"a"}"#),
            Err(SubmitError::Json(_))
        ));
    }

    #[test]
    fn test_submission_guard() {
        let mut submission = Submission::default();
        let entry = submission.begin("  Ada ", 12, 1).unwrap();
        assert_eq!(entry.name, "Ada");
        assert!(submission.is_in_flight());
        assert!(!submission.has_completed());

        assert!(matches!(
            submission.begin("Bob", 1, 1),
            Err(SubmitError::InFlight)
        ));

        submission.finish();
        assert!(!submission.is_in_flight());
        assert!(submission.has_completed());

        submission.reset();
        assert!(!submission.has_completed());
    }

    #[test]
    fn test_blank_name_rejected_without_claiming_slot() {
        let mut submission = Submission::default();
        assert!(matches!(
            submission.begin("   ", 1, 1),
            Err(SubmitError::EmptyName)
        ));
        assert!(!submission.is_in_flight());
    }
}
