use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

/// Pass-through fields forwarded with every prompt. Not interpreted locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AskOptions {
    pub style: String,
    pub session_id: String,
    pub short_response: bool,
}

impl Default for AskOptions {
    fn default() -> Self {
        Self {
            style: "concise".to_string(),
            session_id: "default".to_string(),
            short_response: false,
        }
    }
}

#[derive(Serialize)]
struct AskRequest<'a> {
    prompt: &'a str,
    style: &'a str,
    session_id: &'a str,
    short_response: bool,
}

/// What the answer service sent back on success
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerPayload {
    pub response: Option<String>,
    /// Optional `type` tag some services attach, e.g. `name_check`
    pub kind: Option<String>,
}

impl AnswerPayload {
    pub fn text(response: impl Into<String>) -> Self {
        Self {
            response: Some(response.into()),
            kind: None,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Lenient read of a 2xx body: anything without a usable `response`
    /// string becomes an empty payload instead of an error.
    pub fn from_body(body: &str) -> Self {
        let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) else {
            return Self::empty();
        };
        let response = map
            .get("response")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        let kind = map.get("type").and_then(Value::as_str).map(str::to_string);
        Self { response, kind }
    }

    pub fn into_text(self, fallback: &str) -> String {
        self.response.unwrap_or_else(|| fallback.to_string())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AskError {
    #[error("{0}")]
    Transport(String),
    #[error("{} - {body}", status_line(*status, status_text))]
    Remote {
        status: u16,
        status_text: String,
        body: String,
    },
}

impl AskError {
    fn remote(status: reqwest::StatusCode, raw_body: &str) -> Self {
        Self::Remote {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            body: serialize_body(raw_body),
        }
    }
}

/// `"404 Not Found"`, or just `"599"` when the status has no reason phrase
fn status_line(status: u16, status_text: &str) -> String {
    if status_text.is_empty() {
        status.to_string()
    } else {
        format!("{status} {status_text}")
    }
}

/// Render a response body for display: JSON is re-serialized compactly,
/// anything else is shown as a quoted JSON string.
fn serialize_body(raw: &str) -> String {
    match serde_json::from_str::<Value>(raw) {
        Ok(value) => value.to_string(),
        Err(_) => Value::String(raw.to_string()).to_string(),
    }
}

/// One request, one reply. Implementations must not retry or cache.
#[async_trait]
pub trait AnswerClient: Send + Sync {
    async fn ask(&self, prompt: &str, options: &AskOptions) -> Result<AnswerPayload, AskError>;
}

#[derive(Clone)]
pub struct HttpAnswerClient {
    client: Client,
    endpoint: String,
}

impl HttpAnswerClient {
    pub fn new(endpoint: &str) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.to_string(),
        }
    }
}

#[async_trait]
impl AnswerClient for HttpAnswerClient {
    async fn ask(&self, prompt: &str, options: &AskOptions) -> Result<AnswerPayload, AskError> {
        let request = AskRequest {
            prompt,
            style: &options.style,
            session_id: &options.session_id,
            short_response: options.short_response,
        };

        debug!(endpoint = %self.endpoint, style = %options.style, "sending prompt");

        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| AskError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AskError::Transport(e.to_string()))?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "answer service returned an error status");
            return Err(AskError::remote(status, &body));
        }

        let payload = AnswerPayload::from_body(&body);
        if payload.response.is_none() {
            warn!("answer service reply had no response field");
        }
        debug!(kind = ?payload.kind, "received answer");
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn options() -> AskOptions {
        AskOptions {
            style: "concise".to_string(),
            session_id: "default".to_string(),
            short_response: false,
        }
    }

    #[tokio::test]
    async fn test_posts_prompt_with_json_headers() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat")
            .match_header("content-type", "application/json")
            .match_header("accept", "application/json")
            .match_body(Matcher::Json(json!({
                "prompt": "Salut",
                "style": "concise",
                "session_id": "default",
                "short_response": false
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"response":"Bonjour","type":"ollama_response"}"#)
            .expect(1)
            .create_async()
            .await;

        let client = HttpAnswerClient::new(&format!("{}/chat", server.url()));
        let payload = client.ask("Salut", &options()).await.unwrap();

        assert_eq!(payload.response.as_deref(), Some("Bonjour"));
        assert_eq!(payload.kind.as_deref(), Some("ollama_response"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_missing_response_field_is_not_an_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat")
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let client = HttpAnswerClient::new(&format!("{}/chat", server.url()));
        let payload = client.ask("Salut", &options()).await.unwrap();

        assert_eq!(payload.response, None);
        assert_eq!(payload.into_text("Aucune réponse"), "Aucune réponse");
    }

    #[tokio::test]
    async fn test_non_json_success_body_downgrades_to_empty() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat")
            .with_status(200)
            .with_body("<html>oops</html>")
            .create_async()
            .await;

        let client = HttpAnswerClient::new(&format!("{}/chat", server.url()));
        let payload = client.ask("Salut", &options()).await.unwrap();
        assert_eq!(payload, AnswerPayload::empty());
    }

    #[tokio::test]
    async fn test_error_status_carries_status_and_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat")
            .with_status(500)
            .with_body(r#"{"error": "Erreur de traitement"}"#)
            .create_async()
            .await;

        let client = HttpAnswerClient::new(&format!("{}/chat", server.url()));
        let err = client.ask("Salut", &options()).await.unwrap_err();

        assert_eq!(
            err,
            AskError::Remote {
                status: 500,
                status_text: "Internal Server Error".to_string(),
                body: r#"{"error":"Erreur de traitement"}"#.to_string(),
            }
        );
        assert_eq!(
            err.to_string(),
            r#"500 Internal Server Error - {"error":"Erreur de traitement"}"#
        );
    }

    #[tokio::test]
    async fn test_error_status_with_plain_body_is_quoted() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat")
            .with_status(404)
            .with_body("Not Found")
            .create_async()
            .await;

        let client = HttpAnswerClient::new(&format!("{}/chat", server.url()));
        let err = client.ask("Salut", &options()).await.unwrap_err();
        assert_eq!(err.to_string(), r#"404 Not Found - "Not Found""#);
    }

    #[tokio::test]
    async fn test_unknown_status_has_no_empty_reason() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat")
            .with_status(599)
            .with_body(r#"{"error":"x"}"#)
            .create_async()
            .await;

        let client = HttpAnswerClient::new(&format!("{}/chat", server.url()));
        let err = client.ask("Salut", &options()).await.unwrap_err();
        assert_eq!(err.to_string(), r#"599 - {"error":"x"}"#);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        let client = HttpAnswerClient::new("http://127.0.0.1:1/chat");
        let err = client.ask("Salut", &options()).await.unwrap_err();
        assert!(matches!(err, AskError::Transport(ref msg) if !msg.is_empty()));
    }

    #[test]
    fn test_payload_ignores_non_string_response() {
        assert_eq!(AnswerPayload::from_body(r#"{"response": 42}"#).response, None);
        assert_eq!(AnswerPayload::from_body(r#"{"response": ""}"#).response, None);
        assert_eq!(AnswerPayload::from_body("[1,2]"), AnswerPayload::empty());
    }
}
