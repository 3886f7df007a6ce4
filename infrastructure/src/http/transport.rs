//! HTTP adapter for the [`ChatTransport`] port.

use super::dto::{ChatRequest, ImportRequest, MetaDto};
use super::error::{HttpTransportError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;
use yara_application::{ChatTransport, TransportError};
use yara_domain::util::truncate_str;
use yara_domain::{ChatReply, ClientId, LearningInsights, ResolvedContext};

/// Service the client talks to when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "https://yara-0ecr.onrender.com";

/// Longest error body echoed back in a status error.
const MAX_ERROR_BODY: usize = 200;

/// JSON-over-HTTP client for the reasoning service.
#[derive(Debug, Clone)]
pub struct HttpChatTransport {
    base_url: String,
    http: Client,
}

impl HttpChatTransport {
    /// Create a transport for `base_url`.
    ///
    /// `timeout` bounds every request end to end; `None` waits forever.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: builder.build()?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post_chat(
        &self,
        client_id: &ClientId,
        text: &str,
        context: &ResolvedContext,
    ) -> Result<ChatReply> {
        let url = format!("{}/chat", self.base_url);
        let body = ChatRequest {
            user_id: client_id.as_str(),
            message: text,
            meta: MetaDto::from(context),
        };
        debug!("POST {}", url);
        let response = self.http.post(&url).json(&body).send().await?;
        self.json_response(response).await
    }

    async fn post_import(&self, client_id: &ClientId, chat_text: &str) -> Result<ChatReply> {
        let url = format!("{}/chat/whatsapp", self.base_url);
        let body = ImportRequest {
            user_id: client_id.as_str(),
            chat_text,
        };
        debug!("POST {} ({} bytes)", url, chat_text.len());
        let response = self.http.post(&url).json(&body).send().await?;
        self.json_response(response).await
    }

    async fn get_insights(&self, client_id: &ClientId) -> Result<LearningInsights> {
        let url = format!("{}/chat/learning/{}", self.base_url, client_id);
        debug!("GET {}", url);
        let response = self.http.get(&url).send().await?;
        self.json_response(response).await
    }

    /// Decode a successful JSON response or convert an error response.
    async fn json_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();
        let raw = response.text().await?;

        if !status.is_success() {
            return Err(HttpTransportError::Status {
                status: status.as_u16(),
                message: error_message(&raw),
            });
        }

        serde_json::from_str(&raw).map_err(|e| HttpTransportError::Decode {
            error: e.to_string(),
            raw: truncate_str(&raw, MAX_ERROR_BODY).to_string(),
        })
    }
}

/// Pull a human-readable message out of an error body.
///
/// Understands `{"detail": "..."}` and `{"error": "..."}`; anything else is
/// echoed back, cut short.
fn error_message(raw: &str) -> String {
    let parsed = serde_json::from_str::<serde_json::Value>(raw).ok();
    let field = parsed.as_ref().and_then(|v| {
        ["detail", "error", "message"]
            .iter()
            .find_map(|key| v.get(key).and_then(|m| m.as_str()))
    });

    match field {
        Some(message) => message.to_string(),
        None if raw.trim().is_empty() => "empty response body".to_string(),
        None => truncate_str(raw.trim(), MAX_ERROR_BODY).to_string(),
    }
}

#[async_trait]
impl ChatTransport for HttpChatTransport {
    async fn send_message(
        &self,
        client_id: &ClientId,
        text: &str,
        context: &ResolvedContext,
    ) -> std::result::Result<ChatReply, TransportError> {
        Ok(self.post_chat(client_id, text, context).await?)
    }

    async fn import_transcript(
        &self,
        client_id: &ClientId,
        chat_text: &str,
    ) -> std::result::Result<ChatReply, TransportError> {
        Ok(self.post_import(client_id, chat_text).await?)
    }

    async fn fetch_insights(
        &self,
        client_id: &ClientId,
    ) -> std::result::Result<LearningInsights, TransportError> {
        Ok(self.get_insights(client_id).await?)
    }

    async fn health_check(&self) -> bool {
        let url = format!("{}/", self.base_url);
        match self.http.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!("Health check failed: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serve exactly one canned HTTP response and hand back the raw request.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
                if request_complete(&request) {
                    break;
                }
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            String::from_utf8_lossy(&request).into_owned()
        });

        (base_url, handle)
    }

    fn request_complete(request: &[u8]) -> bool {
        let text = String::from_utf8_lossy(request);
        let Some(header_end) = text.find("\r\n\r\n") else {
            return false;
        };
        let content_length = text[..header_end]
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);
        request.len() >= header_end + 4 + content_length
    }

    fn client_id() -> ClientId {
        ClientId::parse("user_abc").unwrap()
    }

    fn context() -> ResolvedContext {
        ResolvedContext {
            city: "Mumbai".to_string(),
            place: "unknown".to_string(),
            time: "night".to_string(),
        }
    }

    #[test]
    fn test_new_trims_trailing_slash() {
        let transport = HttpChatTransport::new("http://localhost:8000/", None).unwrap();
        assert_eq!(transport.base_url(), "http://localhost:8000");
    }

    #[test]
    fn test_error_message_prefers_detail() {
        assert_eq!(error_message(r#"{"detail": "Not Found"}"#), "Not Found");
        assert_eq!(error_message(r#"{"error": "bad user"}"#), "bad user");
        assert_eq!(error_message("Bad Gateway"), "Bad Gateway");
        assert_eq!(error_message("  "), "empty response body");
    }

    #[tokio::test]
    async fn test_send_message_posts_contract() {
        let (base_url, server) = serve_once(
            "200 OK",
            r#"{"reply": "That sounds hard.", "mode": "venting_listener", "emotion": "frustration", "intensity": 0.7, "relationship": "roommate", "learning": null, "error": null}"#,
        )
        .await;
        let transport = HttpChatTransport::new(&base_url, Some(Duration::from_secs(5))).unwrap();

        let reply = transport
            .send_message(&client_id(), "I had a fight with my roommate", &context())
            .await
            .unwrap();
        assert_eq!(reply.usable_reply(), Some("That sounds hard."));
        assert_eq!(reply.relationship.as_deref(), Some("roommate"));

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /chat HTTP/1.1"));
        let body = &request[request.find("\r\n\r\n").unwrap() + 4..];
        let body: serde_json::Value = serde_json::from_str(body).unwrap();
        assert_eq!(body["user_id"], "user_abc");
        assert_eq!(body["message"], "I had a fight with my roommate");
        assert_eq!(body["meta"]["city"], "Mumbai");
        assert_eq!(body["meta"]["time"], "night");
    }

    #[tokio::test]
    async fn test_import_posts_chat_text() {
        let (base_url, server) = serve_once("200 OK", r#"{"reply": "Analyzed"}"#).await;
        let transport = HttpChatTransport::new(&base_url, None).unwrap();

        let reply = transport
            .import_transcript(&client_id(), "Sam: hi\nMe: hey")
            .await
            .unwrap();
        assert_eq!(reply.usable_reply(), Some("Analyzed"));

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /chat/whatsapp HTTP/1.1"));
        assert!(request.contains(r#""chat_text":"Sam: hi\nMe: hey""#));
    }

    #[tokio::test]
    async fn test_fetch_insights_decodes_profile() {
        let (base_url, server) = serve_once(
            "200 OK",
            r#"{"totalInteractions": 4, "commonEmotions": ["frustration"], "adaptationsLearned": ["needs_venting_space"]}"#,
        )
        .await;
        let transport = HttpChatTransport::new(&base_url, None).unwrap();

        let insights = transport.fetch_insights(&client_id()).await.unwrap();
        assert_eq!(insights.total_interactions, 4);
        assert_eq!(insights.adaptations_learned, vec!["needs_venting_space"]);

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /chat/learning/user_abc HTTP/1.1"));
    }

    #[tokio::test]
    async fn test_non_success_status_maps_to_status_error() {
        let (base_url, _server) =
            serve_once("404 Not Found", r#"{"detail": "No profile yet"}"#).await;
        let transport = HttpChatTransport::new(&base_url, None).unwrap();

        let err = transport.fetch_insights(&client_id()).await.unwrap_err();
        match err {
            TransportError::Status { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "No profile yet");
            }
            other => panic!("Expected Status, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_maps_to_decode_error() {
        let (base_url, _server) = serve_once("200 OK", "not json").await;
        let transport = HttpChatTransport::new(&base_url, None).unwrap();

        let err = transport
            .send_message(&client_id(), "hello", &context())
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::Decode(_)));
    }

    #[tokio::test]
    async fn test_closed_port_is_unreachable() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);
        let transport = HttpChatTransport::new(&base_url, Some(Duration::from_secs(5))).unwrap();

        let err = transport
            .send_message(&client_id(), "hello", &context())
            .await
            .unwrap_err();
        assert!(err.is_unreachable(), "unexpected error: {:?}", err);
        assert!(!transport.health_check().await);
    }

    #[tokio::test]
    async fn test_health_check_ok() {
        let (base_url, _server) = serve_once("200 OK", r#"{"status": "ok"}"#).await;
        let transport = HttpChatTransport::new(&base_url, None).unwrap();
        assert!(transport.health_check().await);
    }
}
