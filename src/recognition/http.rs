//! HTTP recognition backend
//!
//! POSTs `{ "image": "<data URL>" }` to the configured endpoint and reads
//! `{ "text": ... }` back, or `{ "detail": ... }` on failure.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::error::RecognitionError;
use super::RecognitionBackend;
use crate::config::RecognitionSettings;

/// Shown instead of a blank result
pub const NO_TEXT_MESSAGE: &str = "No text recognized.";

/// Error body that is not JSON at all
const UNREADABLE_ERROR_BODY: &str = "Failed to process image";

#[derive(Debug, Serialize)]
struct RecognizeRequest<'a> {
    image: &'a str,
}

/// Turn a status code and raw body into recognized text or an error
pub fn interpret_response(status: u16, body: &[u8]) -> Result<String, RecognitionError> {
    if !(200..300).contains(&status) {
        return Err(RecognitionError::Protocol {
            status,
            detail: error_detail(status, body),
        });
    }

    let parsed: Value =
        serde_json::from_slice(body).map_err(|e| RecognitionError::Payload(e.to_string()))?;

    // Any JSON body is accepted; only `text` matters
    match parsed.get("text") {
        Some(Value::String(text)) if !text.is_empty() => Ok(text.clone()),
        None | Some(Value::Null) | Some(Value::String(_)) => Ok(NO_TEXT_MESSAGE.to_string()),
        Some(other) => Ok(other.to_string()),
    }
}

/// Best diagnostic the error body offers
fn error_detail(status: u16, body: &[u8]) -> String {
    let Ok(parsed) = serde_json::from_slice::<Value>(body) else {
        return UNREADABLE_ERROR_BODY.to_string();
    };

    match parsed.get("detail") {
        Some(Value::String(detail)) if !detail.is_empty() => detail.clone(),
        // Validation errors carry structured detail
        Some(detail) if !detail.is_null() && !detail.is_string() => detail.to_string(),
        _ => format!("API Error ({})", status),
    }
}

/// reqwest-backed client for the recognition endpoint
pub struct HttpBackend {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpBackend {
    pub fn new(settings: &RecognitionSettings) -> Result<Self, RecognitionError> {
        let mut builder = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs.max(1)));
        if !settings.use_system_proxy {
            builder = builder.no_proxy();
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: settings.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl RecognitionBackend for HttpBackend {
    async fn recognize(&self, image_data_url: &str) -> Result<String, RecognitionError> {
        debug!(
            "POST {} ({} byte image payload)",
            self.endpoint,
            image_data_url.len()
        );

        let response = self
            .client
            .post(&self.endpoint)
            .json(&RecognizeRequest { image: image_data_url })
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            warn!("Recognition endpoint returned {}", status);
        }

        interpret_response(status.as_u16(), &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    #[test]
    fn test_success_text() {
        assert_eq!(interpret_response(200, br#"{"text":"hello"}"#).unwrap(), "hello");
    }

    #[test]
    fn test_success_missing_or_empty_text() {
        assert_eq!(interpret_response(200, br#"{}"#).unwrap(), NO_TEXT_MESSAGE);
        assert_eq!(interpret_response(200, br#"{"text":""}"#).unwrap(), NO_TEXT_MESSAGE);
        assert_eq!(interpret_response(200, br#"{"text":null}"#).unwrap(), NO_TEXT_MESSAGE);
    }

    #[test]
    fn test_success_non_string_text_is_displayed() {
        assert_eq!(interpret_response(200, br#"{"text":42}"#).unwrap(), "42");
        assert_eq!(interpret_response(200, br#"{"text":["a","b"]}"#).unwrap(), r#"["a","b"]"#);
    }

    #[test]
    fn test_success_non_object_body_has_no_text() {
        assert_eq!(interpret_response(200, br#""hello""#).unwrap(), NO_TEXT_MESSAGE);
        assert_eq!(interpret_response(200, b"[]").unwrap(), NO_TEXT_MESSAGE);
    }

    #[test]
    fn test_success_malformed_body() {
        let err = interpret_response(200, b"<html>oops</html>").unwrap_err();
        assert!(matches!(err, RecognitionError::Payload(_)));
    }

    #[test]
    fn test_error_detail_verbatim() {
        let err = interpret_response(400, br#"{"detail":"bad image"}"#).unwrap_err();
        assert_eq!(
            err,
            RecognitionError::Protocol { status: 400, detail: "bad image".to_string() }
        );
    }

    #[test]
    fn test_error_without_detail() {
        let err = interpret_response(503, br#"{"message":"down"}"#).unwrap_err();
        assert_eq!(err.user_message(), "API Error (503)");
    }

    #[test]
    fn test_error_json_without_object_falls_back_to_status() {
        let bodies: [&[u8]; 4] = [br#""oops""#, b"[]", b"42", b"null"];
        for body in bodies {
            let err = interpret_response(500, body).unwrap_err();
            assert_eq!(err.user_message(), "API Error (500)");
        }
    }

    #[test]
    fn test_error_unparseable_body() {
        let err = interpret_response(500, b"Internal Server Error").unwrap_err();
        assert_eq!(err.user_message(), "Failed to process image");
    }

    #[test]
    fn test_error_structured_detail() {
        let err = interpret_response(422, br#"{"detail":[{"msg":"field required"}]}"#).unwrap_err();
        assert!(err.user_message().contains("field required"));
    }

    /// Serve one canned HTTP response on loopback and hand back the request body
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (body_tx, body_rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut chunk = [0u8; 4096];

            // Read headers, then exactly Content-Length bytes of body
            let (header_end, content_length) = loop {
                let n = socket.read(&mut chunk).await.unwrap();
                assert!(n > 0, "client closed early");
                request.extend_from_slice(&chunk[..n]);
                if let Some(pos) = request.windows(4).position(|w| w == b"\r\n\r\n") {
                    let headers = String::from_utf8_lossy(&request[..pos]).to_lowercase();
                    let length = headers
                        .lines()
                        .find_map(|l| l.strip_prefix("content-length:"))
                        .map(|v| v.trim().parse::<usize>().unwrap())
                        .unwrap_or(0);
                    break (pos + 4, length);
                }
            };
            while request.len() < header_end + content_length {
                let n = socket.read(&mut chunk).await.unwrap();
                assert!(n > 0, "client closed early");
                request.extend_from_slice(&chunk[..n]);
            }
            let _ = body_tx.send(String::from_utf8_lossy(&request[header_end..]).into_owned());

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });

        (format!("http://{}/api/recognize", addr), body_rx)
    }

    fn backend_for(endpoint: String) -> HttpBackend {
        let settings = RecognitionSettings {
            endpoint,
            timeout_secs: 5,
            use_system_proxy: false,
        };
        HttpBackend::new(&settings).unwrap()
    }

    #[tokio::test]
    async fn test_http_success_and_request_shape() {
        let (endpoint, request_body) = serve_once("200 OK", r#"{"text":"hello"}"#).await;
        let backend = backend_for(endpoint);

        let text = backend.recognize("data:image/png;base64,AAAA").await.unwrap();
        assert_eq!(text, "hello");

        let sent: serde_json::Value = serde_json::from_str(&request_body.await.unwrap()).unwrap();
        assert_eq!(sent["image"], "data:image/png;base64,AAAA");
    }

    #[tokio::test]
    async fn test_http_error_status_with_detail() {
        let (endpoint, _) = serve_once("400 Bad Request", r#"{"detail":"bad image"}"#).await;
        let backend = backend_for(endpoint);

        let err = backend.recognize("data:image/png;base64,AAAA").await.unwrap_err();
        assert_eq!(
            err,
            RecognitionError::Protocol { status: 400, detail: "bad image".to_string() }
        );
    }

    #[tokio::test]
    async fn test_http_connection_refused_is_transport() {
        let addr = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap()
        };
        let backend = backend_for(format!("http://{}/api/recognize", addr));

        let err = backend.recognize("data:image/png;base64,AAAA").await.unwrap_err();
        assert!(matches!(err, RecognitionError::Transport(_)));
    }
}
