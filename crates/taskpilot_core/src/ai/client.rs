//! Blocking Gemini `generateContent` client.
//!
//! # Invariants
//! - Every request carries the configured timeout.
//! - The API key travels in a header, never in the URL.

use super::{AiError, TextGenerator};
use crate::config::AiConfig;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

const API_KEY_HEADER: &str = "x-goog-api-key";
const MAX_ERROR_MESSAGE_CHARS: usize = 200;

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Text generator backed by the Gemini REST API.
pub struct GeminiClient {
    http: Client,
    api_key: String,
    endpoint: String,
}

impl GeminiClient {
    /// Builds a client, or `Ok(None)` when no API key is configured.
    pub fn from_config(config: &AiConfig) -> Result<Option<Self>, AiError> {
        let Some(api_key) = config.api_key.clone() else {
            return Ok(None);
        };

        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| AiError::Client(err.to_string()))?;

        Ok(Some(Self::with_http(http, api_key, config)))
    }

    fn with_http(http: Client, api_key: String, config: &AiConfig) -> Self {
        Self {
            http,
            api_key,
            endpoint: format!(
                "{}/v1beta/models/{}:generateContent",
                config.base_url, config.model
            ),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl TextGenerator for GeminiClient {
    fn generate(&self, prompt: &str) -> Result<String, AiError> {
        let body = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self
            .http
            .post(&self.endpoint)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .map_err(|err| AiError::Transport(err.to_string()))?;

        let status = response.status();
        let raw = response
            .text()
            .map_err(|err| AiError::Transport(err.to_string()))?;

        if !status.is_success() {
            return Err(AiError::Status {
                code: status.as_u16(),
                message: api_error_message(&raw),
            });
        }

        let parsed: GenerateContentResponse =
            serde_json::from_str(&raw).map_err(|err| AiError::Decode(err.to_string()))?;
        extract_text(parsed)
    }
}

fn extract_text(response: GenerateContentResponse) -> Result<String, AiError> {
    if let Some(reason) = response
        .prompt_feedback
        .and_then(|feedback| feedback.block_reason)
    {
        return Err(AiError::Blocked(reason));
    }

    Ok(response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<String>()
        })
        .unwrap_or_default())
}

fn api_error_message(raw: &str) -> String {
    match serde_json::from_str::<ApiErrorEnvelope>(raw) {
        Ok(envelope) => envelope.error.message,
        Err(_) => raw.chars().take(MAX_ERROR_MESSAGE_CHARS).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::{extract_text, GeminiClient, GenerateContentResponse};
    use crate::ai::{AiError, TextGenerator};
    use crate::config::AiConfig;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;
    use std::time::Duration;

    /// Serves one canned HTTP response and returns the raw request it saw.
    fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, thread::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let request = read_request(&mut stream);
            let response = format!(
                "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();
            request
        });
        (base_url, handle)
    }

    fn read_request(stream: &mut std::net::TcpStream) -> String {
        let mut buffer = Vec::new();
        let mut chunk = [0_u8; 1024];
        loop {
            let read = stream.read(&mut chunk).unwrap();
            if read == 0 {
                break;
            }
            buffer.extend_from_slice(&chunk[..read]);
            let text = String::from_utf8_lossy(&buffer).to_string();
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text[..header_end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if buffer.len() >= header_end + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buffer).to_string()
    }

    fn local_client(base_url: String) -> GeminiClient {
        let config = AiConfig {
            api_key: Some("test-key".to_string()),
            model: "test-model".to_string(),
            base_url,
            timeout: Duration::from_secs(5),
        };
        // Local fake server: bypass any proxy configured in the environment.
        let http = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .no_proxy()
            .build()
            .unwrap();
        GeminiClient::with_http(http, "test-key".to_string(), &config)
    }

    #[test]
    fn missing_api_key_yields_no_client() {
        assert!(GeminiClient::from_config(&AiConfig::disabled())
            .unwrap()
            .is_none());
    }

    #[test]
    fn generate_posts_prompt_and_joins_candidate_parts() {
        let (base_url, server) = serve_once(
            "HTTP/1.1 200 OK",
            r#"{"candidates":[{"content":{"parts":[{"text":"Learn "},{"text":"async Rust"}],"role":"model"},"finishReason":"STOP"}]}"#,
        );
        let client = local_client(base_url);

        let text = client.generate("suggest something").unwrap();
        assert_eq!(text, "Learn async Rust");

        let request = server.join().unwrap();
        assert!(request.starts_with("POST /v1beta/models/test-model:generateContent"));
        assert!(request.to_ascii_lowercase().contains("x-goog-api-key: test-key"));
        assert!(request.contains("suggest something"));
        assert!(!request.contains("key=test-key"));
    }

    #[test]
    fn non_success_status_surfaces_api_message() {
        let (base_url, server) = serve_once(
            "HTTP/1.1 429 Too Many Requests",
            r#"{"error":{"code":429,"message":"quota exhausted","status":"RESOURCE_EXHAUSTED"}}"#,
        );
        let client = local_client(base_url);

        let err = client.generate("anything").unwrap_err();
        server.join().unwrap();
        match err {
            AiError::Status { code, message } => {
                assert_eq!(code, 429);
                assert_eq!(message, "quota exhausted");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn blocked_prompt_is_an_error() {
        let response: GenerateContentResponse =
            serde_json::from_str(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#).unwrap();
        let err = extract_text(response).unwrap_err();
        assert!(matches!(err, AiError::Blocked(reason) if reason == "SAFETY"));
    }

    #[test]
    fn response_without_candidates_is_empty_text() {
        let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(extract_text(response).unwrap(), "");
    }
}
