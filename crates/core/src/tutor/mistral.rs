//! Mistral chat-completions client

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{info, warn};

use super::prompts::{system_prompt, user_prompt};
use super::types::{ChatMessage, ChatRequest, ChatResponse};
use super::{Explainer, PromptContext};
use crate::config::TutorConfig;
use crate::error::{Error, Result};

pub struct MistralClient {
    client: Client,
    api_base: String,
    api_key: Option<String>,
    model: String,
    temperature: f32,
}

impl MistralClient {
    pub fn new(config: &TutorConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()?;

        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn headers(&self) -> Result<HeaderMap> {
        let key = self.api_key.as_deref().ok_or(Error::MissingApiKey)?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let value =
            HeaderValue::from_str(&format!("Bearer {}", key)).map_err(|_| Error::Unauthorized)?;
        headers.insert(AUTHORIZATION, value);
        Ok(headers)
    }

    /// Sends one chat exchange and returns the first choice's text.
    pub async fn chat(&self, messages: &[ChatMessage]) -> Result<String> {
        let url = format!("{}/v1/chat/completions", self.api_base);
        let body = ChatRequest {
            model: &self.model,
            messages,
            temperature: self.temperature,
        };

        let response = self
            .client
            .post(&url)
            .headers(self.headers()?)
            .json(&body)
            .send()
            .await
            .map_err(classify_transport)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            warn!(%status, "chat completion failed");
            return Err(classify_status(status, text));
        }

        let parsed: ChatResponse = response.json().await?;
        parsed.first_content().ok_or(Error::EmptyResponse)
    }
}

#[async_trait]
impl Explainer for MistralClient {
    async fn explain(&self, context: &PromptContext) -> Result<String> {
        info!(model = %self.model(), with_move = context.played_move.is_some(), "asking tutor");
        let messages = [
            ChatMessage::system(system_prompt(context)),
            ChatMessage::user(user_prompt(context)),
        ];
        self.chat(&messages).await
    }
}

fn classify_status(status: StatusCode, body: String) -> Error {
    match status {
        StatusCode::UNAUTHORIZED => Error::Unauthorized,
        StatusCode::TOO_MANY_REQUESTS => Error::RateLimited,
        _ => Error::Provider {
            status: status.as_u16(),
            body: if body.is_empty() {
                status.canonical_reason().unwrap_or_default().to_string()
            } else {
                body
            },
        },
    }
}

fn classify_transport(error: reqwest::Error) -> Error {
    if error.is_connect() || error.is_timeout() {
        Error::Network(error.to_string())
    } else {
        Error::Http(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serves exactly one canned HTTP response and hands back the raw request.
    async fn one_shot_server(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

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
                "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&request).to_string()
        });

        (format!("http://{}", addr), handle)
    }

    fn request_complete(request: &[u8]) -> bool {
        let text = String::from_utf8_lossy(request);
        let Some(split) = text.find("\r\n\r\n") else {
            return false;
        };
        let length = text[..split]
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);
        request.len() >= split + 4 + length
    }

    fn client_for(base: String, key: Option<&str>) -> MistralClient {
        let config = TutorConfig {
            api_base: base,
            api_key: key.map(str::to_string),
            ..TutorConfig::default()
        };
        let mut client = MistralClient::new(&config).unwrap();
        // Keep test traffic off any proxy configured in the environment.
        client.client = Client::builder().no_proxy().build().unwrap();
        client
    }

    #[tokio::test]
    async fn test_missing_key_fails_before_sending() {
        let client = client_for("http://127.0.0.1:9".to_string(), None);
        let result = client.explain(&PromptContext::position("8/8/8/8/8/8/8/8 w - - 0 1")).await;
        assert!(matches!(result, Err(Error::MissingApiKey)));
    }

    #[tokio::test]
    async fn test_successful_completion() {
        let (base, server) = one_shot_server(
            "200 OK",
            r#"{"choices":[{"message":{"role":"assistant","content":"Play for the center."}}]}"#,
        )
        .await;
        let client = client_for(base, Some("k3y"));

        let text = client
            .explain(&PromptContext::position("8/8/8/8/8/8/8/8 w - - 0 1"))
            .await
            .unwrap();
        assert_eq!(text, "Play for the center.");

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /v1/chat/completions"));
        assert!(request.to_ascii_lowercase().contains("authorization: bearer k3y"));
        assert!(request.contains(r#""model":"mistral-small-latest""#));
        assert!(request.contains(r#""role":"system""#));
    }

    #[tokio::test]
    async fn test_unauthorized() {
        let (base, _server) = one_shot_server("401 Unauthorized", "{}").await;
        let client = client_for(base, Some("bad"));
        let result = client.chat(&[ChatMessage::user("hi")]).await;
        assert!(matches!(result, Err(Error::Unauthorized)));
    }

    #[tokio::test]
    async fn test_rate_limited() {
        let (base, _server) = one_shot_server("429 Too Many Requests", "{}").await;
        let client = client_for(base, Some("k"));
        let result = client.chat(&[ChatMessage::user("hi")]).await;
        assert!(matches!(result, Err(Error::RateLimited)));
    }

    #[tokio::test]
    async fn test_empty_choices() {
        let (base, _server) = one_shot_server("200 OK", r#"{"choices":[]}"#).await;
        let client = client_for(base, Some("k"));
        let result = client.chat(&[ChatMessage::user("hi")]).await;
        assert!(matches!(result, Err(Error::EmptyResponse)));
    }

    #[test]
    fn test_classify_other_status() {
        let err = classify_status(StatusCode::INTERNAL_SERVER_ERROR, String::new());
        match err {
            Error::Provider { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "Internal Server Error");
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
