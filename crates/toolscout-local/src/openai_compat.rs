use serde::{Deserialize, Serialize};
use std::time::Duration;
use toolscout_core::{ChatModel, Error, Result};

use crate::env;

const CHAT_TIMEOUT: Duration = Duration::from_secs(90);

// Analysis tasks want deterministic-ish extraction, not creativity.
const CHAT_TEMPERATURE: f64 = 0.1;

fn base_url_from_env() -> Option<String> {
    env("TOOLSCOUT_OPENAI_COMPAT_BASE_URL")
}

fn api_key_from_env() -> Option<String> {
    env("TOOLSCOUT_OPENAI_COMPAT_API_KEY")
}

fn model_from_env() -> Option<String> {
    env("TOOLSCOUT_OPENAI_COMPAT_MODEL")
}

/// Chat client for any OpenAI-compatible `/v1/chat/completions` endpoint.
///
/// Defaults target OpenRouter with a free model, so a Firecrawl key is the
/// only mandatory credential; both are env-overridable.
#[derive(Debug, Clone)]
pub struct OpenAiCompatClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

impl OpenAiCompatClient {
    pub fn from_env(client: reqwest::Client, model_override: Option<String>) -> Self {
        let base_url =
            base_url_from_env().unwrap_or_else(|| "https://openrouter.ai/api/v1".to_string());
        let api_key = api_key_from_env();
        let model = model_override
            .or_else(model_from_env)
            .unwrap_or_else(|| "deepseek/deepseek-chat-v3.1:free".to_string());

        Self {
            client,
            base_url,
            api_key,
            model,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint_chat_completions(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    pub async fn chat(&self, system: &str, user: &str) -> Result<String> {
        let req = ChatCompletionsRequest {
            model: self.model.clone(),
            messages: vec![
                Message {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                Message {
                    role: "user".to_string(),
                    content: user.to_string(),
                },
            ],
            temperature: Some(CHAT_TEMPERATURE),
            stream: Some(false),
        };

        let mut rb = self
            .client
            .post(self.endpoint_chat_completions())
            .timeout(CHAT_TIMEOUT)
            .header(reqwest::header::CONTENT_TYPE, "application/json");
        if let Some(k) = &self.api_key {
            rb = rb.header(reqwest::header::AUTHORIZATION, format!("Bearer {k}"));
        }

        let resp = rb
            .json(&req)
            .send()
            .await
            .map_err(|e| Error::Llm(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Llm(format!("chat.completions HTTP {status}")));
        }

        let parsed: ChatCompletionsResponse =
            resp.json().await.map_err(|e| Error::Llm(e.to_string()))?;
        Ok(parsed
            .choices
            .first()
            .map(|c| c.message.content.clone())
            .unwrap_or_default())
    }
}

#[async_trait::async_trait]
impl ChatModel for OpenAiCompatClient {
    async fn chat(&self, system: &str, user: &str) -> Result<String> {
        OpenAiCompatClient::chat(self, system, user).await
    }
}

#[derive(Debug, Clone, Serialize)]
struct ChatCompletionsRequest {
    model: String,
    messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stream: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatCompletionsResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Clone, Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::post, Json, Router};
    use std::net::SocketAddr;

    async fn serve(app: Router) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    fn test_client(addr: SocketAddr) -> OpenAiCompatClient {
        OpenAiCompatClient {
            client: reqwest::Client::new(),
            base_url: format!("http://{addr}/v1"),
            api_key: Some("test-key".to_string()),
            model: "test-model".to_string(),
        }
    }

    #[test]
    fn parses_minimal_chat_completions_shape() {
        let js = r#"
        { "choices": [ { "message": { "content": "hello" } } ] }
        "#;
        let parsed: ChatCompletionsResponse = serde_json::from_str(js).unwrap();
        assert_eq!(parsed.choices[0].message.content, "hello");
    }

    #[test]
    fn missing_choices_decode_to_empty() {
        let parsed: ChatCompletionsResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.choices.is_empty());
    }

    #[tokio::test]
    async fn chat_sends_system_and_user_roles_in_order() {
        let app = Router::new().route(
            "/v1/chat/completions",
            post(|Json(body): Json<serde_json::Value>| async move {
                let msgs = body["messages"].as_array().unwrap();
                assert_eq!(msgs[0]["role"], "system");
                assert_eq!(msgs[1]["role"], "user");
                assert_eq!(msgs[1]["content"], "the question");
                assert_eq!(body["model"], "test-model");
                Json(serde_json::json!({
                    "choices": [{"message": {"content": "the answer"}}]
                }))
            }),
        );
        let client = test_client(serve(app).await);

        let out = client.chat("you are a test", "the question").await.unwrap();
        assert_eq!(out, "the answer");
    }

    #[tokio::test]
    async fn chat_propagates_http_errors() {
        let app = Router::new().route(
            "/v1/chat/completions",
            post(|| async { (StatusCode::TOO_MANY_REQUESTS, "slow down") }),
        );
        let client = test_client(serve(app).await);

        let err = client.chat("s", "u").await.unwrap_err();
        assert!(matches!(err, Error::Llm(_)));
    }
}
