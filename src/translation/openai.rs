use crate::config::Config;
use crate::translation::{TextGenerator, TranslationError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

const API_KEY_VAR: &str = "OPENAI_API_KEY";
const TEMPERATURE: f32 = 0.3;

/// OpenAI Chat Completion request
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reasoning_effort: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Message {
    role: String,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

/// Check if a model is a reasoning model that doesn't support temperature
fn is_reasoning_model(model: &str) -> bool {
    model.starts_with("gpt-5")
        || model.starts_with("o1")
        || model.starts_with("o3")
        || model.starts_with("o4")
}

/// Chat completions client.
pub struct OpenAiClient {
    client: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
    model: String,
}

impl OpenAiClient {
    pub fn new(
        client: reqwest::Client,
        api_url: impl Into<String>,
        api_key: Option<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_url: api_url.into(),
            api_key,
            model: model.into(),
        }
    }

    pub fn from_config(client: reqwest::Client, config: &Config) -> Self {
        Self::new(
            client,
            config.openai_api_url.clone(),
            config.openai_api_key.clone(),
            config.openai_model.clone(),
        )
    }

    fn build_request(&self, system: &str, user: &str) -> ChatRequest {
        // Reasoning models don't support temperature - use reasoning_effort instead
        let is_reasoning = is_reasoning_model(&self.model);
        ChatRequest {
            model: self.model.clone(),
            messages: vec![
                Message {
                    role: "system".to_string(),
                    content: Some(system.to_string()),
                },
                Message {
                    role: "user".to_string(),
                    content: Some(user.to_string()),
                },
            ],
            temperature: if is_reasoning { None } else { Some(TEMPERATURE) },
            reasoning_effort: is_reasoning.then(|| "low".to_string()),
        }
    }
}

#[async_trait]
impl TextGenerator for OpenAiClient {
    fn check_configured(&self) -> Result<(), TranslationError> {
        match self.api_key {
            Some(_) => Ok(()),
            None => Err(TranslationError::Configuration(API_KEY_VAR)),
        }
    }

    async fn generate(&self, system: &str, user: &str) -> Result<String, TranslationError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(TranslationError::Configuration(API_KEY_VAR))?;

        let request = self.build_request(system, user);
        debug!(model = %self.model, chars = user.len(), "Sending chat completion request");

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| TranslationError::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read body: {}>", e));
            return Err(TranslationError::Api { status, body });
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| TranslationError::Request(format!("invalid response: {}", e)))?;

        chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(TranslationError::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        matchers::{body_partial_json, header, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn create_openai_response(content: &str) -> serde_json::Value {
        serde_json::json!({
            "id": "chatcmpl-123",
            "object": "chat.completion",
            "choices": [
                {
                    "index": 0,
                    "message": {
                        "role": "assistant",
                        "content": content
                    },
                    "finish_reason": "stop"
                }
            ]
        })
    }

    fn client_for(server: &MockServer) -> OpenAiClient {
        OpenAiClient::new(
            reqwest::Client::new(),
            format!("{}/v1/chat/completions", server.uri()),
            Some("test-openai-key".to_string()),
            "gpt-4o-mini",
        )
    }

    #[tokio::test]
    async fn test_generate_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("Authorization", "Bearer test-openai-key"))
            .and(body_partial_json(serde_json::json!({
                "model": "gpt-4o-mini",
                "temperature": 0.3
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(create_openai_response("Hello world")),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let result = client_for(&mock_server)
            .generate("Translate to English.", "Ciao mondo")
            .await
            .expect("Should succeed");

        assert_eq!(result, "Hello world");
    }

    #[tokio::test]
    async fn test_generate_api_error_keeps_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("Rate limited"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let result = client_for(&mock_server).generate("s", "u").await;

        assert_eq!(
            result,
            Err(TranslationError::Api {
                status: 429,
                body: "Rate limited".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_generate_empty_choices() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "choices": [] })),
            )
            .mount(&mock_server)
            .await;

        let result = client_for(&mock_server).generate("s", "u").await;
        assert_eq!(result, Err(TranslationError::Empty));
    }

    #[tokio::test]
    async fn test_generate_blank_content_is_empty() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(create_openai_response("  \n")))
            .mount(&mock_server)
            .await;

        let result = client_for(&mock_server).generate("s", "u").await;
        assert_eq!(result, Err(TranslationError::Empty));
    }

    #[tokio::test]
    async fn test_generate_without_key_sends_nothing() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let client = OpenAiClient::new(
            reqwest::Client::new(),
            mock_server.uri(),
            None,
            "gpt-4o-mini",
        );

        assert_eq!(
            client.check_configured(),
            Err(TranslationError::Configuration("OPENAI_API_KEY"))
        );
        assert_eq!(
            client.generate("s", "u").await,
            Err(TranslationError::Configuration("OPENAI_API_KEY"))
        );
    }

    #[tokio::test]
    async fn test_generate_network_error() {
        let client = OpenAiClient::new(
            reqwest::Client::new(),
            "http://127.0.0.1:1/v1/chat/completions",
            Some("key".to_string()),
            "gpt-4o-mini",
        );

        let result = client.generate("s", "u").await;
        assert!(matches!(result, Err(TranslationError::Request(_))));
    }

    // ==================== Request Structure Tests ====================

    #[test]
    fn test_request_serialization() {
        let client = OpenAiClient::new(reqwest::Client::new(), "http://x", None, "gpt-4o-mini");
        let request = client.build_request("Translate to Spanish.", "Ciao");

        let json = serde_json::to_string(&request).expect("Should serialize");
        assert!(json.contains("gpt-4o-mini"));
        assert!(json.contains("0.3"));
        assert!(json.contains("system"));
        assert!(json.contains("user"));
        assert!(!json.contains("reasoning_effort"));
    }

    #[test]
    fn test_request_serialization_reasoning_model() {
        let client = OpenAiClient::new(reqwest::Client::new(), "http://x", None, "gpt-5-mini");
        let request = client.build_request("s", "u");

        let json = serde_json::to_string(&request).expect("Should serialize");
        assert!(json.contains("reasoning_effort"));
        assert!(!json.contains("temperature"));
    }

    #[test]
    fn test_is_reasoning_model() {
        assert!(is_reasoning_model("gpt-5-mini"));
        assert!(is_reasoning_model("o1-preview"));
        assert!(is_reasoning_model("o4-mini"));
        assert!(!is_reasoning_model("gpt-4o-mini"));
        assert!(!is_reasoning_model("gpt-4-turbo"));
    }
}
