//! Network generator for OpenAI-compatible `/chat/completions` endpoints.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use craft_config::GeneratorConfig;

use crate::ContentGenerator;
use crate::error::GeneratorError;
use crate::http::check_response;
use crate::role::Role;

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: Option<String>,
}

#[derive(Debug, Clone)]
pub struct OpenAiGenerator {
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    http: reqwest::Client,
}

impl OpenAiGenerator {
    /// Build a client from the generator configuration.
    ///
    /// The per-call deadline is enforced by the retry wrapper, not here.
    ///
    /// # Errors
    ///
    /// Returns `GeneratorError::NotConfigured` without an API key, or
    /// `GeneratorError::Http` if the HTTP client cannot be built.
    pub fn from_config(config: &GeneratorConfig) -> Result<Self, GeneratorError> {
        if config.api_key.is_empty() {
            return Err(GeneratorError::NotConfigured(
                "generator.api_key is required for the openai backend".into(),
            ));
        }
        let http = reqwest::Client::builder()
            .user_agent(concat!("autocraft/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
            http,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

/// First non-blank completion in the response, if any.
fn first_content(response: ChatCompletionResponse) -> Result<String, GeneratorError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or(GeneratorError::EmptyResponse)
}

#[async_trait]
impl ContentGenerator for OpenAiGenerator {
    async fn generate(&self, role: Role, context: &str) -> Result<String, GeneratorError> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: role.instructions(),
                },
                ChatMessage {
                    role: "user",
                    content: context,
                },
            ],
            temperature: self.temperature,
        };

        tracing::debug!(%role, model = %self.model, context_len = context.len(), "chat completion request");
        let resp = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;
        let completion: ChatCompletionResponse = check_response(resp).await?.json().await?;
        first_content(completion)
    }

    fn name(&self) -> &str {
        "openai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use craft_config::GeneratorBackend;
    use pretty_assertions::assert_eq;

    fn config(key: &str) -> GeneratorConfig {
        GeneratorConfig {
            backend: GeneratorBackend::OpenAi,
            api_key: key.into(),
            base_url: "http://localhost:9999/v1/".into(),
            ..GeneratorConfig::default()
        }
    }

    #[test]
    fn requires_api_key() {
        let err = OpenAiGenerator::from_config(&config("")).unwrap_err();
        assert!(matches!(err, GeneratorError::NotConfigured(_)));
    }

    #[test]
    fn endpoint_trims_trailing_slash() {
        let generator = OpenAiGenerator::from_config(&config("sk-test")).unwrap();
        assert_eq!(generator.endpoint(), "http://localhost:9999/v1/chat/completions");
    }

    #[test]
    fn request_serializes_system_then_user() {
        let request = ChatCompletionRequest {
            model: "gpt-4o-mini",
            messages: [
                ChatMessage {
                    role: "system",
                    content: "sys",
                },
                ChatMessage {
                    role: "user",
                    content: "ctx",
                },
            ],
            temperature: 0.2,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "ctx");
        let temperature = json["temperature"].as_f64().unwrap();
        assert!((temperature - 0.2).abs() < 1e-6);
    }

    #[test]
    fn blank_or_missing_content_is_empty_response() {
        let none: ChatCompletionResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(matches!(first_content(none), Err(GeneratorError::EmptyResponse)));

        let null: ChatCompletionResponse =
            serde_json::from_str(r#"{"choices": [{"message": {"content": null}}]}"#).unwrap();
        assert!(matches!(first_content(null), Err(GeneratorError::EmptyResponse)));

        let blank: ChatCompletionResponse =
            serde_json::from_str(r#"{"choices": [{"message": {"content": "  \n"}}]}"#).unwrap();
        assert!(matches!(first_content(blank), Err(GeneratorError::EmptyResponse)));
    }

    #[test]
    fn first_choice_wins() {
        let resp: ChatCompletionResponse = serde_json::from_str(
            r#"{"choices": [{"message": {"content": "one"}}, {"message": {"content": "two"}}]}"#,
        )
        .unwrap();
        assert_eq!(first_content(resp).unwrap(), "one");
    }
}
