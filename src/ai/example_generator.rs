//! Example sentences for new cards, written by an OpenAI chat model.
//!
//! Generation runs before a card is built, so a failure never touches stored cards.

use crate::config::OpenAiConfig;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned {status}: {body}")]
    Api { status: u16, body: String },
}

pub trait ExampleGenerator {
    /// One short sentence using `term`, written in `language_name` (e.g. "German").
    fn generate_example(&self, term: &str, language_name: &str) -> Result<String, GenerationError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

pub struct OpenAiExampleGenerator {
    client: Client,
    config: OpenAiConfig,
    endpoint: String,
}

impl OpenAiExampleGenerator {
    pub fn new(config: OpenAiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
            endpoint: CHAT_COMPLETIONS_URL.to_string(),
        }
    }
}

fn build_request<'a>(model: &'a str, term: &str, language_name: &str) -> ChatRequest<'a> {
    ChatRequest {
        model,
        messages: vec![ChatMessage {
            role: "system".to_string(),
            content: Some(format!(
                "You are a helpful language learning assistant. Generate a simple, clear example sentence using the word \"{term}\" in {language_name}."
            )),
        }],
        temperature: 0.7,
        max_tokens: 100,
    }
}

/// A reply without content becomes an empty sentence.
fn first_message(response: ChatResponse) -> String {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .unwrap_or_default()
}

impl ExampleGenerator for OpenAiExampleGenerator {
    fn generate_example(&self, term: &str, language_name: &str) -> Result<String, GenerationError> {
        let request = build_request(&self.config.model, term, language_name);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            tracing::warn!("Example generation failed with {}", status);
            return Err(GenerationError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let example = first_message(response.json::<ChatResponse>()?);
        tracing::debug!(term, "generated example sentence");
        Ok(example)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body() {
        let request = build_request("gpt-4", "Hund", "German");
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["model"], "gpt-4");
        assert_eq!(value["max_tokens"], 100);
        assert_eq!(value["messages"][0]["role"], "system");
        let prompt = value["messages"][0]["content"].as_str().unwrap();
        assert!(prompt.contains("\"Hund\" in German"));
    }

    #[test]
    fn test_first_message_content() {
        let response: ChatResponse = serde_json::from_str(
            r#"{"choices": [{"index": 0, "message": {"role": "assistant", "content": " Der Hund schläft. "}}]}"#,
        )
        .unwrap();
        assert_eq!(first_message(response), "Der Hund schläft.");
    }

    #[test]
    fn test_missing_content_is_empty() {
        let response: ChatResponse = serde_json::from_str(
            r#"{"choices": [{"message": {"role": "assistant", "content": null}}]}"#,
        )
        .unwrap();
        assert_eq!(first_message(response), "");

        let response: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert_eq!(first_message(response), "");
    }
}
