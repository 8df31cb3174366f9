use crate::domain::ports::ReasoningProvider;
use crate::utils::error::{Result, RxError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Chat-completions client. One user message per request, no temperature or
/// token tuning; the first choice's content comes back verbatim.
pub struct HttpCompletionClient {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl HttpCompletionClient {
    pub fn new(endpoint: String, api_key: String, model: String) -> Self {
        Self {
            client: Client::new(),
            endpoint,
            api_key,
            model,
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[async_trait]
impl ReasoningProvider for HttpCompletionClient {
    async fn assess(&self, prompt: &str) -> Result<String> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        tracing::debug!("Sending {} prompt chars to reasoning endpoint", prompt.len());
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Reasoning response status: {}", status);
        if !status.is_success() {
            return Err(RxError::service(
                "reasoning",
                format!("HTTP {} from completion endpoint", status),
            ));
        }

        let parsed: ChatResponse = response.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| RxError::service("reasoning", "response contained no choices"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_assess_returns_first_choice() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/v1/chat/completions")
                .header("authorization", "Bearer test-key");
            then.status(200).json_body(serde_json::json!({
                "choices": [{"message": {"role": "assistant", "content": "Take with food."}}]
            }));
        });

        let client = HttpCompletionClient::new(
            server.url("/v1/chat/completions"),
            "test-key".to_string(),
            "gpt-4o-mini".to_string(),
        );
        let answer = client.assess("what does this prescription say?").await.unwrap();

        mock.assert();
        assert_eq!(answer, "Take with food.");
    }

    #[tokio::test]
    async fn test_assess_no_choices_is_service_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(200).json_body(serde_json::json!({"choices": []}));
        });

        let client = HttpCompletionClient::new(
            server.url("/v1/chat/completions"),
            "test-key".to_string(),
            "gpt-4o-mini".to_string(),
        );
        let err = client.assess("prompt").await.unwrap_err();
        assert!(
            matches!(err, RxError::ServiceError { ref service, .. } if service == "reasoning")
        );
    }

    #[tokio::test]
    async fn test_assess_rate_limit_surfaces_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(429);
        });

        let client = HttpCompletionClient::new(
            server.url("/v1/chat/completions"),
            "test-key".to_string(),
            "gpt-4o-mini".to_string(),
        );
        // No retry: a rate limit is surfaced immediately.
        let err = client.assess("prompt").await.unwrap_err();
        assert!(matches!(err, RxError::ServiceError { .. }));
    }
}
