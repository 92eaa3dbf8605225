//! HTTP plumbing shared by every OpenAI-compatible client

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, RETRY_AFTER};
use reqwest::StatusCode;

use crate::{
    chat::types::{
        ChatCompletionRequest, ChatCompletionResponse, ChatErrorResponse, ChatMessage, ChatRole,
    },
    error::LlmError,
    types::{CompletionRequest, CompletionResponse, Role, Usage},
};

/// Default request timeout for hosted providers
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

pub(crate) fn build_http_client(timeout: Duration) -> Result<reqwest::Client, LlmError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| LlmError::Network { source: e })
}

/// POST a chat completion to `{base_url}/v1/chat/completions`.
///
/// Exactly one attempt; the bearer header is only sent when a key is given.
pub async fn send_chat_completion(
    http_client: &reqwest::Client,
    base_url: &str,
    api_key: Option<&str>,
    request: &ChatCompletionRequest,
) -> Result<ChatCompletionResponse, LlmError> {
    let url = format!("{}/v1/chat/completions", base_url.trim_end_matches('/'));

    let mut headers = HeaderMap::new();
    if let Some(api_key) = api_key {
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", api_key))
                .map_err(|_| LlmError::authentication("Invalid API key format"))?,
        );
    }
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    let response = http_client
        .post(&url)
        .headers(headers)
        .json(request)
        .send()
        .await
        .map_err(|e| LlmError::Network { source: e })?;

    let status = response.status();
    let retry_after = response
        .headers()
        .get(RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok());

    let body = response.text().await?;

    if !status.is_success() {
        tracing::debug!(%status, %url, "Chat completion returned an error status");
        return Err(error_from_status(status, body, retry_after));
    }

    let completion: ChatCompletionResponse = serde_json::from_str(&body)?;
    Ok(completion)
}

/// Map a non-2xx status and its body to an [`LlmError`]
pub fn error_from_status(status: StatusCode, body: String, retry_after: Option<u64>) -> LlmError {
    let message = match serde_json::from_str::<ChatErrorResponse>(&body) {
        Ok(error_response) => error_response.error.message,
        Err(_) if body.trim().is_empty() => "Unknown error".to_string(),
        Err(_) => body,
    };

    match status {
        // Some providers return 400 for invalid keys with "api key" in the message
        StatusCode::BAD_REQUEST if message.to_lowercase().contains("api key") => {
            LlmError::authentication(message)
        }
        StatusCode::BAD_REQUEST => LlmError::invalid_request(message),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => LlmError::authentication(message),
        StatusCode::PAYLOAD_TOO_LARGE => LlmError::invalid_request("Request too large"),
        StatusCode::TOO_MANY_REQUESTS => LlmError::rate_limit(message, retry_after),
        _ => LlmError::api_error(status.as_u16(), message),
    }
}

/// Convert a generic request into the OpenAI-compatible wire shape
pub fn to_chat_request(request: CompletionRequest, default_model: &str) -> ChatCompletionRequest {
    let messages = request
        .messages
        .into_iter()
        .map(|msg| {
            let role = match msg.role {
                Role::User => ChatRole::User,
                Role::Assistant => ChatRole::Assistant,
                Role::System => ChatRole::System,
            };
            ChatMessage::new(role, msg.content)
        })
        .collect();

    ChatCompletionRequest {
        model: request.model.unwrap_or_else(|| default_model.to_string()),
        messages,
        max_tokens: Some(request.max_tokens),
        temperature: request.temperature,
        top_p: request.top_p,
        stop: request.stop_sequences,
        stream: Some(false),
    }
}

/// Extract the answer text from a chat completion, rejecting blank answers
pub fn to_completion_response(
    response: ChatCompletionResponse,
) -> Result<CompletionResponse, LlmError> {
    let content = response
        .text()
        .ok_or_else(|| LlmError::empty_response("No completion text returned"))?
        .to_string();

    let choice = &response.choices[0];
    Ok(CompletionResponse {
        content,
        role: match choice.message.role {
            ChatRole::User => Role::User,
            ChatRole::Assistant => Role::Assistant,
            ChatRole::System => Role::System,
        },
        model: response.model.clone(),
        usage: Usage {
            input_tokens: response.usage.as_ref().map(|u| u.prompt_tokens).unwrap_or(0),
            output_tokens: response
                .usage
                .as_ref()
                .map(|u| u.completion_tokens)
                .unwrap_or(0),
        },
        stop_reason: choice.finish_reason.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Message;

    #[test]
    fn test_status_mapping() {
        let auth = error_from_status(StatusCode::UNAUTHORIZED, "nope".into(), None);
        assert!(matches!(auth, LlmError::Authentication { .. }));

        let key = error_from_status(
            StatusCode::BAD_REQUEST,
            r#"{"error":{"message":"Invalid API Key","type":"invalid_request_error"}}"#.into(),
            None,
        );
        assert!(matches!(key, LlmError::Authentication { ref message } if message == "Invalid API Key"));

        let limited = error_from_status(StatusCode::TOO_MANY_REQUESTS, "{}".into(), Some(7));
        assert!(matches!(limited, LlmError::RateLimit { retry_after: Some(7), .. }));

        let server = error_from_status(StatusCode::INTERNAL_SERVER_ERROR, "".into(), None);
        assert!(
            matches!(server, LlmError::Api { status: 500, ref message } if message == "Unknown error")
        );
    }

    #[test]
    fn test_to_chat_request_uses_default_model() {
        let request = CompletionRequest::new(
            vec![Message::system("Seja breve"), Message::user("Oi")],
            100,
        )
        .with_temperature(0.7);

        let chat = to_chat_request(request, "default-model");
        assert_eq!(chat.model, "default-model");
        assert_eq!(chat.messages[0].role, ChatRole::System);
        assert_eq!(chat.max_tokens, Some(100));
        assert_eq!(chat.stream, Some(false));
    }

    #[test]
    fn test_to_completion_response_rejects_missing_text() {
        let response: ChatCompletionResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":null}}]}"#).unwrap();
        let err = to_completion_response(response).unwrap_err();
        assert!(matches!(err, LlmError::EmptyResponse { .. }));
    }
}
