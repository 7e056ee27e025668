//! Utilities for querying the OpenAI API via the chat completions endpoint.
//!
//! For specific details on request/response schemas, see the [OpenAI API chat completions docs](https://platform.openai.com/docs/api-reference/chat/create).

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    cli::{DEFAULT_MODEL, DEFAULT_SEARCH_MODEL},
    errors::{ChatError, Result},
    request::ChatRequest,
};

pub const OPENAI_API_BASE: &str = "https://api.openai.com/v1";

/// A `chat/completions` `messages` item
#[derive(Debug, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    fn new(role: &str, content: impl Into<String>) -> Self {
        ChatMessage {
            role: role.to_string(),
            content: content.into(),
        }
    }
}

/// Enables the server side search tool. Serialized as an empty object.
#[derive(Debug, Serialize)]
pub struct WebSearchOptions {}

/// A `chat/completions` request body
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_search_options: Option<WebSearchOptions>,
}

impl From<&ChatRequest> for ChatCompletionRequest {
    fn from(request: &ChatRequest) -> Self {
        let model = match (request.model.is_empty(), request.web_search) {
            (false, _) => request.model.clone(),
            (true, false) => DEFAULT_MODEL.to_string(),
            (true, true) => DEFAULT_SEARCH_MODEL.to_string(),
        };

        let mut messages = Vec::with_capacity(request.file_contents.len() + 2);
        if !request.system_prompt.is_empty() {
            messages.push(ChatMessage::new("system", &request.system_prompt));
        }
        messages.push(ChatMessage::new("user", &request.prompt));
        messages.extend(
            request
                .file_contents
                .iter()
                .map(|contents| ChatMessage::new("user", format!("```\n{contents}\n```"))),
        );

        ChatCompletionRequest {
            model,
            messages,
            web_search_options: request.web_search.then_some(WebSearchOptions {}),
        }
    }
}

/// A `chat/completions` response message
#[derive(Deserialize)]
pub struct ChatResponseMessage {
    pub content: Option<String>,
}

/// A `chat/completions` response choice
#[derive(Deserialize)]
pub struct ChatChoice {
    pub message: ChatResponseMessage,
}

/// A `chat/completions` response
#[derive(Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Sends one resolved request and returns the response text.
pub trait ChatClient {
    fn chat(&self, request: &ChatRequest) -> Result<String>;
}

/// Blocking client for the OpenAI chat completions endpoint
pub struct OpenAiClient {
    http: reqwest::blocking::Client,
}

impl OpenAiClient {
    pub fn new() -> Result<Self> {
        // The request is never cancelled, so no client side timeout either.
        let http = reqwest::blocking::Client::builder()
            .timeout(None::<std::time::Duration>)
            .build()?;
        Ok(OpenAiClient { http })
    }
}

impl ChatClient for OpenAiClient {
    fn chat(&self, request: &ChatRequest) -> Result<String> {
        let body = ChatCompletionRequest::from(request);
        let url = format!("{OPENAI_API_BASE}/chat/completions");
        info!(
            model = %body.model,
            messages = body.messages.len(),
            web_search = request.web_search,
            "sending chat completion request"
        );

        let response = self
            .http
            .post(&url)
            .bearer_auth(&request.api_key)
            .json(&body)
            .send()?;
        let status = response.status();
        let text = response.text()?;
        if !status.is_success() {
            return Err(ChatError::RemoteApi(error_message(status, &text)));
        }
        parse_completion(&text)
    }
}

/// Extract the first choice's text from a response body.
pub fn parse_completion(body: &str) -> Result<String> {
    let parsed: ChatCompletionResponse = serde_json::from_str(body)
        .map_err(|e| ChatError::RemoteApi(format!("malformed response: {e}")))?;
    parsed
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content.unwrap_or_default())
        .ok_or_else(|| ChatError::RemoteApi("response contained no choices".to_string()))
}

/// The API's own error message if the body carries one, else the status and body.
fn error_message(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) => parsed.error.message,
        Err(_) if body.trim().is_empty() => status.to_string(),
        Err(_) => format!("{status}: {}", body.trim()),
    }
}
