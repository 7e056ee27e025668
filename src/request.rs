//! Building a [`ChatRequest`] from the command line and merged configuration.

use tracing::debug;

use crate::{
    cli::Args,
    config::{ConfigKey, Configuration},
    errors::{ChatError, Result},
    selector::resolve_file_list,
};

/// A fully resolved request, ready to send.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatRequest {
    pub api_key: String,
    pub prompt: String,
    /// Empty means no system message.
    pub system_prompt: String,
    /// Empty means the client default.
    pub model: String,
    pub web_search: bool,
    /// One entry per file selector, in command line order.
    pub file_contents: Vec<String>,
}

/// Start from configuration, then apply non-empty command line values.
/// Web search is enabled if either side enables it.
pub fn build_request(args: &Args, config: &Configuration) -> Result<ChatRequest> {
    let mut request = ChatRequest {
        api_key: config.get(ConfigKey::ApiKey).to_string(),
        model: config.get(ConfigKey::Model).to_string(),
        system_prompt: config.get(ConfigKey::SystemPrompt).to_string(),
        web_search: parse_bool(config.get(ConfigKey::WebSearch)).unwrap_or(false),
        ..ChatRequest::default()
    };

    override_with(&mut request.api_key, args.api_key.as_deref());
    override_with(&mut request.model, args.model.as_deref());
    override_with(&mut request.system_prompt, args.system_prompt.as_deref());
    request.web_search |= args.web_search;
    request.prompt = args.prompt()?.to_string();

    if let Some(files) = args.files.as_deref() {
        request.file_contents = resolve_file_list(files)?;
    }

    if request.prompt.is_empty() {
        return Err(ChatError::Validation("prompt is required".to_string()));
    }
    if request.api_key.is_empty() {
        return Err(ChatError::Validation(format!(
            "API key is required (use -k or set {})",
            ConfigKey::ApiKey
        )));
    }

    debug!(
        model = %request.model,
        web_search = request.web_search,
        files = request.file_contents.len(),
        "built chat request"
    );
    Ok(request)
}

fn override_with(field: &mut String, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        *field = value.to_string();
    }
}

/// Accepts the usual spellings: `1`, `t`, `true`, `0`, `f`, `false` in
/// lower, upper or title case.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim() {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}
