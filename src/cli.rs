use clap::Parser;
use tracing::debug;

use crate::errors::{ChatError, Result};

/// The model used when neither the command line nor any configuration names one.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
/// The default when web search is enabled. Chat completions only accept the
/// search tool on the search preview models.
pub const DEFAULT_SEARCH_MODEL: &str = "gpt-4o-mini-search-preview";

const EXAMPLES: &str = "\
Examples:
  Ask a simple question:
    chat \"What is the capital of France?\"

  Provide a file as context:
    chat -f chapter.txt \"Summarize the chapter.\"

  Provide parts of several files as context:
    chat -f src/main.rs:10-40,Cargo.toml \"Why does this not compile?\"

Configuration:
  KEY=VALUE lines are read from .chatconfig in the working directory and every
  parent directory (nearest wins), then ~/.chatconfig, then the environment.
  Keys: CHAT_API_KEY, CHAT_MODEL, CHAT_SYSTEM_PROMPT, CHAT_WEB_SEARCH.
  Command line flags override all of them.";

/// CLI for `chat`
#[derive(Debug, Default, Parser)]
#[command(name = "chat", author, version, about, after_help = EXAMPLES)]
pub struct Args {
    /// API key for the model provider.
    #[arg(short = 'k', long)]
    pub api_key: Option<String>,
    /// Model to use (default: gpt-4o-mini, or gpt-4o-mini-search-preview with -w).
    #[arg(short, long)]
    pub model: Option<String>,
    /// System prompt to provide to the model.
    #[arg(short, long)]
    pub system_prompt: Option<String>,
    /// Comma separated files provided to the model as context. Each may select
    /// lines, e.g. <path>:300 or <path>:300-400.
    #[arg(short, long, value_name = "PATH[:LINE|:START-END],...")]
    pub files: Option<String>,
    /// Let the model search the web.
    #[arg(short, long)]
    pub web_search: bool,
    /// The prompt. Only the first positional argument is used.
    #[arg(value_name = "PROMPT")]
    pub prompt: Vec<String>,
}

impl Args {
    /// The prompt, which is the first positional argument.
    pub fn prompt(&self) -> Result<&str> {
        let (first, rest) = self
            .prompt
            .split_first()
            .ok_or_else(|| ChatError::InvalidArgument("prompt is required".to_string()))?;
        if !rest.is_empty() {
            debug!(ignored = rest.len(), "ignoring extra positional arguments");
        }
        Ok(first)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("chat").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn parses_short_flags() {
        let args = parse(&[
            "-k", "key", "-m", "gpt-x", "-s", "be brief", "-f", "a.txt:1,b.txt", "-w", "hello",
        ]);
        assert_eq!(args.api_key.as_deref(), Some("key"));
        assert_eq!(args.model.as_deref(), Some("gpt-x"));
        assert_eq!(args.system_prompt.as_deref(), Some("be brief"));
        assert_eq!(args.files.as_deref(), Some("a.txt:1,b.txt"));
        assert!(args.web_search);
        assert_eq!(args.prompt().unwrap(), "hello");
    }

    #[test]
    fn parses_long_flags() {
        let args = parse(&["--api-key=key", "--model", "m", "--web-search", "hi"]);
        assert_eq!(args.api_key.as_deref(), Some("key"));
        assert_eq!(args.model.as_deref(), Some("m"));
        assert!(args.web_search);
        assert_eq!(args.system_prompt, None);
    }

    #[test]
    fn first_positional_is_the_prompt() {
        let args = parse(&["first", "second", "third"]);
        assert_eq!(args.prompt().unwrap(), "first");
    }

    #[test]
    fn missing_prompt_is_invalid_argument() {
        let args = parse(&["-m", "gpt-x"]);
        assert!(!args.web_search);
        match args.prompt() {
            Err(ChatError::InvalidArgument(msg)) => assert_eq!(msg, "prompt is required"),
            other => panic!("expected invalid argument, got {other:?}"),
        }
    }

    #[test]
    fn unknown_flag_and_help_are_clap_errors() {
        let err = Args::try_parse_from(["chat", "-x", "hello"]).unwrap_err();
        assert!(err.use_stderr());
        let help = Args::try_parse_from(["chat", "-h"]).unwrap_err();
        assert_eq!(help.kind(), clap::error::ErrorKind::DisplayHelp);
        assert!(!help.use_stderr());
    }
}
