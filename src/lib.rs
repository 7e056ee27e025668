//! # `chat`
//! Ask a large language model a question from the command line.
//!
//! A prompt is assembled from command line flags and layered configuration,
//! optionally with file content as context, sent to the OpenAI chat completions
//! API, and the response text is printed.
//!
//! ## Usage
//! ```shell
//! $ chat "What is the capital of France?"
//! $ chat -f src/main.rs:10-40 "What does this loop do?"
//! $ chat --help
//! ```
//!
//! ## Configuration
//! Settings are `KEY=VALUE` lines in `.chatconfig` files, resolved in priority order:
//! 1. Command line flags (`-k`, `-m`, `-s`, `-w`) when non-empty.
//! 2. `.chatconfig` in the working directory, then each parent directory up to the root.
//! 3. `~/.chatconfig`.
//! 4. Environment variables.
//!
//! Keys:
//! - `CHAT_API_KEY`: Required. The API key used for the request.
//! - `CHAT_MODEL`: Optional. The model to use (default: gpt-4o-mini).
//! - `CHAT_SYSTEM_PROMPT`: Optional. A system prompt sent before the user prompt.
//! - `CHAT_WEB_SEARCH`: Optional. `true` lets the model search the web.
//!
//! ## Notes:
//! - `#` and `;` start a comment anywhere on a config line, including inside
//!   values. Escape them as `\#` and `\;` to keep them.
//! - Logging goes to stderr and is controlled with `RUST_LOG` (default `warn`).
//!
pub mod app;
pub mod cli;
pub mod config;
pub mod errors;
pub mod openai;
pub mod request;
pub mod selector;
pub mod sources;
