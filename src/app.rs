//! One invocation of `chat`: resolve configuration, build the request, send it.

use tracing::debug;

use crate::{
    cli::Args,
    errors::Result,
    openai::ChatClient,
    request::build_request,
    sources::{load_sources, ConfigSource},
};

/// Run a single query and return the response text. Nothing is sent unless the
/// request builds and validates.
pub fn run_query(
    args: &Args,
    sources: &[ConfigSource],
    client: &dyn ChatClient,
) -> Result<String> {
    let config = load_sources(sources)?;
    debug!(keys = config.len(), "merged configuration");
    let request = build_request(args, &config)?;
    client.chat(&request)
}
