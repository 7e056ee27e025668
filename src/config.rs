//! Key/value configuration read from `.chatconfig` files and the environment.
//!
//! Files are plain `KEY=VALUE` lines. `#` and `;` start a comment that runs to
//! the end of the line, wherever they appear. A backslash keeps either marker
//! literal (`\#`, `\;`).

use std::{
    collections::BTreeMap,
    fmt::{self, Display},
    fs,
    path::Path,
};

use crate::errors::{ChatError, Result};

/// File name searched for in every ancestor of the working directory and in
/// the user's home directory.
pub const CONFIG_FILE_NAME: &str = ".chatconfig";

/// Keys understood by `chat`. The same names are used as environment variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    ApiKey,
    Model,
    SystemPrompt,
    WebSearch,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 4] = [
        ConfigKey::ApiKey,
        ConfigKey::Model,
        ConfigKey::SystemPrompt,
        ConfigKey::WebSearch,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ConfigKey::ApiKey => "CHAT_API_KEY",
            ConfigKey::Model => "CHAT_MODEL",
            ConfigKey::SystemPrompt => "CHAT_SYSTEM_PROMPT",
            ConfigKey::WebSearch => "CHAT_WEB_SEARCH",
        }
    }
}

impl AsRef<str> for ConfigKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settings from a single source, or the merged result of several.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Configuration {
    values: BTreeMap<String, String>,
}

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key`, replacing any previous value.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// The value for `key`, or `""` when it is not set.
    pub fn get(&self, key: impl AsRef<str>) -> &str {
        self.values
            .get(key.as_ref())
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Parse `KEY=VALUE` lines. Blank lines and lines without `=` are skipped,
    /// a repeated key keeps its last value.
    pub fn parse(text: &str) -> Self {
        let mut config = Configuration::new();
        for line in text.lines() {
            let line = strip_comment(line);
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                config.add(key.trim(), value.trim());
            }
        }
        config
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| ChatError::io(path, e))?;
        Ok(Self::parse(&text))
    }

    /// Merge configurations in priority order: the first configuration that
    /// defines a key decides its value.
    pub fn merge<I>(configs: I) -> Self
    where
        I: IntoIterator<Item = Configuration>,
    {
        let mut merged = Configuration::new();
        for config in configs {
            for (key, value) in config.values {
                merged.values.entry(key).or_insert(value);
            }
        }
        merged
    }
}

fn strip_comment(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' if matches!(chars.peek(), Some('#' | ';')) => {
                out.extend(chars.next());
            }
            '#' | ';' => break,
            _ => out.push(c),
        }
    }
    out
}
