//! Where configurations come from.
//!
//! Sources are loaded in a fixed order (local, global, environment) and merged
//! so that the earliest source to define a key wins.

use std::{
    env, fs, io,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::{
    config::{ConfigKey, Configuration, CONFIG_FILE_NAME},
    errors::{ChatError, Result},
};

/// A producer of one [`Configuration`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// `.chatconfig` in `start` and every ancestor of it, nearest first
    Local { start: PathBuf },
    /// `.chatconfig` in the home directory, if any
    Global { home: Option<PathBuf> },
    /// `CHAT_*` environment variables
    Env,
}

impl ConfigSource {
    /// The sources for this process in priority order.
    pub fn defaults() -> Result<Vec<ConfigSource>> {
        let start = env::current_dir().map_err(|e| ChatError::io(".", e))?;
        Ok(vec![
            ConfigSource::Local { start },
            ConfigSource::Global { home: home_dir() },
            ConfigSource::Env,
        ])
    }

    pub fn load(&self) -> Result<Configuration> {
        self.load_with(&|key| env::var(key).ok())
    }

    /// Load, reading environment variables through `lookup`.
    pub fn load_with(&self, lookup: &dyn Fn(&str) -> Option<String>) -> Result<Configuration> {
        match self {
            ConfigSource::Local { start } => load_local(start),
            ConfigSource::Global { home } => match home {
                Some(home) => Ok(load_optional(&home.join(CONFIG_FILE_NAME))?.unwrap_or_default()),
                None => {
                    debug!("no home directory, skipping global configuration");
                    Ok(Configuration::new())
                }
            },
            ConfigSource::Env => Ok(env_configuration(lookup)),
        }
    }
}

/// Load and merge every source, earliest first.
pub fn load_sources(sources: &[ConfigSource]) -> Result<Configuration> {
    load_sources_with(sources, &|key| env::var(key).ok())
}

pub fn load_sources_with(
    sources: &[ConfigSource],
    lookup: &dyn Fn(&str) -> Option<String>,
) -> Result<Configuration> {
    let configs = sources
        .iter()
        .map(|source| source.load_with(lookup))
        .collect::<Result<Vec<_>>>()?;
    Ok(Configuration::merge(configs))
}

/// Candidate config paths from `start` up to the filesystem root.
pub fn candidate_paths(start: &Path) -> impl Iterator<Item = PathBuf> + '_ {
    start.ancestors().map(|dir| dir.join(CONFIG_FILE_NAME))
}

fn load_local(start: &Path) -> Result<Configuration> {
    let mut configs = Vec::new();
    for path in candidate_paths(start) {
        if let Some(config) = load_optional(&path)? {
            configs.push(config);
        }
    }
    Ok(Configuration::merge(configs))
}

/// Load `path` if it is an existing file. Missing files and directories yield
/// `None`; any other stat failure is an error.
fn load_optional(path: &Path) -> Result<Option<Configuration>> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_file() => {
            debug!(path = %path.display(), "loading configuration");
            Configuration::from_file(path).map(Some)
        }
        Ok(_) => Ok(None),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(ChatError::io(path, e)),
    }
}

/// Build a configuration from variables returned by `lookup`. Unset and empty
/// variables are omitted so they never shadow a lower priority source.
pub fn env_configuration<F>(lookup: F) -> Configuration
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = Configuration::new();
    for key in ConfigKey::ALL {
        if let Some(value) = lookup(key.as_str()).filter(|v| !v.is_empty()) {
            config.add(key.as_str(), value);
        }
    }
    config
}

/// Resolve the home directory from `HOME`, then `USERPROFILE`, then the
/// platform default.
pub fn home_dir() -> Option<PathBuf> {
    env::var_os("HOME")
        .or_else(|| env::var_os("USERPROFILE"))
        .filter(|home| !home.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
}
