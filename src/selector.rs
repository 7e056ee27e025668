//! File selectors for passing file content to the model as context.
//!
//! A selector is a path with an optional line suffix:
//! - `<path>` selects the entire file
//! - `<path>:<line>` selects a single 1-based line
//! - `<path>:<start>-<end>` selects an inclusive line range
//!
//! Several selectors may be given as a comma separated list, see [`resolve_file_list`].

use std::{
    fmt::{self, Display},
    fs::{self, File},
    io::{self, BufRead, BufReader, Split},
    path::PathBuf,
    str::FromStr,
};

use tracing::debug;

use crate::errors::{ChatError, Result};

/// Which part of a file to read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSelector {
    Whole,
    Line(usize),
    Range { start: usize, end: usize },
}

/// A file path paired with the lines to take from it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSpec {
    pub path: PathBuf,
    pub selector: LineSelector,
}

impl FromStr for FileSpec {
    type Err = ChatError;

    fn from_str(s: &str) -> Result<Self> {
        let Some((path, suffix)) = s.split_once(':') else {
            return Ok(FileSpec {
                path: PathBuf::from(s),
                selector: LineSelector::Whole,
            });
        };

        let selector = match suffix.split_once('-') {
            None => match suffix.parse::<usize>() {
                Ok(line) if line > 0 => LineSelector::Line(line),
                _ => {
                    return Err(ChatError::InvalidArgument(format!(
                        "invalid line number in path: {s}"
                    )))
                }
            },
            Some((start, end)) => match (start.parse::<usize>(), end.parse::<usize>()) {
                (Ok(start), Ok(end)) if start > 0 && end >= start => {
                    LineSelector::Range { start, end }
                }
                _ => {
                    return Err(ChatError::InvalidArgument(format!(
                        "invalid line range in path: {s}"
                    )))
                }
            },
        };

        Ok(FileSpec {
            path: PathBuf::from(path),
            selector,
        })
    }
}

impl Display for FileSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.selector {
            LineSelector::Whole => write!(f, "{}", self.path.display()),
            LineSelector::Line(line) => write!(f, "{}:{line}", self.path.display()),
            LineSelector::Range { start, end } => {
                write!(f, "{}:{start}-{end}", self.path.display())
            }
        }
    }
}

impl FileSpec {
    /// Read the selected content. Line selections drop the line terminators,
    /// ranges are joined with `\n`.
    pub fn read(&self) -> Result<String> {
        match self.selector {
            LineSelector::Whole => {
                fs::read_to_string(&self.path).map_err(|e| ChatError::io(&self.path, e))
            }
            LineSelector::Line(line) => {
                for (idx, raw) in self.raw_lines()?.enumerate() {
                    let raw = raw.map_err(|e| ChatError::io(&self.path, e))?;
                    if idx + 1 == line {
                        return self.decode(raw);
                    }
                }
                Err(ChatError::NotFound(format!(
                    "line {line} out of range in {}",
                    self.path.display()
                )))
            }
            LineSelector::Range { start, end } => {
                let mut lines = Vec::new();
                for (idx, raw) in self.raw_lines()?.enumerate() {
                    let raw = raw.map_err(|e| ChatError::io(&self.path, e))?;
                    let number = idx + 1;
                    if number > end {
                        break;
                    }
                    if number >= start {
                        lines.push(self.decode(raw)?);
                    }
                }
                if lines.is_empty() {
                    return Err(ChatError::NotFound(format!(
                        "line range {start}-{end} out of range in {}",
                        self.path.display()
                    )));
                }
                Ok(lines.join("\n"))
            }
        }
    }

    /// Undecoded lines, so that only selected lines need to be valid UTF-8.
    fn raw_lines(&self) -> Result<Split<BufReader<File>>> {
        let file = File::open(&self.path).map_err(|e| ChatError::io(&self.path, e))?;
        Ok(BufReader::new(file).split(b'\n'))
    }

    fn decode(&self, mut raw: Vec<u8>) -> Result<String> {
        if raw.last() == Some(&b'\r') {
            raw.pop();
        }
        String::from_utf8(raw).map_err(|e| {
            ChatError::io(&self.path, io::Error::new(io::ErrorKind::InvalidData, e))
        })
    }
}

/// Resolve a comma separated list of selectors, keeping input order.
/// The first selector that fails aborts the whole list.
pub fn resolve_file_list(list: &str) -> Result<Vec<String>> {
    list.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let spec = entry.parse::<FileSpec>()?;
            debug!(selector = %spec, "reading file context");
            spec.read()
        })
        .collect()
}
