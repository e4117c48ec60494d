//! Obtaining document text from a file or standard input.

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
/// Reasons the document could not be obtained.
pub enum InputError {
    /// The given path does not exist.
    #[error("File not found at {}", .path.display())]
    NotFound {
        /// Path that was requested.
        path: PathBuf,
    },
    /// The file exists but could not be read as UTF-8 text.
    #[error("Could not read {}: {source}", .path.display())]
    Read {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// Standard input could not be read.
    #[error("Could not read standard input: {0}")]
    Stdin(#[source] io::Error),
}

/// Read the document from `path`, or from standard input when no path is given.
///
/// # Errors
///
/// Returns an error if the file is missing or unreadable, or stdin fails. Blank input is not an
/// error: it is logged and returned as is, and counts zero words.
pub fn read_document(path: Option<&Path>) -> Result<String, InputError> {
    match path {
        Some(path) => read_file(path),
        None => {
            let stdin = io::stdin();
            if stdin.is_terminal() {
                eprintln!("Please paste your LaTeX below and press Ctrl-D when you're done.");
            }
            read_from(stdin.lock())
        }
    }
}

/// Read a document file as UTF-8 text.
///
/// # Errors
///
/// Returns [`InputError::NotFound`] for a missing file and [`InputError::Read`] for other
/// failures.
pub fn read_file(path: &Path) -> Result<String, InputError> {
    let content = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            InputError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            InputError::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    debug!(path = %path.display(), bytes = content.len(), "read document");
    warn_if_blank(&content);
    Ok(content)
}

/// Read a document to completion from any reader.
///
/// # Errors
///
/// Returns [`InputError::Stdin`] if reading fails.
pub fn read_from(mut reader: impl Read) -> Result<String, InputError> {
    let mut content = String::new();
    reader
        .read_to_string(&mut content)
        .map_err(InputError::Stdin)?;
    warn_if_blank(&content);
    Ok(content)
}

fn warn_if_blank(content: &str) {
    if content.trim().is_empty() {
        warn!("no input received, counting an empty document");
    }
}

#[cfg(test)]
#[path = "tests/input.rs"]
mod tests;
