//! Error types for configuration loading and validation.

use std::{
    fmt::Write as _,
    path::{Path, PathBuf},
};

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Errors produced while loading, parsing, or validating a plugin config.
pub enum Error {
    #[error("{message}")]
    /// The file could not be read.
    Read {
        /// Path that failed to read, when loading from disk.
        path: Option<PathBuf>,
        /// Human-readable error message.
        message: String,
    },
    #[error("{message}")]
    /// The file is not well-formed JSON.
    Parse {
        /// Path of the offending file, when loading from disk.
        path: Option<PathBuf>,
        /// 1-based line number.
        line: usize,
        /// 1-based column number.
        col: usize,
        /// Human-readable error message.
        message: String,
        /// Rendered excerpt including a caret at the error location.
        excerpt: String,
    },
    #[error("{message}")]
    /// Well-formed JSON with missing, conflicting or mistyped fields.
    Validation {
        /// Path of the offending file, when loading from disk.
        path: Option<PathBuf>,
        /// 1-based line number, when the problem is tied to a location.
        line: Option<usize>,
        /// Human-readable error message.
        message: String,
    },
}

impl Error {
    /// Render a human-friendly message including location and excerpt.
    pub fn pretty(&self) -> String {
        let at = |path: &Option<PathBuf>| match path {
            Some(p) => format!(" at {}", p.display()),
            None => String::new(),
        };
        match self {
            Self::Read { path, message } => format!("Read error{}: {}", at(path), message),
            Self::Parse {
                path,
                line,
                col,
                message,
                excerpt,
            } => match path {
                Some(p) => format!(
                    "Config parse error at {}:{}:{}\n{}\n{}",
                    p.display(),
                    line,
                    col,
                    message,
                    excerpt
                ),
                None => format!(
                    "Config parse error at line {}, column {}\n{}\n{}",
                    line, col, message, excerpt
                ),
            },
            Self::Validation {
                path,
                line: Some(l),
                message,
            } => format!("Config validation error{}:{}\n{}", at(path), l, message),
            Self::Validation {
                path,
                line: None,
                message,
            } => format!("Config validation error{}\n{}", at(path), message),
        }
    }

    /// Access the optional path attached to this error.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Read { path, .. } | Self::Parse { path, .. } | Self::Validation { path, .. } => {
                path.as_deref()
            }
        }
    }
}

/// Build a short excerpt with a caret under `(line_no, col_no)`.
pub fn excerpt_at(source: &str, line_no: usize, col_no: usize) -> String {
    let lines: Vec<&str> = source.lines().collect();
    let start = line_no.saturating_sub(1).max(1);
    let end = lines.len().min(line_no + 1);

    let mut out = String::new();
    for n in start..=end {
        let text = lines.get(n - 1).copied().unwrap_or("");
        let _ignored = writeln!(out, " {:>4} | {}", n, text);
        if n == line_no {
            let _ignored = writeln!(out, "      | {}^", " ".repeat(col_no.saturating_sub(1)));
        }
    }
    out
}
