use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Errors that can occur while locating or persisting an embedded invoice.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExtractorError {
    /// No extraction strategy could produce a single attachment.
    #[error("all extraction methods failed: {}", format_attempts(.attempts))]
    ContainerUnreadable { attempts: Vec<StrategyFailure> },

    /// The container was read but holds no embedded objects.
    #[error("no embedded files found in container")]
    NoAttachments,

    /// Attachments exist but none of them looks like invoice XML.
    #[error("no invoice XML among attachments: [{}]", .available.join(", "))]
    NoInvoiceCandidate { available: Vec<String> },

    /// Creating the output directory or writing the XML failed.
    #[error("failed to write {}: {source}", .path.display())]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input path or glob matched no usable file.
    #[error("no PDF files match '{pattern}'")]
    InputPatternEmpty { pattern: String },

    /// The glob pattern itself is malformed.
    #[error("invalid input pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// A batch output path exists but is not a directory.
    #[error("output path must be a directory when processing multiple files: {}", .0.display())]
    OutputNotDirectory(PathBuf),

    /// The container parser rejected the document.
    #[error("container error: {0}")]
    Container(String),

    /// Filesystem error outside of output writing (scratch space, reading input).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExtractorError {
    /// Coarse category of this error, stable for reporting.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ContainerUnreadable { .. } | Self::Container(_) => ErrorKind::ContainerUnreadable,
            Self::NoAttachments => ErrorKind::NoAttachments,
            Self::NoInvoiceCandidate { .. } => ErrorKind::NoInvoiceCandidate,
            Self::OutputWriteFailed { .. } | Self::OutputNotDirectory(_) => {
                ErrorKind::OutputWriteFailed
            }
            Self::InputPatternEmpty { .. } | Self::InvalidPattern { .. } => {
                ErrorKind::InputPatternEmpty
            }
            Self::Io(_) => ErrorKind::Io,
        }
    }
}

/// Error taxonomy used in outcomes and reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    ContainerUnreadable,
    NoAttachments,
    NoInvoiceCandidate,
    OutputWriteFailed,
    InputPatternEmpty,
    Io,
}

/// One failed strategy attempt, kept so the final error can name them all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyFailure {
    pub strategy: String,
    pub reason: String,
}

impl StrategyFailure {
    pub fn new(strategy: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            strategy: strategy.into(),
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for StrategyFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.strategy, self.reason)
    }
}

fn format_attempts(attempts: &[StrategyFailure]) -> String {
    attempts
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Pipeline stage at which a single-document extraction stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Attachments,
    Empty,
    Discovery,
    Write,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Attachments => "attachments",
            Self::Empty => "empty",
            Self::Discovery => "discovery",
            Self::Write => "write",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single-document extraction failure, tagged with input and stage.
#[derive(Debug, Error)]
#[error("{} ({stage}): {source}", .input.display())]
pub struct ExtractionError {
    pub input: PathBuf,
    pub stage: Stage,
    #[source]
    pub source: ExtractorError,
}

impl ExtractionError {
    pub fn new(input: impl Into<PathBuf>, stage: Stage, source: ExtractorError) -> Self {
        Self {
            input: input.into(),
            stage,
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.source.kind()
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T, E = ExtractorError> = std::result::Result<T, E>;
