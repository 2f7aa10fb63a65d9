use std::fmt;
use std::path::PathBuf;

/// Machine-readable error codes surfaced by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    CorpusReadFailed,
    CorpusParseError,
    EntityNotFound,
    MalformedRecord,
    OutputWriteFailed,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1001",
            Self::CorpusReadFailed => "E2001",
            Self::CorpusParseError => "E2002",
            Self::EntityNotFound => "E2003",
            Self::MalformedRecord => "E2004",
            Self::OutputWriteFailed => "E5001",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Config file parse error",
            Self::CorpusReadFailed => "Corpus file could not be read",
            Self::CorpusParseError => "Corpus file is not valid JSON",
            Self::EntityNotFound => "Subject entity not found in corpus",
            Self::MalformedRecord => "Interaction record is malformed",
            Self::OutputWriteFailed => "Ranked table write failed",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix syntax in clout.toml and retry."),
            Self::CorpusReadFailed => Some("Check the --tweets path and read permissions."),
            Self::CorpusParseError => {
                Some("The corpus must be a JSON object mapping entity handles to record arrays.")
            }
            Self::EntityNotFound => Some("Run `clout entities` to list the handles in the corpus."),
            Self::MalformedRecord => {
                Some("Every record needs user.screen_name and text; fix or drop the record.")
            }
            Self::OutputWriteFailed => Some("Check disk space and write permissions."),
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A structurally invalid interaction record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    #[error("{}missing required field `{field}`", location(.index))]
    MissingField {
        index: Option<usize>,
        field: &'static str,
    },

    #[error("{}account id is blank", location(.index))]
    BlankAuthor { index: Option<usize> },
}

#[allow(clippy::ref_option)]
fn location(index: &Option<usize>) -> String {
    index.map_or_else(String::new, |i| format!("record {i}: "))
}

/// Failures while loading a corpus or selecting an entity's records.
#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    #[error("failed to read corpus {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse corpus JSON")]
    Parse(#[from] serde_json::Error),

    #[error("entity `{0}` not found in corpus")]
    EntityNotFound(String),

    #[error("entity `{entity}`: {source}")]
    Record {
        entity: String,
        #[source]
        source: RecordError,
    },
}

impl CorpusError {
    /// Map to the stable CLI error code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Read { .. } => ErrorCode::CorpusReadFailed,
            Self::Parse(_) => ErrorCode::CorpusParseError,
            Self::EntityNotFound(_) => ErrorCode::EntityNotFound,
            Self::Record { .. } => ErrorCode::MalformedRecord,
        }
    }
}
