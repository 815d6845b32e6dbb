use std::fmt;

#[derive(Debug)]
pub enum ReconError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (zero recent limit, etc.).
    ConfigValidation(String),
    /// An input that must be a list was something else. Fatal: the engine cannot run.
    NotAList { argument: String, found: String },
    /// A single entry could not be turned into a record. Logged and skipped, never returned
    /// from a normalization pass.
    MalformedRecord { source: String, index: usize, reason: String },
    /// A timestamp field was present but not a recognizable date/time. Logged; the field
    /// is treated as unset and the record kept.
    TimestampParse { source: String, index: usize, field: String, value: String },
    /// JSON decode error on a whole document.
    Json(String),
}

impl fmt::Display for ReconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::NotAList { argument, found } => {
                write!(f, "argument '{argument}': expected a list of records, found {found}")
            }
            Self::MalformedRecord { source, index, reason } => {
                write!(f, "{source} record #{index}: {reason}")
            }
            Self::TimestampParse { source, index, field, value } => {
                write!(f, "{source} record #{index}: cannot parse {field} '{value}'")
            }
            Self::Json(msg) => write!(f, "JSON error: {msg}"),
        }
    }
}

impl std::error::Error for ReconError {}

impl From<serde_json::Error> for ReconError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e.to_string())
    }
}
