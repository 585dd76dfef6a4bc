use std::fmt;

#[derive(Debug)]
pub enum EngineError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (empty name, bad threshold, etc.).
    ConfigValidation(String),
    /// A named column does not exist in the input headers.
    MissingColumn { column: String },
    /// A column index points past the header row.
    ColumnOutOfRange { index: usize, width: usize },
    /// CSV read error.
    Csv(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::MissingColumn { column } => write!(f, "missing column '{column}'"),
            Self::ColumnOutOfRange { index, width } => {
                write!(f, "column index {index} out of range (row width {width})")
            }
            Self::Csv(msg) => write!(f, "CSV error: {msg}"),
        }
    }
}

impl std::error::Error for EngineError {}
