pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input cannot be read as a strict tree (cycle, second parent, dangling id, ...).
    #[error("malformed tree: {message}")]
    MalformedTree { message: String },

    #[error("outline parse error at line {line}: {message}")]
    OutlineParse { line: usize, message: String },

    #[error("invalid config: {message}")]
    InvalidConfig { message: String },

    #[error("invalid color {value:?}")]
    InvalidColor { value: String },

    #[error("tree JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedTree {
            message: message.into(),
        }
    }

    pub(crate) fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}
