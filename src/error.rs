use std::path::PathBuf;

/// Errors raised while turning an XGBoost JSON document into an [`crate::Ensemble`].
///
/// Parsing never recovers: the first error returned by any handler aborts
/// the whole parse and the partially built model is discarded.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("malformed JSON at line {line}, column {column}: {source}")]
    MalformedJson {
        #[source]
        source: serde_json::Error,
        line: usize,
        column: usize,
    },

    #[error("schema violation: {0}")]
    Schema(String),

    #[error("invariant violation: {0}")]
    Invariant(String),

    #[error("failed to open model file {path}")]
    Resource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ParseError {
    pub(crate) fn schema(message: impl Into<String>) -> Self {
        Self::Schema(message.into())
    }

    pub(crate) fn invariant(message: impl Into<String>) -> Self {
        Self::Invariant(message.into())
    }
}
