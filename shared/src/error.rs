use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("no location configured for {0}")]
    NotConfigured(&'static str),

    #[error("request failed: {0}")]
    Transport(String),

    #[error("unexpected status {status} from {location}")]
    Status { location: String, status: u16 },

    #[error("malformed response from {location}: {reason}")]
    MalformedResponse { location: String, reason: String },

    #[error("failed to read {location}: {source}")]
    Io {
        location: String,
        #[source]
        source: std::io::Error,
    },

    #[error("both sources failed (primary: {primary}; fallback: {fallback})")]
    SourceUnavailable { primary: String, fallback: String },

    #[error("history truncated at page {page}: {reason}")]
    PartialHistory { page: u32, reason: String },
}

impl SourceError {
    pub fn malformed(location: impl Into<String>, reason: impl ToString) -> Self {
        Self::MalformedResponse {
            location: location.into(),
            reason: reason.to_string(),
        }
    }
}

pub type SourceResult<T> = std::result::Result<T, SourceError>;
