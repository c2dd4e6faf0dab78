use thiserror::Error;

/// Errors that abort a discovery request.
///
/// Failures of individual sources (manifest, well-known paths) never surface
/// here; they are recorded through the finder's logger and skipped.
#[derive(Debug, Error)]
pub enum FaviconError {
    #[error("invalid URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("retrieve {url}: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("[{status}] {url}")]
    Status { url: String, status: u16 },

    #[error("read markup: {0}")]
    Io(#[from] std::io::Error),

    #[error("transport: {0}")]
    Transport(String),
}

pub type Result<T> = std::result::Result<T, FaviconError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_message() {
        let err = FaviconError::Status {
            url: "https://example.com/favicon.ico".to_string(),
            status: 404,
        };
        assert_eq!(err.to_string(), "[404] https://example.com/favicon.ico");
    }

    #[test]
    fn test_invalid_url_keeps_source() {
        let source = url::Url::parse("::nope").unwrap_err();
        let err = FaviconError::InvalidUrl {
            url: "::nope".to_string(),
            source,
        };
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().starts_with("invalid URL \"::nope\""));
    }
}
