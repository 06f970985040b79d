use thiserror::Error;

/// Possible errors while talking to the crawling service.
///
/// Note that the service replying with a 4xx or 5xx status is not an error here:
/// its JSON body is handed back to the caller like any other response.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unable to handle JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("credential is not a usable header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("unable to read upload contents: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
