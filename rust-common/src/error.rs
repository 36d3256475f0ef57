pub use reqwest::StatusCode;

/// Failures crossing the client/backend boundary. Transport covers
/// connect, timeout and body-decode errors; BadStatus is a completed HTTP
/// exchange the backend answered with a non-2xx code.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server returned {status} for {url}")]
    BadStatus { status: StatusCode, url: String },
}
