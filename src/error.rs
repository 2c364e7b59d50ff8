use thiserror::Error;

/// Coarse failure kinds for one run. HTTP-side failures (connection,
/// status, response decoding) are request errors; file I/O and
/// serialization land in the unexpected bucket.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Request(#[from] reqwest::Error),

    #[error(transparent)]
    Unexpected(Box<dyn std::error::Error + Send + Sync>),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Unexpected(Box::new(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Unexpected(Box::new(err))
    }
}
