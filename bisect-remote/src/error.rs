//! Remote substitute errors
//!
//! None of these reach a `SearchService` caller: the service logs them and
//! serves the request locally instead.

use thiserror::Error;

/// Failure talking to the remote search substitute
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    /// Connection refused, DNS failure, timeout, ...
    #[error("remote transport failed: {0}")]
    Transport(String),

    /// Non-success HTTP status
    #[error("remote returned status {code} for {url}")]
    Status {
        /// HTTP status code
        code: u16,
        /// Requested URL
        url: String,
    },

    /// Body was not the expected JSON shape
    #[error("could not decode remote response: {0}")]
    Decode(String),

    /// Body decoded but contradicts itself
    #[error("remote response is inconsistent: {0}")]
    Malformed(String),
}

impl From<ureq::Error> for RemoteError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(code, response) => RemoteError::Status {
                code,
                url: response.get_url().to_string(),
            },
            ureq::Error::Transport(transport) => RemoteError::Transport(transport.to_string()),
        }
    }
}
