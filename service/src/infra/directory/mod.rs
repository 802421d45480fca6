//! [`Directory`] of community members.

#[cfg(feature = "http")]
pub mod http;

use std::fmt;

use derive_more::{Display, Error as StdError, From};

#[cfg(feature = "http")]
pub use self::http::Http;

/// Operation over the remote directory of community members.
pub use common::Handler as Directory;

/// [`Directory`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// Operation conflicts with an existing entry.
    #[display("Directory reported a conflict: {_0}")]
    #[from(ignore)]
    Conflict(#[error(not(source))] Rejection),

    /// Operation was rejected.
    #[display("Directory rejected the operation: {_0}")]
    #[from(ignore)]
    Rejected(#[error(not(source))] Rejection),

    #[cfg(feature = "http")]
    /// [`Http`] transport error.
    #[display("Directory request failed: {_0}")]
    Http(http::Error),
}

impl Error {
    /// Returns the [`Rejection`] of this [`Error`], if the [`Directory`]
    /// responded at all.
    #[must_use]
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Self::Conflict(r) | Self::Rejected(r) => Some(r),
            #[cfg(feature = "http")]
            Self::Http(_) => None,
        }
    }

    /// Indicates whether this [`Error`] is a [`Error::Conflict`].
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }
}

/// Unsuccessful response of a [`Directory`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Rejection {
    /// Status code of the response.
    pub status: u16,

    /// Message explaining the rejection, if the [`Directory`] provided one.
    pub message: Option<String>,
}

impl Rejection {
    /// Extracts the message out of the provided response `body`.
    ///
    /// JSON bodies are expected to carry it in a `message` or `error` string
    /// field, while any other non-blank body is the message itself.
    #[must_use]
    pub fn message_of(body: &str) -> Option<String> {
        let body = body.trim();
        if body.is_empty() {
            return None;
        }
        match serde_json::from_str::<serde_json::Value>(body) {
            Ok(json) => ["message", "error"]
                .into_iter()
                .find_map(|f| json.get(f)?.as_str().map(ToOwned::to_owned)),
            Err(_) => Some(body.to_owned()),
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "status {}", self.status)?;
        if let Some(msg) = &self.message {
            write!(f, ": {msg}")?;
        }
        Ok(())
    }
}
