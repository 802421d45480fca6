//! [`Error`]-related definitions.

use std::{fmt, io, process::ExitCode};

use derive_more::Error as StdError;
use itertools::Itertools as _;
use service::infra::{directory, storage};
use tracerr::{Trace, Traced};

/// Defines a new error type.
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_error {
    (
        enum $name:ident {
            $(
                #[code = $code:literal]
                #[exit_code = $exit_code:literal]
                #[message = $message:literal]
                $variant:ident
            ),* $(,)?
        }
    ) => {
        /// Error type.
        #[derive(
            Clone,
            Copy,
            Debug,
            ::derive_more::Display,
            ::derive_more::Error
        )]
        pub enum $name {
            $(
                #[display($message)]
                #[doc = $message]
                $variant,
            )*
        }

        impl From<$name> for $crate::Error {
            fn from(err: $name) -> Self {
                match err {
                    $(
                        $name::$variant => Self {
                            code: $code,
                            exit_code: $exit_code,
                            message: $message.to_string(),
                            backtrace: None,
                        },
                    )*
                }
            }
        }
    };
}

/// Command line [`Error`] reported to a member.
#[derive(Clone, Debug, StdError)]
pub struct Error {
    /// [`Error`] code.
    pub code: Code,

    /// Process exit code of this [`Error`].
    pub exit_code: u8,

    /// Backtrace of this [`Error`].
    #[error(not(backtrace))]
    pub backtrace: Option<Trace>,

    /// [`Error`] message.
    pub message: String,
}

impl Error {
    /// Exit code of a misused command.
    pub const USAGE: u8 = 64;

    /// Exit code of a malformed input.
    pub const DATA_ERR: u8 = 65;

    /// Exit code of an unavailable directory.
    pub const UNAVAILABLE: u8 = 69;

    /// Exit code of a directory response not following its protocol.
    pub const PROTOCOL: u8 = 76;

    /// Exit code of an internal failure.
    pub const SOFTWARE: u8 = 70;

    /// Exit code of a missing permission.
    pub const NO_PERM: u8 = 77;

    /// Exit code of an invalid configuration.
    pub const CONFIG: u8 = 78;

    /// Create a new [`Error`] representing an internal failure.
    #[must_use]
    pub fn internal(msg: &impl ToString) -> Self {
        Self {
            code: "INTERNAL_ERROR",
            exit_code: Self::SOFTWARE,
            message: msg.to_string(),
            backtrace: None,
        }
    }

    /// Returns the [`ExitCode`] the process should terminate with.
    #[must_use]
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.exit_code)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            code,
            exit_code: _,
            backtrace,
            message,
        } = self;

        write!(
            f,
            "[{code}]: {message}{}",
            backtrace
                .iter()
                .format_with("\n", |trace, f| f(&format_args!("\n{trace}"))),
        )
    }
}

/// [`Error`] code.
pub type Code = &'static str;

/// Helper trait for converting types into [`Error`]s.
pub trait AsError {
    /// Tries to convert the type into an [`Error`].
    ///
    /// [`None`] is returned if the type cannot be converted into an [`Error`].
    fn try_as_error(&self) -> Option<Error>;

    /// Converts the type into an [`Error`].
    fn as_error(&self) -> Error
    where
        Self: fmt::Display,
    {
        self.try_as_error()
            .unwrap_or_else(|| Error::internal(&self))
    }

    /// Converts the type into an [`Error`] by consuming it.
    fn into_error(self) -> Error
    where
        Self: fmt::Display + Sized,
    {
        self.as_error()
    }
}

impl<E: AsError> AsError for Traced<E> {
    fn try_as_error(&self) -> Option<Error> {
        let mut error = self.as_ref().try_as_error()?;
        error.backtrace = Some(self.trace().clone());
        Some(error)
    }
}

impl AsError for directory::Error {
    fn try_as_error(&self) -> Option<Error> {
        use directory::http::Error as Http;

        let (code, exit_code, message) = match self {
            Self::Conflict(_) | Self::Rejected(_) => (
                "DIRECTORY_REJECTED",
                Error::UNAVAILABLE,
                self.rejection().and_then(|r| r.message.clone()),
            ),
            Self::Http(e @ Http::Decode(_)) => (
                "DIRECTORY_MALFORMED_RESPONSE",
                Error::PROTOCOL,
                Some(e.to_string()),
            ),
            Self::Http(e @ (Http::Build(_) | Http::Transport(_))) => (
                "DIRECTORY_UNAVAILABLE",
                Error::UNAVAILABLE,
                Some(e.to_string()),
            ),
        };
        Some(Error {
            code,
            exit_code,
            message: message.unwrap_or_else(|| self.to_string()),
            backtrace: None,
        })
    }
}

impl AsError for storage::Error {
    fn try_as_error(&self) -> Option<Error> {
        None
    }
}

impl AsError for io::Error {
    fn try_as_error(&self) -> Option<Error> {
        None
    }
}

#[cfg(test)]
mod spec {
    use service::infra::directory::{self, Rejection};

    use super::{AsError as _, Error};

    #[test]
    fn rejection_message_is_shown_as_is() {
        let err = directory::Error::Rejected(Rejection {
            status: 404,
            message: Some("User not found".into()),
        })
        .into_error();

        assert_eq!(err.code, "DIRECTORY_REJECTED");
        assert_eq!(err.exit_code, Error::UNAVAILABLE);
        assert_eq!(err.to_string(), "[DIRECTORY_REJECTED]: User not found");
    }

    #[test]
    fn unknown_errors_are_internal() {
        let err = std::io::Error::other("disk is gone").into_error();

        assert_eq!(err.code, "INTERNAL_ERROR");
        assert_eq!(err.exit_code, Error::SOFTWARE);
        assert_eq!(err.message, "disk is gone");
    }

    #[test]
    fn bodyless_rejection_falls_back_to_status() {
        let err = directory::Error::Conflict(Rejection {
            status: 409,
            message: None,
        })
        .as_error();

        assert!(err.message.contains("409"), "{}", err.message);
    }
}
