//! Commands managing the session of a member.

use std::io;

use service::{
    command::{
        log_in, log_out, register, restore_session, sign_in, update_profile,
        update_session, LogOut, Register, SignIn, UpdateProfile,
    },
    domain::user,
    query::{current_session, CurrentSession},
    Command as _,
};
use tracing as log;

use crate::{define_error, AsError, Error, Service};

use super::{render, write};

/// Text shown when nobody is signed in.
pub(crate) const SIGNED_OUT: &str = "Nenhuma sessão ativa.";

/// Signs a member in with the provided [`user::Credentials`].
pub(crate) async fn sign_in(
    service: &Service,
    credentials: user::Credentials,
    out: &mut impl io::Write,
) -> Result<(), Error> {
    let session = service
        .execute(SignIn(credentials))
        .await
        .map_err(AsError::into_error)?;

    log::info!("Signed in as `{}`", session.profile.email);

    write(out, &render::session(&session))
}

/// Registers a new member and signs them in.
pub(crate) async fn register(
    service: &Service,
    registration: user::Registration,
    out: &mut impl io::Write,
) -> Result<(), Error> {
    let session = service
        .execute(Register(registration))
        .await
        .map_err(AsError::into_error)?;

    log::info!("Registered `{}`", session.profile.email);

    write(out, &render::session(&session))
}

/// Shows the session of the signed-in member.
pub(crate) async fn profile(
    service: &Service,
    out: &mut impl io::Write,
) -> Result<(), Error> {
    let session = service
        .execute(CurrentSession)
        .await
        .map_err(AsError::into_error)?;

    let text = session
        .as_ref()
        .map_or_else(|| SIGNED_OUT.to_owned(), render::session);

    write(out, &text)
}

/// Updates the profile of the signed-in member.
pub(crate) async fn update(
    service: &Service,
    patch: user::Patch,
    out: &mut impl io::Write,
) -> Result<(), Error> {
    define_error! {
        enum Error {
            #[code = "NOTHING_TO_UPDATE"]
            #[exit_code = 64]
            #[message = "At least one field to update must be provided"]
            NothingToUpdate,
        }
    }

    if patch.is_empty() {
        return Err(Error::NothingToUpdate.into());
    }

    let session = service
        .execute(UpdateProfile(patch))
        .await
        .map_err(AsError::into_error)?;

    write(out, &render::session(&session))
}

/// Signs the current member out.
pub(crate) async fn sign_out(
    service: &Service,
    out: &mut impl io::Write,
) -> Result<(), Error> {
    service
        .execute(LogOut)
        .await
        .map_err(AsError::into_error)?;

    write(out, SIGNED_OUT)
}

impl AsError for user::Violation {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "NO_STUDY_TIMES"]
                #[exit_code = 65]
                #[message = "At least one study time must be selected"]
                NoStudyTimes,

                #[code = "BLANK_ABOUT"]
                #[exit_code = 65]
                #[message = "The `about` text must not be blank"]
                BlankAbout,
            }
        }

        Some(
            match self {
                Self::NoStudyTimes => Error::NoStudyTimes,
                Self::BlankAbout => Error::BlankAbout,
            }
            .into(),
        )
    }
}

impl AsError for log_in::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::LifetimeOutOfRange(_) => Some(Error {
                code: "INVALID_SESSION_LIFETIME",
                exit_code: Error::CONFIG,
                message: self.to_string(),
                backtrace: None,
            }),
            Self::Encode(_) => None,
            Self::Storage(e) => e.try_as_error(),
        }
    }
}

impl AsError for log_out::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Storage(e) => e.try_as_error(),
        }
    }
}

impl AsError for restore_session::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Storage(e) => e.try_as_error(),
        }
    }
}

impl AsError for update_session::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Encode(_) => None,
            Self::Storage(e) => e.try_as_error(),
        }
    }
}

impl AsError for current_session::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Storage(e) => e.try_as_error(),
        }
    }
}

impl AsError for sign_in::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Directory(e) => e.try_as_error(),
            Self::LogIn(e) => e.try_as_error(),
        }
    }
}

impl AsError for register::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "EMAIL_OCCUPIED"]
                #[exit_code = 65]
                #[message = "Email is already registered by another member"]
                EmailOccupied,
            }
        }

        match self {
            Self::Directory(e) => e.try_as_error(),
            Self::EmailOccupied(_) => Some(Error::EmailOccupied.into()),
            Self::InvalidRegistration(v) => v.try_as_error(),
            Self::LogIn(e) => e.try_as_error(),
        }
    }
}

impl AsError for update_profile::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "NOT_SIGNED_IN"]
                #[exit_code = 77]
                #[message = "Sign in to update the profile"]
                NotSignedIn,
            }
        }

        match self {
            Self::Directory(e) => e.try_as_error(),
            Self::InvalidProfile(v) => v.try_as_error(),
            Self::NotSignedIn => Some(Error::NotSignedIn.into()),
            Self::UpdateSession(e) => e.try_as_error(),
        }
    }
}
