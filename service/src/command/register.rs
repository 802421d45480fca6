//! [`Command`] for registering a new member.

use common::operations::Insert;
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{
        user::{self, Session},
        Profile,
    },
    infra::{directory, Directory, KeyValue},
    Service,
};

use super::{log_in, Command, LogIn};

/// [`Command`] for registering a new member in the [`Directory`] and signing
/// them in.
///
/// The [`user::AvatarUrl`] is generated from the [`user::Email`] if the
/// [`user::Registration`] has none.
#[derive(Clone, Debug, From)]
pub struct Register(pub user::Registration);

impl<St, Dir> Command<Register> for Service<St, Dir>
where
    St: KeyValue,
    Dir: Directory<
        Insert<user::Registration>,
        Ok = Profile,
        Err = Traced<directory::Error>,
    >,
{
    type Ok = Session;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        Register(mut registration): Register,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        registration
            .check()
            .map_err(E::InvalidRegistration)
            .map_err(tracerr::wrap!())?;

        if registration.avatar_url.is_none() {
            registration.avatar_url =
                Some(user::AvatarUrl::generated_for(&registration.email));
        }

        let email = registration.email.clone();
        let profile = self
            .directory()
            .execute(Insert(registration))
            .await
            .map_err(|e| {
                if e.as_ref().is_conflict() {
                    tracerr::new!(E::EmailOccupied(email))
                } else {
                    tracerr::map_from_and_wrap!(=> E)(e)
                }
            })?;

        log::info!("Registered `{}` as `{}`", profile.email, profile.id);

        self.execute(LogIn::from(profile))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`Register`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Directory`] error.
    #[display("`Directory` operation failed: {_0}")]
    Directory(directory::Error),

    /// [`user::Email`] is already registered.
    #[display("`{_0}` email is already registered")]
    #[from(ignore)]
    EmailOccupied(#[error(not(source))] user::Email),

    /// [`user::Registration`] is invalid.
    #[display("Invalid registration: {_0}")]
    #[from(ignore)]
    InvalidRegistration(user::Violation),

    /// [`LogIn`] error.
    #[display("Failed to start `Session`: {_0}")]
    LogIn(log_in::ExecutionError),
}
