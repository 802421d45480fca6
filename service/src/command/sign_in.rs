//! [`Command`] for signing a member in by credentials.

use common::operations::{By, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        user::{self, Session},
        Profile,
    },
    infra::{directory, Directory, KeyValue},
    Service,
};

use super::{log_in, Command, LogIn};

/// [`Command`] for signing a member in by the [`user::Credentials`] known
/// to the [`Directory`].
#[derive(Clone, Debug, From)]
pub struct SignIn(pub user::Credentials);

impl<St, Dir> Command<SignIn> for Service<St, Dir>
where
    St: KeyValue,
    Dir: Directory<
        Select<By<Profile, user::Credentials>>,
        Ok = Profile,
        Err = Traced<directory::Error>,
    >,
{
    type Ok = Session;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        SignIn(credentials): SignIn,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let profile = self
            .directory()
            .execute(Select(By::new(credentials)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        self.execute(LogIn::from(profile))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`SignIn`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Directory`] error.
    #[display("`Directory` operation failed: {_0}")]
    Directory(directory::Error),

    /// [`LogIn`] error.
    #[display("Failed to start `Session`: {_0}")]
    LogIn(log_in::ExecutionError),
}
