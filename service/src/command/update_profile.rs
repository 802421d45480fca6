//! [`Command`] for updating the [`Profile`] of the signed-in member.

use common::{operations::Update, DateTime};
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

use super::{update_session, Command, UpdateSession};

/// [`Command`] for updating the [`Profile`] of the signed-in member in the
/// [`Directory`] and merging the result into the current [`Session`].
#[derive(Clone, Debug, From)]
pub struct UpdateProfile(pub user::Patch);

impl<St, Dir> Command<UpdateProfile> for Service<St, Dir>
where
    St: KeyValue,
    Dir: Directory<
        Update<(user::Id, user::Patch)>,
        Ok = Profile,
        Err = Traced<directory::Error>,
    >,
{
    type Ok = Session;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        UpdateProfile(patch): UpdateProfile,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let id = self
            .session
            .lock()
            .await
            .as_ref()
            .filter(|s| !s.is_expired_at(DateTime::now()))
            .map(|s| s.profile.id.clone())
            .ok_or(E::NotSignedIn)
            .map_err(tracerr::wrap!())?;

        patch
            .check()
            .map_err(E::InvalidProfile)
            .map_err(tracerr::wrap!())?;

        let profile = self
            .directory()
            .execute(Update((id, patch)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        self.execute(UpdateSession(profile.into()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::NotSignedIn)
            .map_err(tracerr::wrap!())
    }
}

/// Error of [`UpdateProfile`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Directory`] error.
    #[display("`Directory` operation failed: {_0}")]
    Directory(directory::Error),

    /// [`user::Patch`] is invalid.
    #[display("Invalid profile: {_0}")]
    #[from(ignore)]
    InvalidProfile(user::Violation),

    /// No member is signed in.
    #[display("No member is signed in")]
    NotSignedIn,

    /// [`UpdateSession`] error.
    #[display("Failed to update `Session`: {_0}")]
    UpdateSession(update_session::ExecutionError),
}
