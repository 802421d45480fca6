//! [`Command`] for starting a new [`Session`].

use std::time::Duration;

use common::{operations::Insert, DateTime};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{
        user::{session, Session},
        Profile,
    },
    infra::{
        storage::{self, Entry, Key},
        KeyValue,
    },
    Service,
};

use super::Command;

/// [`Command`] for starting a new [`Session`] of the provided [`Profile`],
/// replacing the current one, if any.
#[derive(Clone, Debug)]
pub struct LogIn {
    /// [`Profile`] of the signed-in member.
    pub profile: Profile,

    /// [`DateTime`] when the new [`Session`] expires.
    ///
    /// [`Config::session_lifetime`] from now, if [`None`].
    ///
    /// [`Config::session_lifetime`]: crate::Config::session_lifetime
    pub expires_at: Option<session::ExpirationDateTime>,
}

impl From<Profile> for LogIn {
    fn from(profile: Profile) -> Self {
        Self {
            profile,
            expires_at: None,
        }
    }
}

impl<St, Dir> Command<LogIn> for Service<St, Dir>
where
    St: KeyValue,
{
    type Ok = Session;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: LogIn) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let LogIn {
            profile,
            expires_at,
        } = cmd;

        let expires_at = match expires_at {
            Some(at) => at,
            None => {
                let lifetime = self.config().session_lifetime;
                DateTime::now()
                    .checked_add(lifetime)
                    .ok_or_else(|| {
                        tracerr::new!(E::LifetimeOutOfRange(lifetime))
                    })?
                    .coerce()
            }
        };
        let session = Session {
            profile,
            expires_at,
        };
        let record = serde_json::to_string(&session)
            .map_err(tracerr::from_and_wrap!(=> E))?;

        let mut current = self.session.lock().await;
        self.storage()
            .execute(Insert(Entry {
                key: Key::SESSION,
                value: record,
            }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        *current = Some(session.clone());

        log::info!(
            "Signed in as `{}` until {}",
            session.profile.email,
            session.expires_at.to_rfc3339(),
        );

        Ok(session)
    }
}

/// Error of [`LogIn`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Config::session_lifetime`] moves the expiration out of the supported
    /// date range.
    ///
    /// [`Config::session_lifetime`]: crate::Config::session_lifetime
    #[display("`Session` lifetime of {_0:?} is out of range")]
    #[from(ignore)]
    LifetimeOutOfRange(#[error(not(source))] Duration),

    /// [`Session`] record encoding error.
    #[display("Failed to encode `Session` record: {_0}")]
    Encode(serde_json::Error),

    /// [`Storage`] error.
    ///
    /// [`Storage`]: crate::infra::Storage
    #[display("`Storage` operation failed: {_0}")]
    Storage(storage::Error),
}
