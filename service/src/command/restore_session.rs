//! [`Command`] for restoring a persisted [`Session`].

use common::{
    operations::{By, Delete, Select},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::user::Session,
    infra::{
        storage::{self, Key},
        KeyValue,
    },
    Service,
};

use super::Command;

/// [`Command`] for restoring the [`Session`] persisted by a previous run.
///
/// An expired or undecodable record is cleared from the [`Storage`] and
/// treated as absent.
///
/// [`Storage`]: crate::infra::Storage
#[derive(Clone, Copy, Debug, Default)]
pub struct RestoreSession;

impl<St, Dir> Command<RestoreSession> for Service<St, Dir>
where
    St: KeyValue,
{
    type Ok = Option<Session>;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        _: RestoreSession,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let mut current = self.session.lock().await;

        let record = self
            .storage()
            .execute(Select(By::<Option<String>, _>::new(Key::SESSION)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let decoded = record.as_deref().map(serde_json::from_str::<Session>);
        let restored = match decoded {
            None => None,
            Some(Ok(session)) => {
                if session.is_expired_at(DateTime::now()) {
                    log::info!(
                        "`Session` of `{}` expired at {}",
                        session.profile.email,
                        session.expires_at.to_rfc3339(),
                    );
                    None
                } else {
                    log::debug!(
                        "`Session` of `{}` restored",
                        session.profile.email,
                    );
                    Some(session)
                }
            }
            Some(Err(e)) => {
                log::warn!("Discarding undecodable `Session` record: {e}");
                None
            }
        };

        if restored.is_none() && record.is_some() {
            self.storage()
                .execute(Delete(Key::SESSION))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
        }

        current.clone_from(&restored);
        Ok(restored)
    }
}

/// Error of [`RestoreSession`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Storage`] error.
    ///
    /// [`Storage`]: crate::infra::Storage
    #[display("`Storage` operation failed: {_0}")]
    Storage(storage::Error),
}
