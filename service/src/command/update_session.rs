//! [`Command`] for updating the current [`Session`].

use common::{
    operations::{Delete, Insert},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::user::{self, Session},
    infra::{
        storage::{self, Entry, Key},
        KeyValue,
    },
    Service,
};

use super::Command;

/// [`Command`] for merging a [`user::Patch`] into the current [`Session`].
///
/// The expiration of the [`Session`] is preserved. Does nothing if there is
/// no active [`Session`].
#[derive(Clone, Debug, From)]
pub struct UpdateSession(pub user::Patch);

impl<St, Dir> Command<UpdateSession> for Service<St, Dir>
where
    St: KeyValue,
{
    type Ok = Option<Session>;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        UpdateSession(patch): UpdateSession,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let mut current = self.session.lock().await;
        let Some(session) = current.as_ref() else {
            return Ok(None);
        };

        if session.is_expired_at(DateTime::now()) {
            log::info!("`Session` of `{}` expired", session.profile.email);
            self.storage()
                .execute(Delete(Key::SESSION))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
            *current = None;
            return Ok(None);
        }

        let mut updated = session.clone();
        updated.merge(patch);

        let record = serde_json::to_string(&updated)
            .map_err(tracerr::from_and_wrap!(=> E))?;
        self.storage()
            .execute(Insert(Entry {
                key: Key::SESSION,
                value: record,
            }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        log::debug!("`Session` of `{}` updated", updated.profile.email);

        *current = Some(updated.clone());
        Ok(Some(updated))
    }
}

/// Error of [`UpdateSession`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Session`] record encoding error.
    #[display("Failed to encode `Session` record: {_0}")]
    Encode(serde_json::Error),

    /// [`Storage`] error.
    ///
    /// [`Storage`]: crate::infra::Storage
    #[display("`Storage` operation failed: {_0}")]
    Storage(storage::Error),
}
