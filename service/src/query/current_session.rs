//! [`Query`] of the current [`Session`].

use common::{operations::Delete, DateTime};
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

use super::Query;

/// [`Query`] of the current [`Session`].
///
/// Ends the [`Session`] if it has expired meanwhile.
#[derive(Clone, Copy, Debug, Default)]
pub struct CurrentSession;

impl<St, Dir> Query<CurrentSession> for Service<St, Dir>
where
    St: KeyValue,
{
    type Ok = Option<Session>;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        _: CurrentSession,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let mut current = self.session.lock().await;
        let now = DateTime::now();
        if let Some(expired) = current.take_if(|s| s.is_expired_at(now)) {
            log::info!("`Session` of `{}` expired", expired.profile.email);
            self.storage()
                .execute(Delete(Key::SESSION))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
        }
        Ok(current.clone())
    }
}

/// Error of [`CurrentSession`] [`Query`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Storage`] error.
    ///
    /// [`Storage`]: crate::infra::Storage
    #[display("`Storage` operation failed: {_0}")]
    Storage(storage::Error),
}
