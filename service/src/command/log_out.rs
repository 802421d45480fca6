//! [`Command`] for ending the current [`Session`].

use common::operations::Delete;
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::user::Session;
use crate::{
    infra::{
        storage::{self, Key},
        KeyValue,
    },
    Service,
};

use super::Command;

/// [`Command`] for ending the current [`Session`].
///
/// Succeeds even if there is no [`Session`] to end.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogOut;

impl<St, Dir> Command<LogOut> for Service<St, Dir>
where
    St: KeyValue,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(&self, _: LogOut) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let mut current = self.session.lock().await;
        self.storage()
            .execute(Delete(Key::SESSION))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        if let Some(ended) = current.take() {
            log::info!("Signed out `{}`", ended.profile.email);
        }
        Ok(())
    }
}

/// Error of [`LogOut`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Storage`] error.
    ///
    /// [`Storage`]: crate::infra::Storage
    #[display("`Storage` operation failed: {_0}")]
    Storage(storage::Error),
}
