//! [`Command`] for choosing a [`Theme`].

use common::operations::Insert;
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::Theme,
    infra::{
        storage::{self, Entry, Key},
        KeyValue,
    },
    Service,
};

use super::Command;

/// [`Command`] for persisting the preferred [`Theme`].
#[derive(Clone, Copy, Debug, From)]
pub struct SetTheme(pub Theme);

impl<St, Dir> Command<SetTheme> for Service<St, Dir>
where
    St: KeyValue,
{
    type Ok = Theme;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        SetTheme(theme): SetTheme,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        self.storage()
            .execute(Insert(Entry {
                key: Key::DARK_MODE,
                value: theme.is_dark().to_string(),
            }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        log::debug!("`Theme` set to `{theme}`");

        Ok(theme)
    }
}

/// Error of [`SetTheme`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Storage`] error.
    ///
    /// [`Storage`]: crate::infra::Storage
    #[display("`Storage` operation failed: {_0}")]
    Storage(storage::Error),
}
