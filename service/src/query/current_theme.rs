//! [`Query`] of the preferred [`Theme`].

use common::operations::{By, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::Theme,
    infra::{
        storage::{self, Key},
        KeyValue,
    },
    Service,
};

use super::Query;

/// [`Query`] of the preferred [`Theme`].
///
/// Falls back to [`Config::prefers_dark`] if no preference has been stored.
///
/// [`Config::prefers_dark`]: crate::Config::prefers_dark
#[derive(Clone, Copy, Debug, Default)]
pub struct CurrentTheme;

impl<St, Dir> Query<CurrentTheme> for Service<St, Dir>
where
    St: KeyValue,
{
    type Ok = Theme;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, _: CurrentTheme) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let stored = self
            .storage()
            .execute(Select(By::<Option<String>, _>::new(Key::DARK_MODE)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let dark = match stored.as_deref().map(str::trim) {
            Some("true") => true,
            Some("false") => false,
            Some(other) => {
                log::warn!("Ignoring unknown dark mode value `{other}`");
                self.config().prefers_dark
            }
            None => self.config().prefers_dark,
        };
        Ok(Theme::from_dark_mode(dark))
    }
}

/// Error of [`CurrentTheme`] [`Query`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Storage`] error.
    ///
    /// [`Storage`]: crate::infra::Storage
    #[display("`Storage` operation failed: {_0}")]
    Storage(storage::Error),
}
