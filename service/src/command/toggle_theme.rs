//! [`Command`] for switching to the opposite [`Theme`].

use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::Theme,
    infra::KeyValue,
    query::{current_theme, CurrentTheme},
    Service,
};

use super::{set_theme, Command, SetTheme};

/// [`Command`] for switching the preferred [`Theme`] to the opposite one.
#[derive(Clone, Copy, Debug, Default)]
pub struct ToggleTheme;

impl<St, Dir> Command<ToggleTheme> for Service<St, Dir>
where
    St: KeyValue,
{
    type Ok = Theme;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, _: ToggleTheme) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let current = self
            .execute(CurrentTheme)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        self.execute(SetTheme(current.toggled()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`ToggleTheme`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`CurrentTheme`] error.
    #[display("Failed to read `Theme`: {_0}")]
    CurrentTheme(current_theme::ExecutionError),

    /// [`SetTheme`] error.
    #[display("Failed to set `Theme`: {_0}")]
    SetTheme(set_theme::ExecutionError),
}
