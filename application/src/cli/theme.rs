//! Command showing or changing the color theme.

use std::io;

use service::{
    command::{set_theme, toggle_theme, SetTheme, ToggleTheme},
    domain::Theme,
    query::{current_theme, CurrentTheme},
    Command as _,
};

use crate::{args::ThemeAction, AsError, Error, Service};

use super::write;

/// Applies the provided [`ThemeAction`], if any, and shows the resulting
/// [`Theme`].
pub(crate) async fn run(
    service: &Service,
    action: Option<ThemeAction>,
    out: &mut impl io::Write,
) -> Result<(), Error> {
    let theme = match action {
        None => {
            service.execute(CurrentTheme).await.map_err(AsError::into_error)
        }
        Some(ThemeAction::Light) => service
            .execute(SetTheme(Theme::Light))
            .await
            .map_err(AsError::into_error),
        Some(ThemeAction::Dark) => service
            .execute(SetTheme(Theme::Dark))
            .await
            .map_err(AsError::into_error),
        Some(ThemeAction::Toggle) => {
            service.execute(ToggleTheme).await.map_err(AsError::into_error)
        }
    }?;

    write(out, &theme.to_string())
}

impl AsError for current_theme::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Storage(e) => e.try_as_error(),
        }
    }
}

impl AsError for set_theme::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Storage(e) => e.try_as_error(),
        }
    }
}

impl AsError for toggle_theme::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::CurrentTheme(e) => e.try_as_error(),
            Self::SetTheme(e) => e.try_as_error(),
        }
    }
}
