//! [`Command`] definition.

pub mod log_in;
pub mod log_out;
pub mod register;
pub mod restore_session;
pub mod set_theme;
pub mod sign_in;
pub mod toggle_theme;
pub mod update_profile;
pub mod update_session;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    log_in::LogIn, log_out::LogOut, register::Register,
    restore_session::RestoreSession, set_theme::SetTheme, sign_in::SignIn,
    toggle_theme::ToggleTheme, update_profile::UpdateProfile,
    update_session::UpdateSession,
};
