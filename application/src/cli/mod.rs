//! Command line interface driving the [`Service`].

mod render;
mod search;
mod session;
mod theme;

use std::io;

use service::domain::user;

use crate::{args::Command, AsError as _, Error, Service};

/// Runs the provided [`Command`] against the [`Service`], writing what is
/// shown to a member into the provided `out`put.
///
/// # Errors
///
/// If the [`Command`] fails or the `out`put cannot be written.
pub async fn run(
    service: &Service,
    command: Command,
    out: &mut impl io::Write,
) -> Result<(), Error> {
    match command {
        Command::SignIn { email, whatsapp } => {
            let credentials = user::Credentials { email, whatsapp };
            session::sign_in(service, credentials, out).await
        }
        Command::Register(reg) => {
            session::register(service, reg.into(), out).await
        }
        Command::Profile => session::profile(service, out).await,
        Command::Update(update) => {
            session::update(service, update.into(), out).await
        }
        Command::SignOut => session::sign_out(service, out).await,
        Command::Search(search) => search::find(service, search, out).await,
        Command::Nearby(nearby) => search::nearby(service, nearby, out).await,
        Command::Theme { action } => theme::run(service, action, out).await,
    }
}

/// Writes the provided `text` as a line of the `out`put.
fn write(out: &mut impl io::Write, text: &str) -> Result<(), Error> {
    writeln!(out, "{text}").map_err(|e| e.into_error())
}
