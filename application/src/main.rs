use std::{io, process::ExitCode, sync::OnceLock};

use application::{cli, error, AsError as _, Args, Config, Service};
use service::{
    command::RestoreSession,
    infra::{storage::File, Http},
    Command as _,
};
use tracing as log;
use tracing_subscriber::{
    filter::filter_fn,
    layer::{Layer as _, SubscriberExt as _},
    util::SubscriberInitExt as _,
};

static LOG_LEVEL: OnceLock<log::Level> = OnceLock::new();

#[tokio::main]
async fn main() -> ExitCode {
    // Standard output is reserved for what is shown to a member.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_target(false)
                .with_writer(io::stderr)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || LOG_LEVEL.get().copied().unwrap_or(log::Level::WARN)
                            >= *meta.level()
                })),
        )
        .init();

    match start().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => code,
    }
}

async fn start() -> Result<(), ExitCode> {
    let Args { config, command } = Args::parse().map_err(|e| {
        // Help and version requests are reported through this path too.
        _ = e.print();
        u8::try_from(e.exit_code())
            .map_or(ExitCode::from(error::Error::USAGE), ExitCode::from)
    })?;

    let conf = Config::new(config).map_err(|e| {
        log::error!("failed to load `Config`: {e}");
        ExitCode::from(error::Error::CONFIG)
    })?;
    let service_conf = conf.service();
    let Config {
        directory,
        storage,
        log: log_conf,
        ..
    } = conf;

    LOG_LEVEL
        .set(log_conf.level.into())
        .unwrap_or_else(|_| unreachable!("first initialization"));

    let directory = Http::new(&directory.into()).map_err(|e| {
        log::error!("failed to initialize `Http` directory client: {e}");
        ExitCode::from(error::Error::CONFIG)
    })?;

    let storage = File::new(storage.path);

    let service = Service::new(service_conf, storage, directory);

    if let Some(session) = service
        .execute(RestoreSession)
        .await
        .map_err(|e| report(&e.into_error()))?
    {
        log::debug!(
            "restored `Session` of `{}` until {}",
            session.profile.email,
            session.expires_at.to_rfc3339(),
        );
    }

    cli::run(&service, command, &mut io::stdout().lock())
        .await
        .map_err(|e| report(&e))
}

/// Logs the provided [`error::Error`] and returns the [`ExitCode`] it
/// terminates the process with.
fn report(err: &error::Error) -> ExitCode {
    log::error!("{err}");
    err.exit_code()
}
