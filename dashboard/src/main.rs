use std::{io, process::ExitCode, sync::OnceLock};

use dashboard::{cli, Args, Config};
use service::infra::{http, Http};
use tracing as log;
use tracing_subscriber::{
    filter::filter_fn,
    layer::{Layer as _, SubscriberExt as _},
    util::SubscriberInitExt as _,
};

const STDERR_LEVELS: &[log::Level] = &[log::Level::WARN, log::Level::ERROR];

static LOG_LEVEL: OnceLock<log::Level> = OnceLock::new();

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_thread_names(true)
                .with_writer(io::stdout)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || (!STDERR_LEVELS.contains(meta.level()))
                            && LOG_LEVEL
                                .get()
                                .copied()
                                .unwrap_or(log::Level::INFO)
                                >= *meta.level()
                })),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_thread_names(true)
                .with_writer(io::stderr)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || (STDERR_LEVELS.contains(meta.level()))
                            && LOG_LEVEL
                                .get()
                                .copied()
                                .unwrap_or(log::Level::INFO)
                                >= *meta.level()
                })),
        )
        .init();

    match start().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(status) => ExitCode::from(status),
    }
}

async fn start() -> Result<(), u8> {
    let Args { config, command } = Args::parse().map_err(|e| {
        // Help and version requests are reported as errors by `clap`.
        let status = u8::from(e.use_stderr());
        _ = e.print();
        status
    })?;

    let Config {
        backend,
        service,
        log,
    } = Config::new(&config).map_err(|e| {
        log::error!("failed to load `Config` from `{config}`: {e}");
        1
    })?;

    LOG_LEVEL
        .set(log.level.into())
        .unwrap_or_else(|_| unreachable!("first initialization"));

    let backend_config: http::Config = backend.try_into().map_err(|e| {
        log::error!("invalid REST backend URL: {e}");
        1
    })?;
    let backend = Http::new(&backend_config).map_err(|e| {
        log::error!("failed to initialize `Http` client: {e}");
        2
    })?;
    log::debug!("using REST backend at `{}`", backend.base_url());

    let service = dashboard::Service::new(service.into(), backend);

    let out = cli::run(&service, command).await.map_err(|e| {
        log::error!("{e}");
        e.exit_status()
    })?;
    println!("{out}");

    Ok(())
}
