use std::process::ExitCode;

use crate::args::Args;
use clap::Parser;
use delisting_watcher::{Config, DelistingWatcher, WatcherError};

mod args;
mod logging;

pub fn main() -> ExitCode {
    let args = Args::parse();
    let _ = dotenvy::dotenv();

    let config = match Config::load(&args.config) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("{error}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(error) = logging::init(&config.log, args.debug) {
        eprintln!("{error}");
        return ExitCode::FAILURE;
    }

    let sentry_guard = config.sentry_dsn().map(|dsn| {
        sentry::init((
            dsn,
            sentry::ClientOptions {
                release: sentry::release_name!(),
                ..Default::default()
            },
        ))
    });

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(error) => {
            log::error!("Failed to start runtime: {}", error);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(&config, args.dry_run)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            log::error!("{}", error);
            if sentry_guard.is_some() {
                sentry::capture_error(&error);
            }
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: &Config, dry_run: bool) -> Result<(), WatcherError> {
    let watcher = DelistingWatcher::new(config)?;

    if dry_run {
        let unseen = watcher.check().await?;
        log::info!("{} articles would be announced", unseen.len());
        for article in unseen {
            println!("{}", article.message());
        }
        return Ok(());
    }

    let report = watcher.run().await?;
    log::info!(
        "Done: {} fetched, {} new, {} sent{}",
        report.fetched,
        report.new,
        report.sent,
        if report.initial { " (initial run)" } else { "" }
    );
    Ok(())
}
