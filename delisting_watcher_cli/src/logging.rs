use delisting_watcher::config::LogConfig;
use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, LevelFilter, TermLogger, TerminalMode, WriteLogger,
};
use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LogSetupError {
    #[error("Log file error: {0}")]
    IO(#[from] std::io::Error),
    #[error("Logger already set: {0}")]
    Logger(#[from] log::SetLoggerError),
}

/// Log to the terminal and append to the configured log file.
pub fn init(config: &LogConfig, debug: bool) -> Result<(), LogSetupError> {
    let term_level = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    if let Some(parent) = config.file.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let rotated = rotate(&config.file, size_limit(config.max_size_mb))?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.file)?;

    // dependencies (hyper, rustls, ...) are chatty on debug
    let log_config = ConfigBuilder::new()
        .add_filter_allow_str("delisting_watcher")
        .build();

    CombinedLogger::init(vec![
        TermLogger::new(
            term_level,
            log_config.clone(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ),
        WriteLogger::new(LevelFilter::Info, log_config, file),
    ])?;

    if rotated {
        log::info!("Rotated log file {:?}", config.file);
    }
    Ok(())
}

fn size_limit(max_size_mb: u64) -> u64 {
    max_size_mb.saturating_mul(1024 * 1024)
}

/// Moves `path` to `<path>.1` once it reached `max_bytes`. Zero disables rotation.
pub fn rotate(path: &Path, max_bytes: u64) -> Result<bool, std::io::Error> {
    if max_bytes == 0 {
        return Ok(false);
    }

    match fs::metadata(path) {
        Ok(meta) if meta.len() >= max_bytes => {
            fs::rename(path, rotated_path(path))?;
            Ok(true)
        }
        Ok(_) => Ok(false),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err),
    }
}

fn rotated_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".1");
    PathBuf::from(name)
}
