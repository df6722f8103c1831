//! Logger setup for the lookup CLI.
//!
//! Stdout carries the rendered page, so terminal logging goes to stderr and
//! file logging to `./coord_lookup.log` in the working directory.

use std::fs::File;
use std::path::Path;

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

pub const LOG_FILE: &str = "./coord_lookup.log";

/// Where log records go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogDestination {
    /// ./coord_lookup.log, truncated on start.
    File,
    /// stderr.
    Terminal,
    Both,
    None,
}

impl LogDestination {
    fn to_terminal(self) -> bool {
        matches!(self, Self::Terminal | Self::Both)
    }

    fn to_file(self) -> bool {
        matches!(self, Self::File | Self::Both)
    }
}

/// Installs the global logger. A failing log file is reported on stderr and
/// skipped; a second call leaves the first logger in place.
pub fn initialize(destination: LogDestination, level: LevelFilter) {
    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build();

    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    if destination.to_terminal() {
        loggers.push(TermLogger::new(
            level,
            config.clone(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ));
    }
    if destination.to_file() {
        if let Some(file_logger) = file_logger(Path::new(LOG_FILE), level, config) {
            loggers.push(file_logger);
        }
    }
    if loggers.is_empty() {
        return;
    }

    let _ = CombinedLogger::init(loggers);
}

fn file_logger(path: &Path, level: LevelFilter, config: Config) -> Option<Box<WriteLogger<File>>> {
    File::create(path)
        .map(|file| WriteLogger::new(level, config, file))
        .map_err(|err| eprintln!("Logging to {} disabled: {}", path.display(), err))
        .ok()
}
