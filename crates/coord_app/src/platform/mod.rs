pub mod app;
pub mod config;
pub mod effects;
pub mod history;
pub mod logging;
pub mod ui;

pub use app::App;
pub use config::{AppConfig, ConfigError, CONVERT_PATH_ENV};
pub use history::{History, MemoryHistory};
pub use logging::LogDestination;
