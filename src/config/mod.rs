// Configuration layer - environment settings, database, logging
mod database;
mod logging;
mod settings;

pub use database::init_database;
pub use logging::init_logging;
pub use settings::{BootstrapSettings, SettingsError};
