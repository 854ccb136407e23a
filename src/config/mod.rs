#[cfg(feature = "cli")]
pub mod cli;
pub mod controller_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, OutputFormat};
pub use controller_config::ControllerConfig;
