use crate::utils::error::Result;
use crate::utils::validation::{validate_path, Validate};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "folio-ui")]
#[command(about = "Replay scroll/click scripts against a portfolio page snapshot")]
pub struct CliConfig {
    #[arg(long, help = "Page snapshot (JSON)")]
    pub page: String,

    #[arg(long, help = "Event script (JSON)")]
    pub script: String,

    #[arg(long, help = "Controller config (TOML); built-in defaults when omitted")]
    pub config: Option<String>,

    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    #[arg(long, help = "Write the trace to this file instead of stdout")]
    pub output: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines on stderr")]
    pub log_json: bool,
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("page", &self.page)?;
        validate_path("script", &self.script)?;
        if let Some(config) = &self.config {
            validate_path("config", config)?;
        }
        if let Some(output) = &self.output {
            validate_path("output", output)?;
        }
        Ok(())
    }
}
