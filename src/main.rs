use clap::Parser;
use folio_ui::app::report;
use folio_ui::utils::error::{ErrorSeverity, FolioError};
use folio_ui::utils::{logger, validation::Validate};
use folio_ui::{
    simulate_blocking, CliConfig, ControllerConfig, LoopOutcome, MemoryPage, OutputFormat, Script,
};
use std::fs::File;
use std::io::{self, BufWriter, Write};

fn run(config: &CliConfig) -> folio_ui::Result<LoopOutcome<MemoryPage>> {
    let controller_config = match &config.config {
        Some(path) => {
            tracing::info!("Loading controller config from {}", path);
            ControllerConfig::from_file(path)?
        }
        None => ControllerConfig::default(),
    };
    controller_config.validate()?;

    let page = MemoryPage::from_file(&config.page)?;
    let script = Script::from_file(&config.script)?;
    tracing::info!("▶️  Replaying {} script steps", script.steps.len());

    let outcome = simulate_blocking(page, controller_config, &script)?;

    let writer: Box<dyn Write> = match &config.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout().lock()),
    };
    match config.format {
        OutputFormat::Table => report::write_table(writer, &outcome.trace)?,
        OutputFormat::Json => report::write_json(writer, &outcome.trace)?,
        OutputFormat::Csv => report::write_csv(writer, &outcome.trace)?,
    }

    Ok(outcome)
}

fn exit_code(error: &FolioError) -> i32 {
    match error.severity() {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting folio-ui simulator");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        std::process::exit(exit_code(&e));
    }

    match run(&config) {
        Ok(outcome) => {
            let snapshot = outcome.snapshot;
            tracing::info!(
                "✅ Simulation finished: {} dispatches, active section {:?}, \
                 {}/{} revealed, skills filled: {}",
                outcome.trace.len(),
                snapshot.active_section,
                snapshot.revealed,
                snapshot.animatable_total,
                snapshot.skills_filled
            );
            if let Some(path) = &config.output {
                tracing::info!("📁 Trace saved to: {}", path);
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!("❌ Simulation failed: {} (Severity: {:?})", e, e.severity());
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e);
            std::process::exit(exit_code(&e));
        }
    }
}
