//! Scanpost CLI -- relay a Trivy JSON report to Kafka and print a severity summary.
//!
//! ```text
//! trivy image --format json alpine:3.19 | scanpost --topic trivy-reports --brokers localhost:9092
//! ```

mod cli;
mod error;
mod logging;
mod output;
mod relay;
mod table;

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use tokio::io::AsyncRead;
use tracing::{error, info};

use scanpost_core::config::ScanpostConfig;
use scanpost_publisher::{KafkaPublisher, PublisherError, ReportPublisher};

use cli::Cli;
use error::CliError;
use output::OutputWriter;
use table::SeverityTable;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Tracing is not up yet; configuration errors go straight to stderr.
    let config = match resolve_config(&cli).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("scanpost: {e}");
            return ExitCode::from(e.exit_code());
        }
    };

    if let Err(e) = logging::init_tracing(&config.general) {
        eprintln!("scanpost: {e}");
        return ExitCode::from(e.exit_code());
    }

    let kafka = config.kafka;
    info!(
        topic = %kafka.topic,
        brokers = %kafka.brokers.join(","),
        "relaying report from stdin"
    );

    let message_key = kafka.message_key.clone();
    let writer = OutputWriter::new(cli.output);
    let result = run(
        tokio::io::stdin(),
        move || KafkaPublisher::connect(&kafka),
        message_key,
        &writer,
        &mut std::io::stdout(),
    )
    .await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let exit_code = e.exit_code();
            error!(error = %e, exit_code, "scanpost failed");
            ExitCode::from(exit_code)
        }
    }
}

/// Layers defaults, the optional config file, `SCANPOST_*` variables and
/// command-line flags, then validates the result.
async fn resolve_config(cli: &Cli) -> Result<ScanpostConfig, CliError> {
    let mut config = match &cli.config {
        Some(path) => ScanpostConfig::from_file(path).await?,
        None => ScanpostConfig::default(),
    };
    config.apply_env_overrides();
    cli.apply_overrides(&mut config);
    config.validate()?;
    Ok(config)
}

/// Publishes the report read from `input`, then writes its summary to `out`.
async fn run<R, C, P>(
    input: R,
    connect: C,
    message_key: Option<String>,
    writer: &OutputWriter,
    out: &mut dyn Write,
) -> Result<(), CliError>
where
    R: AsyncRead + Unpin,
    C: FnOnce() -> Result<P, PublisherError> + Send + 'static,
    P: ReportPublisher,
{
    let report = relay::relay(input, connect, message_key).await?;
    info!("report published");

    let summary = report.summarize();
    writer.render_to(&SeverityTable::from_summary(&summary), out)
}
