//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface structure using clap's derive macros.
//! Apart from [`Cli::apply_overrides`], it is purely declarative.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use scanpost_core::config::{ScanpostConfig, parse_broker_list};

/// Scanpost -- publish a Trivy JSON report to Kafka and summarise it.
///
/// Reads the report from standard input, sends it as one message to the
/// topic, then prints vulnerability counts per target and severity.
#[derive(Parser, Debug)]
#[command(name = "scanpost", version, about, long_about = None)]
pub struct Cli {
    /// Kafka topic to publish the report to.
    #[arg(short, long)]
    pub topic: Option<String>,

    /// Kafka brokers, comma separated (host:port,host:port).
    #[arg(short, long)]
    pub brokers: Option<String>,

    /// Key attached to the published message.
    #[arg(short, long)]
    pub key: Option<String>,

    /// Path to an optional scanpost.toml configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Override log format (json, pretty).
    #[arg(long)]
    pub log_format: Option<String>,

    /// Summary output format.
    #[arg(long, default_value = "text")]
    pub output: OutputFormat,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table.
    Text,
    /// Machine-readable JSON.
    Json,
}

impl Cli {
    /// Applies command-line values on top of file and environment settings.
    ///
    /// Empty values are applied as given so that validation reports them.
    pub fn apply_overrides(&self, config: &mut ScanpostConfig) {
        if let Some(topic) = &self.topic {
            config.kafka.topic = topic.clone();
        }
        if let Some(brokers) = &self.brokers {
            config.kafka.brokers = parse_broker_list(brokers);
        }
        if let Some(key) = &self.key {
            config.kafka.message_key = Some(key.clone());
        }
        if let Some(level) = &self.log_level {
            config.general.log_level = level.clone();
        }
        if let Some(format) = &self.log_format {
            config.general.log_format = format.clone();
        }
    }
}
