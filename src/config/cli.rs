use crate::app::render::OutputFormat;
use crate::config::toml_config::TomlConfig;
use crate::config::{Overrides, Settings};
use crate::domain::model::ALL_SUBJECTS;
use crate::utils::error::Result;
use crate::utils::logger::LogFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "course-browser")]
#[command(about = "Browse a course catalog, build a cart and rate completed courses")]
pub struct CliConfig {
    /// Optional TOML settings file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Endpoint serving the course list
    #[arg(long, global = true)]
    pub courses_endpoint: Option<String>,

    /// Endpoint serving the student's completed course numbers
    #[arg(long, global = true)]
    pub completed_endpoint: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, value_enum, global = true)]
    pub log_format: Option<LogFormat>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Clone, Subcommand)]
pub enum CliCommand {
    /// List subjects, starting with `All`
    Subjects,
    /// List courses matching a subject and search text
    Search {
        #[arg(long, default_value = ALL_SUBJECTS)]
        subject: String,

        #[arg(long, default_value = "")]
        query: String,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Show one course with its sections and subsections
    Show { number: String },
    /// List completed courses and how many still need a rating
    Completed,
    /// Interactive session reading commands from stdin
    Session,
}

impl CliConfig {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            courses_endpoint: self.courses_endpoint.clone(),
            completed_endpoint: self.completed_endpoint.clone(),
            timeout_secs: self.timeout_secs,
            verbose: self.verbose,
            log_format: self.log_format,
        }
    }

    /// Defaults, then `--config`, then flags.
    pub fn settings(&self) -> Result<Settings> {
        let file = self.config.as_ref().map(TomlConfig::from_file).transpose()?;
        Ok(Settings::resolve(file, self.overrides()))
    }
}
