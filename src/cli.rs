//! Command-line interface definitions and parsing
//!
//! This module defines the CLI structure for contract-ask using the `clap` crate.
//!
//! # Commands
//!
//! - **shell**: Interactive question/answer session (default)
//! - **contracts**: Print the contracts the backend can search
//! - **ask**: One-shot question, optionally exported straight away
//! - **config**: Print the effective configuration, optionally saving it
//!
//! Global flags (`--server`, `--lang`, `--timeout`, `--quiet`) override the
//! configuration file and environment.
//!
//! # Examples
//!
//! ```
//! use contract_ask::cli::{Cli, Commands};
//!
//! let cli = Cli::parse_from_args(["contract-ask", "ask", "termination", "terms"]);
//! let command = cli.get_command();
//! assert!(matches!(command, Commands::Ask { .. }));
//! assert_eq!(command.get_question().as_deref(), Some("termination terms"));
//! ```

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::config::AskConfig;
use crate::export::ExportFormat;
use crate::models::Language;

/// Command-line interface for contract-ask
#[derive(Parser, Debug)]
#[command(name = "contract-ask")]
#[command(version, about = "Ask questions about your contracts", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Base URL of the search backend (overrides config)
    #[arg(short = 's', long = "server", global = true, value_name = "URL")]
    pub server: Option<String>,

    /// Answer language: ko or en (overrides config)
    #[arg(short = 'l', long = "lang", global = true, value_name = "LANG")]
    pub lang: Option<Language>,

    /// Search timeout in seconds (overrides config)
    #[arg(long = "timeout", global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Read configuration from this file instead of the default location
    #[arg(long = "config", global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Start an interactive session (default)
    #[command(visible_alias = "sh")]
    Shell,

    /// List the contracts available as search filters
    #[command(visible_alias = "c")]
    Contracts,

    /// Ask a single question and print the answer
    #[command(visible_alias = "a")]
    Ask {
        /// The question (words are joined with spaces)
        #[arg(value_name = "QUESTION", required = true, num_args = 1..)]
        question: Vec<String>,

        /// Restrict the search to one contract (name or catalog number)
        #[arg(short = 'f', long = "file", value_name = "CONTRACT")]
        file: Option<String>,

        /// Export the answer: xlsx, csv or docx
        #[arg(short = 'e', long = "export", value_name = "FORMAT")]
        export: Option<ExportFormat>,

        /// Write the export here instead of the export directory
        #[arg(short = 'o', long = "output", value_name = "PATH", requires = "export")]
        output: Option<PathBuf>,
    },

    /// Show the effective configuration
    Config {
        /// Write it to the config file so the flags given now become defaults
        #[arg(long = "save")]
        save: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parse an explicit argument list
    #[must_use]
    pub fn parse_from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::parse_from(args)
    }

    /// Get the command, defaulting to Shell if none specified
    #[must_use]
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Shell)
    }

    /// Apply command-line overrides on top of a loaded configuration
    pub fn apply_to(&self, config: &mut AskConfig) {
        if let Some(server) = &self.server {
            config.api_base_url.clone_from(server);
        }
        if let Some(lang) = self.lang {
            config.language = lang;
        }
        if let Some(timeout) = self.timeout {
            config.timeout_secs = timeout;
        }
        config.quiet = config.quiet || self.quiet;
    }

    /// Default log filter directive for the chosen verbosity
    #[must_use]
    pub const fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }
}

impl Commands {
    /// Question of an `ask` command, words joined with spaces
    #[must_use]
    pub fn get_question(&self) -> Option<String> {
        match self {
            Self::Ask { question, .. } => Some(question.join(" ")),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_is_shell() {
        let cli = Cli::parse_from_args(["contract-ask"]);
        assert_eq!(cli.get_command(), Commands::Shell);
        assert_eq!(cli.log_level(), "warn");
    }

    #[test]
    fn test_parse_ask_with_options() {
        let cli = Cli::parse_from_args([
            "contract-ask", "ask", "해지", "조건은?", "-f", "lease.pdf", "--export", "docx",
        ]);
        let command = cli.get_command();
        assert_eq!(command.get_question().as_deref(), Some("해지 조건은?"));
        match command {
            Commands::Ask { file, export, output, .. } => {
                assert_eq!(file.as_deref(), Some("lease.pdf"));
                assert_eq!(export, Some(ExportFormat::Document));
                assert_eq!(output, None);
            }
            other => panic!("Expected Ask command, got {other:?}"),
        }
    }

    #[test]
    fn test_ask_requires_question() {
        assert!(Cli::try_parse_from(["contract-ask", "ask"]).is_err());
    }

    #[test]
    fn test_output_requires_export() {
        assert!(Cli::try_parse_from(["contract-ask", "ask", "q", "-o", "out.csv"]).is_err());
    }

    #[test]
    fn test_invalid_language_rejected() {
        assert!(Cli::try_parse_from(["contract-ask", "--lang", "fr"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from_args(["contract-ask", "contracts", "--lang", "en", "-vv", "-q"]);
        assert_eq!(cli.get_command(), Commands::Contracts);
        assert_eq!(cli.lang, Some(Language::En));
        assert_eq!(cli.log_level(), "trace");
        assert!(cli.quiet);
    }

    #[test]
    fn test_parse_config_command() {
        let cli = Cli::parse_from_args(["contract-ask", "config"]);
        assert_eq!(cli.get_command(), Commands::Config { save: false });

        let cli = Cli::parse_from_args(["contract-ask", "--lang", "en", "config", "--save"]);
        assert_eq!(cli.get_command(), Commands::Config { save: true });
        assert_eq!(cli.lang, Some(Language::En));
    }

    #[test]
    fn test_apply_overrides_config() {
        let cli = Cli::parse_from_args([
            "contract-ask", "--server", "http://search:9000", "--timeout", "5", "--lang", "en",
        ]);
        let mut config = AskConfig::default();
        cli.apply_to(&mut config);
        assert_eq!(config.api_base_url, "http://search:9000");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.language, Language::En);
        assert!(!config.quiet);
    }

    #[test]
    fn test_apply_keeps_config_without_flags() {
        let cli = Cli::parse_from_args(["contract-ask"]);
        let mut config = AskConfig {
            quiet: true,
            ..AskConfig::default()
        };
        cli.apply_to(&mut config);
        assert_eq!(config, AskConfig { quiet: true, ..AskConfig::default() });
    }
}
