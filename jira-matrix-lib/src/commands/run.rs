//! Command dispatch logic for jira-matrix

use super::{InitArgs, ReportArgs, ValidateArgs, generate_report, init_config, validate_config};
use crate::{Host, Result};
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "jira-matrix", author, version, long_about = None)]
#[command(about = "Summarize Jira security issues by issue type into an Excel matrix")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch issue counts from Jira and write the Excel matrix
    Report(Box<ReportArgs>),
    /// Generate a default configuration file
    Init(InitArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

/// Dispatch command-line arguments to the appropriate handler
///
/// This function parses the command-line arguments and executes the corresponding
/// subcommand. It's designed to be called from main.rs with the program arguments.
///
/// # Errors
///
/// Returns an error if command parsing fails or if the executed command fails
pub async fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    match &Cli::parse_from(args).command {
        Command::Report(report_args) => generate_report(host, report_args).await,
        Command::Init(init_args) => init_config(host, init_args),
        Command::Validate(validate_args) => validate_config(host, validate_args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::LogLevel;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_report_args() {
        let cli = Cli::try_parse_from([
            "jira-matrix",
            "report",
            "--jira-token",
            "secret",
            "--jira-url",
            "https://jira.example.com",
            "-o",
            "out.xlsx",
            "--log-level",
            "debug",
        ])
        .unwrap();

        let Command::Report(args) = cli.command else {
            panic!("expected the report command");
        };
        assert_eq!(args.jira_token.as_deref(), Some("secret"));
        assert_eq!(args.jira_url.as_deref(), Some("https://jira.example.com"));
        assert_eq!(args.output.as_deref().map(camino::Utf8Path::as_str), Some("out.xlsx"));
        assert_eq!(args.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_parse_init_default_path() {
        let cli = Cli::try_parse_from(["jira-matrix", "init"]).unwrap();
        let Command::Init(args) = cli.command else {
            panic!("expected the init command");
        };
        assert_eq!(args.output.as_str(), "jira-matrix.toml");
    }

    #[test]
    fn test_parse_requires_subcommand() {
        assert!(Cli::try_parse_from(["jira-matrix"]).is_err());
    }
}
