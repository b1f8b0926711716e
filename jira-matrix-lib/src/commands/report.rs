use super::Host;
use super::common::{LogLevel, init_logging};
use super::config::Config;
use crate::Result;
use crate::matrix::StatusMatrix;
use crate::reports::save_xlsx;
use crate::tracker::{Client, fetch_query_counts};
use camino::Utf8PathBuf;
use clap::Parser;
use ohno::IntoAppError;
use std::io::Write;

const LOG_TARGET: &str = "    report";

#[derive(Parser, Debug)]
pub struct ReportArgs {
    /// Jira API token, sent as a bearer credential
    #[arg(long, value_name = "TOKEN", env = "JIRA_TOKEN", hide_env_values = true)]
    pub jira_token: Option<String>,

    /// Base URL of the Jira server (overrides the configuration file)
    #[arg(long, value_name = "URL", env = "JIRA_URL")]
    pub jira_url: Option<String>,

    /// Path to configuration file (default is `jira-matrix.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Spreadsheet to write (overrides the configuration file)
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<Utf8PathBuf>,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none")]
    pub log_level: LogLevel,
}

/// Fetch the four issue sets, build the status matrix, and save it as a spreadsheet
///
/// # Errors
///
/// Returns an error if the configuration is invalid, no token is available, any search
/// request fails, or the spreadsheet cannot be written
pub async fn generate_report<H: Host>(host: &mut H, args: &ReportArgs) -> Result<()> {
    init_logging(args.log_level);

    let mut config = Config::load(&Utf8PathBuf::from("."), args.config.as_ref())?;
    if let Some(url) = &args.jira_url {
        config.base_url.clone_from(url);
    }
    if let Some(output) = &args.output {
        config.output = output.to_string();
    }
    config.validate()?;

    let token = args
        .jira_token
        .as_deref()
        .filter(|token| !token.trim().is_empty())
        .into_app_err("no Jira token provided; pass --jira-token or set JIRA_TOKEN")?;

    let client = Client::new(&config.base_url, token)?;
    log::info!(target: LOG_TARGET, "Querying {}", client.search_url());

    let counts = fetch_query_counts(&client, config.queries.iter(), config.page_size).await?;
    let matrix = StatusMatrix::build(&counts);
    log::info!(target: LOG_TARGET, "Found {} issue type(s), {} issue(s) overall", matrix.issue_types().len(), matrix.overall().total());

    let output = config.output_path();
    save_xlsx(&matrix, &config.report_options(), &output)?;

    let _ = writeln!(host.output(), "Excel generated successfully: {output}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::host::TestHost;

    fn args() -> ReportArgs {
        ReportArgs {
            jira_token: None,
            jira_url: None,
            config: None,
            output: None,
            log_level: LogLevel::None,
        }
    }

    #[tokio::test]
    async fn test_missing_token_is_rejected() {
        let mut host = TestHost::new();
        let result = generate_report(&mut host, &args()).await;

        assert!(result.unwrap_err().to_string().contains("no Jira token provided"));
        assert!(host.output_str().is_empty());
    }

    #[tokio::test]
    async fn test_blank_token_is_rejected() {
        let mut host = TestHost::new();
        let args = ReportArgs {
            jira_token: Some("  ".into()),
            ..args()
        };

        assert!(generate_report(&mut host, &args).await.is_err());
    }

    #[tokio::test]
    async fn test_invalid_url_override_is_rejected() {
        let mut host = TestHost::new();
        let args = ReportArgs {
            jira_token: Some("secret".into()),
            jira_url: Some("not a url".into()),
            ..args()
        };

        assert!(generate_report(&mut host, &args).await.is_err());
        assert!(host.output_str().is_empty());
    }
}
