use crate::Result;
use crate::matrix::QuerySet;
use crate::reports::{DEFAULT_COLUMN_WIDTH, DEFAULT_SHEET_NAME, DEFAULT_TITLE, ReportOptions};
use crate::tracker::DEFAULT_PAGE_SIZE;
use camino::{Utf8Path, Utf8PathBuf};
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use strum::IntoEnumIterator;
use url::Url;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// Name of the configuration file looked up when none is given explicitly
pub const DEFAULT_CONFIG_FILE: &str = "jira-matrix.toml";

/// Largest page size Jira accepts for a search
const MAX_PAGE_SIZE: u64 = 1000;

/// Widest column Excel allows
const MAX_COLUMN_WIDTH: f64 = 255.0;

/// Longest worksheet name Excel allows
const MAX_SHEET_NAME_LEN: usize = 31;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Base URL of the Jira server
    pub base_url: String,

    /// Path of the spreadsheet to produce
    #[serde(default = "default_output")]
    pub output: String,

    /// Text of the title row
    #[serde(default = "default_title")]
    pub title: String,

    /// Name of the worksheet
    #[serde(default = "default_sheet_name")]
    pub sheet_name: String,

    /// Number of issues requested per search page
    #[serde(default = "default_page_size")]
    pub page_size: u64,

    /// Width applied to every spreadsheet column
    #[serde(default = "default_column_width")]
    pub column_width: f64,

    /// JQL for each issue set
    pub queries: Queries,
}

/// The JQL query behind each of the four issue sets.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Queries {
    pub accepted: String,
    pub rejected: String,
    pub doable: String,
    pub non_doable: String,
}

impl Queries {
    #[must_use]
    pub fn get(&self, query_set: QuerySet) -> &str {
        match query_set {
            QuerySet::Accepted => &self.accepted,
            QuerySet::Rejected => &self.rejected,
            QuerySet::Doable => &self.doable,
            QuerySet::NonDoable => &self.non_doable,
        }
    }

    /// Every query set with its JQL, in report order.
    pub fn iter(&self) -> impl Iterator<Item = (QuerySet, &str)> {
        QuerySet::iter().map(move |query_set| (query_set, self.get(query_set)))
    }
}

fn default_output() -> String {
    "jira_appsec_issue_type_matrix_FINAL_v2.xlsx".to_string()
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

fn default_sheet_name() -> String {
    DEFAULT_SHEET_NAME.to_string()
}

const fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

const fn default_column_width() -> f64 {
    DEFAULT_COLUMN_WIDTH
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// With no explicit path, `jira-matrix.toml` in `base_dir` is used when it exists;
    /// otherwise the embedded defaults apply.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or holds invalid values
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading jira-matrix configuration file '{path}'"))?;
            (path.clone(), text)
        } else {
            let path = base_dir.join(DEFAULT_CONFIG_FILE);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    log::debug!("No configuration file at '{path}', using defaults");
                    return Ok(Self::default());
                }
                Err(e) => return Err(e).into_app_err_with(|| format!("reading jira-matrix configuration file '{path}'")),
            }
        };

        let config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))?;
        config.validate()?;

        log::debug!("Loaded configuration from '{final_path}'");
        Ok(config)
    }

    /// Save the default configuration to a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        Ok(())
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if any value is out of range or malformed
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.base_url).into_app_err_with(|| format!("base_url '{}' is not a valid URL", self.base_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(app_err!("base_url '{}' must use http or https", self.base_url));
        }

        if !(1..=MAX_PAGE_SIZE).contains(&self.page_size) {
            return Err(app_err!("page_size must be between 1 and {MAX_PAGE_SIZE}, got {}", self.page_size));
        }

        if !(self.column_width > 0.0 && self.column_width <= MAX_COLUMN_WIDTH) {
            return Err(app_err!(
                "column_width must be greater than 0 and at most {MAX_COLUMN_WIDTH}, got {}",
                self.column_width
            ));
        }

        if self.output.trim().is_empty() {
            return Err(app_err!("output must not be empty"));
        }

        validate_sheet_name(&self.sheet_name)?;

        for (query_set, jql) in self.queries.iter() {
            if jql.trim().is_empty() {
                return Err(app_err!("the query for '{query_set}' issues must not be empty"));
            }
        }

        Ok(())
    }

    #[must_use]
    pub fn output_path(&self) -> Utf8PathBuf {
        Utf8PathBuf::from(&self.output)
    }

    #[must_use]
    pub fn report_options(&self) -> ReportOptions {
        ReportOptions {
            title: self.title.clone(),
            sheet_name: self.sheet_name.clone(),
            column_width: self.column_width,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}

/// Excel restricts worksheet names in length and character set.
fn validate_sheet_name(name: &str) -> Result<()> {
    if name.is_empty() || name.chars().count() > MAX_SHEET_NAME_LEN {
        return Err(app_err!("sheet_name must be between 1 and {MAX_SHEET_NAME_LEN} characters, got '{name}'"));
    }

    if let Some(c) = name.chars().find(|c| matches!(c, '[' | ']' | ':' | '*' | '?' | '/' | '\\')) {
        return Err(app_err!("sheet_name must not contain '{c}', got '{name}'"));
    }

    if name.starts_with('\'') || name.ends_with('\'') {
        return Err(app_err!("sheet_name must not start or end with an apostrophe, got '{name}'"));
    }

    Ok(())
}
