//! Jira search API client
//!
//! Minimal client for the `rest/api/2/search` endpoint, requesting nothing but the
//! issue type of each matching issue.

use crate::Result;
use ohno::{IntoAppError, app_err};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use url::Url;

const LOG_TARGET: &str = "   tracker";
const SEARCH_PATH: &str = "rest/api/2/search";

/// The only issue field the search asks for.
pub const ISSUE_TYPE_FIELD: &str = "issuetype";

/// Body of a search request.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest<'a> {
    pub jql: &'a str,
    pub start_at: u64,
    pub max_results: u64,
    pub fields: &'a [&'a str],
}

impl<'a> SearchRequest<'a> {
    /// A request for one page of results carrying only the issue type field.
    #[must_use]
    pub const fn issue_types(jql: &'a str, start_at: u64, max_results: u64) -> Self {
        Self {
            jql,
            start_at,
            max_results,
            fields: &[ISSUE_TYPE_FIELD],
        }
    }
}

/// One page of search results with only the fields we need.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchPage {
    /// Total number of issues matching the query, across all pages
    #[serde(default)]
    pub total: u64,

    #[serde(default)]
    pub issues: Vec<Issue>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Issue {
    pub fields: IssueFields,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IssueFields {
    #[serde(rename = "issuetype")]
    pub issue_type: IssueType,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IssueType {
    pub name: String,
}

impl Issue {
    #[cfg(test)]
    pub(crate) fn of_type(name: impl Into<String>) -> Self {
        Self {
            fields: IssueFields {
                issue_type: IssueType { name: name.into() },
            },
        }
    }

    /// Name of the issue's type, as reported by the tracker.
    #[must_use]
    pub fn issue_type(&self) -> &str {
        &self.fields.issue_type.name
    }
}

/// Anything that can answer a search request.
pub trait IssueSearch {
    fn search(&self, request: &SearchRequest<'_>) -> impl Future<Output = Result<SearchPage>>;
}

/// Jira API client
#[derive(Debug, Clone)]
#[expect(clippy::struct_field_names, reason = "client field stores the underlying HTTP client")]
pub struct Client {
    client: reqwest::Client,
    search_url: Url,
}

impl Client {
    /// Create a client for the Jira server at `base_url`, authenticating every request with `token`.
    pub fn new(base_url: &str, token: &str) -> Result<Self> {
        let search_url = search_url(base_url)?;

        let mut auth_val = HeaderValue::from_str(&format!("Bearer {token}")).into_app_err("Jira token is not a valid header value")?;
        auth_val.set_sensitive(true);

        let mut headers = HeaderMap::new();
        let _ = headers.insert(AUTHORIZATION, auth_val);
        let _ = headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .user_agent("jira-matrix")
            .default_headers(headers)
            .build()?;

        Ok(Self { client, search_url })
    }

    #[must_use]
    pub const fn search_url(&self) -> &Url {
        &self.search_url
    }
}

impl IssueSearch for Client {
    async fn search(&self, request: &SearchRequest<'_>) -> Result<SearchPage> {
        log::debug!(target: LOG_TARGET, "POST {} (startAt={}, maxResults={})", self.search_url, request.start_at, request.max_results);

        let resp = self
            .client
            .post(self.search_url.clone())
            .json(request)
            .send()
            .await
            .into_app_err_with(|| format!("sending search request to '{}'", self.search_url))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(app_err!("search request to '{}' failed with status {status}: {}", self.search_url, body.trim()));
        }

        let body = resp.bytes().await.into_app_err("reading search response body")?;
        serde_json::from_slice::<SearchPage>(&body).into_app_err("malformed search response")
    }
}

/// Resolve the search endpoint below `base_url`, keeping any path prefix the base carries.
fn search_url(base_url: &str) -> Result<Url> {
    let mut url = Url::parse(base_url).into_app_err_with(|| format!("invalid Jira base URL '{base_url}'"))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(app_err!("invalid Jira base URL '{base_url}': only http and https are supported"));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    url.join(SEARCH_PATH).into_app_err_with(|| format!("invalid Jira base URL '{base_url}'"))
}
