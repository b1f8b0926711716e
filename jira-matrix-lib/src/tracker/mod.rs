//! Issue retrieval from the Jira search API
//!
//! [`Client`] speaks to the `rest/api/2/search` endpoint. The fetcher functions are
//! written against the [`IssueSearch`] trait so they can be exercised with fakes and
//! mock servers; they walk every page of a query and tally issues by type.

mod client;
mod fetcher;

pub use client::{Client, ISSUE_TYPE_FIELD, Issue, IssueFields, IssueSearch, IssueType, SearchPage, SearchRequest};
pub use fetcher::{DEFAULT_PAGE_SIZE, fetch_issue_type_counts, fetch_query_counts};
