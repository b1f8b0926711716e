//! Issue type counts and the status matrix derived from them
//!
//! Each of the four query sets yields an [`IssueTypeCounts`]. Together they form a
//! [`QueryCounts`], from which [`StatusMatrix::build`] computes the issue type universe
//! (the sorted union of every type seen) and the Reviewed, Pending, and Overall
//! aggregates. The matrix is pure data; rendering lives in [`crate::reports`].

mod issue_type_counts;
mod query_set;
mod status_matrix;

pub use issue_type_counts::IssueTypeCounts;
pub use query_set::QuerySet;
pub use status_matrix::{Emphasis, MatrixRow, QueryCounts, StatusMatrix, issue_type_universe};
