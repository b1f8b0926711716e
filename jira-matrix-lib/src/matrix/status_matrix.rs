use super::{IssueTypeCounts, QuerySet};
use std::collections::BTreeSet;

/// Raw counts fetched for each of the four query sets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryCounts {
    pub accepted: IssueTypeCounts,
    pub rejected: IssueTypeCounts,
    pub doable: IssueTypeCounts,
    pub non_doable: IssueTypeCounts,
}

impl QueryCounts {
    #[must_use]
    pub const fn get(&self, query_set: QuerySet) -> &IssueTypeCounts {
        match query_set {
            QuerySet::Accepted => &self.accepted,
            QuerySet::Rejected => &self.rejected,
            QuerySet::Doable => &self.doable,
            QuerySet::NonDoable => &self.non_doable,
        }
    }

    pub const fn get_mut(&mut self, query_set: QuerySet) -> &mut IssueTypeCounts {
        match query_set {
            QuerySet::Accepted => &mut self.accepted,
            QuerySet::Rejected => &mut self.rejected,
            QuerySet::Doable => &mut self.doable,
            QuerySet::NonDoable => &mut self.non_doable,
        }
    }
}

/// Sorted union of the issue types seen across all four query sets.
#[must_use]
pub fn issue_type_universe(counts: &QueryCounts) -> Vec<String> {
    let universe: BTreeSet<&str> = [&counts.accepted, &counts.rejected, &counts.doable, &counts.non_doable]
        .into_iter()
        .flat_map(IssueTypeCounts::issue_types)
        .collect();

    universe.into_iter().map(str::to_string).collect()
}

/// How a data row is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    /// Aggregated rows (Reviewed, Pending, Overall), shown in bold
    Summary,

    /// Rows for a single query set, shown in italics
    Detail,
}

/// A single row of the status matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatrixRow {
    Data {
        label: String,
        emphasis: Emphasis,
        /// One value per issue type, in universe order
        values: Vec<u64>,
    },
    Separator,
}

impl MatrixRow {
    fn data(label: impl Into<String>, emphasis: Emphasis, counts: &IssueTypeCounts, issue_types: &[String]) -> Self {
        Self::Data {
            label: label.into(),
            emphasis,
            values: issue_types.iter().map(|issue_type| counts.get(issue_type)).collect(),
        }
    }

    /// Sum of the row's values; zero for separators.
    #[must_use]
    pub fn total(&self) -> u64 {
        match self {
            Self::Data { values, .. } => values.iter().sum(),
            Self::Separator => 0,
        }
    }
}

/// The tabular content of the report: issue type columns plus the ordered status rows.
///
/// Rows always come in this order: Reviewed, Accepted, Rejected, separator, Pending,
/// Doable, Non Doable, separator, Overall.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMatrix {
    issue_types: Vec<String>,
    reviewed: IssueTypeCounts,
    pending: IssueTypeCounts,
    overall: IssueTypeCounts,
    rows: Vec<MatrixRow>,
}

impl StatusMatrix {
    #[must_use]
    pub fn build(counts: &QueryCounts) -> Self {
        let issue_types = issue_type_universe(counts);
        let universe = || issue_types.iter().map(String::as_str);

        let reviewed = counts.accepted.merged(&counts.rejected, universe());
        let pending = counts.doable.merged(&counts.non_doable, universe());
        let overall = reviewed.merged(&pending, universe());

        let detail = |query_set: QuerySet| MatrixRow::data(query_set.to_string(), Emphasis::Detail, counts.get(query_set), &issue_types);

        let rows = vec![
            MatrixRow::data("Reviewed", Emphasis::Summary, &reviewed, &issue_types),
            detail(QuerySet::Accepted),
            detail(QuerySet::Rejected),
            MatrixRow::Separator,
            MatrixRow::data("Pending", Emphasis::Summary, &pending, &issue_types),
            detail(QuerySet::Doable),
            detail(QuerySet::NonDoable),
            MatrixRow::Separator,
            MatrixRow::data("Overall", Emphasis::Summary, &overall, &issue_types),
        ];

        Self {
            issue_types,
            reviewed,
            pending,
            overall,
            rows,
        }
    }

    /// Issue type columns, sorted.
    #[must_use]
    pub fn issue_types(&self) -> &[String] {
        &self.issue_types
    }

    /// Header cells: `Status`, each issue type, then `Total`.
    #[must_use]
    pub fn header(&self) -> Vec<&str> {
        core::iter::once("Status")
            .chain(self.issue_types.iter().map(String::as_str))
            .chain(core::iter::once("Total"))
            .collect()
    }

    /// Number of spreadsheet columns: the label column, one per issue type, and the total column.
    #[must_use]
    pub const fn column_count(&self) -> usize {
        self.issue_types.len() + 2
    }

    #[must_use]
    pub fn rows(&self) -> &[MatrixRow] {
        &self.rows
    }

    #[must_use]
    pub const fn reviewed(&self) -> &IssueTypeCounts {
        &self.reviewed
    }

    #[must_use]
    pub const fn pending(&self) -> &IssueTypeCounts {
        &self.pending
    }

    #[must_use]
    pub const fn overall(&self) -> &IssueTypeCounts {
        &self.overall
    }
}
