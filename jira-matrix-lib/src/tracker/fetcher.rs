use super::client::{IssueSearch, SearchRequest};
use crate::Result;
use crate::matrix::{IssueTypeCounts, QueryCounts, QuerySet};
use ohno::{EnrichableExt, app_err};

const LOG_TARGET: &str = "   fetcher";

/// Number of issues requested per search page.
pub const DEFAULT_PAGE_SIZE: u64 = 100;

/// Count the issues matching `jql` by issue type, walking every page of results.
///
/// Pages are requested at offsets `0, page_size, 2 * page_size, ...` until the offset of the
/// next page would reach the total reported by the server. Any failed page aborts the whole
/// fetch; partial counts are never returned.
pub async fn fetch_issue_type_counts<S: IssueSearch>(source: &S, jql: &str, page_size: u64) -> Result<IssueTypeCounts> {
    if page_size == 0 {
        return Err(app_err!("page size must be greater than zero"));
    }

    let mut counts = IssueTypeCounts::new();
    let mut start_at = 0;

    loop {
        let request = SearchRequest::issue_types(jql, start_at, page_size);
        let page = source
            .search(&request)
            .await
            .map_err(|e| e.enrich_with(|| format!("fetching issues starting at offset {start_at}")))?;

        log::debug!(target: LOG_TARGET, "Received {} issue(s) at offset {start_at} of {}", page.issues.len(), page.total);

        for issue in page.issues {
            counts.increment(issue.issue_type());
        }

        if start_at + page_size >= page.total {
            break;
        }

        start_at += page_size;
    }

    Ok(counts)
}

/// Fetch the counts for every query set, one query at a time.
pub async fn fetch_query_counts<'a, S, Q>(source: &S, queries: Q, page_size: u64) -> Result<QueryCounts>
where
    S: IssueSearch,
    Q: IntoIterator<Item = (QuerySet, &'a str)>,
{
    let mut all = QueryCounts::default();

    for (query_set, jql) in queries {
        log::info!(target: LOG_TARGET, "Fetching '{query_set}' issues");

        let counts = fetch_issue_type_counts(source, jql, page_size)
            .await
            .map_err(|e| e.enrich_with(|| format!("fetching '{query_set}' issues")))?;

        log::info!(target: LOG_TARGET, "Found {} '{query_set}' issue(s) across {} issue type(s)", counts.total(), counts.len());
        *all.get_mut(query_set) = counts;
    }

    Ok(all)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::client::{Issue, SearchPage};
    use std::cell::RefCell;

    /// In-memory tracker serving a fixed list of issue types in pages.
    struct FakeTracker {
        issue_types: Vec<&'static str>,
        reported_total: Option<u64>,
        fail_at: Option<u64>,
        requests: RefCell<Vec<(String, u64, u64)>>,
    }

    impl FakeTracker {
        fn new(issue_types: Vec<&'static str>) -> Self {
            Self {
                issue_types,
                reported_total: None,
                fail_at: None,
                requests: RefCell::new(Vec::new()),
            }
        }

        fn offsets(&self) -> Vec<u64> {
            self.requests.borrow().iter().map(|(_, start_at, _)| *start_at).collect()
        }
    }

    impl IssueSearch for FakeTracker {
        async fn search(&self, request: &SearchRequest<'_>) -> Result<SearchPage> {
            self.requests
                .borrow_mut()
                .push((request.jql.to_string(), request.start_at, request.max_results));

            if self.fail_at == Some(request.start_at) {
                return Err(app_err!("simulated failure"));
            }

            let start = usize::try_from(request.start_at).unwrap().min(self.issue_types.len());
            let end = (start + usize::try_from(request.max_results).unwrap()).min(self.issue_types.len());

            Ok(SearchPage {
                total: self.reported_total.unwrap_or(self.issue_types.len() as u64),
                issues: self.issue_types[start..end].iter().map(|t| Issue::of_type(*t)).collect(),
            })
        }
    }

    #[tokio::test]
    async fn test_single_page() {
        let tracker = FakeTracker::new(vec!["Bug", "Task", "Bug"]);

        let counts = fetch_issue_type_counts(&tracker, "project = SEC", DEFAULT_PAGE_SIZE).await.unwrap();

        assert_eq!(counts.get("Bug"), 2);
        assert_eq!(counts.get("Task"), 1);
        assert_eq!(tracker.offsets(), vec![0]);
    }

    #[tokio::test]
    async fn test_pagination_requests_every_page() {
        let mut issue_types = vec!["Bug"; 150];
        issue_types.extend(vec!["Task"; 100]);
        let tracker = FakeTracker::new(issue_types);

        let counts = fetch_issue_type_counts(&tracker, "project = SEC", 100).await.unwrap();

        assert_eq!(tracker.offsets(), vec![0, 100, 200]);
        assert_eq!(counts.get("Bug"), 150);
        assert_eq!(counts.get("Task"), 100);
        assert_eq!(counts.total(), 250);
    }

    #[tokio::test]
    async fn test_pagination_stops_on_exact_multiple() {
        let tracker = FakeTracker::new(vec!["Bug"; 200]);

        let counts = fetch_issue_type_counts(&tracker, "project = SEC", 100).await.unwrap();

        assert_eq!(tracker.offsets(), vec![0, 100]);
        assert_eq!(counts.total(), 200);
    }

    #[tokio::test]
    async fn test_requests_carry_query_and_page_size() {
        let tracker = FakeTracker::new(vec!["Bug"; 5]);

        let _ = fetch_issue_type_counts(&tracker, "labels = AppSecurity", 2).await.unwrap();

        let requests = tracker.requests.borrow();
        assert_eq!(requests.len(), 3);
        assert!(requests.iter().all(|(jql, _, max_results)| jql == "labels = AppSecurity" && *max_results == 2));
    }

    #[tokio::test]
    async fn test_no_matches() {
        let tracker = FakeTracker::new(Vec::new());

        let counts = fetch_issue_type_counts(&tracker, "project = NONE", DEFAULT_PAGE_SIZE).await.unwrap();

        assert!(counts.is_empty());
        assert_eq!(tracker.offsets(), vec![0]);
    }

    #[tokio::test]
    async fn test_counts_sum_to_reported_total() {
        let issue_types: Vec<&'static str> = ["Bug", "Task", "Story", "Epic"].into_iter().cycle().take(437).collect();
        let tracker = FakeTracker::new(issue_types);

        let counts = fetch_issue_type_counts(&tracker, "project = SEC", 50).await.unwrap();

        assert_eq!(counts.total(), 437);
        assert_eq!(tracker.offsets().len(), 9);
    }

    #[tokio::test]
    async fn test_failure_aborts_fetch() {
        let mut tracker = FakeTracker::new(vec!["Bug"; 250]);
        tracker.fail_at = Some(100);

        let result = fetch_issue_type_counts(&tracker, "project = SEC", 100).await;

        assert!(result.is_err());
        assert_eq!(tracker.offsets(), vec![0, 100]);
    }

    #[tokio::test]
    async fn test_zero_page_size_is_rejected() {
        let tracker = FakeTracker::new(vec!["Bug"]);

        let result = fetch_issue_type_counts(&tracker, "project = SEC", 0).await;

        assert!(result.is_err());
        assert!(tracker.offsets().is_empty());
    }

    #[tokio::test]
    async fn test_reported_total_drives_stop_condition() {
        // The server claims fewer matches than it actually holds; the loop trusts the total.
        let mut tracker = FakeTracker::new(vec!["Bug"; 300]);
        tracker.reported_total = Some(120);

        let counts = fetch_issue_type_counts(&tracker, "project = SEC", 100).await.unwrap();

        assert_eq!(tracker.offsets(), vec![0, 100]);
        assert_eq!(counts.total(), 200);
    }

    #[tokio::test]
    async fn test_fetch_query_counts_runs_each_query() {
        let tracker = FakeTracker::new(vec!["Bug", "Task"]);
        let queries = [
            (QuerySet::Accepted, "q1"),
            (QuerySet::Rejected, "q2"),
            (QuerySet::Doable, "q3"),
            (QuerySet::NonDoable, "q4"),
        ];

        let all = fetch_query_counts(&tracker, queries, DEFAULT_PAGE_SIZE).await.unwrap();

        let jqls: Vec<_> = tracker.requests.borrow().iter().map(|(jql, _, _)| jql.clone()).collect();
        assert_eq!(jqls, vec!["q1", "q2", "q3", "q4"]);
        assert_eq!(all.accepted.total(), 2);
        assert_eq!(all.non_doable.get("Task"), 1);
    }

    #[tokio::test]
    async fn test_fetch_query_counts_stops_at_first_failure() {
        let mut tracker = FakeTracker::new(vec!["Bug"]);
        tracker.fail_at = Some(0);
        let queries = [(QuerySet::Accepted, "q1"), (QuerySet::Rejected, "q2")];

        let result = fetch_query_counts(&tracker, queries, DEFAULT_PAGE_SIZE).await;

        assert!(result.is_err());
        let jqls: Vec<_> = tracker.requests.borrow().iter().map(|(jql, _, _)| jql.clone()).collect();
        assert_eq!(jqls, vec!["q1"]);
    }
}
