use shared::protocol::SearchCriteria;
use tracing::{info, warn};

use crate::{api::VendorApi, error::ClientResult, list::VendorListController};

pub const NO_RESULTS_MESSAGE: &str = "No vendors found.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(usize),
    /// Informational, not an error.
    Empty,
}

impl SearchOutcome {
    pub fn message(&self) -> Option<&'static str> {
        match self {
            SearchOutcome::Found(_) => None,
            SearchOutcome::Empty => Some(NO_RESULTS_MESSAGE),
        }
    }
}

/// Runs the server-side search and installs the rows as the list's new results.
/// On failure the previous results stay in place.
pub async fn search_into(
    api: &dyn VendorApi,
    criteria: &SearchCriteria,
    list: &mut VendorListController,
) -> ClientResult<SearchOutcome> {
    let query = criteria.to_query();
    let results = api
        .search_vendors(&query)
        .await
        .inspect_err(|err| warn!(query = %query, "vendor search failed: {err}"))?;

    let count = results.len();
    info!(query = %query, count, "vendor search finished");
    list.replace_results(results);

    Ok(if count == 0 {
        SearchOutcome::Empty
    } else {
        SearchOutcome::Found(count)
    })
}

#[cfg(test)]
#[path = "tests/search_tests.rs"]
mod tests;
