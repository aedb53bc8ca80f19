//! Core search domain: filter arguments, result outcomes and the error
//! taxonomy shared by the provider client and the aggregation service.

pub mod cache;
pub mod providers;
mod search_args;

pub use providers::models::{Repository, RepositoryOwner};
pub use search_args::SearchArgs;

use thiserror::Error;

/// Outcome of one repository-search call.
///
/// The two empty-result conditions are ordinary outcomes rather than errors:
/// both map to an empty list at the API boundary, while [`SearchError`]
/// variants surface as failure responses.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// One page of repositories, star-descending. An empty page means the
    /// result set is exhausted.
    Page(Vec<Repository>),
    /// GitHub refuses to serve results past the first 1000 matches.
    ResultLimitExceeded,
    /// GitHub silently dropped an unrecognized language filter and answered
    /// for all languages; the page must not be served to the caller.
    LanguageMismatch,
}

impl SearchOutcome {
    /// Collapses the empty-result outcomes into an empty list.
    pub fn into_repos(self) -> Vec<Repository> {
        match self {
            SearchOutcome::Page(repos) => repos,
            SearchOutcome::ResultLimitExceeded | SearchOutcome::LanguageMismatch => Vec::new(),
        }
    }
}

/// Failures raised by the upstream client. None of these are retried.
#[derive(Debug, Error)]
pub enum SearchError {
    /// GitHub signalled quota exhaustion. Fatal for the request.
    #[error("GitHub API rate limit exceeded")]
    RateLimit,

    /// The HTTP request itself failed (connect, timeout, body read).
    #[error("GitHub API request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The response body did not match the expected search schema.
    #[error("unexpected GitHub API response: {0}")]
    Decode(#[from] serde_json::Error),
}
