//! Search providers.
//!
//! The [`SearchProvider`] trait is the narrow seam between the aggregation
//! service and a concrete backend; [`github`] holds the only real
//! implementation. Tests substitute scripted providers through the same
//! trait.

pub mod github;
pub mod models;

pub use models::{Repository, RepositoryOwner};

use async_trait::async_trait;
use chrono::NaiveDate;

use super::{SearchError, SearchOutcome};

/// A backend able to fetch one page of repositories matching the filters.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Fetches the given result page, star-descending.
    ///
    /// A `page_id` of `None` (or `0`) relies on the provider's default
    /// first page. Implementations classify provider-level refusals into
    /// [`SearchOutcome::ResultLimitExceeded`] or [`SearchError::RateLimit`];
    /// they never retry.
    async fn search_repos(
        &self,
        page_id: Option<u32>,
        created_from: Option<NaiveDate>,
        language: Option<&str>,
    ) -> Result<SearchOutcome, SearchError>;
}
