//! Aggregation service over the search provider.
//!
//! Orchestrates page fetches to answer "one page of popular repos" and
//! "top K popular repos" requests, consulting the optional cache and
//! validating that GitHub actually honored the language filter.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::search::cache::SearchCache;
use crate::search::providers::SearchProvider;
use crate::search::{Repository, SearchArgs, SearchError, SearchOutcome};

/// How long a cached result page stays valid.
pub const CACHE_TTL: Duration = Duration::from_secs(60);

/// Service for searching popular repositories through an injected provider,
/// with optional page caching.
#[derive(Clone)]
pub struct ReposService {
    provider: Arc<dyn SearchProvider>,
    cache: Option<Arc<dyn SearchCache>>,
}

impl ReposService {
    pub fn new(provider: Arc<dyn SearchProvider>, cache: Option<Arc<dyn SearchCache>>) -> Self {
        Self { provider, cache }
    }

    /// Fetches one page of popular repositories matching `args`.
    ///
    /// A non-empty cached page is returned as-is: cached pages were stored
    /// by a previous call and are trusted as pre-validated, so the language
    /// check is skipped for them. Fresh pages are cached before the check —
    /// a mismatching page still occupies the key until its TTL runs out.
    pub async fn get_popular_repos(
        &self,
        args: &SearchArgs,
    ) -> Result<SearchOutcome, SearchError> {
        tracing::info!("get popular repos for args {args}");
        let started = Instant::now();

        if let Some(cache) = &self.cache {
            if let Some(repos) = cache.get(&args.cache_key()).await.filter(|r| !r.is_empty()) {
                tracing::debug!(
                    "cache hit for args {args} ({} repos, {:?})",
                    repos.len(),
                    started.elapsed()
                );
                return Ok(SearchOutcome::Page(repos));
            }
            tracing::debug!("cache miss for args {args}");
        }

        let outcome = self
            .provider
            .search_repos(args.page_id, args.created_from, args.language.as_deref())
            .await?;
        let repos = match outcome {
            SearchOutcome::Page(repos) => repos,
            other => return Ok(other),
        };

        if let Some(cache) = &self.cache {
            cache.set(&args.cache_key(), &repos, CACHE_TTL).await;
        }

        // GitHub falls back to an unfiltered search when the language
        // qualifier is unrecognized; the first entry betrays that.
        if let (Some(wanted), Some(first)) = (args.language.as_deref(), repos.first()) {
            let matches = first
                .language
                .as_deref()
                .is_some_and(|language| language.eq_ignore_ascii_case(wanted));
            if !matches {
                tracing::debug!("language {wanted} is not in the response repos for args {args}");
                return Ok(SearchOutcome::LanguageMismatch);
            }
        }

        tracing::debug!(
            "fetched page from API for args {args} ({} repos, {:?})",
            repos.len(),
            started.elapsed()
        );
        Ok(SearchOutcome::Page(repos))
    }

    /// Collects the `k` most popular repositories matching `args`.
    ///
    /// Walks consecutive pages starting from page 1 until `k` entries are
    /// collected or a page comes back empty; the result is truncated to
    /// exactly `k`. If fewer than `k` matching repositories exist, all of
    /// them are returned.
    ///
    /// A [`SearchOutcome::ResultLimitExceeded`] or
    /// [`SearchOutcome::LanguageMismatch`] from any page aborts the loop and
    /// is returned as the overall outcome — no partial results. Errors
    /// propagate unmodified.
    pub async fn get_top_k_popular_repos(
        &self,
        args: &SearchArgs,
        k: usize,
    ) -> Result<SearchOutcome, SearchError> {
        tracing::info!("get top {k} popular repos for args {args}");

        let mut page_args = args.clone().with_page(1);
        let mut repos: Vec<Repository> = Vec::new();

        while repos.len() < k {
            let page = match self.get_popular_repos(&page_args).await? {
                SearchOutcome::Page(page) => page,
                other => return Ok(other),
            };
            if page.is_empty() {
                tracing::debug!("empty page for args {page_args}");
                break;
            }

            tracing::debug!("page {:?} contains {} repos", page_args.page_id, page.len());
            repos.extend(page);
            page_args = page_args.next_page();
        }

        repos.truncate(k);
        Ok(SearchOutcome::Page(repos))
    }
}
