//! GitHub implementation of the repository-search provider.
//!
//! Builds the search URL by hand (the search endpoint's `q` syntax plus the
//! `sort`/`order`/`page` parameters), issues the request with `reqwest` and
//! classifies GitHub's in-body error messages before deserializing.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use reqwest::Client;
use serde::Deserialize;
use strum::{AsRefStr, Display, EnumString};
use url::Url;

use super::models::{Repository, RepositoryOwner};
use super::SearchProvider;
use crate::search::{SearchError, SearchOutcome};

/// Production GitHub API base URL.
pub const GITHUB_API_BASE_URL: &str = "https://api.github.com";

const USER_AGENT: &str = concat!("gitsearch/", env!("CARGO_PKG_VERSION"));

/// Fragment GitHub embeds in every quota-exhaustion message, matched
/// case-insensitively as a substring.
const RATE_LIMIT_FRAGMENT: &str = "rate limit exceeded";

/// Message GitHub returns when a page past the first 1000 results is
/// requested, matched case-insensitively as a whole.
const RESULT_LIMIT_MESSAGE: &str = "only the first 1000 search results are available";

/// Sort fields supported by GitHub's repository search.
///
/// Popularity queries always use [`SortOption::Stars`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum SortOption {
    /// Sort by number of stars (popularity)
    #[strum(serialize = "stars")]
    Stars,
    /// Sort by number of forks
    #[strum(serialize = "forks")]
    Forks,
    /// Sort by most recently updated
    #[strum(serialize = "updated")]
    Updated,
}

/// Sort direction for GitHub search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum OrderOption {
    /// Lowest to highest
    #[strum(serialize = "asc")]
    Ascending,
    /// Highest to lowest
    #[strum(serialize = "desc")]
    Descending,
}

/// GitHub API client for repository search.
pub struct GithubClient {
    client: Client,
    api_base_url: String,
    github_token: Option<String>,
}

/// GitHub-specific search response structure
#[derive(Debug, Deserialize)]
struct GithubSearchResponse {
    items: Vec<GithubRepositoryItem>,
}

/// GitHub-specific repository item
#[derive(Debug, Deserialize)]
struct GithubRepositoryItem {
    id: u64,
    name: String,
    full_name: String,
    owner: GithubRepositoryOwner,
    description: Option<String>,
    created_at: DateTime<Utc>,
    clone_url: Url,
    stargazers_count: u64,
    watchers_count: u64,
    language: Option<String>,
}

/// GitHub-specific owner information
#[derive(Debug, Deserialize)]
struct GithubRepositoryOwner {
    login: String,
}

/// Error envelope GitHub uses instead of a result payload. A body carrying
/// a `message` field never carries search results.
#[derive(Debug, Deserialize)]
struct GithubApiMessage {
    message: String,
}

impl From<GithubRepositoryItem> for Repository {
    fn from(item: GithubRepositoryItem) -> Self {
        Repository {
            id: item.id,
            name: item.name,
            full_name: item.full_name,
            owner: RepositoryOwner {
                login: item.owner.login,
            },
            description: item.description,
            created_at: item.created_at,
            url: item.clone_url,
            stars: item.stargazers_count,
            watchers: item.watchers_count,
            language: item.language,
        }
    }
}

impl GithubClient {
    /// Creates a client against the production GitHub API.
    pub fn new(client: Client, github_token: Option<String>) -> Self {
        GithubClient {
            client,
            api_base_url: GITHUB_API_BASE_URL.to_string(),
            github_token,
        }
    }

    /// Points the client at a different API base URL. Used by tests to
    /// target a local mock server.
    pub fn with_api_base_url(mut self, api_base_url: impl Into<String>) -> Self {
        self.api_base_url = api_base_url.into();
        self
    }

    /// Builds the `q` search expression for the given filters.
    ///
    /// Always qualifies on public visibility and `stars:>1` — without the
    /// star qualifier the search endpoint rejects the query outright.
    fn build_search_query(created_from: Option<NaiveDate>, language: Option<&str>) -> String {
        let mut qualifiers = vec!["is:public".to_string(), "stars:>1".to_string()];

        if let Some(date) = created_from {
            qualifiers.push(format!("created:>{}", date.format("%Y-%m-%d")));
        }

        if let Some(language) = language {
            qualifiers.push(format!("language:{language}"));
        }

        qualifiers.join(" ")
    }

    /// Constructs the full search URL for one result page.
    ///
    /// Results are always ordered by stars descending. The `page` parameter
    /// is appended only for an explicit page past the default; page 0 and
    /// `None` rely on GitHub serving page 1.
    fn construct_search_url(
        &self,
        page_id: Option<u32>,
        created_from: Option<NaiveDate>,
        language: Option<&str>,
    ) -> String {
        let query = Self::build_search_query(created_from, language);

        let mut url = format!(
            "{}/search/repositories?q={}",
            self.api_base_url,
            urlencoding::encode(&query)
        );

        url.push_str(&format!("&sort={}", SortOption::Stars.as_ref()));
        url.push_str(&format!("&order={}", OrderOption::Descending.as_ref()));

        if let Some(page) = page_id.filter(|page| *page > 0) {
            url.push_str(&format!("&page={page}"));
        }

        url
    }

    fn is_rate_limit_message(message: &str) -> bool {
        message.to_lowercase().contains(RATE_LIMIT_FRAGMENT)
    }

    fn is_result_limit_message(message: &str) -> bool {
        message.eq_ignore_ascii_case(RESULT_LIMIT_MESSAGE)
    }
}

#[async_trait]
impl SearchProvider for GithubClient {
    /// Executes one search request against the GitHub API.
    ///
    /// GitHub reports quota exhaustion and the 1000-result ceiling through a
    /// `message` body rather than a dedicated status code, so the body is
    /// classified before schema deserialization. An unrecognized message
    /// falls through to normal parsing and surfaces as a decode error.
    async fn search_repos(
        &self,
        page_id: Option<u32>,
        created_from: Option<NaiveDate>,
        language: Option<&str>,
    ) -> Result<SearchOutcome, SearchError> {
        let url = self.construct_search_url(page_id, created_from, language);
        tracing::debug!("GET {url}");

        let mut req_builder = self.client.get(&url).header("User-Agent", USER_AGENT);

        if let Some(token) = &self.github_token {
            req_builder = req_builder.header("Authorization", format!("Bearer {token}"));
        }

        let body = req_builder.send().await?.text().await?;

        if let Ok(error_body) = serde_json::from_str::<GithubApiMessage>(&body) {
            if Self::is_rate_limit_message(&error_body.message) {
                tracing::warn!("GitHub API rate limit hit: {}", error_body.message);
                return Err(SearchError::RateLimit);
            }
            if Self::is_result_limit_message(&error_body.message) {
                return Ok(SearchOutcome::ResultLimitExceeded);
            }
        }

        let response: GithubSearchResponse = serde_json::from_str(&body)?;
        let repos = response.items.into_iter().map(Repository::from).collect();

        Ok(SearchOutcome::Page(repos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> GithubClient {
        GithubClient::new(Client::new(), None)
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().expect("valid date literal")
    }

    #[test]
    fn query_without_filters_keeps_fixed_qualifiers() {
        assert_eq!(
            GithubClient::build_search_query(None, None),
            "is:public stars:>1"
        );
    }

    #[test]
    fn query_appends_creation_date_and_language() {
        assert_eq!(
            GithubClient::build_search_query(Some(date("2023-05-01")), Some("go")),
            "is:public stars:>1 created:>2023-05-01 language:go"
        );
    }

    #[test]
    fn url_encodes_query_and_fixes_sort_order() {
        let url = test_client().construct_search_url(None, None, None);
        assert_eq!(
            url,
            "https://api.github.com/search/repositories?q=is%3Apublic%20stars%3A%3E1&sort=stars&order=desc"
        );
    }

    #[test]
    fn url_includes_explicit_page() {
        let url = test_client().construct_search_url(Some(2), None, Some("rust"));
        assert!(url.contains("language%3Arust"));
        assert!(url.ends_with("&page=2"));
    }

    #[test]
    fn url_omits_page_zero() {
        let url = test_client().construct_search_url(Some(0), None, None);
        assert!(!url.contains("page="));
    }

    #[test]
    fn rate_limit_message_matches_substring_case_insensitively() {
        assert!(GithubClient::is_rate_limit_message(
            "API Rate Limit Exceeded for 127.0.0.1."
        ));
        assert!(!GithubClient::is_rate_limit_message("Validation Failed"));
    }

    #[test]
    fn result_limit_message_requires_exact_match() {
        assert!(GithubClient::is_result_limit_message(
            "Only the first 1000 search results are available"
        ));
        assert!(!GithubClient::is_result_limit_message(
            "only the first 1000 search results are available."
        ));
    }
}
