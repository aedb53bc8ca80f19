//! Result-page cache.
//!
//! [`SearchCache`] is the narrow get/set-with-ttl seam the aggregation
//! service consults; [`InMemoryCache`] is the in-process implementation used
//! when caching is enabled. Any backend with the same two capabilities can
//! be substituted.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::Repository;

/// Key-value store for result pages with per-entry TTL.
#[async_trait]
pub trait SearchCache: Send + Sync {
    /// Returns the cached page for `key`, if present and not expired.
    async fn get(&self, key: &str) -> Option<Vec<Repository>>;

    /// Stores a page under `key` for `ttl`, replacing any previous entry.
    async fn set(&self, key: &str, repos: &[Repository], ttl: Duration);
}

struct CacheEntry {
    expires_at: Instant,
    repos: Vec<Repository>,
}

/// Process-local cache backed by a `HashMap` behind an async `RwLock`.
///
/// Expired entries are dropped lazily: reads skip them, writes prune them.
/// Concurrent requests for the same missing key may each go upstream once
/// (no single-flight deduplication).
#[derive(Default)]
pub struct InMemoryCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SearchCache for InMemoryCache {
    async fn get(&self, key: &str) -> Option<Vec<Repository>> {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|entry| entry.expires_at > Instant::now())
            .map(|entry| entry.repos.clone())
    }

    async fn set(&self, key: &str, repos: &[Repository], ttl: Duration) {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        entries.retain(|_, entry| entry.expires_at > now);
        entries.insert(
            key.to_string(),
            CacheEntry {
                expires_at: now + ttl,
                repos: repos.to_vec(),
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::RepositoryOwner;

    fn repo(id: u64) -> Repository {
        Repository {
            id,
            name: format!("repo-{id}"),
            full_name: format!("owner/repo-{id}"),
            owner: RepositoryOwner {
                login: "owner".to_string(),
            },
            description: None,
            created_at: "2024-01-15T10:30:00Z".parse().expect("valid timestamp"),
            url: format!("https://github.com/owner/repo-{id}.git")
                .parse()
                .expect("valid url"),
            stars: 10,
            watchers: 10,
            language: Some("rust".to_string()),
        }
    }

    #[tokio::test]
    async fn get_returns_stored_page() {
        let cache = InMemoryCache::new();
        cache.set("key", &[repo(1), repo(2)], Duration::from_secs(60)).await;

        let page = cache.get("key").await.expect("entry should be present");
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].id, 1);
    }

    #[tokio::test]
    async fn get_misses_unknown_key() {
        let cache = InMemoryCache::new();
        assert!(cache.get("missing").await.is_none());
    }

    #[tokio::test]
    async fn entries_expire_after_ttl() {
        let cache = InMemoryCache::new();
        cache.set("key", &[repo(1)], Duration::from_millis(10)).await;

        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(cache.get("key").await.is_none());
    }

    #[tokio::test]
    async fn set_replaces_existing_entry() {
        let cache = InMemoryCache::new();
        cache.set("key", &[repo(1)], Duration::from_secs(60)).await;
        cache.set("key", &[repo(2)], Duration::from_secs(60)).await;

        let page = cache.get("key").await.expect("entry should be present");
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].id, 2);
    }
}
