//! Domain model for repository search results.
//!
//! These structs are the vendor-agnostic representation served by the HTTP
//! API; provider modules deserialize their own raw wire formats and convert
//! into these types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

/// A repository snapshot from a search result page.
///
/// The `Serialize` shape of this struct is the public API response shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Repository {
    /// Repository ID (unique within the provider)
    pub id: u64,

    /// Repository name (without owner)
    pub name: String,

    /// Full `owner/name` identifier
    pub full_name: String,

    /// Repository owner information
    pub owner: RepositoryOwner,

    /// Repository description
    pub description: Option<String>,

    /// When the repository was created
    pub created_at: DateTime<Utc>,

    /// URL for cloning the repository
    pub url: Url,

    /// Number of stargazers (stars)
    pub stars: u64,

    /// Number of watchers
    pub watchers: u64,

    /// Primary programming language, absent for e.g. pure-docs repositories
    pub language: Option<String>,
}

/// Repository owner information.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RepositoryOwner {
    /// Owner's login name
    pub login: String,
}
