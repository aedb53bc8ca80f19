//! gitsearch — web service for searching popular GitHub repositories
//!
//! This library wraps the GitHub repository-search API behind a small HTTP
//! service. It supports:
//!
//! - Fetching one page of repositories sorted by stars (descending)
//! - Aggregating the top K repositories across consecutive pages
//! - Filtering by primary language and by creation date
//! - Optional in-process caching of result pages
//!
//! ## Authentication
//!
//! GitHub requests work both authenticated and unauthenticated. A token is
//! supplied through the `GITHUB_API_TOKEN` environment variable (or the
//! `--github-token` flag on the server binary).
//!
//! ```bash
//! # Set GitHub token for authentication (optional)
//! export GITHUB_API_TOKEN=your_github_token
//! ```
//!
//! - **Without token**: 60 requests/hour (unauthenticated rate limit)
//! - **With token**: 5,000 requests/hour
//!
//! Once the unauthenticated quota is exhausted, GitHub answers every search
//! with a rate-limit message; the service surfaces that as HTTP 429 instead
//! of retrying.
//!
//! ## Configuration
//!
//! All configuration is environment-driven (see [`config::AppConfig`]):
//!
//! - `HOST` / `PORT` — bind address of the HTTP server
//! - `GITHUB_API_TOKEN` — optional GitHub token
//! - `CACHE_ENABLE` — enable the in-process page cache
//! - `LOG_LEVEL` — default tracing filter when `RUST_LOG` is not set
//!
//! ## Usage
//!
//! This crate can be used as a library (construct a
//! [`services::ReposService`] directly) or through the `gitsearch-server`
//! binary, which exposes the search operations as a JSON HTTP API.

pub mod config;
pub mod search;
pub mod services;
pub mod transport;
