//! HTTP API for the repository search service.
//!
//! Four GET routes return JSON arrays of repositories:
//!
//! - `/api/v0/repos/popular` — one result page, with optional `page_id`
//! - `/api/v0/repos/top10` / `top50` / `top100` — top-K aggregation
//!
//! Empty-result outcomes (result limit, language mismatch) map to `200 []`;
//! a provider rate limit maps to `429`; an invalid `page_id` maps to `422`.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;

use crate::search::{Repository, SearchArgs, SearchError};
use crate::services::ReposService;

/// Application context shared across request handlers.
///
/// Constructed once at startup and injected through axum state; there is no
/// process-global service instance.
pub struct AppContext {
    pub repos_service: ReposService,
}

/// Query parameters for the paginated popular-repos route.
#[derive(Debug, Deserialize)]
struct PopularReposQuery {
    /// Date to filter repos created from (optional)
    created_from: Option<NaiveDate>,
    /// Filter the language of repos (optional)
    language: Option<String>,
    /// The number of the page with results to receive, starting at 1
    /// (optional). Deserialized signed so out-of-range input reaches
    /// validation.
    page_id: Option<i64>,
}

/// Query parameters for the fixed top-K routes.
#[derive(Debug, Deserialize)]
struct TopReposQuery {
    created_from: Option<NaiveDate>,
    language: Option<String>,
}

/// Errors surfaced by the HTTP boundary.
#[derive(Debug)]
pub enum ApiError {
    /// Request parameters failed validation.
    Validation(String),
    /// The search itself failed.
    Search(SearchError),
}

impl From<SearchError> for ApiError {
    fn from(err: SearchError) -> Self {
        ApiError::Search(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(message) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "message": message })),
            )
                .into_response(),
            ApiError::Search(SearchError::RateLimit) => (
                StatusCode::TOO_MANY_REQUESTS,
                Json(json!({
                    "message": "GitHub API rate limit exceeded. Please wait before the next \
                                request or provide a GitHub token and restart the server."
                })),
            )
                .into_response(),
            ApiError::Search(err) => {
                tracing::error!("search request failed: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "internal server error" })),
                )
                    .into_response()
            }
        }
    }
}

/// Builds the application router.
pub fn router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route("/api/v0/repos/popular", get(get_popular_repos))
        .route("/api/v0/repos/top10", get(get_top10_repos))
        .route("/api/v0/repos/top50", get(get_top50_repos))
        .route("/api/v0/repos/top100", get(get_top100_repos))
        .with_state(ctx)
}

/// Serves the API on `addr` until ctrl-c.
pub async fn serve(addr: SocketAddr, ctx: AppContext) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, router(Arc::new(ctx)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        tracing::error!("failed to install ctrl-c handler; shutting down only on process exit");
        std::future::pending::<()>().await;
    }
}

/// One page of repos, sorted descending by star count.
async fn get_popular_repos(
    State(ctx): State<Arc<AppContext>>,
    Query(params): Query<PopularReposQuery>,
) -> Result<Json<Vec<Repository>>, ApiError> {
    let page_id = match params.page_id {
        Some(page) if page < 1 => {
            return Err(ApiError::Validation(
                "page_id must be greater than or equal to 1".to_string(),
            ));
        }
        Some(page) => Some(page as u32),
        None => None,
    };

    let args = SearchArgs {
        created_from: params.created_from,
        language: params.language,
        page_id,
    };

    let outcome = ctx.repos_service.get_popular_repos(&args).await?;
    Ok(Json(outcome.into_repos()))
}

async fn get_top10_repos(
    State(ctx): State<Arc<AppContext>>,
    Query(params): Query<TopReposQuery>,
) -> Result<Json<Vec<Repository>>, ApiError> {
    get_top_k_repos(ctx, params, 10).await
}

async fn get_top50_repos(
    State(ctx): State<Arc<AppContext>>,
    Query(params): Query<TopReposQuery>,
) -> Result<Json<Vec<Repository>>, ApiError> {
    get_top_k_repos(ctx, params, 50).await
}

async fn get_top100_repos(
    State(ctx): State<Arc<AppContext>>,
    Query(params): Query<TopReposQuery>,
) -> Result<Json<Vec<Repository>>, ApiError> {
    get_top_k_repos(ctx, params, 100).await
}

async fn get_top_k_repos(
    ctx: Arc<AppContext>,
    params: TopReposQuery,
    k: usize,
) -> Result<Json<Vec<Repository>>, ApiError> {
    let args = SearchArgs::new(params.created_from, params.language);
    let outcome = ctx.repos_service.get_top_k_popular_repos(&args, k).await?;
    Ok(Json(outcome.into_repos()))
}
