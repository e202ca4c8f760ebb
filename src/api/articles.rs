use serde::{Deserialize, Serialize};

use crate::feed::ArticleFeed;
use crate::models::article::Article;

/// What consumers see of the feed at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedSnapshot {
    pub articles: Vec<Article>,
    pub loading: bool,
}

impl FeedSnapshot {
    pub fn from_feed(feed: &ArticleFeed) -> Self {
        Self {
            articles: feed.articles().to_vec(),
            loading: feed.is_loading(),
        }
    }
}

/// Axum handler for `GET /api/v1/articles/recent`.
///
/// Returns the current articles without touching the backends.
#[cfg(feature = "ssr")]
pub async fn recent_articles_handler(
    axum::extract::State(state): axum::extract::State<crate::app::AppState>,
) -> axum::Json<FeedSnapshot> {
    axum::Json(FeedSnapshot::from_feed(&state.feed))
}

/// Axum handler for `POST /api/v1/articles/recent/refresh`.
///
/// Runs a full refresh and returns the resulting articles. On failure the
/// previous articles stay in place and the error is returned.
#[cfg(feature = "ssr")]
pub async fn refresh_handler(
    axum::extract::State(state): axum::extract::State<crate::app::AppState>,
) -> Result<axum::Json<FeedSnapshot>, crate::error::AppError> {
    state.feed.refresh().await?;
    Ok(axum::Json(FeedSnapshot::from_feed(&state.feed)))
}

/// API routes of the feed.
#[cfg(feature = "ssr")]
pub fn routes() -> axum::Router<crate::app::AppState> {
    use axum::routing::{get, post};

    axum::Router::new()
        .route("/api/v1/articles/recent", get(recent_articles_handler))
        .route("/api/v1/articles/recent/refresh", post(refresh_handler))
}
