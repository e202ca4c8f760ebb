pub mod state;

use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use crate::db::models::ArticleSummary;
use crate::db::repository::ContentStore;
use crate::error::AppError;
use crate::models::article::Article;
use crate::search::client::{SearchClient, SearchHit, SearchRequest, SortOrder};

pub use state::FeedState;
use state::StateCell;

/// Number of ranked hits resolved on each refresh.
pub const TOP_N: usize = 5;

/// The most recently modified content items, resolved into full records.
///
/// `refresh` is the only mutator. Overlapping refreshes are serialized: each
/// one runs a full cycle after the previous has settled.
pub struct ArticleFeed {
    search: Arc<dyn SearchClient>,
    store: Arc<dyn ContentStore>,
    section: Option<String>,
    state: StateCell,
    refresh_lock: tokio::sync::Mutex<()>,
    articles_cache: Mutex<Option<(u64, Arc<Vec<Article>>)>>,
}

impl ArticleFeed {
    pub fn new(
        search: Arc<dyn SearchClient>,
        store: Arc<dyn ContentStore>,
        section: Option<String>,
    ) -> Self {
        Self {
            search,
            store,
            section,
            state: StateCell::new(),
            refresh_lock: tokio::sync::Mutex::new(()),
            articles_cache: Mutex::new(None),
        }
    }

    /// Section the feed is scoped to, if any.
    pub fn section(&self) -> Option<&str> {
        self.section.as_deref()
    }

    /// Current summaries, in rank order.
    pub fn items(&self) -> Arc<Vec<ArticleSummary>> {
        self.state.snapshot().items
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn state(&self) -> FeedState {
        self.state.snapshot()
    }

    /// Watch whole-state changes (loading transitions and item replacements).
    pub fn subscribe(&self) -> tokio::sync::watch::Receiver<FeedState> {
        self.state.subscribe()
    }

    /// Display articles derived from the current items.
    ///
    /// Recomputed only when the items have been replaced since the last call.
    pub fn articles(&self) -> Arc<Vec<Article>> {
        let state = self.state.snapshot();
        let mut cache = self
            .articles_cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some((revision, articles)) = cache.as_ref() {
            if *revision == state.revision {
                return articles.clone();
            }
        }

        let articles: Arc<Vec<Article>> = Arc::new(state.items.iter().map(Article::make).collect());
        *cache = Some((state.revision, articles.clone()));
        articles
    }

    /// Fetch the latest items and replace the current ones.
    ///
    /// The loading flag is raised as soon as this is called, before the
    /// returned future is polled, and lowered once it settles (or is dropped).
    /// On error the previous items are left untouched.
    pub fn refresh(&self) -> impl Future<Output = Result<(), AppError>> + Send + '_ {
        let guard = self.state.begin_refresh();

        async move {
            let _guard = guard;
            let _serial = self.refresh_lock.lock().await;

            let items = self.fetch_items().await?;
            let count = items.len();
            self.state.replace_items(items);

            tracing::info!(
                section = self.section.as_deref().unwrap_or("*"),
                "Recent articles refreshed with {} item(s)",
                count
            );
            Ok(())
        }
    }

    async fn fetch_items(&self) -> Result<Vec<ArticleSummary>, AppError> {
        let request = SearchRequest::new("", SortOrder::MostRecentlyModified)
            .with_section(self.section.clone());

        let results = self.search.search(&request).await.map_err(|e| {
            tracing::warn!("Recent articles search failed: {e}");
            into_search_unavailable(e)
        })?;

        let hits = top_hits(results.hits);
        let mut items = Vec::with_capacity(hits.len());

        // One lookup at a time, in rank order.
        for hit in &hits {
            let record = self.store.find_one(&hit.object_id).await.map_err(|e| {
                tracing::warn!("Content lookup for '{}' failed: {e}", hit.object_id);
                into_lookup_failed(e)
            })?;

            if record.is_none() {
                tracing::debug!(
                    "No content record for hit '{}' (indexed as modified {:?})",
                    hit.object_id,
                    hit.modified()
                );
            }
            items.push(ArticleSummary::from_lookup(record));
        }

        Ok(items)
    }
}

/// Keep at most [`TOP_N`] hits, preserving rank order.
pub fn top_hits(mut hits: Vec<SearchHit>) -> Vec<SearchHit> {
    hits.truncate(TOP_N);
    hits
}

fn into_search_unavailable(err: AppError) -> AppError {
    match err {
        AppError::SearchUnavailable(_) => err,
        other => AppError::SearchUnavailable(other.to_string()),
    }
}

fn into_lookup_failed(err: AppError) -> AppError {
    match err {
        AppError::ContentLookupFailed(_) => err,
        other => AppError::ContentLookupFailed(other.to_string()),
    }
}

/// Build a feed wired to Meilisearch and MongoDB from configuration.
#[cfg(feature = "ssr")]
pub async fn create_feed(config: &crate::config::FeedConfig) -> Result<ArticleFeed, AppError> {
    use crate::db::repository::MongoContentStore;
    use crate::search::client::MeilisearchClient;

    let search = MeilisearchClient::from_config(config)?;
    let store = MongoContentStore::from_config(config).await?;

    tracing::info!(
        "Recent articles feed using index '{}' and collection '{}'",
        config.search_index,
        config.content_collection
    );

    Ok(ArticleFeed::new(
        Arc::new(search),
        Arc::new(store),
        config.section.clone(),
    ))
}
