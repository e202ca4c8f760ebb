use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Ranking strategies the search index can apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortOrder {
    /// Engine relevance ranking, no explicit sort.
    #[default]
    Relevance,
    /// Most recently modified first.
    MostRecentlyModified,
    /// Alphabetical by title.
    Title,
}

impl SortOrder {
    /// The sort expression understood by the index, if any.
    pub fn sort_expression(&self) -> Option<&'static str> {
        match self {
            SortOrder::Relevance => None,
            SortOrder::MostRecentlyModified => Some("modified_at:desc"),
            SortOrder::Title => Some("title:asc"),
        }
    }
}

/// A document representation optimized for the search index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchDocument {
    /// Primary key, shared with the content store record.
    #[serde(rename = "objectID")]
    pub object_id: String,
    /// Human-readable title.
    pub title: String,
    /// Optional section the document belongs to (filterable).
    #[serde(default)]
    pub section: Option<String>,
    /// Last modification as Unix timestamp (seconds).
    pub modified_at: i64,
}

impl SearchDocument {
    pub fn new(
        object_id: impl Into<String>,
        title: impl Into<String>,
        section: Option<String>,
        modified: DateTime<Utc>,
    ) -> Self {
        Self {
            object_id: object_id.into(),
            title: title.into(),
            section,
            modified_at: modified.timestamp(),
        }
    }
}

/// A ranked result entry returned by the search backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(rename = "objectID")]
    pub object_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub modified_at: Option<i64>,
}

impl SearchHit {
    pub fn new(object_id: impl Into<String>) -> Self {
        Self {
            object_id: object_id.into(),
            title: None,
            modified_at: None,
        }
    }

    /// Modification time reported by the index, if any.
    pub fn modified(&self) -> Option<DateTime<Utc>> {
        self.modified_at
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
    }
}

/// Ordered hits of one search call, best ranked first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResults {
    pub hits: Vec<SearchHit>,
}

/// Parameters of a single ranked query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub sort: SortOrder,
    /// Restrict hits to one section. `None` searches everything.
    pub section: Option<String>,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>, sort: SortOrder) -> Self {
        Self {
            query: query.into(),
            sort,
            section: None,
        }
    }

    pub fn with_section(mut self, section: Option<String>) -> Self {
        self.section = section;
        self
    }
}

/// Trait for search operations, enabling mock testing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SearchClient: Send + Sync {
    /// Run a ranked query and return the hits in rank order.
    ///
    /// Fails with [`AppError::SearchUnavailable`] when the backend cannot
    /// answer.
    async fn search(&self, request: &SearchRequest) -> Result<SearchResults, AppError>;
}

/// Build the filter expression restricting hits to one section.
pub fn section_filter(section: &str) -> String {
    let escaped = section.replace('\\', "\\\\").replace('"', "\\\"");
    format!("section = \"{escaped}\"")
}

/// Meilisearch implementation of the SearchClient.
#[cfg(feature = "ssr")]
pub struct MeilisearchClient {
    client: meilisearch_sdk::client::Client,
    index_name: String,
    limit: usize,
}

#[cfg(feature = "ssr")]
impl MeilisearchClient {
    /// Create a client for the given server and index.
    pub fn new(
        url: &str,
        api_key: Option<String>,
        index_name: impl Into<String>,
        limit: usize,
    ) -> Result<Self, AppError> {
        let client = meilisearch_sdk::client::Client::new(url, api_key).map_err(|e| {
            AppError::Config(format!("Failed to create Meilisearch client: {e}"))
        })?;

        Ok(Self {
            client,
            index_name: index_name.into(),
            limit,
        })
    }

    /// Create a client from the loaded feed configuration.
    pub fn from_config(config: &crate::config::FeedConfig) -> Result<Self, AppError> {
        Self::new(
            &config.meilisearch_url,
            config.meilisearch_api_key.clone(),
            config.search_index.clone(),
            config.search_limit,
        )
    }

    fn index(&self) -> meilisearch_sdk::indexes::Index {
        self.client.index(&self.index_name)
    }

    /// Add or update a document in the search index.
    pub async fn index_document(&self, doc: &SearchDocument) -> Result<(), AppError> {
        let _task: meilisearch_sdk::task_info::TaskInfo = self
            .index()
            .add_documents(&[doc], Some("objectID"))
            .await
            .map_err(|e| AppError::SearchUnavailable(format!("Meilisearch index error: {e}")))?;

        Ok(())
    }

    /// Configure the search index (sortable/filterable attributes).
    /// Should be called once before the index is queried.
    pub async fn configure_index(&self) -> Result<(), AppError> {
        let index = self.index();

        let _: meilisearch_sdk::task_info::TaskInfo = index
            .set_sortable_attributes(["modified_at", "title"])
            .await
            .map_err(|e| AppError::SearchUnavailable(format!("Meilisearch config error: {e}")))?;

        let _: meilisearch_sdk::task_info::TaskInfo = index
            .set_filterable_attributes(["section"])
            .await
            .map_err(|e| AppError::SearchUnavailable(format!("Meilisearch config error: {e}")))?;

        Ok(())
    }
}

#[cfg(feature = "ssr")]
#[async_trait]
impl SearchClient for MeilisearchClient {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResults, AppError> {
        let sort: Vec<&str> = request.sort.sort_expression().into_iter().collect();
        let filter = request.section.as_deref().map(section_filter);

        let index = self.index();
        let mut query = index.search();
        query
            .with_query(&request.query)
            .with_limit(self.limit.max(crate::feed::TOP_N));
        if !sort.is_empty() {
            query.with_sort(&sort);
        }
        if let Some(filter) = &filter {
            query.with_filter(filter);
        }

        // Only `objectID` is required; documents missing ranking fields still count.
        let results: meilisearch_sdk::search::SearchResults<SearchHit> = query
            .execute()
            .await
            .map_err(|e| AppError::SearchUnavailable(format!("Meilisearch search error: {e}")))?;

        let hits = results
            .hits
            .into_iter()
            .map(|hit| hit.result)
            .collect();

        Ok(SearchResults { hits })
    }
}
