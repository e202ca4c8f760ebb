#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use testcontainers::runners::AsyncRunner;
use testcontainers::ContainerAsync;
use testcontainers_modules::meilisearch::Meilisearch;
use testcontainers_modules::mongo::Mongo;

use recent_articles::app::AppState;
use recent_articles::db::models::ContentRecord;
use recent_articles::db::repository::{ContentStore, MongoContentStore};
use recent_articles::error::AppError;
use recent_articles::feed::ArticleFeed;
use recent_articles::search::client::{
    MeilisearchClient, SearchClient, SearchDocument, SearchHit, SearchRequest, SearchResults,
};

/// Build a content record whose fields are derived from its object id.
pub fn record(object_id: &str) -> ContentRecord {
    ContentRecord {
        id: format!("id-{object_id}"),
        object_id: object_id.to_string(),
        title: Some(format!("Title {object_id}")),
        description: Some(format!("About {object_id}")),
        path: Some(format!("/docs/{object_id}")),
        section: None,
    }
}

// -- In-memory backends --

/// Search backend returning a fixed ranking, or failing on demand.
pub struct InMemorySearch {
    hits: Mutex<Vec<SearchHit>>,
    available: Mutex<bool>,
}

impl InMemorySearch {
    pub fn with_ids(ids: &[&str]) -> Self {
        Self {
            hits: Mutex::new(ids.iter().map(|id| SearchHit::new(*id)).collect()),
            available: Mutex::new(true),
        }
    }

    pub fn set_available(&self, available: bool) {
        *self.available.lock().unwrap() = available;
    }
}

#[async_trait]
impl SearchClient for InMemorySearch {
    async fn search(&self, _request: &SearchRequest) -> Result<SearchResults, AppError> {
        if !*self.available.lock().unwrap() {
            return Err(AppError::SearchUnavailable("search index offline".into()));
        }
        Ok(SearchResults {
            hits: self.hits.lock().unwrap().clone(),
        })
    }
}

/// Content store backed by a map, optionally failing for one id.
pub struct InMemoryStore {
    records: Mutex<HashMap<String, ContentRecord>>,
    failing: Mutex<Option<String>>,
}

impl InMemoryStore {
    pub fn with_ids(ids: &[&str]) -> Self {
        Self {
            records: Mutex::new(ids.iter().map(|id| (id.to_string(), record(id))).collect()),
            failing: Mutex::new(None),
        }
    }

    pub fn fail_on(&self, object_id: &str) {
        *self.failing.lock().unwrap() = Some(object_id.to_string());
    }
}

#[async_trait]
impl ContentStore for InMemoryStore {
    async fn find_one(&self, object_id: &str) -> Result<Option<ContentRecord>, AppError> {
        if self.failing.lock().unwrap().as_deref() == Some(object_id) {
            return Err(AppError::ContentLookupFailed(format!("'{object_id}': store offline")));
        }
        Ok(self.records.lock().unwrap().get(object_id).cloned())
    }
}

/// Build an `axum_test::TestServer` serving the feed API for the given feed.
pub fn server(feed: Arc<ArticleFeed>) -> axum_test::TestServer {
    let leptos_options = leptos::prelude::LeptosOptions::builder()
        .output_name("recent-articles")
        .build();

    let app_state = AppState {
        feed,
        leptos_options,
    };

    let router = recent_articles::api::articles::routes().with_state(app_state);

    axum_test::TestServer::builder()
        .build(router)
}

// -- Containers --

/// Holds running MongoDB and Meilisearch containers for end-to-end tests.
///
/// Containers are kept alive for as long as this struct lives. When dropped,
/// containers are stopped and cleaned up automatically.
pub struct ContainerEnv {
    _mongo: ContainerAsync<Mongo>,
    _meili: ContainerAsync<Meilisearch>,
    pub search: Arc<MeilisearchClient>,
    pub store: Arc<MongoContentStore>,
}

impl ContainerEnv {
    /// Spin up both containers and connect real backends to them.
    pub async fn start() -> Self {
        let (mongo_container, meili_container) =
            tokio::join!(Mongo::default().start(), Meilisearch::default().start());
        let mongo_container = mongo_container.expect("Failed to start MongoDB container");
        let meili_container = meili_container.expect("Failed to start Meilisearch container");

        // --- MongoDB ---
        let mongo_port = mongo_container
            .get_host_port_ipv4(27017)
            .await
            .expect("Failed to get MongoDB port");
        let mongo_uri = format!("mongodb://127.0.0.1:{}", mongo_port);
        let mongo_client = mongodb::Client::with_uri_str(&mongo_uri)
            .await
            .expect("Failed to connect to MongoDB");
        let store = Arc::new(MongoContentStore::new(
            &mongo_client.database("recent_articles_test"),
            "articles",
        ));

        // --- Meilisearch ---
        let meili_port = meili_container
            .get_host_port_ipv4(7700)
            .await
            .expect("Failed to get Meilisearch port");
        let meili_url = format!("http://127.0.0.1:{}", meili_port);
        let search = MeilisearchClient::new(&meili_url, None, "documents", 20)
            .expect("Failed to create MeilisearchClient");
        search
            .configure_index()
            .await
            .expect("Failed to configure Meilisearch index");

        Self {
            _mongo: mongo_container,
            _meili: meili_container,
            search: Arc::new(search),
            store,
        }
    }

    /// Index a document and, unless `indexed_only`, store its full record.
    pub async fn seed(
        &self,
        object_id: &str,
        modified_at: i64,
        section: Option<&str>,
        indexed_only: bool,
    ) {
        let modified = chrono::DateTime::<chrono::Utc>::from_timestamp(modified_at, 0)
            .expect("Invalid timestamp");
        let doc = SearchDocument::new(
            object_id,
            format!("Title {object_id}"),
            section.map(str::to_string),
            modified,
        );
        self.search
            .index_document(&doc)
            .await
            .expect("Failed to index document");

        if !indexed_only {
            let mut record = record(object_id);
            record.section = section.map(str::to_string);
            self.store
                .upsert(&record)
                .await
                .expect("Failed to store record");
        }
    }

    /// Wait for Meilisearch to process pending tasks (async indexing).
    pub async fn wait_for_search_indexing(&self) {
        // Meilisearch processes tasks asynchronously. A short delay is the
        // simplest reliable approach for integration tests.
        tokio::time::sleep(std::time::Duration::from_secs(2)).await;
    }

    pub fn feed(&self, section: Option<&str>) -> ArticleFeed {
        ArticleFeed::new(
            self.search.clone(),
            self.store.clone(),
            section.map(str::to_string),
        )
    }
}
