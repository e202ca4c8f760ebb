use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::error::AppError;
use crate::feed::TOP_N;

/// Prefix of the environment variables overriding file settings.
pub const ENV_PREFIX: &str = "RECENT_ARTICLES";

/// Connection and scoping settings for the recent articles feed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FeedConfig {
    pub meilisearch_url: String,
    #[serde(default)]
    pub meilisearch_api_key: Option<String>,
    /// Index holding the ranked documents.
    pub search_index: String,
    /// Maximum hits requested from the index per query.
    pub search_limit: usize,
    pub mongodb_uri: String,
    pub mongodb_database: String,
    /// Collection holding the full content records.
    pub content_collection: String,
    /// Restrict the feed to one section.
    #[serde(default)]
    pub section: Option<String>,
}

impl FeedConfig {
    /// Load settings from defaults, an optional TOML file and the environment.
    ///
    /// When `path` is `None`, `recent-articles.toml` in the working directory
    /// is read if it exists. Environment variables use the `RECENT_ARTICLES_`
    /// prefix, e.g. `RECENT_ARTICLES_MONGODB_URI`.
    pub fn load(path: Option<PathBuf>) -> Result<Self, AppError> {
        let mut builder = Config::builder()
            .set_default("meilisearch_url", "http://localhost:7700")
            .and_then(|b| b.set_default("search_index", "documents"))
            .and_then(|b| b.set_default("search_limit", 20))
            .and_then(|b| b.set_default("mongodb_uri", "mongodb://localhost:27017"))
            .and_then(|b| b.set_default("mongodb_database", "content"))
            .and_then(|b| b.set_default("content_collection", "articles"))
            .map_err(config_error)?;

        builder = match path {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder.add_source(File::with_name("recent-articles").required(false)),
        };

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: FeedConfig = builder
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(config_error)?;

        config.validate()?;
        Ok(config)
    }

    /// Reject settings no backend could work with.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.meilisearch_url.trim().is_empty() {
            return Err(AppError::Config("meilisearch_url cannot be empty".into()));
        }
        if self.mongodb_uri.trim().is_empty() {
            return Err(AppError::Config("mongodb_uri cannot be empty".into()));
        }
        if self.search_index.trim().is_empty() || self.content_collection.trim().is_empty() {
            return Err(AppError::Config(
                "search_index and content_collection must be set".into(),
            ));
        }
        if self.search_limit < TOP_N {
            return Err(AppError::Config(format!(
                "search_limit must be at least {TOP_N}, got {}",
                self.search_limit
            )));
        }
        Ok(())
    }
}

fn config_error(err: ConfigError) -> AppError {
    AppError::Config(err.to_string())
}
