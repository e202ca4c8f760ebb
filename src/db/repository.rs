use async_trait::async_trait;

use crate::db::models::ContentRecord;
use crate::error::AppError;

/// Repository trait for content lookups.
///
/// This trait allows mocking the database layer in tests.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Find the record whose `objectID` equals `object_id`.
    ///
    /// A missing record is `Ok(None)`; only genuine store failures are
    /// reported as [`AppError::ContentLookupFailed`].
    async fn find_one(&self, object_id: &str) -> Result<Option<ContentRecord>, AppError>;
}

/// MongoDB implementation of the ContentStore.
///
/// This is only available when the `ssr` feature is enabled (i.e., server-side).
#[cfg(feature = "ssr")]
pub struct MongoContentStore {
    collection: mongodb::Collection<ContentRecord>,
}

#[cfg(feature = "ssr")]
impl MongoContentStore {
    pub fn new(db: &mongodb::Database, collection: &str) -> Self {
        Self {
            collection: db.collection(collection),
        }
    }

    /// Connect using the loaded feed configuration.
    pub async fn from_config(config: &crate::config::FeedConfig) -> Result<Self, AppError> {
        let client = mongodb::Client::with_uri_str(&config.mongodb_uri)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        let db = client.database(&config.mongodb_database);

        Ok(Self::new(&db, &config.content_collection))
    }

    /// Create a record or replace an existing one (matched by `objectID`).
    pub async fn upsert(&self, record: &ContentRecord) -> Result<(), AppError> {
        use mongodb::bson::doc;
        use mongodb::options::ReplaceOptions;

        let filter = doc! { "objectID": &record.object_id };
        let options = ReplaceOptions::builder().upsert(true).build();

        self.collection
            .replace_one(filter, record)
            .with_options(options)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }
}

#[cfg(feature = "ssr")]
#[async_trait]
impl ContentStore for MongoContentStore {
    async fn find_one(&self, object_id: &str) -> Result<Option<ContentRecord>, AppError> {
        use mongodb::bson::doc;

        self.collection
            .find_one(doc! { "objectID": object_id })
            .await
            .map_err(|e| AppError::ContentLookupFailed(format!("'{object_id}': {e}")))
    }
}
