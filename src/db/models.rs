use serde::{Deserialize, Serialize};

/// Represents a content item stored in MongoDB.
///
/// Records share their `objectID` with the search index so a search hit can
/// be resolved into the full record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRecord {
    /// Store-level identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Identifier shared with the search index.
    #[serde(rename = "objectID")]
    pub object_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Routing path of the item (e.g. `/guides/getting-started`).
    #[serde(rename = "_path", default)]
    pub path: Option<String>,
    #[serde(default)]
    pub section: Option<String>,
}

/// The four-field projection of a content record used as the feed's item
/// shape.
///
/// Every field is optional: a hit whose record cannot be found is still
/// represented, with all fields absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleSummary {
    pub id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub path: Option<String>,
}

impl ArticleSummary {
    /// Project a lookup result. `None` yields the all-absent summary.
    pub fn from_lookup(record: Option<ContentRecord>) -> Self {
        record.map(Self::from).unwrap_or_default()
    }
}

impl From<ContentRecord> for ArticleSummary {
    fn from(record: ContentRecord) -> Self {
        Self {
            id: Some(record.id),
            title: record.title,
            description: record.description,
            path: record.path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ContentRecord {
        ContentRecord {
            id: "64f0c2".to_string(),
            object_id: "getting-started".to_string(),
            title: Some("Getting Started".to_string()),
            description: Some("First steps".to_string()),
            path: Some("/guides/getting-started".to_string()),
            section: Some("guides".to_string()),
        }
    }

    #[test]
    fn test_projection_keeps_exactly_four_fields() {
        let summary = ArticleSummary::from(record());
        assert_eq!(
            summary,
            ArticleSummary {
                id: Some("64f0c2".to_string()),
                title: Some("Getting Started".to_string()),
                description: Some("First steps".to_string()),
                path: Some("/guides/getting-started".to_string()),
            }
        );

        let json = serde_json::to_value(&summary).unwrap();
        let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
        assert_eq!(keys.len(), 4);
    }

    #[test]
    fn test_missing_record_projects_to_empty_summary() {
        let summary = ArticleSummary::from_lookup(None);
        assert_eq!(summary, ArticleSummary::default());
        assert!(summary.id.is_none());
        assert!(summary.title.is_none());
        assert!(summary.description.is_none());
        assert!(summary.path.is_none());
    }

    #[test]
    fn test_record_deserializes_store_field_names() {
        let json = r###"{
            "_id": "abc",
            "objectID": "docs-intro",
            "title": "Intro",
            "_path": "/docs/intro"
        }"###;

        let record: ContentRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, "abc");
        assert_eq!(record.object_id, "docs-intro");
        assert_eq!(record.description, None);
        assert_eq!(record.path.as_deref(), Some("/docs/intro"));
        assert_eq!(record.section, None);
    }
}
