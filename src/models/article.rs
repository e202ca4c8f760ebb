use serde::{Deserialize, Serialize};

use crate::db::models::ArticleSummary;

/// Title shown for items whose record carried no usable title.
pub const UNTITLED: &str = "Untitled";

/// Normalized view of a feed item, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: Option<String>,
    pub title: String,
    pub description: String,
    /// Always starts with `/`.
    pub path: String,
}

impl Article {
    /// Build the display view of a summary. Pure; never fails.
    pub fn make(summary: &ArticleSummary) -> Self {
        let title = summary
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(UNTITLED)
            .to_string();

        let description = summary
            .description
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string();

        Self {
            id: summary.id.clone(),
            title,
            description,
            path: normalize_path(summary.path.as_deref()),
        }
    }

    /// Whether the summary came from a record found in the content store.
    pub fn is_resolved(&self) -> bool {
        self.id.is_some()
    }
}

fn normalize_path(path: Option<&str>) -> String {
    match path.map(str::trim) {
        None | Some("") => "/".to_string(),
        Some(p) if p.starts_with('/') => p.to_string(),
        Some(p) => format!("/{p}"),
    }
}
