use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single market news article.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticle {
    pub headline: String,
    pub summary: String,
    /// URL of the article image, when the provider supplies one.
    pub image: Option<String>,
    pub source: Option<String>,
    pub url: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}
