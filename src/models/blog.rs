use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sonic_rs::Value;

use super::record;

/// A blog post as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Blog {
    raw: Value,
}

impl Blog {
    pub fn from_value(raw: Value) -> Self {
        Self { raw }
    }

    pub fn as_value(&self) -> &Value {
        &self.raw
    }

    pub fn id(&self) -> Option<String> {
        record::id(&self.raw)
    }

    pub fn title(&self) -> &str {
        record::text_or_empty(&self.raw, "title")
    }

    pub fn content(&self) -> &str {
        record::text_or_empty(&self.raw, "content")
    }

    pub fn author(&self) -> &str {
        record::text(&self.raw, "author").unwrap_or("StockScope Team")
    }

    pub fn category(&self) -> &str {
        record::text_or_empty(&self.raw, "category")
    }

    pub fn summary(&self) -> Option<&str> {
        record::text(&self.raw, "summary")
    }

    /// Reading time in minutes.
    pub fn read_time(&self) -> Option<u64> {
        record::unsigned(&self.raw, "readTime")
    }

    pub fn image_url(&self) -> Option<&str> {
        record::text(&self.raw, "imageUrl")
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        record::timestamp(&self.raw, "createdAt")
    }

    /// The content split into non-blank paragraphs.
    pub fn paragraphs(&self) -> impl Iterator<Item = &str> {
        self.content().split('\n').filter(|p| !p.trim().is_empty())
    }
}

/// Payload for creating a blog post.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogDraft {
    pub title: String,
    pub content: String,
    pub category: String,
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_time: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_published: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paragraphs_skip_blank_lines() {
        let blog: Blog = sonic_rs::from_str(
            r#"{"id":"b1","title":"T","content":"First.\n\n  \nSecond.","createdAt":"2024-05-02T08:00:00.123"}"#,
        )
        .unwrap();
        assert_eq!(blog.paragraphs().collect::<Vec<_>>(), vec!["First.", "Second."]);
        assert_eq!(blog.author(), "StockScope Team");
        assert!(blog.created_at().is_some());
    }
}
