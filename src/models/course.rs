use serde::{Deserialize, Serialize};
use sonic_rs::Value;

use super::record;

/// Fallback artwork per course category.
const NOVICE_IMAGE: &str =
    "https://img.freepik.com/free-vector/hand-drawn-flat-design-stock-market-concept_23-2149164676.jpg";
const INVESTOR_IMAGE: &str = "https://img.freepik.com/free-vector/investor-with-laptop-monitoring-growth-dividends-trader-sitting-stack-money-investing-capital-analyzing-profit-graphs-vector-illustration-finance-stock-trading-investment_74855-8432.jpg";
const TRADER_IMAGE: &str =
    "https://img.freepik.com/free-vector/stock-exchange-data-concept_23-2148590818.jpg";

/// A course as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Course {
    raw: Value,
}

impl Course {
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

    pub fn description(&self) -> &str {
        record::text_or_empty(&self.raw, "description")
    }

    /// Novice, Investor or Trader.
    pub fn category(&self) -> &str {
        record::text_or_empty(&self.raw, "category")
    }

    /// Duration in minutes.
    pub fn duration(&self) -> Option<u64> {
        record::unsigned(&self.raw, "duration")
    }

    /// The course level, falling back to the backend's `difficulty` field.
    pub fn level(&self) -> Option<&str> {
        record::text(&self.raw, "level").or_else(|| record::text(&self.raw, "difficulty"))
    }

    pub fn image_url(&self) -> Option<&str> {
        record::text(&self.raw, "imageUrl")
    }

    /// The course image, or the category's stock image when none is set.
    pub fn image_or_default(&self) -> &str {
        self.image_url().unwrap_or(match self.category() {
            "Investor" => INVESTOR_IMAGE,
            "Trader" => TRADER_IMAGE,
            _ => NOVICE_IMAGE,
        })
    }

    pub fn is_active(&self) -> Option<bool> {
        record::flag(&self.raw, "isActive")
    }
}

/// Payload for creating a course.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDraft {
    pub title: String,
    pub description: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}
