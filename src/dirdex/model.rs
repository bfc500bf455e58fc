//! # Domain Model
//!
//! Core data types shared by every layer: the [`Directory`] record as the
//! remote catalog serves it, the [`FilterSpec`] a caller builds from CLI
//! flags, and the small enums ([`SortKey`], [`ExportFormat`]) that name the
//! supported sort orders and export targets.
//!
//! These are plain data. All behavior (filtering, sorting, caching) lives
//! in `filter.rs` and `cache.rs` so the model can be serialized, compared
//! and constructed in tests without dragging in I/O.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One catalog entry, mirroring the remote API's JSON shape.
///
/// A `domain_rating` of `0` means "unknown" — the remote omits ratings it
/// has not measured, and filters must not treat that as a real score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Directory {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub pricing: String,
    #[serde(default)]
    pub link_type: String,
    #[serde(default)]
    pub domain_rating: u32,
    #[serde(default)]
    pub organic_traffic: u64,
    #[serde(default)]
    pub organic_keywords: u64,
    #[serde(default)]
    pub helpful_count: u32,
    #[serde(default)]
    pub view_count: u64,
    #[serde(default)]
    pub submission_url: String,
    #[serde(default)]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Sort orders for listing commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Descending by helpful votes (zero-vote entries sink to the bottom).
    #[default]
    Helpful,
    /// Descending by domain rating, unknown (zero) ratings last.
    Rating,
    /// Descending by creation timestamp.
    Newest,
    /// Ascending by name, case-insensitive.
    Alpha,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "helpful" => Ok(SortKey::Helpful),
            "dr" | "rating" => Ok(SortKey::Rating),
            "newest" => Ok(SortKey::Newest),
            "alpha" => Ok(SortKey::Alpha),
            other => Err(format!(
                "invalid sort key '{}' (use helpful, dr, newest or alpha)",
                other
            )),
        }
    }
}

/// Export file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
    Markdown,
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            other => Err(format!(
                "unsupported format '{}' (use csv, json or markdown)",
                other
            )),
        }
    }
}

/// User-requested constraints over the directory collection.
///
/// Every field is optional in the "no constraint" sense: an empty vec or a
/// `None` bound matches everything, it never matches nothing. A `limit` of
/// zero disables pagination entirely.
#[derive(Debug, Clone, Default)]
pub struct FilterSpec {
    /// Case-insensitive substring match against name or description.
    pub query: Option<String>,
    /// OR-membership over the record's category labels.
    pub categories: Vec<String>,
    /// OR-membership over the record's pricing label.
    pub pricing: Vec<String>,
    /// OR-membership over the record's link-relationship label.
    pub link_types: Vec<String>,
    /// Inclusive lower bound on domain rating; unknown ratings are exempt.
    pub dr_min: Option<u32>,
    /// Inclusive upper bound on domain rating; unknown ratings are exempt.
    pub dr_max: Option<u32>,
    pub sort: SortKey,
    pub limit: usize,
    pub offset: usize,
}

impl FilterSpec {
    /// True when no narrowing criteria are set (sort and pagination do not
    /// count — they reorder and slice, they never exclude by content).
    pub fn is_unconstrained(&self) -> bool {
        self.query.is_none()
            && self.categories.is_empty()
            && self.pricing.is_empty()
            && self.link_types.is_empty()
            && self.dr_min.is_none()
            && self.dr_max.is_none()
    }
}
