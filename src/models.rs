//! Data models for extracted articles.
//!
//! This module defines the core data structure used throughout the
//! application:
//! - [`Article`]: one title+URL pair extracted from the listing page
//!
//! An `Article` serializes to exactly `{"title": ..., "url": ...}`, which is
//! also the webhook payload format, so the same struct travels from the
//! extractor straight to the notifier.

use serde::Serialize;

/// One article extracted from the listing page.
///
/// Created by the extractor per matching anchor element; immutable for the
/// rest of the run. The `url` is always absolute and acts as the article's
/// identity for deduplication and cache membership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Article {
    /// The article headline, whitespace-trimmed.
    pub title: String,
    /// The absolute article URL.
    pub url: String,
}
