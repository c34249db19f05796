//! Listing-page scrapers for discovering newly published articles.
//!
//! Each scraper follows the same pattern: fetch one listing page, extract
//! the anchors that look like article links, and return an ordered,
//! deduplicated list of [`Article`](crate::models::Article) values. The
//! selector and normalization rules live entirely inside the scraper module,
//! so a site layout change only ever touches one file.
//!
//! # Supported Sources
//!
//! | Source | Module | Notes |
//! |--------|--------|-------|
//! | Nikkei | [`nikkei`] | Section listing pages, e.g. `/technology/` |
//!
//! Extraction itself is a pure function over the fetched HTML, which keeps it
//! unit-testable without any network access.

pub mod nikkei;
