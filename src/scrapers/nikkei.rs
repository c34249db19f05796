//! Nikkei listing-page scraper.
//!
//! Scrapes a Nikkei section page (e.g. <https://www.nikkei.com/technology/>)
//! and extracts article links. Article pages on the site all carry
//! `/article/` in their path, so the extractor selects anchors whose `href`
//! contains that substring rather than relying on class names, which the site
//! churns more often.
//!
//! # URL Pattern
//!
//! Listing pages link articles with relative hrefs like
//! `/article/DGXZQOUC1234X/`, which are resolved against the page origin to
//! absolute URLs.

use crate::models::Article;
use reqwest::Client;
use scraper::{Html, Selector};
use std::collections::HashSet;
use std::error::Error;
use tracing::{debug, info, instrument};
use url::Url;

/// Minimum title length (in characters, after trimming) for an anchor to
/// count as an article. Shorter texts are section labels or icons.
const MIN_TITLE_CHARS: usize = 10;

/// Fetch the listing page and extract article links from it.
///
/// Issues one GET against `target_url` through the shared `client` (which
/// carries the `User-Agent` header) and runs [`extract_articles`] over the
/// body. The body is used whatever the HTTP status: a non-2xx response just
/// yields HTML with no matching anchors, which surfaces downstream as an
/// empty extraction, the same way a site redesign would.
///
/// # Returns
///
/// An ordered, deduplicated vector of at most `max_articles` articles, or an
/// error if the page could not be fetched at all.
#[instrument(level = "info", skip(client))]
pub async fn index_articles(
    client: &Client,
    target_url: &str,
    max_articles: usize,
) -> Result<Vec<Article>, Box<dyn Error>> {
    let base_url = Url::parse(target_url)?;

    let html = client.get(target_url).send().await?.text().await?;
    debug!(bytes = html.len(), "Fetched listing page");

    let articles = extract_articles(&html, &base_url, max_articles);
    info!(
        count = articles.len(),
        source = target_url,
        "Indexed article links"
    );
    debug!(articles = ?articles, "Extracted articles");

    Ok(articles)
}

/// Extract article links from listing-page HTML.
///
/// Selects anchors matching `a[href*='/article/']` in document order, keeps
/// at most the first `max_articles` of them, then filters and normalizes:
///
/// - title = trimmed visible text, must be longer than [`MIN_TITLE_CHARS`]
/// - href must be non-empty; relative hrefs are resolved against `base_url`
/// - duplicate URLs keep their first occurrence, order preserved
///
/// Zero matches is an empty vector, not an error; the lenient parser never
/// fails on malformed markup.
fn extract_articles(html: &str, base_url: &Url, max_articles: usize) -> Vec<Article> {
    let document = Html::parse_document(html);
    let article_selector = Selector::parse("a[href*='/article/']").unwrap();

    let mut seen = HashSet::new();
    let mut articles = Vec::new();

    for element in document.select(&article_selector).take(max_articles) {
        let title = element.text().collect::<Vec<_>>().join("").trim().to_string();
        let href = element.value().attr("href").unwrap_or("");

        if title.chars().count() <= MIN_TITLE_CHARS || href.is_empty() {
            continue;
        }

        let url = if href.starts_with("http") {
            href.to_string()
        } else {
            match base_url.join(href) {
                Ok(resolved) => resolved.to_string(),
                Err(_) => continue,
            }
        };

        if seen.insert(url.clone()) {
            articles.push(Article { title, url });
        }
    }

    articles
}
