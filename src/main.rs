//! # Nikkei Watch
//!
//! A single-pass watcher that fetches the Nikkei technology listing page,
//! extracts article links, diffs them against the URLs seen in previous runs,
//! and forwards each unseen article to a Slack workflow webhook.
//!
//! ## Usage
//!
//! ```sh
//! SLACK_WORKFLOW_URL=https://hooks.slack.com/... nikkei_watch
//! ```
//!
//! ## Architecture
//!
//! One run is a linear pipeline:
//! 1. **Fetch & extract**: download the listing page, pull out article links
//! 2. **Diff**: drop every URL already present in the cache file
//! 3. **Notify**: POST each remaining article to the webhook, one at a time
//! 4. **Persist**: absorb the run's URLs into the cache and rewrite it
//!
//! A send failure for one article never aborts the rest of the run; the
//! failed article's URL is held out of the cache so the next run retries it.
//! Scheduling is external — run it from cron or a systemd timer.

use clap::Parser;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use std::collections::HashSet;
use std::error::Error;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod cache;
mod cli;
mod models;
mod notify;
mod scrapers;

use cache::UrlCache;
use cli::Cli;
use notify::Notifier;

/// Network timeout for both the listing fetch and webhook POSTs.
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("nikkei_watch starting up");

    // Parse CLI; a missing webhook URL fails here, not mid-run.
    let args = Cli::parse();
    debug!(?args.target_url, ?args.cache_file, max_articles = args.max_articles, "Parsed CLI arguments");

    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static("Mozilla/5.0"));
    let client = reqwest::Client::builder()
        .default_headers(headers)
        .timeout(HTTP_TIMEOUT)
        .build()?;

    // ---- Fetch & extract ----
    let articles =
        scrapers::nikkei::index_articles(&client, &args.target_url, args.max_articles).await?;
    if articles.is_empty() {
        // Also what a site layout change looks like once the selector stops
        // matching.
        warn!(target_url = %args.target_url, "Listing page yielded no article links");
    }

    // ---- Diff against the cache ----
    let mut cache = UrlCache::load(&args.cache_file, args.cache_capacity).await?;
    let new_articles: Vec<_> = articles
        .iter()
        .filter(|article| !cache.contains(&article.url))
        .collect();
    info!(
        extracted = articles.len(),
        cached = cache.len(),
        new = new_articles.len(),
        "Computed new articles"
    );

    // ---- Notify ----
    let mut failed_urls: HashSet<&str> = HashSet::new();
    if new_articles.is_empty() {
        println!("No new articles");
    } else {
        let notifier = Notifier::new(client, args.webhook_url.clone());
        let mut sent = 0usize;

        for article in &new_articles {
            match notifier.send(article).await {
                Ok(status) => {
                    println!("Sent: {} - Status: {}", article.title, status.as_u16());
                    if !status.is_success() {
                        warn!(url = %article.url, status = %status, "Webhook rejected payload");
                    }
                    sent += 1;
                }
                Err(e) => {
                    error!(url = %article.url, error = %e, "Webhook send failed; will retry next run");
                    failed_urls.insert(&article.url);
                }
            }
        }

        println!("Sent {} new articles", sent);
    }

    // ---- Persist ----
    // Every extracted URL enters the cache except the ones whose send failed
    // at the transport level; those stay out so the next run picks them up.
    for article in &articles {
        if !failed_urls.contains(article.url.as_str()) {
            cache.insert(article.url.clone());
        }
    }
    cache.save(&args.cache_file).await?;

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
