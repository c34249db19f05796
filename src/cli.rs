//! Command-line interface definitions for nikkei_watch.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! The webhook destination can be provided via flag or environment variable;
//! everything else has defaults matching the Nikkei technology section.

use clap::Parser;

/// Command-line arguments for the nikkei_watch application.
///
/// The parsed struct doubles as the run configuration handed to the
/// orchestrator: required fields are validated at parse time, so a missing
/// webhook destination fails immediately with a usage message instead of
/// surfacing mid-run inside the notify loop.
///
/// # Examples
///
/// ```sh
/// # Webhook from the environment
/// SLACK_WORKFLOW_URL=https://hooks.slack.com/... nikkei_watch
///
/// # Everything explicit
/// nikkei_watch --webhook-url https://hooks.slack.com/... \
///     --cache-file /var/lib/nikkei_watch/last_articles.txt
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Slack workflow webhook URL that receives one POST per new article
    #[arg(long, env = "SLACK_WORKFLOW_URL")]
    pub webhook_url: String,

    /// Listing page to watch for article links
    #[arg(long, default_value = "https://www.nikkei.com/technology/")]
    pub target_url: String,

    /// File holding the URLs already seen in previous runs, one per line
    #[arg(long, default_value = "last_articles.txt")]
    pub cache_file: String,

    /// Maximum number of links taken from the listing page per run
    #[arg(long, default_value_t = 15)]
    pub max_articles: usize,

    /// Maximum number of URLs retained in the cache file (oldest evicted first)
    #[arg(long, default_value_t = 1000)]
    pub cache_capacity: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(&[
            "nikkei_watch",
            "--webhook-url",
            "https://hooks.slack.com/triggers/T000/123",
        ]);

        assert_eq!(cli.webhook_url, "https://hooks.slack.com/triggers/T000/123");
        assert_eq!(cli.target_url, "https://www.nikkei.com/technology/");
        assert_eq!(cli.cache_file, "last_articles.txt");
        assert_eq!(cli.max_articles, 15);
        assert_eq!(cli.cache_capacity, 1000);
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from(&[
            "nikkei_watch",
            "--webhook-url",
            "https://example.com/hook",
            "--target-url",
            "https://www.nikkei.com/business/",
            "--cache-file",
            "/tmp/seen.txt",
            "--max-articles",
            "5",
            "--cache-capacity",
            "50",
        ]);

        assert_eq!(cli.target_url, "https://www.nikkei.com/business/");
        assert_eq!(cli.cache_file, "/tmp/seen.txt");
        assert_eq!(cli.max_articles, 5);
        assert_eq!(cli.cache_capacity, 50);
    }

    #[test]
    fn test_cli_requires_webhook() {
        // Only meaningful when the env fallback is absent.
        if std::env::var("SLACK_WORKFLOW_URL").is_err() {
            assert!(Cli::try_parse_from(&["nikkei_watch"]).is_err());
        }
    }
}
