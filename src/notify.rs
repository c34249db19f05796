//! Webhook notification for newly seen articles.
//!
//! Each new article is POSTed individually to a Slack workflow webhook as
//! `{"title": ..., "url": ...}` — no batching, no envelope, matching the
//! workflow's expected input variables. Only the HTTP status of the response
//! is recorded; Slack workflows return no useful body.

use crate::models::Article;
use reqwest::{Client, StatusCode};
use std::error::Error;
use tracing::{debug, instrument};

/// Sends article notifications to a webhook URL.
pub struct Notifier {
    client: Client,
    webhook_url: String,
}

impl Notifier {
    /// Create a notifier that POSTs to `webhook_url` through `client`.
    pub fn new(client: Client, webhook_url: String) -> Self {
        Self {
            client,
            webhook_url,
        }
    }

    /// POST one article to the webhook.
    ///
    /// Returns the response status on any completed HTTP exchange, including
    /// non-2xx. Transport-level errors (DNS, connect, timeout) propagate so
    /// the caller can hold the article back for the next run.
    #[instrument(level = "info", skip_all, fields(url = %article.url))]
    pub async fn send(&self, article: &Article) -> Result<StatusCode, Box<dyn Error>> {
        let response = self
            .client
            .post(&self.webhook_url)
            .json(article)
            .send()
            .await?;

        let status = response.status();
        debug!(status = %status, "Webhook responded");
        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_send_transport_error_propagates() {
        // Reserved TEST-NET-1 address with a port nothing listens on; the
        // connect fails fast without touching the real network.
        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(500))
            .build()
            .unwrap();
        let notifier = Notifier::new(client, "http://192.0.2.1:9/hook".to_string());

        let article = Article {
            title: "A headline long enough to pass".to_string(),
            url: "https://www.nikkei.com/article/X/".to_string(),
        };

        assert!(notifier.send(&article).await.is_err());
    }
}
