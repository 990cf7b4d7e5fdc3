//! Send API client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, Url};
use tracing::{debug, warn};

use hooksmith_core::{OutboundSender, OutgoingResponse, SendError, SendResult};

/// Delivers responses to the platform's send API over HTTPS.
///
/// Each response is one `POST <url>?access_token=<page_token>` with the JSON
/// body; there are no retries.
#[derive(Debug, Clone)]
pub struct GraphApiSender {
    client: Client,
    endpoint: Url,
}

impl GraphApiSender {
    /// Creates a sender for `url` authenticated with `page_token`.
    pub fn new(url: &str, page_token: &str, timeout: Duration) -> SendResult<Self> {
        if page_token.is_empty() {
            return Err(SendError::NotConfigured("page token is empty".into()));
        }

        let endpoint = Url::parse_with_params(url, &[("access_token", page_token)])
            .map_err(|e| SendError::NotConfigured(format!("invalid send API url '{url}': {e}")))?;

        let client = ClientBuilder::new()
            .timeout(timeout)
            .build()
            .map_err(|e| SendError::Http(e.to_string()))?;

        Ok(Self { client, endpoint })
    }

    /// The URL responses are posted to, including the access token.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl OutboundSender for GraphApiSender {
    async fn send(&self, response: &OutgoingResponse) -> SendResult<()> {
        debug!(recipient = %response.recipient.id, "Posting to send API");

        let resp = self
            .client
            .post(self.endpoint.clone())
            .json(response)
            .send()
            .await
            .map_err(|e| SendError::Http(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Send API rejected response");
            return Err(SendError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "graph_api"
    }
}
