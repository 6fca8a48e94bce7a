/*
[INPUT]:  Callback URL for order and driver events
[OUTPUT]: Registered webhook
[POS]:    HTTP layer - webhook registration
[UPDATE]: When webhook endpoint changes
*/

use url::Url;

use crate::http::{LalamoveClient, LalamoveError, Result};
use crate::types::{HttpMethod, Webhook, WebhookRequest};

impl LalamoveClient {
    /// PATCH /v3/webhook
    pub async fn set_webhook(&self, url: &str) -> Result<Webhook> {
        let parsed = Url::parse(url.trim())?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(LalamoveError::InvalidInput(format!(
                "webhook url must be http(s): {url}"
            )));
        }
        let request = WebhookRequest {
            url: url.trim().to_string(),
        };
        self.send_json(HttpMethod::Patch, "/v3/webhook", &request).await
    }
}
