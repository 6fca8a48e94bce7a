/*
[INPUT]:  Quotation payloads and quotation ids
[OUTPUT]: Priced quotations with stop ids for order placement
[POS]:    HTTP layer - quotation endpoints
[UPDATE]: When adding quotation endpoints or changing response format
*/

use crate::http::client::require_id;
use crate::http::{LalamoveClient, Result};
use crate::types::{HttpMethod, Quotation, QuotationPayload};

impl LalamoveClient {
    /// Request a price quote
    ///
    /// POST /v3/quotations
    pub async fn create_quotation(&self, payload: &QuotationPayload) -> Result<Quotation> {
        self.send_json(HttpMethod::Post, "/v3/quotations", payload)
            .await
    }

    /// Fetch a quotation by id
    ///
    /// GET /v3/quotations/{quotation_id}
    pub async fn get_quotation(&self, quotation_id: &str) -> Result<Quotation> {
        let path = format!("/v3/quotations/{}", require_id("quotation id", quotation_id)?);
        self.get_json(&path, None).await
    }
}
