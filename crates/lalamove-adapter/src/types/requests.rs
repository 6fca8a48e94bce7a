/*
[INPUT]:  Caller-supplied stops, contacts, items and options
[OUTPUT]: Validated request payloads ready for JSON serialization
[POS]:    Data layer - request payloads and their builders
[UPDATE]: When API schema changes or presence rules change
*/

use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::DriverCancelReason;
use super::models::{Contact, Item, Metadata, Recipient, Stop};
use crate::http::{LalamoveError, Result};

const QUOTATION_STOPS: (usize, usize) = (2, 16);
const PATCH_ORDER_STOPS: (usize, usize) = (2, 17);
const MAX_RECIPIENTS: usize = 15;

/// Every request body is wrapped as `{"data": ...}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

impl<T> DataEnvelope<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotationPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_at: Option<String>,
    pub service_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    pub stops: Vec<Stop>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_route_optimized: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<Item>,
}

impl QuotationPayload {
    pub fn builder() -> QuotationPayloadBuilder {
        QuotationPayloadBuilder::default()
    }
}

#[derive(Debug, Clone, Default)]
pub struct QuotationPayloadBuilder {
    service_type: Option<String>,
    stops: Option<Vec<Stop>>,
    language: Option<String>,
    special_requests: Option<Vec<String>>,
    is_route_optimized: Option<bool>,
    schedule_at: Option<DateTime<Utc>>,
    item: Option<Item>,
}

impl QuotationPayloadBuilder {
    pub fn service_type(mut self, service_type: impl Into<String>) -> Self {
        self.service_type = Some(service_type.into());
        self
    }

    pub fn stops(mut self, stops: Vec<Stop>) -> Self {
        self.stops = Some(stops);
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn special_requests(mut self, special_requests: Vec<String>) -> Self {
        self.special_requests = Some(special_requests);
        self
    }

    pub fn is_route_optimized(mut self, optimized: bool) -> Self {
        self.is_route_optimized = Some(optimized);
        self
    }

    pub fn schedule_at(mut self, at: DateTime<Utc>) -> Self {
        self.schedule_at = Some(at);
        self
    }

    /// Parse an RFC 3339 timestamp in any offset; it is sent as UTC
    pub fn schedule_at_str(self, at: &str) -> Result<Self> {
        let parsed = DateTime::parse_from_rfc3339(at).map_err(|e| {
            LalamoveError::InvalidInput(format!("invalid scheduleAt {at:?}: {e}"))
        })?;
        Ok(self.schedule_at(parsed.with_timezone(&Utc)))
    }

    pub fn item(mut self, item: Item) -> Self {
        self.item = Some(item);
        self
    }

    pub fn build(self) -> Result<QuotationPayload> {
        let service_type = self
            .service_type
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| LalamoveError::InvalidInput("service type is required".to_string()))?;
        let stops = self
            .stops
            .ok_or_else(|| LalamoveError::InvalidInput("stops are required".to_string()))?;

        let (min, max) = QUOTATION_STOPS;
        if stops.len() < min || stops.len() > max {
            return Err(LalamoveError::InvalidInput(format!(
                "there must be at least {min} stops and no more than {max} stops"
            )));
        }
        for stop in &stops {
            stop.validate()?;
        }

        Ok(QuotationPayload {
            schedule_at: self
                .schedule_at
                .map(|at| at.to_rfc3339_opts(SecondsFormat::Secs, true)),
            service_type,
            special_requests: self.special_requests,
            language: self.language,
            stops,
            is_route_optimized: self.is_route_optimized,
            item: self.item,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    pub quotation_id: String,
    pub sender: Contact,
    pub recipients: Vec<Recipient>,
    #[serde(rename = "isPODEnabled", skip_serializing_if = "Option::is_none")]
    pub is_pod_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner: Option<String>,
    pub metadata: Metadata,
}

impl OrderPayload {
    pub fn builder() -> OrderPayloadBuilder {
        OrderPayloadBuilder::default()
    }
}

#[derive(Debug, Clone, Default)]
pub struct OrderPayloadBuilder {
    quotation_id: Option<String>,
    sender: Option<Contact>,
    recipients: Vec<Recipient>,
    is_pod_enabled: Option<bool>,
    partner: Option<String>,
    metadata: Metadata,
}

impl OrderPayloadBuilder {
    pub fn quotation_id(mut self, quotation_id: impl Into<String>) -> Self {
        self.quotation_id = Some(quotation_id.into());
        self
    }

    pub fn sender(mut self, sender: Contact) -> Self {
        self.sender = Some(sender);
        self
    }

    pub fn recipients(mut self, recipients: Vec<Recipient>) -> Self {
        self.recipients = recipients;
        self
    }

    pub fn is_pod_enabled(mut self, enabled: bool) -> Self {
        self.is_pod_enabled = Some(enabled);
        self
    }

    pub fn partner(mut self, partner: impl Into<String>) -> Self {
        self.partner = Some(partner.into());
        self
    }

    pub fn metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn metadata_entry(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn build(self) -> Result<OrderPayload> {
        let quotation_id = self
            .quotation_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| LalamoveError::InvalidInput("quotation id is required".to_string()))?;
        let sender = self
            .sender
            .ok_or_else(|| LalamoveError::InvalidInput("sender is required".to_string()))?;
        sender.validate("sender")?;

        if self.recipients.is_empty() || self.recipients.len() > MAX_RECIPIENTS {
            return Err(LalamoveError::InvalidInput(format!(
                "there must be at least 1 recipient and no more than {MAX_RECIPIENTS} recipients"
            )));
        }
        for recipient in &self.recipients {
            recipient.validate()?;
        }

        if self.metadata.is_empty() {
            return Err(LalamoveError::InvalidInput(
                "metadata cannot be empty".to_string(),
            ));
        }

        Ok(OrderPayload {
            quotation_id,
            sender,
            recipients: self.recipients,
            is_pod_enabled: self.is_pod_enabled,
            partner: self.partner,
            metadata: self.metadata,
        })
    }
}

/// Replacement stop list for an existing order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchOrderPayload {
    pub stops: Vec<Stop>,
}

impl PatchOrderPayload {
    pub fn builder() -> PatchOrderPayloadBuilder {
        PatchOrderPayloadBuilder::default()
    }
}

#[derive(Debug, Clone, Default)]
pub struct PatchOrderPayloadBuilder {
    stops: Vec<Stop>,
}

impl PatchOrderPayloadBuilder {
    pub fn stops(mut self, stops: Vec<Stop>) -> Self {
        self.stops = stops;
        self
    }

    pub fn build(self) -> Result<PatchOrderPayload> {
        let (min, max) = PATCH_ORDER_STOPS;
        if self.stops.len() < min || self.stops.len() > max {
            return Err(LalamoveError::InvalidInput(format!(
                "the number of stops must be between {min} and {max}"
            )));
        }
        for stop in &self.stops {
            stop.validate()?;
        }
        Ok(PatchOrderPayload { stops: self.stops })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityFeeRequest {
    #[serde(with = "rust_decimal::serde::str")]
    pub priority_fee: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CancelDriverRequest {
    pub reason: DriverCancelReason,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookRequest {
    pub url: String,
}
