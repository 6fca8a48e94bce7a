/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust response structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};

use super::enums::OrderStatus;
use super::models::{Coordinates, Distance, Item, Metadata, PriceBreakdown};

/// Successful responses carry their payload under `data`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope<T> {
    pub data: T,
}

/// Error body returned with non-2xx statuses
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub errors: Vec<ApiErrorDetail>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    pub id: String,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotedStop {
    pub stop_id: String,
    pub coordinates: Coordinates,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quotation {
    pub quotation_id: String,
    #[serde(default)]
    pub schedule_at: Option<String>,
    #[serde(default)]
    pub expires_at: Option<String>,
    pub service_type: String,
    #[serde(default)]
    pub special_requests: Vec<String>,
    #[serde(default)]
    pub language: Option<String>,
    pub stops: Vec<QuotedStop>,
    #[serde(default)]
    pub is_route_optimized: bool,
    pub price_breakdown: PriceBreakdown,
    #[serde(default)]
    pub item: Option<Item>,
    #[serde(default)]
    pub distance: Option<Distance>,
}

/// Stop as reported on a placed order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStop {
    pub coordinates: Coordinates,
    pub address: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(rename = "POD", default)]
    pub pod: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: String,
    #[serde(default)]
    pub quotation_id: Option<String>,
    #[serde(default)]
    pub price_breakdown: Option<PriceBreakdown>,
    #[serde(default)]
    pub driver_id: Option<String>,
    #[serde(default)]
    pub share_link: Option<String>,
    pub status: OrderStatus,
    #[serde(default)]
    pub distance: Option<Distance>,
    #[serde(default)]
    pub stops: Vec<OrderStop>,
    #[serde(default)]
    pub metadata: Option<Metadata>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverLocation {
    pub lat: String,
    pub lng: String,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    pub driver_id: String,
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub plate_number: Option<String>,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub coordinates: Option<DriverLocation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Webhook {
    pub url: String,
}
