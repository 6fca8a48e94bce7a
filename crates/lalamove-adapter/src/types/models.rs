/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust structs shared by payloads and responses
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::http::{LalamoveError, Result};

/// Free-form order metadata, echoed back by the API
pub type Metadata = BTreeMap<String, serde_json::Value>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: String,
    pub lng: String,
}

impl Coordinates {
    pub fn new(lat: impl Into<String>, lng: impl Into<String>) -> Self {
        Self {
            lat: lat.into(),
            lng: lng.into(),
        }
    }
}

/// A pickup or drop-off point
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stop {
    pub coordinates: Coordinates,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_id: Option<String>,
}

impl Stop {
    pub fn new(coordinates: Coordinates, address: impl Into<String>) -> Self {
        Self {
            coordinates,
            address: address.into(),
            stop_id: None,
        }
    }

    pub fn with_stop_id(mut self, stop_id: impl Into<String>) -> Self {
        self.stop_id = Some(stop_id.into());
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.coordinates.lat.trim().is_empty() || self.coordinates.lng.trim().is_empty() {
            return Err(LalamoveError::InvalidInput(
                "each stop must contain coordinates (lat and lng)".to_string(),
            ));
        }
        if self.address.trim().is_empty() {
            return Err(LalamoveError::InvalidInput(
                "each stop must contain a non-empty address".to_string(),
            ));
        }
        Ok(())
    }
}

/// Description of the goods being delivered
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handling_instructions: Option<Vec<String>>,
}

/// Sender contact bound to a quoted stop
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub stop_id: String,
    pub name: String,
    pub phone: String,
}

impl Contact {
    pub fn new(
        stop_id: impl Into<String>,
        name: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            stop_id: stop_id.into(),
            name: name.into(),
            phone: phone.into(),
        }
    }

    pub(crate) fn validate(&self, role: &str) -> Result<()> {
        require_contact_fields(role, &self.stop_id, &self.name, &self.phone)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipient {
    pub stop_id: String,
    pub name: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl Recipient {
    pub fn new(
        stop_id: impl Into<String>,
        name: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            stop_id: stop_id.into(),
            name: name.into(),
            phone: phone.into(),
            remarks: None,
        }
    }

    pub fn with_remarks(mut self, remarks: impl Into<String>) -> Self {
        self.remarks = Some(remarks.into());
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        require_contact_fields("recipient", &self.stop_id, &self.name, &self.phone)
    }
}

fn require_contact_fields(role: &str, stop_id: &str, name: &str, phone: &str) -> Result<()> {
    if stop_id.is_empty() || name.is_empty() || phone.is_empty() {
        return Err(LalamoveError::InvalidInput(format!(
            "{role} must contain stopId, name and phone"
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub base: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub extra_mileage: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub surcharge: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub special_requests: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub priority_fee: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub total_exclude_priority_fee: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str")]
    pub total: Decimal,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Distance {
    pub value: String,
    pub unit: String,
}

/// Capacity of a vehicle service, e.g. `{"value": "10", "unit": "kg"}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Load {
    #[serde(
        default,
        deserialize_with = "serde_helpers::deserialize_optional_decimal",
        serialize_with = "serde_helpers::serialize_optional_decimal"
    )]
    pub value: Option<Decimal>,
    #[serde(default)]
    pub unit: String,
}

/// A vehicle service offered in a city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub key: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub load: Option<Load>,
    #[serde(default)]
    pub special_requests: Vec<serde_json::Value>,
}

/// City as returned by `GET /v3/cities`; the API names the id `locode`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    #[serde(rename = "locode", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub services: Vec<Service>,
}

mod serde_helpers {
    use super::Decimal;
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;
    use std::str::FromStr;

    pub fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        if value.is_null() {
            return Ok(None);
        }

        if let Some(raw) = value.as_str() {
            if raw.trim().is_empty() {
                return Ok(None);
            }
            return Decimal::from_str(raw.trim())
                .map(Some)
                .map_err(serde::de::Error::custom);
        }

        if value.is_number() {
            return Decimal::from_str(&value.to_string())
                .map(Some)
                .map_err(serde::de::Error::custom);
        }

        Err(serde::de::Error::custom("invalid decimal value"))
    }

    pub fn serialize_optional_decimal<S>(
        value: &Option<Decimal>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(decimal) => serializer.serialize_str(&decimal.to_string()),
            None => serializer.serialize_none(),
        }
    }
}
