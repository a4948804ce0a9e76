//! crates/purchase_core/src/domain.rs
//!
//! Defines the pure, core data structures for the purchase page.
//! The order record is independent of any transport; the wire payload is the
//! one place where field names are fixed by the collection endpoint.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Price of a single piece, in currency units. Every variant costs the same.
pub const UNIT_PRICE: u64 = 360;

/// The order data captured by the purchase form, before dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSubmission {
    pub name: String,
    pub phone: String,
    pub governorate: String,
    pub area: String,
    pub address: String,
    pub straight_quantity: u32,
    pub curved_quantity: u32,
    pub curved_gold_quantity: u32,
}

/// Values derived from the quantity fields of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderTotals {
    pub total_quantity: u64,
    pub total_price: u64,
}

impl OrderSubmission {
    /// Sums the three variant quantities and prices them at [`UNIT_PRICE`].
    pub fn totals(&self) -> OrderTotals {
        let total_quantity = u64::from(self.straight_quantity)
            + u64::from(self.curved_quantity)
            + u64::from(self.curved_gold_quantity);

        OrderTotals {
            total_quantity,
            total_price: total_quantity * UNIT_PRICE,
        }
    }
}

/// The JSON object posted to the collection endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionPayload {
    pub name: String,
    pub phone: String,
    pub governorate: String,
    pub area: String,
    pub address: String,
    pub straight_qty: u32,
    pub curved_qty: u32,
    pub curved_gold_qty: u32,
    pub total_price: u64,
    #[serde(with = "iso_millis")]
    pub timestamp: DateTime<Utc>,
}

impl CollectionPayload {
    /// Builds a fresh payload for one dispatch, stamped with `timestamp`.
    pub fn from_submission(order: &OrderSubmission, timestamp: DateTime<Utc>) -> Self {
        let totals = order.totals();

        Self {
            name: order.name.clone(),
            phone: order.phone.clone(),
            governorate: order.governorate.clone(),
            area: order.area.clone(),
            address: order.address.clone(),
            straight_qty: order.straight_quantity,
            curved_qty: order.curved_quantity,
            curved_gold_qty: order.curved_gold_quantity,
            total_price: totals.total_price,
            timestamp,
        }
    }
}

/// `2026-01-02T03:04:05.678Z`: UTC, millisecond precision, `Z` suffix.
mod iso_millis {
    use super::*;

    pub fn serialize<S: Serializer>(
        value: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
