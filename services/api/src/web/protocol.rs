//! services/api/src/web/protocol.rs
//!
//! Defines the JSON bodies exchanged between the purchase page and the API server.

use chrono::{DateTime, Utc};
use purchase_core::domain::OrderSubmission;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

//=========================================================================================
// Sent FROM the Purchase Page TO the Server
//=========================================================================================

/// The order form as submitted by the page.
#[derive(Deserialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderFormRequest {
    pub name: String,
    pub phone: String,
    pub governorate: String,
    pub area: String,
    pub address: String,
    pub straight_quantity: u32,
    pub curved_quantity: u32,
    pub curved_gold_quantity: u32,
}

impl From<OrderFormRequest> for OrderSubmission {
    fn from(form: OrderFormRequest) -> Self {
        OrderSubmission {
            name: form.name,
            phone: form.phone,
            governorate: form.governorate,
            area: form.area,
            address: form.address,
            straight_quantity: form.straight_quantity,
            curved_quantity: form.curved_quantity,
            curved_gold_quantity: form.curved_gold_quantity,
        }
    }
}

//=========================================================================================
// Sent FROM the Server TO the Purchase Page
//=========================================================================================

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SubmitStatus {
    /// The order was handed to the collection endpoint. Show the success modal.
    Complete,
    /// A previous submission was accepted less than a second ago.
    Ignored,
}

/// Reply to `POST /orders`.
///
/// A completed submission never says whether the collection endpoint was reached.
#[derive(Serialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitOrderResponse {
    pub status: SubmitStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submission_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_quantity: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_price: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl SubmitOrderResponse {
    pub fn ignored() -> Self {
        Self {
            status: SubmitStatus::Ignored,
            submission_id: None,
            total_quantity: None,
            total_price: None,
            timestamp: None,
        }
    }
}

/// Reply to `GET /orders/state`.
#[derive(Serialize, Debug, Clone, Copy, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageStateResponse {
    pub is_submitting: bool,
    pub show_modal: bool,
}
