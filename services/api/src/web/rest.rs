//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the purchase page endpoints and the master
//! definition for the OpenAPI specification.

use crate::web::protocol::{OrderFormRequest, PageStateResponse, SubmitOrderResponse, SubmitStatus};
use crate::web::state::{AppState, PageSession};
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json},
};
use purchase_core::dispatcher::SubmitOutcome;
use purchase_core::domain::OrderSubmission;
use std::sync::Arc;
use tracing::{info, warn};
use utoipa::OpenApi;
use uuid::Uuid;

/// Header carrying the id of the purchase page that made the request.
pub const PAGE_SESSION_HEADER: &str = "x-page-session";

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        submit_order_handler,
        page_state_handler,
        dismiss_acknowledgment_handler,
    ),
    components(
        schemas(OrderFormRequest, SubmitOrderResponse, SubmitStatus, PageStateResponse)
    ),
    tags(
        (name = "Purchase API", description = "Order submission for the purchase page.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// Helpers
//=========================================================================================

/// Resolves the page session named by the `x-page-session` header.
fn page_session(
    app_state: &AppState,
    headers: &HeaderMap,
) -> Result<Arc<PageSession>, (StatusCode, String)> {
    let page_id_str = headers
        .get(PAGE_SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            (
                StatusCode::BAD_REQUEST,
                "x-page-session header is required".to_string(),
            )
        })?;

    let page_id = Uuid::parse_str(page_id_str).map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            "Invalid x-page-session format".to_string(),
        )
    })?;

    Ok(app_state.sessions.get_or_create(page_id))
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// Submit the order form.
///
/// The order is forwarded to the collection endpoint. Any accepted submission
/// answers `complete`, whether or not the endpoint could be reached.
#[utoipa::path(
    post,
    path = "/orders",
    request_body = OrderFormRequest,
    responses(
        (status = 200, description = "Submission attempted; show the success modal",
            body = SubmitOrderResponse),
        (status = 400, description = "Missing or malformed x-page-session header"),
        (status = 422, description = "The form body is missing fields or has negative quantities"),
        (status = 429, description = "Resubmitted within one second; nothing was sent",
            body = SubmitOrderResponse)
    ),
    params(
        ("x-page-session" = Uuid, Header, description = "The id of the submitting page.")
    )
)]
pub async fn submit_order_handler(
    State(app_state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(form): Json<OrderFormRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let session = page_session(&app_state, &headers)?;
    let now = app_state.clock.now();
    let order = OrderSubmission::from(form);

    match session.dispatcher.submit(&order, now).await {
        SubmitOutcome::Debounced => {
            warn!("Order submitted again inside the debounce window; ignored.");
            Ok((StatusCode::TOO_MANY_REQUESTS, Json(SubmitOrderResponse::ignored())))
        }
        SubmitOutcome::Completed(ack) => {
            session.success_modal.open();
            info!(submission_id = %ack.submission_id, "Order submission complete.");

            let response = SubmitOrderResponse {
                status: SubmitStatus::Complete,
                submission_id: Some(ack.submission_id),
                total_quantity: Some(order.totals().total_quantity),
                total_price: Some(ack.payload.total_price),
                timestamp: Some(ack.payload.timestamp),
            };
            Ok((StatusCode::OK, Json(response)))
        }
    }
}

/// Read whether a submission is in flight and whether the success modal is open.
#[utoipa::path(
    get,
    path = "/orders/state",
    responses(
        (status = 200, description = "Current page state", body = PageStateResponse),
        (status = 400, description = "Missing or malformed x-page-session header")
    ),
    params(
        ("x-page-session" = Uuid, Header, description = "The id of the page.")
    )
)]
pub async fn page_state_handler(
    State(app_state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<PageStateResponse>, (StatusCode, String)> {
    let session = page_session(&app_state, &headers)?;

    Ok(Json(PageStateResponse {
        is_submitting: session.dispatcher.is_submitting(),
        show_modal: session.success_modal.is_open(),
    }))
}

/// Close the success modal.
#[utoipa::path(
    post,
    path = "/orders/acknowledgment/dismiss",
    responses(
        (status = 204, description = "Modal closed"),
        (status = 400, description = "Missing or malformed x-page-session header")
    ),
    params(
        ("x-page-session" = Uuid, Header, description = "The id of the page.")
    )
)]
pub async fn dismiss_acknowledgment_handler(
    State(app_state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<StatusCode, (StatusCode, String)> {
    let session = page_session(&app_state, &headers)?;
    session.success_modal.dismiss();
    Ok(StatusCode::NO_CONTENT)
}
