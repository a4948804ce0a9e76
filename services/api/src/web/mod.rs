pub mod protocol;
pub mod rest;
pub mod state;

pub use rest::{dismiss_acknowledgment_handler, page_state_handler, submit_order_handler};

use axum::{
    routing::{get, post},
    Router,
};
use rest::ApiDoc;
use state::AppState;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Builds the purchase page routes together with the Swagger UI.
pub fn router(app_state: Arc<AppState>) -> Router {
    let api_router = Router::new()
        .route("/orders", post(submit_order_handler))
        .route("/orders/state", get(page_state_handler))
        .route(
            "/orders/acknowledgment/dismiss",
            post(dismiss_acknowledgment_handler),
        )
        .with_state(app_state);

    Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
