//! Route table and middleware stack

use axum::{
    http::{HeaderValue, Method},
    routing::{get, patch, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::{warn, Level};

use crate::error::ApiError;
use crate::handlers::{auth, boards, clear, health, histories, lead_types, leads, statuses};
use crate::state::AppState;

pub fn build_router(state: AppState, cors_origins: &[String]) -> Router {
    // Public routes
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Handlers below authenticate through the `AuthUser` extractor, except the token pair
    let api_routes = Router::new()
        .route("/auth/token", post(auth::obtain_token))
        .route("/auth/token/refresh", post(auth::refresh_token))
        .route("/boards", get(boards::list_boards).post(boards::create_board))
        .route(
            "/boards/{uuid}",
            get(boards::get_board)
                .patch(boards::update_board)
                .delete(boards::delete_board),
        )
        .route("/boards/{uuid}/overview", get(boards::board_overview))
        .route("/statuses", get(statuses::list_statuses).post(statuses::create_status))
        .route("/statuses/order", patch(statuses::reorder_statuses))
        .route(
            "/statuses/{uuid}",
            get(statuses::get_status)
                .patch(statuses::update_status)
                .delete(statuses::delete_status),
        )
        .route("/lead-types", get(lead_types::list_lead_types).post(lead_types::create_lead_type))
        .route(
            "/lead-types/{uuid}",
            get(lead_types::get_lead_type)
                .patch(lead_types::update_lead_type)
                .delete(lead_types::delete_lead_type),
        )
        .route("/leads", get(leads::list_leads).post(leads::create_lead))
        .route(
            "/leads/{uuid}",
            get(leads::get_lead)
                .patch(leads::update_lead)
                .delete(leads::delete_lead),
        )
        .route("/lead-histories", get(histories::list_histories))
        .route("/clear", axum::routing::delete(clear::clear));

    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .fallback(route_not_found)
        .with_state(state)
        // CORS
        .layer(cors_layer(cors_origins))
        // Tracing
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}

async fn route_not_found() -> ApiError {
    ApiError::NotFound("Route not found".to_string())
}

/// `*` or an empty list allows any origin.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any);

    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();
    layer.allow_origin(allowed)
}
