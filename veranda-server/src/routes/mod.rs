//! Route tables for the public API, grouped per resource.

use axum::{
    Json, Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use serde_json::{Value, json};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{complaints, events, items, notices, payments, properties};
use crate::infra::app_state::AppState;

/// Assemble the application: health probe, API routes, and middleware.
pub fn create_app(state: AppState) -> Router {
    let cors = if state.config.cors_permissive {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
    };
    let body_limit = DefaultBodyLimit::max(state.config.body_limit_bytes());

    Router::new()
        .route("/health", get(health_handler))
        .merge(create_api_router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(body_limit)
        .with_state(state)
}

/// All `/api` routes.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/api/events", events_routes())
        .nest("/api/properties", properties_routes())
        .nest("/api/payments", payments_routes())
        .nest("/api/complaints", complaints_routes())
        .nest("/api/notices", notices_routes())
        .nest("/api/items", items_routes())
}

fn events_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(events::create_event).get(events::list_events))
        .route(
            "/{id}",
            get(events::get_event)
                .put(events::update_event)
                .delete(events::delete_event),
        )
        .route("/media/{id}/{kind}/{index}", get(events::serve_event_media))
}

fn properties_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(properties::create_property).get(properties::list_properties),
        )
        .route(
            "/{id}",
            get(properties::get_property)
                .put(properties::update_property)
                .delete(properties::delete_property),
        )
        .route(
            "/user/{mobile_number}",
            get(properties::list_properties_by_mobile),
        )
        .route(
            "/media/{id}/{kind}/{index}",
            get(properties::serve_property_media),
        )
}

fn payments_routes() -> Router<AppState> {
    Router::new()
        .route("/create-order", post(payments::create_order))
        .route(
            "/",
            post(payments::record_payment).get(payments::list_payments),
        )
        .route(
            "/{id}",
            get(payments::get_payment).delete(payments::delete_payment),
        )
}

fn complaints_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(complaints::create_complaint).get(complaints::list_complaints),
        )
        .route(
            "/{id}",
            get(complaints::get_complaint)
                .put(complaints::update_complaint)
                .delete(complaints::delete_complaint),
        )
}

fn notices_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(notices::create_notice).get(notices::list_notices))
        .route(
            "/{id}",
            get(notices::get_notice)
                .put(notices::update_notice)
                .delete(notices::delete_notice),
        )
}

fn items_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(items::create_item).get(items::list_items))
        .route(
            "/{id}",
            get(items::get_item)
                .put(items::update_item)
                .delete(items::delete_item),
        )
}

async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "Veranda API is running",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
