//! Payment endpoints: gateway order creation plus an immutable record book.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{Value, json};
use uuid::Uuid;

use veranda_core::gateway::GatewayOrder;
use veranda_model::{NewPayment, Payment};

use crate::errors::{AppError, AppResult};
use crate::infra::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub amount: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub receipt: Option<String>,
}

fn default_currency() -> String {
    "INR".to_string()
}

/// Create a gateway order. `amount` arrives in rupees; the gateway wants
/// the smallest currency unit. The gateway's order JSON is relayed as-is.
pub async fn create_order(
    State(state): State<AppState>,
    Json(request): Json<CreateOrderRequest>,
) -> AppResult<Json<GatewayOrder>> {
    if request.amount <= 0.0 {
        return Err(AppError::bad_request("Amount must be greater than zero"));
    }
    let amount_minor = (request.amount * 100.0).round() as i64;
    let receipt = request
        .receipt
        .unwrap_or_else(|| format!("receipt_{}", Utc::now().timestamp_millis()));

    let order = state
        .gateway
        .create_order(amount_minor, &request.currency, &receipt)
        .await?;

    Ok(Json(order))
}

pub async fn record_payment(
    State(state): State<AppState>,
    Json(new): Json<NewPayment>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let payment = Payment::record(new);
    state.payments.insert(&payment).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": payment })),
    ))
}

pub async fn list_payments(State(state): State<AppState>) -> AppResult<Json<Value>> {
    let payments = state.payments.fetch_all().await?;

    Ok(Json(json!({ "success": true, "data": payments })))
}

pub async fn get_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Value>> {
    let payment = state
        .payments
        .fetch(id)
        .await?
        .ok_or_else(|| AppError::not_found("Payment not found"))?;

    Ok(Json(json!({ "success": true, "data": payment })))
}

pub async fn delete_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Value>> {
    if !state.payments.remove(id).await? {
        return Err(AppError::not_found("Payment not found"));
    }

    Ok(Json(json!({ "success": true, "message": "Payment deleted" })))
}
