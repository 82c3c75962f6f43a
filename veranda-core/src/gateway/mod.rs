//! Payment gateway boundary.
//!
//! Order creation is the only operation the backend performs against the
//! gateway; everything else (checkout, capture, webhooks) happens on the
//! client side. Failures surface as external errors carrying the upstream
//! message so operators can see what the gateway actually said.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{CoreError, Result};

const DEFAULT_BASE_URL: &str = "https://api.razorpay.com/v1";

/// An order as reported back by the gateway. Unknown upstream fields are
/// ignored; `receipt` and `status` are absent in some gateway responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayOrder {
    pub id: String,
    pub amount: i64,
    pub currency: String,
    #[serde(default)]
    pub receipt: Option<String>,
    #[serde(default)]
    pub status: String,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create an order for `amount` minor units (paise for INR).
    async fn create_order(
        &self,
        amount: i64,
        currency: &str,
        receipt: &str,
    ) -> Result<GatewayOrder>;
}

/// Razorpay Orders API adapter with basic auth from configuration.
#[derive(Clone)]
pub struct RazorpayGateway {
    client: reqwest::Client,
    base_url: String,
    key_id: String,
    key_secret: String,
}

impl fmt::Debug for RazorpayGateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RazorpayGateway")
            .field("base_url", &self.base_url)
            .field("key_id", &self.key_id)
            .field("key_secret", &"<redacted>")
            .finish()
    }
}

impl RazorpayGateway {
    pub fn new(key_id: String, key_secret: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            key_id,
            key_secret,
        }
    }

    /// Point the adapter at a different endpoint (primarily for tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl PaymentGateway for RazorpayGateway {
    async fn create_order(
        &self,
        amount: i64,
        currency: &str,
        receipt: &str,
    ) -> Result<GatewayOrder> {
        let response = self
            .client
            .post(format!("{}/orders", self.base_url))
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(&serde_json::json!({
                "amount": amount,
                "currency": currency,
                "receipt": receipt,
                "payment_capture": 1,
            }))
            .send()
            .await
            .map_err(|e| CoreError::External(format!("Payment gateway request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CoreError::External(format!(
                "Payment gateway returned {status}: {body}"
            )));
        }

        response.json::<GatewayOrder>().await.map_err(|e| {
            CoreError::External(format!("Failed to parse payment gateway response: {e}"))
        })
    }
}

/// Stand-in used when gateway credentials are absent from the environment.
/// Order creation fails with a clear message; every other surface of the
/// API is unaffected.
#[derive(Debug, Clone, Default)]
pub struct UnconfiguredGateway;

#[async_trait]
impl PaymentGateway for UnconfiguredGateway {
    async fn create_order(
        &self,
        _amount: i64,
        _currency: &str,
        _receipt: &str,
    ) -> Result<GatewayOrder> {
        Err(CoreError::External(
            "Payment gateway credentials are not configured".to_string(),
        ))
    }
}
