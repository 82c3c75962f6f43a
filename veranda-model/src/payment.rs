//! Completed payment records. Order creation itself happens at the gateway
//! boundary; this type only stores what the gateway reported back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: Uuid,
    pub payment_id: String,
    pub order_id: String,
    pub signature: String,
    pub amount: f64,
    pub currency: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_contact: String,
    pub description: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl Payment {
    pub fn record(new: NewPayment) -> Self {
        Payment {
            id: Uuid::new_v4(),
            payment_id: new.payment_id,
            order_id: new.order_id,
            signature: new.signature,
            amount: new.amount,
            currency: new.currency,
            customer_name: new.customer_name,
            customer_email: new.customer_email,
            customer_contact: new.customer_contact,
            description: new.description,
            status: new.status,
            created_at: Utc::now(),
        }
    }
}

/// Body of `POST /api/payments`. Signature verification is out of scope;
/// the fields are stored as reported.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPayment {
    pub payment_id: String,
    pub order_id: String,
    pub signature: String,
    pub amount: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_contact: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_status")]
    pub status: String,
}

fn default_currency() -> String {
    "INR".to_string()
}

fn default_status() -> String {
    "success".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn omitted_currency_and_status_take_defaults() {
        let new: NewPayment = serde_json::from_value(serde_json::json!({
            "paymentId": "pay_29QQoUBi66xm2f",
            "orderId": "order_9A33XWu170gUtm",
            "signature": "9ef4dffbfd84f1318f6739a3ce19f9d85851857ae648f114332d8401e0949a3d",
            "amount": 1500.0,
            "customerName": "Rohan Mehta",
            "customerEmail": "rohan@example.com",
            "customerContact": "9123456780",
        }))
        .unwrap();

        let payment = Payment::record(new);
        assert_eq!(payment.currency, "INR");
        assert_eq!(payment.status, "success");
        assert!(payment.description.is_none());
    }
}
