use crate::entities::{OrderWithdrawalStatus, PaymentStatus, ShipmentStatus, order_entity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CheckoutItem {
    pub product_id: i64,
    #[schema(example = 1)]
    pub quantity: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CheckoutRequest {
    #[schema(example = "Adaeze Obi")]
    pub buyer_name: String,
    #[schema(example = "adaeze@example.com")]
    pub buyer_email: String,
    pub items: Vec<CheckoutItem>,
    /// Referral code attribution; mutually exclusive with `referral_slug`.
    pub referral_code: Option<String>,
    /// Affiliate link attribution; mutually exclusive with `referral_code`.
    pub referral_slug: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CheckoutResponse {
    pub order_id: i64,
    pub reference: String,
    /// Paystack checkout page to redirect the buyer to.
    pub authorization_url: String,
    pub total_amount: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VerifyPaymentQuery {
    pub reference: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VerifyPaymentResponse {
    pub order: OrderResponse,
    pub payment_status: PaymentStatus,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderQuery {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub payment_status: Option<PaymentStatus>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateShipmentRequest {
    pub status: ShipmentStatus,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderResponse {
    pub id: i64,
    pub user_id: Option<i64>,
    pub buyer_name: String,
    pub buyer_email: String,
    pub total_amount: i64,
    pub payment_reference: String,
    pub payment_status: PaymentStatus,
    pub shipment_status: ShipmentStatus,
    pub withdrawal_status: OrderWithdrawalStatus,
    pub referral_code: Option<String>,
    pub referral_slug: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<order_entity::Model> for OrderResponse {
    fn from(m: order_entity::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            buyer_name: m.buyer_name,
            buyer_email: m.buyer_email,
            total_amount: m.total_amount,
            payment_reference: m.payment_reference,
            payment_status: m.payment_status,
            shipment_status: m.shipment_status,
            withdrawal_status: m.withdrawal_status,
            referral_code: m.referral_code,
            referral_slug: m.referral_slug,
            created_at: m.created_at.unwrap_or_else(Utc::now),
        }
    }
}
