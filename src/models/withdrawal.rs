use crate::entities::{PayoutStatus, withdrawal_request_entity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateWithdrawalRequest {
    pub order_id: i64,
    #[schema(example = "058")]
    pub bank_code: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProcessWithdrawalRequest {
    /// Target status; the transition only accepts `paid` or `cancelled`.
    pub status: PayoutStatus,
    pub notes: Option<String>,
    pub rejection_reason: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WithdrawalQuery {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub status: Option<PayoutStatus>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WithdrawalResponse {
    pub id: i64,
    pub user_id: i64,
    pub order_id: i64,
    pub commission_id: i64,
    pub buyer_name: String,
    pub buyer_email: String,
    pub purchase_amount: i64,
    pub commission_amount: i64,
    pub commission_percentage: String,
    pub payout_method: String,
    pub bank_code: String,
    pub bank_name: String,
    pub status: PayoutStatus,
    pub reference: String,
    pub requested_at: DateTime<Utc>,
    pub processed_at: Option<DateTime<Utc>>,
    pub processed_by: Option<i64>,
    pub notes: Option<String>,
    pub rejection_reason: Option<String>,
}

impl From<withdrawal_request_entity::Model> for WithdrawalResponse {
    fn from(m: withdrawal_request_entity::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            order_id: m.order_id,
            commission_id: m.commission_id,
            buyer_name: m.buyer_name,
            buyer_email: m.buyer_email,
            purchase_amount: m.purchase_amount,
            commission_amount: m.commission_amount,
            commission_percentage: m.commission_percentage,
            payout_method: m.payout_method,
            bank_code: m.bank_code,
            bank_name: m.bank_name,
            status: m.status,
            reference: m.reference,
            requested_at: m.requested_at.unwrap_or_else(Utc::now),
            processed_at: m.processed_at,
            processed_by: m.processed_by,
            notes: m.notes,
            rejection_reason: m.rejection_reason,
        }
    }
}
