use crate::entities::{CommissionSource, CommissionStatus, commission_referral_entity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CommissionResponse {
    pub id: i64,
    pub user_id: i64,
    pub order_id: i64,
    pub product_id: Option<i64>,
    pub source: CommissionSource,
    pub purchase_amount: i64,
    pub commission_percentage: String,
    pub commission_amount: i64,
    pub status: CommissionStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateCommissionStatusRequest {
    /// Target status; only `approved` and `rejected` are accepted.
    pub status: CommissionStatus,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CommissionQuery {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub status: Option<CommissionStatus>,
}

/// One approved item in a maturation run report.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MaturedCommissionItem {
    pub commission_id: i64,
    pub user_id: i64,
    pub order_id: i64,
    pub amount: i64,
}

/// One skipped item in a maturation run report, with the first failing check.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SkippedCommissionItem {
    pub commission_id: i64,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MaturationRunResponse {
    pub approved_count: i64,
    pub skipped_count: i64,
    pub total_amount_approved: i64,
    pub approved: Vec<MaturedCommissionItem>,
    pub skipped: Vec<SkippedCommissionItem>,
}

impl From<commission_referral_entity::Model> for CommissionResponse {
    fn from(m: commission_referral_entity::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            order_id: m.order_id,
            product_id: m.product_id,
            source: m.source,
            purchase_amount: m.purchase_amount,
            commission_percentage: m.commission_percentage,
            commission_amount: m.commission_amount,
            status: m.status,
            created_at: m.created_at.unwrap_or_else(Utc::now),
        }
    }
}
