use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema, DeriveActiveEnum, EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "payout_status")]
#[serde(rename_all = "snake_case")]
pub enum PayoutStatus {
    #[sea_orm(string_value = "not_requested")]
    NotRequested,
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "paid")]
    Paid,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

impl std::fmt::Display for PayoutStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PayoutStatus::NotRequested => write!(f, "not_requested"),
            PayoutStatus::Pending => write!(f, "pending"),
            PayoutStatus::Paid => write!(f, "paid"),
            PayoutStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Payout-tracking record. Creating one does not move wallet funds; the
/// balance movement already happened when the commission was approved.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "withdrawal_requests")]
pub struct Model {
    #[sea_orm(primary_key)]
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
    pub account_number: String,
    pub status: PayoutStatus,
    pub reference: String,
    pub requested_at: Option<DateTime<Utc>>,
    pub processed_at: Option<DateTime<Utc>>,
    pub processed_by: Option<i64>,
    pub notes: Option<String>,
    pub rejection_reason: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
