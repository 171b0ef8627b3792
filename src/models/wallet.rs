use crate::entities::wallet_entity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WalletResponse {
    /// All amounts in kobo.
    pub total_earned: i64,
    pub awaiting_approval: i64,
    pub available_for_withdrawal: i64,
    pub total_withdrawn: i64,
    pub updated_at: DateTime<Utc>,
}

impl From<wallet_entity::Model> for WalletResponse {
    fn from(m: wallet_entity::Model) -> Self {
        Self {
            total_earned: m.total_earned,
            awaiting_approval: m.awaiting_approval,
            available_for_withdrawal: m.available_for_withdrawal,
            total_withdrawn: m.total_withdrawn,
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
        }
    }
}
