use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

/// Per-user running ledger. `awaiting_approval` is the liability side
/// (commissions not yet confirmed), `available_for_withdrawal` the payable
/// side. `balance_before`/`balance_after` hold the available balance around
/// the most recent credit, used for the notification snapshot.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "wallets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub total_earned: i64,
    pub awaiting_approval: i64,
    pub available_for_withdrawal: i64,
    pub total_withdrawn: i64,
    pub balance_before: i64,
    pub balance_after: i64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
