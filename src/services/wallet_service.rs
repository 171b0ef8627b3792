use crate::entities::wallet_entity as wallets;
use crate::error::AppResult;
use crate::models::WalletResponse;
use chrono::Utc;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

#[derive(Clone)]
pub struct WalletService {
    pool: DatabaseConnection,
}

impl WalletService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// A user who has never earned a commission has no wallet row yet; they
    /// see zeroed balances rather than a 404.
    pub async fn get_wallet(&self, user_id: i64) -> AppResult<WalletResponse> {
        let wallet = wallets::Entity::find()
            .filter(wallets::Column::UserId.eq(user_id))
            .one(&self.pool)
            .await?;

        Ok(match wallet {
            Some(wallet) => WalletResponse::from(wallet),
            None => WalletResponse {
                total_earned: 0,
                awaiting_approval: 0,
                available_for_withdrawal: 0,
                total_withdrawn: 0,
                updated_at: Utc::now(),
            },
        })
    }
}
