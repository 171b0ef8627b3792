use crate::entities::{user_bank_entity as banks, user_entity as users};
use crate::error::{AppError, AppResult};
use crate::models::{AddBankRequest, BankResponse, UserResponse};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

#[derive(Clone)]
pub struct UserService {
    pool: DatabaseConnection,
}

impl UserService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn get_profile(&self, user_id: i64) -> AppResult<UserResponse> {
        let user = users::Entity::find_by_id(user_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok(UserResponse::from(user))
    }

    /// Register payout bank details; one row per (user, bank_code).
    pub async fn add_bank(&self, user_id: i64, request: AddBankRequest) -> AppResult<BankResponse> {
        if request.account_number.len() != 10
            || !request.account_number.chars().all(|c| c.is_ascii_digit())
        {
            return Err(AppError::ValidationError(
                "Account number must be 10 digits".to_string(),
            ));
        }

        let existing = banks::Entity::find()
            .filter(banks::Column::UserId.eq(user_id))
            .filter(banks::Column::BankCode.eq(&request.bank_code))
            .one(&self.pool)
            .await?;
        if existing.is_some() {
            return Err(AppError::ValidationError(
                "Bank is already registered".to_string(),
            ));
        }

        let bank = banks::ActiveModel {
            user_id: Set(user_id),
            bank_code: Set(request.bank_code),
            bank_name: Set(request.bank_name),
            account_number: Set(request.account_number),
            account_name: Set(request.account_name),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        Ok(BankResponse::from(bank))
    }

    pub async fn list_banks(&self, user_id: i64) -> AppResult<Vec<BankResponse>> {
        let list = banks::Entity::find()
            .filter(banks::Column::UserId.eq(user_id))
            .all(&self.pool)
            .await?;

        Ok(list.into_iter().map(BankResponse::from).collect())
    }
}
