use crate::entities::user_bank_entity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AddBankRequest {
    #[schema(example = "058")]
    pub bank_code: String,
    #[schema(example = "Guaranty Trust Bank")]
    pub bank_name: String,
    #[schema(example = "0123456789")]
    pub account_number: String,
    #[schema(example = "Adaeze Obi")]
    pub account_name: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BankResponse {
    pub id: i64,
    pub bank_code: String,
    pub bank_name: String,
    pub account_number: String,
    pub account_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<user_bank_entity::Model> for BankResponse {
    fn from(m: user_bank_entity::Model) -> Self {
        Self {
            id: m.id,
            bank_code: m.bank_code,
            bank_name: m.bank_name,
            account_number: m.account_number,
            account_name: m.account_name,
            created_at: m.created_at.unwrap_or_else(Utc::now),
        }
    }
}
