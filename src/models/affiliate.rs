use crate::entities::{AffiliateStatus, affiliate_entity, affiliate_link_entity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AffiliateResponse {
    pub id: i64,
    pub user_id: i64,
    pub status: AffiliateStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateAffiliateStatusRequest {
    pub status: AffiliateStatus,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateLinkRequest {
    pub product_id: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AffiliateLinkResponse {
    pub id: i64,
    pub product_id: i64,
    pub slug: String,
    pub clicks: i64,
    pub orders: i64,
    /// Total commission earned through this link, in kobo.
    pub commission: i64,
    pub created_at: DateTime<Utc>,
}

impl From<affiliate_entity::Model> for AffiliateResponse {
    fn from(m: affiliate_entity::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            status: m.status,
            created_at: m.created_at.unwrap_or_else(Utc::now),
        }
    }
}

impl From<affiliate_link_entity::Model> for AffiliateLinkResponse {
    fn from(m: affiliate_link_entity::Model) -> Self {
        Self {
            id: m.id,
            product_id: m.product_id,
            slug: m.slug,
            clicks: m.clicks,
            orders: m.orders,
            commission: m.commission,
            created_at: m.created_at.unwrap_or_else(Utc::now),
        }
    }
}
