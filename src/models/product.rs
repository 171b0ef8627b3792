use crate::entities::product_entity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub description: Option<String>,
    /// Price in kobo.
    pub price: i64,
    pub stock: i64,
    pub commission_percent: Option<i32>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    #[schema(example = "Things Fall Apart")]
    pub title: String,
    #[schema(example = "Chinua Achebe")]
    pub author: String,
    pub description: Option<String>,
    #[schema(example = 350000)]
    pub price: i64,
    #[schema(example = 120)]
    pub stock: i64,
    /// Per-product affiliate commission percent; falls back to the flat rate
    /// when absent.
    pub commission_percent: Option<i32>,
    pub is_published: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub price: Option<i64>,
    pub stock: Option<i64>,
    pub commission_percent: Option<i32>,
    pub is_published: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductQuery {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub search: Option<String>,
}

impl From<product_entity::Model> for ProductResponse {
    fn from(m: product_entity::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            author: m.author,
            description: m.description,
            price: m.price,
            stock: m.stock,
            commission_percent: m.commission_percent,
            is_published: m.is_published,
            created_at: m.created_at.unwrap_or_else(Utc::now),
        }
    }
}
