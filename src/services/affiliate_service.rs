use crate::entities::{
    AffiliateStatus, affiliate_entity as affiliates, affiliate_link_entity as links,
    product_entity as products,
};
use crate::error::{AppError, AppResult};
use crate::models::{AffiliateLinkResponse, AffiliateResponse, CreateLinkRequest};
use crate::utils::generate_link_slug;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    Set,
};

#[derive(Clone)]
pub struct AffiliateService {
    pool: DatabaseConnection,
}

impl AffiliateService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// Apply to the affiliate program; lands in `pending` until an admin
    /// decides.
    pub async fn apply(&self, user_id: i64) -> AppResult<AffiliateResponse> {
        let existing = affiliates::Entity::find()
            .filter(affiliates::Column::UserId.eq(user_id))
            .one(&self.pool)
            .await?;
        if existing.is_some() {
            return Err(AppError::ValidationError(
                "Affiliate application already exists".to_string(),
            ));
        }

        let affiliate = affiliates::ActiveModel {
            user_id: Set(user_id),
            status: Set(AffiliateStatus::Pending),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        Ok(AffiliateResponse::from(affiliate))
    }

    pub async fn get_membership(&self, user_id: i64) -> AppResult<AffiliateResponse> {
        let affiliate = affiliates::Entity::find()
            .filter(affiliates::Column::UserId.eq(user_id))
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Not an affiliate".to_string()))?;

        Ok(AffiliateResponse::from(affiliate))
    }

    /// Admin decision on a membership.
    pub async fn update_status(
        &self,
        affiliate_id: i64,
        status: AffiliateStatus,
    ) -> AppResult<AffiliateResponse> {
        let affiliate = affiliates::Entity::find_by_id(affiliate_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Affiliate not found".to_string()))?;

        let mut am = affiliate.into_active_model();
        am.status = Set(status);
        am.updated_at = Set(Some(Utc::now()));
        let updated = am.update(&self.pool).await?;

        Ok(AffiliateResponse::from(updated))
    }

    /// Mint a link for one product. One link per (affiliate, product); asking
    /// again returns the existing link.
    pub async fn create_link(
        &self,
        user_id: i64,
        request: CreateLinkRequest,
    ) -> AppResult<AffiliateLinkResponse> {
        let affiliate = affiliates::Entity::find()
            .filter(affiliates::Column::UserId.eq(user_id))
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Not an affiliate".to_string()))?;

        if !affiliate.status.can_create_links() {
            return Err(AppError::ValidationError(
                "Affiliate membership is not approved".to_string(),
            ));
        }

        let product = products::Entity::find_by_id(request.product_id)
            .one(&self.pool)
            .await?
            .filter(|p| p.is_published)
            .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

        let existing = links::Entity::find()
            .filter(links::Column::UserId.eq(user_id))
            .filter(links::Column::ProductId.eq(product.id))
            .one(&self.pool)
            .await?;
        if let Some(link) = existing {
            return Ok(AffiliateLinkResponse::from(link));
        }

        let slug = self.generate_unique_slug().await?;

        let link = links::ActiveModel {
            user_id: Set(user_id),
            product_id: Set(product.id),
            slug: Set(slug),
            clicks: Set(0),
            orders: Set(0),
            commission: Set(0),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        Ok(AffiliateLinkResponse::from(link))
    }

    pub async fn get_user_links(&self, user_id: i64) -> AppResult<Vec<AffiliateLinkResponse>> {
        let list = links::Entity::find()
            .filter(links::Column::UserId.eq(user_id))
            .all(&self.pool)
            .await?;

        Ok(list.into_iter().map(AffiliateLinkResponse::from).collect())
    }

    /// Resolve a slug for the public redirect and count the click. Returns the
    /// product the storefront should land on.
    pub async fn record_click(&self, slug: &str) -> AppResult<i64> {
        let link = links::Entity::find()
            .filter(links::Column::Slug.eq(slug))
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Link not found".to_string()))?;

        links::Entity::update_many()
            .col_expr(
                links::Column::Clicks,
                Expr::col(links::Column::Clicks).add(1),
            )
            .col_expr(links::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(links::Column::Id.eq(link.id))
            .exec(&self.pool)
            .await?;

        Ok(link.product_id)
    }

    async fn generate_unique_slug(&self) -> AppResult<String> {
        loop {
            let slug = generate_link_slug();
            let exists = links::Entity::find()
                .filter(links::Column::Slug.eq(&slug))
                .one(&self.pool)
                .await?;
            if exists.is_none() {
                return Ok(slug);
            }
        }
    }
}
