use crate::entities::product_entity as products;
use crate::error::{AppError, AppResult};
use crate::models::{
    CreateProductRequest, PaginatedResponse, PaginationParams, ProductQuery, ProductResponse,
    UpdateProductRequest,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, IntoActiveModel,
    Order, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

#[derive(Clone)]
pub struct ProductService {
    pool: DatabaseConnection,
}

impl ProductService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn list_products(
        &self,
        query: &ProductQuery,
    ) -> AppResult<PaginatedResponse<ProductResponse>> {
        let params = PaginationParams::new(query.page, query.page_size);

        let mut base_query = products::Entity::find()
            .filter(products::Column::IsPublished.eq(true));

        if let Some(search) = &query.search {
            let pattern = format!("%{search}%");
            base_query = base_query.filter(
                Condition::any()
                    .add(products::Column::Title.like(&pattern))
                    .add(products::Column::Author.like(&pattern)),
            );
        }

        let total = base_query.clone().count(&self.pool).await? as i64;

        let items = base_query
            .order_by(products::Column::CreatedAt, Order::Desc)
            .limit(params.get_limit() as u64)
            .offset(params.get_offset() as u64)
            .all(&self.pool)
            .await?;

        Ok(PaginatedResponse::new(
            items.into_iter().map(ProductResponse::from).collect(),
            params.get_page(),
            params.get_limit(),
            total,
        ))
    }

    pub async fn get_product(&self, id: i64) -> AppResult<ProductResponse> {
        let product = products::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

        Ok(ProductResponse::from(product))
    }

    pub async fn create_product(
        &self,
        request: CreateProductRequest,
    ) -> AppResult<ProductResponse> {
        if request.price < 0 {
            return Err(AppError::ValidationError(
                "Price cannot be negative".to_string(),
            ));
        }
        if let Some(percent) = request.commission_percent
            && !(0..=100).contains(&percent)
        {
            return Err(AppError::ValidationError(
                "Commission percent must be between 0 and 100".to_string(),
            ));
        }

        let product = products::ActiveModel {
            title: Set(request.title),
            author: Set(request.author),
            description: Set(request.description),
            price: Set(request.price),
            stock: Set(request.stock),
            commission_percent: Set(request.commission_percent),
            is_published: Set(request.is_published.unwrap_or(true)),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        Ok(ProductResponse::from(product))
    }

    pub async fn update_product(
        &self,
        id: i64,
        request: UpdateProductRequest,
    ) -> AppResult<ProductResponse> {
        let product = products::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

        if let Some(percent) = request.commission_percent
            && !(0..=100).contains(&percent)
        {
            return Err(AppError::ValidationError(
                "Commission percent must be between 0 and 100".to_string(),
            ));
        }

        let mut am = product.into_active_model();
        if let Some(title) = request.title {
            am.title = Set(title);
        }
        if let Some(author) = request.author {
            am.author = Set(author);
        }
        if request.description.is_some() {
            am.description = Set(request.description);
        }
        if let Some(price) = request.price {
            if price < 0 {
                return Err(AppError::ValidationError(
                    "Price cannot be negative".to_string(),
                ));
            }
            am.price = Set(price);
        }
        if let Some(stock) = request.stock {
            am.stock = Set(stock);
        }
        if request.commission_percent.is_some() {
            am.commission_percent = Set(request.commission_percent);
        }
        if let Some(is_published) = request.is_published {
            am.is_published = Set(is_published);
        }
        am.updated_at = Set(Some(Utc::now()));

        let updated = am.update(&self.pool).await?;

        Ok(ProductResponse::from(updated))
    }
}
