use crate::entities::{
    PaymentStatus, ShipmentStatus, order_entity as orders, order_item_entity as items,
    product_entity as products,
};
use crate::error::{AppError, AppResult};
use crate::external::PaystackClient;
use crate::models::{
    CheckoutRequest, CheckoutResponse, OrderQuery, OrderResponse, PaginatedResponse,
    PaginationParams, UpdateShipmentRequest, VerifyPaymentResponse,
};
use crate::services::CommissionService;
use crate::utils::validate_email;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, Order,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

#[derive(Clone)]
pub struct OrderService {
    pool: DatabaseConnection,
    paystack: PaystackClient,
    commission_service: CommissionService,
}

impl OrderService {
    pub fn new(
        pool: DatabaseConnection,
        paystack: PaystackClient,
        commission_service: CommissionService,
    ) -> Self {
        Self {
            pool,
            paystack,
            commission_service,
        }
    }

    /// Create an order from catalog items and start a Paystack transaction.
    /// Totals are priced server-side; the buyer pays on the returned
    /// authorization URL.
    pub async fn checkout(
        &self,
        user_id: Option<i64>,
        request: CheckoutRequest,
    ) -> AppResult<CheckoutResponse> {
        validate_email(&request.buyer_email)?;

        if request.items.is_empty() {
            return Err(AppError::ValidationError(
                "Order must contain at least one item".to_string(),
            ));
        }
        if request.referral_code.is_some() && request.referral_slug.is_some() {
            return Err(AppError::ValidationError(
                "An order can carry either a referral code or an affiliate link, not both"
                    .to_string(),
            ));
        }

        let mut total_amount = 0i64;
        let mut priced_items = Vec::with_capacity(request.items.len());
        for item in &request.items {
            if item.quantity <= 0 {
                return Err(AppError::ValidationError(
                    "Item quantity must be positive".to_string(),
                ));
            }

            let product = products::Entity::find_by_id(item.product_id)
                .one(&self.pool)
                .await?
                .filter(|p| p.is_published)
                .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

            if product.stock < item.quantity as i64 {
                return Err(AppError::ValidationError(format!(
                    "Not enough stock for \"{}\"",
                    product.title
                )));
            }

            total_amount += product.price * item.quantity as i64;
            priced_items.push((product, item.quantity));
        }

        let reference = format!("bk_{}", Uuid::new_v4().simple());

        let txn = self.pool.begin().await?;

        let order = orders::ActiveModel {
            user_id: Set(user_id),
            buyer_name: Set(request.buyer_name),
            buyer_email: Set(request.buyer_email.clone()),
            total_amount: Set(total_amount),
            payment_reference: Set(reference.clone()),
            payment_status: Set(PaymentStatus::Pending),
            shipment_status: Set(ShipmentStatus::Pending),
            referral_code: Set(request.referral_code),
            referral_slug: Set(request.referral_slug),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        for (product, quantity) in &priced_items {
            items::ActiveModel {
                order_id: Set(order.id),
                product_id: Set(product.id),
                quantity: Set(*quantity),
                unit_price: Set(product.price),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;

        let authorization = self
            .paystack
            .initialize_transaction(&request.buyer_email, total_amount, &reference)
            .await?;

        Ok(CheckoutResponse {
            order_id: order.id,
            reference,
            authorization_url: authorization.authorization_url,
            total_amount,
        })
    }

    /// Confirm payment against Paystack and settle the order. Both the
    /// client-redirect verify call and the webhook land here, so the whole
    /// path is idempotent per order.
    pub async fn verify_payment(&self, reference: &str) -> AppResult<VerifyPaymentResponse> {
        let order = orders::Entity::find()
            .filter(orders::Column::PaymentReference.eq(reference))
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Order not found".to_string()))?;

        if order.payment_status == PaymentStatus::Paid {
            let payment_status = order.payment_status.clone();
            return Ok(VerifyPaymentResponse {
                order: OrderResponse::from(order),
                payment_status,
            });
        }

        let transaction = self.paystack.verify_transaction(reference).await?;

        if !transaction.is_successful() {
            log::warn!(
                "Payment verification for order {} came back {}",
                order.id,
                transaction.status
            );
            let failed = self
                .set_payment_status(&order, PaymentStatus::Failed)
                .await?;
            return Ok(VerifyPaymentResponse {
                order: OrderResponse::from(failed),
                payment_status: PaymentStatus::Failed,
            });
        }

        if transaction.amount != order.total_amount {
            return Err(AppError::ValidationError(format!(
                "Paid amount {} does not match order total {}",
                transaction.amount, order.total_amount
            )));
        }

        let paid = self.mark_order_paid(&order).await?;

        // commission bookkeeping is a best-effort side effect of payment:
        // it must never fail the verification response
        if let Err(e) = self.commission_service.record_for_order(&paid).await {
            log::error!("Commission recording for order {} failed: {e:?}", paid.id);
        }

        Ok(VerifyPaymentResponse {
            order: OrderResponse::from(paid),
            payment_status: PaymentStatus::Paid,
        })
    }

    pub async fn get_user_orders(
        &self,
        user_id: i64,
        query: &OrderQuery,
    ) -> AppResult<PaginatedResponse<OrderResponse>> {
        let params = PaginationParams::new(query.page, query.page_size);

        let mut base_query = orders::Entity::find().filter(orders::Column::UserId.eq(user_id));
        if let Some(status) = &query.payment_status {
            base_query = base_query.filter(orders::Column::PaymentStatus.eq(status.clone()));
        }

        let total = base_query.clone().count(&self.pool).await? as i64;

        let list = base_query
            .order_by(orders::Column::CreatedAt, Order::Desc)
            .limit(params.get_limit() as u64)
            .offset(params.get_offset() as u64)
            .all(&self.pool)
            .await?;

        Ok(PaginatedResponse::new(
            list.into_iter().map(OrderResponse::from).collect(),
            params.get_page(),
            params.get_limit(),
            total,
        ))
    }

    pub async fn list_orders(
        &self,
        query: &OrderQuery,
    ) -> AppResult<PaginatedResponse<OrderResponse>> {
        let params = PaginationParams::new(query.page, query.page_size);

        let mut base_query = orders::Entity::find();
        if let Some(status) = &query.payment_status {
            base_query = base_query.filter(orders::Column::PaymentStatus.eq(status.clone()));
        }

        let total = base_query.clone().count(&self.pool).await? as i64;

        let list = base_query
            .order_by(orders::Column::CreatedAt, Order::Desc)
            .limit(params.get_limit() as u64)
            .offset(params.get_offset() as u64)
            .all(&self.pool)
            .await?;

        Ok(PaginatedResponse::new(
            list.into_iter().map(OrderResponse::from).collect(),
            params.get_page(),
            params.get_limit(),
            total,
        ))
    }

    /// Admin shipment update; `delivered` starts the maturation clock.
    pub async fn update_shipment_status(
        &self,
        order_id: i64,
        request: UpdateShipmentRequest,
    ) -> AppResult<OrderResponse> {
        let order = orders::Entity::find_by_id(order_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Order not found".to_string()))?;

        if order.payment_status != PaymentStatus::Paid {
            return Err(AppError::ValidationError(
                "Only paid orders can be shipped".to_string(),
            ));
        }

        let mut am = order.into_active_model();
        am.shipment_status = Set(request.status);
        am.updated_at = Set(Some(Utc::now()));
        let updated = am.update(&self.pool).await?;

        Ok(OrderResponse::from(updated))
    }

    async fn set_payment_status(
        &self,
        order: &orders::Model,
        status: PaymentStatus,
    ) -> AppResult<orders::Model> {
        let mut am = order.clone().into_active_model();
        am.payment_status = Set(status);
        am.updated_at = Set(Some(Utc::now()));
        Ok(am.update(&self.pool).await?)
    }

    /// Mark paid and take the sold quantities out of stock in one transaction.
    async fn mark_order_paid(&self, order: &orders::Model) -> AppResult<orders::Model> {
        let txn = self.pool.begin().await?;

        let order_items = items::Entity::find()
            .filter(items::Column::OrderId.eq(order.id))
            .all(&txn)
            .await?;

        for item in &order_items {
            products::Entity::update_many()
                .col_expr(
                    products::Column::Stock,
                    Expr::col(products::Column::Stock).sub(item.quantity as i64),
                )
                .col_expr(products::Column::UpdatedAt, Expr::value(Utc::now()))
                .filter(products::Column::Id.eq(item.product_id))
                .exec(&txn)
                .await?;
        }

        let mut am = order.clone().into_active_model();
        am.payment_status = Set(PaymentStatus::Paid);
        am.updated_at = Set(Some(Utc::now()));
        let updated = am.update(&txn).await?;

        txn.commit().await?;

        log::info!("Order {} marked paid ({} kobo)", updated.id, updated.total_amount);

        Ok(updated)
    }
}
