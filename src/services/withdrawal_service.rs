use crate::entities::{
    OrderWithdrawalStatus, PayoutStatus, commission_referral_entity as cr, order_entity as orders,
    user_bank_entity as banks, withdrawal_request_entity as wr,
};
use crate::error::{AppError, AppResult};
use crate::models::{
    CreateWithdrawalRequest, PaginatedResponse, PaginationParams, ProcessWithdrawalRequest,
    WithdrawalQuery, WithdrawalResponse,
};
use crate::utils::generate_payout_reference;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, Order,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

#[derive(Clone)]
pub struct WithdrawalService {
    pool: DatabaseConnection,
}

impl WithdrawalService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// Request payout of the commission earned on one order. All preconditions
    /// are checked before anything is written; the request row and the order's
    /// withdrawal flag commit together.
    pub async fn create_request(
        &self,
        user_id: i64,
        request: CreateWithdrawalRequest,
    ) -> AppResult<WithdrawalResponse> {
        let order = orders::Entity::find_by_id(request.order_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Order not found".to_string()))?;

        let commission = cr::Entity::find()
            .filter(cr::Column::OrderId.eq(order.id))
            .filter(cr::Column::UserId.eq(user_id))
            .one(&self.pool)
            .await?
            .ok_or_else(|| {
                AppError::NotFound("No commission exists for this order".to_string())
            })?;

        let bank = banks::Entity::find()
            .filter(banks::Column::UserId.eq(user_id))
            .filter(banks::Column::BankCode.eq(&request.bank_code))
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Bank not found".to_string()))?;

        // one request per (user, order); existence check, not a constraint
        let duplicate = wr::Entity::find()
            .filter(wr::Column::OrderId.eq(order.id))
            .filter(wr::Column::UserId.eq(user_id))
            .one(&self.pool)
            .await?;
        if duplicate.is_some() {
            return Err(AppError::ValidationError(
                "A withdrawal request already exists for this order".to_string(),
            ));
        }

        let reference = self.generate_unique_reference().await?;

        let txn = self.pool.begin().await?;

        let withdrawal = wr::ActiveModel {
            user_id: Set(user_id),
            order_id: Set(order.id),
            commission_id: Set(commission.id),
            buyer_name: Set(order.buyer_name.clone()),
            buyer_email: Set(order.buyer_email.clone()),
            purchase_amount: Set(commission.purchase_amount),
            commission_amount: Set(commission.commission_amount),
            commission_percentage: Set(commission.commission_percentage.clone()),
            payout_method: Set("bank_transfer".to_string()),
            bank_code: Set(bank.bank_code),
            bank_name: Set(bank.bank_name),
            account_number: Set(bank.account_number),
            status: Set(PayoutStatus::Pending),
            reference: Set(reference),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let mut order_am = order.into_active_model();
        order_am.withdrawal_status = Set(OrderWithdrawalStatus::Processing);
        order_am.updated_at = Set(Some(Utc::now()));
        order_am.update(&txn).await?;

        txn.commit().await?;

        Ok(WithdrawalResponse::from(withdrawal))
    }

    /// Admin settles a request: `pending` to `paid` or `cancelled`. This
    /// records the payout only; wallet balances moved when the commission was
    /// approved.
    pub async fn process_request(
        &self,
        request_id: i64,
        admin_id: i64,
        request: ProcessWithdrawalRequest,
    ) -> AppResult<WithdrawalResponse> {
        match request.status {
            PayoutStatus::Paid | PayoutStatus::Cancelled => {}
            _ => {
                return Err(AppError::ValidationError(
                    "Target status must be paid or cancelled".to_string(),
                ));
            }
        }

        let withdrawal = wr::Entity::find_by_id(request_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Withdrawal request not found".to_string()))?;

        if withdrawal.status != PayoutStatus::Pending {
            return Err(AppError::ValidationError(
                "Only pending withdrawal requests can be processed".to_string(),
            ));
        }

        let mut am = withdrawal.into_active_model();
        am.status = Set(request.status);
        am.processed_at = Set(Some(Utc::now()));
        am.processed_by = Set(Some(admin_id));
        am.notes = Set(request.notes);
        am.rejection_reason = Set(request.rejection_reason);
        let updated = am.update(&self.pool).await?;

        Ok(WithdrawalResponse::from(updated))
    }

    async fn generate_unique_reference(&self) -> AppResult<String> {
        loop {
            let reference = generate_payout_reference();
            let exists = wr::Entity::find()
                .filter(wr::Column::Reference.eq(&reference))
                .one(&self.pool)
                .await?;
            if exists.is_none() {
                return Ok(reference);
            }
        }
    }

    pub async fn get_user_requests(
        &self,
        user_id: i64,
        query: &WithdrawalQuery,
    ) -> AppResult<PaginatedResponse<WithdrawalResponse>> {
        let params = PaginationParams::new(query.page, query.page_size);

        let mut base_query = wr::Entity::find().filter(wr::Column::UserId.eq(user_id));
        if let Some(status) = &query.status {
            base_query = base_query.filter(wr::Column::Status.eq(status.clone()));
        }

        let total = base_query.clone().count(&self.pool).await? as i64;

        let list = base_query
            .order_by(wr::Column::RequestedAt, Order::Desc)
            .limit(params.get_limit() as u64)
            .offset(params.get_offset() as u64)
            .all(&self.pool)
            .await?;

        Ok(PaginatedResponse::new(
            list.into_iter().map(WithdrawalResponse::from).collect(),
            params.get_page(),
            params.get_limit(),
            total,
        ))
    }

    pub async fn list_requests(
        &self,
        query: &WithdrawalQuery,
    ) -> AppResult<PaginatedResponse<WithdrawalResponse>> {
        let params = PaginationParams::new(query.page, query.page_size);

        let mut base_query = wr::Entity::find();
        if let Some(status) = &query.status {
            base_query = base_query.filter(wr::Column::Status.eq(status.clone()));
        }

        let total = base_query.clone().count(&self.pool).await? as i64;

        let list = base_query
            .order_by(wr::Column::RequestedAt, Order::Desc)
            .limit(params.get_limit() as u64)
            .offset(params.get_offset() as u64)
            .all(&self.pool)
            .await?;

        Ok(PaginatedResponse::new(
            list.into_iter().map(WithdrawalResponse::from).collect(),
            params.get_page(),
            params.get_limit(),
            total,
        ))
    }
}
