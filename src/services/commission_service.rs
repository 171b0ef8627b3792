use crate::config::CommissionConfig;
use crate::entities::{
    CommissionSource, CommissionStatus, affiliate_link_entity as links,
    commission_referral_entity as cr, order_entity as orders, product_entity as products,
    user_entity as users, wallet_entity as wallets,
};
use crate::error::{AppError, AppResult};
use crate::external::Mailer;
use crate::models::{CommissionQuery, CommissionResponse, PaginatedResponse, PaginationParams};
use chrono::Utc;
use sea_orm::sea_query::{Alias, Expr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, Order, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

/// Commission owed for a purchase: integer percentage of the order total,
/// rounded down to whole kobo.
pub(crate) fn commission_amount(purchase_total: i64, percent: i64) -> i64 {
    purchase_total * percent / 100
}

/// Wallet adjustment when a commission leaves `awaiting_approval`. Approval
/// moves the amount to the payable side; rejection forfeits it, so the sum of
/// both sides drops by exactly the amount.
pub(crate) fn settle_balances(
    awaiting_approval: i64,
    available_for_withdrawal: i64,
    amount: i64,
    approved: bool,
) -> (i64, i64) {
    let awaiting = awaiting_approval - amount;
    let available = if approved {
        available_for_withdrawal + amount
    } else {
        available_for_withdrawal
    };
    (awaiting, available)
}

struct Attribution {
    user_id: i64,
    product_id: Option<i64>,
    source: CommissionSource,
    percent: i64,
    link: Option<links::Model>,
}

#[derive(Clone)]
pub struct CommissionService {
    pool: DatabaseConnection,
    mailer: Mailer,
    config: CommissionConfig,
}

impl CommissionService {
    pub fn new(pool: DatabaseConnection, mailer: Mailer, config: CommissionConfig) -> Self {
        Self {
            pool,
            mailer,
            config,
        }
    }

    /// Create the commission for a freshly-paid order, if it carries an
    /// attribution. At most one commission ever exists per order; calling this
    /// again (webhook and verify can both fire) is a no-op.
    ///
    /// Callers treat this as a best-effort side effect of payment
    /// verification: errors are logged there, never surfaced to the buyer.
    pub async fn record_for_order(
        &self,
        order: &orders::Model,
    ) -> AppResult<Option<CommissionResponse>> {
        let existing = cr::Entity::find()
            .filter(cr::Column::OrderId.eq(order.id))
            .one(&self.pool)
            .await?;
        if existing.is_some() {
            return Ok(None);
        }

        let Some(attribution) = self.resolve_attribution(order).await? else {
            return Ok(None);
        };

        let amount = commission_amount(order.total_amount, attribution.percent);

        let txn = self.pool.begin().await?;

        let commission = cr::ActiveModel {
            user_id: Set(attribution.user_id),
            order_id: Set(order.id),
            product_id: Set(attribution.product_id),
            source: Set(attribution.source),
            purchase_amount: Set(order.total_amount),
            commission_percentage: Set(attribution.percent.to_string()),
            commission_amount: Set(amount),
            status: Set(CommissionStatus::AwaitingApproval),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let wallet = wallets::Entity::find()
            .filter(wallets::Column::UserId.eq(attribution.user_id))
            .one(&txn)
            .await?;

        match wallet {
            Some(_) => {
                wallets::Entity::update_many()
                    .col_expr(
                        wallets::Column::TotalEarned,
                        Expr::col(wallets::Column::TotalEarned).add(amount),
                    )
                    .col_expr(
                        wallets::Column::AwaitingApproval,
                        Expr::col(wallets::Column::AwaitingApproval).add(amount),
                    )
                    .col_expr(wallets::Column::UpdatedAt, Expr::value(Utc::now()))
                    .filter(wallets::Column::UserId.eq(attribution.user_id))
                    .exec(&txn)
                    .await?;
            }
            None => {
                // lazily created, zeroed, on the first commission event
                wallets::ActiveModel {
                    user_id: Set(attribution.user_id),
                    total_earned: Set(amount),
                    awaiting_approval: Set(amount),
                    available_for_withdrawal: Set(0),
                    total_withdrawn: Set(0),
                    balance_before: Set(0),
                    balance_after: Set(0),
                    ..Default::default()
                }
                .insert(&txn)
                .await?;
            }
        }

        if let Some(link) = &attribution.link {
            links::Entity::update_many()
                .col_expr(
                    links::Column::Orders,
                    Expr::col(links::Column::Orders).add(1),
                )
                .col_expr(
                    links::Column::Commission,
                    Expr::col(links::Column::Commission).add(amount),
                )
                .col_expr(links::Column::UpdatedAt, Expr::value(Utc::now()))
                .filter(links::Column::Id.eq(link.id))
                .exec(&txn)
                .await?;
        }

        txn.commit().await?;

        log::info!(
            "Commission of {amount} kobo recorded for order {} (user {})",
            order.id,
            attribution.user_id
        );

        Ok(Some(CommissionResponse::from(commission)))
    }

    /// Admin transition out of `awaiting_approval`. The status flip is guarded
    /// by a conditional update so two concurrent admins cannot both settle the
    /// same commission, and the wallet adjustment commits in the same
    /// transaction or not at all.
    pub async fn update_status(
        &self,
        commission_id: i64,
        target: CommissionStatus,
    ) -> AppResult<CommissionResponse> {
        let approved = match target {
            CommissionStatus::Approved => true,
            CommissionStatus::Rejected => false,
            _ => {
                return Err(AppError::ValidationError(
                    "Target status must be approved or rejected".to_string(),
                ));
            }
        };

        let txn = self.pool.begin().await?;

        let commission = cr::Entity::find_by_id(commission_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound("Commission referral not found".to_string()))?;

        if commission.status != CommissionStatus::AwaitingApproval {
            return Err(AppError::ValidationError(
                "Only awaiting_approval referrals can be changed".to_string(),
            ));
        }

        let amount = commission.commission_amount;

        let flipped = cr::Entity::update_many()
            .col_expr(
                cr::Column::Status,
                Expr::val(target.clone()).as_enum(Alias::new("commission_status")),
            )
            .col_expr(cr::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(cr::Column::Id.eq(commission_id))
            .filter(cr::Column::Status.eq(CommissionStatus::AwaitingApproval))
            .exec(&txn)
            .await?;
        if flipped.rows_affected == 0 {
            // lost the race to another admin
            return Err(AppError::ValidationError(
                "Only awaiting_approval referrals can be changed".to_string(),
            ));
        }

        let wallet = wallets::Entity::find()
            .filter(wallets::Column::UserId.eq(commission.user_id))
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound("Wallet not found".to_string()))?;

        let balance_before = wallet.available_for_withdrawal;
        let (_, balance_after) = settle_balances(
            wallet.awaiting_approval,
            wallet.available_for_withdrawal,
            amount,
            approved,
        );

        let mut update = wallets::Entity::update_many()
            .col_expr(
                wallets::Column::AwaitingApproval,
                Expr::col(wallets::Column::AwaitingApproval).sub(amount),
            )
            .col_expr(wallets::Column::UpdatedAt, Expr::value(Utc::now()));
        if approved {
            update = update
                .col_expr(
                    wallets::Column::AvailableForWithdrawal,
                    Expr::col(wallets::Column::AvailableForWithdrawal).add(amount),
                )
                .col_expr(wallets::Column::BalanceBefore, Expr::value(balance_before))
                .col_expr(wallets::Column::BalanceAfter, Expr::value(balance_after));
        }
        update
            .filter(wallets::Column::UserId.eq(commission.user_id))
            .exec(&txn)
            .await?;

        txn.commit().await?;

        let updated = cr::Model {
            status: target,
            updated_at: Some(Utc::now()),
            ..commission
        };

        if approved
            && let Err(e) = self
                .send_approval_email(&updated, balance_before, balance_after)
                .await
        {
            log::error!(
                "Commission-approved email for commission {} failed: {e:?}",
                updated.id
            );
        }

        Ok(CommissionResponse::from(updated))
    }

    pub async fn get_user_commissions(
        &self,
        user_id: i64,
        query: &CommissionQuery,
    ) -> AppResult<PaginatedResponse<CommissionResponse>> {
        let params = PaginationParams::new(query.page, query.page_size);

        let mut base_query = cr::Entity::find().filter(cr::Column::UserId.eq(user_id));
        if let Some(status) = &query.status {
            base_query = base_query.filter(cr::Column::Status.eq(status.clone()));
        }

        let total = base_query.clone().count(&self.pool).await? as i64;

        let items = base_query
            .order_by(cr::Column::CreatedAt, Order::Desc)
            .limit(params.get_limit() as u64)
            .offset(params.get_offset() as u64)
            .all(&self.pool)
            .await?;

        Ok(PaginatedResponse::new(
            items.into_iter().map(CommissionResponse::from).collect(),
            params.get_page(),
            params.get_limit(),
            total,
        ))
    }

    pub async fn list_commissions(
        &self,
        query: &CommissionQuery,
    ) -> AppResult<PaginatedResponse<CommissionResponse>> {
        let params = PaginationParams::new(query.page, query.page_size);

        let mut base_query = cr::Entity::find();
        if let Some(status) = &query.status {
            base_query = base_query.filter(cr::Column::Status.eq(status.clone()));
        }

        let total = base_query.clone().count(&self.pool).await? as i64;

        let items = base_query
            .order_by(cr::Column::CreatedAt, Order::Desc)
            .limit(params.get_limit() as u64)
            .offset(params.get_offset() as u64)
            .all(&self.pool)
            .await?;

        Ok(PaginatedResponse::new(
            items.into_iter().map(CommissionResponse::from).collect(),
            params.get_page(),
            params.get_limit(),
            total,
        ))
    }

    async fn resolve_attribution(&self, order: &orders::Model) -> AppResult<Option<Attribution>> {
        if let Some(code) = &order.referral_code {
            let Some(referrer) = users::Entity::find()
                .filter(users::Column::ReferralCode.eq(code))
                .one(&self.pool)
                .await?
            else {
                log::warn!("Order {} carries unknown referral code {code}", order.id);
                return Ok(None);
            };

            return Ok(Some(Attribution {
                user_id: referrer.id,
                product_id: None,
                source: CommissionSource::ReferralCode,
                percent: self.config.flat_rate_percent,
                link: None,
            }));
        }

        if let Some(slug) = &order.referral_slug {
            let Some(link) = links::Entity::find()
                .filter(links::Column::Slug.eq(slug))
                .one(&self.pool)
                .await?
            else {
                log::warn!("Order {} carries unknown referral slug {slug}", order.id);
                return Ok(None);
            };

            let product = products::Entity::find_by_id(link.product_id)
                .one(&self.pool)
                .await?;
            let percent = product
                .and_then(|p| p.commission_percent)
                .map(|p| p as i64)
                .unwrap_or(self.config.flat_rate_percent);

            return Ok(Some(Attribution {
                user_id: link.user_id,
                product_id: Some(link.product_id),
                source: CommissionSource::AffiliateLink,
                percent,
                link: Some(link),
            }));
        }

        Ok(None)
    }

    async fn send_approval_email(
        &self,
        commission: &cr::Model,
        balance_before: i64,
        balance_after: i64,
    ) -> AppResult<()> {
        let affiliate = users::Entity::find_by_id(commission.user_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Affiliate not found".to_string()))?;
        let order = orders::Entity::find_by_id(commission.order_id)
            .one(&self.pool)
            .await?;

        let product_title = match commission.product_id {
            Some(product_id) => products::Entity::find_by_id(product_id)
                .one(&self.pool)
                .await?
                .map(|p| p.title),
            None => None,
        };

        let buyer_line = order
            .map(|o| format!("{} &lt;{}&gt;", o.buyer_name, o.buyer_email))
            .unwrap_or_else(|| "unknown buyer".to_string());

        let html_body = format!(
            "<p>Hello {},</p>\
             <p>Your commission of &#8358;{:.2} on order #{} has been approved.</p>\
             <ul>\
             <li>Buyer: {}</li>\
             <li>Product: {}</li>\
             <li>Available balance: &#8358;{:.2} &rarr; &#8358;{:.2}</li>\
             </ul>\
             <p>Approved at {}.</p>",
            affiliate.name,
            commission.commission_amount as f64 / 100.0,
            commission.order_id,
            buyer_line,
            product_title.unwrap_or_else(|| "-".to_string()),
            balance_before as f64 / 100.0,
            balance_after as f64 / 100.0,
            Utc::now().format("%Y-%m-%d %H:%M UTC"),
        );

        self.mailer
            .send(&affiliate.email, "Your commission has been approved", &html_body)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commission_amount_flat_rate() {
        // order of NGN 10,000.00 at 20% earns NGN 2,000.00
        assert_eq!(commission_amount(1_000_000, 20), 200_000);
    }

    #[test]
    fn test_commission_amount_rounds_down() {
        assert_eq!(commission_amount(999, 20), 199);
        assert_eq!(commission_amount(0, 20), 0);
    }

    #[test]
    fn test_settle_balances_approval_conserves_total() {
        let (awaiting, available) = settle_balances(200_000, 50_000, 200_000, true);
        assert_eq!(awaiting, 0);
        assert_eq!(available, 250_000);
        // the sum of both sides is unchanged by an approval
        assert_eq!(awaiting + available, 200_000 + 50_000);
    }

    #[test]
    fn test_settle_balances_rejection_forfeits_amount() {
        let (awaiting, available) = settle_balances(200_000, 50_000, 200_000, false);
        assert_eq!(awaiting, 0);
        assert_eq!(available, 50_000);
        // the rejected amount leaves the ledger entirely
        assert_eq!(awaiting + available, 200_000 + 50_000 - 200_000);
    }

    #[test]
    fn test_settle_balances_partial_amount() {
        let (awaiting, available) = settle_balances(500_000, 0, 200_000, true);
        assert_eq!(awaiting, 300_000);
        assert_eq!(available, 200_000);
    }
}
