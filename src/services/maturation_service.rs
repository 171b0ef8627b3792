use crate::config::CommissionConfig;
use crate::entities::{
    CommissionStatus, ShipmentStatus, UserRole, commission_referral_entity as cr,
    order_entity as orders, user_entity as users, wallet_entity as wallets,
};
use crate::error::AppResult;
use crate::external::Mailer;
use crate::models::{MaturationRunResponse, MaturedCommissionItem, SkippedCommissionItem};
use chrono::{DateTime, Duration, Utc};
use sea_orm::sea_query::{Alias, Expr};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, TransactionTrait};

/// First failing maturity check for a pending commission, or `Ok` when it can
/// be auto-approved. Checks run in a fixed order and the first failure wins.
pub(crate) fn check_eligibility(
    commission: &cr::Model,
    order: Option<&orders::Model>,
    has_wallet: bool,
    now: DateTime<Utc>,
    maturation_days: i64,
) -> Result<(), String> {
    let Some(order) = order else {
        return Err("Order not found".to_string());
    };

    if order.shipment_status != ShipmentStatus::Delivered {
        return Err("Order not delivered".to_string());
    }

    // eligible exactly at the boundary: an order created `maturation_days`
    // ago matures on this run
    let order_created = order.created_at.unwrap_or(now);
    if order_created > now - Duration::days(maturation_days) {
        return Err(format!("Order not {maturation_days} days old"));
    }

    if commission.commission_amount <= 0 {
        return Err("Commission amount not positive".to_string());
    }

    if !has_wallet {
        return Err("Referrer has no wallet".to_string());
    }

    Ok(())
}

/// Auto-approves matured commissions. Scheduled nightly from
/// `tasks::spawn_all`, also triggerable from the admin API with identical
/// behavior.
#[derive(Clone)]
pub struct MaturationService {
    pool: DatabaseConnection,
    mailer: Mailer,
    config: CommissionConfig,
}

impl MaturationService {
    pub fn new(pool: DatabaseConnection, mailer: Mailer, config: CommissionConfig) -> Self {
        Self {
            pool,
            mailer,
            config,
        }
    }

    /// One full scan over every `awaiting_approval` commission. A failure on
    /// one commission is logged and the scan moves on; only an error loading
    /// the scan itself aborts the run, leaving the remainder for the next one.
    pub async fn run(&self) -> AppResult<MaturationRunResponse> {
        let now = Utc::now();

        let pending = cr::Entity::find()
            .filter(cr::Column::Status.eq(CommissionStatus::AwaitingApproval))
            .all(&self.pool)
            .await?;

        log::info!("Maturation run: {} commissions awaiting approval", pending.len());

        let mut approved = Vec::new();
        let mut skipped = Vec::new();
        let mut total_amount = 0i64;

        for commission in pending {
            match self.process_one(&commission, now).await {
                Ok(None) => {
                    total_amount += commission.commission_amount;
                    approved.push(MaturedCommissionItem {
                        commission_id: commission.id,
                        user_id: commission.user_id,
                        order_id: commission.order_id,
                        amount: commission.commission_amount,
                    });
                }
                Ok(Some(reason)) => {
                    skipped.push(SkippedCommissionItem {
                        commission_id: commission.id,
                        reason,
                    });
                }
                Err(e) => {
                    log::error!("Maturation of commission {} failed: {e:?}", commission.id);
                    skipped.push(SkippedCommissionItem {
                        commission_id: commission.id,
                        reason: "Processing error".to_string(),
                    });
                }
            }
        }

        let report = MaturationRunResponse {
            approved_count: approved.len() as i64,
            skipped_count: skipped.len() as i64,
            total_amount_approved: total_amount,
            approved,
            skipped,
        };

        log::info!(
            "Maturation run finished: {} approved ({} kobo), {} skipped",
            report.approved_count,
            report.total_amount_approved,
            report.skipped_count
        );

        self.send_admin_digest(&report).await;

        Ok(report)
    }

    /// Returns `Ok(None)` when the commission was approved, `Ok(Some(reason))`
    /// when it was skipped.
    async fn process_one(
        &self,
        commission: &cr::Model,
        now: DateTime<Utc>,
    ) -> AppResult<Option<String>> {
        let order = orders::Entity::find_by_id(commission.order_id)
            .one(&self.pool)
            .await?;
        let wallet = wallets::Entity::find()
            .filter(wallets::Column::UserId.eq(commission.user_id))
            .one(&self.pool)
            .await?;

        if let Err(reason) = check_eligibility(
            commission,
            order.as_ref(),
            wallet.is_some(),
            now,
            self.config.maturation_days,
        ) {
            return Ok(Some(reason));
        }

        let amount = commission.commission_amount;

        let txn = self.pool.begin().await?;

        // same guarded flip as the manual path; a re-run or a concurrent
        // admin approval makes this a no-op
        let flipped = cr::Entity::update_many()
            .col_expr(
                cr::Column::Status,
                Expr::val(CommissionStatus::Approved).as_enum(Alias::new("commission_status")),
            )
            .col_expr(cr::Column::UpdatedAt, Expr::value(now))
            .filter(cr::Column::Id.eq(commission.id))
            .filter(cr::Column::Status.eq(CommissionStatus::AwaitingApproval))
            .exec(&txn)
            .await?;
        if flipped.rows_affected == 0 {
            return Ok(Some("Already processed".to_string()));
        }

        wallets::Entity::update_many()
            .col_expr(
                wallets::Column::AwaitingApproval,
                Expr::col(wallets::Column::AwaitingApproval).sub(amount),
            )
            .col_expr(
                wallets::Column::AvailableForWithdrawal,
                Expr::col(wallets::Column::AvailableForWithdrawal).add(amount),
            )
            .col_expr(wallets::Column::UpdatedAt, Expr::value(now))
            .filter(wallets::Column::UserId.eq(commission.user_id))
            .exec(&txn)
            .await?;

        txn.commit().await?;

        Ok(None)
    }

    /// One summary email per run to every admin; failures are logged only and
    /// never disturb the already-committed approvals.
    async fn send_admin_digest(&self, report: &MaturationRunResponse) {
        let admins = match users::Entity::find()
            .filter(users::Column::Role.eq(UserRole::Admin))
            .all(&self.pool)
            .await
        {
            Ok(admins) => admins,
            Err(e) => {
                log::error!("Failed to load admin users for maturation digest: {e:?}");
                return;
            }
        };

        if admins.is_empty() {
            log::warn!("No admin users found; skipping maturation digest");
            return;
        }

        let mut body = format!(
            "<p>Nightly commission maturation finished.</p>\
             <p>{} approved for a total of &#8358;{:.2}; {} skipped.</p>",
            report.approved_count,
            report.total_amount_approved as f64 / 100.0,
            report.skipped_count
        );

        if !report.approved.is_empty() {
            body.push_str("<h3>Approved</h3><ul>");
            for item in &report.approved {
                body.push_str(&format!(
                    "<li>Commission #{} (order #{}, user #{}): &#8358;{:.2}</li>",
                    item.commission_id,
                    item.order_id,
                    item.user_id,
                    item.amount as f64 / 100.0
                ));
            }
            body.push_str("</ul>");
        }

        if !report.skipped.is_empty() {
            body.push_str("<h3>Skipped</h3><ul>");
            for item in &report.skipped {
                body.push_str(&format!(
                    "<li>Commission #{}: {}</li>",
                    item.commission_id, item.reason
                ));
            }
            body.push_str("</ul>");
        }

        let recipients: Vec<String> = admins.into_iter().map(|u| u.email).collect();
        self.mailer
            .send_many(&recipients, "Commission maturation report", &body)
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        CommissionSource, OrderWithdrawalStatus, PaymentStatus, ShipmentStatus,
    };

    fn commission(amount: i64) -> cr::Model {
        cr::Model {
            id: 1,
            user_id: 10,
            order_id: 100,
            product_id: None,
            source: CommissionSource::ReferralCode,
            purchase_amount: amount * 5,
            commission_percentage: "20".to_string(),
            commission_amount: amount,
            status: CommissionStatus::AwaitingApproval,
            created_at: Some(Utc::now()),
            updated_at: Some(Utc::now()),
        }
    }

    fn order(shipment_status: ShipmentStatus, age_days: i64, now: DateTime<Utc>) -> orders::Model {
        orders::Model {
            id: 100,
            user_id: None,
            buyer_name: "Adaeze Obi".to_string(),
            buyer_email: "adaeze@example.com".to_string(),
            total_amount: 1_000_000,
            payment_reference: "bk_test".to_string(),
            payment_status: PaymentStatus::Paid,
            shipment_status,
            referral_code: Some("483920".to_string()),
            referral_slug: None,
            withdrawal_status: OrderWithdrawalStatus::NotRequested,
            created_at: Some(now - Duration::days(age_days)),
            updated_at: Some(now),
        }
    }

    #[test]
    fn test_missing_order_is_skipped() {
        let now = Utc::now();
        let result = check_eligibility(&commission(200_000), None, true, now, 30);
        assert_eq!(result, Err("Order not found".to_string()));
    }

    #[test]
    fn test_undelivered_order_is_skipped() {
        let now = Utc::now();
        let order = order(ShipmentStatus::Shipped, 45, now);
        let result = check_eligibility(&commission(200_000), Some(&order), true, now, 30);
        assert_eq!(result, Err("Order not delivered".to_string()));
    }

    #[test]
    fn test_29_day_old_order_is_skipped() {
        let now = Utc::now();
        let order = order(ShipmentStatus::Delivered, 29, now);
        let result = check_eligibility(&commission(200_000), Some(&order), true, now, 30);
        assert_eq!(result, Err("Order not 30 days old".to_string()));
    }

    #[test]
    fn test_30_day_old_order_is_eligible() {
        let now = Utc::now();
        let order = order(ShipmentStatus::Delivered, 30, now);
        let result = check_eligibility(&commission(200_000), Some(&order), true, now, 30);
        assert_eq!(result, Ok(()));
    }

    #[test]
    fn test_older_order_is_eligible() {
        let now = Utc::now();
        let order = order(ShipmentStatus::Delivered, 90, now);
        let result = check_eligibility(&commission(200_000), Some(&order), true, now, 30);
        assert_eq!(result, Ok(()));
    }

    #[test]
    fn test_non_positive_amount_is_skipped() {
        let now = Utc::now();
        let order = order(ShipmentStatus::Delivered, 45, now);
        let result = check_eligibility(&commission(0), Some(&order), true, now, 30);
        assert_eq!(result, Err("Commission amount not positive".to_string()));
    }

    #[test]
    fn test_missing_wallet_is_skipped() {
        let now = Utc::now();
        let order = order(ShipmentStatus::Delivered, 45, now);
        let result = check_eligibility(&commission(200_000), Some(&order), false, now, 30);
        assert_eq!(result, Err("Referrer has no wallet".to_string()));
    }

    #[test]
    fn test_checks_run_in_order() {
        // undelivered AND too young: the delivery check fires first
        let now = Utc::now();
        let order = order(ShipmentStatus::Pending, 3, now);
        let result = check_eligibility(&commission(200_000), Some(&order), false, now, 30);
        assert_eq!(result, Err("Order not delivered".to_string()));
    }
}
