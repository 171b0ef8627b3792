use sea_orm_migration::prelude::*;
use sea_orm_migration::prelude::extension::postgres::Type;

#[derive(DeriveIden)]
enum CommissionReferrals {
    Table,
    Id,
    UserId,
    OrderId,
    ProductId,
    Source,
    PurchaseAmount,
    CommissionPercentage,
    CommissionAmount,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Wallets {
    Table,
    Id,
    UserId,
    TotalEarned,
    AwaitingApproval,
    AvailableForWithdrawal,
    TotalWithdrawn,
    BalanceBefore,
    BalanceAfter,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Orders {
    Table,
    Id,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(Alias::new("commission_source"))
                    .values(vec![
                        Alias::new("referral_code"),
                        Alias::new("affiliate_link"),
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_type(
                Type::create()
                    .as_enum(Alias::new("commission_status"))
                    .values(vec![
                        Alias::new("pending"),
                        Alias::new("awaiting_approval"),
                        Alias::new("approved"),
                        Alias::new("rejected"),
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CommissionReferrals::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CommissionReferrals::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CommissionReferrals::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CommissionReferrals::OrderId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CommissionReferrals::ProductId)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(CommissionReferrals::Source)
                            .custom(Alias::new("commission_source"))
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CommissionReferrals::PurchaseAmount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(CommissionReferrals::CommissionPercentage)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CommissionReferrals::CommissionAmount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(CommissionReferrals::Status)
                            .custom(Alias::new("commission_status"))
                            .not_null()
                            .default("awaiting_approval"),
                    )
                    .col(
                        ColumnDef::new(CommissionReferrals::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(
                        ColumnDef::new(CommissionReferrals::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .to_owned(),
            )
            .await?;

        // one commission per qualifying order
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_commission_referrals_order_unique")
                    .table(CommissionReferrals::Table)
                    .col(CommissionReferrals::OrderId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_commission_referrals_user")
                    .table(CommissionReferrals::Table)
                    .col(CommissionReferrals::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_commission_referrals_status")
                    .table(CommissionReferrals::Table)
                    .col(CommissionReferrals::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .alter_table(
                Table::alter()
                    .table(CommissionReferrals::Table)
                    .add_foreign_key(
                        TableForeignKey::new()
                            .name("fk_commission_referrals_order")
                            .from_tbl(CommissionReferrals::Table)
                            .from_col(CommissionReferrals::OrderId)
                            .to_tbl(Orders::Table)
                            .to_col(Orders::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Wallets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Wallets::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Wallets::UserId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Wallets::TotalEarned)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Wallets::AwaitingApproval)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Wallets::AvailableForWithdrawal)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Wallets::TotalWithdrawn)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Wallets::BalanceBefore)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Wallets::BalanceAfter)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Wallets::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(
                        ColumnDef::new(Wallets::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .to_owned(),
            )
            .await?;

        // one wallet per user
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_wallets_user_unique")
                    .table(Wallets::Table)
                    .col(Wallets::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().if_exists().table(Wallets::Table).to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(CommissionReferrals::Table)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}
