use sea_orm_migration::prelude::*;
use sea_orm_migration::prelude::extension::postgres::Type;

#[derive(DeriveIden)]
enum WithdrawalRequests {
    Table,
    Id,
    UserId,
    OrderId,
    CommissionId,
    BuyerName,
    BuyerEmail,
    PurchaseAmount,
    CommissionAmount,
    CommissionPercentage,
    PayoutMethod,
    BankCode,
    BankName,
    AccountNumber,
    Status,
    Reference,
    RequestedAt,
    ProcessedAt,
    ProcessedBy,
    Notes,
    RejectionReason,
}

#[derive(DeriveIden)]
enum Orders {
    Table,
    WithdrawalStatus,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(Alias::new("payout_status"))
                    .values(vec![
                        Alias::new("not_requested"),
                        Alias::new("pending"),
                        Alias::new("paid"),
                        Alias::new("cancelled"),
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_type(
                Type::create()
                    .as_enum(Alias::new("order_withdrawal_status"))
                    .values(vec![Alias::new("not_requested"), Alias::new("processing")])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(WithdrawalRequests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WithdrawalRequests::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(WithdrawalRequests::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WithdrawalRequests::OrderId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WithdrawalRequests::CommissionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WithdrawalRequests::BuyerName)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WithdrawalRequests::BuyerEmail)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WithdrawalRequests::PurchaseAmount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(WithdrawalRequests::CommissionAmount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(WithdrawalRequests::CommissionPercentage)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WithdrawalRequests::PayoutMethod)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WithdrawalRequests::BankCode)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WithdrawalRequests::BankName)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WithdrawalRequests::AccountNumber)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WithdrawalRequests::Status)
                            .custom(Alias::new("payout_status"))
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(WithdrawalRequests::Reference)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WithdrawalRequests::RequestedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(
                        ColumnDef::new(WithdrawalRequests::ProcessedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(WithdrawalRequests::ProcessedBy)
                            .big_integer()
                            .null(),
                    )
                    .col(ColumnDef::new(WithdrawalRequests::Notes).text().null())
                    .col(
                        ColumnDef::new(WithdrawalRequests::RejectionReason)
                            .text()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_withdrawal_requests_reference_unique")
                    .table(WithdrawalRequests::Table)
                    .col(WithdrawalRequests::Reference)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_withdrawal_requests_user_order")
                    .table(WithdrawalRequests::Table)
                    .col(WithdrawalRequests::UserId)
                    .col(WithdrawalRequests::OrderId)
                    .to_owned(),
            )
            .await?;

        manager
            .alter_table(
                Table::alter()
                    .table(Orders::Table)
                    .add_column(
                        ColumnDef::new(Orders::WithdrawalStatus)
                            .custom(Alias::new("order_withdrawal_status"))
                            .not_null()
                            .default("not_requested"),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Orders::Table)
                    .drop_column(Orders::WithdrawalStatus)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(WithdrawalRequests::Table)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}
