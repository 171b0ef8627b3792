use sea_orm_migration::prelude::*;
use sea_orm_migration::prelude::extension::postgres::Type;

#[derive(DeriveIden)]
enum Affiliates {
    Table,
    Id,
    UserId,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum AffiliateLinks {
    Table,
    Id,
    UserId,
    ProductId,
    Slug,
    Clicks,
    Orders,
    Commission,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Products {
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
                    .as_enum(Alias::new("affiliate_status"))
                    .values(vec![
                        Alias::new("not_affiliate"),
                        Alias::new("pending"),
                        Alias::new("approved"),
                        Alias::new("rejected"),
                        Alias::new("active"),
                        Alias::new("inactive"),
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Affiliates::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Affiliates::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Affiliates::UserId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Affiliates::Status)
                            .custom(Alias::new("affiliate_status"))
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(Affiliates::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(
                        ColumnDef::new(Affiliates::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_affiliates_user_unique")
                    .table(Affiliates::Table)
                    .col(Affiliates::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AffiliateLinks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AffiliateLinks::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AffiliateLinks::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AffiliateLinks::ProductId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AffiliateLinks::Slug).string_len(64).not_null())
                    .col(
                        ColumnDef::new(AffiliateLinks::Clicks)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(AffiliateLinks::Orders)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(AffiliateLinks::Commission)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(AffiliateLinks::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(
                        ColumnDef::new(AffiliateLinks::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_affiliate_links_slug_unique")
                    .table(AffiliateLinks::Table)
                    .col(AffiliateLinks::Slug)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // one link per (affiliate user, product)
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_affiliate_links_user_product_unique")
                    .table(AffiliateLinks::Table)
                    .col(AffiliateLinks::UserId)
                    .col(AffiliateLinks::ProductId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .alter_table(
                Table::alter()
                    .table(AffiliateLinks::Table)
                    .add_foreign_key(
                        TableForeignKey::new()
                            .name("fk_affiliate_links_product")
                            .from_tbl(AffiliateLinks::Table)
                            .from_col(AffiliateLinks::ProductId)
                            .to_tbl(Products::Table)
                            .to_col(Products::Id),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(AffiliateLinks::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(Affiliates::Table).to_owned())
            .await?;

        Ok(())
    }
}
