pub use sea_orm_migration::prelude::*;

mod m20260310_000001_initial;
mod m20260324_000001_add_affiliates;
mod m20260407_000001_add_commission_ledger;
mod m20260421_000001_add_withdrawal_requests;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260310_000001_initial::Migration),
            Box::new(m20260324_000001_add_affiliates::Migration),
            Box::new(m20260407_000001_add_commission_ledger::Migration),
            Box::new(m20260421_000001_add_withdrawal_requests::Migration),
        ]
    }
}
