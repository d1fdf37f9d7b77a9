pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_people_tables;
mod m20250301_000002_create_academic_tables;
mod m20250301_000003_create_billing_tables;
mod m20250301_000004_create_financial_tables;
mod m20250301_000005_create_notification_tables;
mod m20250301_000006_create_system_settings;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_people_tables::Migration),
            Box::new(m20250301_000002_create_academic_tables::Migration),
            Box::new(m20250301_000003_create_billing_tables::Migration),
            Box::new(m20250301_000004_create_financial_tables::Migration),
            Box::new(m20250301_000005_create_notification_tables::Migration),
            Box::new(m20250301_000006_create_system_settings::Migration),
        ]
    }
}
