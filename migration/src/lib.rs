pub use sea_orm_migration::prelude::*;

mod m20200715_000001_create_catalog;
mod m20200716_000001_create_cast_and_accounts;
mod m20200716_000002_relax_favorite_index;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20200715_000001_create_catalog::Migration),
            Box::new(m20200716_000001_create_cast_and_accounts::Migration),
            Box::new(m20200716_000002_relax_favorite_index::Migration),
        ]
    }
}
