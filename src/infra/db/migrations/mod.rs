//! Database migrations.
//!
//! Each migration is a separate module following SeaORM conventions.
//! Migration names follow the pattern: m{YYYYMMDD}_{NNNNNN}_{description}

use sea_orm_migration::prelude::*;

mod m20240115_000001_create_contacts_table;
mod m20240115_000002_create_groups_table;
mod m20240115_000003_create_group_members_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240115_000001_create_contacts_table::Migration),
            Box::new(m20240115_000002_create_groups_table::Migration),
            Box::new(m20240115_000003_create_group_members_table::Migration),
        ]
    }
}
