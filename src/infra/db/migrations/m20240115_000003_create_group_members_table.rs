//! Migration: Create the group_members join table.
//!
//! Foreign keys are RESTRICT: deleting a contact or group with live
//! memberships is rejected by the store, so callers must delete the
//! memberships first.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GroupMembers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GroupMembers::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(GroupMembers::ContactId).integer().not_null())
                    .col(ColumnDef::new(GroupMembers::GroupId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_group_members_contact")
                            .from(GroupMembers::Table, GroupMembers::ContactId)
                            .to(Contacts::Table, Contacts::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_group_members_group")
                            .from(GroupMembers::Table, GroupMembers::GroupId)
                            .to(Groups::Table, Groups::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Indexes for the two join directions
        manager
            .create_index(
                Index::create()
                    .name("idx_group_members_contact_id")
                    .table(GroupMembers::Table)
                    .col(GroupMembers::ContactId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_group_members_group_id")
                    .table(GroupMembers::Table)
                    .col(GroupMembers::GroupId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_group_members_group_id")
                    .table(GroupMembers::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_group_members_contact_id")
                    .table(GroupMembers::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(GroupMembers::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum GroupMembers {
    Table,
    Id,
    ContactId,
    GroupId,
}

#[derive(Iden)]
enum Contacts {
    Table,
    Id,
}

#[derive(Iden)]
enum Groups {
    Table,
    Id,
}
