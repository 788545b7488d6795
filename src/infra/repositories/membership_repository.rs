//! Membership repository - join-table access and the cross-relation reads.

use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Set,
};

use super::entities::contact::{self, Entity as ContactEntity};
use super::entities::group::{self, Entity as GroupEntity};
use super::entities::group_member::{self, Entity as MembershipEntity};
use crate::domain::{Contact, Group, GroupRosterEntry};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Membership repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait MembershipRepository: Send + Sync {
    /// Insert one membership, returning its generated id
    async fn add(&self, contact_id: i32, group_id: i32) -> AppResult<i32>;

    /// Delete one membership pair
    async fn remove(&self, contact_id: i32, group_id: i32) -> AppResult<()>;

    /// Bulk delete all memberships of a contact
    async fn delete_for_contact(&self, contact_id: i32) -> AppResult<()>;

    /// Bulk delete all memberships of a group
    async fn delete_for_group(&self, group_id: i32) -> AppResult<()>;

    /// Groups a contact belongs to, joined through memberships
    async fn groups_for_contact(&self, contact_id: i32) -> AppResult<Vec<Group>>;

    /// Contacts belonging to the named group
    async fn members_of_group(&self, group_name: &str) -> AppResult<Vec<Contact>>;

    /// Flat (group name, contact id, contact name) report over every
    /// membership, ordered by group name
    async fn group_roster(&self) -> AppResult<Vec<GroupRosterEntry>>;
}

/// Row shape of the roster report query
#[derive(Debug, FromQueryResult)]
struct RosterRow {
    group_name: String,
    contact_id: i32,
    contact_name: String,
}

/// Concrete implementation of MembershipRepository
pub struct MembershipStore {
    db: DatabaseConnection,
}

impl MembershipStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MembershipRepository for MembershipStore {
    async fn add(&self, contact_id: i32, group_id: i32) -> AppResult<i32> {
        let active = group_member::ActiveModel {
            contact_id: Set(contact_id),
            group_id: Set(group_id),
            ..Default::default()
        };

        let result = MembershipEntity::insert(active)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.last_insert_id)
    }

    async fn remove(&self, contact_id: i32, group_id: i32) -> AppResult<()> {
        MembershipEntity::delete_many()
            .filter(group_member::Column::ContactId.eq(contact_id))
            .filter(group_member::Column::GroupId.eq(group_id))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(())
    }

    async fn delete_for_contact(&self, contact_id: i32) -> AppResult<()> {
        MembershipEntity::delete_many()
            .filter(group_member::Column::ContactId.eq(contact_id))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(())
    }

    async fn delete_for_group(&self, group_id: i32) -> AppResult<()> {
        MembershipEntity::delete_many()
            .filter(group_member::Column::GroupId.eq(group_id))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(())
    }

    async fn groups_for_contact(&self, contact_id: i32) -> AppResult<Vec<Group>> {
        let models = GroupEntity::find()
            .join(JoinType::InnerJoin, group_member::Relation::Group.def().rev())
            .filter(group_member::Column::ContactId.eq(contact_id))
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Group::from).collect())
    }

    async fn members_of_group(&self, group_name: &str) -> AppResult<Vec<Contact>> {
        let models = ContactEntity::find()
            .join(
                JoinType::InnerJoin,
                group_member::Relation::Contact.def().rev(),
            )
            .join(JoinType::InnerJoin, group_member::Relation::Group.def())
            .filter(group::Column::Name.eq(group_name))
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Contact::from).collect())
    }

    async fn group_roster(&self) -> AppResult<Vec<GroupRosterEntry>> {
        let rows = ContactEntity::find()
            .select_only()
            .column_as(group::Column::Name, "group_name")
            .column_as(contact::Column::Id, "contact_id")
            .column_as(contact::Column::Name, "contact_name")
            .join(
                JoinType::InnerJoin,
                group_member::Relation::Contact.def().rev(),
            )
            .join(JoinType::InnerJoin, group_member::Relation::Group.def())
            .order_by_asc(group::Column::Name)
            .into_model::<RosterRow>()
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(rows
            .into_iter()
            .map(|row| GroupRosterEntry {
                group_name: row.group_name,
                contact_id: row.contact_id,
                contact_name: row.contact_name,
            })
            .collect())
    }
}
