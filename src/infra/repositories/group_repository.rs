//! Group repository with find-or-create support.

use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
};

use super::entities::group::{self, Entity as GroupEntity};
use crate::domain::Group;
use crate::errors::{AppError, AppResult, ValidationKind};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Group repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait GroupRepository: Send + Sync {
    /// List all groups
    async fn list(&self) -> AppResult<Vec<Group>>;

    /// Insert a group. The name must be present and non-empty; checked
    /// before any store call.
    async fn create(&self, name: Option<String>) -> AppResult<Group>;

    /// Find a group by exact name; `None` when no row matches
    async fn find_by_name(&self, name: &str) -> AppResult<Option<Group>>;

    /// Look up a group by name, creating it when absent. Returns the
    /// existing or newly created row uniformly.
    async fn find_or_create(&self, name: &str) -> AppResult<Group>;

    /// Delete a group, returning the deleted id or `None` when no row
    /// matched
    async fn delete(&self, id: i32) -> AppResult<Option<i32>>;
}

/// Concrete implementation of GroupRepository
pub struct GroupStore {
    db: DatabaseConnection,
}

impl GroupStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl GroupRepository for GroupStore {
    async fn list(&self) -> AppResult<Vec<Group>> {
        let models = GroupEntity::find()
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Group::from).collect())
    }

    async fn create(&self, name: Option<String>) -> AppResult<Group> {
        let name = match name {
            Some(name) if !name.trim().is_empty() => name,
            _ => {
                return Err(AppError::validation(
                    ValidationKind::MissingGroupName,
                    "Please provide a name for the group.",
                ))
            }
        };

        let active = group::ActiveModel {
            name: Set(name),
            ..Default::default()
        };

        let model = active.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Group::from(model))
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Group>> {
        let result = GroupEntity::find()
            .filter(group::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Group::from))
    }

    async fn find_or_create(&self, name: &str) -> AppResult<Group> {
        if let Some(group) = self.find_by_name(name).await? {
            return Ok(group);
        }

        // Not found: insert, deferring duplicate-name races to the unique
        // index on groups.name. A no-op insert means a concurrent creator
        // won; either way the row exists afterwards.
        let insert = GroupEntity::insert(group::ActiveModel {
            name: Set(name.to_owned()),
            ..Default::default()
        })
        .on_conflict(OnConflict::column(group::Column::Name).do_nothing().to_owned())
        .exec(&self.db)
        .await;

        match insert {
            Ok(_) | Err(DbErr::RecordNotInserted) => {}
            Err(e) => return Err(e.into()),
        }

        self.find_by_name(name)
            .await?
            .ok_or_else(|| AppError::internal(format!("group '{}' vanished after insert", name)))
    }

    async fn delete(&self, id: i32) -> AppResult<Option<i32>> {
        let result = GroupEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok((result.rows_affected > 0).then_some(id))
    }
}
