//! Contact repository.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use super::entities::contact::{self, Entity as ContactEntity};
use crate::domain::{Contact, NewContact};
use crate::errors::{AppError, AppResult, ValidationKind};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Contact repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// List all contacts, store-default order
    async fn list(&self) -> AppResult<Vec<Contact>>;

    /// Insert a contact, returning the generated id.
    /// Name and email must be present; checked before any store call.
    async fn create(&self, contact: NewContact) -> AppResult<i32>;

    /// Find a contact by id; `None` when no row matches
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Contact>>;

    /// Exact-match name search
    async fn find_by_name(&self, name: &str) -> AppResult<Vec<Contact>>;

    /// Delete a contact, returning the deleted id or `None` when no row
    /// matched
    async fn delete(&self, id: i32) -> AppResult<Option<i32>>;
}

/// Concrete implementation of ContactRepository
pub struct ContactStore {
    db: DatabaseConnection,
}

impl ContactStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ContactRepository for ContactStore {
    async fn list(&self) -> AppResult<Vec<Contact>> {
        let models = ContactEntity::find()
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Contact::from).collect())
    }

    async fn create(&self, contact: NewContact) -> AppResult<i32> {
        let (Some(name), Some(email)) = (contact.name, contact.email) else {
            return Err(AppError::validation(
                ValidationKind::MissingContactFields,
                "Name and Email must be provided.",
            ));
        };

        let active = contact::ActiveModel {
            name: Set(name),
            email: Set(email),
            phone: Set(contact.phone),
            birthday: Set(contact.birthday),
            company: Set(contact.company),
            ..Default::default()
        };

        let result = ContactEntity::insert(active)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.last_insert_id)
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Contact>> {
        let result = ContactEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Contact::from))
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Vec<Contact>> {
        let models = ContactEntity::find()
            .filter(contact::Column::Name.eq(name))
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Contact::from).collect())
    }

    async fn delete(&self, id: i32) -> AppResult<Option<i32>> {
        let result = ContactEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok((result.rows_affected > 0).then_some(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn incomplete_contact() -> NewContact {
        NewContact {
            email: Some("patty@aol.com".to_string()),
            phone: Some("555-888-1234".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_without_name_fails_before_any_store_call() {
        // A disconnected handle proves the store is never reached.
        let store = ContactStore::new(DatabaseConnection::default());

        let err = store.create(incomplete_contact()).await.unwrap_err();
        assert_eq!(
            err.validation_kind(),
            Some(ValidationKind::MissingContactFields)
        );
        assert_eq!(err.user_message(), "Name and Email must be provided.");
    }

    #[tokio::test]
    async fn create_without_email_fails_before_any_store_call() {
        let store = ContactStore::new(DatabaseConnection::default());

        let contact = NewContact {
            name: Some("Patty".to_string()),
            ..Default::default()
        };
        let err = store.create(contact).await.unwrap_err();
        assert_eq!(
            err.validation_kind(),
            Some(ValidationKind::MissingContactFields)
        );
    }

    #[tokio::test]
    async fn delete_reports_the_not_found_sentinel() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();
        let store = ContactStore::new(db);

        assert_eq!(store.delete(42).await.unwrap(), None);
    }

    #[tokio::test]
    async fn delete_returns_the_deleted_id() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();
        let store = ContactStore::new(db);

        assert_eq!(store.delete(7).await.unwrap(), Some(7));
    }

    #[tokio::test]
    async fn find_by_name_maps_rows_to_domain_contacts() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![contact::Model {
                id: 3,
                name: "Binnie Graves".to_string(),
                email: "binnie@example.com".to_string(),
                phone: Some("56-(651)166-6577".to_string()),
                birthday: None,
                company: None,
            }]])
            .into_connection();
        let store = ContactStore::new(db);

        let found = store.find_by_name("Binnie Graves").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].phone.as_deref(), Some("56-(651)166-6577"));
    }
}
