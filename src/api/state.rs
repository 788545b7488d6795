//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::infra::repositories::{ContactStore, GroupStore, MembershipStore};
use crate::infra::Database;
use crate::services::{AddressBookManager, AddressBookService};

/// Application state shared by every handler.
///
/// Holds the orchestration service behind its trait so tests can swap in a
/// fake, plus the database handle for health reporting.
#[derive(Clone)]
pub struct AppState {
    /// Address book orchestration service
    pub address_book: Arc<dyn AddressBookService>,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Wire the production stores and service over one database handle.
    pub fn from_database(database: Database) -> Self {
        let connection = database.get_connection();

        let address_book = AddressBookManager::new(
            Arc::new(ContactStore::new(connection.clone())),
            Arc::new(GroupStore::new(connection.clone())),
            Arc::new(MembershipStore::new(connection)),
        );

        Self {
            address_book: Arc::new(address_book),
            database: Arc::new(database),
        }
    }

    /// Create application state with a manually injected service.
    pub fn new(address_book: Arc<dyn AddressBookService>, database: Arc<Database>) -> Self {
        Self {
            address_book,
            database,
        }
    }
}
