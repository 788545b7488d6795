//! Service layer - Business logic orchestration
//!
//! Services compose repository operations into the multi-step flows the API
//! exposes: attaching group names to contacts, creating a contact together
//! with its memberships, and cascading deletes across the join table.

mod address_book;

pub use address_book::{AddressBookManager, AddressBookService};
