//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connection management and migrations
//! - Repositories over the three relations (contacts, groups, group_members)

pub mod db;
pub mod repositories;

pub use db::{Database, Migrator};
pub use repositories::{
    ContactRepository, ContactStore, GroupRepository, GroupStore, MembershipRepository,
    MembershipStore,
};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{MockContactRepository, MockGroupRepository, MockMembershipRepository};
