//! Repository layer - Data access abstraction
//!
//! Repositories translate domain requests into parameterized statements
//! against the store. Each operation maps to exactly one SQL statement and
//! performs only shape/presence validation - business rules live in the
//! service layer. `Option` is the not-found sentinel for single-row lookups.

pub(crate) mod entities;

mod contact_repository;
mod group_repository;
mod membership_repository;

pub use contact_repository::{ContactRepository, ContactStore};
pub use group_repository::{GroupRepository, GroupStore};
pub use membership_repository::{MembershipRepository, MembershipStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use contact_repository::MockContactRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use group_repository::MockGroupRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use membership_repository::MockMembershipRepository;
