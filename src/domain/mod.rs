//! Domain layer - Core entities of the address book.
//!
//! Pure data types with no infrastructure dependencies. SeaORM models
//! convert into these via `From` implementations in the entities module.

mod contact;
mod group;

pub use contact::{Contact, ContactWithGroups, NewContact};
pub use group::{Group, GroupRosterEntry, Membership};
