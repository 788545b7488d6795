//! Group and membership entities.

use serde::{Deserialize, Serialize};

/// A named group of contacts. Names are unique within the group set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: i32,
    pub name: String,
}

/// Join record expressing one contact's belonging to one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    pub id: i32,
    pub contact_id: i32,
    pub group_id: i32,
}

/// One row of the group roster report: a membership flattened to
/// (group name, contact id, contact name). Ordered by group name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRosterEntry {
    pub group_name: String,
    pub contact_id: i32,
    pub contact_name: String,
}
