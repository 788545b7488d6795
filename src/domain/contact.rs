//! Contact entity and related types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A contact row. Optional fields serialize as `null` rather than being
/// omitted; API consumers rely on every key being present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub company: Option<String>,
}

/// Contact creation data transfer object.
///
/// Name and email are optional here because the wire shape may omit them;
/// their presence is enforced at runtime (eagerly in the service layer and
/// again in the repository), not by the deserializer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewContact {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub company: Option<String>,
}

/// A contact together with the names of the groups it belongs to.
///
/// Read-time projection, never persisted. Group name order carries no
/// meaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactWithGroups {
    #[serde(flatten)]
    pub contact: Contact,
    pub groups: Vec<String>,
}

impl ContactWithGroups {
    pub fn new(contact: Contact, groups: Vec<String>) -> Self {
        Self { contact, groups }
    }
}
