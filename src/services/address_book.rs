//! Address book orchestration over the contact, group and membership
//! repositories.

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::try_join_all;

use crate::domain::{Contact, ContactWithGroups, NewContact};
use crate::errors::{AppError, AppResult, ValidationKind};
use crate::infra::repositories::{ContactRepository, GroupRepository, MembershipRepository};

/// Orchestrated address book operations consumed by the API layer.
#[async_trait]
pub trait AddressBookService: Send + Sync {
    /// Every contact, each with its group names attached
    async fn list_contacts_with_groups(&self) -> AppResult<Vec<ContactWithGroups>>;

    /// One contact with its group names; `None` when the id is unknown
    async fn get_contact_with_groups(&self, id: i32) -> AppResult<Option<ContactWithGroups>>;

    /// Create a contact and enrol it in the named groups, creating any
    /// group that does not exist yet. Returns the new contact's id.
    async fn create_contact_with_groups(
        &self,
        contact: NewContact,
        groups: Vec<String>,
    ) -> AppResult<i32>;

    /// Delete a contact after clearing its memberships. Errors with
    /// `NotFound` when the id matches nothing.
    async fn delete_contact_and_memberships(&self, id: i32) -> AppResult<i32>;

    /// Delete a group after clearing its memberships. Errors with
    /// `NotFound` when the id matches nothing.
    async fn delete_group_and_memberships(&self, id: i32) -> AppResult<i32>;
}

/// Production implementation wired to the three repositories.
pub struct AddressBookManager {
    contacts: Arc<dyn ContactRepository>,
    groups: Arc<dyn GroupRepository>,
    memberships: Arc<dyn MembershipRepository>,
}

impl AddressBookManager {
    pub fn new(
        contacts: Arc<dyn ContactRepository>,
        groups: Arc<dyn GroupRepository>,
        memberships: Arc<dyn MembershipRepository>,
    ) -> Self {
        Self {
            contacts,
            groups,
            memberships,
        }
    }

    /// Fetch group names for one contact and pair them up.
    async fn attach_group_names(&self, contact: Contact) -> AppResult<ContactWithGroups> {
        let groups = self.memberships.groups_for_contact(contact.id).await?;
        let names = groups.into_iter().map(|g| g.name).collect();
        Ok(ContactWithGroups::new(contact, names))
    }
}

fn is_blank(value: Option<&String>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

#[async_trait]
impl AddressBookService for AddressBookManager {
    async fn list_contacts_with_groups(&self) -> AppResult<Vec<ContactWithGroups>> {
        let contacts = self.contacts.list().await?;

        // One group lookup per contact, concurrently; the first failure
        // aborts the whole listing.
        try_join_all(
            contacts
                .into_iter()
                .map(|contact| self.attach_group_names(contact)),
        )
        .await
    }

    async fn get_contact_with_groups(&self, id: i32) -> AppResult<Option<ContactWithGroups>> {
        let Some(contact) = self.contacts.find_by_id(id).await? else {
            return Ok(None);
        };

        Ok(Some(self.attach_group_names(contact).await?))
    }

    async fn create_contact_with_groups(
        &self,
        contact: NewContact,
        groups: Vec<String>,
    ) -> AppResult<i32> {
        // Validate eagerly so no group rows are created for a contact that
        // can never be inserted.
        if is_blank(contact.name.as_ref()) {
            return Err(AppError::validation(
                ValidationKind::MissingName,
                "Contact must have a name",
            ));
        }
        if is_blank(contact.email.as_ref()) {
            return Err(AppError::validation(
                ValidationKind::MissingEmail,
                "Contact must have an email",
            ));
        }

        let contact_id = self.contacts.create(contact).await?;

        let resolved = try_join_all(groups.iter().map(|name| self.groups.find_or_create(name)))
            .await?;

        try_join_all(
            resolved
                .iter()
                .map(|group| self.memberships.add(contact_id, group.id)),
        )
        .await?;

        Ok(contact_id)
    }

    async fn delete_contact_and_memberships(&self, id: i32) -> AppResult<i32> {
        // Memberships first, then the owning row; the contact delete doubles
        // as the existence check.
        self.memberships.delete_for_contact(id).await?;

        self.contacts
            .delete(id)
            .await?
            .ok_or_else(|| AppError::not_found("Contact"))
    }

    async fn delete_group_and_memberships(&self, id: i32) -> AppResult<i32> {
        self.memberships.delete_for_group(id).await?;

        self.groups
            .delete(id)
            .await?
            .ok_or_else(|| AppError::not_found("Group"))
    }
}
