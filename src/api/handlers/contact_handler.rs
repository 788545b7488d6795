//! Contact handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;

use crate::api::AppState;
use crate::domain::{ContactWithGroups, NewContact};
use crate::errors::{AppError, AppResult, ValidationKind};
use crate::types::{Created, IdResponse};

/// Contact creation request: the contact fields plus the names of groups to
/// enrol it in. Unknown group names are created on the fly.
#[derive(Debug, Deserialize)]
pub struct CreateContactRequest {
    pub contact: NewContact,
    #[serde(default)]
    pub groups: Vec<String>,
}

/// Create contact routes
pub fn contact_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_contacts).post(create_contact))
        .route("/:id", get(get_contact).delete(delete_contact))
}

/// List all contacts with their group names
pub async fn list_contacts(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ContactWithGroups>>> {
    let contacts = state.address_book.list_contacts_with_groups().await?;
    Ok(Json(contacts))
}

/// Fetch one contact with its group names.
///
/// An unparsable id and an unknown id answer alike; the legacy wire contract
/// uses one message for both.
pub async fn get_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ContactWithGroups>> {
    let invalid = || AppError::NotFound("Please provide a valid contact ID".to_string());

    let id: i32 = id.parse().map_err(|_| invalid())?;

    let contact = state
        .address_book
        .get_contact_with_groups(id)
        .await?
        .ok_or_else(invalid)?;

    Ok(Json(contact))
}

/// Create a contact and enrol it in the requested groups
pub async fn create_contact(
    State(state): State<AppState>,
    Json(payload): Json<CreateContactRequest>,
) -> AppResult<Created<IdResponse>> {
    // The name check happens here too so the boundary can keep its own
    // wording; the service repeats it with its own message.
    if payload
        .contact
        .name
        .as_deref()
        .map_or(true, |n| n.trim().is_empty())
    {
        return Err(AppError::validation(
            ValidationKind::MissingName,
            "Please provide a name",
        ));
    }

    let id = state
        .address_book
        .create_contact_with_groups(payload.contact, payload.groups)
        .await?;

    Ok(Created(IdResponse::new(id, "Contact created")))
}

/// Delete a contact and its memberships
pub async fn delete_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<IdResponse>> {
    let id: i32 = id.parse().map_err(|_| {
        AppError::validation(
            ValidationKind::InvalidContactId,
            "Please provide a contact ID number",
        )
    })?;

    let deleted = state.address_book.delete_contact_and_memberships(id).await?;

    Ok(Json(IdResponse::new(deleted, "Contact deleted")))
}
