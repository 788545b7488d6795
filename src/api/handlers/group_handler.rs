//! Group handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::delete,
    Router,
};

use crate::api::AppState;
use crate::errors::{AppError, AppResult, ValidationKind};
use crate::types::IdResponse;

/// Create group routes
pub fn group_routes() -> Router<AppState> {
    Router::new().route("/:id", delete(delete_group))
}

/// Delete a group and its memberships
pub async fn delete_group(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<IdResponse>> {
    let id: i32 = id.parse().map_err(|_| {
        AppError::validation(
            ValidationKind::InvalidGroupId,
            "Please provide a group ID number",
        )
    })?;

    let deleted = state.address_book.delete_group_and_memberships(id).await?;

    Ok(Json(IdResponse::new(deleted, "Group deleted")))
}
