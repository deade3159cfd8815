//! `/contacts/{contact_id}/destroy`: delete a contact.

use axum::extract::{Path, State};
use axum::response::Redirect;
use contacts_core::ContactId;
use contacts_store::ContactStore;
use serde::Deserialize;
use tracing::info;

use crate::error::{invariant, AppError};
use crate::server::AppState;

#[derive(Debug, Deserialize)]
pub struct DestroyParams {
    pub contact_id: Option<String>,
}

/// Delete the contact named by the path and send the browser home.
///
/// A missing or empty id means the route was wired wrong; nothing is deleted.
pub fn action(store: &dyn ContactStore, contact_id: Option<&str>) -> Result<&'static str, AppError> {
    let contact_id = invariant(
        contact_id.filter(|id| !id.is_empty()),
        "Missing contactId param",
    )?;
    let id = ContactId::from_raw(contact_id);
    let removed = store.delete(&id)?;
    info!(contact_id = %id, removed, "deleted contact");
    Ok("/")
}

/// POST /contacts/{contact_id}/destroy
pub async fn post_destroy(
    State(state): State<AppState>,
    Path(params): Path<DestroyParams>,
) -> Result<Redirect, AppError> {
    let location = action(state.store.as_ref(), params.contact_id.as_deref())?;
    Ok(Redirect::to(location))
}
