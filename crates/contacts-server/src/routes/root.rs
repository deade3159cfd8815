//! `/`: contact list loader and the "New" action.

use axum::extract::State;
use axum::http::Uri;
use axum::response::{Html, IntoResponse, Json, Redirect, Response};
use contacts_core::{Contact, ContactId};
use contacts_store::ContactStore;
use serde::Serialize;
use tracing::info;

use crate::error::AppError;
use crate::navigation::Navigation;
use crate::server::AppState;
use crate::view;

/// Query parameters accepted by `GET /`.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RootParams {
    /// Free-text contact filter. Absent and empty are different: `?q=` is `Some("")`.
    pub q: Option<String>,
    /// The client wants loader data instead of HTML.
    pub data: bool,
}

impl RootParams {
    /// Read `q` and `_data` from a raw query string.
    ///
    /// Never fails: a repeated `q` keeps the first value and malformed
    /// percent-escapes decode lossily.
    pub fn from_query(query: Option<&str>) -> Self {
        let mut params = Self::default();
        let Some(query) = query else {
            return params;
        };
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "q" if params.q.is_none() => params.q = Some(value.into_owned()),
                "_data" => params.data = true,
                _ => {}
            }
        }
        params
    }
}

/// What the root loader hands to the view.
#[derive(Clone, Debug, Serialize)]
pub struct RootData {
    pub contacts: Vec<Contact>,
    pub q: Option<String>,
}

pub fn loader(store: &dyn ContactStore, q: Option<String>) -> Result<RootData, AppError> {
    let contacts = store.list(q.as_deref())?;
    Ok(RootData { contacts, q })
}

/// Create an empty contact; returns where the browser should go next.
pub fn action(store: &dyn ContactStore) -> Result<String, AppError> {
    let contact = store.create_empty()?;
    info!(contact_id = %contact.id, "created contact");
    Ok(edit_path(&contact.id))
}

pub fn edit_path(id: &ContactId) -> String {
    format!("/contacts/{id}/edit")
}

/// GET /
pub async fn get_root(State(state): State<AppState>, uri: Uri) -> Result<Response, AppError> {
    let params = RootParams::from_query(uri.query());
    let data = loader(state.store.as_ref(), params.q)?;
    if params.data {
        return Ok(Json(data).into_response());
    }
    let html = view::render_root(&data, &Navigation::idle(), uri.path());
    Ok(Html(html).into_response())
}

/// POST /
pub async fn post_root(State(state): State<AppState>) -> Result<Redirect, AppError> {
    let location = action(state.store.as_ref())?;
    Ok(Redirect::to(&location))
}
