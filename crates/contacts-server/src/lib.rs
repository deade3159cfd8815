//! # contacts-server
//!
//! Axum HTTP server for the contacts app.
//!
//! - `GET /`: root loader, renders the sidebar layout (or loader JSON with `?_data`)
//! - `POST /`: root action, creates an empty contact and redirects to its edit page
//! - `POST /contacts/{contact_id}/destroy`: deletes a contact and redirects home
//! - `GET /health`, `GET /app.css`, `GET /app.js`

pub mod assets;
pub mod error;
pub mod health;
pub mod navigation;
pub mod routes;
pub mod server;
pub mod shutdown;
pub mod view;

pub use error::AppError;
pub use server::{build_router, start, AppState, ServerHandle};

#[cfg(test)]
pub(crate) mod testutil;
