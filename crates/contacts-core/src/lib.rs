//! # contacts-core
//!
//! Domain types shared by the store and the server: the [`Contact`] record,
//! its [`ContactId`], and the query matching used to filter the contact list.

pub mod contact;
pub mod ids;
pub mod search;

pub use contact::{Contact, ContactSeed};
pub use ids::ContactId;
