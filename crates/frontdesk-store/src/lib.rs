//! # frontdesk-store
//!
//! In-memory storage for the patient-concern dashboard backend.
//!
//! Data is held for the lifetime of the process in id-keyed maps behind a
//! single [`Store`] handle with typed query and mutation helpers for every
//! domain model.  Queries are linear scan + filter + sort — deliberate at a
//! clinic's concern volume — but callers only see the typed interface, so a
//! persistent or indexed backend could replace this one without touching
//! them.

pub mod call_docs;
pub mod chat;
pub mod concerns;
pub mod images;
pub mod models;
pub mod store;
pub mod users;

pub use models::*;
pub use store::Store;
