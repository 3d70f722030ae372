//! Store handle and backing tables.
//!
//! The [`Store`] wraps five id-keyed maps behind a single `tokio` RwLock.
//! It is constructed explicitly at startup and cloned into whatever needs
//! it (axum state, tests), so there is no ambient global to reset between
//! tests.
//!
//! Updates are copy-on-write: a mutation builds a fresh record value and
//! replaces the map entry, so a reader holding a previously returned clone
//! never observes a half-written record.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

use crate::models::{CallDoc, ChatMessage, Concern, Image, User};

#[derive(Debug, Default)]
pub(crate) struct Tables {
    pub(crate) users: HashMap<Uuid, User>,
    pub(crate) concerns: HashMap<Uuid, Concern>,
    pub(crate) call_docs: HashMap<Uuid, CallDoc>,
    pub(crate) images: HashMap<Uuid, Image>,
    pub(crate) chat_messages: HashMap<Uuid, ChatMessage>,
}

/// Process-lifetime, in-memory storage for all five entity kinds.
///
/// Cloning is cheap and every clone sees the same data.
#[derive(Debug, Clone, Default)]
pub struct Store {
    inner: Arc<RwLock<Tables>>,
}

impl Store {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) async fn tables(&self) -> RwLockReadGuard<'_, Tables> {
        self.inner.read().await
    }

    pub(crate) async fn tables_mut(&self) -> RwLockWriteGuard<'_, Tables> {
        self.inner.write().await
    }
}
