//! Notification facade: generic CRUD plus acknowledgement

use std::ops::Deref;

use crate::entities::Notification;
use crate::sync::{MarkAllRead, MutationError};
use crate::views;

use super::{Collection, SyncHub};

/// Per-entity facade for notifications
pub struct Notifications<'a> {
    collection: Collection<'a, Notification>,
    hub: &'a SyncHub,
}

impl<'a> Notifications<'a> {
    pub(crate) fn new(hub: &'a SyncHub) -> Self {
        Self {
            collection: Collection::new(hub),
            hub,
        }
    }

    /// Number of unacknowledged notifications in the cache
    pub fn unread_count(&self) -> usize {
        views::unread_notifications(self.hub.store())
    }

    /// Acknowledge one notification
    pub async fn mark_read(&self, id: &str) -> Result<Notification, MutationError> {
        self.hub.gateway().mark_read(id).await
    }

    /// Acknowledge every unread notification, recording per-id failures
    pub async fn mark_all_read(&self) -> MarkAllRead {
        self.hub.gateway().mark_all_read().await
    }
}

impl<'a> Deref for Notifications<'a> {
    type Target = Collection<'a, Notification>;

    fn deref(&self) -> &Self::Target {
        &self.collection
    }
}
