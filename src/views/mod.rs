//! Pure derivations over store contents
//!
//! Nothing here is independently mutated: every value is a function of the
//! current store snapshot (and a selection), recomputed when the inputs
//! change and handed out unchanged when they have not.

pub mod scope;
pub mod stops;

use crate::core::store::EntityStore;
use crate::entities::Notification;

pub use scope::{ScopeEngine, ScopedView};
pub use stops::{derive_stops, students_on_route, Stop};

/// Number of unacknowledged notifications
pub fn unread_notifications(store: &EntityStore) -> usize {
    store.all::<Notification>().iter().filter(|n| !n.read).count()
}
