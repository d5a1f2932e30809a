//! Driver facade: generic CRUD plus the sign-in credential actions

use std::ops::Deref;

use crate::entities::{Driver, DriverOtp, DriverQr};
use crate::sync::MutationError;

use super::{Collection, SyncHub};

/// Per-entity facade for drivers
pub struct Drivers<'a> {
    collection: Collection<'a, Driver>,
    hub: &'a SyncHub,
}

impl<'a> Drivers<'a> {
    pub(crate) fn new(hub: &'a SyncHub) -> Self {
        Self {
            collection: Collection::new(hub),
            hub,
        }
    }

    /// Generate a one-time sign-in code (ephemeral, never stored)
    pub async fn generate_otp(&self, driver_id: &str) -> Result<DriverOtp, MutationError> {
        self.hub.gateway().generate_driver_otp(driver_id).await
    }

    /// Fetch the QR sign-in payload (ephemeral, never stored)
    pub async fn qr_code(&self, driver_id: &str) -> Result<DriverQr, MutationError> {
        self.hub.gateway().driver_qr_code(driver_id).await
    }
}

impl<'a> Deref for Drivers<'a> {
    type Target = Collection<'a, Driver>;

    fn deref(&self) -> &Self::Target {
        &self.collection
    }
}
