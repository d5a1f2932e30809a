//! Entity type definitions
//!
//! One module per entity kind: the canonical record, its create draft, its
//! update patch, and the status enums the record carries.

pub mod assignment;
pub mod driver;
pub mod notification;
pub mod route;
pub mod school;
pub mod shift;
pub mod student;
pub mod trip;

pub use assignment::{Assignment, AssignmentDraft, AssignmentPatch, AssignmentStatus};
pub use driver::{Driver, DriverDraft, DriverOtp, DriverPatch, DriverQr, DriverStatus};
pub use notification::{Notification, NotificationDraft, NotificationPatch};
pub use route::{Route, RouteDraft, RouteHealth, RoutePatch, RouteStatus, RouteType};
pub use school::{School, SchoolDraft, SchoolPatch};
pub use shift::{Shift, ShiftDraft, ShiftPatch, ShiftStatus};
pub use student::{
    GeoPoint, GuardianContact, Student, StudentDraft, StudentPatch, StudentStatus, StudentTransfer,
};
pub use trip::{Trip, TripDraft, TripPatch, TripStatus};
