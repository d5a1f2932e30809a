//! Orchestration and writes
//!
//! The read side ([`FetchOrchestrator`]) and the write side
//! ([`MutationGateway`]) are the only two writers of the entity store.

pub mod gateway;
pub mod import;
pub mod orchestrator;

pub use gateway::{BulkImport, MarkAllRead, MutationError, MutationGateway};
pub use import::{read_roster, validate_rows, ImportError, RejectedRow, StudentImportRow};
pub use orchestrator::{FetchError, FetchOrchestrator, InitReport};
