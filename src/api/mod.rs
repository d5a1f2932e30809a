//! REST backend boundary
//!
//! The sync core talks to the backend through the object-safe [`BackendApi`]
//! trait, JSON values at the seam. [`HttpBackend`] is the production
//! implementation; tests substitute a scripted mock.

pub mod client;
pub mod http;

use thiserror::Error;

/// Errors crossing the backend boundary
///
/// Cloneable by construction (string payloads only): fetch results are shared
/// between coalesced callers, so every error on the fetch path must clone.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, connect, timeout)
    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },

    /// The backend answered with a non-2xx status
    #[error("Backend returned {status} for {url}: {body}")]
    Status { url: String, status: u16, body: String },

    /// The response body was not the JSON shape we asked for
    #[error("Failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },

    /// The HTTP client itself could not be constructed
    #[error("Failed to build HTTP client: {message}")]
    Client { message: String },
}

pub use client::BackendApi;
pub use http::HttpBackend;
