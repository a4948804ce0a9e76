//! crates/purchase_core/src/ports.rs
//!
//! Defines the service contracts (traits) the dispatcher depends on.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of the HTTP client and of wall-clock time.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::CollectionPayload;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PortError {
    /// The outbound call to the collection endpoint could not be made.
    #[error("Dispatch failed: {0}")]
    Transport(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait CollectionEndpoint: Send + Sync {
    /// Sends one payload to the remote collection service.
    ///
    /// Implementations report only whether the request left the process.
    /// The response status and body are never inspected.
    async fn deliver(&self, payload: &CollectionPayload) -> PortResult<()>;
}

/// A source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// The real wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
