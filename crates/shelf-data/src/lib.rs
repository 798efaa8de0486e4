//! Data access layer for the catalog service.
//!
//! This crate provides:
//! - `CatalogApi` - The catalog collaborator, as an async trait
//! - `HttpCatalog` - reqwest client for the catalog HTTP API
//! - `OfflineCatalog` - The bundled sample catalog behind the same trait
//! - `TimeoutConfig` - Connect/total timeouts for outbound requests
//! - `RequestGeneration` - Tickets for discarding stale responses

mod api;
mod client;
mod generation;
mod offline;
mod timeout;

#[cfg(any(test, feature = "testing"))]
mod mock;

pub use api::*;
pub use client::*;
pub use generation::*;
pub use offline::*;
pub use timeout::*;

#[cfg(any(test, feature = "testing"))]
pub use mock::*;
