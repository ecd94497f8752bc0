//! Gateway to the home automation backend.
//!
//! Provides a typed abstraction over the backend's HTTP API:
//! - `Gateway` trait for template queries and intent calls (mockable in tests)
//! - `HomeAssistantClient` speaking `/api/template` and `/api/intent/handle`
//! - `MockGateway` for testing without a backend
//! - `fetch_snapshot` for the start-up inventory of areas and labels

pub mod config;
pub mod error;
pub mod gateway;
pub mod mock;
pub mod snapshot;

// Re-exports for convenience.
pub use config::GatewayConfig;
pub use error::{GatewayError, GatewayResult};
pub use gateway::{Gateway, HomeAssistantClient};
pub use mock::{GatewayCall, MockGateway};
pub use snapshot::{HomeSnapshot, fetch_snapshot};
