//! Application lifecycle: wiring clients to an invoker, logging setup, and shutdown.

pub mod catalog_system;

pub use catalog_system::*;
pub use entity_client::tracing::setup_tracing;
