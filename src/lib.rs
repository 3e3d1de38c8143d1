//! # Event Broker Catalog Client
//!
//! Typed clients for the topics and event types a metadata catalog records about event
//! brokers. Both are thin instantiations of the generic paged-CRUD client in `entity_client`:
//! each kind declares its data types, its parent scope and one route table, and gets the full
//! method set from there.
//!
//! ```rust,no_run
//! use entity_client::ClientConfig;
//! use event_broker_client::lifecycle::CatalogSystem;
//! use event_broker_client::model::{BrokerScope, TopicProperties};
//!
//! # async fn run() -> entity_client::Result<()> {
//! let system = CatalogSystem::remote(&ClientConfig::from_env()?)?;
//! let broker = BrokerScope::new("5e8a...", "KafkaProduction");
//! let guid = system
//!     .topic_client
//!     .create_topic("erinoverview", &broker, &TopicProperties::new("orders"))
//!     .await?;
//! system.topic_client.publish_topic("erinoverview", &guid).await?;
//! # Ok(())
//! # }
//! ```

#[macro_use]
mod routes;

pub mod clients;
pub mod event_type;
pub mod lifecycle;
pub mod model;
pub mod topic;
