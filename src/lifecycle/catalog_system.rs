//! # Catalog System
//!
//! Wires the topic and event type clients over one shared invoker.
//!
//! ## Startup
//!
//! 1. Build the invoker: an [`HttpInvoker`] for a real platform, or a [`CatalogActor`] plus its
//!    `LocalInvoker` for an in-process catalog.
//! 2. Spawn the actor's run loop, if there is one.
//! 3. Wrap the invoker in one `EntityClient` per kind.
//!
//! ## Shutdown
//!
//! Dropping every client drops every invoker handle. The in-process catalog sees its channel
//! close, logs its final size and exits; `shutdown` waits for that to happen.

use crate::clients::{EventTypeClient, TopicClient};
use entity_client::{CatalogActor, ClientConfig, EntityClient, HttpInvoker, Invoker, Result};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info};

const CHANNEL_CAPACITY: usize = 64;

/// The clients an application needs, sharing one invoker.
pub struct CatalogSystem {
    pub topic_client: TopicClient,

    pub event_type_client: EventTypeClient,

    handles: Vec<JoinHandle<()>>,
}

impl CatalogSystem {
    /// Starts an in-process catalog and connects both clients to it.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn local(config: &ClientConfig) -> Self {
        let (actor, invoker) = CatalogActor::new(config, CHANNEL_CAPACITY);
        let handle = tokio::spawn(actor.run());
        info!(server = %config.server_name, "Started in-process catalog");

        let mut system = Self::with_invoker(Arc::new(invoker), config);
        system.handles.push(handle);
        system
    }

    /// Connects both clients to the platform named in `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built from `config`.
    pub fn remote(config: &ClientConfig) -> Result<Self> {
        let invoker = HttpInvoker::new(config)?;
        info!(
            server = %config.server_name,
            platform = %config.platform_url_root,
            "Connected to platform"
        );
        Ok(Self::with_invoker(Arc::new(invoker), config))
    }

    /// Builds the clients over any invoker, e.g. a mock.
    pub fn with_invoker(invoker: Arc<dyn Invoker>, config: &ClientConfig) -> Self {
        let topics = EntityClient::new(
            Arc::clone(&invoker),
            &config.server_name,
            config.max_page_size,
        );
        let event_types = EntityClient::new(invoker, &config.server_name, config.max_page_size);

        Self {
            topic_client: TopicClient::new(topics),
            event_type_client: EventTypeClient::new(event_types),
            handles: Vec::new(),
        }
    }

    pub async fn shutdown(self) -> std::result::Result<(), String> {
        info!("Shutting down system...");

        // Closing the channels is what stops the catalog actor.
        drop(self.topic_client);
        drop(self.event_type_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Catalog task failed: {:?}", e);
                return Err(format!("Catalog task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
