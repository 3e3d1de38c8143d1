//! # Event Type Client
//!
//! Typed event type operations over `EntityClient<EventType>`.
use crate::event_type::{routes, EventType};
use crate::model::EventTypeElement;
use entity_client::{kind_client, Result};
use tracing::{debug, instrument};

kind_client!(EventTypeClient, EventType, event_type, event_types, topic);

impl EventTypeClient {
    /// Lists the event types attached to any event set. A topic is one kind of event set, so
    /// this only needs the set's GUID rather than the full broker scope.
    #[instrument(skip(self))]
    pub async fn get_event_types_for_event_set(
        &self,
        user_id: &str,
        event_set_guid: &str,
        start_from: i32,
        page_size: i32,
    ) -> Result<Vec<EventTypeElement>> {
        debug!("Sending request");
        self.inner
            .list_by_anchor(
                "getEventTypesForEventSet",
                routes::FOR_EVENT_SET,
                user_id,
                event_set_guid,
                start_from,
                page_size,
            )
            .await
    }
}
