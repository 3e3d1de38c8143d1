//! Event types: schemas describing the events carried on a topic.
//!
//! Every mutation is scoped by the owning topic *and* its broker. Event types are schema
//! elements rather than assets, so they have no zone membership of their own.

pub mod routes;

use crate::model::{EventTypeElement, EventTypeProperties, TemplateProperties, TopicScope};
use entity_client::{EntityKind, Routes};

/// Marker type binding event type data to the generic client.
#[derive(Debug, Clone, Copy)]
pub struct EventType;

impl EntityKind for EventType {
    type Properties = EventTypeProperties;
    type Template = TemplateProperties;
    type Element = EventTypeElement;
    type Parent = TopicScope;

    const TYPE_NAME: &'static str = "EventType";
    const PLURAL_NAME: &'static str = "EventTypes";
    const PARENT_NAME: &'static str = "Topic";
    const ROUTES: Routes = routes::ROUTES;
}
