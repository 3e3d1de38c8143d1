//! Topics: the named channels an event broker carries. Topics are assets, so they can be
//! published to and withdrawn from consumers.

pub mod routes;

use crate::model::{BrokerScope, TemplateProperties, TopicElement, TopicProperties};
use entity_client::{EntityKind, Publishable, Routes, ZoneRoutes};

/// Marker type binding topic data to the generic client.
#[derive(Debug, Clone, Copy)]
pub struct Topic;

impl EntityKind for Topic {
    type Properties = TopicProperties;
    type Template = TemplateProperties;
    type Element = TopicElement;
    type Parent = BrokerScope;

    const TYPE_NAME: &'static str = "Topic";
    const PLURAL_NAME: &'static str = "Topics";
    const PARENT_NAME: &'static str = "EventBroker";
    const ROUTES: Routes = routes::ROUTES;
}

impl Publishable for Topic {
    const ZONE_ROUTES: ZoneRoutes = routes::ZONE_ROUTES;
}
