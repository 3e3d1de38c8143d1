use entity_client::{validate, ParentScope, QualifiedName, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Header the server attaches to every returned element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementHeader {
    pub guid: String,
    #[serde(default)]
    pub type_name: String,
    #[serde(default)]
    pub zone_membership: Vec<String>,
}

impl ElementHeader {
    pub fn is_in_zone(&self, zone: &str) -> bool {
        self.zone_membership.iter().any(|z| z == zone)
    }
}

/// Overrides applied when a new element is copied from a template.
///
/// Fields left as `None` keep the template's value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateProperties {
    pub qualified_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_identifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_address: Option<String>,
}

impl TemplateProperties {
    pub fn new(qualified_name: impl Into<String>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            ..Self::default()
        }
    }
}

impl QualifiedName for TemplateProperties {
    fn qualified_name(&self) -> &str {
        &self.qualified_name
    }
}

/// Free-form string properties carried by most elements.
pub type AdditionalProperties = BTreeMap<String, String>;

/// The event broker that owns a set of topics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokerScope {
    pub guid: String,
    pub name: String,
}

impl BrokerScope {
    pub fn new(guid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            guid: guid.into(),
            name: name.into(),
        }
    }
}

impl ParentScope for BrokerScope {
    fn validate(&self, method: &str) -> Result<()> {
        validate::guid(&self.guid, "eventBrokerGUID", method)?;
        validate::name(&self.name, "eventBrokerName", method)
    }

    fn path_args(&self) -> Vec<String> {
        vec![self.guid.clone(), self.name.clone()]
    }
}

/// A topic, together with the broker that owns it. Event types live here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicScope {
    pub broker: BrokerScope,
    pub topic_guid: String,
}

impl TopicScope {
    pub fn new(broker: BrokerScope, topic_guid: impl Into<String>) -> Self {
        Self {
            broker,
            topic_guid: topic_guid.into(),
        }
    }
}

impl ParentScope for TopicScope {
    fn validate(&self, method: &str) -> Result<()> {
        self.broker.validate(method)?;
        validate::guid(&self.topic_guid, "topicGUID", method)
    }

    fn path_args(&self) -> Vec<String> {
        let mut args = self.broker.path_args();
        args.push(self.topic_guid.clone());
        args
    }

    /// Event types are updated and removed under the broker alone.
    fn owner_args(&self) -> Vec<String> {
        self.broker.path_args()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_scope_extends_broker_args() {
        let scope = TopicScope::new(BrokerScope::new("b-1", "Kafka"), "t-1");
        assert_eq!(scope.path_args(), vec!["b-1", "Kafka", "t-1"]);
        assert_eq!(scope.owner_args(), vec!["b-1", "Kafka"]);
    }

    #[test]
    fn test_scope_validation_names_the_missing_field() {
        let err = BrokerScope::new("b-1", "").validate("createTopic").unwrap_err();
        assert!(err.to_string().contains("eventBrokerName"));

        let err = TopicScope::new(BrokerScope::new("b-1", "Kafka"), "")
            .validate("createEventType")
            .unwrap_err();
        assert!(err.to_string().contains("topicGUID"));
    }
}
