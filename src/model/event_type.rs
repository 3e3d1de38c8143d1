use super::common::{AdditionalProperties, ElementHeader};
use entity_client::QualifiedName;
use serde::{Deserialize, Serialize};

/// Properties of an event type, the schema of the events published on a topic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTypeProperties {
    pub qualified_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<String>,
    /// e.g. `Avro`, `JSON`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding_standard: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_deprecated: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<AdditionalProperties>,
}

impl EventTypeProperties {
    pub fn new(qualified_name: impl Into<String>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    #[must_use]
    pub fn with_encoding(mut self, encoding_standard: impl Into<String>) -> Self {
        self.encoding_standard = Some(encoding_standard.into());
        self
    }

    #[must_use]
    pub fn with_version(mut self, version_number: impl Into<String>) -> Self {
        self.version_number = Some(version_number.into());
        self
    }
}

impl QualifiedName for EventTypeProperties {
    fn qualified_name(&self) -> &str {
        &self.qualified_name
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTypeElement {
    pub element_header: ElementHeader,
    pub properties: EventTypeProperties,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unset_fields_are_omitted() {
        let props = EventTypeProperties::new("orders.created").with_encoding("Avro");
        assert_eq!(
            serde_json::to_value(&props).unwrap(),
            json!({ "qualifiedName": "orders.created", "encodingStandard": "Avro" })
        );
    }

    #[test]
    fn test_element_decodes_server_shape() {
        let element: EventTypeElement = serde_json::from_value(json!({
            "elementHeader": {
                "guid": "e-1",
                "typeName": "EventType",
                "zoneMembership": ["quarantine"]
            },
            "properties": { "qualifiedName": "orders.created", "isDeprecated": false }
        }))
        .unwrap();
        assert_eq!(element.element_header.guid, "e-1");
        assert!(element.element_header.is_in_zone("quarantine"));
        assert_eq!(element.properties.is_deprecated, Some(false));
    }
}
