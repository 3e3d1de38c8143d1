//! # In-Process Catalog
//!
//! `CatalogActor` is a small stand-in for the metadata server. It owns every stored element and
//! processes [`CatalogRequest`]s one at a time, so the store needs no locks. [`LocalInvoker`] is
//! the client half: it forwards each [`RestCall`] over an mpsc channel and awaits the reply on a
//! oneshot.
//!
//! The actor answers from the call's [`Operation`] descriptor rather than its URL and replies with
//! the same JSON envelopes the real server produces, so entity clients cannot tell the difference.
//!
//! ```rust
//! use entity_client::{CatalogActor, ClientConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ClientConfig::default();
//!     let (actor, invoker) = CatalogActor::new(&config, 32);
//!     let handle = tokio::spawn(actor.run());
//!
//!     // hand `invoker` to any EntityClient ...
//!
//!     drop(invoker);
//!     handle.await.unwrap();
//! }
//! ```

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::invoker::Invoker;
use crate::message::{CatalogRequest, Operation, Page, RestCall};
use async_trait::async_trait;
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// One stored element.
#[derive(Debug, Clone)]
struct StoredElement {
    guid: String,
    type_name: &'static str,
    /// Parent path arguments the element was created under.
    parent: Vec<String>,
    zones: Vec<String>,
    properties: Map<String, Value>,
    /// Creation order; listings are returned in this order.
    seq: u64,
}

impl StoredElement {
    fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).and_then(Value::as_str)
    }

    /// The anchor is the owning element, which is always the last parent argument.
    fn is_anchored_to(&self, guid: &str) -> bool {
        self.parent.last().is_some_and(|anchor| anchor == guid)
    }

    fn qualified_name(&self) -> &str {
        self.property("qualifiedName").unwrap_or_default()
    }

    fn to_json(&self) -> Value {
        json!({
            "elementHeader": {
                "guid": self.guid,
                "typeName": self.type_name,
                "zoneMembership": self.zones,
            },
            "properties": self.properties,
        })
    }
}

/// The server half of the in-process catalog.
pub struct CatalogActor {
    receiver: mpsc::Receiver<CatalogRequest>,
    store: HashMap<String, StoredElement>,
    next_seq: u64,
    default_zones: Vec<String>,
    published_zones: Vec<String>,
}

impl CatalogActor {
    /// Creates the actor and the invoker that talks to it.
    ///
    /// Zone sets are taken from `config`. `buffer_size` bounds the request channel; callers wait
    /// when it is full.
    pub fn new(config: &ClientConfig, buffer_size: usize) -> (Self, LocalInvoker) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            next_seq: 1,
            default_zones: config.default_zones.clone(),
            published_zones: config.published_zones.clone(),
        };
        (actor, LocalInvoker::new(sender))
    }

    /// Processes requests until every invoker has been dropped.
    pub async fn run(mut self) {
        info!("Catalog started");

        while let Some(CatalogRequest { call, respond_to }) = self.receiver.recv().await {
            debug!(method = %call.method_name, operation = ?call.operation, "Request");
            let result = self.handle(call);
            if let Err(e) = &result {
                warn!(error = %e, "Request failed");
            }
            let _ = respond_to.send(result);
        }

        info!(size = self.store.len(), "Shutdown");
    }

    fn handle(&mut self, call: RestCall) -> Result<Value> {
        let method = call.method_name.as_str();
        let type_name = call.type_name;

        match &call.operation {
            Operation::Create { parent } => {
                let properties = body_object(method, call.body.as_ref())?;
                let guid = self.insert(method, type_name, parent.clone(), properties)?;
                Ok(json!({ "relatedHTTPCode": 200, "guid": guid }))
            }
            Operation::CreateFromTemplate {
                parent,
                template_guid,
            } => {
                let template = self.lookup(method, type_name, template_guid)?;
                let mut properties = template.properties.clone();
                overlay(&mut properties, body_object(method, call.body.as_ref())?);
                let guid = self.insert(method, type_name, parent.clone(), properties)?;
                info!(type_name, %guid, template = %template_guid, "Copied template");
                Ok(json!({ "relatedHTTPCode": 200, "guid": guid }))
            }
            Operation::Update {
                parent,
                guid,
                merge,
            } => {
                let incoming = body_object(method, call.body.as_ref())?;
                self.check_parent(method, type_name, guid, parent)?;

                let mut properties = if *merge {
                    self.lookup(method, type_name, guid)?.properties.clone()
                } else {
                    Map::new()
                };
                overlay(&mut properties, incoming);
                let qualified_name = properties
                    .get("qualifiedName")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();
                self.check_unique(method, type_name, &qualified_name, Some(guid.as_str()))?;

                if let Some(element) = self.store.get_mut(guid) {
                    element.properties = properties;
                }
                info!(type_name, %guid, merge, "Updated");
                Ok(ok())
            }
            Operation::Publish { guid } => {
                let zones = self.published_zones.clone();
                self.set_zones(method, type_name, guid, zones)?;
                info!(type_name, %guid, "Published");
                Ok(ok())
            }
            Operation::Withdraw { guid } => {
                let zones = self.default_zones.clone();
                self.set_zones(method, type_name, guid, zones)?;
                info!(type_name, %guid, "Withdrawn");
                Ok(ok())
            }
            Operation::Remove {
                parent,
                guid,
                qualified_name,
            } => {
                self.check_parent(method, type_name, guid, parent)?;
                let stored = self.lookup(method, type_name, guid)?;
                if stored.qualified_name() != qualified_name {
                    return Err(ClientError::invalid(
                        method,
                        "qualifiedName",
                        format!("{qualified_name} does not name element {guid}"),
                    ));
                }

                self.store.remove(guid);
                // Anchored children go with their anchor.
                let before = self.store.len();
                self.store
                    .retain(|_, element| !element.is_anchored_to(guid));
                let cascaded = before - self.store.len();
                info!(type_name, %guid, cascaded, size = self.store.len(), "Removed");
                Ok(ok())
            }
            Operation::FindByPattern { pattern, page } => {
                let regex = regex::Regex::new(&format!("^(?:{pattern})$")).map_err(|e| {
                    ClientError::invalid(method, "searchString", e.to_string())
                })?;
                Ok(self.page(type_name, *page, |element| {
                    name_fields(element).any(|name| regex.is_match(name))
                }))
            }
            Operation::GetByName { name, page } => Ok(self.page(type_name, *page, |element| {
                name_fields(element).any(|candidate| candidate == name)
            })),
            Operation::ListByParent { parent, page } => {
                Ok(self.page(type_name, *page, |element| &element.parent == parent))
            }
            Operation::ListByAnchor { anchor_guid, page } => {
                Ok(self.page(type_name, *page, |element| element.is_anchored_to(anchor_guid)))
            }
            Operation::GetByGuid { guid } => {
                let element = self.lookup(method, type_name, guid)?;
                Ok(json!({ "relatedHTTPCode": 200, "element": element.to_json() }))
            }
        }
    }

    fn insert(
        &mut self,
        method: &str,
        type_name: &'static str,
        parent: Vec<String>,
        properties: Map<String, Value>,
    ) -> Result<String> {
        let qualified_name = properties
            .get("qualifiedName")
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| ClientError::invalid(method, "qualifiedName", "must not be empty"))?
            .to_string();
        self.check_unique(method, type_name, &qualified_name, None)?;

        let guid = Uuid::new_v4().to_string();
        let element = StoredElement {
            guid: guid.clone(),
            type_name,
            parent,
            zones: self.default_zones.clone(),
            properties,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.store.insert(guid.clone(), element);
        info!(type_name, %guid, %qualified_name, size = self.store.len(), "Created");
        Ok(guid)
    }

    fn lookup(&self, method: &str, type_name: &str, guid: &str) -> Result<&StoredElement> {
        self.store
            .get(guid)
            .filter(|element| element.type_name == type_name)
            .ok_or_else(|| ClientError::not_found(method, guid))
    }

    /// `owner` holds only the arguments the mutation route carries, so it may be a prefix of the
    /// stored parent.
    fn check_parent(&self, method: &str, type_name: &str, guid: &str, owner: &[String]) -> Result<()> {
        let stored = self.lookup(method, type_name, guid)?;
        if owner.is_empty() || !stored.parent.starts_with(owner) {
            return Err(ClientError::invalid(
                method,
                "parentGUID",
                format!("element {guid} is not owned by {}", owner.join("/")),
            ));
        }
        Ok(())
    }

    fn check_unique(
        &self,
        method: &str,
        type_name: &str,
        qualified_name: &str,
        except: Option<&str>,
    ) -> Result<()> {
        let clash = self.store.values().any(|element| {
            element.type_name == type_name
                && element.qualified_name() == qualified_name
                && Some(element.guid.as_str()) != except
        });
        if clash {
            return Err(ClientError::server_fault(
                method,
                Some(409),
                format!("a {type_name} with qualifiedName {qualified_name} already exists"),
            ));
        }
        Ok(())
    }

    fn set_zones(&mut self, method: &str, type_name: &str, guid: &str, zones: Vec<String>) -> Result<()> {
        match self.store.get_mut(guid) {
            Some(element) if element.type_name == type_name => {
                element.zones = zones;
                Ok(())
            }
            _ => Err(ClientError::not_found(method, guid)),
        }
    }

    fn page<F>(&self, type_name: &str, page: Page, filter: F) -> Value
    where
        F: Fn(&StoredElement) -> bool,
    {
        let mut matches: Vec<&StoredElement> = self
            .store
            .values()
            .filter(|element| element.type_name == type_name && filter(element))
            .collect();
        matches.sort_by_key(|element| element.seq);

        let elements: Vec<Value> = matches
            .into_iter()
            .skip(page.start_from as usize)
            .take(page.page_size as usize)
            .map(StoredElement::to_json)
            .collect();
        debug!(type_name, count = elements.len(), "Page");

        if elements.is_empty() {
            json!({ "relatedHTTPCode": 200 })
        } else {
            json!({ "relatedHTTPCode": 200, "elementList": elements })
        }
    }
}

fn ok() -> Value {
    json!({ "relatedHTTPCode": 200 })
}

fn body_object(method: &str, body: Option<&Value>) -> Result<Map<String, Value>> {
    match body {
        Some(Value::Object(map)) => Ok(map.clone()),
        _ => Err(ClientError::invalid(method, "requestBody", "expected a JSON object")),
    }
}

/// Copies every non-null field of `incoming` over `target`.
fn overlay(target: &mut Map<String, Value>, incoming: Map<String, Value>) {
    for (key, value) in incoming {
        if !value.is_null() {
            target.insert(key, value);
        }
    }
}

fn name_fields(element: &StoredElement) -> impl Iterator<Item = &str> {
    ["qualifiedName", "displayName"]
        .into_iter()
        .filter_map(move |field| element.property(field))
}

/// Invoker that forwards calls to a [`CatalogActor`].
#[derive(Clone)]
pub struct LocalInvoker {
    sender: mpsc::Sender<CatalogRequest>,
}

impl LocalInvoker {
    pub fn new(sender: mpsc::Sender<CatalogRequest>) -> Self {
        Self { sender }
    }
}

#[async_trait]
impl Invoker for LocalInvoker {
    async fn invoke(&self, call: RestCall) -> Result<Value> {
        let method = call.method_name.clone();
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(CatalogRequest { call, respond_to })
            .await
            .map_err(|_| ClientError::server_fault(&method, None, "catalog is closed"))?;
        response
            .await
            .map_err(|_| ClientError::server_fault(&method, None, "catalog dropped the request"))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(operation: Operation, body: Option<Value>) -> RestCall {
        let mut call = RestCall::post("createTopic", "Topic", "/unused", operation);
        call.body = body;
        call
    }

    fn actor() -> CatalogActor {
        CatalogActor::new(&ClientConfig::default(), 4).0
    }

    fn create(actor: &mut CatalogActor, qualified_name: &str) -> String {
        let response = actor
            .handle(call(
                Operation::Create {
                    parent: vec!["broker-1".into(), "Kafka".into()],
                },
                Some(json!({ "qualifiedName": qualified_name })),
            ))
            .unwrap();
        response["guid"].as_str().unwrap().to_string()
    }

    #[test]
    fn test_duplicate_qualified_name_is_rejected() {
        let mut actor = actor();
        create(&mut actor, "orders");
        let err = actor
            .handle(call(
                Operation::Create {
                    parent: vec!["broker-1".into(), "Kafka".into()],
                },
                Some(json!({ "qualifiedName": "orders" })),
            ))
            .unwrap_err();
        assert!(matches!(err, ClientError::ServerFault { status: Some(409), .. }));
    }

    #[test]
    fn test_remove_requires_matching_parent_and_name() {
        let mut actor = actor();
        let guid = create(&mut actor, "orders");

        let wrong_parent = Operation::Remove {
            parent: vec!["broker-2".into(), "Kafka".into()],
            guid: guid.clone(),
            qualified_name: "orders".into(),
        };
        assert!(actor.handle(call(wrong_parent, None)).unwrap_err().is_invalid_parameter());

        let wrong_name = Operation::Remove {
            parent: vec!["broker-1".into(), "Kafka".into()],
            guid: guid.clone(),
            qualified_name: "payments".into(),
        };
        assert!(actor.handle(call(wrong_name, None)).unwrap_err().is_invalid_parameter());
        assert_eq!(actor.store.len(), 1);
    }

    #[test]
    fn test_anchor_is_the_owning_element_only() {
        let mut actor = actor();
        let topic = create(&mut actor, "orders");
        let mut child = call(
            Operation::Create {
                parent: vec!["broker-1".into(), "Kafka".into(), topic.clone()],
            },
            Some(json!({ "qualifiedName": "orders.Created" })),
        );
        child.type_name = "EventType";
        actor.handle(child).unwrap();

        let by_anchor = |actor: &mut CatalogActor, anchor: &str| {
            let mut list = call(
                Operation::ListByAnchor {
                    anchor_guid: anchor.into(),
                    page: Page { start_from: 0, page_size: 10 },
                },
                None,
            );
            list.type_name = "EventType";
            actor.handle(list).unwrap()
        };
        assert!(by_anchor(&mut actor, "broker-1").get("elementList").is_none());
        assert_eq!(by_anchor(&mut actor, &topic)["elementList"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_parent_check_accepts_the_owner_prefix() {
        let mut actor = actor();
        let mut child = call(
            Operation::Create {
                parent: vec!["broker-1".into(), "Kafka".into(), "topic-1".into()],
            },
            Some(json!({ "qualifiedName": "orders.Created" })),
        );
        child.type_name = "EventType";
        let guid = actor.handle(child).unwrap()["guid"].as_str().unwrap().to_string();

        let owner = vec!["broker-1".to_string(), "Kafka".to_string()];
        assert!(actor.check_parent("updateEventType", "EventType", &guid, &owner).is_ok());
        let other = vec!["broker-2".to_string(), "Kafka".to_string()];
        assert!(actor
            .check_parent("updateEventType", "EventType", &guid, &other)
            .unwrap_err()
            .is_invalid_parameter());
        assert!(actor.check_parent("updateEventType", "EventType", &guid, &[]).is_err());
    }

    #[test]
    fn test_lookup_is_scoped_by_type() {
        let mut actor = actor();
        let guid = create(&mut actor, "orders");
        assert!(actor.lookup("getEventTypeByGUID", "EventType", &guid).unwrap_err().is_not_found());
        assert!(actor.lookup("getTopicByGUID", "Topic", &guid).is_ok());
    }

    #[test]
    fn test_overlay_skips_nulls() {
        let mut target = json!({ "qualifiedName": "a", "description": "keep" })
            .as_object()
            .cloned()
            .unwrap();
        let incoming = json!({ "qualifiedName": "b", "description": null })
            .as_object()
            .cloned()
            .unwrap();
        overlay(&mut target, incoming);
        assert_eq!(target["qualifiedName"], "b");
        assert_eq!(target["description"], "keep");
    }
}
