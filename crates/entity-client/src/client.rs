//! # Generic Client
//!
//! `EntityClient<K>` is the paged-CRUD template. Every operation follows the same four steps:
//! validate the inputs, build a [`RestCall`] from the kind's route table, hand it to the
//! [`Invoker`], and unwrap the response envelope. Validation always finishes before the call is
//! built, so a rejected request never reaches the network.

use crate::entity::{EntityKind, ParentScope, Publishable, QualifiedName};
use crate::error::{ClientError, Result};
use crate::invoker::Invoker;
use crate::message::{
    ElementResponse, ElementsResponse, GuidResponse, Operation, RestCall, VoidResponse,
};
use crate::validate;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, instrument};

/// A type-safe client for one entity kind.
///
/// * **Cloneable** – holds an `Arc` to the invoker plus immutable settings, so cloning is cheap.
/// * **Stateless** – no call reads or writes anything another call depends on; share it freely
///   across tasks.
/// * **Generic** – works with any kind implementing [`EntityKind`].
pub struct EntityClient<K: EntityKind> {
    invoker: Arc<dyn Invoker>,
    server_name: String,
    max_page_size: u32,
    _kind: PhantomData<fn() -> K>,
}

impl<K: EntityKind> Clone for EntityClient<K> {
    fn clone(&self) -> Self {
        Self {
            invoker: Arc::clone(&self.invoker),
            server_name: self.server_name.clone(),
            max_page_size: self.max_page_size,
            _kind: PhantomData,
        }
    }
}

impl<K: EntityKind> EntityClient<K> {
    pub fn new(invoker: Arc<dyn Invoker>, server_name: impl Into<String>, max_page_size: u32) -> Self {
        Self {
            invoker,
            server_name: server_name.into(),
            max_page_size,
            _kind: PhantomData,
        }
    }

    pub fn server_name(&self) -> &str {
        &self.server_name
    }

    pub fn max_page_size(&self) -> u32 {
        self.max_page_size
    }

    /// Creates an element under `parent` and returns its new GUID.
    #[instrument(skip(self, parent, properties), fields(kind = K::TYPE_NAME))]
    pub async fn create(
        &self,
        user_id: &str,
        parent: &K::Parent,
        properties: &K::Properties,
    ) -> Result<String> {
        let method = format!("create{}", K::TYPE_NAME);
        validate::user_id(user_id, &method)?;
        parent.validate(&method)?;
        validate::name(properties.qualified_name(), "qualifiedName", &method)?;

        let parent_args = parent.path_args();
        let call = self
            .post(&method, K::ROUTES.create, Operation::Create { parent: parent_args.clone() }, user_id)
            .args(parent_args)
            .body(properties)?;

        self.dispatch::<GuidResponse>(call).await?.into_guid(&method)
    }

    /// Creates an element by copying `template_guid` and applying `overrides`.
    #[instrument(skip(self, parent, overrides), fields(kind = K::TYPE_NAME))]
    pub async fn create_from_template(
        &self,
        user_id: &str,
        parent: &K::Parent,
        template_guid: &str,
        overrides: &K::Template,
    ) -> Result<String> {
        let method = format!("create{}FromTemplate", K::TYPE_NAME);
        validate::user_id(user_id, &method)?;
        parent.validate(&method)?;
        validate::guid(template_guid, "templateGUID", &method)?;
        validate::name(overrides.qualified_name(), "qualifiedName", &method)?;

        let parent_args = parent.path_args();
        let operation = Operation::CreateFromTemplate {
            parent: parent_args.clone(),
            template_guid: template_guid.to_string(),
        };
        let call = self
            .post(&method, K::ROUTES.create_from_template, operation, user_id)
            .args(parent_args)
            .arg(template_guid)
            .body(overrides)?;

        self.dispatch::<GuidResponse>(call).await?.into_guid(&method)
    }

    /// Updates `guid`. With `merge` set, properties left unset keep their current values;
    /// otherwise the stored properties are replaced wholesale.
    #[instrument(skip(self, parent, properties), fields(kind = K::TYPE_NAME))]
    pub async fn update(
        &self,
        user_id: &str,
        parent: &K::Parent,
        guid: &str,
        merge: bool,
        properties: &K::Properties,
    ) -> Result<()> {
        let method = format!("update{}", K::TYPE_NAME);
        validate::user_id(user_id, &method)?;
        parent.validate(&method)?;
        validate::guid(guid, &guid_parameter::<K>(), &method)?;
        validate::name(properties.qualified_name(), "qualifiedName", &method)?;

        let parent_args = parent.path_args();
        let operation = Operation::Update {
            parent: parent.owner_args(),
            guid: guid.to_string(),
            merge,
        };
        let call = self
            .post(&method, K::ROUTES.update, operation, user_id)
            .args(parent_args)
            .arg(guid)
            .arg(merge)
            .body(properties)?;

        self.dispatch::<VoidResponse>(call).await.map(|_| ())
    }

    /// Permanently removes `guid`; `qualified_name` must match the stored element.
    #[instrument(skip(self, parent), fields(kind = K::TYPE_NAME))]
    pub async fn remove(
        &self,
        user_id: &str,
        parent: &K::Parent,
        guid: &str,
        qualified_name: &str,
    ) -> Result<()> {
        let method = format!("remove{}", K::TYPE_NAME);
        validate::user_id(user_id, &method)?;
        parent.validate(&method)?;
        validate::guid(guid, &guid_parameter::<K>(), &method)?;
        validate::name(qualified_name, "qualifiedName", &method)?;

        let parent_args = parent.path_args();
        let operation = Operation::Remove {
            parent: parent.owner_args(),
            guid: guid.to_string(),
            qualified_name: qualified_name.to_string(),
        };
        let call = self
            .post(&method, K::ROUTES.remove, operation, user_id)
            .args(parent_args)
            .arg(guid)
            .arg(qualified_name)
            .with_empty_body();

        self.dispatch::<VoidResponse>(call).await.map(|_| ())
    }

    /// Returns a page of elements whose names match the regular expression `search_string`.
    #[instrument(skip(self), fields(kind = K::TYPE_NAME))]
    pub async fn find(
        &self,
        user_id: &str,
        search_string: &str,
        start_from: i32,
        page_size: i32,
    ) -> Result<Vec<K::Element>> {
        let method = format!("find{}", K::PLURAL_NAME);
        validate::user_id(user_id, &method)?;
        validate::search_string(search_string, "searchString", &method)?;
        let page = validate::paging(start_from, page_size, self.max_page_size, &method)?;

        let operation = Operation::FindByPattern {
            pattern: search_string.to_string(),
            page,
        };
        let call = self
            .get(&method, K::ROUTES.find, operation, user_id)
            .arg(search_string)
            .arg(page.start_from)
            .arg(page.page_size);

        self.list(call).await
    }

    /// Returns a page of elements whose qualified or display name equals `name` exactly.
    #[instrument(skip(self), fields(kind = K::TYPE_NAME))]
    pub async fn get_by_name(
        &self,
        user_id: &str,
        name: &str,
        start_from: i32,
        page_size: i32,
    ) -> Result<Vec<K::Element>> {
        let method = format!("get{}ByName", K::PLURAL_NAME);
        validate::user_id(user_id, &method)?;
        validate::name(name, "name", &method)?;
        let page = validate::paging(start_from, page_size, self.max_page_size, &method)?;

        let operation = Operation::GetByName {
            name: name.to_string(),
            page,
        };
        let call = self
            .get(&method, K::ROUTES.by_name, operation, user_id)
            .arg(name)
            .arg(page.start_from)
            .arg(page.page_size);

        self.list(call).await
    }

    /// Returns a page of the elements owned by `parent`.
    #[instrument(skip(self, parent), fields(kind = K::TYPE_NAME))]
    pub async fn list_by_parent(
        &self,
        user_id: &str,
        parent: &K::Parent,
        start_from: i32,
        page_size: i32,
    ) -> Result<Vec<K::Element>> {
        let method = format!("get{}For{}", K::PLURAL_NAME, K::PARENT_NAME);
        validate::user_id(user_id, &method)?;
        parent.validate(&method)?;
        let page = validate::paging(start_from, page_size, self.max_page_size, &method)?;

        let parent_args = parent.path_args();
        let operation = Operation::ListByParent {
            parent: parent_args.clone(),
            page,
        };
        let call = self
            .get(&method, K::ROUTES.by_parent, operation, user_id)
            .args(parent_args)
            .arg(page.start_from)
            .arg(page.page_size);

        self.list(call).await
    }

    /// Returns a page of elements anchored to `anchor_guid` through a caller-supplied route.
    ///
    /// `template` must take `{2}` = anchor GUID, `{3}` = startFrom, `{4}` = pageSize.
    #[instrument(skip(self, template), fields(kind = K::TYPE_NAME))]
    pub async fn list_by_anchor(
        &self,
        method: &str,
        template: &'static str,
        user_id: &str,
        anchor_guid: &str,
        start_from: i32,
        page_size: i32,
    ) -> Result<Vec<K::Element>> {
        validate::user_id(user_id, method)?;
        validate::guid(anchor_guid, "anchorGUID", method)?;
        let page = validate::paging(start_from, page_size, self.max_page_size, method)?;

        let operation = Operation::ListByAnchor {
            anchor_guid: anchor_guid.to_string(),
            page,
        };
        let call = self
            .get(method, template, operation, user_id)
            .arg(anchor_guid)
            .arg(page.start_from)
            .arg(page.page_size);

        self.list(call).await
    }

    /// Retrieves a single element; an unknown GUID is a not-found server fault.
    #[instrument(skip(self), fields(kind = K::TYPE_NAME))]
    pub async fn get_by_guid(&self, user_id: &str, guid: &str) -> Result<K::Element> {
        let method = format!("get{}ByGUID", K::TYPE_NAME);
        validate::user_id(user_id, &method)?;
        validate::guid(guid, "guid", &method)?;

        let operation = Operation::GetByGuid {
            guid: guid.to_string(),
        };
        let call = self.get(&method, K::ROUTES.by_guid, operation, user_id).arg(guid);

        self.dispatch::<ElementResponse<K::Element>>(call)
            .await?
            .element
            .ok_or_else(|| ClientError::not_found(&method, guid))
    }

    // --- plumbing ---

    fn get(&self, method: &str, template: &'static str, operation: Operation, user_id: &str) -> RestCall {
        RestCall::get(method, K::TYPE_NAME, template, operation)
            .arg(&self.server_name)
            .arg(user_id)
    }

    fn post(&self, method: &str, template: &'static str, operation: Operation, user_id: &str) -> RestCall {
        RestCall::post(method, K::TYPE_NAME, template, operation)
            .arg(&self.server_name)
            .arg(user_id)
    }

    async fn list(&self, call: RestCall) -> Result<Vec<K::Element>> {
        let elements = self
            .dispatch::<ElementsResponse<K::Element>>(call)
            .await?
            .into_elements();
        debug!(count = elements.len(), "Received page");
        Ok(elements)
    }

    async fn dispatch<R: DeserializeOwned>(&self, call: RestCall) -> Result<R> {
        let method = call.method_name.clone();
        debug!(method = %method, verb = %call.verb, template = call.template, "Invoking");
        let value = match self.invoker.invoke(call).await? {
            // A 2xx with no body carries no envelope fields.
            Value::Null => Value::Object(Default::default()),
            value => value,
        };
        serde_json::from_value(value).map_err(|e| {
            ClientError::server_fault(&method, None, format!("unexpected response shape: {e}"))
        })
    }
}

impl<K: Publishable> EntityClient<K> {
    /// Moves `guid` into the published zones, making it visible to consumers.
    #[instrument(skip(self), fields(kind = K::TYPE_NAME))]
    pub async fn publish(&self, user_id: &str, guid: &str) -> Result<()> {
        let method = format!("publish{}", K::TYPE_NAME);
        self.zone_transition(&method, K::ZONE_ROUTES.publish, user_id, guid, true)
            .await
    }

    /// Moves `guid` back into the default zones, hiding it from consumers.
    #[instrument(skip(self), fields(kind = K::TYPE_NAME))]
    pub async fn withdraw(&self, user_id: &str, guid: &str) -> Result<()> {
        let method = format!("withdraw{}", K::TYPE_NAME);
        self.zone_transition(&method, K::ZONE_ROUTES.withdraw, user_id, guid, false)
            .await
    }

    async fn zone_transition(
        &self,
        method: &str,
        template: &'static str,
        user_id: &str,
        guid: &str,
        publish: bool,
    ) -> Result<()> {
        validate::user_id(user_id, method)?;
        validate::guid(guid, &guid_parameter::<K>(), method)?;

        let operation = if publish {
            Operation::Publish { guid: guid.to_string() }
        } else {
            Operation::Withdraw { guid: guid.to_string() }
        };
        let call = self
            .post(method, template, operation, user_id)
            .arg(guid)
            .with_empty_body();

        self.dispatch::<VoidResponse>(call).await.map(|_| ())
    }
}

/// `"Topic"` -> `"topicGUID"`, matching the parameter names the server reports.
fn guid_parameter<K: EntityKind>() -> String {
    let mut chars = K::TYPE_NAME.chars();
    match chars.next() {
        Some(first) => format!("{}{}GUID", first.to_lowercase(), chars.as_str()),
        None => "guid".to_string(),
    }
}

impl RestCall {
    /// Mutations without properties still POST an empty JSON object.
    fn with_empty_body(mut self) -> Self {
        self.body = Some(serde_json::Value::Object(serde_json::Map::new()));
        self
    }
}
