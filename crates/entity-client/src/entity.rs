//! # EntityKind Trait
//!
//! The `EntityKind` trait describes one kind of catalog entity (Topic, EventType, ...) to the
//! generic [`EntityClient`](crate::EntityClient). It names the property, template and element
//! types the kind exchanges with the server, the parent scope that owns it, and the single
//! route table every operation of the kind is built from.
//!
//! Implementing this trait is all it takes to get the full create / update / remove / find /
//! list / get method set for a new kind. Kinds that are zone-governed assets additionally
//! implement [`Publishable`] to unlock publish and withdraw.

use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

/// Anything that carries a caller-assigned unique business key.
pub trait QualifiedName {
    fn qualified_name(&self) -> &str;
}

/// The owning capability under which entities of a kind are created, updated, listed and
/// removed.
///
/// Its path arguments are substituted into the route templates straight after the server name
/// and caller id, i.e. starting at `{2}`.
pub trait ParentScope: Debug + Send + Sync {
    /// Rejects empty identifiers; `method` is reported in the error.
    fn validate(&self, method: &str) -> Result<()>;

    /// Positional URL arguments, in template order.
    fn path_args(&self) -> Vec<String>;

    /// The leading path arguments update and remove routes actually address, i.e. the scope
    /// the server checks ownership against. Defaults to every path argument.
    fn owner_args(&self) -> Vec<String> {
        self.path_args()
    }
}

/// URL templates for every generic operation of one kind.
///
/// Templates are relative to the platform root and use positional `{n}` placeholders:
/// `{0}` is the server name and `{1}` the caller id. Mutations and parent listings continue
/// with the parent's path arguments; searches and lookups continue with their own operands.
#[derive(Debug, Clone, Copy)]
pub struct Routes {
    /// `.. parent.., ` -> GUID
    pub create: &'static str,
    /// `.. parent.., templateGUID` -> GUID
    pub create_from_template: &'static str,
    /// `.. parent.., targetGUID, isMergeUpdate`
    pub update: &'static str,
    /// `.. parent.., targetGUID, qualifiedName`
    pub remove: &'static str,
    /// `searchString, startFrom, pageSize`
    pub find: &'static str,
    /// `name, startFrom, pageSize`
    pub by_name: &'static str,
    /// `.. parent.., startFrom, pageSize`
    pub by_parent: &'static str,
    /// `guid`
    pub by_guid: &'static str,
}

/// URL templates for zone transitions; both take `{2}` = target GUID.
#[derive(Debug, Clone, Copy)]
pub struct ZoneRoutes {
    pub publish: &'static str,
    pub withdraw: &'static str,
}

/// Contract a catalog entity kind implements to be served by the generic client.
pub trait EntityKind: Send + Sync + 'static {
    /// Properties sent on create and update.
    type Properties: Serialize + QualifiedName + Debug + Send + Sync;

    /// Override properties applied when creating from a template.
    type Template: Serialize + QualifiedName + Debug + Send + Sync;

    /// What the server returns for one entity.
    type Element: DeserializeOwned + Debug + Send;

    /// The owning scope for mutations and parent listings.
    type Parent: ParentScope;

    /// Used to build operation names, e.g. `"Topic"` -> `createTopic`.
    const TYPE_NAME: &'static str;

    /// Plural used in list operation names, e.g. `"Topics"` -> `findTopics`.
    const PLURAL_NAME: &'static str;

    /// Used in the parent-listing operation name, e.g. `"EventBroker"` -> `getTopicsForEventBroker`.
    const PARENT_NAME: &'static str;

    const ROUTES: Routes;
}

/// Kinds whose zone membership callers may switch between the published and default sets.
pub trait Publishable: EntityKind {
    const ZONE_ROUTES: ZoneRoutes;
}
