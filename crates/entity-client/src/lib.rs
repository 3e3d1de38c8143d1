//! # Entity Client
//!
//! Building blocks for typed REST clients over a metadata catalog. Every entity kind the catalog
//! serves (topics, event types, ...) supports the same paged-CRUD surface: create, create from a
//! template, update, remove, find by pattern, get by name, list by parent and get by GUID. This
//! crate implements that surface **once**, generically, and lets each kind plug in its types and
//! its route table.
//!
//! ## Architecture Overview
//!
//! 1. **Kind Layer** ([`EntityKind`]) - property, template and element types, the parent scope,
//!    and the URL templates for every operation
//! 2. **Client Layer** ([`EntityClient`]) - validation, call construction and response unwrapping
//! 3. **Transport Layer** ([`Invoker`]) - one remote call per operation: [`HttpInvoker`] for a
//!    real platform, [`LocalInvoker`] for the in-process [`CatalogActor`], and
//!    [`MockInvoker`](mock::MockInvoker) for scripted tests
//!
//! Control flow for every operation is the same:
//!
//! ```text
//! caller -> EntityClient<K>::op -> validate -> RestCall -> Invoker::invoke -> unwrap envelope -> caller
//! ```
//!
//! A call that fails validation never reaches the invoker.
//!
//! ## Defining a Kind
//!
//! ```rust
//! use entity_client::{EntityKind, ParentScope, QualifiedName, Result, Routes, validate};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Serialize)]
//! #[serde(rename_all = "camelCase")]
//! struct SchemaProperties { qualified_name: String }
//! impl QualifiedName for SchemaProperties {
//!     fn qualified_name(&self) -> &str { &self.qualified_name }
//! }
//!
//! #[derive(Debug, Deserialize)]
//! struct SchemaElement { properties: serde_json::Value }
//!
//! #[derive(Debug)]
//! struct Folder { guid: String }
//! impl ParentScope for Folder {
//!     fn validate(&self, method: &str) -> Result<()> { validate::guid(&self.guid, "folderGUID", method) }
//!     fn path_args(&self) -> Vec<String> { vec![self.guid.clone()] }
//! }
//!
//! struct Schema;
//! impl EntityKind for Schema {
//!     type Properties = SchemaProperties;
//!     type Template = SchemaProperties;
//!     type Element = SchemaElement;
//!     type Parent = Folder;
//!     const TYPE_NAME: &'static str = "Schema";
//!     const PLURAL_NAME: &'static str = "Schemas";
//!     const PARENT_NAME: &'static str = "Folder";
//!     const ROUTES: Routes = Routes {
//!         create: "/servers/{0}/users/{1}/folders/{2}/schemas",
//!         create_from_template: "/servers/{0}/users/{1}/folders/{2}/schemas/from-template/{3}",
//!         update: "/servers/{0}/users/{1}/folders/{2}/schemas/{3}?isMergeUpdate={4}",
//!         remove: "/servers/{0}/users/{1}/folders/{2}/schemas/{3}/{4}/delete",
//!         find: "/servers/{0}/users/{1}/schemas/by-search-string/{2}?startFrom={3}&pageSize={4}",
//!         by_name: "/servers/{0}/users/{1}/schemas/by-name/{2}?startFrom={3}&pageSize={4}",
//!         by_parent: "/servers/{0}/users/{1}/folders/{2}/schemas?startFrom={3}&pageSize={4}",
//!         by_guid: "/servers/{0}/users/{1}/schemas/{2}",
//!     };
//! }
//!
//! entity_client::kind_client!(SchemaClient, Schema, schema, schemas, folder);
//! ```
//!
//! `SchemaClient` now has `create_schema`, `find_schemas`, `get_schemas_for_folder`,
//! `get_schema_by_guid`, and the rest.
//!
//! ## Concurrency Model
//!
//! - Clients are `Clone + Send + Sync` and keep no per-call state
//! - Each operation is exactly one invoker round trip; there are no retries and no caching
//! - The in-process catalog runs in its own Tokio task and processes requests sequentially
//!
//! ## Testing
//!
//! Use [`MockInvoker`](mock::MockInvoker) to assert on URLs and validation without any state,
//! and [`CatalogActor`] when the test needs real GUIDs, zones and paging. See the [`mock`]
//! module for a comparison.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod config;
pub mod entity;
pub mod error;
pub mod invoker;
pub mod message;
pub mod mock;
pub mod tracing;
pub mod validate;

// Re-export core types for convenience
pub use actor::{CatalogActor, LocalInvoker};
pub use client::EntityClient;
pub use client_trait::CatalogClient;
pub use config::ClientConfig;
pub use entity::{EntityKind, ParentScope, Publishable, QualifiedName, Routes, ZoneRoutes};
pub use error::{ClientError, Result};
pub use invoker::{HttpInvoker, Invoker};
pub use message::{Operation, Page, RestCall, Verb};

#[doc(hidden)]
pub use paste;
