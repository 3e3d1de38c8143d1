//! Data structures exchanged with the catalog: properties sent on create and update, templates,
//! parent scopes, and the elements returned by lookups.

pub mod common;
pub mod event_type;
pub mod topic;

pub use common::*;
pub use event_type::*;
pub use topic::*;
