//! Kind-specific clients: the surface applications call.

pub mod event_type_client;
pub mod topic_client;

pub use event_type_client::EventTypeClient;
pub use topic_client::TopicClient;
