//! # Topic Client
//!
//! Typed topic operations over `EntityClient<Topic>`. The paged-CRUD method set is generated;
//! zone transitions are added here because only topics have them.
use crate::topic::Topic;
use entity_client::{kind_client, Result};
use tracing::{debug, instrument};

kind_client!(TopicClient, Topic, topic, topics, event_broker);

impl TopicClient {
    /// Makes the topic visible to consumers by moving it into the published zones.
    #[instrument(skip(self))]
    pub async fn publish_topic(&self, user_id: &str, topic_guid: &str) -> Result<()> {
        debug!("Sending request");
        self.inner.publish(user_id, topic_guid).await
    }

    /// Hides the topic again by moving it back into the default zones.
    #[instrument(skip(self))]
    pub async fn withdraw_topic(&self, user_id: &str, topic_guid: &str) -> Result<()> {
        debug!("Sending request");
        self.inner.withdraw(user_id, topic_guid).await
    }
}
