//! # CatalogClient Trait
//!
//! Kind-specific wrappers (`TopicClient`, `EventTypeClient`, ...) implement [`CatalogClient`] to
//! inherit the read operations, and use [`kind_client!`](crate::kind_client) to generate the full
//! kind-named method set on top of the generic [`EntityClient`].
use crate::client::EntityClient;
use crate::entity::EntityKind;
use crate::error::Result;
use async_trait::async_trait;

/// Trait for kind-specific clients to inherit the standard read operations.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Clone)]
/// pub struct TopicClient {
///     inner: EntityClient<Topic>,
/// }
///
/// impl CatalogClient<Topic> for TopicClient {
///     fn inner(&self) -> &EntityClient<Topic> {
///         &self.inner
///     }
/// }
///
/// // get_by_guid(), find(), get_by_name() and list_by_parent() are provided.
/// let topic = client.get_by_guid("erinoverview", &guid).await?;
/// ```
#[async_trait]
pub trait CatalogClient<K: EntityKind>: Send + Sync {
    /// Access the inner generic client.
    fn inner(&self) -> &EntityClient<K>;

    /// Fetch an element by GUID.
    #[tracing::instrument(skip(self))]
    async fn get_by_guid(&self, user_id: &str, guid: &str) -> Result<K::Element> {
        tracing::debug!("Sending request");
        self.inner().get_by_guid(user_id, guid).await
    }

    /// Find elements whose names match a regular expression.
    #[tracing::instrument(skip(self))]
    async fn find(
        &self,
        user_id: &str,
        search_string: &str,
        start_from: i32,
        page_size: i32,
    ) -> Result<Vec<K::Element>> {
        tracing::debug!("Sending request");
        self.inner()
            .find(user_id, search_string, start_from, page_size)
            .await
    }

    /// Find elements with exactly this name.
    #[tracing::instrument(skip(self))]
    async fn get_by_name(
        &self,
        user_id: &str,
        name: &str,
        start_from: i32,
        page_size: i32,
    ) -> Result<Vec<K::Element>> {
        tracing::debug!("Sending request");
        self.inner()
            .get_by_name(user_id, name, start_from, page_size)
            .await
    }

    /// List the elements owned by a parent.
    #[tracing::instrument(skip(self))]
    async fn list_by_parent(
        &self,
        user_id: &str,
        parent: &K::Parent,
        start_from: i32,
        page_size: i32,
    ) -> Result<Vec<K::Element>> {
        tracing::debug!("Sending request");
        self.inner()
            .list_by_parent(user_id, parent, start_from, page_size)
            .await
    }
}

/// Generates a kind-named client over [`EntityClient`].
///
/// `kind_client!(TopicClient, Topic, topic, topics, event_broker)` defines `TopicClient` with
/// `create_topic`, `create_topic_from_template`, `update_topic`, `remove_topic`, `find_topics`,
/// `get_topics_by_name`, `get_topics_for_event_broker` and `get_topic_by_guid`, and implements
/// [`CatalogClient`] for it.
#[macro_export]
macro_rules! kind_client {
    ($client:ident, $kind:ty, $singular:ident, $plural:ident, $parent:ident) => {
        $crate::paste::paste! {
            #[doc = "Typed client for `" $singular "` elements."]
            #[derive(Clone)]
            pub struct $client {
                inner: $crate::EntityClient<$kind>,
            }

            impl $crate::CatalogClient<$kind> for $client {
                fn inner(&self) -> &$crate::EntityClient<$kind> {
                    &self.inner
                }
            }

            impl $client {
                pub fn new(inner: $crate::EntityClient<$kind>) -> Self {
                    Self { inner }
                }

                pub async fn [<create_ $singular>](
                    &self,
                    user_id: &str,
                    parent: &<$kind as $crate::EntityKind>::Parent,
                    properties: &<$kind as $crate::EntityKind>::Properties,
                ) -> $crate::Result<String> {
                    self.inner.create(user_id, parent, properties).await
                }

                pub async fn [<create_ $singular _from_template>](
                    &self,
                    user_id: &str,
                    parent: &<$kind as $crate::EntityKind>::Parent,
                    template_guid: &str,
                    overrides: &<$kind as $crate::EntityKind>::Template,
                ) -> $crate::Result<String> {
                    self.inner
                        .create_from_template(user_id, parent, template_guid, overrides)
                        .await
                }

                pub async fn [<update_ $singular>](
                    &self,
                    user_id: &str,
                    parent: &<$kind as $crate::EntityKind>::Parent,
                    guid: &str,
                    is_merge_update: bool,
                    properties: &<$kind as $crate::EntityKind>::Properties,
                ) -> $crate::Result<()> {
                    self.inner
                        .update(user_id, parent, guid, is_merge_update, properties)
                        .await
                }

                pub async fn [<remove_ $singular>](
                    &self,
                    user_id: &str,
                    parent: &<$kind as $crate::EntityKind>::Parent,
                    guid: &str,
                    qualified_name: &str,
                ) -> $crate::Result<()> {
                    self.inner.remove(user_id, parent, guid, qualified_name).await
                }

                pub async fn [<find_ $plural>](
                    &self,
                    user_id: &str,
                    search_string: &str,
                    start_from: i32,
                    page_size: i32,
                ) -> $crate::Result<Vec<<$kind as $crate::EntityKind>::Element>> {
                    self.inner
                        .find(user_id, search_string, start_from, page_size)
                        .await
                }

                pub async fn [<get_ $plural _by_name>](
                    &self,
                    user_id: &str,
                    name: &str,
                    start_from: i32,
                    page_size: i32,
                ) -> $crate::Result<Vec<<$kind as $crate::EntityKind>::Element>> {
                    self.inner
                        .get_by_name(user_id, name, start_from, page_size)
                        .await
                }

                pub async fn [<get_ $plural _for_ $parent>](
                    &self,
                    user_id: &str,
                    parent: &<$kind as $crate::EntityKind>::Parent,
                    start_from: i32,
                    page_size: i32,
                ) -> $crate::Result<Vec<<$kind as $crate::EntityKind>::Element>> {
                    self.inner
                        .list_by_parent(user_id, parent, start_from, page_size)
                        .await
                }

                pub async fn [<get_ $singular _by_guid>](
                    &self,
                    user_id: &str,
                    guid: &str,
                ) -> $crate::Result<<$kind as $crate::EntityKind>::Element> {
                    self.inner.get_by_guid(user_id, guid).await
                }
            }
        }
    };
}
