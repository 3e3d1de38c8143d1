use entity_client::{CatalogClient, ClientConfig};
use event_broker_client::lifecycle::{setup_tracing, CatalogSystem};
use event_broker_client::model::{
    BrokerScope, EventTypeProperties, TemplateProperties, TopicProperties, TopicScope,
};
use tracing::{error, info, Instrument};

const USER: &str = "erinoverview";

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = ClientConfig::from_env().map_err(|e| e.to_string())?;
    info!(?config, "Starting catalog demo");

    // `CATALOG_REMOTE=1` talks to a real platform; otherwise run against the in-process catalog.
    let system = if std::env::var("CATALOG_REMOTE").is_ok_and(|v| v == "1") {
        CatalogSystem::remote(&config).map_err(|e| e.to_string())?
    } else {
        CatalogSystem::local(&config)
    };
    let broker = BrokerScope::new("8d5c3a9e-broker", "KafkaProduction");

    let span = tracing::info_span!("topic_setup");
    let topic_guid = async {
        info!("Creating topic");
        let properties = TopicProperties::new("kafka.production.orders")
            .with_display_name("Orders")
            .with_topic_type("PubSub");
        system
            .topic_client
            .create_topic(USER, &broker, &properties)
            .await
            .map_err(|e| e.to_string())
    }
    .instrument(span)
    .await?;

    info!(topic_guid = %topic_guid, "Topic created successfully");

    let topic = TopicScope::new(broker.clone(), topic_guid.clone());
    let span = tracing::info_span!("event_type_setup");
    let event_type_guid = async {
        info!("Creating event types");
        let created = EventTypeProperties::new("kafka.production.orders.OrderCreated")
            .with_encoding("Avro")
            .with_version("1.0");
        let guid = system
            .event_type_client
            .create_event_type(USER, &topic, &created)
            .await
            .map_err(|e| e.to_string())?;

        system
            .event_type_client
            .create_event_type_from_template(
                USER,
                &topic,
                &guid,
                &TemplateProperties::new("kafka.production.orders.OrderCancelled"),
            )
            .await
            .map_err(|e| e.to_string())?;
        Ok::<_, String>(guid)
    }
    .instrument(span)
    .await?;

    info!(event_type_guid = %event_type_guid, "Event types created successfully");

    let span = tracing::info_span!("publishing");
    let publish_result = async {
        system.topic_client.publish_topic(USER, &topic_guid).await?;
        let published = system.topic_client.get_by_guid(USER, &topic_guid).await?;
        info!(zones = ?published.element_header.zone_membership, "Topic published");

        let schemas = system
            .event_type_client
            .get_event_types_for_topic(USER, &topic, 0, 10)
            .await?;
        info!(count = schemas.len(), "Event types on topic");

        let matches = system
            .topic_client
            .find_topics(USER, "kafka\\.production\\..*", 0, 10)
            .await?;
        info!(count = matches.len(), "Topics matching search");
        Ok::<_, entity_client::ClientError>(())
    }
    .instrument(span)
    .await;

    match publish_result {
        Ok(()) => info!("Catalog populated successfully"),
        Err(e) => error!(error = %e, "Publishing failed"),
    }

    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
