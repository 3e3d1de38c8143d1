use entity_client::mock::MockInvoker;
use entity_client::{ClientConfig, ClientError, Verb};
use event_broker_client::lifecycle::CatalogSystem;
use event_broker_client::model::{
    BrokerScope, EventTypeProperties, TemplateProperties, TopicProperties, TopicScope,
};
use serde_json::json;
use std::sync::Arc;

const USER: &str = "erinoverview";
const ROOT: &str = "/servers/cocoMDS1/open-metadata/access-services/data-manager/users/erinoverview";

fn mock_system(mock: &MockInvoker) -> CatalogSystem {
    CatalogSystem::with_invoker(Arc::new(mock.clone()), &ClientConfig::default())
}

fn broker() -> BrokerScope {
    BrokerScope::new("b-1", "Kafka Prod")
}

fn ok() -> serde_json::Value {
    json!({ "relatedHTTPCode": 200 })
}

#[tokio::test]
async fn test_topic_operations_hit_declared_routes() {
    let mock = MockInvoker::new();
    mock.expect("createTopic").return_ok(json!({ "relatedHTTPCode": 200, "guid": "t-1" }));
    mock.expect("createTopicFromTemplate").return_ok(json!({ "relatedHTTPCode": 200, "guid": "t-2" }));
    mock.expect("updateTopic").return_ok(ok());
    mock.expect("publishTopic").return_ok(ok());
    mock.expect("withdrawTopic").return_ok(ok());
    mock.expect("removeTopic").return_ok(ok());
    mock.expect("findTopics").return_ok(ok());
    mock.expect("getTopicsByName").return_ok(ok());
    mock.expect("getTopicsForEventBroker").return_ok(ok());
    mock.expect("getTopicByGUID").return_ok(json!({
        "relatedHTTPCode": 200,
        "element": {
            "elementHeader": { "guid": "t-1", "typeName": "Topic", "zoneMembership": [] },
            "properties": { "qualifiedName": "orders" }
        }
    }));
    let system = mock_system(&mock);
    let topics = &system.topic_client;

    let guid = topics
        .create_topic(USER, &broker(), &TopicProperties::new("orders"))
        .await
        .unwrap();
    assert_eq!(guid, "t-1");
    let copy = topics
        .create_topic_from_template(USER, &broker(), "t-1", &TemplateProperties::new("orders.v2"))
        .await
        .unwrap();
    assert_eq!(copy, "t-2");
    topics
        .update_topic(USER, &broker(), "t-1", false, &TopicProperties::new("orders"))
        .await
        .unwrap();
    topics.publish_topic(USER, "t-1").await.unwrap();
    topics.withdraw_topic(USER, "t-1").await.unwrap();
    topics
        .remove_topic(USER, &broker(), "t-1", "orders")
        .await
        .unwrap();
    assert!(topics.find_topics(USER, "ord.*", 0, 25).await.unwrap().is_empty());
    assert!(topics.get_topics_by_name(USER, "orders", 5, 10).await.unwrap().is_empty());
    assert!(topics
        .get_topics_for_event_broker(USER, &broker(), 0, 10)
        .await
        .unwrap()
        .is_empty());
    let element = topics.get_topic_by_guid(USER, "t-1").await.unwrap();
    assert_eq!(element.properties.qualified_name, "orders");

    let expected: Vec<String> = [
        "/event-brokers/b-1/Kafka%20Prod/topics",
        "/event-brokers/b-1/Kafka%20Prod/topics/from-template/t-1",
        "/event-brokers/b-1/Kafka%20Prod/topics/t-1?isMergeUpdate=false",
        "/topics/t-1/publish",
        "/topics/t-1/withdraw",
        "/event-brokers/b-1/Kafka%20Prod/topics/t-1/orders/delete",
        "/topics/by-search-string/ord.%2A?startFrom=0&pageSize=25",
        "/topics/by-name/orders?startFrom=5&pageSize=10",
        "/event-brokers/b-1/Kafka%20Prod/topics?startFrom=0&pageSize=10",
        "/topics/t-1",
    ]
    .iter()
    .map(|suffix| format!("{ROOT}{suffix}"))
    .collect();
    assert_eq!(mock.paths(), expected);

    let verbs: Vec<Verb> = mock.calls().iter().map(|c| c.verb).collect();
    assert_eq!(&verbs[..6], &[Verb::Post; 6]);
    assert_eq!(&verbs[6..], &[Verb::Get; 4]);
    mock.verify();
}

#[tokio::test]
async fn test_event_type_operations_hit_declared_routes() {
    let mock = MockInvoker::new();
    mock.expect("createEventType").return_ok(json!({ "relatedHTTPCode": 200, "guid": "e-1" }));
    mock.expect("createEventTypeFromTemplate").return_ok(json!({ "relatedHTTPCode": 200, "guid": "e-2" }));
    mock.expect("updateEventType").return_ok(ok());
    mock.expect("removeEventType").return_ok(ok());
    mock.expect("findEventTypes").return_ok(ok());
    mock.expect("getEventTypesByName").return_ok(ok());
    mock.expect("getEventTypesForTopic").return_ok(ok());
    mock.expect("getEventTypesForEventSet").return_ok(ok());
    let system = mock_system(&mock);
    let event_types = &system.event_type_client;
    let scope = TopicScope::new(broker(), "t-1");

    event_types
        .create_event_type(USER, &scope, &EventTypeProperties::new("orders.Created"))
        .await
        .unwrap();
    event_types
        .create_event_type_from_template(USER, &scope, "e-1", &TemplateProperties::new("orders.Paid"))
        .await
        .unwrap();
    event_types
        .update_event_type(USER, &scope, "e-1", true, &EventTypeProperties::new("orders.Created"))
        .await
        .unwrap();
    event_types
        .remove_event_type(USER, &scope, "e-1", "orders.Created")
        .await
        .unwrap();
    event_types.find_event_types(USER, "orders", 0, 10).await.unwrap();
    event_types.get_event_types_by_name(USER, "orders.Created", 0, 10).await.unwrap();
    event_types.get_event_types_for_topic(USER, &scope, 0, 10).await.unwrap();
    event_types.get_event_types_for_event_set(USER, "t-1", 0, 10).await.unwrap();

    let expected: Vec<String> = [
        "/event-brokers/b-1/Kafka%20Prod/topics/t-1/event-types",
        "/event-brokers/b-1/Kafka%20Prod/topics/t-1/event-types/from-template/e-1",
        "/event-brokers/b-1/Kafka%20Prod/topics/event-types/e-1?isMergeUpdate=true",
        "/event-brokers/b-1/Kafka%20Prod/topics/event-types/e-1/orders.Created/delete",
        "/topics/event-types/by-search-string/orders?startFrom=0&pageSize=10",
        "/topics/event-types/by-name/orders.Created?startFrom=0&pageSize=10",
        "/topics/t-1/event-types?startFrom=0&pageSize=10",
        "/event-sets/t-1/event-types?startFrom=0&pageSize=10",
    ]
    .iter()
    .map(|suffix| format!("{ROOT}{suffix}"))
    .collect();
    assert_eq!(mock.paths(), expected);
    mock.verify();
}

#[tokio::test]
async fn test_validation_failures_issue_no_call() {
    let mock = MockInvoker::new();
    let system = mock_system(&mock);

    let cases: Vec<ClientError> = vec![
        system
            .topic_client
            .create_topic(USER, &BrokerScope::new("", "Kafka"), &TopicProperties::new("orders"))
            .await
            .unwrap_err(),
        system
            .topic_client
            .update_topic(USER, &broker(), "", true, &TopicProperties::new("orders"))
            .await
            .unwrap_err(),
        system.topic_client.publish_topic("", "t-1").await.unwrap_err(),
        system.topic_client.withdraw_topic(USER, "").await.unwrap_err(),
        system
            .topic_client
            .find_topics(USER, "", 0, 10)
            .await
            .unwrap_err(),
        system
            .topic_client
            .get_topics_by_name(USER, "orders", -1, 10)
            .await
            .unwrap_err(),
        system
            .event_type_client
            .get_event_types_for_topic(USER, &TopicScope::new(broker(), ""), 0, 10)
            .await
            .unwrap_err(),
        system
            .event_type_client
            .get_event_types_for_event_set(USER, "t-1", 0, 1001)
            .await
            .unwrap_err(),
        system
            .event_type_client
            .remove_event_type(USER, &TopicScope::new(broker(), "t-1"), "e-1", "")
            .await
            .unwrap_err(),
    ];

    for err in &cases {
        assert!(err.is_invalid_parameter(), "{err}");
    }
    assert_eq!(cases[2].method(), "publishTopic");
    assert_eq!(cases[3].method(), "withdrawTopic");
    assert!(mock.calls().is_empty());
    mock.verify();
}

#[tokio::test]
async fn test_remote_failures_are_surfaced_unchanged() {
    let mock = MockInvoker::new();
    mock.expect("publishTopic").return_err(ClientError::not_authorized(
        "publishTopic",
        USER,
        "OMAG-SECURITY-403-001 user may not publish",
    ));
    mock.expect("getEventTypeByGUID")
        .return_err(ClientError::server_fault("getEventTypeByGUID", Some(500), "repository offline"));
    let system = mock_system(&mock);

    let err = system.topic_client.publish_topic(USER, "t-1").await.unwrap_err();
    match err {
        ClientError::NotAuthorized { user_id, message, .. } => {
            assert_eq!(user_id, USER);
            assert!(message.starts_with("OMAG-SECURITY-403-001"));
        }
        other => panic!("unexpected {other:?}"),
    }

    let err = system
        .event_type_client
        .get_event_type_by_guid(USER, "e-1")
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::ServerFault { status: Some(500), .. }));
    mock.verify();
}
