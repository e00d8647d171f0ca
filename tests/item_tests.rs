//! Integration tests for the item lifecycle.
//!
//! These tests verify draft creation and save, in-place updates,
//! refresh semantics, embedded entity hydration, and item-scoped
//! nested resources and extra routes.

use eve_client::config::{ClientOptions, ResourceDescriptor, RouteDescriptor};
use eve_client::rest::Field;
use eve_client::{ApiError, Client};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Builds a client with an `events` collection declaring a nested
/// `rsvps` resource and a `publish` item extra route.
fn events_client(server: &MockServer) -> Client {
    let options = ClientOptions::builder(server.uri())
        .resource(
            "events",
            ResourceDescriptor::new("events")
                .item_resource("rsvps", ResourceDescriptor::new("rsvps"))
                .item_extra_route("publish", RouteDescriptor::new("publish")),
        )
        .build()
        .unwrap();
    Client::new(&options).unwrap()
}

// ============================================================================
// Draft Save Tests
// ============================================================================

#[tokio::test]
async fn test_saving_a_draft_posts_once_and_merges_the_reply() {
    let server = MockServer::start().await;
    let uri = server.uri();
    Mock::given(method("POST"))
        .and(path("/events"))
        .and(body_json(json!({"name": "meetup"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "url": format!("{uri}/events/1"),
            "_etag": "v1",
            "name": "meetup",
            "status": "pending"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = events_client(&server);
    let mut event = client
        .resource("events")
        .unwrap()
        .create(json!({"name": "meetup"}))
        .unwrap();
    assert!(event.is_draft());

    event.save().await.unwrap();

    assert!(!event.is_draft());
    assert_eq!(
        event.locator().unwrap().as_str(),
        format!("{uri}/events/1")
    );
    assert_eq!(event.etag(), Some("v1"));
    // Server-computed fields merge into the local mapping
    assert_eq!(
        event.field("status").and_then(Field::as_scalar),
        Some(&json!("pending"))
    );
}

#[tokio::test]
async fn test_saving_a_persisted_item_patches_its_own_locator() {
    let server = MockServer::start().await;
    let uri = server.uri();
    Mock::given(method("GET"))
        .and(path("/events/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "url": format!("{uri}/events/1"),
            "name": "meetup"
        })))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/events/1"))
        .and(body_json(json!({"name": "renamed"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "url": format!("{uri}/events/1"),
            "_etag": "v2",
            "name": "renamed"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = events_client(&server);
    let mut event = client
        .resource("events")
        .unwrap()
        .get_by_id("1")
        .await
        .unwrap();

    event.set_field("name", &json!("renamed")).unwrap();
    event.save().await.unwrap();

    assert_eq!(event.etag(), Some("v2"));
    assert_eq!(
        event.field("name").and_then(Field::as_scalar),
        Some(&json!("renamed"))
    );
}

// ============================================================================
// Refresh Tests
// ============================================================================

#[tokio::test]
async fn test_refreshing_a_draft_is_a_usage_error_with_no_request() {
    let server = MockServer::start().await;
    // No mocks mounted: any request would surface as a different error
    let client = events_client(&server);
    let mut draft = client
        .resource("events")
        .unwrap()
        .create(json!({"name": "meetup"}))
        .unwrap();

    let result = draft.refresh().await;

    assert!(matches!(result, Err(ApiError::Usage(_))));
    assert!(draft.is_draft());
}

#[tokio::test]
async fn test_embedded_entity_refreshes_through_its_own_locator() {
    let server = MockServer::start().await;
    let uri = server.uri();
    Mock::given(method("GET"))
        .and(path("/events/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "url": format!("{uri}/events/1"),
            "organizer": {"url": format!("{uri}/people/7"), "name": "Ada"}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/people/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "url": format!("{uri}/people/7"),
            "name": "Ada Lovelace"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = events_client(&server);
    let event = client
        .resource("events")
        .unwrap()
        .get_by_id("1")
        .await
        .unwrap();

    let mut organizer = event
        .field("organizer")
        .and_then(Field::as_item)
        .unwrap()
        .clone();
    organizer.refresh().await.unwrap();

    assert_eq!(
        organizer.field("name").and_then(Field::as_scalar),
        Some(&json!("Ada Lovelace"))
    );
}

// ============================================================================
// Nested Binding Tests
// ============================================================================

#[tokio::test]
async fn test_nested_resource_lists_under_the_item_locator() {
    let server = MockServer::start().await;
    let uri = server.uri();
    Mock::given(method("GET"))
        .and(path("/events/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "url": format!("{uri}/events/1")
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/events/1/rsvps"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_items": [{"url": format!("{uri}/events/1/rsvps/9")}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = events_client(&server);
    let event = client
        .resource("events")
        .unwrap()
        .get_by_id("1")
        .await
        .unwrap();

    let page = event.resource("rsvps").unwrap().list(None).await.unwrap();
    assert_eq!(page.len(), 1);
}

#[tokio::test]
async fn test_item_extra_route_posts_under_the_item_locator() {
    let server = MockServer::start().await;
    let uri = server.uri();
    Mock::given(method("GET"))
        .and(path("/events/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "url": format!("{uri}/events/1")
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/events/1/publish"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"published": true})))
        .expect(1)
        .mount(&server)
        .await;

    let client = events_client(&server);
    let event = client
        .resource("events")
        .unwrap()
        .get_by_id("1")
        .await
        .unwrap();

    let reply = event
        .extra_route("publish")
        .unwrap()
        .post(json!({}))
        .await
        .unwrap();
    assert_eq!(reply, json!({"published": true}));
}

// ============================================================================
// Clone Tests
// ============================================================================

#[tokio::test]
async fn test_clone_draft_saves_as_a_new_record() {
    let server = MockServer::start().await;
    let uri = server.uri();
    Mock::given(method("GET"))
        .and(path("/events/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "url": format!("{uri}/events/1"),
            "name": "meetup"
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/events"))
        .and(body_json(json!({"name": "meetup"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "url": format!("{uri}/events/2"),
            "name": "meetup"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = events_client(&server);
    let event = client
        .resource("events")
        .unwrap()
        .get_by_id("1")
        .await
        .unwrap();

    let mut copy = event.clone_draft();
    assert!(copy.is_draft());

    copy.save().await.unwrap();
    assert_eq!(copy.locator().unwrap().as_str(), format!("{uri}/events/2"));
}
