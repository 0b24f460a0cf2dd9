mod common;

use api::{AppState, CollectionState, Routes};
use serde_json::json;
use store::{ClientConfig, MemoryStore};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{api_path, base_url, signed_in_state, signed_out};

async fn mount_json(server: &MockServer, verb: &str, endpoint: &str, body: serde_json::Value) {
    Mock::given(method(verb))
        .and(path(api_path(endpoint)))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn login_loads_notes_and_groups() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "POST",
        "/login",
        json!({"accessToken": "a1", "refreshToken": "r1", "user": {"id": "u1"}}),
    )
    .await;
    Mock::given(method("GET"))
        .and(path(api_path("/notes")))
        .and(header("authorization", "Bearer a1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": "n1", "body": "hi"}])))
        .expect(1)
        .mount(&server)
        .await;
    mount_json(&server, "GET", "/groups", json!([{"id": "g1", "name": "Book club"}])).await;

    let (client, _) = signed_out(&server).await;
    let app = AppState::new(client, Routes::default());
    assert!(!app.is_signed_in());

    app.login("ada@example.com", "secret").await.unwrap();

    assert!(app.is_signed_in());
    assert_eq!(app.personal_notes().cache().items().len(), 1);
    assert_eq!(app.groups().cache().items()[0].name, "Book club");
}

#[tokio::test]
async fn selecting_a_group_loads_its_notes_and_members() {
    let server = MockServer::start().await;
    mount_json(&server, "GET", "/groups/g1/notes", json!([{"id": "n9", "body": "agenda"}])).await;
    mount_json(
        &server,
        "GET",
        "/groups/g1/members",
        json!([{"user_id": "u1", "role": "owner"}]),
    )
    .await;
    Mock::given(method("DELETE"))
        .and(path(api_path("/groups/g1")))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    mount_json(&server, "GET", "/groups", json!([])).await;

    let app = signed_in_state(&server).await;
    let mut selection = app.subscribe_active();

    let group = app.select_group("g1").await.unwrap();
    assert!(selection.has_changed().unwrap());
    assert_eq!(*selection.borrow_and_update(), Some("g1".to_string()));
    assert_eq!(group.notes.cache().items()[0].body, "agenda");
    assert_eq!(group.members.cache().items()[0].user_id, "u1");
    assert_eq!(app.active_group().unwrap().id, "g1");

    app.delete_group("g1").await.unwrap();
    assert!(app.active_group().is_none());
    assert_eq!(app.active_group_id(), None);
    assert_eq!(app.groups().cache().snapshot(), CollectionState::Loaded(vec![]));
}

#[tokio::test]
async fn expired_session_resets_every_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(api_path("/token/refresh")))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let app = signed_in_state(&server).await;

    assert!(!app.restore().await);
    assert!(!app.is_signed_in());
    assert_eq!(app.personal_notes().cache().snapshot(), CollectionState::Idle);
    assert_eq!(app.groups().cache().snapshot(), CollectionState::Idle);
}

#[tokio::test]
async fn restore_keeps_the_session_through_backend_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let app = signed_in_state(&server).await;

    assert!(app.restore().await);
    assert!(app.is_signed_in());
    assert!(matches!(
        app.groups().cache().snapshot(),
        CollectionState::Failed(_)
    ));
}

#[tokio::test]
async fn open_uses_the_configured_segment() {
    let server = MockServer::start().await;
    mount_json(&server, "GET", "/teams", json!([{"team_id": "t1", "team_name": "Ops"}])).await;
    mount_json(&server, "GET", "/notes", json!([])).await;

    let storage = MemoryStore::new();
    {
        let session = store::SessionStore::open(storage.clone()).await;
        session.set(store::Session::new("a1", "r1", "u1")).await;
    }
    let config =
        ClientConfig::new(base_url(&server)).with_group_segment(store::GroupSegment::Teams);
    let app = AppState::open(&config, storage).await;

    assert!(app.restore().await);
    assert_eq!(app.groups().get("t1").unwrap().name, "Ops");
}

#[tokio::test]
async fn logout_forgets_everything() {
    let server = MockServer::start().await;
    mount_json(&server, "GET", "/notes", json!([{"id": "n1", "body": "hi"}])).await;
    Mock::given(method("POST"))
        .and(path(api_path("/logout")))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let app = signed_in_state(&server).await;
    app.personal_notes().list().await.unwrap();
    app.logout().await;

    assert!(!app.is_signed_in());
    assert_eq!(app.personal_notes().cache().snapshot(), CollectionState::Idle);
}
