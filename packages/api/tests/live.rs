mod common;

use api::{ChannelConnector, ClientError, LiveListener, LiveState};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{api_path, signed_in_state, signed_out};

async fn mount_list(server: &MockServer, endpoint: &str, times: u64) {
    Mock::given(method("GET"))
        .and(path(api_path(endpoint)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(times)
        .mount(server)
        .await;
}

#[tokio::test]
async fn notifications_refetch_the_affected_collections() {
    let server = MockServer::start().await;
    // One fetch for the selection, one per matching notification.
    mount_list(&server, "/groups/g1/notes", 2).await;
    mount_list(&server, "/groups/g1/members", 2).await;
    mount_list(&server, "/notes", 1).await;
    mount_list(&server, "/groups", 1).await;
    mount_list(&server, "/groups/g2/notes", 0).await;
    mount_list(&server, "/groups/g2/members", 0).await;

    let app = signed_in_state(&server).await;
    app.select_group("g1").await.unwrap();

    let (connector, frames) = ChannelConnector::new();
    for frame in [
        json!({"type": "noteUpdate", "groupId": "g1"}).to_string(),
        json!({"type": "noteUpdate", "groupId": "g2"}).to_string(),
        json!({"type": "noteUpdate"}).to_string(),
        json!({"type": "memberUpdate", "groupId": "g1"}).to_string(),
        json!({"type": "memberUpdate", "groupId": "g2"}).to_string(),
        json!({"type": "groupUpdate"}).to_string(),
        json!({"type": "typing", "userId": "u2"}).to_string(),
        "{not json".to_string(),
    ] {
        frames.unbounded_send(Ok(frame)).unwrap();
    }
    drop(frames);

    let listener = LiveListener::new("ws://localhost:8080/ws");
    let mut states = listener.subscribe();
    listener.run(&app, &connector).await.unwrap();

    assert_eq!(listener.state(), LiveState::Disconnected);
    assert!(states.has_changed().unwrap());
    assert_eq!(
        connector.connected_urls(),
        vec!["ws://localhost:8080/ws?groupId=g1&token=a1".to_string()]
    );
    assert!(app.personal_notes().cache().snapshot().is_loaded());
    assert!(app.groups().cache().snapshot().is_loaded());
}

#[tokio::test]
async fn transport_error_disconnects() {
    let server = MockServer::start().await;
    mount_list(&server, "/notes", 1).await;

    let app = signed_in_state(&server).await;
    let (connector, frames) = ChannelConnector::new();
    frames
        .unbounded_send(Ok(json!({"type": "noteUpdate"}).to_string()))
        .unwrap();
    frames
        .unbounded_send(Err(ClientError::Live("socket error".into())))
        .unwrap();
    frames
        .unbounded_send(Ok(json!({"type": "noteUpdate"}).to_string()))
        .unwrap();

    let listener = LiveListener::new("ws://localhost:8080/ws");
    let err = listener.run(&app, &connector).await.unwrap_err();

    assert!(matches!(err, ClientError::Live(_)));
    assert_eq!(listener.state(), LiveState::Disconnected);
    assert_eq!(
        connector.connected_urls(),
        vec!["ws://localhost:8080/ws?token=a1".to_string()]
    );
}

#[tokio::test]
async fn signed_out_listener_never_connects() {
    let server = MockServer::start().await;
    let (client, _) = signed_out(&server).await;
    let app = api::AppState::new(client, api::Routes::default());
    let (connector, _frames) = ChannelConnector::new();

    let listener = LiveListener::new("ws://localhost:8080/ws");
    let err = listener.run(&app, &connector).await.unwrap_err();

    assert!(matches!(err, ClientError::Unauthenticated));
    assert!(connector.connected_urls().is_empty());
    assert_eq!(listener.state(), LiveState::Disconnected);
}

#[tokio::test]
async fn consumed_connector_fails_to_connect() {
    let server = MockServer::start().await;
    let app = signed_in_state(&server).await;
    let (connector, frames) = ChannelConnector::new();
    drop(frames);

    let listener = LiveListener::new("ws://localhost:8080/ws");
    listener.run(&app, &connector).await.unwrap();
    let err = listener.run(&app, &connector).await.unwrap_err();

    assert!(matches!(err, ClientError::Live(_)));
    assert_eq!(listener.state(), LiveState::Disconnected);
    assert_eq!(connector.connected_urls().len(), 2);
}
