#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use api::{ApiClient, AppState, Routes};
use serde_json::{json, Map, Value};
use store::{GroupSegment, MemoryStore, Session, SessionStore};
use wiremock::{MockServer, Request, Respond, ResponseTemplate};

pub const API_ROOT: &str = "/api/v1";

pub fn api_path(endpoint: &str) -> String {
    format!("{API_ROOT}{endpoint}")
}

pub fn base_url(server: &MockServer) -> String {
    format!("{}{API_ROOT}", server.uri())
}

/// Client over a fresh memory store, signed in as `u1` with tokens `a1`/`r1`.
pub async fn signed_in(server: &MockServer) -> (ApiClient<MemoryStore>, MemoryStore) {
    let storage = MemoryStore::new();
    let session = SessionStore::open(storage.clone()).await;
    session
        .set(Session::new("a1", "r1", "u1").with_email("ada@example.com"))
        .await;
    (ApiClient::new(base_url(server), session), storage)
}

pub async fn signed_out(server: &MockServer) -> (ApiClient<MemoryStore>, MemoryStore) {
    let storage = MemoryStore::new();
    let session = SessionStore::open(storage.clone()).await;
    (ApiClient::new(base_url(server), session), storage)
}

pub async fn signed_in_state(server: &MockServer) -> AppState<MemoryStore> {
    let (client, _) = signed_in(server).await;
    AppState::new(client, Routes::new(GroupSegment::Groups))
}

/// In-process stand-in for one backend collection.
///
/// `GET` lists, `POST` appends with a generated id, `PUT .../{id}` merges fields and
/// `DELETE .../{id}` removes. Mount it on a path regex covering the collection and
/// its items.
#[derive(Clone)]
pub struct FakeCollection {
    items: Arc<Mutex<Vec<Value>>>,
    next_id: Arc<AtomicUsize>,
    key: &'static str,
}

impl FakeCollection {
    pub fn new() -> Self {
        Self::keyed("id")
    }

    /// Collection whose items are identified by `key` (`user_id` for members).
    pub fn keyed(key: &'static str) -> Self {
        Self {
            items: Arc::default(),
            next_id: Arc::new(AtomicUsize::new(1)),
            key,
        }
    }

    pub fn with_items(self, items: Vec<Value>) -> Self {
        *self.items.lock().unwrap() = items;
        self
    }

    pub fn items(&self) -> Vec<Value> {
        self.items.lock().unwrap().clone()
    }

    fn item_id(request: &Request) -> Option<String> {
        request
            .url
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .map(str::to_string)
    }
}

impl Respond for FakeCollection {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let mut items = self.items.lock().unwrap();
        match request.method.as_str() {
            "GET" => ResponseTemplate::new(200).set_body_json(Value::Array(items.clone())),
            "POST" => {
                let mut fields: Map<String, Value> = match request.body_json() {
                    Ok(fields) => fields,
                    Err(_) => {
                        return ResponseTemplate::new(400)
                            .set_body_json(json!({"error": "bad body"}));
                    }
                };
                if !fields.contains_key(self.key) {
                    let id = self.next_id.fetch_add(1, Ordering::SeqCst);
                    fields.insert(self.key.to_string(), json!(format!("n{id}")));
                }
                let created = Value::Object(fields);
                items.push(created.clone());
                ResponseTemplate::new(201).set_body_json(created)
            }
            "PUT" => {
                let id = Self::item_id(request).unwrap_or_default();
                let fields: Map<String, Value> = request.body_json().unwrap_or_default();
                match items.iter_mut().find(|item| item[self.key] == json!(id)) {
                    Some(Value::Object(item)) => {
                        item.extend(fields);
                        ResponseTemplate::new(200).set_body_json(Value::Object(item.clone()))
                    }
                    _ => ResponseTemplate::new(404).set_body_json(json!({"error": "not found"})),
                }
            }
            "DELETE" => {
                let id = Self::item_id(request).unwrap_or_default();
                let before = items.len();
                items.retain(|item| item[self.key] != json!(id));
                if items.len() < before {
                    ResponseTemplate::new(204)
                } else {
                    ResponseTemplate::new(404).set_body_json(json!({"error": "not found"}))
                }
            }
            _ => ResponseTemplate::new(405),
        }
    }
}
