//! HttpRemoteStore against an in-process note server.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use bytes::Bytes;
use serde_json::{Value, json};

use notevault_core::config::remote::RemoteConfig;
use notevault_core::error::ErrorKind;
use notevault_core::traits::remote::{ImageUpload, RemoteStore};
use notevault_core::types::NodeKind;
use notevault_remote::HttpRemoteStore;

/// One request as seen by the fake server.
#[derive(Debug, Clone)]
struct Recorded {
    endpoint: &'static str,
    api_key: Option<String>,
    query: HashMap<String, String>,
    body: Value,
}

type Log = Arc<Mutex<Vec<Recorded>>>;

fn record(log: &Log, endpoint: &'static str, headers: &HeaderMap, query: HashMap<String, String>, body: Value) {
    let api_key = headers
        .get("x-api-key")
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    log.lock().unwrap().push(Recorded {
        endpoint,
        api_key,
        query,
        body,
    });
}

async fn list(State(log): State<Log>, headers: HeaderMap) -> Json<Value> {
    record(&log, "list", &headers, HashMap::new(), Value::Null);
    Json(json!({"result": [
        {"name": "Notes", "path": "/default/note/Notes", "folder": true, "children": [
            {"name": "a.md", "path": "/default/note/Notes/a.md", "folder": false, "publish": true, "children": []}
        ]}
    ]}))
}

async fn create(
    State(log): State<Log>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> StatusCode {
    record(&log, "create", &headers, query, Value::Null);
    StatusCode::OK
}

async fn rename(
    State(log): State<Log>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> StatusCode {
    record(&log, "rename", &headers, query, Value::Null);
    StatusCode::OK
}

async fn move_node() -> StatusCode {
    StatusCode::INTERNAL_SERVER_ERROR
}

async fn content(
    State(log): State<Log>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    let path = query.get("path").cloned().unwrap_or_default();
    record(&log, "content", &headers, query, Value::Null);
    Json(json!({"result": format!("# {path}")}))
}

async fn update(State(log): State<Log>, headers: HeaderMap, Json(body): Json<Value>) -> StatusCode {
    record(&log, "update", &headers, HashMap::new(), body);
    StatusCode::OK
}

async fn unpublish(State(log): State<Log>, headers: HeaderMap, Json(body): Json<Value>) -> StatusCode {
    record(&log, "unpublish", &headers, HashMap::new(), body);
    StatusCode::OK
}

async fn images(State(log): State<Log>, headers: HeaderMap, mut multipart: Multipart) -> Json<Value> {
    let mut stored = Vec::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        assert_eq!(field.name(), Some("files"));
        let name = field.file_name().unwrap_or_default().to_string();
        stored.push(format!("/images/{name}"));
    }
    record(&log, "images", &headers, HashMap::new(), json!(stored));
    Json(json!({"result": stored}))
}

struct TestServer {
    addr: SocketAddr,
    log: Log,
}

impl TestServer {
    async fn start() -> Self {
        let log: Log = Arc::new(Mutex::new(Vec::new()));
        let router = Router::new()
            .route("/api/files", get(list))
            .route("/api/files/create", post(create))
            .route("/api/files/move", put(move_node))
            .route("/api/files/rename", put(rename))
            .route("/api/files/content", get(content))
            .route("/api/files/update", put(update))
            .route("/api/files/unpublish", delete(unpublish))
            .route("/api/files/images", post(images))
            .with_state(log.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        Self { addr, log }
    }

    fn store(&self) -> HttpRemoteStore {
        HttpRemoteStore::new(&RemoteConfig {
            base_url: format!("http://{}/api/", self.addr),
            api_key: "test-key".to_string(),
            request_timeout_seconds: 5,
        })
        .unwrap()
    }

    fn last(&self) -> Recorded {
        self.log.lock().unwrap().last().cloned().unwrap()
    }
}

#[tokio::test]
async fn test_list_unwraps_result_envelope() {
    let server = TestServer::start().await;
    let listing = server.store().list().await.unwrap();

    assert_eq!(listing.len(), 1);
    assert!(listing[0].folder);
    assert!(listing[0].children[0].is_published());
    assert_eq!(server.last().api_key.as_deref(), Some("test-key"));
}

#[tokio::test]
async fn test_create_and_rename_send_query_parameters() {
    let server = TestServer::start().await;
    let store = server.store();

    store.create("Notes/My Note.md", NodeKind::File).await.unwrap();
    let request = server.last();
    assert_eq!(request.endpoint, "create");
    assert_eq!(request.query["path"], "Notes/My Note.md");
    assert_eq!(request.query["type"], "file");

    store.rename("Notes/My Note.md", "b.md").await.unwrap();
    let request = server.last();
    assert_eq!(request.query["path"], "Notes/My Note.md");
    assert_eq!(request.query["newName"], "b.md");
}

#[tokio::test]
async fn test_content_round_trip() {
    let server = TestServer::start().await;
    let store = server.store();

    assert_eq!(store.read_content("Notes/a.md").await.unwrap(), "# Notes/a.md");

    store.write_content("Notes/a.md", "new body").await.unwrap();
    let request = server.last();
    assert_eq!(request.body, json!({"filePath": "Notes/a.md", "content": "new body"}));
}

#[tokio::test]
async fn test_unpublish_sends_file_paths() {
    let server = TestServer::start().await;
    server
        .store()
        .unpublish(&["a.md".to_string(), "b.md".to_string()])
        .await
        .unwrap();
    assert_eq!(server.last().body, json!({"filePaths": ["a.md", "b.md"]}));
}

#[tokio::test]
async fn test_upload_images_multipart() {
    let server = TestServer::start().await;
    let stored = server
        .store()
        .upload_images(vec![
            ImageUpload {
                file_name: "cat.png".to_string(),
                mime_type: "image/png".to_string(),
                data: Bytes::from_static(b"\x89PNG"),
            },
            ImageUpload {
                file_name: "dog.jpg".to_string(),
                mime_type: "image/jpeg".to_string(),
                data: Bytes::from_static(b"\xff\xd8"),
            },
        ])
        .await
        .unwrap();
    assert_eq!(stored, vec!["/images/cat.png", "/images/dog.jpg"]);
}

#[tokio::test]
async fn test_server_error_maps_to_remote_kind() {
    let server = TestServer::start().await;
    let err = server.store().move_node("a.md", "Notes").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Remote);
}

#[tokio::test]
async fn test_unreachable_server_maps_to_remote_kind() {
    let store = HttpRemoteStore::new(&RemoteConfig {
        base_url: "http://127.0.0.1:1".to_string(),
        api_key: String::new(),
        request_timeout_seconds: 2,
    })
    .unwrap();
    let err = store.delete("a.md").await.unwrap_err();
    assert!(err.is_remote());
}
