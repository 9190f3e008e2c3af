//! HttpChatTransport tests
//!
//! Each test binds a small axum router to an ephemeral port standing in
//! for the advisor backend.

use advisor_chat::conversation::Conversation;
use advisor_chat::domain::ResponseShape;
use advisor_chat::exchange;
use advisor_chat::transport::{ChatTransport, HttpChatTransport, TransportError};
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

type Received = Arc<Mutex<Vec<Value>>>;

async fn spawn_backend(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve");
    });
    format!("http://{addr}")
}

/// Backend whose `/chat` always answers with `reply` and records requests
async fn chat_backend(reply: Value) -> (String, Received) {
    let received: Received = Arc::new(Mutex::new(Vec::new()));
    let router = Router::new()
        .route(
            "/chat",
            post(
                |State((received, reply)): State<(Received, Value)>, Json(body): Json<Value>| async move {
                    received.lock().unwrap().push(body);
                    Json(reply)
                },
            ),
        )
        .with_state((received.clone(), reply));
    (spawn_backend(router).await, received)
}

#[tokio::test]
async fn posts_text_under_backend_field_name() {
    let (base_url, received) = chat_backend(json!({"data": []})).await;
    let transport = HttpChatTransport::new(base_url, ResponseShape::List);

    transport.send("Tell me about Jane").await.expect("reply");

    let bodies = received.lock().unwrap().clone();
    assert_eq!(bodies, vec![json!({"textInputForGPT": "Tell me about Jane"})]);
}

#[tokio::test]
async fn empty_list_yields_empty_result_set() {
    let (base_url, _) = chat_backend(json!({"data": []})).await;
    let transport = HttpChatTransport::new(base_url, ResponseShape::List);

    let reply = transport.send("anyone in Toronto?").await.expect("reply");
    assert!(reply.records.is_empty());
    assert!(reply.message.is_none());
}

#[tokio::test]
async fn list_reply_decodes_records_and_message() {
    let (base_url, _) = chat_backend(json!({
        "data": [{
            "ID": 1,
            "name": "Jane",
            "age": 41,
            "gender": "F",
            "person_2": "John",
            "relationship": "Spouse",
            "net_worth": 750000,
            "postal_code": "M5V 2T6",
            "city": "Toronto",
            "province": "ON",
            "street": "1 King St",
            "company_name": "Acme"
        }],
        "msg": "Here is Jane."
    }))
    .await;
    let transport = HttpChatTransport::new(base_url, ResponseShape::List);

    let reply = transport.send("Tell me about Jane").await.expect("reply");

    assert_eq!(reply.records.len(), 1);
    let jane = &reply.records.records()[0];
    assert_eq!(jane.name, "Jane");
    assert_eq!(jane.age, "41");
    assert_eq!(jane.second_person, "John");
    assert_eq!(jane.net_worth, "750000");
    assert_eq!(jane.company_name.as_deref(), Some("Acme"));
    assert_eq!(reply.message.as_deref(), Some("Here is Jane."));
}

#[tokio::test]
async fn single_reply_wraps_one_record() {
    let (base_url, _) = chat_backend(json!({"data": {"name": "Jane", "city": "Ottawa"}})).await;
    let transport = HttpChatTransport::new(base_url, ResponseShape::Single);

    let reply = transport.send("Tell me about Jane").await.expect("reply");

    assert_eq!(reply.records.len(), 1);
    assert_eq!(reply.records.records()[0].city, "Ottawa");
}

#[tokio::test]
async fn single_shape_accepts_empty_list_with_message() {
    let (base_url, _) = chat_backend(json!({
        "data": [],
        "msg": "I could not find anyone matching that."
    }))
    .await;
    let transport = HttpChatTransport::new(base_url, ResponseShape::Single);

    let reply = transport.send("Tell me about Nobody").await.expect("reply");
    assert!(reply.records.is_empty());
    assert_eq!(
        reply.message.as_deref(),
        Some("I could not find anyone matching that.")
    );

    let mut conversation = Conversation::new("Bot", "Hello");
    exchange::complete(&mut conversation, Ok(reply), ResponseShape::Single);

    assert!(conversation.result_set().expect("result set").is_empty());
    let text = conversation.turns().last().expect("reply turn").text();
    assert!(text.contains("I could not find anyone matching that."), "reply was {text:?}");
    assert!(!text.contains("failed"));
}

#[tokio::test]
async fn single_shape_rejects_list_of_records() {
    let (base_url, _) = chat_backend(json!({"data": [{"name": "Jane"}]})).await;
    let transport = HttpChatTransport::new(base_url, ResponseShape::Single);

    let err = transport.send("Tell me about Jane").await.unwrap_err();
    assert!(matches!(err, TransportError::InvalidResponse { .. }));
}

#[tokio::test]
async fn shape_mismatch_is_invalid_response() {
    let (base_url, _) = chat_backend(json!({"data": {"name": "Jane"}})).await;
    let transport = HttpChatTransport::new(base_url, ResponseShape::List);

    let err = transport.send("Tell me about Jane").await.unwrap_err();
    assert!(matches!(err, TransportError::InvalidResponse { .. }));
    assert!(err.user_message().contains("not understood"));
}

#[tokio::test]
async fn server_error_is_reported_with_status() {
    let router = Router::new().route(
        "/chat",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let base_url = spawn_backend(router).await;
    let transport = HttpChatTransport::new(base_url, ResponseShape::List);

    let err = transport.send("hello").await.unwrap_err();
    assert!(matches!(err, TransportError::Network { .. }));
    assert!(err.user_message().contains("500"), "{}", err.user_message());
}

#[tokio::test]
async fn unreachable_backend_is_a_connect_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    let transport = HttpChatTransport::new(format!("http://{addr}"), ResponseShape::List);

    let err = transport.send("hello").await.unwrap_err();
    assert!(err.user_message().starts_with("Could not connect"));
}

#[tokio::test]
async fn slow_backend_times_out_when_configured() {
    let router = Router::new().route(
        "/chat",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(2)).await;
            Json(json!({"data": []}))
        }),
    );
    let base_url = spawn_backend(router).await;
    let transport =
        HttpChatTransport::with_timeout(base_url, ResponseShape::List, Duration::from_millis(100))
            .expect("client");

    let err = transport.send("hello").await.unwrap_err();
    assert!(err.user_message().contains("timed out"), "{}", err.user_message());
}

#[tokio::test]
async fn ping_checks_status_field() {
    let router = Router::new().route("/ping", get(|| async { Json(json!({"status": "SUCCESS"})) }));
    let transport = HttpChatTransport::new(spawn_backend(router).await, ResponseShape::List);
    transport.ping().await.expect("healthy");

    let router = Router::new().route("/ping", get(|| async { Json(json!({"status": "DEGRADED"})) }));
    let transport = HttpChatTransport::new(spawn_backend(router).await, ResponseShape::List);
    let err = transport.ping().await.unwrap_err();
    assert!(matches!(err, TransportError::Unhealthy { ref status, .. } if status == "DEGRADED"));
}

#[tokio::test]
async fn list_clients_reads_user_list() {
    let router = Router::new().route(
        "/user-list",
        get(|| async { Json(json!({"data": [{"name": "Jane"}, {"name": "John"}]})) }),
    );
    let transport = HttpChatTransport::new(spawn_backend(router).await, ResponseShape::Single);

    let clients = transport.list_clients().await.expect("clients");
    let names: Vec<&str> = clients.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Jane", "John"]);
}
