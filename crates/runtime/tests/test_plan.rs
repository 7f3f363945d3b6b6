use std::path::Path;

use anyhow::{Context, Result};
use chatsync_api::{ApiError, User};
use chatsync_chats::{ChatError, InboundEvent};
use chatsync_config::ClientConfig;
use chatsync_runtime::{restore_session, ChatSession, SessionError};
use httpmock::prelude::*;
use serde_json::json;
use tempfile::TempDir;

fn build_config(server: &MockServer, session_path: &Path) -> ClientConfig {
    let mut config = ClientConfig::default();
    config.api.base_url = server.base_url();
    config.api.request_timeout_seconds = 5;
    config.session.path = session_path.to_path_buf();
    config.search.max_results = 10;
    config
}

fn user_json(id: &str, name: &str) -> serde_json::Value {
    json!({"_id": id, "name": name, "email": format!("{}@example.com", name.to_lowercase())})
}

fn write_session(path: &Path) -> Result<()> {
    let record = json!({
        "_id": "A",
        "name": "Alice",
        "email": "alice@example.com",
        "token": "jwt-a"
    });
    std::fs::write(path, serde_json::to_vec(&record)?)?;
    Ok(())
}

async fn signed_in(server: &MockServer, dir: &TempDir) -> Result<ChatSession> {
    let session_path = dir.path().join("userInfo.json");
    write_session(&session_path)?;
    restore_session(&build_config(server, &session_path))
        .await?
        .context("expected a stored session")
}

#[tokio::test(flavor = "multi_thread")]
async fn restore_without_session_file_returns_none() -> Result<()> {
    let server = MockServer::start_async().await;
    let dir = TempDir::new()?;
    let config = build_config(&server, &dir.path().join("missing.json"));

    assert!(restore_session(&config).await?.is_none());
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn restore_reports_corrupt_session_file() -> Result<()> {
    let server = MockServer::start_async().await;
    let dir = TempDir::new()?;
    let path = dir.path().join("userInfo.json");
    std::fs::write(&path, b"{not json")?;

    let error = match restore_session(&build_config(&server, &path)).await {
        Ok(_) => panic!("expected a corrupt session file to fail"),
        Err(error) => error,
    };
    let message = format!("{error:?}");
    assert!(
        message.contains("failed to read session file"),
        "expected session file context, got {message}"
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn refresh_lists_chats_with_bearer_token() -> Result<()> {
    let server = MockServer::start_async().await;
    let dir = TempDir::new()?;
    let chats = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/chat")
                .header("authorization", "Bearer jwt-a");
            then.status(200).json_body(json!([
                {
                    "_id": "c1",
                    "chatName": "sender",
                    "isGroupChat": false,
                    "users": [user_json("A", "Alice"), user_json("B", "Bob")],
                    "latestMessage": {
                        "_id": "m1",
                        "content": "see you",
                        "sender": user_json("B", "Bob"),
                        "chat": "c1",
                        "createdAt": "2024-05-01T10:00:00Z"
                    }
                }
            ]));
        })
        .await;

    let mut session = signed_in(&server, &dir).await?;
    let count = session.refresh_chats().await?;

    chats.assert_async().await;
    assert_eq!(count, 1);
    assert!(session.chat_list().is_loaded());

    let me = session.current_user().id().clone();
    let chat = session.state().cache().get("c1").context("c1 is cached")?;
    assert_eq!(chat.display_name(&me), "Bob");
    assert_eq!(chat.preview(&me).as_deref(), Some("see you"));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn search_then_open_creates_chat_remotely() -> Result<()> {
    let server = MockServer::start_async().await;
    let dir = TempDir::new()?;
    let search = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/user").query_param("search", "car");
            then.status(200).json_body(json!([user_json("C", "Carol")]));
        })
        .await;
    let access = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/chat")
                .json_body(json!({"userId": "C"}));
            then.status(200).json_body(json!({
                "_id": "c2",
                "chatName": "sender",
                "isGroupChat": false,
                "users": [user_json("A", "Alice"), user_json("C", "Carol")]
            }));
        })
        .await;

    let mut session = signed_in(&server, &dir).await?;
    let carol: User = session.search_users("  car ").await?[0].clone();
    let chat = session.open_chat_with(&carol).await?;

    search.assert_async().await;
    access.assert_async().await;
    assert_eq!(chat.id, "c2");
    assert_eq!(session.state().cache().ids(), vec!["c2"]);
    assert!(session.state().selection().is_selected("c2"));

    // Second open is served from the cache.
    session.close_chat();
    session.open_chat_with(&carol).await?;
    access.assert_hits_async(1).await;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn empty_search_never_reaches_server() -> Result<()> {
    let server = MockServer::start_async().await;
    let dir = TempDir::new()?;
    let search = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/user");
            then.status(200).json_body(json!([]));
        })
        .await;

    let mut session = signed_in(&server, &dir).await?;
    let error = session.search_users("").await.unwrap_err();

    assert!(error.is_recoverable());
    assert!(!session.search().is_loading());
    search.assert_hits_async(0).await;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn expired_token_is_not_recoverable() -> Result<()> {
    let server = MockServer::start_async().await;
    let dir = TempDir::new()?;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/chat");
            then.status(401).json_body(json!({"message": "Not authorized, token failed"}));
        })
        .await;

    let mut session = signed_in(&server, &dir).await?;
    let error = session.refresh_chats().await.unwrap_err();

    assert!(matches!(
        error,
        SessionError::Chat(ChatError::Api(ApiError::Auth { .. }))
    ));
    assert!(!error.is_recoverable());
    assert!(session.state().cache().is_empty());
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn events_notify_and_open_from_notification() -> Result<()> {
    let server = MockServer::start_async().await;
    let dir = TempDir::new()?;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/chat");
            then.status(200).json_body(json!([
                {"_id": "c1", "chatName": "sender", "isGroupChat": false,
                 "users": [user_json("A", "Alice"), user_json("B", "Bob")]},
                {"_id": "c3", "chatName": "sender", "isGroupChat": false,
                 "users": [user_json("A", "Alice"), user_json("C", "Carol")]}
            ]));
        })
        .await;

    let mut session = signed_in(&server, &dir).await?;
    session.refresh_chats().await?;
    session.open_chat("c1")?;

    let event: InboundEvent = serde_json::from_value(json!({
        "type": "MessageReceived",
        "data": {
            "_id": "m9",
            "content": "ping",
            "sender": user_json("C", "Carol"),
            "chat": {"_id": "c3"},
            "createdAt": "2024-05-01T10:00:00Z"
        }
    }))?;
    session.handle_event(event.clone());
    session.handle_event(event);

    assert_eq!(session.state().notifications().count(), 1);

    session.open_chat("c3")?;
    assert!(session.state().notifications().is_empty());

    let missing = session.open_chat("nope").unwrap_err();
    assert_eq!(missing, SessionError::Chat(ChatError::chat_not_found("nope")));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn logout_clears_state_and_session_file() -> Result<()> {
    let server = MockServer::start_async().await;
    let dir = TempDir::new()?;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/chat");
            then.status(200).json_body(json!([
                {"_id": "c1", "chatName": "sender", "isGroupChat": false,
                 "users": [user_json("A", "Alice"), user_json("B", "Bob")]}
            ]));
        })
        .await;

    let mut session = signed_in(&server, &dir).await?;
    session.refresh_chats().await?;
    session.open_chat("c1")?;

    session.logout().await?;

    assert!(session.state().cache().is_empty());
    assert!(session.state().selected().is_none());
    assert!(!dir.path().join("userInfo.json").exists());

    let config = build_config(&server, &dir.path().join("userInfo.json"));
    assert!(restore_session(&config).await?.is_none());
    Ok(())
}
