//! Auth and object-storage client tests against a mock backend.

use backend_client::{AuthClient, Session, StorageBucket, StoreError, TracedClient};
use httpmock::prelude::*;
use uuid::Uuid;

fn auth(server: &MockServer) -> AuthClient {
    AuthClient::new(TracedClient::default(), &server.base_url(), "anon-key").unwrap()
}

#[tokio::test]
async fn sign_in_returns_a_session() {
    let server = MockServer::start();
    let user_id = Uuid::new_v4();

    let m = server.mock(|when, then| {
        when.method(POST)
            .path("/auth/v1/token")
            .query_param("grant_type", "password")
            .header("apikey", "anon-key")
            .json_body(serde_json::json!({
                "email": "amira@uni.edu",
                "password": "hunter2!"
            }));
        then.status(200).json_body(serde_json::json!({
            "access_token": "jwt-xyz",
            "token_type": "bearer",
            "user": { "id": user_id }
        }));
    });

    let session = auth(&server)
        .sign_in("amira@uni.edu", "hunter2!")
        .await
        .unwrap();

    m.assert();
    assert_eq!(session.user_id, user_id);
    assert_eq!(session.access_token, "jwt-xyz");
}

#[tokio::test]
async fn sign_in_surfaces_the_backend_message() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/auth/v1/token");
        then.status(400).json_body(serde_json::json!({
            "error": "invalid_grant",
            "error_description": "Invalid login credentials"
        }));
    });

    let err = auth(&server)
        .sign_in("amira@uni.edu", "wrong")
        .await
        .unwrap_err();
    match err {
        StoreError::Remote { message, .. } => assert_eq!(message, "Invalid login credentials"),
        other => panic!("expected Remote, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_credentials_never_reach_the_network() {
    let server = MockServer::start();
    let m = server.mock(|when, then| {
        when.method(POST).path("/auth/v1/token");
        then.status(200);
    });

    let err = auth(&server).sign_in("  ", "pw").await.unwrap_err();
    assert!(matches!(err, StoreError::Validation { .. }));

    let err = auth(&server).sign_in("a@b.c", "").await.unwrap_err();
    assert!(matches!(err, StoreError::Validation { .. }));

    m.assert_hits(0);
}

#[tokio::test]
async fn sign_up_without_immediate_session() {
    let server = MockServer::start();
    let user_id = Uuid::new_v4();

    server.mock(|when, then| {
        when.method(POST).path("/auth/v1/signup");
        then.status(200).json_body(serde_json::json!({
            "user": { "id": user_id }
        }));
    });

    let signup = auth(&server).sign_up("new@uni.edu", "pw123456").await.unwrap();
    assert_eq!(signup.user_id, user_id);
    assert!(signup.session.is_none());
}

#[tokio::test]
async fn sign_up_with_autoconfirm_session() {
    let server = MockServer::start();
    let user_id = Uuid::new_v4();

    server.mock(|when, then| {
        when.method(POST).path("/auth/v1/signup");
        then.status(200).json_body(serde_json::json!({
            "access_token": "jwt-new",
            "user": { "id": user_id }
        }));
    });

    let signup = auth(&server).sign_up("new@uni.edu", "pw123456").await.unwrap();
    let session = signup.session.expect("session should be issued");
    assert_eq!(session.user_id, user_id);
    assert_eq!(session.access_token, "jwt-new");
}

#[tokio::test]
async fn update_password_uses_the_session_token() {
    let server = MockServer::start();
    let session = Session {
        user_id: Uuid::new_v4(),
        access_token: "jwt-cur".to_string(),
    };

    let m = server.mock(|when, then| {
        when.method(PUT)
            .path("/auth/v1/user")
            .header("authorization", "Bearer jwt-cur")
            .json_body(serde_json::json!({ "password": "n3w-pass" }));
        then.status(200).json_body(serde_json::json!({}));
    });

    auth(&server)
        .update_password(&session, "n3w-pass")
        .await
        .unwrap();
    m.assert();
}

#[tokio::test]
async fn avatar_upload_overwrites_and_returns_public_url() {
    let server = MockServer::start();
    let session = Session {
        user_id: Uuid::new_v4(),
        access_token: "jwt-cur".to_string(),
    };

    let m = server.mock(|when, then| {
        when.method(POST)
            .path("/storage/v1/object/avatars/avatars/u1.jpg")
            .header("content-type", "image/jpeg")
            .header("x-upsert", "true")
            .header("authorization", "Bearer jwt-cur");
        then.status(200)
            .json_body(serde_json::json!({ "Key": "avatars/avatars/u1.jpg" }));
    });

    let bucket = StorageBucket::new(
        TracedClient::default(),
        &server.base_url(),
        "anon-key",
        "avatars",
    )
    .unwrap();

    let url = bucket
        .upload_jpeg(&session, "avatars/u1.jpg", vec![0xff, 0xd8, 0xff])
        .await
        .unwrap();

    m.assert();
    assert_eq!(
        url,
        format!(
            "{}/storage/v1/object/public/avatars/avatars/u1.jpg",
            server.base_url()
        )
    );
}

#[tokio::test]
async fn empty_avatar_is_rejected_locally() {
    let bucket = StorageBucket::new(
        TracedClient::default(),
        "https://proj.example.co",
        "anon-key",
        "avatars",
    )
    .unwrap();
    let session = Session {
        user_id: Uuid::new_v4(),
        access_token: "jwt".to_string(),
    };

    let err = bucket
        .upload_jpeg(&session, "avatars/u1.jpg", Vec::new())
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Validation { .. }));
}
