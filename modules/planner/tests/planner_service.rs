//! Planner service tests against a mock store.

use backend_client::{Session, StoreError, TracedClient};
use chrono::{TimeZone, Utc};
use httpmock::prelude::*;
use planner::{PlannerService, Recurrence};
use uuid::Uuid;

fn session() -> Session {
    Session {
        user_id: Uuid::new_v4(),
        access_token: "jwt".to_string(),
    }
}

fn service(server: &MockServer) -> PlannerService {
    PlannerService::new(TracedClient::default(), &server.base_url(), "anon-key").unwrap()
}

#[tokio::test]
async fn list_requests_schedule_order() {
    let server = MockServer::start();
    let session = session();

    let m = server.mock(|when, then| {
        when.method(GET)
            .path("/rest/v1/planner_tasks")
            .query_param("user_id", format!("eq.{}", session.user_id))
            .query_param("order", "datetime.asc");
        then.status(200).json_body(serde_json::json!([
            {
                "id": Uuid::new_v4(),
                "title": "Linear algebra lecture",
                "datetime": "2026-03-02T09:00:00Z",
                "recurring": "weekly",
                "user_id": session.user_id,
            }
        ]));
    });

    let tasks = service(&server).list(&session).await.unwrap();
    m.assert();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].recurring, Recurrence::Weekly);
}

#[tokio::test]
async fn save_inserts_when_not_editing() {
    let server = MockServer::start();
    let session = session();
    let at = Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap();

    let m = server.mock(|when, then| {
        when.method(POST)
            .path("/rest/v1/planner_tasks")
            .json_body(serde_json::json!({
                "title": "Lab report",
                "datetime": "2026-03-02T09:00:00Z",
                "recurring": "none",
                "user_id": session.user_id,
            }));
        then.status(201).json_body(serde_json::json!([
            {
                "id": Uuid::new_v4(),
                "title": "Lab report",
                "datetime": "2026-03-02T09:00:00Z",
                "recurring": "none",
                "user_id": session.user_id,
            }
        ]));
    });

    service(&server)
        .save(&session, None, "Lab report", at, Recurrence::None)
        .await
        .unwrap();
    m.assert();
}

#[tokio::test]
async fn save_replaces_the_whole_record_when_editing() {
    let server = MockServer::start();
    let session = session();
    let id = Uuid::new_v4();
    let at = Utc.with_ymd_and_hms(2026, 3, 3, 14, 30, 0).unwrap();

    let m = server.mock(|when, then| {
        when.method(PATCH)
            .path("/rest/v1/planner_tasks")
            .query_param("id", format!("eq.{id}"))
            .json_body(serde_json::json!({
                "title": "Lab report v2",
                "datetime": "2026-03-03T14:30:00Z",
                "recurring": "daily",
                "user_id": session.user_id,
            }));
        then.status(204);
    });

    service(&server)
        .save(&session, Some(id), "Lab report v2", at, Recurrence::Daily)
        .await
        .unwrap();
    m.assert();
}

#[tokio::test]
async fn empty_title_never_reaches_the_network() {
    let server = MockServer::start();
    let m = server.mock(|when, then| {
        when.method(POST).path("/rest/v1/planner_tasks");
        then.status(201);
    });

    let err = service(&server)
        .save(&session(), None, "  ", Utc::now(), Recurrence::None)
        .await
        .unwrap_err();

    assert!(matches!(err, StoreError::Validation { .. }));
    m.assert_hits(0);
}
