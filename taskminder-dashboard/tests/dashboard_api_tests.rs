/// Integration tests for the dashboard backend
///
/// The dashboard runs against live task and notification routers:
/// - Task actions are forwarded and upstream errors passed through
/// - The overview degrades to warnings when upstreams are down
/// - Notifications and analytics are assembled from both services

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::TestContext;
use serde_json::json;

const MISSING_ID: &str = "60f7b0c5d5f8a7b3c8e9f1a2";

#[tokio::test]
async fn test_health_reports_upstreams() {
    let ctx = TestContext::new().await;
    let (status, json) = ctx.request("GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["service"], "dashboard");
    assert_eq!(json["dependencies"]["task-service"], "healthy");
    assert_eq!(json["dependencies"]["notification-service"], "healthy");

    let down = TestContext::unreachable();
    let (status, json) = down.request("GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["dependencies"]["task-service"], "degraded");

    let (status, json) = down.request("GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Taskminder Dashboard");
}

#[tokio::test]
async fn test_task_actions_are_forwarded() {
    let ctx = TestContext::new().await;

    let created = ctx
        .create_task(json!({"title": "Water plants", "priority": "high"}))
        .await;
    let id = created["id"].as_str().unwrap();
    assert_eq!(created["status"], "pending");

    let (status, list) = ctx.request("GET", "/api/tasks?priority=high", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["id"], created["id"]);

    let (status, list) = ctx.request("GET", "/api/tasks?status=completed", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(list.as_array().unwrap().is_empty());

    let (status, fetched) = ctx.request("GET", &format!("/api/tasks/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["title"], "Water plants");
    assert_eq!(fetched["created_at"], created["created_at"]);

    let (status, updated) = ctx
        .request(
            "PUT",
            &format!("/api/tasks/{}", id),
            Some(json!({"title": "Water all plants"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Water all plants");
    assert_eq!(updated["priority"], "high");

    let (status, done) = ctx
        .request("PATCH", &format!("/api/tasks/{}/complete", id), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(done["status"], "completed");
    assert!(done["completed_at"].is_string());

    let (status, json) = ctx.request("DELETE", &format!("/api/tasks/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Task deleted successfully");

    let (status, json) = ctx.request("GET", &format!("/api/tasks/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["message"], "Task not found");

    let (status, json) = ctx
        .request("PATCH", &format!("/api/tasks/{}/complete", id), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "not_found");
    assert_eq!(json["message"], "Task not found");
}

#[tokio::test]
async fn test_errors_keep_their_status() {
    let ctx = TestContext::new().await;

    let (status, json) = ctx.request("POST", "/api/tasks", Some(json!({"title": ""}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["error"], "validation_error");
    assert_eq!(json["details"][0]["field"], "title");

    let (status, _) = ctx.request("GET", "/api/tasks?limit=0", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, json) = ctx
        .request("PUT", "/api/tasks/not-an-id", Some(json!({"title": "x"})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "bad_request");

    let (status, json) = ctx
        .request("DELETE", &format!("/api/tasks/{}", MISSING_ID), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["message"], "Task not found");
}

#[tokio::test]
async fn test_dashboard_summary() {
    let ctx = TestContext::new().await;
    for i in 0..6 {
        ctx.create_task(json!({"title": format!("task {}", i)})).await;
    }
    let remind_at = Utc::now() + Duration::hours(2);
    ctx.create_task(json!({
        "title": "Dentist",
        "reminder_enabled": true,
        "reminder_time": remind_at,
    }))
    .await;

    let (status, json) = ctx.request("GET", "/api/dashboard", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["warnings"], json!([]));
    assert_eq!(json["task_stats"]["total_tasks"], 7);
    assert_eq!(json["task_stats"]["pending_tasks"], 7);
    assert_eq!(json["notification_stats"]["pending_reminders"], 1);
    assert_eq!(json["recent_tasks"].as_array().unwrap().len(), 5);

    let upcoming = json["upcoming_reminders"].as_array().unwrap();
    assert_eq!(upcoming.len(), 1);
    assert_eq!(upcoming[0]["title"], "Reminder: Dentist");
    assert_eq!(upcoming[0]["status"], "pending");
}

#[tokio::test]
async fn test_dashboard_degrades_when_upstreams_are_down() {
    let ctx = TestContext::unreachable();

    let (status, json) = ctx.request("GET", "/api/dashboard", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["task_stats"].is_null());
    assert!(json["notification_stats"].is_null());
    assert_eq!(json["recent_tasks"], json!([]));
    assert_eq!(json["upcoming_reminders"], json!([]));
    assert_eq!(json["warnings"].as_array().unwrap().len(), 4);

    let (status, json) = ctx.request("GET", "/api/tasks", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["error"], "service_unavailable");

    let (status, _) = ctx.request("GET", "/api/analytics", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    let (status, _) = ctx.request("GET", "/api/notifications", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_notifications_overview() {
    let ctx = TestContext::new().await;
    let created = ctx
        .create_task(json!({
            "title": "Pay rent",
            "reminder_enabled": true,
            "reminder_time": Utc::now() - Duration::minutes(1),
        }))
        .await;

    let (status, json) = ctx.request("GET", "/api/notifications", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["notifications"], json!([]));
    assert_eq!(json["reminders"][0]["status"], "pending");

    let report = ctx.check_due_reminders().await;
    assert_eq!(report["sent"], 1);

    let (status, json) = ctx.request("GET", "/api/notifications", None).await;
    assert_eq!(status, StatusCode::OK);
    let notifications = json["notifications"].as_array().unwrap();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0]["task_id"], created["id"]);
    assert_eq!(notifications[0]["status"], "sent");
    assert_eq!(json["reminders"][0]["status"], "sent");

    let (status, json) = ctx
        .request("GET", "/api/notifications?status=failed", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["notifications"], json!([]));
    assert_eq!(json["reminders"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_analytics() {
    let ctx = TestContext::new().await;

    let (status, json) = ctx.request("GET", "/api/analytics", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total_tasks"], 0);
    assert_eq!(json["completion_rate"], 0.0);

    ctx.create_task(json!({"title": "a", "priority": "high"})).await;
    ctx.create_task(json!({"title": "b", "priority": "high"})).await;
    let low = ctx.create_task(json!({"title": "c", "priority": "low"})).await;
    ctx.create_task(json!({
        "title": "late",
        "priority": "urgent",
        "due_date": Utc::now() - Duration::days(1),
    }))
    .await;
    ctx.request(
        "PATCH",
        &format!("/api/tasks/{}/complete", low["id"].as_str().unwrap()),
        None,
    )
    .await;

    let (status, json) = ctx.request("GET", "/api/analytics", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total_tasks"], 4);
    assert_eq!(json["status_distribution"]["pending"], 3);
    assert_eq!(json["status_distribution"]["completed"], 1);
    assert_eq!(json["status_distribution"]["cancelled"], 0);
    assert_eq!(json["priority_distribution"]["high"], 2);
    assert_eq!(json["priority_distribution"]["low"], 1);
    assert_eq!(json["priority_distribution"]["urgent"], 1);
    assert_eq!(json["priority_distribution"]["medium"], 0);
    assert_eq!(json["completion_rate"], 25.0);
    assert_eq!(json["pending_rate"], 75.0);
    assert_eq!(json["overdue_tasks"], 1);

    let timeline = json["creation_timeline"].as_array().unwrap();
    let counted: u64 = timeline.iter().map(|d| d["count"].as_u64().unwrap()).sum();
    assert_eq!(counted, 4);
}
