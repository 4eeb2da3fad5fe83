mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use common::{bearer, create_task, register_and_login, send, test_app, test_tokens};
use taskvault::models::{Task, TaskPriority};

#[actix_rt::test]
async fn test_create_task_unauthorized() {
    let app = test_app().await;

    let req = test::TestRequest::post()
        .uri("/api/tasks")
        .set_json(json!({ "title": "Unauthorized Task" }))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED, "Body: {}", body);

    let (status, _) = create_task(&app, "garbage.token.value", json!({ "title": "Forged" })).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Neither request reached the store.
    let token = register_and_login(&app, "probe@example.com", "Password123!").await;
    let req = test::TestRequest::get()
        .uri("/api/tasks")
        .insert_header(bearer(&token))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[actix_rt::test]
async fn test_task_crud_flow() {
    let app = test_app().await;
    let token = register_and_login(&app, "crud_user@example.com", "PasswordCrud123!").await;
    let user_id = test_tokens().verify(&token).unwrap().sub;

    // 1. Create Task
    let (status, body) = create_task(
        &app,
        &token,
        json!({
            "title": "CRUD Task 1 Original",
            "description": "Initial description",
            "priority": "low",
            "dueDate": "2025-10-25"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "Body: {}", body);
    let created: Task = serde_json::from_value(body).unwrap();
    assert_eq!(created.title, "CRUD Task 1 Original");
    assert_eq!(created.description, "Initial description");
    assert_eq!(created.priority, TaskPriority::Low);
    assert_eq!(created.due_date.as_deref(), Some("2025-10-25"));
    assert_eq!(created.user_id, user_id);
    assert!(!created.completed);

    // 2. Get Task by ID
    let req = test::TestRequest::get()
        .uri(&format!("/api/tasks/{}", created.id))
        .insert_header(bearer(&token))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    let fetched: Task = serde_json::from_value(body).unwrap();
    assert_eq!(fetched, created);

    // 3. Partial update
    let req = test::TestRequest::put()
        .uri(&format!("/api/tasks/{}", created.id))
        .insert_header(bearer(&token))
        .set_json(json!({ "completed": true, "priority": "high" }))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK, "Body: {}", body);
    assert!(body["message"].is_string());
    let updated: Task = serde_json::from_value(body["task"].clone()).unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.title, "CRUD Task 1 Original");
    assert_eq!(updated.description, "Initial description");
    assert!(updated.completed);
    assert_eq!(updated.priority, TaskPriority::High);
    assert_eq!(updated.created_at, created.created_at);

    // 4. Second task, then list
    let (status, body) = create_task(&app, &token, json!({ "title": "CRUD Task 2" })).await;
    assert_eq!(status, StatusCode::CREATED);
    let second_id = body["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri("/api/tasks")
        .insert_header(bearer(&token))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    let tasks: Vec<Task> = serde_json::from_value(body).unwrap();
    assert_eq!(tasks.len(), 2);
    assert!(tasks.iter().any(|t| t.id == created.id && t.completed));
    assert!(tasks.iter().any(|t| t.id == second_id));

    // 5. Delete, then the task is gone
    let req = test::TestRequest::delete()
        .uri(&format!("/api/tasks/{}", created.id))
        .insert_header(bearer(&token))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].is_string());

    let req = test::TestRequest::get()
        .uri(&format!("/api/tasks/{}", created.id))
        .insert_header(bearer(&token))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/tasks/{}", created.id))
        .insert_header(bearer(&token))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND, "second delete finds nothing");
}

#[actix_rt::test]
async fn test_create_forces_owner_and_defaults() {
    let app = test_app().await;
    let token = register_and_login(&app, "defaults@example.com", "Password123!").await;
    let user_id = test_tokens().verify(&token).unwrap().sub;

    let (status, body) = create_task(
        &app,
        &token,
        json!({ "title": "x", "userId": "someone-else", "id": "my-own-id" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "Body: {}", body);
    assert_eq!(body["userId"], Value::String(user_id));
    assert_ne!(body["id"], "my-own-id");
    assert_eq!(body["completed"], false);
    assert_eq!(body["priority"], "medium");
    assert_eq!(body["description"], "");
    assert_eq!(body["dueDate"], Value::Null);
}

#[actix_rt::test]
async fn test_task_validation_errors() {
    let app = test_app().await;
    let token = register_and_login(&app, "validation@example.com", "Password123!").await;

    let (status, body) = create_task(&app, &token, json!({ "description": "no title" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"].as_array().unwrap().len(), 1);

    let (status, body) = create_task(
        &app,
        &token,
        json!({ "title": " ", "completed": "no", "priority": "urgent", "dueDate": "soon" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"].as_array().unwrap().len(), 4, "Body: {}", body);

    let (status, body) = create_task(&app, &token, json!(["not", "an", "object"])).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = create_task(&app, &token, json!({ "title": "keep me" })).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["id"].as_str().unwrap().to_string();

    for payload in [
        json!({ "title": "" }),
        json!({ "title": "   " }),
        json!({ "priority": "urgent" }),
        json!({ "completed": 1 }),
        json!({ "dueDate": "2025-13-45" }),
    ] {
        let req = test::TestRequest::put()
            .uri(&format!("/api/tasks/{}", id))
            .insert_header(bearer(&token))
            .set_json(&payload)
            .to_request();
        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "payload {}", payload);
        assert!(body["errors"].is_array(), "payload {}: {}", payload, body);
    }

    // No partial writes happened.
    let req = test::TestRequest::get()
        .uri(&format!("/api/tasks/{}", id))
        .insert_header(bearer(&token))
        .to_request();
    let (_, body) = send(&app, req).await;
    assert_eq!(body["title"], "keep me");
    assert_eq!(body["priority"], "medium");
}

#[actix_rt::test]
async fn test_update_ignores_spoofed_identity() {
    let app = test_app().await;
    let token = register_and_login(&app, "spoof@example.com", "Password123!").await;
    let user_id = test_tokens().verify(&token).unwrap().sub;

    let (_, body) = create_task(&app, &token, json!({ "title": "original" })).await;
    let id = body["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::put()
        .uri(&format!("/api/tasks/{}", id))
        .insert_header(bearer(&token))
        .set_json(json!({ "title": "renamed", "id": "hijacked", "userId": "attacker" }))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK, "Body: {}", body);

    let req = test::TestRequest::get()
        .uri(&format!("/api/tasks/{}", id))
        .insert_header(bearer(&token))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], Value::String(id));
    assert_eq!(body["userId"], Value::String(user_id));
    assert_eq!(body["title"], "renamed");
}

#[actix_rt::test]
async fn test_task_ownership_and_authorization() {
    let app = test_app().await;
    let token_a = register_and_login(&app, "owner_user_a@example.com", "PasswordOwnerA123!").await;
    let token_b = register_and_login(&app, "other_user_b@example.com", "PasswordOtherB123!").await;

    let (status, body) = create_task(&app, &token_a, json!({ "title": "User A's Task" })).await;
    assert_eq!(status, StatusCode::CREATED, "User A failed to create task");
    let task_a_id = body["id"].as_str().unwrap().to_string();

    // 1. User B lists tasks: should not see User A's task
    let req = test::TestRequest::get()
        .uri("/api/tasks")
        .insert_header(bearer(&token_b))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    // 2. Get, update and delete by User B all look like a missing task
    let req = test::TestRequest::get()
        .uri(&format!("/api/tasks/{}", task_a_id))
        .insert_header(bearer(&token_b))
        .to_request();
    let (status, body_get) = send(&app, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let req = test::TestRequest::put()
        .uri(&format!("/api/tasks/{}", task_a_id))
        .insert_header(bearer(&token_b))
        .set_json(json!({ "title": "Attempted Update by B" }))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/tasks/{}", task_a_id))
        .insert_header(bearer(&token_b))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Same body as for an id that never existed.
    let req = test::TestRequest::get()
        .uri("/api/tasks/never-existed")
        .insert_header(bearer(&token_b))
        .to_request();
    let (status, body_missing) = send(&app, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body_get, body_missing);

    // User A's task is untouched.
    let req = test::TestRequest::get()
        .uri(&format!("/api/tasks/{}", task_a_id))
        .insert_header(bearer(&token_a))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK, "User A should be able to fetch their own task");
    assert_eq!(body["title"], "User A's Task");
}
