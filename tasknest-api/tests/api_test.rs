/// Integration tests for the tasknest API
///
/// These drive the full router end-to-end: registration, login, bearer-token
/// resolution, to-do CRUD with ownership checks, and pagination. They require
/// a PostgreSQL instance via DATABASE_URL and return early when none is
/// configured.

mod common;

use axum::http::{header, StatusCode};
use common::{body_json, unique_email, TestContext};

#[tokio::test]
async fn test_register_login_whoami_flow() {
    let Some(ctx) = TestContext::new().await.unwrap() else {
        return;
    };

    let email = unique_email("alice");
    let token = ctx.register_user("Alice", &email, "pw").await;

    // Second registration with the same email is rejected
    let response = ctx
        .send_json(
            "POST",
            "/register",
            None,
            &serde_json::json!({ "name": "Alice", "email": email, "password": "pw" }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Wrong password is rejected with the same status as an unknown email
    let response = ctx.login(&email, "wrong").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = ctx.login(&unique_email("nobody"), "pw").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Correct credentials return a bearer token
    let response = ctx.login(&email, "pw").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["token_type"], "bearer");
    let login_token = body["access_token"].as_str().unwrap().to_string();

    // Both tokens resolve to the registered user
    for t in [&token, &login_token] {
        let response = ctx.send_empty("GET", "/me", Some(t)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["email"], email);
        assert_eq!(body["name"], "Alice");
        assert!(body["user_id"].is_string());
        assert!(body.get("password_hash").is_none());
    }
}

#[tokio::test]
async fn test_register_rejects_invalid_email() {
    let Some(ctx) = TestContext::new().await.unwrap() else {
        return;
    };

    let response = ctx
        .send_json(
            "POST",
            "/register",
            None,
            &serde_json::json!({ "name": "X", "email": "not-an-email", "password": "pw" }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let Some(ctx) = TestContext::new().await.unwrap() else {
        return;
    };

    let response = ctx.send_empty("GET", "/me", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
        "Bearer"
    );

    let response = ctx.send_empty("GET", "/todos", Some("not.a.token")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_token_is_rejected() {
    use tasknest_shared::auth::jwt::{issue_token, Claims};

    let Some(ctx) = TestContext::new().await.unwrap() else {
        return;
    };

    let email = unique_email("expired");
    ctx.register_user("Expired", &email, "pw").await;

    let claims = Claims::new(&email, chrono::Duration::hours(-1));
    let stale = issue_token(&claims, common::TEST_JWT_SECRET).unwrap();

    let response = ctx.send_empty("GET", "/me", Some(&stale)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_todo_crud_and_ownership() {
    let Some(ctx) = TestContext::new().await.unwrap() else {
        return;
    };

    let token_a = ctx
        .register_user("Owner", &unique_email("owner"), "pw")
        .await;
    let token_b = ctx
        .register_user("Intruder", &unique_email("intruder"), "pw")
        .await;

    // Create returns the generated integer ID and the submitted fields
    let response = ctx
        .send_json(
            "POST",
            "/todos",
            Some(&token_a),
            &serde_json::json!({ "title": "t", "description": "d" }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    let id = body["id"].as_i64().unwrap();
    assert!((1..=1_000_000).contains(&id));
    assert_eq!(body["title"], "t");
    assert_eq!(body["description"], "d");

    // A different user cannot update or delete the item
    let response = ctx
        .send_json(
            "PUT",
            &format!("/todos/{}", id),
            Some(&token_b),
            &serde_json::json!({ "title": "hijacked", "description": "x" }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = ctx
        .send_empty("DELETE", &format!("/todos/{}", id), Some(&token_b))
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // The owner can update
    let response = ctx
        .send_json(
            "PUT",
            &format!("/todos/{}", id),
            Some(&token_a),
            &serde_json::json!({ "title": "t2", "description": "d2" }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["id"], id);
    assert_eq!(body["title"], "t2");
    assert_eq!(body["description"], "d2");

    // The owner can delete; 204 with no body
    let response = ctx
        .send_empty("DELETE", &format!("/todos/{}", id), Some(&token_a))
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Operations on the deleted item return a clean 404
    let response = ctx
        .send_json(
            "PUT",
            &format!("/todos/{}", id),
            Some(&token_a),
            &serde_json::json!({ "title": "x", "description": "y" }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = ctx
        .send_empty("DELETE", &format!("/todos/{}", id), Some(&token_a))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_reports_whether_a_row_was_removed() {
    use tasknest_shared::models::todo::Todo;

    let Some(ctx) = TestContext::new().await.unwrap() else {
        return;
    };

    let token = ctx
        .register_user("Deleter", &unique_email("deleter"), "pw")
        .await;
    let id = ctx.create_todo(&token, "t", "d").await;

    // First delete removes the row; a repeat finds nothing, which the
    // handler surfaces as 404 even when the row vanished between its
    // ownership check and the delete
    assert!(Todo::delete(&ctx.db, id).await.unwrap());
    assert!(!Todo::delete(&ctx.db, id).await.unwrap());
}

#[tokio::test]
async fn test_pagination() {
    let Some(ctx) = TestContext::new().await.unwrap() else {
        return;
    };

    let token = ctx
        .register_user("Pager", &unique_email("pager"), "pw")
        .await;

    let mut ids = Vec::new();
    for i in 0..15 {
        ids.push(
            ctx.create_todo(&token, &format!("item {}", i), "d")
                .await,
        );
    }
    ids.sort_unstable();

    // Page 1: 10 items, ascending by ID
    let response = ctx
        .send_empty("GET", "/todos?page=1&limit=10", Some(&token))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["total"], 15);
    assert_eq!(body["page"], 1);
    assert_eq!(body["limit"], 10);
    let page1: Vec<i64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_i64().unwrap())
        .collect();
    assert_eq!(page1, ids[..10]);

    // Page 2: the remaining 5
    let response = ctx
        .send_empty("GET", "/todos?page=2&limit=10", Some(&token))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["total"], 15);
    let page2: Vec<i64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_i64().unwrap())
        .collect();
    assert_eq!(page2, ids[10..]);

    // Page 3 lies past the last item
    let response = ctx
        .send_empty("GET", "/todos?page=3&limit=10", Some(&token))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // A page so large the offset arithmetic would overflow is out of range,
    // not a server error
    let response = ctx
        .send_empty(
            "GET",
            "/todos?page=9223372036854775807&limit=2",
            Some(&token),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Defaults are page=1, limit=10
    let response = ctx.send_empty("GET", "/todos", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn test_list_is_scoped_to_owner() {
    let Some(ctx) = TestContext::new().await.unwrap() else {
        return;
    };

    let token_a = ctx.register_user("A", &unique_email("a"), "pw").await;
    let token_b = ctx.register_user("B", &unique_email("b"), "pw").await;

    let id_a = ctx.create_todo(&token_a, "mine", "d").await;
    ctx.create_todo(&token_b, "theirs", "d").await;

    let response = ctx
        .send_empty("GET", "/todos?page=1&limit=10", Some(&token_a))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["data"][0]["id"], id_a);
}

#[tokio::test]
async fn test_health_endpoint() {
    let Some(ctx) = TestContext::new().await.unwrap() else {
        return;
    };

    let response = ctx.send_empty("GET", "/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");
}
