mod common;

use chrono::Utc;
use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;
use serde_json::Value;

#[tokio::test]
async fn test_create_user_success() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/users")
        .json(&json!({
            "email": "walt@breakingbad.com",
            "password": "04234"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["email"], "walt@breakingbad.com");
    assert!(body["id"].is_string());
    assert!(body["created_at"].is_string());
    assert!(body["updated_at"].is_string());
    assert!(body.get("password").is_none());
    assert!(body.get("hashed_password").is_none());
}

#[tokio::test]
async fn test_create_user_duplicate_email() {
    let app = TestApp::spawn().await;
    app.create_user("walt@breakingbad.com", "04234").await;

    let response = app
        .post("/api/users")
        .json(&json!({
            "email": "walt@breakingbad.com",
            "password": "different"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("already exists"));
}

#[tokio::test]
async fn test_create_user_invalid_email() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/users")
        .json(&json!({
            "email": "not-an-email",
            "password": "04234"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_malformed_json_keeps_error_shape() {
    let app = TestApp::spawn().await;
    let token = app.token_for("walt@breakingbad.com", "04234").await;

    let syntax = app
        .post("/api/login")
        .header("Content-Type", "application/json")
        .body("{\"email\": ")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(syntax.status(), StatusCode::BAD_REQUEST);
    let body: Value = syntax.json().await.expect("Failed to parse response");
    assert!(body["error"].is_string());

    let missing_field = app
        .post("/api/users")
        .json(&json!({ "email": "jesse@breakingbad.com" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(missing_field.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = missing_field.json().await.expect("Failed to parse response");
    assert!(body["error"].is_string());

    let wrong_type = app
        .post_authenticated("/api/chirps", &token)
        .json(&json!({ "body": 42 }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(wrong_type.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = wrong_type.json().await.expect("Failed to parse response");
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::spawn().await;
    let created = app.create_user("walt@breakingbad.com", "04234").await;

    let response = app
        .post("/api/login")
        .json(&json!({
            "email": "walt@breakingbad.com",
            "password": "04234"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["id"], created["id"]);
    assert_eq!(body["email"], "walt@breakingbad.com");

    let token = body["token"].as_str().expect("token should be a string");
    let claims = app
        .validator
        .verified_claims_at(token, Utc::now())
        .expect("issued token should validate");
    assert_eq!(claims.iss, "chirpy");
    assert_eq!(Value::String(claims.sub.clone()), created["id"]);
    assert_eq!(claims.lifetime_seconds(), 3600);
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::spawn().await;
    app.create_user("walt@breakingbad.com", "04234").await;

    let response = app
        .post("/api/login")
        .json(&json!({
            "email": "walt@breakingbad.com",
            "password": "wrong"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "incorrect email or password");
    assert!(body.get("token").is_none());
}

#[tokio::test]
async fn test_login_unknown_email_looks_like_wrong_password() {
    let app = TestApp::spawn().await;
    app.create_user("walt@breakingbad.com", "04234").await;

    let mut bodies = Vec::new();
    for email in ["nobody@example.com", "walt@breakingbad.com"] {
        let response = app
            .post("/api/login")
            .json(&json!({
                "email": email,
                "password": "wrong"
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: Value = response.json().await.expect("Failed to parse response");
        bodies.push(body);
    }

    assert_eq!(bodies[0]["error"], "incorrect email or password");
    assert_eq!(bodies[0], bodies[1]);
}

#[tokio::test]
async fn test_login_clamps_requested_lifetime() {
    let app = TestApp::spawn().await;
    app.create_user("walt@breakingbad.com", "04234").await;

    for (requested, expected) in [(json!(7200), 3600), (json!(60), 60), (json!(0), 3600)] {
        let response = app
            .post("/api/login")
            .json(&json!({
                "email": "walt@breakingbad.com",
                "password": "04234",
                "expires_in_seconds": requested
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = response.json().await.expect("Failed to parse response");
        let claims = app
            .validator
            .verified_claims_at(body["token"].as_str().unwrap(), Utc::now())
            .unwrap();
        assert_eq!(claims.lifetime_seconds(), expected, "requested {}", requested);
    }
}

#[tokio::test]
async fn test_create_chirp_as_token_subject() {
    let app = TestApp::spawn().await;
    let created = app.create_user("walt@breakingbad.com", "04234").await;
    let login = app.login("walt@breakingbad.com", "04234").await;
    let token = login["token"].as_str().unwrap().to_string();

    let response = app
        .post_authenticated("/api/chirps", &token)
        .json(&json!({
            "body": "I'm the one who knocks!",
            "user_id": "00000000-0000-0000-0000-000000000000"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["body"], "I'm the one who knocks!");
    assert_eq!(body["user_id"], created["id"]);
    assert!(body["id"].is_string());
}

#[tokio::test]
async fn test_create_chirp_requires_valid_bearer_token() {
    let app = TestApp::spawn().await;
    let token = app.token_for("walt@breakingbad.com", "04234").await;

    let missing = app
        .post("/api/chirps")
        .json(&json!({ "body": "hello" }))
        .send()
        .await
        .expect("Failed to execute request");

    let wrong_scheme = app
        .post("/api/chirps")
        .header("Authorization", format!("Token {}", token))
        .json(&json!({ "body": "hello" }))
        .send()
        .await
        .expect("Failed to execute request");

    let garbage = app
        .post_authenticated("/api/chirps", "not.a.jwt")
        .json(&json!({ "body": "hello" }))
        .send()
        .await
        .expect("Failed to execute request");

    let mut tampered = token.clone();
    tampered.push('x');
    let tampered = app
        .post_authenticated("/api/chirps", &tampered)
        .json(&json!({ "body": "hello" }))
        .send()
        .await
        .expect("Failed to execute request");

    let mut bodies = Vec::new();
    for response in [missing, wrong_scheme, garbage, tampered] {
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: Value = response.json().await.expect("Failed to parse response");
        bodies.push(body);
    }

    // The reason for rejection is never distinguishable by the client
    assert!(bodies.windows(2).all(|pair| pair[0] == pair[1]));

    let listed: Value = app.get("/api/chirps").send().await.unwrap().json().await.unwrap();
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn test_create_chirp_too_long() {
    let app = TestApp::spawn().await;
    let token = app.token_for("walt@breakingbad.com", "04234").await;

    let response = app
        .post_authenticated("/api/chirps", &token)
        .json(&json!({ "body": "a".repeat(141) }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "Chirp is too long");
}

#[tokio::test]
async fn test_create_chirp_cleans_profanity() {
    let app = TestApp::spawn().await;
    let token = app.token_for("walt@breakingbad.com", "04234").await;

    let response = app
        .post_authenticated("/api/chirps", &token)
        .json(&json!({ "body": "What a Kerfuffle this sharbert! is" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["body"], "What a **** this sharbert! is");
}

#[tokio::test]
async fn test_list_and_get_chirps() {
    let app = TestApp::spawn().await;
    let token = app.token_for("walt@breakingbad.com", "04234").await;

    let mut ids = Vec::new();
    for text in ["first", "second"] {
        let body: Value = app
            .post_authenticated("/api/chirps", &token)
            .json(&json!({ "body": text }))
            .send()
            .await
            .expect("Failed to execute request")
            .json()
            .await
            .expect("Failed to parse response");
        ids.push(body["id"].as_str().unwrap().to_string());
    }

    let listed: Value = app
        .get("/api/chirps")
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse response");
    let bodies: Vec<&str> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["body"].as_str().unwrap())
        .collect();
    assert_eq!(bodies, vec!["first", "second"]);

    let response = app
        .get(&format!("/api/chirps/{}", ids[1]))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["body"], "second");
}

#[tokio::test]
async fn test_get_chirp_not_found() {
    let app = TestApp::spawn().await;

    let unknown = app
        .get(&format!("/api/chirps/{}", uuid::Uuid::new_v4()))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);

    let invalid = app
        .get("/api/chirps/not-a-uuid")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(invalid.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_reset_in_dev_removes_users() {
    let app = TestApp::spawn().await;
    let token = app.token_for("walt@breakingbad.com", "04234").await;
    app.post_authenticated("/api/chirps", &token)
        .json(&json!({ "body": "soon gone" }))
        .send()
        .await
        .expect("Failed to execute request");

    let response = app
        .post("/admin/reset")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "Reset OK");

    let listed: Value = app.get("/api/chirps").send().await.unwrap().json().await.unwrap();
    assert_eq!(listed, json!([]));

    let login = app
        .post("/api/login")
        .json(&json!({
            "email": "walt@breakingbad.com",
            "password": "04234"
        }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(login.status(), StatusCode::UNAUTHORIZED);

    // A still-valid token whose user is gone cannot post
    let orphan = app
        .post_authenticated("/api/chirps", &token)
        .json(&json!({ "body": "hello?" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(orphan.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_reset_forbidden_outside_dev() {
    let app = TestApp::spawn_with_reset(false).await;
    app.create_user("walt@breakingbad.com", "04234").await;

    let response = app
        .post("/admin/reset")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "reset is only allowed in dev environment");

    // Users survive
    app.login("walt@breakingbad.com", "04234").await;
}

#[tokio::test]
async fn test_full_chirpy_workflow() {
    let app = TestApp::spawn().await;

    let walt = app.token_for("walt@breakingbad.com", "04234").await;
    let saul = app.token_for("saul@bettercall.com", "slippin-jimmy").await;

    for (token, text) in [(&walt, "Say my name"), (&saul, "Better call")] {
        let response = app
            .post_authenticated("/api/chirps", token)
            .json(&json!({ "body": text }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let listed: Value = app.get("/api/chirps").send().await.unwrap().json().await.unwrap();
    let authors: Vec<&str> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["user_id"].as_str().unwrap())
        .collect();
    assert_eq!(authors.len(), 2);
    assert_ne!(authors[0], authors[1]);
}
