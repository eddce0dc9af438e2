use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use lectio::config::Config;
use tower::ServiceExt;

async fn spawn_app() -> Router {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    config.auth.token_secret = "api-test-secret".to_string();

    let state = lectio::api::create_app_state(config, None)
        .await
        .expect("Failed to create app state");
    lectio::api::router(state)
}

fn request(
    method: &str,
    uri: &str,
    cookie: Option<&str>,
    body: Option<&serde_json::Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }

    match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

fn register_payload(email: &str) -> serde_json::Value {
    serde_json::json!({
        "email": email,
        "password": "a-decent-password",
        "firstName": "Test",
        "lastName": "Reader",
        "gender": "OTHER",
    })
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

/// `auth-token=<value>` pair from a response's Set-Cookie header, ready to be
/// sent back as a Cookie header.
fn session_cookie_from(response: &axum::response::Response) -> String {
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("response should set a session cookie")
        .to_str()
        .unwrap();

    set_cookie.split(';').next().unwrap().to_string()
}

/// Registers `email` and logs in, returning the session Cookie value.
async fn login_session(app: &Router, email: &str) -> String {
    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/auth/register",
            None,
            Some(&register_payload(email)),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/auth/login",
            None,
            Some(&serde_json::json!({ "email": email, "password": "a-decent-password" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    session_cookie_from(&response)
}

// ============================================================================
// Registration
// ============================================================================

#[tokio::test]
async fn test_register_creates_account() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/auth/register",
            None,
            Some(&serde_json::json!({
                "email": "Reader@Example.com",
                "password": "a-decent-password",
                "firstName": "Sarah",
                "lastName": "Okafor",
                "gender": "FEMALE",
                "country": "Nigeria",
            })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["message"], "User registered successfully");
    assert_eq!(body["user"]["email"], "reader@example.com");
    assert_eq!(body["user"]["firstName"], "Sarah");
    assert_eq!(body["user"]["country"], "Nigeria");
    assert_eq!(body["user"]["status"], "PENDING_VERIFICATION");
    assert_eq!(body["user"]["emailVerified"], false);
    assert!(body["user"]["lastLoginAt"].is_null());

    // The hash must never appear in any response shape.
    assert!(body["user"].get("password").is_none());
    assert!(body["user"].get("passwordHash").is_none());
}

#[tokio::test]
async fn test_register_missing_fields() {
    let app = spawn_app().await;

    // An absent field and an empty string are both treated as missing.
    for payload in [
        serde_json::json!({
            "email": "a@example.com",
            "firstName": "A",
            "lastName": "B",
            "gender": "MALE",
        }),
        serde_json::json!({
            "email": "a@example.com",
            "password": "",
            "firstName": "A",
            "lastName": "B",
            "gender": "MALE",
        }),
    ] {
        let response = app
            .clone()
            .oneshot(request("POST", "/api/auth/register", None, Some(&payload)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(
            body["error"],
            "Email, password, first name, last name, and gender are required"
        );
    }
}

#[tokio::test]
async fn test_register_rejects_unknown_gender() {
    let app = spawn_app().await;

    let mut payload = register_payload("gendered@example.com");
    payload["gender"] = serde_json::json!("UNSPECIFIED");

    let response = app
        .clone()
        .oneshot(request("POST", "/api/auth/register", None, Some(&payload)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid gender value");
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/auth/register",
            None,
            Some(&register_payload("dup@example.com")),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // Same address in different casing still collides.
    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/auth/register",
            None,
            Some(&register_payload("DUP@Example.com")),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body = body_json(response).await;
    assert_eq!(body["error"], "User with this email already exists");
}

// ============================================================================
// Login / session
// ============================================================================

#[tokio::test]
async fn test_login_sets_session_cookie() {
    let app = spawn_app().await;
    app.clone()
        .oneshot(request(
            "POST",
            "/api/auth/register",
            None,
            Some(&register_payload("login@example.com")),
        ))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/auth/login",
            None,
            Some(&serde_json::json!({
                "email": "login@example.com",
                "password": "a-decent-password",
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("login should set a cookie")
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with("auth-token="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Lax"));
    assert!(set_cookie.contains("Path=/"));
    assert!(set_cookie.contains("Max-Age=86400"));

    let body = body_json(response).await;
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["user"]["email"], "login@example.com");
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));

    // The cookie carries the same token as the body.
    let cookie_token = set_cookie
        .split(';')
        .next()
        .unwrap()
        .trim_start_matches("auth-token=");
    assert_eq!(body["token"], cookie_token);
}

#[tokio::test]
async fn test_login_remember_me_extends_cookie() {
    let app = spawn_app().await;
    app.clone()
        .oneshot(request(
            "POST",
            "/api/auth/register",
            None,
            Some(&register_payload("remember@example.com")),
        ))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/auth/login",
            None,
            Some(&serde_json::json!({
                "email": "remember@example.com",
                "password": "a-decent-password",
                "rememberMe": true,
            })),
        ))
        .await
        .unwrap();

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(set_cookie.contains("Max-Age=2592000"));
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = spawn_app().await;
    app.clone()
        .oneshot(request(
            "POST",
            "/api/auth/register",
            None,
            Some(&register_payload("real@example.com")),
        ))
        .await
        .unwrap();

    let unknown = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/auth/login",
            None,
            Some(&serde_json::json!({
                "email": "ghost@example.com",
                "password": "a-decent-password",
            })),
        ))
        .await
        .unwrap();
    let wrong = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/auth/login",
            None,
            Some(&serde_json::json!({
                "email": "real@example.com",
                "password": "not-the-password",
            })),
        ))
        .await
        .unwrap();

    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    assert!(unknown.headers().get(header::SET_COOKIE).is_none());

    // Identical bodies, so the endpoint cannot be used to probe for accounts.
    let unknown_body = unknown.into_body().collect().await.unwrap().to_bytes();
    let wrong_body = wrong.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(unknown_body, wrong_body);

    let body: serde_json::Value = serde_json::from_slice(&unknown_body).unwrap();
    assert_eq!(body["error"], "Invalid email or password");
}

#[tokio::test]
async fn test_login_records_last_login() {
    let app = spawn_app().await;
    app.clone()
        .oneshot(request(
            "POST",
            "/api/auth/register",
            None,
            Some(&register_payload("stamp@example.com")),
        ))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/auth/login",
            None,
            Some(&serde_json::json!({
                "email": "stamp@example.com",
                "password": "a-decent-password",
            })),
        ))
        .await
        .unwrap();
    let cookie = session_cookie_from(&response);

    // The login response reads the row before the timestamp update lands.
    let body = body_json(response).await;
    assert!(body["user"]["lastLoginAt"].is_null());

    // A later fetch shows the recorded login.
    let response = app
        .clone()
        .oneshot(request("GET", "/api/auth/me", Some(&cookie), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert!(body["user"]["lastLoginAt"].is_string());
}

#[tokio::test]
async fn test_me_requires_valid_session() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(request("GET", "/api/auth/me", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Not authenticated");

    let response = app
        .clone()
        .oneshot(request(
            "GET",
            "/api/auth/me",
            Some("auth-token=not-a-real-token"),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid token");
}

#[tokio::test]
async fn test_api_rejects_unauthenticated_with_401_not_redirect() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(request("GET", "/api/readings", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get(header::LOCATION).is_none());
}

// ============================================================================
// Readings
// ============================================================================

#[tokio::test]
async fn test_readings_crud_flow() {
    let app = spawn_app().await;
    let cookie = login_session(&app, "crud@example.com").await;

    // Starts empty.
    let response = app
        .clone()
        .oneshot(request("GET", "/api/readings", Some(&cookie), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["readings"], serde_json::json!([]));

    // Create.
    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/readings",
            Some(&cookie),
            Some(&serde_json::json!({
                "bibleBook": "Genesis",
                "chapters": "1-3",
                "dateRead": "2025-01-15",
                "notes": "creation account",
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Reading added successfully");
    assert_eq!(body["reading"]["bibleBook"], "Genesis");
    assert_eq!(body["reading"]["chapters"], "1-3");
    assert_eq!(body["reading"]["notes"], "creation account");
    assert!(body["reading"]["verses"].is_null());
    // New entries are always recorded as completed.
    assert_eq!(body["reading"]["completed"], true);
    let id = body["reading"]["id"].as_str().unwrap().to_string();

    // Update.
    let response = app
        .clone()
        .oneshot(request(
            "PUT",
            &format!("/api/readings/{id}"),
            Some(&cookie),
            Some(&serde_json::json!({
                "bibleBook": "Genesis",
                "chapters": "4-6",
                "verses": "1-10",
                "dateRead": "2025-01-16",
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Reading updated successfully");
    assert_eq!(body["reading"]["chapters"], "4-6");
    assert_eq!(body["reading"]["verses"], "1-10");
    // Optional fields omitted from the update payload are cleared.
    assert!(body["reading"]["notes"].is_null());
    // Completed is preserved when not sent.
    assert_eq!(body["reading"]["completed"], true);

    // Delete.
    let response = app
        .clone()
        .oneshot(request(
            "DELETE",
            &format!("/api/readings/{id}"),
            Some(&cookie),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Reading deleted successfully");

    let response = app
        .clone()
        .oneshot(request("GET", "/api/readings", Some(&cookie), None))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["readings"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_reading_requires_book_chapters_and_date() {
    let app = spawn_app().await;
    let cookie = login_session(&app, "incomplete@example.com").await;

    let payload = serde_json::json!({
        "bibleBook": "Genesis",
        "chapters": "",
        "dateRead": "2025-01-15",
    });

    let response = app
        .clone()
        .oneshot(request("POST", "/api/readings", Some(&cookie), Some(&payload)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Bible book, chapters, and date are required");

    // Updates enforce the same required trio.
    let response = app
        .clone()
        .oneshot(request(
            "PUT",
            "/api/readings/some-id",
            Some(&cookie),
            Some(&payload),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Bible book, chapters, and date are required");
}

#[tokio::test]
async fn test_readings_listed_most_recent_first() {
    let app = spawn_app().await;
    let cookie = login_session(&app, "order@example.com").await;

    for (book, date) in [
        ("Genesis", "2025-01-01"),
        ("John", "2025-03-20"),
        ("Exodus", "2025-02-10"),
    ] {
        let response = app
            .clone()
            .oneshot(request(
                "POST",
                "/api/readings",
                Some(&cookie),
                Some(&serde_json::json!({
                    "bibleBook": book,
                    "chapters": "1",
                    "dateRead": date,
                })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .clone()
        .oneshot(request("GET", "/api/readings", Some(&cookie), None))
        .await
        .unwrap();
    let body = body_json(response).await;

    let books: Vec<&str> = body["readings"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["bibleBook"].as_str().unwrap())
        .collect();
    assert_eq!(books, ["John", "Exodus", "Genesis"]);
}

#[tokio::test]
async fn test_readings_are_scoped_to_their_owner() {
    let app = spawn_app().await;
    let alice = login_session(&app, "alice@example.com").await;
    let bob = login_session(&app, "bob@example.com").await;

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/readings",
            Some(&alice),
            Some(&serde_json::json!({
                "bibleBook": "Psalms",
                "chapters": "23",
                "verses": "1-6",
                "dateRead": "2025-02-01",
            })),
        ))
        .await
        .unwrap();
    let body = body_json(response).await;
    let id = body["reading"]["id"].as_str().unwrap().to_string();

    // Bob sees none of Alice's entries.
    let response = app
        .clone()
        .oneshot(request("GET", "/api/readings", Some(&bob), None))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["readings"].as_array().unwrap().len(), 0);

    // Deleting someone else's entry reads exactly like a nonexistent id.
    let foreign = app
        .clone()
        .oneshot(request(
            "DELETE",
            &format!("/api/readings/{id}"),
            Some(&bob),
            None,
        ))
        .await
        .unwrap();
    let missing = app
        .clone()
        .oneshot(request(
            "DELETE",
            "/api/readings/no-such-id",
            Some(&alice),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(foreign.status(), StatusCode::NOT_FOUND);
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    let foreign_body = foreign.into_body().collect().await.unwrap().to_bytes();
    let missing_body = missing.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(foreign_body, missing_body);

    // Alice's entry survived Bob's attempt.
    let response = app
        .clone()
        .oneshot(request("GET", "/api/readings", Some(&alice), None))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["readings"].as_array().unwrap().len(), 1);
}

// ============================================================================
// System
// ============================================================================

#[tokio::test]
async fn test_system_status() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(request("GET", "/api/system/status", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let cookie = login_session(&app, "status@example.com").await;
    let response = app
        .clone()
        .oneshot(request("GET", "/api/system/status", Some(&cookie), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["database"], "ok");
    assert_eq!(body["totalUsers"], 1);
    assert_eq!(body["totalReadings"], 0);
    assert!(body["version"].is_string());
}
