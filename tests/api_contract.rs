//! Integration tests for the API client against a mock auth backend.
//!
//! Each test spins up an Axum server on a random port and exercises the real
//! HTTP contract of `ApiClient`: request shapes, bearer headers, response
//! normalization, and token persistence.

use std::sync::Arc;
use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::time::timeout;

use signup_flow::api::{
    ApiClient, AuthApi, OnboardingStepUpdate, RegisterRequest, SocialProvider, StepStatus,
};
use signup_flow::config::ApiConfig;
use signup_flow::error::ApiError;
use signup_flow::store::{MemoryTokenStore, TokenStore};

/// Maximum time any test is allowed to run before we consider it hung.
const TEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Start an Axum server on a random port, return the port.
async fn start_server(app: Router) -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    // Give the server a moment to start accepting connections.
    tokio::time::sleep(Duration::from_millis(50)).await;

    port
}

fn client(port: u16, store: Arc<MemoryTokenStore>) -> ApiClient {
    ApiClient::new(ApiConfig::new(format!("http://127.0.0.1:{port}")), store)
}

fn register_request() -> RegisterRequest {
    RegisterRequest {
        email: "jane@example.com".into(),
        password: "longenough".into(),
        full_name: None,
    }
}

// ── Registration ─────────────────────────────────────────────────────

#[tokio::test]
async fn register_sends_null_full_name_and_never_touches_token() {
    timeout(TEST_TIMEOUT, async {
        let app = Router::new().route(
            "/auth/register",
            post(|Json(body): Json<Value>| async move {
                // Echo the request so the test can assert its shape.
                Json(json!({
                    "email": body["email"],
                    "full_name": body["full_name"],
                    "echo_password": body["password"],
                }))
            }),
        );
        let port = start_server(app).await;
        let store = Arc::new(MemoryTokenStore::new());
        let api = client(port, store.clone());

        let user = api.register(&register_request()).await.unwrap();
        assert_eq!(user.email, "jane@example.com");
        assert_eq!(user.full_name, None);

        // Registration never writes the token store.
        assert_eq!(store.get().await.unwrap(), None);
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn register_error_uses_detail_field() {
    timeout(TEST_TIMEOUT, async {
        let app = Router::new().route(
            "/auth/register",
            post(|| async {
                (
                    StatusCode::CONFLICT,
                    Json(json!({"detail": "Email already registered"})),
                )
            }),
        );
        let port = start_server(app).await;
        let api = client(port, Arc::new(MemoryTokenStore::new()));

        let err = api.register(&register_request()).await.unwrap_err();
        assert_eq!(err.to_string(), "Email already registered");
        assert_eq!(err.status(), Some(409));
    })
    .await
    .expect("test timed out");
}

// ── Login & token persistence ────────────────────────────────────────

#[tokio::test]
async fn login_persists_token_before_returning() {
    timeout(TEST_TIMEOUT, async {
        let app = Router::new().route(
            "/auth/login",
            post(|| async { Json(json!({"access_token": "tok-123", "token_type": "bearer"})) }),
        );
        let port = start_server(app).await;
        let store = Arc::new(MemoryTokenStore::new());
        let api = client(port, store.clone());

        let grant = api.login("jane@example.com", "pw").await.unwrap();
        assert_eq!(grant.access_token.as_deref(), Some("tok-123"));
        assert_eq!(store.get().await.unwrap().as_deref(), Some("tok-123"));
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn login_without_access_token_leaves_store_unchanged() {
    timeout(TEST_TIMEOUT, async {
        let app = Router::new().route(
            "/auth/login",
            post(|| async { Json(json!({"token_type": "bearer"})) }),
        );
        let port = start_server(app).await;
        let store = Arc::new(MemoryTokenStore::with_token("previous"));
        let api = client(port, store.clone());

        let grant = api.login("jane@example.com", "pw").await.unwrap();
        assert_eq!(grant.access_token, None);
        assert_eq!(store.get().await.unwrap().as_deref(), Some("previous"));
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn failed_login_leaves_old_token_untouched() {
    timeout(TEST_TIMEOUT, async {
        let app = Router::new().route(
            "/auth/login",
            post(|| async {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({"detail": "Bad credentials"})),
                )
            }),
        );
        let port = start_server(app).await;
        let store = Arc::new(MemoryTokenStore::with_token("previous"));
        let api = client(port, store.clone());

        let err = api.login("jane@example.com", "wrong").await.unwrap_err();
        assert!(err.is_auth());
        assert_eq!(store.get().await.unwrap().as_deref(), Some("previous"));
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn social_sign_in_posts_provider_and_persists_token() {
    timeout(TEST_TIMEOUT, async {
        let app = Router::new().route(
            "/auth/social",
            post(|Json(body): Json<Value>| async move {
                Json(json!({
                    "access_token": "social-tok",
                    "provider": body["provider"],
                    "id_token": body["id_token"],
                }))
            }),
        );
        let port = start_server(app).await;
        let store = Arc::new(MemoryTokenStore::new());
        let api = client(port, store.clone());

        let value = api
            .social_sign_in(SocialProvider::Google, "opaque-id-token")
            .await
            .unwrap();
        assert_eq!(value["provider"], "google");
        assert_eq!(value["id_token"], "opaque-id-token");
        assert_eq!(store.get().await.unwrap().as_deref(), Some("social-tok"));
    })
    .await
    .expect("test timed out");
}

// ── Authenticated calls ──────────────────────────────────────────────

fn me_routes() -> Router {
    Router::new().route(
        "/auth/me",
        get(|headers: HeaderMap| async move {
            let auth = headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_string();
            if auth == "Bearer tok-9" {
                (
                    StatusCode::OK,
                    Json(json!({"email": "jane@example.com", "full_name": "Jane Doe"})),
                )
            } else {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({"detail": "Invalid token"})),
                )
            }
        }),
    )
}

#[tokio::test]
async fn current_user_sends_bearer_from_store() {
    timeout(TEST_TIMEOUT, async {
        let port = start_server(me_routes()).await;
        let api = client(port, Arc::new(MemoryTokenStore::with_token("tok-9")));

        let user = api.current_user().await.unwrap();
        assert_eq!(user.full_name.as_deref(), Some("Jane Doe"));
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn rejected_token_is_an_auth_error() {
    timeout(TEST_TIMEOUT, async {
        let port = start_server(me_routes()).await;
        let api = client(port, Arc::new(MemoryTokenStore::with_token("stale")));

        let err = api.current_user().await.unwrap_err();
        assert!(err.is_auth());
        assert_eq!(err.to_string(), "Invalid token");
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn missing_token_fails_before_any_request() {
    timeout(TEST_TIMEOUT, async {
        // No server at all: the client must fail before the network.
        let api = client(1, Arc::new(MemoryTokenStore::new()));
        let err = api.onboarding_progress().await.unwrap_err();
        assert!(matches!(err, ApiError::MissingToken));
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn onboarding_step_update_returns_server_map_verbatim() {
    timeout(TEST_TIMEOUT, async {
        let app = Router::new().route(
            "/onboarding/step",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                let authed = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .is_some_and(|v| v.starts_with("Bearer "));
                if !authed {
                    return (
                        StatusCode::UNAUTHORIZED,
                        Json(json!({"detail": "Missing token"})),
                    );
                }
                assert_eq!(body["step"], "preferences");
                assert_eq!(body["status"], "completed");
                (StatusCode::OK, Json(json!({"theme": "dark"})))
            }),
        );
        let port = start_server(app).await;
        let api = client(port, Arc::new(MemoryTokenStore::with_token("tok")));

        let update = OnboardingStepUpdate {
            step: "preferences".into(),
            status: StepStatus::Completed,
            data: json!({"themePref": "dark"}),
        };
        let value = api.update_onboarding_step(&update).await.unwrap();
        assert_eq!(value, json!({"theme": "dark"}));
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn onboarding_progress_round_trips() {
    timeout(TEST_TIMEOUT, async {
        let app = Router::new().route(
            "/onboarding/progress",
            get(|| async { Json(json!({"profile": {"status": "completed"}})) }),
        );
        let port = start_server(app).await;
        let api = client(port, Arc::new(MemoryTokenStore::with_token("tok")));

        let progress = api.onboarding_progress().await.unwrap();
        assert_eq!(progress["profile"]["status"], "completed");
    })
    .await
    .expect("test timed out");
}

// ── Response normalization ───────────────────────────────────────────

#[tokio::test]
async fn error_without_detail_falls_back_to_message_field() {
    timeout(TEST_TIMEOUT, async {
        let app = Router::new().route(
            "/auth/register",
            post(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({"message": "Malformed body"})),
                )
            }),
        );
        let port = start_server(app).await;
        let api = client(port, Arc::new(MemoryTokenStore::new()));

        let err = api.register(&register_request()).await.unwrap_err();
        assert_eq!(err.to_string(), "Malformed body");
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn unknown_json_error_shape_is_stringified() {
    timeout(TEST_TIMEOUT, async {
        let app = Router::new().route(
            "/auth/register",
            post(|| async {
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(json!({"errors": ["password too short"]})),
                )
            }),
        );
        let port = start_server(app).await;
        let api = client(port, Arc::new(MemoryTokenStore::new()));

        let err = api.register(&register_request()).await.unwrap_err();
        assert_eq!(err.to_string(), r#"{"errors":["password too short"]}"#);
        match err {
            ApiError::Request { payload, .. } => {
                assert_eq!(payload["errors"][0], "password too short");
            }
            other => panic!("expected Request error, got {other:?}"),
        }
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn plain_text_error_body_is_kept_as_payload() {
    timeout(TEST_TIMEOUT, async {
        let app = Router::new().route(
            "/auth/register",
            post(|| async { (StatusCode::BAD_GATEWAY, "upstream exploded") }),
        );
        let port = start_server(app).await;
        let api = client(port, Arc::new(MemoryTokenStore::new()));

        let err = api.register(&register_request()).await.unwrap_err();
        // Stringified like JSON.stringify: quotes survive.
        assert_eq!(err.to_string(), "\"upstream exploded\"");
        match err {
            ApiError::Request {
                status, payload, ..
            } => {
                assert_eq!(status, 502);
                assert_eq!(payload, Value::String("upstream exploded".into()));
            }
            other => panic!("expected Request error, got {other:?}"),
        }
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn empty_error_body_yields_generic_message() {
    timeout(TEST_TIMEOUT, async {
        let app = Router::new().route(
            "/auth/register",
            post(|| async { StatusCode::SERVICE_UNAVAILABLE }),
        );
        let port = start_server(app).await;
        let api = client(port, Arc::new(MemoryTokenStore::new()));

        let err = api.register(&register_request()).await.unwrap_err();
        assert_eq!(err.to_string(), "Request failed (503)");
    })
    .await
    .expect("test timed out");
}
