mod attempts;
mod children;
mod progress;

use crate::{prelude::*, store::Store};

use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    let router = attempts::add_routes(router);
    let router = children::add_routes(router);
    let router = progress::add_routes(router);

    return router.route("/health", get(health));
}

async fn health(State(state): State<AppState>) -> Result<Json<Value>> {
    let now = state.store.now().await?;

    return Ok(Json(json!({ "ok": true, "db": now.to_rfc3339() })));
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
    };
    use chrono::{DateTime, Utc};
    use tower::ServiceExt;

    use super::*;
    use crate::{
        config,
        models::{Attempt, Child, NewAttempt, NewChild},
        store::{AttemptStore, ChildStore, DataAccessError, MemoryStore},
    };

    fn test_app(store: Arc<dyn Store>) -> Router {
        let cfg = config::build(|_| None).unwrap();
        crate::app(&cfg, AppState { store })
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, value)
    }

    #[tokio::test]
    async fn recorded_attempts_show_up_in_progress() {
        let app = test_app(Arc::new(MemoryStore::new()));

        for (result, reaction) in [(true, 800), (false, 1200)] {
            let (status, body) = send(
                &app,
                Method::POST,
                "/attempts",
                Some(json!({
                    "child_id": 1,
                    "game_code": "color_balloons",
                    "level": 1,
                    "target_color": "azul",
                    "result": result,
                    "reaction_ms": reaction
                })),
            )
            .await;

            assert_eq!(status, StatusCode::CREATED);
            assert_eq!(body, json!({ "ok": true }));
        }

        let (status, body) = send(&app, Method::GET, "/progress/1", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([{
                "game_code": "color_balloons",
                "level": 1,
                "correct": 1,
                "wrong": 1,
                "avg_ms": 1000.0
            }])
        );
    }

    #[tokio::test]
    async fn progress_without_latency_reports_null_average() {
        let app = test_app(Arc::new(MemoryStore::new()));

        let (status, _) = send(
            &app,
            Method::POST,
            "/attempts",
            Some(json!({ "child_id": 2, "game_code": "letters", "level": 2, "result": true })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (_, body) = send(&app, Method::GET, "/progress/2", None).await;

        assert_eq!(
            body,
            json!([{ "game_code": "letters", "level": 2, "correct": 1, "wrong": 0, "avg_ms": null }])
        );
    }

    #[tokio::test]
    async fn levels_are_sorted_within_a_game() {
        let app = test_app(Arc::new(MemoryStore::new()));

        for level in [3, 1, 2] {
            send(
                &app,
                Method::POST,
                "/attempts",
                Some(json!({ "child_id": 5, "game_code": "sizes", "level": level, "result": false })),
            )
            .await;
        }

        let (_, body) = send(&app, Method::GET, "/progress/5", None).await;
        let levels: Vec<i64> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|row| row["level"].as_i64().unwrap())
            .collect();

        assert_eq!(levels, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn unknown_child_has_empty_progress() {
        let app = test_app(Arc::new(MemoryStore::new()));

        let (status, body) = send(&app, Method::GET, "/progress/77", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn malformed_child_id_is_rejected() {
        let app = test_app(Arc::new(MemoryStore::new()));

        let (status, body) = send(&app, Method::GET, "/progress/abc", None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "invalid_child_id" }));
    }

    #[tokio::test]
    async fn attempt_missing_result_is_rejected() {
        let store = Arc::new(MemoryStore::new());
        let app = test_app(store.clone());

        let (status, body) = send(
            &app,
            Method::POST,
            "/attempts",
            Some(json!({ "child_id": 1, "game_code": "letters", "level": 1 })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "missing_required_fields" }));
        assert!(store.attempts_for_child(1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn oversized_attempt_fields_are_client_errors() {
        let store = Arc::new(MemoryStore::new());
        let app = test_app(store.clone());

        let (status, body) = send(
            &app,
            Method::POST,
            "/attempts",
            Some(json!({ "child_id": 1, "game_code": "g".repeat(65), "level": 1, "result": true })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "field_too_long" }));

        let (status, body) = send(
            &app,
            Method::POST,
            "/attempts",
            Some(json!({ "child_id": 1, "game_code": "letters", "level": 1, "result": true, "reaction_ms": 9e18 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "invalid_reaction_ms" }));

        assert!(store.attempts_for_child(1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn attempt_without_json_body_is_rejected() {
        let app = test_app(Arc::new(MemoryStore::new()));

        let request = Request::builder()
            .method(Method::POST)
            .uri("/attempts")
            .body(Body::from("child_id=1"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({ "error": "missing_required_fields" }));
    }

    #[tokio::test]
    async fn children_can_be_created_and_listed() {
        let app = test_app(Arc::new(MemoryStore::new()));

        let (status, created) = send(
            &app,
            Method::POST,
            "/children",
            Some(json!({ "name": "Eduardo", "birthdate": "2019-08-02" })),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["id"], json!(1));
        assert_eq!(created["userId"], json!(1));
        assert_eq!(created["name"], json!("Eduardo"));
        assert_eq!(created["birthdate"], json!("2019-08-02"));

        let (status, listed) = send(&app, Method::GET, "/children", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed, json!([created]));
    }

    #[tokio::test]
    async fn child_without_name_is_rejected() {
        let app = test_app(Arc::new(MemoryStore::new()));

        let (status, body) = send(&app, Method::POST, "/children", Some(json!({ "userId": 1 }))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "name_required" }));
    }

    #[tokio::test]
    async fn health_reports_store_time() {
        let app = test_app(Arc::new(MemoryStore::new()));

        let (status, body) = send(&app, Method::GET, "/health", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], json!(true));
        assert!(DateTime::parse_from_rfc3339(body["db"].as_str().unwrap()).is_ok());
    }

    #[tokio::test]
    async fn responses_carry_security_and_cors_headers() {
        let app = test_app(Arc::new(MemoryStore::new()));

        let request = Request::builder()
            .uri("/children")
            .header(header::ORIGIN, "http://localhost:3000")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();

        let headers = response.headers();
        assert_eq!(headers[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
        assert_eq!(headers[header::X_FRAME_OPTIONS], "SAMEORIGIN");
        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:3000"
        );

        let request = Request::builder()
            .uri("/children")
            .header(header::ORIGIN, "https://elsewhere.example")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert!(response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none());
    }

    struct UnreachableStore;

    fn unreachable() -> DataAccessError {
        DataAccessError::Unavailable("connection refused".to_string())
    }

    #[async_trait]
    impl AttemptStore for UnreachableStore {
        async fn insert_attempt(&self, _: &NewAttempt) -> std::result::Result<(), DataAccessError> {
            Err(unreachable())
        }

        async fn attempts_for_child(&self, _: i64) -> std::result::Result<Vec<Attempt>, DataAccessError> {
            Err(unreachable())
        }
    }

    #[async_trait]
    impl ChildStore for UnreachableStore {
        async fn list_children(&self) -> std::result::Result<Vec<Child>, DataAccessError> {
            Err(unreachable())
        }

        async fn insert_child(&self, _: &NewChild) -> std::result::Result<Child, DataAccessError> {
            Err(unreachable())
        }
    }

    #[async_trait]
    impl Store for UnreachableStore {
        async fn now(&self) -> std::result::Result<DateTime<Utc>, DataAccessError> {
            Err(unreachable())
        }

        async fn close(&self) {}
    }

    #[tokio::test]
    async fn store_failures_surface_as_generic_errors() {
        let app = test_app(Arc::new(UnreachableStore));

        for (method, uri, body) in [
            (Method::GET, "/progress/1", None),
            (Method::GET, "/children", None),
            (Method::GET, "/health", None),
            (
                Method::POST,
                "/attempts",
                Some(json!({ "child_id": 1, "game_code": "letters", "level": 1, "result": true })),
            ),
        ] {
            let (status, body) = send(&app, method, uri, body).await;

            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
            assert_eq!(body, json!({ "error": "internal_error" }));
        }
    }
}
