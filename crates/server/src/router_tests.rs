//! In-process tests for the byte-serving endpoint and the library API.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use folio_store::library::Library;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use crate::{server, state::AppState};

const PAYLOAD: &[u8] = b"PK\x03\x04folio-test-epub-bytes";

/// Router plus a facade handle over the same database file, standing in for
/// the two execution contexts.
fn test_app() -> (Router, Library, TempDir) {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("library.db");
    let app = server::create_app(AppState::new(db_path.clone()), dir.path());
    (app, Library::new(db_path), dir)
}

async fn get(app: Router, uri: &str) -> axum::response::Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

mod offline_endpoint {
    use super::*;

    #[tokio::test]
    async fn empty_id_is_a_bad_request() {
        let (app, _library, _dir) = test_app();
        let response = get(app.clone(), "/epub-local/").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = get(app, "/epub-local").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let (app, _library, _dir) = test_app();
        let response = get(app, "/epub-local/unknown-id").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn stored_book_is_served_byte_for_byte() {
        let (app, library, _dir) = test_app();
        let id = library.add_book("sample.epub", PAYLOAD.to_vec()).unwrap();

        let response = get(app, &format!("/epub-local/{id}")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_bytes(response).await, PAYLOAD);
    }

    #[tokio::test]
    async fn deleted_book_stops_being_served() {
        let (app, library, _dir) = test_app();
        let id = library.add_book("sample.epub", PAYLOAD.to_vec()).unwrap();
        library.delete_book(&id).unwrap();

        let response = get(app, &format!("/epub-local/{id}")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

mod library_api {
    use super::*;

    async fn upload(app: Router, name: &str, payload: &[u8]) -> axum::response::Response {
        app.oneshot(
            Request::builder()
                .method(Method::POST)
                .uri(format!("/api/books?name={name}"))
                .body(Body::from(payload.to_vec()))
                .unwrap(),
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn upload_then_list_then_delete() {
        let (app, _library, _dir) = test_app();

        let response = upload(app.clone(), "sample.epub", PAYLOAD).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        let id = body["id"].as_str().unwrap().to_string();

        let response = get(app.clone(), "/api/books").await;
        assert_eq!(response.status(), StatusCode::OK);
        let listed: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(listed[0]["id"], Value::from(id.clone()));
        assert_eq!(listed[0]["name"], Value::from("sample.epub"));

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(Method::DELETE)
                    .uri(format!("/api/books/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = get(app, &format!("/api/books/{id}")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn upload_with_wrong_extension_is_rejected() {
        let (app, library, _dir) = test_app();

        let response = upload(app, "notes.txt", PAYLOAD).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(library.list_books().unwrap().is_empty());
    }

    #[tokio::test]
    async fn reading_position_round_trips_through_the_api() {
        let (app, library, _dir) = test_app();
        let id = library.add_book("sample.epub", PAYLOAD.to_vec()).unwrap();

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(Method::PUT)
                    .uri(format!("/api/books/{id}/location"))
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"location":"epubcfi(/6/4!/2)"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = get(app, &format!("/api/books/{id}")).await;
        let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body["lastLocation"], Value::from("epubcfi(/6/4!/2)"));
    }

    #[tokio::test]
    async fn preference_patches_merge() {
        let (app, _library, _dir) = test_app();

        for patch in [r#"{"theme":"sepia"}"#, r#"{"fontSize":18}"#] {
            let response = app
                .clone()
                .oneshot(
                    Request::builder()
                        .method(Method::PATCH)
                        .uri("/api/preferences")
                        .header(header::CONTENT_TYPE, "application/json")
                        .body(Body::from(patch))
                        .unwrap(),
                )
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::NO_CONTENT);
        }

        let response = get(app, "/api/preferences").await;
        let settings: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(settings["theme"], Value::from("sepia"));
        assert_eq!(settings["fontSize"], Value::from(18));
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let (app, _library, _dir) = test_app();
        let response = get(app, "/api/health").await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body["status"], Value::from("ok"));
    }
}
