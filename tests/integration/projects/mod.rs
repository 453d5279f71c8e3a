//! Project endpoint integration tests

use axum::http::{Method, StatusCode};
use portfolio_media::mock::{MediaCall, MockUpload};
use portfolio_media::UploadedAsset;
use portfolio_projects::domain::entities::BANNER_FOLDER;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use crate::common::{empty_request, parse_body, MultipartBody, TestApp};

/// Create a project through the API and return its JSON
async fn create_project(app: &TestApp) -> Value {
    let req = MultipartBody::new()
        .project_fields()
        .banner()
        .into_request(Method::POST, "/api/v1/project/add");
    let resp = app.router().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    parse_body(resp).await["project"].clone()
}

mod test_add_project {
    use super::*;

    #[tokio::test]
    async fn test_add_project_returns_201_with_banner() {
        let app = TestApp::new();
        app.media
            .behavior()
            .set_upload(MockUpload::Reply(UploadedAsset {
                asset_id: "x1".to_string(),
                secure_url: "http://cdn/x1".to_string(),
            }));

        let req = MultipartBody::new()
            .project_fields()
            .banner()
            .into_request(Method::POST, "/api/v1/project/add");
        let resp = app.router().oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::CREATED);
        let body = parse_body(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "New Project Added!");
        assert_eq!(body["project"]["title"], "A");
        assert_eq!(body["project"]["gitRepoLink"], "g");
        assert_eq!(body["project"]["projectBanner"]["public_id"], "x1");
        assert_eq!(body["project"]["projectBanner"]["url"], "http://cdn/x1");

        let id: Uuid = body["project"]["id"].as_str().unwrap().parse().unwrap();
        assert!(app.store.get(id).is_some());
    }

    #[tokio::test]
    async fn test_add_project_uploads_spooled_banner_to_folder() {
        let app = TestApp::new();
        create_project(&app).await;

        match &app.media.calls()[..] {
            [MediaCall::Upload {
                folder,
                size_bytes,
                ..
            }] => {
                assert_eq!(folder, BANNER_FOLDER);
                assert_eq!(*size_bytes, Some(11));
            }
            calls => panic!("unexpected media calls: {:?}", calls),
        }
    }

    #[tokio::test]
    async fn test_add_project_without_banner_returns_400() {
        let app = TestApp::new();

        let req = MultipartBody::new()
            .project_fields()
            .into_request(Method::POST, "/api/v1/project/add");
        let resp = app.router().oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = parse_body(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Project Banner Image Required!");
        assert!(app.media.calls().is_empty());
        assert!(app.store.is_empty());
    }

    #[tokio::test]
    async fn test_add_project_missing_field_returns_400() {
        let app = TestApp::new();

        let req = MultipartBody::new()
            .text("title", "A")
            .text("description", "B")
            .banner()
            .into_request(Method::POST, "/api/v1/project/add");
        let resp = app.router().oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = parse_body(resp).await;
        assert_eq!(body["message"], "Please Provide All Details!");
        assert_eq!(app.media.upload_count(), 0);
        assert!(app.store.is_empty());
    }

    #[tokio::test]
    async fn test_add_project_upload_failure_returns_500() {
        let app = TestApp::new();
        app.media.behavior().set_upload(MockUpload::Fail);

        let req = MultipartBody::new()
            .project_fields()
            .banner()
            .into_request(Method::POST, "/api/v1/project/add");
        let resp = app.router().oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = parse_body(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Failed to upload project banner");
        assert!(app.store.is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_hides_detail() {
        let app = TestApp::new();
        app.store.set_unavailable(true);

        let req = MultipartBody::new()
            .project_fields()
            .banner()
            .into_request(Method::POST, "/api/v1/project/add");
        let resp = app.router().oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = parse_body(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Internal Server Error");
        // The uploaded banner is left behind
        assert_eq!(app.media.upload_count(), 1);
    }

    #[tokio::test]
    async fn test_oversized_body_is_rejected() {
        let app = TestApp::with_lookup(|key| match key {
            "MAX_UPLOAD_BYTES" => Some("64".to_string()),
            _ => None,
        });

        let req = MultipartBody::new()
            .project_fields()
            .file("projectBanner", "banner.png", &[7u8; 1024])
            .into_request(Method::POST, "/api/v1/project/add");
        let resp = app.router().oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
        let body = parse_body(resp).await;
        assert_eq!(body["success"], false);
        assert!(body["message"].as_str().unwrap().contains("too large"));
        assert_eq!(app.media.upload_count(), 0);
        assert!(app.store.is_empty());
    }
}

mod test_update_project {
    use super::*;

    #[tokio::test]
    async fn test_update_fields_keeps_banner() {
        let app = TestApp::new();
        let created = create_project(&app).await;
        let id = created["id"].as_str().unwrap();
        app.media.reset_history();

        let req = MultipartBody::new()
            .text("title", "Renamed")
            .into_request(Method::PUT, &format!("/api/v1/project/update/{}", id));
        let resp = app.router().oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let body = parse_body(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Project Updated!");
        assert_eq!(body["project"]["title"], "Renamed");
        assert_eq!(body["project"]["description"], "B");
        assert_eq!(body["project"]["projectBanner"], created["projectBanner"]);
        assert!(app.media.calls().is_empty());
    }

    #[tokio::test]
    async fn test_update_with_json_body() {
        let app = TestApp::new();
        let created = create_project(&app).await;
        let id = created["id"].as_str().unwrap();

        let req = axum::http::Request::builder()
            .method(Method::PUT)
            .uri(format!("/api/v1/project/update/{}", id))
            .header("content-type", "application/json")
            .body(axum::body::Body::from(r#"{"deployed":"No"}"#))
            .unwrap();
        let resp = app.router().oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let body = parse_body(resp).await;
        assert_eq!(body["project"]["deployed"], "No");
    }

    #[tokio::test]
    async fn test_update_with_banner_replaces_asset() {
        let app = TestApp::new();
        let created = create_project(&app).await;
        let id = created["id"].as_str().unwrap();
        let old_asset = created["projectBanner"]["public_id"]
            .as_str()
            .unwrap()
            .to_string();
        app.media.reset_history();
        app.media
            .behavior()
            .set_upload(MockUpload::Reply(UploadedAsset {
                asset_id: "x2".to_string(),
                secure_url: "http://cdn/x2".to_string(),
            }));

        let req = MultipartBody::new()
            .file("projectBanner", "new.png", b"new banner")
            .into_request(Method::PUT, &format!("/api/v1/project/update/{}", id));
        let resp = app.router().oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let body = parse_body(resp).await;
        assert_eq!(body["project"]["projectBanner"]["public_id"], "x2");
        assert_eq!(body["project"]["projectBanner"]["url"], "http://cdn/x2");
        assert_eq!(body["project"]["title"], "A");

        let calls = app.media.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(
            calls[0],
            MediaCall::Destroy {
                asset_id: old_asset
            }
        );
        assert!(matches!(calls[1], MediaCall::Upload { .. }));
    }

    #[tokio::test]
    async fn test_update_missing_id_returns_404() {
        let app = TestApp::new();

        let req = MultipartBody::new()
            .text("title", "x")
            .into_request(Method::PUT, "/api/v1/project/update/missing-id");
        let resp = app.router().oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body = parse_body(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Project not found!");
    }

    #[tokio::test]
    async fn test_update_unknown_id_with_banner_returns_404() {
        let app = TestApp::new();

        let req = MultipartBody::new()
            .banner()
            .into_request(
                Method::PUT,
                &format!("/api/v1/project/update/{}", Uuid::new_v4()),
            );
        let resp = app.router().oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert!(app.media.calls().is_empty());
    }

    #[tokio::test]
    async fn test_update_blank_field_returns_400() {
        let app = TestApp::new();
        let created = create_project(&app).await;
        let id = created["id"].as_str().unwrap();

        let req = MultipartBody::new()
            .text("stack", "")
            .into_request(Method::PUT, &format!("/api/v1/project/update/{}", id));
        let resp = app.router().oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = parse_body(resp).await;
        assert_eq!(body["message"], "Project stack cannot be empty");
    }
}

mod test_delete_project {
    use super::*;

    #[tokio::test]
    async fn test_delete_removes_record_and_banner() {
        let app = TestApp::new();
        let created = create_project(&app).await;
        let id = created["id"].as_str().unwrap();
        app.media.reset_history();

        let resp = app
            .router()
            .oneshot(empty_request(
                Method::DELETE,
                &format!("/api/v1/project/delete/{}", id),
            ))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let body = parse_body(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Project Deleted!");
        assert_eq!(
            app.media.destroyed(),
            vec![created["projectBanner"]["public_id"]
                .as_str()
                .unwrap()
                .to_string()]
        );
        assert!(app.store.is_empty());

        let resp = app
            .router()
            .oneshot(empty_request(
                Method::GET,
                &format!("/api/v1/project/get/{}", id),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_unknown_returns_404() {
        let app = TestApp::new();

        let resp = app
            .router()
            .oneshot(empty_request(
                Method::DELETE,
                &format!("/api/v1/project/delete/{}", Uuid::new_v4()),
            ))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert!(app.media.calls().is_empty());
    }

    #[tokio::test]
    async fn test_delete_banner_failure_keeps_record() {
        let app = TestApp::new();
        let created = create_project(&app).await;
        let id = created["id"].as_str().unwrap();
        app.media.behavior().set_fail_destroy(true);

        let resp = app
            .router()
            .oneshot(empty_request(
                Method::DELETE,
                &format!("/api/v1/project/delete/{}", id),
            ))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = parse_body(resp).await;
        assert_eq!(body["message"], "Failed to delete project banner");
        assert_eq!(app.store.len(), 1);
    }
}

mod test_read_projects {
    use super::*;

    #[tokio::test]
    async fn test_getall_lists_projects() {
        let app = TestApp::new();

        let resp = app
            .router()
            .oneshot(empty_request(Method::GET, "/api/v1/project/getall"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = parse_body(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["projects"], serde_json::json!([]));

        let first = create_project(&app).await;
        let second = create_project(&app).await;

        let resp = app
            .router()
            .oneshot(empty_request(Method::GET, "/api/v1/project/getall"))
            .await
            .unwrap();
        let body = parse_body(resp).await;
        let projects = body["projects"].as_array().unwrap();
        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0]["id"], first["id"]);
        assert_eq!(projects[1]["id"], second["id"]);
    }

    #[tokio::test]
    async fn test_get_single_project() {
        let app = TestApp::new();
        let created = create_project(&app).await;
        let id = created["id"].as_str().unwrap();

        let resp = app
            .router()
            .oneshot(empty_request(
                Method::GET,
                &format!("/api/v1/project/get/{}", id),
            ))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let body = parse_body(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["project"], created);
        assert!(body.get("message").is_none());
    }

    #[tokio::test]
    async fn test_get_malformed_id_returns_404() {
        let app = TestApp::new();

        let resp = app
            .router()
            .oneshot(empty_request(Method::GET, "/api/v1/project/get/not-a-uuid"))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body = parse_body(resp).await;
        assert_eq!(body["message"], "Project not found!");
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = TestApp::new();

        let resp = app
            .router()
            .oneshot(empty_request(Method::GET, "/health"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
