//! Student CRUD handlers
//!
//! Each handler maps a store outcome onto the HTTP contract: 201 for a
//! created record, 200 for reads and deletes, 404 for misses, 400 for
//! malformed input, and 500 when the backing file cannot be written.

use crate::config::AppState;
use crate::logger;
use crate::response;
use crate::store::NewStudent;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde_json::json;

/// POST /create-student
pub async fn create(state: &AppState, body: &Bytes) -> Response<Full<Bytes>> {
    let fields: NewStudent = match serde_json::from_slice(body) {
        Ok(fields) => fields,
        Err(e) => return response::bad_request(&format!("Invalid JSON: {e}")),
    };

    match state.store.create(fields).await {
        Ok(student) => response::json_response(
            StatusCode::CREATED,
            &json!({
                "message": "Student created successfully",
                "data": student,
            }),
        ),
        Err(e) => {
            logger::log_error(&format!("Failed to persist student records: {e}"));
            response::persistence_failed()
        }
    }
}

/// GET /students*
pub async fn list(state: &AppState) -> Response<Full<Bytes>> {
    let students = state.store.all().await;
    if students.is_empty() {
        return response::not_found("No student found");
    }

    response::json_response(
        StatusCode::OK,
        &json!({
            "message": "Welcome to the Student Management System",
            "total": students.len(),
            "data": students,
        }),
    )
}

/// GET /student/{id}*
pub async fn get_one(state: &AppState, id: &str) -> Response<Full<Bytes>> {
    match state.store.find(id).await {
        Some(student) => response::json_response(
            StatusCode::OK,
            &json!({
                "message": "Student found",
                "data": student,
            }),
        ),
        None => response::not_found("Student not found"),
    }
}

/// DELETE /delete-student/{id}*
pub async fn delete(state: &AppState, id: &str) -> Response<Full<Bytes>> {
    match state.store.remove(id).await {
        Ok(true) => response::json_response(
            StatusCode::OK,
            &json!({
                "message": "Student deleted successfully",
                "data": { "id": id },
            }),
        ),
        Ok(false) => response::not_found("Student not found"),
        Err(e) => {
            logger::log_error(&format!("Failed to persist student records: {e}"));
            response::persistence_failed()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        Config, HttpConfig, LoggingConfig, PerformanceConfig, ServerConfig, StorageConfig,
    };
    use crate::store::StudentStore;
    use http_body_util::BodyExt;
    use serde_json::Value;

    fn test_config(db_path: &std::path::Path) -> Config {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                workers: None,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                access_log: false,
            },
            performance: PerformanceConfig {
                keep_alive_timeout: 75,
                read_timeout: 30,
                write_timeout: 30,
                max_connections: None,
            },
            http: HttpConfig {
                max_body_size: 1_048_576,
            },
            storage: StorageConfig {
                db_path: db_path.display().to_string(),
            },
        }
    }

    async fn test_state() -> (tempfile::TempDir, AppState) {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("students.json");
        let store = StudentStore::load(&db_path).await.unwrap();
        let state = AppState::new(test_config(&db_path), store);
        (dir, state)
    }

    async fn body_json(response: Response<Full<Bytes>>) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn body_text(response: Response<Full<Bytes>>) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    const ADA: &str = r#"{"name":"Ada","age":30,"gender":"F","isEmployed":true}"#;
    const GRACE: &str = r#"{"name":"Grace","age":45,"gender":"F","isEmployed":false}"#;

    async fn create_one(state: &AppState, body: &str) -> Value {
        let response = create(state, &Bytes::from(body.to_string())).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        body_json(response).await
    }

    #[tokio::test]
    async fn test_create_returns_record_with_generated_id() {
        let (_dir, state) = test_state().await;
        let created = create_one(&state, ADA).await;

        assert_eq!(created["message"], "Student created successfully");
        let data = &created["data"];
        assert_eq!(data["name"], "Ada");
        assert_eq!(data["age"], 30);
        assert_eq!(data["gender"], "F");
        assert_eq!(data["isEmployed"], true);
        assert!(!data["id"].as_str().unwrap().is_empty());

        assert_eq!(state.store.all().await.len(), 1);
    }

    #[tokio::test]
    async fn test_create_rejects_malformed_json() {
        let (_dir, state) = test_state().await;
        let response = create(&state, &Bytes::from_static(b"{not json")).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().starts_with("Invalid JSON"));
        assert!(state.store.all().await.is_empty());
    }

    #[tokio::test]
    async fn test_list_empty_collection_is_404() {
        let (_dir, state) = test_state().await;
        let response = list(&state).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_text(response).await, "No student found");
    }

    #[tokio::test]
    async fn test_list_returns_all_in_insertion_order() {
        let (_dir, state) = test_state().await;
        create_one(&state, ADA).await;
        create_one(&state, GRACE).await;

        let response = list(&state).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["total"], 2);
        let data = body["data"].as_array().unwrap();
        assert_eq!(data[0]["name"], "Ada");
        assert_eq!(data[1]["name"], "Grace");
    }

    #[tokio::test]
    async fn test_get_one_round_trip() {
        let (_dir, state) = test_state().await;
        let created = create_one(&state, ADA).await;
        let id = created["data"]["id"].as_str().unwrap().to_string();

        let response = get_one(&state, &id).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["message"], "Student found");
        assert_eq!(body["data"], created["data"]);
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_404() {
        let (_dir, state) = test_state().await;
        create_one(&state, ADA).await;

        let response = get_one(&state, "no-such-id").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_text(response).await, "Student not found");
    }

    #[tokio::test]
    async fn test_repeated_reads_are_identical() {
        let (_dir, state) = test_state().await;
        create_one(&state, ADA).await;

        let first = body_json(list(&state).await).await;
        let second = body_json(list(&state).await).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_delete_removes_exactly_that_record() {
        let (_dir, state) = test_state().await;
        let ada = create_one(&state, ADA).await;
        create_one(&state, GRACE).await;
        let id = ada["data"]["id"].as_str().unwrap().to_string();

        let response = delete(&state, &id).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["message"], "Student deleted successfully");
        assert_eq!(body["data"]["id"], id.as_str());

        let remaining = state.store.all().await;
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].name, Some(serde_json::json!("Grace")));
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_404() {
        let (_dir, state) = test_state().await;
        create_one(&state, ADA).await;

        let response = delete(&state, "no-such-id").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_text(response).await, "Student not found");
        assert_eq!(state.store.all().await.len(), 1);
    }

    #[tokio::test]
    async fn test_create_from_empty_object_stores_only_id() {
        let (_dir, state) = test_state().await;
        let created = create_one(&state, "{}").await;

        let data = created["data"].as_object().unwrap();
        assert_eq!(data.len(), 1);
        assert!(data.contains_key("id"));
    }
}
