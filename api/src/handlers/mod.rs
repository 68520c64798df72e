pub mod departments;
pub mod employees;
pub mod skills;

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use migration::MigratorTrait;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    async fn setup_app() -> Result<axum::Router, Box<dyn std::error::Error>> {
        let db = sea_orm::Database::connect("sqlite::memory:").await?;
        migration::Migrator::up(&db, None).await?;

        let db_arc = Arc::new(db);
        let (_repos, services) = common::build_all(db_arc);

        let state = Arc::new(crate::AppState { services });
        Ok(crate::build_router(state))
    }

    fn post(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn put(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("PUT")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    fn delete(uri: &str) -> Request<Body> {
        Request::builder()
            .method("DELETE")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn body_json(resp: axum::response::Response) -> Value {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn department_crud_over_http() {
        let app = setup_app().await.unwrap();

        let resp = app
            .clone()
            .oneshot(post("/api/departments", json!({"name": "Engineering"})))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body = body_json(resp).await;
        assert_eq!(body["message"], "Department created successfully.");
        let id = body["department"]["id"].as_i64().unwrap();

        let resp = app.clone().oneshot(get("/api/departments")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["departments"][0]["name"], "Engineering");
        assert_eq!(body["departments"][0]["employee_count"], 0);

        let resp = app
            .clone()
            .oneshot(put(
                &format!("/api/departments/{id}"),
                json!({"name": "Platform"}),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["department"]["name"], "Platform");

        let resp = app
            .oneshot(delete(&format!("/api/departments/{id}")))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["message"], "Department deleted successfully.");
    }

    #[tokio::test]
    async fn missing_department_returns_404() {
        let app = setup_app().await.unwrap();
        let resp = app.oneshot(get("/api/departments/999")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body = body_json(resp).await;
        assert_eq!(body["error"], "Not found");
    }

    #[tokio::test]
    async fn non_numeric_id_returns_400() {
        let app = setup_app().await.unwrap();
        let resp = app.oneshot(get("/api/departments/abc")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn blank_name_returns_422_with_field_errors() {
        let app = setup_app().await.unwrap();
        let resp = app
            .oneshot(post("/api/skills", json!({"name": "   "})))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(resp).await;
        assert_eq!(body["errors"][0]["field"], "name");
        assert_eq!(body["errors"][0]["reason"], "required");
    }

    #[tokio::test]
    async fn deleting_referenced_department_returns_409() {
        let app = setup_app().await.unwrap();

        let resp = app
            .clone()
            .oneshot(post("/api/departments", json!({"name": "Sales"})))
            .await
            .unwrap();
        let dept_id = body_json(resp).await["department"]["id"].as_i64().unwrap();

        let resp = app
            .clone()
            .oneshot(post(
                "/api/employees",
                json!({
                    "first_name": "Ada",
                    "last_name": "Lovelace",
                    "email": "ada@example.com",
                    "department_id": dept_id,
                }),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);

        let resp = app
            .oneshot(delete(&format!("/api/departments/{dept_id}")))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        let body = body_json(resp).await;
        assert_eq!(
            body["error"],
            "Cannot delete department with existing employees."
        );
    }

    #[tokio::test]
    async fn employee_create_show_and_filter() {
        let app = setup_app().await.unwrap();

        let resp = app
            .clone()
            .oneshot(post("/api/departments", json!({"name": "Support"})))
            .await
            .unwrap();
        let dept_id = body_json(resp).await["department"]["id"].as_i64().unwrap();

        let resp = app
            .clone()
            .oneshot(post("/api/skills", json!({"name": "Rust"})))
            .await
            .unwrap();
        let skill_id = body_json(resp).await["skill"]["id"].as_i64().unwrap();

        let resp = app
            .clone()
            .oneshot(post(
                "/api/employees",
                json!({
                    "first_name": "Grace",
                    "last_name": "Hopper",
                    "email": "grace@example.com",
                    "department_id": dept_id,
                    "skills": [skill_id],
                }),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body = body_json(resp).await;
        let emp_id = body["employee"]["id"].as_i64().unwrap();
        assert_eq!(body["employee"]["full_name"], "Grace Hopper");
        assert_eq!(body["employee"]["skills"][0]["name"], "Rust");

        let resp = app
            .clone()
            .oneshot(get(&format!("/api/employees/{emp_id}")))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["employee"]["department"]["name"], "Support");

        let resp = app
            .clone()
            .oneshot(get(&format!("/api/employees?department_id={dept_id}")))
            .await
            .unwrap();
        let body = body_json(resp).await;
        assert_eq!(body["employees"].as_array().unwrap().len(), 1);

        let resp = app
            .oneshot(get("/api/employees?department_id=999"))
            .await
            .unwrap();
        let body = body_json(resp).await;
        assert_eq!(body["employees"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn form_data_bundles_departments_and_skills() {
        let app = setup_app().await.unwrap();

        app.clone()
            .oneshot(post("/api/departments", json!({"name": "Legal"})))
            .await
            .unwrap();
        app.clone()
            .oneshot(post("/api/skills", json!({"name": "Negotiation"})))
            .await
            .unwrap();

        let resp = app.oneshot(get("/api/employees/form-data")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["departments"][0]["name"], "Legal");
        assert_eq!(body["skills"][0]["name"], "Negotiation");
    }

    #[tokio::test]
    async fn check_email_reports_existence_and_rejects_missing_input() {
        let app = setup_app().await.unwrap();

        let resp = app
            .clone()
            .oneshot(post("/api/departments", json!({"name": "Ops"})))
            .await
            .unwrap();
        let dept_id = body_json(resp).await["department"]["id"].as_i64().unwrap();

        let resp = app
            .clone()
            .oneshot(post(
                "/api/employees",
                json!({
                    "first_name": "Alan",
                    "last_name": "Turing",
                    "email": "alan@example.com",
                    "department_id": dept_id,
                }),
            ))
            .await
            .unwrap();
        let emp_id = body_json(resp).await["employee"]["id"].as_i64().unwrap();

        let resp = app
            .clone()
            .oneshot(post("/api/check-email", json!({"email": "alan@example.com"})))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await["exists"], true);

        let resp = app
            .clone()
            .oneshot(post(
                "/api/check-email",
                json!({"email": "alan@example.com", "employee_id": emp_id}),
            ))
            .await
            .unwrap();
        assert_eq!(body_json(resp).await["exists"], false);

        let resp = app
            .clone()
            .oneshot(post("/api/check-email", json!({})))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let resp = app
            .oneshot(post("/api/check-email", json!({"email": "not-an-email"})))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(resp).await;
        assert_eq!(body["errors"][0]["field"], "email");
        assert_eq!(body["errors"][0]["reason"], "invalid");
    }

    #[tokio::test]
    async fn duplicate_email_returns_422() {
        let app = setup_app().await.unwrap();

        let resp = app
            .clone()
            .oneshot(post("/api/departments", json!({"name": "Finance"})))
            .await
            .unwrap();
        let dept_id = body_json(resp).await["department"]["id"].as_i64().unwrap();

        let employee = json!({
            "first_name": "Katherine",
            "last_name": "Johnson",
            "email": "kj@example.com",
            "department_id": dept_id,
        });

        let resp = app
            .clone()
            .oneshot(post("/api/employees", employee.clone()))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);

        let resp = app.oneshot(post("/api/employees", employee)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(resp).await;
        assert_eq!(body["errors"][0]["field"], "email");
        assert_eq!(body["errors"][0]["reason"], "not_unique");
    }
}
