use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Post, User, PROFESSOR_EMAIL, SEED_PASSWORD};
use serde_json::Value;
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

const NEW_POST: &str = r#"{"title":"Intro","content":"Design thinking basics","userId":"1","urlImage":"https://img","posted":true,"excluded":false}"#;

// --- login ---

#[tokio::test]
async fn login_matches_email_and_password() {
    let uri = format!("/api/users/login?email={PROFESSOR_EMAIL}&password={SEED_PASSWORD}");
    let resp = app().oneshot(get(&uri)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let users: Vec<Value> = body_json(resp).await;
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["email"], PROFESSOR_EMAIL);
    assert_eq!(users[0]["role"], "professor");
    assert!(users[0].get("password").is_none());
}

#[tokio::test]
async fn login_wrong_password_returns_empty_array() {
    let uri = format!("/api/users/login?email={PROFESSOR_EMAIL}&password=nope");
    let resp = app().oneshot(get(&uri)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let users: Vec<Value> = body_json(resp).await;
    assert!(users.is_empty());
}

// --- users ---

#[tokio::test]
async fn get_user_is_wrapped_in_array() {
    let resp = app().oneshot(get("/api/users/1")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let users: Vec<User> = body_json(resp).await;
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].id, "1");
}

#[tokio::test]
async fn get_missing_user_is_empty_array() {
    let resp = app().oneshot(get("/api/users/404")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let users: Vec<User> = body_json(resp).await;
    assert!(users.is_empty());
}

#[tokio::test]
async fn create_user_returns_user_created_envelope() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/api/users",
            r#"{"name":"Ana","email":"ana@x.com","password":"secret1","role":"aluno"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = body_json(resp).await;
    assert_eq!(body["userCreated"]["email"], "ana@x.com");
    assert!(body["userCreated"].get("password").is_none());
}

#[tokio::test]
async fn update_missing_user_returns_404() {
    let resp = app()
        .oneshot(json_request("PUT", "/api/users/404", r#"{"name":"Nope"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- posts ---

#[tokio::test]
async fn list_posts_empty_envelope() {
    let resp = app().oneshot(get("/api/posts")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    assert_eq!(body["posts"], serde_json::json!([]));
}

#[tokio::test]
async fn create_post_malformed_json_returns_422() {
    let resp = app()
        .oneshot(json_request("POST", "/api/posts", r#"{"not_title":1}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn get_post_not_found() {
    let resp = app().oneshot(get("/api/posts/missing")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_post_not_found() {
    let resp = app()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/posts/missing")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- full post lifecycle ---

#[tokio::test]
async fn post_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // create
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/api/posts", NEW_POST))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = body_json(resp).await;
    let created: Post = serde_json::from_value(body["postCreated"].clone()).unwrap();
    assert_eq!(created.title, "Intro");
    let id = created.id;

    // soft delete via the excluded flag
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PUT",
            &format!("/api/posts/{id}"),
            r#"{"excluded":true}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    assert_eq!(body["post"]["excluded"], true);
    assert_eq!(body["post"]["title"], "Intro"); // unchanged

    // excluded filter
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get("/api/posts?excluded=true"))
        .await
        .unwrap();
    let body: Value = body_json(resp).await;
    assert_eq!(body["posts"].as_array().unwrap().len(), 1);

    // hard delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(
            Request::builder()
                .method("DELETE")
                .uri(&format!("/api/posts/{id}"))
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());

    // get after delete: 404
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get(&format!("/api/posts/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
