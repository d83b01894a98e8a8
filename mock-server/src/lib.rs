use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;
use uuid::Uuid;

pub const PROFESSOR_EMAIL: &str = "prof@smartclass.dev";
pub const STUDENT_EMAIL: &str = "aluno@smartclass.dev";
pub const SEED_PASSWORD: &str = "secret123";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "urlImage")]
    pub url_image: String,
    pub posted: bool,
    pub excluded: bool,
}

#[derive(Deserialize)]
pub struct CreatePost {
    pub title: String,
    pub content: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "urlImage", default)]
    pub url_image: String,
    #[serde(default)]
    pub posted: bool,
    #[serde(default)]
    pub excluded: bool,
}

#[derive(Deserialize)]
pub struct UpdatePost {
    pub title: Option<String>,
    pub content: Option<String>,
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
    #[serde(rename = "urlImage")]
    pub url_image: Option<String>,
    pub posted: Option<bool>,
    pub excluded: Option<bool>,
}

/// Stored account. The password is accepted on input but never serialized.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub email: String,
    #[serde(default, skip_serializing)]
    pub password: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matter: Option<String>,
    #[serde(rename = "isActive", default = "active")]
    pub is_active: bool,
}

fn active() -> bool {
    true
}

#[derive(Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub username: Option<String>,
    pub email: String,
    pub password: String,
    pub role: String,
    pub matter: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
    pub matter: Option<String>,
    #[serde(rename = "isActive")]
    pub is_active: Option<bool>,
}

#[derive(Deserialize)]
pub struct LoginQuery {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Deserialize)]
pub struct PostFilter {
    pub excluded: Option<String>,
}

#[derive(Deserialize)]
pub struct UserFilter {
    #[serde(rename = "isActive")]
    pub is_active: Option<String>,
}

#[derive(Clone, Default)]
pub struct Db {
    pub users: Arc<RwLock<BTreeMap<String, User>>>,
    pub posts: Arc<RwLock<BTreeMap<String, Post>>>,
}

impl Db {
    /// One instructor and one student, both with `SEED_PASSWORD`.
    pub fn seeded() -> Self {
        let users = [
            User {
                id: "1".to_string(),
                name: "Prof. Joao Silva".to_string(),
                username: Some("joao".to_string()),
                email: PROFESSOR_EMAIL.to_string(),
                password: SEED_PASSWORD.to_string(),
                role: "professor".to_string(),
                matter: Some("UX/UI".to_string()),
                is_active: true,
            },
            User {
                id: "2".to_string(),
                name: "Maria Santos".to_string(),
                username: None,
                email: STUDENT_EMAIL.to_string(),
                password: SEED_PASSWORD.to_string(),
                role: "aluno".to_string(),
                matter: None,
                is_active: true,
            },
        ];
        let users = users.into_iter().map(|u| (u.id.clone(), u)).collect();
        Db {
            users: Arc::new(RwLock::new(users)),
            posts: Arc::default(),
        }
    }
}

/// Router over the seeded data set.
pub fn app() -> Router {
    router(Db::seeded())
}

pub fn router(db: Db) -> Router {
    Router::new()
        .route("/api/users/login", get(login))
        .route("/api/users", get(list_users).post(create_user))
        .route(
            "/api/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/api/posts", get(list_posts).post(create_post))
        .route(
            "/api/posts/{id}",
            get(get_post).put(update_post).delete(delete_post),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock SmartClass backend listening");
    }
    axum::serve(listener, app()).await
}

// --- users ---

/// Matches by email and password. An empty array means no match.
async fn login(State(db): State<Db>, Query(query): Query<LoginQuery>) -> Json<Vec<User>> {
    let users = db.users.read().await;
    let found = users
        .values()
        .filter(|u| u.is_active)
        .filter(|u| Some(&u.email) == query.email.as_ref())
        .filter(|u| Some(&u.password) == query.password.as_ref())
        .cloned()
        .collect();
    Json(found)
}

async fn list_users(State(db): State<Db>, Query(filter): Query<UserFilter>) -> Json<Vec<User>> {
    let active_only = filter.is_active.as_deref() == Some("true");
    let users = db.users.read().await;
    Json(
        users
            .values()
            .filter(|u| !active_only || u.is_active)
            .cloned()
            .collect(),
    )
}

/// Always an array: one element when found, empty otherwise.
async fn get_user(State(db): State<Db>, Path(id): Path<String>) -> Json<Vec<User>> {
    let users = db.users.read().await;
    Json(users.get(&id).cloned().into_iter().collect())
}

async fn create_user(
    State(db): State<Db>,
    Json(input): Json<CreateUser>,
) -> (StatusCode, Json<Value>) {
    let user = User {
        id: Uuid::new_v4().to_string(),
        name: input.name,
        username: input.username,
        email: input.email,
        password: input.password,
        role: input.role,
        matter: input.matter,
        is_active: true,
    };
    db.users.write().await.insert(user.id.clone(), user.clone());
    (StatusCode::CREATED, Json(json!({ "userCreated": user })))
}

async fn update_user(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<UpdateUser>,
) -> Result<Json<Value>, StatusCode> {
    let mut users = db.users.write().await;
    let user = users.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    if let Some(name) = input.name {
        user.name = name;
    }
    if let Some(username) = input.username {
        user.username = Some(username);
    }
    if let Some(email) = input.email {
        user.email = email;
    }
    if let Some(password) = input.password {
        user.password = password;
    }
    if let Some(role) = input.role {
        user.role = role;
    }
    if let Some(matter) = input.matter {
        user.matter = Some(matter);
    }
    if let Some(is_active) = input.is_active {
        user.is_active = is_active;
    }
    Ok(Json(json!({ "user": user })))
}

async fn delete_user(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<StatusCode, StatusCode> {
    let mut users = db.users.write().await;
    users
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(StatusCode::NOT_FOUND)
}

// --- posts ---

async fn list_posts(State(db): State<Db>, Query(filter): Query<PostFilter>) -> Json<Value> {
    let excluded_only = filter.excluded.as_deref() == Some("true");
    let posts = db.posts.read().await;
    let posts: Vec<Post> = posts
        .values()
        .filter(|p| !excluded_only || p.excluded)
        .cloned()
        .collect();
    Json(json!({ "posts": posts }))
}

async fn get_post(State(db): State<Db>, Path(id): Path<String>) -> Result<Json<Post>, StatusCode> {
    let posts = db.posts.read().await;
    posts.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn create_post(
    State(db): State<Db>,
    Json(input): Json<CreatePost>,
) -> (StatusCode, Json<Value>) {
    let post = Post {
        id: Uuid::new_v4().to_string(),
        title: input.title,
        content: input.content,
        user_id: input.user_id,
        url_image: input.url_image,
        posted: input.posted,
        excluded: input.excluded,
    };
    db.posts.write().await.insert(post.id.clone(), post.clone());
    (StatusCode::CREATED, Json(json!({ "postCreated": post })))
}

async fn update_post(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<UpdatePost>,
) -> Result<Json<Value>, StatusCode> {
    let mut posts = db.posts.write().await;
    let post = posts.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    if let Some(title) = input.title {
        post.title = title;
    }
    if let Some(content) = input.content {
        post.content = content;
    }
    if let Some(user_id) = input.user_id {
        post.user_id = user_id;
    }
    if let Some(url_image) = input.url_image {
        post.url_image = url_image;
    }
    if let Some(posted) = input.posted {
        post.posted = posted;
    }
    if let Some(excluded) = input.excluded {
        post.excluded = excluded;
    }
    Ok(Json(json!({ "post": post })))
}

async fn delete_post(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<StatusCode, StatusCode> {
    let mut posts = db.posts.write().await;
    posts
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(StatusCode::NOT_FOUND)
}
