use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Movie {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub description: Option<String>,
    pub poster: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct MovieInput {
    pub name: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub poster: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
}

#[derive(Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
}

#[derive(Deserialize)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Deserialize)]
pub struct Login {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct Register {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionInfo {
    pub token: Uuid,
    pub user: User,
}

/// In-memory state. Ids come from one shared counter; listings are ordered by id.
#[derive(Debug, Default)]
pub struct Store {
    movies: BTreeMap<i64, Movie>,
    users: BTreeMap<i64, User>,
    passwords: HashMap<String, String>,
    next_id: i64,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    pub fn add_movie(&mut self, input: MovieInput) -> Movie {
        let movie = Movie {
            id: self.allocate_id(),
            name: input.name,
            title: input.title,
            description: input.description,
            poster: input.poster,
        };
        self.movies.insert(movie.id, movie.clone());
        movie
    }

    pub fn add_user(&mut self, name: &str, email: &str) -> User {
        let user = User {
            id: self.allocate_id(),
            name: name.to_string(),
            email: email.to_string(),
        };
        self.users.insert(user.id, user.clone());
        user
    }

    /// Creates a user that can also log in.
    pub fn add_account(&mut self, name: &str, email: &str, password: &str) -> User {
        self.passwords.insert(email.to_string(), password.to_string());
        self.add_user(name, email)
    }

    fn user_by_email(&self, email: &str) -> Option<&User> {
        self.users.values().find(|user| user.email == email)
    }
}

pub type Db = Arc<RwLock<Store>>;

type ApiError = (StatusCode, Json<Value>);

fn error(status: StatusCode, message: &str) -> ApiError {
    (status, Json(json!({ "message": message })))
}

pub fn app() -> Router {
    app_with(Store::new())
}

pub fn app_with(store: Store) -> Router {
    let db: Db = Arc::new(RwLock::new(store));
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
        .route("/products", get(list_movies).post(create_movie))
        .route(
            "/products/{id}",
            get(get_movie).put(update_movie).delete(delete_movie),
        )
        .route("/users", get(list_users).post(create_user))
        .route("/users/{id}", get(get_user).put(update_user).delete(delete_user))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, Store::new()).await
}

pub async fn run_with(listener: TcpListener, store: Store) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(store)).await
}

async fn login(State(db): State<Db>, Json(input): Json<Login>) -> Result<Json<SessionInfo>, ApiError> {
    let store = db.read().await;
    let matches = store
        .passwords
        .get(&input.email)
        .is_some_and(|password| *password == input.password);
    let user = store
        .user_by_email(&input.email)
        .filter(|_| matches)
        .cloned()
        .ok_or_else(|| error(StatusCode::UNAUTHORIZED, "Invalid credentials"))?;
    tracing::info!(user = user.id, "login");
    Ok(Json(SessionInfo {
        token: Uuid::new_v4(),
        user,
    }))
}

async fn register(
    State(db): State<Db>,
    Json(input): Json<Register>,
) -> Result<(StatusCode, Json<SessionInfo>), ApiError> {
    if input.name.trim().is_empty() || input.email.trim().is_empty() {
        return Err(error(StatusCode::UNPROCESSABLE_ENTITY, "Name and email are required"));
    }
    let mut store = db.write().await;
    if store.passwords.contains_key(&input.email) || store.user_by_email(&input.email).is_some() {
        return Err(error(StatusCode::CONFLICT, "Email already registered"));
    }
    let user = store.add_account(&input.name, &input.email, &input.password);
    tracing::info!(user = user.id, "registered");
    Ok((
        StatusCode::CREATED,
        Json(SessionInfo {
            token: Uuid::new_v4(),
            user,
        }),
    ))
}

async fn list_movies(State(db): State<Db>) -> Json<Vec<Movie>> {
    let store = db.read().await;
    Json(store.movies.values().cloned().collect())
}

async fn create_movie(
    State(db): State<Db>,
    Json(input): Json<MovieInput>,
) -> (StatusCode, Json<Movie>) {
    let movie = db.write().await.add_movie(input);
    (StatusCode::CREATED, Json(movie))
}

async fn get_movie(State(db): State<Db>, Path(id): Path<i64>) -> Result<Json<Movie>, ApiError> {
    let store = db.read().await;
    store
        .movies
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "Product not found"))
}

async fn update_movie(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<MovieInput>,
) -> Result<Json<Movie>, ApiError> {
    let mut store = db.write().await;
    let movie = store
        .movies
        .get_mut(&id)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "Product not found"))?;
    if input.name.is_some() {
        movie.name = input.name;
    }
    if input.title.is_some() {
        movie.title = input.title;
    }
    if input.description.is_some() {
        movie.description = input.description;
    }
    if input.poster.is_some() {
        movie.poster = input.poster;
    }
    Ok(Json(movie.clone()))
}

async fn delete_movie(State(db): State<Db>, Path(id): Path<i64>) -> Result<StatusCode, ApiError> {
    let mut store = db.write().await;
    store
        .movies
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "Product not found"))
}

async fn list_users(State(db): State<Db>) -> Json<Vec<User>> {
    let store = db.read().await;
    Json(store.users.values().cloned().collect())
}

async fn create_user(
    State(db): State<Db>,
    Json(input): Json<CreateUser>,
) -> (StatusCode, Json<User>) {
    let user = db.write().await.add_user(&input.name, &input.email);
    (StatusCode::CREATED, Json(user))
}

async fn get_user(State(db): State<Db>, Path(id): Path<i64>) -> Result<Json<User>, ApiError> {
    let store = db.read().await;
    store
        .users
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "User not found"))
}

async fn update_user(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateUser>,
) -> Result<Json<User>, ApiError> {
    let mut store = db.write().await;
    let user = store
        .users
        .get_mut(&id)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "User not found"))?;
    if let Some(name) = input.name {
        user.name = name;
    }
    if let Some(email) = input.email {
        user.email = email;
    }
    Ok(Json(user.clone()))
}

async fn delete_user(State(db): State<Db>, Path(id): Path<i64>) -> Result<StatusCode, ApiError> {
    let mut store = db.write().await;
    store
        .users
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "User not found"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movie_serializes_null_poster() {
        let movie = Movie {
            id: 1,
            name: Some("Dune".to_string()),
            title: None,
            description: Some("...".to_string()),
            poster: None,
        };
        let json = serde_json::to_value(&movie).unwrap();
        assert_eq!(json, json!({"id": 1, "name": "Dune", "description": "...", "poster": null}));
    }

    #[test]
    fn ids_are_shared_and_increasing() {
        let mut store = Store::new();
        let movie = store.add_movie(MovieInput {
            name: Some("Dune".into()),
            ..MovieInput::default()
        });
        let user = store.add_user("Ada", "ada@example.com");
        assert_eq!(movie.id, 1);
        assert_eq!(user.id, 2);
    }

    #[test]
    fn account_is_findable_by_email() {
        let mut store = Store::new();
        store.add_account("Ada", "ada@example.com", "secret1");
        assert_eq!(store.user_by_email("ada@example.com").map(|u| u.id), Some(1));
        assert_eq!(store.passwords.get("ada@example.com").map(String::as_str), Some("secret1"));
    }

    #[tokio::test]
    #[tracing_test::traced_test]
    async fn login_logs_user_id_not_email() {
        use axum::body::Body;
        use axum::http::Request;
        use tower::ServiceExt;

        let mut store = Store::new();
        store.add_account("Ada", "ada@example.com", "secret1");
        let request = Request::builder()
            .method("POST")
            .uri("/auth/login")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"email":"ada@example.com","password":"secret1"}"#))
            .unwrap();
        let response = app_with(store).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(logs_contain("login"));
        assert!(logs_contain("user=1"));
        assert!(!logs_contain("ada@example.com"));
    }

    #[test]
    fn create_user_rejects_missing_email() {
        let result: Result<CreateUser, _> = serde_json::from_str(r#"{"name":"Ada"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn update_user_all_fields_optional() {
        let input: UpdateUser = serde_json::from_str("{}").unwrap();
        assert!(input.name.is_none());
        assert!(input.email.is_none());
    }
}
