//! In-process stand-in for the finance tracker server.
//!
//! It keeps records as raw JSON, checks the `X-User-ID` header, and can be
//! told to fail the next request.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use serde_json::{Value, json};

pub const PASSWORD: &str = "secret";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Collection {
    Transactions,
    Categories,
    Goals,
}

impl Collection {
    fn label(self) -> &'static str {
        match self {
            Self::Transactions => "Transaction",
            Self::Categories => "Category",
            Self::Goals => "Goal",
        }
    }
}

#[derive(Clone, Debug)]
pub enum Failure {
    /// `{"error": message}` with the given status.
    Json(StatusCode, String),
    /// A body that is not JSON at all.
    Plain(StatusCode, String),
}

#[derive(Debug, Default)]
pub struct Remote {
    pub transactions: Vec<Value>,
    pub categories: Vec<Value>,
    pub goals: Vec<Value>,
    pub next_id: i64,
    pub fail_next: Option<Failure>,
    /// `GET /api/data` never answers while set.
    pub stall: bool,
    /// `X-User-ID` header of every request received.
    pub seen_users: Vec<Option<String>>,
}

impl Remote {
    fn items(&mut self, collection: Collection) -> &mut Vec<Value> {
        match collection {
            Collection::Transactions => &mut self.transactions,
            Collection::Categories => &mut self.categories,
            Collection::Goals => &mut self.goals,
        }
    }
}

pub type Shared = Arc<Mutex<Remote>>;

/// Data of user 1 as the server would return it.
pub fn seeded() -> Remote {
    Remote {
        transactions: vec![
            json!({"id": 1, "type": "Income", "category_id": "1-c5", "category_name": "Salary",
                   "category_color": "#9966FF", "amount": 1000.0, "date": "2024-01-05", "user_id": 1}),
            json!({"id": 2, "type": "Expense", "category_id": "1-c1", "category_name": "Food",
                   "category_color": "#FF6384", "amount": 300.0, "date": "2024-01-10", "user_id": 1}),
            json!({"id": 3, "type": "Expense", "category_id": "1-c1", "category_name": "Food",
                   "category_color": "#FF6384", "amount": 200.0, "date": "2024-02-01", "user_id": 1}),
            json!({"id": 4, "type": "Income", "category_id": "1-c5", "category_name": "Salary",
                   "category_color": "#9966FF", "amount": 500.0, "date": "2024-02-15", "user_id": 1}),
        ],
        categories: vec![
            json!({"id": "1-c1", "name": "Food", "color": "#FF6384", "user_id": 1}),
            json!({"id": "1-c2", "name": "Transportation", "color": "#36A2EB", "user_id": 1}),
            json!({"id": "1-c5", "name": "Salary", "color": "#9966FF", "user_id": 1}),
        ],
        goals: vec![json!({"id": 1, "name": "Holiday", "target_amount": 2000.0,
                           "current_savings": 500.0, "deadline": "", "user_id": 1})],
        next_id: 100,
        ..Default::default()
    }
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

fn id_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Records the caller, then either injects the pending failure or resolves
/// the user id from the header.
fn guard(remote: &mut Remote, headers: &HeaderMap) -> Result<i64, Response> {
    let user = headers
        .get("x-user-id")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    remote.seen_users.push(user.clone());

    if let Some(failure) = remote.fail_next.take() {
        return Err(match failure {
            Failure::Json(status, message) => error(status, &message),
            Failure::Plain(status, body) => (status, body).into_response(),
        });
    }

    user.and_then(|user| user.parse().ok())
        .ok_or_else(|| error(StatusCode::UNAUTHORIZED, "Not authenticated"))
}

fn category_exists(remote: &Remote, body: &Value) -> bool {
    remote
        .categories
        .iter()
        .any(|category| category["id"] == body["category_id"])
}

async fn data(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let stall = state.lock().unwrap().stall;
    if stall {
        std::future::pending::<()>().await;
    }

    let mut remote = state.lock().unwrap();
    if let Err(res) = guard(&mut remote, &headers) {
        return res;
    }
    Json(json!({
        "transactions": remote.transactions,
        "categories": remote.categories,
        "goals": remote.goals,
    }))
    .into_response()
}

async fn create(
    state: Shared,
    headers: HeaderMap,
    mut body: Value,
    collection: Collection,
) -> Response {
    let mut remote = state.lock().unwrap();
    let user = match guard(&mut remote, &headers) {
        Ok(user) => user,
        Err(res) => return res,
    };

    match collection {
        Collection::Transactions if !category_exists(&remote, &body) => {
            return error(StatusCode::NOT_FOUND, "Category not found");
        }
        Collection::Categories => {
            body["id"] = json!(format!("{user}-{}", id_text(&body["id"])));
        }
        _ => {
            remote.next_id += 1;
            body["id"] = json!(remote.next_id);
        }
    }
    body["user_id"] = json!(user);

    remote.items(collection).push(body.clone());
    (StatusCode::CREATED, Json(body)).into_response()
}

async fn update(
    state: Shared,
    headers: HeaderMap,
    id: String,
    body: Value,
    collection: Collection,
) -> Response {
    let mut remote = state.lock().unwrap();
    if let Err(res) = guard(&mut remote, &headers) {
        return res;
    }
    if collection == Collection::Transactions && !category_exists(&remote, &body) {
        return error(StatusCode::NOT_FOUND, "Category not found");
    }

    let Some(record) = remote
        .items(collection)
        .iter_mut()
        .find(|record| id_text(&record["id"]) == id)
    else {
        return error(
            StatusCode::NOT_FOUND,
            &format!("{} not found", collection.label()),
        );
    };

    if let (Some(record), Some(fields)) = (record.as_object_mut(), body.as_object()) {
        for (key, value) in fields {
            if key != "id" {
                record.insert(key.clone(), value.clone());
            }
        }
    }
    Json(record.clone()).into_response()
}

async fn delete(state: Shared, headers: HeaderMap, id: String, collection: Collection) -> Response {
    let mut remote = state.lock().unwrap();
    if let Err(res) = guard(&mut remote, &headers) {
        return res;
    }

    let items = remote.items(collection);
    let before = items.len();
    items.retain(|record| id_text(&record["id"]) != id);
    if items.len() == before {
        return error(
            StatusCode::NOT_FOUND,
            &format!("{} not found", collection.label()),
        );
    }
    Json(json!({ "message": format!("{} deleted", collection.label()) })).into_response()
}

async fn login(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut remote = state.lock().unwrap();
    remote.seen_users.push(None);
    if body["password"] != PASSWORD {
        return error(StatusCode::UNAUTHORIZED, "Invalid username or password");
    }
    Json(json!({
        "message": "Login successful",
        "userId": 1,
        "username": body["username"],
    }))
    .into_response()
}

async fn register(Json(body): Json<Value>) -> Response {
    if body["username"] == "taken" {
        return error(StatusCode::CONFLICT, "Username already exists");
    }
    (
        StatusCode::CREATED,
        Json(json!({ "message": "User registered successfully", "userId": 2 })),
    )
        .into_response()
}

fn collection_routes(router: Router<Shared>, path: &str, collection: Collection) -> Router<Shared> {
    router
        .route(
            path,
            post(
                move |State(state): State<Shared>, headers: HeaderMap, Json(body): Json<Value>| {
                    create(state, headers, body, collection)
                },
            ),
        )
        .route(
            &format!("{path}/{{id}}"),
            put(
                move |State(state): State<Shared>,
                      headers: HeaderMap,
                      Path(id): Path<String>,
                      Json(body): Json<Value>| {
                    update(state, headers, id, body, collection)
                },
            )
            .delete(
                move |State(state): State<Shared>, headers: HeaderMap, Path(id): Path<String>| {
                    delete(state, headers, id, collection)
                },
            ),
        )
}

fn router(state: Shared) -> Router {
    let router = Router::new()
        .route("/api/data", get(data))
        .route("/login", post(login))
        .route("/register", post(register));
    let router = collection_routes(router, "/api/transactions", Collection::Transactions);
    let router = collection_routes(router, "/api/categories", Collection::Categories);
    let router = collection_routes(router, "/api/goals", Collection::Goals);
    router.with_state(state)
}

/// Serves `remote` on an ephemeral port and returns its base URL.
pub async fn spawn(remote: Remote) -> (String, Shared) {
    let state = Arc::new(Mutex::new(remote));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = router(state.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), state)
}
