use std::sync::Arc;

use axum::{
    extract::{Path, Query, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::Response,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub position: String,
    pub department: String,
    pub email: String,
}

impl Employee {
    /// Case-insensitive substring match over every field, like json-server's `q`.
    fn matches(&self, needle: &str) -> bool {
        [&self.id, &self.name, &self.position, &self.department, &self.email]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

#[derive(Deserialize)]
pub struct EmployeeInput {
    pub name: String,
    pub position: String,
    pub department: String,
    pub email: String,
}

impl EmployeeInput {
    fn into_employee(self, id: String) -> Employee {
        Employee {
            id,
            name: self.name,
            position: self.position,
            department: self.department,
            email: self.email,
        }
    }
}

#[derive(Deserialize)]
pub struct ListParams {
    pub q: Option<String>,
}

/// Insertion-ordered collection; list responses preserve it.
pub type Db = Arc<RwLock<Vec<Employee>>>;

pub fn app() -> Router {
    app_with_db(Db::default())
}

pub fn app_with_db(db: Db) -> Router {
    Router::new()
        .route("/employees", get(list_employees).post(create_employee))
        .route(
            "/employees/{id}",
            get(get_employee).put(update_employee).delete(delete_employee),
        )
        .with_state(db)
}

/// Same routes behind a bearer-token guard that answers 401.
pub fn app_with_token(token: &str) -> Router {
    let token: Arc<str> = Arc::from(token);
    app().layer(middleware::from_fn_with_state(token, require_token))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    serve(listener, app()).await
}

pub async fn serve(listener: TcpListener, router: Router) -> Result<(), std::io::Error> {
    axum::serve(listener, router).await
}

async fn require_token(
    State(token): State<Arc<str>>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let expected = format!("Bearer {token}");
    let supplied = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());
    match supplied {
        Some(value) if value == expected => Ok(next.run(request).await),
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}

async fn list_employees(
    State(db): State<Db>,
    Query(params): Query<ListParams>,
) -> Json<Vec<Employee>> {
    let employees = db.read().await;
    let found = match params.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
        Some(q) => {
            let needle = q.to_lowercase();
            employees.iter().filter(|e| e.matches(&needle)).cloned().collect()
        }
        None => employees.clone(),
    };
    Json(found)
}

async fn create_employee(
    State(db): State<Db>,
    Json(input): Json<EmployeeInput>,
) -> (StatusCode, Json<Employee>) {
    let employee = input.into_employee(Uuid::new_v4().to_string());
    tracing::info!(id = %employee.id, "employee created");
    db.write().await.push(employee.clone());
    (StatusCode::CREATED, Json(employee))
}

async fn get_employee(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<Employee>, StatusCode> {
    let employees = db.read().await;
    employees
        .iter()
        .find(|e| e.id == id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn update_employee(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<EmployeeInput>,
) -> Result<Json<Employee>, StatusCode> {
    let mut employees = db.write().await;
    let slot = employees
        .iter_mut()
        .find(|e| e.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    *slot = input.into_employee(id);
    tracing::info!(id = %slot.id, "employee replaced");
    Ok(Json(slot.clone()))
}

async fn delete_employee(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<Employee>, StatusCode> {
    let mut employees = db.write().await;
    let index = employees
        .iter()
        .position(|e| e.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    let removed = employees.remove(index);
    tracing::info!(id = %removed.id, "employee deleted");
    Ok(Json(removed))
}
