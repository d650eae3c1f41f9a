use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Puppy {
    pub id: Uuid,
    pub name: String,
    pub breed: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub litter_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Deserialize)]
pub struct CreatePuppy {
    pub name: String,
    pub breed: String,
    #[serde(default = "available")]
    pub status: String,
    pub litter_id: Option<Uuid>,
    pub price: Option<f64>,
    pub gender: Option<String>,
    pub color: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdatePuppy {
    pub name: Option<String>,
    pub status: Option<String>,
    pub price: Option<f64>,
}

#[derive(Deserialize)]
pub struct UpdateLitter {
    pub name: Option<String>,
    pub status: Option<String>,
    pub puppy_count: Option<u32>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Litter {
    pub id: Uuid,
    pub name: String,
    pub breed: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dam_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sire_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub puppy_count: Option<u32>,
}

#[derive(Deserialize)]
pub struct CreateLitter {
    pub name: String,
    pub breed: String,
    #[serde(default = "active")]
    pub status: String,
    pub dam_name: Option<String>,
    pub sire_name: Option<String>,
    pub puppy_count: Option<u32>,
}

fn available() -> String {
    "Available".to_string()
}

fn active() -> String {
    "Active".to_string()
}

#[derive(Default)]
pub struct Store {
    pub puppies: HashMap<Uuid, Puppy>,
    pub litters: HashMap<Uuid, Litter>,
}

pub type Db = Arc<RwLock<Store>>;

type ApiError = (StatusCode, Json<Value>);

fn puppy_not_found() -> ApiError {
    (StatusCode::NOT_FOUND, Json(json!({ "message": "Puppy not found" })))
}

fn litter_not_found() -> ApiError {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Litter not found" })))
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/health", get(health))
        .route("/puppies", get(list_puppies).post(create_puppy))
        .route(
            "/puppies/{id}",
            get(get_puppy).put(update_puppy).patch(update_puppy).delete(delete_puppy),
        )
        .route("/litters", get(list_litters).post(create_litter))
        .route("/litters/{id}", get(get_litter).put(update_litter).delete(delete_litter))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn health() -> &'static str {
    "ok"
}

async fn list_puppies(State(db): State<Db>) -> Json<Value> {
    let store = db.read().await;
    let puppies: Vec<&Puppy> = store.puppies.values().collect();
    Json(json!({ "data": puppies }))
}

async fn create_puppy(
    State(db): State<Db>,
    Json(input): Json<CreatePuppy>,
) -> Result<(StatusCode, Json<Puppy>), ApiError> {
    if input.name.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, Json(json!({ "error": "name is required" }))));
    }
    let puppy = Puppy {
        id: Uuid::new_v4(),
        name: input.name,
        breed: input.breed,
        status: input.status,
        litter_id: input.litter_id,
        price: input.price,
        gender: input.gender,
        color: input.color,
    };
    tracing::info!(id = %puppy.id, "puppy created");
    db.write().await.puppies.insert(puppy.id, puppy.clone());
    Ok((StatusCode::CREATED, Json(puppy)))
}

async fn get_puppy(State(db): State<Db>, Path(id): Path<Uuid>) -> Result<Json<Puppy>, ApiError> {
    let store = db.read().await;
    store.puppies.get(&id).cloned().map(Json).ok_or_else(puppy_not_found)
}

async fn update_puppy(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdatePuppy>,
) -> Result<Json<Puppy>, ApiError> {
    let mut store = db.write().await;
    let puppy = store.puppies.get_mut(&id).ok_or_else(puppy_not_found)?;
    if let Some(name) = input.name {
        puppy.name = name;
    }
    if let Some(status) = input.status {
        puppy.status = status;
    }
    if let Some(price) = input.price {
        puppy.price = Some(price);
    }
    Ok(Json(puppy.clone()))
}

async fn delete_puppy(State(db): State<Db>, Path(id): Path<Uuid>) -> Result<StatusCode, ApiError> {
    let mut store = db.write().await;
    store
        .puppies
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(puppy_not_found)
}

async fn list_litters(State(db): State<Db>) -> Json<Vec<Litter>> {
    let store = db.read().await;
    Json(store.litters.values().cloned().collect())
}

async fn create_litter(
    State(db): State<Db>,
    Json(input): Json<CreateLitter>,
) -> (StatusCode, Json<Litter>) {
    let litter = Litter {
        id: Uuid::new_v4(),
        name: input.name,
        breed: input.breed,
        status: input.status,
        dam_name: input.dam_name,
        sire_name: input.sire_name,
        puppy_count: input.puppy_count,
    };
    db.write().await.litters.insert(litter.id, litter.clone());
    (StatusCode::CREATED, Json(litter))
}

async fn get_litter(State(db): State<Db>, Path(id): Path<Uuid>) -> Result<Json<Litter>, ApiError> {
    let store = db.read().await;
    store.litters.get(&id).cloned().map(Json).ok_or_else(litter_not_found)
}

async fn update_litter(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateLitter>,
) -> Result<Json<Litter>, ApiError> {
    let mut store = db.write().await;
    let litter = store.litters.get_mut(&id).ok_or_else(litter_not_found)?;
    if let Some(name) = input.name {
        litter.name = name;
    }
    if let Some(status) = input.status {
        litter.status = status;
    }
    if let Some(count) = input.puppy_count {
        litter.puppy_count = Some(count);
    }
    Ok(Json(litter.clone()))
}

async fn delete_litter(State(db): State<Db>, Path(id): Path<Uuid>) -> Result<StatusCode, ApiError> {
    let mut store = db.write().await;
    store
        .litters
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(litter_not_found)
}
