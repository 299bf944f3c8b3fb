//! Calculations API server.

pub mod error;
pub mod storage;

use std::sync::Arc;

use anyhow::Result;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::get,
};
use tracing::info;

use crate::api::{CALCULATIONS_PATH, CalculationRecord, NewCalculation};
use error::ApiResult;
use storage::{CalculationStore, SqliteStore};

pub struct AppState {
    pub store: Arc<dyn CalculationStore>,
}

async fn list_calculations(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<CalculationRecord>>> {
    let records = state.store.get_calculations().await?;
    Ok(Json(records))
}

async fn create_calculation(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewCalculation>,
) -> ApiResult<(StatusCode, Json<CalculationRecord>)> {
    let valid = payload.validate()?;
    let record = state.store.create_calculation(&valid).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub fn app_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            CALCULATIONS_PATH,
            get(list_calculations).post(create_calculation),
        )
        .with_state(state)
}

pub async fn run(port: u16, database_url: &str) -> Result<()> {
    let store = SqliteStore::connect(database_url).await?;
    let state = Arc::new(AppState {
        store: Arc::new(store),
    });
    let app = app_router(state);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port)).await?;
    info!("Calculations API listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
