use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;

mod config;
mod error;
mod features;
mod model;
mod types;

use error::ApiError;
use model::ModelBank;
use types::{HealthResponse, PredictionRequest, PredictionResponse};

#[derive(Clone)]
struct AppState {
    bank: Arc<ModelBank>,
}

// ---------- Handlers ----------

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::up())
}

async fn predict(
    State(state): State<AppState>,
    Json(request): Json<PredictionRequest>,
) -> Result<Json<PredictionResponse>, ApiError> {
    request.validate()?;

    let frame = features::encode(&request);
    let vec = frame.ordered(config::features_for(request.model_type))?;

    let prediction = state.bank.for_variant(request.model_type).predict(&vec)?;
    tracing::debug!(
        "predicted lap {:.2} for {} at {} ({:?} model)",
        prediction,
        request.driver,
        request.race_name,
        request.model_type
    );

    Ok(Json(PredictionResponse::assemble(prediction, &request)))
}

fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/predict", post(predict))
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    tracing::info!("{} v{}", config::API_TITLE, config::API_VERSION);

    let single_path = std::env::var(config::SINGLE_MODEL_PATH_ENV)
        .unwrap_or_else(|_| config::SINGLE_MODEL_PATH_DEFAULT.to_string());
    let multi_path = std::env::var(config::MULTI_MODEL_PATH_ENV)
        .unwrap_or_else(|_| config::MULTI_MODEL_PATH_DEFAULT.to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);

    // Both models or nothing; a failed load aborts startup.
    let bank = ModelBank::load(&single_path, &multi_path)?;
    let state = AppState {
        bank: Arc::new(bank),
    };

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state)).await?;
    Ok(())
}
