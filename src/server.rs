use crate::config::Config;
use crate::error::SegmentError;
use crate::segmentation::Segmenter;
use crate::storage::RequestStorage;
use axum::{
    extract::{DefaultBodyLimit, State},
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub segmenter: Arc<Segmenter>,
    pub config: Arc<Config>,
}

/// Incoming drawing payload, a data-URL-style string ("<meta>,<base64>")
#[derive(Deserialize)]
pub struct PredictRequest {
    pub image: String,
}

/// Acknowledgement returned once the image is stored and segmented
#[derive(Serialize)]
pub struct PredictResponse {
    pub message: String,
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Run the HTTP server
pub async fn run(config: Config) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let max_body_size = config.max_body_size;
    let segmenter = Segmenter::new().clear_existing(config.clear_output);

    let state = AppState {
        segmenter: Arc::new(segmenter),
        config: Arc::new(config),
    };

    let app = Router::new()
        .route("/predict", post(handle_predict))
        .route("/health", get(handle_health))
        .layer(DefaultBodyLimit::max(max_body_size))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Handle drawing submissions: decode, persist, segment
async fn handle_predict(
    State(state): State<AppState>,
    Json(payload): Json<PredictRequest>,
) -> Result<Json<PredictResponse>, SegmentError> {
    let start = Instant::now();

    let image_bytes = decode_data_url(&payload.image)?;

    // Each request gets its own directory so concurrent submissions
    // never race on a shared input path or output directory.
    let storage = RequestStorage::create(&state.config.data_dir)?;
    let input_path = storage.write_input(&image_bytes)?;

    let tiles = state
        .segmenter
        .segment(&input_path, &storage.symbols_dir())?;

    tracing::info!(
        "Segmented {} symbols in {}ms ({})",
        tiles.len(),
        start.elapsed().as_millis(),
        storage.root().display()
    );

    Ok(Json(PredictResponse {
        message: "Image received successfully.".to_string(),
    }))
}

/// Handle health check requests
async fn handle_health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Decode a data-URL-style payload: everything after the first comma is
/// standard base64.
fn decode_data_url(payload: &str) -> Result<Vec<u8>, SegmentError> {
    let (_, encoded) = payload
        .split_once(',')
        .ok_or_else(|| SegmentError::Decode("missing ',' separator in data URL".to_string()))?;

    STANDARD
        .decode(encoded)
        .map_err(|e| SegmentError::Decode(format!("invalid base64 payload: {}", e)))
}
