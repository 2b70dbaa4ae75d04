use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
};
use serde::Serialize;
use serde_json::Value;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use drivvo_rs::{
    ConfigEntry, Credentials, DataKind, DrivvoClient, DrivvoConfig, FuelLogSnapshot, TokioHub,
    VehicleData, VehicleId, setup_entry, unload_entry,
};

const ENTRY_ID: &str = "env";

/// Server configuration
struct ServerConfig {
    port: u16,
    email: String,
    password: String,
    vehicles: Vec<VehicleId>,
}

impl ServerConfig {
    fn from_env() -> Result<Self> {
        Ok(Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            email: env::var("DRIVVO_EMAIL").context("DRIVVO_EMAIL is not set")?,
            password: env::var("DRIVVO_PASSWORD").context("DRIVVO_PASSWORD is not set")?,
            vehicles: env::var("DRIVVO_VEHICLES")
                .unwrap_or_default()
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(VehicleId::from)
                .collect(),
        })
    }
}

/// Application state shared across all requests
#[derive(Clone)]
struct AppState {
    client: Arc<DrivvoClient<TokioHub>>,
    entry: Arc<ConfigEntry>,
}

impl AppState {
    fn credentials(&self) -> Result<Credentials, ApiError> {
        self.entry
            .credentials()
            .map_err(|e| ApiError::InternalError(e.to_string()))
    }

    fn configured_vehicle(&self, id: String) -> Result<VehicleId, ApiError> {
        let vehicle = VehicleId::new(id);
        if self.entry.vehicles().contains(&vehicle) {
            Ok(vehicle)
        } else {
            Err(ApiError::NotFound(format!("Vehicle {} is not configured", vehicle)))
        }
    }

    async fn fetch(&self, id: String, kind: DataKind) -> Result<VehicleData, ApiError> {
        let vehicle = self.configured_vehicle(id)?;
        self.client
            .get_vehicle_data(&self.credentials()?, &vehicle, kind)
            .await
            .ok_or_else(|| ApiError::Upstream(format!("Failed to fetch {} for vehicle {}", kind, vehicle)))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing/logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "server=info,drivvo_rs=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;

    let client = Arc::new(DrivvoClient::with_config(
        Arc::new(TokioHub::new()),
        DrivvoConfig::from_env(),
    ));
    let entry = Arc::new(ConfigEntry::from_parts(
        ENTRY_ID,
        &config.email,
        &config.password,
        &config.vehicles,
    ));

    tracing::info!("Setting up Drivvo entry...");
    setup_entry(client.as_ref(), &entry)
        .await
        .context("Failed to set up Drivvo entry")?;

    let app = build_app(AppState {
        client: client.clone(),
        entry: entry.clone(),
    });

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    unload_entry(client.hub().as_ref(), &entry);
    tracing::info!("Server shut down gracefully");
    Ok(())
}

/// Build the Axum application with routes and middleware
fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/vehicles", get(list_vehicles))
        .route("/api/vehicles/:id", get(vehicle_base))
        .route("/api/vehicles/:id/fuel-log", get(vehicle_fuel_log))
        .route("/api/vehicles/:id/sensors", get(vehicle_sensors))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

/// All vehicles on the account, not only the configured ones
async fn list_vehicles(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let token = state
        .client
        .authenticate(&state.credentials()?, true)
        .await
        .into_token()
        .ok_or_else(|| ApiError::Upstream("Login failed".to_string()))?;

    state
        .client
        .list_vehicles(&token)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::Upstream("Failed to list vehicles".to_string()))
}

async fn vehicle_base(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    match state.fetch(id, DataKind::Base).await? {
        VehicleData::Base(value) => Ok(Json(value)),
        other => Err(ApiError::InternalError(format!("Unexpected {} payload", other.kind()))),
    }
}

async fn vehicle_fuel_log(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let entries = state
        .fetch(id, DataKind::FuelLog)
        .await?
        .into_fuel_log()
        .ok_or_else(|| ApiError::InternalError("Unexpected base payload".to_string()))?;

    serde_json::to_value(entries)
        .map(Json)
        .map_err(|e| ApiError::InternalError(e.to_string()))
}

async fn vehicle_sensors(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FuelLogSnapshot>, ApiError> {
    let entries = state
        .fetch(id, DataKind::FuelLog)
        .await?
        .into_fuel_log()
        .ok_or_else(|| ApiError::InternalError("Unexpected base payload".to_string()))?;

    Ok(Json(FuelLogSnapshot::from_entries(&entries)))
}

/// API error types
enum ApiError {
    NotFound(String),
    Upstream(String),
    InternalError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Upstream(msg) => (StatusCode::BAD_GATEWAY, msg),
            ApiError::InternalError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(serde_json::json!({
            "success": false,
            "error": message
        }));

        (status, body).into_response()
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down gracefully...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down gracefully...");
        }
    }
}
