//! HTTP handlers for REST API endpoints

use axum::{extract::State, routing::get, Json, Router};
use costwise_engine::{RecommendationEngine, Summary};
use costwise_store::{NewResource, Resource, ResourceStore, Result as StorageResult};
use std::sync::{Arc, Mutex};
use tracing::{error, info};

use crate::config::ServerConfig;
use crate::error::{ApiError, ApiResult};
use crate::responses::{
    HealthResponse, RecommendationResponse, ResourceResponse, RootResponse, SummaryResponse,
};

/// State shared across all handlers
///
/// The store sits behind a `Mutex` because `rusqlite::Connection` is not
/// `Sync`. The lock is held only for the duration of one store call.
#[derive(Clone)]
pub struct AppState {
    /// Injected resource store
    pub store: Arc<Mutex<Box<dyn ResourceStore>>>,

    /// Rule set used for recommendations
    pub engine: Arc<RecommendationEngine>,

    /// Immutable server configuration
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Create state around a store, using the default rule set
    pub fn new<S>(store: S, config: ServerConfig) -> Self
    where
        S: ResourceStore + 'static,
    {
        let store: Box<dyn ResourceStore> = Box::new(store);
        Self {
            store: Arc::new(Mutex::new(store)),
            engine: Arc::new(RecommendationEngine::default()),
            config: Arc::new(config),
        }
    }

    /// Run `f` against the locked store
    pub fn with_store<T, F>(&self, f: F) -> ApiResult<T>
    where
        F: FnOnce(&mut dyn ResourceStore) -> StorageResult<T>,
    {
        let mut store = self
            .store
            .lock()
            .map_err(|_| ApiError::internal("Resource store lock poisoned"))?;
        f(&mut **store).map_err(ApiError::from)
    }

    fn read_resources(&self) -> ApiResult<Vec<Resource>> {
        self.with_store(|store| store.list_resources())
    }
}

/// GET / - Service banner
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse::default())
}

/// GET /health - Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}

/// GET /resources - All resources in insertion order
pub async fn list_resources(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<ResourceResponse>>> {
    let resources = state.read_resources().map_err(|e| {
        error!("Error fetching resources: {}", e.message);
        e
    })?;

    info!("Returning {} resources", resources.len());
    Ok(Json(resources.into_iter().map(ResourceResponse::from).collect()))
}

/// POST /resources - Insert one resource
pub async fn create_resource(
    State(state): State<AppState>,
    Json(payload): Json<NewResource>,
) -> ApiResult<Json<ResourceResponse>> {
    let resource = state
        .with_store(|store| store.insert_resource(&payload))
        .map_err(|e| {
            error!("Error creating resource '{}': {}", payload.name, e.message);
            e
        })?;

    info!("Created resource {} ({})", resource.id, resource.name);
    Ok(Json(resource.into()))
}

/// GET /recommendations - Recommendations for the current inventory
pub async fn list_recommendations(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<RecommendationResponse>>> {
    let resources = state.read_resources().map_err(|e| {
        error!("Error generating recommendations: {}", e.message);
        e
    })?;

    let recommendations = state.engine.generate(&resources);

    info!("Returning {} recommendations", recommendations.len());
    Ok(Json(
        recommendations
            .into_iter()
            .map(RecommendationResponse::from)
            .collect(),
    ))
}

/// GET /summary - Inventory totals and savings potential
pub async fn summary(State(state): State<AppState>) -> ApiResult<Json<SummaryResponse>> {
    let resources = state.read_resources().map_err(|e| {
        error!("Error generating summary: {}", e.message);
        e
    })?;

    let recommendations = state.engine.generate(&resources);
    let summary = Summary::compute(&resources, &recommendations);

    info!(
        "Summary: {} resources, ${} cost, ${} savings",
        summary.total_resources, summary.total_monthly_cost, summary.total_potential_savings
    );
    Ok(Json(summary.into()))
}

/// Create router with all API endpoints
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/resources", get(list_resources).post(create_resource))
        .route("/recommendations", get(list_recommendations))
        .route("/summary", get(summary))
}
