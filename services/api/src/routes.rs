use crate::infra::{AppState, ScoringServices};
use crate::report::ScoreReport;
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use ecoscore::catalog::{PageRequest, ProductSummary};
use ecoscore::error::AppError;
use ecoscore::pricing::{PricePrediction, PriceQuery};
use ecoscore::reference::{
    CareReference, CertificationReference, MaterialReference, OriginReference, SnapshotSummary,
};
use ecoscore::scoring::ProductInput;
use serde_json::json;
use std::sync::Arc;
use tracing::warn;

type Services = State<Arc<ScoringServices>>;

/// Scoring, catalog, pricing and reference endpoints plus `/health`.
pub(crate) fn api_router(services: Arc<ScoringServices>) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/api/score", post(score_endpoint))
        .route("/api/predict-price", post(predict_price_endpoint))
        .route("/api/products", get(list_products))
        .route("/api/products/random", get(random_product))
        .route("/api/products/:id", get(get_product))
        .route("/api/categories", get(list_categories))
        .route("/api/reference/materials", get(list_materials))
        .route("/api/reference/origins", get(list_origins))
        .route("/api/reference/care", get(list_care))
        .route("/api/reference/certifications", get(list_certifications))
        .route("/api/reference/summary", get(reference_summary))
        .route("/api/reference/reload", post(reload_reference))
        .with_state(services)
}

pub(crate) fn with_service_routes(services: Arc<ScoringServices>) -> Router {
    api_router(services)
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck(State(services): Services) -> Json<serde_json::Value> {
    let published = services.published();
    let snapshot = &published.snapshot;
    Json(json!({
        "status": "healthy",
        "model_loaded": services.predictor().is_trained(),
        "model_type": services.predictor().model_type(),
        "reference_data_loaded": true,
        "reference_source": services.reference_source(),
        "reference_counts": {
            "materials": snapshot.materials().len(),
            "origins": snapshot.origins().len(),
            "care_instructions": snapshot.care_instructions().len(),
            "certifications": snapshot.certifications().len(),
        },
        "catalog_products": published.catalog.len(),
    }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn score_endpoint(
    State(services): Services,
    Json(product): Json<ProductInput>,
) -> Result<Json<ScoreReport>, AppError> {
    let result = services.engine().score(&product).map_err(|err| {
        warn!(product = %product.product_name, error = %err, "score request rejected");
        err
    })?;
    Ok(Json(ScoreReport::new(&product, &result)))
}

pub(crate) async fn predict_price_endpoint(
    State(services): Services,
    Json(query): Json<PriceQuery>,
) -> Result<Json<PricePrediction>, AppError> {
    Ok(Json(services.predictor().predict(&query)?))
}

pub(crate) async fn list_products(
    State(services): Services,
    Query(request): Query<PageRequest>,
) -> Result<Json<Vec<ProductSummary>>, AppError> {
    Ok(Json(services.catalog().page(&request)?))
}

pub(crate) async fn get_product(
    State(services): Services,
    Path(id): Path<u64>,
) -> Result<Json<ProductSummary>, AppError> {
    services
        .catalog()
        .get(id)
        .map(|product| Json(product.summary()))
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))
}

pub(crate) async fn random_product(State(services): Services) -> Result<Json<ScoreReport>, AppError> {
    let catalog = services.catalog();
    let product = catalog
        .random(&mut rand::thread_rng())
        .ok_or_else(|| AppError::NotFound("catalog product".to_string()))?;
    Ok(Json(ScoreReport::new(product.input(), &product.score)))
}

pub(crate) async fn list_categories(State(services): Services) -> Json<Vec<String>> {
    Json(services.catalog().categories())
}

pub(crate) async fn list_materials(State(services): Services) -> Json<Vec<MaterialReference>> {
    Json(services.snapshot().materials().rows().to_vec())
}

pub(crate) async fn list_origins(State(services): Services) -> Json<Vec<OriginReference>> {
    Json(services.snapshot().origins().rows().to_vec())
}

pub(crate) async fn list_care(State(services): Services) -> Json<Vec<CareReference>> {
    Json(services.snapshot().care_instructions().rows().to_vec())
}

pub(crate) async fn list_certifications(
    State(services): Services,
) -> Json<Vec<CertificationReference>> {
    Json(services.snapshot().certifications().rows().to_vec())
}

pub(crate) async fn reference_summary(State(services): Services) -> Json<SnapshotSummary> {
    Json(services.snapshot().summary())
}

pub(crate) async fn reload_reference(
    State(services): Services,
) -> Result<Json<SnapshotSummary>, AppError> {
    Ok(Json(services.reload()?))
}
