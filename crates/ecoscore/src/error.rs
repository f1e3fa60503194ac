use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::pricing::PricingError;
use crate::reference::ReferenceError;
use crate::scoring::ScoringError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Json(serde_json::Error),
    Reference(ReferenceError),
    Scoring(ScoringError),
    Pricing(PricingError),
    Catalog(CatalogError),
    NotFound(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Scoring(_)
            | AppError::Json(_)
            | AppError::Pricing(PricingError::ScoreOutOfRange(_))
            | AppError::Catalog(CatalogError::InvalidLimit(_)) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Reference(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::Pricing(_)
            | AppError::Catalog(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Json(err) => write!(f, "invalid json: {}", err),
            AppError::Reference(err) => write!(f, "reference data unavailable: {}", err),
            AppError::Scoring(err) => write!(f, "{}", err),
            AppError::Pricing(err) => write!(f, "price prediction failed: {}", err),
            AppError::Catalog(err) => write!(f, "catalog error: {}", err),
            AppError::NotFound(what) => write!(f, "{} not found", what),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Json(err) => Some(err),
            AppError::Reference(err) => Some(err),
            AppError::Scoring(err) => Some(err),
            AppError::Pricing(err) => Some(err),
            AppError::Catalog(err) => Some(err),
            AppError::NotFound(_) => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<ReferenceError> for AppError {
    fn from(value: ReferenceError) -> Self {
        Self::Reference(value)
    }
}

impl From<ScoringError> for AppError {
    fn from(value: ScoringError) -> Self {
        Self::Scoring(value)
    }
}

impl From<PricingError> for AppError {
    fn from(value: PricingError) -> Self {
        Self::Pricing(value)
    }
}

impl From<CatalogError> for AppError {
    fn from(value: CatalogError) -> Self {
        Self::Catalog(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::{TableKind, UnknownReferenceKey};
    use crate::scoring::CompositionError;

    #[test]
    fn caller_mistakes_map_to_bad_request() {
        let unknown = AppError::from(ScoringError::from(UnknownReferenceKey {
            table: TableKind::Origins,
            key: "Atlantis".to_string(),
        }));
        assert_eq!(unknown.status(), StatusCode::BAD_REQUEST);
        assert_eq!(unknown.to_string(), "unknown origin 'Atlantis'");

        let composition = AppError::from(ScoringError::from(CompositionError::Empty));
        assert_eq!(composition.status(), StatusCode::BAD_REQUEST);

        let score = AppError::from(PricingError::ScoreOutOfRange(120.0));
        assert_eq!(score.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn missing_products_and_reference_failures() {
        assert_eq!(
            AppError::NotFound("product 42".to_string()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::from(ReferenceError::EmptyTable(TableKind::Materials)).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
