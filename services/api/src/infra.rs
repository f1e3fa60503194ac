use ecoscore::catalog::Catalog;
use ecoscore::config::DataConfig;
use ecoscore::error::AppError;
use ecoscore::pricing::{load_predictor, PricePredictor};
use ecoscore::reference::{ReferenceSnapshot, ReferenceSource, SnapshotStore, SnapshotSummary};
use ecoscore::scoring::{ScoringConfig, ScoringEngine};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Reference tables and the catalog scored against them, published as one
/// value so readers never pair new tables with stale catalog scores.
#[derive(Debug)]
pub(crate) struct Published {
    pub(crate) snapshot: Arc<ReferenceSnapshot>,
    pub(crate) catalog: Arc<Catalog>,
}

/// Everything the scoring routes read: the published tables and catalog,
/// and the price predictor.
#[derive(Debug)]
pub(crate) struct ScoringServices {
    source: ReferenceSource,
    config: ScoringConfig,
    published: SnapshotStore<Published>,
    predictor: Arc<dyn PricePredictor>,
    reload_guard: Mutex<()>,
}

impl ScoringServices {
    pub(crate) fn new(
        source: ReferenceSource,
        snapshot: ReferenceSnapshot,
        config: ScoringConfig,
        catalog: Catalog,
        predictor: Arc<dyn PricePredictor>,
    ) -> Self {
        Self {
            source,
            config,
            published: SnapshotStore::new(Published {
                snapshot: Arc::new(snapshot),
                catalog: Arc::new(catalog),
            }),
            predictor,
            reload_guard: Mutex::new(()),
        }
    }

    /// Loads reference tables, scores the sample catalog and resolves the
    /// price predictor from `data`.
    pub(crate) fn load(data: &DataConfig, config: ScoringConfig) -> Result<Self, AppError> {
        let snapshot = data.reference.load()?;
        let engine = ScoringEngine::new(Arc::new(snapshot.clone()), config.clone());
        let catalog = Catalog::load(data.products_csv.as_deref(), &engine)?;
        let predictor = load_predictor(data.price_model.as_deref());

        Ok(Self::new(
            data.reference.clone(),
            snapshot,
            config,
            catalog,
            predictor,
        ))
    }

    /// Engine bound to the snapshot published at call time.
    pub(crate) fn engine(&self) -> ScoringEngine {
        ScoringEngine::new(self.snapshot(), self.config.clone())
    }

    /// Tables and catalog from the same publication.
    pub(crate) fn published(&self) -> Arc<Published> {
        self.published.current()
    }

    pub(crate) fn snapshot(&self) -> Arc<ReferenceSnapshot> {
        self.published().snapshot.clone()
    }

    pub(crate) fn catalog(&self) -> Arc<Catalog> {
        self.published().catalog.clone()
    }

    pub(crate) fn predictor(&self) -> &dyn PricePredictor {
        self.predictor.as_ref()
    }

    pub(crate) fn reference_source(&self) -> &ReferenceSource {
        &self.source
    }

    /// Re-reads the configured reference source, rescores the catalog and
    /// publishes both. On failure the current snapshot stays in place.
    pub(crate) fn reload(&self) -> Result<SnapshotSummary, AppError> {
        let _serialized = self
            .reload_guard
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let snapshot = Arc::new(self.source.load()?);
        let engine = ScoringEngine::new(snapshot.clone(), self.config.clone());
        let catalog = Arc::new(self.catalog().rescore(&engine));
        let summary = snapshot.summary();

        self.published.replace(Published { snapshot, catalog });

        info!(
            source = ?self.source,
            loaded_at = %summary.loaded_at,
            "reference data reloaded"
        );
        Ok(summary)
    }
}

/// Bundled tables and sample catalog with the fallback predictor.
#[cfg(test)]
pub(crate) fn bundled_services() -> Arc<ScoringServices> {
    bundled_services_with(load_predictor(None))
}

#[cfg(test)]
pub(crate) fn bundled_services_with(predictor: Arc<dyn PricePredictor>) -> Arc<ScoringServices> {
    let snapshot = ReferenceSnapshot::bundled().expect("bundled tables");
    let config = ScoringConfig::default();
    let engine = ScoringEngine::new(Arc::new(snapshot.clone()), config.clone());
    let catalog = Catalog::bundled(&engine).expect("bundled catalog");
    Arc::new(ScoringServices::new(
        ReferenceSource::Bundled,
        snapshot,
        config,
        catalog,
        predictor,
    ))
}
