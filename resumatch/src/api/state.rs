use std::sync::Arc;

use crate::analyzer::AnalyzerClient;
use crate::auth::AuthGate;
use crate::config::Config;
use crate::db::RecordStore;
use crate::processing::{IngestionPipeline, TextExtractor};
use crate::storage::ObjectStore;

/// Long-lived client handles, constructed once in `main` and injected into
/// every handler. There is no ambient global lookup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub records: Arc<dyn RecordStore>,
    pub objects: Arc<dyn ObjectStore>,
    pub auth: AuthGate,
    pub pipeline: Arc<IngestionPipeline>,
}

impl AppState {
    pub fn new(
        config: Config,
        records: Arc<dyn RecordStore>,
        objects: Arc<dyn ObjectStore>,
        extractor: Arc<dyn TextExtractor>,
        analyzer: AnalyzerClient,
        auth: AuthGate,
    ) -> Self {
        let config = Arc::new(config);
        let pipeline = Arc::new(IngestionPipeline::new(
            records.clone(),
            objects.clone(),
            extractor,
            analyzer,
            &config.ingest,
        ));

        Self {
            config,
            records,
            objects,
            auth,
            pipeline,
        }
    }
}
