use fishcat_store::ports::{ProjectStore, RegistryStore, SampleStore};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<dyn RegistryStore>,
    pub projects: Arc<dyn ProjectStore>,
    pub samples: Arc<dyn SampleStore>,
}

impl AppState {
    pub fn new(
        registry: Arc<dyn RegistryStore>,
        projects: Arc<dyn ProjectStore>,
        samples: Arc<dyn SampleStore>,
    ) -> Self {
        Self {
            registry,
            projects,
            samples,
        }
    }
}
