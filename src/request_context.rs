use std::sync::Arc;

use crate::job::JobStore;
use crate::property::PropertySource;

/// Dependencies handed to every resolver for a single GraphQL request
#[derive(Clone)]
pub struct AppContext {
    pub mongodb: Arc<dyn PropertySource>,
    pub jobs: Arc<dyn JobStore>,
}

impl AppContext {
    pub fn new(mongodb: Arc<dyn PropertySource>, jobs: Arc<dyn JobStore>) -> Self {
        Self { mongodb, jobs }
    }
}
