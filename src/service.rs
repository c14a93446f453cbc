use std::sync::Arc;

use crate::{backends::github, config::Config, status::StatusService};

#[derive(Debug, Clone)]
pub struct ServiceHandler {
    status_service: Arc<dyn StatusService>,
}

impl ServiceHandler {
    pub fn new(status_service: Arc<dyn StatusService>) -> Self {
        Self { status_service }
    }

    pub fn new_defaults(config: &Config) -> Self {
        Self {
            status_service: Arc::new(github::Client::from_config(config)),
        }
    }

    pub fn status(&self) -> &dyn StatusService {
        self.status_service.as_ref()
    }
}
