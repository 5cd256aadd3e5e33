use ams_core::client::{Connection, GetRequest};

use super::child;
use crate::models::FeatureToggle;

/// `/feature_toggles`
#[derive(Debug, Clone)]
pub struct FeatureTogglesClient {
    connection: Connection,
    path: String,
}

impl FeatureTogglesClient {
    pub(crate) fn new(connection: Connection, path: String) -> Self {
        Self { connection, path }
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn toggle(&self, id: &str) -> FeatureToggleClient {
        FeatureToggleClient {
            connection: self.connection.clone(),
            path: child(&self.path, id),
        }
    }
}

/// `/feature_toggles/{id}`
#[derive(Debug, Clone)]
pub struct FeatureToggleClient {
    connection: Connection,
    path: String,
}

impl FeatureToggleClient {
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn get(&self) -> GetRequest<FeatureToggle> {
        GetRequest::new(self.connection.clone(), self.path.clone())
    }
}
