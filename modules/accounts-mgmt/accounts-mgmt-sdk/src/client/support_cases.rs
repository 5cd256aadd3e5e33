use ams_core::client::{Connection, PostRequest};

use crate::models::{SupportCaseRequest, SupportCaseResponse};

/// `/support_cases`
#[derive(Debug, Clone)]
pub struct SupportCasesClient {
    connection: Connection,
    path: String,
}

impl SupportCasesClient {
    pub(crate) fn new(connection: Connection, path: String) -> Self {
        Self { connection, path }
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn post(&self) -> PostRequest<SupportCaseRequest, SupportCaseResponse> {
        PostRequest::new(self.connection.clone(), self.path.clone())
    }
}
