use std::sync::Arc;

use accounts_mgmt::SupportCasesServer;
use accounts_mgmt_sdk::{SupportCaseRequest, SupportCaseResponse};
use ams_core::server::{PostServerRequest, PostServerResponse, RequestContext};
use async_trait::async_trait;
use axum::http::StatusCode;

use crate::store::Store;

/// Status of every case opened through the mock.
const OPEN: &str = "Open";

pub struct SupportCases {
    store: Arc<Store>,
}

impl SupportCases {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl SupportCasesServer for SupportCases {
    /// Opens a case with the next case number and echoes the request.
    async fn post(
        &self,
        _ctx: &RequestContext,
        request: PostServerRequest<SupportCaseRequest>,
        response: &mut PostServerResponse<SupportCaseResponse>,
    ) -> anyhow::Result<()> {
        let request = request.request();
        if request.summary().is_empty() {
            response.status(StatusCode::BAD_REQUEST);
            return Ok(());
        }
        let number = format!("{:08}", self.store.support_cases.all(None)?.len() + 1);
        let base = self.store.path("support_cases");
        let mut case = SupportCaseResponse::builder()
            .id(&number)
            .case_number(&number)
            .uri(format!("{base}/{number}"))
            .status(OPEN)
            .summary(request.summary());
        if let Some(description) = request.get_description() {
            case = case.description(description);
        }
        if let Some(severity) = request.get_severity() {
            case = case.severity(severity);
        }
        if let Some(cluster_id) = request.get_cluster_id() {
            case = case.cluster_id(cluster_id);
        }
        if let Some(cluster_uuid) = request.get_cluster_uuid() {
            case = case.cluster_uuid(cluster_uuid);
        }
        if let Some(subscription_id) = request.get_subscription_id() {
            case = case.subscription_id(subscription_id);
        }
        let stored = self.store.support_cases.add(None, &base, &case.build()?)?;
        tracing::info!(case_number = %number, severity = stored.severity(), "support case opened");
        response.response(stored);
        Ok(())
    }
}
