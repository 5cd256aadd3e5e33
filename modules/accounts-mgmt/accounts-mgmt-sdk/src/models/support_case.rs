use ams_core::Object;

#[derive(Debug, Clone, Default, PartialEq, Object)]
#[object(kind = "SupportCaseRequest")]
pub struct SupportCaseRequest {
    id: Option<String>,
    href: Option<String>,
    link: bool,
    cluster_id: Option<String>,
    cluster_uuid: Option<String>,
    description: Option<String>,
    event_stream_id: Option<String>,
    severity: Option<String>,
    subscription_id: Option<String>,
    summary: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Object)]
#[object(kind = "SupportCaseResponse")]
pub struct SupportCaseResponse {
    id: Option<String>,
    href: Option<String>,
    link: bool,
    uri: Option<String>,
    case_number: Option<String>,
    cluster_id: Option<String>,
    cluster_uuid: Option<String>,
    description: Option<String>,
    severity: Option<String>,
    status: Option<String>,
    subscription_id: Option<String>,
    summary: Option<String>,
}
