use axum::{
    extract::Extension,
    http::{HeaderMap, StatusCode},
};

use crate::{checker::EventChecker, error::ErrorCode, service::ServiceHandler};

const GITHUB_EVENT_HEADER: &str = "x-github-event";

#[tracing::instrument(
    skip(headers, body, services),
    fields(event = ?headers.get(GITHUB_EVENT_HEADER))
)]
pub async fn webhook(
    headers: HeaderMap,
    body: String,
    services: Extension<ServiceHandler>,
) -> Result<StatusCode, ErrorCode> {
    // A header that is not valid UTF-8 cannot be "pull_request".
    let event_type = headers
        .get(GITHUB_EVENT_HEADER)
        .and_then(|v| v.to_str().ok());

    EventChecker::new(services.status())
        .handle(event_type, &body)
        .await?;

    Ok(StatusCode::OK)
}
