use serde_json::Value;

use crate::{
    backends::github::{PullRequestEvent, OPENED_ACTION, PULL_REQUEST_EVENT},
    error::ErrorCode,
    status::{
        StatusReport, StatusService, StatusState, FAILURE_STATUS, SUCCESS_STATUS, TASK_LINK_PREFIX,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Not an opened pull request, nothing was published.
    Ignored,
    Reported(StatusState),
}

/// Checks opened pull requests for a task reference and reports the result
/// as a commit status.
#[derive(Debug)]
pub struct EventChecker<'a> {
    status_service: &'a dyn StatusService,
}

impl<'a> EventChecker<'a> {
    pub fn new(status_service: &'a dyn StatusService) -> Self {
        Self { status_service }
    }

    #[tracing::instrument(skip(self, body))]
    pub async fn handle(
        &self,
        event_type: Option<&str>,
        body: &str,
    ) -> Result<CheckOutcome, ErrorCode> {
        // Syntax errors fail every delivery, qualifying or not.
        let payload: Value = serde_json::from_str(body)?;

        if !is_pull_request_event(event_type) {
            tracing::debug!(message = "Ignoring non pull request event");
            return Ok(CheckOutcome::Ignored);
        }

        let action = event_action(&payload);
        if !is_event_opened(action) {
            tracing::debug!(action = ?action, message = "Ignoring pull request action");
            return Ok(CheckOutcome::Ignored);
        }

        let event: PullRequestEvent = serde_json::from_value(payload)?;
        let report = status_for_description(event.pull_request.body.as_deref());
        tracing::info!(
            repository = %event.repository.full_name,
            sha = %event.pull_request.head.sha,
            state = %report.state(),
            message = "Publishing commit status"
        );

        self.status_service
            .create_commit_status(
                &event.repository.full_name,
                &event.pull_request.head.sha,
                report,
            )
            .await?;

        Ok(CheckOutcome::Reported(report.state()))
    }
}

pub fn is_pull_request_event(event_type: Option<&str>) -> bool {
    event_type == Some(PULL_REQUEST_EVENT)
}

pub fn event_action(payload: &Value) -> Option<&str> {
    payload.get("action").and_then(Value::as_str)
}

pub fn is_event_opened(action: Option<&str>) -> bool {
    action == Some(OPENED_ACTION)
}

/// A missing description never carries the task link.
pub fn has_task_link(description: Option<&str>) -> bool {
    description
        .map(|d| d.starts_with(TASK_LINK_PREFIX))
        .unwrap_or(false)
}

pub fn status_for_description(description: Option<&str>) -> &'static StatusReport {
    if has_task_link(description) {
        &*SUCCESS_STATUS
    } else {
        &*FAILURE_STATUS
    }
}
