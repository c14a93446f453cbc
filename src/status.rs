use std::any::Any;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use serde::Serialize;

use crate::backends::github::GitHubError;

/// Required leading text of a pull request description.
pub const TASK_LINK_PREFIX: &str = "Related task: https://www.meistertask.com";

/// Identifies this checker among the commit statuses of a commit.
pub const STATUS_CONTEXT: &str = "serverless-github-check";

pub static SUCCESS_STATUS: Lazy<StatusReport> = Lazy::new(|| {
    StatusReport::new(
        StatusState::Success,
        "Pull request contains correct task reference.",
    )
});

pub static FAILURE_STATUS: Lazy<StatusReport> = Lazy::new(|| {
    StatusReport::new(
        StatusState::Failure,
        format!(
            "Pull request does not contains correct task reference. Description should start with \"{}\"",
            TASK_LINK_PREFIX
        ),
    )
});

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StatusState {
    Success,
    Failure,
}

/// Commit status payload, as expected by the GitHub statuses API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    state: StatusState,
    description: String,
    context: String,
}

impl StatusReport {
    fn new<T: Into<String>>(state: StatusState, description: T) -> Self {
        Self {
            state,
            description: description.into(),
            context: STATUS_CONTEXT.into(),
        }
    }

    pub fn state(&self) -> StatusState {
        self.state
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn context(&self) -> &str {
        &self.context
    }
}

/// Publishes commit statuses on a Git hosting service.
#[async_trait]
pub trait StatusService: std::fmt::Debug + Send + Sync {
    async fn create_commit_status(
        &self,
        full_name: &str,
        sha: &str,
        report: &StatusReport,
    ) -> Result<(), GitHubError>;

    fn as_any(&self) -> &dyn Any;
}
