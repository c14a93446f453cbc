use serde::{Deserialize, Serialize};

/// Value of the `X-GitHub-Event` header for pull request deliveries.
pub const PULL_REQUEST_EVENT: &str = "pull_request";

/// Pull request action triggering a check.
pub const OPENED_ACTION: &str = "opened";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PullRequestEvent {
    pub action: String,
    pub pull_request: PullRequest,
    pub repository: Repository,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PullRequest {
    /// GitHub sends `null` for an empty description.
    #[serde(default)]
    pub body: Option<String>,
    pub head: CommitRef,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CommitRef {
    pub sha: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Repository {
    pub full_name: String,
}
