use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GitHubError {
    #[error("error while building HTTP client: {0}")]
    CouldNotBuildClient(String),

    #[error("error while publishing commit status: {0}")]
    CouldNotPublishStatus(String),

    #[error("error while registering webhook: {0}")]
    CouldNotRegisterWebhook(String),

    #[error("error while listing webhooks: {0}")]
    CouldNotListWebhooks(String),

    #[error("error while unregistering webhook: {0}")]
    CouldNotUnregisterWebhook(String),

    #[error("error code received from GitHub: {0}")]
    BadStatusCode(String),

    #[error("error while parsing GitHub response: {0}")]
    MalformedResponse(String),
}
