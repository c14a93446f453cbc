use std::{any::Any, time::Duration};

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{
    config::Config,
    server_info::{APP_NAME, APP_VERSION},
    status::{StatusReport, StatusService},
};

use super::{error::GitHubError, PULL_REQUEST_EVENT};

#[derive(Debug, Clone)]
pub struct Client {
    api_url: String,
    token: Option<String>,
}

#[derive(Deserialize)]
pub struct WebhookConfig {
    url: String,
}

#[derive(Deserialize)]
pub struct Webhook {
    id: u32,
    config: WebhookConfig,
}

impl Client {
    pub fn new<T: Into<String>>(api_url: T, token: Option<String>) -> Self {
        Self {
            api_url: api_url.into(),
            token,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.github_api_url(),
            config.github_token().map(|t| t.to_owned()),
        )
    }

    pub async fn try_register_webhook(
        &self,
        owner: &str,
        repo: &str,
        url: &str,
    ) -> Result<u32, GitHubError> {
        if let Some(u) = self.check_webhook_url(owner, repo, url).await? {
            tracing::warn!(
                id = u,
                message = "Webhook already registered",
                owner = owner,
                repo = repo,
                url = url
            );
            Ok(u)
        } else {
            Ok(self.register_webhook(owner, repo, url).await?.id)
        }
    }

    pub async fn try_unregister_webhook(
        &self,
        owner: &str,
        repo: &str,
        url: &str,
    ) -> Result<(), GitHubError> {
        if let Some(u) = self.check_webhook_url(owner, repo, url).await? {
            self.unregister_webhook(owner, repo, u).await
        } else {
            tracing::error!(
                message = "Unknown webhook",
                owner = owner,
                repo = repo,
                url = url
            );
            Ok(())
        }
    }

    fn create_client(&self) -> Result<reqwest::Client, GitHubError> {
        reqwest::ClientBuilder::new()
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("{APP_NAME}/{APP_VERSION}"))
            .build()
            .map_err(|e| GitHubError::CouldNotBuildClient(e.to_string()))
    }

    /// Build an authorized request on `path`, relative to the API root.
    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, GitHubError> {
        let builder = self
            .create_client()?
            .request(method, format!("{}{path}", self.api_url));

        // A missing token is left for GitHub to reject.
        Ok(match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        })
    }

    /// Send `builder` once, rejecting non-2xx responses.
    async fn send<F>(&self, builder: RequestBuilder, on_error: F) -> Result<Response, GitHubError>
    where
        F: FnOnce(String) -> GitHubError,
    {
        builder
            .send()
            .await
            .map_err(|e| on_error(e.to_string()))?
            .error_for_status()
            .map_err(|e| GitHubError::BadStatusCode(e.to_string()))
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, GitHubError> {
        response
            .json()
            .await
            .map_err(|e| GitHubError::MalformedResponse(e.to_string()))
    }

    async fn register_webhook(
        &self,
        owner: &str,
        repo: &str,
        url: &str,
    ) -> Result<Webhook, GitHubError> {
        #[derive(Serialize)]
        struct HookConfig<'a> {
            url: &'a str,
            content_type: &'static str,
        }

        #[derive(Serialize)]
        struct NewHook<'a> {
            name: &'static str,
            config: HookConfig<'a>,
            events: &'static [&'static str],
        }

        let hook = NewHook {
            name: "web",
            config: HookConfig {
                url,
                content_type: "json",
            },
            events: &[PULL_REQUEST_EVENT],
        };

        let request = self
            .request(Method::POST, &format!("/repos/{owner}/{repo}/hooks"))?
            .json(&hook);
        let webhook: Webhook =
            Self::read_json(self.send(request, GitHubError::CouldNotRegisterWebhook).await?)
                .await?;

        tracing::info!(
            id = webhook.id,
            message = "New webhook installed",
            owner = owner,
            repo = repo,
            url = url
        );

        Ok(webhook)
    }

    async fn list_webhooks(&self, owner: &str, repo: &str) -> Result<Vec<Webhook>, GitHubError> {
        let request = self.request(Method::GET, &format!("/repos/{owner}/{repo}/hooks"))?;
        Self::read_json(self.send(request, GitHubError::CouldNotListWebhooks).await?).await
    }

    async fn check_webhook_url(
        &self,
        owner: &str,
        repo: &str,
        url: &str,
    ) -> Result<Option<u32>, GitHubError> {
        Ok(self
            .list_webhooks(owner, repo)
            .await?
            .into_iter()
            .find(|w| w.config.url == url)
            .map(|w| w.id))
    }

    async fn unregister_webhook(&self, owner: &str, repo: &str, id: u32) -> Result<(), GitHubError> {
        let request = self.request(Method::DELETE, &format!("/repos/{owner}/{repo}/hooks/{id}"))?;
        self.send(request, GitHubError::CouldNotUnregisterWebhook)
            .await?;

        tracing::info!(
            id = id,
            message = "Webhook unregistered",
            owner = owner,
            repo = repo,
        );

        Ok(())
    }
}

#[async_trait]
impl StatusService for Client {
    #[tracing::instrument(skip(self, report), fields(state = %report.state()))]
    async fn create_commit_status(
        &self,
        full_name: &str,
        sha: &str,
        report: &StatusReport,
    ) -> Result<(), GitHubError> {
        let request = self
            .request(Method::POST, &format!("/repos/{full_name}/statuses/{sha}"))?
            .json(report);
        self.send(request, GitHubError::CouldNotPublishStatus)
            .await?;

        tracing::info!(message = "Commit status published");

        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::{matchers, Mock, MockServer, ResponseTemplate};

    use crate::{
        backends::github::GitHubError,
        status::{StatusService, FAILURE_STATUS, SUCCESS_STATUS},
    };

    use super::Client;

    async fn test_client() -> (MockServer, Client) {
        let server = MockServer::start().await;
        let client = Client::new(server.uri(), Some("token".into()));

        (server, client)
    }

    #[tokio::test]
    async fn test_create_commit_status() {
        let (server, client) = test_client().await;

        Mock::given(matchers::method("POST"))
            .and(matchers::path("/repos/org/repo/statuses/abc123"))
            .and(matchers::header("authorization", "Bearer token"))
            .and(matchers::body_json(json!({
                "state": "success",
                "description": "Pull request contains correct task reference.",
                "context": "serverless-github-check"
            })))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        client
            .create_commit_status("org/repo", "abc123", &SUCCESS_STATUS)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_create_commit_status_rejected() {
        let (server, client) = test_client().await;

        Mock::given(matchers::method("POST"))
            .and(matchers::path("/repos/org/repo/statuses/abc123"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;

        let err = client
            .create_commit_status("org/repo", "abc123", &FAILURE_STATUS)
            .await
            .unwrap_err();
        assert_matches!(err, GitHubError::BadStatusCode(_));
    }

    #[tokio::test]
    async fn test_create_commit_status_unreachable() {
        let client = Client::new("http://127.0.0.1:1", None);

        let err = client
            .create_commit_status("org/repo", "abc123", &SUCCESS_STATUS)
            .await
            .unwrap_err();
        assert_matches!(err, GitHubError::CouldNotPublishStatus(_));
    }

    #[tokio::test]
    async fn test_register_webhook() {
        let (server, client) = test_client().await;

        Mock::given(matchers::method("POST"))
            .and(matchers::path("/repos/owner/repo/hooks"))
            .and(matchers::body_json(json!({
                "name": "web",
                "config": {
                    "url": "url",
                    "content_type": "json"
                },
                "events": ["pull_request"]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 1234u32,
                "config": {
                    "url": "url"
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        assert_eq!(
            client
                .register_webhook("owner", "repo", "url")
                .await
                .unwrap()
                .id,
            1234
        );
    }

    #[tokio::test]
    async fn test_register_webhook_rejected() {
        let (server, client) = test_client().await;

        Mock::given(matchers::method("POST"))
            .and(matchers::path("/repos/owner/repo/hooks"))
            .respond_with(ResponseTemplate::new(422))
            .expect(1)
            .mount(&server)
            .await;

        let err = client
            .register_webhook("owner", "repo", "url")
            .await
            .err()
            .unwrap();
        assert_matches!(err, GitHubError::BadStatusCode(_));
    }

    #[tokio::test]
    async fn test_unregister_webhook_unreachable() {
        let client = Client::new("http://127.0.0.1:1", None);

        let err = client
            .unregister_webhook("owner", "repo", 1234)
            .await
            .unwrap_err();
        assert_matches!(err, GitHubError::CouldNotUnregisterWebhook(_));
    }

    #[tokio::test]
    async fn test_list_webhook() {
        let (server, client) = test_client().await;

        Mock::given(matchers::method("GET"))
            .and(matchers::path("/repos/owner/repo/hooks"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "id": 1234u32,
                    "config": {
                        "url": "url"
                    }
                }
            ])))
            .expect(1)
            .mount(&server)
            .await;

        assert_eq!(
            client.list_webhooks("owner", "repo").await.unwrap().len(),
            1
        );
    }

    #[tokio::test]
    async fn test_list_webhook_malformed_response() {
        let (server, client) = test_client().await;

        Mock::given(matchers::method("GET"))
            .and(matchers::path("/repos/owner/repo/hooks"))
            .respond_with(ResponseTemplate::new(200).set_body_string("nope"))
            .expect(1)
            .mount(&server)
            .await;

        let err = client.list_webhooks("owner", "repo").await.err().unwrap();
        assert_matches!(err, GitHubError::MalformedResponse(_));
    }

    #[tokio::test]
    async fn test_try_register_webhook_absent() {
        let (server, client) = test_client().await;

        Mock::given(matchers::method("POST"))
            .and(matchers::path("/repos/owner/repo/hooks"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 1234,
                "config": {
                    "url": "url"
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(matchers::method("GET"))
            .and(matchers::path("/repos/owner/repo/hooks"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "id": 5678,
                    "config": {
                        "url": "other-url"
                    }
                }
            ])))
            .expect(1)
            .mount(&server)
            .await;

        assert_eq!(
            client
                .try_register_webhook("owner", "repo", "url")
                .await
                .unwrap(),
            1234
        );
    }

    #[tokio::test]
    async fn test_try_register_webhook_present() {
        let (server, client) = test_client().await;

        Mock::given(matchers::method("GET"))
            .and(matchers::path("/repos/owner/repo/hooks"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "id": 1234u32,
                    "config": {
                        "url": "url"
                    }
                }
            ])))
            .expect(1)
            .mount(&server)
            .await;

        assert_eq!(
            client
                .try_register_webhook("owner", "repo", "url")
                .await
                .unwrap(),
            1234
        );
    }

    #[tokio::test]
    async fn test_try_unregister_webhook_present() {
        let (server, client) = test_client().await;

        Mock::given(matchers::method("DELETE"))
            .and(matchers::path("/repos/owner/repo/hooks/1234"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(matchers::method("GET"))
            .and(matchers::path("/repos/owner/repo/hooks"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "id": 1234,
                    "config": {
                        "url": "url"
                    }
                }
            ])))
            .expect(1)
            .mount(&server)
            .await;

        client
            .try_unregister_webhook("owner", "repo", "url")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_try_unregister_webhook_absent() {
        let (server, client) = test_client().await;

        Mock::given(matchers::method("GET"))
            .and(matchers::path("/repos/owner/repo/hooks"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "id": 5678,
                    "config": {
                        "url": "other-url"
                    }
                }
            ])))
            .expect(1)
            .mount(&server)
            .await;

        client
            .try_unregister_webhook("owner", "repo", "url")
            .await
            .unwrap();
    }
}
