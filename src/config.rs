use std::{net::SocketAddr, str::FromStr};

use url::Url;

pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
pub const DEFAULT_BIND_IP: &str = "127.0.0.1:3000";

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Malformed bind IP: '{0}'. Make sure you entered a valid IP.")]
    MalformedBindIp(String),
    #[error("Malformed GitHub API URL: '{0}'. Make sure you entered a valid URL.")]
    MalformedGitHubApiUrl(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    telemetry_url: Option<String>,
    github_api_url: String,
    github_token: Option<String>,
    bind_ip: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            telemetry_url: env_to_str("PRC_TELEMETRY_URL"),
            github_api_url: env_to_str("PRC_GITHUB_API_URL")
                .unwrap_or_else(|| DEFAULT_GITHUB_API_URL.into()),
            github_token: env_to_str("GITHUB_TOKEN"),
            bind_ip: env_to_str("PRC_BIND_IP").unwrap_or_else(|| DEFAULT_BIND_IP.into()),
        }
    }

    pub fn empty() -> Self {
        Self {
            telemetry_url: None,
            github_api_url: "".into(),
            github_token: None,
            bind_ip: "".into(),
        }
    }

    pub fn github_api_url(&self) -> &str {
        &self.github_api_url
    }

    pub fn github_token(&self) -> Option<&str> {
        self.github_token.as_deref()
    }

    pub fn telemetry_url(&self) -> Option<&str> {
        self.telemetry_url.as_deref()
    }

    pub fn bind_ip(&self) -> &str {
        &self.bind_ip
    }

    pub fn set_github_api_url<T: Into<String>>(&mut self, value: T) {
        self.github_api_url = value.into();
    }

    pub fn set_github_token<T: Into<String>>(&mut self, value: T) {
        self.github_token = Some(value.into());
    }

    pub fn set_telemetry_url<T: Into<String>>(&mut self, value: T) {
        self.telemetry_url = Some(value.into());
    }

    pub fn set_bind_ip<T: Into<String>>(&mut self, value: T) {
        self.bind_ip = value.into();
    }

    pub fn validate_configuration(&self) -> Result<(), ConfigError> {
        Url::parse(&self.github_api_url)
            .map_err(|_| ConfigError::MalformedGitHubApiUrl(self.github_api_url.clone()))?;

        SocketAddr::from_str(&self.bind_ip)
            .map_err(|_| ConfigError::MalformedBindIp(self.bind_ip.clone()))?;

        Ok(())
    }
}

fn env_to_str(env_key: &str) -> Option<String> {
    std::env::var(env_key).ok().filter(|s| !s.is_empty())
}
