use clap::Parser;

use crate::repository_path::RepositoryPath;

/// Check that GitHub pull requests reference a task
#[derive(Parser, Debug)]
#[clap(author, version, about)]
pub struct Args {
    /// Telemetry URL (disabled as default)
    #[clap(long)]
    pub telemetry_url: Option<String>,

    /// GitHub API URL (https://api.github.com as default)
    #[clap(long)]
    pub github_api_url: Option<String>,

    /// GitHub API token (GITHUB_TOKEN as default)
    #[clap(long)]
    pub github_token: Option<String>,

    /// Bind IP (127.0.0.1:3000 as default)
    #[clap(long)]
    pub bind_ip: Option<String>,

    /// Command
    #[clap(subcommand)]
    pub command: SubCommand,
}

#[derive(Parser, Debug)]
pub enum SubCommand {
    /// Run server
    Serve,
    /// Check a pull request description without publishing anything
    Check(CheckCommand),
    /// Install webhook
    Install(WebhookCommand),
    /// Uninstall webhook
    Uninstall(WebhookCommand),
}

#[derive(Parser, Debug)]
pub struct CheckCommand {
    /// Pull request description
    #[clap(long)]
    pub description: String,
}

#[derive(Parser, Debug)]
pub struct WebhookCommand {
    /// Repository full name
    #[clap(long)]
    pub repository: RepositoryPath,

    /// Webhook URL
    #[clap(long)]
    pub url: String,
}
