use clap::Parser;

use prchecker::backends::github;
use prchecker::checker::status_for_description;
use prchecker::cmdargs::{Args, SubCommand};
use prchecker::config::{Config, ConfigError};
use prchecker::http::start_server;
use prchecker::logging::TracingSetup;
use prchecker::service::ServiceHandler;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> color_eyre::Result<()> {
    dotenv::dotenv().ok();
    color_eyre::install().ok();

    let args = Args::parse();
    let config = build_configuration(&args)?;

    TracingSetup::with_setup(config, |config| async move {
        match args.command {
            SubCommand::Serve => {
                let services = ServiceHandler::new_defaults(&config);
                start_server(config, services).await?
            }
            SubCommand::Check(check_args) => {
                let report = status_for_description(Some(&check_args.description));
                println!("{}", serde_json::to_string_pretty(report)?);
            }
            SubCommand::Install(install_args) => {
                let client = github::Client::from_config(&config);
                let repo = install_args.repository;

                client
                    .try_register_webhook(repo.owner(), repo.name(), &install_args.url)
                    .await?;
            }
            SubCommand::Uninstall(install_args) => {
                let client = github::Client::from_config(&config);
                let repo = install_args.repository;

                client
                    .try_unregister_webhook(repo.owner(), repo.name(), &install_args.url)
                    .await?;
            }
        }

        Ok(())
    })
    .await
}

fn build_configuration(args: &Args) -> Result<Config, ConfigError> {
    let mut config = Config::from_env();

    if let Some(m) = &args.github_api_url {
        config.set_github_api_url(m.clone());
    }

    if let Some(t) = &args.github_token {
        config.set_github_token(t.clone());
    }

    if let Some(t) = &args.telemetry_url {
        config.set_telemetry_url(t.clone());
    }

    if let Some(b) = &args.bind_ip {
        config.set_bind_ip(b.clone());
    }

    config.validate_configuration().map(|_| config)
}
