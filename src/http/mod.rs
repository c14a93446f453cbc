use std::{net::SocketAddr, str::FromStr};

use axum::{
    extract::Extension,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::{
    config::{Config, ConfigError},
    error::ErrorCode,
    server_info::ServerInfo,
    service::ServiceHandler,
};

impl IntoResponse for ErrorCode {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, message = "Error while processing request");

        let details = self.details();
        (details.status_code(), Json(details)).into_response()
    }
}

#[tracing::instrument]
async fn root() -> Json<ServerInfo> {
    Json(ServerInfo::new())
}

#[tracing::instrument(skip(config, services))]
pub async fn start_server(config: Config, services: ServiceHandler) -> color_eyre::Result<()> {
    let addr = SocketAddr::from_str(config.bind_ip())
        .map_err(|_| ConfigError::MalformedBindIp(config.bind_ip().to_owned()))?;
    let app = build_http_router(services);
    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}

pub(crate) fn build_http_router(services: ServiceHandler) -> Router {
    let middleware = ServiceBuilder::new().layer(TraceLayer::new_for_http());

    Router::new()
        .route("/", get(root))
        .route("/webhook/github", post(super::backends::github::webhook))
        .layer(middleware.into_inner())
        .layer(Extension(services))
}
