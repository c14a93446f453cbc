use serde::{Deserialize, Serialize};

use crate::status::STATUS_CONTEXT;

pub const APP_NAME: &str = "prchecker";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Payload of the root endpoint.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerInfo {
    message: String,
    version: String,
    context: String,
}

impl ServerInfo {
    pub fn new() -> Self {
        Default::default()
    }
}

impl Default for ServerInfo {
    fn default() -> Self {
        Self {
            message: format!("{APP_NAME}, ready for action!"),
            version: APP_VERSION.into(),
            context: STATUS_CONTEXT.into(),
        }
    }
}
