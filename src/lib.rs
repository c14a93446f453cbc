pub mod backends;
pub mod checker;
pub mod cmdargs;
pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod repository_path;
pub mod server_info;
pub mod service;
pub mod status;
