mod apiclient;
mod error;
mod http;
mod models;

#[cfg(test)]
mod tests;

pub use apiclient::*;
pub use error::GitHubError;
pub use http::*;
pub use models::*;
