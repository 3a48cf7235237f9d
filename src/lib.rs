//! Async client for the SonarQube Web API.
//!
//! ```no_run
//! use sonarqube::{SonarClient, types::ServerUrl};
//! use sonarqube::services::ce::ActivityOptions;
//!
//! # async fn run() -> Result<(), sonarqube::SonarError> {
//! let url = ServerUrl::try_from("http://localhost:9000").unwrap();
//! let client = SonarClient::builder(url).token("squ_abc").build()?;
//! let options = ActivityOptions {
//!     status: vec!["FAILED".to_string()],
//!     ..Default::default()
//! };
//! for task in client.ce().activity(Some(&options)).await?.tasks {
//!     println!("{} {:?}", task.id, task.status);
//! }
//! # Ok(())
//! # }
//! ```
mod auth;
mod client;
mod config;
pub mod constants;
pub mod encoding;
pub mod errors;
pub mod services;
pub mod types;
pub mod validation;

pub use auth::Auth;
pub use client::{Destination, Response, ResponseMeta, SonarClient, SonarClientBuilder};
pub use config::{
    ClientConfig, ENV_HOST_URL, ENV_LOGIN, ENV_PASSWORD, ENV_TIMEOUT_SECS, ENV_TOKEN,
};
pub use errors::SonarError;

pub use reqwest;
