#![allow(dead_code)]

use sonarqube::types::ServerUrl;
use sonarqube::{SonarClient, SonarClientBuilder};
use wiremock::MockServer;

pub type AnyResult = anyhow::Result<()>;

pub const TOKEN: &str = "squ_123";

/// `Authorization` header value sent for [TOKEN].
pub const TOKEN_BASIC: &str = "Basic c3F1XzEyMzo=";

pub fn builder_for(server: &MockServer) -> SonarClientBuilder {
    SonarClient::builder(ServerUrl::try_from(server.uri()).unwrap())
}

/// A client of `server` which authenticates with [TOKEN].
pub fn client_for(server: &MockServer) -> SonarClient {
    builder_for(server).token(TOKEN).build().unwrap()
}
