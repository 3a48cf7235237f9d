//! One module per SonarQube Web API resource group.
//!
//! Each module defines the options and response models of its endpoints,
//! and an `*Api` handle obtained from [crate::SonarClient], e.g.
//! [crate::SonarClient::ce].
mod analysis_reports;
mod authentication;
pub mod ce;
mod monitoring;
pub mod navigation;
pub mod plugins;
pub mod projects;
mod server;
pub mod settings;
pub mod sources;
pub mod system;
pub mod user_groups;
pub mod user_tokens;
pub mod users;

pub use analysis_reports::AnalysisReportsApi;
pub use authentication::{AuthenticationApi, ValidateResponse};
pub use ce::CeApi;
pub use monitoring::MonitoringApi;
pub use navigation::NavigationApi;
pub use plugins::PluginsApi;
pub use projects::ProjectsApi;
pub use server::ServerApi;
pub use settings::SettingsApi;
pub use sources::SourcesApi;
pub use system::SystemApi;
pub use user_groups::UserGroupsApi;
pub use user_tokens::UserTokensApi;
pub use users::UsersApi;
