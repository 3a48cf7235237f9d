use crate::client::{SonarClient, NO_OPTIONS};
use crate::constants::{
    EMAIL_MAX, HOMEPAGE_TYPES, LOGIN_MAX, LOGIN_MIN, NOTICE_TYPES, SELECTED_FILTERS, USER_NAME_MAX,
};
use crate::encoding::comma_separated;
use crate::errors::SonarError;
use crate::types::{DateTimeString, Login, Paging};
use crate::validation::{
    max_length, max_length_opt, min_length, one_of, one_of_opt, required, Validate,
    ValidationError,
};
use reqwest::Method;
use serde::{Deserialize, Serialize};

/// `api/users`
pub struct UsersApi<'a> {
    client: &'a SonarClient,
}

impl<'a> UsersApi<'a> {
    pub(crate) fn new(client: &'a SonarClient) -> Self {
        Self { client }
    }

    pub async fn search(
        &self,
        options: Option<&SearchOptions>,
    ) -> Result<SearchResponse, SonarError> {
        self.client
            .json(Method::GET, "api/users/search", options)
            .await
    }

    /// Get the user this client is authenticated as.
    pub async fn current(&self) -> Result<CurrentUser, SonarError> {
        self.client
            .json(Method::GET, "api/users/current", NO_OPTIONS)
            .await
    }

    pub async fn create(&self, options: &CreateOptions) -> Result<User, SonarError> {
        let res: UserResponse = self
            .client
            .json(Method::POST, "api/users/create", Some(options))
            .await?;
        Ok(res.user)
    }

    pub async fn update(&self, options: &UpdateOptions) -> Result<User, SonarError> {
        let res: UserResponse = self
            .client
            .json(Method::POST, "api/users/update", Some(options))
            .await?;
        Ok(res.user)
    }

    pub async fn deactivate(&self, options: &DeactivateOptions) -> Result<User, SonarError> {
        let res: UserResponse = self
            .client
            .json(Method::POST, "api/users/deactivate", Some(options))
            .await?;
        Ok(res.user)
    }

    pub async fn change_password(&self, options: &ChangePasswordOptions) -> Result<(), SonarError> {
        self.client
            .send(Method::POST, "api/users/change_password", Some(options))
            .await?;
        Ok(())
    }

    /// List the groups a user belongs to.
    pub async fn groups(&self, options: &GroupsOptions) -> Result<GroupsResponse, SonarError> {
        self.client
            .json(Method::GET, "api/users/groups", Some(options))
            .await
    }

    pub async fn set_homepage(&self, options: &SetHomepageOptions) -> Result<(), SonarError> {
        self.client
            .send(Method::POST, "api/users/set_homepage", Some(options))
            .await?;
        Ok(())
    }

    pub async fn dismiss_notice(&self, options: &DismissNoticeOptions) -> Result<(), SonarError> {
        self.client
            .send(Method::POST, "api/users/dismiss_notice", Some(options))
            .await?;
        Ok(())
    }
}

// --------------------------------------------------------------------------------
// Options
// --------------------------------------------------------------------------------

#[derive(Serialize, Debug, Clone, Default)]
pub struct SearchOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ps: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
}

impl Validate for SearchOptions {}

#[derive(Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreateOptions {
    pub login: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Whether the user is authenticated by SonarQube rather than an external provider.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local: Option<bool>,
    #[serde(with = "comma_separated", skip_serializing_if = "Vec::is_empty")]
    pub scm_account: Vec<String>,
}

impl Validate for CreateOptions {
    fn validate(&self) -> Result<(), ValidationError> {
        required("login", &self.login)?;
        min_length("login", &self.login, LOGIN_MIN)?;
        max_length("login", &self.login, LOGIN_MAX)?;
        required("name", &self.name)?;
        max_length("name", &self.name, USER_NAME_MAX)?;
        max_length_opt("email", self.email.as_deref(), EMAIL_MAX)
    }
}

#[derive(Serialize, Debug, Clone, Default)]
pub struct UpdateOptions {
    pub login: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Validate for UpdateOptions {
    fn validate(&self) -> Result<(), ValidationError> {
        required("login", &self.login)?;
        max_length_opt("name", self.name.as_deref(), USER_NAME_MAX)?;
        max_length_opt("email", self.email.as_deref(), EMAIL_MAX)
    }
}

#[derive(Serialize, Debug, Clone, Default)]
pub struct DeactivateOptions {
    pub login: String,
}

impl Validate for DeactivateOptions {
    fn validate(&self) -> Result<(), ValidationError> {
        required("login", &self.login)
    }
}

#[derive(Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordOptions {
    pub login: String,
    pub password: String,
    /// Required when changing one's own password.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_password: Option<String>,
}

impl Validate for ChangePasswordOptions {
    fn validate(&self) -> Result<(), ValidationError> {
        required("login", &self.login)?;
        required("password", &self.password)
    }
}

#[derive(Serialize, Debug, Clone, Default)]
pub struct GroupsOptions {
    pub login: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ps: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    /// One of `all`, `deselected`, `selected`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<String>,
}

impl Validate for GroupsOptions {
    fn validate(&self) -> Result<(), ValidationError> {
        required("login", &self.login)?;
        one_of_opt("selected", self.selected.as_deref(), &SELECTED_FILTERS)
    }
}

#[derive(Serialize, Debug, Clone, Default)]
pub struct SetHomepageOptions {
    #[serde(rename = "type")]
    pub homepage_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
}

impl Validate for SetHomepageOptions {
    fn validate(&self) -> Result<(), ValidationError> {
        required("type", &self.homepage_type)?;
        one_of("type", &self.homepage_type, &HOMEPAGE_TYPES)
    }
}

#[derive(Serialize, Debug, Clone, Default)]
pub struct DismissNoticeOptions {
    pub notice: String,
}

impl Validate for DismissNoticeOptions {
    fn validate(&self) -> Result<(), ValidationError> {
        required("notice", &self.notice)?;
        one_of("notice", &self.notice, &NOTICE_TYPES)
    }
}

// --------------------------------------------------------------------------------
// Responses
// --------------------------------------------------------------------------------

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub login: Login,
    pub name: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub local: bool,
    pub external_identity: Option<String>,
    pub external_provider: Option<String>,
    pub avatar: Option<String>,
    pub last_connection_date: Option<DateTimeString>,
    pub tokens_count: Option<u32>,
    #[serde(default)]
    pub groups: Vec<String>,
    #[serde(default)]
    pub scm_accounts: Vec<String>,
}

#[derive(Deserialize)]
struct UserResponse {
    user: User,
}

#[derive(Deserialize, Debug, Clone)]
pub struct SearchResponse {
    pub paging: Paging,
    pub users: Vec<User>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Homepage {
    #[serde(rename = "type")]
    pub homepage_type: String,
    pub component: Option<String>,
    pub branch: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub is_logged_in: bool,
    pub login: Option<Login>,
    pub name: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub local: bool,
    #[serde(default)]
    pub groups: Vec<String>,
    #[serde(default)]
    pub scm_accounts: Vec<String>,
    #[serde(default)]
    pub permissions: Permissions,
    pub homepage: Option<Homepage>,
    #[serde(default)]
    pub dismissed_notices: std::collections::HashMap<String, bool>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Permissions {
    #[serde(default)]
    pub global: Vec<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct UserGroup {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub selected: bool,
    #[serde(default)]
    pub default: bool,
}

#[derive(Deserialize, Debug, Clone)]
pub struct GroupsResponse {
    pub paging: Paging,
    pub groups: Vec<UserGroup>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationKind;
    use rstest::*;

    fn create(login: String) -> CreateOptions {
        CreateOptions {
            login,
            name: "Ada".to_string(),
            ..Default::default()
        }
    }

    #[rstest]
    #[case(LOGIN_MAX, true)]
    #[case(LOGIN_MAX + 1, false)]
    #[case(LOGIN_MIN, true)]
    #[case(LOGIN_MIN - 1, false)]
    fn test_login_length(#[case] len: usize, #[case] ok: bool) {
        let res = create("l".repeat(len)).validate();
        assert_eq!(res.is_ok(), ok);
        if let Err(e) = res {
            assert_eq!(e.field, "login");
            assert_eq!(e.kind, ValidationKind::OutOfRange);
        }
    }

    #[test]
    fn test_create_requires_login_and_name() {
        let err = create(String::new()).validate().unwrap_err();
        assert_eq!((err.field, err.kind), ("login", ValidationKind::MissingRequired));
        let options = CreateOptions {
            login: "ada".to_string(),
            ..Default::default()
        };
        let err = options.validate().unwrap_err();
        assert_eq!((err.field, err.kind), ("name", ValidationKind::MissingRequired));
    }

    #[test]
    fn test_create_email_length() {
        let mut options = create("ada".to_string());
        options.email = Some("e".repeat(EMAIL_MAX));
        assert!(options.validate().is_ok());
        options.email = Some("e".repeat(EMAIL_MAX + 1));
        assert_eq!(options.validate().unwrap_err().field, "email");
    }

    #[test]
    fn test_homepage_types() {
        for homepage_type in HOMEPAGE_TYPES.values() {
            let options = SetHomepageOptions {
                homepage_type: homepage_type.to_string(),
                ..Default::default()
            };
            assert!(options.validate().is_ok());
        }
        let options = SetHomepageOptions {
            homepage_type: "my_projects".to_string(),
            ..Default::default()
        };
        assert_eq!(options.validate().unwrap_err().kind, ValidationKind::OutOfRange);
        let err = SetHomepageOptions::default().validate().unwrap_err();
        assert_eq!(err.kind, ValidationKind::MissingRequired);
    }

    #[rstest]
    #[case("educationPrinciples", true)]
    #[case("sonarlintAd", true)]
    #[case("sonarlintad", false)]
    #[case("welcome", false)]
    fn test_notice_types(#[case] notice: &str, #[case] ok: bool) {
        let options = DismissNoticeOptions {
            notice: notice.to_string(),
        };
        assert_eq!(options.validate().is_ok(), ok);
    }

    #[rstest]
    #[case(None, true)]
    #[case(Some("all"), true)]
    #[case(Some("deselected"), true)]
    #[case(Some("selected"), true)]
    #[case(Some("none"), false)]
    fn test_groups_selected(#[case] selected: Option<&str>, #[case] ok: bool) {
        let options = GroupsOptions {
            login: "ada".to_string(),
            selected: selected.map(String::from),
            ..Default::default()
        };
        assert_eq!(options.validate().is_ok(), ok);
    }

    #[test]
    fn test_create_body() {
        let options = CreateOptions {
            login: "ada".to_string(),
            name: "Ada".to_string(),
            local: Some(true),
            scm_account: vec!["ada@github".to_string(), "ada@gitlab".to_string()],
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            serde_json::json!({
                "login": "ada",
                "name": "Ada",
                "local": true,
                "scmAccount": "ada@github,ada@gitlab"
            })
        );
    }
}
