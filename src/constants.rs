//! Accepted values and length limits of request parameters.

use crate::validation::AllowedSet;

pub static CE_TASK_STATUSES: AllowedSet =
    AllowedSet::new(&["SUCCESS", "FAILED", "CANCELED", "PENDING", "IN_PROGRESS"]);

pub static CE_TASK_TYPES: AllowedSet = AllowedSet::new(&[
    "REPORT",
    "ISSUE_SYNC",
    "AUDIT_PURGE",
    "PROJECT_EXPORT",
    "PROJECT_IMPORT",
    "APP_REFRESH",
    "VIEW_REFRESH",
]);

pub static CE_TASK_ADDITIONAL_FIELDS: AllowedSet =
    AllowedSet::new(&["stacktrace", "scannerContext", "warnings"]);

pub static LOG_LEVELS: AllowedSet = AllowedSet::new(&["TRACE", "DEBUG", "INFO"]);

pub static LOG_NAMES: AllowedSet = AllowedSet::new(&["access", "app", "ce", "deprecation", "es", "web"]);

pub static HOMEPAGE_TYPES: AllowedSet = AllowedSet::new(&[
    "PROJECT",
    "ORGANIZATION",
    "MY_PROJECTS",
    "MY_ISSUES",
    "ISSUES",
    "PORTFOLIO",
    "PORTFOLIOS",
    "APPLICATION",
    "PROJECTS",
]);

pub static NOTICE_TYPES: AllowedSet = AllowedSet::new(&["educationPrinciples", "sonarlintAd"]);

pub static PLUGIN_TYPES: AllowedSet = AllowedSet::new(&["BUNDLED", "EXTERNAL"]);

pub static PLUGIN_FIELDS: AllowedSet = AllowedSet::new(&["category"]);

pub static SELECTED_FILTERS: AllowedSet = AllowedSet::new(&["all", "deselected", "selected"]);

pub static PROJECT_VISIBILITIES: AllowedSet = AllowedSet::new(&["private", "public"]);

pub static PROJECT_QUALIFIERS: AllowedSet = AllowedSet::new(&["TRK", "VW", "APP"]);

pub static USER_GROUP_FIELDS: AllowedSet = AllowedSet::new(&["name", "description", "membersCount"]);

pub const PROJECT_KEY_MAX: usize = 400;
pub const PROJECT_NAME_MAX: usize = 500;
pub const LOGIN_MIN: usize = 2;
pub const LOGIN_MAX: usize = 255;
pub const USER_NAME_MAX: usize = 200;
pub const EMAIL_MAX: usize = 100;
pub const GROUP_NAME_MAX: usize = 255;
pub const GROUP_DESCRIPTION_MAX: usize = 200;
pub const TOKEN_NAME_MAX: usize = 100;
