//! Compute Engine: the server-side queue which processes analysis reports.

use crate::client::{SonarClient, NO_OPTIONS};
use crate::constants::{CE_TASK_ADDITIONAL_FIELDS, CE_TASK_STATUSES, CE_TASK_TYPES};
use crate::encoding::comma_separated;
use crate::errors::SonarError;
use crate::types::{ComponentKey, DateTimeString, Login, Paging, TaskId, TaskStatus};
use crate::validation::{all_of, one_of_opt, required, Validate, ValidationError};
use reqwest::Method;
use serde::{Deserialize, Serialize};

/// `api/ce`
pub struct CeApi<'a> {
    client: &'a SonarClient,
}

impl<'a> CeApi<'a> {
    pub(crate) fn new(client: &'a SonarClient) -> Self {
        Self { client }
    }

    /// Search for tasks.
    pub async fn activity(
        &self,
        options: Option<&ActivityOptions>,
    ) -> Result<ActivityResponse, SonarError> {
        self.client
            .json(Method::GET, "api/ce/activity", options)
            .await
    }

    /// Count pending, in-progress and failing tasks.
    pub async fn activity_status(
        &self,
        options: Option<&ActivityStatusOptions>,
    ) -> Result<ActivityStatus, SonarError> {
        self.client
            .json(Method::GET, "api/ce/activity_status", options)
            .await
    }

    /// Cancel a pending task.
    pub async fn cancel(&self, options: &CancelOptions) -> Result<(), SonarError> {
        self.client
            .send(Method::POST, "api/ce/cancel", Some(options))
            .await?;
        Ok(())
    }

    /// Cancel all pending tasks.
    pub async fn cancel_all(&self) -> Result<(), SonarError> {
        self.client
            .send(Method::POST, "api/ce/cancel_all", NO_OPTIONS)
            .await?;
        Ok(())
    }

    /// Get the pending tasks, in-progress tasks and the last executed task of a component.
    pub async fn component(
        &self,
        options: &ComponentOptions,
    ) -> Result<ComponentTasks, SonarError> {
        self.client
            .json(Method::GET, "api/ce/component", Some(options))
            .await
    }

    /// Get a task by ID.
    pub async fn task(&self, options: &TaskOptions) -> Result<Task, SonarError> {
        let res: TaskResponse = self
            .client
            .json(Method::GET, "api/ce/task", Some(options))
            .await?;
        Ok(res.task)
    }

    /// List the types of task which the Compute Engine can run.
    pub async fn task_types(&self) -> Result<Vec<String>, SonarError> {
        let res: TaskTypesResponse = self
            .client
            .json(Method::GET, "api/ce/task_types", NO_OPTIONS)
            .await?;
        Ok(res.task_types)
    }

    pub async fn worker_count(&self) -> Result<WorkerCount, SonarError> {
        self.client
            .json(Method::GET, "api/ce/worker_count", NO_OPTIONS)
            .await
    }
}

// --------------------------------------------------------------------------------
// Options
// --------------------------------------------------------------------------------

#[derive(Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ActivityOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_executed_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_submitted_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub only_currents: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ps: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    /// Any of `SUCCESS`, `FAILED`, `CANCELED`, `PENDING`, `IN_PROGRESS`.
    #[serde(with = "comma_separated", skip_serializing_if = "Vec::is_empty")]
    pub status: Vec<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub task_type: Option<String>,
}

impl Validate for ActivityOptions {
    fn validate(&self) -> Result<(), ValidationError> {
        all_of("status", &self.status, &CE_TASK_STATUSES)?;
        one_of_opt("type", self.task_type.as_deref(), &CE_TASK_TYPES)
    }
}

#[derive(Serialize, Debug, Clone, Default)]
pub struct ActivityStatusOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
}

impl Validate for ActivityStatusOptions {}

#[derive(Serialize, Debug, Clone, Default)]
pub struct CancelOptions {
    pub id: String,
}

impl Validate for CancelOptions {
    fn validate(&self) -> Result<(), ValidationError> {
        required("id", &self.id)
    }
}

#[derive(Serialize, Debug, Clone, Default)]
pub struct ComponentOptions {
    pub component: String,
}

impl Validate for ComponentOptions {
    fn validate(&self) -> Result<(), ValidationError> {
        required("component", &self.component)
    }
}

#[derive(Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct TaskOptions {
    pub id: String,
    /// Any of `stacktrace`, `scannerContext`, `warnings`.
    #[serde(with = "comma_separated", skip_serializing_if = "Vec::is_empty")]
    pub additional_fields: Vec<String>,
}

impl Validate for TaskOptions {
    fn validate(&self) -> Result<(), ValidationError> {
        required("id", &self.id)?;
        all_of(
            "additionalFields",
            &self.additional_fields,
            &CE_TASK_ADDITIONAL_FIELDS,
        )
    }
}

// --------------------------------------------------------------------------------
// Responses
// --------------------------------------------------------------------------------

/// A Compute Engine task.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    #[serde(rename = "type")]
    pub task_type: String,
    pub status: TaskStatus,
    pub component_id: Option<String>,
    pub component_key: Option<ComponentKey>,
    pub component_name: Option<String>,
    pub component_qualifier: Option<String>,
    pub analysis_id: Option<String>,
    pub branch: Option<String>,
    pub branch_type: Option<String>,
    pub pull_request: Option<String>,
    pub submitter_login: Option<Login>,
    pub submitted_at: Option<DateTimeString>,
    pub started_at: Option<DateTimeString>,
    pub executed_at: Option<DateTimeString>,
    pub execution_time_ms: Option<u64>,
    pub error_message: Option<String>,
    pub error_stacktrace: Option<String>,
    pub scanner_context: Option<String>,
    #[serde(default)]
    pub has_error_stacktrace: bool,
    #[serde(default)]
    pub has_scanner_context: bool,
    #[serde(default)]
    pub warning_count: u32,
    #[serde(default)]
    pub warnings: Vec<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ActivityResponse {
    pub tasks: Vec<Task>,
    pub paging: Option<Paging>,
}

#[derive(Deserialize, Debug, Clone, Copy, Default, Eq, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ActivityStatus {
    pub pending: u32,
    pub failing: u32,
    pub in_progress: u32,
    /// Age in milliseconds of the oldest pending task.
    pub pending_time: Option<u64>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ComponentTasks {
    #[serde(default)]
    pub queue: Vec<Task>,
    pub current: Option<Task>,
}

#[derive(Deserialize)]
struct TaskResponse {
    task: Task,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaskTypesResponse {
    task_types: Vec<String>,
}

#[derive(Deserialize, Debug, Clone, Copy, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkerCount {
    pub value: u32,
    pub can_set_worker_count: bool,
}
