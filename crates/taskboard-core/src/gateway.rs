use async_trait::async_trait;
use serde::Deserialize;
use taskboard_shared::{
  ChecklistTaskCreate,
  ColumnCreate,
  ColumnDto,
  ScheduleArgs,
  TaskDto,
  TaskPayload
};
use tracing::{
  debug,
  info
};

use crate::error::GatewayError;

/// Paths of the two endpoint groups the
/// board talks to.
pub mod endpoints {
  pub const TASKS: &str = "/tasks";
  pub const COLUMNS: &str = "/columns";
  pub const GET_TASKS: &str =
    "/get_tasks";
  pub const ADD_TASK: &str = "/add_task";
  pub const UPDATE_TASK: &str =
    "/update_task";

  pub fn task(id: u64) -> String {
    format!("{TASKS}/{id}")
  }

  pub fn delete_task(id: u64) -> String {
    format!("/delete_task/{id}")
  }
}

/// Stateless facade over the task
/// server. Implementations map transport
/// failures onto [`GatewayError`].
#[async_trait(?Send)]
pub trait TaskGateway {
  async fn list_tasks(
    &self
  ) -> Result<Vec<TaskDto>, GatewayError>;

  async fn create_task(
    &self,
    payload: &TaskPayload
  ) -> Result<TaskDto, GatewayError>;

  async fn update_task(
    &self,
    id: u64,
    payload: &TaskPayload
  ) -> Result<TaskDto, GatewayError>;

  async fn delete_task(
    &self,
    id: u64
  ) -> Result<(), GatewayError>;

  async fn list_columns(
    &self
  ) -> Result<Vec<ColumnDto>, GatewayError>;

  async fn create_column(
    &self,
    column: &ColumnCreate
  ) -> Result<ColumnDto, GatewayError>;

  async fn list_checklist_tasks(
    &self
  ) -> Result<Vec<TaskDto>, GatewayError>;

  async fn add_checklist_task(
    &self,
    create: &ChecklistTaskCreate
  ) -> Result<TaskDto, GatewayError>;

  async fn delete_checklist_task(
    &self,
    id: u64
  ) -> Result<(), GatewayError>;

  async fn schedule_task(
    &self,
    args: &ScheduleArgs
  ) -> Result<(), GatewayError>;
}

/// Which listing endpoint is treated as
/// the canonical task set.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TaskSource {
  #[default]
  Tasks,
  GetTasks
}

impl TaskSource {
  pub fn path(self) -> &'static str {
    match self {
      | TaskSource::Tasks => {
        endpoints::TASKS
      }
      | TaskSource::GetTasks => {
        endpoints::GET_TASKS
      }
    }
  }
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum DeleteTarget {
  Table(u64),
  Checklist(u64)
}

impl DeleteTarget {
  pub fn task_id(self) -> u64 {
    match self {
      | DeleteTarget::Table(id)
      | DeleteTarget::Checklist(id) => id
    }
  }
}

pub async fn fetch_tasks<G>(
  gateway: &G,
  source: TaskSource
) -> Result<Vec<TaskDto>, GatewayError>
where
  G: TaskGateway + ?Sized
{
  debug!(source = source.path(), "fetching canonical task list");
  match source {
    | TaskSource::Tasks => {
      gateway.list_tasks().await
    }
    | TaskSource::GetTasks => {
      gateway
        .list_checklist_tasks()
        .await
    }
  }
}

/// Callers gate this behind a user
/// confirmation.
pub async fn delete_task<G>(
  gateway: &G,
  target: DeleteTarget
) -> Result<(), GatewayError>
where
  G: TaskGateway + ?Sized
{
  info!(task_id = target.task_id(), ?target, "deleting task");
  match target {
    | DeleteTarget::Table(id) => {
      gateway.delete_task(id).await
    }
    | DeleteTarget::Checklist(id) => {
      gateway
        .delete_checklist_task(id)
        .await
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn endpoint_paths_follow_server_routes(
  ) {
    assert_eq!(endpoints::task(12), "/tasks/12");
    assert_eq!(
      endpoints::delete_task(12),
      "/delete_task/12"
    );
    assert_eq!(
      TaskSource::GetTasks.path(),
      "/get_tasks"
    );
  }
}
