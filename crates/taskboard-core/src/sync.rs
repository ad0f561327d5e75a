use chrono::NaiveDate;
use taskboard_shared::{
  ColumnDto,
  TaskDto
};
use tracing::{
  error,
  info
};

use crate::due::{
  DueState,
  due_state,
  format_deadline
};
use crate::error::GatewayError;
use crate::gateway::{
  TaskGateway,
  TaskSource,
  fetch_tasks
};
use crate::render::{
  RowDescriptor,
  render_row
};
use crate::store::TaskStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistItem {
  pub id:   u64,
  pub name: String
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarItem {
  pub id:       u64,
  pub name:     String,
  pub deadline: String,
  pub due:      DueState
}

pub fn checklist_items(
  store: &TaskStore
) -> Vec<ChecklistItem> {
  store
    .iter()
    .map(|task| ChecklistItem {
      id:   task.id,
      name: task.name.clone()
    })
    .collect()
}

pub fn sidebar_items(
  store: &TaskStore,
  today: NaiveDate,
  lead_days: u32
) -> Vec<SidebarItem> {
  store
    .iter()
    .map(|task| SidebarItem {
      id:       task.id,
      name:     task.name.clone(),
      deadline: task
        .due_date
        .as_deref()
        .map(format_deadline)
        .unwrap_or_default(),
      due:      due_state(
        task.due_date.as_deref(),
        today,
        lead_days
      )
    })
    .collect()
}

pub fn table_rows(
  store: &TaskStore,
  columns: &[ColumnDto]
) -> Vec<RowDescriptor> {
  store
    .iter()
    .map(|task| render_row(task, columns))
    .collect()
}

/// Holds the last successful fetch. Every
/// view is derived from it; nothing is
/// patched in place.
#[derive(
  Debug, Clone, Default, PartialEq,
)]
pub struct ViewSync {
  store:   TaskStore,
  reloads: u64
}

impl ViewSync {
  pub fn store(&self) -> &TaskStore {
    &self.store
  }

  /// Number of successful reloads so far.
  pub fn reloads(&self) -> u64 {
    self.reloads
  }

  /// Replaces the snapshot on success. A
  /// failed fetch keeps the previous views
  /// and returns false.
  pub fn apply(
    &mut self,
    fetched: Result<Vec<TaskDto>, GatewayError>
  ) -> bool {
    match fetched {
      | Ok(tasks) => {
        self.store =
          TaskStore::from_snapshot(tasks);
        self.reloads =
          self.reloads.saturating_add(1);
        info!(
          total = self.store.len(),
          reloads = self.reloads,
          "refreshed task views"
        );
        true
      }
      | Err(err) => {
        error!(error = %err, "error loading tasks");
        false
      }
    }
  }

  pub async fn reload<G>(
    &mut self,
    gateway: &G,
    source: TaskSource
  ) -> bool
  where
    G: TaskGateway + ?Sized
  {
    let fetched =
      fetch_tasks(gateway, source).await;
    self.apply(fetched)
  }

  pub fn checklist(
    &self
  ) -> Vec<ChecklistItem> {
    checklist_items(&self.store)
  }

  pub fn sidebar(
    &self,
    today: NaiveDate,
    lead_days: u32
  ) -> Vec<SidebarItem> {
    sidebar_items(
      &self.store,
      today,
      lead_days
    )
  }

  pub fn table(
    &self,
    columns: &[ColumnDto]
  ) -> Vec<RowDescriptor> {
    table_rows(&self.store, columns)
  }
}

#[cfg(test)]
mod tests {
  use std::collections::BTreeMap;

  use taskboard_shared::TaskStatus;

  use super::*;

  fn task(
    id: u64,
    due: Option<&str>
  ) -> TaskDto {
    TaskDto {
      id,
      name: format!("task {id}"),
      assignee: None,
      status: TaskStatus::Todo,
      due_date: due.map(str::to_string),
      priority: None,
      custom_fields: BTreeMap::new(),
      days: None
    }
  }

  #[test]
  fn failed_fetch_keeps_previous_views() {
    let mut sync = ViewSync::default();
    assert!(sync.apply(Ok(vec![
      task(1, None),
      task(2, None),
    ])));

    assert!(!sync.apply(Err(
      GatewayError::Network(
        "offline".to_string()
      )
    )));
    assert_eq!(sync.checklist().len(), 2);
    assert_eq!(sync.reloads(), 1);
  }

  #[test]
  fn sidebar_formats_deadlines() {
    let mut sync = ViewSync::default();
    sync.apply(Ok(vec![
      task(1, Some("2025-03-12")),
      task(2, None),
    ]));

    let today =
      NaiveDate::from_ymd_opt(2025, 3, 11)
        .expect("valid date");
    let sidebar = sync.sidebar(today, 2);

    assert_eq!(
      sidebar[0].deadline,
      "March 12th, 2025"
    );
    assert_eq!(sidebar[0].due, DueState::Soon);
    assert_eq!(sidebar[1].deadline, "");
    assert_eq!(sidebar[1].due, DueState::None);
  }
}
