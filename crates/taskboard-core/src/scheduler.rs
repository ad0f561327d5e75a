use std::collections::BTreeMap;

use taskboard_shared::ScheduleArgs;
use tracing::{
  error,
  info,
  warn
};

use crate::config::GanttConfig;
use crate::error::{
  BoardError,
  ValidationError
};
use crate::gateway::TaskGateway;
use crate::store::TaskStore;
use crate::sync::ChecklistItem;

pub const WEEKDAY_NAMES: [&str; 7] = [
  "Mon", "Tue", "Wed", "Thu", "Fri",
  "Sat", "Sun"
];

/// Drag data key set by checklist items.
pub const DRAG_DATA_KEY: &str = "taskId";

pub fn weekday_label(day: u32) -> String {
  format!(
    "{} {day}",
    WEEKDAY_NAMES[(day % 7) as usize]
  )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
  pub index: u32,
  pub label: String
}

/// Fixed strip of consecutive day
/// indices.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub struct DayGrid {
  start: u32,
  count: u32
}

impl Default for DayGrid {
  fn default() -> Self {
    Self::from_config(
      &GanttConfig::default()
    )
  }
}

impl DayGrid {
  pub fn new(
    start: u32,
    count: u32
  ) -> Self {
    Self { start, count }
  }

  pub fn from_config(
    config: &GanttConfig
  ) -> Self {
    Self::new(
      config.start_day,
      config.day_count
    )
  }

  pub fn contains(
    &self,
    day: u32
  ) -> bool {
    day >= self.start
      && day - self.start < self.count
  }

  pub fn cells(&self) -> Vec<DayCell> {
    (self.start
      ..self.start.saturating_add(self.count))
      .map(|index| DayCell {
        index,
        label: weekday_label(index)
      })
      .collect()
  }

  /// A drop always replaces the task's
  /// days with exactly `{day}`.
  pub fn schedule_args(
    &self,
    task_id: u64,
    day: u32
  ) -> Result<ScheduleArgs, ValidationError>
  {
    if !self.contains(day) {
      return Err(
        ValidationError::DayOutsideGrid(day)
      );
    }
    Ok(ScheduleArgs {
      id:   task_id,
      days: vec![day]
    })
  }

  /// Tasks placed on each visible day.
  pub fn assignments(
    &self,
    store: &TaskStore
  ) -> BTreeMap<u32, Vec<ChecklistItem>> {
    let mut by_day: BTreeMap<
      u32,
      Vec<ChecklistItem>
    > = BTreeMap::new();
    for task in store.iter() {
      let Some(days) = &task.days else {
        continue;
      };
      for day in days
        .iter()
        .copied()
        .filter(|day| self.contains(*day))
      {
        by_day.entry(day).or_default().push(
          ChecklistItem {
            id:   task.id,
            name: task.name.clone()
          }
        );
      }
    }
    by_day
  }
}

pub fn parse_drop_payload(
  raw: &str
) -> Option<u64> {
  raw.trim().parse::<u64>().ok()
}

#[tracing::instrument(skip(gateway, grid))]
pub async fn schedule_task<G>(
  gateway: &G,
  grid: &DayGrid,
  task_id: u64,
  day: u32
) -> Result<(), BoardError>
where
  G: TaskGateway + ?Sized
{
  let args = grid
    .schedule_args(task_id, day)
    .inspect_err(|err| {
      warn!(error = %err, "ignored drop")
    })?;
  match gateway.schedule_task(&args).await {
    | Ok(()) => {
      info!(task_id, day, "scheduled task");
      Ok(())
    }
    | Err(err) => {
      error!(error = %err, task_id, day, "error scheduling task");
      Err(err.into())
    }
  }
}

#[cfg(test)]
mod tests {
  use std::collections::{
    BTreeMap,
    BTreeSet
  };

  use taskboard_shared::{
    TaskDto,
    TaskStatus
  };

  use super::*;

  #[test]
  fn grid_cycles_weekday_names_by_index() {
    let cells = DayGrid::default().cells();
    assert_eq!(cells.len(), 10);
    assert_eq!(cells[0].index, 4);
    assert_eq!(cells[0].label, "Fri 4");
    assert_eq!(cells[3].label, "Mon 7");
    assert_eq!(cells[9].label, "Sun 13");
  }

  #[test]
  fn grid_near_the_top_of_the_range_stops_at_max() {
    let grid = DayGrid::new(u32::MAX - 2, 10);
    let cells = grid.cells();
    assert_eq!(cells.len(), 2);
    assert!(
      cells
        .iter()
        .all(|cell| grid.contains(cell.index))
    );
    assert!(!grid.contains(u32::MAX - 3));
  }

  #[test]
  fn drop_replaces_with_single_day() {
    let grid = DayGrid::default();
    assert_eq!(
      grid.schedule_args(7, 9),
      Ok(ScheduleArgs {
        id:   7,
        days: vec![9]
      })
    );
    assert_eq!(
      grid.schedule_args(7, 14),
      Err(ValidationError::DayOutsideGrid(
        14
      ))
    );
    assert_eq!(
      grid.schedule_args(7, 3),
      Err(ValidationError::DayOutsideGrid(3))
    );
  }

  #[test]
  fn drop_payload_must_be_an_id() {
    assert_eq!(parse_drop_payload(" 7 "), Some(7));
    assert_eq!(parse_drop_payload(""), None);
    assert_eq!(parse_drop_payload("seven"), None);
  }

  #[test]
  fn assignments_only_cover_visible_days() {
    let store = TaskStore::from_snapshot(vec![
      TaskDto {
        id:            7,
        name:          "Ship".to_string(),
        assignee:      None,
        status:        TaskStatus::Todo,
        due_date:      None,
        priority:      None,
        custom_fields: BTreeMap::new(),
        days:          Some(BTreeSet::from([
          2, 9
        ]))
      },
    ]);

    let by_day =
      DayGrid::default().assignments(&store);
    assert_eq!(by_day.len(), 1);
    assert_eq!(by_day[&9][0].name, "Ship");
  }
}
