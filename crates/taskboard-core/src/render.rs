//! Maps a task and the current columns
//! onto the cells of one table row.

use taskboard_shared::{
  ColumnDto,
  TaskDto,
  TaskPriority,
  TaskStatus
};

pub const NO_PRIORITY_CLASS: &str =
  "none";
pub const NO_PRIORITY_LABEL: &str =
  "None";

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum PillKind {
  Status,
  Priority
}

impl PillKind {
  fn base_class(self) -> &'static str {
    match self {
      | PillKind::Status => "status-pill",
      | PillKind::Priority => {
        "priority-pill"
      }
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pill {
  pub kind:  PillKind,
  pub class: String,
  pub label: String
}

impl Pill {
  pub fn css_class(&self) -> String {
    format!(
      "{} {}",
      self.kind.base_class(),
      self.class
    )
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
  Text(String),
  Pill(Pill),
  Actions
}

impl Cell {
  /// What the cell shows to the user.
  pub fn display_text(&self) -> &str {
    match self {
      | Cell::Text(text) => text.as_str(),
      | Cell::Pill(pill) => pill.label.as_str(),
      | Cell::Actions => ""
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowDescriptor {
  pub id:    u64,
  pub cells: Vec<Cell>
}

/// Lowercases and hyphenates only the
/// first space: "IN PROGRESS" becomes
/// "in-progress".
pub fn status_pill_class(
  label: &str
) -> String {
  label.to_lowercase().replacen(' ', "-", 1)
}

pub fn status_pill(
  status: &TaskStatus
) -> Pill {
  let label = status.label();
  Pill {
    kind:  PillKind::Status,
    class: status_pill_class(label),
    label: label.to_string()
  }
}

/// Lowercase only; no hyphenation.
pub fn priority_pill(
  priority: Option<TaskPriority>
) -> Pill {
  match priority {
    | Some(priority) => {
      Pill {
        kind:  PillKind::Priority,
        class: priority
          .label()
          .to_lowercase(),
        label: priority.label().to_string()
      }
    }
    | None => {
      Pill {
        kind:  PillKind::Priority,
        class: NO_PRIORITY_CLASS
          .to_string(),
        label: NO_PRIORITY_LABEL
          .to_string()
      }
    }
  }
}

/// Custom value for a column, empty when
/// the task predates the column.
pub fn custom_value<'a>(
  task: &'a TaskDto,
  column: &ColumnDto
) -> &'a str {
  task
    .custom_fields
    .get(&column.name)
    .map(String::as_str)
    .unwrap_or("")
}

pub fn render_row(
  task: &TaskDto,
  columns: &[ColumnDto]
) -> RowDescriptor {
  let mut cells = Vec::with_capacity(
    6 + columns.len()
  );
  cells.push(Cell::Text(task.name.clone()));
  cells.push(Cell::Text(
    task.assignee.clone().unwrap_or_default()
  ));
  cells.push(Cell::Pill(status_pill(
    &task.status
  )));
  cells.push(Cell::Text(
    task.due_date.clone().unwrap_or_default()
  ));
  cells.push(Cell::Pill(priority_pill(
    task.priority
  )));
  cells.extend(columns.iter().map(
    |column| {
      Cell::Text(
        custom_value(task, column)
          .to_string()
      )
    }
  ));
  cells.push(Cell::Actions);

  RowDescriptor { id: task.id, cells }
}

#[cfg(test)]
mod tests {
  use std::collections::BTreeMap;

  use taskboard_shared::ColumnType;

  use super::*;

  fn bare_task() -> TaskDto {
    TaskDto {
      id:            1,
      name:          "Plan".to_string(),
      assignee:      None,
      status:        TaskStatus::Todo,
      due_date:      None,
      priority:      None,
      custom_fields: BTreeMap::new(),
      days:          None
    }
  }

  fn column(name: &str) -> ColumnDto {
    ColumnDto {
      name:        name.to_string(),
      column_type: ColumnType::Text,
      options:     None
    }
  }

  #[test]
  fn pill_classes_follow_label_rules() {
    assert_eq!(
      status_pill(&TaskStatus::InProgress)
        .class,
      "in-progress"
    );
    assert_eq!(
      status_pill(&TaskStatus::Todo).class,
      "to-do"
    );
    assert_eq!(
      priority_pill(Some(
        TaskPriority::High
      ))
      .class,
      "high"
    );

    let none = priority_pill(None);
    assert_eq!(none.class, "none");
    assert_eq!(none.label, "None");
    assert_eq!(
      none.css_class(),
      "priority-pill none"
    );
  }

  #[test]
  fn status_class_replaces_only_first_space(
  ) {
    assert_eq!(
      status_pill_class("ON HOLD NOW"),
      "on-hold now"
    );
  }

  #[test]
  fn unknown_status_renders_its_own_label() {
    let pill = status_pill(&TaskStatus::Other(
      "Reviewed & Approved".to_string()
    ));
    assert_eq!(pill.label, "Reviewed & Approved");
    assert_eq!(
      pill.class,
      "reviewed-& approved"
    );
  }

  #[test]
  fn absent_optionals_render_empty() {
    let columns =
      vec![column("Sprint"), column("Notes")];
    let row =
      render_row(&bare_task(), &columns);

    assert_eq!(row.cells.len(), 8);
    for cell in &row.cells {
      let text = cell.display_text();
      assert_ne!(text, "null");
      assert_ne!(text, "undefined");
    }
    assert_eq!(row.cells[1].display_text(), "");
    assert_eq!(row.cells[3].display_text(), "");
    assert_eq!(row.cells[5].display_text(), "");
    assert_eq!(row.cells[7], Cell::Actions);
  }

  #[test]
  fn appending_a_column_keeps_earlier_cells(
  ) {
    let mut task = bare_task();
    task.custom_fields.insert(
      "Sprint".to_string(),
      "A".to_string()
    );

    let before =
      render_row(&task, &[column("Sprint")]);
    let after = render_row(
      &task,
      &[column("Sprint"), column("Owner")]
    );

    assert_eq!(
      after.cells.len(),
      before.cells.len() + 1
    );
    assert_eq!(
      after.cells[..6],
      before.cells[..6]
    );
    assert_eq!(after.cells[6], Cell::Text(String::new()));
  }
}
