use std::collections::{
  BTreeMap,
  BTreeSet
};

use serde::{
  Deserialize,
  Deserializer,
  Serialize,
  Serializer
};

/// Workflow state. Labels outside the
/// three known ones are kept verbatim in
/// `Other` so one odd row never fails a
/// whole list decode.
#[derive(
  Debug, Clone, PartialEq, Eq, Default,
)]
pub enum TaskStatus {
  #[default]
  Todo,
  InProgress,
  Done,
  Other(String)
}

impl TaskStatus {
  pub const ALL: [TaskStatus; 3] = [
    TaskStatus::Todo,
    TaskStatus::InProgress,
    TaskStatus::Done
  ];

  pub fn label(&self) -> &str {
    match self {
      | TaskStatus::Todo => "TO DO",
      | TaskStatus::InProgress => {
        "IN PROGRESS"
      }
      | TaskStatus::Done => "DONE",
      | TaskStatus::Other(label) => label
    }
  }

  /// Known labels and their aliases only.
  pub fn from_label(
    raw: &str
  ) -> Option<Self> {
    match raw.trim() {
      | "TO DO" | "TODO" => {
        Some(TaskStatus::Todo)
      }
      | "IN PROGRESS"
      | "IN_PROGRESS" => {
        Some(TaskStatus::InProgress)
      }
      | "DONE" => Some(TaskStatus::Done),
      | _ => None
    }
  }

  /// Blank means the default; anything
  /// unrecognised becomes `Other`.
  pub fn parse(raw: &str) -> Self {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
      return TaskStatus::default();
    }
    TaskStatus::from_label(trimmed)
      .unwrap_or_else(|| {
        TaskStatus::Other(trimmed.to_string())
      })
  }

  pub fn is_known(&self) -> bool {
    !matches!(self, TaskStatus::Other(_))
  }
}

impl Serialize for TaskStatus {
  fn serialize<S>(
    &self,
    serializer: S
  ) -> Result<S::Ok, S::Error>
  where
    S: Serializer
  {
    serializer.serialize_str(self.label())
  }
}

impl<'de> Deserialize<'de> for TaskStatus {
  fn deserialize<D>(
    deserializer: D
  ) -> Result<Self, D::Error>
  where
    D: Deserializer<'de>
  {
    let raw = Option::<String>::deserialize(
      deserializer
    )?;
    Ok(
      raw
        .as_deref()
        .map(TaskStatus::parse)
        .unwrap_or_default()
    )
  }
}

#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub enum TaskPriority {
  #[serde(alias = "URGENT")]
  Urgent,
  #[serde(alias = "HIGH")]
  High,
  #[serde(alias = "NORMAL")]
  Normal,
  #[serde(alias = "LOW")]
  Low
}

impl TaskPriority {
  pub const ALL: [TaskPriority; 4] = [
    TaskPriority::Urgent,
    TaskPriority::High,
    TaskPriority::Normal,
    TaskPriority::Low
  ];

  pub fn label(self) -> &'static str {
    match self {
      | TaskPriority::Urgent => "Urgent",
      | TaskPriority::High => "High",
      | TaskPriority::Normal => "Normal",
      | TaskPriority::Low => "Low"
    }
  }

  /// Case-insensitive; blank or
  /// unknown labels mean no priority.
  pub fn from_label(
    raw: &str
  ) -> Option<Self> {
    let wanted = raw.trim();
    Self::ALL.into_iter().find(
      |priority| {
        priority
          .label()
          .eq_ignore_ascii_case(wanted)
      }
    )
  }
}

/// A task as returned by `GET /tasks`
/// and `GET /get_tasks`.
#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
)]
pub struct TaskDto {
  pub id:            u64,
  #[serde(default)]
  pub name:          String,
  #[serde(
    default,
    deserialize_with = "blank_as_none"
  )]
  pub assignee:      Option<String>,
  #[serde(default)]
  pub status:        TaskStatus,
  #[serde(
    default,
    alias = "deadline",
    deserialize_with = "blank_as_none"
  )]
  pub due_date:      Option<String>,
  #[serde(
    default,
    deserialize_with = "priority_or_none"
  )]
  pub priority:      Option<TaskPriority>,
  #[serde(
    default,
    deserialize_with = "lossy_custom_fields"
  )]
  pub custom_fields:
    BTreeMap<String, String>,
  #[serde(default)]
  pub days:          Option<BTreeSet<u32>>
}

/// Full-row body for `POST /tasks` and
/// `PUT /tasks/{id}`.
#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
)]
pub struct TaskPayload {
  pub name:          String,
  pub assignee:      Option<String>,
  pub status:        TaskStatus,
  pub due_date:      Option<String>,
  pub priority:      Option<TaskPriority>,
  pub custom_fields:
    BTreeMap<String, String>
}

impl From<&TaskDto> for TaskPayload {
  fn from(task: &TaskDto) -> Self {
    Self {
      name:          task.name.clone(),
      assignee:      task.assignee.clone(),
      status:        task.status.clone(),
      due_date:      task.due_date.clone(),
      priority:      task.priority,
      custom_fields: task
        .custom_fields
        .clone()
    }
  }
}

#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  Default,
)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
  #[default]
  Text,
  Select
}

impl ColumnType {
  pub fn as_key(self) -> &'static str {
    match self {
      | ColumnType::Text => "text",
      | ColumnType::Select => "select"
    }
  }

  pub fn from_key(
    raw: &str
  ) -> Option<Self> {
    match raw
      .trim()
      .to_ascii_lowercase()
      .as_str()
    {
      | "text" => Some(ColumnType::Text),
      | "select" => {
        Some(ColumnType::Select)
      }
      | _ => None
    }
  }
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct ColumnDto {
  pub name:        String,
  #[serde(rename = "type", default)]
  pub column_type: ColumnType,
  #[serde(default)]
  pub options:     Option<Vec<String>>
}

impl ColumnDto {
  pub fn options(&self) -> &[String] {
    match self.column_type {
      | ColumnType::Select => {
        self.options.as_deref().unwrap_or(
          &[]
        )
      }
      | ColumnType::Text => &[]
    }
  }
}

/// Body for `POST /columns`; `options`
/// is null for text columns.
#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct ColumnCreate {
  pub name:        String,
  #[serde(rename = "type")]
  pub column_type: ColumnType,
  pub options:     Option<Vec<String>>
}

/// Body for `POST /add_task`.
#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
)]
pub struct ChecklistTaskCreate {
  pub name:     String,
  pub assignee: Option<String>,
  pub priority: Option<TaskPriority>,
  pub deadline: Option<String>
}

#[derive(
  Debug, Clone, Serialize, Deserialize,
)]
pub struct AddTaskResponse {
  pub task: TaskDto
}

/// Body for `POST /update_task`.
#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct ScheduleArgs {
  pub id:   u64,
  pub days: Vec<u32>
}

fn blank_as_none<'de, D>(
  deserializer: D
) -> Result<Option<String>, D::Error>
where
  D: Deserializer<'de>
{
  let raw = Option::<String>::deserialize(
    deserializer
  )?;
  Ok(raw.filter(|value| {
    !value.trim().is_empty()
  }))
}

fn priority_or_none<'de, D>(
  deserializer: D
) -> Result<Option<TaskPriority>, D::Error>
where
  D: Deserializer<'de>
{
  let raw = Option::<String>::deserialize(
    deserializer
  )?;
  Ok(
    raw
      .as_deref()
      .and_then(TaskPriority::from_label)
  )
}

fn lossy_custom_fields<'de, D>(
  deserializer: D
) -> Result<BTreeMap<String, String>, D::Error>
where
  D: Deserializer<'de>
{
  let raw = Option::<
    BTreeMap<String, Option<String>>
  >::deserialize(deserializer)?;
  Ok(
    raw
      .unwrap_or_default()
      .into_iter()
      .filter_map(|(key, value)| {
        value.map(|value| (key, value))
      })
      .collect()
  )
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn decodes_table_task_with_blank_optionals(
  ) {
    let raw = r#"{
      "id": 3,
      "name": "Write report",
      "assignee": "",
      "status": "IN PROGRESS",
      "due_date": null,
      "priority": "",
      "custom_fields": {"Sprint": "A", "Notes": null}
    }"#;

    let task: TaskDto =
      serde_json::from_str(raw)
        .expect("decode task");

    assert_eq!(task.id, 3);
    assert_eq!(task.assignee, None);
    assert_eq!(
      task.status,
      TaskStatus::InProgress
    );
    assert_eq!(task.due_date, None);
    assert_eq!(task.priority, None);
    assert_eq!(
      task.custom_fields.len(),
      1
    );
    assert_eq!(
      task
        .custom_fields
        .get("Sprint")
        .map(String::as_str),
      Some("A")
    );
    assert_eq!(task.days, None);
  }

  #[test]
  fn decodes_checklist_task_with_deadline_and_days(
  ) {
    let raw = r#"{
      "id": 7,
      "name": "Ship",
      "priority": "HIGH",
      "deadline": "2025-03-12",
      "days": [9]
    }"#;

    let task: TaskDto =
      serde_json::from_str(raw)
        .expect("decode task");

    assert_eq!(
      task.status,
      TaskStatus::Todo
    );
    assert_eq!(
      task.priority,
      Some(TaskPriority::High)
    );
    assert_eq!(
      task.due_date.as_deref(),
      Some("2025-03-12")
    );
    assert_eq!(
      task.days,
      Some(BTreeSet::from([9]))
    );
    assert!(task.custom_fields.is_empty());
  }

  #[test]
  fn text_column_create_sends_null_options(
  ) {
    let create = ColumnCreate {
      name:        "Owner".to_string(),
      column_type: ColumnType::Text,
      options:     None
    };

    let value = serde_json::to_value(&create)
      .expect("encode column");

    assert_eq!(
      value,
      serde_json::json!({
        "name": "Owner",
        "type": "text",
        "options": null
      })
    );
  }

  #[test]
  fn status_labels_match_wire_names() {
    for status in TaskStatus::ALL {
      let encoded =
        serde_json::to_string(&status)
          .expect("encode status");
      assert_eq!(
        encoded,
        format!("\"{}\"", status.label())
      );
      assert_eq!(
        TaskStatus::from_label(
          status.label()
        ),
        Some(status)
      );
    }
  }

  #[test]
  fn unknown_status_does_not_fail_the_list() {
    let raw = r#"[
      {"id": 1, "name": "Ship", "status": "DONE"},
      {"id": 2, "name": "Audit", "status": "On Hold"},
      {"id": 3, "name": "Plan", "status": null}
    ]"#;

    let tasks: Vec<TaskDto> =
      serde_json::from_str(raw)
        .expect("decode mixed statuses");

    assert_eq!(tasks.len(), 3);
    assert_eq!(tasks[0].status, TaskStatus::Done);
    assert_eq!(
      tasks[1].status,
      TaskStatus::Other("On Hold".to_string())
    );
    assert_eq!(tasks[1].status.label(), "On Hold");
    assert_eq!(tasks[2].status, TaskStatus::Todo);

    let encoded =
      serde_json::to_string(&tasks[1].status)
        .expect("encode status");
    assert_eq!(encoded, "\"On Hold\"");
  }

  #[test]
  fn text_column_ignores_stray_options() {
    let column = ColumnDto {
      name:        "Owner".to_string(),
      column_type: ColumnType::Text,
      options:     Some(vec![
        "x".to_string()
      ])
    };
    assert!(column.options().is_empty());
  }
}
