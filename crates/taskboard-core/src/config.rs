use anyhow::Context;
use serde::Deserialize;
use tracing::{
  debug,
  warn
};

use crate::gateway::TaskSource;

fn default_gantt_start_day() -> u32 {
  4
}

fn default_gantt_day_count() -> u32 {
  10
}

fn default_due_lead_days() -> u32 {
  2
}

#[derive(
  Debug, Clone, PartialEq, Eq, Deserialize,
)]
pub struct GanttConfig {
  #[serde(default = "default_gantt_start_day")]
  pub start_day: u32,
  #[serde(default = "default_gantt_day_count")]
  pub day_count: u32
}

impl Default for GanttConfig {
  fn default() -> Self {
    Self {
      start_day: default_gantt_start_day(),
      day_count: default_gantt_day_count()
    }
  }
}

#[derive(
  Debug, Clone, PartialEq, Eq, Deserialize,
)]
pub struct DueConfig {
  #[serde(default = "default_due_lead_days")]
  pub lead_days: u32
}

impl Default for DueConfig {
  fn default() -> Self {
    Self {
      lead_days: default_due_lead_days()
    }
  }
}

#[derive(
  Debug, Clone, PartialEq, Eq, Deserialize,
)]
pub struct BoardConfig {
  /// Prefix for every endpoint path;
  /// empty means same origin.
  #[serde(default)]
  pub api_base:    String,
  #[serde(default)]
  pub task_source: TaskSource,
  #[serde(default)]
  pub gantt:       GanttConfig,
  #[serde(default)]
  pub due:         DueConfig
}

impl Default for BoardConfig {
  fn default() -> Self {
    Self {
      api_base:    String::new(),
      task_source: TaskSource::default(),
      gantt:       GanttConfig::default(),
      due:         DueConfig::default()
    }
  }
}

impl BoardConfig {
  pub fn from_toml_str(
    raw: &str
  ) -> anyhow::Result<Self> {
    let mut config =
      toml::from_str::<BoardConfig>(raw)
        .context(
          "failed to parse board config"
        )?;
    config.sanitize();
    debug!(
      api_base = %config.api_base,
      task_source = config.task_source.path(),
      "parsed board config"
    );
    Ok(config)
  }

  pub fn sanitize(&mut self) {
    let trimmed = self
      .api_base
      .trim()
      .trim_end_matches('/')
      .to_string();
    self.api_base = trimmed;

    if self.gantt.day_count == 0 {
      warn!(
        "gantt day_count was 0; using \
         default window"
      );
      self.gantt.day_count =
        default_gantt_day_count();
    }
    if self.gantt.day_count > 31 {
      self.gantt.day_count = 31;
    }
  }

  pub fn url(&self, path: &str) -> String {
    format!("{}{path}", self.api_base)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_file_uses_defaults() {
    let config =
      BoardConfig::from_toml_str("")
        .expect("parse empty config");
    assert_eq!(config, BoardConfig::default());
    assert_eq!(config.gantt.start_day, 4);
    assert_eq!(config.gantt.day_count, 10);
    assert_eq!(config.due.lead_days, 2);
  }

  #[test]
  fn sanitizes_base_and_day_window() {
    let config = BoardConfig::from_toml_str(
      r#"
api_base = "http://localhost:5000/"
task_source = "get_tasks"

[gantt]
day_count = 0
"#
    )
    .expect("parse config");

    assert_eq!(
      config.url("/tasks"),
      "http://localhost:5000/tasks"
    );
    assert_eq!(
      config.task_source,
      TaskSource::GetTasks
    );
    assert_eq!(config.gantt.day_count, 10);
  }

  #[test]
  fn retired_keys_are_ignored() {
    let config = BoardConfig::from_toml_str(
      "confirm_deletes = false"
    )
    .expect("parse config with stale key");
    assert_eq!(config, BoardConfig::default());
  }

  #[test]
  fn rejects_unknown_task_source() {
    assert!(
      BoardConfig::from_toml_str(
        "task_source = \"elsewhere\""
      )
      .is_err()
    );
  }
}
