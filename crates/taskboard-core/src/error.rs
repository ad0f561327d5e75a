//! Error types shared by every board
//! operation.

use thiserror::Error;

/// Failures talking to the task server.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
  /// The request never produced a
  /// response.
  #[error("network failure: {0}")]
  Network(String),

  /// The server answered with a
  /// non-success status.
  #[error("server rejected request with status {status}: {body}")]
  Rejected { status: u16, body: String },

  /// A success response carried a body
  /// that is not the expected JSON.
  #[error("could not decode response: {0}")]
  Decode(String)
}

/// Client-side checks that block a
/// request before it is sent.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
  #[error("Task name is required")]
  EmptyTaskName,

  #[error("Column name is required")]
  EmptyColumnName,

  #[error("A column named '{0}' already exists")]
  DuplicateColumn(String),

  #[error("Select columns need at least one option")]
  MissingSelectOptions,

  #[error("task {0} is not loaded")]
  UnknownTask(u64),

  #[error("no edit is open for this row")]
  NotEditing,

  #[error("day {0} is outside the calendar grid")]
  DayOutsideGrid(u32)
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardError {
  #[error(transparent)]
  Gateway(#[from] GatewayError),

  #[error(transparent)]
  Validation(#[from] ValidationError)
}

impl BoardError {
  /// Validation failures are shown to
  /// the user; gateway failures are only
  /// logged.
  pub fn is_validation(&self) -> bool {
    matches!(self, BoardError::Validation(_))
  }
}
