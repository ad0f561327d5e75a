use taskboard_shared::{
  ColumnCreate,
  ColumnDto,
  ColumnType
};
use tracing::{
  error,
  info,
  warn
};

use crate::error::{
  BoardError,
  ValidationError
};
use crate::gateway::TaskGateway;

pub const FIXED_HEADERS: [&str; 5] = [
  "NAME",
  "ASSIGNEE",
  "STATUS",
  "DUE DATE",
  "PRIORITY"
];
pub const ACTIONS_HEADER: &str =
  "ACTIONS";

/// Splits a comma separated option list,
/// trimming each entry and dropping
/// empty ones.
pub fn parse_options(
  literal: &str
) -> Vec<String> {
  literal
    .split(',')
    .map(str::trim)
    .filter(|option| !option.is_empty())
    .map(str::to_string)
    .collect()
}

/// Raw values from the add-column form.
#[derive(
  Debug, Clone, Default, PartialEq, Eq,
)]
pub struct ColumnDraft {
  pub name:        String,
  pub column_type: ColumnType,
  pub options:     String
}

/// Ordered, append-only list of custom
/// columns for the page session.
#[derive(
  Debug, Clone, Default, PartialEq, Eq,
)]
pub struct ColumnRegistry {
  columns: Vec<ColumnDto>
}

impl ColumnRegistry {
  pub fn from_columns(
    columns: Vec<ColumnDto>
  ) -> Self {
    Self { columns }
  }

  pub fn columns(&self) -> &[ColumnDto] {
    &self.columns
  }

  pub fn len(&self) -> usize {
    self.columns.len()
  }

  pub fn is_empty(&self) -> bool {
    self.columns.is_empty()
  }

  pub fn contains(
    &self,
    name: &str
  ) -> bool {
    self
      .columns
      .iter()
      .any(|column| column.name == name)
  }

  /// Fixed headers, then one per column
  /// in registry order, then actions.
  pub fn headers(&self) -> Vec<String> {
    FIXED_HEADERS
      .iter()
      .map(|header| header.to_string())
      .chain(
        self
          .columns
          .iter()
          .map(|column| column.name.clone())
      )
      .chain(std::iter::once(
        ACTIONS_HEADER.to_string()
      ))
      .collect()
  }

  pub fn validate(
    &self,
    draft: &ColumnDraft
  ) -> Result<ColumnCreate, ValidationError>
  {
    let name = draft.name.trim();
    if name.is_empty() {
      return Err(
        ValidationError::EmptyColumnName
      );
    }
    if self.contains(name) {
      return Err(
        ValidationError::DuplicateColumn(
          name.to_string()
        )
      );
    }

    let options = match draft.column_type
    {
      | ColumnType::Text => None,
      | ColumnType::Select => {
        let options =
          parse_options(&draft.options);
        if options.is_empty() {
          return Err(
            ValidationError::MissingSelectOptions
          );
        }
        Some(options)
      }
    };

    Ok(ColumnCreate {
      name: name.to_string(),
      column_type: draft.column_type,
      options
    })
  }

  /// Replaces the in-memory list with the
  /// server's. On failure the previous
  /// list is kept.
  #[tracing::instrument(skip_all)]
  pub async fn load<G>(
    &mut self,
    gateway: &G
  ) -> Result<(), BoardError>
  where
    G: TaskGateway + ?Sized
  {
    match gateway.list_columns().await {
      | Ok(columns) => {
        info!(
          column_count = columns.len(),
          "loaded custom columns"
        );
        self.columns = columns;
        Ok(())
      }
      | Err(err) => {
        error!(error = %err, "error loading columns");
        Err(err.into())
      }
    }
  }

  /// Validates, submits, then reloads so
  /// the new column shows up last. Once the
  /// server accepted the column a failed
  /// reload still counts as success; the
  /// created column is appended locally.
  #[tracing::instrument(skip(self, gateway), fields(name = %draft.name, column_type = draft.column_type.as_key()))]
  pub async fn create<G>(
    &mut self,
    gateway: &G,
    draft: &ColumnDraft
  ) -> Result<(), BoardError>
  where
    G: TaskGateway + ?Sized
  {
    let create = self.validate(draft)?;
    let created = match gateway
      .create_column(&create)
      .await
    {
      | Ok(created) => created,
      | Err(err) => {
        error!(error = %err, "error creating column");
        return Err(err.into());
      }
    };
    info!(name = %create.name, "created column");

    if let Err(err) = self.load(gateway).await
    {
      warn!(error = %err, name = %created.name, "column created but reload failed; keeping local copy");
      if !self.contains(&created.name) {
        self.columns.push(created);
      }
    }
    Ok(())
  }
}
