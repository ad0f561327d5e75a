use taskboard_shared::{
  ChecklistTaskCreate,
  TaskDto,
  TaskPriority
};
use tracing::{
  error,
  info
};

use crate::error::{
  BoardError,
  ValidationError
};
use crate::gateway::TaskGateway;

/// Raw values from the add-task modal on
/// the calendar page.
#[derive(
  Debug, Clone, Default, PartialEq, Eq,
)]
pub struct ChecklistDraft {
  pub name:     String,
  pub assignee: String,
  pub priority: String,
  pub deadline: String
}

fn optional_text(
  value: &str
) -> Option<String> {
  let trimmed = value.trim();
  if trimmed.is_empty() {
    None
  } else {
    Some(trimmed.to_string())
  }
}

impl ChecklistDraft {
  pub fn validate(
    &self
  ) -> Result<ChecklistTaskCreate, ValidationError>
  {
    let name = self.name.trim();
    if name.is_empty() {
      return Err(
        ValidationError::EmptyTaskName
      );
    }
    Ok(ChecklistTaskCreate {
      name:     name.to_string(),
      assignee: optional_text(
        &self.assignee
      ),
      priority: TaskPriority::from_label(
        &self.priority
      ),
      deadline: optional_text(
        &self.deadline
      )
    })
  }
}

#[tracing::instrument(skip_all)]
pub async fn add_checklist_task<G>(
  gateway: &G,
  draft: &ChecklistDraft
) -> Result<TaskDto, BoardError>
where
  G: TaskGateway + ?Sized
{
  let create = draft.validate()?;
  match gateway
    .add_checklist_task(&create)
    .await
  {
    | Ok(task) => {
      info!(task_id = task.id, "added checklist task");
      Ok(task)
    }
    | Err(err) => {
      error!(error = %err, "error adding checklist task");
      Err(err.into())
    }
  }
}
