//! Inline editing for table rows.
//!
//! One edit session exists at a time.
//! Opening a second one force-cancels the
//! first, and every completion carries the
//! session token so late responses for a
//! replaced session are ignored. Form
//! fields are keyed, and the save payload
//! is assembled by key, never by position.

use std::collections::{
  BTreeMap,
  BTreeSet
};

use taskboard_shared::{
  ColumnDto,
  ColumnType,
  TaskDto,
  TaskPayload,
  TaskPriority,
  TaskStatus
};
use tracing::{
  debug,
  info,
  warn
};
use uuid::Uuid;

use crate::error::{
  GatewayError,
  ValidationError
};
use crate::gateway::TaskGateway;
use crate::render::NO_PRIORITY_LABEL;
use crate::store::TaskStore;

#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
)]
pub enum FieldKey {
  Name,
  Assignee,
  Status,
  DueDate,
  Priority,
  Custom(String)
}

impl FieldKey {
  /// Stable DOM key, e.g. `due_date` or
  /// `custom:Sprint`.
  pub fn as_key(&self) -> String {
    match self {
      | FieldKey::Name => "name".to_string(),
      | FieldKey::Assignee => {
        "assignee".to_string()
      }
      | FieldKey::Status => {
        "status".to_string()
      }
      | FieldKey::DueDate => {
        "due_date".to_string()
      }
      | FieldKey::Priority => {
        "priority".to_string()
      }
      | FieldKey::Custom(name) => {
        format!("custom:{name}")
      }
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
  pub value: String,
  pub label: String
}

impl SelectOption {
  fn same(value: &str) -> Self {
    Self {
      value: value.to_string(),
      label: value.to_string()
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldInput {
  Text,
  Date,
  Select(Vec<SelectOption>)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditField {
  pub key:   FieldKey,
  pub input: FieldInput,
  pub value: String
}

/// Known statuses, plus the current one
/// when the server sent a label outside
/// them.
fn status_options(
  current: &TaskStatus
) -> Vec<SelectOption> {
  let mut options: Vec<SelectOption> =
    TaskStatus::ALL
      .iter()
      .map(|status| {
        SelectOption::same(status.label())
      })
      .collect();
  if !current.is_known() {
    options
      .push(SelectOption::same(current.label()));
  }
  options
}

fn priority_options() -> Vec<SelectOption>
{
  std::iter::once(SelectOption {
    value: String::new(),
    label: NO_PRIORITY_LABEL.to_string()
  })
  .chain(TaskPriority::ALL.iter().map(
    |priority| {
      SelectOption::same(priority.label())
    }
  ))
  .collect()
}

/// Empty choice first; a stored value
/// missing from the options stays
/// selectable so an unchanged save keeps
/// it.
fn column_options(
  column: &ColumnDto,
  current: &str
) -> Vec<SelectOption> {
  let mut options =
    vec![SelectOption::same("")];
  options.extend(
    column
      .options()
      .iter()
      .map(|option| SelectOption::same(option))
  );
  if !current.is_empty()
    && !column
      .options()
      .iter()
      .any(|option| option == current)
  {
    options.push(SelectOption::same(
      current
    ));
  }
  options
}

fn column_input(
  column: &ColumnDto,
  current: &str
) -> FieldInput {
  match column.column_type {
    | ColumnType::Text => FieldInput::Text,
    | ColumnType::Select => {
      FieldInput::Select(column_options(
        column, current
      ))
    }
  }
}

fn blank_as_none(
  value: &str
) -> Option<String> {
  if value.trim().is_empty() {
    None
  } else {
    Some(value.to_string())
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditForm {
  fields:   Vec<EditField>,
  /// Custom values for keys that are no
  /// longer registered columns.
  retained: BTreeMap<String, String>,
  /// Custom keys the task already carried,
  /// even with an empty value.
  stored:   BTreeSet<String>
}

impl EditForm {
  /// Defaults come from the stored task,
  /// not from what the row rendered.
  pub fn for_task(
    task: &TaskDto,
    columns: &[ColumnDto]
  ) -> Self {
    let mut fields = vec![
      EditField {
        key:   FieldKey::Name,
        input: FieldInput::Text,
        value: task.name.clone()
      },
      EditField {
        key:   FieldKey::Assignee,
        input: FieldInput::Text,
        value: task
          .assignee
          .clone()
          .unwrap_or_default()
      },
      EditField {
        key:   FieldKey::Status,
        input: FieldInput::Select(
          status_options(&task.status)
        ),
        value: task.status.label().to_string()
      },
      EditField {
        key:   FieldKey::DueDate,
        input: FieldInput::Date,
        value: task
          .due_date
          .clone()
          .unwrap_or_default()
      },
      EditField {
        key:   FieldKey::Priority,
        input: FieldInput::Select(
          priority_options()
        ),
        value: task
          .priority
          .map(|priority| {
            priority.label().to_string()
          })
          .unwrap_or_default()
      },
    ];

    for column in columns {
      let current = task
        .custom_fields
        .get(&column.name)
        .cloned()
        .unwrap_or_default();
      fields.push(EditField {
        key:   FieldKey::Custom(
          column.name.clone()
        ),
        input: column_input(
          column, &current
        ),
        value: current
      });
    }

    let retained = task
      .custom_fields
      .iter()
      .filter(|(name, _)| {
        !columns
          .iter()
          .any(|column| &column.name == *name)
      })
      .map(|(name, value)| {
        (name.clone(), value.clone())
      })
      .collect();

    let stored = task
      .custom_fields
      .keys()
      .cloned()
      .collect();

    Self {
      fields,
      retained,
      stored
    }
  }

  /// Form for a row that does not exist
  /// on the server yet.
  pub fn blank(
    columns: &[ColumnDto]
  ) -> Self {
    let empty = TaskDto {
      id:            0,
      name:          String::new(),
      assignee:      None,
      status:        TaskStatus::default(),
      due_date:      None,
      priority:      None,
      custom_fields: BTreeMap::new(),
      days:          None
    };
    Self::for_task(&empty, columns)
  }

  pub fn fields(&self) -> &[EditField] {
    &self.fields
  }

  /// Registered column names the form
  /// has a field for, in order.
  pub fn column_names(
    &self
  ) -> Vec<&str> {
    self
      .fields
      .iter()
      .filter_map(|field| match &field.key {
        | FieldKey::Custom(name) => {
          Some(name.as_str())
        }
        | _ => None
      })
      .collect()
  }

  /// Re-aligns the custom fields with a
  /// new column list. Typed values survive;
  /// a newly registered column picks up a
  /// retained value if the task had one.
  pub fn rebind_columns(
    &mut self,
    columns: &[ColumnDto]
  ) {
    let mut previous: BTreeMap<
      String,
      String
    > = std::mem::take(&mut self.retained);
    let stored = &self.stored;
    self.fields.retain(|field| {
      match &field.key {
        | FieldKey::Custom(name) => {
          if !field.value.is_empty()
            || stored.contains(name)
          {
            previous.insert(
              name.clone(),
              field.value.clone()
            );
          }
          false
        }
        | _ => true
      }
    });

    for column in columns {
      let current = previous
        .remove(&column.name)
        .unwrap_or_default();
      self.fields.push(EditField {
        key:   FieldKey::Custom(
          column.name.clone()
        ),
        input: column_input(
          column, &current
        ),
        value: current
      });
    }
    self.retained = previous;
  }

  pub fn value(
    &self,
    key: &FieldKey
  ) -> Option<&str> {
    self
      .fields
      .iter()
      .find(|field| &field.key == key)
      .map(|field| field.value.as_str())
  }

  /// Returns false for keys the form does
  /// not contain.
  pub fn set(
    &mut self,
    key: &FieldKey,
    value: impl Into<String>
  ) -> bool {
    match self
      .fields
      .iter_mut()
      .find(|field| &field.key == key)
    {
      | Some(field) => {
        field.value = value.into();
        true
      }
      | None => false
    }
  }

  /// Empty custom values are sent only
  /// for keys the task already stored, so
  /// an unchanged save returns the same
  /// map.
  pub fn to_payload(&self) -> TaskPayload {
    let text = |key: &FieldKey| {
      self.value(key).unwrap_or("")
    };

    let mut custom_fields =
      self.retained.clone();
    for field in &self.fields {
      if let FieldKey::Custom(name) =
        &field.key
        && (!field.value.is_empty()
          || self.stored.contains(name))
      {
        custom_fields.insert(
          name.clone(),
          field.value.clone()
        );
      }
    }

    TaskPayload {
      name: text(&FieldKey::Name)
        .to_string(),
      assignee: blank_as_none(text(
        &FieldKey::Assignee
      )),
      status: TaskStatus::parse(text(
        &FieldKey::Status
      )),
      due_date: blank_as_none(text(
        &FieldKey::DueDate
      )),
      priority: TaskPriority::from_label(
        text(&FieldKey::Priority)
      ),
      custom_fields
    }
  }
}

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
)]
pub struct EditToken(Uuid);

impl EditToken {
  fn fresh() -> Self {
    Self(Uuid::new_v4())
  }
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum EditTarget {
  Existing(u64),
  New
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
  pub token:  EditToken,
  pub target: EditTarget,
  pub form:   EditForm
}

#[derive(Debug, Clone, PartialEq)]
pub struct SaveRequest {
  pub token:   EditToken,
  pub target:  EditTarget,
  pub payload: TaskPayload
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum CancelOutcome {
  /// The session was closed; reload to
  /// restore the row.
  Reload,
  Ignored
}

/// The page-wide editing slot.
#[derive(
  Debug, Clone, Default, PartialEq, Eq,
)]
pub struct EditController {
  session: Option<EditSession>
}

impl EditController {
  pub fn session(
    &self
  ) -> Option<&EditSession> {
    self.session.as_ref()
  }

  pub fn editing_id(&self) -> Option<u64> {
    match self.session.as_ref()?.target {
      | EditTarget::Existing(id) => Some(id),
      | EditTarget::New => None
    }
  }

  pub fn is_editing(
    &self,
    id: u64
  ) -> bool {
    self.editing_id() == Some(id)
  }

  pub fn new_row(
    &self
  ) -> Option<&EditSession> {
    self.session.as_ref().filter(
      |session| {
        session.target == EditTarget::New
      }
    )
  }

  fn open(
    &mut self,
    target: EditTarget,
    form: EditForm
  ) -> (EditToken, Option<EditSession>) {
    let token = EditToken::fresh();
    let displaced = self.session.replace(
      EditSession { token, target, form }
    );
    if let Some(previous) = &displaced {
      info!(
        previous = ?previous.target,
        next = ?target,
        "force-cancelled open edit"
      );
    }
    (token, displaced)
  }

  /// Opens an edit for a loaded task and
  /// returns the session it displaced,
  /// if any.
  pub fn start_editing(
    &mut self,
    id: u64,
    store: &TaskStore,
    columns: &[ColumnDto]
  ) -> Result<Option<EditSession>, ValidationError>
  {
    let task = store.get(id).ok_or(
      ValidationError::UnknownTask(id)
    )?;
    let form =
      EditForm::for_task(task, columns);
    let (_, displaced) = self.open(
      EditTarget::Existing(id),
      form
    );
    debug!(task_id = id, "started editing");
    Ok(displaced)
  }

  pub fn add_new_task(
    &mut self,
    columns: &[ColumnDto]
  ) -> Option<EditSession> {
    let (_, displaced) = self.open(
      EditTarget::New,
      EditForm::blank(columns)
    );
    debug!("opened new task row");
    displaced
  }

  /// Input events from a replaced session
  /// are dropped.
  pub fn update_field(
    &mut self,
    token: EditToken,
    key: &FieldKey,
    value: impl Into<String>
  ) -> bool {
    match self.session.as_mut() {
      | Some(session)
        if session.token == token =>
      {
        session.form.set(key, value)
      }
      | _ => {
        warn!(
          field = %key.as_key(),
          "input for a closed edit \
           session"
        );
        false
      }
    }
  }

  pub fn prepare_save(
    &self,
    id: u64
  ) -> Result<SaveRequest, ValidationError>
  {
    match self.session.as_ref() {
      | Some(session)
        if session.target
          == EditTarget::Existing(id) =>
      {
        Ok(SaveRequest {
          token:   session.token,
          target:  session.target,
          payload: session.form.to_payload()
        })
      }
      | _ => Err(ValidationError::NotEditing)
    }
  }

  /// Only rule enforced on creation: the
  /// name must not be blank.
  pub fn prepare_save_new(
    &self
  ) -> Result<SaveRequest, ValidationError>
  {
    let session = self
      .new_row()
      .ok_or(ValidationError::NotEditing)?;
    let payload = session.form.to_payload();
    if payload.name.trim().is_empty() {
      return Err(
        ValidationError::EmptyTaskName
      );
    }
    Ok(SaveRequest {
      token: session.token,
      target: session.target,
      payload
    })
  }

  /// Closes the session after a confirmed
  /// save. Returns false when the token no
  /// longer matches.
  pub fn finish_save(
    &mut self,
    token: EditToken
  ) -> bool {
    if self
      .session
      .as_ref()
      .is_some_and(|session| {
        session.token == token
      })
    {
      self.session = None;
      true
    } else {
      debug!(
        "save completed for a replaced \
         session"
      );
      false
    }
  }

  pub fn cancel_edit(
    &mut self,
    id: u64
  ) -> CancelOutcome {
    if self.is_editing(id) {
      self.session = None;
      debug!(task_id = id, "cancelled edit");
      CancelOutcome::Reload
    } else {
      CancelOutcome::Ignored
    }
  }

  pub fn cancel_new_task(
    &mut self
  ) -> CancelOutcome {
    if self.new_row().is_some() {
      self.session = None;
      CancelOutcome::Reload
    } else {
      CancelOutcome::Ignored
    }
  }

  /// Rebuilds the open form when the
  /// registered columns changed. Returns
  /// true when the form was touched.
  pub fn sync_columns(
    &mut self,
    columns: &[ColumnDto]
  ) -> bool {
    let Some(session) = self.session.as_mut()
    else {
      return false;
    };
    let unchanged = session
      .form
      .column_names()
      .into_iter()
      .eq(columns
        .iter()
        .map(|column| column.name.as_str()));
    if unchanged {
      return false;
    }
    session.form.rebind_columns(columns);
    debug!(
      column_count = columns.len(),
      "rebuilt edit form for new columns"
    );
    true
  }

  /// Called after every reload. The
  /// transient new row never survives one;
  /// an edit whose task disappeared is
  /// dropped.
  pub fn reconcile(
    &mut self,
    store: &TaskStore
  ) {
    let keep = match self
      .session
      .as_ref()
      .map(|session| session.target)
    {
      | Some(EditTarget::New) => false,
      | Some(EditTarget::Existing(id)) => {
        store.contains(id)
      }
      | None => true
    };
    if !keep {
      debug!(
        "discarding edit session on reload"
      );
      self.session = None;
    }
  }
}

/// Sends a prepared save. The caller
/// closes the session with
/// [`EditController::finish_save`] on
/// success and leaves it open on failure.
#[tracing::instrument(skip(gateway, request), fields(target = ?request.target))]
pub async fn submit_save<G>(
  gateway: &G,
  request: &SaveRequest
) -> Result<TaskDto, GatewayError>
where
  G: TaskGateway + ?Sized
{
  match request.target {
    | EditTarget::Existing(id) => {
      gateway
        .update_task(id, &request.payload)
        .await
    }
    | EditTarget::New => {
      gateway
        .create_task(&request.payload)
        .await
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn sprint_column() -> ColumnDto {
    ColumnDto {
      name:        "Sprint".to_string(),
      column_type: ColumnType::Select,
      options:     Some(vec![
        "A".to_string(),
        "B".to_string(),
      ])
    }
  }

  fn task(id: u64) -> TaskDto {
    TaskDto {
      id,
      name: format!("task {id}"),
      assignee: Some("ana".to_string()),
      status: TaskStatus::InProgress,
      due_date: Some("2025-03-12".to_string()),
      priority: None,
      custom_fields: BTreeMap::from([(
        "Sprint".to_string(),
        "B".to_string()
      )]),
      days: None
    }
  }

  fn store() -> TaskStore {
    TaskStore::from_snapshot(vec![
      task(1),
      task(2),
    ])
  }

  #[test]
  fn unchanged_form_round_trips_to_the_same_task(
  ) {
    let columns = vec![sprint_column()];
    let original = task(1);
    let form =
      EditForm::for_task(&original, &columns);

    assert_eq!(
      form.to_payload(),
      TaskPayload::from(&original)
    );
  }

  #[test]
  fn stored_empty_custom_value_survives_unchanged_save(
  ) {
    let mut original = task(1);
    original.custom_fields.insert(
      "Sprint".to_string(),
      String::new()
    );
    let form = EditForm::for_task(
      &original,
      &[sprint_column()]
    );

    assert_eq!(
      form.to_payload(),
      TaskPayload::from(&original)
    );
  }

  #[test]
  fn absent_custom_value_stays_absent() {
    let mut original = task(1);
    original.custom_fields.clear();
    let form = EditForm::for_task(
      &original,
      &[sprint_column()]
    );

    assert!(
      form.to_payload().custom_fields.is_empty()
    );
  }

  #[test]
  fn unknown_status_round_trips_through_the_form(
  ) {
    let mut original = task(1);
    original.status =
      TaskStatus::Other("On Hold".to_string());
    let form =
      EditForm::for_task(&original, &[]);

    let FieldInput::Select(options) =
      &form.fields()[2].input
    else {
      panic!("status should be a select");
    };
    assert_eq!(options.len(), 4);
    assert_eq!(
      form.to_payload().status,
      TaskStatus::Other("On Hold".to_string())
    );
  }

  #[test]
  fn open_edit_picks_up_a_new_column() {
    let store = store();
    let mut controller =
      EditController::default();
    controller
      .start_editing(1, &store, &[])
      .expect("start edit");
    let token = controller
      .session()
      .map(|session| session.token)
      .expect("session");
    assert!(controller.update_field(
      token,
      &FieldKey::Name,
      "renamed"
    ));

    let columns = vec![sprint_column()];
    assert!(controller.sync_columns(&columns));
    assert!(!controller.sync_columns(&columns));

    let form = &controller
      .session()
      .expect("session kept")
      .form;
    assert_eq!(form.column_names(), vec!["Sprint"]);
    assert_eq!(form.fields().len(), 6);
    assert_eq!(
      form.value(&FieldKey::Custom(
        "Sprint".to_string()
      )),
      Some("B")
    );
    assert_eq!(
      form.value(&FieldKey::Name),
      Some("renamed")
    );
    assert!(controller.update_field(
      token,
      &FieldKey::Custom("Sprint".to_string()),
      "A"
    ));
    assert_eq!(
      controller
        .prepare_save(1)
        .expect("save request")
        .payload
        .custom_fields
        .get("Sprint")
        .map(String::as_str),
      Some("A")
    );
  }

  #[test]
  fn none_priority_is_not_read_back_as_a_value(
  ) {
    let form =
      EditForm::for_task(&task(1), &[]);
    assert_eq!(
      form.value(&FieldKey::Priority),
      Some("")
    );
    assert_eq!(form.to_payload().priority, None);
  }

  #[test]
  fn fields_are_keyed_not_positional() {
    let mut form = EditForm::for_task(
      &task(1),
      &[sprint_column()]
    );
    assert!(form.set(
      &FieldKey::Custom("Sprint".to_string()),
      "A"
    ));
    assert!(form.set(&FieldKey::Priority, "Urgent"));
    assert!(!form.set(
      &FieldKey::Custom("Missing".to_string()),
      "x"
    ));

    let payload = form.to_payload();
    assert_eq!(
      payload.custom_fields.get("Sprint"),
      Some(&"A".to_string())
    );
    assert_eq!(
      payload.priority,
      Some(TaskPriority::Urgent)
    );
  }

  #[test]
  fn select_keeps_unlisted_current_value() {
    let mut stale = task(1);
    stale.custom_fields.insert(
      "Sprint".to_string(),
      "Z".to_string()
    );
    let form = EditForm::for_task(
      &stale,
      &[sprint_column()]
    );
    let sprint = &form.fields()[5];
    let FieldInput::Select(options) =
      &sprint.input
    else {
      panic!("sprint should be a select");
    };
    assert!(
      options
        .iter()
        .any(|option| option.value == "Z")
    );
  }

  #[test]
  fn second_edit_force_cancels_the_first() {
    let store = store();
    let mut controller =
      EditController::default();

    let displaced = controller
      .start_editing(1, &store, &[])
      .expect("start first edit");
    assert!(displaced.is_none());
    let first_token = controller
      .session()
      .map(|session| session.token)
      .expect("first session");

    let displaced = controller
      .start_editing(2, &store, &[])
      .expect("start second edit");
    assert_eq!(
      displaced.map(|session| session.target),
      Some(EditTarget::Existing(1))
    );
    assert!(controller.is_editing(2));
    assert!(!controller.is_editing(1));

    assert_eq!(
      controller.prepare_save(1),
      Err(ValidationError::NotEditing)
    );
    assert!(!controller.finish_save(first_token));
    assert!(!controller.update_field(
      first_token,
      &FieldKey::Name,
      "stale"
    ));
    assert!(controller.is_editing(2));
  }

  #[test]
  fn cancel_only_applies_to_the_open_row() {
    let store = store();
    let mut controller =
      EditController::default();
    controller
      .start_editing(1, &store, &[])
      .expect("start edit");

    assert_eq!(
      controller.cancel_edit(2),
      CancelOutcome::Ignored
    );
    assert!(controller.is_editing(1));
    assert_eq!(
      controller.cancel_edit(1),
      CancelOutcome::Reload
    );
    assert_eq!(controller.session(), None);
  }

  #[test]
  fn new_row_requires_a_name_and_dies_on_reload(
  ) {
    let mut controller =
      EditController::default();
    controller.add_new_task(&[]);

    assert_eq!(
      controller.prepare_save_new(),
      Err(ValidationError::EmptyTaskName)
    );

    let token = controller
      .new_row()
      .map(|session| session.token)
      .expect("new row session");
    assert!(controller.update_field(
      token,
      &FieldKey::Name,
      "Draft roadmap"
    ));
    let request = controller
      .prepare_save_new()
      .expect("named row saves");
    assert_eq!(request.target, EditTarget::New);
    assert_eq!(request.payload.name, "Draft roadmap");
    assert_eq!(
      request.payload.status,
      TaskStatus::Todo
    );

    controller.reconcile(&store());
    assert!(controller.new_row().is_none());
  }

  #[test]
  fn reconcile_keeps_edits_of_surviving_rows(
  ) {
    let mut controller =
      EditController::default();
    controller
      .start_editing(2, &store(), &[])
      .expect("start edit");

    controller.reconcile(&store());
    assert!(controller.is_editing(2));

    controller.reconcile(
      &TaskStore::from_snapshot(vec![task(1)])
    );
    assert_eq!(controller.session(), None);
  }
}
