use std::rc::Rc;

use taskboard_core::edit::{
  EditController,
  EditToken,
  FieldKey
};
use taskboard_core::sync::ViewSync;
use taskboard_core::{
  GatewayError,
  TaskStore
};
use taskboard_shared::{
  ColumnDto,
  TaskDto
};
use yew::Reducible;

/// Bumped after every successful
/// mutation; the task fetch effect keys on
/// it.
#[derive(
  Debug, Clone, Copy, Default, PartialEq,
)]
pub struct RefreshTick(pub u64);

impl Reducible for RefreshTick {
  type Action = ();

  fn reduce(
    self: Rc<Self>,
    _action: ()
  ) -> Rc<Self> {
    Rc::new(Self(self.0.saturating_add(1)))
  }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardViews(pub ViewSync);

impl Reducible for BoardViews {
  type Action =
    Result<Vec<TaskDto>, GatewayError>;

  fn reduce(
    self: Rc<Self>,
    fetched: Self::Action
  ) -> Rc<Self> {
    let mut next = (*self).clone();
    if next.0.apply(fetched) {
      Rc::new(next)
    } else {
      self
    }
  }
}

pub enum EditorAction {
  Start {
    id:      u64,
    store:   TaskStore,
    columns: Vec<ColumnDto>
  },
  AddNew {
    columns: Vec<ColumnDto>
  },
  Update {
    token: EditToken,
    key:   FieldKey,
    value: String
  },
  FinishSave(EditToken),
  Cancel(u64),
  CancelNew,
  Reconcile(TaskStore),
  SyncColumns(Vec<ColumnDto>)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditorState(pub EditController);

impl Reducible for EditorState {
  type Action = EditorAction;

  fn reduce(
    self: Rc<Self>,
    action: EditorAction
  ) -> Rc<Self> {
    let mut next = (*self).clone();
    let controller = &mut next.0;
    match action {
      | EditorAction::Start {
        id,
        store,
        columns
      } => {
        if let Err(error) = controller
          .start_editing(id, &store, &columns)
        {
          tracing::warn!(%error, task_id = id, "cannot edit task");
        }
      }
      | EditorAction::AddNew { columns } => {
        controller.add_new_task(&columns);
      }
      | EditorAction::Update {
        token,
        key,
        value
      } => {
        controller
          .update_field(token, &key, value);
      }
      | EditorAction::FinishSave(token) => {
        controller.finish_save(token);
      }
      | EditorAction::Cancel(id) => {
        controller.cancel_edit(id);
      }
      | EditorAction::CancelNew => {
        controller.cancel_new_task();
      }
      | EditorAction::Reconcile(store) => {
        controller.reconcile(&store);
      }
      | EditorAction::SyncColumns(columns) => {
        controller.sync_columns(&columns);
      }
    }

    if next == *self {
      self
    } else {
      Rc::new(next)
    }
  }
}

#[cfg(test)]
mod tests {
  use std::collections::BTreeMap;

  use taskboard_shared::{
    ColumnType,
    TaskStatus
  };

  use super::*;

  fn store() -> TaskStore {
    TaskStore::from_snapshot(vec![TaskDto {
      id:            3,
      name:          "Write docs".to_string(),
      assignee:      None,
      status:        TaskStatus::Todo,
      due_date:      None,
      priority:      None,
      custom_fields: BTreeMap::new(),
      days:          None
    }])
  }

  #[test]
  fn refresh_tick_always_advances() {
    let tick = Rc::new(RefreshTick(7));
    let next = tick.clone().reduce(());
    assert_eq!(next.0, 8);
    assert_eq!(next.reduce(()).0, 9);
  }

  #[test]
  fn failed_fetch_keeps_the_same_views() {
    let views = Rc::new(BoardViews::default())
      .reduce(Ok(store().iter().cloned().collect()));
    let after = views.clone().reduce(Err(
      GatewayError::Network(
        "offline".to_string()
      )
    ));
    assert!(Rc::ptr_eq(&views, &after));
    assert_eq!(after.0.store().len(), 1);
  }

  #[test]
  fn editor_ignores_cancel_for_other_rows() {
    let editor = Rc::new(
      EditorState::default()
    )
    .reduce(EditorAction::Start {
      id:      3,
      store:   store(),
      columns: Vec::new()
    });
    assert!(editor.0.is_editing(3));

    let same = editor
      .clone()
      .reduce(EditorAction::Cancel(4));
    assert!(Rc::ptr_eq(&editor, &same));

    let closed =
      same.reduce(EditorAction::Cancel(3));
    assert_eq!(closed.0.session(), None);
  }

  #[test]
  fn open_editor_gains_columns_added_later() {
    let editor = Rc::new(
      EditorState::default()
    )
    .reduce(EditorAction::Start {
      id:      3,
      store:   store(),
      columns: Vec::new()
    });
    let columns = vec![ColumnDto {
      name:        "Sprint".to_string(),
      column_type: ColumnType::Text,
      options:     None
    }];

    let synced = editor.clone().reduce(
      EditorAction::SyncColumns(columns.clone())
    );
    assert!(!Rc::ptr_eq(&editor, &synced));
    let form = &synced
      .0
      .session()
      .expect("still editing")
      .form;
    assert_eq!(form.column_names(), vec!["Sprint"]);

    let again = synced
      .clone()
      .reduce(EditorAction::SyncColumns(columns));
    assert!(Rc::ptr_eq(&synced, &again));
  }
}
