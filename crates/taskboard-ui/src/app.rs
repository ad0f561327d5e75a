use std::collections::BTreeMap;

use chrono::{
  Local,
  NaiveDate
};
use gloo::console::log;
use taskboard_core::checklist::{
  ChecklistDraft,
  add_checklist_task
};
use taskboard_core::due::due_state;
use taskboard_core::edit::{
  EditToken,
  FieldKey,
  submit_save
};
use taskboard_core::gateway::{
  delete_task,
  fetch_tasks
};
use taskboard_core::scheduler::{
  DayGrid,
  schedule_task
};
use taskboard_core::schema::{
  ColumnDraft,
  ColumnRegistry
};
use taskboard_core::{
  BoardConfig,
  DeleteTarget
};
use yew::{
  Callback,
  Html,
  MouseEvent,
  function_component,
  html,
  use_effect_with,
  use_memo,
  use_reducer,
  use_state
};

use crate::api::HttpGateway;
use crate::components::{
  Checklist,
  ChecklistTaskModal,
  ColumnModal,
  GanttGrid,
  Sidebar,
  TaskTable,
  WorkspaceTabs
};

mod state;

use state::{
  BoardViews,
  EditorAction,
  EditorState,
  RefreshTick
};

const BOARD_CONFIG_TOML: &str =
  include_str!("../assets/board.toml");
const WORKSPACE_TAB_STORAGE_KEY: &str =
  "taskboard.workspace.tab";
const TABLE_TAB: &str = "table";
const GANTT_TAB: &str = "gantt";
const DELETE_PROMPT: &str =
  "Are you sure you want to delete this \
   task?";

#[function_component(App)]
pub fn app() -> Html {
  let config = use_state(load_board_config);
  let active_tab =
    use_state(load_workspace_tab);
  let registry =
    use_state(ColumnRegistry::default);
  let column_modal =
    use_state(|| None::<ColumnDraft>);
  let checklist_modal =
    use_state(|| None::<ChecklistDraft>);
  let refresh_tick =
    use_reducer(RefreshTick::default);
  let views = use_reducer(BoardViews::default);
  let editor =
    use_reducer(EditorState::default);

  let gateway = {
    let base = config.api_base.clone();
    use_memo(base, |base| {
      HttpGateway::new(base.clone())
    })
  };
  let grid = DayGrid::from_config(
    &config.gantt
  );

  {
    let gateway = gateway.clone();
    let registry = registry.clone();
    let refresh_tick = refresh_tick.clone();

    use_effect_with((), move |_| {
      wasm_bindgen_futures::spawn_local(
        async move {
          let mut loaded =
            ColumnRegistry::default();
          if loaded
            .load(gateway.as_ref())
            .await
            .is_ok()
          {
            registry.set(loaded);
            refresh_tick.dispatch(());
          }
        }
      );

      || ()
    });
  }

  {
    let gateway = gateway.clone();
    let views = views.clone();
    let source = config.task_source;

    use_effect_with(
      refresh_tick.0,
      move |tick| {
        let tick = *tick;
        wasm_bindgen_futures::spawn_local(
          async move {
            tracing::info!(tick, source = source.path(), "refreshing task views");
            let fetched = fetch_tasks(
              gateway.as_ref(),
              source
            )
            .await;
            views.dispatch(fetched);
          }
        );

        || ()
      }
    );
  }

  {
    let editor = editor.clone();
    let store = views.0.store().clone();

    use_effect_with(
      views.0.reloads(),
      move |_| {
        editor.dispatch(
          EditorAction::Reconcile(store)
        );
        || ()
      }
    );
  }

  {
    let editor = editor.clone();
    let columns = registry.columns().to_vec();

    use_effect_with(columns, move |columns| {
      editor.dispatch(
        EditorAction::SyncColumns(
          columns.clone()
        )
      );
      || ()
    });
  }

  let on_select_tab = {
    let active_tab = active_tab.clone();
    Callback::from(move |tab: String| {
      ui_debug("workspace.tab", &tab);
      save_workspace_tab(&tab);
      active_tab.set(tab);
    })
  };

  let on_edit = {
    let editor = editor.clone();
    let views = views.clone();
    let registry = registry.clone();
    Callback::from(move |id: u64| {
      ui_debug("task.edit", &id.to_string());
      editor.dispatch(EditorAction::Start {
        id,
        store: views.0.store().clone(),
        columns: registry.columns().to_vec()
      });
    })
  };

  let on_field_input = {
    let editor = editor.clone();
    Callback::from(
      move |(token, key, value): (
        EditToken,
        FieldKey,
        String
      )| {
        editor.dispatch(
          EditorAction::Update {
            token,
            key,
            value
          }
        );
      }
    )
  };

  let on_save = {
    let editor = editor.clone();
    let gateway = gateway.clone();
    let refresh_tick = refresh_tick.clone();
    Callback::from(move |id: u64| {
      let request =
        match editor.0.prepare_save(id) {
          | Ok(request) => request,
          | Err(error) => {
            tracing::warn!(%error, task_id = id, "save ignored");
            return;
          }
        };

      let editor = editor.clone();
      let gateway = gateway.clone();
      let refresh_tick =
        refresh_tick.clone();
      wasm_bindgen_futures::spawn_local(
        async move {
          match submit_save(
            gateway.as_ref(),
            &request
          )
          .await
          {
            | Ok(task) => {
              tracing::info!(task_id = task.id, "task updated");
              editor.dispatch(
                EditorAction::FinishSave(
                  request.token
                )
              );
              refresh_tick.dispatch(());
            }
            | Err(error) => {
              tracing::error!(%error, task_id = id, "error updating task");
            }
          }
        }
      );
    })
  };

  let on_cancel = {
    let editor = editor.clone();
    let refresh_tick = refresh_tick.clone();
    Callback::from(move |id: u64| {
      if !editor.0.is_editing(id) {
        return;
      }
      ui_debug("task.cancel", &id.to_string());
      editor
        .dispatch(EditorAction::Cancel(id));
      refresh_tick.dispatch(());
    })
  };

  let on_add_row = {
    let editor = editor.clone();
    let registry = registry.clone();
    Callback::from(move |_: MouseEvent| {
      ui_debug("task.new_row", "open");
      editor.dispatch(EditorAction::AddNew {
        columns: registry.columns().to_vec()
      });
    })
  };

  let on_save_new = {
    let editor = editor.clone();
    let gateway = gateway.clone();
    let refresh_tick = refresh_tick.clone();
    Callback::from(move |_: ()| {
      let request =
        match editor.0.prepare_save_new() {
          | Ok(request) => request,
          | Err(error) => {
            tracing::warn!(%error, "new task rejected");
            alert_user(&error.to_string());
            return;
          }
        };

      let editor = editor.clone();
      let gateway = gateway.clone();
      let refresh_tick =
        refresh_tick.clone();
      wasm_bindgen_futures::spawn_local(
        async move {
          match submit_save(
            gateway.as_ref(),
            &request
          )
          .await
          {
            | Ok(task) => {
              tracing::info!(task_id = task.id, "task created");
              editor.dispatch(
                EditorAction::FinishSave(
                  request.token
                )
              );
              refresh_tick.dispatch(());
            }
            | Err(error) => {
              tracing::error!(%error, "error creating task");
            }
          }
        }
      );
    })
  };

  let on_cancel_new = {
    let editor = editor.clone();
    let refresh_tick = refresh_tick.clone();
    Callback::from(move |_: ()| {
      if editor.0.new_row().is_none() {
        return;
      }
      ui_debug("task.new_row", "cancel");
      editor
        .dispatch(EditorAction::CancelNew);
      refresh_tick.dispatch(());
    })
  };

  let on_delete = {
    let gateway = gateway.clone();
    let refresh_tick = refresh_tick.clone();
    Callback::from(
      move |target: DeleteTarget| {
        if !confirm_action(DELETE_PROMPT) {
          tracing::info!(task_id = target.task_id(), "task deletion canceled");
          return;
        }

        let gateway = gateway.clone();
        let refresh_tick =
          refresh_tick.clone();
        wasm_bindgen_futures::spawn_local(
          async move {
            match delete_task(
              gateway.as_ref(),
              target
            )
            .await
            {
              | Ok(()) => {
                tracing::info!(task_id = target.task_id(), "task deleted");
                refresh_tick.dispatch(());
              }
              | Err(error) => {
                tracing::error!(%error, task_id = target.task_id(), "error deleting task");
              }
            }
          }
        );
      }
    )
  };

  let on_table_delete = {
    let on_delete = on_delete.clone();
    Callback::from(move |id: u64| {
      on_delete.emit(DeleteTarget::Table(id));
    })
  };

  let on_checklist_delete = {
    let on_delete = on_delete.clone();
    Callback::from(move |id: u64| {
      on_delete
        .emit(DeleteTarget::Checklist(id));
    })
  };

  let on_drop = {
    let gateway = gateway.clone();
    let refresh_tick = refresh_tick.clone();
    Callback::from(
      move |(task_id, day): (u64, u32)| {
        ui_debug(
          "gantt.drop",
          &format!("task={task_id} day={day}")
        );
        let gateway = gateway.clone();
        let refresh_tick =
          refresh_tick.clone();
        wasm_bindgen_futures::spawn_local(
          async move {
            if schedule_task(
              gateway.as_ref(),
              &grid,
              task_id,
              day
            )
            .await
            .is_ok()
            {
              refresh_tick.dispatch(());
            }
          }
        );
      }
    )
  };

  let on_open_column_modal = {
    let column_modal = column_modal.clone();
    Callback::from(move |_: MouseEvent| {
      column_modal
        .set(Some(ColumnDraft::default()));
    })
  };

  let on_column_draft = {
    let column_modal = column_modal.clone();
    Callback::from(
      move |draft: ColumnDraft| {
        column_modal.set(Some(draft));
      }
    )
  };

  let on_close_column_modal = {
    let column_modal = column_modal.clone();
    Callback::from(move |_: ()| {
      column_modal.set(None);
    })
  };

  let on_submit_column = {
    let column_modal = column_modal.clone();
    let registry = registry.clone();
    let gateway = gateway.clone();
    let refresh_tick = refresh_tick.clone();
    Callback::from(move |_: ()| {
      let Some(draft) = (*column_modal).clone()
      else {
        return;
      };
      if let Err(error) =
        registry.validate(&draft)
      {
        tracing::warn!(%error, "column rejected");
        alert_user(&error.to_string());
        return;
      }

      let mut next = (*registry).clone();
      let registry = registry.clone();
      let column_modal =
        column_modal.clone();
      let gateway = gateway.clone();
      let refresh_tick =
        refresh_tick.clone();
      wasm_bindgen_futures::spawn_local(
        async move {
          match next
            .create(gateway.as_ref(), &draft)
            .await
          {
            | Ok(()) => {
              registry.set(next);
              column_modal.set(None);
              refresh_tick.dispatch(());
            }
            | Err(error)
              if error.is_validation() =>
            {
              alert_user(&error.to_string());
            }
            | Err(_) => {}
          }
        }
      );
    })
  };

  let on_open_checklist_modal = {
    let checklist_modal =
      checklist_modal.clone();
    Callback::from(move |_: MouseEvent| {
      checklist_modal.set(Some(
        ChecklistDraft::default()
      ));
    })
  };

  let on_checklist_draft = {
    let checklist_modal =
      checklist_modal.clone();
    Callback::from(
      move |draft: ChecklistDraft| {
        checklist_modal.set(Some(draft));
      }
    )
  };

  let on_close_checklist_modal = {
    let checklist_modal =
      checklist_modal.clone();
    Callback::from(move |_: ()| {
      checklist_modal.set(None);
    })
  };

  let on_submit_checklist = {
    let checklist_modal =
      checklist_modal.clone();
    let gateway = gateway.clone();
    let refresh_tick = refresh_tick.clone();
    Callback::from(move |_: ()| {
      let Some(draft) =
        (*checklist_modal).clone()
      else {
        return;
      };
      if let Err(error) = draft.validate() {
        tracing::warn!(%error, "checklist task rejected");
        alert_user(&error.to_string());
        return;
      }

      let checklist_modal =
        checklist_modal.clone();
      let gateway = gateway.clone();
      let refresh_tick =
        refresh_tick.clone();
      wasm_bindgen_futures::spawn_local(
        async move {
          if add_checklist_task(
            gateway.as_ref(),
            &draft
          )
          .await
          .is_ok()
          {
            checklist_modal.set(None);
            refresh_tick.dispatch(());
          }
        }
      );
    })
  };

  let today = local_today();
  let lead_days = config.due.lead_days;
  let store = views.0.store();
  let due = store
    .iter()
    .map(|task| {
      (
        task.id,
        due_state(
          task.due_date.as_deref(),
          today,
          lead_days
        )
      )
    })
    .collect::<BTreeMap<_, _>>();

  let workspace = if *active_tab == GANTT_TAB
  {
    html! {
        <div class="gantt-workspace">
            <div class="checklist-panel">
                <div class="panel-header">
                    <h2>{ "Checklist" }</h2>
                    <button class="btn" onclick={on_open_checklist_modal}>{ "Add Task" }</button>
                </div>
                <Checklist
                    items={views.0.checklist()}
                    on_delete={on_checklist_delete}
                />
            </div>
            <GanttGrid
                cells={grid.cells()}
                assignments={grid.assignments(store)}
                on_drop={on_drop}
            />
        </div>
    }
  } else {
    html! {
        <div class="table-workspace">
            <div class="panel-header">
                <button class="btn" onclick={on_add_row}>{ "Add Task" }</button>
                <button class="btn" onclick={on_open_column_modal}>{ "Add Column" }</button>
            </div>
            <TaskTable
                headers={registry.headers()}
                rows={views.0.table(registry.columns())}
                due={due}
                session={editor.0.session().cloned()}
                on_edit={on_edit}
                on_delete={on_table_delete}
                on_save={on_save}
                on_cancel={on_cancel}
                on_save_new={on_save_new}
                on_cancel_new={on_cancel_new}
                on_input={on_field_input}
            />
        </div>
    }
  };

  html! {
      <div class="app">
          <WorkspaceTabs
              active_tab={(*active_tab).clone()}
              on_select={on_select_tab}
          />
          <div class="workspace">
              <Sidebar items={views.0.sidebar(today, lead_days)} />
              <main class="main-panel">{ workspace }</main>
          </div>
          {
              if let Some(draft) = (*column_modal).clone() {
                  html! {
                      <ColumnModal
                          draft={draft}
                          on_change={on_column_draft}
                          on_submit={on_submit_column}
                          on_close={on_close_column_modal}
                      />
                  }
              } else {
                  html! {}
              }
          }
          {
              if let Some(draft) = (*checklist_modal).clone() {
                  html! {
                      <ChecklistTaskModal
                          draft={draft}
                          on_change={on_checklist_draft}
                          on_submit={on_submit_checklist}
                          on_close={on_close_checklist_modal}
                      />
                  }
              } else {
                  html! {}
              }
          }
      </div>
  }
}

fn load_board_config() -> BoardConfig {
  match BoardConfig::from_toml_str(
    BOARD_CONFIG_TOML
  ) {
    | Ok(config) => {
      tracing::info!(
        api_base = %config.api_base,
        source = config.task_source.path(),
        "loaded board config"
      );
      config
    }
    | Err(error) => {
      tracing::error!(error = %format!("{error:#}"), "failed parsing board config; using defaults");
      BoardConfig::default()
    }
  }
}

fn workspace_tab_from_storage(
  stored: Option<&str>
) -> String {
  match stored {
    | Some(GANTT_TAB) => {
      GANTT_TAB.to_string()
    }
    | _ => TABLE_TAB.to_string()
  }
}

fn load_workspace_tab() -> String {
  let stored = web_sys::window()
    .and_then(|window| {
      window
        .local_storage()
        .ok()
        .flatten()
    })
    .and_then(|storage| {
      storage
        .get_item(
          WORKSPACE_TAB_STORAGE_KEY
        )
        .ok()
        .flatten()
    });

  workspace_tab_from_storage(
    stored.as_deref()
  )
}

fn save_workspace_tab(tab: &str) {
  if let Some(storage) =
    web_sys::window().and_then(
      |window| {
        window
          .local_storage()
          .ok()
          .flatten()
      }
    )
  {
    let _ = storage.set_item(
      WORKSPACE_TAB_STORAGE_KEY,
      tab
    );
  }
}

/// Blocks until the user answers. A
/// missing window counts as "no".
fn confirm_action(message: &str) -> bool {
  web_sys::window()
    .and_then(|window| {
      window
        .confirm_with_message(message)
        .ok()
    })
    .unwrap_or(false)
}

fn alert_user(message: &str) {
  if let Some(window) = web_sys::window()
    && let Err(error) =
      window.alert_with_message(message)
  {
    tracing::warn!(?error, "failed to show alert");
  }
}

fn local_today() -> NaiveDate {
  Local::now().date_naive()
}

fn ui_debug(
  event: &str,
  detail: &str
) {
  tracing::debug!(
    event, detail, "ui-debug"
  );
  log!(format!(
    "[ui-debug] {event}: {detail}"
  ));
}
