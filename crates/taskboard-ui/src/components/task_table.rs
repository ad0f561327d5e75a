use std::collections::BTreeMap;

use taskboard_core::due::DueState;
use taskboard_core::edit::{
  EditSession,
  EditTarget,
  EditToken,
  FieldKey
};
use taskboard_core::render::RowDescriptor;
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

use super::{
  EditRow,
  TaskTableRow
};

#[derive(Properties, PartialEq)]
pub struct TaskTableProps {
  pub headers:       Vec<String>,
  pub rows:          Vec<RowDescriptor>,
  pub due:           BTreeMap<u64, DueState>,
  pub session:       Option<EditSession>,
  pub on_edit:       Callback<u64>,
  pub on_delete:     Callback<u64>,
  pub on_save:       Callback<u64>,
  pub on_cancel:     Callback<u64>,
  pub on_save_new:   Callback<()>,
  pub on_cancel_new: Callback<()>,
  pub on_input:
    Callback<(EditToken, FieldKey, String)>
}

#[function_component(TaskTable)]
pub fn task_table(
  props: &TaskTableProps
) -> Html {
  let editing_id = props
    .session
    .as_ref()
    .and_then(|session| match session.target {
      | EditTarget::Existing(id) => Some(id),
      | EditTarget::New => None
    });

  let render_row = |row: &RowDescriptor| {
    let id = row.id;
    match (&props.session, editing_id) {
      | (Some(session), Some(editing))
        if editing == id =>
      {
        let on_save = props.on_save.clone();
        let on_cancel =
          props.on_cancel.clone();
        html! {
            <EditRow
                key={id}
                session={session.clone()}
                on_input={props.on_input.clone()}
                on_save={Callback::from(move |_: ()| on_save.emit(id))}
                on_cancel={Callback::from(move |_: ()| on_cancel.emit(id))}
            />
        }
      }
      | _ => html! {
          <TaskTableRow
              key={id}
              row={row.clone()}
              due={props.due.get(&id).copied().unwrap_or(DueState::None)}
              on_edit={props.on_edit.clone()}
              on_delete={props.on_delete.clone()}
          />
      }
    }
  };

  let new_row = props
    .session
    .as_ref()
    .filter(|session| {
      session.target == EditTarget::New
    })
    .map(|session| {
      html! {
          <EditRow
              key="new-task"
              session={session.clone()}
              on_input={props.on_input.clone()}
              on_save={props.on_save_new.clone()}
              on_cancel={props.on_cancel_new.clone()}
          />
      }
    })
    .unwrap_or_default();

  html! {
      <table class="task-table">
          <thead>
              <tr>
                  { for props.headers.iter().map(|header| html! {
                      <th>{ header }</th>
                  }) }
              </tr>
          </thead>
          <tbody>
              { new_row }
              { for props.rows.iter().map(render_row) }
          </tbody>
      </table>
  }
}
