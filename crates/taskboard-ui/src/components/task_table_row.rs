use taskboard_core::due::DueState;
use taskboard_core::render::{
  Cell,
  RowDescriptor
};
use yew::{
  Callback,
  Html,
  Properties,
  classes,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct TaskTableRowProps {
  pub row:       RowDescriptor,
  pub due:       DueState,
  pub on_edit:   Callback<u64>,
  pub on_delete: Callback<u64>
}

#[function_component(TaskTableRow)]
pub fn task_table_row(
  props: &TaskTableRowProps
) -> Html {
  let id = props.row.id;

  let render_cell = |cell: &Cell| match cell
  {
    | Cell::Text(text) => {
      html! { <td>{ text }</td> }
    }
    | Cell::Pill(pill) => html! {
        <td>
            <span class={pill.css_class()}>{ &pill.label }</span>
        </td>
    },
    | Cell::Actions => {
      let on_edit = props.on_edit.clone();
      let on_delete =
        props.on_delete.clone();
      html! {
          <td class="actions">
              <button class="btn" onclick={move |_| on_edit.emit(id)}>
                  { "Edit" }
              </button>
              <button class="btn delete" onclick={move |_| on_delete.emit(id)}>
                  { "Delete" }
              </button>
          </td>
      }
    }
  };

  html! {
      <tr class={classes!("task-row", props.due.css_class())} data-id={id.to_string()}>
          { for props.row.cells.iter().map(render_cell) }
      </tr>
  }
}
