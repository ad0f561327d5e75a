use taskboard_core::scheduler::DRAG_DATA_KEY;
use taskboard_core::sync::ChecklistItem;
use web_sys::DragEvent;
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct ChecklistProps {
  pub items:     Vec<ChecklistItem>,
  pub on_delete: Callback<u64>
}

/// Checklist items are the only drag
/// sources for the day grid.
#[function_component(Checklist)]
pub fn checklist(
  props: &ChecklistProps
) -> Html {
  html! {
      <ul class="checklist">
          { for props.items.iter().map(|item| {
              let task_id = item.id;
              let ondragstart = Callback::from(
                move |event: DragEvent| {
                  if let Some(data_transfer) =
                    event.data_transfer()
                  {
                    if let Err(error) = data_transfer
                      .set_data(
                        DRAG_DATA_KEY,
                        &task_id.to_string()
                      )
                    {
                      tracing::warn!(?error, task_id, "failed to set drag data");
                    }
                    data_transfer
                      .set_effect_allowed("move");
                  }
                }
              );
              let on_delete = props.on_delete.clone();
              html! {
                  <li key={task_id} class="checklist-item" draggable="true" {ondragstart}>
                      <span class="task-name">{ &item.name }</span>
                      <button
                          class="btn delete"
                          onclick={move |_| on_delete.emit(task_id)}
                      >
                          { "Delete" }
                      </button>
                  </li>
              }
          }) }
      </ul>
  }
}
