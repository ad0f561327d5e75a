use std::collections::BTreeMap;

use taskboard_core::scheduler::{
  DRAG_DATA_KEY,
  DayCell,
  parse_drop_payload
};
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
pub struct GanttGridProps {
  pub cells:       Vec<DayCell>,
  pub assignments:
    BTreeMap<u32, Vec<ChecklistItem>>,
  pub on_drop:     Callback<(u64, u32)>
}

#[function_component(GanttGrid)]
pub fn gantt_grid(
  props: &GanttGridProps
) -> Html {
  let ondragover =
    Callback::from(|event: DragEvent| {
      event.prevent_default();
    });

  html! {
      <div class="gantt-grid">
          { for props.cells.iter().map(|cell| {
              let day = cell.index;
              let on_drop = props.on_drop.clone();
              let ondrop = Callback::from(
                move |event: DragEvent| {
                  event.prevent_default();
                  let Some(data_transfer) =
                    event.data_transfer()
                  else {
                    return;
                  };
                  match data_transfer
                    .get_data(DRAG_DATA_KEY)
                  {
                    | Ok(raw) => {
                      match parse_drop_payload(&raw) {
                        | Some(task_id) => {
                          on_drop.emit((task_id, day))
                        }
                        | None => tracing::warn!(
                          %raw,
                          day,
                          "ignored drop without a task id"
                        )
                      }
                    }
                    | Err(error) => {
                      tracing::warn!(?error, day, "failed to read drag data");
                    }
                  }
                }
              );
              let assigned = props
                .assignments
                .get(&day)
                .cloned()
                .unwrap_or_default();

              html! {
                  <div
                      key={day}
                      class="gantt-cell"
                      data-day={day.to_string()}
                      ondragover={ondragover.clone()}
                      {ondrop}
                  >
                      <div class="gantt-cell-label">{ &cell.label }</div>
                      { for assigned.iter().map(|item| html! {
                          <div key={item.id} class="gantt-task">{ &item.name }</div>
                      }) }
                  </div>
              }
          }) }
      </div>
  }
}
