use taskboard_core::checklist::ChecklistDraft;
use taskboard_core::render::NO_PRIORITY_LABEL;
use taskboard_shared::TaskPriority;
use web_sys::{
  HtmlInputElement,
  HtmlSelectElement
};
use yew::{
  Callback,
  Event,
  Html,
  InputEvent,
  Properties,
  TargetCast,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct ChecklistTaskModalProps {
  pub draft:     ChecklistDraft,
  pub on_change: Callback<ChecklistDraft>,
  pub on_submit: Callback<()>,
  pub on_close:  Callback<()>
}

fn text_input(
  draft: &ChecklistDraft,
  on_change: &Callback<ChecklistDraft>,
  apply: fn(&mut ChecklistDraft, String)
) -> Callback<InputEvent> {
  let draft = draft.clone();
  let on_change = on_change.clone();
  Callback::from(move |e: InputEvent| {
    let input: HtmlInputElement =
      e.target_unchecked_into();
    let mut next = draft.clone();
    apply(&mut next, input.value());
    on_change.emit(next);
  })
}

#[function_component(ChecklistTaskModal)]
pub fn checklist_task_modal(
  props: &ChecklistTaskModalProps
) -> Html {
  let draft = &props.draft;

  let on_priority_change = {
    let draft = draft.clone();
    let on_change = props.on_change.clone();
    Callback::from(move |e: Event| {
      let select: HtmlSelectElement =
        e.target_unchecked_into();
      let mut next = draft.clone();
      next.priority = select.value();
      on_change.emit(next);
    })
  };

  let on_submit = props.on_submit.clone();
  let on_close = props.on_close.clone();

  html! {
      <div class="modal-backdrop">
          <div class="modal">
              <div class="header">{ "Add Task" }</div>
              <div class="content">
                  <div class="field">
                      <label>{ "Name" }</label>
                      <input
                          value={draft.name.clone()}
                          placeholder="Required task name"
                          oninput={text_input(draft, &props.on_change, |d, v| d.name = v)}
                      />
                  </div>
                  <div class="field">
                      <label>{ "Assignee" }</label>
                      <input
                          value={draft.assignee.clone()}
                          oninput={text_input(draft, &props.on_change, |d, v| d.assignee = v)}
                      />
                  </div>
                  <div class="field">
                      <label>{ "Priority" }</label>
                      <select onchange={on_priority_change}>
                          <option value="" selected={draft.priority.is_empty()}>
                              { NO_PRIORITY_LABEL }
                          </option>
                          { for TaskPriority::ALL.iter().map(|priority| html! {
                              <option
                                  value={priority.label()}
                                  selected={draft.priority == priority.label()}
                              >
                                  { priority.label() }
                              </option>
                          }) }
                      </select>
                  </div>
                  <div class="field">
                      <label>{ "Deadline" }</label>
                      <input
                          type="date"
                          value={draft.deadline.clone()}
                          oninput={text_input(draft, &props.on_change, |d, v| d.deadline = v)}
                      />
                  </div>
              </div>
              <div class="footer">
                  <button class="btn" onclick={move |_| on_close.emit(())}>{ "Cancel" }</button>
                  <button class="btn save" onclick={move |_| on_submit.emit(())}>{ "Add" }</button>
              </div>
          </div>
      </div>
  }
}
