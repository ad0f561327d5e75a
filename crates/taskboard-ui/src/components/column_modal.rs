use taskboard_core::schema::ColumnDraft;
use taskboard_shared::ColumnType;
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
pub struct ColumnModalProps {
  pub draft:     ColumnDraft,
  pub on_change: Callback<ColumnDraft>,
  pub on_submit: Callback<()>,
  pub on_close:  Callback<()>
}

#[function_component(ColumnModal)]
pub fn column_modal(
  props: &ColumnModalProps
) -> Html {
  let draft = props.draft.clone();

  let on_name_input = {
    let draft = draft.clone();
    let on_change = props.on_change.clone();
    Callback::from(move |e: InputEvent| {
      let input: HtmlInputElement =
        e.target_unchecked_into();
      let mut next = draft.clone();
      next.name = input.value();
      on_change.emit(next);
    })
  };

  let on_type_change = {
    let draft = draft.clone();
    let on_change = props.on_change.clone();
    Callback::from(move |e: Event| {
      let select: HtmlSelectElement =
        e.target_unchecked_into();
      let mut next = draft.clone();
      next.column_type =
        ColumnType::from_key(&select.value())
          .unwrap_or_default();
      on_change.emit(next);
    })
  };

  let on_options_input = {
    let draft = draft.clone();
    let on_change = props.on_change.clone();
    Callback::from(move |e: InputEvent| {
      let input: HtmlInputElement =
        e.target_unchecked_into();
      let mut next = draft.clone();
      next.options = input.value();
      on_change.emit(next);
    })
  };

  let on_submit = props.on_submit.clone();
  let on_close = props.on_close.clone();

  html! {
      <div class="modal-backdrop">
          <div class="modal">
              <div class="header">{ "Add Column" }</div>
              <div class="content">
                  <div class="field">
                      <label>{ "Column Name" }</label>
                      <input
                          value={draft.name.clone()}
                          placeholder="e.g. Sprint"
                          oninput={on_name_input}
                      />
                  </div>
                  <div class="field">
                      <label>{ "Type" }</label>
                      <select onchange={on_type_change}>
                          { for [ColumnType::Text, ColumnType::Select].iter().map(|column_type| html! {
                              <option
                                  value={column_type.as_key()}
                                  selected={*column_type == draft.column_type}
                              >
                                  { column_type.as_key() }
                              </option>
                          }) }
                      </select>
                  </div>
                  {
                      if draft.column_type == ColumnType::Select {
                          html! {
                              <div class="field">
                                  <label>{ "Options (comma separated)" }</label>
                                  <input
                                      value={draft.options.clone()}
                                      placeholder="A, B, C"
                                      oninput={on_options_input}
                                  />
                              </div>
                          }
                      } else {
                          html! {}
                      }
                  }
              </div>
              <div class="footer">
                  <button class="btn" onclick={move |_| on_close.emit(())}>{ "Cancel" }</button>
                  <button class="btn save" onclick={move |_| on_submit.emit(())}>{ "Create" }</button>
              </div>
          </div>
      </div>
  }
}
