use taskboard_core::edit::{
  EditField,
  EditSession,
  EditToken,
  FieldInput,
  FieldKey
};
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
pub struct EditRowProps {
  pub session:   EditSession,
  pub on_input:
    Callback<(EditToken, FieldKey, String)>,
  pub on_save:   Callback<()>,
  pub on_cancel: Callback<()>
}

fn field_cell(
  field: &EditField,
  token: EditToken,
  on_input: &Callback<(
    EditToken,
    FieldKey,
    String
  )>
) -> Html {
  let data_field = field.key.as_key();

  match &field.input {
    | FieldInput::Text | FieldInput::Date => {
      let input_type =
        if field.input == FieldInput::Date {
          "date"
        } else {
          "text"
        };
      let key = field.key.clone();
      let on_input = on_input.clone();
      let oninput = Callback::from(
        move |event: InputEvent| {
          let input: HtmlInputElement =
            event.target_unchecked_into();
          on_input.emit((
            token,
            key.clone(),
            input.value()
          ));
        }
      );
      html! {
          <td>
              <input
                  type={input_type}
                  class="edit-input"
                  data-field={data_field}
                  value={field.value.clone()}
                  {oninput}
              />
          </td>
      }
    }
    | FieldInput::Select(options) => {
      let key = field.key.clone();
      let on_input = on_input.clone();
      let onchange = Callback::from(
        move |event: Event| {
          let select: HtmlSelectElement =
            event.target_unchecked_into();
          on_input.emit((
            token,
            key.clone(),
            select.value()
          ));
        }
      );
      html! {
          <td>
              <select class="edit-select" data-field={data_field} {onchange}>
                  { for options.iter().map(|option| html! {
                      <option
                          value={option.value.clone()}
                          selected={option.value == field.value}
                      >
                          { &option.label }
                      </option>
                  }) }
              </select>
          </td>
      }
    }
  }
}

/// Inputs for the open edit session, one
/// cell per form field, then Save and
/// Cancel.
#[function_component(EditRow)]
pub fn edit_row(
  props: &EditRowProps
) -> Html {
  let token = props.session.token;
  let on_save = props.on_save.clone();
  let on_cancel = props.on_cancel.clone();

  html! {
      <tr class="task-row editing">
          { for props.session.form.fields().iter().map(|field| {
              field_cell(field, token, &props.on_input)
          }) }
          <td class="actions">
              <button class="btn save" onclick={move |_| on_save.emit(())}>
                  { "Save" }
              </button>
              <button class="btn" onclick={move |_| on_cancel.emit(())}>
                  { "Cancel" }
              </button>
          </td>
      </tr>
  }
}
