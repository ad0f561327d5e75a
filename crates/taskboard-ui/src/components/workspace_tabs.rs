use yew::{
  Callback,
  Html,
  Properties,
  classes,
  function_component,
  html
};

const TABS: [(&str, &str); 2] =
  [("table", "Tasks"), ("gantt", "Calendar")];

#[derive(Properties, PartialEq)]
pub struct WorkspaceTabsProps {
  pub active_tab: String,
  pub on_select:  Callback<String>
}

#[function_component(WorkspaceTabs)]
pub fn workspace_tabs(
  props: &WorkspaceTabsProps
) -> Html {
  let make_tab = |key: &str, label: &str| {
    let active = props.active_tab == key;
    let on_select = props.on_select.clone();
    let key_string = key.to_string();
    html! {
        <button
            class={classes!("workspace-tab", active.then_some("active"))}
            onclick={move |_| on_select.emit(key_string.clone())}
        >
            { label }
        </button>
    }
  };

  html! {
      <div class="workspace-tabs">
          { for TABS.iter().map(|(key, label)| make_tab(key, label)) }
      </div>
  }
}
