use taskboard_core::sync::SidebarItem;
use yew::{
  Html,
  Properties,
  classes,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct SidebarProps {
  pub items: Vec<SidebarItem>
}

#[function_component(Sidebar)]
pub fn sidebar(
  props: &SidebarProps
) -> Html {
  html! {
      <aside class="panel sidebar">
          <div class="header">{ "Tasks" }</div>
          <ul class="sidebar-tasks">
              { for props.items.iter().map(|item| html! {
                  <li key={item.id} class={classes!("sidebar-task", item.due.css_class())}>
                      <span class="task-name">{ &item.name }</span>
                      {
                          if item.deadline.is_empty() {
                              html! {}
                          } else {
                              html! { <span class="task-deadline">{ &item.deadline }</span> }
                          }
                      }
                  </li>
              }) }
          </ul>
      </aside>
  }
}
