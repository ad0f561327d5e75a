mod checklist;
mod checklist_task_modal;
mod column_modal;
mod edit_row;
mod gantt_grid;
mod sidebar;
mod task_table;
mod task_table_row;
mod workspace_tabs;

pub use checklist::Checklist;
pub use checklist_task_modal::ChecklistTaskModal;
pub use column_modal::ColumnModal;
pub use edit_row::EditRow;
pub use gantt_grid::GanttGrid;
pub use sidebar::Sidebar;
pub use task_table::TaskTable;
pub use task_table_row::TaskTableRow;
pub use workspace_tabs::WorkspaceTabs;
