mod add_task_form;
mod nav_bar;
mod progress_panel;
mod task_row;

pub use add_task_form::AddTaskForm;
pub use nav_bar::NavBar;
pub use progress_panel::ProgressPanel;
pub use task_row::TaskRow;
