pub mod enums;
pub mod task;
pub mod views;

pub use enums::{FocusState, TaskStatus};
pub use task::{MainTask, Project, SubTask, DEFAULT_COLOR};
pub use views::{block_widths, sum_estimates, today_list, TaskView};
