mod dialog;
mod events;
mod picker;
mod plan;
mod render;
mod state;

pub use dialog::{AddInput, DialogFocus, DialogView};
pub use picker::ToolPicker;
pub use plan::{PlanView, plan_file_name, save_plan};
pub use state::{App, Screen};
