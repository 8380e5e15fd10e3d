// egui front end for the schedule widget

mod app;
mod palette;
pub mod schedule_view;

pub use app::SamidareApp;
pub use schedule_view::{GestureRecognizer, ScheduleView};
