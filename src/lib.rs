// Samidare Library
// Time-grid schedule widget: models, editing core and egui front end

pub mod models;
pub mod services;
pub mod ui_egui;
