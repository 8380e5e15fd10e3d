// Module exports for models

pub mod error;
pub mod event;
pub mod settings;
pub mod time;
pub mod time_range;
