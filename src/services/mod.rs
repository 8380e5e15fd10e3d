// Service module exports

pub mod auto_scroll;
pub mod edit_session;
pub mod schedule;
pub mod settings;
pub mod time_grid;
