// Test fixtures - reusable test data
// Provides a consistent schedule and settings file across integration tests

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use samidare::models::event::Event;
use samidare::models::settings::Settings;
use samidare::models::time::Time;
use samidare::services::schedule::{Feedback, SamidareCallbacks, StaticSchedule};

/// 08:00-20:00 in 15 minute steps at 12px each, constant 100px/s auto-scroll
pub const SETTINGS_TOML: &str = r#"
start = "08:00"
end = "20:00"
min_interval = 15
column_width = 100.0
half_line_height = 6.0

[layout]
minute_unit = 15
height_unit = 12.0

[auto_scroll]
threshold = 0.1
min_speed = 100.0
max_speed = 100.0
"#;

pub fn event(id: i64, title: &str, start: (i64, i64), end: (i64, i64), editable: bool) -> Event {
    Event::builder()
        .id(id)
        .title(title)
        .start(Time::new(start.0, start.1))
        .end(Time::new(end.0, end.1))
        .editable(editable)
        .build()
        .unwrap()
}

/// Two rooms: a review and a read-only holiday, then a short sync.
pub fn schedule(settings: &Settings) -> StaticSchedule {
    StaticSchedule::from_settings(settings)
        .unwrap()
        .with_column(vec![
            event(1, "Review", (10, 0), (11, 0), true),
            event(2, "Holiday", (13, 0), (14, 0), false),
        ])
        .with_column(vec![event(3, "Sync", (9, 0), (9, 30), true)])
}

/// Callbacks that append a readable line per notification.
pub fn recording_callbacks() -> (SamidareCallbacks, Rc<RefCell<Vec<String>>>) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let begin = Rc::clone(&log);
    let edit = Rc::clone(&log);
    let end = Rc::clone(&log);
    let feedback = Rc::clone(&log);

    let callbacks = SamidareCallbacks::new()
        .on_begin_editing(move |_, e| begin.borrow_mut().push(format!("begin {}", e.id)))
        .on_edit(move |_, e| edit.borrow_mut().push(format!("edit {}-{}", e.start, e.end)))
        .on_end_editing(move |_, e| end.borrow_mut().push(format!("end {}-{}", e.start, e.end)))
        .on_feedback(move |f| {
            let name = match f {
                Feedback::Impact => "impact",
                Feedback::Selection => "selection",
                Feedback::Error => "error",
            };
            feedback.borrow_mut().push(name.to_string());
        });

    (callbacks, log)
}
