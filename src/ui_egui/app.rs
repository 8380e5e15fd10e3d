use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;
use egui::{Color32, RichText};

use super::schedule_view::ScheduleView;
use crate::models::event::Event;
use crate::models::settings::Settings;
use crate::models::time::Time;
use crate::services::schedule::{CellRef, Feedback, Samidare, SamidareCallbacks, StaticSchedule};

/// Sample rooms and bookings shown by the desktop demo.
const DEMO_COLUMNS: &[&[(&str, (i64, i64), (i64, i64), bool)]] = &[
    &[
        ("Standup", (9, 0), (9, 30), true),
        ("Design review", (10, 0), (11, 30), true),
        ("Lunch", (12, 0), (13, 0), false),
        ("Pairing", (14, 0), (16, 0), true),
    ],
    &[
        ("Planning", (8, 30), (10, 0), true),
        ("Interviews", (13, 0), (15, 30), true),
    ],
    &[
        ("Maintenance window", (7, 0), (8, 0), false),
        ("Retro", (16, 0), (17, 0), true),
        ("Dinner", (19, 0), (20, 30), true),
    ],
];

#[derive(Default)]
struct SharedState {
    status: String,
    committed: Vec<(CellRef, Event)>,
}

pub struct SamidareApp {
    schedule: Samidare,
    source: StaticSchedule,
    view: ScheduleView,
    shared: Rc<RefCell<SharedState>>,
}

impl SamidareApp {
    pub fn new(settings: Settings) -> Result<Self> {
        let source = demo_schedule(&settings)?;
        let shared = Rc::new(RefCell::new(SharedState {
            status: "Long-press a block to edit it".to_string(),
            ..SharedState::default()
        }));

        let mut schedule = Samidare::new(settings).with_callbacks(callbacks(&shared));
        schedule.reload(&source);
        let view = ScheduleView::new(schedule.settings().long_press_ms);

        Ok(Self {
            schedule,
            source,
            view,
            shared,
        })
    }

    /// Persist edits committed since the last frame into the data source.
    fn apply_committed(&mut self) {
        let committed = std::mem::take(&mut self.shared.borrow_mut().committed);
        for (cell, event) in committed {
            if !self.source.update_event(cell.column, &event) {
                log::warn!("Committed event {} not found in column {}", event.id, cell.column);
            }
        }
    }

    /// Finish any edit and persist it before rebuilding from the source, so
    /// the rebuilt table already contains the committed times.
    fn reload(&mut self) {
        self.schedule.end_editing();
        self.apply_committed();
        self.schedule.reload(&self.source);
    }

    fn render_status_bar(&mut self, ctx: &egui::Context) {
        let status = self.shared.borrow().status.clone();
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(24.0)
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(status);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Reload").clicked() {
                            self.reload();
                        }
                        if self.schedule.is_editing() {
                            ui.label(
                                RichText::new("Click outside the block to finish")
                                    .color(Color32::from_gray(140)),
                            );
                        }
                    });
                });
            });
    }
}

impl eframe::App for SamidareApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.render_status_bar(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            self.view.show(ui, &mut self.schedule);
        });

        self.apply_committed();
    }
}

fn callbacks(shared: &Rc<RefCell<SharedState>>) -> SamidareCallbacks {
    let on_begin = Rc::clone(shared);
    let on_edit = Rc::clone(shared);
    let on_end = Rc::clone(shared);
    let on_feedback = Rc::clone(shared);

    SamidareCallbacks::new()
        .on_begin_editing(move |_, event| {
            on_begin.borrow_mut().status = format!("Editing {}", describe(event));
        })
        .on_edit(move |_, event| {
            on_edit.borrow_mut().status = format!("Editing {}", describe(event));
        })
        .on_end_editing(move |cell, event| {
            let mut state = on_end.borrow_mut();
            state.status = format!("Saved {}", describe(event));
            state.committed.push((cell, event.clone()));
        })
        .on_feedback(move |feedback| {
            if feedback == Feedback::Error {
                on_feedback.borrow_mut().status = "That event is read-only".to_string();
            }
        })
}

fn describe(event: &Event) -> String {
    format!("{} ({} - {})", event.title, event.start, event.end)
}

/// Build the demo data source, keeping only bookings inside the visible range.
fn demo_schedule(settings: &Settings) -> Result<StaticSchedule> {
    let range = settings.time_range()?;
    let mut schedule = StaticSchedule::from_settings(settings)?;
    let mut next_id = 1;

    for bookings in DEMO_COLUMNS {
        let mut events = Vec::new();
        for &(title, (start_h, start_m), (end_h, end_m), editable) in bookings.iter() {
            let start = Time::new(start_h, start_m);
            let end = Time::new(end_h, end_m);
            if !(range.contains(start) && range.contains(end)) {
                continue;
            }
            events.push(
                Event::builder()
                    .id(next_id)
                    .title(title)
                    .start(start)
                    .end(end)
                    .editable(editable)
                    .build()?,
            );
            next_id += 1;
        }
        schedule.push_column(events);
    }

    Ok(schedule)
}
