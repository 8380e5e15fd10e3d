use std::cell::RefCell;
use std::rc::Rc;

use egui::pos2;
use mockall::predicate::eq;

use super::*;
use crate::models::event::EventId;
use crate::models::time_range::{LayoutUnit, TimeRange};

const VIEWPORT_HEIGHT: f32 = 400.0;

fn range() -> TimeRange {
    TimeRange::new(Time::new(8, 0), Time::new(20, 0), 15).unwrap()
}

fn settings() -> Settings {
    Settings {
        start: Time::new(8, 0),
        end: Time::new(20, 0),
        min_interval: 15,
        layout: LayoutUnit::new(15, 12.0),
        column_width: 100.0,
        half_line_height: 6.0,
        ..Settings::default()
    }
}

fn event(id: i64, title: &str, start: Time, end: Time) -> Event {
    Event::new(EventId(id), title, start, end).unwrap()
}

/// Column 0: #1 10:00-11:00 (frame y 96..144), #2 13:00-14:00 read-only.
/// Column 1: #3 09:00-09:30.
fn source() -> StaticSchedule {
    let mut holiday = event(2, "Holiday", Time::new(13, 0), Time::new(14, 0));
    holiday.is_editable = false;

    StaticSchedule::new(range(), LayoutUnit::new(15, 12.0), 100.0)
        .with_column(vec![
            event(1, "Design review", Time::new(10, 0), Time::new(11, 0)),
            holiday,
        ])
        .with_column(vec![event(3, "Standup", Time::new(9, 0), Time::new(9, 30))])
}

type Log = Rc<RefCell<Vec<String>>>;

fn recording_callbacks() -> (Log, SamidareCallbacks) {
    let log: Log = Rc::default();
    let (begin, edit, end, feedback) = (log.clone(), log.clone(), log.clone(), log.clone());
    let callbacks = SamidareCallbacks::new()
        .on_begin_editing(move |_, event| begin.borrow_mut().push(format!("begin {}", event.id)))
        .on_edit(move |_, event| {
            edit.borrow_mut()
                .push(format!("edit {} {}-{}", event.id, event.start, event.end))
        })
        .on_end_editing(move |_, event| {
            end.borrow_mut()
                .push(format!("end {} {}-{}", event.id, event.start, event.end))
        })
        .on_feedback(move |kind| feedback.borrow_mut().push(format!("{:?}", kind)));
    (log, callbacks)
}

fn loaded() -> (Log, Samidare) {
    let (log, callbacks) = recording_callbacks();
    let mut samidare = Samidare::new(settings()).with_callbacks(callbacks);
    samidare.reload(&source());
    samidare.set_viewport_height(VIEWPORT_HEIGHT);
    (log, samidare)
}

fn cell(column: usize, id: i64) -> CellRef {
    CellRef::new(column, EventId(id))
}

fn entries(log: &Log, prefix: &str) -> Vec<String> {
    log.borrow()
        .iter()
        .filter(|line| line.starts_with(prefix))
        .cloned()
        .collect()
}

fn long_press(samidare: &mut Samidare, location: Pos2) {
    let target = samidare.target_at(location);
    samidare.handle_gesture(GestureSample::long_press(GesturePhase::Began, location, target));
}

fn drag_to(samidare: &mut Samidare, kind: GestureKind, location: Pos2) {
    samidare.handle_gesture(GestureSample::new(
        kind,
        GesturePhase::Changed,
        location,
        GestureTarget::Background,
    ));
}

fn release(samidare: &mut Samidare, kind: GestureKind) {
    samidare.handle_gesture(GestureSample::new(
        kind,
        GesturePhase::Ended,
        Pos2::ZERO,
        GestureTarget::Background,
    ));
}

#[test]
fn test_reload_builds_cell_table() {
    let (_, samidare) = loaded();
    assert_eq!(samidare.number_of_columns(), 2);
    assert_eq!(samidare.content_height(), 576.0 + 6.0);
    assert_eq!(samidare.scroll_offset(), -6.0);

    let frame = samidare.cell_frame(cell(0, 1)).unwrap();
    assert_eq!((frame.min.y, frame.max.y), (96.0, 144.0));
    assert_eq!((frame.min.x, frame.max.x), (2.0, 98.0));
    assert_eq!(samidare.cells().len(), 3);
}

#[test]
fn test_reload_queries_data_source() {
    let mut mock = MockScheduleDataSource::new();
    mock.expect_time_range().return_const(range());
    mock.expect_layout().return_const(LayoutUnit::new(15, 12.0));
    mock.expect_column_width().return_const(80.0f32);
    mock.expect_number_of_columns().times(1).return_const(2usize);
    mock.expect_events()
        .with(eq(0))
        .times(1)
        .returning(|_| vec![event(9, "Mocked", Time::new(8, 0), Time::new(8, 15))]);
    mock.expect_events().with(eq(1)).times(1).returning(|_| Vec::new());

    let mut samidare = Samidare::new(settings());
    samidare.reload(&mock);

    assert_eq!(samidare.content_width(), 160.0);
    assert_eq!(samidare.event(cell(0, 9)).map(|e| e.title.as_str()), Some("Mocked"));
}

#[test]
fn test_hit_test_and_targets() {
    let (_, samidare) = loaded();
    // viewport y = content y - offset, offset is -6
    assert_eq!(samidare.target_at(pos2(50.0, 110.0)), GestureTarget::Cell(cell(0, 1)));
    assert_eq!(samidare.target_at(pos2(150.0, 70.0)), GestureTarget::Cell(cell(1, 3)));
    assert_eq!(samidare.target_at(pos2(50.0, 300.0)), GestureTarget::Background);
}

#[test]
fn test_begin_editing_ends_previous_first() {
    let (log, mut samidare) = loaded();
    samidare.begin_editing(cell(0, 1), true);
    samidare.begin_editing(cell(1, 3), true);

    assert_eq!(
        log.borrow()
            .iter()
            .filter(|line| line.starts_with("begin") || line.starts_with("end"))
            .cloned()
            .collect::<Vec<_>>(),
        vec!["begin #1", "end #1 10:00-11:00", "begin #3"]
    );
    assert_eq!(samidare.editing().map(|s| s.cell()), Some(cell(1, 3)));
}

#[test]
fn test_end_editing_is_a_safe_no_op() {
    let (log, mut samidare) = loaded();
    samidare.end_editing();
    samidare.end_editing();
    assert!(log.borrow().is_empty());
}

#[test]
fn test_preview_follows_flag() {
    let (_, mut samidare) = loaded();
    samidare.begin_editing(cell(0, 1), true);
    assert_eq!(samidare.preview_frame(), samidare.cell_frame(cell(0, 1)));

    samidare.begin_editing(cell(0, 1), false);
    assert_eq!(samidare.preview_frame(), None);

    samidare.end_editing();
    assert_eq!(samidare.preview_frame(), None);
}

#[test]
fn test_long_press_on_read_only_event_is_rejected() {
    let (log, mut samidare) = loaded();
    // #2 starts at 13:00 -> content y 240
    long_press(&mut samidare, pos2(50.0, 250.0));

    assert!(!samidare.is_editing());
    assert!(!samidare.is_dragging());
    assert_eq!(*log.borrow(), vec!["Error"]);
}

#[test]
fn test_event_outside_range_is_not_editable() {
    let (log, callbacks) = recording_callbacks();
    let mut samidare = Samidare::new(settings()).with_callbacks(callbacks);
    // 07:00-09:00 starts an hour before the visible range: frame y -48..48
    let early = StaticSchedule::new(range(), LayoutUnit::new(15, 12.0), 100.0)
        .with_column(vec![event(4, "Early shift", Time::new(7, 0), Time::new(9, 0))]);
    samidare.reload(&early);
    samidare.set_viewport_height(VIEWPORT_HEIGHT);
    assert_eq!(samidare.cell_frame(cell(0, 4)).unwrap().min.y, -48.0);

    long_press(&mut samidare, pos2(50.0, 20.0));
    assert!(!samidare.is_editing());
    assert_eq!(*log.borrow(), vec!["Error"]);

    samidare.begin_editing(cell(0, 4), true);
    assert!(!samidare.is_editing());
    assert_eq!(log.borrow().len(), 1);
}

#[test]
fn test_long_press_drag_moves_block() {
    let (log, mut samidare) = loaded();
    long_press(&mut samidare, pos2(50.0, 110.0));
    assert!(samidare.is_dragging());

    drag_to(&mut samidare, GestureKind::LongPress, pos2(50.0, 134.0));
    // two more pixels stay inside the same interval
    drag_to(&mut samidare, GestureKind::LongPress, pos2(50.0, 136.0));
    assert_eq!(entries(&log, "edit"), vec!["edit #1 10:30-11:30"]);

    release(&mut samidare, GestureKind::LongPress);
    let frame = samidare.cell_frame(cell(0, 1)).unwrap();
    assert_eq!((frame.min.y, frame.max.y), (120.0, 168.0));
    assert!(samidare.is_editing());

    // the table keeps the original until editing ends
    assert_eq!(samidare.event(cell(0, 1)).unwrap().start, Time::new(10, 0));

    samidare.handle_gesture(GestureSample::tap(pos2(50.0, 390.0), GestureTarget::Background));
    assert!(!samidare.is_editing());
    assert_eq!(entries(&log, "end"), vec!["end #1 10:30-11:30"]);
    assert_eq!(samidare.event(cell(0, 1)).unwrap().times(), (Time::new(10, 30), Time::new(11, 30)));
}

#[test]
fn test_edit_feedback_once_per_change() {
    let (log, mut samidare) = loaded();
    samidare.begin_editing(cell(0, 1), true);
    // 1px stays in the same interval, 13px and 25px cross one boundary each
    samidare.edit(EditEdge::Both, 1.0);
    samidare.edit(EditEdge::Both, 12.0);
    samidare.edit(EditEdge::Both, 12.0);

    assert_eq!(entries(&log, "Selection").len(), 2);
    assert_eq!(
        entries(&log, "edit"),
        vec!["edit #1 10:15-11:15", "edit #1 10:30-11:30"]
    );
}

#[test]
fn test_knob_pans_resize_edges() {
    let (log, mut samidare) = loaded();
    samidare.begin_editing(cell(0, 1), true);

    // top knob centre is (82, 96) in content, (82, 102) in the viewport
    let top = pos2(82.0, 102.0);
    assert_eq!(samidare.target_at(top), GestureTarget::TopKnob);
    samidare.handle_gesture(GestureSample::pan(GesturePhase::Began, top, GestureTarget::TopKnob));
    drag_to(&mut samidare, GestureKind::Pan, pos2(82.0, 54.0));
    release(&mut samidare, GestureKind::Pan);
    assert_eq!(samidare.editing().unwrap().event().times(), (Time::new(9, 0), Time::new(11, 0)));

    // bottom knob centre is (18, 144) in content
    let bottom = pos2(18.0, 150.0);
    assert_eq!(samidare.target_at(bottom), GestureTarget::BottomKnob);
    samidare.handle_gesture(GestureSample::pan(GesturePhase::Began, bottom, GestureTarget::BottomKnob));
    drag_to(&mut samidare, GestureKind::Pan, pos2(18.0, 174.0));
    release(&mut samidare, GestureKind::Pan);

    assert_eq!(samidare.editing().unwrap().event().times(), (Time::new(9, 0), Time::new(11, 30)));
    assert_eq!(entries(&log, "edit").len(), 2);
}

#[test]
fn test_pan_on_unedited_cell_is_ignored() {
    let (_, mut samidare) = loaded();
    samidare.begin_editing(cell(0, 1), true);
    samidare.handle_gesture(GestureSample::pan(
        GesturePhase::Began,
        pos2(150.0, 70.0),
        GestureTarget::Cell(cell(1, 3)),
    ));
    assert!(!samidare.is_dragging());
}

#[test]
fn test_second_drag_is_ignored_while_one_is_active() {
    let (_, mut samidare) = loaded();
    long_press(&mut samidare, pos2(50.0, 110.0));
    samidare.handle_gesture(GestureSample::pan(
        GesturePhase::Began,
        pos2(82.0, 102.0),
        GestureTarget::TopKnob,
    ));

    assert_eq!(samidare.editing().unwrap().active_edge(), Some(EditEdge::Both));
}

#[test]
fn test_tap_inside_edited_block_keeps_editing() {
    let (_, mut samidare) = loaded();
    samidare.begin_editing(cell(0, 1), true);
    samidare.handle_gesture(GestureSample::tap(pos2(50.0, 120.0), GestureTarget::Cell(cell(0, 1))));
    assert!(samidare.is_editing());
}

#[test]
fn test_removing_edited_cell_ends_session() {
    let (log, mut samidare) = loaded();
    long_press(&mut samidare, pos2(50.0, 110.0));
    drag_to(&mut samidare, GestureKind::LongPress, pos2(50.0, 395.0));
    assert!(samidare.is_auto_scrolling());

    let removed = samidare.remove_cell(cell(0, 1)).unwrap();
    assert_eq!(removed.id, EventId(1));
    assert!(!samidare.is_editing());
    assert!(!samidare.is_auto_scrolling());
    assert_eq!(entries(&log, "end").len(), 1);
    assert!(samidare.event(cell(0, 1)).is_none());

    // a stale tick after removal does nothing
    samidare.tick(1.0);
    assert_eq!(samidare.scroll_offset(), -6.0);
}

#[test]
fn test_reload_ends_editing() {
    let (log, mut samidare) = loaded();
    samidare.begin_editing(cell(0, 1), true);
    samidare.reload(&source());
    assert!(!samidare.is_editing());
    assert_eq!(entries(&log, "end").len(), 1);
}

#[test]
fn test_auto_scroll_moves_block_with_content() {
    let (_, mut samidare) = loaded();
    long_press(&mut samidare, pos2(50.0, 110.0));
    drag_to(&mut samidare, GestureKind::LongPress, pos2(50.0, 395.0));
    assert!(samidare.is_auto_scrolling());

    let frame_before = samidare.editing().unwrap().frame();
    let offset_before = samidare.scroll_offset();
    assert_eq!(frame_before.min.y, 96.0 + 285.0);

    samidare.tick(10.0);
    assert_eq!(samidare.scroll_offset(), offset_before);

    samidare.tick(10.1);
    let applied = samidare.scroll_offset() - offset_before;
    assert!(applied > 0.0);
    let frame_after = samidare.editing().unwrap().frame();
    assert!((frame_after.min.y - (frame_before.min.y + applied)).abs() < 1e-3);

    release(&mut samidare, GestureKind::LongPress);
    assert!(!samidare.is_auto_scrolling());
    let offset = samidare.scroll_offset();
    samidare.tick(10.2);
    assert_eq!(samidare.scroll_offset(), offset);
}

#[test]
fn test_cancelled_drag_snaps_and_keeps_session() {
    let (log, mut samidare) = loaded();
    long_press(&mut samidare, pos2(50.0, 110.0));
    drag_to(&mut samidare, GestureKind::LongPress, pos2(50.0, 395.0));
    samidare.tick(3.0);
    samidare.tick(3.05);
    assert!(samidare.is_auto_scrolling());

    samidare.handle_gesture(GestureSample::long_press(
        GesturePhase::Cancelled,
        pos2(50.0, 395.0),
        GestureTarget::Background,
    ));

    assert!(!samidare.is_auto_scrolling());
    assert!(!samidare.is_dragging());
    assert!(samidare.is_editing());
    assert!(entries(&log, "end").is_empty());

    let session = samidare.editing().unwrap();
    let grid = samidare.grid().unwrap();
    let frame = session.frame();
    assert_eq!(frame.min.y, grid.time_to_y(session.event().start));
    assert_eq!(frame.max.y, grid.time_to_y(session.event().end));
    assert_eq!(frame.min.y % grid.interval_height(), 0.0);

    let offset = samidare.scroll_offset();
    samidare.tick(3.1);
    assert_eq!(samidare.scroll_offset(), offset);
}

#[test]
fn test_scroll_by_clamps() {
    let (_, mut samidare) = loaded();
    samidare.scroll_by(-100.0);
    assert_eq!(samidare.scroll_offset(), -6.0);
    samidare.scroll_by(10_000.0);
    assert_eq!(samidare.scroll_offset(), 582.0 - VIEWPORT_HEIGHT);
}

#[test]
fn test_indicator_y() {
    let (_, samidare) = loaded();
    assert_eq!(samidare.indicator_y(Time::new(9, 0)), Some(48.0));
    assert_eq!(samidare.indicator_y(Time::new(7, 0)), None);
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "before reload")]
fn test_begin_editing_before_reload_panics_in_debug() {
    let mut samidare = Samidare::new(settings());
    samidare.begin_editing(cell(0, 1), true);
}
