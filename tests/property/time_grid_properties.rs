// Property-based tests for time normalization, grid mapping and drag clamping
// Random inputs check the invariants every edit relies on

use egui::{pos2, Rect};
use proptest::prelude::*;
use samidare::models::event::{Event, EventId};
use samidare::models::time::Time;
use samidare::models::time_range::{LayoutUnit, TimeRange};
use samidare::services::edit_session::{EditBounds, EditEdge, EditSession};
use samidare::services::schedule::CellRef;
use samidare::services::time_grid::{snap_minutes, TimeGrid};

fn interval() -> impl Strategy<Value = u32> {
    prop::sample::select(vec![5u32, 10, 15, 20, 30, 60])
}

fn edge() -> impl Strategy<Value = EditEdge> {
    prop_oneof![
        Just(EditEdge::Top),
        Just(EditEdge::Bottom),
        Just(EditEdge::Both),
    ]
}

proptest! {
    /// Property: normalized times always lie within 00:00..=24:00
    #[test]
    fn prop_normalize_stays_in_day(hours in -100i64..100, minutes in -10_000i64..10_000) {
        let time = Time::new(hours, minutes);
        prop_assert!(time >= Time::MIDNIGHT);
        prop_assert!(time <= Time::END_OF_DAY);
        prop_assert!(time.minutes() < 60);
        if time.hours() == 24 {
            prop_assert_eq!(time.minutes(), 0);
        }
    }

    /// Property: normalizing an already normalized time is a no-op
    #[test]
    fn prop_normalize_is_idempotent(hours in -30i64..30, minutes in -500i64..500) {
        let time = Time::new(hours, minutes);
        prop_assert_eq!(Time::new(time.hours() as i64, time.minutes() as i64), time);
    }

    /// Property: snapping moves a value by at most half an interval onto the lattice
    #[test]
    fn prop_snap_lands_on_lattice(value in -5_000i64..5_000, interval in interval()) {
        let snapped = snap_minutes(value, interval);
        prop_assert_eq!(snapped.rem_euclid(interval as i64), 0);
        prop_assert!((snapped - value).abs() * 2 <= interval as i64);
    }

    /// Property: every interval boundary maps to a pixel and back unchanged,
    /// also when the range ends part-way through an interval
    #[test]
    fn prop_lattice_round_trip(
        start_hour in 0i64..12,
        span_hours in 1i64..12,
        extra_minutes in 0i64..60,
        interval in interval(),
        height in 4.0f32..40.0,
        step in 0i64..1_000,
    ) {
        let range = TimeRange::new(
            Time::new(start_hour, 0),
            Time::new(start_hour + span_hours, extra_minutes),
            interval,
        ).unwrap();
        let grid = TimeGrid::new(range, LayoutUnit::new(interval, height));

        let step = step % (range.number_of_intervals() + 1);
        let time = range.start().add_minutes(step * interval as i64);
        prop_assert_eq!(grid.y_to_time(grid.time_to_y(time)), time);
    }

    /// Property: whatever the drag sequence, the block stays inside the
    /// content, keeps at least one interval of height and start precedes end
    #[test]
    fn prop_edit_respects_bounds(
        moves in prop::collection::vec((edge(), -400.0f32..400.0), 1..40),
    ) {
        let range = TimeRange::new(Time::new(8, 0), Time::new(20, 0), 15).unwrap();
        let grid = TimeGrid::new(range, LayoutUnit::new(15, 12.0));
        let bounds = EditBounds {
            content_height: grid.total_height() + 6.0,
            half_line_height: 6.0,
            min_height: grid.interval_height(),
        };
        let event = Event::new(EventId(1), "Block", Time::new(10, 0), Time::new(11, 0)).unwrap();
        let (top, bottom) = grid.span(event.start, event.end);
        let frame = Rect::from_min_max(pos2(2.0, top), pos2(98.0, bottom));
        let mut session = EditSession::begin(CellRef::new(0, event.id), &event, frame, grid, bounds);

        for (edge, delta) in moves {
            session.edit(edge, delta);

            let frame = session.frame();
            prop_assert!(frame.min.y >= -1e-3);
            prop_assert!(frame.max.y <= bounds.max_y() + 1e-3);
            prop_assert!(frame.height() >= bounds.min_height - 1e-3);
            prop_assert!(session.event().start < session.event().end);
        }

        let snapped = session.snap_to_interval();
        prop_assert_eq!(snapped.min.y, grid.time_to_y(session.event().start));
        prop_assert_eq!(snapped.max.y, grid.time_to_y(session.event().end));
    }
}
