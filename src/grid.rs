use crate::timetable::models::{Campus, Meeting};

use self::models::{GridSpan, Rect, Rgb};

pub mod models;

/// Number of day columns, Monday to Friday
pub const COLUMNS: f32 = 5.0;

/// Where a meeting is drawn in a `width` x `height` area.
///
/// Nothing is clipped: a meeting outside of the span lands outside of the area.
pub fn layout_of(meeting: &Meeting, width: f32, height: f32, span: GridSpan) -> Rect {
    debug_assert!(width > 0.0 && height > 0.0, "empty display area");

    // Minutes per unit of height
    let mpu = span.minutes as f32 / height;

    let column_width = width / COLUMNS;

    Rect {
        x: column_width * meeting.day.index() as f32,
        y: (meeting.start - span.start_minute) as f32 / mpu,
        width: column_width,
        height: (meeting.end - meeting.start) as f32 / mpu,
    }
}

/// Background color of a meeting
pub fn color_of(campus: Campus) -> Rgb {
    match campus {
        Campus::CollegeAvenue => Rgb(0xff, 0xff, 0xcc),
        Campus::Busch => Rgb(0xcc, 0xee, 0xff),
        Campus::Livingston => Rgb(0xff, 0xcc, 0x99),
        Campus::CookDouglass => Rgb(0xdd, 0xff, 0xdd),
        Campus::Online => Rgb(0xff, 0x80, 0x80),
        Campus::Other(_) => Rgb(0x00, 0x00, 0x00),
    }
}

/// Index of every meeting drawn under the point
pub fn hit_test(
    meetings: &[Meeting],
    (x, y): (f32, f32),
    width: f32,
    height: f32,
    span: GridSpan,
) -> Vec<usize> {
    meetings
        .iter()
        .enumerate()
        .filter(|(_, meeting)| layout_of(meeting, width, height, span).contains(x, y))
        .map(|(i, _)| i)
        .collect()
}
