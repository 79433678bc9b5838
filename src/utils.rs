use chrono::{NaiveTime, Timelike};

use crate::{
    grid::{layout_of, models::GridSpan, COLUMNS},
    timetable::models::{Day, Meeting, Schedule},
};

use self::models::{ClockTime, Meridiem, TabChar};

pub mod models;

/// Turn minutes since midnight into a 12-hour clock time
pub fn clock(minutes: i32) -> Option<ClockTime> {
    let seconds = u32::try_from(minutes).ok()?.checked_mul(60)?;
    let time = NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0)?;
    let (pm, hour) = time.hour12();

    Some(ClockTime {
        hour,
        minute: time.minute(),
        meridiem: if pm { Meridiem::Pm } else { Meridiem::Am },
    })
}

/// Format minutes since midnight, i.e.: 9:05AM
pub fn format_clock(minutes: i32) -> String {
    match clock(minutes) {
        Some(time) => format!("{}:{:02}{}", time.hour, time.minute, time.meridiem.val()),
        None => format!("{minutes}?"),
    }
}

/// Text showed inside a meeting
pub fn meeting_label(meeting: &Meeting) -> String {
    format!(
        "{}\n{}-{}",
        meeting.name,
        format_clock(meeting.start),
        format_clock(meeting.end)
    )
}

/// Cut the text when it doesn't fit
fn fit(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_owned()
    } else if width == 0 {
        String::new()
    } else {
        let mut cut: String = text.chars().take(width - 1).collect();
        cut.push('…');
        cut
    }
}

/// Draw a schedule in a `width` x `height` cells frame, one string per row
pub fn draw(schedule: &Schedule, width: usize, height: usize, span: GridSpan) -> Vec<String> {
    // Frame and header take 2 columns and 3 rows
    let inner_w = width.saturating_sub(2).max(5);
    let inner_h = height.saturating_sub(3).max(1);
    let mut cells = vec![vec![' '; inner_w]; inner_h];

    for meeting in &schedule.meetings {
        let rect = layout_of(meeting, inner_w as f32, inner_h as f32, span);
        if rect.y + rect.height <= 0.0 || rect.y >= inner_h as f32 {
            continue;
        }

        // Clip to the frame
        let x0 = rect.x.floor().max(0.0) as usize;
        let x1 = ((rect.x + rect.width).floor() as usize).min(inner_w);
        let y0 = rect.y.round().max(0.0) as usize;
        let y1 = ((rect.y + rect.height).round().max(0.0) as usize)
            .max(y0 + 1)
            .min(inner_h);

        for row in cells.iter_mut().take(y1).skip(y0) {
            for cell in row.iter_mut().take(x1).skip(x0) {
                *cell = TabChar::Fill.val();
            }
        }

        let label_w = x1.saturating_sub(x0 + 1);
        for (row, line) in (y0..y1).zip(meeting_label(meeting).lines()) {
            for (i, c) in fit(line, label_w).chars().enumerate() {
                cells[row][x0 + i] = c;
            }
        }
    }

    let bh = TabChar::Bh.val().to_string().repeat(inner_w);
    let bv = TabChar::Bv.val();

    // Day's names centered in their column
    let column = inner_w / COLUMNS as usize;
    let header: String = Day::ALL
        .iter()
        .map(|day| format!("{:^column$}", day.name()))
        .collect();

    let mut lines = Vec::with_capacity(inner_h + 3);
    lines.push(format!("{}{bh}{}", TabChar::Jtl.val(), TabChar::Jtr.val()));
    lines.push(format!("{bv}{:<inner_w$}{bv}", fit(&header, inner_w)));
    for row in cells {
        lines.push(format!("{bv}{}{bv}", row.into_iter().collect::<String>()));
    }
    lines.push(format!("{}{bh}{}", TabChar::Jbl.val(), TabChar::Jbr.val()));

    lines
}
