use chrono::{NaiveTime, Timelike};

/// Part of the day covered by the grid
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridSpan {
    /// First minute showed, since midnight
    pub start_minute: i32,

    /// How many minutes fit in the grid's height
    pub minutes: i32,
}

impl GridSpan {
    pub fn new(start: NaiveTime, hours: u32) -> Self {
        // Both fit in an i32, a day has 1440 minutes
        Self {
            start_minute: (start.hour() * 60 + start.minute()) as i32,
            minutes: (hours * 60) as i32,
        }
    }
}

impl Default for GridSpan {
    /// From 07:00 to 23:00
    fn default() -> Self {
        Self {
            start_minute: 7 * 60,
            minutes: 16 * 60,
        }
    }
}

/// Area taken by a meeting, in the unit of the display area
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// True if the point is inside the rectangle, borders included
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && y >= self.y && x <= self.x + self.width && y <= self.y + self.height
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);
