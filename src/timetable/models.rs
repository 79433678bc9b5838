use super::{error::DecodeError, SECTION_DELIMITER};

/// Last minute of the day
pub const LAST_MINUTE: i32 = 23 * 60 + 59;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Day {
    pub const ALL: [Self; 5] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
    ];

    /// Column of the day in the week, Monday is 0
    pub fn index(self) -> usize {
        match self {
            Self::Monday => 0,
            Self::Tuesday => 1,
            Self::Wednesday => 2,
            Self::Thursday => 3,
            Self::Friday => 4,
        }
    }

    /// Character used on the wire
    pub fn code(self) -> char {
        match self {
            Self::Monday => 'M',
            Self::Tuesday => 'T',
            Self::Wednesday => 'W',
            Self::Thursday => 'H',
            Self::Friday => 'F',
        }
    }

    pub fn from_code(code: char) -> Option<Self> {
        Self::ALL.into_iter().find(|day| day.code() == code)
    }

    /// Short name showed in headers
    pub fn name(self) -> &'static str {
        match self {
            Self::Monday => "Mon",
            Self::Tuesday => "Tue",
            Self::Wednesday => "Wed",
            Self::Thursday => "Thu",
            Self::Friday => "Fri",
        }
    }
}

/// Where a meeting takes place
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Campus {
    /// College Avenue
    CollegeAvenue,
    Busch,
    Livingston,
    /// Cook/Douglass
    CookDouglass,
    Online,
    /// Any code we don't know about, kept so it can be written back
    Other(char),
}

impl Campus {
    pub fn from_code(code: char) -> Self {
        match code {
            '1' => Self::CollegeAvenue,
            '2' => Self::Busch,
            '3' => Self::Livingston,
            '4' => Self::CookDouglass,
            'O' => Self::Online,
            other => Self::Other(other),
        }
    }

    pub fn code(self) -> char {
        match self {
            Self::CollegeAvenue => '1',
            Self::Busch => '2',
            Self::Livingston => '3',
            Self::CookDouglass => '4',
            Self::Online => 'O',
            Self::Other(code) => code,
        }
    }
}

/// One recurring weekly class session
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Meeting {
    pub day: Day,

    pub campus: Campus,

    /// Minutes since midnight
    pub start: i32,

    /// Minutes since midnight, always after `start`
    pub end: i32,

    /// Course's title
    pub name: String,
}

impl Meeting {
    /// Build a meeting, checking the time range
    pub fn new(
        day: Day,
        campus: Campus,
        start: i32,
        end: i32,
        name: impl Into<String>,
    ) -> Result<Self, DecodeError> {
        if start < 0 || end > LAST_MINUTE || end <= start {
            return Err(DecodeError::InvalidRange { start, end });
        }

        Ok(Self {
            day,
            campus,
            start,
            end,
            name: name.into(),
        })
    }
}

/// A candidate timetable and the registration codes of its sections
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Schedule {
    /// Display order, not time order
    pub meetings: Vec<Meeting>,

    pub section_ids: Vec<String>,
}

impl Schedule {
    /// Section codes as one string, as they were received
    pub fn sections(&self) -> String {
        self.section_ids.join(SECTION_DELIMITER)
    }
}
