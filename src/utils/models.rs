/// Collection of char for the timetable frame
pub enum TabChar {
    /// Vertical bar
    Bv,
    /// Horizontal bar
    Bh,
    /// Joint top left
    Jtl,
    /// Joint top right
    Jtr,
    /// Joint bottom left
    Jbl,
    /// Joint bottom right
    Jbr,
    /// Block used to fill a meeting
    Fill,
}

impl TabChar {
    /// Value of the element
    pub fn val(&self) -> char {
        match *self {
            Self::Bv => '│',
            Self::Bh => '─',
            Self::Jtl => '┌',
            Self::Jtr => '┐',
            Self::Jbl => '└',
            Self::Jbr => '┘',
            Self::Fill => '░',
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    pub fn val(self) -> &'static str {
        match self {
            Self::Am => "AM",
            Self::Pm => "PM",
        }
    }
}

/// Time of the day as showed to the users
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClockTime {
    /// From 1 to 12
    pub hour: u32,
    pub minute: u32,
    pub meridiem: Meridiem,
}
