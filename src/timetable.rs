use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info, warn};

use self::{
    error::DecodeError,
    models::{Campus, Day, Meeting, Schedule},
};

pub mod error;
pub mod models;

/// Separate meetings inside a schedule line
pub const MEETING_DELIMITER: &str = ":";
/// Separate the meetings from the section codes
pub const SCHEDULE_DELIMITER: &str = "§";
/// Same delimiter, as the generator actually prints it
const LEGACY_SCHEDULE_DELIMITER: &str = "ยง";
/// Separate the section codes
pub const SECTION_DELIMITER: &str = ":";

/// Day used by the generator for a meeting without time
const ABSENT_DAY: char = '-';
/// End used by the generator for a meeting without time
const ABSENT_END: i32 = -1;

// day => day code | campus => campus code
// start, end => minutes since midnight | name => everything left
static MEETING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?s)(?P<day>.)(?P<campus>.)(?P<start>-?\d+),(?P<end>-?\d+)=(?P<name>.*)$")
        .expect("meeting pattern is valid")
});

/// Write a meeting as `<day><campus><start>,<end>=<name>`
pub fn encode_meeting(meeting: &Meeting) -> String {
    format!(
        "{}{}{},{}={}",
        meeting.day.code(),
        meeting.campus.code(),
        meeting.start,
        meeting.end,
        meeting.name
    )
}

/// Read a meeting written by [`encode_meeting`]
pub fn decode_meeting(text: &str) -> Result<Meeting, DecodeError> {
    let malformed = || DecodeError::Malformed {
        text: text.to_owned(),
    };

    let captures = MEETING_RE.captures(text).ok_or_else(malformed)?;

    // Both are exactly one char because of the pattern
    let day = captures["day"].chars().next().ok_or_else(malformed)?;
    let campus = captures["campus"].chars().next().ok_or_else(malformed)?;
    let start: i32 = captures["start"].parse().map_err(|_| malformed())?;
    let end: i32 = captures["end"].parse().map_err(|_| malformed())?;

    if day == ABSENT_DAY || end == ABSENT_END {
        return Err(DecodeError::SentinelAbsent {
            text: text.to_owned(),
        });
    }

    let day = Day::from_code(day).ok_or(DecodeError::InvalidDay { day })?;

    Meeting::new(
        day,
        Campus::from_code(campus),
        start,
        end,
        &captures["name"],
    )
}

/// Write a schedule as one line, without the line ending
pub fn encode_schedule(schedule: &Schedule) -> String {
    let meetings = schedule
        .meetings
        .iter()
        .map(encode_meeting)
        .collect::<Vec<_>>()
        .join(MEETING_DELIMITER);

    format!("{meetings}{SCHEDULE_DELIMITER}{}", schedule.sections())
}

/// Read a schedule line, one bad meeting rejects the whole line
pub fn decode_schedule(line: &str) -> Result<Schedule, DecodeError> {
    let line = line.trim_end_matches(['\r', '\n']);

    let (meetings, sections) = line
        .split_once(SCHEDULE_DELIMITER)
        .or_else(|| line.split_once(LEGACY_SCHEDULE_DELIMITER))
        .unwrap_or((line, ""));

    if meetings.is_empty() {
        return Err(DecodeError::Empty);
    }

    let meetings = meetings
        .split(MEETING_DELIMITER)
        .map(decode_meeting)
        .collect::<Result<Vec<_>, _>>()?;

    let section_ids = if sections.is_empty() {
        vec![]
    } else {
        sections
            .split(SECTION_DELIMITER)
            .map(str::to_owned)
            .collect()
    };

    Ok(Schedule {
        meetings,
        section_ids,
    })
}

/// Read every schedule of the input, skipping the bad lines
pub fn parse(input: &str) -> Vec<Schedule> {
    let mut schedules = vec![];

    for (number, line) in input.lines().enumerate() {
        match decode_schedule(line) {
            Ok(schedule) => schedules.push(schedule),
            Err(DecodeError::Empty) => debug!(line = number + 1, "skipping empty line"),
            Err(e) if e.is_sentinel() => {
                debug!(line = number + 1, "skipping schedule: {e}");
            }
            Err(e) => warn!(line = number + 1, "skipping schedule: {e}"),
        }
    }

    info!("{} schedules loaded", schedules.len());

    schedules
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn meeting(day: Day, campus: char, start: i32, end: i32, name: &str) -> Meeting {
        Meeting::new(day, Campus::from_code(campus), start, end, name).unwrap()
    }

    #[test]
    fn decodes_a_line_without_section_block() {
        let schedule = decode_schedule("M11000,1050=CALC:T21100,1150=PHYS=123").unwrap();

        assert_eq!(
            schedule.meetings,
            vec![
                meeting(Day::Monday, '1', 1000, 1050, "CALC"),
                meeting(Day::Tuesday, '2', 1100, 1150, "PHYS=123"),
            ]
        );
        assert!(schedule.section_ids.is_empty());
    }

    #[test]
    fn decodes_sections() {
        let schedule = decode_schedule("HO600,680=DATA STRUCTURES§08123,09456").unwrap();
        assert_eq!(schedule.meetings[0].day, Day::Thursday);
        assert_eq!(schedule.meetings[0].campus, Campus::Online);
        assert_eq!(schedule.section_ids, vec!["08123,09456".to_owned()]);
        assert_eq!(schedule.sections(), "08123,09456");
    }

    #[test]
    fn accepts_generator_delimiter() {
        let schedule = decode_schedule("F3540,620=Intro to Logicยง12345,67890").unwrap();
        assert_eq!(schedule.meetings.len(), 1);
        assert_eq!(schedule.sections(), "12345,67890");
    }

    #[test]
    fn unknown_campus_round_trips() {
        let text = "WZ700,780=Seminar";
        let decoded = decode_meeting(text).unwrap();
        assert_eq!(decoded.campus, Campus::Other('Z'));
        assert_eq!(encode_meeting(&decoded), text);
    }

    #[test]
    fn schedule_round_trips() {
        let schedule = Schedule {
            meetings: vec![
                meeting(Day::Wednesday, '4', 480, 560, "Genetics"),
                meeting(Day::Monday, 'O', 0, 1439, "Async: lectures"),
            ],
            section_ids: vec!["01234".to_owned(), "56789".to_owned()],
        };
        // A name with the meeting delimiter doesn't survive
        assert!(decode_schedule(&encode_schedule(&schedule)).is_err());

        let schedule = Schedule {
            meetings: vec![
                meeting(Day::Wednesday, '4', 480, 560, "Genetics"),
                meeting(Day::Monday, 'O', 0, 1439, "Async lectures = video"),
            ],
            ..schedule
        };
        assert_eq!(decode_schedule(&encode_schedule(&schedule)).unwrap(), schedule);
    }

    #[rstest]
    #[case::absent_day("-O600,680=Lab", true)]
    #[case::absent_end("M1-1,-1=Lab", true)]
    #[case::unknown_day("S1600,680=Lab", false)]
    #[case::reversed_range("M1680,600=Lab", false)]
    #[case::empty_range("M1600,600=Lab", false)]
    #[case::past_midnight("M11400,1440=Lab", false)]
    #[case::missing_name_separator("M1600,680Lab", false)]
    #[case::missing_comma("M1600680=Lab", false)]
    #[case::letters("M1six,680=Lab", false)]
    #[case::overflow("M199999999999,680=Lab", false)]
    #[case::too_short("M", false)]
    fn rejects_bad_meetings(#[case] text: &str, #[case] sentinel: bool) {
        let err = decode_meeting(text).unwrap_err();
        assert_eq!(err.is_sentinel(), sentinel, "{err}");
    }

    #[test]
    fn reports_the_right_error() {
        assert_eq!(
            decode_meeting("S1600,680=Lab"),
            Err(DecodeError::InvalidDay { day: 'S' })
        );
        assert_eq!(
            decode_meeting("M1680,600=Lab"),
            Err(DecodeError::InvalidRange {
                start: 680,
                end: 600
            })
        );
        assert!(matches!(
            decode_meeting("M1600680=Lab"),
            Err(DecodeError::Malformed { .. })
        ));
    }

    #[test]
    fn one_bad_meeting_drops_the_line() {
        assert!(decode_schedule("M1600,680=Lab:-O-1,-1=Online§1").is_err());
        assert_eq!(decode_schedule(""), Err(DecodeError::Empty));
        assert_eq!(decode_schedule("§123"), Err(DecodeError::Empty));
    }

    #[test]
    fn parse_keeps_order_and_skips_bad_lines() {
        let input = "M1600,680=A§1\n\
                     M1-1,-1=B§2\n\
                     \n\
                     garbage\n\
                     T2600,680=C§3\r\n";

        let schedules = parse(input);

        assert_eq!(schedules.len(), 2);
        assert_eq!(schedules[0].meetings[0].name, "A");
        assert_eq!(schedules[1].meetings[0].name, "C");
        assert_eq!(schedules[1].section_ids, vec!["3".to_owned()]);
    }
}
