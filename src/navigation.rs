//! Browsing through the candidate schedules.
//!
//! The [`Navigator`] owns every schedule of the session. Renderers only read the
//! current one and forward the user's intents to it; the key-repeat timing works
//! from the timestamps given at each poll, so it can be driven without a clock.

use std::{
    fmt,
    time::{Duration, Instant},
};

use tracing::{debug, info};

use crate::timetable::{encode_meeting, encode_schedule, models::Schedule};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// Timing of repeated moves while a direction is held
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RepeatPolicy {
    /// Wait before the first repeat
    pub initial_delay: Duration,

    /// Wait between the next repeats
    pub repeat_interval: Duration,
}

impl Default for RepeatPolicy {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_millis(500),
            repeat_interval: Duration::from_millis(40),
        }
    }
}

/// Decide, poll after poll, if a held direction should move again
#[derive(Clone, Debug)]
pub struct KeyRepeat {
    policy: RepeatPolicy,

    /// Direction held and when it can fire again
    held: Option<(Direction, Instant)>,
}

impl KeyRepeat {
    pub fn new(policy: RepeatPolicy) -> Self {
        Self { policy, held: None }
    }

    /// Returns the direction to move to for this poll, if any.
    ///
    /// With `turbo`, every poll fires once the initial delay is over.
    pub fn tick(&mut self, now: Instant, held: Option<Direction>, turbo: bool) -> Option<Direction> {
        let Some(direction) = held else {
            self.held = None;
            return None;
        };

        match self.held {
            Some((previous, next)) if previous == direction => {
                if now < next {
                    return None;
                }
                if !turbo {
                    self.held = Some((direction, now + self.policy.repeat_interval));
                }
            }
            // First press, or the other direction took over
            _ => self.held = Some((direction, now + self.policy.initial_delay)),
        }

        Some(direction)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    Empty,
    Active(usize),
}

/// A like or dislike about one meeting
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Preference {
    pub liked: bool,

    /// The meeting, encoded
    pub meeting: String,
}

impl fmt::Display for Preference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = if self.liked { "like" } else { "dislike" };
        write!(f, "{verdict} {}", self.meeting)
    }
}

/// Where to register the sections of a schedule
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkTemplate {
    pub base: String,
    pub semester: String,
}

impl LinkTemplate {
    pub fn format(&self, sections: &str) -> String {
        format!(
            "{}?login=cas&semesterSelection={}&indexList={sections}",
            self.base, self.semester
        )
    }
}

impl Default for LinkTemplate {
    fn default() -> Self {
        Self {
            base: "https://sims.rutgers.edu/webreg/editSchedule.htm".to_owned(),
            semester: "12024".to_owned(),
        }
    }
}

pub struct Navigator {
    schedules: Vec<Schedule>,
    /// Meaningless when there is no schedule
    current: usize,
    repeat: KeyRepeat,
}

impl Navigator {
    pub fn new(schedules: Vec<Schedule>, policy: RepeatPolicy) -> Self {
        Self {
            schedules,
            current: 0,
            repeat: KeyRepeat::new(policy),
        }
    }

    pub fn state(&self) -> State {
        if self.schedules.is_empty() {
            State::Empty
        } else {
            State::Active(self.current)
        }
    }

    pub fn current_index(&self) -> Option<usize> {
        match self.state() {
            State::Empty => None,
            State::Active(index) => Some(index),
        }
    }

    pub fn current(&self) -> Option<&Schedule> {
        self.schedules.get(self.current_index()?)
    }

    pub fn len(&self) -> usize {
        self.schedules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schedules.is_empty()
    }

    pub fn move_next(&mut self) {
        if self.current + 1 < self.schedules.len() {
            self.current += 1;
        }
    }

    pub fn move_previous(&mut self) {
        self.current = self.current.saturating_sub(1);
    }

    pub fn navigate(&mut self, direction: Direction) {
        match direction {
            Direction::Previous => self.move_previous(),
            Direction::Next => self.move_next(),
        }
        debug!(current = self.current, "moved {direction:?}");
    }

    /// Apply the key-repeat policy for this poll, returns true if we moved
    pub fn tick(&mut self, now: Instant, held: Option<Direction>, turbo: bool) -> bool {
        if self.is_empty() {
            return false;
        }

        match self.repeat.tick(now, held, turbo) {
            Some(direction) => {
                self.navigate(direction);
                true
            }
            None => false,
        }
    }

    /// Forget the current schedule
    pub fn delete_current(&mut self) -> Option<Schedule> {
        let index = self.current_index()?;
        let removed = self.schedules.remove(index);

        if self.current >= self.schedules.len() {
            self.current = self.schedules.len().saturating_sub(1);
        }
        info!(index, remaining = self.schedules.len(), "schedule deleted");

        Some(removed)
    }

    /// Opinion about a meeting of the current schedule
    pub fn record_preference(&self, meeting_index: usize, liked: bool) -> Option<Preference> {
        let meeting = self.current()?.meetings.get(meeting_index)?;

        Some(Preference {
            liked,
            meeting: encode_meeting(meeting),
        })
    }

    /// Line to save in the favorites
    pub fn format_favorite(&self, index: usize) -> Option<String> {
        self.schedules.get(index).map(encode_schedule)
    }

    pub fn registration_link(&self, index: usize, template: &LinkTemplate) -> Option<String> {
        self.schedules
            .get(index)
            .map(|schedule| template.format(&schedule.sections()))
    }

    /// Position and sections of the current schedule, i.e.: `3 : 08123,09456`
    pub fn status(&self) -> Option<String> {
        let schedule = self.current()?;
        Some(format!("{} : {}", self.current, schedule.sections()))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::timetable::decode_schedule;

    fn schedules(n: usize) -> Vec<Schedule> {
        (0..n)
            .map(|i| decode_schedule(&format!("M1600,680=Course {i}§{i:05}")).unwrap())
            .collect()
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(7)]
    fn moves_are_clamped(#[case] n: usize) {
        let mut nav = Navigator::new(schedules(n), RepeatPolicy::default());

        for _ in 0..n + 5 {
            nav.move_next();
        }
        assert_eq!(nav.state(), State::Active(n - 1));

        for _ in 0..n + 5 {
            nav.move_previous();
        }
        assert_eq!(nav.state(), State::Active(0));
    }

    #[test]
    fn deleting_the_last_schedule_steps_back() {
        let mut nav = Navigator::new(schedules(3), RepeatPolicy::default());
        nav.move_next();
        nav.move_next();

        let removed = nav.delete_current().unwrap();
        assert_eq!(removed.section_ids, vec!["00002".to_owned()]);
        assert_eq!(nav.state(), State::Active(1));
        assert_eq!(nav.len(), 2);
    }

    #[test]
    fn deleting_in_the_middle_keeps_the_index() {
        let mut nav = Navigator::new(schedules(3), RepeatPolicy::default());
        nav.move_next();

        nav.delete_current();
        assert_eq!(nav.state(), State::Active(1));
        assert_eq!(nav.current().unwrap().sections(), "00002");
    }

    #[test]
    fn deleting_everything_empties_the_session() {
        let mut nav = Navigator::new(schedules(1), RepeatPolicy::default());
        assert!(nav.delete_current().is_some());
        assert_eq!(nav.state(), State::Empty);

        // Everything is a no-op from now on
        assert!(nav.delete_current().is_none());
        nav.move_next();
        nav.move_previous();
        assert!(!nav.tick(Instant::now(), Some(Direction::Next), false));
        assert_eq!(nav.state(), State::Empty);
        assert!(nav.current().is_none());
        assert!(nav.record_preference(0, true).is_none());
        assert!(nav.format_favorite(0).is_none());
        assert!(nav.status().is_none());
    }

    #[test]
    fn holding_repeats_after_the_delay() {
        let mut repeat = KeyRepeat::new(RepeatPolicy::default());
        let t0 = Instant::now();
        let held = Some(Direction::Next);

        assert_eq!(repeat.tick(t0, held, false), held);
        assert_eq!(repeat.tick(t0 + ms(40), held, false), None);
        assert_eq!(repeat.tick(t0 + ms(480), held, false), None);
        assert_eq!(repeat.tick(t0 + ms(520), held, false), held);
        assert_eq!(repeat.tick(t0 + ms(540), held, false), None);
        assert_eq!(repeat.tick(t0 + ms(560), held, false), held);

        // Releasing resets the delay
        assert_eq!(repeat.tick(t0 + ms(600), None, false), None);
        assert_eq!(repeat.tick(t0 + ms(640), held, false), held);
        assert_eq!(repeat.tick(t0 + ms(680), held, false), None);
    }

    #[test]
    fn switching_direction_fires_at_once() {
        let mut repeat = KeyRepeat::new(RepeatPolicy::default());
        let t0 = Instant::now();

        assert!(repeat.tick(t0, Some(Direction::Next), false).is_some());
        assert_eq!(
            repeat.tick(t0 + ms(40), Some(Direction::Previous), false),
            Some(Direction::Previous)
        );
    }

    #[test]
    fn turbo_fires_every_poll_after_the_delay() {
        let mut repeat = KeyRepeat::new(RepeatPolicy::default());
        let t0 = Instant::now();
        let held = Some(Direction::Previous);

        assert!(repeat.tick(t0, held, true).is_some());
        assert!(repeat.tick(t0 + ms(10), held, true).is_none());
        for i in 0..10 {
            assert!(repeat.tick(t0 + ms(500 + i), held, true).is_some());
        }
    }

    #[test]
    fn holding_moves_much_more_than_pressing() {
        let t0 = Instant::now();

        let mut held = Navigator::new(schedules(200), RepeatPolicy::default());
        let mut held_moves = 0;
        for i in 0..=75 {
            if held.tick(t0 + ms(i * 40), Some(Direction::Next), false) {
                held_moves += 1;
            }
        }

        let mut pressed = Navigator::new(schedules(200), RepeatPolicy::default());
        let mut pressed_moves = 0;
        if pressed.tick(t0, Some(Direction::Next), false) {
            pressed_moves += 1;
        }
        pressed.tick(t0 + ms(40), None, false);
        if pressed.tick(t0 + ms(3000), Some(Direction::Next), false) {
            pressed_moves += 1;
        }

        assert_eq!(held_moves, 64);
        assert_eq!(held.current_index(), Some(64));
        assert_eq!(pressed_moves, 2);
        assert_eq!(pressed.current_index(), Some(2));
    }

    #[test]
    fn preferences_are_encoded_meetings() {
        let nav = Navigator::new(schedules(2), RepeatPolicy::default());

        let liked = nav.record_preference(0, true).unwrap();
        assert_eq!(liked.to_string(), "like M1600,680=Course 0");

        let disliked = nav.record_preference(0, false).unwrap();
        assert_eq!(disliked.to_string(), "dislike M1600,680=Course 0");

        assert!(nav.record_preference(1, true).is_none());
    }

    #[test]
    fn favorites_and_links() {
        let mut nav = Navigator::new(schedules(2), RepeatPolicy::default());
        nav.move_next();

        assert_eq!(
            nav.format_favorite(1).as_deref(),
            Some("M1600,680=Course 1§00001")
        );
        assert_eq!(
            nav.registration_link(1, &LinkTemplate::default()).as_deref(),
            Some("https://sims.rutgers.edu/webreg/editSchedule.htm?login=cas&semesterSelection=12024&indexList=00001")
        );
        assert_eq!(nav.status().as_deref(), Some("1 : 00001"));
        assert!(nav.registration_link(5, &LinkTemplate::default()).is_none());
    }
}
