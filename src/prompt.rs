//! Interactive front end: a menu in the terminal instead of raw key events.

use std::time::{Duration, Instant};

use dialoguer::Select;

use crate::{
    grid::models::Rgb,
    navigation::Direction,
    session::{Action, Click, Event, Frontend, Session},
    utils::{self, meeting_label},
};

/// How long "skip" holds a direction, and how often it's polled meanwhile
const HOLD: Duration = Duration::from_secs(1);
const FRAME: Duration = Duration::from_millis(40);

const MENU: [&str; 10] = [
    "Next",
    "Previous",
    "Skip ahead",
    "Skip back",
    "Like a meeting",
    "Dislike a meeting",
    "Favorite",
    "Delete",
    "Registration link",
    "Quit",
];

/// State of the input for one frame
struct Frame {
    area: (f32, f32),
    now: Instant,
    held: Option<Direction>,
    pressed: Option<Action>,
    click: Option<Click>,
}

impl Frame {
    fn new(area: (f32, f32), now: Instant) -> Self {
        Self {
            area,
            now,
            held: None,
            pressed: None,
            click: None,
        }
    }
}

impl Frontend for Frame {
    fn display_area(&self) -> (f32, f32) {
        self.area
    }

    fn current_timestamp(&self) -> Instant {
        self.now
    }

    fn input_held(&self, direction: Direction) -> bool {
        self.held == Some(direction)
    }

    fn input_just_pressed(&self, action: Action) -> bool {
        self.pressed == Some(action)
    }

    fn pointer_released(&self) -> Option<Click> {
        self.click
    }
}

/// Show the current schedule and ask what to do until the user quits
pub fn run(session: &mut Session, width: usize, height: usize) -> anyhow::Result<()> {
    // The drawing area, without the frame and the header
    let area = (
        width.saturating_sub(2) as f32,
        height.saturating_sub(3) as f32,
    );

    loop {
        let Some(schedule) = session.navigator().current() else {
            println!("No schedule left.");
            return Ok(());
        };

        if let Some(status) = session.navigator().status() {
            println!("{status} ({} schedules)", session.navigator().len());
        }
        for line in utils::draw(schedule, width, height, session.span()) {
            println!("{line}");
        }
        for meeting in &schedule.meetings {
            let Rgb(r, g, b) = session.color_of(meeting.campus);
            println!(
                "\x1b[48;2;{r};{g};{b}m  \x1b[0m {}",
                meeting_label(meeting).replace('\n', " ")
            );
        }

        let Some(choice) = Select::new()
            .with_prompt("What now?")
            .items(&MENU)
            .default(0)
            .interact_opt()?
        else {
            return Ok(());
        };

        let mut frames = vec![];
        let now = Instant::now();
        match choice {
            0 | 1 => {
                let mut frame = Frame::new(area, now);
                frame.held = Some(if choice == 0 {
                    Direction::Next
                } else {
                    Direction::Previous
                });
                frames.push(frame);
            }
            2 | 3 => {
                let direction = if choice == 2 {
                    Direction::Next
                } else {
                    Direction::Previous
                };
                let mut elapsed = Duration::ZERO;
                while elapsed <= HOLD {
                    let mut frame = Frame::new(area, now + elapsed);
                    frame.held = Some(direction);
                    frames.push(frame);
                    elapsed += FRAME;
                }
            }
            4 | 5 => {
                let labels: Vec<String> = schedule
                    .meetings
                    .iter()
                    .map(|meeting| meeting_label(meeting).replace('\n', " "))
                    .collect();
                let Some(picked) = Select::new()
                    .with_prompt("Which meeting?")
                    .items(&labels)
                    .interact_opt()?
                else {
                    continue;
                };

                // Click in the middle of the meeting
                let mut frame = Frame::new(area, now);
                let rect = session.layout_of(&schedule.meetings[picked], &frame);
                frame.click = Some(Click {
                    x: rect.x + rect.width / 2.0,
                    y: rect.y + rect.height / 2.0,
                    liked: choice == 4,
                });
                frames.push(frame);
            }
            6 => frames.push(pressed(area, now, Action::Favorite)),
            7 => frames.push(pressed(area, now, Action::Delete)),
            8 => frames.push(pressed(area, now, Action::Link)),
            _ => frames.push(pressed(area, now, Action::Quit)),
        }

        // Release everything
        let last = frames.last().map_or(now, |frame| frame.now);
        frames.push(Frame::new(area, last + FRAME));

        for frame in frames {
            for event in session.poll(&frame) {
                match event {
                    Event::Favorited(_) => println!("Saved to favorites."),
                    Event::Preference(preference) => println!("{preference}"),
                    Event::Link(link) => println!("{link}"),
                    Event::Quit => return Ok(()),
                    Event::Moved | Event::Deleted => (),
                }
            }
        }
    }
}

fn pressed(area: (f32, f32), now: Instant, action: Action) -> Frame {
    let mut frame = Frame::new(area, now);
    frame.pressed = Some(action);
    frame
}
