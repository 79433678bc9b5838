use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
    time::Duration,
};

use anyhow::Context;
use chrono::NaiveTime;
use clap::Parser;
use tracing::Level;

mod grid;
mod navigation;
mod prompt;
mod session;
mod timetable;
mod utils;

use crate::{
    grid::models::GridSpan,
    navigation::{LinkTemplate, Navigator, RepeatPolicy},
    session::{Favorites, Session},
};

#[derive(Parser)]
#[clap(version, about, long_about = None)]
struct Args {
    /// File with one schedule per line, default to the standard input
    #[clap(value_parser)]
    input: Option<PathBuf>,

    /// Where favorite schedules are appended
    #[clap(short, long, value_name = "FILE", default_value = "favs.txt")]
    favorites: PathBuf,

    /// Semester used in the registration link, i.e.: 12024
    #[clap(short, long, value_name = "CODE", default_value = "12024")]
    semester: String,

    /// First hour showed in the timetable
    #[clap(long, value_parser = parse_hour, value_name = "HH:MM", default_value = "07:00")]
    grid_start: NaiveTime,

    /// Number of hours showed in the timetable
    #[clap(long, value_name = "HOURS", default_value_t = 16, value_parser = clap::value_parser!(u32).range(1..=24))]
    grid_hours: u32,

    /// Milliseconds before a held direction starts repeating
    #[clap(long, value_name = "MS", default_value_t = 500)]
    initial_delay: u64,

    /// Milliseconds between two repeats of a held direction
    #[clap(long, value_name = "MS", default_value_t = 40)]
    repeat_interval: u64,

    /// Width of the timetable, in characters
    #[clap(long, default_value_t = 80, value_parser = clap::value_parser!(u16).range(7..))]
    width: u16,

    /// Height of the timetable, in lines
    #[clap(long, default_value_t = 32, value_parser = clap::value_parser!(u16).range(4..))]
    height: u16,

    /// Print every schedule and exit
    #[clap(short, long)]
    print: bool,

    /// More logs, can be repeated
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_hour(hour: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(hour, "%H:%M").map_err(|e| format!("{hour}: {e}"))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    // Everything is read before browsing
    let input = match &args.input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("can't read {}", path.display()))?,
        None => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("can't read the standard input")?;
            input
        }
    };

    let schedules = timetable::parse(&input);
    let span = GridSpan::new(args.grid_start, args.grid_hours);
    let (width, height) = (usize::from(args.width), usize::from(args.height));

    if args.print {
        for (i, schedule) in schedules.iter().enumerate() {
            println!("{i} : {}", schedule.sections());
            for line in utils::draw(schedule, width, height, span) {
                println!("{line}");
            }
        }
        return Ok(());
    }

    let policy = RepeatPolicy {
        initial_delay: Duration::from_millis(args.initial_delay),
        repeat_interval: Duration::from_millis(args.repeat_interval),
    };
    let link = LinkTemplate {
        semester: args.semester,
        ..LinkTemplate::default()
    };

    let mut session = Session::new(
        Navigator::new(schedules, policy),
        span,
        link,
        Favorites::new(args.favorites),
    );

    prompt::run(&mut session, width, height)
}
