//! What every front end shares: the capabilities a front end must offer, and the
//! frame-by-frame handling of its input.

use std::{
    fs::OpenOptions,
    io::{self, Write},
    path::PathBuf,
    time::Instant,
};

use thiserror::Error;
use tracing::{error, info};

use crate::{
    grid::{
        self,
        models::{GridSpan, Rect, Rgb},
    },
    navigation::{Direction, LinkTemplate, Navigator, Preference},
    timetable::models::{Campus, Meeting},
};

/// One-shot inputs
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Favorite,
    Delete,
    Link,
    Quit,
}

/// A released mouse button
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Click {
    pub x: f32,
    pub y: f32,
    /// Left button likes, right button dislikes
    pub liked: bool,
}

/// What a front end must be able to tell about its display and its input
pub trait Frontend {
    /// Size of the area the timetable is drawn in
    fn display_area(&self) -> (f32, f32);

    fn current_timestamp(&self) -> Instant;

    fn input_held(&self, direction: Direction) -> bool;

    fn input_just_pressed(&self, action: Action) -> bool;

    /// Modifier making a held direction move on every frame
    fn turbo_held(&self) -> bool {
        false
    }

    fn pointer_released(&self) -> Option<Click> {
        None
    }
}

/// What happened during a poll
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Moved,
    Deleted,
    Favorited(String),
    Preference(Preference),
    Link(String),
    Quit,
}

#[derive(Debug, Error)]
pub enum FavoriteError {
    #[error("can't write favorites to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Append-only file of favorite schedules
#[derive(Clone, Debug)]
pub struct Favorites {
    path: PathBuf,
}

impl Favorites {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Write the line and its line ending at once
    pub fn append(&self, line: &str) -> Result<(), FavoriteError> {
        let io_err = |source| FavoriteError::Io {
            path: self.path.clone(),
            source,
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(io_err)?;

        file.write_all(format!("{line}\n").as_bytes())
            .map_err(io_err)
    }
}

pub struct Session {
    navigator: Navigator,
    span: GridSpan,
    link: LinkTemplate,
    favorites: Favorites,
}

impl Session {
    pub fn new(
        navigator: Navigator,
        span: GridSpan,
        link: LinkTemplate,
        favorites: Favorites,
    ) -> Self {
        Self {
            navigator,
            span,
            link,
            favorites,
        }
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn span(&self) -> GridSpan {
        self.span
    }

    pub fn layout_of(&self, meeting: &Meeting, frontend: &impl Frontend) -> Rect {
        let (width, height) = frontend.display_area();
        grid::layout_of(meeting, width, height, self.span)
    }

    pub fn color_of(&self, campus: Campus) -> Rgb {
        grid::color_of(campus)
    }

    /// Handle the input of one frame
    pub fn poll(&mut self, frontend: &impl Frontend) -> Vec<Event> {
        let mut events = vec![];

        if let Some(click) = frontend.pointer_released() {
            events.extend(self.click(click, frontend));
        }

        if let Some(index) = self.navigator.current_index() {
            if frontend.input_just_pressed(Action::Link) {
                if let Some(link) = self.navigator.registration_link(index, &self.link) {
                    info!("{link}");
                    events.push(Event::Link(link));
                }
            }

            if frontend.input_just_pressed(Action::Favorite) {
                if let Some(line) = self.navigator.format_favorite(index) {
                    // Losing a favorite doesn't end the session
                    match self.favorites.append(&line) {
                        Ok(()) => events.push(Event::Favorited(line)),
                        Err(e) => error!("{e}"),
                    }
                }
            }

            if frontend.input_just_pressed(Action::Delete)
                && self.navigator.delete_current().is_some()
            {
                events.push(Event::Deleted);
            }
        }

        let held = if frontend.input_held(Direction::Previous) {
            Some(Direction::Previous)
        } else if frontend.input_held(Direction::Next) {
            Some(Direction::Next)
        } else {
            None
        };
        if self
            .navigator
            .tick(frontend.current_timestamp(), held, frontend.turbo_held())
        {
            events.push(Event::Moved);
        }

        if frontend.input_just_pressed(Action::Quit) {
            events.push(Event::Quit);
        }

        events
    }

    /// Like or dislike every meeting under the pointer
    fn click(&self, click: Click, frontend: &impl Frontend) -> Vec<Event> {
        let Some(schedule) = self.navigator.current() else {
            return vec![];
        };
        let (width, height) = frontend.display_area();

        grid::hit_test(
            &schedule.meetings,
            (click.x, click.y),
            width,
            height,
            self.span,
        )
        .into_iter()
        .filter_map(|i| self.navigator.record_preference(i, click.liked))
        .inspect(|preference| info!("{preference}"))
        .map(Event::Preference)
        .collect()
    }
}
