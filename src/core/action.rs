//! # Actions
//!
//! Everything that can happen in the app becomes an `Action`.
//! Learner submits 猫? That's `Action::Search('猫')`.
//! The lookup task finishes? That's `Action::RecordLoaded { .. }`.
//!
//! `update()` applies an action to the state and returns an `Effect`: work
//! the adapter has to do outside the state (spawn a lookup, start a timer).
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Deferred actions carry the generation or quiz session they were scheduled
//! for. When a newer search or quiz has superseded them they are dropped, so
//! a late timer can never clobber the loading flag, the record, or the mode.

use std::time::Duration;

use log::{debug, info};

use crate::core::record::{CharacterRecord, DisplayMode};
use crate::core::state::App;
use crate::core::stroke::{QuizEvent, Stroke};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Select a character (already validated).
    Search(char),
    /// Switch display mode. Any value is accepted.
    SetMode(DisplayMode),
    Replay,
    DrawStroke(Stroke),
    /// Time passed since the last tick.
    Tick(Duration),
    Quiz { session: u64, event: QuizEvent },
    LoadingElapsed { generation: u64 },
    RecordLoaded { generation: u64, record: CharacterRecord },
    RevertToWatch { session: u64 },
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    /// Look up `character` and clear the loading flag after the loading delay.
    Search { character: char, generation: u64 },
    /// Send `RevertToWatch { session }` after `delay`.
    ScheduleRevert { session: u64, delay: Duration },
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Search(character) => search(app, character),
        Action::SetMode(mode) => {
            set_mode(app, mode);
            Effect::None
        }
        Action::Replay => {
            app.board.replay();
            Effect::None
        }
        Action::DrawStroke(stroke) => {
            app.board.draw_stroke(stroke);
            Effect::None
        }
        Action::Tick(elapsed) => {
            app.board.tick(elapsed);
            app.notices.tick(elapsed);
            Effect::None
        }
        Action::Quiz { session, event } => {
            if let QuizEvent::CorrectStroke { stroke_index, strokes_remaining } = event
                && app.board.quiz_session() == Some(session)
            {
                app.status_message = format!("第 {} 笔 ✓ 还剩 {} 笔", stroke_index + 1, strokes_remaining);
            }
            match app.board.handle_quiz_event(session, event, &mut app.notices) {
                Some(revert) => {
                    app.status_message = String::from("完成！");
                    Effect::ScheduleRevert {
                        session: revert.session,
                        delay: revert.delay,
                    }
                }
                None => Effect::None,
            }
        }
        Action::LoadingElapsed { generation } => {
            if generation == app.search_generation {
                app.selection.is_loading = false;
            } else {
                debug!("Ignoring loading timer from search {}", generation);
            }
            Effect::None
        }
        Action::RecordLoaded { generation, record } => {
            if generation == app.search_generation {
                debug!("Record loaded for {}", record.character);
                app.record = Some(record);
            } else {
                debug!("Ignoring record for {} from search {}", record.character, generation);
            }
            Effect::None
        }
        Action::RevertToWatch { session } => {
            if app.board.accepts_revert(session) {
                set_mode(app, DisplayMode::Watch);
            } else {
                debug!("Ignoring revert for quiz session {}", session);
            }
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

fn search(app: &mut App, character: char) -> Effect {
    info!("Search: {}", character);
    app.search_generation += 1;
    app.selection.is_loading = true;
    app.selection.selected_character = character;
    app.selection.mode = DisplayMode::Watch;
    app.record = None;
    app.board.load(character, DisplayMode::Watch);
    app.status_message = format!("看一看：{}", character);

    Effect::Search {
        character,
        generation: app.search_generation,
    }
}

/// The selection always takes `mode`. Before the first search there is no
/// surface, so the board stays `Uninitialized` until `search` loads it in Watch.
fn set_mode(app: &mut App, mode: DisplayMode) {
    app.selection.mode = mode;
    app.board.apply_mode(mode);
    app.status_message = match mode {
        DisplayMode::Watch => String::from("看一看"),
        DisplayMode::Practice => String::from("写一写：按 1-5 输入笔画"),
    };
}
