//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Focus
//!
//! - **Board**: single keys drive the board (`w` watch, `p` practice,
//!   `r` replay, `1`-`5` strokes, `/` search, `q` quit). Any other
//!   character jumps to the search box and is typed there.
//! - **Search**: keys edit the field, Enter submits, Esc goes back.
//!
//! Ctrl+C quits from either.
//!
//! ## Redraw Strategy
//!
//! - **Animating** (stroke animation, loading skeleton, visible toast):
//!   draws every ~80ms.
//! - **Idle**: sleeps up to 500ms, only redraws on events or background
//!   actions.
//!
//! Every loop iteration sends `Action::Tick` with the measured elapsed time,
//! so animations and toasts advance by wall-clock time, not frame count.

mod component;
mod components;
mod event;
pub mod tasks;
mod ui;

use log::{debug, info};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;

use crate::core::action::{Action, update};
use crate::core::config::ResolvedConfig;
use crate::core::dictionary::CharacterRepository;
use crate::core::engine::EngineFactory;
use crate::core::record::DisplayMode;
use crate::core::state::App;
use crate::core::stroke::Stroke;
use crate::tui::component::EventHandler;
use crate::tui::components::{SearchBox, SearchEvent};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::tasks::Scheduler;

const ANIMATION_POLL: Duration = Duration::from_millis(80);
const IDLE_POLL: Duration = Duration::from_millis(500);

/// Where keystrokes go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Board,
    Search,
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub focus: Focus,
    pub search_box: SearchBox,
    pub spinner_frame: usize,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            focus: Focus::Board,
            search_box: SearchBox::new(),
            spinner_frame: 0,
        }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableBracketedPaste, Show, SetCursorStyle::SteadyBlock)?;
        info!("Terminal modes enabled (bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableBracketedPaste, Hide);
    }
}

/// Map a terminal event to an action, updating focus and the search box.
pub fn handle_event(tui: &mut TuiState, event: TuiEvent) -> Option<Action> {
    if event == TuiEvent::ForceQuit {
        return Some(Action::Quit);
    }

    match tui.focus {
        Focus::Board => match event {
            TuiEvent::InputChar('q') => Some(Action::Quit),
            TuiEvent::InputChar('w') => Some(Action::SetMode(DisplayMode::Watch)),
            TuiEvent::InputChar('p') => Some(Action::SetMode(DisplayMode::Practice)),
            TuiEvent::InputChar('r') => Some(Action::Replay),
            TuiEvent::InputChar(c @ '1'..='5') => Stroke::from_digit(c).map(Action::DrawStroke),
            TuiEvent::InputChar('/') | TuiEvent::Submit => {
                tui.focus = Focus::Search;
                None
            }
            TuiEvent::InputChar(_) | TuiEvent::Paste(_) => {
                tui.focus = Focus::Search;
                handle_event(tui, event)
            }
            _ => None,
        },
        Focus::Search => {
            if event == TuiEvent::Escape {
                tui.focus = Focus::Board;
                return None;
            }
            match tui.search_box.handle_event(&event)? {
                SearchEvent::Submit(character) => {
                    tui.focus = Focus::Board;
                    Some(Action::Search(character))
                }
                SearchEvent::Rejected | SearchEvent::ContentChanged => None,
            }
        }
    }
}

pub fn run(config: ResolvedConfig, repository: Arc<dyn CharacterRepository>) -> std::io::Result<()> {
    // Channel for actions from background tasks and quiz listeners
    let (tx, rx) = mpsc::channel();

    let mut app = App::new(&config, repository, Arc::new(EngineFactory), tx.clone());
    let mut tui = TuiState::new();
    let mut scheduler = Scheduler::new(tx);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Startup search for the default character
    let default_character = app.default_character;
    let effect = update(&mut app, Action::Search(default_character));
    scheduler.run_effect(&app, effect);

    let start_time = Instant::now();
    let mut last_tick = start_time;
    let mut needs_redraw = true; // Force first frame

    'main: loop {
        let now = Instant::now();
        let effect = update(&mut app, Action::Tick(now - last_tick));
        scheduler.run_effect(&app, effect);
        last_tick = now;

        let animating = app.is_animating();
        if animating {
            needs_redraw = true;
        }

        // Only draw when something changed
        if needs_redraw {
            tui.spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        let timeout = if animating { ANIMATION_POLL } else { IDLE_POLL };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event.into_iter().chain(std::iter::from_fn(poll_event_immediate)) {
            // A search earlier in this batch locks the field before the next frame
            tui.search_box.disabled = app.selection.is_loading;
            if let Some(action) = handle_event(&mut tui, event) {
                let effect = update(&mut app, action);
                if scheduler.run_effect(&app, effect) {
                    break 'main;
                }
            }
        }

        // Handle background task and quiz actions
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(&mut app, action);
            if scheduler.run_effect(&app, effect) {
                break 'main;
            }
        }
    }

    info!("Shutting down");
    ratatui::restore();
    Ok(())
}
