//! # Writing Board
//!
//! Owns the stroke surface for the selected character and turns display
//! modes into surface calls.
//!
//! ```text
//!                 load(c)
//! Uninitialized ───────────▶ Watching ◀──────────┐
//!                              │  ▲              │ revert (2.5s after Complete)
//!                   Practice   │  │ Watch        │
//!                              ▼  │              │
//!                           Practicing ──────────┘
//! ```
//!
//! - Watching: quiz cancelled, glyph shown, stroke animation played once.
//! - Practicing: outline shown, glyph hidden, quiz running.
//!
//! Quiz events come back through the action channel tagged with the session
//! that produced them. Only the live session is honored, so a cancelled or
//! restarted quiz can never toast or revert.

use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::time::Duration;

use log::{debug, info, warn};

use crate::core::action::Action;
use crate::core::notice::{NoticeKind, NoticeOptions, Notices};
use crate::core::record::DisplayMode;
use crate::core::stroke::{QuizEvent, Stroke, StrokeSurface, SurfaceFactory, SurfaceOptions, SurfaceView};

pub const MISTAKE_MESSAGE: &str = "哎呀，笔画顺序不对哦 ~ 🍄";
pub const SUCCESS_MESSAGE: &str = "太棒了！你真聪明！⭐";

pub const DEFAULT_REVERT_DELAY: Duration = Duration::from_millis(2500);
pub const DEFAULT_MISTAKE_NOTICE: Duration = Duration::from_millis(2000);
pub const DEFAULT_SUCCESS_NOTICE: Duration = Duration::from_millis(2500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardState {
    Uninitialized,
    Watching,
    Practicing,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoardSettings {
    pub options: SurfaceOptions,
    /// Delay between a completed quiz and the automatic return to Watch.
    pub revert_delay: Duration,
    pub mistake_notice: Duration,
    pub success_notice: Duration,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            options: SurfaceOptions::default(),
            revert_delay: DEFAULT_REVERT_DELAY,
            mistake_notice: DEFAULT_MISTAKE_NOTICE,
            success_notice: DEFAULT_SUCCESS_NOTICE,
        }
    }
}

/// Asks the caller to send `RevertToWatch { session }` after `delay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevertRequest {
    pub session: u64,
    pub delay: Duration,
}

pub struct WritingBoard {
    factory: Arc<dyn SurfaceFactory>,
    settings: BoardSettings,
    actions: Sender<Action>,
    surface: Option<Box<dyn StrokeSurface>>,
    state: BoardState,
    character: Option<char>,
    /// Live quiz session, if any.
    quiz_session: Option<u64>,
    sessions_started: u64,
}

impl WritingBoard {
    pub fn new(factory: Arc<dyn SurfaceFactory>, settings: BoardSettings, actions: Sender<Action>) -> Self {
        Self {
            factory,
            settings,
            actions,
            surface: None,
            state: BoardState::Uninitialized,
            character: None,
            quiz_session: None,
            sessions_started: 0,
        }
    }

    pub fn state(&self) -> BoardState {
        self.state
    }

    pub fn character(&self) -> Option<char> {
        self.character
    }

    pub fn quiz_session(&self) -> Option<u64> {
        self.quiz_session
    }

    pub fn settings(&self) -> &BoardSettings {
        &self.settings
    }

    /// Replace the surface with a fresh one for `character` and enter `mode`.
    pub fn load(&mut self, character: char, mode: DisplayMode) {
        self.teardown();

        let options = SurfaceOptions {
            show_character: mode == DisplayMode::Watch,
            ..self.settings.options.clone()
        };
        self.surface = Some(self.factory.create(character, &options));
        self.character = Some(character);
        info!("Board loaded {} ({:?})", character, mode);

        self.enter(mode);
    }

    /// Enter `mode` unless the board is already in it.
    pub fn apply_mode(&mut self, mode: DisplayMode) {
        let already = matches!(
            (self.state, mode),
            (BoardState::Watching, DisplayMode::Watch) | (BoardState::Practicing, DisplayMode::Practice)
        );
        if !already {
            self.enter(mode);
        }
    }

    fn enter(&mut self, mode: DisplayMode) {
        if self.surface.is_none() {
            return;
        }
        match mode {
            DisplayMode::Watch => self.enter_watching(),
            DisplayMode::Practice => self.enter_practicing(),
        }
    }

    fn enter_watching(&mut self) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        self.quiz_session = None;
        surface.cancel_quiz();
        surface.show_character();
        surface.animate_character();
        self.state = BoardState::Watching;
    }

    fn enter_practicing(&mut self) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        surface.show_outline();
        surface.hide_character();
        self.start_quiz();
        self.state = BoardState::Practicing;
    }

    fn start_quiz(&mut self) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        self.sessions_started += 1;
        let session = self.sessions_started;
        let tx = self.actions.clone();
        surface.quiz(Box::new(move |event| {
            if tx.send(Action::Quiz { session, event }).is_err() {
                warn!("Failed to send quiz event for session {}: receiver dropped", session);
            }
        }));
        self.quiz_session = Some(session);
        debug!("Quiz session {} started", session);
    }

    /// Watching: play the animation again. Practicing: restart the quiz.
    pub fn replay(&mut self) {
        match self.state {
            BoardState::Watching => {
                if let Some(surface) = self.surface.as_mut() {
                    surface.animate_character();
                }
            }
            BoardState::Practicing => self.enter_practicing(),
            BoardState::Uninitialized => {}
        }
    }

    /// Forward a learner stroke to the quiz. Ignored outside Practicing.
    pub fn draw_stroke(&mut self, stroke: Stroke) {
        if self.state != BoardState::Practicing {
            return;
        }
        if let Some(surface) = self.surface.as_mut() {
            surface.draw_stroke(stroke);
        }
    }

    pub fn tick(&mut self, elapsed: Duration) {
        if let Some(surface) = self.surface.as_mut() {
            surface.tick(elapsed);
        }
    }

    pub fn is_animating(&self) -> bool {
        self.surface.as_ref().is_some_and(|s| s.is_animating())
    }

    pub fn view(&self) -> Option<SurfaceView> {
        self.surface.as_ref().map(|s| s.view())
    }

    /// Relay a quiz event to the notices. Returns a revert request on completion.
    pub fn handle_quiz_event(
        &mut self,
        session: u64,
        event: QuizEvent,
        notices: &mut Notices,
    ) -> Option<RevertRequest> {
        if self.quiz_session != Some(session) {
            debug!("Ignoring {:?} from stale quiz session {}", event, session);
            return None;
        }

        match event {
            QuizEvent::Mistake { .. } => {
                notices.notify(
                    NoticeKind::Info,
                    MISTAKE_MESSAGE,
                    NoticeOptions::auto_close(self.settings.mistake_notice),
                );
                None
            }
            QuizEvent::CorrectStroke { .. } => None,
            QuizEvent::Complete { total_mistakes } => {
                info!("Quiz session {} complete ({} mistakes)", session, total_mistakes);
                notices.notify(
                    NoticeKind::Success,
                    SUCCESS_MESSAGE,
                    NoticeOptions::auto_close(self.settings.success_notice),
                );
                Some(RevertRequest {
                    session,
                    delay: self.settings.revert_delay,
                })
            }
        }
    }

    /// Whether a revert scheduled for `session` should still take effect.
    pub fn accepts_revert(&self, session: u64) -> bool {
        self.state == BoardState::Practicing && self.quiz_session == Some(session)
    }

    fn teardown(&mut self) {
        if let Some(mut surface) = self.surface.take() {
            surface.cancel_quiz();
        }
        self.quiz_session = None;
        self.state = BoardState::Uninitialized;
    }
}

impl Drop for WritingBoard {
    fn drop(&mut self) {
        self.teardown();
    }
}
