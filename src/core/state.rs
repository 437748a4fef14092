//! # Application State
//!
//! Core state for hanzi-park. Domain logic only, no TUI-specific types.
//! Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── selection: SelectionState               // character, mode, loading flag
//! ├── record: Option<CharacterRecord>         // shown by the info panel
//! ├── board: WritingBoard                     // owns the stroke surface
//! ├── notices: Notices                        // toasts
//! ├── repository: Arc<dyn CharacterRepository>
//! ├── search_generation: u64                  // bumps on every search
//! ├── default_character: char                 // searched on startup
//! ├── loading_delay: Duration
//! └── status_message: String                  // status bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::time::Duration;

use crate::core::action::Action;
use crate::core::board::WritingBoard;
use crate::core::config::ResolvedConfig;
use crate::core::dictionary::CharacterRepository;
use crate::core::notice::Notices;
use crate::core::record::{CharacterRecord, SelectionState};
use crate::core::stroke::SurfaceFactory;

pub struct App {
    pub selection: SelectionState,
    pub record: Option<CharacterRecord>,
    pub board: WritingBoard,
    pub notices: Notices,
    pub repository: Arc<dyn CharacterRepository>,
    pub search_generation: u64,
    pub default_character: char,
    /// How long the loading flag stays up after a search.
    pub loading_delay: Duration,
    pub status_message: String,
}

impl App {
    pub fn new(
        config: &ResolvedConfig,
        repository: Arc<dyn CharacterRepository>,
        factory: Arc<dyn SurfaceFactory>,
        actions: Sender<Action>,
    ) -> Self {
        Self {
            selection: SelectionState::new(config.default_character),
            record: None,
            board: WritingBoard::new(factory, config.board.clone(), actions),
            notices: Notices::new(),
            repository,
            search_generation: 0,
            default_character: config.default_character,
            loading_delay: config.loading_delay,
            status_message: String::from("欢迎来到汉字乐园！"),
        }
    }

    /// Whether something on screen is moving and needs frequent redraws.
    pub fn is_animating(&self) -> bool {
        self.selection.is_loading || self.board.is_animating() || !self.notices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use crate::core::board::BoardState;
    use crate::core::record::DisplayMode;
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let (app, _rx, _log) = test_app();
        assert_eq!(app.selection.selected_character, '爱');
        assert_eq!(app.selection.mode, DisplayMode::Watch);
        assert!(!app.selection.is_loading);
        assert!(app.record.is_none());
        assert_eq!(app.board.state(), BoardState::Uninitialized);
        assert!(!app.is_animating());
    }
}
