//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as props:
//! - `TitleBar`: app name, selected character, status
//! - `Board`: 田字格 grid, glyph, stroke strip, mode badge
//! - `InfoPanel`: dictionary record or loading skeleton
//! - `Toast`: newest notice overlay
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `SearchBox`: character field with inline validation error
//!
//! Each component file holds its props, events, rendering and tests.
//! Components never reach into `App` directly; `ui.rs` copies the values
//! they need into props on every frame.
//!
//! ```rust,ignore
//! // Good: Dependencies are explicit
//! InfoPanel::new(app.record.clone(), app.selection.is_loading, frame).render(f, area);
//!
//! // Bad: Hidden dependency on global state
//! info_panel.render(f, area); // reads from App
//! ```

mod board;
mod info_panel;
mod search_box;
mod title_bar;
mod toast;

pub use board::Board;
pub use info_panel::InfoPanel;
pub use search_box::{SearchBox, SearchEvent};
pub use title_bar::TitleBar;
pub use toast::Toast;
