//! # Core Application Logic
//!
//! This module contains hanzi-park's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • Board + strokes      │
//!                    └───────────┬─────────────┘
//!                                │
//!                    ┌───────────┴─────────────┐
//!                    ▼                         ▼
//!             ┌────────────┐            ┌────────────┐
//!             │    TUI     │            │   tasks    │
//!             │  Adapter   │            │  (timers,  │
//!             │ (ratatui)  │            │  lookups)  │
//!             └────────────┘            └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`board`]: The writing board and its Watch/Practice state machine
//! - [`stroke`]: The stroke surface contract
//! - [`engine`]: The terminal stroke surface and stroke-order table
//! - [`dictionary`]: Character lookups
//! - [`search`]: Search input validation
//! - [`notice`]: Toast notifications
//! - [`config`]: Config file and override resolution

pub mod action;
pub mod board;
pub mod config;
pub mod dictionary;
pub mod engine;
pub mod notice;
pub mod record;
pub mod search;
pub mod state;
pub mod stroke;
