//! # SearchBox Component
//!
//! Single-line field for picking a character. Wraps `SearchControl`, which
//! owns the text and the submit rule, and adds presentation: focus styling,
//! the inline "not a Chinese character" error, and a dimmed look while a
//! lookup is in flight.
//!
//! ## Props
//!
//! - `focused`: whether keystrokes are routed here
//! - `disabled`: true while loading; Enter is ignored
//!
//! ## State
//!
//! - `control`: the field text
//! - `error`: shown under the field until the next edit

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::core::search::{NOT_CHINESE_MESSAGE, SearchControl};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// High-level events emitted by the SearchBox
#[derive(Debug, Clone, PartialEq)]
pub enum SearchEvent {
    /// A valid character was submitted.
    Submit(char),
    /// Submitted text was not a Chinese character.
    Rejected,
    ContentChanged,
}

pub struct SearchBox {
    pub control: SearchControl,
    pub error: Option<&'static str>,
    pub focused: bool,
    pub disabled: bool,
}

impl SearchBox {
    pub fn new() -> Self {
        Self {
            control: SearchControl::new(),
            error: None,
            focused: false,
            disabled: false,
        }
    }

    pub fn text(&self) -> &str {
        &self.control.field
    }

    fn edited(&mut self) -> Option<SearchEvent> {
        self.error = None;
        Some(SearchEvent::ContentChanged)
    }
}

impl Default for SearchBox {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for SearchBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focused {
            Style::default().fg(Color::LightRed)
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };
        let title = if self.disabled { "找一个汉字 (加载中…)" } else { "找一个汉字" };
        let mut block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(title);
        if let Some(error) = self.error {
            block = block.title_bottom(Line::from(Span::styled(error, Style::default().fg(Color::Red))));
        }

        let text_style = if self.disabled {
            Style::default().add_modifier(Modifier::DIM)
        } else {
            Style::default()
        };
        let field = if self.control.field.is_empty() && !self.focused {
            Paragraph::new(Span::styled("按 / 输入，例如：猫", Style::default().add_modifier(Modifier::DIM)))
        } else {
            Paragraph::new(Span::styled(self.control.field.as_str(), text_style))
        };
        frame.render_widget(field.block(block), area);

        if self.focused {
            let width = self.control.field.width() as u16;
            let max_x = area.x + area.width.saturating_sub(2);
            let cursor_x = (area.x + 1 + width).min(max_x);
            frame.set_cursor_position((cursor_x, area.y + 1));
        }
    }
}

impl EventHandler for SearchBox {
    type Event = SearchEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        // The whole field is read-only while a lookup is loading.
        if self.disabled {
            return None;
        }
        match event {
            TuiEvent::InputChar(c) => {
                self.control.field.push(*c);
                self.edited()
            }
            TuiEvent::Paste(text) => {
                let line = text.lines().next().unwrap_or_default();
                self.control.field.push_str(line.trim());
                self.edited()
            }
            TuiEvent::Backspace => {
                self.control.field.pop()?;
                self.edited()
            }
            TuiEvent::Submit => match self.control.submit() {
                Ok(Some(c)) => {
                    self.error = None;
                    Some(SearchEvent::Submit(c))
                }
                Ok(None) => None,
                Err(e) => {
                    log::debug!("Search rejected: {}", e);
                    self.error = Some(NOT_CHINESE_MESSAGE);
                    Some(SearchEvent::Rejected)
                }
            },
            _ => None,
        }
    }
}
