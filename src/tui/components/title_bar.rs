//! # TitleBar Component
//!
//! Top status bar showing the app name, the selected character and the
//! latest status message.
//!
//! Stateless: all data arrives as props, so it is trivial to test.
//!
//! The title text changes based on state:
//!
//! 1. **Loading**: `"汉字乐园 · 猫 | 看一看：猫 | 加载中…"`
//! 2. **Status message**: `"汉字乐园 · 猫 | 看一看：猫"`
//! 3. **Default**: `"汉字乐园 · 猫"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

pub const APP_NAME: &str = "汉字乐园";

/// Top status bar component.
pub struct TitleBar {
    pub character: char,
    pub status_message: String,
    pub is_loading: bool,
}

impl TitleBar {
    pub fn new(character: char, status_message: String, is_loading: bool) -> Self {
        Self {
            character,
            status_message,
            is_loading,
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled(APP_NAME, Style::default().fg(Color::LightRed).add_modifier(Modifier::BOLD)),
            Span::raw(format!(" · {}", self.character)),
        ];
        if !self.status_message.is_empty() {
            spans.push(Span::raw(format!(" | {}", self.status_message)));
        }
        if self.is_loading {
            spans.push(Span::styled(" | 加载中…", Style::default().fg(Color::Yellow)));
        }

        frame.render_widget(Line::from(spans), area);
    }
}
