//! # Toast Component
//!
//! Overlay for the newest live notice, drawn last so it sits on top of the
//! board. Older notices stay queued underneath until they expire.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::core::notice::{Notice, NoticeKind, NoticePosition};
use crate::tui::component::Component;

pub struct Toast {
    pub notice: Option<Notice>,
}

impl Toast {
    pub fn new(notice: Option<Notice>) -> Self {
        Self { notice }
    }

    /// Popup rectangle for `notice`, clamped to `area`.
    fn popup_area(notice: &Notice, area: Rect) -> Rect {
        let width = (notice.message.width() as u16 + 4).min(area.width);
        let height = 3.min(area.height);
        let x = area.x + (area.width - width) / 2;
        let y = match notice.options.position {
            NoticePosition::TopCenter => area.y + 1.min(area.height - height),
            NoticePosition::BottomCenter => area.y + area.height - height,
        };
        Rect::new(x, y, width, height)
    }
}

impl Component for Toast {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let Some(notice) = &self.notice else {
            return;
        };
        let color = match notice.kind {
            NoticeKind::Info => Color::LightMagenta,
            NoticeKind::Success => Color::LightGreen,
        };

        let popup = Self::popup_area(notice, area);
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(color));
        let body = Paragraph::new(notice.message.as_str())
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            .centered()
            .block(block);

        frame.render_widget(Clear, popup);
        frame.render_widget(body, popup);
    }
}
