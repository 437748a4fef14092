//! # InfoPanel Component
//!
//! Pure render of a dictionary record:
//!
//! - loading: a placeholder skeleton, whatever the record holds
//! - no record: nothing at all
//! - otherwise: the record's fields verbatim
//!
//! Long text is wrapped with `textwrap`, which measures CJK glyphs as two
//! columns.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::core::record::CharacterRecord;
use crate::tui::component::Component;

const SPINNER: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
const SKELETON_WIDTHS: [u16; 5] = [6, 0, 18, 24, 14];

pub struct InfoPanel {
    pub record: Option<CharacterRecord>,
    pub is_loading: bool,
    pub spinner_frame: usize,
}

impl InfoPanel {
    pub fn new(record: Option<CharacterRecord>, is_loading: bool, spinner_frame: usize) -> Self {
        Self {
            record,
            is_loading,
            spinner_frame,
        }
    }

    fn skeleton(&self, width: u16) -> Vec<Line<'static>> {
        let spinner = SPINNER[self.spinner_frame % SPINNER.len()];
        let mut lines = vec![Line::from(Span::styled(
            format!("{spinner} 查字典…"),
            Style::default().fg(Color::Yellow),
        ))];
        for w in SKELETON_WIDTHS {
            let w = w.min(width) as usize;
            lines.push(Line::from(Span::styled(
                "░".repeat(w),
                Style::default().add_modifier(Modifier::DIM),
            )));
        }
        lines
    }

    fn wrapped(text: &str, width: u16, style: Style) -> Vec<Line<'static>> {
        textwrap::wrap(text, width.max(1) as usize)
            .into_iter()
            .map(|line| Line::from(Span::styled(line.into_owned(), style)))
            .collect()
    }

    fn record_lines(record: &CharacterRecord, width: u16) -> Vec<Line<'static>> {
        let label = Style::default().fg(Color::LightRed).add_modifier(Modifier::BOLD);
        let mut lines = vec![
            Line::from(vec![
                Span::styled(
                    record.character.to_string(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(
                    record.pinyin.clone(),
                    Style::default().fg(Color::LightYellow).add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::default(),
            Line::from(Span::styled("释义", label)),
        ];
        lines.extend(Self::wrapped(&record.definition, width, Style::default()));
        lines.push(Line::default());
        lines.push(Line::from(Span::styled("例句", label)));
        lines.extend(Self::wrapped(&record.example_sentence, width, Style::default()));
        lines.extend(Self::wrapped(
            &record.example_translation,
            width,
            Style::default().add_modifier(Modifier::ITALIC | Modifier::DIM),
        ));
        lines
    }
}

impl Component for InfoPanel {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title("字卡");
        let width = block.inner(area).width;

        let lines = if self.is_loading {
            self.skeleton(width)
        } else {
            match &self.record {
                Some(record) => Self::record_lines(record, width),
                None => return,
            }
        };

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dictionary::{LocalDictionary, fallback_record};
    use crate::test_support::buffer_text;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_text(panel: &mut InfoPanel) -> String {
        let backend = TestBackend::new(36, 14);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| panel.render(f, f.area())).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn test_loading_shows_skeleton_even_with_record() {
        let record = LocalDictionary::new().get('猫');
        let text = render_text(&mut InfoPanel::new(Some(record), true, 0));

        assert!(text.contains("查字典"));
        assert!(text.contains('░'));
        assert!(!text.contains("māo"));
    }

    #[test]
    fn test_no_record_renders_nothing() {
        let text = render_text(&mut InfoPanel::new(None, false, 0));
        assert!(text.chars().all(|c| c == ' '));
    }

    #[test]
    fn test_record_fields_rendered_verbatim() {
        let record = LocalDictionary::new().get('猫');
        let text = render_text(&mut InfoPanel::new(Some(record), false, 0));

        assert!(text.contains("māo"));
        assert!(text.contains("Cat."));
        assert!(text.contains("我有一只猫。"));
        assert!(text.contains("I have a cat."));
    }

    #[test]
    fn test_fallback_record_is_shown_like_any_other() {
        let text = render_text(&mut InfoPanel::new(Some(fallback_record('龙')), false, 3));
        assert!(text.contains("Unknown"));
        assert!(text.contains('龙'));
    }

    #[test]
    fn test_long_text_wraps_to_width() {
        let lines = InfoPanel::wrapped("Study hard and make progress every day.", 12, Style::default());
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| l.width() <= 12));
    }
}
