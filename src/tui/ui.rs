use crate::core::record::DisplayMode;
use crate::core::state::App;
use crate::core::stroke::Stroke;
use crate::tui::component::Component;
use crate::tui::components::{Board, InfoPanel, TitleBar, Toast};
use crate::tui::{Focus, TuiState};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// Lay out and draw the whole screen.
///
/// ```text
/// ┌ title bar ──────────────────────────┐
/// │ search box                          │
/// ├──────────────────┬──────────────────┤
/// │ board            │ info panel       │
/// ├──────────────────┴──────────────────┤
/// │ help line                           │
/// └─────────────────────────────────────┘
/// ```
pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min, Percentage};
    let [title_area, search_area, main_area, help_area] =
        Layout::vertical([Length(1), Length(3), Min(0), Length(1)]).areas(frame.area());
    let [board_area, info_area] = Layout::horizontal([Percentage(55), Percentage(45)]).areas(main_area);

    TitleBar::new(
        app.selection.selected_character,
        app.status_message.clone(),
        app.selection.is_loading,
    )
    .render(frame, title_area);

    tui.search_box.focused = tui.focus == Focus::Search;
    tui.search_box.disabled = app.selection.is_loading;
    tui.search_box.render(frame, search_area);

    Board::new(app.board.view(), app.selection.mode, tui.focus == Focus::Board).render(frame, board_area);
    InfoPanel::new(app.record.clone(), app.selection.is_loading, tui.spinner_frame).render(frame, info_area);

    draw_help(frame, help_area, app.selection.mode, tui.focus);

    Toast::new(app.notices.latest().cloned()).render(frame, main_area);
}

fn help_line(mode: DisplayMode, focus: Focus) -> Line<'static> {
    let key = Style::default().fg(Color::LightRed).add_modifier(Modifier::BOLD);
    let mut spans = Vec::new();
    let mut push = |k: String, label: &str| {
        spans.push(Span::styled(k, key));
        spans.push(Span::raw(format!(" {label}  ")));
    };

    match focus {
        Focus::Search => {
            push("Enter".into(), "查找");
            push("Esc".into(), "返回");
        }
        Focus::Board => {
            push("w".into(), "看一看");
            push("p".into(), "写一写");
            push("r".into(), "重播");
            if mode == DisplayMode::Practice {
                for stroke in Stroke::ALL {
                    push(stroke.digit().to_string(), stroke.name());
                }
            }
            push("/".into(), "搜索");
            push("q".into(), "退出");
        }
    }
    Line::from(spans)
}

fn draw_help(frame: &mut Frame, area: Rect, mode: DisplayMode, focus: Focus) {
    frame.render_widget(help_line(mode, focus).style(Style::default().add_modifier(Modifier::DIM)), area);
}
