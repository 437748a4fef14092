//! # Board Component
//!
//! Draws a `SurfaceView` as a 田字格 practice square:
//!
//! ```text
//! ╭ 中 ─────────────── 演示中 ╮
//! │ ┌─────────┬─────────┐     │
//! │ │ ╲       ┆       ╱ │     │
//! │ ├┄┄┄┄┄┄┄┄ 中 ┄┄┄┄┄┄┄┤     │   canvas: grid + glyph
//! │ │ ╱       ┆       ╲ │     │
//! │ └─────────┴─────────┘     │
//! │   ㇑ ㇕ ㇐ ㇑              │   stroke strip
//! │   共 4 笔                 │   progress line
//! ╰───────────────────────────╯
//! ```
//!
//! In Practice the strip hides strokes the learner has not written yet,
//! except for a hinted one.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Context, Line as CanvasLine, Rectangle};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::core::record::DisplayMode;
use crate::core::stroke::{Rgb, SurfaceView};
use crate::tui::component::Component;

const GRID_SIZE: f64 = 100.0;
const DASH: f64 = 4.0;

fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

pub struct Board {
    pub view: Option<SurfaceView>,
    pub mode: DisplayMode,
    pub focused: bool,
}

impl Board {
    pub fn new(view: Option<SurfaceView>, mode: DisplayMode, focused: bool) -> Self {
        Self { view, mode, focused }
    }

    fn badge(&self) -> Span<'static> {
        let color = match self.mode {
            DisplayMode::Watch => Color::LightBlue,
            DisplayMode::Practice => Color::LightGreen,
        };
        Span::styled(
            format!(" {} ", self.mode.label()),
            Style::default().fg(Color::Black).bg(color).add_modifier(Modifier::BOLD),
        )
    }

    fn glyph_style(view: &SurfaceView) -> Option<Style> {
        let complete = view.strokes_shown >= view.strokes.len();
        if view.glyph_visible && complete {
            Some(Style::default().fg(color(view.stroke_color)).add_modifier(Modifier::BOLD))
        } else if view.glyph_visible || view.outline_visible {
            Some(Style::default().fg(color(view.outline_color)))
        } else {
            None
        }
    }

    fn stroke_strip(view: &SurfaceView) -> Line<'static> {
        if !view.has_stroke_data() {
            return Line::from(Span::styled("暂无笔顺数据", Style::default().add_modifier(Modifier::DIM)));
        }

        let hint = view.quiz.as_ref().and_then(|q| q.hint);
        let mut spans = Vec::with_capacity(view.strokes.len() * 2);
        for (i, stroke) in view.strokes.iter().enumerate() {
            let span = if i < view.strokes_shown {
                Span::styled(stroke.symbol().to_string(), Style::default().fg(color(view.stroke_color)))
            } else if view.animating_stroke == Some(i) {
                Span::styled(
                    stroke.symbol().to_string(),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                )
            } else if hint == Some(i) {
                Span::styled(
                    stroke.symbol().to_string(),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::UNDERLINED),
                )
            } else if view.quiz.is_some() {
                Span::styled("·", Style::default().add_modifier(Modifier::DIM))
            } else {
                Span::styled(stroke.symbol().to_string(), Style::default().add_modifier(Modifier::DIM))
            };
            spans.push(span);
            spans.push(Span::raw(" "));
        }
        Line::from(spans)
    }

    fn progress(view: &SurfaceView) -> String {
        let total = view.strokes.len();
        if let Some(quiz) = &view.quiz {
            return format!("已写 {}/{} 笔 · 错误 {}", quiz.strokes_drawn, total, quiz.total_mistakes);
        }
        match view.animating_stroke {
            Some(i) => format!("第 {}/{} 笔：{}", i + 1, total, view.strokes[i].name()),
            None if total > 0 => format!("共 {} 笔", total),
            None => String::new(),
        }
    }
}

fn dashed(ctx: &mut Context, (x1, y1): (f64, f64), (x2, y2): (f64, f64), color: Color) {
    let length = ((x2 - x1).powi(2) + (y2 - y1).powi(2)).sqrt();
    let steps = (length / DASH) as usize;
    for step in (0..steps).step_by(2) {
        let a = step as f64 / steps as f64;
        let b = ((step + 1) as f64 / steps as f64).min(1.0);
        ctx.draw(&CanvasLine::new(
            x1 + (x2 - x1) * a,
            y1 + (y2 - y1) * a,
            x1 + (x2 - x1) * b,
            y1 + (y2 - y1) * b,
            color,
        ));
    }
}

impl Component for Board {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focused {
            Style::default().fg(Color::LightRed)
        } else {
            Style::default()
        };
        let title = match &self.view {
            Some(view) => format!(" {} ", view.character),
            None => String::from(" 田字格 "),
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(title)
            .title_top(Line::from(self.badge()).right_aligned());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(view) = &self.view else {
            let waiting = Paragraph::new("准备中…")
                .alignment(Alignment::Center)
                .style(Style::default().add_modifier(Modifier::DIM));
            frame.render_widget(waiting, inner);
            return;
        };

        let [grid_area, strip_area, progress_area] =
            Layout::vertical([Constraint::Min(3), Constraint::Length(1), Constraint::Length(1)]).areas(inner);

        let outline = color(view.outline_color);
        let glyph = Self::glyph_style(view).map(|style| Span::styled(view.character.to_string(), style));
        let canvas = Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([0.0, GRID_SIZE])
            .y_bounds([0.0, GRID_SIZE])
            .paint(move |ctx| {
                ctx.draw(&Rectangle {
                    x: 0.0,
                    y: 0.0,
                    width: GRID_SIZE,
                    height: GRID_SIZE,
                    color: outline,
                });
                let mid = GRID_SIZE / 2.0;
                dashed(ctx, (0.0, mid), (GRID_SIZE, mid), outline);
                dashed(ctx, (mid, 0.0), (mid, GRID_SIZE), outline);
                dashed(ctx, (0.0, 0.0), (GRID_SIZE, GRID_SIZE), outline);
                dashed(ctx, (0.0, GRID_SIZE), (GRID_SIZE, 0.0), outline);
                if let Some(glyph) = &glyph {
                    ctx.layer();
                    ctx.print(mid - 2.0, mid, glyph.clone());
                }
            });
        frame.render_widget(canvas, grid_area);

        frame.render_widget(
            Paragraph::new(Self::stroke_strip(view)).alignment(Alignment::Center),
            strip_area,
        );
        frame.render_widget(
            Paragraph::new(Self::progress(view))
                .alignment(Alignment::Center)
                .style(Style::default().add_modifier(Modifier::DIM)),
            progress_area,
        );
    }
}
