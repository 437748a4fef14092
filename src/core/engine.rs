//! # Stroke Engine
//!
//! Terminal implementation of `StrokeSurface`. Stroke-order data comes from
//! `assets/strokes_cns11643.tsv` with the hand-checked rows of
//! `assets/strokes.tsv` on top, compiled into a sorted table by `build.rs`.
//!
//! Animation is time-sliced: each stroke takes `BASE_STROKE_DURATION / speed`
//! to draw, followed by the configured pause. The quiz compares each stroke
//! the learner enters against the expected class.

use std::time::Duration;

use log::debug;

use crate::core::stroke::{
    QuizEvent, QuizListener, QuizView, Stroke, StrokeSurface, SurfaceFactory, SurfaceOptions,
    SurfaceView,
};

mod table {
    include!(concat!(env!("OUT_DIR"), "/stroke_table.rs"));
}

/// Time to draw one stroke at speed 1.0.
pub const BASE_STROKE_DURATION: Duration = Duration::from_millis(600);

/// Upper bound on one stroke, however slow the configured speed.
pub const MAX_STROKE_DURATION: Duration = Duration::from_secs(60);

/// Stroke order for a character, if the table has it.
pub fn stroke_order(character: char) -> Option<Vec<Stroke>> {
    let idx = table::STROKE_TABLE
        .binary_search_by_key(&character, |(c, _)| *c)
        .ok()?;
    Stroke::parse_sequence(table::STROKE_TABLE[idx].1)
}

struct QuizRun {
    drawn: usize,
    mistakes_on_stroke: u32,
    total_mistakes: u32,
    listener: QuizListener,
}

pub struct StrokeEngine {
    character: char,
    strokes: Vec<Stroke>,
    options: SurfaceOptions,
    glyph_visible: bool,
    outline_visible: bool,
    /// Elapsed time into the running animation.
    animation: Option<Duration>,
    quiz: Option<QuizRun>,
}

impl StrokeEngine {
    pub fn new(character: char, options: SurfaceOptions) -> Self {
        let strokes = stroke_order(character).unwrap_or_default();
        if strokes.is_empty() {
            debug!("No stroke data for {}", character);
        }
        Self {
            character,
            strokes,
            glyph_visible: options.show_character,
            outline_visible: options.show_outline,
            options,
            animation: None,
            quiz: None,
        }
    }

    fn stroke_duration(&self) -> Duration {
        let speed = if self.options.stroke_animation_speed > 0.0 {
            self.options.stroke_animation_speed
        } else {
            1.0
        };
        Duration::try_from_secs_f64(BASE_STROKE_DURATION.as_secs_f64() / speed)
            .unwrap_or(MAX_STROKE_DURATION)
            .min(MAX_STROKE_DURATION)
    }

    /// Duration of one stroke plus the pause after it.
    fn stroke_slot(&self) -> Duration {
        self.stroke_duration().saturating_add(self.options.delay_between_strokes)
    }

    fn animation_length(&self) -> Duration {
        self.stroke_slot().saturating_mul(self.strokes.len() as u32)
    }

    /// (strokes fully shown, stroke being drawn) at `elapsed` into the animation.
    fn animation_progress(&self, elapsed: Duration) -> (usize, Option<usize>) {
        let slot = self.stroke_slot();
        if slot.is_zero() {
            return (self.strokes.len(), None);
        }
        let index = (elapsed.as_nanos() / slot.as_nanos()) as usize;
        if index >= self.strokes.len() {
            return (self.strokes.len(), None);
        }
        let into_slot = elapsed - slot * index as u32;
        if into_slot < self.stroke_duration() {
            (index, Some(index))
        } else {
            (index + 1, None)
        }
    }
}

impl StrokeSurface for StrokeEngine {
    fn show_character(&mut self) {
        self.glyph_visible = true;
    }

    fn hide_character(&mut self) {
        self.glyph_visible = false;
    }

    fn show_outline(&mut self) {
        self.outline_visible = true;
    }

    fn animate_character(&mut self) {
        if self.strokes.is_empty() {
            return;
        }
        self.quiz = None;
        self.glyph_visible = true;
        self.animation = Some(Duration::ZERO);
    }

    fn quiz(&mut self, listener: QuizListener) {
        self.animation = None;
        if self.strokes.is_empty() {
            debug!("Quiz requested for {} without stroke data", self.character);
            self.quiz = None;
            return;
        }
        self.quiz = Some(QuizRun {
            drawn: 0,
            mistakes_on_stroke: 0,
            total_mistakes: 0,
            listener,
        });
    }

    fn cancel_quiz(&mut self) {
        self.quiz = None;
    }

    fn draw_stroke(&mut self, stroke: Stroke) {
        let total = self.strokes.len();
        let Some(run) = self.quiz.as_mut() else {
            return;
        };

        let expected = self.strokes[run.drawn];
        if stroke != expected {
            run.mistakes_on_stroke += 1;
            run.total_mistakes += 1;
            let event = QuizEvent::Mistake {
                stroke_index: run.drawn,
                mistakes_on_stroke: run.mistakes_on_stroke,
                total_mistakes: run.total_mistakes,
            };
            (run.listener)(event);
            return;
        }

        run.drawn += 1;
        run.mistakes_on_stroke = 0;
        (run.listener)(QuizEvent::CorrectStroke {
            stroke_index: run.drawn - 1,
            strokes_remaining: total - run.drawn,
        });

        if run.drawn == total {
            let total_mistakes = run.total_mistakes;
            (run.listener)(QuizEvent::Complete { total_mistakes });
            self.quiz = None;
            self.glyph_visible = true;
        }
    }

    fn tick(&mut self, elapsed: Duration) {
        let Some(progress) = self.animation else {
            return;
        };
        let next = progress.saturating_add(elapsed);
        self.animation = if next >= self.animation_length() {
            None
        } else {
            Some(next)
        };
    }

    fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    fn view(&self) -> SurfaceView {
        let (strokes_shown, animating_stroke) = match (&self.quiz, self.animation) {
            (Some(run), _) => (run.drawn, None),
            (None, Some(elapsed)) => self.animation_progress(elapsed),
            (None, None) if self.glyph_visible => (self.strokes.len(), None),
            (None, None) => (0, None),
        };

        let threshold = self.options.show_hint_after_misses;
        let quiz = self.quiz.as_ref().map(|run| QuizView {
            strokes_drawn: run.drawn,
            total_mistakes: run.total_mistakes,
            hint: (threshold > 0 && run.mistakes_on_stroke >= threshold).then_some(run.drawn),
        });

        SurfaceView {
            character: self.character,
            glyph_visible: self.glyph_visible,
            outline_visible: self.outline_visible,
            strokes: self.strokes.clone(),
            strokes_shown,
            animating_stroke,
            quiz,
            stroke_color: self.options.stroke_color,
            outline_color: self.options.outline_color,
        }
    }
}

/// Creates `StrokeEngine` surfaces.
#[derive(Debug, Default, Clone, Copy)]
pub struct EngineFactory;

impl SurfaceFactory for EngineFactory {
    fn create(&self, character: char, options: &SurfaceOptions) -> Box<dyn StrokeSurface> {
        Box::new(StrokeEngine::new(character, options.clone()))
    }
}
