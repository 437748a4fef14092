//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::mpsc::{self, Receiver};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use ratatui::buffer::Buffer;
use unicode_width::UnicodeWidthStr;

use crate::core::action::Action;
use crate::core::board::{BoardSettings, WritingBoard};
use crate::core::config::ResolvedConfig;
use crate::core::dictionary::LocalDictionary;
use crate::core::state::App;
use crate::core::stroke::{
    QuizEvent, QuizListener, Stroke, StrokeSurface, SurfaceFactory, SurfaceOptions, SurfaceView,
};

/// A call made on a recording surface.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    Create { character: char, show_character: bool },
    ShowCharacter,
    HideCharacter,
    ShowOutline,
    AnimateCharacter,
    Quiz,
    CancelQuiz,
    DrawStroke(Stroke),
}

/// Shared log of surface calls, plus the listener of the running quiz.
#[derive(Clone, Default)]
pub struct SurfaceLog {
    calls: Arc<Mutex<Vec<SurfaceCall>>>,
    listener: Arc<Mutex<Option<QuizListener>>>,
}

impl SurfaceLog {
    pub fn calls(&self) -> Vec<SurfaceCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }

    /// Deliver `event` to the running quiz. Returns false if none is running.
    pub fn fire(&self, event: QuizEvent) -> bool {
        match self.listener.lock().unwrap().as_mut() {
            Some(listener) => {
                listener(event);
                true
            }
            None => false,
        }
    }

    fn push(&self, call: SurfaceCall) {
        self.calls.lock().unwrap().push(call);
    }
}

/// Creates surfaces that only record what they were asked to do.
pub struct RecordingFactory {
    pub log: SurfaceLog,
}

impl SurfaceFactory for RecordingFactory {
    fn create(&self, character: char, options: &SurfaceOptions) -> Box<dyn StrokeSurface> {
        self.log.push(SurfaceCall::Create {
            character,
            show_character: options.show_character,
        });
        Box::new(RecordingSurface {
            character,
            glyph_visible: options.show_character,
            options: options.clone(),
            log: self.log.clone(),
        })
    }
}

pub struct RecordingSurface {
    character: char,
    glyph_visible: bool,
    options: SurfaceOptions,
    log: SurfaceLog,
}

impl StrokeSurface for RecordingSurface {
    fn show_character(&mut self) {
        self.glyph_visible = true;
        self.log.push(SurfaceCall::ShowCharacter);
    }

    fn hide_character(&mut self) {
        self.glyph_visible = false;
        self.log.push(SurfaceCall::HideCharacter);
    }

    fn show_outline(&mut self) {
        self.log.push(SurfaceCall::ShowOutline);
    }

    fn animate_character(&mut self) {
        self.log.push(SurfaceCall::AnimateCharacter);
    }

    fn quiz(&mut self, listener: QuizListener) {
        *self.log.listener.lock().unwrap() = Some(listener);
        self.log.push(SurfaceCall::Quiz);
    }

    fn cancel_quiz(&mut self) {
        *self.log.listener.lock().unwrap() = None;
        self.log.push(SurfaceCall::CancelQuiz);
    }

    fn draw_stroke(&mut self, stroke: Stroke) {
        self.log.push(SurfaceCall::DrawStroke(stroke));
    }

    fn tick(&mut self, _elapsed: Duration) {}

    fn is_animating(&self) -> bool {
        false
    }

    fn view(&self) -> SurfaceView {
        SurfaceView {
            character: self.character,
            glyph_visible: self.glyph_visible,
            outline_visible: self.options.show_outline,
            strokes: Vec::new(),
            strokes_shown: 0,
            animating_stroke: None,
            quiz: None,
            stroke_color: self.options.stroke_color,
            outline_color: self.options.outline_color,
        }
    }
}

/// A board backed by a recording factory.
pub fn recording_board() -> (WritingBoard, Receiver<Action>, SurfaceLog) {
    let (tx, rx) = mpsc::channel();
    let log = SurfaceLog::default();
    let factory = Arc::new(RecordingFactory { log: log.clone() });
    (WritingBoard::new(factory, BoardSettings::default(), tx), rx, log)
}

/// Creates a test App with a recording board and an instant dictionary.
pub fn test_app() -> (App, Receiver<Action>, SurfaceLog) {
    let (tx, rx) = mpsc::channel();
    let log = SurfaceLog::default();
    let factory = Arc::new(RecordingFactory { log: log.clone() });
    let repository = Arc::new(LocalDictionary::with_delay(Duration::ZERO));
    let app = App::new(&ResolvedConfig::default(), repository, factory, tx);
    (app, rx, log)
}

/// Buffer contents as one string, without the filler cells after wide glyphs.
pub fn buffer_text(buffer: &Buffer) -> String {
    let mut text = String::new();
    let mut skip = 0;
    for cell in buffer.content() {
        if skip > 0 {
            skip -= 1;
            continue;
        }
        let symbol = cell.symbol();
        skip = symbol.width().saturating_sub(1);
        text.push_str(symbol);
    }
    text
}
