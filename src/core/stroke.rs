//! # Stroke Surface Capability
//!
//! The writing board never draws anything itself. It drives a
//! `StrokeSurface`: something that can show or hide a character, animate its
//! stroke order, and run a quiz that reports back through a `QuizListener`.
//!
//! ```text
//! WritingBoard ──create──▶ SurfaceFactory ──▶ Box<dyn StrokeSurface>
//!      ▲                                            │
//!      └──────── Action::Quiz { session, event } ◀──┘ (via QuizListener)
//! ```
//!
//! Every operation is infallible. The terminal implementation lives in
//! `core::engine`; tests use a recording double.

use std::time::Duration;

/// The five canonical stroke classes, numbered as in stroke-order codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stroke {
    /// 横 horizontal (rising strokes included)
    Heng,
    /// 竖 vertical (vertical hooks included)
    Shu,
    /// 撇 left-falling
    Pie,
    /// 点 dot (right-falling included)
    Dian,
    /// 折 any turning stroke
    Zhe,
}

impl Stroke {
    pub const ALL: [Stroke; 5] = [Stroke::Heng, Stroke::Shu, Stroke::Pie, Stroke::Dian, Stroke::Zhe];

    pub fn from_digit(c: char) -> Option<Self> {
        match c {
            '1' => Some(Stroke::Heng),
            '2' => Some(Stroke::Shu),
            '3' => Some(Stroke::Pie),
            '4' => Some(Stroke::Dian),
            '5' => Some(Stroke::Zhe),
            _ => None,
        }
    }

    pub fn digit(&self) -> char {
        match self {
            Stroke::Heng => '1',
            Stroke::Shu => '2',
            Stroke::Pie => '3',
            Stroke::Dian => '4',
            Stroke::Zhe => '5',
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Stroke::Heng => "横",
            Stroke::Shu => "竖",
            Stroke::Pie => "撇",
            Stroke::Dian => "点",
            Stroke::Zhe => "折",
        }
    }

    /// CJK stroke glyph used in the stroke strip.
    pub fn symbol(&self) -> char {
        match self {
            Stroke::Heng => '㇐',
            Stroke::Shu => '㇑',
            Stroke::Pie => '㇒',
            Stroke::Dian => '㇔',
            Stroke::Zhe => '㇕',
        }
    }

    /// Parse a digit string such as `"2512"`.
    pub fn parse_sequence(digits: &str) -> Option<Vec<Stroke>> {
        digits.chars().map(Stroke::from_digit).collect()
    }
}

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Options a surface is created with.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceOptions {
    pub width: u16,
    pub height: u16,
    pub padding: u16,
    pub show_outline: bool,
    pub stroke_animation_speed: f64,
    pub delay_between_strokes: Duration,
    pub stroke_color: Rgb,
    pub outline_color: Rgb,
    pub drawing_width: u16,
    pub show_character: bool,
    /// Misses on a single stroke before the expected stroke is hinted.
    pub show_hint_after_misses: u32,
}

impl Default for SurfaceOptions {
    fn default() -> Self {
        Self {
            width: 320,
            height: 320,
            padding: 20,
            show_outline: true,
            stroke_animation_speed: 1.2,
            delay_between_strokes: Duration::from_millis(200),
            stroke_color: Rgb(0x5D, 0x5F, 0x61),
            outline_color: Rgb(0xE2, 0xE8, 0xF0),
            drawing_width: 30,
            show_character: true,
            show_hint_after_misses: 3,
        }
    }
}

/// What a running quiz reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizEvent {
    Mistake {
        stroke_index: usize,
        mistakes_on_stroke: u32,
        total_mistakes: u32,
    },
    CorrectStroke {
        stroke_index: usize,
        strokes_remaining: usize,
    },
    Complete {
        total_mistakes: u32,
    },
}

/// Receives quiz events. Installed by `quiz()`, dropped by `cancel_quiz()`.
pub type QuizListener = Box<dyn FnMut(QuizEvent) + Send>;

/// Quiz progress as seen by a renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizView {
    pub strokes_drawn: usize,
    pub total_mistakes: u32,
    /// Index of the stroke to hint, after repeated misses.
    pub hint: Option<usize>,
}

/// Snapshot of a surface for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceView {
    pub character: char,
    pub glyph_visible: bool,
    pub outline_visible: bool,
    /// Empty when no stroke-order data exists for the character.
    pub strokes: Vec<Stroke>,
    /// Strokes fully drawn so far (all of them when idle and visible).
    pub strokes_shown: usize,
    /// Stroke currently being animated.
    pub animating_stroke: Option<usize>,
    pub quiz: Option<QuizView>,
    pub stroke_color: Rgb,
    pub outline_color: Rgb,
}

impl SurfaceView {
    pub fn has_stroke_data(&self) -> bool {
        !self.strokes.is_empty()
    }
}

pub trait StrokeSurface: Send {
    fn show_character(&mut self);
    fn hide_character(&mut self);
    fn show_outline(&mut self);
    /// Play the stroke animation once from the first stroke.
    fn animate_character(&mut self);
    /// Start a quiz, replacing any running one.
    fn quiz(&mut self, listener: QuizListener);
    fn cancel_quiz(&mut self);

    /// Feed one learner stroke to the running quiz.
    fn draw_stroke(&mut self, stroke: Stroke);
    /// Advance animations.
    fn tick(&mut self, elapsed: Duration);
    fn is_animating(&self) -> bool;
    fn view(&self) -> SurfaceView;
}

pub trait SurfaceFactory: Send + Sync {
    fn create(&self, character: char, options: &SurfaceOptions) -> Box<dyn StrokeSurface>;
}
