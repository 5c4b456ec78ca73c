//! Depth scoring — a lexical heuristic estimating how reflective a message is.
//!
//! Five independent terms, each capped on its own, are summed and the total is
//! capped at `MAX_DEPTH_SCORE`:
//!
//! | term          | raw count                         | weight | cap |
//! |---------------|-----------------------------------|--------|-----|
//! | length        | characters / 50                   | 1.0    | 3.0 |
//! | questions     | `?` and `？`                        | 0.5    | 2.0 |
//! | abstraction   | distinct reasoning markers present | 0.3    | 2.0 |
//! | emotion       | distinct feeling/belief verbs      | 0.2    | 1.5 |
//! | concreteness  | distinct example markers           | 0.4    | 1.5 |
//!
//! Vocabulary membership is substring containment, so a marker also matches
//! inside a longer word. Each marker counts once no matter how often it appears.

use serde::Serialize;

pub const MAX_DEPTH_SCORE: f64 = 10.0;

const CHARS_PER_LENGTH_POINT: f64 = 50.0;
const LENGTH_CAP: f64 = 3.0;

const QUESTION_WEIGHT: f64 = 0.5;
const QUESTION_CAP: f64 = 2.0;

const ABSTRACTION_WEIGHT: f64 = 0.3;
const ABSTRACTION_CAP: f64 = 2.0;
const ABSTRACTION_TERMS: &[&str] = &[
    "なぜ",
    "どうして",
    "もし",
    "仮に",
    "本質",
    "意味",
    "理由",
    "原因",
    "根本",
];

const EMOTION_WEIGHT: f64 = 0.2;
const EMOTION_CAP: f64 = 1.5;
const EMOTION_TERMS: &[&str] = &["感じ", "思う", "考え", "信じ", "願う", "望む"];

const CONCRETE_WEIGHT: f64 = 0.4;
const CONCRETE_CAP: f64 = 1.5;
const CONCRETE_TERMS: &[&str] = &["例えば", "具体的", "実際", "事例"];

/// Per-term contributions, each already capped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DepthBreakdown {
    pub length: f64,
    pub questions: f64,
    pub abstraction: f64,
    pub emotion: f64,
    pub concreteness: f64,
}

impl DepthBreakdown {
    pub fn total(&self) -> f64 {
        (self.length + self.questions + self.abstraction + self.emotion + self.concreteness)
            .clamp(0.0, MAX_DEPTH_SCORE)
    }
}

pub fn analyze_depth(message: &str) -> DepthBreakdown {
    let char_count = message.chars().count() as f64;
    let question_marks = message.chars().filter(|c| matches!(c, '?' | '？')).count() as f64;

    DepthBreakdown {
        length: (char_count / CHARS_PER_LENGTH_POINT).min(LENGTH_CAP),
        questions: (question_marks * QUESTION_WEIGHT).min(QUESTION_CAP),
        abstraction: vocabulary_term(
            message,
            ABSTRACTION_TERMS,
            ABSTRACTION_WEIGHT,
            ABSTRACTION_CAP,
        ),
        emotion: vocabulary_term(message, EMOTION_TERMS, EMOTION_WEIGHT, EMOTION_CAP),
        concreteness: vocabulary_term(message, CONCRETE_TERMS, CONCRETE_WEIGHT, CONCRETE_CAP),
    }
}

/// Scores a message in `[0.0, MAX_DEPTH_SCORE]`. The empty string scores 0.0.
pub fn score_depth(message: &str) -> f64 {
    analyze_depth(message).total()
}

fn vocabulary_term(message: &str, terms: &[&str], weight: f64, cap: f64) -> f64 {
    let present = terms.iter().filter(|term| message.contains(*term)).count() as f64;
    (present * weight).min(cap)
}
