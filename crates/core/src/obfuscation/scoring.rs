//! Score combinators for the heuristic classifier.
//!
//! Every scorer maps its input to a value in `[MINIMUM_SCORE, MAXIMUM_SCORE]`. Scorers are
//! plain tagged variants that are combined into [`Grade`]s, a weighted sum whose weights are
//! validated once, when the grade is built.

use std::sync::Arc;

use crate::error::{ConfigError, FormatError};
use crate::obfuscation::dictionary::Dictionary;
use crate::obfuscation::split::split_words;

pub const MAXIMUM_SCORE: f64 = 1.0;
pub const MINIMUM_SCORE: f64 = 0.0;

pub const MAXIMUM_WEIGHT: f64 = 1.0;
pub const MINIMUM_WEIGHT: f64 = 0.0;

/// Tolerance used when checking that grade weights add up to one.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Capability: score an input in `[0, 1]`.
pub trait Score<T: ?Sized> {
    fn score(&self, input: &T) -> f64;
}

fn clamp_score(score: f64) -> f64 {
    score.clamp(MINIMUM_SCORE, MAXIMUM_SCORE)
}

/// Quadratic growth curve between a worst and a best value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthCurve {
    best: f64,
    worst: f64,
    growth: f64,
}

impl GrowthCurve {
    /// Curve reaching `MAXIMUM_SCORE` exactly at `best`.
    pub fn new(best: usize, worst: usize) -> Self {
        let best = best as f64;
        Self { best, worst: worst as f64, growth: MAXIMUM_SCORE / (best * best) }
    }

    pub fn score_value(&self, value: usize) -> f64 {
        let value = value as f64;
        if value >= self.best {
            MAXIMUM_SCORE
        } else if value <= self.worst {
            MINIMUM_SCORE
        } else {
            clamp_score(value * (self.growth * value))
        }
    }
}

/// Characters a name may consist of: ASCII letters plus a few extras.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterSet {
    extra: Vec<char>,
}

impl CharacterSet {
    pub fn letters() -> Self {
        Self { extra: Vec::new() }
    }

    pub fn letters_and(extra: &[char]) -> Self {
        Self { extra: extra.to_vec() }
    }

    pub fn allows(&self, c: char) -> bool {
        c.is_ascii_alphabetic() || self.extra.contains(&c)
    }

    fn score(&self, text: &str) -> f64 {
        if text.chars().all(|c| self.allows(c)) {
            MAXIMUM_SCORE
        } else {
            MINIMUM_SCORE
        }
    }
}

/// Scorers over a single word.
#[derive(Clone)]
pub enum WordScore {
    /// Growth curve over the word length.
    Length(GrowthCurve),
    /// Full score for real dictionary words.
    Dictionary(Arc<dyn Dictionary>),
    /// Full score when every character is allowed.
    Characters(CharacterSet),
}

impl Score<str> for WordScore {
    fn score(&self, word: &str) -> f64 {
        match self {
            WordScore::Length(curve) => curve.score_value(word.chars().count()),
            WordScore::Dictionary(dictionary) => {
                if dictionary.contains(word) {
                    MAXIMUM_SCORE
                } else {
                    MINIMUM_SCORE
                }
            }
            WordScore::Characters(set) => set.score(word),
        }
    }
}

/// Scorers over the words of an identifier.
#[derive(Clone)]
pub enum WordsScore {
    /// Growth curve over the number of words.
    Count(GrowthCurve),
    /// Average of a per-word grade; no words averages to zero.
    Average(Grade<WordScore>),
}

impl Score<[&str]> for WordsScore {
    fn score(&self, words: &[&str]) -> f64 {
        match self {
            WordsScore::Count(curve) => curve.score_value(words.len()),
            WordsScore::Average(grade) => {
                if words.is_empty() {
                    return MINIMUM_SCORE;
                }
                let total: f64 = words.iter().map(|word| grade.score(*word)).sum();
                clamp_score(total / words.len() as f64)
            }
        }
    }
}

/// An identifier together with its words, split by a naming convention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier<'a> {
    pub text: &'a str,
    pub words: Vec<&'a str>,
}

/// Scorers over a whole identifier.
#[derive(Clone)]
pub enum IdentifierScore {
    /// Grade over the convention-split words.
    Words(Grade<WordsScore>),
    /// Character purity of the full identifier.
    Characters(CharacterSet),
}

impl Score<Identifier<'_>> for IdentifierScore {
    fn score(&self, identifier: &Identifier<'_>) -> f64 {
        match self {
            IdentifierScore::Words(grade) => grade.score(identifier.words.as_slice()),
            IdentifierScore::Characters(set) => set.score(identifier.text),
        }
    }
}

#[derive(Clone)]
struct Weighted<S> {
    weight: f64,
    scorer: S,
}

/// Weighted sum of scorers with a pass threshold.
#[derive(Clone)]
pub struct Grade<S> {
    components: Vec<Weighted<S>>,
    pass_grade: f64,
}

impl<S> Grade<S> {
    pub fn builder() -> GradeBuilder<S> {
        GradeBuilder { components: Vec::new(), pass_grade: MINIMUM_SCORE }
    }

    pub fn pass_grade(&self) -> f64 {
        self.pass_grade
    }

    pub fn weights(&self) -> Vec<f64> {
        self.components.iter().map(|c| c.weight).collect()
    }

    pub fn passes<T: ?Sized>(&self, input: &T) -> bool
    where
        S: Score<T>,
    {
        self.score(input) >= self.pass_grade
    }
}

impl<T: ?Sized, S: Score<T>> Score<T> for Grade<S> {
    fn score(&self, input: &T) -> f64 {
        let total: f64 = self.components.iter().map(|c| c.weight * c.scorer.score(input)).sum();
        clamp_score(total)
    }
}

/// Builder validating the weight invariants of a [`Grade`].
pub struct GradeBuilder<S> {
    components: Vec<Weighted<S>>,
    pass_grade: f64,
}

impl<S> GradeBuilder<S> {
    pub fn weighted(mut self, weight: f64, scorer: S) -> Self {
        self.components.push(Weighted { weight, scorer });
        self
    }

    pub fn pass_grade(mut self, pass_grade: f64) -> Self {
        self.pass_grade = pass_grade;
        self
    }

    /// Fails if any weight is outside `[0, 1]` or the weights do not sum to one.
    pub fn build(self) -> Result<Grade<S>, ConfigError> {
        if self.components.is_empty() {
            return Err(ConfigError::EmptyGrade);
        }
        for component in &self.components {
            if !(MINIMUM_WEIGHT..=MAXIMUM_WEIGHT).contains(&component.weight) {
                return Err(ConfigError::WeightOutOfRange {
                    weight: component.weight,
                    min: MINIMUM_WEIGHT,
                    max: MAXIMUM_WEIGHT,
                });
            }
        }
        let weights: Vec<f64> = self.components.iter().map(|c| c.weight).collect();
        let sum: f64 = weights.iter().sum();
        if (sum - MAXIMUM_WEIGHT).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::WeightSum { weights, sum, expected: MAXIMUM_WEIGHT });
        }
        Ok(Grade { components: self.components, pass_grade: self.pass_grade })
    }
}

/// How an identifier is split into words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Convention {
    /// `MainActivity`; must start with an ASCII capital. `$` separates nested names.
    UpperCamelCase,
    /// `some_package`.
    Underscore,
}

impl Convention {
    pub fn as_str(&self) -> &'static str {
        match self {
            Convention::UpperCamelCase => "UpperCamelCase",
            Convention::Underscore => "underscore",
        }
    }

    pub fn split<'a>(&self, text: &'a str) -> Result<Identifier<'a>, FormatError> {
        let format_error =
            || FormatError { identifier: text.to_string(), convention: self.as_str() };
        if text.is_empty() {
            return Err(format_error());
        }
        let words = match self {
            Convention::UpperCamelCase => {
                if !text.starts_with(|c: char| c.is_ascii_uppercase()) {
                    return Err(format_error());
                }
                split_words(text)
            }
            Convention::Underscore => text.split('_').collect(),
        };
        Ok(Identifier { text, words })
    }
}

/// Grade of a whole identifier under a naming convention.
#[derive(Clone)]
pub struct NameGrader {
    convention: Convention,
    grade: Grade<IdentifierScore>,
}

impl NameGrader {
    pub fn new(convention: Convention, grade: Grade<IdentifierScore>) -> Self {
        Self { convention, grade }
    }

    pub fn grade(&self, text: &str) -> Result<f64, FormatError> {
        let identifier = self.convention.split(text)?;
        Ok(self.grade.score(&identifier))
    }

    pub fn passes(&self, text: &str) -> Result<bool, FormatError> {
        Ok(self.grade(text)? >= self.grade.pass_grade())
    }
}
