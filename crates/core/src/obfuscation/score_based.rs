//! Score-based heuristic classifier, the primary production strategy.
//!
//! Class leaf names are graded as UpperCamelCase identifiers, package leaf names as
//! underscore-separated identifiers. Names that do not follow the expected convention fall
//! back to a plain word grade. A blacklist of patterns forces "obfuscated".

use std::sync::Arc;

use regex::Regex;

use crate::error::ConfigError;
use crate::model::descriptor::{class_leaf_name, package_leaf_name};
use crate::obfuscation::dictionary::{Dictionary, WordList};
use crate::obfuscation::scoring::{
    CharacterSet, Convention, Grade, GrowthCurve, IdentifierScore, NameGrader, Score, WordScore,
    WordsScore,
};
use crate::obfuscation::ObfuscationDetector;

/// Names generated for anonymous classes by common decompilers/obfuscators.
pub const KNOWN_OBFUSCATED_PATTERNS: &[&str] = &[r"^AnonymousClass[0-9A-Za-z_]*$"];

mod class_name {
    pub const WORD_BEST_LENGTH: usize = 8;
    pub const WORD_WORST_LENGTH: usize = 2;
    pub const WORD_LENGTH_WEIGHT: f64 = 0.6;
    pub const IS_WORD_ENGLISH_WEIGHT: f64 = 0.4;
    pub const WORD_AVERAGE_WEIGHT: f64 = 0.9;
    pub const BEST_WORDS_COUNT: usize = 3;
    pub const WORST_WORDS_COUNT: usize = 1;
    pub const WORDS_COUNT_WEIGHT: f64 = 0.1;
    pub const CONVENTION_WEIGHT: f64 = 0.9;
    pub const CHARACTERS_WEIGHT: f64 = 0.1;
    pub const PASS_SCORE: f64 = 0.6;
}

mod package_name {
    pub const WORD_BEST_LENGTH: usize = 8;
    pub const WORD_WORST_LENGTH: usize = 2;
    pub const WORD_LENGTH_WEIGHT: f64 = 0.4;
    pub const IS_WORD_ENGLISH_WEIGHT: f64 = 0.6;
    pub const WORD_AVERAGE_WEIGHT: f64 = 0.9;
    pub const BEST_WORDS_COUNT: usize = 4;
    pub const WORST_WORDS_COUNT: usize = 1;
    pub const WORDS_COUNT_WEIGHT: f64 = 0.1;
    pub const CONVENTION_WEIGHT: f64 = 0.8;
    pub const CHARACTERS_WEIGHT: f64 = 0.2;
    pub const PASS_SCORE: f64 = 0.6;
}

mod word {
    pub const BEST_LENGTH: usize = 10;
    pub const WORST_LENGTH: usize = 4;
    pub const LENGTH_SCORE_WEIGHT: f64 = 0.4;
    pub const IS_WORD_ENGLISH_SCORE_WEIGHT: f64 = 0.3;
    pub const WORD_CHARACTERS_SCORE_WEIGHT: f64 = 0.3;
    pub const PASS_GRADE: f64 = 0.5;
}

/// Weights and thresholds of one convention-based name grade.
struct NameGradeParams {
    word_best_length: usize,
    word_worst_length: usize,
    word_length_weight: f64,
    dictionary_weight: f64,
    word_average_weight: f64,
    best_words_count: usize,
    worst_words_count: usize,
    words_count_weight: f64,
    convention_weight: f64,
    characters_weight: f64,
    pass_score: f64,
}

fn build_name_grader(
    convention: Convention,
    params: &NameGradeParams,
    characters: CharacterSet,
    dictionary: &Arc<dyn Dictionary>,
) -> Result<NameGrader, ConfigError> {
    let word_grade = Grade::builder()
        .weighted(
            params.word_length_weight,
            WordScore::Length(GrowthCurve::new(params.word_best_length, params.word_worst_length)),
        )
        .weighted(params.dictionary_weight, WordScore::Dictionary(Arc::clone(dictionary)))
        .build()?;

    let words_grade = Grade::builder()
        .weighted(params.word_average_weight, WordsScore::Average(word_grade))
        .weighted(
            params.words_count_weight,
            WordsScore::Count(GrowthCurve::new(params.best_words_count, params.worst_words_count)),
        )
        .build()?;

    let name_grade = Grade::builder()
        .weighted(params.convention_weight, IdentifierScore::Words(words_grade))
        .weighted(params.characters_weight, IdentifierScore::Characters(characters))
        .pass_grade(params.pass_score)
        .build()?;

    Ok(NameGrader::new(convention, name_grade))
}

/// Generic grade for a single word, used when a name breaks its convention.
pub fn word_grade(dictionary: &Arc<dyn Dictionary>) -> Result<Grade<WordScore>, ConfigError> {
    Grade::builder()
        .weighted(
            word::LENGTH_SCORE_WEIGHT,
            WordScore::Length(GrowthCurve::new(word::BEST_LENGTH, word::WORST_LENGTH)),
        )
        .weighted(word::IS_WORD_ENGLISH_SCORE_WEIGHT, WordScore::Dictionary(Arc::clone(dictionary)))
        .weighted(
            word::WORD_CHARACTERS_SCORE_WEIGHT,
            WordScore::Characters(CharacterSet::letters()),
        )
        .pass_grade(word::PASS_GRADE)
        .build()
}

pub struct ScoreBasedDetector {
    class_grader: NameGrader,
    package_grader: NameGrader,
    word_grade: Grade<WordScore>,
    blacklist: Vec<Regex>,
}

impl ScoreBasedDetector {
    pub fn new(dictionary: Arc<dyn Dictionary>) -> Result<Self, ConfigError> {
        let class_grader = build_name_grader(
            Convention::UpperCamelCase,
            &NameGradeParams {
                word_best_length: class_name::WORD_BEST_LENGTH,
                word_worst_length: class_name::WORD_WORST_LENGTH,
                word_length_weight: class_name::WORD_LENGTH_WEIGHT,
                dictionary_weight: class_name::IS_WORD_ENGLISH_WEIGHT,
                word_average_weight: class_name::WORD_AVERAGE_WEIGHT,
                best_words_count: class_name::BEST_WORDS_COUNT,
                worst_words_count: class_name::WORST_WORDS_COUNT,
                words_count_weight: class_name::WORDS_COUNT_WEIGHT,
                convention_weight: class_name::CONVENTION_WEIGHT,
                characters_weight: class_name::CHARACTERS_WEIGHT,
                pass_score: class_name::PASS_SCORE,
            },
            CharacterSet::letters_and(&['$']),
            &dictionary,
        )?;
        let package_grader = build_name_grader(
            Convention::Underscore,
            &NameGradeParams {
                word_best_length: package_name::WORD_BEST_LENGTH,
                word_worst_length: package_name::WORD_WORST_LENGTH,
                word_length_weight: package_name::WORD_LENGTH_WEIGHT,
                dictionary_weight: package_name::IS_WORD_ENGLISH_WEIGHT,
                word_average_weight: package_name::WORD_AVERAGE_WEIGHT,
                best_words_count: package_name::BEST_WORDS_COUNT,
                worst_words_count: package_name::WORST_WORDS_COUNT,
                words_count_weight: package_name::WORDS_COUNT_WEIGHT,
                convention_weight: package_name::CONVENTION_WEIGHT,
                characters_weight: package_name::CHARACTERS_WEIGHT,
                pass_score: package_name::PASS_SCORE,
            },
            CharacterSet::letters_and(&['_']),
            &dictionary,
        )?;
        let word_grade = word_grade(&dictionary)?;
        let blacklist = compile_patterns(KNOWN_OBFUSCATED_PATTERNS)?;
        Ok(Self { class_grader, package_grader, word_grade, blacklist })
    }

    /// Detector over the bundled word list.
    pub fn with_bundled_dictionary() -> Result<Self, ConfigError> {
        let dictionary: Arc<dyn Dictionary> = WordList::bundled();
        Self::new(dictionary)
    }

    /// Replace the blacklist; every pattern must be a valid regex.
    pub fn with_blacklist(mut self, patterns: &[&str]) -> Result<Self, ConfigError> {
        self.blacklist = compile_patterns(patterns)?;
        Ok(self)
    }

    pub fn is_known_obfuscated_pattern(&self, leaf_name: &str) -> bool {
        self.blacklist.iter().any(|pattern| pattern.is_match(leaf_name))
    }

    /// Grade of a class leaf name in `[0, 1]`; convention breaks use the word grade.
    pub fn class_name_grade(&self, class_name: &str) -> f64 {
        let leaf = class_leaf_name(class_name);
        self.class_grader.grade(leaf).unwrap_or_else(|_| self.word_score(leaf))
    }

    /// Grade of a package leaf name in `[0, 1]`; convention breaks use the word grade.
    pub fn package_name_grade(&self, package_prefix: &str) -> f64 {
        let leaf = package_leaf_name(package_prefix);
        self.package_grader.grade(leaf).unwrap_or_else(|_| self.word_score(leaf))
    }

    fn word_score(&self, word: &str) -> f64 {
        self.word_grade.score(word)
    }
}

impl ObfuscationDetector for ScoreBasedDetector {
    fn is_class_name_obfuscated(&self, class_name: &str) -> bool {
        let leaf = class_leaf_name(class_name);
        if self.is_known_obfuscated_pattern(leaf) {
            return true;
        }
        match self.class_grader.passes(leaf) {
            Ok(passed) => !passed,
            Err(_) => !self.word_grade.passes(leaf),
        }
    }

    fn is_package_name_obfuscated(&self, package_prefix: &str) -> bool {
        let leaf = package_leaf_name(package_prefix);
        match self.package_grader.passes(leaf) {
            Ok(passed) => !passed,
            Err(_) => !self.word_grade.passes(leaf),
        }
    }

    fn name(&self) -> &'static str {
        "score"
    }
}

fn compile_patterns(patterns: &[&str]) -> Result<Vec<Regex>, ConfigError> {
    patterns
        .iter()
        .map(|pattern| {
            Regex::new(pattern).map_err(|err| ConfigError::InvalidOption {
                option: "blacklist",
                reason: err.to_string(),
            })
        })
        .collect()
}
