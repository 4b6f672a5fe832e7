use std::sync::Arc;

use classmatch_core::error::ConfigError;
use classmatch_core::obfuscation::scoring::{
    CharacterSet, Convention, Grade, GrowthCurve, Score, WordScore, WordsScore,
};
use classmatch_core::obfuscation::{Dictionary, WordList};

#[test]
fn growth_curve_is_quadratic_between_bounds() {
    let curve = GrowthCurve::new(8, 2);
    assert_eq!(curve.score_value(0), 0.0);
    assert_eq!(curve.score_value(2), 0.0);
    assert_eq!(curve.score_value(4), 0.25);
    assert_eq!(curve.score_value(8), 1.0);
    assert_eq!(curve.score_value(20), 1.0);
}

#[test]
fn grade_builder_rejects_weights_not_summing_to_one() {
    let err = Grade::builder()
        .weighted(0.5, WordScore::Characters(CharacterSet::letters()))
        .weighted(0.6, WordScore::Length(GrowthCurve::new(8, 2)))
        .build()
        .err()
        .expect("weight sum violated");
    assert!(matches!(err, ConfigError::WeightSum { .. }));
}

#[test]
fn grade_builder_rejects_out_of_range_weights() {
    let err = Grade::builder()
        .weighted(1.5, WordScore::Characters(CharacterSet::letters()))
        .weighted(-0.5, WordScore::Length(GrowthCurve::new(8, 2)))
        .build()
        .err()
        .expect("weight out of range");
    assert_eq!(err, ConfigError::WeightOutOfRange { weight: 1.5, min: 0.0, max: 1.0 });
}

#[test]
fn grade_builder_rejects_empty_grades() {
    let err = Grade::<WordScore>::builder().build().err().expect("empty grade");
    assert_eq!(err, ConfigError::EmptyGrade);
}

#[test]
fn grade_is_weighted_sum_with_pass_threshold() {
    let dictionary: Arc<dyn Dictionary> = Arc::new(WordList::from_words(["main"]));
    let grade = Grade::builder()
        .weighted(0.6, WordScore::Length(GrowthCurve::new(8, 2)))
        .weighted(0.4, WordScore::Dictionary(dictionary))
        .pass_grade(0.5)
        .build()
        .expect("valid grade");

    assert_eq!(grade.weights(), vec![0.6, 0.4]);
    let main = grade.score("Main");
    assert!((main - 0.55).abs() < 1e-9, "got {main}");
    assert!(grade.passes("Main"));
    assert!(!grade.passes("Qz"));
}

#[test]
fn words_average_of_nothing_is_zero() {
    let grade = Grade::builder()
        .weighted(1.0, WordScore::Characters(CharacterSet::letters()))
        .build()
        .expect("valid grade");
    let average = WordsScore::Average(grade);
    let empty: [&str; 0] = [];
    assert_eq!(average.score(&empty[..]), 0.0);
    assert_eq!(average.score(&["abc", "d1"][..]), 0.5);
}

#[test]
fn character_set_allows_letters_and_extras() {
    let set = CharacterSet::letters_and(&['$']);
    assert!(set.allows('a'));
    assert!(set.allows('Z'));
    assert!(set.allows('$'));
    assert!(!set.allows('_'));
    assert!(!set.allows('1'));
}

#[test]
fn conventions_split_or_report_format_errors() {
    let camel = Convention::UpperCamelCase.split("MainActivity").expect("camel case");
    assert_eq!(camel.words, vec!["Main", "Activity"]);

    let err = Convention::UpperCamelCase.split("mainActivity").expect_err("lower-case start");
    assert_eq!(err.identifier, "mainActivity");
    assert!(Convention::UpperCamelCase.split("").is_err());

    let underscore = Convention::Underscore.split("some_package").expect("underscore");
    assert_eq!(underscore.words, vec!["some", "package"]);
    assert!(Convention::Underscore.split("").is_err());
}
