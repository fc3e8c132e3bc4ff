//! Grade evaluation: score + max score -> percentage + letter grade.
//!
//! Derived fields stored on a grade row always come from [`evaluate`], run
//! immediately before the write. Callers never supply percentage or letter
//! themselves.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const DEFAULT_MAX_SCORE: f64 = 100.0;

/// Letter grades, highest first. Thresholds are inclusive lower bounds on
/// the percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum LetterGrade {
    #[serde(rename = "A+")]
    APlus,
    A,
    #[serde(rename = "B+")]
    BPlus,
    B,
    #[serde(rename = "C+")]
    CPlus,
    C,
    F,
}

impl LetterGrade {
    pub fn as_str(&self) -> &'static str {
        match self {
            LetterGrade::APlus => "A+",
            LetterGrade::A => "A",
            LetterGrade::BPlus => "B+",
            LetterGrade::B => "B",
            LetterGrade::CPlus => "C+",
            LetterGrade::C => "C",
            LetterGrade::F => "F",
        }
    }
}

impl fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GradeInputError {
    /// max_score must be strictly positive; a zero divisor would persist
    /// Infinity/NaN as derived fields.
    NonPositiveMaxScore(f64),
    NegativeScore(f64),
    NonFiniteInput,
}

impl fmt::Display for GradeInputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GradeInputError::NonPositiveMaxScore(v) => {
                write!(f, "max_score must be greater than zero, got {}", v)
            }
            GradeInputError::NegativeScore(v) => {
                write!(f, "score must not be negative, got {}", v)
            }
            GradeInputError::NonFiniteInput => write!(f, "score and max_score must be finite"),
        }
    }
}

impl std::error::Error for GradeInputError {}

/// Result of evaluating a raw score against its maximum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct Evaluation {
    pub percentage: f64,
    pub letter: LetterGrade,
}

/// Computes percentage and letter grade for a raw score.
///
/// The percentage is deliberately not clamped: a score above max_score
/// yields more than 100%.
pub fn evaluate(score: f64, max_score: f64) -> Result<Evaluation, GradeInputError> {
    if !score.is_finite() || !max_score.is_finite() {
        return Err(GradeInputError::NonFiniteInput);
    }
    if max_score <= 0.0 {
        return Err(GradeInputError::NonPositiveMaxScore(max_score));
    }
    if score < 0.0 {
        return Err(GradeInputError::NegativeScore(score));
    }

    let percentage = (score / max_score) * 100.0;
    Ok(Evaluation {
        percentage,
        letter: letter_for(percentage),
    })
}

/// First matching threshold wins, evaluated top-down.
pub fn letter_for(percentage: f64) -> LetterGrade {
    if percentage >= 90.0 {
        LetterGrade::APlus
    } else if percentage >= 80.0 {
        LetterGrade::A
    } else if percentage >= 70.0 {
        LetterGrade::BPlus
    } else if percentage >= 60.0 {
        LetterGrade::B
    } else if percentage >= 50.0 {
        LetterGrade::CPlus
    } else if percentage >= 40.0 {
        LetterGrade::C
    } else {
        LetterGrade::F
    }
}

/// GPA on a 4.0 scale from stored percentages: mean percentage / 25,
/// rounded to two decimals. An empty slice yields 0.0.
pub fn grade_point_average(percentages: &[f64]) -> f64 {
    if percentages.is_empty() {
        return 0.0;
    }
    let mean = percentages.iter().sum::<f64>() / percentages.len() as f64;
    (mean / 25.0 * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_values_map_to_listed_letters() {
        let cases = [
            (90.0, LetterGrade::APlus),
            (80.0, LetterGrade::A),
            (70.0, LetterGrade::BPlus),
            (60.0, LetterGrade::B),
            (50.0, LetterGrade::CPlus),
            (40.0, LetterGrade::C),
        ];
        for (score, letter) in cases {
            let eval = evaluate(score, 100.0).unwrap();
            assert_eq!(eval.letter, letter, "score {}", score);
            assert_eq!(eval.percentage, score);
        }
    }

    #[test]
    fn one_unit_below_each_boundary_drops_a_letter() {
        let cases = [
            (89.0, LetterGrade::A),
            (79.0, LetterGrade::BPlus),
            (69.0, LetterGrade::B),
            (59.0, LetterGrade::CPlus),
            (49.0, LetterGrade::C),
            (39.0, LetterGrade::F),
        ];
        for (score, letter) in cases {
            assert_eq!(evaluate(score, 100.0).unwrap().letter, letter, "score {}", score);
        }
    }

    #[test]
    fn fractional_score_just_below_boundary() {
        let eval = evaluate(89.9, 100.0).unwrap();
        assert_eq!(eval.letter, LetterGrade::A);
    }

    #[test]
    fn zero_max_score_is_rejected() {
        for score in [0.0, 1.0, 50.0, 100.0] {
            assert!(matches!(
                evaluate(score, 0.0),
                Err(GradeInputError::NonPositiveMaxScore(_))
            ));
        }
        assert!(matches!(
            evaluate(10.0, -5.0),
            Err(GradeInputError::NonPositiveMaxScore(_))
        ));
    }

    #[test]
    fn negative_score_is_rejected() {
        assert!(matches!(
            evaluate(-1.0, 100.0),
            Err(GradeInputError::NegativeScore(_))
        ));
    }

    #[test]
    fn non_finite_input_is_rejected() {
        assert!(evaluate(f64::NAN, 100.0).is_err());
        assert!(evaluate(50.0, f64::INFINITY).is_err());
    }

    #[test]
    fn percentage_is_not_clamped_above_hundred() {
        let eval = evaluate(120.0, 100.0).unwrap();
        assert_eq!(eval.percentage, 120.0);
        assert_eq!(eval.letter, LetterGrade::APlus);
    }

    #[test]
    fn scales_against_non_default_max_score() {
        let eval = evaluate(45.0, 50.0).unwrap();
        assert_eq!(eval.percentage, 90.0);
        assert_eq!(eval.letter, LetterGrade::APlus);
    }

    #[test]
    fn evaluate_is_idempotent() {
        let a = evaluate(73.5, 80.0).unwrap();
        let b = evaluate(73.5, 80.0).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn gpa_of_no_grades_is_zero() {
        assert_eq!(grade_point_average(&[]), 0.0);
    }

    #[test]
    fn gpa_is_mean_percentage_on_four_point_scale() {
        assert_eq!(grade_point_average(&[100.0]), 4.0);
        assert_eq!(grade_point_average(&[50.0, 100.0]), 3.0);
        assert_eq!(grade_point_average(&[81.25]), 3.25);
    }
}
