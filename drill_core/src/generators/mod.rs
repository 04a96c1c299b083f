//! # Problem Generators
//!
//! One module per problem family. Every generator is a pure function of the
//! injected random source, a grade and an operation, and returns exactly
//! the number of problems asked for.
//!
//! [`generate_problems`] is the single entry point front ends call: it
//! routes a [`WorksheetSettings`] value to the right generator.
//!
//! ## Example
//!
//! ```rust
//! use drill_core::generators::generate_problems;
//! use drill_core::settings::WorksheetSettings;
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let settings = WorksheetSettings { problem_count: 12, ..Default::default() };
//! let problems = generate_problems(&mut rng, &settings);
//! assert_eq!(problems.len(), 12);
//! ```

pub mod basic;
pub mod decimal;
pub mod fraction;
pub mod missing;
pub mod mixed;
pub mod word;

pub use basic::{generate_basic, generate_hissan};
pub use decimal::generate_decimals;
pub use fraction::generate_fractions;
pub use missing::generate_missing;
pub use mixed::generate_mixed;
pub use word::generate_word_problems;

use rand::Rng;
use tracing::{debug, warn};

use crate::pattern::{CalculationPattern, PatternFamily};
use crate::problem::{Language, Problem, ProblemType};
use crate::settings::WorksheetSettings;

/// Pattern a problem type uses when none is set.
pub fn default_pattern(problem_type: ProblemType) -> Option<CalculationPattern> {
    match problem_type {
        ProblemType::Word | ProblemType::WordEn => Some(CalculationPattern::ShoppingTotal),
        _ => None,
    }
}

/// Pattern actually used for `problem_type`, dropping ones from another
/// family.
pub fn effective_pattern(
    problem_type: ProblemType,
    pattern: Option<CalculationPattern>,
) -> Option<CalculationPattern> {
    let Some(pattern) = pattern else {
        return default_pattern(problem_type);
    };
    let family = pattern.family();
    let accepted = match problem_type {
        ProblemType::Basic => matches!(family, PatternFamily::Arithmetic | PatternFamily::Missing),
        ProblemType::Hissan => family == PatternFamily::Arithmetic,
        ProblemType::Fraction => family == PatternFamily::Fraction,
        ProblemType::Decimal | ProblemType::Mixed => false,
        ProblemType::Word | ProblemType::WordEn => matches!(family, PatternFamily::Word(_)),
    };
    if accepted {
        Some(pattern)
    } else {
        warn!(
            %problem_type,
            %pattern,
            "Pattern does not apply to problem type; using the default"
        );
        default_pattern(problem_type)
    }
}

/// Generate the problems for one worksheet page.
///
/// Never fails: an inapplicable pattern falls back to the family default
/// and a count of zero yields an empty list.
pub fn generate_problems<R: Rng + ?Sized>(rng: &mut R, settings: &WorksheetSettings) -> Vec<Problem> {
    let grade = settings.grade;
    let operation = settings.operation;
    let count = settings.problem_count;
    let pattern = effective_pattern(settings.problem_type, settings.calculation_pattern);

    debug!(
        problem_type = %settings.problem_type,
        %grade,
        %operation,
        pattern = ?pattern.map(|p| p.name()),
        count,
        "Generating problems"
    );

    match settings.problem_type {
        ProblemType::Basic => match pattern.map(|p| p.family()) {
            Some(PatternFamily::Missing) => generate_missing(rng, grade, operation, pattern, count),
            _ => {
                if let Some(p) = pattern {
                    if !basic::pattern_applies(p, operation) {
                        warn!(pattern = %p, %operation, "Pattern ignored for this operation");
                    }
                }
                generate_basic(rng, grade, operation, pattern, count)
            }
        },
        ProblemType::Hissan => generate_hissan(rng, grade, operation, pattern, count),
        ProblemType::Fraction => {
            let simplify = pattern == Some(CalculationPattern::FractionSimplify);
            generate_fractions(rng, grade, operation, simplify, count)
        }
        ProblemType::Decimal => generate_decimals(rng, grade, operation, count),
        ProblemType::Mixed => generate_mixed(rng, grade, operation, count),
        ProblemType::Word | ProblemType::WordEn => {
            let language = match settings.problem_type {
                ProblemType::WordEn => Language::English,
                _ => Language::Japanese,
            };
            let pattern = pattern.unwrap_or(CalculationPattern::ShoppingTotal);
            generate_word_problems(rng, grade, language, pattern, count)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grade::Grade;
    use crate::problem::{MissingPosition, Operation, WordCategory};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn settings(problem_type: ProblemType, pattern: Option<CalculationPattern>) -> WorksheetSettings {
        WorksheetSettings {
            grade: Grade::new(3).unwrap(),
            problem_type,
            calculation_pattern: pattern,
            problem_count: 8,
            ..Default::default()
        }
    }

    #[test]
    fn test_every_type_yields_its_variant() {
        let mut rng = StdRng::seed_from_u64(1);
        for problem_type in ProblemType::ALL {
            let problems = generate_problems(&mut rng, &settings(problem_type, None));
            assert_eq!(problems.len(), 8);
            assert!(problems.iter().all(|p| p.problem_type() == problem_type));
        }
    }

    #[test]
    fn test_zero_count_is_empty() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut s = settings(ProblemType::Word, None);
        s.problem_count = 0;
        assert!(generate_problems(&mut rng, &s).is_empty());
    }

    #[test]
    fn test_missing_pattern_routes_to_missing_generator() {
        let mut rng = StdRng::seed_from_u64(3);
        let s = settings(ProblemType::Basic, Some(CalculationPattern::MissingAnswer));
        for problem in generate_problems(&mut rng, &s) {
            let Problem::Basic(p) = problem else {
                panic!("expected basic");
            };
            assert_eq!(p.missing_position, Some(MissingPosition::Answer));
        }
    }

    #[test]
    fn test_word_pattern_on_basic_falls_back() {
        assert_eq!(
            effective_pattern(ProblemType::Basic, Some(CalculationPattern::SpeedTime)),
            None
        );
        let mut rng = StdRng::seed_from_u64(4);
        let s = settings(ProblemType::Basic, Some(CalculationPattern::SpeedTime));
        let problems = generate_problems(&mut rng, &s);
        assert_eq!(problems.len(), 8);
        for problem in problems {
            let Problem::Basic(p) = problem else {
                panic!("expected basic");
            };
            assert!(p.missing_position.is_none());
        }
    }

    #[test]
    fn test_word_defaults_to_shopping_total() {
        assert_eq!(
            effective_pattern(ProblemType::WordEn, Some(CalculationPattern::WithCarry)),
            Some(CalculationPattern::ShoppingTotal)
        );
        let mut rng = StdRng::seed_from_u64(5);
        for problem in generate_problems(&mut rng, &settings(ProblemType::WordEn, None)) {
            let Problem::WordEn(p) = problem else {
                panic!("expected English word problem");
            };
            assert_eq!(p.category, WordCategory::Shopping);
            assert_eq!(p.operation, Operation::Addition);
        }
    }

    #[test]
    fn test_hissan_ignores_missing_patterns() {
        assert_eq!(
            effective_pattern(ProblemType::Hissan, Some(CalculationPattern::MissingRandom)),
            None
        );
        let mut rng = StdRng::seed_from_u64(6);
        let s = settings(ProblemType::Hissan, Some(CalculationPattern::MissingRandom));
        for problem in generate_problems(&mut rng, &s) {
            let Problem::Hissan(p) = problem else {
                panic!("expected hissan");
            };
            assert!(p.missing_position.is_none());
            assert!(p.answer.is_some());
        }
    }

    #[test]
    fn test_same_seed_same_worksheet() {
        let s = settings(ProblemType::Fraction, None);
        let a = generate_problems(&mut StdRng::seed_from_u64(9), &s);
        let b = generate_problems(&mut StdRng::seed_from_u64(9), &s);
        assert_eq!(a, b);
    }
}
