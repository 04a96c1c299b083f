//! Missing-number problems (虫食い算).
//!
//! A complete, exact equation is drawn first and one slot is erased
//! afterwards, so the blank always has exactly one integer solution.

use rand::Rng;

use crate::generators::basic::{draw_equation, BASIC_TABLES};
use crate::grade::Grade;
use crate::pattern::CalculationPattern;
use crate::problem::{MissingPosition, Operation, Problem};
use crate::random::pick;

/// Slot fixed by the pattern, or `None` to choose per problem.
pub fn fixed_position(pattern: Option<CalculationPattern>) -> Option<MissingPosition> {
    match pattern {
        Some(CalculationPattern::MissingOperand1) => Some(MissingPosition::Operand1),
        Some(CalculationPattern::MissingOperand2) => Some(MissingPosition::Operand2),
        Some(CalculationPattern::MissingAnswer) => Some(MissingPosition::Answer),
        _ => None,
    }
}

/// Generate `count` missing-number problems.
pub fn generate_missing<R: Rng + ?Sized>(
    rng: &mut R,
    grade: Grade,
    operation: Operation,
    pattern: Option<CalculationPattern>,
    count: usize,
) -> Vec<Problem> {
    let fixed = fixed_position(pattern);
    (0..count)
        .map(|_| {
            // Exact division only; a remainder would leave the blank ambiguous
            let equation = draw_equation(rng, grade, operation, None, &BASIC_TABLES);
            let position = fixed.unwrap_or_else(|| *pick(rng, &MissingPosition::ALL));
            Problem::Basic(equation.with_missing(position))
        })
        .collect()
}
