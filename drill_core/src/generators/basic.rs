//! Basic drills and hissan (column arithmetic).
//!
//! Both families draw a complete, correct equation from per-band operand
//! tables. Hissan uses larger operands because column layout is only worth
//! it once numbers have several digits.

use rand::Rng;
use tracing::warn;

use crate::grade::{random_int_by_grade, BandTable, Grade, IntRange};
use crate::pattern::CalculationPattern;
use crate::problem::{ArithmeticProblem, Operation, Problem};
use crate::random::{problem_id, random_int};

/// Rejection-sampling budget for carry/borrow patterns
const MAX_PATTERN_ATTEMPTS: usize = 200;

/// Operand ranges for one drill style, per operation.
#[derive(Debug, Clone, Copy)]
pub struct DrillTables {
    pub addition: BandTable<IntRange>,
    pub subtraction: BandTable<IntRange>,
    pub multiplicand: BandTable<IntRange>,
    pub multiplier: BandTable<IntRange>,
    /// Always strictly positive
    pub divisor: BandTable<IntRange>,
    pub quotient: BandTable<IntRange>,
}

impl DrillTables {
    /// All tables, for invariant checks
    pub fn tables(&self) -> [&BandTable<IntRange>; 6] {
        [
            &self.addition,
            &self.subtraction,
            &self.multiplicand,
            &self.multiplier,
            &self.divisor,
            &self.quotient,
        ]
    }
}

pub const BASIC_TABLES: DrillTables = DrillTables {
    addition: BandTable::new(
        IntRange::new(1, 10),
        IntRange::new(10, 999),
        IntRange::new(100, 9999),
    ),
    subtraction: BandTable::new(
        IntRange::new(1, 20),
        IntRange::new(10, 999),
        IntRange::new(100, 9999),
    ),
    multiplicand: BandTable::new(
        IntRange::new(1, 9),
        IntRange::new(2, 99),
        IntRange::new(10, 999),
    ),
    multiplier: BandTable::new(
        IntRange::new(1, 9),
        IntRange::new(2, 9),
        IntRange::new(2, 99),
    ),
    divisor: BandTable::new(
        IntRange::new(1, 9),
        IntRange::new(2, 9),
        IntRange::new(2, 99),
    ),
    quotient: BandTable::new(
        IntRange::new(1, 9),
        IntRange::new(2, 99),
        IntRange::new(10, 999),
    ),
};

pub const HISSAN_TABLES: DrillTables = DrillTables {
    addition: BandTable::new(
        IntRange::new(10, 99),
        IntRange::new(100, 999),
        IntRange::new(1000, 9999),
    ),
    subtraction: BandTable::new(
        IntRange::new(10, 99),
        IntRange::new(100, 999),
        IntRange::new(1000, 9999),
    ),
    multiplicand: BandTable::new(
        IntRange::new(10, 99),
        IntRange::new(10, 999),
        IntRange::new(100, 999),
    ),
    multiplier: BandTable::new(
        IntRange::new(2, 9),
        IntRange::new(2, 9),
        IntRange::new(10, 99),
    ),
    divisor: BandTable::new(
        IntRange::new(2, 9),
        IntRange::new(2, 9),
        IntRange::new(10, 99),
    ),
    quotient: BandTable::new(
        IntRange::new(2, 20),
        IntRange::new(10, 99),
        IntRange::new(10, 99),
    ),
};

/// True if column addition of `a + b` carries in any digit.
pub fn has_carry(mut a: i64, mut b: i64) -> bool {
    while a > 0 || b > 0 {
        if a % 10 + b % 10 >= 10 {
            return true;
        }
        a /= 10;
        b /= 10;
    }
    false
}

/// True if column subtraction of `a - b` (with `a >= b`) borrows in any digit.
pub fn has_borrow(mut a: i64, mut b: i64) -> bool {
    while a > 0 || b > 0 {
        if a % 10 < b % 10 {
            return true;
        }
        a /= 10;
        b /= 10;
    }
    false
}

/// Whether an arithmetic pattern constrains `operation` at all.
pub fn pattern_applies(pattern: CalculationPattern, operation: Operation) -> bool {
    use CalculationPattern::*;
    matches!(
        (pattern, operation),
        (WithCarry | NoCarry, Operation::Addition)
            | (WithBorrow | NoBorrow, Operation::Subtraction)
            | (TimesTable, Operation::Multiplication)
            | (WithRemainder, Operation::Division)
    )
}

/// First draw that `accept` takes, within [`MAX_PATTERN_ATTEMPTS`] tries.
fn draw_matching<R, D, A>(rng: &mut R, mut draw: D, accept: A) -> Option<(i64, i64)>
where
    R: Rng + ?Sized,
    D: FnMut(&mut R) -> (i64, i64),
    A: Fn(i64, i64) -> bool,
{
    (0..MAX_PATTERN_ATTEMPTS)
        .map(|_| draw(rng))
        .find(|&(a, b)| accept(a, b))
}

fn draw_addition<R: Rng + ?Sized>(
    rng: &mut R,
    grade: Grade,
    table: &BandTable<IntRange>,
    pattern: Option<CalculationPattern>,
) -> (i64, i64) {
    let draw = |rng: &mut R| {
        (
            random_int_by_grade(rng, grade, table),
            random_int_by_grade(rng, grade, table),
        )
    };
    let carry = match pattern {
        Some(CalculationPattern::WithCarry) => true,
        Some(CalculationPattern::NoCarry) => false,
        _ => return draw(rng),
    };
    draw_matching(rng, draw, |a, b| has_carry(a, b) == carry).unwrap_or_else(|| {
        warn!(%grade, carry, "No operands matched the carry pattern; using an unconstrained pair");
        draw(rng)
    })
}

fn draw_subtraction<R: Rng + ?Sized>(
    rng: &mut R,
    grade: Grade,
    table: &BandTable<IntRange>,
    pattern: Option<CalculationPattern>,
) -> (i64, i64) {
    let draw = |rng: &mut R| {
        let a = random_int_by_grade(rng, grade, table);
        let b = random_int_by_grade(rng, grade, table);
        if a >= b {
            (a, b)
        } else {
            (b, a)
        }
    };
    let borrow = match pattern {
        Some(CalculationPattern::WithBorrow) => true,
        Some(CalculationPattern::NoBorrow) => false,
        _ => return draw(rng),
    };
    draw_matching(rng, draw, |a, b| has_borrow(a, b) == borrow).unwrap_or_else(|| {
        warn!(%grade, borrow, "No operands matched the borrow pattern; using an unconstrained pair");
        draw(rng)
    })
}

/// Draw one complete, correct equation.
///
/// Subtraction is ordered so the answer is never negative. Division builds
/// the dividend from divisor × quotient, adding a remainder only for the
/// `with-remainder` pattern.
pub fn draw_equation<R: Rng + ?Sized>(
    rng: &mut R,
    grade: Grade,
    operation: Operation,
    pattern: Option<CalculationPattern>,
    tables: &DrillTables,
) -> ArithmeticProblem {
    let id = problem_id(rng);
    let (a, b) = match operation {
        Operation::Addition => draw_addition(rng, grade, &tables.addition, pattern),
        Operation::Subtraction => draw_subtraction(rng, grade, &tables.subtraction, pattern),
        Operation::Multiplication => {
            if pattern == Some(CalculationPattern::TimesTable) {
                (random_int(rng, 1, 9), random_int(rng, 1, 9))
            } else {
                (
                    random_int_by_grade(rng, grade, &tables.multiplicand),
                    random_int_by_grade(rng, grade, &tables.multiplier),
                )
            }
        }
        Operation::Division => {
            let divisor = random_int_by_grade(rng, grade, &tables.divisor).max(1);
            let quotient = random_int_by_grade(rng, grade, &tables.quotient);
            let remainder = if pattern == Some(CalculationPattern::WithRemainder) && divisor > 1 {
                random_int(rng, 1, divisor - 1)
            } else {
                0
            };
            (quotient * divisor + remainder, divisor)
        }
    };
    ArithmeticProblem::complete(id, operation, a, b)
}

/// Generate `count` basic drill problems.
pub fn generate_basic<R: Rng + ?Sized>(
    rng: &mut R,
    grade: Grade,
    operation: Operation,
    pattern: Option<CalculationPattern>,
    count: usize,
) -> Vec<Problem> {
    (0..count)
        .map(|_| Problem::Basic(draw_equation(rng, grade, operation, pattern, &BASIC_TABLES)))
        .collect()
}

/// Generate `count` hissan (column arithmetic) problems.
pub fn generate_hissan<R: Rng + ?Sized>(
    rng: &mut R,
    grade: Grade,
    operation: Operation,
    pattern: Option<CalculationPattern>,
    count: usize,
) -> Vec<Problem> {
    (0..count)
        .map(|_| Problem::Hissan(draw_equation(rng, grade, operation, pattern, &HISSAN_TABLES)))
        .collect()
}
