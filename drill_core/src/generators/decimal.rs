//! Decimal problems.
//!
//! Values are drawn as scaled integers (tenths or hundredths) and only
//! converted to `f64` at the end, so every answer is exact to
//! `decimal_places` digits.

use rand::Rng;

use crate::grade::{random_int_by_grade, scale_by_grade, BandTable, Grade, IntRange};
use crate::problem::{DecimalProblem, Operation, Problem};
use crate::random::problem_id;

/// Decimal places used by each band
pub const PLACES: BandTable<u32> = BandTable::new(1, 1, 2);

/// Scaled operand range for addition and subtraction
pub const SUM_OPERANDS: BandTable<IntRange> = BandTable::new(
    IntRange::new(1, 99),
    IntRange::new(10, 999),
    IntRange::new(100, 9999),
);

/// Scaled decimal factor for multiplication, and quotient for division
pub const DECIMAL_FACTORS: BandTable<IntRange> = BandTable::new(
    IntRange::new(1, 99),
    IntRange::new(11, 999),
    IntRange::new(101, 9999),
);

/// Whole-number multiplier or divisor, always positive
pub const WHOLE_FACTORS: BandTable<IntRange> = BandTable::new(
    IntRange::new(2, 9),
    IntRange::new(2, 9),
    IntRange::new(2, 19),
);

fn unscale(value: i64, places: u32) -> f64 {
    value as f64 / 10f64.powi(places as i32)
}

fn draw_decimal<R: Rng + ?Sized>(rng: &mut R, grade: Grade, operation: Operation) -> DecimalProblem {
    let id = problem_id(rng);
    let places = scale_by_grade(grade, &PLACES);

    // Scaled values; multiplication and division keep the second operand whole
    let (a, b, answer, b_is_whole) = match operation {
        Operation::Addition => {
            let a = random_int_by_grade(rng, grade, &SUM_OPERANDS);
            let b = random_int_by_grade(rng, grade, &SUM_OPERANDS);
            (a, b, a + b, false)
        }
        Operation::Subtraction => {
            let x = random_int_by_grade(rng, grade, &SUM_OPERANDS);
            let y = random_int_by_grade(rng, grade, &SUM_OPERANDS);
            let (a, b) = if x >= y { (x, y) } else { (y, x) };
            (a, b, a - b, false)
        }
        Operation::Multiplication => {
            let a = random_int_by_grade(rng, grade, &DECIMAL_FACTORS);
            let n = random_int_by_grade(rng, grade, &WHOLE_FACTORS);
            (a, n, a * n, true)
        }
        Operation::Division => {
            let quotient = random_int_by_grade(rng, grade, &DECIMAL_FACTORS);
            let divisor = random_int_by_grade(rng, grade, &WHOLE_FACTORS).max(1);
            (quotient * divisor, divisor, quotient, true)
        }
    };

    let operand2 = if b_is_whole {
        b as f64
    } else {
        unscale(b, places)
    };
    DecimalProblem {
        id,
        operation,
        operand1: unscale(a, places),
        operand2,
        answer: unscale(answer, places),
        decimal_places: places,
    }
}

/// Generate `count` decimal problems.
pub fn generate_decimals<R: Rng + ?Sized>(
    rng: &mut R,
    grade: Grade,
    operation: Operation,
    count: usize,
) -> Vec<Problem> {
    (0..count)
        .map(|_| Problem::Decimal(draw_decimal(rng, grade, operation)))
        .collect()
}
