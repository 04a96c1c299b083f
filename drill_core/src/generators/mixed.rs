//! Mixed-number problems.

use rand::Rng;

use crate::grade::{random_int_by_grade, BandTable, Grade, GradeBand, IntRange};
use crate::math::{gcd, Ratio};
use crate::problem::{MixedNumber, MixedProblem, Operation, Problem};
use crate::random::{pick, problem_id};

pub const DENOMINATORS: BandTable<IntRange> = BandTable::new(
    IntRange::new(2, 4),
    IntRange::new(2, 8),
    IntRange::new(2, 12),
);

pub const WHOLES: BandTable<IntRange> = BandTable::new(
    IntRange::new(1, 3),
    IntRange::new(1, 5),
    IntRange::new(1, 9),
);

/// Mixed number with a proper, already reduced fraction part.
fn draw_mixed<R: Rng + ?Sized>(rng: &mut R, grade: Grade, denominator: i64) -> MixedNumber {
    let coprime: Vec<i64> = (1..denominator).filter(|&n| gcd(n, denominator) == 1).collect();
    MixedNumber {
        whole: random_int_by_grade(rng, grade, &WHOLES),
        numerator: *pick(rng, &coprime),
        denominator,
    }
}

fn draw_mixed_problem<R: Rng + ?Sized>(rng: &mut R, grade: Grade, operation: Operation) -> MixedProblem {
    let id = problem_id(rng);
    let shared = grade.band() != GradeBand::Upper
        && matches!(operation, Operation::Addition | Operation::Subtraction);
    let d1 = random_int_by_grade(rng, grade, &DENOMINATORS);
    let d2 = if shared {
        d1
    } else {
        random_int_by_grade(rng, grade, &DENOMINATORS)
    };
    // Every whole-number range holds at least two values, so a distinct
    // pair always turns up.
    let (mut operand1, mut operand2) = loop {
        let pair = (draw_mixed(rng, grade, d1), draw_mixed(rng, grade, d2));
        if operation != Operation::Subtraction || pair.0 != pair.1 {
            break pair;
        }
    };
    if operation == Operation::Subtraction && operand1.to_ratio() < operand2.to_ratio() {
        std::mem::swap(&mut operand1, &mut operand2);
    }

    let (a, b) = (operand1.to_ratio(), operand2.to_ratio());
    let answer: Ratio = match operation {
        Operation::Addition => a + b,
        Operation::Subtraction => a - b,
        Operation::Multiplication => a * b,
        Operation::Division => a / b,
    };

    MixedProblem {
        id,
        operation,
        operand1,
        operand2,
        answer: MixedNumber::from_ratio(answer),
    }
}

/// Generate `count` mixed-number problems.
pub fn generate_mixed<R: Rng + ?Sized>(
    rng: &mut R,
    grade: Grade,
    operation: Operation,
    count: usize,
) -> Vec<Problem> {
    (0..count)
        .map(|_| Problem::Mixed(draw_mixed_problem(rng, grade, operation)))
        .collect()
}
