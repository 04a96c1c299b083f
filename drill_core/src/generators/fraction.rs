//! Fraction problems.
//!
//! Lower and middle bands add and subtract fractions with a shared
//! denominator; the upper band mixes denominators. Answers are always
//! reduced. The `fraction-simplify` pattern produces single-fraction
//! reduction problems instead.

use rand::Rng;

use crate::grade::{random_int_by_grade, BandTable, Grade, GradeBand, IntRange};
use crate::math::{gcd, Ratio};
use crate::problem::{FractionProblem, Operation, Problem};
use crate::random::{pick, problem_id, random_int};

pub const DENOMINATORS: BandTable<IntRange> = BandTable::new(
    IntRange::new(2, 4),
    IntRange::new(2, 9),
    IntRange::new(2, 12),
);

/// Common factor applied to a reduced fraction for simplification drills
pub const SIMPLIFY_FACTORS: BandTable<IntRange> = BandTable::new(
    IntRange::new(2, 3),
    IntRange::new(2, 5),
    IntRange::new(2, 9),
);

const MAX_DISTINCT_ATTEMPTS: usize = 50;

/// Two fractions sharing a denominator with the first strictly larger.
fn same_denominator_pair<R: Rng + ?Sized>(
    rng: &mut R,
    grade: Grade,
    operation: Operation,
) -> ((i64, i64), (i64, i64)) {
    let band = grade.band();
    let mut d = random_int_by_grade(rng, grade, &DENOMINATORS);
    match operation {
        Operation::Subtraction => {
            d = d.max(3);
            let n1 = random_int(rng, 2, d - 1);
            let n2 = random_int(rng, 1, n1 - 1);
            ((n1, d), (n2, d))
        }
        _ => {
            let n1 = random_int(rng, 1, d - 1);
            let n2 = if band == GradeBand::Lower {
                // Lower band sums stay within one whole
                random_int(rng, 1, d - n1)
            } else {
                random_int(rng, 1, d - 1)
            };
            ((n1, d), (n2, d))
        }
    }
}

fn mixed_denominator_pair<R: Rng + ?Sized>(
    rng: &mut R,
    grade: Grade,
    operation: Operation,
) -> ((i64, i64), (i64, i64)) {
    let mut first = (1, 2);
    let mut second = (1, 3);
    for _ in 0..MAX_DISTINCT_ATTEMPTS {
        let d1 = random_int_by_grade(rng, grade, &DENOMINATORS);
        let d2 = random_int_by_grade(rng, grade, &DENOMINATORS);
        let n1 = random_int(rng, 1, d1 - 1);
        let n2 = random_int(rng, 1, d2 - 1);
        first = (n1, d1);
        second = (n2, d2);
        let (a, b) = (Ratio::new(n1, d1), Ratio::new(n2, d2));
        let needs_distinct = matches!(operation, Operation::Addition | Operation::Subtraction);
        if a != b && (d1 != d2 || !needs_distinct) {
            break;
        }
    }
    if operation == Operation::Subtraction
        && Ratio::new(first.0, first.1) < Ratio::new(second.0, second.1)
    {
        std::mem::swap(&mut first, &mut second);
    }
    (first, second)
}

fn draw_fraction<R: Rng + ?Sized>(rng: &mut R, grade: Grade, operation: Operation) -> FractionProblem {
    let id = problem_id(rng);
    let same_denominator = grade.band() != GradeBand::Upper
        && matches!(operation, Operation::Addition | Operation::Subtraction);
    let ((n1, d1), (n2, d2)) = if same_denominator {
        same_denominator_pair(rng, grade, operation)
    } else {
        mixed_denominator_pair(rng, grade, operation)
    };
    let (a, b) = (Ratio::new(n1, d1), Ratio::new(n2, d2));
    let answer = match operation {
        Operation::Addition => a + b,
        Operation::Subtraction => a - b,
        Operation::Multiplication => a * b,
        Operation::Division => a / b,
    };
    FractionProblem {
        id,
        operation,
        numerator1: n1,
        denominator1: d1,
        numerator2: Some(n2),
        denominator2: Some(d2),
        answer_numerator: answer.num(),
        answer_denominator: answer.den(),
    }
}

fn draw_simplify<R: Rng + ?Sized>(rng: &mut R, grade: Grade) -> FractionProblem {
    let id = problem_id(rng);
    let q = random_int_by_grade(rng, grade, &DENOMINATORS);
    let coprime: Vec<i64> = (1..q).filter(|&p| gcd(p, q) == 1).collect();
    let p = *pick(rng, &coprime);
    let k = random_int_by_grade(rng, grade, &SIMPLIFY_FACTORS);
    FractionProblem {
        id,
        operation: Operation::Division,
        numerator1: p * k,
        denominator1: q * k,
        numerator2: None,
        denominator2: None,
        answer_numerator: p,
        answer_denominator: q,
    }
}

/// Generate `count` fraction problems; `simplify` selects reduction drills.
pub fn generate_fractions<R: Rng + ?Sized>(
    rng: &mut R,
    grade: Grade,
    operation: Operation,
    simplify: bool,
    count: usize,
) -> Vec<Problem> {
    (0..count)
        .map(|_| {
            let problem = if simplify {
                draw_simplify(rng, grade)
            } else {
                draw_fraction(rng, grade, operation)
            };
            Problem::Fraction(problem)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn fractions(problems: Vec<Problem>) -> Vec<FractionProblem> {
        problems
            .into_iter()
            .map(|p| match p {
                Problem::Fraction(f) => f,
                other => panic!("unexpected {:?}", other),
            })
            .collect()
    }

    #[test]
    fn test_tables_are_monotonic() {
        assert!(DENOMINATORS.is_monotonic());
        assert!(SIMPLIFY_FACTORS.is_monotonic());
    }

    #[test]
    fn test_answers_are_correct_and_reduced() {
        let mut rng = StdRng::seed_from_u64(5);
        for grade in Grade::ALL {
            for op in Operation::ALL {
                for f in fractions(generate_fractions(&mut rng, grade, op, false, 30)) {
                    let a = Ratio::new(f.numerator1, f.denominator1);
                    let b = Ratio::new(f.numerator2.unwrap(), f.denominator2.unwrap());
                    let expected = match op {
                        Operation::Addition => a + b,
                        Operation::Subtraction => a - b,
                        Operation::Multiplication => a * b,
                        Operation::Division => a / b,
                    };
                    assert_eq!(f.answer_ratio(), expected);
                    assert_eq!(gcd(f.answer_numerator, f.answer_denominator), 1);
                    assert!(f.answer_denominator > 0);
                    assert!(f.answer_numerator >= 0, "{:?}", f);
                    assert!(f.numerator1 < f.denominator1);
                }
            }
        }
    }

    #[test]
    fn test_lower_grades_share_denominators() {
        let mut rng = StdRng::seed_from_u64(6);
        for grade in [Grade::new(1).unwrap(), Grade::new(4).unwrap()] {
            for f in fractions(generate_fractions(&mut rng, grade, Operation::Subtraction, false, 30)) {
                assert_eq!(Some(f.denominator1), f.denominator2);
                assert!(f.numerator1 > f.numerator2.unwrap());
            }
        }
    }

    #[test]
    fn test_lower_band_sums_within_one() {
        let mut rng = StdRng::seed_from_u64(7);
        let grade = Grade::new(2).unwrap();
        for f in fractions(generate_fractions(&mut rng, grade, Operation::Addition, false, 40)) {
            assert!(f.answer_ratio() <= Ratio::whole(1));
        }
    }

    #[test]
    fn test_simplify_is_unary() {
        let mut rng = StdRng::seed_from_u64(8);
        let grade = Grade::new(5).unwrap();
        for f in fractions(generate_fractions(&mut rng, grade, Operation::Addition, true, 30)) {
            assert!(f.is_unary());
            assert_eq!(
                Ratio::new(f.numerator1, f.denominator1),
                f.answer_ratio()
            );
            assert!(f.numerator1 > f.answer_numerator);
            assert!(f.question_text().ends_with(" ="));
        }
    }

    #[test]
    fn test_zero_count() {
        let mut rng = StdRng::seed_from_u64(9);
        assert!(generate_fractions(&mut rng, Grade::new(3).unwrap(), Operation::Addition, false, 0).is_empty());
    }
}
