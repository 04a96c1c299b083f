//! Cross-module properties of generated worksheets.

use drill_core::grade::Grade;
use drill_core::layout::{fits_in_a4, reorder_for_layout};
use drill_core::problem::{ArithmeticProblem, Operation, Problem, ProblemType};
use drill_core::settings::{LayoutColumns, WorksheetSettings};
use drill_core::{build_worksheet_batch, generate_problems, CalculationPattern, WorksheetData};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn settings(grade: u8, problem_type: ProblemType, operation: Operation) -> WorksheetSettings {
    WorksheetSettings {
        grade: Grade::new(grade).unwrap(),
        problem_type,
        operation,
        problem_count: 30,
        ..Default::default()
    }
}

#[test]
fn every_type_and_grade_yields_requested_count() {
    let mut rng = StdRng::seed_from_u64(1);
    for grade in Grade::ALL {
        for problem_type in ProblemType::ALL {
            for operation in Operation::ALL {
                for count in [1, 7, 20] {
                    let s = WorksheetSettings {
                        problem_count: count,
                        ..settings(grade.value(), problem_type, operation)
                    };
                    let problems = generate_problems(&mut rng, &s);
                    assert_eq!(problems.len(), count, "{} {} {}", grade, problem_type, operation);
                    assert!(problems.iter().all(|p| p.problem_type() == problem_type));
                }
            }
        }
    }
}

#[test]
fn integer_problems_stay_non_negative_and_consistent() {
    let mut rng = StdRng::seed_from_u64(2);
    for grade in Grade::ALL {
        for problem_type in [ProblemType::Basic, ProblemType::Hissan] {
            for operation in Operation::ALL {
                for problem in generate_problems(&mut rng, &settings(grade.value(), problem_type, operation)) {
                    let (Problem::Basic(p) | Problem::Hissan(p)) = &problem else {
                        panic!("unexpected variant {:?}", problem);
                    };
                    assert!(p.is_consistent(), "{:?}", p);
                    assert!(p.answer.unwrap() >= 0, "{:?}", p);
                    if operation == Operation::Division {
                        let (a, b, q) = (p.operand1.unwrap(), p.operand2.unwrap(), p.answer.unwrap());
                        assert_eq!(a, q * b + p.remainder.unwrap_or(0));
                    }
                }
            }
        }
    }
}

#[test]
fn missing_number_problems_are_solvable() {
    let mut rng = StdRng::seed_from_u64(3);
    for grade in Grade::ALL {
        for operation in Operation::ALL {
            for pattern in [
                CalculationPattern::MissingRandom,
                CalculationPattern::MissingOperand1,
                CalculationPattern::MissingOperand2,
                CalculationPattern::MissingAnswer,
            ] {
                let s = WorksheetSettings {
                    calculation_pattern: Some(pattern),
                    ..settings(grade.value(), ProblemType::Basic, operation)
                };
                for problem in generate_problems(&mut rng, &s) {
                    let Problem::Basic(p) = &problem else {
                        panic!("unexpected variant {:?}", problem);
                    };
                    assert!(p.missing_position.is_some());
                    let solved = p.solve_missing().expect("solvable");
                    assert!(solved >= 0, "{:?}", p);
                }
            }
        }
    }
}

#[test]
fn column_major_reorder() {
    let problems: Vec<Problem> = (1..=6)
        .map(|i| Problem::Basic(ArithmeticProblem::complete(i.to_string(), Operation::Addition, i, 0)))
        .collect();
    let order: Vec<&str> = reorder_for_layout(&problems, LayoutColumns::Two)
        .into_iter()
        .flatten()
        .map(|p| p.id())
        .collect();
    assert_eq!(order, ["1", "4", "2", "5", "3", "6"]);

    // Single column keeps the original order
    let single: Vec<&str> = reorder_for_layout(&problems, LayoutColumns::One)
        .into_iter()
        .flatten()
        .map(|p| p.id())
        .collect();
    assert_eq!(single, ["1", "2", "3", "4", "5", "6"]);
}

#[test]
fn a4_capacity_for_basic_grade_three() {
    let grade = Grade::new(3).unwrap();
    assert!(fits_in_a4(ProblemType::Basic, grade, LayoutColumns::Two, 10));
    assert!(!fits_in_a4(ProblemType::Basic, grade, LayoutColumns::Two, 50));
}

#[test]
fn batch_reuses_the_previewed_page() {
    let mut rng = StdRng::seed_from_u64(4);
    let s = settings(5, ProblemType::Fraction, Operation::Multiplication);
    let preview = WorksheetData::generate(&mut rng, &s);
    let pages = build_worksheet_batch(&mut rng, &s, 5, Some(&preview));
    assert_eq!(pages.len(), 5);
    assert_eq!(pages[0], preview);
    assert!(pages.iter().all(|p| p.problems.len() == s.problem_count));
}

#[test]
fn worksheet_survives_json() {
    let mut rng = StdRng::seed_from_u64(5);
    for problem_type in ProblemType::ALL {
        let s = settings(4, problem_type, Operation::Addition);
        let page = WorksheetData::generate(&mut rng, &s);
        let json = serde_json::to_string(&page).unwrap();
        let back: WorksheetData = serde_json::from_str(&json).unwrap();
        assert_eq!(back.problems.len(), page.problems.len());
        for (a, b) in back.problems.iter().zip(&page.problems) {
            assert_eq!(a.question_text(), b.question_text());
            assert_eq!(a.answer_text(), b.answer_text());
        }
    }
}
