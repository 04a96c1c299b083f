//! # Print Layout
//!
//! Worksheets are printed in columns but numbered down each column, so a
//! six-problem sheet in two columns reads:
//!
//! ```text
//!  1.  ...      4.  ...
//!  2.  ...      5.  ...
//!  3.  ...      6.  ...
//! ```
//!
//! Renderers fill a grid row by row. [`reorder_for_layout`] converts the
//! generated order into that row-major cell order, and the A4 table tells a
//! front end when a page would overflow.
//!
//! ## Example
//!
//! ```rust
//! use drill_core::layout::{layout_grid, fits_in_a4};
//! use drill_core::grade::Grade;
//! use drill_core::problem::ProblemType;
//! use drill_core::settings::LayoutColumns;
//!
//! let grade = Grade::new(3).unwrap();
//! assert!(fits_in_a4(ProblemType::Basic, grade, LayoutColumns::Two, 10));
//! assert!(!fits_in_a4(ProblemType::Basic, grade, LayoutColumns::Two, 50));
//!
//! let grid = layout_grid(&[], LayoutColumns::Three);
//! assert_eq!(grid.rows, 0);
//! ```

use serde::{Deserialize, Serialize};

use crate::grade::{BandTable, Grade};
use crate::problem::{Problem, ProblemType};
use crate::settings::{LayoutColumns, WorksheetSettings};

/// Rows needed to hold `count` problems in `columns` columns.
pub fn row_count(count: usize, columns: LayoutColumns) -> usize {
    count.div_ceil(columns.count())
}

/// Reorder problems into row-major display cells.
///
/// Cell (row `r`, column `c`) shows the problem at original index
/// `r + c * rows`. Cells past the end of the list are `None`, so the
/// result always has `rows * columns` entries.
pub fn reorder_for_layout(problems: &[Problem], columns: LayoutColumns) -> Vec<Option<&Problem>> {
    layout_grid(problems, columns)
        .cells
        .into_iter()
        .map(|cell| cell.map(|cell| cell.problem))
        .collect()
}

/// One printed cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutCell<'a> {
    /// 1-based problem number as printed
    pub number: usize,
    pub problem: &'a Problem,
}

/// Grid ready for a renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutGrid<'a> {
    pub rows: usize,
    pub columns: usize,
    /// Row-major, `rows * columns` long
    pub cells: Vec<Option<LayoutCell<'a>>>,
}

impl<'a> LayoutGrid<'a> {
    /// Cells of one row
    pub fn row(&self, index: usize) -> &[Option<LayoutCell<'a>>] {
        let start = (index * self.columns).min(self.cells.len());
        let end = (start + self.columns).min(self.cells.len());
        &self.cells[start..end]
    }
}

/// Reorder and number problems for display.
pub fn layout_grid(problems: &[Problem], columns: LayoutColumns) -> LayoutGrid<'_> {
    let cols = columns.count();
    let rows = row_count(problems.len(), columns);
    let mut cells = Vec::with_capacity(rows * cols);
    for r in 0..rows {
        for c in 0..cols {
            let index = r + c * rows;
            cells.push(problems.get(index).map(|problem| LayoutCell {
                number: index + 1,
                problem,
            }));
        }
    }
    LayoutGrid {
        rows,
        columns: cols,
        cells,
    }
}

/// The problem type that occurs most often.
///
/// Ties go to the type seen first; an empty list counts as basic.
pub fn detect_primary_problem_type(problems: &[Problem]) -> ProblemType {
    let mut counts: Vec<(ProblemType, usize)> = Vec::new();
    for problem in problems {
        let kind = problem.problem_type();
        match counts.iter_mut().find(|(t, _)| *t == kind) {
            Some((_, n)) => *n += 1,
            None => counts.push((kind, 1)),
        }
    }
    let mut best: Option<(ProblemType, usize)> = None;
    for (kind, n) in counts {
        if best.map_or(true, |(_, most)| n > most) {
            best = Some((kind, n));
        }
    }
    best.map(|(kind, _)| kind).unwrap_or(ProblemType::Basic)
}

/// Maximum problems per A4 page for one, two and three columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct A4Capacity {
    pub one: usize,
    pub two: usize,
    pub three: usize,
}

impl A4Capacity {
    pub const fn new(one: usize, two: usize, three: usize) -> Self {
        A4Capacity { one, two, three }
    }

    pub fn for_columns(&self, columns: LayoutColumns) -> usize {
        match columns {
            LayoutColumns::One => self.one,
            LayoutColumns::Two => self.two,
            LayoutColumns::Three => self.three,
        }
    }
}

const BASIC_CAPACITY: BandTable<A4Capacity> = BandTable::new(
    A4Capacity::new(10, 20, 30),
    A4Capacity::new(12, 24, 36),
    A4Capacity::new(12, 24, 36),
);

const HISSAN_CAPACITY: BandTable<A4Capacity> = BandTable::new(
    A4Capacity::new(6, 12, 18),
    A4Capacity::new(5, 10, 15),
    A4Capacity::new(4, 8, 12),
);

const FRACTION_CAPACITY: BandTable<A4Capacity> = BandTable::new(
    A4Capacity::new(8, 16, 24),
    A4Capacity::new(8, 16, 24),
    A4Capacity::new(7, 14, 21),
);

const DECIMAL_CAPACITY: A4Capacity = A4Capacity::new(10, 20, 30);
const MIXED_CAPACITY: A4Capacity = A4Capacity::new(6, 12, 18);
const WORD_CAPACITY: A4Capacity = A4Capacity::new(8, 10, 12);
const WORD_EN_CAPACITY: A4Capacity = A4Capacity::new(6, 8, 9);

/// Most problems of `problem_type` that fit on one A4 page.
pub fn max_problems_per_a4(problem_type: ProblemType, grade: Grade, columns: LayoutColumns) -> usize {
    let band = grade.band();
    let capacity = match problem_type {
        ProblemType::Basic => BASIC_CAPACITY.get(band),
        ProblemType::Hissan => HISSAN_CAPACITY.get(band),
        ProblemType::Fraction => FRACTION_CAPACITY.get(band),
        ProblemType::Decimal => DECIMAL_CAPACITY,
        ProblemType::Mixed => MIXED_CAPACITY,
        ProblemType::Word => WORD_CAPACITY,
        ProblemType::WordEn => WORD_EN_CAPACITY,
    };
    capacity.for_columns(columns)
}

pub fn fits_in_a4(problem_type: ProblemType, grade: Grade, columns: LayoutColumns, count: usize) -> bool {
    count <= max_problems_per_a4(problem_type, grade, columns)
}

/// Where the worksheet is being shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    #[default]
    Preview,
    Print,
}

/// Advisory warning that a page holds more problems than A4 allows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct A4Overflow {
    pub problem_type: ProblemType,
    pub requested: usize,
    pub max: usize,
    pub message: String,
}

/// Check the settings against the A4 table.
///
/// Only previews warn; printing proceeds regardless and returns `None`.
pub fn check_a4_overflow(settings: &WorksheetSettings, mode: RenderMode) -> Option<A4Overflow> {
    if mode == RenderMode::Print {
        return None;
    }
    let max = max_problems_per_a4(settings.problem_type, settings.grade, settings.layout_columns);
    if settings.problem_count <= max {
        return None;
    }
    Some(A4Overflow {
        problem_type: settings.problem_type,
        requested: settings.problem_count,
        max,
        message: format!(
            "{} {} problems do not fit on one A4 page in {} column(s); at most {} fit",
            settings.problem_count, settings.problem_type, settings.layout_columns, max
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::{ArithmeticProblem, Operation};

    fn numbered(n: usize) -> Vec<Problem> {
        (0..n)
            .map(|i| {
                Problem::Basic(ArithmeticProblem::complete(
                    format!("{}", i + 1),
                    Operation::Addition,
                    i as i64,
                    1,
                ))
            })
            .collect()
    }

    fn ids(cells: &[Option<&Problem>]) -> Vec<String> {
        cells
            .iter()
            .map(|c| c.map(|p| p.id().to_string()).unwrap_or_default())
            .collect()
    }

    #[test]
    fn test_six_in_two_columns() {
        let problems = numbered(6);
        let cells = reorder_for_layout(&problems, LayoutColumns::Two);
        assert_eq!(ids(&cells), vec!["1", "4", "2", "5", "3", "6"]);
    }

    #[test]
    fn test_uneven_count_pads_last_row() {
        let problems = numbered(7);
        let cells = reorder_for_layout(&problems, LayoutColumns::Three);
        // 3 rows: columns hold 1-3, 4-6, 7
        assert_eq!(
            ids(&cells),
            vec!["1", "4", "7", "2", "5", "", "3", "6", ""]
        );
    }

    #[test]
    fn test_single_column_is_identity() {
        let problems = numbered(5);
        let cells = reorder_for_layout(&problems, LayoutColumns::One);
        assert_eq!(ids(&cells), vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn test_reorder_is_a_permutation() {
        for n in 0..20 {
            let problems = numbered(n);
            for columns in LayoutColumns::ALL {
                let mut seen: Vec<String> = reorder_for_layout(&problems, columns)
                    .into_iter()
                    .flatten()
                    .map(|p| p.id().to_string())
                    .collect();
                seen.sort_by_key(|s| s.parse::<usize>().unwrap());
                let expected: Vec<String> = (1..=n).map(|i| i.to_string()).collect();
                assert_eq!(seen, expected);
            }
        }
    }

    #[test]
    fn test_reorder_is_deterministic() {
        let problems = numbered(11);
        let first = reorder_for_layout(&problems, LayoutColumns::Three);
        let second = reorder_for_layout(&problems, LayoutColumns::Three);
        assert_eq!(first, second);
    }

    #[test]
    fn test_grid_numbers_and_rows() {
        let problems = numbered(5);
        let grid = layout_grid(&problems, LayoutColumns::Two);
        assert_eq!(grid.rows, 3);
        assert_eq!(grid.cells.len(), 6);
        let first_row: Vec<usize> = grid.row(0).iter().flatten().map(|c| c.number).collect();
        assert_eq!(first_row, vec![1, 4]);
        let last_row: Vec<usize> = grid.row(2).iter().flatten().map(|c| c.number).collect();
        assert_eq!(last_row, vec![3]);
    }

    #[test]
    fn test_grid_and_reorder_agree() {
        for n in [0, 4, 7, 13] {
            let problems = numbered(n);
            for columns in LayoutColumns::ALL {
                let numbers: Vec<String> = layout_grid(&problems, columns)
                    .cells
                    .iter()
                    .map(|c| c.as_ref().map(|c| c.number.to_string()).unwrap_or_default())
                    .collect();
                assert_eq!(numbers, ids(&reorder_for_layout(&problems, columns)));
            }
        }
    }

    #[test]
    fn test_primary_type() {
        assert_eq!(detect_primary_problem_type(&[]), ProblemType::Basic);

        let mut problems = numbered(2);
        let hissan: Problem = serde_json::from_str(
            r#"{"type":"hissan","id":"h","operation":"addition","operand1":1,"operand2":2,"answer":3}"#,
        )
        .unwrap();
        problems.insert(0, hissan.clone());
        problems.insert(0, hissan);
        // Two hissan seen first, two basic after: tie goes to hissan
        assert_eq!(detect_primary_problem_type(&problems), ProblemType::Hissan);

        problems.extend(numbered(1));
        assert_eq!(detect_primary_problem_type(&problems), ProblemType::Basic);
    }

    #[test]
    fn test_a4_table() {
        let g3 = Grade::new(3).unwrap();
        assert!(fits_in_a4(ProblemType::Basic, g3, LayoutColumns::Two, 10));
        assert!(!fits_in_a4(ProblemType::Basic, g3, LayoutColumns::Two, 50));
        assert_eq!(max_problems_per_a4(ProblemType::Basic, g3, LayoutColumns::Two), 24);
        assert_eq!(
            max_problems_per_a4(ProblemType::Hissan, Grade::new(6).unwrap(), LayoutColumns::Three),
            12
        );
        assert_eq!(
            max_problems_per_a4(ProblemType::WordEn, Grade::new(1).unwrap(), LayoutColumns::One),
            6
        );
    }

    #[test]
    fn test_overflow_only_in_preview() {
        let settings = WorksheetSettings {
            problem_count: 50,
            ..Default::default()
        };
        let warning = check_a4_overflow(&settings, RenderMode::Preview).unwrap();
        assert_eq!(warning.requested, 50);
        assert_eq!(warning.max, 20);
        assert!(check_a4_overflow(&settings, RenderMode::Print).is_none());

        let small = WorksheetSettings {
            problem_count: 10,
            ..Default::default()
        };
        assert!(check_a4_overflow(&small, RenderMode::Preview).is_none());
    }
}
