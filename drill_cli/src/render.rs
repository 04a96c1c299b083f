//! Plain-text worksheet rendering.

use drill_core::layout::layout_grid;
use drill_core::problem::{ArithmeticProblem, Problem, BLANK};
use drill_core::worksheet::WorksheetData;

/// Widest cell we pad to; longer word problems simply run on.
const MAX_CELL_WIDTH: usize = 48;
const COLUMN_GAP: usize = 4;

fn slot(value: Option<i64>) -> String {
    value.map_or_else(|| BLANK.to_string(), |v| v.to_string())
}

/// Column arithmetic: operands right-aligned over a rule.
fn column_lines(number: usize, problem: &ArithmeticProblem) -> Vec<String> {
    let top = slot(problem.operand1);
    let bottom = slot(problem.operand2);
    let digits = top.chars().count().max(bottom.chars().count());
    let width = digits + 2;
    let indent = " ".repeat(5);
    vec![
        format!("{:>3}. {:>w$}", number, top, w = width),
        format!("{}{} {:>d$}", indent, problem.operation.symbol(), bottom, d = digits),
        format!("{}{}", indent, "-".repeat(width)),
    ]
}

fn cell_lines(number: usize, problem: &Problem) -> Vec<String> {
    match problem {
        Problem::Hissan(p) => column_lines(number, p),
        _ => vec![format!("{:>3}. {}", number, problem.question_text())],
    }
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        text.to_string()
    } else {
        format!("{}{}", text, " ".repeat(width - len))
    }
}

/// Render one page: heading, name line, problem grid and optional answers.
pub fn render_page(page: &WorksheetData, page_number: usize, total_pages: usize) -> String {
    let settings = &page.settings;
    let mut out = String::new();

    let heading = settings.heading();
    out.push_str(&heading);
    if total_pages > 1 {
        out.push_str(&format!("  ({}/{})", page_number, total_pages));
    }
    out.push('\n');
    out.push_str(&"=".repeat(heading.chars().count().max(20)));
    out.push('\n');

    let name = settings.student_name.as_deref().unwrap_or("____________");
    let date = settings
        .date
        .map(|d| d.to_string())
        .unwrap_or_else(|| "__________".to_string());
    out.push_str(&format!("Name: {}    Date: {}\n\n", name, date));

    let grid = layout_grid(&page.problems, settings.layout_columns);
    let width = grid
        .cells
        .iter()
        .flatten()
        .flat_map(|cell| cell_lines(cell.number, cell.problem))
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0)
        .min(MAX_CELL_WIDTH);

    for r in 0..grid.rows {
        let cells: Vec<Vec<String>> = grid
            .row(r)
            .iter()
            .map(|cell| match cell {
                Some(cell) => cell_lines(cell.number, cell.problem),
                None => Vec::new(),
            })
            .collect();
        let height = cells.iter().map(Vec::len).max().unwrap_or(0);
        for i in 0..height {
            let line: Vec<String> = cells
                .iter()
                .map(|lines| pad(lines.get(i).map_or("", String::as_str), width))
                .collect();
            out.push_str(line.join(&" ".repeat(COLUMN_GAP)).trim_end());
            out.push('\n');
        }
        out.push('\n');
    }

    if settings.show_answers && !page.problems.is_empty() {
        out.push_str("Answers\n-------\n");
        for (i, problem) in page.problems.iter().enumerate() {
            out.push_str(&format!("{:>3}. {}\n", i + 1, problem.answer_text()));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use drill_core::problem::{ArithmeticProblem, Operation};
    use drill_core::settings::WorksheetSettings;

    fn page(count: usize, show_answers: bool) -> WorksheetData {
        let problems = (0..count)
            .map(|i| {
                Problem::Basic(ArithmeticProblem::complete(
                    format!("p{}", i),
                    Operation::Addition,
                    i as i64 + 1,
                    2,
                ))
            })
            .collect();
        WorksheetData {
            settings: WorksheetSettings {
                title: Some("Practice".to_string()),
                show_answers,
                ..Default::default()
            },
            problems,
            generated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_column_major_numbering() {
        let text = render_page(&page(4, false), 1, 1);
        let first_row = text
            .lines()
            .find(|line| line.trim_start().starts_with("1."))
            .unwrap();
        assert!(first_row.contains("3. 3 + 2 ="), "{}", first_row);
        assert!(!text.contains("Answers"));
    }

    #[test]
    fn test_hissan_is_laid_out_in_columns() {
        let mut data = page(0, false);
        data.problems = vec![
            Problem::Hissan(ArithmeticProblem::complete("h1", Operation::Addition, 345, 78)),
            Problem::Hissan(ArithmeticProblem::complete("h2", Operation::Subtraction, 1234, 52)),
        ];
        data.settings.layout_columns = drill_core::settings::LayoutColumns::One;
        let text = render_page(&data, 1, 1);
        let lines: Vec<&str> = text.lines().collect();

        let top = lines.iter().position(|l| *l == "  1.   345").unwrap();
        assert_eq!(lines[top + 1], "     +  78");
        assert_eq!(lines[top + 2], "     -----");

        let next = lines.iter().position(|l| *l == "  2.   1234").unwrap();
        assert_eq!(lines[next + 1], "     -   52");
        assert_eq!(lines[next + 2], "     ------");

        // Last digits share a column
        for block in [top, next] {
            let ends: Vec<usize> = (0..3).map(|i| lines[block + i].chars().count()).collect();
            assert!(ends.iter().all(|e| *e == ends[0]), "{:?}", ends);
        }
    }

    #[test]
    fn test_answer_key() {
        let text = render_page(&page(2, true), 2, 3);
        assert!(text.starts_with("Practice  (2/3)"));
        assert!(text.contains("Answers"));
        assert!(text.contains("  1. 3\n"));
        assert!(text.contains("  2. 4\n"));
    }
}
