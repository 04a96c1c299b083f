//! Calendar problems on a fixed reference year.

use chrono::{Datelike, Duration, NaiveDate};
use rand::Rng;

use super::{fill_template, localized, WordBuilder};
use crate::grade::{random_int_by_grade, BandTable, Grade, IntRange};
use crate::pattern::CalculationPattern;
use crate::problem::{Language, Operation, WordAnswer, WordCategory, WordProblem};
use crate::random::random_int;

/// Non-leap year so February never has a 29th
pub const REFERENCE_YEAR: i32 = 2025;

/// Days between the two dates of a problem
pub const DAY_OFFSETS: BandTable<IntRange> = BandTable::new(
    IntRange::new(2, 10),
    IntRange::new(5, 40),
    IntRange::new(20, 120),
);

fn format_date(date: NaiveDate, language: Language) -> String {
    match language {
        Language::Japanese => format!("{}月{}日", date.month(), date.day()),
        Language::English => date.format("%-d %B").to_string(),
    }
}

/// Day 28 at most, so every month/day pair is a valid date.
fn draw_date<R: Rng + ?Sized>(rng: &mut R) -> NaiveDate {
    let month = random_int(rng, 1, 12) as u32;
    let day = random_int(rng, 1, 28) as u32;
    NaiveDate::from_ymd_opt(REFERENCE_YEAR, month, day).unwrap_or(NaiveDate::MIN)
}

fn days_after<R: Rng + ?Sized>(rng: &mut R, grade: Grade, builder: &WordBuilder) -> WordProblem {
    let language = builder.language;
    let start = draw_date(rng);
    let days = random_int_by_grade(rng, grade, &DAY_OFFSETS);
    let end = start + Duration::days(days);
    let text = fill_template(
        localized(
            language,
            "今日は{start}です。{days}日後は何月何日ですか。",
            "Today is {start}. What is the date {days} days from today?",
        ),
        &[
            ("start", &format_date(start, language)),
            ("days", &days.to_string()),
        ],
    );
    builder.build(
        rng,
        Operation::Addition,
        text,
        WordAnswer::Text(format_date(end, language)),
        "",
    )
}

fn days_between<R: Rng + ?Sized>(rng: &mut R, grade: Grade, builder: &WordBuilder) -> WordProblem {
    let language = builder.language;
    let start = draw_date(rng);
    let days = random_int_by_grade(rng, grade, &DAY_OFFSETS);
    let end = start + Duration::days(days);
    let text = fill_template(
        localized(
            language,
            "{start}から{end}までは何日ありますか。",
            "How many days are there from {start} to {end}?",
        ),
        &[
            ("start", &format_date(start, language)),
            ("end", &format_date(end, language)),
        ],
    );
    let unit = localized(language, "日", "days");
    builder.build(
        rng,
        Operation::Subtraction,
        text,
        WordAnswer::Number((end - start).num_days() as f64),
        unit,
    )
}

pub fn generate<R: Rng + ?Sized>(
    rng: &mut R,
    grade: Grade,
    language: Language,
    pattern: CalculationPattern,
    count: usize,
) -> Vec<WordProblem> {
    let builder = WordBuilder::new(WordCategory::Calendar, language);
    (0..count)
        .map(|_| match pattern {
            CalculationPattern::CalendarDaysBetween => days_between(rng, grade, &builder),
            _ => days_after(rng, grade, &builder),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_offsets_are_monotonic() {
        assert!(DAY_OFFSETS.is_monotonic());
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(REFERENCE_YEAR, 3, 5).unwrap();
        assert_eq!(format_date(date, Language::Japanese), "3月5日");
        assert_eq!(format_date(date, Language::English), "5 March");
    }

    #[test]
    fn test_days_between_within_band() {
        let mut rng = StdRng::seed_from_u64(71);
        let grade = Grade::new(3).unwrap();
        for p in generate(&mut rng, grade, Language::Japanese, CalculationPattern::CalendarDaysBetween, 20) {
            let WordAnswer::Number(days) = p.answer else {
                panic!("days-between answers are numbers");
            };
            assert!(DAY_OFFSETS.middle.contains(days as i64));
            assert_eq!(p.unit, "日");
            assert_eq!(p.answer_text(), format!("{}日", days as i64));
        }
    }

    #[test]
    fn test_month_rollover() {
        let start = NaiveDate::from_ymd_opt(REFERENCE_YEAR, 1, 25).unwrap();
        let end = start + Duration::days(10);
        assert_eq!(format_date(end, Language::English), "4 February");
    }
}
