//! Clock-time problems: finishing time after a duration, and the duration
//! between two times of day.

use chrono::{Duration, NaiveTime, Timelike};
use rand::Rng;

use super::{fill_template, localized, WordBuilder};
use crate::grade::{scale_by_grade, BandTable, Grade, IntRange};
use crate::pattern::CalculationPattern;
use crate::problem::{Language, Operation, WordAnswer, WordCategory, WordProblem};
use crate::random::{pick, random_int, random_step};

const ACTIVITIES_JA: [&str; 4] = ["宿題", "サッカーの練習", "ピアノの練習", "読書"];
const ACTIVITIES_EN: [&str; 4] = ["homework", "football practice", "piano practice", "reading"];

/// Minute granularity of start times
const MINUTE_STEP: BandTable<i64> = BandTable::new(30, 5, 1);

/// Elapsed minutes, drawn on the band's minute step
const ELAPSED_MINUTES: BandTable<IntRange> = BandTable::new(
    IntRange::new(30, 180),
    IntRange::new(30, 200),
    IntRange::new(30, 300),
);

/// Start hours keep every result before 21:00
const START_HOURS: IntRange = IntRange::new(7, 15);

fn format_time(time: NaiveTime, language: Language) -> String {
    match language {
        Language::Japanese if time.minute() == 0 => format!("{}時", time.hour()),
        Language::Japanese => format!("{}時{}分", time.hour(), time.minute()),
        Language::English => format!("{}:{:02}", time.hour(), time.minute()),
    }
}

fn draw_start<R: Rng + ?Sized>(rng: &mut R, grade: Grade) -> NaiveTime {
    let step = scale_by_grade(grade, &MINUTE_STEP);
    let hour = random_int(rng, START_HOURS.min, START_HOURS.max) as u32;
    let minute = random_step(rng, 0, 59 - 59 % step, step) as u32;
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

fn draw_elapsed<R: Rng + ?Sized>(rng: &mut R, grade: Grade) -> i64 {
    let step = scale_by_grade(grade, &MINUTE_STEP);
    let range = ELAPSED_MINUTES.get(grade.band());
    random_step(rng, range.min, range.max, step).max(step)
}

fn activity<R: Rng + ?Sized>(rng: &mut R, language: Language) -> &'static str {
    match language {
        Language::Japanese => *pick(rng, &ACTIVITIES_JA),
        Language::English => *pick(rng, &ACTIVITIES_EN),
    }
}

fn elapsed<R: Rng + ?Sized>(rng: &mut R, grade: Grade, builder: &WordBuilder) -> WordProblem {
    let language = builder.language;
    let start = draw_start(rng, grade);
    let minutes = draw_elapsed(rng, grade);
    let end = start + Duration::minutes(minutes);
    let task = activity(rng, language);
    let text = fill_template(
        localized(
            language,
            "{start}から{minutes}分間{task}をしました。終わったのは何時何分ですか。",
            "Aina started {task} at {start} and spent {minutes} minutes on it. What time did Aina finish?",
        ),
        &[
            ("start", &format_time(start, language)),
            ("minutes", &minutes.to_string()),
            ("task", task),
        ],
    );
    builder.build(
        rng,
        Operation::Addition,
        text,
        WordAnswer::Text(format_time(end, language)),
        "",
    )
}

fn duration<R: Rng + ?Sized>(rng: &mut R, grade: Grade, builder: &WordBuilder) -> WordProblem {
    let language = builder.language;
    let start = draw_start(rng, grade);
    let minutes = draw_elapsed(rng, grade);
    let end = start + Duration::minutes(minutes);
    let task = activity(rng, language);
    let text = fill_template(
        localized(
            language,
            "{start}に{task}を始めて、{end}に終わりました。何分間かかりましたか。",
            "Daniel did {task} from {start} to {end}. How many minutes did it take?",
        ),
        &[
            ("start", &format_time(start, language)),
            ("end", &format_time(end, language)),
            ("task", task),
        ],
    );
    let unit = localized(language, "分", "minutes");
    builder.build(
        rng,
        Operation::Subtraction,
        text,
        WordAnswer::Number(minutes as f64),
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
    let builder = WordBuilder::new(WordCategory::Time, language);
    (0..count)
        .map(|_| match pattern {
            CalculationPattern::TimeDuration => duration(rng, grade, &builder),
            _ => elapsed(rng, grade, &builder),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_elapsed_minutes_table_is_monotonic() {
        assert!(ELAPSED_MINUTES.is_monotonic());
    }

    #[test]
    fn test_format_time() {
        let t = NaiveTime::from_hms_opt(9, 5, 0).unwrap();
        assert_eq!(format_time(t, Language::Japanese), "9時5分");
        assert_eq!(format_time(t, Language::English), "9:05");

        let on_the_hour = NaiveTime::from_hms_opt(14, 0, 0).unwrap();
        assert_eq!(format_time(on_the_hour, Language::Japanese), "14時");
        assert_eq!(format_time(on_the_hour, Language::English), "14:00");
    }

    #[test]
    fn test_lower_band_uses_half_hours() {
        let mut rng = StdRng::seed_from_u64(61);
        let grade = Grade::new(1).unwrap();
        for p in generate(&mut rng, grade, Language::English, CalculationPattern::TimeDuration, 20) {
            let WordAnswer::Number(minutes) = p.answer else {
                panic!("duration answers are numbers");
            };
            assert_eq!(minutes as i64 % 30, 0);
            assert!(minutes >= 30.0);
        }
    }

    #[test]
    fn test_elapsed_answer_is_same_day_time() {
        let mut rng = StdRng::seed_from_u64(62);
        let grade = Grade::new(6).unwrap();
        for p in generate(&mut rng, grade, Language::English, CalculationPattern::TimeElapsed, 20) {
            let WordAnswer::Text(text) = &p.answer else {
                panic!("elapsed answers are clock times");
            };
            let end = NaiveTime::parse_from_str(text, "%H:%M").unwrap();
            assert!(end.hour() >= 7 && end.hour() <= 20, "{}", text);
        }
    }
}
