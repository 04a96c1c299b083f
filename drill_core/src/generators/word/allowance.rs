//! Pocket-money problems: saving over weeks and weeks to reach a goal.

use rand::Rng;

use super::{fill_template, localized, Currency, MoneyTable, WordBuilder};
use crate::grade::{random_int_by_grade, BandTable, Grade, IntRange};
use crate::pattern::CalculationPattern;
use crate::problem::{Language, Operation, WordAnswer, WordCategory, WordProblem};

/// Money put aside each week
pub const WEEKLY_AMOUNTS: MoneyTable = MoneyTable {
    yen: BandTable::new(
        IntRange::new(10, 100),
        IntRange::new(50, 500),
        IntRange::new(100, 1000),
    ),
    yen_step: 10,
    ringgit: BandTable::new(
        IntRange::new(100, 500),
        IntRange::new(100, 1000),
        IntRange::new(200, 2000),
    ),
    ringgit_step: 50,
};

pub const WEEKS: BandTable<IntRange> = BandTable::new(
    IntRange::new(2, 5),
    IntRange::new(3, 10),
    IntRange::new(4, 20),
);

fn saving<R: Rng + ?Sized>(rng: &mut R, grade: Grade, builder: &WordBuilder) -> WordProblem {
    let language = builder.language;
    let currency = Currency::for_language(language);
    let weekly = WEEKLY_AMOUNTS.draw(rng, grade, currency);
    let weeks = random_int_by_grade(rng, grade, &WEEKS);
    let text = fill_template(
        localized(
            language,
            "毎週{weekly}ずつちょ金します。{weeks}週間で何円たまりますか。",
            "Mei saves {weekly} every week. How much has Mei saved after {weeks} weeks?",
        ),
        &[
            ("weekly", &currency.format(weekly)),
            ("weeks", &weeks.to_string()),
        ],
    );
    builder.build(
        rng,
        Operation::Multiplication,
        text,
        currency.answer(weekly * weeks),
        currency.unit(),
    )
}

/// Weeks needed to reach the goal, counting a final partial week.
pub fn weeks_to_goal(goal: i64, weekly: i64) -> i64 {
    if weekly <= 0 {
        return 0;
    }
    (goal + weekly - 1) / weekly
}

fn goal<R: Rng + ?Sized>(rng: &mut R, grade: Grade, builder: &WordBuilder) -> WordProblem {
    let language = builder.language;
    let currency = Currency::for_language(language);
    let weekly = WEEKLY_AMOUNTS.draw(rng, grade, currency);
    let weeks = random_int_by_grade(rng, grade, &WEEKS);
    // Goal lands inside the last week, so the answer is `weeks`
    let shortfall = WEEKLY_AMOUNTS.draw(rng, grade, currency).min(weekly - 1).max(0);
    let target = weekly * weeks - shortfall;
    let text = fill_template(
        localized(
            language,
            "{target}のゲームを買うために、毎週{weekly}ずつちょ金します。何週間で買えるようになりますか。",
            "Hafiz wants a game that costs {target} and saves {weekly} each week. How many weeks until Hafiz can buy it?",
        ),
        &[
            ("target", &currency.format(target)),
            ("weekly", &currency.format(weekly)),
        ],
    );
    let unit = localized(language, "週間", "weeks");
    builder.build(
        rng,
        Operation::Division,
        text,
        WordAnswer::Number(weeks_to_goal(target, weekly) as f64),
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
    let builder = WordBuilder::new(WordCategory::Allowance, language);
    (0..count)
        .map(|_| match pattern {
            CalculationPattern::AllowanceGoal => goal(rng, grade, &builder),
            _ => saving(rng, grade, &builder),
        })
        .collect()
}
