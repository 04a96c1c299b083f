//! # Word Problems
//!
//! Eight scenario categories, each rendered in Japanese or English from the
//! same numbers. Japanese worksheets price things in whole yen; English
//! worksheets use Malaysian ringgit with two decimal places. Money is always
//! drawn in minor units (yen, sen) and converted only when the answer is
//! stored.
//!
//! Texts are templates with `{name}` placeholders filled by
//! [`fill_template`].

pub mod allowance;
pub mod calendar;
pub mod measure;
pub mod scale;
pub mod shopping;
pub mod speed;
pub mod time;
pub mod transport;

use rand::Rng;

use crate::grade::{BandTable, Grade, IntRange};
use crate::pattern::CalculationPattern;
use crate::problem::{Language, Operation, Problem, WordAnswer, WordCategory, WordProblem, RINGGIT_UNIT};
use crate::random::{problem_id, random_step};

/// Currency used by a language's money problems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Currency {
    Yen,
    Ringgit,
}

impl Currency {
    pub fn for_language(language: Language) -> Self {
        match language {
            Language::Japanese => Currency::Yen,
            Language::English => Currency::Ringgit,
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Currency::Yen => "円",
            Currency::Ringgit => RINGGIT_UNIT,
        }
    }

    /// Minor units per major unit
    pub fn minor_per_major(self) -> i64 {
        match self {
            Currency::Yen => 1,
            Currency::Ringgit => 100,
        }
    }

    /// Amount as printed in a problem text: `350円` or `RM3.50`
    pub fn format(self, minor: i64) -> String {
        match self {
            Currency::Yen => format!("{}円", minor),
            Currency::Ringgit => format!("{}{}.{:02}", RINGGIT_UNIT, minor / 100, minor % 100),
        }
    }

    /// Stored answer for an amount in minor units
    pub fn answer(self, minor: i64) -> WordAnswer {
        WordAnswer::Number(minor as f64 / self.minor_per_major() as f64)
    }
}

/// Money ranges per currency, in minor units, drawn on a fixed step.
#[derive(Debug, Clone, Copy)]
pub struct MoneyTable {
    pub yen: BandTable<IntRange>,
    pub yen_step: i64,
    pub ringgit: BandTable<IntRange>,
    pub ringgit_step: i64,
}

impl MoneyTable {
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R, grade: Grade, currency: Currency) -> i64 {
        let (table, step) = match currency {
            Currency::Yen => (&self.yen, self.yen_step),
            Currency::Ringgit => (&self.ringgit, self.ringgit_step),
        };
        let range = table.get(grade.band());
        random_step(rng, range.min, range.max, step)
    }

    pub fn is_monotonic(&self) -> bool {
        self.yen.is_monotonic() && self.ringgit.is_monotonic()
    }
}

/// Replace `{key}` placeholders in `template`.
pub fn fill_template(template: &str, pairs: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (key, value) in pairs {
        let needle = format!("{{{}}}", key);
        out = out.replace(&needle, value);
    }
    out
}

/// Template for the problem's language
pub(crate) fn localized(language: Language, ja: &'static str, en: &'static str) -> &'static str {
    match language {
        Language::Japanese => ja,
        Language::English => en,
    }
}

/// Shared tail of every category generator.
pub(crate) struct WordBuilder {
    pub category: WordCategory,
    pub language: Language,
}

impl WordBuilder {
    pub fn new(category: WordCategory, language: Language) -> Self {
        WordBuilder { category, language }
    }

    pub fn build<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        operation: Operation,
        problem_text: String,
        answer: WordAnswer,
        unit: &str,
    ) -> WordProblem {
        WordProblem {
            id: problem_id(rng),
            operation,
            problem_text,
            answer,
            unit: unit.to_string(),
            category: self.category,
            language: self.language,
        }
    }
}

/// Generate `count` word problems for `pattern`.
///
/// Non-word patterns are treated as `shopping-total`. Japanese problems are
/// wrapped as [`Problem::Word`], English ones as [`Problem::WordEn`].
pub fn generate_word_problems<R: Rng + ?Sized>(
    rng: &mut R,
    grade: Grade,
    language: Language,
    pattern: CalculationPattern,
    count: usize,
) -> Vec<Problem> {
    let category = pattern.word_category().unwrap_or(WordCategory::Shopping);
    let pattern = if pattern.word_category().is_some() {
        pattern
    } else {
        CalculationPattern::ShoppingTotal
    };
    let problems = match category {
        WordCategory::Time => time::generate(rng, grade, language, pattern, count),
        WordCategory::Calendar => calendar::generate(rng, grade, language, pattern, count),
        WordCategory::Shopping => shopping::generate(rng, grade, language, pattern, count),
        WordCategory::Allowance => allowance::generate(rng, grade, language, pattern, count),
        WordCategory::UnitConversion => measure::generate(rng, grade, language, pattern, count),
        WordCategory::MapScale => scale::generate(rng, grade, language, pattern, count),
        WordCategory::TransportChange => transport::generate(rng, grade, language, pattern, count),
        WordCategory::Speed => speed::generate(rng, grade, language, pattern, count),
    };
    problems
        .into_iter()
        .map(|p| match language {
            Language::Japanese => Problem::Word(p),
            Language::English => Problem::WordEn(p),
        })
        .collect()
}
