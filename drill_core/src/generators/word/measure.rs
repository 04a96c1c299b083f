//! Unit conversion problems for length, weight and volume.
//!
//! The lower band converts whole large units to small ones, the middle band
//! folds a compound quantity (`2 m 35 cm`) into small units, and the upper
//! band converts small units back to a decimal amount of large units.

use rand::Rng;

use super::{fill_template, localized, WordBuilder};
use crate::grade::{random_int_by_grade, BandTable, Grade, GradeBand, IntRange};
use crate::pattern::CalculationPattern;
use crate::problem::{Language, Operation, WordAnswer, WordCategory, WordProblem};
use crate::random::random_int;

/// A pair of units and how many small units make one large one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conversion {
    pub large: &'static str,
    pub small: &'static str,
    pub factor: i64,
}

impl Conversion {
    pub const fn new(large: &'static str, small: &'static str, factor: i64) -> Self {
        Conversion { large, small, factor }
    }
}

pub const LENGTHS: BandTable<Conversion> = BandTable::new(
    Conversion::new("cm", "mm", 10),
    Conversion::new("m", "cm", 100),
    Conversion::new("km", "m", 1000),
);

pub const WEIGHTS: BandTable<Conversion> = BandTable::new(
    Conversion::new("kg", "g", 1000),
    Conversion::new("kg", "g", 1000),
    Conversion::new("t", "kg", 1000),
);

pub const VOLUMES: BandTable<Conversion> = BandTable::new(
    Conversion::new("L", "dL", 10),
    Conversion::new("L", "mL", 1000),
    Conversion::new("L", "mL", 1000),
);

/// Whole large units in a quantity
pub const LARGE_AMOUNTS: BandTable<IntRange> = BandTable::new(
    IntRange::new(1, 9),
    IntRange::new(1, 9),
    IntRange::new(1, 20),
);

fn conversion_for(pattern: CalculationPattern, grade: Grade) -> Conversion {
    let table = match pattern {
        CalculationPattern::UnitWeight => &WEIGHTS,
        CalculationPattern::UnitVolume => &VOLUMES,
        _ => &LENGTHS,
    };
    table.get(grade.band())
}

fn convert<R: Rng + ?Sized>(
    rng: &mut R,
    grade: Grade,
    conversion: Conversion,
    builder: &WordBuilder,
) -> WordProblem {
    let language = builder.language;
    let Conversion { large, small, factor } = conversion;
    let whole = random_int_by_grade(rng, grade, &LARGE_AMOUNTS);

    match grade.band() {
        GradeBand::Lower => {
            let text = fill_template(
                localized(
                    language,
                    "{amount} {large}は何{small}ですか。",
                    "How many {small} are there in {amount} {large}?",
                ),
                &[("amount", &whole.to_string()), ("large", large), ("small", small)],
            );
            builder.build(
                rng,
                Operation::Multiplication,
                text,
                WordAnswer::Number((whole * factor) as f64),
                small,
            )
        }
        GradeBand::Middle => {
            let part = random_int(rng, 1, factor - 1);
            let text = fill_template(
                localized(
                    language,
                    "{whole} {large} {part} {small}は何{small}ですか。",
                    "Write {whole} {large} {part} {small} in {small}.",
                ),
                &[
                    ("whole", &whole.to_string()),
                    ("part", &part.to_string()),
                    ("large", large),
                    ("small", small),
                ],
            );
            builder.build(
                rng,
                Operation::Addition,
                text,
                WordAnswer::Number((whole * factor + part) as f64),
                small,
            )
        }
        GradeBand::Upper => {
            // Two decimal places at most in the answer
            let step = (factor / 100).max(1);
            let small_amount = whole * factor + random_int(rng, 1, 99) * step;
            let answer = (small_amount / step) as f64 / (factor / step) as f64;
            let text = fill_template(
                localized(
                    language,
                    "{amount} {small}は何{large}ですか。小数で答えましょう。",
                    "Write {amount} {small} in {large} as a decimal.",
                ),
                &[
                    ("amount", &small_amount.to_string()),
                    ("large", large),
                    ("small", small),
                ],
            );
            builder.build(rng, Operation::Division, text, WordAnswer::Number(answer), large)
        }
    }
}

pub fn generate<R: Rng + ?Sized>(
    rng: &mut R,
    grade: Grade,
    language: Language,
    pattern: CalculationPattern,
    count: usize,
) -> Vec<WordProblem> {
    let builder = WordBuilder::new(WordCategory::UnitConversion, language);
    let conversion = conversion_for(pattern, grade);
    (0..count)
        .map(|_| convert(rng, grade, conversion, &builder))
        .collect()
}
