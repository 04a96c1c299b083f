//! Map scales and sharing in a ratio.

use rand::Rng;

use super::{fill_template, localized, Currency, MoneyTable, WordBuilder};
use crate::grade::{random_int_by_grade, BandTable, Grade, GradeBand, IntRange};
use crate::math::gcd;
use crate::pattern::CalculationPattern;
use crate::problem::{Language, Operation, WordAnswer, WordCategory, WordProblem};
use crate::random::{pick, random_int};

const LOWER_SCALES: [i64; 3] = [100, 500, 1000];
const MIDDLE_SCALES: [i64; 3] = [1000, 5000, 10000];
const UPPER_SCALES: [i64; 4] = [10000, 25000, 50000, 100000];

/// Distance measured on the map, in centimetres
pub const MAP_CENTIMETRES: BandTable<IntRange> = BandTable::new(
    IntRange::new(1, 10),
    IntRange::new(2, 20),
    IntRange::new(2, 30),
);

/// Largest term of a sharing ratio
pub const RATIO_TERMS: BandTable<IntRange> = BandTable::new(
    IntRange::new(1, 3),
    IntRange::new(1, 5),
    IntRange::new(1, 9),
);

/// Amount that one ratio part is worth
pub const PART_VALUES: MoneyTable = MoneyTable {
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

fn map_scale<R: Rng + ?Sized>(rng: &mut R, grade: Grade, builder: &WordBuilder) -> WordProblem {
    let language = builder.language;
    let band = grade.band();
    let scale = match band {
        GradeBand::Lower => *pick(rng, &LOWER_SCALES),
        GradeBand::Middle => *pick(rng, &MIDDLE_SCALES),
        GradeBand::Upper => *pick(rng, &UPPER_SCALES),
    };
    let map_cm = random_int_by_grade(rng, grade, &MAP_CENTIMETRES);
    let real_cm = map_cm * scale;

    // The upper band answers in kilometres, possibly with decimals
    let (answer, unit) = match band {
        GradeBand::Upper => (real_cm as f64 / 100_000.0, "km"),
        _ => ((real_cm / 100) as f64, "m"),
    };
    let text = fill_template(
        localized(
            language,
            "縮尺1:{scale}の地図で{map}cmの長さは、実際には何{unit}ですか。",
            "On a map with scale 1:{scale}, two towns are {map} cm apart. What is the real distance in {unit}?",
        ),
        &[
            ("scale", &scale.to_string()),
            ("map", &map_cm.to_string()),
            ("unit", unit),
        ],
    );
    builder.build(rng, Operation::Multiplication, text, WordAnswer::Number(answer), unit)
}

fn ratio_share<R: Rng + ?Sized>(rng: &mut R, grade: Grade, builder: &WordBuilder) -> WordProblem {
    let language = builder.language;
    let currency = Currency::for_language(language);
    let terms = RATIO_TERMS.get(grade.band());
    let a = random_int(rng, terms.min, terms.max);
    let mut b = random_int(rng, terms.min, terms.max);
    if gcd(a, b) != 1 {
        // Keep the ratio in lowest terms
        b = (1..=terms.max.max(2)).rev().find(|&x| gcd(a, x) == 1 && x != a).unwrap_or(1);
    }
    let part = PART_VALUES.draw(rng, grade, currency);
    let total = (a + b) * part;
    let text = fill_template(
        localized(
            language,
            "{total}を姉と妹で{a}:{b}に分けます。姉は何円もらえますか。",
            "Ali and Ben share {total} in the ratio {a}:{b}. How much does Ali get?",
        ),
        &[
            ("total", &currency.format(total)),
            ("a", &a.to_string()),
            ("b", &b.to_string()),
        ],
    );
    builder.build(
        rng,
        Operation::Division,
        text,
        currency.answer(a * part),
        currency.unit(),
    )
}

pub fn generate<R: Rng + ?Sized>(
    rng: &mut R,
    grade: Grade,
    language: Language,
    pattern: CalculationPattern,
    count: usize,
) -> Vec<WordProblem> {
    let builder = WordBuilder::new(WordCategory::MapScale, language);
    (0..count)
        .map(|_| match pattern {
            CalculationPattern::RatioShare => ratio_share(rng, grade, &builder),
            _ => map_scale(rng, grade, &builder),
        })
        .collect()
}
