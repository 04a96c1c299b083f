//! Shopping problems: totals, discounts and change.

use rand::Rng;

use super::{fill_template, localized, Currency, MoneyTable, WordBuilder};
use crate::grade::{scale_by_grade, BandTable, Grade, GradeBand, IntRange};
use crate::pattern::CalculationPattern;
use crate::problem::{Language, Operation, WordCategory, WordProblem};
use crate::random::pick;

const ITEMS_JA: [&str; 8] = [
    "えんぴつ", "ノート", "けしゴム", "ジュース", "パン", "りんご", "シール", "ものさし",
];
const ITEMS_EN: [&str; 8] = [
    "a pencil", "a notebook", "an eraser", "a drink", "a bun", "an apple", "a sticker", "a ruler",
];

/// Price of a single item
pub const ITEM_PRICES: MoneyTable = MoneyTable {
    yen: BandTable::new(
        IntRange::new(10, 100),
        IntRange::new(50, 500),
        IntRange::new(100, 2000),
    ),
    yen_step: 10,
    ringgit: BandTable::new(
        IntRange::new(50, 500),
        IntRange::new(100, 1500),
        IntRange::new(200, 5000),
    ),
    ringgit_step: 10,
};

/// Items bought in one total problem
const ITEM_COUNTS: BandTable<usize> = BandTable::new(2, 3, 4);

/// Whole-hundred prices, so every percentage discount is exact
pub const DISCOUNT_PRICES: MoneyTable = MoneyTable {
    yen: BandTable::new(
        IntRange::new(100, 500),
        IntRange::new(200, 3000),
        IntRange::new(500, 9000),
    ),
    yen_step: 100,
    ringgit: BandTable::new(
        IntRange::new(500, 2000),
        IntRange::new(1000, 5000),
        IntRange::new(2000, 20000),
    ),
    ringgit_step: 100,
};

/// Fixed amount taken off in the lower band
const AMOUNT_OFF: MoneyTable = MoneyTable {
    yen: BandTable::new(
        IntRange::new(10, 50),
        IntRange::new(10, 50),
        IntRange::new(10, 50),
    ),
    yen_step: 10,
    ringgit: BandTable::new(
        IntRange::new(50, 300),
        IntRange::new(50, 300),
        IntRange::new(50, 300),
    ),
    ringgit_step: 50,
};

const PERCENT_OFF: [i64; 5] = [10, 20, 25, 30, 50];

const YEN_NOTES: [i64; 5] = [100, 500, 1000, 5000, 10000];
const RINGGIT_NOTES: [i64; 5] = [500, 1000, 2000, 5000, 10000];

/// Smallest note strictly larger than `total`, or enough large notes.
pub fn note_for(currency: Currency, total: i64) -> i64 {
    let notes = match currency {
        Currency::Yen => &YEN_NOTES,
        Currency::Ringgit => &RINGGIT_NOTES,
    };
    let largest = notes[notes.len() - 1];
    notes
        .iter()
        .copied()
        .find(|&note| note > total)
        .unwrap_or((total / largest + 1) * largest)
}

fn item<R: Rng + ?Sized>(rng: &mut R, language: Language) -> &'static str {
    match language {
        Language::Japanese => *pick(rng, &ITEMS_JA),
        Language::English => *pick(rng, &ITEMS_EN),
    }
}

/// Distinct items with their prices.
fn basket<R: Rng + ?Sized>(
    rng: &mut R,
    grade: Grade,
    language: Language,
    currency: Currency,
    count: usize,
) -> Vec<(&'static str, i64)> {
    let mut chosen: Vec<(&'static str, i64)> = Vec::with_capacity(count);
    while chosen.len() < count {
        let name = item(rng, language);
        if chosen.iter().any(|(n, _)| *n == name) {
            continue;
        }
        chosen.push((name, ITEM_PRICES.draw(rng, grade, currency)));
    }
    chosen
}

fn describe_basket(basket: &[(&str, i64)], language: Language, currency: Currency) -> String {
    let parts: Vec<String> = basket
        .iter()
        .map(|(name, price)| match language {
            Language::Japanese => format!("{}の{}", currency.format(*price), name),
            Language::English => format!("{} for {}", name, currency.format(*price)),
        })
        .collect();
    match language {
        Language::Japanese => parts.join("と"),
        Language::English => match parts.split_last() {
            Some((last, rest)) if !rest.is_empty() => format!("{} and {}", rest.join(", "), last),
            _ => parts.join(""),
        },
    }
}

fn total<R: Rng + ?Sized>(rng: &mut R, grade: Grade, builder: &WordBuilder) -> WordProblem {
    let language = builder.language;
    let currency = Currency::for_language(language);
    let items = basket(rng, grade, language, currency, scale_by_grade(grade, &ITEM_COUNTS));
    let sum: i64 = items.iter().map(|(_, price)| price).sum();
    let text = fill_template(
        localized(
            language,
            "{items}を買いました。代金はあわせていくらですか。",
            "Siti buys {items}. What is the total cost?",
        ),
        &[("items", &describe_basket(&items, language, currency))],
    );
    builder.build(rng, Operation::Addition, text, currency.answer(sum), currency.unit())
}

fn discount<R: Rng + ?Sized>(rng: &mut R, grade: Grade, builder: &WordBuilder) -> WordProblem {
    let language = builder.language;
    let currency = Currency::for_language(language);
    let name = item(rng, language);
    let price = DISCOUNT_PRICES.draw(rng, grade, currency);

    let (text, sale) = if grade.band() == GradeBand::Lower {
        let off = AMOUNT_OFF.draw(rng, grade, currency).min(price - currency.minor_per_major());
        let text = fill_template(
            localized(
                language,
                "{price}の{item}が{off}引きになっています。いくらで買えますか。",
                "The price of {item} is {price}. Today it is {off} off. How much does it cost now?",
            ),
            &[
                ("price", &currency.format(price)),
                ("item", name),
                ("off", &currency.format(off)),
            ],
        );
        (text, price - off)
    } else {
        let percent = *pick(rng, &PERCENT_OFF);
        let text = fill_template(
            localized(
                language,
                "{price}の{item}が{percent}%引きになっています。いくらで買えますか。",
                "The price of {item} is {price}. The shop gives {percent}% off. How much does it cost now?",
            ),
            &[
                ("price", &currency.format(price)),
                ("item", name),
                ("percent", &percent.to_string()),
            ],
        );
        (text, price - price * percent / 100)
    };
    builder.build(rng, Operation::Subtraction, text, currency.answer(sale), currency.unit())
}

fn change<R: Rng + ?Sized>(rng: &mut R, grade: Grade, builder: &WordBuilder) -> WordProblem {
    let language = builder.language;
    let currency = Currency::for_language(language);
    let count = scale_by_grade(grade, &ITEM_COUNTS) - 1;
    let items = basket(rng, grade, language, currency, count.max(1));
    let sum: i64 = items.iter().map(|(_, price)| price).sum();
    let paid = note_for(currency, sum);
    let text = fill_template(
        localized(
            language,
            "{items}を買って、{paid}はらいました。おつりはいくらですか。",
            "Arun buys {items} and pays with {paid}. How much change does Arun get?",
        ),
        &[
            ("items", &describe_basket(&items, language, currency)),
            ("paid", &currency.format(paid)),
        ],
    );
    builder.build(
        rng,
        Operation::Subtraction,
        text,
        currency.answer(paid - sum),
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
    let builder = WordBuilder::new(WordCategory::Shopping, language);
    (0..count)
        .map(|_| match pattern {
            CalculationPattern::ShoppingDiscount => discount(rng, grade, &builder),
            CalculationPattern::ShoppingChange => change(rng, grade, &builder),
            _ => total(rng, grade, &builder),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::WordAnswer;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn amount(p: &WordProblem) -> f64 {
        match p.answer {
            WordAnswer::Number(n) => n,
            WordAnswer::Text(_) => panic!("money answers are numbers"),
        }
    }

    #[test]
    fn test_tables_are_monotonic() {
        assert!(ITEM_PRICES.is_monotonic());
        assert!(DISCOUNT_PRICES.is_monotonic());
        assert!(AMOUNT_OFF.is_monotonic());
    }

    #[test]
    fn test_note_for() {
        assert_eq!(note_for(Currency::Yen, 80), 100);
        assert_eq!(note_for(Currency::Yen, 100), 500);
        assert_eq!(note_for(Currency::Ringgit, 1250), 2000);
        assert_eq!(note_for(Currency::Yen, 12000), 20000);
    }

    #[test]
    fn test_japanese_totals_are_whole_yen() {
        let mut rng = StdRng::seed_from_u64(81);
        for grade in Grade::ALL {
            for p in generate(&mut rng, grade, Language::Japanese, CalculationPattern::ShoppingTotal, 10) {
                let total = amount(&p);
                assert_eq!(total.fract(), 0.0);
                assert!(p.answer_text().ends_with('円'));
            }
        }
    }

    #[test]
    fn test_ringgit_change_has_two_decimals() {
        let mut rng = StdRng::seed_from_u64(82);
        let grade = Grade::new(4).unwrap();
        for p in generate(&mut rng, grade, Language::English, CalculationPattern::ShoppingChange, 10) {
            let change = amount(&p);
            assert!(change > 0.0);
            assert!(p.answer_text().starts_with("RM"));
            let cents = (change * 100.0).round();
            assert!((change * 100.0 - cents).abs() < 1e-6);
        }
    }

    #[test]
    fn test_discount_is_exact_and_cheaper() {
        let mut rng = StdRng::seed_from_u64(83);
        for grade in Grade::ALL {
            for p in generate(&mut rng, grade, Language::Japanese, CalculationPattern::ShoppingDiscount, 10) {
                let sale = amount(&p);
                assert!(sale > 0.0);
                assert_eq!(sale.fract(), 0.0, "{}", p.problem_text);
            }
        }
    }
}
