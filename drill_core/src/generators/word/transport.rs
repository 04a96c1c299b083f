//! Transport problems: fare change and bus passengers.
//!
//! Fare-change problems are the only generator that avoids repeats within a
//! worksheet. Every distinct fare scenario for a currency and band is built
//! once into a read-only pool; a batch draws from a shuffled copy without
//! replacement and reshuffles only after the pool runs out.

use std::collections::{BTreeSet, HashMap};

use once_cell::sync::Lazy;
use rand::seq::SliceRandom;
use rand::Rng;

use super::shopping::note_for;
use super::{fill_template, localized, Currency, WordBuilder};
use crate::grade::{random_int_by_grade, BandTable, Grade, GradeBand, IntRange};
use crate::pattern::CalculationPattern;
use crate::problem::{Language, Operation, WordAnswer, WordCategory, WordProblem};
use crate::random::random_int;

/// One fare-change scenario, amounts in minor units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FareScenario {
    pub fare: i64,
    pub tickets: i64,
    pub paid: i64,
}

impl FareScenario {
    pub fn change(&self) -> i64 {
        self.paid - self.fare * self.tickets
    }
}

struct FareBand {
    fares: IntRange,
    step: i64,
    tickets: IntRange,
}

fn fare_band(currency: Currency, band: GradeBand) -> FareBand {
    match (currency, band) {
        (Currency::Yen, GradeBand::Lower) => FareBand {
            fares: IntRange::new(100, 300),
            step: 10,
            tickets: IntRange::new(1, 1),
        },
        (Currency::Yen, GradeBand::Middle) => FareBand {
            fares: IntRange::new(120, 480),
            step: 10,
            tickets: IntRange::new(1, 3),
        },
        (Currency::Yen, GradeBand::Upper) => FareBand {
            fares: IntRange::new(150, 990),
            step: 10,
            tickets: IntRange::new(2, 5),
        },
        (Currency::Ringgit, GradeBand::Lower) => FareBand {
            fares: IntRange::new(100, 400),
            step: 10,
            tickets: IntRange::new(1, 1),
        },
        (Currency::Ringgit, GradeBand::Middle) => FareBand {
            fares: IntRange::new(120, 600),
            step: 10,
            tickets: IntRange::new(1, 3),
        },
        (Currency::Ringgit, GradeBand::Upper) => FareBand {
            fares: IntRange::new(150, 1250),
            step: 5,
            tickets: IntRange::new(2, 5),
        },
    }
}

fn build_pool(currency: Currency, band: GradeBand) -> Vec<FareScenario> {
    let table = fare_band(currency, band);
    let mut scenarios = BTreeSet::new();
    let mut fare = table.fares.min;
    while fare <= table.fares.max {
        for tickets in table.tickets.min..=table.tickets.max {
            let paid = note_for(currency, fare * tickets);
            scenarios.insert(FareScenario { fare, tickets, paid });
        }
        fare += table.step;
    }
    scenarios.into_iter().collect()
}

static FARE_POOLS: Lazy<HashMap<(Currency, GradeBand), Vec<FareScenario>>> = Lazy::new(|| {
    let mut pools = HashMap::new();
    for currency in [Currency::Yen, Currency::Ringgit] {
        for band in GradeBand::ALL {
            pools.insert((currency, band), build_pool(currency, band));
        }
    }
    pools
});

/// Every distinct fare scenario for a currency and band.
pub fn fare_pool(currency: Currency, band: GradeBand) -> &'static [FareScenario] {
    FARE_POOLS
        .get(&(currency, band))
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Draw `count` scenarios without replacement, reshuffling when the pool
/// is exhausted.
pub fn sample_fares<R: Rng + ?Sized>(
    rng: &mut R,
    currency: Currency,
    band: GradeBand,
    count: usize,
) -> Vec<FareScenario> {
    let pool = fare_pool(currency, band);
    if pool.is_empty() {
        return Vec::new();
    }
    let mut drawn = Vec::with_capacity(count);
    while drawn.len() < count {
        let mut deck = pool.to_vec();
        deck.shuffle(rng);
        let take = (count - drawn.len()).min(deck.len());
        drawn.extend(deck.into_iter().take(take));
    }
    drawn
}

fn fare_change<R: Rng + ?Sized>(rng: &mut R, scenario: FareScenario, builder: &WordBuilder) -> WordProblem {
    let language = builder.language;
    let currency = Currency::for_language(language);
    let template = if scenario.tickets == 1 {
        localized(
            language,
            "バスの運賃は{fare}です。{paid}で払うと、おつりはいくらですか。",
            "A bus ticket costs {fare}. Lina pays with {paid}. How much change does Lina get?",
        )
    } else {
        localized(
            language,
            "バスの運賃は1人{fare}です。{tickets}人分を{paid}で払うと、おつりはいくらですか。",
            "A bus ticket costs {fare} per person. Lina buys {tickets} tickets and pays with {paid}. How much change does Lina get?",
        )
    };
    let text = fill_template(
        template,
        &[
            ("fare", &currency.format(scenario.fare)),
            ("tickets", &scenario.tickets.to_string()),
            ("paid", &currency.format(scenario.paid)),
        ],
    );
    builder.build(
        rng,
        Operation::Subtraction,
        text,
        currency.answer(scenario.change()),
        currency.unit(),
    )
}

/// Passengers aboard at the start
pub const START_PASSENGERS: BandTable<IntRange> = BandTable::new(
    IntRange::new(5, 20),
    IntRange::new(10, 40),
    IntRange::new(20, 60),
);

/// Stops on the route
const STOPS: BandTable<IntRange> = BandTable::new(
    IntRange::new(1, 1),
    IntRange::new(2, 2),
    IntRange::new(2, 3),
);

fn passengers<R: Rng + ?Sized>(rng: &mut R, grade: Grade, builder: &WordBuilder) -> WordProblem {
    let language = builder.language;
    let start = random_int_by_grade(rng, grade, &START_PASSENGERS);
    let stops = random_int_by_grade(rng, grade, &STOPS);

    let mut aboard = start;
    let mut legs = Vec::new();
    for _ in 0..stops {
        let off = random_int(rng, 0, aboard.min(15));
        let on = random_int(rng, 0, 15);
        aboard = aboard - off + on;
        legs.push(match language {
            Language::Japanese => format!("{}人おりて{}人乗りました", off, on),
            Language::English => format!("{} got off and {} got on", off, on),
        });
    }
    let separator = localized(language, "。次のバス停で", ". At the next stop, ");
    let text = fill_template(
        localized(
            language,
            "バスに{start}人乗っています。バス停で{legs}。今、何人乗っていますか。",
            "There are {start} people on a bus. At the first stop, {legs}. How many people are on the bus now?",
        ),
        &[("start", &start.to_string()), ("legs", &legs.join(separator))],
    );
    let unit = localized(language, "人", "people");
    builder.build(rng, Operation::Addition, text, WordAnswer::Number(aboard as f64), unit)
}

pub fn generate<R: Rng + ?Sized>(
    rng: &mut R,
    grade: Grade,
    language: Language,
    pattern: CalculationPattern,
    count: usize,
) -> Vec<WordProblem> {
    let builder = WordBuilder::new(WordCategory::TransportChange, language);
    match pattern {
        CalculationPattern::TransportPassengers => (0..count)
            .map(|_| passengers(rng, grade, &builder))
            .collect(),
        _ => {
            let currency = Currency::for_language(language);
            sample_fares(rng, currency, grade.band(), count)
                .into_iter()
                .map(|scenario| fare_change(rng, scenario, &builder))
                .collect()
        }
    }
}
