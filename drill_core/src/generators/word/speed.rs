//! Speed, distance and time.

use rand::Rng;

use super::{fill_template, localized, WordBuilder};
use crate::grade::{BandTable, Grade, GradeBand, IntRange};
use crate::pattern::CalculationPattern;
use crate::problem::{Language, Operation, WordAnswer, WordCategory, WordProblem};
use crate::random::random_step;

/// Speed in km/h for the lower and middle bands, m/min for the upper band
pub const SPEEDS: BandTable<IntRange> = BandTable::new(
    IntRange::new(2, 9),
    IntRange::new(10, 60),
    IntRange::new(40, 90),
);
const SPEED_STEP: BandTable<i64> = BandTable::new(1, 5, 5);

/// Travel time: hours for the lower and middle bands, minutes above
pub const DURATIONS: BandTable<IntRange> = BandTable::new(
    IntRange::new(1, 3),
    IntRange::new(1, 5),
    IntRange::new(5, 30),
);

struct Trip {
    speed: i64,
    duration: i64,
    speed_unit: &'static str,
    distance_unit: &'static str,
    time_unit: &'static str,
}

fn draw_trip<R: Rng + ?Sized>(rng: &mut R, grade: Grade, language: Language) -> Trip {
    let band = grade.band();
    let speeds = SPEEDS.get(band);
    let speed = random_step(rng, speeds.min, speeds.max, SPEED_STEP.get(band));
    let duration = DURATIONS.get(band).sample(rng);
    match band {
        GradeBand::Upper => Trip {
            speed,
            duration,
            speed_unit: localized(language, "分速{speed}m", "{speed} m per minute"),
            distance_unit: "m",
            time_unit: localized(language, "分", "minutes"),
        },
        _ => Trip {
            speed,
            duration,
            speed_unit: localized(language, "時速{speed}km", "{speed} km per hour"),
            distance_unit: "km",
            time_unit: localized(language, "時間", "hours"),
        },
    }
}

fn distance<R: Rng + ?Sized>(rng: &mut R, grade: Grade, builder: &WordBuilder) -> WordProblem {
    let language = builder.language;
    let trip = draw_trip(rng, grade, language);
    let speed = fill_template(trip.speed_unit, &[("speed", &trip.speed.to_string())]);
    let text = fill_template(
        localized(
            language,
            "{speed}で{duration}{time}進むと、何{distance}進みますか。",
            "A cyclist rides at {speed} for {duration} {time}. How far does the cyclist travel in {distance}?",
        ),
        &[
            ("speed", &speed),
            ("duration", &trip.duration.to_string()),
            ("time", trip.time_unit),
            ("distance", trip.distance_unit),
        ],
    );
    builder.build(
        rng,
        Operation::Multiplication,
        text,
        WordAnswer::Number((trip.speed * trip.duration) as f64),
        trip.distance_unit,
    )
}

fn travel_time<R: Rng + ?Sized>(rng: &mut R, grade: Grade, builder: &WordBuilder) -> WordProblem {
    let language = builder.language;
    let trip = draw_trip(rng, grade, language);
    let speed = fill_template(trip.speed_unit, &[("speed", &trip.speed.to_string())]);
    let length = trip.speed * trip.duration;
    let text = fill_template(
        localized(
            language,
            "{length}{distance}の道のりを{speed}で進むと、何{time}かかりますか。",
            "A train travels {length} {distance} at {speed}. How many {time} does the trip take?",
        ),
        &[
            ("length", &length.to_string()),
            ("distance", trip.distance_unit),
            ("speed", &speed),
            ("time", trip.time_unit),
        ],
    );
    builder.build(
        rng,
        Operation::Division,
        text,
        WordAnswer::Number(trip.duration as f64),
        trip.time_unit,
    )
}

pub fn generate<R: Rng + ?Sized>(
    rng: &mut R,
    grade: Grade,
    language: Language,
    pattern: CalculationPattern,
    count: usize,
) -> Vec<WordProblem> {
    let builder = WordBuilder::new(WordCategory::Speed, language);
    (0..count)
        .map(|_| match pattern {
            CalculationPattern::SpeedTime => travel_time(rng, grade, &builder),
            _ => distance(rng, grade, &builder),
        })
        .collect()
}
