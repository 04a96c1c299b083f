//! # Calculation Patterns
//!
//! A calculation pattern narrows what a generator family produces: carrying
//! additions, missing-number drills, a particular word-problem scenario, and
//! so on. Patterns serialize as kebab-case identifiers. Word patterns also
//! accept a language suffix (`allowance-saving-jap`, `allowance-saving-en`)
//! because the language is already decided by the problem type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use crate::errors::DrillError;
use crate::problem::WordCategory;

/// Closed set of scenario identifiers understood by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CalculationPattern {
    // Integer drills
    WithCarry,
    NoCarry,
    WithBorrow,
    NoBorrow,
    TimesTable,
    WithRemainder,
    // Missing-number drills
    MissingRandom,
    MissingOperand1,
    MissingOperand2,
    MissingAnswer,
    // Fractions
    FractionSimplify,
    // Word problems
    TimeElapsed,
    TimeDuration,
    CalendarDaysAfter,
    CalendarDaysBetween,
    ShoppingTotal,
    ShoppingDiscount,
    ShoppingChange,
    AllowanceSaving,
    AllowanceGoal,
    UnitLength,
    UnitWeight,
    UnitVolume,
    MapScale,
    RatioShare,
    TransportChange,
    TransportPassengers,
    SpeedDistance,
    SpeedTime,
}

/// Which generator family a pattern belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternFamily {
    Arithmetic,
    Missing,
    Fraction,
    Word(WordCategory),
}

impl CalculationPattern {
    pub const ALL: [CalculationPattern; 29] = [
        CalculationPattern::WithCarry,
        CalculationPattern::NoCarry,
        CalculationPattern::WithBorrow,
        CalculationPattern::NoBorrow,
        CalculationPattern::TimesTable,
        CalculationPattern::WithRemainder,
        CalculationPattern::MissingRandom,
        CalculationPattern::MissingOperand1,
        CalculationPattern::MissingOperand2,
        CalculationPattern::MissingAnswer,
        CalculationPattern::FractionSimplify,
        CalculationPattern::TimeElapsed,
        CalculationPattern::TimeDuration,
        CalculationPattern::CalendarDaysAfter,
        CalculationPattern::CalendarDaysBetween,
        CalculationPattern::ShoppingTotal,
        CalculationPattern::ShoppingDiscount,
        CalculationPattern::ShoppingChange,
        CalculationPattern::AllowanceSaving,
        CalculationPattern::AllowanceGoal,
        CalculationPattern::UnitLength,
        CalculationPattern::UnitWeight,
        CalculationPattern::UnitVolume,
        CalculationPattern::MapScale,
        CalculationPattern::RatioShare,
        CalculationPattern::TransportChange,
        CalculationPattern::TransportPassengers,
        CalculationPattern::SpeedDistance,
        CalculationPattern::SpeedTime,
    ];

    /// Kebab-case identifier without a language suffix
    pub fn name(&self) -> &'static str {
        match self {
            CalculationPattern::WithCarry => "with-carry",
            CalculationPattern::NoCarry => "no-carry",
            CalculationPattern::WithBorrow => "with-borrow",
            CalculationPattern::NoBorrow => "no-borrow",
            CalculationPattern::TimesTable => "times-table",
            CalculationPattern::WithRemainder => "with-remainder",
            CalculationPattern::MissingRandom => "missing-random",
            CalculationPattern::MissingOperand1 => "missing-operand1",
            CalculationPattern::MissingOperand2 => "missing-operand2",
            CalculationPattern::MissingAnswer => "missing-answer",
            CalculationPattern::FractionSimplify => "fraction-simplify",
            CalculationPattern::TimeElapsed => "time-elapsed",
            CalculationPattern::TimeDuration => "time-duration",
            CalculationPattern::CalendarDaysAfter => "calendar-days-after",
            CalculationPattern::CalendarDaysBetween => "calendar-days-between",
            CalculationPattern::ShoppingTotal => "shopping-total",
            CalculationPattern::ShoppingDiscount => "shopping-discount",
            CalculationPattern::ShoppingChange => "shopping-change",
            CalculationPattern::AllowanceSaving => "allowance-saving",
            CalculationPattern::AllowanceGoal => "allowance-goal",
            CalculationPattern::UnitLength => "unit-length",
            CalculationPattern::UnitWeight => "unit-weight",
            CalculationPattern::UnitVolume => "unit-volume",
            CalculationPattern::MapScale => "map-scale",
            CalculationPattern::RatioShare => "ratio-share",
            CalculationPattern::TransportChange => "transport-change",
            CalculationPattern::TransportPassengers => "transport-passengers",
            CalculationPattern::SpeedDistance => "speed-distance",
            CalculationPattern::SpeedTime => "speed-time",
        }
    }

    pub fn family(&self) -> PatternFamily {
        use CalculationPattern::*;
        match self {
            WithCarry | NoCarry | WithBorrow | NoBorrow | TimesTable | WithRemainder => {
                PatternFamily::Arithmetic
            }
            MissingRandom | MissingOperand1 | MissingOperand2 | MissingAnswer => {
                PatternFamily::Missing
            }
            FractionSimplify => PatternFamily::Fraction,
            TimeElapsed | TimeDuration => PatternFamily::Word(WordCategory::Time),
            CalendarDaysAfter | CalendarDaysBetween => PatternFamily::Word(WordCategory::Calendar),
            ShoppingTotal | ShoppingDiscount | ShoppingChange => {
                PatternFamily::Word(WordCategory::Shopping)
            }
            AllowanceSaving | AllowanceGoal => PatternFamily::Word(WordCategory::Allowance),
            UnitLength | UnitWeight | UnitVolume => {
                PatternFamily::Word(WordCategory::UnitConversion)
            }
            MapScale | RatioShare => PatternFamily::Word(WordCategory::MapScale),
            TransportChange | TransportPassengers => {
                PatternFamily::Word(WordCategory::TransportChange)
            }
            SpeedDistance | SpeedTime => PatternFamily::Word(WordCategory::Speed),
        }
    }

    /// Word-problem category, if this is a word pattern
    pub fn word_category(&self) -> Option<WordCategory> {
        match self.family() {
            PatternFamily::Word(category) => Some(category),
            _ => None,
        }
    }

    /// Patterns belonging to a word category
    pub fn for_category(category: WordCategory) -> Vec<CalculationPattern> {
        Self::ALL
            .into_iter()
            .filter(|p| p.word_category() == Some(category))
            .collect()
    }
}

impl FromStr for CalculationPattern {
    type Err = DrillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        let base = ["-jap", "-ja", "-en"]
            .iter()
            .find_map(|suffix| lowered.strip_suffix(*suffix))
            .unwrap_or(lowered.as_str());
        Self::ALL
            .into_iter()
            .find(|p| p.name() == base || p.name() == lowered)
            .ok_or_else(|| {
                DrillError::invalid_input("calculation_pattern", s, "Unknown calculation pattern")
            })
    }
}

impl TryFrom<String> for CalculationPattern {
    type Error = DrillError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CalculationPattern> for String {
    fn from(pattern: CalculationPattern) -> Self {
        pattern.name().to_string()
    }
}

impl fmt::Display for CalculationPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Deserialize an optional pattern, reading unknown identifiers as `None`.
///
/// Cached settings may name a pattern from a newer or older release; the
/// dispatcher then falls back to the family default instead of refusing to
/// load the settings.
pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Option<CalculationPattern>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|name| match name.parse() {
        Ok(pattern) => Some(pattern),
        Err(_) => {
            warn!(pattern = %name, "ignoring unknown calculation pattern");
            None
        }
    }))
}
