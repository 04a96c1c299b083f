//! # Grades and Difficulty Bands
//!
//! Elementary grades 1 through 6 are grouped into three difficulty bands.
//! Every generator keeps its numeric ranges in a [`BandTable`], so the only
//! thing a grade decides is which row of that table applies.
//!
//! | Grades | Band   |
//! |--------|--------|
//! | 1–2    | Lower  |
//! | 3–4    | Middle |
//! | 5–6    | Upper  |
//!
//! ## Example
//!
//! ```rust
//! use drill_core::grade::{BandTable, Grade, GradeBand, IntRange, range_by_grade};
//!
//! const SUMS: BandTable<IntRange> = BandTable::new(
//!     IntRange::new(1, 10),
//!     IntRange::new(10, 100),
//!     IntRange::new(100, 1000),
//! );
//!
//! let grade = Grade::new(4).unwrap();
//! assert_eq!(grade.band(), GradeBand::Middle);
//! assert_eq!(range_by_grade(grade, &SUMS), IntRange::new(10, 100));
//! ```

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::errors::{DrillError, DrillResult};
use crate::random::random_int;

/// School grade, always within 1..=6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Grade(u8);

impl Grade {
    /// Lowest supported grade
    pub const MIN: u8 = 1;
    /// Highest supported grade
    pub const MAX: u8 = 6;

    /// All grades in ascending order
    pub const ALL: [Grade; 6] = [Grade(1), Grade(2), Grade(3), Grade(4), Grade(5), Grade(6)];

    /// Create a grade, rejecting values outside 1..=6.
    pub fn new(value: u8) -> DrillResult<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Grade(value))
        } else {
            Err(DrillError::invalid_input(
                "grade",
                value.to_string(),
                "Grade must be between 1 and 6",
            ))
        }
    }

    /// Numeric grade value
    pub fn value(self) -> u8 {
        self.0
    }

    /// Difficulty band for this grade
    pub fn band(self) -> GradeBand {
        grade_band(self)
    }
}

impl Default for Grade {
    fn default() -> Self {
        Grade(1)
    }
}

impl TryFrom<u8> for Grade {
    type Error = DrillError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Grade::new(value)
    }
}

impl From<Grade> for u8 {
    fn from(grade: Grade) -> Self {
        grade.0
    }
}

impl FromStr for Grade {
    type Err = DrillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u8 = s.trim().parse().map_err(|_| {
            DrillError::invalid_input("grade", s, "Grade must be a number between 1 and 6")
        })?;
        Grade::new(value)
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Difficulty tier derived from a grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradeBand {
    /// Grades 1–2
    Lower,
    /// Grades 3–4
    Middle,
    /// Grades 5–6
    Upper,
}

impl GradeBand {
    /// All bands from easiest to hardest
    pub const ALL: [GradeBand; 3] = [GradeBand::Lower, GradeBand::Middle, GradeBand::Upper];
}

/// Map a grade to its difficulty band.
pub fn grade_band(grade: Grade) -> GradeBand {
    match grade.value() {
        1 | 2 => GradeBand::Lower,
        3 | 4 => GradeBand::Middle,
        _ => GradeBand::Upper,
    }
}

/// Inclusive integer range used by band tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntRange {
    pub min: i64,
    pub max: i64,
}

impl IntRange {
    pub const fn new(min: i64, max: i64) -> Self {
        IntRange { min, max }
    }

    /// Check whether `value` lies within the range
    pub fn contains(&self, value: i64) -> bool {
        self.min <= value && value <= self.max
    }

    /// Draw a uniform value from the range, both ends inclusive
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> i64 {
        random_int(rng, self.min, self.max)
    }
}

/// One value per difficulty band.
///
/// Tables are plain constants; generators read them and never change them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandTable<T> {
    pub lower: T,
    pub middle: T,
    pub upper: T,
}

impl<T: Copy> BandTable<T> {
    pub const fn new(lower: T, middle: T, upper: T) -> Self {
        BandTable {
            lower,
            middle,
            upper,
        }
    }

    /// Value for a band
    pub fn get(&self, band: GradeBand) -> T {
        match band {
            GradeBand::Lower => self.lower,
            GradeBand::Middle => self.middle,
            GradeBand::Upper => self.upper,
        }
    }
}

impl BandTable<IntRange> {
    /// True when no band is easier than the one before it: each band's
    /// bounds are at least those of the lower band.
    pub fn is_monotonic(&self) -> bool {
        self.lower.min <= self.middle.min
            && self.middle.min <= self.upper.min
            && self.lower.max <= self.middle.max
            && self.middle.max <= self.upper.max
    }
}

/// Resolve the band for `grade` and return its range from `table`.
pub fn range_by_grade(grade: Grade, table: &BandTable<IntRange>) -> IntRange {
    table.get(grade_band(grade))
}

/// Draw a uniform integer from the band range for `grade`.
pub fn random_int_by_grade<R: Rng + ?Sized>(
    rng: &mut R,
    grade: Grade,
    table: &BandTable<IntRange>,
) -> i64 {
    range_by_grade(grade, table).sample(rng)
}

/// Resolve the band for `grade` and return its scale value from `table`.
pub fn scale_by_grade<T: Copy>(grade: Grade, table: &BandTable<T>) -> T {
    table.get(grade_band(grade))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const TABLE: BandTable<IntRange> = BandTable::new(
        IntRange::new(1, 9),
        IntRange::new(10, 99),
        IntRange::new(100, 999),
    );

    #[test]
    fn test_grade_bands() {
        let bands: Vec<GradeBand> = Grade::ALL.iter().map(|g| g.band()).collect();
        assert_eq!(
            bands,
            vec![
                GradeBand::Lower,
                GradeBand::Lower,
                GradeBand::Middle,
                GradeBand::Middle,
                GradeBand::Upper,
                GradeBand::Upper,
            ]
        );
    }

    #[test]
    fn test_grade_validation() {
        assert!(Grade::new(0).is_err());
        assert!(Grade::new(7).is_err());
        assert_eq!(Grade::new(6).unwrap().value(), 6);
        assert_eq!("3".parse::<Grade>().unwrap().value(), 3);
        assert!("three".parse::<Grade>().is_err());
    }

    #[test]
    fn test_grade_serialization() {
        let grade = Grade::new(5).unwrap();
        assert_eq!(serde_json::to_string(&grade).unwrap(), "5");
        let roundtrip: Grade = serde_json::from_str("5").unwrap();
        assert_eq!(roundtrip, grade);
        assert!(serde_json::from_str::<Grade>("9").is_err());
    }

    #[test]
    fn test_range_and_scale_lookup() {
        let grade = Grade::new(2).unwrap();
        assert_eq!(range_by_grade(grade, &TABLE), IntRange::new(1, 9));

        let scale = BandTable::new(1u32, 1, 2);
        assert_eq!(scale_by_grade(Grade::new(6).unwrap(), &scale), 2);
    }

    #[test]
    fn test_random_int_by_grade_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for grade in Grade::ALL {
            let range = range_by_grade(grade, &TABLE);
            for _ in 0..200 {
                assert!(range.contains(random_int_by_grade(&mut rng, grade, &TABLE)));
            }
        }
    }

    #[test]
    fn test_monotonic_check() {
        assert!(TABLE.is_monotonic());
        let shrinking = BandTable::new(
            IntRange::new(1, 100),
            IntRange::new(1, 10),
            IntRange::new(1, 1000),
        );
        assert!(!shrinking.is_monotonic());
    }
}
