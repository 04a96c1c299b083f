//! # Exact Arithmetic
//!
//! Fraction and mixed-number problems must print exact, reduced answers, so
//! they are computed with a small rational type instead of floats.
//!
//! ## Example
//!
//! ```rust
//! use drill_core::math::Ratio;
//!
//! let sum = Ratio::new(1, 2) + Ratio::new(1, 3);
//! assert_eq!((sum.num(), sum.den()), (5, 6));
//! ```

use std::cmp::Ordering;
use std::ops::{Add, Div, Mul, Sub};

use serde::{Deserialize, Serialize};

/// Greatest common divisor (always non-negative)
pub fn gcd(a: i64, b: i64) -> i64 {
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

/// Least common multiple; zero if either argument is zero
pub fn lcm(a: i64, b: i64) -> i64 {
    if a == 0 || b == 0 {
        return 0;
    }
    (a / gcd(a, b) * b).abs()
}

/// A rational number kept in lowest terms with a positive denominator.
///
/// Sums and differences are taken over the least common denominator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ratio {
    num: i64,
    den: i64,
}

impl Ratio {
    /// Build a reduced ratio.
    ///
    /// A zero denominator is treated as 1; generators never produce one.
    pub fn new(num: i64, den: i64) -> Self {
        let den = if den == 0 { 1 } else { den };
        let sign = if den < 0 { -1 } else { 1 };
        let g = gcd(num, den).max(1);
        Ratio {
            num: sign * num / g,
            den: sign * den / g,
        }
    }

    /// Whole number as a ratio
    pub fn whole(value: i64) -> Self {
        Ratio { num: value, den: 1 }
    }

    pub fn num(&self) -> i64 {
        self.num
    }

    pub fn den(&self) -> i64 {
        self.den
    }

    /// Split into whole part and proper remainder, e.g. 7/3 → (2, 1/3).
    ///
    /// Only meaningful for non-negative ratios.
    pub fn to_mixed_parts(&self) -> (i64, i64, i64) {
        let whole = self.num / self.den;
        let rest = self.num % self.den;
        if rest == 0 {
            (whole, 0, 1)
        } else {
            (whole, rest, self.den)
        }
    }
}

impl Add for Ratio {
    type Output = Ratio;
    fn add(self, rhs: Ratio) -> Ratio {
        let den = lcm(self.den, rhs.den);
        Ratio::new(self.num * (den / self.den) + rhs.num * (den / rhs.den), den)
    }
}

impl Sub for Ratio {
    type Output = Ratio;
    fn sub(self, rhs: Ratio) -> Ratio {
        let den = lcm(self.den, rhs.den);
        Ratio::new(self.num * (den / self.den) - rhs.num * (den / rhs.den), den)
    }
}

impl Mul for Ratio {
    type Output = Ratio;
    fn mul(self, rhs: Ratio) -> Ratio {
        Ratio::new(self.num * rhs.num, self.den * rhs.den)
    }
}

impl Div for Ratio {
    type Output = Ratio;
    fn div(self, rhs: Ratio) -> Ratio {
        Ratio::new(self.num * rhs.den, self.den * rhs.num)
    }
}

impl PartialOrd for Ratio {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ratio {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.num * other.den).cmp(&(other.num * self.den))
    }
}
