//! Random source helpers.
//!
//! Generators never reach for an ambient RNG. Every function takes the
//! caller's `Rng`, so production code passes `rand::thread_rng()` and tests
//! pass a seeded `StdRng` and get the same worksheet every run.

use rand::Rng;
use uuid::{Builder, Uuid};

/// Uniform integer in `min..=max`. A reversed or empty range yields `min`.
pub fn random_int<R: Rng + ?Sized>(rng: &mut R, min: i64, max: i64) -> i64 {
    if max <= min {
        return min;
    }
    rng.gen_range(min..=max)
}

/// Uniform multiple of `step` within `min..=max`.
///
/// `min` and `max` should themselves be multiples of `step`.
pub fn random_step<R: Rng + ?Sized>(rng: &mut R, min: i64, max: i64, step: i64) -> i64 {
    let step = step.max(1);
    random_int(rng, min / step, max / step) * step
}

/// Pick one element of a non-empty slice.
///
/// # Panics
///
/// Panics if `items` is empty. Callers only pass constant tables.
pub fn pick<'a, T, R: Rng + ?Sized>(rng: &mut R, items: &'a [T]) -> &'a T {
    &items[rng.gen_range(0..items.len())]
}

/// Fair coin flip
pub fn coin<R: Rng + ?Sized>(rng: &mut R) -> bool {
    rng.gen_bool(0.5)
}

/// Opaque unique id for a problem.
///
/// The id is a version 4 UUID built from the injected source, so seeded
/// generators produce stable ids.
pub fn problem_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    let bytes: [u8; 16] = rng.gen();
    let id: Uuid = Builder::from_random_bytes(bytes).into_uuid();
    id.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_random_int_inclusive() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut seen = HashSet::new();
        for _ in 0..500 {
            let value = random_int(&mut rng, 1, 3);
            assert!((1..=3).contains(&value));
            seen.insert(value);
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_degenerate_range() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(random_int(&mut rng, 5, 5), 5);
        assert_eq!(random_int(&mut rng, 9, 2), 9);
    }

    #[test]
    fn test_random_step() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let value = random_step(&mut rng, 100, 1000, 50);
            assert_eq!(value % 50, 0);
            assert!((100..=1000).contains(&value));
        }
    }

    #[test]
    fn test_problem_ids_are_v4_and_reproducible() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        let id = problem_id(&mut a);
        assert_eq!(id, problem_id(&mut b));

        let parsed = Uuid::parse_str(&id).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
        assert_ne!(id, problem_id(&mut a));
    }
}
