//! Deterministic stand-in activity for profiles whose real activity could not
//! be scraped.
//!
//! The same username always produces the same map for the same `today`, so a
//! cached card never flickers between different noise patterns. None of this
//! is cryptographically secure; it only has to look stable and spread counts
//! across the color tiers.

use chrono::NaiveDate;

use crate::models::ActivityMap;
use super::layout::DayGrid;

/// Largest count a synthetic day can receive
pub const MAX_FALLBACK_COUNT: u32 = 8;

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// 32-bit FNV-1a over the UTF-8 bytes of `input`
pub fn seed_from_username(input: &str) -> u32 {
    input.bytes().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ byte as u32).wrapping_mul(FNV_PRIME)
    })
}

/// Small multiply-xor-shift generator with 32 bits of state
#[derive(Debug, Clone)]
pub struct SeededRng {
    state: u32,
}

impl SeededRng {
    const INCREMENT: u32 = 0x6D2B_79F5;

    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    pub fn from_username(username: &str) -> Self {
        Self::new(seed_from_username(username))
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(Self::INCREMENT);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    /// Uniform value in `[0, 1)`
    pub fn next_f64(&mut self) -> f64 {
        self.next_u32() as f64 / 4_294_967_296.0
    }

    /// `floor(next_f64() * bound)`, always below `bound`
    pub fn next_below(&mut self, bound: u32) -> u32 {
        (self.next_f64() * bound as f64).floor() as u32
    }
}

/// Synthetic activity for the 364 days ending at `today`.
///
/// One draw per day, oldest day first, each in `0..=MAX_FALLBACK_COUNT`.
/// Zero days are left out of the map.
pub fn generate_fallback_activity(username: &str, today: NaiveDate) -> ActivityMap {
    let mut rng = SeededRng::from_username(username);

    DayGrid::ending_at(today)
        .days()
        .iter()
        .map(|&date| (date, rng.next_below(MAX_FALLBACK_COUNT + 1)))
        .filter(|&(_, count)| count > 0)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heatmap::layout::GRID_DAYS;
    use crate::heatmap::ColorTier;
    use std::collections::HashSet;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[test]
    fn test_same_username_same_map() {
        let first = generate_fallback_activity("tourist", today());
        let second = generate_fallback_activity("tourist", today());
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_distinct_usernames_diverge() {
        let pairs = [("alice", "alice2"), ("bob", "bobby"), ("a", "b"), ("user1", "user2")];

        for (left, right) in pairs {
            let a = generate_fallback_activity(left, today());
            let b = generate_fallback_activity(right, today());
            assert_ne!(a, b, "{} and {} produced the same activity", left, right);
        }
    }

    #[test]
    fn test_prefix_sharing_seeds_differ() {
        assert_ne!(seed_from_username("alice"), seed_from_username("alice2"));
        assert_ne!(seed_from_username("ab"), seed_from_username("ba"));
    }

    #[test]
    fn test_fnv_reference_values() {
        assert_eq!(seed_from_username(""), 0x811c9dc5);
        assert_eq!(seed_from_username("a"), 0xe40c292c);
    }

    #[test]
    fn test_counts_stay_in_range() {
        let map = generate_fallback_activity("gennady.korotkevich", today());
        let first_day = today() - chrono::Duration::days(GRID_DAYS as i64 - 1);

        assert!(map.len() <= GRID_DAYS);
        for (date, count) in map.iter() {
            assert!(count >= 1 && count <= MAX_FALLBACK_COUNT);
            assert!(date >= first_day && date <= today());
        }
    }

    #[test]
    fn test_fallback_spreads_across_tiers() {
        let map = generate_fallback_activity("someone", today());
        let tiers: HashSet<ColorTier> = map.iter().map(|(_, c)| ColorTier::for_count(c)).collect();

        // 0..=8 reaches every tier up to VeryHigh
        assert!(tiers.contains(&ColorTier::Low));
        assert!(tiers.contains(&ColorTier::Medium));
        assert!(tiers.contains(&ColorTier::High));
        assert!(tiers.contains(&ColorTier::VeryHigh));
        assert!(map.active_days() > GRID_DAYS / 2);
    }

    #[test]
    fn test_rng_unit_interval() {
        let mut rng = SeededRng::new(42);
        for _ in 0..10_000 {
            let v = rng.next_f64();
            assert!((0.0..1.0).contains(&v));
        }
        let mut rng = SeededRng::new(7);
        assert!((0..1000).all(|_| rng.next_below(9) < 9));
    }

    #[test]
    fn test_date_changes_window() {
        let a = generate_fallback_activity("tourist", today());
        let b = generate_fallback_activity("tourist", today().succ_opt().unwrap());
        assert_ne!(a, b);
    }
}
