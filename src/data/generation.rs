//! Generation to identifier-range lookup
//!
//! Fixed table mapping each creature generation to its inclusive identifier
//! range in the remote service. Round creation picks one generation uniformly
//! from the configured filter, then one identifier uniformly within it.

use rand::Rng;
use std::collections::BTreeSet;

/// Inclusive identifier ranges, indexed by generation - 1
pub const GENERATION_RANGES: [(u32, u32); 9] = [
    (1, 151),
    (152, 251),
    (252, 386),
    (387, 493),
    (494, 649),
    (650, 721),
    (722, 809),
    (810, 905),
    (906, 1025),
];

/// Highest recognized generation
pub const MAX_GENERATION: u8 = GENERATION_RANGES.len() as u8;

/// Inclusive identifier range for one generation, if it is recognized
pub fn id_range(generation: u8) -> Option<(u32, u32)> {
    if (1..=MAX_GENERATION).contains(&generation) {
        Some(GENERATION_RANGES[generation as usize - 1])
    } else {
        None
    }
}

/// Pick a creature identifier for a new round.
///
/// One generation is drawn uniformly from the filter, then one identifier
/// uniformly within its range. Unrecognized generations are dropped; an
/// empty (or effectively empty) filter falls back to generation 1.
pub fn random_creature_id(filter: &BTreeSet<u8>, rng: &mut impl Rng) -> u32 {
    let valid: Vec<u8> = filter
        .iter()
        .copied()
        .filter(|g| (1..=MAX_GENERATION).contains(g))
        .collect();
    if valid.len() != filter.len() {
        tracing::warn!(
            dropped = filter.len() - valid.len(),
            "ignoring unrecognized generations in filter"
        );
    }

    let (min, max) = if valid.is_empty() {
        GENERATION_RANGES[0]
    } else {
        let generation = valid[rng.gen_range(0..valid.len())];
        GENERATION_RANGES[generation as usize - 1]
    };
    rng.gen_range(min..=max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn ranges_are_contiguous_and_ascending() {
        for window in GENERATION_RANGES.windows(2) {
            assert_eq!(window[0].1 + 1, window[1].0);
            assert!(window[0].0 <= window[0].1);
        }
    }

    #[test]
    fn id_range_rejects_out_of_bounds() {
        assert_eq!(id_range(1), Some((1, 151)));
        assert_eq!(id_range(9), Some((906, 1025)));
        assert_eq!(id_range(0), None);
        assert_eq!(id_range(10), None);
    }

    #[test]
    fn empty_filter_falls_back_to_generation_one() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let id = random_creature_id(&BTreeSet::new(), &mut rng);
            assert!((1..=151).contains(&id));
        }
    }

    #[test]
    fn filter_with_only_invalid_entries_falls_back() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        let filter: BTreeSet<u8> = [0, 12, 200].into_iter().collect();
        for _ in 0..100 {
            let id = random_creature_id(&filter, &mut rng);
            assert!((1..=151).contains(&id));
        }
    }

    #[test]
    fn picked_ids_stay_within_filtered_generations() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        let filter: BTreeSet<u8> = [2, 4].into_iter().collect();
        for _ in 0..200 {
            let id = random_creature_id(&filter, &mut rng);
            assert!(
                (152..=251).contains(&id) || (387..=493).contains(&id),
                "id {} outside generations 2 and 4",
                id
            );
        }
    }
}
