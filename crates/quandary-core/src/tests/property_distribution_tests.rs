use std::collections::HashMap;

use proptest::prelude::*;

use crate::Distribution;

proptest! {
    #[test]
    fn merged_mass_matches_per_key_totals(
        entries in proptest::collection::vec((0u8..6u8, 0.0f64..1.0), 1..64)
    ) {
        let dist: Distribution<u8> = entries.iter().copied().collect();
        let mut expected: HashMap<u8, f64> = HashMap::new();
        for (key, p) in &entries {
            *expected.entry(*key).or_insert(0.0) += p;
        }

        prop_assert_eq!(dist.len(), expected.len());
        for (key, mass) in expected {
            prop_assert!((dist.probability_of(&key) - mass).abs() < 1e-9);
        }

        let total: f64 = entries.iter().map(|(_, p)| p).sum();
        prop_assert!((dist.total() - total).abs() < 1e-9);
    }
}
