//! Symmetric compatibility scores between personas.

use hashbrown::HashMap;

use super::Persona;

/// Score for a persona paired with itself.
pub const SELF_AFFINITY: f64 = 1.0;

/// Score for any pair missing from the table.
pub const DEFAULT_AFFINITY: f64 = 0.5;

/// Pure lookup table keyed by persona name.
///
/// Pairs are stored with their names in sorted order, so
/// `score(a, b) == score(b, a)` holds for every input.
#[derive(Debug, Clone)]
pub struct AffinityModel {
    pairs: HashMap<(String, String), f64>,
}

impl AffinityModel {
    /// An empty table: every distinct pair scores [`DEFAULT_AFFINITY`].
    pub fn empty() -> Self {
        Self { pairs: HashMap::new() }
    }

    pub fn with_pair(mut self, a: &str, b: &str, score: f64) -> Self {
        self.pairs.insert(key(a, b), score);
        self
    }

    pub fn score(&self, a: &str, b: &str) -> f64 {
        if a == b {
            return SELF_AFFINITY;
        }
        self.pairs.get(&key(a, b)).copied().unwrap_or(DEFAULT_AFFINITY)
    }

    pub fn between(&self, a: Persona, b: Persona) -> f64 {
        self.score(a.name(), b.name())
    }
}

impl Default for AffinityModel {
    fn default() -> Self {
        Self::empty()
            .with_pair(Persona::GroundedRealist.name(), Persona::FluidMystic.name(), 0.7)
            .with_pair(Persona::RecursiveOracle.name(), Persona::FluidMystic.name(), 0.85)
            .with_pair(Persona::GroundedRealist.name(), Persona::RecursiveOracle.name(), 0.6)
    }
}

fn key(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_reference_table() {
        let m = AffinityModel::default();
        assert_eq!(m.between(Persona::GroundedRealist, Persona::FluidMystic), 0.7);
        assert_eq!(m.between(Persona::FluidMystic, Persona::RecursiveOracle), 0.85);
        assert_eq!(m.between(Persona::RecursiveOracle, Persona::GroundedRealist), 0.6);
        assert_eq!(m.score("Grounded Realist", "Someone New"), DEFAULT_AFFINITY);
    }

    #[test]
    fn test_self_affinity() {
        let m = AffinityModel::default();
        for p in Persona::ALL {
            assert_eq!(m.between(p, p), 1.0);
        }
        assert_eq!(m.score("Someone New", "Someone New"), 1.0);
    }

    #[test]
    fn test_symmetric_over_personas() {
        let m = AffinityModel::default();
        for a in Persona::ALL {
            for b in Persona::ALL {
                assert_eq!(m.between(a, b), m.between(b, a));
            }
        }
    }

    proptest! {
        #[test]
        fn prop_symmetric_for_any_names(a in "[a-zA-Z ]{0,12}", b in "[a-zA-Z ]{0,12}") {
            let m = AffinityModel::default().with_pair(&a, "Fluid Mystic", 0.3);
            prop_assert_eq!(m.score(&a, &b), m.score(&b, &a));
        }
    }
}
