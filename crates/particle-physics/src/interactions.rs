//! Interaction matrix between particle types.
//!
//! The matrix is directed: the entry for `(a, b)` is the force a particle of
//! type `a` feels from a particle of type `b`, and need not equal `(b, a)`.
//! Positive strengths attract, negative strengths repel and missing entries
//! are neutral.

use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::particle::ParticleType;

/// Sparse, string-keyed interaction strengths.
///
/// Serializes as a nested object `{ source: { target: strength } }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InteractionMatrix {
    rows: BTreeMap<String, BTreeMap<String, f32>>,
}

impl InteractionMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Strength of the force `source` feels from `target`, 0 when absent
    pub fn get(&self, source: &str, target: &str) -> f32 {
        self.rows
            .get(source)
            .and_then(|row| row.get(target))
            .copied()
            .unwrap_or(0.0)
    }

    /// Set the force `source` feels from `target`. Values are stored as given.
    pub fn set(&mut self, source: impl Into<String>, target: impl Into<String>, strength: f32) {
        self.rows
            .entry(source.into())
            .or_default()
            .insert(target.into(), strength);
    }

    /// Number of explicit entries
    pub fn len(&self) -> usize {
        self.rows.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Random matrix over every ordered pair of `types`.
    ///
    /// Each entry is uniform in [-1, 1), halved with probability 1/2 and
    /// rounded to one decimal, so the initial rules are easy to read back.
    pub fn random<R: Rng + ?Sized>(types: &[ParticleType], rng: &mut R) -> Self {
        let mut matrix = Self::new();
        for source in types {
            for target in types {
                let scale = if rng.random::<f32>() > 0.5 { 1.0 } else { 0.5 };
                let value = (rng.random::<f32>() * 2.0 - 1.0) * scale;
                let rounded = (value * 10.0).round() / 10.0;
                matrix.set(source.id.clone(), target.id.clone(), rounded);
            }
        }
        matrix
    }
}

/// Dense lookup table built from an [`InteractionMatrix`] for one step.
///
/// Type ids are interned to indices so the O(n²) pass never hashes strings.
#[derive(Debug, Clone, Default)]
pub struct InteractionTable {
    ids: Vec<String>,
    strengths: Vec<f32>,
}

impl InteractionTable {
    /// Rebuild for the given type ids (duplicates allowed, first wins)
    pub fn rebuild<'a>(
        &mut self,
        matrix: &InteractionMatrix,
        type_ids: impl IntoIterator<Item = &'a str>,
    ) {
        self.ids.clear();
        for id in type_ids {
            if !self.ids.iter().any(|known| known == id) {
                self.ids.push(id.to_string());
            }
        }

        let n = self.ids.len();
        self.strengths.clear();
        self.strengths.reserve(n * n);
        for source in &self.ids {
            for target in &self.ids {
                self.strengths.push(matrix.get(source, target));
            }
        }
    }

    /// Index of an interned type id
    pub fn index_of(&self, type_id: &str) -> Option<usize> {
        self.ids.iter().position(|id| id == type_id)
    }

    #[inline]
    pub fn strength(&self, source: usize, target: usize) -> f32 {
        self.strengths[source * self.ids.len() + target]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::default_particle_types;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_missing_entry_is_neutral() {
        let mut m = InteractionMatrix::new();
        m.set("a", "b", 0.7);
        assert_eq!(m.get("a", "b"), 0.7);
        assert_eq!(m.get("b", "a"), 0.0);
        assert_eq!(m.get("x", "y"), 0.0);
    }

    #[test]
    fn test_values_are_not_clamped() {
        let mut m = InteractionMatrix::new();
        m.set("a", "a", 3.5);
        assert_eq!(m.get("a", "a"), 3.5);
    }

    #[test]
    fn test_random_covers_all_pairs_in_range() {
        let types = default_particle_types();
        let mut rng = StdRng::seed_from_u64(7);
        let m = InteractionMatrix::random(&types, &mut rng);
        assert_eq!(m.len(), types.len() * types.len());
        for s in &types {
            for t in &types {
                let v = m.get(&s.id, &t.id);
                assert!((-1.0..=1.0).contains(&v));
                assert!(((v * 10.0).round() - v * 10.0).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn test_table_matches_matrix() {
        let mut m = InteractionMatrix::new();
        m.set("a", "b", 1.0);
        m.set("b", "a", -0.5);

        let mut table = InteractionTable::default();
        table.rebuild(&m, ["a", "b", "a", "ghost"]);

        let a = table.index_of("a").unwrap();
        let b = table.index_of("b").unwrap();
        let ghost = table.index_of("ghost").unwrap();
        assert_eq!((a, b, ghost), (0, 1, 2));
        assert_eq!(table.strength(a, b), 1.0);
        assert_eq!(table.strength(b, a), -0.5);
        assert_eq!(table.strength(a, a), 0.0);
        assert_eq!(table.strength(ghost, a), 0.0);
    }

    #[test]
    fn test_serializes_as_nested_object() {
        let mut m = InteractionMatrix::new();
        m.set("type1", "type2", 0.5);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, r#"{"type1":{"type2":0.5}}"#);
        let back: InteractionMatrix = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
    }
}
