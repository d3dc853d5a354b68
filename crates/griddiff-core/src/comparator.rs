//! Fuzzy-equality primitives and map difference computation.
//!
//! Two instantiations of the scalar comparison coexist on purpose:
//! [`fuzzy_equals`] is the raw rule used for branch terminal quantities,
//! while [`nan_fuzzy_equals`] normalizes NaN to zero first and is used for
//! voltage measurements that may be legitimately absent on one side (e.g. a
//! disconnected bus). Callers pick the rule per quantity; the comparator
//! never guesses.

use std::collections::{BTreeMap, BTreeSet};

/// True iff `|a - b| <= tolerance`.
///
/// Falls back to exact equality so that equal infinities compare equal, and
/// treats two NaNs as equal: branch flows are NaN on both sides when they
/// were never computed, and a network must compare equal to itself.
/// A NaN is never fuzzy-equal to a non-NaN value.
pub fn fuzzy_equals(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() <= tolerance || a == b || (a.is_nan() && b.is_nan())
}

/// Replace NaN with 0.0.
pub fn normalize_nan(x: f64) -> f64 {
    if x.is_nan() {
        0.0
    } else {
        x
    }
}

/// [`fuzzy_equals`] over NaN-normalized values.
pub fn nan_fuzzy_equals(a: f64, b: f64, tolerance: f64) -> bool {
    fuzzy_equals(normalize_nan(a), normalize_nan(b), tolerance)
}

/// Outcome of comparing two string-keyed maps under a pluggable value
/// equivalence.
#[derive(Debug, Clone, PartialEq)]
pub struct MapDiff<V> {
    /// Keys present in both maps whose values are unequal, with both values.
    pub differing: BTreeMap<String, (V, V)>,
    /// Keys present only in the left map.
    pub only_left: BTreeSet<String>,
    /// Keys present only in the right map.
    pub only_right: BTreeSet<String>,
}

impl<V> MapDiff<V> {
    /// True iff both maps have the same key set and equivalent values.
    pub fn are_equal(&self) -> bool {
        self.differing.is_empty() && self.only_left.is_empty() && self.only_right.is_empty()
    }

    /// Keys of the entries present in both maps with differing values.
    pub fn differing_keys(&self) -> Vec<String> {
        self.differing.keys().cloned().collect()
    }
}

/// Compare two maps entry by entry under `eq`.
pub fn map_difference<V: Clone>(
    left: &BTreeMap<String, V>,
    right: &BTreeMap<String, V>,
    eq: impl Fn(&V, &V) -> bool,
) -> MapDiff<V> {
    let mut differing = BTreeMap::new();
    let mut only_left = BTreeSet::new();
    for (key, lv) in left {
        match right.get(key) {
            Some(rv) if eq(lv, rv) => {}
            Some(rv) => {
                differing.insert(key.clone(), (lv.clone(), rv.clone()));
            }
            None => {
                only_left.insert(key.clone());
            }
        }
    }
    let only_right = right
        .keys()
        .filter(|k| !left.contains_key(*k))
        .cloned()
        .collect();
    MapDiff {
        differing,
        only_left,
        only_right,
    }
}
