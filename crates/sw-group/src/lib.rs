#![forbid(unsafe_code)]

//! Key-based grouping over finite in-memory sequences.
//!
//! Two grouping policies share one `Group` surface:
//! - `group_by`: global buckets, one group per distinct comparison key,
//!   emitted in first-occurrence order.
//! - `partition_by`: adjacency-sensitive runs, a new group every time the
//!   comparison key changes between neighbouring elements.
//!
//! Equality between keys is decided on a *normalized* form supplied by the
//! caller; the key a group exposes is always the raw key of the element that
//! opened it.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

/// A bucket of elements sharing one key equivalence class.
///
/// Member order equals source order restricted to this group's elements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group<K, T> {
    key: K,
    members: Vec<T>,
}

impl<K, T> Group<K, T> {
    fn open(key: K, first: T) -> Self {
        Self {
            key,
            members: vec![first],
        }
    }

    /// The raw (non-normalized) key of the element that opened this group.
    #[must_use]
    pub fn key(&self) -> &K {
        &self.key
    }

    #[must_use]
    pub fn members(&self) -> &[T] {
        &self.members
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[must_use]
    pub fn into_members(self) -> Vec<T> {
        self.members
    }

    #[must_use]
    pub fn into_pair(self) -> (K, Vec<T>) {
        (self.key, self.members)
    }
}

impl<K, T> IntoIterator for Group<K, T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.into_iter()
    }
}

impl<'a, K, T> IntoIterator for &'a Group<K, T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

// ---------------------------------------------------------------------------
// Global grouping
// ---------------------------------------------------------------------------

/// Bucket a source globally by key, with full control over normalization and
/// member projection.
///
/// One pass over the source. A bucket table keyed by the normalized form maps
/// into a group vector whose positions record first-occurrence rank, so
/// emission order is the order in which distinct comparison keys were first
/// seen. The exposed key is the raw key from the element that opened the
/// bucket; the normalized form is used only for comparison.
pub fn group_by_full<S, T, K, C, U, FK, FN, FE>(
    source: S,
    mut key_selector: FK,
    mut normalizer: FN,
    mut element_selector: FE,
) -> Vec<Group<K, U>>
where
    S: IntoIterator<Item = T>,
    FK: FnMut(&T) -> K,
    FN: FnMut(&K) -> C,
    C: Hash + Eq,
    FE: FnMut(T) -> U,
{
    let mut groups: Vec<Group<K, U>> = Vec::new();
    let mut slots: HashMap<C, usize> = HashMap::new();

    for element in source {
        let key = key_selector(&element);
        let comparison = normalizer(&key);
        match slots.entry(comparison) {
            Entry::Occupied(slot) => {
                groups[*slot.get()].members.push(element_selector(element));
            }
            Entry::Vacant(slot) => {
                slot.insert(groups.len());
                groups.push(Group::open(key, element_selector(element)));
            }
        }
    }

    groups
}

/// Bucket a source globally by key, comparing raw keys directly.
pub fn group_by<S, T, K, FK>(source: S, key_selector: FK) -> Vec<Group<K, T>>
where
    S: IntoIterator<Item = T>,
    FK: FnMut(&T) -> K,
    K: Hash + Eq + Clone,
{
    group_by_full(source, key_selector, K::clone, |element| element)
}

/// Bucket a source globally, comparing keys through `normalizer`.
///
/// Use when the raw key's own equality is unsuitable for bucketing (for
/// example distinct instances denoting the same calendar value).
pub fn group_by_normalized<S, T, K, C, FK, FN>(
    source: S,
    key_selector: FK,
    normalizer: FN,
) -> Vec<Group<K, T>>
where
    S: IntoIterator<Item = T>,
    FK: FnMut(&T) -> K,
    FN: FnMut(&K) -> C,
    C: Hash + Eq,
{
    group_by_full(source, key_selector, normalizer, |element| element)
}

/// Bucket globally, projecting each member through `element_selector` before
/// storage.
pub fn group_by_map<S, T, K, U, FK, FE>(
    source: S,
    key_selector: FK,
    element_selector: FE,
) -> Vec<Group<K, U>>
where
    S: IntoIterator<Item = T>,
    FK: FnMut(&T) -> K,
    K: Hash + Eq + Clone,
    FE: FnMut(T) -> U,
{
    group_by_full(source, key_selector, K::clone, element_selector)
}

/// Bucket globally and map each finished group through `result_selector`.
pub fn group_by_select<S, T, K, R, FK, FR>(
    source: S,
    key_selector: FK,
    mut result_selector: FR,
) -> Vec<R>
where
    S: IntoIterator<Item = T>,
    FK: FnMut(&T) -> K,
    K: Hash + Eq + Clone,
    FR: FnMut(&K, &[T]) -> R,
{
    group_by(source, key_selector)
        .iter()
        .map(|group| result_selector(&group.key, &group.members))
        .collect()
}

// ---------------------------------------------------------------------------
// Run partitioning
// ---------------------------------------------------------------------------

/// Split a source into maximal contiguous equal-key runs, with full control
/// over normalization and member projection.
///
/// Unlike `group_by_full`, only the current run's comparison key is retained,
/// so the normalized form needs `PartialEq` but no hashing, and the same raw
/// key may open several non-adjacent runs. Concatenating all runs in emission
/// order reproduces the source exactly.
pub fn partition_by_full<S, T, K, C, U, FK, FN, FE>(
    source: S,
    mut key_selector: FK,
    mut normalizer: FN,
    mut element_selector: FE,
) -> Vec<Group<K, U>>
where
    S: IntoIterator<Item = T>,
    FK: FnMut(&T) -> K,
    FN: FnMut(&K) -> C,
    C: PartialEq,
    FE: FnMut(T) -> U,
{
    let mut runs: Vec<Group<K, U>> = Vec::new();
    let mut current: Option<C> = None;

    for element in source {
        let key = key_selector(&element);
        let comparison = normalizer(&key);
        if current.as_ref() == Some(&comparison) {
            runs.last_mut()
                .expect("a run is open whenever a current key is held")
                .members
                .push(element_selector(element));
        } else {
            current = Some(comparison);
            runs.push(Group::open(key, element_selector(element)));
        }
    }

    runs
}

/// Split a source into runs of adjacent elements with equal raw keys.
pub fn partition_by<S, T, K, FK>(source: S, key_selector: FK) -> Vec<Group<K, T>>
where
    S: IntoIterator<Item = T>,
    FK: FnMut(&T) -> K,
    K: PartialEq + Clone,
{
    partition_by_full(source, key_selector, K::clone, |element| element)
}

/// Split into runs, comparing keys through `normalizer`.
pub fn partition_by_normalized<S, T, K, C, FK, FN>(
    source: S,
    key_selector: FK,
    normalizer: FN,
) -> Vec<Group<K, T>>
where
    S: IntoIterator<Item = T>,
    FK: FnMut(&T) -> K,
    FN: FnMut(&K) -> C,
    C: PartialEq,
{
    partition_by_full(source, key_selector, normalizer, |element| element)
}

/// Split into runs, projecting each member through `element_selector`.
pub fn partition_by_map<S, T, K, U, FK, FE>(
    source: S,
    key_selector: FK,
    element_selector: FE,
) -> Vec<Group<K, U>>
where
    S: IntoIterator<Item = T>,
    FK: FnMut(&T) -> K,
    K: PartialEq + Clone,
    FE: FnMut(T) -> U,
{
    partition_by_full(source, key_selector, K::clone, element_selector)
}

/// Split into runs and map each finished run through `result_selector`.
pub fn partition_by_select<S, T, K, R, FK, FR>(
    source: S,
    key_selector: FK,
    mut result_selector: FR,
) -> Vec<R>
where
    S: IntoIterator<Item = T>,
    FK: FnMut(&T) -> K,
    K: PartialEq + Clone,
    FR: FnMut(&K, &[T]) -> R,
{
    partition_by(source, key_selector)
        .iter()
        .map(|run| result_selector(&run.key, &run.members))
        .collect()
}
