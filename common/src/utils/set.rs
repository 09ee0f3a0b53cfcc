//! Reconciling collections of identifiers

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::hash::Hash;

/// Something which can answer if it contains an element.
pub trait Contains<T: ?Sized> {
    fn contains_element(&self, element: &T) -> bool;
}

impl<T: Eq + Hash, S: std::hash::BuildHasher> Contains<T> for HashSet<T, S> {
    fn contains_element(&self, element: &T) -> bool {
        self.contains(element)
    }
}

impl<T: Ord> Contains<T> for BTreeSet<T> {
    fn contains_element(&self, element: &T) -> bool {
        self.contains(element)
    }
}

impl<K: Eq + Hash, V, S: std::hash::BuildHasher> Contains<K> for HashMap<K, V, S> {
    fn contains_element(&self, element: &K) -> bool {
        self.contains_key(element)
    }
}

impl<K: Ord, V> Contains<K> for BTreeMap<K, V> {
    fn contains_element(&self, element: &K) -> bool {
        self.contains_key(element)
    }
}

/// Check if `candidate` contains all elements of `reference`.
///
/// An empty reference is contained in everything.
pub fn contains_all<'a, T, C>(reference: impl IntoIterator<Item = &'a T>, candidate: &C) -> bool
where
    T: 'a + ?Sized,
    C: Contains<T> + ?Sized,
{
    reference
        .into_iter()
        .all(|element| candidate.contains_element(element))
}

/// Compare two sequences, ignoring order and duplicates.
///
/// Returns the elements of `a` missing in `b`, and the elements of `b` missing in `a`. Each side
/// keeps the order of the first occurrence.
pub fn symmetric_difference<T>(
    a: impl IntoIterator<Item = T>,
    b: impl IntoIterator<Item = T>,
) -> (Vec<T>, Vec<T>)
where
    T: Eq + Hash + Clone,
{
    let a = dedup(a);
    let b = dedup(b);

    let lookup_a = a.iter().collect::<HashSet<_>>();
    let lookup_b = b.iter().collect::<HashSet<_>>();

    let only_a = a
        .iter()
        .filter(|element| !lookup_b.contains(element))
        .cloned()
        .collect();
    let only_b = b
        .iter()
        .filter(|element| !lookup_a.contains(element))
        .cloned()
        .collect();

    (only_a, only_b)
}

fn dedup<T: Eq + Hash + Clone>(items: impl IntoIterator<Item = T>) -> Vec<T> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}
