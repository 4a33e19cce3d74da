use std::collections::HashSet;

use smallvec::SmallVec;

use crate::{GoTermId, DEFAULT_TERMS_PER_PROTEIN};

/// A set of [`GoTermId`]s, e.g. all GO terms annotated to one protein
///
/// Each term can occur only once in the group. The ids are kept sorted,
/// so iteration order is deterministic.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GoGroup {
    ids: SmallVec<[GoTermId; DEFAULT_TERMS_PER_PROTEIN]>,
}

impl GoGroup {
    /// Constructs a new, empty [`GoGroup`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Constructs a new, empty [`GoGroup`] with the given capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ids: SmallVec::with_capacity(capacity),
        }
    }

    /// Returns `true` if the group contains no [`GoTermId`]s
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Returns the number of [`GoTermId`]s in the group
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Adds a new [`GoTermId`] to the group
    ///
    /// Returns whether the `GoTermId` was newly inserted. That is:
    ///
    /// - If the group did not previously contain this `GoTermId`, true is returned.
    /// - If the group already contained this `GoTermId`, false is returned.
    ///
    pub fn insert(&mut self, id: GoTermId) -> bool {
        match self.ids.binary_search(&id) {
            Ok(_) => false,
            Err(idx) => {
                self.ids.insert(idx, id);
                true
            }
        }
    }

    /// Returns `true` if the group contains the [`GoTermId`]
    pub fn contains(&self, id: &GoTermId) -> bool {
        self.ids.binary_search(id).is_ok()
    }

    /// Returns an Iterator of the [`GoTermId`]s inside the group
    pub fn iter(&self) -> GoTermIds {
        GoTermIds::new(self.ids.iter())
    }
}

impl From<HashSet<GoTermId>> for GoGroup {
    fn from(s: HashSet<GoTermId>) -> Self {
        s.into_iter().collect()
    }
}

impl FromIterator<GoTermId> for GoGroup {
    fn from_iter<T: IntoIterator<Item = GoTermId>>(iter: T) -> Self {
        let mut group = GoGroup::new();
        for id in iter {
            group.insert(id);
        }
        group
    }
}

impl<'a> IntoIterator for &'a GoGroup {
    type Item = GoTermId;
    type IntoIter = GoTermIds<'a>;

    fn into_iter(self) -> GoTermIds<'a> {
        GoTermIds::new(self.ids.iter())
    }
}

/// An iterator over [`GoTermId`]s
pub struct GoTermIds<'a> {
    inner: std::slice::Iter<'a, GoTermId>,
}

impl<'a> GoTermIds<'a> {
    fn new(inner: std::slice::Iter<'a, GoTermId>) -> Self {
        Self { inner }
    }
}

impl Iterator for GoTermIds<'_> {
    type Item = GoTermId;
    fn next(&mut self) -> Option<GoTermId> {
        self.inner.next().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iterate_sorted() {
        let mut group = GoGroup::new();
        group.insert(3u32.into());
        group.insert(1u32.into());
        group.insert(2u32.into());

        let ids: Vec<u32> = group.iter().map(|id| id.as_u32()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn insert_duplicate() {
        let mut group = GoGroup::new();
        assert!(group.insert(5515u32.into()));
        assert!(!group.insert(5515u32.into()));
        assert_eq!(group.len(), 1);
        assert!(group.contains(&5515u32.into()));
        assert!(!group.contains(&5516u32.into()));
    }

    #[test]
    fn collect_from_set() {
        let mut set = HashSet::new();
        set.insert(GoTermId::from(20u32));
        set.insert(GoTermId::from(10u32));
        let group = GoGroup::from(set);
        assert_eq!(group.len(), 2);
        assert_eq!(group.iter().next(), Some(GoTermId::from(10u32)));
    }

    #[test]
    fn spills_beyond_inline_capacity() {
        let group: GoGroup = (0..100u32).rev().map(GoTermId::from).collect();
        assert_eq!(group.len(), 100);
        assert!(!group.is_empty());
        assert_eq!(group.iter().last(), Some(GoTermId::from(99u32)));
    }
}
