use crate::error::Result;
use crate::sorted;
use std::cmp::Ordering;
use std::fmt;

/// Total order used to keep a [`Set`] sorted.
pub type Comparator<T> = fn(&T, &T) -> Ordering;

/// An ordered collection of unique items.
///
/// Items are kept in strictly increasing order under the set's comparator and
/// an item equal to one already present is never stored twice. Combining two
/// sets assumes both were built with the same comparator; the left operand's
/// comparator is used for the result.
#[derive(Clone)]
pub struct Set<T> {
    items: Vec<T>,
    compare: Comparator<T>,
}

impl<T: Ord> Set<T> {
    pub fn new() -> Self {
        Self::with_comparator(T::cmp)
    }
}

impl<T: Ord> Default for Set<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Set<T> {
    pub fn with_comparator(compare: Comparator<T>) -> Self {
        Self { items: Vec::new(), compare }
    }

    pub fn comparator(&self) -> Comparator<T> {
        self.compare
    }

    /// Adds `item` in sorted position.
    ///
    /// Returns `Ok(false)` without storing anything if an equal item is already
    /// present; that is still a successful add.
    pub fn add(&mut self, item: T) -> Result<bool> {
        match self.locate(&item) {
            Ok(_) => Ok(false),
            Err(position) => {
                sorted::insert_at(&mut self.items, position, item)?;
                Ok(true)
            }
        }
    }

    pub fn contains(&self, item: &T) -> bool {
        self.locate(item).is_ok()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Walks the items from smallest to largest.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }

    fn locate(&self, item: &T) -> std::result::Result<usize, usize> {
        let compare = self.compare;
        self.items.binary_search_by(|probe| compare(probe, item))
    }
}

impl<T: Clone> Set<T> {
    /// A new set with the same comparator and items, backed by its own storage.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Every item found in `self` or `other`.
    pub fn union(&self, other: &Set<T>) -> Result<Set<T>> {
        let items = sorted::merge_union(&self.items, &other.items, self.compare)?;
        Ok(Self { items, compare: self.compare })
    }

    /// Items found in both `self` and `other`.
    ///
    /// If either operand is empty the result is a copy of the other operand,
    /// so intersecting with nothing yields everything. Use [`Set::meet`] for
    /// the plain set intersection.
    pub fn intersection(&self, other: &Set<T>) -> Result<Set<T>> {
        if self.is_empty() {
            return Ok(other.copy());
        }
        if other.is_empty() {
            return Ok(self.copy());
        }
        self.meet(other)
    }

    /// Plain set intersection: an empty operand yields an empty result.
    pub fn meet(&self, other: &Set<T>) -> Result<Set<T>> {
        let items = sorted::merge_intersection(&self.items, &other.items, self.compare)?;
        Ok(Self { items, compare: self.compare })
    }
}

impl<T: fmt::Debug> fmt::Debug for Set<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.items.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for Set<T> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<T: Eq> Eq for Set<T> {}

impl<T> IntoIterator for Set<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Set<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
