//! Sorted contiguous storage shared by [`Set`](crate::Set) and
//! [`Postings`](crate::Postings).
//!
//! Every slot is owned by exactly one container. Growth is reserved before an
//! item is placed, so a failed allocation leaves the vector untouched.

use crate::error::Result;
use std::cmp::Ordering;

/// Places `item` at `position`, shifting the tail right.
pub(crate) fn insert_at<T>(items: &mut Vec<T>, position: usize, item: T) -> Result<()> {
    items.try_reserve(1)?;
    items.insert(position, item);
    Ok(())
}

/// Two-pointer merge keeping every item of either side once.
pub(crate) fn merge_union<T, F>(a: &[T], b: &[T], compare: F) -> Result<Vec<T>>
where
    T: Clone,
    F: Fn(&T, &T) -> Ordering,
{
    let mut out = Vec::new();
    out.try_reserve_exact(a.len() + b.len())?;
    let (mut i, mut j) = (0usize, 0usize);
    while i < a.len() && j < b.len() {
        match compare(&a[i], &b[j]) {
            Ordering::Less => {
                out.push(a[i].clone());
                i += 1;
            }
            Ordering::Greater => {
                out.push(b[j].clone());
                j += 1;
            }
            Ordering::Equal => {
                out.push(a[i].clone());
                i += 1;
                j += 1;
            }
        }
    }
    out.extend_from_slice(&a[i..]);
    out.extend_from_slice(&b[j..]);
    Ok(out)
}

/// Two-pointer merge keeping only items present on both sides.
pub(crate) fn merge_intersection<T, F>(a: &[T], b: &[T], compare: F) -> Result<Vec<T>>
where
    T: Clone,
    F: Fn(&T, &T) -> Ordering,
{
    let mut out = Vec::new();
    out.try_reserve_exact(a.len().min(b.len()))?;
    let (mut i, mut j) = (0usize, 0usize);
    while i < a.len() && j < b.len() {
        match compare(&a[i], &b[j]) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                out.push(a[i].clone());
                i += 1;
                j += 1;
            }
        }
    }
    Ok(out)
}
