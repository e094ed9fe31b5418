use crate::error::{IndexError, Result};
use crate::postings::{Postings, Record};
use crate::set::Set;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;

/// Buckets 0..25 hold tokens starting with a letter, 26..35 those starting with a digit.
pub const BUCKET_COUNT: usize = 36;

/// Bucket for `token`, chosen by its first byte. `None` means the token is not indexable.
pub fn bucket_for(token: &str) -> Option<usize> {
    let first = *token.as_bytes().first()?;
    match first {
        b'a'..=b'z' => Some(usize::from(first - b'a')),
        b'A'..=b'Z' => Some(usize::from(first - b'A')),
        b'0'..=b'9' => Some(26 + usize::from(first - b'0')),
        _ => None,
    }
}

/// The leading character a bucket is keyed by, lowercase for letters.
pub fn bucket_label(bucket: usize) -> Option<char> {
    match bucket {
        0..=25 => Some(char::from(b'a' + bucket as u8)),
        26..=35 => Some(char::from(b'0' + (bucket - 26) as u8)),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PutOutcome {
    Indexed { hits: u32 },
    /// The token does not start with an ASCII letter or digit and was skipped.
    Unindexable,
}

/// How a single token resolved against the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenMatch {
    Unindexable,
    NotFound,
    Found(Set<Arc<str>>),
}

impl TokenMatch {
    /// Filenames for the token; empty for both unindexable and unknown tokens.
    pub fn into_set(self) -> Set<Arc<str>> {
        match self {
            TokenMatch::Found(set) => set,
            TokenMatch::Unindexable | TokenMatch::NotFound => Set::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BucketStats {
    pub bucket: usize,
    pub label: char,
    pub records: usize,
    pub tokens: usize,
    pub hits: u64,
}

/// Token -> filenames index, partitioned into [`BUCKET_COUNT`] lazily created buckets.
///
/// Filenames are interned once per index and shared with every query result.
#[derive(Debug)]
pub struct InvertedIndex {
    buckets: [Option<Postings>; BUCKET_COUNT],
    filenames: HashSet<Arc<str>>,
}

impl Default for InvertedIndex {
    fn default() -> Self {
        Self { buckets: std::array::from_fn(|_| None), filenames: HashSet::new() }
    }
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one occurrence of `token` in `filename`.
    pub fn put(&mut self, token: &str, filename: &str) -> Result<PutOutcome> {
        self.put_with(token, filename, Postings::insert)
    }

    /// A new filename is only registered once its record is in place, so a
    /// failed insert leaves the document count untouched.
    fn put_with<F>(&mut self, token: &str, filename: &str, insert: F) -> Result<PutOutcome>
    where
        F: FnOnce(&mut Postings, &str, &Arc<str>) -> Result<u32>,
    {
        let Some(bucket) = bucket_for(token) else {
            return Ok(PutOutcome::Unindexable);
        };
        let (name, is_new) = match self.filenames.get(filename) {
            Some(existing) => (Arc::clone(existing), false),
            None => {
                self.filenames.try_reserve(1)?;
                (Arc::from(filename), true)
            }
        };
        let postings = self.buckets[bucket].get_or_insert_with(Postings::new);
        let hits = insert(postings, token, &name)?;
        if is_new {
            self.filenames.insert(name);
        }
        Ok(PutOutcome::Indexed { hits })
    }

    /// Filenames containing `token`, in ascending order.
    ///
    /// Unindexable and unknown tokens both give an empty set; use
    /// [`InvertedIndex::resolve`] to tell them apart.
    pub fn query(&self, token: &str) -> Result<Set<Arc<str>>> {
        self.resolve(token).map(TokenMatch::into_set)
    }

    pub fn resolve(&self, token: &str) -> Result<TokenMatch> {
        if token.is_empty() {
            return Err(IndexError::EmptyToken);
        }
        let Some(bucket) = bucket_for(token) else {
            return Ok(TokenMatch::Unindexable);
        };
        let Some(postings) = &self.buckets[bucket] else {
            return Ok(TokenMatch::NotFound);
        };

        // Tokens sharing a first character share the bucket.
        let mut result = Set::new();
        for record in postings.records_for(token) {
            if record.token != token {
                continue;
            }
            result.add(Arc::clone(&record.filename))?;
        }
        if result.is_empty() {
            Ok(TokenMatch::NotFound)
        } else {
            Ok(TokenMatch::Found(result))
        }
    }

    pub fn hits(&self, token: &str, filename: &str) -> u32 {
        bucket_for(token)
            .and_then(|b| self.buckets[b].as_ref())
            .map_or(0, |p| p.hits(token, filename))
    }

    pub fn bucket(&self, bucket: usize) -> Option<&Postings> {
        self.buckets.get(bucket)?.as_ref()
    }

    /// Every record, bucket by bucket.
    pub fn records(&self) -> impl Iterator<Item = &Record> + '_ {
        self.buckets.iter().flatten().flat_map(|p| p.iter())
    }

    pub fn record_count(&self) -> usize {
        self.buckets.iter().flatten().map(Postings::len).sum()
    }

    /// Distinct filenames seen by [`InvertedIndex::put`].
    pub fn document_count(&self) -> usize {
        self.filenames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().flatten().all(Postings::is_empty)
    }

    /// Per-bucket summary for every bucket that has been created.
    pub fn bucket_stats(&self) -> Vec<BucketStats> {
        self.buckets
            .iter()
            .enumerate()
            .filter_map(|(bucket, postings)| {
                let postings = postings.as_ref()?;
                Some(BucketStats {
                    bucket,
                    label: bucket_label(bucket)?,
                    records: postings.len(),
                    tokens: postings.token_count(),
                    hits: postings.total_hits(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(set: &Set<Arc<str>>) -> Vec<&str> {
        set.iter().map(|s| &**s).collect()
    }

    #[test]
    fn bucket_hashing() {
        assert_eq!(bucket_for("apple"), Some(0));
        assert_eq!(bucket_for("Apple"), Some(0));
        assert_eq!(bucket_for("zebra"), Some(25));
        assert_eq!(bucket_for("0day"), Some(26));
        assert_eq!(bucket_for("9lives"), Some(35));
        assert_eq!(bucket_for("_x"), None);
        assert_eq!(bucket_for("-1"), None);
        assert_eq!(bucket_for("éclair"), None);
        assert_eq!(bucket_for(""), None);
        assert_eq!(bucket_label(0), Some('a'));
        assert_eq!(bucket_label(35), Some('9'));
        assert_eq!(bucket_label(36), None);
    }

    #[test]
    fn put_and_query() {
        let mut index = InvertedIndex::new();
        index.put("apple", "doc2.txt").unwrap();
        index.put("apple", "doc1.txt").unwrap();
        let result = index.query("apple").unwrap();
        assert_eq!(names(&result), vec!["doc1.txt", "doc2.txt"]);
    }

    #[test]
    fn buckets_are_created_lazily() {
        let mut index = InvertedIndex::new();
        assert!(index.bucket(0).is_none());
        index.put("apple", "a").unwrap();
        assert!(index.bucket(0).is_some());
        assert!(index.bucket(1).is_none());
        assert!(index.bucket(BUCKET_COUNT).is_none());
    }

    #[test]
    fn colliding_tokens_stay_isolated() {
        let mut index = InvertedIndex::new();
        index.put("apple", "fruit.txt").unwrap();
        index.put("ant", "bugs.txt").unwrap();
        index.put("Apple", "company.txt").unwrap();
        assert_eq!(names(&index.query("apple").unwrap()), vec!["fruit.txt"]);
        assert_eq!(names(&index.query("ant").unwrap()), vec!["bugs.txt"]);
        assert_eq!(names(&index.query("Apple").unwrap()), vec!["company.txt"]);
        assert_eq!(index.bucket(0).map(Postings::len), Some(3));
    }

    #[test]
    fn repeated_put_counts_hits() {
        let mut index = InvertedIndex::new();
        assert_eq!(index.put("apple", "doc1.txt").unwrap(), PutOutcome::Indexed { hits: 1 });
        assert_eq!(index.put("apple", "doc1.txt").unwrap(), PutOutcome::Indexed { hits: 2 });
        assert_eq!(index.hits("apple", "doc1.txt"), 2);
        assert_eq!(index.query("apple").unwrap().len(), 1);
        assert_eq!(index.record_count(), 1);
    }

    #[test]
    fn unindexable_tokens_are_ignored() {
        let mut index = InvertedIndex::new();
        assert_eq!(index.put("#tag", "doc1.txt").unwrap(), PutOutcome::Unindexable);
        assert!(index.is_empty());
        assert_eq!(index.document_count(), 0);
        assert_eq!(index.resolve("#tag").unwrap(), TokenMatch::Unindexable);
        assert!(index.query("#tag").unwrap().is_empty());
    }

    #[test]
    fn unknown_token_is_not_found() {
        let mut index = InvertedIndex::new();
        index.put("apple", "doc1.txt").unwrap();
        assert_eq!(index.resolve("avocado").unwrap(), TokenMatch::NotFound);
        assert_eq!(index.resolve("kiwi").unwrap(), TokenMatch::NotFound);
        assert!(index.query("kiwi").unwrap().is_empty());
    }

    #[test]
    fn empty_token_is_an_error() {
        let index = InvertedIndex::new();
        assert!(matches!(index.query(""), Err(IndexError::EmptyToken)));
    }

    #[test]
    fn filenames_are_interned() {
        let mut index = InvertedIndex::new();
        index.put("apple", "doc1.txt").unwrap();
        index.put("banana", "doc1.txt").unwrap();
        assert_eq!(index.document_count(), 1);
        let a = index.query("apple").unwrap().into_vec();
        let b = index.query("banana").unwrap().into_vec();
        assert!(Arc::ptr_eq(&a[0], &b[0]));
    }

    #[test]
    fn failed_insert_does_not_register_filename() {
        let mut index = InvertedIndex::new();
        index.put("apple", "doc1.txt").unwrap();
        let failing = |_: &mut Postings, _: &str, _: &Arc<str>| -> Result<u32> {
            let mut huge: Vec<u64> = Vec::new();
            Err(huge.try_reserve(usize::MAX).unwrap_err().into())
        };
        let err = index.put_with("banana", "doc2.txt", failing).unwrap_err();
        assert!(matches!(err, IndexError::Allocation(_)));
        assert_eq!(index.document_count(), 1);
        assert!(index.bucket(1).is_some_and(Postings::is_empty));
        assert!(index.query("banana").unwrap().is_empty());

        index.put("banana", "doc2.txt").unwrap();
        assert_eq!(index.document_count(), 2);
    }

    #[test]
    fn query_results_outlive_the_index() {
        let mut index = InvertedIndex::new();
        index.put("apple", "doc1.txt").unwrap();
        let result = index.query("apple").unwrap();
        drop(index);
        assert_eq!(names(&result), vec!["doc1.txt"]);
    }

    #[test]
    fn stats_cover_created_buckets() {
        let mut index = InvertedIndex::new();
        index.put("apple", "a").unwrap();
        index.put("apple", "a").unwrap();
        index.put("ant", "b").unwrap();
        index.put("42", "c").unwrap();
        let stats = index.bucket_stats();
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].label, 'a');
        assert_eq!(stats[0].records, 2);
        assert_eq!(stats[0].tokens, 2);
        assert_eq!(stats[0].hits, 3);
        assert_eq!(stats[1].bucket, 30);
        assert_eq!(index.records().count(), 3);
    }
}
