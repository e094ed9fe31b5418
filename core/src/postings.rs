use crate::error::Result;
use crate::sorted;
use serde::Serialize;
use std::cmp::Ordering;
use std::sync::Arc;

/// One (token, filename) occurrence count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub token: String,
    pub filename: Arc<str>,
    pub hits: u32,
}

impl Record {
    fn key_cmp(&self, token: &str, filename: &str) -> Ordering {
        self.token
            .as_str()
            .cmp(token)
            .then_with(|| (*self.filename).cmp(filename))
    }
}

/// Orders records by token, then filename. Byte-wise and case-sensitive.
pub fn compare_records(a: &Record, b: &Record) -> Ordering {
    a.key_cmp(&b.token, &b.filename)
}

/// Records sorted by [`compare_records`], at most one per (token, filename).
#[derive(Debug, Clone, Default)]
pub struct Postings {
    records: Vec<Record>,
}

impl Postings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one more occurrence of `token` in `filename`.
    ///
    /// A repeated pair bumps the existing record's hit count; a new pair is
    /// placed before the first greater record. Returns the hit count after
    /// the call.
    pub fn insert(&mut self, token: &str, filename: &Arc<str>) -> Result<u32> {
        match self.records.binary_search_by(|r| r.key_cmp(token, filename)) {
            Ok(found) => {
                let record = &mut self.records[found];
                record.hits = record.hits.saturating_add(1);
                Ok(record.hits)
            }
            Err(position) => {
                let record = Record { token: token.to_owned(), filename: Arc::clone(filename), hits: 1 };
                sorted::insert_at(&mut self.records, position, record)?;
                Ok(1)
            }
        }
    }

    /// The contiguous run of records whose token equals `token`, in filename order.
    pub fn records_for(&self, token: &str) -> &[Record] {
        let start = self.records.partition_point(|r| r.token.as_str() < token);
        let len = self.records[start..].partition_point(|r| r.token == token);
        &self.records[start..start + len]
    }

    pub fn get(&self, token: &str, filename: &str) -> Option<&Record> {
        self.records
            .binary_search_by(|r| r.key_cmp(token, filename))
            .ok()
            .map(|i| &self.records[i])
    }

    /// Occurrences of `token` in `filename`; zero if never seen.
    pub fn hits(&self, token: &str, filename: &str) -> u32 {
        self.get(token, filename).map_or(0, |r| r.hits)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of distinct tokens held.
    pub fn token_count(&self) -> usize {
        self.records
            .windows(2)
            .filter(|pair| pair[0].token != pair[1].token)
            .count()
            + usize::from(!self.records.is_empty())
    }

    pub fn total_hits(&self) -> u64 {
        self.records.iter().map(|r| u64::from(r.hits)).sum()
    }
}

impl<'a> IntoIterator for &'a Postings {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
