//! In-memory boolean retrieval: an inverted index from tokens to the files
//! containing them, and AND/OR queries answered by sorted set algebra.

pub mod corpus;
pub mod error;
pub mod index;
pub mod postings;
pub mod query;
pub mod set;
mod sorted;
pub mod tokenizer;

pub use corpus::{load_corpus, load_reader};
pub use error::{IndexError, Result};
pub use index::{bucket_for, BucketStats, InvertedIndex, PutOutcome, TokenMatch, BUCKET_COUNT};
pub use postings::{compare_records, Postings, Record};
pub use query::{BooleanQuery, Command, Operator, ParseCommandError};
pub use set::{Comparator, Set};
