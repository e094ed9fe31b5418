use crate::error::Result;
use crate::index::{InvertedIndex, TokenMatch};
use crate::set::Set;
use crate::tokenizer::{normalize_query, tokenize};
use serde::Serialize;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    And,
    Or,
}

impl Operator {
    /// The command word selecting this operator.
    pub fn keyword(self) -> &'static str {
        match self {
            Operator::And => "sa",
            Operator::Or => "so",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BooleanQuery {
    pub operator: Operator,
    pub terms: Vec<String>,
}

impl BooleanQuery {
    pub fn new<I, S>(operator: Operator, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { operator, terms: terms.into_iter().map(Into::into).collect() }
    }

    pub fn and<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Operator::And, terms)
    }

    pub fn or<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Operator::Or, terms)
    }

    /// Folds the per-term results into one sorted set of filenames.
    ///
    /// OR starts from the empty set and unions each term in. AND starts from
    /// the first term's result and intersects the rest, so a query with no
    /// terms, or with any term that has no hits, yields nothing. AND folds with
    /// [`Set::meet`] on purpose, not [`Set::intersection`], whose empty-operand
    /// rule would let a missing term pass the other terms' files through.
    pub fn evaluate(&self, index: &InvertedIndex) -> Result<Set<Arc<str>>> {
        let mut terms = self.terms.iter();
        let mut acc = match self.operator {
            Operator::Or => Set::new(),
            Operator::And => match terms.next() {
                Some(first) => lookup(index, first)?,
                None => return Ok(Set::new()),
            },
        };
        for term in terms {
            let hits = lookup(index, term)?;
            acc = match self.operator {
                Operator::Or => acc.union(&hits)?,
                Operator::And => acc.meet(&hits)?,
            };
            tracing::debug!(term = term.as_str(), size = acc.len(), "folded");
        }
        Ok(acc)
    }
}

fn lookup(index: &InvertedIndex, term: &str) -> Result<Set<Arc<str>>> {
    let found = index.resolve(term)?;
    match &found {
        TokenMatch::Unindexable => tracing::debug!(term, "term is not indexable"),
        TokenMatch::NotFound => tracing::debug!(term, "term not in index"),
        TokenMatch::Found(set) => tracing::debug!(term, hits = set.len(), "term resolved"),
    }
    Ok(found.into_set())
}

/// One line of the interactive command surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Query(BooleanQuery),
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseCommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command {0:?}")]
    Unknown(String),
}

impl FromStr for Command {
    type Err = ParseCommandError;

    /// `sa <terms>` is AND, `so <terms>` is OR, `q` quits. Case-insensitive.
    fn from_str(line: &str) -> std::result::Result<Self, Self::Err> {
        let line = normalize_query(line);
        let mut words = tokenize(&line);
        let command = words.next().ok_or(ParseCommandError::Empty)?;
        match command {
            "sa" => Ok(Command::Query(BooleanQuery::and(words))),
            "so" => Ok(Command::Query(BooleanQuery::or(words))),
            "q" => Ok(Command::Quit),
            other => Err(ParseCommandError::Unknown(other.to_owned())),
        }
    }
}
