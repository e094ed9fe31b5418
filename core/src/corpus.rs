use crate::error::{IndexError, Result};
use crate::index::{InvertedIndex, PutOutcome};
use crate::tokenizer::parse_corpus_line;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Feeds every token of one corpus line into `index`. Returns how many were indexed.
pub fn ingest_line(index: &mut InvertedIndex, line: &str) -> Result<usize> {
    let Some(parsed) = parse_corpus_line(line) else {
        return Ok(0);
    };
    let mut indexed = 0;
    for token in parsed.tokens {
        match index.put(token, parsed.filename)? {
            PutOutcome::Indexed { .. } => indexed += 1,
            PutOutcome::Unindexable => {
                tracing::trace!(token, filename = parsed.filename, "skipping unindexable token");
            }
        }
    }
    Ok(indexed)
}

pub fn load_reader<R: BufRead>(reader: R) -> Result<InvertedIndex> {
    let mut index = InvertedIndex::new();
    let mut lines = 0usize;
    let mut tokens = 0usize;
    for line in reader.lines() {
        let line = line?;
        tokens += ingest_line(&mut index, &line)?;
        lines += 1;
    }
    tracing::info!(
        lines,
        tokens,
        records = index.record_count(),
        documents = index.document_count(),
        "corpus loaded"
    );
    Ok(index)
}

/// Builds an index from the corpus file at `path`.
pub fn load_corpus<P: AsRef<Path>>(path: P) -> Result<InvertedIndex> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| IndexError::Corpus { path: path.to_path_buf(), source })?;
    load_reader(BufReader::new(file)).map_err(|err| match err {
        IndexError::Io(source) => IndexError::Corpus { path: path.to_path_buf(), source },
        other => other,
    })
}
