/// Splits text into whitespace-delimited tokens. No normalization is applied.
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> + '_ {
    text.split_whitespace()
}

/// A corpus line: `<filename> <ignored> <token>...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusLine<'a> {
    pub filename: &'a str,
    pub tokens: Vec<&'a str>,
}

/// Parses one corpus line. Blank lines give `None`; a line with fewer than
/// three words gives a line with no tokens.
pub fn parse_corpus_line(line: &str) -> Option<CorpusLine<'_>> {
    let mut words = tokenize(line);
    let filename = words.next()?;
    words.next();
    Some(CorpusLine { filename, tokens: words.collect() })
}

/// Lowercases a query line (ASCII only) before it is split into words.
pub fn normalize_query(line: &str) -> String {
    line.to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_field_is_skipped() {
        let line = parse_corpus_line("doc1.txt 17 apple banana apple\n").unwrap();
        assert_eq!(line.filename, "doc1.txt");
        assert_eq!(line.tokens, vec!["apple", "banana", "apple"]);
    }

    #[test]
    fn short_and_blank_lines() {
        assert!(parse_corpus_line("   \n").is_none());
        assert!(parse_corpus_line("doc1.txt").unwrap().tokens.is_empty());
        assert!(parse_corpus_line("doc1.txt X").unwrap().tokens.is_empty());
    }

    #[test]
    fn tokens_keep_their_case() {
        let line = parse_corpus_line("d X Rust rust").unwrap();
        assert_eq!(line.tokens, vec!["Rust", "rust"]);
        assert_eq!(normalize_query("SA Rust Ünï"), "sa rust Ünï");
    }
}
