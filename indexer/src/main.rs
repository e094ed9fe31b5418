use anyhow::{Context, Result};
use boolsearch::{bucket_for, load_corpus, BucketStats, InvertedIndex, Record};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build an inverted index from a corpus file and inspect it", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a JSON summary of documents, records and buckets
    Stats {
        /// Corpus file
        #[arg(long)]
        corpus: PathBuf,
    },
    /// Print every posting as one JSON object per line
    Dump {
        /// Corpus file
        #[arg(long)]
        corpus: PathBuf,
        /// Only postings for this exact token
        #[arg(long)]
        token: Option<String>,
    },
}

#[derive(Debug, Serialize)]
struct StatsReport {
    corpus: String,
    generated_at: String,
    documents: usize,
    records: usize,
    buckets: Vec<BucketStats>,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let cli = Cli::parse();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Stats { corpus } => {
            let index = build(&corpus)?;
            let report = stats_report(&corpus, &index)?;
            serde_json::to_writer_pretty(&mut out, &report)?;
            writeln!(out)?;
        }
        Commands::Dump { corpus, token } => {
            let index = build(&corpus)?;
            let written = dump(&index, token.as_deref(), &mut out)?;
            tracing::info!(written, "postings dumped");
        }
    }
    Ok(())
}

fn build(corpus: &Path) -> Result<InvertedIndex> {
    let index = load_corpus(corpus).with_context(|| format!("could not build index from {}", corpus.display()))?;
    tracing::info!(records = index.record_count(), documents = index.document_count(), "index built");
    Ok(index)
}

fn stats_report(corpus: &Path, index: &InvertedIndex) -> Result<StatsReport> {
    let generated_at = time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .context("could not format report timestamp")?;
    Ok(StatsReport {
        corpus: corpus.display().to_string(),
        generated_at,
        documents: index.document_count(),
        records: index.record_count(),
        buckets: index.bucket_stats(),
    })
}

/// Writes postings as JSON lines and returns how many were written.
fn dump<W: Write>(index: &InvertedIndex, token: Option<&str>, out: &mut W) -> Result<usize> {
    let records: Box<dyn Iterator<Item = &Record> + '_> = match token {
        Some(token) => Box::new(
            bucket_for(token)
                .and_then(|b| index.bucket(b))
                .map(|postings| postings.records_for(token))
                .unwrap_or_default()
                .iter(),
        ),
        None => Box::new(index.records()),
    };
    let mut written = 0;
    for record in records {
        serde_json::to_writer(&mut *out, record)?;
        writeln!(out)?;
        written += 1;
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use boolsearch::load_reader;
    use std::io::Cursor;

    fn tiny_index() -> InvertedIndex {
        load_reader(Cursor::new("doc1.txt X apple banana apple\ndoc2.txt X apple\n")).unwrap()
    }

    #[test]
    fn dump_filters_by_token() {
        let index = tiny_index();
        let mut out = Vec::new();
        assert_eq!(dump(&index, Some("apple"), &mut out).unwrap(), 2);
        let rows: Vec<serde_json::Value> = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(rows[0]["filename"], "doc1.txt");
        assert_eq!(rows[0]["hits"], 2);
        assert_eq!(rows[1]["filename"], "doc2.txt");
        assert_eq!(rows[1]["hits"], 1);
    }

    #[test]
    fn dump_everything_and_unknown_tokens() {
        let index = tiny_index();
        let mut out = Vec::new();
        assert_eq!(dump(&index, None, &mut out).unwrap(), 3);
        assert_eq!(dump(&index, Some("kiwi"), &mut Vec::new()).unwrap(), 0);
        assert_eq!(dump(&index, Some("!bang"), &mut Vec::new()).unwrap(), 0);
    }

    #[test]
    fn stats_report_counts() {
        let index = tiny_index();
        let report = stats_report(Path::new("corpus.txt"), &index).unwrap();
        assert_eq!(report.documents, 2);
        assert_eq!(report.records, 3);
        assert_eq!(report.buckets.len(), 2);
        assert_eq!(report.buckets[0].hits, 3);
        assert!(time::OffsetDateTime::parse(
            &report.generated_at,
            &time::format_description::well_known::Rfc3339
        )
        .is_ok());
    }
}
