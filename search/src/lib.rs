use anyhow::{Context, Result};
use boolsearch::{BooleanQuery, Command, InvertedIndex, Operator, Set};
use clap::ValueEnum;
use serde::Serialize;
use std::io::{BufRead, Write};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Prompts and quoted filenames, for people
    #[default]
    Text,
    /// One JSON object per query, no prompts
    Json,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub operator: Operator,
    pub terms: Vec<String>,
    pub total_hits: usize,
    pub results: Vec<String>,
    pub took_s: f64,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// What happened over one interactive session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub queries: usize,
    pub invalid: usize,
    /// False when the session ended because input ran out.
    pub quit: bool,
}

pub fn load_index(path: &Path) -> Result<InvertedIndex> {
    boolsearch::load_corpus(path).with_context(|| format!("could not build index from {}", path.display()))
}

/// Reads commands from `input` until `q` or end of input, answering each on `output`.
pub fn run_session<R: BufRead, W: Write>(
    index: &InvertedIndex,
    mut input: R,
    mut output: W,
    format: OutputFormat,
) -> Result<SessionSummary> {
    let mut summary = SessionSummary::default();
    let mut buf = Vec::new();
    loop {
        if format == OutputFormat::Text {
            write!(output, "\nEnter a search query:\n")?;
            output.flush()?;
        }
        buf.clear();
        if input.read_until(b'\n', &mut buf).context("failed to read query line")? == 0 {
            tracing::debug!("end of input");
            if format == OutputFormat::Text {
                writeln!(output, "Exiting. Goodbye!")?;
            }
            break;
        }
        let Ok(line) = std::str::from_utf8(&buf) else {
            summary.invalid += 1;
            tracing::debug!(bytes = buf.len(), "rejected non-UTF-8 line");
            match format {
                OutputFormat::Text => writeln!(output, "That's not a valid input. Try again.")?,
                OutputFormat::Json => write_json(&mut output, &ErrorResponse { error: "input is not valid UTF-8".into() })?,
            }
            continue;
        };

        match line.parse::<Command>() {
            Ok(Command::Quit) => {
                if format == OutputFormat::Text {
                    writeln!(output, "Exiting. Goodbye!")?;
                }
                summary.quit = true;
                break;
            }
            Ok(Command::Query(query)) => {
                summary.queries += 1;
                answer(index, line, &query, &mut output, format)?;
            }
            Err(err) => {
                summary.invalid += 1;
                tracing::debug!(%err, "rejected command");
                match format {
                    OutputFormat::Text => writeln!(output, "That's not a valid input. Try again.")?,
                    OutputFormat::Json => write_json(&mut output, &ErrorResponse { error: err.to_string() })?,
                }
            }
        }
    }
    output.flush()?;
    Ok(summary)
}

fn answer<W: Write>(
    index: &InvertedIndex,
    line: &str,
    query: &BooleanQuery,
    output: &mut W,
    format: OutputFormat,
) -> Result<()> {
    let start = Instant::now();
    let hits: Set<Arc<str>> = match query.evaluate(index) {
        Ok(hits) => hits,
        Err(err) => {
            // A failed query reads as no hits; the session carries on.
            tracing::warn!(%err, query = line.trim(), "query failed");
            Set::new()
        }
    };
    let elapsed = start.elapsed();
    tracing::info!(
        operator = query.operator.keyword(),
        terms = query.terms.len(),
        hits = hits.len(),
        took_s = elapsed.as_secs_f64(),
        "query answered"
    );

    match format {
        OutputFormat::Text => {
            if hits.is_empty() {
                writeln!(output, "No hits found.")?;
            } else {
                writeln!(output, "Your search returned: ")?;
                for name in &hits {
                    write!(output, "'{name}' ")?;
                }
                writeln!(output)?;
            }
        }
        OutputFormat::Json => {
            let response = SearchResponse {
                query: line.trim().to_owned(),
                operator: query.operator,
                terms: query.terms.clone(),
                total_hits: hits.len(),
                results: hits.iter().map(|name| name.to_string()).collect(),
                took_s: elapsed.as_secs_f64(),
            };
            write_json(output, &response)?;
        }
    }
    Ok(())
}

fn write_json<W: Write, T: Serialize>(output: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer(&mut *output, value)?;
    writeln!(output)?;
    Ok(())
}
