use anyhow::Result;
use clap::Parser;
use search::{load_index, run_session, OutputFormat};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "search")]
#[command(about = "Answer AND (sa) / OR (so) queries over a corpus file; q quits", long_about = None)]
struct Args {
    /// Corpus file, one `<filename> <ignored> <token>...` line per document
    corpus: PathBuf,
    /// How query results are printed
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();

    // Help exits 0; every other argument problem exits 1.
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let code = if err.use_stderr() { 1 } else { 0 };
            err.print()?;
            std::process::exit(code);
        }
    };

    let index = load_index(&args.corpus)?;
    let summary = run_session(&index, io::stdin().lock(), io::stdout().lock(), args.format)?;
    tracing::info!(queries = summary.queries, invalid = summary.invalid, "session closed");
    Ok(())
}
