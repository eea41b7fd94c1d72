//! # bayesky CLI
//!
//! Command-line interface for the bayesky library.

use std::fs::File;
use std::io::{self, IsTerminal, Write};
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use bayesky::BayeskyError;
use bayesky::cli::Args;
use bayesky::output::{OutputFormat, create_writer};
use bayesky::parsing::PostExtractor;
use bayesky::pipeline::Pipeline;
use bayesky::source::{LineSource, RecordSource};

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("bayesky=info")),
        )
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), BayeskyError> {
    let start = Instant::now();
    let args = <Args as ClapParser>::parse();

    let filter = args.language_filter()?;
    info!(
        input = %args.input.display(),
        format = %args.format,
        languages = ?filter.languages(),
        "extracting posts"
    );

    let mut source = LineSource::open(&args.input, args.source_config())?;

    let mut pipeline = Pipeline::new(PostExtractor::with_config(args.extractor_config()), filter)
        .with_policy(args.error_policy());
    if let Some(limit) = args.max_records {
        pipeline = pipeline.with_max_records(limit);
    }

    let format: OutputFormat = args.format.into();
    let out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout().lock()),
    };

    let mut writer = create_writer(format, out);
    let stats = pipeline.run(&mut source, |post| writer.write_post(&post))?;
    writer.finish()?;

    let elapsed = start.elapsed();
    info!(
        records = stats.records_read,
        posts = stats.posts,
        filtered_out = stats.filtered_out,
        skipped = stats.skipped,
        malformed = stats.malformed,
        bytes = source.bytes_processed(),
        elapsed_secs = elapsed.as_secs_f64(),
        records_per_sec = stats.throughput(elapsed).round(),
        "done"
    );

    Ok(())
}
