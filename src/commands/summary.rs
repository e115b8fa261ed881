use anyhow::{Context, Result};

use relex::input::read_tagged_sentences;
use relex::output::{OutputFormat, TripleFormatter};
use relex::{AggregatorOptions, DedupPolicy, ExtractionOptions, Extractor};

use super::extract::display_input;

/// Runs the summary command with the provided arguments
pub fn run(
    input: &str,
    format: &str,
    include_trivial: bool,
    dedup: DedupPolicy,
) -> Result<()> {
    tracing::info!("Summarizing sentences from {}", display_input(input));

    let sentences = read_tagged_sentences(input)
        .with_context(|| format!("Failed to read tagged input from {}", display_input(input)))?;

    let extractor = Extractor::new(ExtractionOptions {
        aggregator: AggregatorOptions {
            dedup,
            ..Default::default()
        },
        ..Default::default()
    });
    let aggregators = extractor.aggregators(&sentences, include_trivial);

    let output_format: OutputFormat = format.parse().unwrap_or(OutputFormat::Text);
    let output = TripleFormatter::new(output_format).format_summaries(&aggregators)?;
    println!("{}", output);

    if aggregators.len() < sentences.len() {
        eprintln!(
            "{} of {} sentences hidden as trivial (use --all to show them)",
            sentences.len() - aggregators.len(),
            sentences.len()
        );
    }

    Ok(())
}
