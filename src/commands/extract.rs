use anyhow::{Context, Result};

use relex::input::{read_tagged_sentences, TaggedSentence};
use relex::output::{OutputFormat, TripleFormatter};
use relex::{ExtractionOptions, Extractor};

/// Runs the extract command with the provided arguments
pub fn run(
    input: &str,
    source_url: Option<&str>,
    format: &str,
    options: ExtractionOptions,
) -> Result<()> {
    tracing::info!("Extracting triples from {}", display_input(input));

    let mut sentences = read_tagged_sentences(input)
        .with_context(|| format!("Failed to read tagged input from {}", display_input(input)))?;

    if let Some(url) = source_url {
        fill_source_url(&mut sentences, url);
    }

    let report = Extractor::new(options).extract(&sentences);

    let output_format: OutputFormat = format.parse().unwrap_or(OutputFormat::Text);
    let output = TripleFormatter::new(output_format).format(&report.triples)?;
    println!("{}", output.trim_end());

    eprintln!(
        "{} triples from {} sentences ({} trivial, {} entities rejected)",
        report.stats.triples,
        report.stats.sentences,
        report.stats.trivial_sentences,
        report.stats.entities_rejected
    );

    Ok(())
}

/// Give every sentence without a source locator the fallback one
pub(crate) fn fill_source_url(sentences: &mut [TaggedSentence], url: &str) {
    for sentence in sentences.iter_mut().filter(|s| s.source_url.is_empty()) {
        sentence.source_url = url.to_string();
    }
}

pub(crate) fn display_input(input: &str) -> &str {
    if input == "-" {
        "stdin"
    } else {
        input
    }
}
