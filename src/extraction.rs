use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::graph::sentence::{AggregatorOptions, SentenceEntityAggregator};
use crate::graph::triple::Triple;
use crate::input::{TaggedEntity, TaggedMention, TaggedSentence};

/// Settings for a batch extraction run
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ExtractionOptions {
    pub aggregator: AggregatorOptions,
    /// Skip sentences whose co-occurrences are trivial
    pub skip_trivial: bool,
}

impl Default for ExtractionOptions {
    fn default() -> Self {
        Self {
            aggregator: AggregatorOptions::default(),
            skip_trivial: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExtractionStats {
    pub sentences: usize,
    pub trivial_sentences: usize,
    pub entities_accepted: usize,
    pub entities_rejected: usize,
    pub triples: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionReport {
    pub triples: Vec<Triple>,
    pub stats: ExtractionStats,
}

/// Merge consecutive flat records that share a sentence and source into one sentence each
pub fn group_by_sentence(records: Vec<TaggedEntity>) -> Vec<TaggedSentence> {
    let mut sentences: Vec<TaggedSentence> = Vec::new();

    for record in records {
        let mention = TaggedMention {
            name: record.name,
            entity_type: record.entity_type,
        };

        match sentences.last_mut() {
            Some(last) if last.sentence == record.sentence && last.source_url == record.source_url => {
                last.entities.push(mention);
            }
            _ => sentences.push(TaggedSentence {
                sentence: record.sentence,
                source_url: record.source_url,
                entities: vec![mention],
            }),
        }
    }

    sentences
}

/// Runs one aggregator per tagged sentence and collects their triples
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    options: ExtractionOptions,
}

impl Extractor {
    pub fn new(options: ExtractionOptions) -> Self {
        Self { options }
    }

    /// Build the aggregator for one sentence
    pub fn aggregate(&self, tagged: &TaggedSentence) -> SentenceEntityAggregator {
        let mut aggregator =
            SentenceEntityAggregator::with_options(&tagged.sentence, self.options.aggregator);
        for mention in &tagged.entities {
            aggregator.add_entity(&mention.name, &mention.entity_type);
        }
        aggregator
    }

    pub fn extract(&self, sentences: &[TaggedSentence]) -> ExtractionReport {
        let mut report = ExtractionReport::default();

        for tagged in sentences {
            let aggregator = self.aggregate(tagged);
            report.stats.sentences += 1;
            report.stats.entities_accepted += aggregator.entity_count();
            report.stats.entities_rejected += tagged.entities.len() - aggregator.entity_count();

            if aggregator.is_empty() {
                report.stats.trivial_sentences += 1;
                if self.options.skip_trivial {
                    debug!("Skipping trivial sentence: {}", tagged.sentence);
                    continue;
                }
            }

            report
                .triples
                .extend(aggregator.get_all_triples(&tagged.source_url));
        }

        report.stats.triples = report.triples.len();
        info!(
            "Extracted {} triples from {} sentences ({} trivial)",
            report.stats.triples, report.stats.sentences, report.stats.trivial_sentences
        );

        report
    }

    /// Aggregators for each sentence, trivial ones included only on request
    pub fn aggregators(
        &self,
        sentences: &[TaggedSentence],
        include_trivial: bool,
    ) -> Vec<SentenceEntityAggregator> {
        sentences
            .iter()
            .map(|tagged| self.aggregate(tagged))
            .filter(|aggregator| include_trivial || !aggregator.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::sentence::{DedupPolicy, UnmappedPolicy};

    fn flat(sentence: &str, url: &str, name: &str, ty: &str) -> TaggedEntity {
        TaggedEntity {
            sentence: sentence.to_string(),
            source_url: url.to_string(),
            name: name.to_string(),
            entity_type: ty.to_string(),
        }
    }

    fn corpus() -> Vec<TaggedSentence> {
        vec![
            TaggedSentence::new("Alice works at Acme.", "u1")
                .with_entity("Alice", "PERSON")
                .with_entity("Acme", "ORGANIZATION"),
            TaggedSentence::new("Paris is lovely.", "u1").with_entity("Paris", "LOCATION"),
            TaggedSentence::new("Bill Gates, or Gates, founded Microsoft.", "u2")
                .with_entity("Bill Gates", "PERSON")
                .with_entity("Gates", "PERSON")
                .with_entity("Microsoft", "ORGANIZATION")
                .with_entity("1975", "YEAR"),
        ]
    }

    #[test]
    fn test_group_by_sentence() {
        let records = vec![
            flat("A", "u", "Alice", "PERSON"),
            flat("A", "u", "Acme", "ORGANIZATION"),
            flat("A", "v", "Acme", "ORGANIZATION"),
            flat("B", "v", "Bob", "PERSON"),
            flat("A", "u", "Anna", "PERSON"),
        ];

        let sentences = group_by_sentence(records);
        assert_eq!(sentences.len(), 4);
        assert_eq!(sentences[0].entities.len(), 2);
        assert_eq!(sentences[1].source_url, "v");
        assert_eq!(sentences[3].sentence, "A");
        assert_eq!(sentences[3].entities[0].name, "Anna");
    }

    #[test]
    fn test_group_by_sentence_empty() {
        assert!(group_by_sentence(Vec::new()).is_empty());
    }

    #[test]
    fn test_extract_skips_trivial_sentences() {
        let extractor = Extractor::default();
        let report = extractor.extract(&corpus());

        assert_eq!(report.stats.sentences, 3);
        assert_eq!(report.stats.trivial_sentences, 1);
        assert_eq!(report.stats.entities_accepted, 5);
        assert_eq!(report.stats.entities_rejected, 2);
        // 2 from the first sentence, 2 from the third
        assert_eq!(report.stats.triples, 4);
        assert_eq!(report.triples.len(), 4);
        assert!(report.triples.iter().all(|t| t.subject != "Paris"));
        assert!(report
            .triples
            .iter()
            .filter(|t| t.sentence.starts_with("Bill"))
            .all(|t| t.source_url == "u2"));
    }

    #[test]
    fn test_extract_can_keep_trivial_sentences() {
        let extractor = Extractor::new(ExtractionOptions {
            skip_trivial: false,
            ..Default::default()
        });
        let sentences = vec![
            TaggedSentence::new("Paris.", "u").with_entity("Paris", "LOCATION"),
            TaggedSentence::new("Acme and Paris.", "u")
                .with_entity("Acme", "ORGANIZATION")
                .with_entity("Paris", "LOCATION"),
        ];

        let report = extractor.extract(&sentences);
        // still counted, just not skipped
        assert_eq!(report.stats.trivial_sentences, 1);
        assert_eq!(report.triples.len(), 1);
        assert_eq!(report.triples[0].object, "Paris");
    }

    #[test]
    fn test_extract_honors_aggregator_options() {
        let extractor = Extractor::new(ExtractionOptions {
            aggregator: AggregatorOptions {
                dedup: DedupPolicy::Symmetric,
                unmapped: UnmappedPolicy::Suppress,
            },
            skip_trivial: true,
        });
        let sentences = vec![TaggedSentence::new("s", "u")
            .with_entity("Gates", "PERSON")
            .with_entity("Bill Gates", "PERSON")
            .with_entity("Acme", "ORGANIZATION")
            .with_entity("noon", "TIME")];

        let report = extractor.extract(&sentences);
        assert_eq!(report.stats.entities_accepted, 3);
        assert_eq!(report.stats.entities_rejected, 1);
        assert_eq!(report.triples.len(), 2);
        assert!(report.triples.iter().all(|t| t.object != "noon"));
    }

    #[test]
    fn test_aggregators_filter() {
        let extractor = Extractor::default();
        assert_eq!(extractor.aggregators(&corpus(), false).len(), 2);
        assert_eq!(extractor.aggregators(&corpus(), true).len(), 3);
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let options: ExtractionOptions =
            serde_json::from_str(r#"{"aggregator": {"dedup": "symmetric"}}"#).unwrap();
        assert_eq!(options.aggregator.dedup, DedupPolicy::Symmetric);
        assert_eq!(options.aggregator.unmapped, UnmappedPolicy::Emit);
        assert!(options.skip_trivial);
    }
}
