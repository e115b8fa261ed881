use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

use crate::error::InputError;
use crate::extraction::group_by_sentence;

/// One entity mention inside a nested sentence record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TaggedMention {
    pub name: String,
    /// Raw tagger label, validated when the mention is aggregated
    #[serde(rename = "type", alias = "entity_type")]
    pub entity_type: String,
}

/// A sentence together with every entity the tagger found in it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TaggedSentence {
    pub sentence: String,
    #[serde(default)]
    pub source_url: String,
    #[serde(default)]
    pub entities: Vec<TaggedMention>,
}

impl TaggedSentence {
    pub fn new(sentence: &str, source_url: &str) -> Self {
        Self {
            sentence: sentence.to_string(),
            source_url: source_url.to_string(),
            entities: Vec::new(),
        }
    }

    pub fn with_entity(mut self, name: &str, entity_type: &str) -> Self {
        self.entities.push(TaggedMention {
            name: name.to_string(),
            entity_type: entity_type.to_string(),
        });
        self
    }
}

/// Flat (name, type, sentence, source) tuple as streamed by a tagger
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TaggedEntity {
    pub sentence: String,
    #[serde(default)]
    pub source_url: String,
    pub name: String,
    #[serde(rename = "type", alias = "entity_type")]
    pub entity_type: String,
}

#[derive(Debug)]
enum InputRecord {
    Entity(TaggedEntity),
    Sentence(TaggedSentence),
}

// An object carrying a `name` key is a flat record; anything else must be a
// nested sentence. Both shapes reject unknown keys.
impl<'de> Deserialize<'de> for InputRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;

        let value = serde_json::Value::deserialize(deserializer)?;
        let is_flat = value
            .as_object()
            .is_some_and(|object| object.contains_key("name"));

        if is_flat {
            serde_json::from_value(value)
                .map(InputRecord::Entity)
                .map_err(D::Error::custom)
        } else {
            serde_json::from_value(value)
                .map(InputRecord::Sentence)
                .map_err(D::Error::custom)
        }
    }
}

/// Parse tagged input in any of the accepted shapes
///
/// Accepts a JSON array or JSON lines, each element being either a nested
/// sentence record or a flat entity record. Consecutive flat records sharing
/// a sentence and source are merged into one sentence.
pub fn parse_tagged_sentences(text: &str) -> Result<Vec<TaggedSentence>, InputError> {
    let trimmed = text.trim_start();
    if trimmed.is_empty() {
        return Err(InputError::Empty);
    }

    let records: Vec<InputRecord> = if trimmed.starts_with('[') {
        serde_json::from_str(text).map_err(|source| InputError::Json {
            line: source.line(),
            source,
        })?
    } else {
        let mut records = Vec::new();
        for (idx, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let record = serde_json::from_str(line).map_err(|source| InputError::Json {
                line: idx + 1,
                source,
            })?;
            records.push(record);
        }
        records
    };

    let sentences = collect_sentences(records);
    if sentences.is_empty() {
        return Err(InputError::Empty);
    }

    tracing::debug!("Parsed {} tagged sentences", sentences.len());
    Ok(sentences)
}

fn collect_sentences(records: Vec<InputRecord>) -> Vec<TaggedSentence> {
    let mut sentences = Vec::new();
    let mut pending = Vec::new();

    for record in records {
        match record {
            InputRecord::Entity(entity) => pending.push(entity),
            InputRecord::Sentence(sentence) => {
                sentences.extend(group_by_sentence(std::mem::take(&mut pending)));
                sentences.push(sentence);
            }
        }
    }
    sentences.extend(group_by_sentence(pending));

    sentences
}

/// Read tagged input from a file, or from stdin when `path` is `-`
pub fn read_tagged_sentences(path: &str) -> Result<Vec<TaggedSentence>, InputError> {
    let text = if path == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(Path::new(path))?
    };

    parse_tagged_sentences(&text)
}
