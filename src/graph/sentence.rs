use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, trace};

use super::entity::EntityType;
use super::triple::Triple;

/// How a new entity name is compared against names already recorded for its type
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DedupPolicy {
    /// Reject a name an existing entry contains ("Gates" after "Bill Gates").
    /// A longer form arriving after its short form is still accepted.
    #[default]
    ContainedInExisting,
    /// Reject containment in either direction
    Symmetric,
}

impl DedupPolicy {
    fn is_similar(&self, existing: &str, candidate: &str) -> bool {
        let existing = existing.to_lowercase();
        let candidate = candidate.to_lowercase();
        match self {
            DedupPolicy::ContainedInExisting => existing.contains(&candidate),
            DedupPolicy::Symmetric => {
                existing.contains(&candidate) || candidate.contains(&existing)
            }
        }
    }
}

/// What to do with triples whose object type has no ontology mapping (PERCENT, TIME)
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UnmappedPolicy {
    /// Emit them with absent class and predicate
    #[default]
    Emit,
    Suppress,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AggregatorOptions {
    pub dedup: DedupPolicy,
    pub unmapped: UnmappedPolicy,
}

/// Co-occurring entities of a single sentence, grouped by type
///
/// Types and names keep their insertion order, which fixes the order of
/// [`SentenceEntityAggregator::get_all_triples`] and of the summary.
#[derive(Debug, Clone)]
pub struct SentenceEntityAggregator {
    sentence: String,
    entities: Vec<(EntityType, Vec<String>)>,
    entity_count: usize,
    options: AggregatorOptions,
}

impl SentenceEntityAggregator {
    pub fn new(sentence: &str) -> Self {
        Self::with_options(sentence, AggregatorOptions::default())
    }

    pub fn with_options(sentence: &str, options: AggregatorOptions) -> Self {
        Self {
            sentence: sentence.to_string(),
            entities: Vec::with_capacity(EntityType::ALL.len()),
            entity_count: 0,
            options,
        }
    }

    /// Add an entity given its tagger label
    ///
    /// Returns false, leaving the aggregator untouched, when the label is not
    /// a recognized type or a similar name was already recorded for it.
    pub fn add_entity(&mut self, name: &str, entity_type: &str) -> bool {
        match entity_type.parse::<EntityType>() {
            Ok(ty) => self.add_typed_entity(name, ty),
            Err(err) => {
                debug!("Rejecting entity '{}': {}", name, err);
                false
            }
        }
    }

    /// Add an entity whose type is already known
    pub fn add_typed_entity(&mut self, name: &str, entity_type: EntityType) -> bool {
        let dedup = self.options.dedup;

        match self.entities.iter_mut().find(|(ty, _)| *ty == entity_type) {
            Some((_, names)) => {
                if let Some(similar) = names.iter().find(|e| dedup.is_similar(e, name)) {
                    trace!(
                        "Skipping {} '{}', similar to '{}'",
                        entity_type,
                        name,
                        similar
                    );
                    return false;
                }
                names.push(name.to_string());
            }
            None => self.entities.push((entity_type, vec![name.to_string()])),
        }

        self.entity_count += 1;
        true
    }

    pub fn sentence(&self) -> &str {
        &self.sentence
    }

    pub fn entity_count(&self) -> usize {
        self.entity_count
    }

    pub fn options(&self) -> AggregatorOptions {
        self.options
    }

    /// Read-only view of the type to names mapping
    pub fn entities_by_type(&self) -> EntityView<'_> {
        EntityView {
            entries: &self.entities,
        }
    }

    /// Names recorded for one type, empty if the type never occurred
    pub fn entities_of(&self, entity_type: EntityType) -> &[String] {
        self.entities_by_type().get(entity_type).unwrap_or(&[])
    }

    /// Owned copy of the mapping, detached from this aggregator
    pub fn to_map(&self) -> BTreeMap<EntityType, Vec<String>> {
        self.entities.iter().cloned().collect()
    }

    fn contains_type(&self, entity_type: EntityType) -> bool {
        self.entities.iter().any(|(ty, _)| *ty == entity_type)
    }

    /// Whether the co-occurrences in this sentence are trivial
    ///
    /// Only relations involving people or organizations are of interest, and
    /// a relation needs at least two entities.
    pub fn is_empty(&self) -> bool {
        if !self.entities.iter().any(|(ty, _)| ty.is_subject_type()) {
            return true;
        }
        self.entity_count <= 1
    }

    /// Every triple derivable from this sentence
    ///
    /// PERSON subjects come first, then ORGANIZATION subjects. Each subject is
    /// paired with every recorded entity except itself.
    pub fn get_all_triples(&self, source_url: &str) -> Vec<Triple> {
        let mut triples = Vec::new();
        for subject_type in EntityType::SUBJECT_TYPES {
            if self.contains_type(subject_type) {
                triples.extend(self.triples_for_type(subject_type, source_url));
            }
        }
        triples
    }

    fn triples_for_type(&self, subject_type: EntityType, source_url: &str) -> Vec<Triple> {
        let subjects = self.entities_of(subject_type);
        let mut triples = Vec::new();

        for (i, subject) in subjects.iter().enumerate() {
            for (object_type, objects) in &self.entities {
                if self.options.unmapped == UnmappedPolicy::Suppress
                    && object_type.predicate().is_none()
                {
                    continue;
                }
                for (j, object) in objects.iter().enumerate() {
                    if *object_type == subject_type && i == j {
                        continue;
                    }
                    triples.push(Triple::new(
                        subject,
                        subject_type,
                        object,
                        *object_type,
                        &self.sentence,
                        source_url,
                    ));
                }
            }
        }

        triples
    }

    /// Multi-line diagnostic rendering of the sentence and its entities
    pub fn render_summary(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SentenceEntityAggregator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sentence: \"{}\"", self.sentence)?;
        for (ty, names) in &self.entities {
            write!(f, "\n    {}(S): ", ty)?;
            for name in names {
                write!(f, "{}, ", name)?;
            }
        }
        Ok(())
    }
}

/// Borrowed, immutable view over an aggregator's entities
#[derive(Debug, Clone, Copy)]
pub struct EntityView<'a> {
    entries: &'a [(EntityType, Vec<String>)],
}

impl<'a> EntityView<'a> {
    pub fn get(&self, entity_type: EntityType) -> Option<&'a [String]> {
        self.entries
            .iter()
            .find(|(ty, _)| *ty == entity_type)
            .map(|(_, names)| names.as_slice())
    }

    pub fn contains_type(&self, entity_type: EntityType) -> bool {
        self.get(entity_type).is_some()
    }

    /// Types in first-seen order
    pub fn types(&self) -> impl Iterator<Item = EntityType> + 'a {
        self.entries.iter().map(|(ty, _)| *ty)
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityType, &'a [String])> + 'a {
        self.entries
            .iter()
            .map(|(ty, names)| (*ty, names.as_slice()))
    }

    /// Number of distinct types present
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
