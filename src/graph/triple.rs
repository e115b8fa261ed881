use serde::{Deserialize, Serialize};
use std::fmt;

use super::entity::{EntityType, OntologyClass, Predicate};

/// Subject-predicate-object statement extracted from one sentence, with provenance
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Triple {
    pub subject: String,
    pub subject_class: Option<OntologyClass>,
    pub predicate: Option<Predicate>,
    pub object: String,
    pub object_class: Option<OntologyClass>,
    pub sentence: String,
    pub source_url: String,
}

impl Triple {
    pub fn new(
        subject: &str,
        subject_type: EntityType,
        object: &str,
        object_type: EntityType,
        sentence: &str,
        source_url: &str,
    ) -> Self {
        Self {
            subject: subject.to_string(),
            subject_class: subject_type.ontology_class(),
            predicate: object_type.predicate(),
            object: object.to_string(),
            object_class: object_type.ontology_class(),
            sentence: sentence.to_string(),
            source_url: source_url.to_string(),
        }
    }

    /// True when the class or predicate lookup came back empty for either side
    pub fn is_unmapped(&self) -> bool {
        self.subject_class.is_none() || self.predicate.is_none() || self.object_class.is_none()
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn or_dash<T: fmt::Display>(value: &Option<T>) -> String {
            value
                .as_ref()
                .map_or_else(|| "-".to_string(), |v| v.to_string())
        }

        write!(
            f,
            "{} ({}) -{}-> {} ({})",
            self.subject,
            or_dash(&self.subject_class),
            or_dash(&self.predicate),
            self.object,
            or_dash(&self.object_class)
        )
    }
}
