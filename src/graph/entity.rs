use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::UnknownEntityType;

/// Entity type enumeration
///
/// The closed set of labels the upstream tagger may assign. Anything else is
/// rejected at parse time and never reaches an aggregator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityType {
    Location,
    Organization,
    Date,
    Money,
    Person,
    Percent,
    Time,
}

impl EntityType {
    pub const ALL: [EntityType; 7] = [
        EntityType::Location,
        EntityType::Organization,
        EntityType::Date,
        EntityType::Money,
        EntityType::Person,
        EntityType::Percent,
        EntityType::Time,
    ];

    /// Types whose entities act as triple subjects, in emission order
    pub const SUBJECT_TYPES: [EntityType; 2] = [EntityType::Person, EntityType::Organization];

    /// Tagger label for this type
    pub fn as_label(&self) -> &'static str {
        match self {
            EntityType::Location => "LOCATION",
            EntityType::Organization => "ORGANIZATION",
            EntityType::Date => "DATE",
            EntityType::Money => "MONEY",
            EntityType::Person => "PERSON",
            EntityType::Percent => "PERCENT",
            EntityType::Time => "TIME",
        }
    }

    /// Ontology class attached to subjects and objects of this type
    pub fn ontology_class(&self) -> Option<OntologyClass> {
        match self {
            EntityType::Person => Some(OntologyClass::Person),
            EntityType::Organization => Some(OntologyClass::Organization),
            EntityType::Location => Some(OntologyClass::Location),
            EntityType::Date => Some(OntologyClass::Date),
            EntityType::Money => Some(OntologyClass::Money),
            EntityType::Percent | EntityType::Time => None,
        }
    }

    /// Predicate used when an entity of this type is the object of a triple
    pub fn predicate(&self) -> Option<Predicate> {
        match self {
            EntityType::Person => Some(Predicate::HasPerson),
            EntityType::Organization => Some(Predicate::HasOrganization),
            EntityType::Location => Some(Predicate::HasLocation),
            EntityType::Date => Some(Predicate::HasDate),
            EntityType::Money => Some(Predicate::HasMoney),
            EntityType::Percent | EntityType::Time => None,
        }
    }

    pub fn is_subject_type(&self) -> bool {
        Self::SUBJECT_TYPES.contains(self)
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

impl FromStr for EntityType {
    type Err = UnknownEntityType;

    /// Labels are matched exactly as the tagger emits them (upper case).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LOCATION" => Ok(EntityType::Location),
            "ORGANIZATION" => Ok(EntityType::Organization),
            "DATE" => Ok(EntityType::Date),
            "MONEY" => Ok(EntityType::Money),
            "PERSON" => Ok(EntityType::Person),
            "PERCENT" => Ok(EntityType::Percent),
            "TIME" => Ok(EntityType::Time),
            other => Err(UnknownEntityType(other.to_string())),
        }
    }
}

/// Ontology class of a triple subject or object
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum OntologyClass {
    Person,
    Organization,
    Location,
    Date,
    Money,
}

impl OntologyClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            OntologyClass::Person => "Person",
            OntologyClass::Organization => "Organization",
            OntologyClass::Location => "Location",
            OntologyClass::Date => "Date",
            OntologyClass::Money => "Money",
        }
    }
}

impl fmt::Display for OntologyClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Predicate linking a subject to an object, keyed by the object's type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Predicate {
    #[serde(rename = "hasPerson")]
    HasPerson,
    #[serde(rename = "hasOrganization")]
    HasOrganization,
    #[serde(rename = "hasLocation")]
    HasLocation,
    #[serde(rename = "hasDate")]
    HasDate,
    #[serde(rename = "hasMoney")]
    HasMoney,
}

impl Predicate {
    pub fn as_str(&self) -> &'static str {
        match self {
            Predicate::HasPerson => "hasPerson",
            Predicate::HasOrganization => "hasOrganization",
            Predicate::HasLocation => "hasLocation",
            Predicate::HasDate => "hasDate",
            Predicate::HasMoney => "hasMoney",
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
