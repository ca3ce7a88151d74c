//! Fixed vocabularies: event types, method tags, relations and statuses.
//!
//! These tables are closed sets. Deserializing a value outside them fails,
//! so every loaded entity is guaranteed to use the canonical spelling.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category of a dated event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Build,
    Policy,
    Appointment,
    Finance,
    /// Resistance to the protagonist. Can be excluded from feeds and the index.
    Opposition,
    Media,
    Legal,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Build => "build",
            EventType::Policy => "policy",
            EventType::Appointment => "appointment",
            EventType::Finance => "finance",
            EventType::Opposition => "opposition",
            EventType::Media => "media",
            EventType::Legal => "legal",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A mechanism of influence exercised in an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodTag {
    LegalAuthority,
    BudgetControl,
    BureaucraticInsulation,
    PatronageProcurement,
    AgendaSetting,
    PublicNarrative,
    EngineeringAsPolitics,
    ProcessBulldozing,
    FederalLeverage,
    InstitutionBuilding,
}

impl MethodTag {
    /// All tags in canonical display order.
    pub const ALL: [MethodTag; 10] = [
        MethodTag::LegalAuthority,
        MethodTag::BudgetControl,
        MethodTag::BureaucraticInsulation,
        MethodTag::PatronageProcurement,
        MethodTag::AgendaSetting,
        MethodTag::PublicNarrative,
        MethodTag::EngineeringAsPolitics,
        MethodTag::ProcessBulldozing,
        MethodTag::FederalLeverage,
        MethodTag::InstitutionBuilding,
    ];

    /// The snake_case key used in dataset files.
    pub fn as_str(&self) -> &'static str {
        match self {
            MethodTag::LegalAuthority => "legal_authority",
            MethodTag::BudgetControl => "budget_control",
            MethodTag::BureaucraticInsulation => "bureaucratic_insulation",
            MethodTag::PatronageProcurement => "patronage_procurement",
            MethodTag::AgendaSetting => "agenda_setting",
            MethodTag::PublicNarrative => "public_narrative",
            MethodTag::EngineeringAsPolitics => "engineering_as_politics",
            MethodTag::ProcessBulldozing => "process_bulldozing",
            MethodTag::FederalLeverage => "federal_leverage",
            MethodTag::InstitutionBuilding => "institution_building",
        }
    }

    /// Human-readable label for tag pickers.
    pub fn label(&self) -> &'static str {
        match self {
            MethodTag::LegalAuthority => "Legal Authority",
            MethodTag::BudgetControl => "Budget Control",
            MethodTag::BureaucraticInsulation => "Bureaucratic Insulation",
            MethodTag::PatronageProcurement => "Patronage Procurement",
            MethodTag::AgendaSetting => "Agenda Setting",
            MethodTag::PublicNarrative => "Public Narrative",
            MethodTag::EngineeringAsPolitics => "Engineering as Politics",
            MethodTag::ProcessBulldozing => "Process Bulldozing",
            MethodTag::FederalLeverage => "Federal Leverage",
            MethodTag::InstitutionBuilding => "Institution Building",
        }
    }
}

impl fmt::Display for MethodTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the ten method tag keys.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown method tag: {0}")]
pub struct UnknownMethodTag(pub String);

impl FromStr for MethodTag {
    type Err = UnknownMethodTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MethodTag::ALL
            .into_iter()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| UnknownMethodTag(s.to_string()))
    }
}

/// Whether a stakeholder is an individual or an organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StakeholderKind {
    Person,
    Institution,
}

/// Directed relation carried by an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    Ally,
    Opponent,
    Controls,
    Influences,
}

/// Construction status of a build feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildStatus {
    Proposed,
    UnderConstruction,
    Completed,
}
