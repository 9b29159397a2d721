//! Typed metadata values
//!
//! A `Metadatum` is a single typed, ordered value inside a metadata section.
//! The runtime representation of the value is fully determined by its
//! `MetadatumType` through a closed parse/format pair: stored strings are
//! parsed into `MetadatumValue` variants on load and rendered back on save.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValueError;

/// Discriminates the runtime type and the semantic role of a metadatum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "database", derive(sqlx::Type))]
#[cfg_attr(
    feature = "database",
    sqlx(type_name = "metadatum_type", rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum MetadatumType {
    Date,
    Time,
    Year,
    RangeStart,
    RangeEnd,
    AnnouncementGazette,
    AnnouncementMedium,
    Page,
    Edition,
    AdditionalInfo,
    Explanation,
    Keyword,
    DivergentDocumentNumber,
    RisAbbreviation,
    DocumentNumber,
    OfficialLongTitle,
    OfficialShortTitle,
    OfficialAbbreviation,
    UnofficialLongTitle,
    UnofficialShortTitle,
    UnofficialAbbreviation,
    UnofficialReference,
    Entity,
    DecidingBody,
    ResolutionMajority,
    LeadJurisdiction,
    LeadUnit,
    ParticipationType,
    ParticipationInstitution,
    SubjectFna,
    SubjectGesta,
    NormCategory,
    TypeName,
    TemplateName,
    UndefinedDate,
    Text,
    Link,
    Note,
    Description,
    ProofIndication,
    ProofType,
    OtherType,
    EntryIntoForceDateNote,
    WorkNote,
}

/// Category of a norm document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NormCategory {
    AmendmentNorm,
    BaseNorm,
    TransitionalNorm,
}

impl NormCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            NormCategory::AmendmentNorm => "AMENDMENT_NORM",
            NormCategory::BaseNorm => "BASE_NORM",
            NormCategory::TransitionalNorm => "TRANSITIONAL_NORM",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "AMENDMENT_NORM" => Some(NormCategory::AmendmentNorm),
            "BASE_NORM" => Some(NormCategory::BaseNorm),
            "TRANSITIONAL_NORM" => Some(NormCategory::TransitionalNorm),
            _ => None,
        }
    }
}

/// Placeholder for dates that are known to exist but not yet determined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UndefinedDate {
    UndefinedUnknown,
    UndefinedFuture,
    UndefinedNotPresent,
}

impl UndefinedDate {
    pub fn as_str(&self) -> &'static str {
        match self {
            UndefinedDate::UndefinedUnknown => "UNDEFINED_UNKNOWN",
            UndefinedDate::UndefinedFuture => "UNDEFINED_FUTURE",
            UndefinedDate::UndefinedNotPresent => "UNDEFINED_NOT_PRESENT",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "UNDEFINED_UNKNOWN" => Some(UndefinedDate::UndefinedUnknown),
            "UNDEFINED_FUTURE" => Some(UndefinedDate::UndefinedFuture),
            "UNDEFINED_NOT_PRESENT" => Some(UndefinedDate::UndefinedNotPresent),
            _ => None,
        }
    }
}

/// Whether a document status proof has been considered yet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProofIndication {
    NotYetConsidered,
    Considered,
}

impl ProofIndication {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProofIndication::NotYetConsidered => "NOT_YET_CONSIDERED",
            ProofIndication::Considered => "CONSIDERED",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "NOT_YET_CONSIDERED" => Some(ProofIndication::NotYetConsidered),
            "CONSIDERED" => Some(ProofIndication::Considered),
            _ => None,
        }
    }
}

/// Kind of text proof attached to a document status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProofType {
    TextProofFrom,
    TextProofValidityFrom,
}

impl ProofType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProofType::TextProofFrom => "TEXT_PROOF_FROM",
            ProofType::TextProofValidityFrom => "TEXT_PROOF_VALIDITY_FROM",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "TEXT_PROOF_FROM" => Some(ProofType::TextProofFrom),
            "TEXT_PROOF_VALIDITY_FROM" => Some(ProofType::TextProofValidityFrom),
            _ => None,
        }
    }
}

/// Residual document status notes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OtherType {
    TextInProgress,
    TextProofedButNotDone,
}

impl OtherType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OtherType::TextInProgress => "TEXT_IN_PROGRESS",
            OtherType::TextProofedButNotDone => "TEXT_PROOFED_BUT_NOT_DONE",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "TEXT_IN_PROGRESS" => Some(OtherType::TextInProgress),
            "TEXT_PROOFED_BUT_NOT_DONE" => Some(OtherType::TextProofedButNotDone),
            _ => None,
        }
    }
}

const TIME_FORMAT: &str = "%H:%M";
const TIME_FORMAT_WITH_SECONDS: &str = "%H:%M:%S";

/// Runtime value of a metadatum, determined by its `MetadatumType`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetadatumValue {
    Text(String),
    Date(NaiveDate),
    Time(NaiveTime),
    Boolean(bool),
    NormCategory(NormCategory),
    UndefinedDate(UndefinedDate),
    ProofIndication(ProofIndication),
    ProofType(ProofType),
    OtherType(OtherType),
}

impl MetadatumValue {
    /// Parse a stored string into the value variant dictated by the type.
    ///
    /// The dispatch is a closed, exhaustive table: every `MetadatumType`
    /// member is listed by name, so a newly added member fails to compile
    /// until it is classified. Stored strings that do not belong to the
    /// target domain are rejected, never passed through.
    pub fn parse(metadatum_type: MetadatumType, value: &str) -> Result<Self, ValueError> {
        use MetadatumType::*;

        match metadatum_type {
            Date => {
                let date = value.parse::<NaiveDate>().map_err(|_| ValueError::InvalidDate {
                    value: value.to_string(),
                })?;
                Ok(MetadatumValue::Date(date))
            }
            Time => {
                let time = NaiveTime::parse_from_str(value, TIME_FORMAT)
                    .or_else(|_| NaiveTime::parse_from_str(value, TIME_FORMAT_WITH_SECONDS))
                    .map_err(|_| ValueError::InvalidTime {
                        value: value.to_string(),
                    })?;
                Ok(MetadatumValue::Time(time))
            }
            ResolutionMajority => {
                let flag = value.parse::<bool>().map_err(|_| ValueError::InvalidBoolean {
                    value: value.to_string(),
                })?;
                Ok(MetadatumValue::Boolean(flag))
            }
            NormCategory => crate::domain::metadatum::NormCategory::parse(value)
                .map(MetadatumValue::NormCategory)
                .ok_or_else(|| unknown_enum_value(metadatum_type, value)),
            UndefinedDate => crate::domain::metadatum::UndefinedDate::parse(value)
                .map(MetadatumValue::UndefinedDate)
                .ok_or_else(|| unknown_enum_value(metadatum_type, value)),
            ProofIndication => crate::domain::metadatum::ProofIndication::parse(value)
                .map(MetadatumValue::ProofIndication)
                .ok_or_else(|| unknown_enum_value(metadatum_type, value)),
            ProofType => crate::domain::metadatum::ProofType::parse(value)
                .map(MetadatumValue::ProofType)
                .ok_or_else(|| unknown_enum_value(metadatum_type, value)),
            OtherType => crate::domain::metadatum::OtherType::parse(value)
                .map(MetadatumValue::OtherType)
                .ok_or_else(|| unknown_enum_value(metadatum_type, value)),
            // Genuinely string-typed members, listed by name on purpose. A
            // new enum-valued member must not end up here unnoticed.
            Year | RangeStart | RangeEnd | AnnouncementGazette | AnnouncementMedium | Page
            | Edition | AdditionalInfo
            | Explanation | Keyword | DivergentDocumentNumber | RisAbbreviation
            | DocumentNumber | OfficialLongTitle | OfficialShortTitle | OfficialAbbreviation
            | UnofficialLongTitle | UnofficialShortTitle | UnofficialAbbreviation
            | UnofficialReference | Entity | DecidingBody | LeadJurisdiction | LeadUnit
            | ParticipationType | ParticipationInstitution | SubjectFna | SubjectGesta
            | TypeName | TemplateName | Text | Link | Note | Description
            | EntryIntoForceDateNote | WorkNote => Ok(MetadatumValue::Text(value.to_string())),
        }
    }

    /// Canonical stored string form, the inverse of [`MetadatumValue::parse`]
    pub fn to_stored_string(&self) -> String {
        match self {
            MetadatumValue::Text(text) => text.clone(),
            MetadatumValue::Date(date) => date.format("%Y-%m-%d").to_string(),
            MetadatumValue::Time(time) => time.format(TIME_FORMAT).to_string(),
            MetadatumValue::Boolean(flag) => flag.to_string(),
            MetadatumValue::NormCategory(category) => category.as_str().to_string(),
            MetadatumValue::UndefinedDate(undefined) => undefined.as_str().to_string(),
            MetadatumValue::ProofIndication(indication) => indication.as_str().to_string(),
            MetadatumValue::ProofType(proof_type) => proof_type.as_str().to_string(),
            MetadatumValue::OtherType(other) => other.as_str().to_string(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            MetadatumValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            MetadatumValue::Date(date) => Some(*date),
            _ => None,
        }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            MetadatumValue::Boolean(flag) => Some(*flag),
            _ => None,
        }
    }
}

fn unknown_enum_value(metadatum_type: MetadatumType, value: &str) -> ValueError {
    ValueError::UnknownEnumValue {
        metadatum_type,
        value: value.to_string(),
    }
}

/// A single typed, ordered value within a metadata section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadatum {
    pub guid: Uuid,
    pub value: MetadatumValue,
    pub metadatum_type: MetadatumType,
    pub order: i32,
}

impl Metadatum {
    /// Create a metadatum with a fresh guid and the default order
    pub fn new(value: MetadatumValue, metadatum_type: MetadatumType) -> Self {
        Self::with_order(value, metadatum_type, 1)
    }

    pub fn with_order(value: MetadatumValue, metadatum_type: MetadatumType, order: i32) -> Self {
        Self {
            guid: Uuid::new_v4(),
            value,
            metadatum_type,
            order,
        }
    }

    /// Shorthand for the common string-typed case
    pub fn text(value: impl Into<String>, metadatum_type: MetadatumType) -> Self {
        Self::new(MetadatumValue::Text(value.into()), metadatum_type)
    }
}
