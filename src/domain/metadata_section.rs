//! Named groupings of metadata
//!
//! A `MetadataSection` is an ordered container tagged by a name enum. It
//! carries either its own metadata (leaf) or nested child sections (parent);
//! well-formed persisted data never populates both. Sections form a tree of
//! arbitrary depth.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::metadatum::{Metadatum, MetadatumType};

/// Names the semantic role of a metadata section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "database", derive(sqlx::Type))]
#[cfg_attr(
    feature = "database",
    sqlx(type_name = "metadata_section_name", rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum MetadataSectionName {
    Norm,
    SubjectArea,
    Lead,
    Participation,
    CitationDate,
    AgeIndication,
    PrintAnnouncement,
    DigitalAnnouncement,
    Footnotes,
    DocumentType,
    OfficialReference,
    NormProvider,
    EntryIntoForce,
    Expiration,
    AnnouncementDate,
    PublicationDate,
    StatusIndication,
    Status,
    Repeal,
    DocumentStatusSection,
    DocumentStatus,
    CategorizedReference,
    DivergentEntryIntoForce,
    DivergentExpiration,
}

/// Ordered container of metadata and/or nested sections
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataSection {
    pub guid: Uuid,
    pub name: MetadataSectionName,
    pub order: i32,
    pub metadata: Vec<Metadatum>,
    pub sections: Option<Vec<MetadataSection>>,
}

impl MetadataSection {
    /// Create a leaf section holding metadata
    pub fn new(name: MetadataSectionName, metadata: Vec<Metadatum>) -> Self {
        Self {
            guid: Uuid::new_v4(),
            name,
            order: 1,
            metadata,
            sections: None,
        }
    }

    /// Create a parent section holding child sections and no metadata
    pub fn parent(name: MetadataSectionName, sections: Vec<MetadataSection>) -> Self {
        Self {
            guid: Uuid::new_v4(),
            name,
            order: 1,
            metadata: Vec::new(),
            sections: Some(sections),
        }
    }

    pub fn with_order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    /// First metadatum of the given type, lowest `order` wins, stable on ties
    pub fn first_metadatum(&self, metadatum_type: MetadatumType) -> Option<&Metadatum> {
        self.metadata
            .iter()
            .filter(|metadatum| metadatum.metadatum_type == metadatum_type)
            .min_by_key(|metadatum| metadatum.order)
    }

    /// Child sections of the given name, sorted by `order`, stable on ties
    pub fn children_named(&self, name: MetadataSectionName) -> Vec<&MetadataSection> {
        let mut children: Vec<&MetadataSection> = self
            .sections
            .as_deref()
            .unwrap_or(&[])
            .iter()
            .filter(|section| section.name == name)
            .collect();
        children.sort_by_key(|section| section.order);
        children
    }
}
