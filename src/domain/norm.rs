//! Norm aggregate root
//!
//! A `Norm` composes metadata sections, the documentation tree, the framing
//! texts (recitals, formula, conclusion) and attached file references. It
//! owns all child entities exclusively; edits replace whole sub-trees rather
//! than mutating metadata in place.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::documentation::Documentation;
use crate::domain::eli::Eli;
use crate::domain::metadata_section::{MetadataSection, MetadataSectionName};
use crate::domain::metadatum::{Metadatum, MetadatumType};
use crate::error::EliError;

/// An attached evidentiary document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReference {
    pub guid: Uuid,
    pub name: String,
    pub hash: String,
    pub created_at: DateTime<Utc>,
}

impl FileReference {
    pub fn new(name: impl Into<String>, hash: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            guid: Uuid::new_v4(),
            name: name.into(),
            hash: hash.into(),
            created_at,
        }
    }
}

/// Introductory text preceding the documentation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recitals {
    pub guid: Uuid,
    pub marker: Option<String>,
    pub heading: Option<String>,
    pub text: String,
}

/// Enacting formula of the norm
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Formula {
    pub guid: Uuid,
    pub text: String,
}

/// Closing text of the norm
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conclusion {
    pub guid: Uuid,
    pub text: String,
}

/// A legal document (statute/regulation) aggregate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Norm {
    pub guid: Uuid,
    pub metadata_sections: Vec<MetadataSection>,
    pub files: Vec<FileReference>,
    pub recitals: Option<Recitals>,
    pub formula: Option<Formula>,
    pub documentation: Vec<Documentation>,
    pub conclusion: Option<Conclusion>,
}

impl Norm {
    pub fn new(guid: Uuid) -> Self {
        Self {
            guid,
            metadata_sections: Vec::new(),
            files: Vec::new(),
            recitals: None,
            formula: None,
            documentation: Vec::new(),
            conclusion: None,
        }
    }

    pub fn builder() -> NormBuilder {
        NormBuilder::new()
    }

    /// Root sections of the given name, sorted by `order`, stable on ties
    pub fn sections_named(&self, name: MetadataSectionName) -> Vec<&MetadataSection> {
        let mut sections: Vec<&MetadataSection> = self
            .metadata_sections
            .iter()
            .filter(|section| section.name == name)
            .collect();
        sections.sort_by_key(|section| section.order);
        sections
    }

    /// First metadatum of the given type within the root sections of the
    /// given name. Sections are scanned lowest `order` first, metadata
    /// likewise; the first hit wins.
    pub fn first_metadatum(
        &self,
        section_name: MetadataSectionName,
        metadatum_type: MetadatumType,
    ) -> Option<&Metadatum> {
        self.sections_named(section_name)
            .into_iter()
            .find_map(|section| section.first_metadatum(metadatum_type))
    }

    /// Same lookup one nesting level down: scans child sections of the given
    /// name inside root sections of the parent name, in `order`.
    pub fn first_metadatum_in(
        &self,
        parent_name: MetadataSectionName,
        section_name: MetadataSectionName,
        metadatum_type: MetadatumType,
    ) -> Option<&Metadatum> {
        self.sections_named(parent_name)
            .into_iter()
            .flat_map(|parent| parent.children_named(section_name))
            .find_map(|section| section.first_metadatum(metadatum_type))
    }

    /// Derive the ELI from the current metadata sections.
    ///
    /// Recomputed on every call so the identifier always reflects the
    /// current metadata; the result is never cached.
    pub fn eli(&self) -> Result<Eli, EliError> {
        Eli::from_norm(self)
    }
}

/// Fluent construction of norms for creation flows and tests
#[derive(Debug, Default)]
pub struct NormBuilder {
    guid: Option<Uuid>,
    metadata_sections: Vec<MetadataSection>,
    files: Vec<FileReference>,
    recitals: Option<Recitals>,
    formula: Option<Formula>,
    documentation: Vec<Documentation>,
    conclusion: Option<Conclusion>,
}

impl NormBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn guid(mut self, guid: Uuid) -> Self {
        self.guid = Some(guid);
        self
    }

    pub fn metadata_section(mut self, section: MetadataSection) -> Self {
        self.metadata_sections.push(section);
        self
    }

    pub fn file(mut self, file: FileReference) -> Self {
        self.files.push(file);
        self
    }

    pub fn recitals(
        mut self,
        marker: Option<&str>,
        heading: Option<&str>,
        text: impl Into<String>,
    ) -> Self {
        self.recitals = Some(Recitals {
            guid: Uuid::new_v4(),
            marker: marker.map(str::to_string),
            heading: heading.map(str::to_string),
            text: text.into(),
        });
        self
    }

    pub fn formula(mut self, text: impl Into<String>) -> Self {
        self.formula = Some(Formula {
            guid: Uuid::new_v4(),
            text: text.into(),
        });
        self
    }

    pub fn documentation(mut self, node: impl Into<Documentation>) -> Self {
        self.documentation.push(node.into());
        self
    }

    pub fn conclusion(mut self, text: impl Into<String>) -> Self {
        self.conclusion = Some(Conclusion {
            guid: Uuid::new_v4(),
            text: text.into(),
        });
        self
    }

    pub fn build(self) -> Norm {
        Norm {
            guid: self.guid.unwrap_or_else(Uuid::new_v4),
            metadata_sections: self.metadata_sections,
            files: self.files,
            recitals: self.recitals,
            formula: self.formula,
            documentation: self.documentation,
            conclusion: self.conclusion,
        }
    }
}
