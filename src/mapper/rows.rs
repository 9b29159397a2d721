//! Flat row representations of a persisted norm
//!
//! These structs mirror the relational layout one-to-one: tree structure is
//! encoded through nullable parent guids, the documentation node variant
//! through an explicit `kind` discriminant, and metadatum values as strings
//! alongside their type tag. The mapper is the only place that crosses
//! between rows and the nested domain aggregate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::documentation::DocumentSectionType;
use crate::domain::metadata_section::MetadataSectionName;
use crate::domain::metadatum::MetadatumType;

/// Discriminates the two documentation node kinds in storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "database", derive(sqlx::Type))]
#[cfg_attr(
    feature = "database",
    sqlx(type_name = "documentation_kind", rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum DocumentationKind {
    Article,
    Section,
}

/// Root row of a norm
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "database", derive(sqlx::FromRow))]
pub struct NormRow {
    pub guid: Uuid,
}

/// One metadata section; `section_guid` points at the parent section, if any
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "database", derive(sqlx::FromRow))]
pub struct MetadataSectionRow {
    pub guid: Uuid,
    pub norm_guid: Uuid,
    pub name: MetadataSectionName,
    pub order: i32,
    pub section_guid: Option<Uuid>,
}

/// One metadatum; value is the stored string form, typed by `metadatum_type`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "database", derive(sqlx::FromRow))]
pub struct MetadatumRow {
    pub guid: Uuid,
    pub section_guid: Uuid,
    pub metadatum_type: MetadatumType,
    pub value: String,
    pub order: i32,
}

/// One documentation tree node of either kind; `parent_guid` is None for
/// nodes attached directly to the norm, `section_type` only set for sections
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "database", derive(sqlx::FromRow))]
pub struct DocumentationRow {
    pub guid: Uuid,
    pub norm_guid: Uuid,
    pub parent_guid: Option<Uuid>,
    pub kind: DocumentationKind,
    pub order: i32,
    pub marker: String,
    pub heading: Option<String>,
    pub section_type: Option<DocumentSectionType>,
}

/// One paragraph of an article; `order` is the positional sort key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "database", derive(sqlx::FromRow))]
pub struct ParagraphRow {
    pub guid: Uuid,
    pub article_guid: Uuid,
    pub marker: Option<String>,
    pub text: String,
    pub order: i32,
}

/// One attached file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "database", derive(sqlx::FromRow))]
pub struct FileReferenceRow {
    pub guid: Uuid,
    pub norm_guid: Uuid,
    pub name: String,
    pub hash: String,
    pub created_at: DateTime<Utc>,
}

/// Recitals text of a norm
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "database", derive(sqlx::FromRow))]
pub struct RecitalsRow {
    pub guid: Uuid,
    pub norm_guid: Uuid,
    pub marker: Option<String>,
    pub heading: Option<String>,
    pub text: String,
}

/// Enacting formula of a norm
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "database", derive(sqlx::FromRow))]
pub struct FormulaRow {
    pub guid: Uuid,
    pub norm_guid: Uuid,
    pub text: String,
}

/// Conclusion text of a norm
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "database", derive(sqlx::FromRow))]
pub struct ConclusionRow {
    pub guid: Uuid,
    pub norm_guid: Uuid,
    pub text: String,
}

/// Everything persisted for one norm, as read from or written to storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormTables {
    pub norm: NormRow,
    pub files: Vec<FileReferenceRow>,
    pub sections: Vec<MetadataSectionRow>,
    pub metadata: Vec<MetadatumRow>,
    pub recitals: Option<RecitalsRow>,
    pub formula: Option<FormulaRow>,
    pub documentation: Vec<DocumentationRow>,
    pub paragraphs: Vec<ParagraphRow>,
    pub conclusion: Option<ConclusionRow>,
}
