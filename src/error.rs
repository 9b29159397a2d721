//! Error handling for the norm document system
//!
//! This module provides idiomatic Rust error types using thiserror for
//! better error messages and proper error chain handling.

use thiserror::Error;
use uuid::Uuid;

use crate::domain::metadatum::MetadatumType;

/// Main error type for the norm document system
#[derive(Error, Debug)]
pub enum NormError {
    #[error("Mapping error: {0}")]
    Mapping(#[from] MappingError),

    #[error("ELI derivation error: {0}")]
    Eli(#[from] EliError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Referential inconsistencies found while rebuilding a norm from its rows
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    #[error("metadata section {guid} references non-existent parent section {parent}")]
    DanglingSectionParent { guid: Uuid, parent: Uuid },

    #[error("metadatum {guid} references non-existent section {section}")]
    OrphanedMetadatum { guid: Uuid, section: Uuid },

    #[error("documentation node {guid} references non-existent parent {parent}")]
    DanglingDocumentationParent { guid: Uuid, parent: Uuid },

    #[error("paragraph {guid} references {article}, which is not an article")]
    ParagraphOutsideArticle { guid: Uuid, article: Uuid },

    #[error("article {guid} has nested documentation nodes")]
    ArticleWithChildren { guid: Uuid },

    #[error("document section {guid} has no section type")]
    MissingSectionType { guid: Uuid },

    #[error("{count} metadata section rows are unreachable from any root (cyclic parent references)")]
    UnreachableSectionRows { count: usize },

    #[error("{count} documentation rows are unreachable from any root (cyclic parent references)")]
    UnreachableDocumentationRows { count: usize },

    #[error("invalid stored value for metadatum {guid}: {source}")]
    Value { guid: Uuid, source: ValueError },
}

/// Failures of the type-directed conversion between stored strings and
/// typed metadatum values
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    #[error("'{value}' is not a valid {metadatum_type:?} enum member")]
    UnknownEnumValue {
        metadatum_type: MetadatumType,
        value: String,
    },

    #[error("'{value}' is not a valid calendar date")]
    InvalidDate { value: String },

    #[error("'{value}' is not a valid time of day")]
    InvalidTime { value: String },

    #[error("'{value}' is not a valid boolean")]
    InvalidBoolean { value: String },

    #[error("'{value}' is not a valid year")]
    InvalidYear { value: String },
}

/// Failures while deriving the ELI from a norm's metadata sections
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EliError {
    #[error("no print announcement gazette found in the official reference sections")]
    MissingGazette,

    #[error("no print announcement page found in the official reference sections")]
    MissingPage,

    #[error("no announcement date or year found")]
    MissingAnnouncementYear,

    #[error("gazette '{0}' has no known ELI medium code")]
    UnknownGazette(String),

    #[error(transparent)]
    Value(#[from] ValueError),
}
