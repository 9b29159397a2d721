//! norm-store - Structured legal norm documents
//!
//! This crate manages structured legal "norm" documents: hierarchical
//! document structure (sections, articles, paragraphs), typed metadata, and
//! the derivation of the European Legislation Identifier (ELI).
//!
//! The core is the bidirectional mapping between the nested domain
//! aggregate and its flattened relational row representation:
//! rows -> [`mapper::reconstruct_norm`] -> [`domain::Norm`] on read, and
//! [`mapper::flatten_norm`] back to rows on write. Both directions are pure
//! transformations; persistence and HTTP live behind feature gates.
//!
//! ## Quick Start
//!
//! ```rust
//! use norm_store::domain::{MetadataSection, MetadataSectionName, Metadatum, MetadatumType, Norm};
//! use norm_store::mapper::{flatten_norm, reconstruct_norm};
//!
//! let norm = Norm::builder()
//!     .metadata_section(MetadataSection::new(
//!         MetadataSectionName::Norm,
//!         vec![Metadatum::text("ABC", MetadatumType::RisAbbreviation)],
//!     ))
//!     .build();
//!
//! let tables = flatten_norm(&norm);
//! let restored = reconstruct_norm(tables).unwrap();
//! assert_eq!(restored, norm);
//! ```

// Core error handling
pub mod error;

// Domain entities and values
pub mod domain;

// Row representations and the bidirectional mapper
pub mod mapper;

// Database integration (when enabled)
#[cfg(feature = "database")]
pub mod database;

// REST API layer (when enabled)
#[cfg(feature = "server")]
pub mod api;

pub use error::{EliError, MappingError, NormError, ValueError};
