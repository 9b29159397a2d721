//! Bidirectional mapping between flat rows and the norm aggregate
//!
//! Read path: rows -> [`reconstruct_norm`] -> nested aggregate.
//! Write path: aggregate -> [`flatten_norm`] -> rows.
//! Both directions are pure, synchronous transformations over in-memory
//! collections; the storage adapter owns the actual reads and writes.

pub mod flatten;
pub mod reconstruct;
pub mod rows;

pub use flatten::flatten_norm;
pub use reconstruct::{build_documentation_tree, build_metadata_tree, reconstruct_norm};
pub use rows::{
    ConclusionRow, DocumentationKind, DocumentationRow, FileReferenceRow, FormulaRow,
    MetadataSectionRow, MetadatumRow, NormRow, NormTables, ParagraphRow, RecitalsRow,
};
