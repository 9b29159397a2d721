//! Domain entities and values for norm documents

pub mod documentation;
pub mod eli;
pub mod metadata_section;
pub mod metadatum;
pub mod norm;

pub use documentation::{Article, DocumentSection, DocumentSectionType, Documentation, Paragraph};
pub use eli::Eli;
pub use metadata_section::{MetadataSection, MetadataSectionName};
pub use metadatum::{
    Metadatum, MetadatumType, MetadatumValue, NormCategory, OtherType, ProofIndication, ProofType,
    UndefinedDate,
};
pub use norm::{Conclusion, FileReference, Formula, Norm, NormBuilder, Recitals};
