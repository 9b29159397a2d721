//! JSON response schemas for the norms API
//!
//! These structs own the external field naming (camelCase) and the string
//! encodings of dates and values; the domain core stays naming-agnostic.
//! Documentation nodes serialize untagged: sections carry `type` and a
//! nested `documentation` list, articles carry `paragraphs`.

use serde::Serialize;
use uuid::Uuid;

use crate::domain::documentation::{Article, DocumentSection, DocumentSectionType, Documentation};
use crate::domain::metadata_section::{MetadataSection, MetadataSectionName};
use crate::domain::metadatum::{Metadatum, MetadatumType};
use crate::domain::norm::{Conclusion, FileReference, Formula, Norm, Recitals};

/// Full norm representation returned by the API
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormResponseSchema {
    pub guid: Uuid,
    pub eli: Option<String>,
    pub metadata_sections: Vec<MetadataSectionResponseSchema>,
    pub files: Vec<FileReferenceResponseSchema>,
    pub recitals: Option<RecitalsResponseSchema>,
    pub formula: Option<FormulaResponseSchema>,
    pub documentation: Vec<DocumentationResponseSchema>,
    pub conclusion: Option<ConclusionResponseSchema>,
}

impl NormResponseSchema {
    pub fn from_domain(norm: &Norm) -> Self {
        Self {
            guid: norm.guid,
            eli: norm.eli().ok().map(|eli| eli.to_string()),
            metadata_sections: norm
                .metadata_sections
                .iter()
                .map(MetadataSectionResponseSchema::from_domain)
                .collect(),
            files: norm
                .files
                .iter()
                .map(FileReferenceResponseSchema::from_domain)
                .collect(),
            recitals: norm.recitals.as_ref().map(RecitalsResponseSchema::from_domain),
            formula: norm.formula.as_ref().map(FormulaResponseSchema::from_domain),
            documentation: norm
                .documentation
                .iter()
                .map(DocumentationResponseSchema::from_domain)
                .collect(),
            conclusion: norm
                .conclusion
                .as_ref()
                .map(ConclusionResponseSchema::from_domain),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataSectionResponseSchema {
    pub guid: Uuid,
    pub name: MetadataSectionName,
    pub order: i32,
    pub metadata: Vec<MetadatumResponseSchema>,
    pub sections: Option<Vec<MetadataSectionResponseSchema>>,
}

impl MetadataSectionResponseSchema {
    pub fn from_domain(section: &MetadataSection) -> Self {
        Self {
            guid: section.guid,
            name: section.name,
            order: section.order,
            metadata: section
                .metadata
                .iter()
                .map(MetadatumResponseSchema::from_domain)
                .collect(),
            sections: section
                .sections
                .as_ref()
                .map(|children| children.iter().map(Self::from_domain).collect()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MetadatumResponseSchema {
    pub guid: Uuid,
    pub value: String,
    #[serde(rename = "type")]
    pub metadatum_type: MetadatumType,
    pub order: i32,
}

impl MetadatumResponseSchema {
    pub fn from_domain(metadatum: &Metadatum) -> Self {
        Self {
            guid: metadatum.guid,
            value: metadatum.value.to_stored_string(),
            metadatum_type: metadatum.metadatum_type,
            order: metadatum.order,
        }
    }
}

/// One documentation tree node, discriminated by its fields
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum DocumentationResponseSchema {
    Section(DocumentSectionResponseSchema),
    Article(ArticleResponseSchema),
}

impl DocumentationResponseSchema {
    pub fn from_domain(node: &Documentation) -> Self {
        match node {
            Documentation::Section(section) => {
                Self::Section(DocumentSectionResponseSchema::from_domain(section))
            }
            Documentation::Article(article) => {
                Self::Article(ArticleResponseSchema::from_domain(article))
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSectionResponseSchema {
    pub guid: Uuid,
    pub order: i32,
    pub marker: String,
    pub heading: String,
    #[serde(rename = "type")]
    pub section_type: DocumentSectionType,
    pub documentation: Vec<DocumentationResponseSchema>,
}

impl DocumentSectionResponseSchema {
    pub fn from_domain(section: &DocumentSection) -> Self {
        Self {
            guid: section.guid,
            order: section.order,
            marker: section.marker.clone(),
            heading: section.heading.clone(),
            section_type: section.section_type,
            documentation: section
                .documentation
                .iter()
                .map(DocumentationResponseSchema::from_domain)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleResponseSchema {
    pub guid: Uuid,
    pub order: i32,
    pub marker: String,
    pub heading: Option<String>,
    pub paragraphs: Vec<ParagraphResponseSchema>,
}

impl ArticleResponseSchema {
    pub fn from_domain(article: &Article) -> Self {
        Self {
            guid: article.guid,
            order: article.order,
            marker: article.marker.clone(),
            heading: article.heading.clone(),
            paragraphs: article
                .paragraphs
                .iter()
                .map(|paragraph| ParagraphResponseSchema {
                    guid: paragraph.guid,
                    marker: paragraph.marker.clone(),
                    text: paragraph.text.clone(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphResponseSchema {
    pub guid: Uuid,
    pub marker: Option<String>,
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecitalsResponseSchema {
    pub guid: Uuid,
    pub marker: Option<String>,
    pub heading: Option<String>,
    pub text: String,
}

impl RecitalsResponseSchema {
    pub fn from_domain(recitals: &Recitals) -> Self {
        Self {
            guid: recitals.guid,
            marker: recitals.marker.clone(),
            heading: recitals.heading.clone(),
            text: recitals.text.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormulaResponseSchema {
    pub guid: Uuid,
    pub text: String,
}

impl FormulaResponseSchema {
    pub fn from_domain(formula: &Formula) -> Self {
        Self {
            guid: formula.guid,
            text: formula.text.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConclusionResponseSchema {
    pub guid: Uuid,
    pub text: String,
}

impl ConclusionResponseSchema {
    pub fn from_domain(conclusion: &Conclusion) -> Self {
        Self {
            guid: conclusion.guid,
            text: conclusion.text.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReferenceResponseSchema {
    pub guid: Uuid,
    pub name: String,
    pub hash: String,
    pub created_at: String,
}

impl FileReferenceResponseSchema {
    pub fn from_domain(file: &FileReference) -> Self {
        Self {
            guid: file.guid,
            name: file.name.clone(),
            hash: file.hash.clone(),
            created_at: file.created_at.to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::documentation::Paragraph;
    use crate::domain::metadatum::MetadatumValue;

    #[test]
    fn test_norm_schema_field_naming() {
        let norm = Norm::builder()
            .metadata_section(MetadataSection::new(
                MetadataSectionName::Norm,
                vec![Metadatum::new(
                    MetadatumValue::Text("ABC".into()),
                    MetadatumType::RisAbbreviation,
                )],
            ))
            .build();

        let schema = NormResponseSchema::from_domain(&norm);
        let json = serde_json::to_value(&schema).unwrap();

        assert!(json.get("metadataSections").is_some());
        let metadatum = &json["metadataSections"][0]["metadata"][0];
        assert_eq!(metadatum["type"], "RIS_ABBREVIATION");
        assert_eq!(metadatum["value"], "ABC");
    }

    #[test]
    fn test_documentation_schema_discriminates_by_fields() {
        let article = Article::new(1, "§ 1", vec![Paragraph::new(Some("(1)"), "text")]);
        let section = DocumentSection::new(
            2,
            "1",
            "Chapter 1",
            DocumentSectionType::Chapter,
            vec![article.into()],
        );
        let norm = Norm::builder().documentation(section).build();

        let json = serde_json::to_value(NormResponseSchema::from_domain(&norm)).unwrap();
        let root = &json["documentation"][0];
        assert_eq!(root["type"], "CHAPTER");
        assert_eq!(root["documentation"][0]["paragraphs"][0]["marker"], "(1)");
    }
}
