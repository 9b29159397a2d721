//! Nested aggregate to flat rows
//!
//! Flattening walks both trees depth-first and threads the parent guid down:
//! each metadata-section row records its parent's guid (None for roots) and
//! each metadatum row its owning section; documentation rows record the node
//! kind discriminant and their parent node (None when attached directly to
//! the norm). Total over well-formed aggregates; never fails.

use uuid::Uuid;

use crate::domain::documentation::Documentation;
use crate::domain::metadata_section::MetadataSection;
use crate::domain::norm::Norm;
use crate::mapper::rows::{
    ConclusionRow, DocumentationKind, DocumentationRow, FileReferenceRow, FormulaRow,
    MetadataSectionRow, MetadatumRow, NormRow, NormTables, ParagraphRow, RecitalsRow,
};

/// Flatten the aggregate into the row sets the storage layer persists
pub fn flatten_norm(norm: &Norm) -> NormTables {
    let mut sections = Vec::new();
    let mut metadata = Vec::new();
    for section in &norm.metadata_sections {
        flatten_section(section, norm.guid, None, &mut sections, &mut metadata);
    }

    let mut documentation = Vec::new();
    let mut paragraphs = Vec::new();
    for node in &norm.documentation {
        flatten_documentation(node, norm.guid, None, &mut documentation, &mut paragraphs);
    }

    let files = norm
        .files
        .iter()
        .map(|file| FileReferenceRow {
            guid: file.guid,
            norm_guid: norm.guid,
            name: file.name.clone(),
            hash: file.hash.clone(),
            created_at: file.created_at,
        })
        .collect();

    let recitals = norm.recitals.as_ref().map(|recitals| RecitalsRow {
        guid: recitals.guid,
        norm_guid: norm.guid,
        marker: recitals.marker.clone(),
        heading: recitals.heading.clone(),
        text: recitals.text.clone(),
    });

    let formula = norm.formula.as_ref().map(|formula| FormulaRow {
        guid: formula.guid,
        norm_guid: norm.guid,
        text: formula.text.clone(),
    });

    let conclusion = norm.conclusion.as_ref().map(|conclusion| ConclusionRow {
        guid: conclusion.guid,
        norm_guid: norm.guid,
        text: conclusion.text.clone(),
    });

    NormTables {
        norm: NormRow { guid: norm.guid },
        files,
        sections,
        metadata,
        recitals,
        formula,
        documentation,
        paragraphs,
        conclusion,
    }
}

fn flatten_section(
    section: &MetadataSection,
    norm_guid: Uuid,
    parent_guid: Option<Uuid>,
    sections: &mut Vec<MetadataSectionRow>,
    metadata: &mut Vec<MetadatumRow>,
) {
    sections.push(MetadataSectionRow {
        guid: section.guid,
        norm_guid,
        name: section.name,
        order: section.order,
        section_guid: parent_guid,
    });

    for metadatum in &section.metadata {
        metadata.push(MetadatumRow {
            guid: metadatum.guid,
            section_guid: section.guid,
            metadatum_type: metadatum.metadatum_type,
            value: metadatum.value.to_stored_string(),
            order: metadatum.order,
        });
    }

    for child in section.sections.as_deref().unwrap_or(&[]) {
        flatten_section(child, norm_guid, Some(section.guid), sections, metadata);
    }
}

fn flatten_documentation(
    node: &Documentation,
    norm_guid: Uuid,
    parent_guid: Option<Uuid>,
    documentation: &mut Vec<DocumentationRow>,
    paragraphs: &mut Vec<ParagraphRow>,
) {
    match node {
        Documentation::Article(article) => {
            documentation.push(DocumentationRow {
                guid: article.guid,
                norm_guid,
                parent_guid,
                kind: DocumentationKind::Article,
                order: article.order,
                marker: article.marker.clone(),
                heading: article.heading.clone(),
                section_type: None,
            });

            // Positional order key; the domain list is the source of truth.
            for (position, paragraph) in article.paragraphs.iter().enumerate() {
                paragraphs.push(ParagraphRow {
                    guid: paragraph.guid,
                    article_guid: article.guid,
                    marker: paragraph.marker.clone(),
                    text: paragraph.text.clone(),
                    order: position as i32 + 1,
                });
            }
        }
        Documentation::Section(section) => {
            documentation.push(DocumentationRow {
                guid: section.guid,
                norm_guid,
                parent_guid,
                kind: DocumentationKind::Section,
                order: section.order,
                marker: section.marker.clone(),
                heading: Some(section.heading.clone()),
                section_type: Some(section.section_type),
            });

            for child in &section.documentation {
                flatten_documentation(child, norm_guid, Some(section.guid), documentation, paragraphs);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::documentation::{Article, DocumentSection, DocumentSectionType, Paragraph};
    use crate::domain::metadata_section::MetadataSectionName;
    use crate::domain::metadatum::{Metadatum, MetadatumType};

    #[test]
    fn test_nested_sections_record_parent_guids() {
        let child = MetadataSection::new(
            MetadataSectionName::PrintAnnouncement,
            vec![Metadatum::text("BGBl I", MetadatumType::AnnouncementGazette)],
        );
        let child_guid = child.guid;
        let parent = MetadataSection::parent(MetadataSectionName::OfficialReference, vec![child]);
        let parent_guid = parent.guid;
        let norm = Norm::builder().metadata_section(parent).build();

        let tables = flatten_norm(&norm);

        assert_eq!(tables.sections.len(), 2);
        let parent_row = tables.sections.iter().find(|r| r.guid == parent_guid).unwrap();
        assert_eq!(parent_row.section_guid, None);
        let child_row = tables.sections.iter().find(|r| r.guid == child_guid).unwrap();
        assert_eq!(child_row.section_guid, Some(parent_guid));
        assert_eq!(tables.metadata.len(), 1);
        assert_eq!(tables.metadata[0].section_guid, child_guid);
        assert_eq!(tables.metadata[0].value, "BGBl I");
    }

    #[test]
    fn test_documentation_rows_record_kind_and_parent() {
        let article = Article::new(1, "§ 1", vec![Paragraph::new(Some("(1)"), "text")]);
        let article_guid = article.guid;
        let chapter = DocumentSection::new(
            1,
            "1",
            "Chapter 1",
            DocumentSectionType::Chapter,
            vec![article.into()],
        );
        let chapter_guid = chapter.guid;
        let norm = Norm::builder().documentation(chapter).build();

        let tables = flatten_norm(&norm);

        assert_eq!(tables.documentation.len(), 2);
        let chapter_row = tables
            .documentation
            .iter()
            .find(|r| r.guid == chapter_guid)
            .unwrap();
        assert_eq!(chapter_row.kind, DocumentationKind::Section);
        assert_eq!(chapter_row.section_type, Some(DocumentSectionType::Chapter));
        assert_eq!(chapter_row.parent_guid, None);
        let article_row = tables
            .documentation
            .iter()
            .find(|r| r.guid == article_guid)
            .unwrap();
        assert_eq!(article_row.kind, DocumentationKind::Article);
        assert_eq!(article_row.parent_guid, Some(chapter_guid));
        assert_eq!(tables.paragraphs.len(), 1);
        assert_eq!(tables.paragraphs[0].article_guid, article_guid);
        assert_eq!(tables.paragraphs[0].order, 1);
    }
}
