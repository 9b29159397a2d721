//! Flat rows to nested aggregate
//!
//! Reconstruction rebuilds two independent trees from foreign-key-linked row
//! sets: the metadata-section tree and the polymorphic documentation tree.
//! Both builders index children by parent guid up front and recurse to
//! arbitrary depth. Referential inconsistencies are reported as typed
//! `MappingError`s, never dropped.

use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use crate::domain::documentation::{Article, DocumentSection, Documentation, Paragraph};
use crate::domain::metadata_section::MetadataSection;
use crate::domain::metadatum::{Metadatum, MetadatumValue};
use crate::domain::norm::{Conclusion, FileReference, Formula, Norm, Recitals};
use crate::error::MappingError;
use crate::mapper::rows::{
    DocumentationKind, DocumentationRow, MetadataSectionRow, MetadatumRow, NormTables, ParagraphRow,
};

/// Rebuild the full norm aggregate from its persisted row sets.
///
/// Pure and synchronous; concurrent invocations over independent snapshots
/// share no state.
pub fn reconstruct_norm(tables: NormTables) -> Result<Norm, MappingError> {
    let metadata_sections = build_metadata_tree(&tables.sections, &tables.metadata)?;
    let documentation = build_documentation_tree(&tables.documentation, &tables.paragraphs)?;

    let files = tables
        .files
        .into_iter()
        .map(|row| FileReference {
            guid: row.guid,
            name: row.name,
            hash: row.hash,
            created_at: row.created_at,
        })
        .collect();

    let recitals = tables.recitals.map(|row| Recitals {
        guid: row.guid,
        marker: row.marker,
        heading: row.heading,
        text: row.text,
    });

    let formula = tables.formula.map(|row| Formula {
        guid: row.guid,
        text: row.text,
    });

    let conclusion = tables.conclusion.map(|row| Conclusion {
        guid: row.guid,
        text: row.text,
    });

    Ok(Norm {
        guid: tables.norm.guid,
        metadata_sections,
        files,
        recitals,
        formula,
        documentation,
        conclusion,
    })
}

/// Rebuild the metadata-section trees from flat parent/child rows.
///
/// Returns the root-level sections (those without a parent), each populated
/// recursively. Depth is arbitrary; nothing assumes the one-parent-one-child
/// layout of typical data.
pub fn build_metadata_tree(
    section_rows: &[MetadataSectionRow],
    metadatum_rows: &[MetadatumRow],
) -> Result<Vec<MetadataSection>, MappingError> {
    let known: HashSet<Uuid> = section_rows.iter().map(|row| row.guid).collect();

    for row in section_rows {
        if let Some(parent) = row.section_guid {
            if !known.contains(&parent) {
                return Err(MappingError::DanglingSectionParent {
                    guid: row.guid,
                    parent,
                });
            }
        }
    }
    for row in metadatum_rows {
        if !known.contains(&row.section_guid) {
            return Err(MappingError::OrphanedMetadatum {
                guid: row.guid,
                section: row.section_guid,
            });
        }
    }

    let mut children: HashMap<Uuid, Vec<&MetadataSectionRow>> = HashMap::new();
    let mut roots: Vec<&MetadataSectionRow> = Vec::new();
    for row in section_rows {
        match row.section_guid {
            Some(parent) => children.entry(parent).or_default().push(row),
            None => roots.push(row),
        }
    }

    let mut metadata_by_section: HashMap<Uuid, Vec<&MetadatumRow>> = HashMap::new();
    for row in metadatum_rows {
        metadata_by_section.entry(row.section_guid).or_default().push(row);
    }

    roots.sort_by_key(|row| row.order);
    let mut built = 0usize;
    let sections = roots
        .iter()
        .map(|row| build_section(row, &children, &metadata_by_section, &mut built))
        .collect::<Result<Vec<_>, _>>()?;

    // Rows whose parent chain never reaches a root would otherwise vanish.
    if built != section_rows.len() {
        return Err(MappingError::UnreachableSectionRows {
            count: section_rows.len() - built,
        });
    }

    Ok(sections)
}

fn build_section(
    row: &MetadataSectionRow,
    children: &HashMap<Uuid, Vec<&MetadataSectionRow>>,
    metadata_by_section: &HashMap<Uuid, Vec<&MetadatumRow>>,
    built: &mut usize,
) -> Result<MetadataSection, MappingError> {
    *built += 1;

    let sections = match children.get(&row.guid) {
        Some(child_rows) => {
            let mut child_rows = child_rows.clone();
            child_rows.sort_by_key(|child| child.order);
            let built_children = child_rows
                .iter()
                .map(|child| build_section(child, children, metadata_by_section, built))
                .collect::<Result<Vec<_>, _>>()?;
            Some(built_children)
        }
        None => None,
    };

    let mut metadatum_rows = metadata_by_section
        .get(&row.guid)
        .cloned()
        .unwrap_or_default();
    metadatum_rows.sort_by_key(|metadatum| metadatum.order);
    let metadata = metadatum_rows
        .iter()
        .map(|metadatum| metadatum_from_row(metadatum))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(MetadataSection {
        guid: row.guid,
        name: row.name,
        order: row.order,
        metadata,
        sections,
    })
}

fn metadatum_from_row(row: &MetadatumRow) -> Result<Metadatum, MappingError> {
    let value = MetadatumValue::parse(row.metadatum_type, &row.value)
        .map_err(|source| MappingError::Value {
            guid: row.guid,
            source,
        })?;

    Ok(Metadatum {
        guid: row.guid,
        value,
        metadatum_type: row.metadatum_type,
        order: row.order,
    })
}

/// Rebuild the polymorphic documentation tree from flat rows.
///
/// Sibling order interleaves articles and sections by their `order` field,
/// stable on ties. A parent reference must name an existing SECTION row;
/// paragraphs must name an existing ARTICLE row.
pub fn build_documentation_tree(
    documentation_rows: &[DocumentationRow],
    paragraph_rows: &[ParagraphRow],
) -> Result<Vec<Documentation>, MappingError> {
    let by_guid: HashMap<Uuid, &DocumentationRow> = documentation_rows
        .iter()
        .map(|row| (row.guid, row))
        .collect();

    for row in documentation_rows {
        if let Some(parent) = row.parent_guid {
            match by_guid.get(&parent) {
                None => {
                    return Err(MappingError::DanglingDocumentationParent {
                        guid: row.guid,
                        parent,
                    })
                }
                Some(parent_row) if parent_row.kind == DocumentationKind::Article => {
                    return Err(MappingError::ArticleWithChildren { guid: parent_row.guid })
                }
                Some(_) => {}
            }
        }
    }
    for row in paragraph_rows {
        match by_guid.get(&row.article_guid) {
            Some(article_row) if article_row.kind == DocumentationKind::Article => {}
            _ => {
                return Err(MappingError::ParagraphOutsideArticle {
                    guid: row.guid,
                    article: row.article_guid,
                })
            }
        }
    }

    let mut children: HashMap<Uuid, Vec<&DocumentationRow>> = HashMap::new();
    let mut roots: Vec<&DocumentationRow> = Vec::new();
    for row in documentation_rows {
        match row.parent_guid {
            Some(parent) => children.entry(parent).or_default().push(row),
            None => roots.push(row),
        }
    }

    let mut paragraphs_by_article: HashMap<Uuid, Vec<&ParagraphRow>> = HashMap::new();
    for row in paragraph_rows {
        paragraphs_by_article
            .entry(row.article_guid)
            .or_default()
            .push(row);
    }

    roots.sort_by_key(|row| row.order);
    let mut built = 0usize;
    let documentation = roots
        .iter()
        .map(|row| build_documentation_node(row, &children, &paragraphs_by_article, &mut built))
        .collect::<Result<Vec<_>, _>>()?;

    if built != documentation_rows.len() {
        return Err(MappingError::UnreachableDocumentationRows {
            count: documentation_rows.len() - built,
        });
    }

    Ok(documentation)
}

fn build_documentation_node(
    row: &DocumentationRow,
    children: &HashMap<Uuid, Vec<&DocumentationRow>>,
    paragraphs_by_article: &HashMap<Uuid, Vec<&ParagraphRow>>,
    built: &mut usize,
) -> Result<Documentation, MappingError> {
    *built += 1;

    match row.kind {
        DocumentationKind::Article => {
            let mut paragraph_rows = paragraphs_by_article
                .get(&row.guid)
                .cloned()
                .unwrap_or_default();
            paragraph_rows.sort_by_key(|paragraph| paragraph.order);
            let paragraphs = paragraph_rows
                .iter()
                .map(|paragraph| Paragraph {
                    guid: paragraph.guid,
                    marker: paragraph.marker.clone(),
                    text: paragraph.text.clone(),
                })
                .collect();

            Ok(Documentation::Article(Article {
                guid: row.guid,
                order: row.order,
                marker: row.marker.clone(),
                heading: row.heading.clone(),
                paragraphs,
            }))
        }
        DocumentationKind::Section => {
            let section_type = row
                .section_type
                .ok_or(MappingError::MissingSectionType { guid: row.guid })?;

            let mut child_rows = children.get(&row.guid).cloned().unwrap_or_default();
            child_rows.sort_by_key(|child| child.order);
            let documentation = child_rows
                .iter()
                .map(|child| {
                    build_documentation_node(child, children, paragraphs_by_article, built)
                })
                .collect::<Result<Vec<_>, _>>()?;

            Ok(Documentation::Section(DocumentSection {
                guid: row.guid,
                order: row.order,
                marker: row.marker.clone(),
                heading: row.heading.clone().unwrap_or_default(),
                section_type,
                documentation,
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::documentation::DocumentSectionType;
    use crate::domain::metadata_section::MetadataSectionName;
    use crate::domain::metadatum::MetadatumType;

    fn section_row(
        guid: Uuid,
        norm_guid: Uuid,
        name: MetadataSectionName,
        order: i32,
        parent: Option<Uuid>,
    ) -> MetadataSectionRow {
        MetadataSectionRow {
            guid,
            norm_guid,
            name,
            order,
            section_guid: parent,
        }
    }

    #[test]
    fn test_dangling_parent_is_reported() {
        let norm_guid = Uuid::new_v4();
        let missing = Uuid::new_v4();
        let rows = vec![section_row(
            Uuid::new_v4(),
            norm_guid,
            MetadataSectionName::PrintAnnouncement,
            1,
            Some(missing),
        )];

        let err = build_metadata_tree(&rows, &[]).unwrap_err();
        assert!(matches!(
            err,
            MappingError::DanglingSectionParent { parent, .. } if parent == missing
        ));
    }

    #[test]
    fn test_orphaned_metadatum_is_reported() {
        let orphan_section = Uuid::new_v4();
        let rows = vec![MetadatumRow {
            guid: Uuid::new_v4(),
            section_guid: orphan_section,
            metadatum_type: MetadatumType::Page,
            value: "1102".to_string(),
            order: 1,
        }];

        let err = build_metadata_tree(&[], &rows).unwrap_err();
        assert!(matches!(
            err,
            MappingError::OrphanedMetadatum { section, .. } if section == orphan_section
        ));
    }

    #[test]
    fn test_cyclic_section_rows_are_reported() {
        let norm_guid = Uuid::new_v4();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let rows = vec![
            section_row(a, norm_guid, MetadataSectionName::Lead, 1, Some(b)),
            section_row(b, norm_guid, MetadataSectionName::Lead, 2, Some(a)),
        ];

        let err = build_metadata_tree(&rows, &[]).unwrap_err();
        assert_eq!(err, MappingError::UnreachableSectionRows { count: 2 });
    }

    #[test]
    fn test_section_under_article_is_rejected() {
        let norm_guid = Uuid::new_v4();
        let article = Uuid::new_v4();
        let rows = vec![
            DocumentationRow {
                guid: article,
                norm_guid,
                parent_guid: None,
                kind: DocumentationKind::Article,
                order: 1,
                marker: "§ 1".to_string(),
                heading: None,
                section_type: None,
            },
            DocumentationRow {
                guid: Uuid::new_v4(),
                norm_guid,
                parent_guid: Some(article),
                kind: DocumentationKind::Section,
                order: 1,
                marker: "1".to_string(),
                heading: Some("Chapter".to_string()),
                section_type: Some(DocumentSectionType::Chapter),
            },
        ];

        let err = build_documentation_tree(&rows, &[]).unwrap_err();
        assert_eq!(err, MappingError::ArticleWithChildren { guid: article });
    }

    #[test]
    fn test_paragraph_must_reference_an_article() {
        let norm_guid = Uuid::new_v4();
        let section = Uuid::new_v4();
        let rows = vec![DocumentationRow {
            guid: section,
            norm_guid,
            parent_guid: None,
            kind: DocumentationKind::Section,
            order: 1,
            marker: "1".to_string(),
            heading: Some("Book".to_string()),
            section_type: Some(DocumentSectionType::Book),
        }];
        let paragraphs = vec![ParagraphRow {
            guid: Uuid::new_v4(),
            article_guid: section,
            marker: None,
            text: "text".to_string(),
            order: 1,
        }];

        let err = build_documentation_tree(&rows, &paragraphs).unwrap_err();
        assert!(matches!(err, MappingError::ParagraphOutsideArticle { .. }));
    }
}
