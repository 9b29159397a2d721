//! Round-trip and reconstruction tests for the row mapper

use chrono::{NaiveDate, TimeZone, Utc};
use uuid::Uuid;

use norm_store::domain::{
    Article, DocumentSection, DocumentSectionType, FileReference, MetadataSection,
    MetadataSectionName, Metadatum, MetadatumType, MetadatumValue, Norm, NormCategory, Paragraph,
};
use norm_store::error::{MappingError, ValueError};
use norm_store::mapper::{
    flatten_norm, reconstruct_norm, DocumentationKind, DocumentationRow, MetadataSectionRow,
    MetadatumRow, NormRow, NormTables, ParagraphRow,
};

fn empty_tables(norm_guid: Uuid) -> NormTables {
    NormTables {
        norm: NormRow { guid: norm_guid },
        files: Vec::new(),
        sections: Vec::new(),
        metadata: Vec::new(),
        recitals: None,
        formula: None,
        documentation: Vec::new(),
        paragraphs: Vec::new(),
        conclusion: None,
    }
}

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

fn metadatum_row(
    section_guid: Uuid,
    metadatum_type: MetadatumType,
    value: &str,
    order: i32,
) -> MetadatumRow {
    MetadatumRow {
        guid: Uuid::new_v4(),
        section_guid,
        metadatum_type,
        value: value.to_string(),
        order,
    }
}

/// A norm exercising every mapped part: nested and leaf metadata sections,
/// typed values, a mixed documentation tree, framing texts and files.
fn sample_norm() -> Norm {
    let print_announcement = MetadataSection::new(
        MetadataSectionName::PrintAnnouncement,
        vec![
            Metadatum::with_order(
                MetadatumValue::Text("BGBl I".into()),
                MetadatumType::AnnouncementGazette,
                1,
            ),
            Metadatum::with_order(MetadatumValue::Text("1102".into()), MetadatumType::Page, 1),
        ],
    );

    let citation_date = MetadataSection::new(
        MetadataSectionName::CitationDate,
        vec![Metadatum::new(
            MetadatumValue::Date(NaiveDate::from_ymd_opt(2022, 11, 19).unwrap()),
            MetadatumType::Date,
        )],
    )
    .with_order(2);

    let norm_provider = MetadataSection::new(
        MetadataSectionName::NormProvider,
        vec![
            Metadatum::new(MetadatumValue::Boolean(true), MetadatumType::ResolutionMajority),
            Metadatum::with_order(
                MetadatumValue::NormCategory(NormCategory::BaseNorm),
                MetadatumType::NormCategory,
                2,
            ),
        ],
    )
    .with_order(3);

    let article1 = Article::new(
        1,
        "§ 1",
        vec![
            Paragraph::new(Some("(1)"), "first paragraph"),
            Paragraph::new(Some("(2)"), "second paragraph"),
        ],
    )
    .with_heading("Scope");
    let article2 = Article::new(2, "§ 2", vec![]);
    let chapter = DocumentSection::new(
        1,
        "1",
        "Chapter 1",
        DocumentSectionType::Chapter,
        vec![article1.into(), article2.into()],
    );
    let book = DocumentSection::new(1, "I", "Book 1", DocumentSectionType::Book, vec![chapter.into()]);
    let trailing_article = Article::new(2, "§ 3", vec![Paragraph::new(None, "closing text")]);

    Norm::builder()
        .metadata_section(
            MetadataSection::parent(MetadataSectionName::OfficialReference, vec![print_announcement])
                .with_order(1),
        )
        .metadata_section(citation_date)
        .metadata_section(norm_provider)
        .documentation(book)
        .documentation(trailing_article)
        .recitals(Some("recitals"), Some("Recitals"), "recitals text")
        .formula("formula text")
        .conclusion("conclusion text")
        .file(FileReference::new(
            "norm.zip",
            "5891b5b522d5df086d0ff0b110fbd9d2",
            Utc.with_ymd_and_hms(2022, 11, 19, 12, 0, 0).unwrap(),
        ))
        .build()
}

#[test]
fn test_flatten_then_reconstruct_is_identity() {
    let norm = sample_norm();
    let tables = flatten_norm(&norm);
    let restored = reconstruct_norm(tables).unwrap();
    assert_eq!(restored, norm);
}

#[test]
fn test_reconstructs_two_level_section_tree() {
    let norm_guid = Uuid::new_v4();
    let reference = Uuid::new_v4();
    let print = Uuid::new_v4();

    let mut tables = empty_tables(norm_guid);
    tables.sections = vec![
        section_row(reference, norm_guid, MetadataSectionName::OfficialReference, 1, None),
        section_row(print, norm_guid, MetadataSectionName::PrintAnnouncement, 1, Some(reference)),
    ];
    tables.metadata = vec![
        metadatum_row(print, MetadatumType::AnnouncementGazette, "BGBl I", 1),
        metadatum_row(print, MetadatumType::Page, "1102", 1),
    ];

    let norm = reconstruct_norm(tables).unwrap();

    assert_eq!(norm.metadata_sections.len(), 1);
    let root = &norm.metadata_sections[0];
    assert_eq!(root.name, MetadataSectionName::OfficialReference);
    assert!(root.metadata.is_empty());
    let children = root.sections.as_ref().unwrap();
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].name, MetadataSectionName::PrintAnnouncement);
    assert_eq!(children[0].metadata.len(), 2);
    assert_eq!(children[0].metadata[0].value.as_text(), Some("BGBl I"));
}

#[test]
fn test_reconstructs_three_level_section_tree() {
    let norm_guid = Uuid::new_v4();
    let level1 = Uuid::new_v4();
    let level2 = Uuid::new_v4();
    let level3 = Uuid::new_v4();

    let mut tables = empty_tables(norm_guid);
    tables.sections = vec![
        section_row(level3, norm_guid, MetadataSectionName::PrintAnnouncement, 1, Some(level2)),
        section_row(level1, norm_guid, MetadataSectionName::StatusIndication, 1, None),
        section_row(level2, norm_guid, MetadataSectionName::Status, 1, Some(level1)),
    ];
    tables.metadata = vec![metadatum_row(level3, MetadatumType::Note, "deep note", 1)];

    let norm = reconstruct_norm(tables).unwrap();

    let first = &norm.metadata_sections[0];
    let second = &first.sections.as_ref().unwrap()[0];
    let third = &second.sections.as_ref().unwrap()[0];
    assert_eq!(first.name, MetadataSectionName::StatusIndication);
    assert_eq!(second.name, MetadataSectionName::Status);
    assert_eq!(third.name, MetadataSectionName::PrintAnnouncement);
    assert_eq!(third.metadata[0].value.as_text(), Some("deep note"));
}

#[test]
fn test_type_directed_conversion_from_rows() {
    let norm_guid = Uuid::new_v4();
    let citation = Uuid::new_v4();
    let provider = Uuid::new_v4();

    let mut tables = empty_tables(norm_guid);
    tables.sections = vec![
        section_row(citation, norm_guid, MetadataSectionName::CitationDate, 1, None),
        section_row(provider, norm_guid, MetadataSectionName::NormProvider, 2, None),
    ];
    tables.metadata = vec![
        metadatum_row(citation, MetadatumType::Date, "2022-11-19", 1),
        metadatum_row(provider, MetadatumType::ResolutionMajority, "true", 1),
    ];

    let norm = reconstruct_norm(tables).unwrap();

    let date = norm
        .first_metadatum(MetadataSectionName::CitationDate, MetadatumType::Date)
        .unwrap();
    assert_eq!(
        date.value.as_date(),
        Some(NaiveDate::from_ymd_opt(2022, 11, 19).unwrap())
    );

    let majority = norm
        .first_metadatum(MetadataSectionName::NormProvider, MetadatumType::ResolutionMajority)
        .unwrap();
    assert_eq!(majority.value.as_boolean(), Some(true));
}

#[test]
fn test_unknown_enum_value_is_a_mapping_error() {
    let norm_guid = Uuid::new_v4();
    let provider = Uuid::new_v4();

    let mut tables = empty_tables(norm_guid);
    tables.sections = vec![section_row(
        provider,
        norm_guid,
        MetadataSectionName::NormProvider,
        1,
        None,
    )];
    tables.metadata = vec![metadatum_row(
        provider,
        MetadatumType::NormCategory,
        "NOT_A_CATEGORY",
        1,
    )];

    let err = reconstruct_norm(tables).unwrap_err();
    match err {
        MappingError::Value { source, .. } => {
            assert!(matches!(source, ValueError::UnknownEnumValue { .. }));
        }
        other => panic!("expected value error, got {other:?}"),
    }
}

#[test]
fn test_orphaned_metadatum_fails_reconstruction() {
    let norm_guid = Uuid::new_v4();
    let missing_section = Uuid::new_v4();

    let mut tables = empty_tables(norm_guid);
    tables.metadata = vec![metadatum_row(missing_section, MetadatumType::Page, "1", 1)];

    let err = reconstruct_norm(tables).unwrap_err();
    assert!(matches!(
        err,
        MappingError::OrphanedMetadatum { section, .. } if section == missing_section
    ));
}

#[test]
fn test_mixed_documentation_siblings_keep_declared_order() {
    let norm_guid = Uuid::new_v4();
    let section_guid = Uuid::new_v4();

    let mut tables = empty_tables(norm_guid);
    tables.documentation = vec![
        DocumentationRow {
            guid: Uuid::new_v4(),
            norm_guid,
            parent_guid: None,
            kind: DocumentationKind::Article,
            order: 2,
            marker: "§ 1".to_string(),
            heading: None,
            section_type: None,
        },
        DocumentationRow {
            guid: section_guid,
            norm_guid,
            parent_guid: None,
            kind: DocumentationKind::Section,
            order: 1,
            marker: "1".to_string(),
            heading: Some("Chapter 1".to_string()),
            section_type: Some(DocumentSectionType::Chapter),
        },
        DocumentationRow {
            guid: Uuid::new_v4(),
            norm_guid,
            parent_guid: None,
            kind: DocumentationKind::Article,
            order: 3,
            marker: "§ 2".to_string(),
            heading: None,
            section_type: None,
        },
    ];

    let norm = reconstruct_norm(tables).unwrap();

    assert_eq!(norm.documentation.len(), 3);
    assert!(norm.documentation[0].as_section().is_some());
    assert_eq!(norm.documentation[0].order(), 1);
    assert_eq!(norm.documentation[1].marker(), "§ 1");
    assert_eq!(norm.documentation[2].marker(), "§ 2");
}

#[test]
fn test_nested_document_section_reconstructs_with_variant_tags() {
    let norm_guid = Uuid::new_v4();
    let book = Uuid::new_v4();
    let chapter = Uuid::new_v4();
    let article = Uuid::new_v4();

    let mut tables = empty_tables(norm_guid);
    tables.documentation = vec![
        DocumentationRow {
            guid: book,
            norm_guid,
            parent_guid: None,
            kind: DocumentationKind::Section,
            order: 1,
            marker: "I".to_string(),
            heading: Some("Book 1".to_string()),
            section_type: Some(DocumentSectionType::Book),
        },
        DocumentationRow {
            guid: chapter,
            norm_guid,
            parent_guid: Some(book),
            kind: DocumentationKind::Section,
            order: 1,
            marker: "1".to_string(),
            heading: Some("Chapter 1".to_string()),
            section_type: Some(DocumentSectionType::Chapter),
        },
        DocumentationRow {
            guid: article,
            norm_guid,
            parent_guid: Some(chapter),
            kind: DocumentationKind::Article,
            order: 1,
            marker: "§ 1".to_string(),
            heading: None,
            section_type: None,
        },
    ];
    tables.paragraphs = vec![ParagraphRow {
        guid: Uuid::new_v4(),
        article_guid: article,
        marker: Some("(1)".to_string()),
        text: "text".to_string(),
        order: 1,
    }];

    let norm = reconstruct_norm(tables).unwrap();

    let book = norm.documentation[0].as_section().unwrap();
    assert_eq!(book.section_type, DocumentSectionType::Book);
    let chapter = book.documentation[0].as_section().unwrap();
    assert_eq!(chapter.section_type, DocumentSectionType::Chapter);
    let article = chapter.documentation[0].as_article().unwrap();
    assert_eq!(article.paragraphs.len(), 1);
    assert_eq!(article.paragraphs[0].marker.as_deref(), Some("(1)"));
}

#[test]
fn test_dangling_documentation_parent_fails_reconstruction() {
    let norm_guid = Uuid::new_v4();
    let missing_parent = Uuid::new_v4();

    let mut tables = empty_tables(norm_guid);
    tables.documentation = vec![DocumentationRow {
        guid: Uuid::new_v4(),
        norm_guid,
        parent_guid: Some(missing_parent),
        kind: DocumentationKind::Article,
        order: 1,
        marker: "§ 1".to_string(),
        heading: None,
        section_type: None,
    }];

    let err = reconstruct_norm(tables).unwrap_err();
    assert!(matches!(
        err,
        MappingError::DanglingDocumentationParent { parent, .. } if parent == missing_parent
    ));
}
