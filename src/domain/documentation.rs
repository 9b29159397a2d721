//! Documentation tree of a norm
//!
//! The textual body of a norm is a recursive, polymorphic tree: any node is
//! either an `Article` (leaf content, carrying paragraphs) or a
//! `DocumentSection` (structural node, nesting further documentation of
//! either kind). The variant is an explicit discriminant, not inheritance;
//! schema and row conversion switch over it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Structural level of a document section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "database", derive(sqlx::Type))]
#[cfg_attr(
    feature = "database",
    sqlx(type_name = "document_section_type", rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum DocumentSectionType {
    Book,
    Part,
    Chapter,
    Subchapter,
    Section,
    Subsection,
    Title,
    Subtitle,
    Uncategorized,
}

/// A block of text within an article
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    pub guid: Uuid,
    pub marker: Option<String>,
    pub text: String,
}

impl Paragraph {
    pub fn new(marker: Option<&str>, text: impl Into<String>) -> Self {
        Self {
            guid: Uuid::new_v4(),
            marker: marker.map(str::to_string),
            text: text.into(),
        }
    }
}

/// Leaf content node: an article and its paragraphs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub guid: Uuid,
    pub order: i32,
    pub marker: String,
    pub heading: Option<String>,
    pub paragraphs: Vec<Paragraph>,
}

impl Article {
    pub fn new(order: i32, marker: impl Into<String>, paragraphs: Vec<Paragraph>) -> Self {
        Self {
            guid: Uuid::new_v4(),
            order,
            marker: marker.into(),
            heading: None,
            paragraphs,
        }
    }

    pub fn with_heading(mut self, heading: impl Into<String>) -> Self {
        self.heading = Some(heading.into());
        self
    }
}

/// Structural node nesting further documentation of either kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSection {
    pub guid: Uuid,
    pub order: i32,
    pub marker: String,
    pub heading: String,
    pub section_type: DocumentSectionType,
    pub documentation: Vec<Documentation>,
}

impl DocumentSection {
    pub fn new(
        order: i32,
        marker: impl Into<String>,
        heading: impl Into<String>,
        section_type: DocumentSectionType,
        documentation: Vec<Documentation>,
    ) -> Self {
        Self {
            guid: Uuid::new_v4(),
            order,
            marker: marker.into(),
            heading: heading.into(),
            section_type,
            documentation,
        }
    }
}

/// A node of the documentation tree, discriminated by kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Documentation {
    Article(Article),
    Section(DocumentSection),
}

impl Documentation {
    pub fn guid(&self) -> Uuid {
        match self {
            Documentation::Article(article) => article.guid,
            Documentation::Section(section) => section.guid,
        }
    }

    pub fn order(&self) -> i32 {
        match self {
            Documentation::Article(article) => article.order,
            Documentation::Section(section) => section.order,
        }
    }

    pub fn marker(&self) -> &str {
        match self {
            Documentation::Article(article) => &article.marker,
            Documentation::Section(section) => &section.marker,
        }
    }

    pub fn heading(&self) -> Option<&str> {
        match self {
            Documentation::Article(article) => article.heading.as_deref(),
            Documentation::Section(section) => Some(&section.heading),
        }
    }

    pub fn as_article(&self) -> Option<&Article> {
        match self {
            Documentation::Article(article) => Some(article),
            Documentation::Section(_) => None,
        }
    }

    pub fn as_section(&self) -> Option<&DocumentSection> {
        match self {
            Documentation::Article(_) => None,
            Documentation::Section(section) => Some(section),
        }
    }
}

impl From<Article> for Documentation {
    fn from(article: Article) -> Self {
        Documentation::Article(article)
    }
}

impl From<DocumentSection> for Documentation {
    fn from(section: DocumentSection) -> Self {
        Documentation::Section(section)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_accessors() {
        let article = Article::new(1, "§ 1", vec![Paragraph::new(Some("(1)"), "text")])
            .with_heading("Scope");
        let node: Documentation = article.into();

        assert_eq!(node.marker(), "§ 1");
        assert_eq!(node.heading(), Some("Scope"));
        assert!(node.as_article().is_some());
        assert!(node.as_section().is_none());
    }

    #[test]
    fn test_nested_sections_hold_mixed_children() {
        let article = Article::new(1, "§ 1", vec![]);
        let chapter = DocumentSection::new(
            2,
            "1",
            "Chapter 1",
            DocumentSectionType::Chapter,
            vec![article.into()],
        );
        let book: Documentation = DocumentSection::new(
            1,
            "I",
            "Book 1",
            DocumentSectionType::Book,
            vec![chapter.into()],
        )
        .into();

        let inner = book.as_section().unwrap();
        assert_eq!(inner.documentation.len(), 1);
        let chapter = inner.documentation[0].as_section().unwrap();
        assert_eq!(chapter.section_type, DocumentSectionType::Chapter);
        assert!(chapter.documentation[0].as_article().is_some());
    }
}
