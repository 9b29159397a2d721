//! Norm Repository
//!
//! Database access layer for norms and their child row sets. Reads collect
//! the flat rows and delegate tree reconstruction to the mapper; writes
//! flatten the aggregate and replace the child rows in one transaction
//! (whole-subtree replacement, the domain's only mutation model).

use anyhow::{Context, Result};
use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::norm::Norm;
use crate::mapper::rows::{
    ConclusionRow, DocumentationRow, FileReferenceRow, FormulaRow, MetadataSectionRow,
    MetadatumRow, NormRow, NormTables, ParagraphRow, RecitalsRow,
};
use crate::mapper::{flatten_norm, reconstruct_norm};

/// Repository for norm aggregates
#[derive(Clone)]
pub struct NormRepository {
    pool: PgPool,
}

impl NormRepository {
    /// Create a new norm repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Load a norm by guid, reconstructing the full aggregate
    pub async fn load_norm(&self, guid: Uuid) -> Result<Option<Norm>> {
        debug!("Loading norm {}", guid);

        let norm: Option<NormRow> = sqlx::query_as("SELECT guid FROM norms WHERE guid = $1")
            .bind(guid)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch norm row")?;

        let Some(norm) = norm else {
            return Ok(None);
        };

        let files: Vec<FileReferenceRow> = sqlx::query_as(
            r#"
            SELECT guid, norm_guid, name, hash, created_at
            FROM file_references
            WHERE norm_guid = $1
            ORDER BY created_at
            "#,
        )
        .bind(guid)
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch file reference rows")?;

        let sections: Vec<MetadataSectionRow> = sqlx::query_as(
            r#"
            SELECT guid, norm_guid, name, "order", section_guid
            FROM metadata_sections
            WHERE norm_guid = $1
            "#,
        )
        .bind(guid)
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch metadata section rows")?;

        let metadata: Vec<MetadatumRow> = sqlx::query_as(
            r#"
            SELECT m.guid, m.section_guid, m.metadatum_type, m.value, m."order"
            FROM metadata m
            JOIN metadata_sections s ON s.guid = m.section_guid
            WHERE s.norm_guid = $1
            "#,
        )
        .bind(guid)
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch metadatum rows")?;

        let documentation: Vec<DocumentationRow> = sqlx::query_as(
            r#"
            SELECT guid, norm_guid, parent_guid, kind, "order", marker, heading, section_type
            FROM documentation
            WHERE norm_guid = $1
            "#,
        )
        .bind(guid)
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch documentation rows")?;

        let paragraphs: Vec<ParagraphRow> = sqlx::query_as(
            r#"
            SELECT p.guid, p.article_guid, p.marker, p.text, p."order"
            FROM paragraphs p
            JOIN documentation d ON d.guid = p.article_guid
            WHERE d.norm_guid = $1
            "#,
        )
        .bind(guid)
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch paragraph rows")?;

        let recitals: Option<RecitalsRow> = sqlx::query_as(
            "SELECT guid, norm_guid, marker, heading, text FROM recitals WHERE norm_guid = $1",
        )
        .bind(guid)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch recitals row")?;

        let formula: Option<FormulaRow> =
            sqlx::query_as("SELECT guid, norm_guid, text FROM formulas WHERE norm_guid = $1")
                .bind(guid)
                .fetch_optional(&self.pool)
                .await
                .context("Failed to fetch formula row")?;

        let conclusion: Option<ConclusionRow> =
            sqlx::query_as("SELECT guid, norm_guid, text FROM conclusions WHERE norm_guid = $1")
                .bind(guid)
                .fetch_optional(&self.pool)
                .await
                .context("Failed to fetch conclusion row")?;

        let tables = NormTables {
            norm,
            files,
            sections,
            metadata,
            recitals,
            formula,
            documentation,
            paragraphs,
            conclusion,
        };

        let norm = reconstruct_norm(tables).context("Failed to reconstruct norm from rows")?;
        Ok(Some(norm))
    }

    /// Persist a norm, replacing all of its child rows
    pub async fn save_norm(&self, norm: &Norm) -> Result<()> {
        let tables = flatten_norm(norm);

        let mut tx = self.pool.begin().await.context("Failed to begin transaction")?;

        sqlx::query("INSERT INTO norms (guid) VALUES ($1) ON CONFLICT (guid) DO NOTHING")
            .bind(tables.norm.guid)
            .execute(&mut *tx)
            .await
            .context("Failed to upsert norm row")?;

        // Whole-subtree replacement: drop every child row, re-insert from the
        // flattened aggregate.
        sqlx::query(
            r#"
            DELETE FROM metadata
            WHERE section_guid IN (SELECT guid FROM metadata_sections WHERE norm_guid = $1)
            "#,
        )
        .bind(norm.guid)
        .execute(&mut *tx)
        .await
        .context("Failed to delete metadatum rows")?;

        sqlx::query(
            r#"
            DELETE FROM paragraphs
            WHERE article_guid IN (SELECT guid FROM documentation WHERE norm_guid = $1)
            "#,
        )
        .bind(norm.guid)
        .execute(&mut *tx)
        .await
        .context("Failed to delete paragraph rows")?;

        for table in [
            "metadata_sections",
            "documentation",
            "file_references",
            "recitals",
            "formulas",
            "conclusions",
        ] {
            sqlx::query(&format!("DELETE FROM {table} WHERE norm_guid = $1"))
                .bind(norm.guid)
                .execute(&mut *tx)
                .await
                .with_context(|| format!("Failed to delete rows from {table}"))?;
        }

        for row in &tables.sections {
            sqlx::query(
                r#"
                INSERT INTO metadata_sections (guid, norm_guid, name, "order", section_guid)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(row.guid)
            .bind(row.norm_guid)
            .bind(row.name)
            .bind(row.order)
            .bind(row.section_guid)
            .execute(&mut *tx)
            .await
            .context("Failed to insert metadata section row")?;
        }

        for row in &tables.metadata {
            sqlx::query(
                r#"
                INSERT INTO metadata (guid, section_guid, metadatum_type, value, "order")
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(row.guid)
            .bind(row.section_guid)
            .bind(row.metadatum_type)
            .bind(&row.value)
            .bind(row.order)
            .execute(&mut *tx)
            .await
            .context("Failed to insert metadatum row")?;
        }

        for row in &tables.documentation {
            sqlx::query(
                r#"
                INSERT INTO documentation
                    (guid, norm_guid, parent_guid, kind, "order", marker, heading, section_type)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                "#,
            )
            .bind(row.guid)
            .bind(row.norm_guid)
            .bind(row.parent_guid)
            .bind(row.kind)
            .bind(row.order)
            .bind(&row.marker)
            .bind(&row.heading)
            .bind(row.section_type)
            .execute(&mut *tx)
            .await
            .context("Failed to insert documentation row")?;
        }

        for row in &tables.paragraphs {
            sqlx::query(
                r#"
                INSERT INTO paragraphs (guid, article_guid, marker, text, "order")
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(row.guid)
            .bind(row.article_guid)
            .bind(&row.marker)
            .bind(&row.text)
            .bind(row.order)
            .execute(&mut *tx)
            .await
            .context("Failed to insert paragraph row")?;
        }

        for row in &tables.files {
            sqlx::query(
                r#"
                INSERT INTO file_references (guid, norm_guid, name, hash, created_at)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(row.guid)
            .bind(row.norm_guid)
            .bind(&row.name)
            .bind(&row.hash)
            .bind(row.created_at)
            .execute(&mut *tx)
            .await
            .context("Failed to insert file reference row")?;
        }

        if let Some(row) = &tables.recitals {
            sqlx::query(
                r#"
                INSERT INTO recitals (guid, norm_guid, marker, heading, text)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(row.guid)
            .bind(row.norm_guid)
            .bind(&row.marker)
            .bind(&row.heading)
            .bind(&row.text)
            .execute(&mut *tx)
            .await
            .context("Failed to insert recitals row")?;
        }

        if let Some(row) = &tables.formula {
            sqlx::query("INSERT INTO formulas (guid, norm_guid, text) VALUES ($1, $2, $3)")
                .bind(row.guid)
                .bind(row.norm_guid)
                .bind(&row.text)
                .execute(&mut *tx)
                .await
                .context("Failed to insert formula row")?;
        }

        if let Some(row) = &tables.conclusion {
            sqlx::query("INSERT INTO conclusions (guid, norm_guid, text) VALUES ($1, $2, $3)")
                .bind(row.guid)
                .bind(row.norm_guid)
                .bind(&row.text)
                .execute(&mut *tx)
                .await
                .context("Failed to insert conclusion row")?;
        }

        tx.commit().await.context("Failed to commit norm write")?;

        info!("Saved norm {}", norm.guid);
        Ok(())
    }

    /// Delete a norm and all of its child rows
    pub async fn delete_norm(&self, guid: Uuid) -> Result<bool> {
        let mut tx = self.pool.begin().await.context("Failed to begin transaction")?;

        sqlx::query(
            r#"
            DELETE FROM metadata
            WHERE section_guid IN (SELECT guid FROM metadata_sections WHERE norm_guid = $1)
            "#,
        )
        .bind(guid)
        .execute(&mut *tx)
        .await
        .context("Failed to delete metadatum rows")?;

        sqlx::query(
            r#"
            DELETE FROM paragraphs
            WHERE article_guid IN (SELECT guid FROM documentation WHERE norm_guid = $1)
            "#,
        )
        .bind(guid)
        .execute(&mut *tx)
        .await
        .context("Failed to delete paragraph rows")?;

        for table in [
            "metadata_sections",
            "documentation",
            "file_references",
            "recitals",
            "formulas",
            "conclusions",
        ] {
            sqlx::query(&format!("DELETE FROM {table} WHERE norm_guid = $1"))
                .bind(guid)
                .execute(&mut *tx)
                .await
                .with_context(|| format!("Failed to delete rows from {table}"))?;
        }

        let result = sqlx::query("DELETE FROM norms WHERE guid = $1")
            .bind(guid)
            .execute(&mut *tx)
            .await
            .context("Failed to delete norm row")?;

        tx.commit().await.context("Failed to commit norm delete")?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            info!("Deleted norm {}", guid);
        }
        Ok(deleted)
    }

    /// List the guids of all stored norms
    pub async fn list_norm_guids(&self) -> Result<Vec<Uuid>> {
        let guids = sqlx::query_scalar("SELECT guid FROM norms ORDER BY guid")
            .fetch_all(&self.pool)
            .await
            .context("Failed to list norm guids")?;
        Ok(guids)
    }
}
