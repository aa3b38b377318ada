//! SQLite-backed result store.
//!
//! The connection is opened per operation and dropped when it returns; no
//! transaction outlives a single call.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use tracing::debug;

use super::{ModelRecord, ResultStore, StoreError, StoredRecord, TermGroup};
use crate::difficulty::{DifficultyAssessment, DifficultyTier};
use crate::extractor::ExtractedFields;

/// SQLite-backed result store.
pub struct SqliteResultStore {
    path: PathBuf,
}

impl SqliteResultStore {
    /// Create a store at `path`, creating the database file and table if needed.
    pub fn new(path: &Path) -> Result<Self, StoreError> {
        let store = Self {
            path: path.to_path_buf(),
        };
        let conn = store.open()?;
        Self::initialize_schema(&conn)?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(&self) -> Result<Connection, StoreError> {
        Ok(Connection::open(&self.path)?)
    }

    fn initialize_schema(conn: &Connection) -> Result<(), StoreError> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS models (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                term TEXT NOT NULL,
                title TEXT NOT NULL,
                url TEXT NOT NULL,
                thumbnail_url TEXT NOT NULL,
                material TEXT NOT NULL,
                layer_height TEXT NOT NULL,
                infill_percent TEXT NOT NULL,
                printer_model TEXT NOT NULL,
                wall_count TEXT NOT NULL,
                difficulty_tier TEXT NOT NULL,
                difficulty_reason TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_models_term ON models(term);
            "#,
        )?;
        Ok(())
    }

    fn row_to_record(row: &rusqlite::Row) -> rusqlite::Result<StoredRecord> {
        let id: i64 = row.get(0)?;
        let tier_str: String = row.get(10)?;
        let created_at_str: String = row.get(12)?;

        // Unknown tier text can only come from manual edits; treat as the lowest tier.
        let tier = tier_str.parse().unwrap_or(DifficultyTier::Low);

        let created_at = DateTime::parse_from_rfc3339(&created_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now());

        Ok(StoredRecord {
            id,
            created_at,
            record: ModelRecord {
                search_term: row.get(1)?,
                title: row.get(2)?,
                url: row.get(3)?,
                thumbnail_url: row.get(4)?,
                fields: ExtractedFields {
                    material: row.get(5)?,
                    layer_height: row.get(6)?,
                    infill_percent: row.get(7)?,
                    printer_model: row.get(8)?,
                    wall_count: row.get(9)?,
                },
                difficulty: DifficultyAssessment {
                    tier,
                    reason: row.get(11)?,
                },
            },
        })
    }
}

const SELECT_COLUMNS: &str = "SELECT id, term, title, url, thumbnail_url, material, layer_height, infill_percent, printer_model, wall_count, difficulty_tier, difficulty_reason, created_at FROM models";

impl ResultStore for SqliteResultStore {
    fn replace_for_term(&self, term: &str, records: &[ModelRecord]) -> Result<usize, StoreError> {
        let mut conn = self.open()?;
        let tx = conn.transaction()?;

        let deleted = tx.execute("DELETE FROM models WHERE term = ?", params![term])?;

        let now = Utc::now().to_rfc3339();
        {
            let mut stmt = tx.prepare(
                "INSERT INTO models (term, title, url, thumbnail_url, material, layer_height, infill_percent, printer_model, wall_count, difficulty_tier, difficulty_reason, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            )?;
            for record in records {
                stmt.execute(params![
                    term,
                    record.title,
                    record.url,
                    record.thumbnail_url,
                    record.fields.material,
                    record.fields.layer_height,
                    record.fields.infill_percent,
                    record.fields.printer_model,
                    record.fields.wall_count,
                    record.difficulty.tier.as_str(),
                    record.difficulty.reason,
                    now,
                ])?;
            }
        }

        tx.commit()?;

        debug!(
            term = term,
            deleted = deleted,
            inserted = records.len(),
            "Replaced stored records"
        );

        Ok(records.len())
    }

    fn read_all_grouped_by_term(&self) -> Result<Vec<TermGroup>, StoreError> {
        let conn = self.open()?;

        let sql = format!("{} ORDER BY id DESC", SELECT_COLUMNS);
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map([], Self::row_to_record)?;

        // Newest first: the first time a term shows up fixes its group position.
        let mut groups: Vec<TermGroup> = Vec::new();
        for row in rows {
            let stored = row?;
            match groups
                .iter_mut()
                .find(|g| g.term == stored.record.search_term)
            {
                Some(group) => group.records.push(stored),
                None => groups.push(TermGroup {
                    term: stored.record.search_term.clone(),
                    records: vec![stored],
                }),
            }
        }

        for group in &mut groups {
            group.records.reverse();
        }

        Ok(groups)
    }

    fn count_for_term(&self, term: &str) -> Result<usize, StoreError> {
        let conn = self.open()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM models WHERE term = ?",
            params![term],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }
}
