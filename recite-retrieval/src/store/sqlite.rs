//! SQLite store adapter
//!
//! Tables are created by `recite_common::db::create_tables`. Id lists are
//! bound as a single JSON array and expanded with `json_each`, so lookups of
//! any size use one prepared statement.

use super::{IdentityStore, PubMedStore, ScopusStore, SearchResultStore};
use async_trait::async_trait;
use recite_common::db::{init_database_pool, init_memory_pool};
use recite_common::model::{Identity, Pmid, PubMedArticle, ScopusArticle, SearchResultRecord};
use recite_common::Result;
use serde::de::DeserializeOwned;
use sqlx::{Row, SqlitePool};
use std::path::Path;

/// sqlx-backed store adapter
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (or create) a database file with tables in place
    pub async fn open(db_path: &Path) -> Result<Self> {
        Ok(Self::new(init_database_pool(db_path).await?))
    }

    /// Private in-memory database, mostly for tests
    pub async fn in_memory() -> Result<Self> {
        Ok(Self::new(init_memory_pool().await?))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn decode_documents<T: DeserializeOwned>(rows: Vec<sqlx::sqlite::SqliteRow>) -> Result<Vec<T>> {
    rows.into_iter()
        .map(|row| {
            let document: String = row.get("document");
            Ok(serde_json::from_str(&document)?)
        })
        .collect()
}

#[async_trait]
impl IdentityStore for SqliteStore {
    async fn save(&self, identity: &Identity) -> Result<()> {
        let document = serde_json::to_string(identity)?;
        sqlx::query(
            r#"
            INSERT INTO identities (uid, document, updated_at)
            VALUES (?, ?, CURRENT_TIMESTAMP)
            ON CONFLICT(uid) DO UPDATE SET
                document = excluded.document,
                updated_at = CURRENT_TIMESTAMP
            "#,
        )
        .bind(&identity.uid)
        .bind(document)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_by_uid(&self, uid: &str) -> Result<Option<Identity>> {
        let row = sqlx::query("SELECT document FROM identities WHERE uid = ?")
            .bind(uid)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let document: String = row.get("document");
                Ok(Some(serde_json::from_str(&document)?))
            }
            None => Ok(None),
        }
    }

    async fn find_all(&self) -> Result<Vec<Identity>> {
        let rows = sqlx::query("SELECT document FROM identities ORDER BY uid")
            .fetch_all(&self.pool)
            .await?;
        decode_documents(rows)
    }
}

#[async_trait]
impl PubMedStore for SqliteStore {
    async fn save(&self, articles: &[PubMedArticle]) -> Result<()> {
        if articles.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await?;
        for article in articles {
            let document = serde_json::to_string(article)?;
            sqlx::query(
                r#"
                INSERT INTO pubmed_articles (pmid, doi, document, updated_at)
                VALUES (?, ?, ?, CURRENT_TIMESTAMP)
                ON CONFLICT(pmid) DO UPDATE SET
                    doi = excluded.doi,
                    document = excluded.document,
                    updated_at = CURRENT_TIMESTAMP
                "#,
            )
            .bind(article.pmid)
            .bind(article.doi().map(str::to_lowercase))
            .bind(document)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        tracing::debug!(count = articles.len(), "Saved PubMed articles");
        Ok(())
    }

    async fn find_by_pmids(&self, pmids: &[Pmid]) -> Result<Vec<PubMedArticle>> {
        if pmids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = sqlx::query(
            "SELECT document FROM pubmed_articles \
             WHERE pmid IN (SELECT value FROM json_each(?)) ORDER BY pmid",
        )
        .bind(serde_json::to_string(pmids)?)
        .fetch_all(&self.pool)
        .await?;
        decode_documents(rows)
    }
}

#[async_trait]
impl SearchResultStore for SqliteStore {
    async fn save(&self, record: &SearchResultRecord) -> Result<()> {
        let document = serde_json::to_string(record)?;
        sqlx::query(
            r#"
            INSERT INTO search_results (uid, strategy_name, document, retrieved_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&record.uid)
        .bind(&record.strategy_name)
        .bind(document)
        .bind(record.retrieved_at.to_rfc3339())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_by_uid(&self, uid: &str) -> Result<Vec<SearchResultRecord>> {
        let rows = sqlx::query("SELECT document FROM search_results WHERE uid = ? ORDER BY id")
            .bind(uid)
            .fetch_all(&self.pool)
            .await?;
        decode_documents(rows)
    }
}

#[async_trait]
impl ScopusStore for SqliteStore {
    async fn save(&self, articles: &[ScopusArticle]) -> Result<()> {
        if articles.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await?;
        for article in articles {
            let document = serde_json::to_string(article)?;
            sqlx::query(
                r#"
                INSERT INTO scopus_articles (eid, pubmed_id, doi, document, updated_at)
                VALUES (?, ?, ?, ?, CURRENT_TIMESTAMP)
                ON CONFLICT(eid) DO UPDATE SET
                    pubmed_id = excluded.pubmed_id,
                    doi = excluded.doi,
                    document = excluded.document,
                    updated_at = CURRENT_TIMESTAMP
                "#,
            )
            .bind(&article.eid)
            .bind(article.pubmed_id)
            .bind(article.normalized_doi())
            .bind(document)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        tracing::debug!(count = articles.len(), "Saved Scopus articles");
        Ok(())
    }

    async fn find_by_pubmed_ids(&self, pmids: &[Pmid]) -> Result<Vec<ScopusArticle>> {
        if pmids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = sqlx::query(
            "SELECT document FROM scopus_articles \
             WHERE pubmed_id IN (SELECT value FROM json_each(?)) ORDER BY eid",
        )
        .bind(serde_json::to_string(pmids)?)
        .fetch_all(&self.pool)
        .await?;
        decode_documents(rows)
    }

    async fn find_by_dois(&self, dois: &[String]) -> Result<Vec<ScopusArticle>> {
        if dois.is_empty() {
            return Ok(Vec::new());
        }
        let lowered: Vec<String> = dois.iter().map(|d| d.trim().to_lowercase()).collect();
        let rows = sqlx::query(
            "SELECT document FROM scopus_articles \
             WHERE doi IN (SELECT value FROM json_each(?)) ORDER BY eid",
        )
        .bind(serde_json::to_string(&lowered)?)
        .fetch_all(&self.pool)
        .await?;
        decode_documents(rows)
    }
}
