use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;

use quotesmith_core::errors::Result;
use quotesmith_core::estimates::QuoteData;
use quotesmith_core::store::QuoteStoreTrait;

use super::model::QuoteDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::quotes;
use crate::schema::quotes::dsl::*;

/// SQLite-backed quote store. Reads use the pool directly; writes go
/// through the single-writer actor.
pub struct SqliteQuoteRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SqliteQuoteRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        SqliteQuoteRepository { pool, writer }
    }
}

#[async_trait]
impl QuoteStoreTrait for SqliteQuoteRepository {
    async fn get(&self, quote_id: &str) -> Result<Option<QuoteData>> {
        let mut conn = get_connection(&self.pool)?;
        let row = quotes
            .find(quote_id)
            .first::<QuoteDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        match row {
            Some(db) => Ok(Some(QuoteData::try_from(db).map_err(StorageError::from)?)),
            None => Ok(None),
        }
    }

    async fn set(&self, quote: QuoteData) -> Result<()> {
        let row = QuoteDB::try_from(&quote)?;
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                diesel::insert_into(quotes::table)
                    .values(&row)
                    .on_conflict(quotes::id)
                    .do_update()
                    .set(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(())
            })
            .await
    }

    async fn delete(&self, quote_id: &str) -> Result<bool> {
        let quote_id = quote_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<bool> {
                let affected = diesel::delete(quotes.find(quote_id))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(affected > 0)
            })
            .await
    }

    async fn list_ids(&self) -> Result<Vec<String>> {
        let mut conn = get_connection(&self.pool)?;
        let ids = quotes
            .order(created_at.desc())
            .select(id)
            .load::<String>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use chrono::Duration;
    use quotesmith_core::estimates::{EstimateInput, MockSynthesizer, QualityLevel};
    use tempfile::tempdir;

    fn sample_quote(quote_id: &str) -> QuoteData {
        let input = EstimateInput {
            project_type: "Flooring".to_string(),
            area_square_feet: 600.0,
            quality_level: QualityLevel::Standard,
            location: "Chennai".to_string(),
            notes: Some("Engineered wood".to_string()),
        };
        MockSynthesizer::default().build_quote(&input, quote_id)
    }

    async fn repository(dir: &tempfile::TempDir) -> SqliteQuoteRepository {
        let db_path = dir.path().join("test.db").to_string_lossy().to_string();
        db::init(&db_path).unwrap();
        let pool = db::create_pool(&db_path).unwrap();
        db::run_migrations(&pool).unwrap();
        let writer = db::write_actor::spawn_writer((*pool).clone());
        SqliteQuoteRepository::new(pool, writer)
    }

    #[tokio::test]
    async fn round_trips_a_quote() {
        let dir = tempdir().unwrap();
        let repo = repository(&dir).await;

        let quote = sample_quote("est_1_sql");
        repo.set(quote.clone()).await.unwrap();

        let fetched = repo.get("est_1_sql").await.unwrap().unwrap();
        assert_eq!(fetched, quote);
        assert!(repo.get("est_0_missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn set_upserts_by_id() {
        let dir = tempdir().unwrap();
        let repo = repository(&dir).await;

        let mut quote = sample_quote("est_1_sql");
        repo.set(quote.clone()).await.unwrap();
        quote.assumptions.push("Revised scope".to_string());
        repo.set(quote.clone()).await.unwrap();

        let fetched = repo.get("est_1_sql").await.unwrap().unwrap();
        assert_eq!(fetched.assumptions, quote.assumptions);
        assert_eq!(repo.list_ids().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn delete_reports_existence() {
        let dir = tempdir().unwrap();
        let repo = repository(&dir).await;

        repo.set(sample_quote("est_1_sql")).await.unwrap();
        assert!(repo.delete("est_1_sql").await.unwrap());
        assert!(!repo.delete("est_1_sql").await.unwrap());
    }

    #[tokio::test]
    async fn list_orders_newest_first() {
        let dir = tempdir().unwrap();
        let repo = repository(&dir).await;

        let older = sample_quote("est_1_old");
        let mut newer = sample_quote("est_2_new");
        newer.created_at = older.created_at + Duration::seconds(10);
        repo.set(older).await.unwrap();
        repo.set(newer).await.unwrap();

        assert_eq!(
            repo.list_ids().await.unwrap(),
            vec!["est_2_new", "est_1_old"]
        );
    }
}
