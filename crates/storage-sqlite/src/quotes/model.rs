//! Database model for quotes.
//!
//! The quote aggregate is stored as one JSON payload column; id and
//! timestamps are lifted into real columns for keying and ordering.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::errors::StorageError;
use quotesmith_core::estimates::QuoteData;

#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::quotes)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct QuoteDB {
    pub id: String,
    pub payload: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<QuoteDB> for QuoteData {
    type Error = StorageError;

    fn try_from(db: QuoteDB) -> Result<Self, Self::Error> {
        let quote: QuoteData = serde_json::from_str(&db.payload)?;
        Ok(quote)
    }
}

impl TryFrom<&QuoteData> for QuoteDB {
    type Error = StorageError;

    fn try_from(quote: &QuoteData) -> Result<Self, Self::Error> {
        Ok(Self {
            id: quote.id.clone(),
            payload: serde_json::to_string(quote)?,
            created_at: quote.created_at.naive_utc(),
            updated_at: quote.updated_at.naive_utc(),
        })
    }
}
