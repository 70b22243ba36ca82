use crate::models::{Card, CardFilters, CardPatch, CreateCardRequest, DescriptionPatch, SortField, SortOrder};
use chrono::{DateTime, Utc};
use database::{self, RepositoryError};
use sqlx::FromRow;
use uuid::Uuid;

const CARD_COLUMNS: &str = "id, title, description, fill_color, created_at, updated_at";

#[derive(FromRow)]
struct CardRecord {
    id: String,
    title: String,
    description: Option<String>,
    fill_color: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CardRecord> for Card {
    fn from(record: CardRecord) -> Self {
        Card {
            id: record.id,
            title: record.title,
            description: record.description,
            fill_color: record.fill_color,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

pub(crate) struct CardRepository<'a> {
    conn: &'a mut database::Connection,
}

impl<'a> CardRepository<'a> {
    pub fn new(conn: &'a mut database::Connection) -> Self {
        Self { conn }
    }

    pub async fn create(&mut self, req: &CreateCardRequest) -> Result<Card, RepositoryError> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        let record = sqlx::query_as::<_, CardRecord>(&format!(
            "INSERT INTO cards (id, title, description, fill_color, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {CARD_COLUMNS}"
        ))
        .bind(&id)
        .bind(req.title())
        .bind(req.description())
        .bind(req.fill_color())
        .bind(now)
        .bind(now)
        .fetch_one(&mut *self.conn)
        .await?;

        Ok(record.into())
    }

    pub async fn list(&mut self, filters: &CardFilters) -> Result<Vec<Card>, RepositoryError> {
        // Column and direction come from closed enums, never from user text.
        let order_by = match filters.sort() {
            Some((field, order)) => {
                let column = match field {
                    SortField::Title => "title",
                    SortField::Description => "description",
                };
                let direction = match order {
                    SortOrder::Asc => "ASC",
                    SortOrder::Desc => "DESC",
                };
                format!("{column} {direction}, rowid ASC")
            }
            None => "rowid ASC".to_string(),
        };

        let records = sqlx::query_as::<_, CardRecord>(&format!(
            "SELECT {CARD_COLUMNS} FROM cards WHERE ($1 IS NULL OR fill_color = $1) ORDER BY {order_by}"
        ))
        .bind(filters.fill_color())
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(records.into_iter().map(|r| r.into()).collect())
    }

    pub async fn find_by_id(&mut self, id: &str) -> Result<Option<Card>, RepositoryError> {
        let record = sqlx::query_as::<_, CardRecord>(&format!(
            "SELECT {CARD_COLUMNS} FROM cards WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(record.map(|r| r.into()))
    }

    pub async fn update(&mut self, id: &str, patch: &CardPatch) -> Result<Card, RepositoryError> {
        let (touch_description, description) = match patch.description() {
            DescriptionPatch::Keep => (false, None),
            DescriptionPatch::Clear => (true, None),
            DescriptionPatch::Set(d) => (true, Some(d.as_str())),
        };

        let record = sqlx::query_as::<_, CardRecord>(&format!(
            "UPDATE cards SET \
                title = COALESCE($1, title), \
                fill_color = COALESCE($2, fill_color), \
                description = CASE WHEN $3 THEN $4 ELSE description END, \
                updated_at = $5 \
             WHERE id = $6 RETURNING {CARD_COLUMNS}"
        ))
        .bind(patch.title())
        .bind(patch.fill_color())
        .bind(touch_description)
        .bind(description)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?;

        record.map(|r| r.into()).ok_or(RepositoryError::NotFound)
    }

    pub async fn delete(&mut self, id: &str) -> Result<Card, RepositoryError> {
        let record = sqlx::query_as::<_, CardRecord>(&format!(
            "DELETE FROM cards WHERE id = $1 RETURNING {CARD_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?;

        record.map(|r| r.into()).ok_or(RepositoryError::NotFound)
    }
}
