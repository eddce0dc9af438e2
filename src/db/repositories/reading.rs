use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::{bible_readings, prelude::*};

/// A Bible reading entry as returned to callers.
#[derive(Debug, Clone)]
pub struct Reading {
    pub id: String,
    pub user_id: String,
    pub bible_book: String,
    pub chapters: String,
    pub verses: Option<String>,
    pub date_read: String,
    pub completed: bool,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<bible_readings::Model> for Reading {
    fn from(model: bible_readings::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            bible_book: model.bible_book,
            chapters: model.chapters,
            verses: model.verses,
            date_read: model.date_read,
            completed: model.completed,
            notes: model.notes,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Fields for a new reading entry. Entries are recorded as completed.
#[derive(Debug, Clone)]
pub struct NewReading {
    pub bible_book: String,
    pub chapters: String,
    pub verses: Option<String>,
    pub date_read: String,
    pub notes: Option<String>,
}

/// Replacement fields for an existing entry. Omitted optionals clear the
/// stored value; `completed` is preserved unless provided.
#[derive(Debug, Clone)]
pub struct ReadingUpdate {
    pub bible_book: String,
    pub chapters: String,
    pub verses: Option<String>,
    pub date_read: String,
    pub notes: Option<String>,
    pub completed: Option<bool>,
}

pub struct ReadingRepository {
    conn: DatabaseConnection,
}

impl ReadingRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// All entries for one user, newest date first.
    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<Reading>> {
        let rows = BibleReadings::find()
            .filter(bible_readings::Column::UserId.eq(user_id))
            .order_by_desc(bible_readings::Column::DateRead)
            .all(&self.conn)
            .await
            .context("Failed to list readings")?;

        Ok(rows.into_iter().map(Reading::from).collect())
    }

    pub async fn insert(&self, user_id: &str, new: NewReading) -> Result<Reading> {
        let now = chrono::Utc::now().to_rfc3339();

        let active = bible_readings::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            user_id: Set(user_id.to_string()),
            bible_book: Set(new.bible_book),
            chapters: Set(new.chapters),
            verses: Set(new.verses),
            date_read: Set(new.date_read),
            completed: Set(true),
            notes: Set(new.notes),
            created_at: Set(now.clone()),
            updated_at: Set(now),
        };

        let model = active
            .insert(&self.conn)
            .await
            .context("Failed to insert reading")?;

        Ok(Reading::from(model))
    }

    /// Update an entry scoped to its owner in one statement. Returns
    /// `None` when no row matched, without distinguishing a missing id
    /// from one owned by another user.
    pub async fn update_owned(
        &self,
        id: &str,
        user_id: &str,
        update: ReadingUpdate,
    ) -> Result<Option<Reading>> {
        use sea_orm::sea_query::Expr;

        let mut stmt = BibleReadings::update_many()
            .col_expr(
                bible_readings::Column::BibleBook,
                Expr::value(update.bible_book),
            )
            .col_expr(bible_readings::Column::Chapters, Expr::value(update.chapters))
            .col_expr(bible_readings::Column::Verses, Expr::value(update.verses))
            .col_expr(bible_readings::Column::DateRead, Expr::value(update.date_read))
            .col_expr(bible_readings::Column::Notes, Expr::value(update.notes))
            .col_expr(
                bible_readings::Column::UpdatedAt,
                Expr::value(chrono::Utc::now().to_rfc3339()),
            )
            .filter(bible_readings::Column::Id.eq(id))
            .filter(bible_readings::Column::UserId.eq(user_id));

        if let Some(completed) = update.completed {
            stmt = stmt.col_expr(bible_readings::Column::Completed, Expr::value(completed));
        }

        let result = stmt
            .exec(&self.conn)
            .await
            .context("Failed to update reading")?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        let row = BibleReadings::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to reload updated reading")?;

        Ok(row.map(Reading::from))
    }

    /// Delete an entry scoped to its owner in one statement.
    pub async fn delete_owned(&self, id: &str, user_id: &str) -> Result<bool> {
        let result = BibleReadings::delete_many()
            .filter(bible_readings::Column::Id.eq(id))
            .filter(bible_readings::Column::UserId.eq(user_id))
            .exec(&self.conn)
            .await
            .context("Failed to delete reading")?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count(&self) -> Result<u64> {
        let count = BibleReadings::find()
            .count(&self.conn)
            .await
            .context("Failed to count readings")?;

        Ok(count)
    }
}
