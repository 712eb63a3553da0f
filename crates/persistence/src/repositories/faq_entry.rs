//! Repository for chatbot FAQ entries.

use domain::models::faq::{CreateFaqRequest, UpdateFaqRequest};
use sqlx::PgPool;

use crate::entities::FaqEntryEntity;
use crate::metrics::QueryTimer;

const COLUMNS: &str = "id, question, answer, keywords, is_active, created_at, updated_at";

/// Repository for FAQ entries. Listings are in creation order, which is the
/// order the resolver tries entries in.
#[derive(Clone)]
pub struct FaqEntryRepository {
    pool: PgPool,
}

impl FaqEntryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_active(&self) -> Result<Vec<FaqEntryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_active_faq_entries");
        let result = sqlx::query_as::<_, FaqEntryEntity>(&format!(
            "SELECT {COLUMNS} FROM faq_entries WHERE is_active ORDER BY created_at, id"
        ))
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn list_all(&self) -> Result<Vec<FaqEntryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_all_faq_entries");
        let result = sqlx::query_as::<_, FaqEntryEntity>(&format!(
            "SELECT {COLUMNS} FROM faq_entries ORDER BY created_at, id"
        ))
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<FaqEntryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_faq_entry_by_id");
        let result = sqlx::query_as::<_, FaqEntryEntity>(&format!(
            "SELECT {COLUMNS} FROM faq_entries WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Creates an entry. Keywords are stored normalized.
    pub async fn create(&self, req: &CreateFaqRequest) -> Result<FaqEntryEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_faq_entry");
        let result = sqlx::query_as::<_, FaqEntryEntity>(&format!(
            r#"
            INSERT INTO faq_entries (question, answer, keywords, is_active)
            VALUES ($1, $2, $3, $4)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(&req.question)
        .bind(&req.answer)
        .bind(req.keywords.normalize())
        .bind(req.is_active)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn update(
        &self,
        id: i64,
        req: &UpdateFaqRequest,
    ) -> Result<Option<FaqEntryEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_faq_entry");
        let result = sqlx::query_as::<_, FaqEntryEntity>(&format!(
            r#"
            UPDATE faq_entries
            SET question = COALESCE($2, question),
                answer = COALESCE($3, answer),
                keywords = COALESCE($4, keywords),
                is_active = COALESCE($5, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(req.question.as_deref())
        .bind(req.answer.as_deref())
        .bind(req.keywords.as_ref().map(|k| k.normalize()))
        .bind(req.is_active)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn delete(&self, id: i64) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_faq_entry");
        let result = sqlx::query("DELETE FROM faq_entries WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;
        timer.record();
        Ok(result?.rows_affected())
    }
}
