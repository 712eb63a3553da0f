//! Repository for gallery images.

use domain::models::content::{CreateGalleryImageRequest, UpdateGalleryImageRequest};
use sqlx::PgPool;

use crate::entities::GalleryImageEntity;
use crate::metrics::QueryTimer;

const COLUMNS: &str =
    "id, name, image_url, caption, category, display_order, is_active, created_at, updated_at";

/// Repository for gallery images. Listings sort by display order, then name.
#[derive(Clone)]
pub struct GalleryImageRepository {
    pool: PgPool,
}

impl GalleryImageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_active(&self) -> Result<Vec<GalleryImageEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_active_gallery_images");
        let result = sqlx::query_as::<_, GalleryImageEntity>(&format!(
            "SELECT {COLUMNS} FROM gallery_images WHERE is_active ORDER BY display_order, name"
        ))
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn list_all(&self) -> Result<Vec<GalleryImageEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_all_gallery_images");
        let result = sqlx::query_as::<_, GalleryImageEntity>(&format!(
            "SELECT {COLUMNS} FROM gallery_images ORDER BY display_order, name"
        ))
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<GalleryImageEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_gallery_image_by_id");
        let result = sqlx::query_as::<_, GalleryImageEntity>(&format!(
            "SELECT {COLUMNS} FROM gallery_images WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn create(
        &self,
        req: &CreateGalleryImageRequest,
    ) -> Result<GalleryImageEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_gallery_image");
        let result = sqlx::query_as::<_, GalleryImageEntity>(&format!(
            r#"
            INSERT INTO gallery_images
                (name, image_url, caption, category, display_order, is_active)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(&req.name)
        .bind(&req.image_url)
        .bind(&req.caption)
        .bind(req.category.as_str())
        .bind(req.display_order)
        .bind(req.is_active)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn update(
        &self,
        id: i64,
        req: &UpdateGalleryImageRequest,
    ) -> Result<Option<GalleryImageEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_gallery_image");
        let result = sqlx::query_as::<_, GalleryImageEntity>(&format!(
            r#"
            UPDATE gallery_images
            SET name = COALESCE($2, name),
                image_url = COALESCE($3, image_url),
                caption = COALESCE($4, caption),
                category = COALESCE($5, category),
                display_order = COALESCE($6, display_order),
                is_active = COALESCE($7, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(req.name.as_deref())
        .bind(req.image_url.as_deref())
        .bind(req.caption.as_deref())
        .bind(req.category.map(|c| c.as_str()))
        .bind(req.display_order)
        .bind(req.is_active)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn delete(&self, id: i64) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_gallery_image");
        let result = sqlx::query("DELETE FROM gallery_images WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;
        timer.record();
        Ok(result?.rows_affected())
    }
}
