use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use offerwall_core::repository::WallStore;
use offerwall_core::wall::OfferWall;
use offerwall_core::{StoreError, StoreResult};

use crate::error::translate;

#[derive(sqlx::FromRow)]
struct WallRow {
    token: Uuid,
    name: Option<String>,
    url: Option<String>,
    description: Option<String>,
}

impl From<WallRow> for OfferWall {
    fn from(row: WallRow) -> Self {
        Self {
            token: row.token,
            name: row.name,
            url: row.url,
            description: row.description,
        }
    }
}

pub struct PostgresWallStore {
    pub pool: PgPool,
}

#[async_trait]
impl WallStore for PostgresWallStore {
    async fn get_by_token(&self, token: Uuid) -> StoreResult<OfferWall> {
        let row = sqlx::query_as::<_, WallRow>(
            "SELECT token, name, url, description FROM offer_walls WHERE token = $1",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(translate)?;

        row.map(OfferWall::from).ok_or(StoreError::NotFound)
    }

    async fn find_by_url(&self, normalized: &str) -> StoreResult<OfferWall> {
        // Lowest token first so repeated lookups return the same wall when
        // several URLs contain the fragment.
        let row = sqlx::query_as::<_, WallRow>(
            "SELECT token, name, url, description FROM offer_walls \
             WHERE url LIKE $1 ORDER BY token LIMIT 1",
        )
        .bind(format!("%{normalized}%"))
        .fetch_optional(&self.pool)
        .await
        .map_err(translate)?;

        row.map(OfferWall::from).ok_or(StoreError::NotFound)
    }

    async fn insert(&self, wall: &OfferWall) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO offer_walls (token, name, url, description) VALUES ($1, $2, $3, $4)",
        )
        .bind(wall.token)
        .bind(wall.name.as_deref())
        .bind(wall.url.as_deref())
        .bind(wall.description.as_deref())
        .execute(&self.pool)
        .await
        .map_err(translate)?;

        Ok(())
    }

    async fn update(&self, wall: &OfferWall) -> StoreResult<()> {
        let result = sqlx::query(
            "UPDATE offer_walls SET name = $2, url = $3, description = $4 WHERE token = $1",
        )
        .bind(wall.token)
        .bind(wall.name.as_deref())
        .bind(wall.url.as_deref())
        .bind(wall.description.as_deref())
        .execute(&self.pool)
        .await
        .map_err(translate)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn delete(&self, token: Uuid) -> StoreResult<()> {
        // Associations of both kinds go with the wall via ON DELETE CASCADE.
        let result = sqlx::query("DELETE FROM offer_walls WHERE token = $1")
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(translate)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
