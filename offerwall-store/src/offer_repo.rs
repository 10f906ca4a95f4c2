use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use offerwall_core::offer::{validate_provider, Offer};
use offerwall_core::repository::OfferStore;
use offerwall_core::{StoreError, StoreResult};

use crate::error::translate;

#[derive(sqlx::FromRow)]
pub(crate) struct OfferRow {
    pub uuid: Uuid,
    pub legacy_id: Option<i32>,
    pub url: Option<String>,
    pub is_active: bool,
    pub provider: String,
    pub sum_to: Option<String>,
    pub term_to: Option<i32>,
    pub percent_rate: Option<i32>,
}

impl From<OfferRow> for Offer {
    fn from(row: OfferRow) -> Self {
        Self {
            uuid: row.uuid,
            legacy_id: row.legacy_id,
            url: row.url,
            is_active: row.is_active,
            provider: row.provider,
            sum_to: row.sum_to,
            term_to: row.term_to,
            percent_rate: row.percent_rate,
        }
    }
}

pub struct PostgresOfferStore {
    pub pool: PgPool,
}

#[async_trait]
impl OfferStore for PostgresOfferStore {
    async fn get(&self, uuid: Uuid) -> StoreResult<Offer> {
        let row = sqlx::query_as::<_, OfferRow>(
            "SELECT uuid, legacy_id, url, is_active, provider, sum_to, term_to, percent_rate \
             FROM offers WHERE uuid = $1",
        )
        .bind(uuid)
        .fetch_optional(&self.pool)
        .await
        .map_err(translate)?;

        row.map(Offer::from).ok_or(StoreError::NotFound)
    }

    async fn insert(&self, offer: &Offer) -> StoreResult<()> {
        // The catalog is enforced here, not as a column type.
        validate_provider(&offer.provider)?;

        sqlx::query(
            "INSERT INTO offers \
             (uuid, legacy_id, url, is_active, provider, sum_to, term_to, percent_rate) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(offer.uuid)
        .bind(offer.legacy_id)
        .bind(offer.url.as_deref())
        .bind(offer.is_active)
        .bind(&offer.provider)
        .bind(offer.sum_to.as_deref())
        .bind(offer.term_to)
        .bind(offer.percent_rate)
        .execute(&self.pool)
        .await
        .map_err(translate)?;

        Ok(())
    }

    async fn update(&self, offer: &Offer) -> StoreResult<()> {
        validate_provider(&offer.provider)?;

        let result = sqlx::query(
            "UPDATE offers SET legacy_id = $2, url = $3, is_active = $4, provider = $5, \
             sum_to = $6, term_to = $7, percent_rate = $8 WHERE uuid = $1",
        )
        .bind(offer.uuid)
        .bind(offer.legacy_id)
        .bind(offer.url.as_deref())
        .bind(offer.is_active)
        .bind(&offer.provider)
        .bind(offer.sum_to.as_deref())
        .bind(offer.term_to)
        .bind(offer.percent_rate)
        .execute(&self.pool)
        .await
        .map_err(translate)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn delete(&self, uuid: Uuid) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM offers WHERE uuid = $1")
            .bind(uuid)
            .execute(&self.pool)
            .await
            .map_err(translate)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
