use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use offerwall_core::association::{Association, AssociationKind};
use offerwall_core::offer::Offer;
use offerwall_core::repository::AssociationStore;
use offerwall_core::{StoreError, StoreResult};

use crate::error::translate;
use crate::offer_repo::OfferRow;

pub struct PostgresAssociationStore {
    pub pool: PgPool,
}

impl PostgresAssociationStore {
    fn table(kind: AssociationKind) -> &'static str {
        match kind {
            AssociationKind::Inline => "offerwall_offers",
            AssociationKind::Popup => "offerwall_popup_offers",
        }
    }
}

#[async_trait]
impl AssociationStore for PostgresAssociationStore {
    async fn assign(
        &self,
        wall: Uuid,
        offer: Uuid,
        kind: AssociationKind,
        position: Option<i32>,
    ) -> StoreResult<Association> {
        let table = Self::table(kind);
        let mut tx = self.pool.begin().await.map_err(translate)?;

        let position = match position {
            Some(p) => p,
            None => {
                // Read-then-write inside the same transaction. Two concurrent
                // assigns to one wall can still compute equal positions under
                // read-committed; ties then resolve stably by insertion id.
                // A SELECT ... FOR UPDATE on the wall row would serialize
                // them if strict ordering under concurrency becomes a
                // requirement.
                let (max,): (Option<i32>,) = sqlx::query_as(&format!(
                    "SELECT MAX(position) FROM {table} WHERE wall_token = $1"
                ))
                .bind(wall)
                .fetch_one(&mut *tx)
                .await
                .map_err(translate)?;

                max.map_or(1, |m| m + 1)
            }
        };

        let (id,): (i64,) = sqlx::query_as(&format!(
            "INSERT INTO {table} (wall_token, offer_uuid, position) \
             VALUES ($1, $2, $3) RETURNING id"
        ))
        .bind(wall)
        .bind(offer)
        .bind(position)
        .fetch_one(&mut *tx)
        .await
        .map_err(translate)?;

        tx.commit().await.map_err(translate)?;

        Ok(Association {
            id,
            wall_token: wall,
            offer_uuid: offer,
            position,
        })
    }

    async fn reorder(
        &self,
        wall: Uuid,
        ordered: &[Uuid],
        kind: AssociationKind,
    ) -> StoreResult<()> {
        let table = Self::table(kind);
        let mut tx = self.pool.begin().await.map_err(translate)?;

        for (index, offer) in ordered.iter().enumerate() {
            // Ids not associated with the wall update zero rows, which is the
            // documented lenient behavior; the rest of the batch proceeds.
            sqlx::query(&format!(
                "UPDATE {table} SET position = $1 WHERE wall_token = $2 AND offer_uuid = $3"
            ))
            .bind(index as i32)
            .bind(wall)
            .bind(offer)
            .execute(&mut *tx)
            .await
            .map_err(translate)?;
        }

        tx.commit().await.map_err(translate)?;
        Ok(())
    }

    async fn ordered_offers(&self, wall: Uuid, kind: AssociationKind) -> StoreResult<Vec<Offer>> {
        let table = Self::table(kind);
        let rows = sqlx::query_as::<_, OfferRow>(&format!(
            "SELECT o.uuid, o.legacy_id, o.url, o.is_active, o.provider, \
                    o.sum_to, o.term_to, o.percent_rate \
             FROM offers o JOIN {table} a ON a.offer_uuid = o.uuid \
             WHERE a.wall_token = $1 ORDER BY a.position ASC, a.id ASC"
        ))
        .bind(wall)
        .fetch_all(&self.pool)
        .await
        .map_err(translate)?;

        Ok(rows.into_iter().map(Offer::from).collect())
    }

    async fn remove(&self, wall: Uuid, offer: Uuid, kind: AssociationKind) -> StoreResult<()> {
        let table = Self::table(kind);
        let result = sqlx::query(&format!(
            "DELETE FROM {table} WHERE wall_token = $1 AND offer_uuid = $2"
        ))
        .bind(wall)
        .bind(offer)
        .execute(&self.pool)
        .await
        .map_err(translate)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
