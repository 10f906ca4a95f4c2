use async_trait::async_trait;
use uuid::Uuid;

use crate::association::{Association, AssociationKind};
use crate::offer::Offer;
use crate::wall::OfferWall;
use crate::StoreResult;

/// Repository trait for offer wall lookups and lifecycle.
#[async_trait]
pub trait WallStore: Send + Sync {
    async fn get_by_token(&self, token: Uuid) -> StoreResult<OfferWall>;

    /// Substring match of `normalized` against stored wall URLs. When several
    /// walls match, the one with the lowest token wins so repeated lookups
    /// are deterministic.
    async fn find_by_url(&self, normalized: &str) -> StoreResult<OfferWall>;

    async fn insert(&self, wall: &OfferWall) -> StoreResult<()>;

    async fn update(&self, wall: &OfferWall) -> StoreResult<()>;

    /// Deletes the wall and, through the store's cascade, every association
    /// of both kinds referencing it.
    async fn delete(&self, token: Uuid) -> StoreResult<()>;
}

/// Repository trait for offer records.
#[async_trait]
pub trait OfferStore: Send + Sync {
    async fn get(&self, uuid: Uuid) -> StoreResult<Offer>;

    async fn insert(&self, offer: &Offer) -> StoreResult<()>;

    async fn update(&self, offer: &Offer) -> StoreResult<()>;

    async fn delete(&self, uuid: Uuid) -> StoreResult<()>;
}

/// Repository trait for the ordered wall-to-offer links, both kinds.
#[async_trait]
pub trait AssociationStore: Send + Sync {
    /// Attaches `offer` to `wall`. Without an explicit position the link
    /// lands one past the wall's current maximum, computed in the same
    /// transaction as the insert. A second assignment of the same pair fails
    /// with `DuplicateAssociation` and leaves the list unchanged.
    async fn assign(
        &self,
        wall: Uuid,
        offer: Uuid,
        kind: AssociationKind,
        position: Option<i32>,
    ) -> StoreResult<Association>;

    /// Partial, lenient batch update applied atomically: listed offers take
    /// their index in `ordered` as the new position, unlisted offers keep
    /// their place, unknown ids are skipped.
    async fn reorder(&self, wall: Uuid, ordered: &[Uuid], kind: AssociationKind)
        -> StoreResult<()>;

    /// Offers attached to `wall` under `kind`, ascending by position with a
    /// stable tie-break on insertion order. Empty when the wall has none.
    async fn ordered_offers(&self, wall: Uuid, kind: AssociationKind) -> StoreResult<Vec<Offer>>;

    async fn remove(&self, wall: Uuid, offer: Uuid, kind: AssociationKind) -> StoreResult<()>;
}
