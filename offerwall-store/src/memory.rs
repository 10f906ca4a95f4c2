use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use uuid::Uuid;

use offerwall_core::association::{
    next_position, reorder_positions, sort_associations, Association, AssociationKind,
};
use offerwall_core::offer::{validate_provider, Offer};
use offerwall_core::repository::{AssociationStore, OfferStore, WallStore};
use offerwall_core::wall::OfferWall;
use offerwall_core::{StoreError, StoreResult};

#[derive(Default)]
struct Inner {
    walls: HashMap<Uuid, OfferWall>,
    offers: HashMap<Uuid, Offer>,
    inline: Vec<Association>,
    popup: Vec<Association>,
    next_id: i64,
}

impl Inner {
    fn list(&self, kind: AssociationKind) -> &Vec<Association> {
        match kind {
            AssociationKind::Inline => &self.inline,
            AssociationKind::Popup => &self.popup,
        }
    }

    fn list_mut(&mut self, kind: AssociationKind) -> &mut Vec<Association> {
        match kind {
            AssociationKind::Inline => &mut self.inline,
            AssociationKind::Popup => &mut self.popup,
        }
    }

    // Mirrors ON DELETE CASCADE from the wall side.
    fn drop_wall_links(&mut self, wall: Uuid) {
        self.inline.retain(|a| a.wall_token != wall);
        self.popup.retain(|a| a.wall_token != wall);
    }

    fn drop_offer_links(&mut self, offer: Uuid) {
        self.inline.retain(|a| a.offer_uuid != offer);
        self.popup.retain(|a| a.offer_uuid != offer);
    }
}

/// Trait-complete in-memory store. Integration tests run the association
/// manager and the API against this instead of a throwaway Postgres
/// instance; it enforces the same uniqueness and cascade rules the schema
/// does.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().expect("memory store mutex poisoned")
    }
}

#[async_trait]
impl WallStore for MemoryStore {
    async fn get_by_token(&self, token: Uuid) -> StoreResult<OfferWall> {
        self.lock().walls.get(&token).cloned().ok_or(StoreError::NotFound)
    }

    async fn find_by_url(&self, normalized: &str) -> StoreResult<OfferWall> {
        let inner = self.lock();
        inner
            .walls
            .values()
            .filter(|w| w.url.as_deref().is_some_and(|u| u.contains(normalized)))
            .min_by_key(|w| w.token)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn insert(&self, wall: &OfferWall) -> StoreResult<()> {
        let mut inner = self.lock();
        if inner.walls.contains_key(&wall.token) {
            return Err(StoreError::ConstraintViolation(format!(
                "wall {} already exists",
                wall.token
            )));
        }
        inner.walls.insert(wall.token, wall.clone());
        Ok(())
    }

    async fn update(&self, wall: &OfferWall) -> StoreResult<()> {
        let mut inner = self.lock();
        match inner.walls.get_mut(&wall.token) {
            Some(existing) => {
                *existing = wall.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound),
        }
    }

    async fn delete(&self, token: Uuid) -> StoreResult<()> {
        let mut inner = self.lock();
        if inner.walls.remove(&token).is_none() {
            return Err(StoreError::NotFound);
        }
        inner.drop_wall_links(token);
        Ok(())
    }
}

#[async_trait]
impl OfferStore for MemoryStore {
    async fn get(&self, uuid: Uuid) -> StoreResult<Offer> {
        self.lock().offers.get(&uuid).cloned().ok_or(StoreError::NotFound)
    }

    async fn insert(&self, offer: &Offer) -> StoreResult<()> {
        validate_provider(&offer.provider)?;
        let mut inner = self.lock();
        if inner.offers.contains_key(&offer.uuid) {
            return Err(StoreError::ConstraintViolation(format!(
                "offer {} already exists",
                offer.uuid
            )));
        }
        if inner.offers.values().any(|o| o.provider == offer.provider) {
            return Err(StoreError::ConstraintViolation(format!(
                "provider {} already has an offer",
                offer.provider
            )));
        }
        inner.offers.insert(offer.uuid, offer.clone());
        Ok(())
    }

    async fn update(&self, offer: &Offer) -> StoreResult<()> {
        validate_provider(&offer.provider)?;
        let mut inner = self.lock();
        if !inner.offers.contains_key(&offer.uuid) {
            return Err(StoreError::NotFound);
        }
        if inner
            .offers
            .values()
            .any(|o| o.uuid != offer.uuid && o.provider == offer.provider)
        {
            return Err(StoreError::ConstraintViolation(format!(
                "provider {} already has an offer",
                offer.provider
            )));
        }
        inner.offers.insert(offer.uuid, offer.clone());
        Ok(())
    }

    async fn delete(&self, uuid: Uuid) -> StoreResult<()> {
        let mut inner = self.lock();
        if inner.offers.remove(&uuid).is_none() {
            return Err(StoreError::NotFound);
        }
        inner.drop_offer_links(uuid);
        Ok(())
    }
}

#[async_trait]
impl AssociationStore for MemoryStore {
    async fn assign(
        &self,
        wall: Uuid,
        offer: Uuid,
        kind: AssociationKind,
        position: Option<i32>,
    ) -> StoreResult<Association> {
        let mut inner = self.lock();
        if !inner.walls.contains_key(&wall) || !inner.offers.contains_key(&offer) {
            return Err(StoreError::ConstraintViolation(
                "association references a missing wall or offer".to_string(),
            ));
        }
        if inner
            .list(kind)
            .iter()
            .any(|a| a.wall_token == wall && a.offer_uuid == offer)
        {
            return Err(StoreError::DuplicateAssociation);
        }

        let position = position.unwrap_or_else(|| {
            let existing: Vec<i32> = inner
                .list(kind)
                .iter()
                .filter(|a| a.wall_token == wall)
                .map(|a| a.position)
                .collect();
            next_position(&existing)
        });

        inner.next_id += 1;
        let association = Association {
            id: inner.next_id,
            wall_token: wall,
            offer_uuid: offer,
            position,
        };
        inner.list_mut(kind).push(association.clone());
        Ok(association)
    }

    async fn reorder(
        &self,
        wall: Uuid,
        ordered: &[Uuid],
        kind: AssociationKind,
    ) -> StoreResult<()> {
        let mut inner = self.lock();
        let current: Vec<Association> = inner
            .list(kind)
            .iter()
            .filter(|a| a.wall_token == wall)
            .cloned()
            .collect();
        let updates = reorder_positions(&current, ordered);
        for (offer, position) in updates {
            if let Some(a) = inner
                .list_mut(kind)
                .iter_mut()
                .find(|a| a.wall_token == wall && a.offer_uuid == offer)
            {
                a.position = position;
            }
        }
        Ok(())
    }

    async fn ordered_offers(&self, wall: Uuid, kind: AssociationKind) -> StoreResult<Vec<Offer>> {
        let inner = self.lock();
        let links: Vec<Association> = inner
            .list(kind)
            .iter()
            .filter(|a| a.wall_token == wall)
            .cloned()
            .collect();
        Ok(sort_associations(links)
            .into_iter()
            .filter_map(|a| inner.offers.get(&a.offer_uuid).cloned())
            .collect())
    }

    async fn remove(&self, wall: Uuid, offer: Uuid, kind: AssociationKind) -> StoreResult<()> {
        let mut inner = self.lock();
        let list = inner.list_mut(kind);
        let before = list.len();
        list.retain(|a| !(a.wall_token == wall && a.offer_uuid == offer));
        if list.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
