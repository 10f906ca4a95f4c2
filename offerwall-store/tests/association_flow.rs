use offerwall_core::association::AssociationKind;
use offerwall_core::offer::Offer;
use offerwall_core::repository::{AssociationStore, OfferStore, WallStore};
use offerwall_core::wall::OfferWall;
use offerwall_core::StoreError;
use offerwall_store::MemoryStore;
use uuid::Uuid;

fn wall(url: &str) -> OfferWall {
    OfferWall {
        token: Uuid::new_v4(),
        name: Some("landing".to_string()),
        url: Some(url.to_string()),
        description: None,
    }
}

fn offer(provider: &str) -> Offer {
    Offer {
        uuid: Uuid::new_v4(),
        legacy_id: None,
        url: None,
        is_active: true,
        provider: provider.to_string(),
        sum_to: None,
        term_to: None,
        percent_rate: None,
    }
}

async fn seed(store: &MemoryStore, providers: &[&str]) -> (OfferWall, Vec<Offer>) {
    let w = wall("example.com");
    WallStore::insert(store, &w).await.unwrap();
    let mut offers = Vec::new();
    for provider in providers {
        let o = offer(provider);
        OfferStore::insert(store, &o).await.unwrap();
        offers.push(o);
    }
    (w, offers)
}

#[tokio::test]
async fn auto_positions_increase_per_assignment() {
    let store = MemoryStore::new();
    let (w, offers) = seed(&store, &["Moneyveo", "Credit7", "Miloan"]).await;

    let mut positions = Vec::new();
    for o in &offers {
        let link = store
            .assign(w.token, o.uuid, AssociationKind::Inline, None)
            .await
            .unwrap();
        positions.push(link.position);
    }

    assert_eq!(positions, vec![1, 2, 3]);

    let listed = store
        .ordered_offers(w.token, AssociationKind::Inline)
        .await
        .unwrap();
    let uuids: Vec<Uuid> = listed.into_iter().map(|o| o.uuid).collect();
    assert_eq!(uuids, offers.iter().map(|o| o.uuid).collect::<Vec<_>>());
}

#[tokio::test]
async fn auto_position_resumes_after_explicit_position() {
    let store = MemoryStore::new();
    let (w, offers) = seed(&store, &["Moneyveo", "Credit7"]).await;

    let first = store
        .assign(w.token, offers[0].uuid, AssociationKind::Inline, Some(10))
        .await
        .unwrap();
    assert_eq!(first.position, 10);

    let second = store
        .assign(w.token, offers[1].uuid, AssociationKind::Inline, None)
        .await
        .unwrap();
    assert_eq!(second.position, 11);
}

#[tokio::test]
async fn duplicate_assignment_fails_and_changes_nothing() {
    let store = MemoryStore::new();
    let (w, offers) = seed(&store, &["Moneyveo"]).await;

    store
        .assign(w.token, offers[0].uuid, AssociationKind::Inline, None)
        .await
        .unwrap();
    let err = store
        .assign(w.token, offers[0].uuid, AssociationKind::Inline, None)
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::DuplicateAssociation));

    let listed = store
        .ordered_offers(w.token, AssociationKind::Inline)
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
}

#[tokio::test]
async fn same_offer_allowed_in_both_kinds() {
    let store = MemoryStore::new();
    let (w, offers) = seed(&store, &["Moneyveo"]).await;

    store
        .assign(w.token, offers[0].uuid, AssociationKind::Inline, None)
        .await
        .unwrap();
    // The popup list is independent of the inline one.
    store
        .assign(w.token, offers[0].uuid, AssociationKind::Popup, None)
        .await
        .unwrap();

    let popup = store
        .ordered_offers(w.token, AssociationKind::Popup)
        .await
        .unwrap();
    assert_eq!(popup.len(), 1);
}

#[tokio::test]
async fn reorder_swaps_positions() {
    let store = MemoryStore::new();
    let (w, offers) = seed(&store, &["Moneyveo", "Credit7"]).await;
    let (o1, o2) = (offers[0].uuid, offers[1].uuid);

    store
        .assign(w.token, o1, AssociationKind::Inline, Some(1))
        .await
        .unwrap();
    store
        .assign(w.token, o2, AssociationKind::Inline, Some(2))
        .await
        .unwrap();

    store
        .reorder(w.token, &[o2, o1], AssociationKind::Inline)
        .await
        .unwrap();

    let listed = store
        .ordered_offers(w.token, AssociationKind::Inline)
        .await
        .unwrap();
    let uuids: Vec<Uuid> = listed.into_iter().map(|o| o.uuid).collect();
    assert_eq!(uuids, vec![o2, o1]);
}

#[tokio::test]
async fn reorder_ignores_unknown_offers_but_applies_the_rest() {
    let store = MemoryStore::new();
    let (w, offers) = seed(&store, &["Moneyveo", "Credit7"]).await;
    let (o1, o2) = (offers[0].uuid, offers[1].uuid);
    let stranger = Uuid::new_v4();

    store
        .assign(w.token, o1, AssociationKind::Inline, None)
        .await
        .unwrap();
    store
        .assign(w.token, o2, AssociationKind::Inline, None)
        .await
        .unwrap();

    store
        .reorder(w.token, &[stranger, o2, o1], AssociationKind::Inline)
        .await
        .unwrap();

    let listed = store
        .ordered_offers(w.token, AssociationKind::Inline)
        .await
        .unwrap();
    let uuids: Vec<Uuid> = listed.into_iter().map(|o| o.uuid).collect();
    // o2 took position 1, o1 position 2; the unknown id changed nothing.
    assert_eq!(uuids, vec![o2, o1]);
}

#[tokio::test]
async fn reorder_leaves_omitted_offers_in_place() {
    let store = MemoryStore::new();
    let (w, offers) = seed(&store, &["Moneyveo", "Credit7", "Miloan"]).await;
    let (o1, o2, o3) = (offers[0].uuid, offers[1].uuid, offers[2].uuid);

    for o in [o1, o2, o3] {
        store
            .assign(w.token, o, AssociationKind::Inline, None)
            .await
            .unwrap();
    }

    // Only o3 is listed; it moves to position 0 ahead of the others.
    store
        .reorder(w.token, &[o3], AssociationKind::Inline)
        .await
        .unwrap();

    let listed = store
        .ordered_offers(w.token, AssociationKind::Inline)
        .await
        .unwrap();
    let uuids: Vec<Uuid> = listed.into_iter().map(|o| o.uuid).collect();
    assert_eq!(uuids, vec![o3, o1, o2]);
}

#[tokio::test]
async fn deleting_a_wall_cascades_both_kinds() {
    let store = MemoryStore::new();
    let (w, offers) = seed(&store, &["Moneyveo", "Credit7"]).await;

    store
        .assign(w.token, offers[0].uuid, AssociationKind::Inline, None)
        .await
        .unwrap();
    store
        .assign(w.token, offers[1].uuid, AssociationKind::Popup, None)
        .await
        .unwrap();

    WallStore::delete(&store, w.token).await.unwrap();

    let err = store.get_by_token(w.token).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound));
    assert!(store
        .ordered_offers(w.token, AssociationKind::Inline)
        .await
        .unwrap()
        .is_empty());
    assert!(store
        .ordered_offers(w.token, AssociationKind::Popup)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn deleting_an_offer_cascades_its_links() {
    let store = MemoryStore::new();
    let (w, offers) = seed(&store, &["Moneyveo", "Credit7"]).await;

    store
        .assign(w.token, offers[0].uuid, AssociationKind::Inline, None)
        .await
        .unwrap();
    store
        .assign(w.token, offers[1].uuid, AssociationKind::Inline, None)
        .await
        .unwrap();

    OfferStore::delete(&store, offers[0].uuid).await.unwrap();

    let listed = store
        .ordered_offers(w.token, AssociationKind::Inline)
        .await
        .unwrap();
    let uuids: Vec<Uuid> = listed.into_iter().map(|o| o.uuid).collect();
    assert_eq!(uuids, vec![offers[1].uuid]);
}

#[tokio::test]
async fn remove_unlinks_a_single_pair() {
    let store = MemoryStore::new();
    let (w, offers) = seed(&store, &["Moneyveo"]).await;

    store
        .assign(w.token, offers[0].uuid, AssociationKind::Inline, None)
        .await
        .unwrap();
    store
        .remove(w.token, offers[0].uuid, AssociationKind::Inline)
        .await
        .unwrap();

    assert!(store
        .ordered_offers(w.token, AssociationKind::Inline)
        .await
        .unwrap()
        .is_empty());

    let err = store
        .remove(w.token, offers[0].uuid, AssociationKind::Inline)
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound));
}

#[tokio::test]
async fn assigning_to_a_missing_wall_is_a_constraint_violation() {
    let store = MemoryStore::new();
    let o = offer("Moneyveo");
    OfferStore::insert(&store, &o).await.unwrap();

    let err = store
        .assign(Uuid::new_v4(), o.uuid, AssociationKind::Inline, None)
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::ConstraintViolation(_)));
}

#[tokio::test]
async fn provider_uniqueness_and_catalog_are_enforced() {
    let store = MemoryStore::new();
    OfferStore::insert(&store, &offer("Moneyveo")).await.unwrap();

    let err = OfferStore::insert(&store, &offer("Moneyveo")).await.unwrap_err();
    assert!(matches!(err, StoreError::ConstraintViolation(_)));

    let err = OfferStore::insert(&store, &offer("NotABank")).await.unwrap_err();
    assert!(matches!(err, StoreError::ConstraintViolation(_)));
}

#[tokio::test]
async fn find_by_url_matches_substring_with_deterministic_tie_break() {
    let store = MemoryStore::new();
    let a = wall("example.com");
    let b = wall("promo.example.com");
    WallStore::insert(&store, &a).await.unwrap();
    WallStore::insert(&store, &b).await.unwrap();

    let found = store.find_by_url("example.com").await.unwrap();
    assert_eq!(found.token, a.token.min(b.token));

    let err = store.find_by_url("elsewhere.net").await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound));
}
