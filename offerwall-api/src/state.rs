use std::sync::Arc;

use offerwall_core::repository::{AssociationStore, OfferStore, WallStore};

/// Store handles shared by every request. Built once in `main` and cloned
/// into handlers; there is no other cross-request state.
#[derive(Clone)]
pub struct AppState {
    pub walls: Arc<dyn WallStore>,
    pub offers: Arc<dyn OfferStore>,
    pub associations: Arc<dyn AssociationStore>,
}
