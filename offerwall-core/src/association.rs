use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The two structurally identical association lists a wall owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssociationKind {
    Inline,
    Popup,
}

/// One (wall, offer) link with a position within the wall's list of the
/// given kind. The pair is unique per kind; positions need not be contiguous
/// or zero-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Association {
    pub id: i64,
    pub wall_token: Uuid,
    pub offer_uuid: Uuid,
    pub position: i32,
}

/// Position for the next assignment to a wall: one past the current maximum,
/// starting at 1 when the wall has no associations of the kind.
pub fn next_position(existing: &[i32]) -> i32 {
    existing.iter().copied().max().map_or(1, |max| max + 1)
}

/// Maps a reorder request onto concrete position updates.
///
/// The offer at index `i` of `ordered` moves to position `i`. Offers the
/// wall holds but the request omits are untouched, and ids the wall does not
/// hold are skipped rather than failing the batch.
pub fn reorder_positions(current: &[Association], ordered: &[Uuid]) -> Vec<(Uuid, i32)> {
    ordered
        .iter()
        .enumerate()
        .filter(|(_, offer)| current.iter().any(|a| a.offer_uuid == **offer))
        .map(|(i, offer)| (*offer, i as i32))
        .collect()
}

/// Ascending by position, ties resolved by insertion id so retrieval order
/// is stable across calls.
pub fn sort_associations(mut associations: Vec<Association>) -> Vec<Association> {
    associations.sort_by_key(|a| (a.position, a.id));
    associations
}
