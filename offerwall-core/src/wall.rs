use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A configurable landing page presenting a curated list of offers.
///
/// Walls own two ordered association lists (inline and popup); deleting a
/// wall removes both at the store level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferWall {
    pub token: Uuid,
    pub name: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
}

/// Read-path response shape for a wall. The ordered offer lists are fetched
/// through the association store, not embedded here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WallView {
    pub token: Uuid,
    pub name: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
}

impl From<OfferWall> for WallView {
    fn from(wall: OfferWall) -> Self {
        Self {
            token: wall.token,
            name: wall.name,
            url: wall.url,
            description: wall.description,
        }
    }
}

/// Reduces a raw URL to the form stored wall URLs are matched against.
///
/// Absolute URLs keep only the host component (with a port if one was
/// given); anything else is trimmed and loses trailing slashes.
pub fn normalize_url(raw: &str) -> String {
    if let Ok(parsed) = url::Url::parse(raw) {
        if let Some(host) = parsed.host_str() {
            return match parsed.port() {
                Some(port) => format!("{host}:{port}"),
                None => host.to_string(),
            };
        }
    }
    raw.trim().trim_end_matches('/').to_string()
}
