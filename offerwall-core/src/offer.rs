use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{StoreError, StoreResult};

/// The closed catalog of recognized offer providers.
///
/// This is a versioned constant, deliberately independent of what is
/// persisted: listing provider names must return the full catalog even when
/// the store is empty.
pub const PROVIDER_NAMES: &[&str] = &[
    "Loanplus",
    "SgroshiCPA2",
    "Novikredyty",
    "TurboGroshi",
    "Crypsee",
    "Suncredit",
    "Lehko",
    "Monto",
    "Limon",
    "Amigo",
    "FirstCredit",
    "Finsfera",
    "Pango",
    "Treba",
    "StarFin",
    "BitCapital",
    "SgroshiCPL",
    "LoviLave",
    "Prostocredit",
    "Sloncredit",
    "Clickcredit",
    "Credos",
    "Dodam",
    "SelfieCredit",
    "Egroshi",
    "Alexcredit",
    "SgroshiCPA1",
    "Tengo",
    "Credit7",
    "Tpozyka",
    "Creditkasa",
    "Moneyveo",
    "MyCredit",
    "CreditPlus",
    "Miloan",
    "AvansCredit",
];

pub fn is_known_provider(name: &str) -> bool {
    PROVIDER_NAMES.contains(&name)
}

/// Rejects provider tags outside the catalog before they reach the store.
pub fn validate_provider(name: &str) -> StoreResult<()> {
    if is_known_provider(name) {
        Ok(())
    } else {
        Err(StoreError::ConstraintViolation(format!(
            "unknown provider name: {name}"
        )))
    }
}

/// The catalog as an owned, ordered list for the read path.
pub fn provider_names() -> Vec<String> {
    PROVIDER_NAMES.iter().map(|s| s.to_string()).collect()
}

/// A single financial-product listing from a named provider.
///
/// `provider` is a validated string against [`PROVIDER_NAMES`] and unique
/// across offers; `sum_to`, `term_to` and `percent_rate` carry
/// provider-specific meaning and are all optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    pub uuid: Uuid,
    /// Carried over from the legacy admin panel. Informational, not unique.
    pub legacy_id: Option<i32>,
    pub url: Option<String>,
    pub is_active: bool,
    pub provider: String,
    pub sum_to: Option<String>,
    pub term_to: Option<i32>,
    pub percent_rate: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_is_fixed() {
        assert_eq!(PROVIDER_NAMES.len(), 36);
        assert_eq!(provider_names().len(), 36);
        // Renamed legacy tags keep their public values.
        assert!(is_known_provider("MyCredit"));
        assert!(is_known_provider("AvansCredit"));
    }

    #[test]
    fn test_validate_provider() {
        assert!(validate_provider("Moneyveo").is_ok());
        assert!(matches!(
            validate_provider("NotABank"),
            Err(StoreError::ConstraintViolation(_))
        ));
    }
}
