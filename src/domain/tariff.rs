//! Tariff domain entity.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Pricing scheme applied when a meter reading turns into a bill.
///
/// Rates are whole rupiah. Exactly one tariff should be flagged active;
/// the billing engine resolves ties by lowest document id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Tariff {
    /// Document id, kept outside the stored body
    #[serde(default)]
    pub id: String,
    #[schema(example = "Tarif Rumah Tangga")]
    pub name: String,
    /// Price per cubic meter of water
    pub rate_per_m3: i64,
    /// Flat fee added to every bill
    pub admin_fee: i64,
    pub description: String,
    #[serde(default)]
    pub active: bool,
}

/// Partial tariff update; `None` fields are left untouched
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TariffChanges {
    pub name: Option<String>,
    pub rate_per_m3: Option<i64>,
    pub admin_fee: Option<i64>,
    pub description: Option<String>,
    pub active: Option<bool>,
}

impl TariffChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.rate_per_m3.is_none()
            && self.admin_fee.is_none()
            && self.description.is_none()
            && self.active.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tariff_serializes_with_document_field_names() {
        let tariff = Tariff {
            id: "t-1".into(),
            name: "Tarif Rumah Tangga".into(),
            rate_per_m3: 5000,
            admin_fee: 10000,
            description: "Tarif standar pelanggan rumah tangga".into(),
            active: true,
        };
        let value = serde_json::to_value(&tariff).unwrap();
        assert_eq!(value["ratePerM3"], 5000);
        assert_eq!(value["adminFee"], 10000);
        assert_eq!(value["active"], true);
    }

    #[test]
    fn active_flag_defaults_to_false_when_absent() {
        let tariff: Tariff = serde_json::from_value(serde_json::json!({
            "name": "Tarif Sosial",
            "ratePerM3": 3000,
            "adminFee": 5000,
            "description": "Fasilitas umum"
        }))
        .unwrap();
        assert!(!tariff.active);
    }
}
