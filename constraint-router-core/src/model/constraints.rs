use serde::{Deserialize, Serialize};

/// Shipment constraints attached to a routing request. All fields default to
/// `false` when absent from the request body; unrecognized fields are ignored
/// by `serde`'s default struct deserialization. Echoed verbatim in the response,
/// hence `Serialize` alongside `Deserialize`.
#[derive(Copy, Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ConstraintBundle {
    pub cold_chain: bool,
    pub high_value: bool,
    pub security_conditions: bool,
}

impl ConstraintBundle {
    /// `true` when no constraint is active, in which case [`super::edge_cost`]
    /// reduces to plain `travel_time`.
    pub fn is_empty(&self) -> bool {
        !self.cold_chain && !self.high_value && !self.security_conditions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_all_false() {
        let c = ConstraintBundle::default();
        assert!(c.is_empty());
    }

    #[test]
    fn missing_fields_default_false() {
        let c: ConstraintBundle = serde_json::from_str("{}").unwrap();
        assert_eq!(c, ConstraintBundle::default());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let c: ConstraintBundle =
            serde_json::from_str(r#"{"cold_chain": true, "bogus": 42}"#).unwrap();
        assert!(c.cold_chain);
        assert!(!c.high_value);
    }
}
