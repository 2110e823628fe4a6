use serde::Serialize;
use sha2::{Digest, Sha256};

use constraint_router_core::model::ConstraintBundle;

use crate::types::Coord;

/// Field order here, not the order fields appear in the inbound request body,
/// is what makes the fingerprint canonical: we parse the request into typed
/// Rust values first and only then re-serialize, so two requests that differ
/// only in JSON key order always produce byte-identical output.
#[derive(Serialize)]
struct Canonical<'a> {
    city: &'a str,
    src: Coord,
    dst: Coord,
    c: ConstraintBundle,
}

/// Lowercase hex SHA-256 of the canonical `(city, source, target, constraints)`
/// tuple. Used as the result cache key, prefixed with `route:`.
pub fn fingerprint(city: &str, source: Coord, target: Coord, constraints: &ConstraintBundle) -> String {
    let canonical = Canonical {
        city,
        src: source,
        dst: target,
        c: *constraints,
    };
    let json = serde_json::to_vec(&canonical).expect("canonical fingerprint struct always serializes");
    let digest = Sha256::digest(&json);
    format!("{digest:x}")
}

/// Redis key for a fingerprint, per the cache key layout in the interface spec.
pub fn cache_key(fp: &str) -> String {
    format!("route:{fp}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundle() -> ConstraintBundle {
        ConstraintBundle {
            cold_chain: true,
            high_value: false,
            security_conditions: true,
        }
    }

    #[test]
    fn deterministic_for_equal_inputs() {
        let a = fingerprint("bogota", Coord { lat: 4.6, lon: -74.1 }, Coord { lat: 4.7, lon: -74.0 }, &bundle());
        let b = fingerprint("bogota", Coord { lat: 4.6, lon: -74.1 }, Coord { lat: 4.7, lon: -74.0 }, &bundle());
        assert_eq!(a, b);
    }

    #[test]
    fn differs_when_any_field_changes() {
        let base = fingerprint("bogota", Coord { lat: 4.6, lon: -74.1 }, Coord { lat: 4.7, lon: -74.0 }, &bundle());
        let diff_city = fingerprint("medellin", Coord { lat: 4.6, lon: -74.1 }, Coord { lat: 4.7, lon: -74.0 }, &bundle());
        let diff_constraints =
            fingerprint("bogota", Coord { lat: 4.6, lon: -74.1 }, Coord { lat: 4.7, lon: -74.0 }, &ConstraintBundle::default());
        assert_ne!(base, diff_city);
        assert_ne!(base, diff_constraints);
    }

    #[test]
    fn cache_key_is_prefixed() {
        let fp = fingerprint("bogota", Coord { lat: 0.0, lon: 0.0 }, Coord { lat: 0.0, lon: 0.0 }, &ConstraintBundle::default());
        assert_eq!(cache_key(&fp), format!("route:{fp}"));
    }
}
