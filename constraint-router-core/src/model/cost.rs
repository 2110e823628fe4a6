use super::constraints::ConstraintBundle;
use crate::model::network::Edge;

/// Default `temp_risk`/`security_risk` applied when a row's column was null
/// at load time.
pub const DEFAULT_RISK: f64 = 0.3;

/// Weight of `security_risk` contributed by `security_conditions`, distinct
/// from the full weight `high_value` contributes.
const SECURITY_CONDITIONS_FACTOR: f64 = 0.8;

/// Computes the routing cost of traversing `edge` under `constraints`.
///
/// `cost = travel_time * (1 + cold_chain*temp_risk + high_value*security_risk
///          + security_conditions*security_risk*0.8)`
///
/// Referentially transparent and safe to call from multiple threads at once.
/// With no constraint active, this reduces to `edge.travel_time`.
pub fn edge_cost(edge: &Edge, constraints: &ConstraintBundle) -> f64 {
    if constraints.is_empty() {
        return edge.travel_time;
    }

    let mut multiplier = 1.0;
    if constraints.cold_chain {
        multiplier += edge.temp_risk;
    }
    if constraints.high_value {
        multiplier += edge.security_risk;
    }
    if constraints.security_conditions {
        multiplier += edge.security_risk * SECURITY_CONDITIONS_FACTOR;
    }
    edge.travel_time * multiplier
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::network::NodeIdx;

    fn edge(travel_time: f64, temp_risk: f64, security_risk: f64) -> Edge {
        Edge {
            src: NodeIdx(0),
            dst: NodeIdx(1),
            length: travel_time * 8.0,
            travel_time,
            highway: "residential".to_string(),
            lit: false,
            temp_risk,
            security_risk,
        }
    }

    #[test]
    fn reduces_to_travel_time_when_unconstrained() {
        let e = edge(10.0, 0.5, 0.5);
        assert_eq!(edge_cost(&e, &ConstraintBundle::default()), 10.0);
    }

    #[test]
    fn cold_chain_scales_by_temp_risk() {
        let e = edge(10.0, 0.5, 0.0);
        let c = ConstraintBundle {
            cold_chain: true,
            ..Default::default()
        };
        assert_eq!(edge_cost(&e, &c), 15.0);
    }

    #[test]
    fn high_value_scales_by_security_risk() {
        let e = edge(10.0, 0.0, 0.4);
        let c = ConstraintBundle {
            high_value: true,
            ..Default::default()
        };
        assert!((edge_cost(&e, &c) - 14.0).abs() < 1e-9);
    }

    #[test]
    fn security_conditions_applies_08_factor() {
        let e = edge(10.0, 0.0, 0.5);
        let c = ConstraintBundle {
            security_conditions: true,
            ..Default::default()
        };
        assert!((edge_cost(&e, &c) - 14.0).abs() < 1e-9);
    }

    #[test]
    fn constraints_stack_additively() {
        let e = edge(10.0, 0.2, 0.5);
        let c = ConstraintBundle {
            cold_chain: true,
            high_value: true,
            security_conditions: true,
        };
        let expected = 10.0 * (1.0 + 0.2 + 0.5 + 0.5 * 0.8);
        assert!((edge_cost(&e, &c) - expected).abs() < 1e-9);
    }

    #[test]
    fn monotonic_non_decreasing_in_active_risk() {
        let lo = edge(10.0, 0.1, 0.0);
        let hi = edge(10.0, 0.9, 0.0);
        let c = ConstraintBundle {
            cold_chain: true,
            ..Default::default()
        };
        assert!(edge_cost(&hi, &c) >= edge_cost(&lo, &c));
    }
}
