//! Planar nearest-node lookup, acceptable at city scale in place of a spatial index.
//! A dependency-free linear scan; swap for an R-tree-backed index if city sizes grow
//! past what a scan can cover within the routing deadline.

/// Finds the index into `coords` (each a `(lat, lon)` pair in degrees) closest to
/// `point` under squared planar distance. Ties break toward the lowest index.
///
/// # Panics
///
/// Panics if `coords` is empty; callers must guarantee a non-empty graph bundle
/// before snapping a request coordinate.
pub fn nearest_node(coords: &[(f64, f64)], point: (f64, f64)) -> usize {
    assert!(!coords.is_empty(), "nearest_node called on an empty coordinate array");

    let mut best_idx = 0usize;
    let mut best_dist = f64::INFINITY;
    for (idx, &(lat, lon)) in coords.iter().enumerate() {
        let d_lat = lat - point.0;
        let d_lon = lon - point.1;
        let dist = d_lat * d_lat + d_lon * d_lon;
        if dist < best_dist {
            best_dist = dist;
            best_idx = idx;
        }
    }
    best_idx
}
