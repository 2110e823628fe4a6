//! Great-circle distance on the WGS84 sphere approximation, using plain
//! `f64` degrees in, metres out.

/// Mean earth radius used by the routing engine, in metres.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance between two WGS84 points, in metres.
///
/// `lat`/`lon` are in degrees. Symmetric and non-negative for all finite inputs;
/// `haversine_distance_meters(lat, lon, lat, lon) == 0.0` exactly.
pub fn haversine_distance_meters(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let d_phi = phi2 - phi1;
    let d_lambda = (lon2 - lon1).to_radians();

    let a = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();
    EARTH_RADIUS_M * c
}
