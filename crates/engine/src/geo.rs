//! Great-circle helpers.

use osrmc_core::Coordinate;

/// Mean earth radius in meters.
pub const EARTH_RADIUS: f64 = 6_372_797.560_856;

/// Haversine distance in meters.
pub fn haversine(from: Coordinate, to: Coordinate) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let dlat = lat2 - lat1;
    let dlon = (to.longitude - from.longitude).to_radians();

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS * c
}

/// Initial bearing from `from` to `to`, in degrees in `[0, 360)`.
pub fn bearing(from: Coordinate, to: Coordinate) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let dlon = (to.longitude - from.longitude).to_radians();

    let y = dlon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos();
    (y.atan2(x).to_degrees() + 360.0) % 360.0
}

/// Rounds to one decimal, the resolution of reported distances and durations.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
