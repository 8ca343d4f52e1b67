//! Encoded polyline format.

use osrmc_core::Coordinate;

/// Encodes coordinates as a polyline with `precision` decimal digits (5 or 6).
///
/// Each point is written latitude first, as deltas from the previous point.
pub fn encode(coordinates: &[Coordinate], precision: i32) -> String {
    let factor = 10f64.powi(precision);
    let mut out = String::new();
    let mut previous = (0i64, 0i64);

    for c in coordinates {
        let lat = (c.latitude * factor).round() as i64;
        let lon = (c.longitude * factor).round() as i64;
        encode_value(lat - previous.0, &mut out);
        encode_value(lon - previous.1, &mut out);
        previous = (lat, lon);
    }
    out
}

fn encode_value(delta: i64, out: &mut String) {
    let mut v = if delta < 0 {
        !(delta << 1) as u64
    } else {
        (delta << 1) as u64
    };

    while v >= 0x20 {
        out.push(char::from((0x20 | (v & 0x1f)) as u8 + 63));
        v >>= 5;
    }
    out.push(char::from(v as u8 + 63));
}
