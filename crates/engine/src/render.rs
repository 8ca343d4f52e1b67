//! Builders for OSRM-shaped response fragments.

use osrmc_core::{Array, Coordinate, Geometries, Hint, Object, RouteAnnotations, Value};

use crate::geo::{bearing, haversine, round1};
use crate::polyline;

/// Name reported for every datasource.
pub const DATASOURCE_NAME: &str = "crow_fly";

/// Weight profile name.
pub const WEIGHT_NAME: &str = "duration";

/// A straight segment between two consecutive snapped coordinates.
#[derive(Debug, Clone, Copy)]
pub struct Segment {
    pub from: Coordinate,
    pub to: Coordinate,
    /// Meters.
    pub distance: f64,
    /// Seconds.
    pub duration: f64,
}

impl Segment {
    pub fn new(from: Coordinate, to: Coordinate, duration: f64) -> Self {
        Self {
            from,
            to,
            distance: haversine(from, to),
            duration,
        }
    }

    fn speed(&self) -> f64 {
        if self.duration > 0.0 {
            round1(self.distance / self.duration)
        } else {
            0.0
        }
    }
}

/// `[longitude, latitude]`.
pub fn location(c: Coordinate) -> Value {
    vec![Value::from(c.longitude), Value::from(c.latitude)].into()
}

/// Geometry in the requested encoding.
pub fn geometry(coordinates: &[Coordinate], encoding: Geometries) -> Value {
    match encoding {
        Geometries::Polyline => polyline::encode(coordinates, 5).into(),
        Geometries::Polyline6 => polyline::encode(coordinates, 6).into(),
        Geometries::GeoJson => {
            let points: Array = coordinates.iter().map(|&c| location(c)).collect();
            Object::new()
                .with("type", "LineString")
                .with("coordinates", points)
                .into()
        }
    }
}

/// Packs a snapped location into an opaque hint.
pub fn hint_for(c: Coordinate) -> Hint {
    let mut bytes = Vec::with_capacity(16);
    bytes.extend_from_slice(&c.longitude.to_le_bytes());
    bytes.extend_from_slice(&c.latitude.to_le_bytes());
    Hint::from_bytes(bytes)
}

/// Recovers the snapped location from a hint produced by [`hint_for`].
pub fn location_from_hint(hint: &Hint) -> Option<Coordinate> {
    let bytes = hint.as_bytes();
    if bytes.len() != 16 {
        return None;
    }
    let mut lon = [0u8; 8];
    let mut lat = [0u8; 8];
    lon.copy_from_slice(&bytes[..8]);
    lat.copy_from_slice(&bytes[8..]);
    let c = Coordinate::new(f64::from_le_bytes(lon), f64::from_le_bytes(lat));
    c.is_valid().then_some(c)
}

/// A waypoint object for a snapped coordinate.
pub fn waypoint(input: Coordinate, snapped: Coordinate, with_hint: bool) -> Object {
    let mut object = Object::new();
    if with_hint {
        object.insert("hint", hint_for(snapped).to_base64());
    }
    object
        .with("distance", round1(haversine(input, snapped)))
        .with("name", "")
        .with("location", location(snapped))
}

fn annotation(segment: &Segment, index: usize, kinds: RouteAnnotations) -> Object {
    let mut object = Object::new();
    let single = |v: f64| Value::from(vec![Value::from(v)]);

    if kinds.contains(RouteAnnotations::DISTANCE) {
        object.insert("distance", single(round1(segment.distance)));
    }
    if kinds.contains(RouteAnnotations::DURATION) {
        object.insert("duration", single(round1(segment.duration)));
    }
    if kinds.contains(RouteAnnotations::WEIGHT) {
        object.insert("weight", single(round1(segment.duration)));
    }
    if kinds.contains(RouteAnnotations::SPEED) {
        object.insert("speed", single(segment.speed()));
    }
    if kinds.contains(RouteAnnotations::NODES) {
        object.insert("nodes", vec![Value::from(index), Value::from(index + 1)]);
    }
    if kinds.contains(RouteAnnotations::DATASOURCES) {
        object.insert("datasources", vec![Value::from(0u32)]);
        object.insert(
            "metadata",
            Object::new().with("datasource_names", vec![Value::from(DATASOURCE_NAME)]),
        );
    }
    object
}

fn maneuver(kind: &str, at: Coordinate, before: f64, after: f64) -> Object {
    Object::new()
        .with("bearing_after", after.round())
        .with("bearing_before", before.round())
        .with("location", location(at))
        .with("type", kind)
}

fn steps(segment: &Segment, encoding: Geometries) -> Array {
    let heading = bearing(segment.from, segment.to);
    let depart = Object::new()
        .with("geometry", geometry(&[segment.from, segment.to], encoding))
        .with("maneuver", maneuver("depart", segment.from, 0.0, heading))
        .with("mode", "driving")
        .with("name", "")
        .with("weight", round1(segment.duration))
        .with("duration", round1(segment.duration))
        .with("distance", round1(segment.distance));
    let arrive = Object::new()
        .with("geometry", geometry(&[segment.to, segment.to], encoding))
        .with("maneuver", maneuver("arrive", segment.to, heading, 0.0))
        .with("mode", "driving")
        .with("name", "")
        .with("weight", 0.0)
        .with("duration", 0.0)
        .with("distance", 0.0);
    vec![Value::from(depart), Value::from(arrive)].into_iter().collect()
}

/// Options shaping a route-like object.
#[derive(Debug, Clone, Copy)]
pub struct RouteShape {
    pub steps: bool,
    pub annotations: Option<RouteAnnotations>,
    pub geometries: Geometries,
    pub overview: bool,
}

/// A route object over consecutive segments, one leg per segment.
pub fn route(points: &[Coordinate], segments: &[Segment], shape: RouteShape) -> Object {
    let legs: Array = segments
        .iter()
        .enumerate()
        .map(|(i, segment)| {
            let mut leg = Object::new();
            if let Some(kinds) = shape.annotations {
                leg.insert("annotation", annotation(segment, i, kinds));
            }
            let leg_steps = if shape.steps {
                steps(segment, shape.geometries)
            } else {
                Array::new()
            };
            Value::from(
                leg.with("steps", leg_steps)
                    .with("summary", "")
                    .with("weight", round1(segment.duration))
                    .with("duration", round1(segment.duration))
                    .with("distance", round1(segment.distance)),
            )
        })
        .collect();

    let distance: f64 = segments.iter().map(|s| s.distance).sum();
    let duration: f64 = segments.iter().map(|s| s.duration).sum();

    let mut object = Object::new();
    if shape.overview {
        object.insert("geometry", geometry(points, shape.geometries));
    }
    object
        .with("legs", legs)
        .with("weight_name", WEIGHT_NAME)
        .with("weight", round1(duration))
        .with("duration", round1(duration))
        .with("distance", round1(distance))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn berlin() -> (Coordinate, Coordinate) {
        (Coordinate::new(13.388, 52.517), Coordinate::new(13.385, 52.520))
    }

    #[test]
    fn test_hint_round_trip() {
        let (a, _) = berlin();
        assert_eq!(location_from_hint(&hint_for(a)), Some(a));
        assert_eq!(location_from_hint(&Hint::from_bytes(vec![1, 2, 3])), None);
    }

    #[test]
    fn test_geojson_geometry() {
        let (a, b) = berlin();
        let value = geometry(&[a, b], Geometries::GeoJson);
        let object = value.as_object("geometry").unwrap();
        assert_eq!(object.get_str("type").unwrap(), "LineString");
        assert_eq!(object.get_array("coordinates").unwrap().len(), 2);
    }

    #[test]
    fn test_waypoint_hint_optional() {
        let (a, _) = berlin();
        assert!(waypoint(a, a, true).contains_key("hint"));
        assert!(!waypoint(a, a, false).contains_key("hint"));
    }

    #[test]
    fn test_route_totals_and_annotation() {
        let (a, b) = berlin();
        let segment = Segment::new(a, b, 30.0);
        let shape = RouteShape {
            steps: true,
            annotations: Some(RouteAnnotations::DISTANCE | RouteAnnotations::NODES),
            geometries: Geometries::Polyline,
            overview: false,
        };
        let object = route(&[a, b], &[segment], shape);

        assert!(!object.contains_key("geometry"));
        assert_eq!(object.get_number("duration").unwrap(), 30.0);
        let legs = object.get_array("legs").unwrap();
        let leg = legs.get(0).unwrap().as_object("leg").unwrap();
        assert_eq!(leg.get_array("steps").unwrap().len(), 2);

        let annotation = leg.get_object("annotation").unwrap();
        assert!(annotation.contains_key("distance"));
        assert!(annotation.contains_key("nodes"));
        assert!(!annotation.contains_key("duration"));
    }
}
