//! Typed request parameters.
//!
//! Every request owns a [`BaseParameters`] block of coordinates and the optional
//! per-coordinate lists (hints, radiuses, bearings). Those lists, when non-empty, are
//! indexed by coordinate position; nothing here enforces the alignment, the engine
//! rejects misaligned requests when they are invoked.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;

use crate::annotations::{RouteAnnotations, TableAnnotations};
use crate::error::{Error, Result};

/// A WGS84 position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    /// Longitude in degrees.
    pub longitude: f64,
    /// Latitude in degrees.
    pub latitude: f64,
}

impl Coordinate {
    /// Creates a coordinate.
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// Returns true if both components are within their bounds.
    pub fn is_valid(&self) -> bool {
        (-180.0..=180.0).contains(&self.longitude) && (-90.0..=90.0).contains(&self.latitude)
    }
}

/// Heading constraint for snapping a coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bearing {
    /// Heading in degrees clockwise from north.
    pub bearing: i16,
    /// Allowed deviation in degrees.
    pub range: i16,
}

impl Bearing {
    /// Creates a bearing.
    pub fn new(bearing: i16, range: i16) -> Self {
        Self { bearing, range }
    }

    /// Returns true if bearing is in 0..=360 and range in 0..=180.
    pub fn is_valid(&self) -> bool {
        (0..=360).contains(&self.bearing) && (0..=180).contains(&self.range)
    }
}

/// Opaque engine-issued token for reusing a previous snap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hint(Vec<u8>);

impl Hint {
    /// Wraps raw hint bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Hint(bytes)
    }

    /// Decodes a URL-safe base64 hint. Trailing padding is accepted.
    pub fn from_base64(encoded: &str) -> Result<Self> {
        URL_SAFE_NO_PAD
            .decode(encoded.trim_end_matches('='))
            .map(Hint)
            .map_err(|e| Error::InvalidParameter(format!("hint `{}`: {}", encoded, e)))
    }

    /// Encodes as URL-safe base64 without padding.
    pub fn to_base64(&self) -> String {
        URL_SAFE_NO_PAD.encode(&self.0)
    }

    /// Raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// Fields shared by every request.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseParameters {
    /// Query coordinates.
    pub coordinates: Vec<Coordinate>,
    /// Hints, empty or one per coordinate.
    pub hints: Vec<Option<Hint>>,
    /// Snap radiuses in meters, empty or one per coordinate.
    pub radiuses: Vec<Option<f64>>,
    /// Bearings, empty or one per coordinate.
    pub bearings: Vec<Option<Bearing>>,
    /// Whether the engine should return hints for the snapped waypoints.
    pub generate_hints: bool,
}

impl Default for BaseParameters {
    fn default() -> Self {
        Self {
            coordinates: Vec::new(),
            hints: Vec::new(),
            radiuses: Vec::new(),
            bearings: Vec::new(),
            generate_hints: true,
        }
    }
}

impl BaseParameters {
    /// Appends a coordinate.
    pub fn add_coordinate(&mut self, coordinate: Coordinate) {
        self.coordinates.push(coordinate);
    }

    /// Appends a coordinate together with its radius and bearing.
    pub fn add_coordinate_with(&mut self, coordinate: Coordinate, radius: f64, bearing: Bearing) {
        self.coordinates.push(coordinate);
        self.radiuses.push(Some(radius));
        self.bearings.push(Some(bearing));
    }

    /// Appends a hint for the next coordinate position.
    pub fn add_hint(&mut self, hint: Hint) {
        self.hints.push(Some(hint));
    }

    /// Returns true if every per-coordinate list is empty or aligned with the coordinates.
    pub fn is_valid(&self) -> bool {
        let n = self.coordinates.len();
        let aligned = |len: usize| len == 0 || len == n;

        aligned(self.hints.len())
            && aligned(self.radiuses.len())
            && aligned(self.bearings.len())
            && self.bearings.iter().flatten().all(Bearing::is_valid)
            && self.radiuses.iter().flatten().all(|r| *r >= 0.0)
    }
}

/// Access to the shared block of any request.
pub trait Parameters {
    /// Shared fields.
    fn base(&self) -> &BaseParameters;

    /// Shared fields, mutably.
    fn base_mut(&mut self) -> &mut BaseParameters;

    /// Request-specific consistency check.
    fn is_valid(&self) -> bool;
}

/// Encoding of route geometries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Geometries {
    /// Encoded polyline, precision 5.
    #[default]
    Polyline,
    /// Encoded polyline, precision 6.
    Polyline6,
    /// GeoJSON LineString.
    GeoJson,
}

impl Geometries {
    /// Parses `polyline`, `polyline6` or `geojson`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "polyline" => Some(Geometries::Polyline),
            "polyline6" => Some(Geometries::Polyline6),
            "geojson" => Some(Geometries::GeoJson),
            _ => None,
        }
    }
}

/// Level of detail of the route overview geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overview {
    /// Simplified geometry.
    #[default]
    Simplified,
    /// Full geometry.
    Full,
    /// No overview geometry.
    False,
}

impl Overview {
    /// Parses `simplified` or `full`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "simplified" => Some(Overview::Simplified),
            "full" => Some(Overview::Full),
            _ => None,
        }
    }
}

/// Route request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteParameters {
    /// Coordinates and per-coordinate options.
    pub base: BaseParameters,
    /// Return turn-by-turn steps for each leg.
    pub steps: bool,
    /// Search for alternative routes.
    pub alternatives: bool,
    /// Return per-segment annotations.
    pub annotations: bool,
    /// Which annotations to return when `annotations` is set.
    pub annotations_type: RouteAnnotations,
    /// Geometry encoding.
    pub geometries: Geometries,
    /// Overview geometry detail.
    pub overview: Overview,
    /// `None` leaves the engine default.
    pub continue_straight: Option<bool>,
}

impl RouteParameters {
    /// Creates an empty route request.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Parameters for RouteParameters {
    fn base(&self) -> &BaseParameters {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseParameters {
        &mut self.base
    }

    fn is_valid(&self) -> bool {
        self.base.coordinates.len() >= 2 && self.base.is_valid()
    }
}

/// Distance/duration table request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableParameters {
    /// Coordinates and per-coordinate options.
    pub base: BaseParameters,
    /// Source coordinate indices; empty means all.
    pub sources: Vec<usize>,
    /// Destination coordinate indices; empty means all.
    pub destinations: Vec<usize>,
    /// Matrices to return.
    pub annotations: TableAnnotations,
}

impl TableParameters {
    /// Creates an empty table request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a source index.
    pub fn add_source(&mut self, index: usize) {
        self.sources.push(index);
    }

    /// Appends a destination index.
    pub fn add_destination(&mut self, index: usize) {
        self.destinations.push(index);
    }
}

impl Parameters for TableParameters {
    fn base(&self) -> &BaseParameters {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseParameters {
        &mut self.base
    }

    fn is_valid(&self) -> bool {
        let n = self.base.coordinates.len();
        n >= 1
            && self.base.is_valid()
            && self.sources.iter().chain(&self.destinations).all(|&i| i < n)
            && !self.annotations.is_empty()
    }
}

/// Nearest-segment request.
#[derive(Debug, Clone, PartialEq)]
pub struct NearestParameters {
    /// The single query coordinate.
    pub base: BaseParameters,
    /// How many nearest segments to return. At least one.
    pub number_of_results: u32,
}

impl Default for NearestParameters {
    fn default() -> Self {
        Self {
            base: BaseParameters::default(),
            number_of_results: 1,
        }
    }
}

impl NearestParameters {
    /// Creates an empty nearest request.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Parameters for NearestParameters {
    fn base(&self) -> &BaseParameters {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseParameters {
        &mut self.base
    }

    fn is_valid(&self) -> bool {
        self.base.coordinates.len() == 1 && self.number_of_results >= 1 && self.base.is_valid()
    }
}

/// Trace matching request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchParameters {
    /// Route options applied to the matched trace.
    pub route: RouteParameters,
    /// Seconds since epoch, empty or one per coordinate.
    pub timestamps: Vec<u32>,
}

impl MatchParameters {
    /// Creates an empty match request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a timestamp for the next coordinate position.
    pub fn add_timestamp(&mut self, timestamp: u32) {
        self.timestamps.push(timestamp);
    }
}

impl Parameters for MatchParameters {
    fn base(&self) -> &BaseParameters {
        &self.route.base
    }

    fn base_mut(&mut self) -> &mut BaseParameters {
        &mut self.route.base
    }

    fn is_valid(&self) -> bool {
        let n = self.route.base.coordinates.len();
        self.route.is_valid() && (self.timestamps.is_empty() || self.timestamps.len() == n)
    }
}
