//! Typed views over response trees.
//!
//! Each response owns its tree. Accessors navigate a fixed path and report a missing or
//! mistyped field as [`Error::Structure`]; table accessors additionally distinguish a
//! matrix that was never requested ([`Error::NoTable`]) from a cell with no route
//! ([`Error::NoRoute`]).

use crate::convert::{self, HostValue};
use crate::error::{Error, Result, TableKind};
use crate::json::{Object, Value};
use crate::params::Coordinate;

/// A snapped input coordinate as reported by the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Waypoint {
    /// Name of the street the coordinate snapped to.
    pub name: String,
    /// Snapped position.
    pub location: Coordinate,
}

impl Waypoint {
    fn from_object(object: &Object) -> Result<Self> {
        let location = object.get_array("location")?;
        Ok(Self {
            name: object.get_str("name")?.to_string(),
            location: Coordinate::new(
                location.get(0)?.as_number("location[0]")?,
                location.get(1)?.as_number("location[1]")?,
            ),
        })
    }
}

fn waypoints(body: &Object, key: &str) -> Result<Vec<Waypoint>> {
    body.get_array(key)?
        .iter()
        .map(|waypoint| Waypoint::from_object(waypoint.as_object(key)?))
        .collect()
}

macro_rules! response_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name(Object);

        impl $name {
            /// Wraps a successful response body.
            pub fn new(body: Object) -> Self {
                Self(body)
            }

            /// The response tree.
            pub fn as_object(&self) -> &Object {
                &self.0
            }

            /// Takes the response tree.
            pub fn into_object(self) -> Object {
                self.0
            }

            /// The whole response as a host value.
            pub fn to_host(&self) -> HostValue {
                convert::object_to_host(&self.0)
            }
        }

        impl From<$name> for Value {
            fn from(response: $name) -> Value {
                Value::Object(response.0)
            }
        }
    };
}

response_type!(
    /// Successful route response.
    RouteResponse
);
response_type!(
    /// Successful table response.
    TableResponse
);
response_type!(
    /// Successful nearest response.
    NearestResponse
);
response_type!(
    /// Successful match response.
    MatchResponse
);

/// Field of the first element of `list` in `body`.
fn first_number(body: &Object, list: &str, field: &str) -> Result<f64> {
    body.get_array(list)?
        .get(0)?
        .as_object(list)?
        .get_number(field)
}

impl RouteResponse {
    /// Total distance of the first route, in meters.
    pub fn distance(&self) -> Result<f64> {
        first_number(&self.0, "routes", "distance")
    }

    /// Total duration of the first route, in seconds.
    pub fn duration(&self) -> Result<f64> {
        first_number(&self.0, "routes", "duration")
    }

    /// Snapped input coordinates.
    pub fn waypoints(&self) -> Result<Vec<Waypoint>> {
        waypoints(&self.0, "waypoints")
    }
}

impl TableResponse {
    /// Duration from source row `from` to destination column `to`, in seconds.
    pub fn duration(&self, from: usize, to: usize) -> Result<f64> {
        self.cell(TableKind::Durations, from, to)
    }

    /// Distance from source row `from` to destination column `to`, in meters.
    pub fn distance(&self, from: usize, to: usize) -> Result<f64> {
        self.cell(TableKind::Distances, from, to)
    }

    fn cell(&self, kind: TableKind, from: usize, to: usize) -> Result<f64> {
        let key = kind.key();
        let matrix = match self.0.get(key) {
            Some(matrix) => matrix.as_array(key)?,
            None => return Err(Error::NoTable(kind)),
        };

        match matrix.get(from)?.as_array(key)?.get(to)? {
            Value::Null => Err(Error::NoRoute),
            cell => cell.as_number(key),
        }
    }

    /// Snapped source coordinates.
    pub fn sources(&self) -> Result<Vec<Waypoint>> {
        waypoints(&self.0, "sources")
    }

    /// Snapped destination coordinates.
    pub fn destinations(&self) -> Result<Vec<Waypoint>> {
        waypoints(&self.0, "destinations")
    }
}

impl NearestResponse {
    /// Candidate positions, nearest first.
    pub fn waypoints(&self) -> Result<Vec<Waypoint>> {
        waypoints(&self.0, "waypoints")
    }
}

impl MatchResponse {
    /// Distance of the first matching, in meters.
    pub fn distance(&self) -> Result<f64> {
        first_number(&self.0, "matchings", "distance")
    }

    /// Duration of the first matching, in seconds.
    pub fn duration(&self) -> Result<f64> {
        first_number(&self.0, "matchings", "duration")
    }

    /// Confidence of the first matching, between 0 and 1.
    pub fn confidence(&self) -> Result<f64> {
        first_number(&self.0, "matchings", "confidence")
    }

    /// Number of matchings the trace was split into.
    pub fn matchings_count(&self) -> Result<usize> {
        Ok(self.0.get_array("matchings")?.len())
    }
}
