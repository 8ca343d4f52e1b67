//! Bulk request population from loosely-typed structured input.
//!
//! The input is any `serde` data shaped as a map; in practice a [`serde_json::Value`]
//! handed over by the host. Unknown keys are ignored, missing optional keys leave the
//! request untouched, and string tags that match nothing leave the field at its current
//! value. Wrongly-typed required data (a coordinate that is not a number pair, a hint that
//! is not base64) is rejected with [`Error::InvalidParameter`] before anything is written.
//!
//! # Example
//!
//! ```
//! use osrmc_core::request::{self, RouteRequest};
//! use osrmc_core::params::{Geometries, RouteParameters};
//! use serde_json::json;
//!
//! let mut params = RouteParameters::new();
//! request::update::<RouteRequest>(&mut params, json!({
//!     "coordinates": [[13.388, 52.517], [13.385, 52.520]],
//!     "geometries": "geojson",
//!     "continue_straight": "default",
//! })).unwrap();
//!
//! assert_eq!(params.base.coordinates.len(), 2);
//! assert_eq!(params.geometries, Geometries::GeoJson);
//! assert_eq!(params.continue_straight, None);
//! ```

use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Deserialize;

use crate::annotations::{RouteAnnotations, TableAnnotations};
use crate::error::Result;
use crate::params::{
    BaseParameters, Bearing, Coordinate, Geometries, Hint, MatchParameters, NearestParameters,
    Overview, RouteParameters, TableParameters,
};

/// A bulk request that can be applied to its typed parameters.
pub trait Request: DeserializeOwned {
    /// Typed parameters this request populates.
    type Params: Default;

    /// Appends/overwrites the fields present in this request.
    fn apply_to(self, params: &mut Self::Params) -> Result<()>;
}

/// Deserializes `input` as `R` and applies it to `params`.
pub fn update<R: Request>(params: &mut R::Params, input: serde_json::Value) -> Result<()> {
    let request: R = serde_json::from_value(input)?;
    request.apply_to(params)
}

/// Same as [`update`], from JSON text.
pub fn update_from_str<R: Request>(params: &mut R::Params, input: &str) -> Result<()> {
    let request: R = serde_json::from_str(input)?;
    request.apply_to(params)
}

/// Builds fresh parameters from `input`.
pub fn build<R: Request>(input: serde_json::Value) -> Result<R::Params> {
    let mut params = R::Params::default();
    update::<R>(&mut params, input)?;
    Ok(params)
}

/// A field that may be a boolean or a string tag.
///
/// Anything else is accepted and ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Toggle {
    Bool(bool),
    Tag(String),
    Other(IgnoredAny),
}

/// Keys shared by every request.
#[derive(Debug, Clone, Deserialize)]
pub struct BaseRequest {
    /// `[longitude, latitude]` pairs.
    pub coordinates: Vec<[f64; 2]>,
    /// `[bearing, range]` pairs or null, by coordinate position.
    pub bearings: Option<Vec<Option<[i16; 2]>>>,
    /// Radiuses in meters or null, by coordinate position.
    pub radiuses: Option<Vec<Option<f64>>>,
    pub generate_hints: Option<bool>,
    /// Base64 hints or null, by coordinate position.
    pub hints: Option<Vec<Option<String>>>,
}

impl BaseRequest {
    fn apply_to(self, base: &mut BaseParameters) -> Result<()> {
        // Decode first so a bad hint leaves the request untouched.
        let hints = self
            .hints
            .map(|hints| {
                hints
                    .into_iter()
                    .map(|hint| match hint.as_deref() {
                        None | Some("") => Ok(None),
                        Some(encoded) => Hint::from_base64(encoded).map(Some),
                    })
                    .collect::<Result<Vec<_>>>()
            })
            .transpose()?;

        base.coordinates.extend(
            self.coordinates
                .into_iter()
                .map(|[longitude, latitude]| Coordinate::new(longitude, latitude)),
        );
        if let Some(bearings) = self.bearings {
            base.bearings.extend(
                bearings
                    .into_iter()
                    .map(|b| b.map(|[bearing, range]| Bearing::new(bearing, range))),
            );
        }
        if let Some(radiuses) = self.radiuses {
            base.radiuses.extend(radiuses);
        }
        if let Some(generate_hints) = self.generate_hints {
            base.generate_hints = generate_hints;
        }
        if let Some(hints) = hints {
            base.hints.extend(hints);
        }
        Ok(())
    }
}

/// Route-shaped options, shared by route and match requests.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RouteOptions {
    pub alternatives: Option<bool>,
    pub steps: Option<bool>,
    /// `true`, `false`, or one of `nodes|distance|duration|datasources|weight|speed`.
    pub annotations: Option<Toggle>,
    /// One of `polyline|polyline6|geojson`.
    pub geometries: Option<Toggle>,
    /// `false`, or one of `simplified|full`.
    pub overview: Option<Toggle>,
    /// `true`/`false`; anything else keeps the engine default.
    pub continue_straight: Option<Toggle>,
}

impl RouteOptions {
    fn apply_to(self, params: &mut RouteParameters) {
        if let Some(alternatives) = self.alternatives {
            params.alternatives = alternatives;
        }
        if let Some(steps) = self.steps {
            params.steps = steps;
        }
        match self.annotations {
            Some(Toggle::Bool(false)) => {
                params.annotations = false;
                params.annotations_type = RouteAnnotations::empty();
            }
            Some(Toggle::Bool(true)) => {
                params.annotations = true;
                params.annotations_type = RouteAnnotations::ALL;
            }
            Some(Toggle::Tag(tag)) => {
                if let Some(category) = RouteAnnotations::from_tag(&tag) {
                    params.annotations = true;
                    params.annotations_type = category;
                }
            }
            _ => {}
        }
        if let Some(Toggle::Tag(tag)) = self.geometries {
            if let Some(geometries) = Geometries::from_tag(&tag) {
                params.geometries = geometries;
            }
        }
        match self.overview {
            Some(Toggle::Bool(false)) => params.overview = Overview::False,
            Some(Toggle::Tag(tag)) => {
                if let Some(overview) = Overview::from_tag(&tag) {
                    params.overview = overview;
                }
            }
            _ => {}
        }
        if let Some(Toggle::Bool(continue_straight)) = self.continue_straight {
            params.continue_straight = Some(continue_straight);
        }
    }
}

/// Bulk route request.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteRequest {
    #[serde(flatten)]
    pub base: BaseRequest,
    #[serde(flatten)]
    pub options: RouteOptions,
}

impl Request for RouteRequest {
    type Params = RouteParameters;

    fn apply_to(self, params: &mut RouteParameters) -> Result<()> {
        self.base.apply_to(&mut params.base)?;
        self.options.apply_to(params);
        Ok(())
    }
}

/// Bulk table request.
#[derive(Debug, Clone, Deserialize)]
pub struct TableRequest {
    #[serde(flatten)]
    pub base: BaseRequest,
    pub sources: Option<Vec<usize>>,
    pub destinations: Option<Vec<usize>>,
    /// Tags among `duration` and `distance`.
    pub annotations: Option<Vec<String>>,
}

impl Request for TableRequest {
    type Params = TableParameters;

    fn apply_to(self, params: &mut TableParameters) -> Result<()> {
        self.base.apply_to(&mut params.base)?;
        if let Some(sources) = self.sources {
            params.sources.extend(sources);
        }
        if let Some(destinations) = self.destinations {
            params.destinations.extend(destinations);
        }
        if let Some(tags) = self.annotations {
            let flags = tags
                .iter()
                .filter_map(|tag| TableAnnotations::from_tag(tag))
                .fold(TableAnnotations::empty(), |acc, flag| acc | flag);
            if !flags.is_empty() {
                params.annotations = flags;
            }
        }
        Ok(())
    }
}

/// Bulk nearest request.
#[derive(Debug, Clone, Deserialize)]
pub struct NearestRequest {
    #[serde(flatten)]
    pub base: BaseRequest,
    /// Number of results.
    pub number: Option<u32>,
}

impl Request for NearestRequest {
    type Params = NearestParameters;

    fn apply_to(self, params: &mut NearestParameters) -> Result<()> {
        self.base.apply_to(&mut params.base)?;
        if let Some(number) = self.number {
            params.number_of_results = number;
        }
        Ok(())
    }
}

/// Bulk match request.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchRequest {
    #[serde(flatten)]
    pub base: BaseRequest,
    #[serde(flatten)]
    pub options: RouteOptions,
    /// Seconds since epoch, by coordinate position.
    pub timestamps: Option<Vec<u32>>,
}

impl Request for MatchRequest {
    type Params = MatchParameters;

    fn apply_to(self, params: &mut MatchParameters) -> Result<()> {
        self.base.apply_to(&mut params.route.base)?;
        self.options.apply_to(&mut params.route);
        if let Some(timestamps) = self.timestamps {
            params.timestamps.extend(timestamps);
        }
        Ok(())
    }
}
