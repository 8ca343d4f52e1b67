//! Great-circle engine.

use osrmc_core::engine::failure;
use osrmc_core::{
    Array, Coordinate, Engine, EngineConfig, Error, MatchParameters, NearestParameters, Object,
    Parameters, Reply, Result, RouteParameters, Status, Storage, TableAnnotations,
    TableParameters, Value,
};

use crate::geo::{haversine, round1};
use crate::render::{self, RouteShape, Segment};

/// A rejected request, already shaped as a failure reply.
type Checked<T> = std::result::Result<T, Reply>;

/// Engine that routes along straight great-circle segments at constant speed.
///
/// Every coordinate snaps to itself (or to the location carried by its hint), so results
/// are deterministic and need no road network.
#[derive(Debug, Clone)]
pub struct CrowFly {
    config: EngineConfig,
    speed: f64,
}

impl CrowFly {
    /// Travel speed in meters per second (50 km/h).
    pub const DEFAULT_SPEED: f64 = 50.0 / 3.6;

    /// Creates an engine for the given configuration.
    ///
    /// File-backed configurations require the base path to exist.
    pub fn new(config: &EngineConfig) -> Result<Self> {
        if let Storage::Files(path) = &config.storage {
            if !path.exists() {
                return Err(Error::Construction(format!(
                    "Required files are missing, cannot continue. Have all the pre-processing steps been run? ({})",
                    path.display()
                )));
            }
        }
        log::debug!("crow-fly engine ready: {:?}", config.storage);
        Ok(Self {
            config: config.clone(),
            speed: Self::DEFAULT_SPEED,
        })
    }

    /// Overrides the travel speed, in meters per second.
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    /// The configuration this engine was built with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Shared validation: options, values, then limits. Returns snapped coordinates.
    ///
    /// Hints that do not decode to a location are ignored.
    fn check(
        &self,
        params: &impl Parameters,
        entries: usize,
        limit: Option<usize>,
    ) -> Checked<Vec<Coordinate>> {
        if !params.is_valid() {
            return Err(failure("InvalidOptions", "Invalid options specified"));
        }

        let base = params.base();
        if let Some(index) = base.coordinates.iter().position(|c| !c.is_valid()) {
            return Err(failure(
                "InvalidValue",
                format!("Invalid coordinate value at index {}", index),
            ));
        }

        too_big(entries, limit)?;

        Ok(base
            .coordinates
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                base.hints
                    .get(i)
                    .and_then(|hint| hint.as_ref())
                    .and_then(render::location_from_hint)
                    .unwrap_or(c)
            })
            .collect())
    }

    fn segments(&self, points: &[Coordinate], timestamps: &[u32]) -> Vec<Segment> {
        points
            .windows(2)
            .enumerate()
            .map(|(i, pair)| {
                let distance = haversine(pair[0], pair[1]);
                let duration = if timestamps.len() == points.len() {
                    f64::from(timestamps[i + 1] - timestamps[i])
                } else {
                    distance / self.speed
                };
                Segment::new(pair[0], pair[1], duration)
            })
            .collect()
    }

    fn waypoints(&self, params: &impl Parameters, snapped: &[Coordinate]) -> Array {
        let base = params.base();
        base.coordinates
            .iter()
            .zip(snapped)
            .map(|(&input, &at)| Value::from(render::waypoint(input, at, base.generate_hints)))
            .collect()
    }

    fn shape(params: &RouteParameters) -> RouteShape {
        RouteShape {
            steps: params.steps,
            annotations: params.annotations.then_some(params.annotations_type),
            geometries: params.geometries,
            overview: params.overview != osrmc_core::Overview::False,
        }
    }

    fn checked_route(&self, params: &RouteParameters) -> Checked<Object> {
        let n = params.base.coordinates.len();
        let snapped = self.check(params, n, self.config.max_locations_viaroute)?;
        let segments = self.segments(&snapped, &[]);
        let route = render::route(&snapped, &segments, Self::shape(params));

        Ok(Object::new()
            .with("code", "Ok")
            .with("routes", vec![Value::from(route)])
            .with("waypoints", self.waypoints(params, &snapped)))
    }

    fn checked_table(&self, params: &TableParameters) -> Checked<Object> {
        let n = params.base.coordinates.len();
        let rows = indices_or_all(&params.sources, n);
        let columns = indices_or_all(&params.destinations, n);
        let limit = self
            .config
            .max_locations_distance_table
            .map(|max| max.saturating_mul(max));
        let snapped = self.check(params, rows.len() * columns.len(), limit)?;

        let matrix = |cell: &dyn Fn(Coordinate, Coordinate) -> f64| -> Value {
            rows.iter()
                .map(|&from| {
                    let row: Array = columns
                        .iter()
                        .map(|&to| Value::from(round1(cell(snapped[from], snapped[to]))))
                        .collect();
                    Value::from(row)
                })
                .collect::<Vec<Value>>()
                .into()
        };

        let mut body = Object::new().with("code", "Ok");
        if params.annotations.contains(TableAnnotations::DURATION) {
            body.insert("durations", matrix(&|a, b| haversine(a, b) / self.speed));
        }
        if params.annotations.contains(TableAnnotations::DISTANCE) {
            body.insert("distances", matrix(&haversine));
        }

        let all = self.waypoints(params, &snapped);
        let pick = |indices: &[usize]| -> Array {
            indices
                .iter()
                .filter_map(|&i| all.values.get(i).cloned())
                .collect()
        };
        Ok(body
            .with("sources", pick(&rows))
            .with("destinations", pick(&columns)))
    }

    fn checked_nearest(&self, params: &NearestParameters) -> Checked<Object> {
        let snapped = self.check(
            params,
            params.number_of_results as usize,
            self.config.max_results_nearest,
        )?;

        let waypoints: Array = self
            .waypoints(params, &snapped)
            .values
            .into_iter()
            .map(|waypoint| match waypoint {
                Value::Object(object) => {
                    Value::from(object.with("nodes", vec![Value::from(0u32), Value::from(0u32)]))
                }
                other => other,
            })
            .collect();

        Ok(Object::new().with("code", "Ok").with("waypoints", waypoints))
    }

    fn checked_match(&self, params: &MatchParameters) -> Checked<Object> {
        let n = params.route.base.coordinates.len();
        let snapped = self.check(params, n, None)?;
        if params.timestamps.windows(2).any(|pair| pair[1] < pair[0]) {
            return Err(failure(
                "InvalidValue",
                "Timestamps need to be monotonically increasing",
            ));
        }
        too_big(n, self.config.max_locations_map_matching)?;

        let segments = self.segments(&snapped, &params.timestamps);
        let matching =
            render::route(&snapped, &segments, Self::shape(&params.route)).with("confidence", 1.0);

        let tracepoints: Array = self
            .waypoints(params, &snapped)
            .values
            .into_iter()
            .enumerate()
            .map(|(i, waypoint)| match waypoint {
                Value::Object(object) => {
                    let mut tracepoint = Object::new()
                        .with("alternatives_count", 0u32)
                        .with("waypoint_index", i)
                        .with("matchings_index", 0u32);
                    for (key, value) in object.values {
                        tracepoint.insert(key, value);
                    }
                    Value::from(tracepoint)
                }
                other => other,
            })
            .collect();

        Ok(Object::new()
            .with("code", "Ok")
            .with("matchings", vec![Value::from(matching)])
            .with("tracepoints", tracepoints))
    }
}

fn too_big(entries: usize, limit: Option<usize>) -> Checked<()> {
    match limit {
        Some(max) if entries > max => Err(failure(
            "TooBig",
            format!(
                "Number of entries {} is higher than current maximum ({})",
                entries, max
            ),
        )),
        _ => Ok(()),
    }
}

fn indices_or_all(indices: &[usize], n: usize) -> Vec<usize> {
    if indices.is_empty() {
        (0..n).collect()
    } else {
        indices.to_vec()
    }
}

fn reply(result: Checked<Object>) -> Result<Reply> {
    Ok(match result {
        Ok(body) => (Status::Ok, body),
        Err(rejected) => rejected,
    })
}

impl Engine for CrowFly {
    fn route(&self, params: &RouteParameters) -> Result<Reply> {
        reply(self.checked_route(params))
    }

    fn table(&self, params: &TableParameters) -> Result<Reply> {
        reply(self.checked_table(params))
    }

    fn nearest(&self, params: &NearestParameters) -> Result<Reply> {
        reply(self.checked_nearest(params))
    }

    fn match_trace(&self, params: &MatchParameters) -> Result<Reply> {
        reply(self.checked_match(params))
    }
}
