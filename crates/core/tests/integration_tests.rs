//! Integration tests for osrmc-core.
//!
//! A scripted engine stands in for the routing engine so every error kind can be reached
//! deterministically.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use approx::assert_relative_eq;
use serde_json::json;

use osrmc_core::engine::failure;
use osrmc_core::request::{self, RouteRequest, TableRequest};
use osrmc_core::{
    Array, Engine, Error, MatchParameters, NearestParameters, Object, Osrm, Parameters, Reply,
    Result, RouteParameters, Status, TableAnnotations, TableKind, TableParameters, Value,
};

/// Answers every table cell with `from + to` seconds/meters, except cells listed in
/// `unreachable`, which come back null.
struct ScriptedEngine {
    unreachable: Vec<(usize, usize)>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedEngine {
    fn new() -> Self {
        Self {
            unreachable: Vec::new(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn unreachable(mut self, from: usize, to: usize) -> Self {
        self.unreachable.push((from, to));
        self
    }

    fn matrix(&self, rows: &[usize], columns: &[usize]) -> Value {
        rows.iter()
            .map(|&from| {
                let row: Array = columns
                    .iter()
                    .map(|&to| {
                        if self.unreachable.contains(&(from, to)) {
                            Value::Null
                        } else {
                            Value::Number((from + to) as f64)
                        }
                    })
                    .collect();
                Value::from(row)
            })
            .collect::<Vec<_>>()
            .into()
    }
}

fn all_or(indices: &[usize], n: usize) -> Vec<usize> {
    if indices.is_empty() {
        (0..n).collect()
    } else {
        indices.to_vec()
    }
}

impl Engine for ScriptedEngine {
    fn route(&self, params: &RouteParameters) -> Result<Reply> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        if !params.is_valid() {
            return Ok(failure("InvalidOptions", "Invalid options specified"));
        }
        let route = Object::new()
            .with("distance", 420.5)
            .with("duration", 30.0);
        Ok((
            Status::Ok,
            Object::new()
                .with("code", "Ok")
                .with("routes", vec![Value::from(route)]),
        ))
    }

    fn table(&self, params: &TableParameters) -> Result<Reply> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        if !params.is_valid() {
            return Ok(failure("InvalidOptions", "Invalid options specified"));
        }
        let n = params.base().coordinates.len();
        let rows = all_or(&params.sources, n);
        let columns = all_or(&params.destinations, n);

        let mut body = Object::new().with("code", "Ok");
        if params.annotations.contains(TableAnnotations::DURATION) {
            body.insert("durations", self.matrix(&rows, &columns));
        }
        if params.annotations.contains(TableAnnotations::DISTANCE) {
            body.insert("distances", self.matrix(&rows, &columns));
        }
        Ok((Status::Ok, body))
    }

    fn nearest(&self, _: &NearestParameters) -> Result<Reply> {
        Ok((Status::Error, Object::new().with("code", "").with("message", "no data")))
    }

    fn match_trace(&self, _: &MatchParameters) -> Result<Reply> {
        Err(Error::Structure("matcher crashed".into()))
    }
}

fn table_params(input: serde_json::Value) -> TableParameters {
    request::build::<TableRequest>(input).expect("valid table request")
}

#[test]
fn test_route_returns_response_or_error() {
    let osrm = Osrm::new(ScriptedEngine::new());

    let params = request::build::<RouteRequest>(json!({
        "coordinates": [[13.388, 52.517], [13.385, 52.520]]
    }))
    .unwrap();
    let response = osrm.route(&params).unwrap();
    assert_relative_eq!(response.distance().unwrap(), 420.5);

    let empty = RouteParameters::new();
    let err = osrm.route(&empty).unwrap_err();
    assert_eq!(err.code(), "InvalidOptions");
}

#[test]
fn test_distance_without_distance_annotation_is_no_table() {
    let osrm = Osrm::new(ScriptedEngine::new());
    let params = table_params(json!({
        "coordinates": [[0.0, 0.0], [0.1, 0.0], [0.2, 0.0]]
    }));
    let table = osrm.table(&params).unwrap();

    for from in 0..3 {
        for to in 0..3 {
            let err = table.distance(from, to).unwrap_err();
            assert_eq!(err, Error::NoTable(TableKind::Distances));
            assert_eq!(err.code(), "NoTable");
            assert_relative_eq!(table.duration(from, to).unwrap(), (from + to) as f64);
        }
    }
}

#[test]
fn test_sources_and_destinations_subset() {
    let osrm = Osrm::new(ScriptedEngine::new());
    let params = table_params(json!({
        "coordinates": [[0.0, 0.0], [0.1, 0.0]],
        "sources": [0],
        "destinations": [1]
    }));
    let table = osrm.table(&params).unwrap();

    assert_relative_eq!(table.duration(0, 0).unwrap(), 1.0);
    assert_eq!(table.distance(0, 0).unwrap_err().code(), "NoTable");
    assert!(matches!(table.duration(0, 1), Err(Error::Structure(_))));
    assert_eq!(table.duration(0, 1).unwrap_err().code(), "Exception");
    assert_eq!(table.distance(0, 1).unwrap_err().code(), "NoTable");
}

#[test]
fn test_null_cells_are_no_route() {
    let osrm = Osrm::new(ScriptedEngine::new().unreachable(1, 0));
    let mut params = table_params(json!({
        "coordinates": [[0.0, 0.0], [0.1, 0.0]]
    }));
    params.annotations.enable_distance(true);
    let table = osrm.table(&params).unwrap();

    assert_eq!(table.duration(1, 0), Err(Error::NoRoute));
    assert_eq!(table.distance(1, 0), Err(Error::NoRoute));
    assert_relative_eq!(table.distance(0, 1).unwrap(), 1.0);
}

#[test]
fn test_annotations_attached_by_value() {
    let mut annotations = TableAnnotations::default();
    annotations.enable_distance(true);

    let mut params = TableParameters::new();
    params.annotations = annotations;
    annotations.enable_distance(false);

    assert!(params.annotations.contains(TableAnnotations::DISTANCE));
    assert!(!annotations.contains(TableAnnotations::DISTANCE));
}

#[test]
fn test_empty_engine_code_becomes_unknown() {
    let osrm = Osrm::new(ScriptedEngine::new());
    let mut params = NearestParameters::new();
    params.base.add_coordinate(osrmc_core::Coordinate::new(1.0, 2.0));

    let err = osrm.nearest(&params).unwrap_err();
    assert_eq!(err.code(), "Unknown");
    assert_eq!(err.message(), "no data");
}

#[test]
fn test_engine_exception_is_generic() {
    let osrm = Osrm::new(ScriptedEngine::new());
    let err = osrm.match_trace(&MatchParameters::new()).unwrap_err();
    assert_eq!(err.code(), "Exception");
}

#[test]
fn test_response_exports_to_host() {
    let osrm = Osrm::new(ScriptedEngine::new());
    let params = table_params(json!({"coordinates": [[0.0, 0.0], [0.1, 0.0]]}));
    let host = osrm.table(&params).unwrap().to_host();

    assert_eq!(
        host,
        json!({
            "code": "Ok",
            "durations": [[0, 1], [1, 2]]
        })
    );
}

#[test]
fn test_no_retry_on_failure() {
    let engine = ScriptedEngine::new();
    let calls = Arc::clone(&engine.calls);
    let osrm = Osrm::from_boxed(Box::new(engine));

    assert!(osrm.route(&RouteParameters::new()).is_err());
    assert_eq!(calls.load(Ordering::Relaxed), 1);

    assert!(osrm.route(&RouteParameters::new()).is_err());
    assert_eq!(calls.load(Ordering::Relaxed), 2);
}
