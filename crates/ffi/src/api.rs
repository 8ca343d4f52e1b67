//! C API: version, configuration, engine, invocation and responses.

use std::ffi::CString;
use std::os::raw::{c_char, c_int, c_uint, c_void};
use std::path::Path;
use std::ptr;

use osrmc_core::{convert, version, EngineConfig, Osrm};
use osrmc_engine::CrowFly;

use crate::error::{guard, str_arg};
use crate::types::*;

/// Returns the packed library version, `major << 16 | minor << 8 | patch`.
#[no_mangle]
pub extern "C" fn osrmc_get_version() -> c_uint {
    version::get_version()
}

/// Returns non-zero if the loaded library has the major version this header was built for.
///
/// Callers must not use the library when this returns zero.
#[no_mangle]
pub extern "C" fn osrmc_is_abi_compatible() -> c_int {
    c_int::from(version::is_abi_compatible())
}

/// Creates an engine configuration.
///
/// A null `base_path` selects shared memory; otherwise the engine reads its data from files
/// under `base_path`.
///
/// # Safety
/// - `base_path` must be null or a valid null-terminated UTF-8 string
/// - `error` must be null or valid for writes
/// - The caller must free the handle using `osrmc_config_destruct`
#[no_mangle]
pub unsafe extern "C" fn osrmc_config_construct(
    base_path: *const c_char,
    error: *mut osrmc_error_t,
) -> osrmc_config_t {
    guard(error, ptr::null_mut(), || {
        let path = if base_path.is_null() {
            None
        } else {
            Some(Path::new(str_arg(base_path, "base_path")?))
        };
        let inner = EngineConfig::from_base_path(path);
        log::debug!("config constructed: {:?}", inner.storage);
        Ok(into_handle(osrmc_config { inner }))
    })
}

/// Applies a JSON object of limits (`max_locations_viaroute`, `max_locations_distance_table`,
/// `max_locations_map_matching`, `max_results_nearest`, `max_alternatives`).
///
/// A negative limit means unlimited. Unknown keys are ignored.
///
/// # Safety
/// - `config` must be a live handle
/// - `json` must be a valid null-terminated UTF-8 string
/// - `error` must be null or valid for writes
#[no_mangle]
pub unsafe extern "C" fn osrmc_config_update(
    config: osrmc_config_t,
    json: *const c_char,
    error: *mut osrmc_error_t,
) {
    guard(error, (), || {
        let config = handle_mut(config, "config")?;
        config.inner.update_from_str(str_arg(json, "json")?)
    })
}

/// Frees a configuration. Engines built from it are unaffected.
///
/// # Safety
/// - `config` must be null or a live handle
/// - `config` must not be used after this call
#[no_mangle]
pub unsafe extern "C" fn osrmc_config_destruct(config: osrmc_config_t) {
    release(config);
}

/// Creates an engine from a configuration.
///
/// # Safety
/// - `config` must be a live handle
/// - `error` must be null or valid for writes
/// - The caller must free the handle using `osrmc_osrm_destruct`
#[no_mangle]
pub unsafe extern "C" fn osrmc_osrm_construct(
    config: osrmc_config_t,
    error: *mut osrmc_error_t,
) -> osrmc_osrm_t {
    guard(error, ptr::null_mut(), || {
        let config = handle_ref(config, "config")?;
        let engine = CrowFly::new(&config.inner)?;
        Ok(into_handle(osrmc_osrm {
            inner: Osrm::new(engine),
        }))
    })
}

/// Frees an engine.
///
/// # Safety
/// - `osrm` must be null or a live handle
/// - `osrm` must not be used after this call
#[no_mangle]
pub unsafe extern "C" fn osrmc_osrm_destruct(osrm: osrmc_osrm_t) {
    release(osrm);
}

/// Computes a route.
///
/// Returns null and fills `error` when the engine rejects the request.
///
/// # Safety
/// - `osrm` and `params` must be live handles
/// - `error` must be null or valid for writes
/// - The caller must free the response using `osrmc_route_response_destruct`
#[no_mangle]
pub unsafe extern "C" fn osrmc_route(
    osrm: osrmc_osrm_t,
    params: osrmc_route_params_t,
    error: *mut osrmc_error_t,
) -> osrmc_route_response_t {
    guard(error, ptr::null_mut(), || {
        let osrm = handle_ref(osrm, "osrm")?;
        let params = handle_ref(params, "route params")?.get()?;
        let inner = osrm.inner.route(params)?;
        Ok(into_handle(osrmc_route_response { inner }))
    })
}

/// Computes a route and calls `handler` once per waypoint instead of returning a response.
///
/// # Safety
/// - `osrm` and `params` must be live handles
/// - `handler` must be null or a valid function; `data` is passed through untouched
/// - `error` must be null or valid for writes
#[no_mangle]
pub unsafe extern "C" fn osrmc_route_with(
    osrm: osrmc_osrm_t,
    params: osrmc_route_params_t,
    handler: osrmc_waypoint_handler_t,
    data: *mut c_void,
    error: *mut osrmc_error_t,
) {
    guard(error, (), || {
        let osrm = handle_ref(osrm, "osrm")?;
        let params = handle_ref(params, "route params")?.get()?;
        osrm.inner.route_with(params, |name, longitude, latitude| {
            if let Some(handler) = handler {
                let name = c_string(name);
                handler(data, name.as_ptr(), longitude, latitude);
            }
        })
    })
}

/// Computes a duration/distance table.
///
/// # Safety
/// - `osrm` and `params` must be live handles
/// - `error` must be null or valid for writes
/// - The caller must free the response using `osrmc_table_response_destruct`
#[no_mangle]
pub unsafe extern "C" fn osrmc_table(
    osrm: osrmc_osrm_t,
    params: osrmc_table_params_t,
    error: *mut osrmc_error_t,
) -> osrmc_table_response_t {
    guard(error, ptr::null_mut(), || {
        let osrm = handle_ref(osrm, "osrm")?;
        let params = handle_ref(params, "table params")?.get()?;
        let inner = osrm.inner.table(params)?;
        Ok(into_handle(osrmc_table_response { inner }))
    })
}

/// Finds the nearest network positions to a coordinate.
///
/// # Safety
/// - `osrm` and `params` must be live handles
/// - `error` must be null or valid for writes
/// - The caller must free the response using `osrmc_nearest_response_destruct`
#[no_mangle]
pub unsafe extern "C" fn osrmc_nearest(
    osrm: osrmc_osrm_t,
    params: osrmc_nearest_params_t,
    error: *mut osrmc_error_t,
) -> osrmc_nearest_response_t {
    guard(error, ptr::null_mut(), || {
        let osrm = handle_ref(osrm, "osrm")?;
        let params = handle_ref(params, "nearest params")?.get()?;
        let inner = osrm.inner.nearest(params)?;
        Ok(into_handle(osrmc_nearest_response { inner }))
    })
}

/// Matches a trace to the network.
///
/// # Safety
/// - `osrm` and `params` must be live handles
/// - `error` must be null or valid for writes
/// - The caller must free the response using `osrmc_match_response_destruct`
#[no_mangle]
pub unsafe extern "C" fn osrmc_match(
    osrm: osrmc_osrm_t,
    params: osrmc_match_params_t,
    error: *mut osrmc_error_t,
) -> osrmc_match_response_t {
    guard(error, ptr::null_mut(), || {
        let osrm = handle_ref(osrm, "osrm")?;
        let params = handle_ref(params, "match params")?.get()?;
        let inner = osrm.inner.match_trace(params)?;
        Ok(into_handle(osrmc_match_response { inner }))
    })
}

/// Frees a route response.
///
/// # Safety
/// - `response` must be null or a live handle
/// - `response` must not be used after this call
#[no_mangle]
pub unsafe extern "C" fn osrmc_route_response_destruct(response: osrmc_route_response_t) {
    release(response);
}

/// Frees a table response.
///
/// # Safety
/// - `response` must be null or a live handle
/// - `response` must not be used after this call
#[no_mangle]
pub unsafe extern "C" fn osrmc_table_response_destruct(response: osrmc_table_response_t) {
    release(response);
}

/// Frees a nearest response.
///
/// # Safety
/// - `response` must be null or a live handle
/// - `response` must not be used after this call
#[no_mangle]
pub unsafe extern "C" fn osrmc_nearest_response_destruct(response: osrmc_nearest_response_t) {
    release(response);
}

/// Frees a match response.
///
/// # Safety
/// - `response` must be null or a live handle
/// - `response` must not be used after this call
#[no_mangle]
pub unsafe extern "C" fn osrmc_match_response_destruct(response: osrmc_match_response_t) {
    release(response);
}

/// Distance of the first route, in meters. `INFINITY` on error.
///
/// # Safety
/// - `response` must be a live handle
/// - `error` must be null or valid for writes
#[no_mangle]
pub unsafe extern "C" fn osrmc_route_response_distance(
    response: osrmc_route_response_t,
    error: *mut osrmc_error_t,
) -> f64 {
    guard(error, f64::INFINITY, || {
        handle_ref(response, "route response")?.inner.distance()
    })
}

/// Duration of the first route, in seconds. `INFINITY` on error.
///
/// # Safety
/// - `response` must be a live handle
/// - `error` must be null or valid for writes
#[no_mangle]
pub unsafe extern "C" fn osrmc_route_response_duration(
    response: osrmc_route_response_t,
    error: *mut osrmc_error_t,
) -> f64 {
    guard(error, f64::INFINITY, || {
        handle_ref(response, "route response")?.inner.duration()
    })
}

/// Duration from source `from` to destination `to`, in seconds.
///
/// Returns `INFINITY` with `NoTable` when durations were not requested and with `NoRoute`
/// when the pair is unreachable.
///
/// # Safety
/// - `response` must be a live handle
/// - `error` must be null or valid for writes
#[no_mangle]
pub unsafe extern "C" fn osrmc_table_response_duration(
    response: osrmc_table_response_t,
    from: usize,
    to: usize,
    error: *mut osrmc_error_t,
) -> f64 {
    guard(error, f64::INFINITY, || {
        handle_ref(response, "table response")?.inner.duration(from, to)
    })
}

/// Distance from source `from` to destination `to`, in meters.
///
/// Returns `INFINITY` with `NoTable` when distances were not requested and with `NoRoute`
/// when the pair is unreachable.
///
/// # Safety
/// - `response` must be a live handle
/// - `error` must be null or valid for writes
#[no_mangle]
pub unsafe extern "C" fn osrmc_table_response_distance(
    response: osrmc_table_response_t,
    from: usize,
    to: usize,
    error: *mut osrmc_error_t,
) -> f64 {
    guard(error, f64::INFINITY, || {
        handle_ref(response, "table response")?.inner.distance(from, to)
    })
}

/// Distance of the first matching, in meters. `INFINITY` on error.
///
/// # Safety
/// - `response` must be a live handle
/// - `error` must be null or valid for writes
#[no_mangle]
pub unsafe extern "C" fn osrmc_match_response_distance(
    response: osrmc_match_response_t,
    error: *mut osrmc_error_t,
) -> f64 {
    guard(error, f64::INFINITY, || {
        handle_ref(response, "match response")?.inner.distance()
    })
}

/// Duration of the first matching, in seconds. `INFINITY` on error.
///
/// # Safety
/// - `response` must be a live handle
/// - `error` must be null or valid for writes
#[no_mangle]
pub unsafe extern "C" fn osrmc_match_response_duration(
    response: osrmc_match_response_t,
    error: *mut osrmc_error_t,
) -> f64 {
    guard(error, f64::INFINITY, || {
        handle_ref(response, "match response")?.inner.duration()
    })
}

/// Borrowed view of the whole route response tree, valid while `response` lives.
///
/// # Safety
/// `response` must be null or a live handle.
#[no_mangle]
pub unsafe extern "C" fn osrmc_route_response_json(
    response: osrmc_route_response_t,
) -> osrmc_json_t {
    response
        .as_ref()
        .map_or(ptr::null(), |r| osrmc_json::view(r.inner.as_object()))
}

/// Borrowed view of the whole table response tree, valid while `response` lives.
///
/// # Safety
/// `response` must be null or a live handle.
#[no_mangle]
pub unsafe extern "C" fn osrmc_table_response_json(
    response: osrmc_table_response_t,
) -> osrmc_json_t {
    response
        .as_ref()
        .map_or(ptr::null(), |r| osrmc_json::view(r.inner.as_object()))
}

/// Borrowed view of the whole nearest response tree, valid while `response` lives.
///
/// # Safety
/// `response` must be null or a live handle.
#[no_mangle]
pub unsafe extern "C" fn osrmc_nearest_response_json(
    response: osrmc_nearest_response_t,
) -> osrmc_json_t {
    response
        .as_ref()
        .map_or(ptr::null(), |r| osrmc_json::view(r.inner.as_object()))
}

/// Borrowed view of the whole match response tree, valid while `response` lives.
///
/// # Safety
/// `response` must be null or a live handle.
#[no_mangle]
pub unsafe extern "C" fn osrmc_match_response_json(
    response: osrmc_match_response_t,
) -> osrmc_json_t {
    response
        .as_ref()
        .map_or(ptr::null(), |r| osrmc_json::view(r.inner.as_object()))
}

/// Serializes a response tree as JSON text.
///
/// Integral numbers are written without a fractional part; non-finite numbers become
/// `null`. Key and element order follow the engine's output.
///
/// # Safety
/// - `json` must be a view obtained from a live response
/// - `error` must be null or valid for writes
/// - The caller must free the result using `osrmc_string_destruct`
#[no_mangle]
pub unsafe extern "C" fn osrmc_json_to_string(
    json: osrmc_json_t,
    error: *mut osrmc_error_t,
) -> *mut c_char {
    guard(error, ptr::null_mut(), || {
        let json = handle_ref(json, "json")?;
        let text = convert::object_to_host(&json.0).to_string();
        Ok(c_string(&text).into_raw())
    })
}

/// Frees a string returned by this library.
///
/// # Safety
/// - `s` must be null or have been returned by `osrmc_json_to_string`
/// - `s` must not be used after this call
#[no_mangle]
pub unsafe extern "C" fn osrmc_string_destruct(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}
