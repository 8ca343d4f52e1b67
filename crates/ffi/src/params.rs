//! Request handles: construction, incremental setters and bulk updates.

use std::os::raw::{c_char, c_int, c_uint};
use std::ptr;

use osrmc_core::request::{self, MatchRequest, NearestRequest, RouteRequest, TableRequest};
use osrmc_core::{Bearing, Coordinate, Error, Hint, TableAnnotations};

use crate::error::{guard, str_arg};
use crate::types::*;

macro_rules! params_lifecycle {
    ($handle:ident, $handle_t:ident, $request:ty, $construct:ident, $destruct:ident, $update:ident) => {
        /// Creates an empty request.
        ///
        /// # Safety
        /// - `error` must be null or valid for writes
        /// - The caller must free the handle with the matching destruct function
        #[no_mangle]
        pub unsafe extern "C" fn $construct(error: *mut osrmc_error_t) -> $handle_t {
            guard(error, ptr::null_mut(), || {
                log::debug!("{} constructed", stringify!($handle));
                Ok(into_handle($handle::new()))
            })
        }

        /// Frees a request.
        ///
        /// # Safety
        /// - `params` must be null or a live handle
        /// - `params` must not be used after this call
        #[no_mangle]
        pub unsafe extern "C" fn $destruct(params: $handle_t) {
            release(params);
        }

        /// Applies a JSON object of request options, appending to list fields.
        ///
        /// Unknown keys are ignored. On error the request is left unchanged.
        ///
        /// # Safety
        /// - `params` must be a live handle
        /// - `json` must be a valid null-terminated UTF-8 string
        /// - `error` must be null or valid for writes
        #[no_mangle]
        pub unsafe extern "C" fn $update(
            params: $handle_t,
            json: *const c_char,
            error: *mut osrmc_error_t,
        ) {
            guard(error, (), || {
                let params = handle_mut(params, stringify!($handle))?.get_mut()?;
                let json = str_arg(json, "json")?;
                let mut updated = params.clone();
                request::update_from_str::<$request>(&mut updated, json)?;
                *params = updated;
                Ok(())
            })
        }
    };
}

params_lifecycle!(
    osrmc_route_params,
    osrmc_route_params_t,
    RouteRequest,
    osrmc_route_params_construct,
    osrmc_route_params_destruct,
    osrmc_route_params_update
);
params_lifecycle!(
    osrmc_table_params,
    osrmc_table_params_t,
    TableRequest,
    osrmc_table_params_construct,
    osrmc_table_params_destruct,
    osrmc_table_params_update
);
params_lifecycle!(
    osrmc_nearest_params,
    osrmc_nearest_params_t,
    NearestRequest,
    osrmc_nearest_params_construct,
    osrmc_nearest_params_destruct,
    osrmc_nearest_params_update
);
params_lifecycle!(
    osrmc_match_params,
    osrmc_match_params_t,
    MatchRequest,
    osrmc_match_params_construct,
    osrmc_match_params_destruct,
    osrmc_match_params_update
);

/// Appends a coordinate to any request.
///
/// # Safety
/// - `params` must be a live request handle cast to `osrmc_params_t`
/// - `error` must be null or valid for writes
#[no_mangle]
pub unsafe extern "C" fn osrmc_params_add_coordinate(
    params: osrmc_params_t,
    longitude: f64,
    latitude: f64,
    error: *mut osrmc_error_t,
) {
    guard(error, (), || {
        let params = handle_mut(params, "params")?;
        params
            .inner
            .base_mut()
            .add_coordinate(Coordinate::new(longitude, latitude));
        Ok(())
    })
}

/// Appends a coordinate together with its search radius and bearing filter.
///
/// # Safety
/// - `params` must be a live request handle cast to `osrmc_params_t`
/// - `error` must be null or valid for writes
#[no_mangle]
pub unsafe extern "C" fn osrmc_params_add_coordinate_with(
    params: osrmc_params_t,
    longitude: f64,
    latitude: f64,
    radius: f64,
    bearing: c_int,
    range: c_int,
    error: *mut osrmc_error_t,
) {
    guard(error, (), || {
        let params = handle_mut(params, "params")?;
        let narrow = |value: c_int, what: &str| {
            i16::try_from(value)
                .map_err(|_| Error::InvalidParameter(format!("{} {} out of range", what, value)))
        };
        let bearing = Bearing::new(narrow(bearing, "bearing")?, narrow(range, "range")?);
        params.inner.base_mut().add_coordinate_with(
            Coordinate::new(longitude, latitude),
            radius,
            bearing,
        );
        Ok(())
    })
}

/// Appends a base64 hint for the next coordinate position.
///
/// # Safety
/// - `params` must be a live request handle cast to `osrmc_params_t`
/// - `hint` must be a valid null-terminated string
/// - `error` must be null or valid for writes
#[no_mangle]
pub unsafe extern "C" fn osrmc_params_add_hint(
    params: osrmc_params_t,
    hint: *const c_char,
    error: *mut osrmc_error_t,
) {
    guard(error, (), || {
        let params = handle_mut(params, "params")?;
        let hint = Hint::from_base64(str_arg(hint, "hint")?)?;
        params.inner.base_mut().add_hint(hint);
        Ok(())
    })
}

/// Sets whether the response carries hints for its waypoints.
///
/// # Safety
/// `params` must be a live request handle cast to `osrmc_params_t`.
#[no_mangle]
pub unsafe extern "C" fn osrmc_params_set_generate_hints(params: osrmc_params_t, on: c_int) {
    guard(ptr::null_mut(), (), || {
        handle_mut(params, "params")?.inner.base_mut().generate_hints = on != 0;
        Ok(())
    })
}

/// Requests turn-by-turn steps.
///
/// # Safety
/// `params` must be a live route request handle.
#[no_mangle]
pub unsafe extern "C" fn osrmc_route_params_add_steps(params: osrmc_route_params_t, on: c_int) {
    guard(ptr::null_mut(), (), || {
        handle_mut(params, "route params")?.get_mut()?.steps = on != 0;
        Ok(())
    })
}

/// Requests alternative routes.
///
/// # Safety
/// `params` must be a live route request handle.
#[no_mangle]
pub unsafe extern "C" fn osrmc_route_params_add_alternatives(
    params: osrmc_route_params_t,
    on: c_int,
) {
    guard(ptr::null_mut(), (), || {
        handle_mut(params, "route params")?.get_mut()?.alternatives = on != 0;
        Ok(())
    })
}

/// Creates table annotation flags, initially durations only.
///
/// # Safety
/// - `error` must be null or valid for writes
/// - The caller must free the handle using `osrmc_table_annotations_destruct`
#[no_mangle]
pub unsafe extern "C" fn osrmc_table_annotations_construct(
    error: *mut osrmc_error_t,
) -> osrmc_table_annotations_t {
    guard(error, ptr::null_mut(), || {
        Ok(into_handle(osrmc_table_annotations {
            inner: TableAnnotations::default(),
        }))
    })
}

/// Frees table annotation flags.
///
/// # Safety
/// - `annotations` must be null or a live handle
/// - `annotations` must not be used after this call
#[no_mangle]
pub unsafe extern "C" fn osrmc_table_annotations_destruct(annotations: osrmc_table_annotations_t) {
    release(annotations);
}

/// Sets or clears the distance flag. Clearing twice is harmless.
///
/// # Safety
/// - `annotations` must be a live handle
/// - `error` must be null or valid for writes
#[no_mangle]
pub unsafe extern "C" fn osrmc_table_annotations_enable_distance(
    annotations: osrmc_table_annotations_t,
    enable: bool,
    error: *mut osrmc_error_t,
) {
    guard(error, (), || {
        handle_mut(annotations, "table annotations")?
            .inner
            .enable_distance(enable);
        Ok(())
    })
}

/// Appends a source index.
///
/// # Safety
/// - `params` must be a live table request handle
/// - `error` must be null or valid for writes
#[no_mangle]
pub unsafe extern "C" fn osrmc_table_params_add_source(
    params: osrmc_table_params_t,
    index: usize,
    error: *mut osrmc_error_t,
) {
    guard(error, (), || {
        handle_mut(params, "table params")?.get_mut()?.add_source(index);
        Ok(())
    })
}

/// Appends a destination index.
///
/// # Safety
/// - `params` must be a live table request handle
/// - `error` must be null or valid for writes
#[no_mangle]
pub unsafe extern "C" fn osrmc_table_params_add_destination(
    params: osrmc_table_params_t,
    index: usize,
    error: *mut osrmc_error_t,
) {
    guard(error, (), || {
        handle_mut(params, "table params")?
            .get_mut()?
            .add_destination(index);
        Ok(())
    })
}

/// Copies the annotation flags into the request.
///
/// Later changes to `annotations` do not affect the request.
///
/// # Safety
/// - `params` and `annotations` must be live handles
/// - `error` must be null or valid for writes
#[no_mangle]
pub unsafe extern "C" fn osrmc_table_params_set_annotations(
    params: osrmc_table_params_t,
    annotations: osrmc_table_annotations_t,
    error: *mut osrmc_error_t,
) {
    guard(error, (), || {
        let flags = handle_ref(annotations, "table annotations")?.inner;
        handle_mut(params, "table params")?.get_mut()?.annotations = flags;
        Ok(())
    })
}

/// Sets how many candidates a nearest request returns.
///
/// # Safety
/// `params` must be a live nearest request handle.
#[no_mangle]
pub unsafe extern "C" fn osrmc_nearest_set_number_of_results(
    params: osrmc_nearest_params_t,
    n: c_uint,
) {
    guard(ptr::null_mut(), (), || {
        handle_mut(params, "nearest params")?
            .get_mut()?
            .number_of_results = n;
        Ok(())
    })
}

/// Appends a timestamp, in seconds, for the next trace point.
///
/// # Safety
/// - `params` must be a live match request handle
/// - `error` must be null or valid for writes
#[no_mangle]
pub unsafe extern "C" fn osrmc_match_params_add_timestamp(
    params: osrmc_match_params_t,
    timestamp: c_uint,
    error: *mut osrmc_error_t,
) {
    guard(error, (), || {
        handle_mut(params, "match params")?
            .get_mut()?
            .add_timestamp(timestamp);
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::{CStr, CString};

    unsafe fn code(error: osrmc_error_t) -> String {
        CStr::from_ptr(crate::error::osrmc_error_code(error))
            .to_str()
            .unwrap()
            .to_string()
    }

    #[test]
    fn test_generic_setters_accept_any_request() {
        let mut error: osrmc_error_t = ptr::null_mut();
        unsafe {
            let route = osrmc_route_params_construct(&mut error);
            let table = osrmc_table_params_construct(&mut error);
            assert!(!route.is_null() && !table.is_null());

            osrmc_params_add_coordinate(route.cast(), 13.388, 52.517, &mut error);
            osrmc_params_add_coordinate_with(
                table.cast(),
                13.385,
                52.520,
                10.0,
                90,
                20,
                &mut error,
            );
            assert!(error.is_null());

            let route_params = (*route).get().unwrap();
            assert_eq!(route_params.base.coordinates.len(), 1);
            let table_params = (*table).get().unwrap();
            assert_eq!(table_params.base.radiuses, vec![Some(10.0)]);
            assert_eq!(table_params.base.bearings, vec![Some(Bearing::new(90, 20))]);

            osrmc_route_params_destruct(route);
            osrmc_table_params_destruct(table);
        }
    }

    #[test]
    fn test_bearing_out_of_range() {
        let mut error: osrmc_error_t = ptr::null_mut();
        unsafe {
            let route = osrmc_route_params_construct(&mut error);
            osrmc_params_add_coordinate_with(route.cast(), 0.0, 0.0, 1.0, 70_000, 10, &mut error);
            assert!(!error.is_null());
            assert_eq!(code(error), "Exception");
            assert!((*route).get().unwrap().base.coordinates.is_empty());

            crate::error::osrmc_error_destruct(error);
            osrmc_route_params_destruct(route);
        }
    }

    #[test]
    fn test_route_toggles() {
        unsafe {
            let route = osrmc_route_params_construct(ptr::null_mut());
            osrmc_route_params_add_steps(route, 1);
            osrmc_route_params_add_alternatives(route, 1);
            osrmc_params_set_generate_hints(route.cast(), 0);

            let params = (*route).get().unwrap();
            assert!(params.steps);
            assert!(params.alternatives);
            assert!(!params.base.generate_hints);

            osrmc_route_params_add_steps(route, 0);
            assert!(!(*route).get().unwrap().steps);
            osrmc_route_params_destruct(route);
        }
    }

    #[test]
    fn test_annotations_attach_by_value() {
        let mut error: osrmc_error_t = ptr::null_mut();
        unsafe {
            let annotations = osrmc_table_annotations_construct(&mut error);
            let table = osrmc_table_params_construct(&mut error);

            osrmc_table_annotations_enable_distance(annotations, true, &mut error);
            osrmc_table_params_set_annotations(table, annotations, &mut error);
            osrmc_table_annotations_enable_distance(annotations, false, &mut error);
            osrmc_table_annotations_enable_distance(annotations, false, &mut error);
            assert!(error.is_null());

            assert_eq!((*annotations).inner, TableAnnotations::DURATION);
            assert_eq!((*table).get().unwrap().annotations, TableAnnotations::ALL);

            osrmc_table_annotations_destruct(annotations);
            osrmc_table_params_destruct(table);
        }
    }

    #[test]
    fn test_table_match_nearest_setters() {
        let mut error: osrmc_error_t = ptr::null_mut();
        unsafe {
            let table = osrmc_table_params_construct(&mut error);
            osrmc_table_params_add_source(table, 0, &mut error);
            osrmc_table_params_add_destination(table, 1, &mut error);
            let params = (*table).get().unwrap();
            assert_eq!(params.sources, vec![0]);
            assert_eq!(params.destinations, vec![1]);
            osrmc_table_params_destruct(table);

            let nearest = osrmc_nearest_params_construct(&mut error);
            osrmc_nearest_set_number_of_results(nearest, 3);
            assert_eq!((*nearest).get().unwrap().number_of_results, 3);
            osrmc_nearest_params_destruct(nearest);

            let trace = osrmc_match_params_construct(&mut error);
            osrmc_match_params_add_timestamp(trace, 10, &mut error);
            osrmc_match_params_add_timestamp(trace, 20, &mut error);
            assert_eq!((*trace).get().unwrap().timestamps, vec![10, 20]);
            osrmc_match_params_destruct(trace);
        }
        assert!(error.is_null());
    }

    #[test]
    fn test_hints() {
        let mut error: osrmc_error_t = ptr::null_mut();
        unsafe {
            let route = osrmc_route_params_construct(&mut error);
            let good = CString::new("AQID").unwrap();
            osrmc_params_add_hint(route.cast(), good.as_ptr(), &mut error);
            assert!(error.is_null());
            assert_eq!(
                (*route).get().unwrap().base.hints,
                vec![Some(Hint::from_bytes(vec![1, 2, 3]))]
            );

            let bad = CString::new("not base64!").unwrap();
            osrmc_params_add_hint(route.cast(), bad.as_ptr(), &mut error);
            assert!(!error.is_null());
            assert_eq!((*route).get().unwrap().base.hints.len(), 1);

            crate::error::osrmc_error_destruct(error);
            osrmc_route_params_destruct(route);
        }
    }

    #[test]
    fn test_bulk_update() {
        let mut error: osrmc_error_t = ptr::null_mut();
        unsafe {
            let route = osrmc_route_params_construct(&mut error);
            let json = CString::new(
                r#"{"coordinates": [[13.388, 52.517], [13.385, 52.520]], "steps": true, "unknown": 1}"#,
            )
            .unwrap();
            osrmc_route_params_update(route, json.as_ptr(), &mut error);
            assert!(error.is_null());
            let params = (*route).get().unwrap();
            assert_eq!(params.base.coordinates.len(), 2);
            assert!(params.steps);

            let broken = CString::new(r#"{"coordinates": [[1.0, 2.0]], "hints": ["***"]}"#).unwrap();
            osrmc_route_params_update(route, broken.as_ptr(), &mut error);
            assert!(!error.is_null());
            assert_eq!((*route).get().unwrap().base.coordinates.len(), 2);

            crate::error::osrmc_error_destruct(error);
            osrmc_route_params_destruct(route);
        }
    }

    #[test]
    fn test_null_handles_report_errors() {
        let mut error: osrmc_error_t = ptr::null_mut();
        unsafe {
            osrmc_params_add_coordinate(ptr::null_mut(), 0.0, 0.0, &mut error);
            assert!(!error.is_null());
            crate::error::osrmc_error_destruct(error);

            osrmc_route_params_add_steps(ptr::null_mut(), 1);
            osrmc_route_params_destruct(ptr::null_mut());
        }
    }
}
