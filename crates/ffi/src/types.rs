//! Opaque handle types.
//!
//! Every handle is a boxed Rust value handed out as a raw pointer. The structs are not
//! `repr(C)`, so the generated header only forward-declares them.

#![allow(non_camel_case_types)]

use std::ffi::CString;
use std::os::raw::{c_char, c_void};

use osrmc_core::{
    BaseParameters, EngineConfig, Error, MatchParameters, MatchResponse, NearestParameters,
    NearestResponse, Object, Osrm, RouteParameters, RouteResponse, TableAnnotations,
    TableParameters, TableResponse,
};

/// An error written to an out-parameter slot.
pub struct osrmc_error {
    pub(crate) code: CString,
    pub(crate) message: CString,
}

impl osrmc_error {
    pub(crate) fn new(code: &str, message: &str) -> Self {
        Self {
            code: c_string(code),
            message: c_string(message),
        }
    }
}

impl From<&Error> for osrmc_error {
    fn from(err: &Error) -> Self {
        Self::new(err.code(), &err.message())
    }
}

/// Engine configuration.
pub struct osrmc_config {
    pub(crate) inner: EngineConfig,
}

/// An engine instance.
pub struct osrmc_osrm {
    pub(crate) inner: Osrm,
}

/// Any request, addressed through the generic `osrmc_params_*` setters.
pub struct osrmc_params {
    pub(crate) inner: RequestParams,
}

/// The request variants behind a params handle.
#[derive(Debug, Clone)]
pub(crate) enum RequestParams {
    Route(RouteParameters),
    Table(TableParameters),
    Nearest(NearestParameters),
    Match(MatchParameters),
}

impl RequestParams {
    pub(crate) fn base_mut(&mut self) -> &mut BaseParameters {
        match self {
            RequestParams::Route(p) => &mut p.base,
            RequestParams::Table(p) => &mut p.base,
            RequestParams::Nearest(p) => &mut p.base,
            RequestParams::Match(p) => &mut p.route.base,
        }
    }

    pub(crate) fn kind(&self) -> &'static str {
        match self {
            RequestParams::Route(_) => "route",
            RequestParams::Table(_) => "table",
            RequestParams::Nearest(_) => "nearest",
            RequestParams::Match(_) => "match",
        }
    }
}

/// Declares a typed request handle that shares its layout with [`osrmc_params`].
macro_rules! params_handle {
    ($(#[$meta:meta])* $name:ident, $variant:ident, $params:ty) => {
        $(#[$meta])*
        #[repr(transparent)]
        pub struct $name(pub(crate) osrmc_params);

        impl $name {
            pub(crate) fn new() -> Self {
                Self(osrmc_params {
                    inner: RequestParams::$variant(<$params>::default()),
                })
            }

            pub(crate) fn get(&self) -> osrmc_core::Result<&$params> {
                match &self.0.inner {
                    RequestParams::$variant(p) => Ok(p),
                    other => Err(wrong_kind(stringify!($variant), other)),
                }
            }

            pub(crate) fn get_mut(&mut self) -> osrmc_core::Result<&mut $params> {
                match &mut self.0.inner {
                    RequestParams::$variant(p) => Ok(p),
                    other => Err(wrong_kind(stringify!($variant), other)),
                }
            }
        }
    };
}

fn wrong_kind(expected: &str, found: &RequestParams) -> Error {
    Error::InvalidParameter(format!(
        "expected {} parameters, found {} parameters",
        expected.to_lowercase(),
        found.kind()
    ))
}

params_handle!(
    /// Route request.
    osrmc_route_params,
    Route,
    RouteParameters
);
params_handle!(
    /// Table request.
    osrmc_table_params,
    Table,
    TableParameters
);
params_handle!(
    /// Nearest request.
    osrmc_nearest_params,
    Nearest,
    NearestParameters
);
params_handle!(
    /// Match request.
    osrmc_match_params,
    Match,
    MatchParameters
);

/// Table annotation flags, attached to a table request by value.
pub struct osrmc_table_annotations {
    pub(crate) inner: TableAnnotations,
}

/// Route response.
pub struct osrmc_route_response {
    pub(crate) inner: RouteResponse,
}

/// Table response.
pub struct osrmc_table_response {
    pub(crate) inner: TableResponse,
}

/// Nearest response.
pub struct osrmc_nearest_response {
    pub(crate) inner: NearestResponse,
}

/// Match response.
pub struct osrmc_match_response {
    pub(crate) inner: MatchResponse,
}

/// Borrowed view of a response tree.
#[repr(transparent)]
pub struct osrmc_json(pub(crate) Object);

impl osrmc_json {
    pub(crate) fn view(object: &Object) -> *const osrmc_json {
        (object as *const Object).cast()
    }
}

pub type osrmc_error_t = *mut osrmc_error;
pub type osrmc_config_t = *mut osrmc_config;
pub type osrmc_osrm_t = *mut osrmc_osrm;
pub type osrmc_params_t = *mut osrmc_params;
pub type osrmc_route_params_t = *mut osrmc_route_params;
pub type osrmc_table_params_t = *mut osrmc_table_params;
pub type osrmc_nearest_params_t = *mut osrmc_nearest_params;
pub type osrmc_match_params_t = *mut osrmc_match_params;
pub type osrmc_table_annotations_t = *mut osrmc_table_annotations;
pub type osrmc_route_response_t = *mut osrmc_route_response;
pub type osrmc_table_response_t = *mut osrmc_table_response;
pub type osrmc_nearest_response_t = *mut osrmc_nearest_response;
pub type osrmc_match_response_t = *mut osrmc_match_response;
pub type osrmc_json_t = *const osrmc_json;

/// Called once per waypoint with `(data, name, longitude, latitude)`.
///
/// `name` is only valid for the duration of the call.
pub type osrmc_waypoint_handler_t = Option<
    unsafe extern "C" fn(data: *mut c_void, name: *const c_char, longitude: f64, latitude: f64),
>;

/// Converts to a C string, dropping interior NULs.
pub(crate) fn c_string(s: &str) -> CString {
    CString::new(s.replace('\0', "")).unwrap_or_default()
}

/// Moves a value to the heap and hands out the pointer.
pub(crate) fn into_handle<T>(value: T) -> *mut T {
    Box::into_raw(Box::new(value))
}

/// Reclaims and drops a handle. Null is a no-op.
///
/// # Safety
/// `ptr` must be null or come from [`into_handle`] and not have been released.
pub(crate) unsafe fn release<T>(ptr: *mut T) {
    if !ptr.is_null() {
        drop(Box::from_raw(ptr));
    }
}

/// Borrows a handle.
///
/// # Safety
/// `ptr` must be null or point to a live handle.
pub(crate) unsafe fn handle_ref<'a, T>(ptr: *const T, what: &str) -> osrmc_core::Result<&'a T> {
    ptr.as_ref()
        .ok_or_else(|| Error::InvalidParameter(format!("{} handle is null", what)))
}

/// Mutably borrows a handle.
///
/// # Safety
/// `ptr` must be null or point to a live handle not borrowed elsewhere.
pub(crate) unsafe fn handle_mut<'a, T>(ptr: *mut T, what: &str) -> osrmc_core::Result<&'a mut T> {
    ptr.as_mut()
        .ok_or_else(|| Error::InvalidParameter(format!("{} handle is null", what)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_c_string_drops_nul() {
        assert_eq!(c_string("a\0b").to_str().unwrap(), "ab");
    }

    #[test]
    fn test_typed_handle_kind_checks() {
        let mut route = osrmc_route_params::new();
        assert!(route.get_mut().is_ok());

        let table = osrmc_table_params(osrmc_params {
            inner: RequestParams::Route(RouteParameters::new()),
        });
        let err = table.get().unwrap_err();
        assert_eq!(
            err.message(),
            "Invalid parameter: expected table parameters, found route parameters"
        );
    }
}
