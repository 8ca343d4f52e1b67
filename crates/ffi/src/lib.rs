//! # osrmc FFI
//!
//! C interface for the osrmc routing boundary.
//!
//! Every resource crosses the boundary as an opaque handle with one `*_construct` and one
//! `*_destruct` function. Fallible functions take an `osrmc_error_t*` slot as their last
//! argument: on failure they write a new error there and return null (handles) or
//! `INFINITY` (numbers). Panics never unwind into the caller.
//!
//! The header `osrmc.h` is generated into `OUT_DIR` by the build script.

mod api;
mod error;
mod params;
mod types;

pub use api::*;
pub use error::*;
pub use params::*;
pub use types::*;
