//! ABI version.
//!
//! The version is packed as `major << 16 | minor << 8 | patch`. Callers must refuse to
//! operate when the major component differs from the one they were built against.

/// Major version.
pub const VERSION_MAJOR: u32 = 1;
/// Minor version.
pub const VERSION_MINOR: u32 = 0;
/// Patch version.
pub const VERSION_PATCH: u32 = 0;

/// Packed version.
pub const VERSION: u32 = (VERSION_MAJOR << 16) | (VERSION_MINOR << 8) | VERSION_PATCH;

/// Packed version of this build.
pub fn get_version() -> u32 {
    VERSION
}

/// Returns true if `version` has the same major component as this build.
pub fn is_abi_compatible_with(version: u32) -> bool {
    version >> 16 == VERSION_MAJOR
}

/// Returns true if this build is compatible with itself.
pub fn is_abi_compatible() -> bool {
    is_abi_compatible_with(get_version())
}
