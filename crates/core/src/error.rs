//! Error types for osrmc.

use std::fmt;

use thiserror::Error;

use crate::json::Object;

/// Result type alias for osrmc operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Code reported for every failure that does not carry its own code.
pub const EXCEPTION_CODE: &str = "Exception";

/// Code substituted when an engine failure payload carries an empty code.
pub const UNKNOWN_CODE: &str = "Unknown";

/// Which table a table accessor was asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    /// The `durations` matrix.
    Durations,
    /// The `distances` matrix.
    Distances,
}

impl TableKind {
    /// Key of the matrix in a table response.
    pub fn key(self) -> &'static str {
        match self {
            TableKind::Durations => "durations",
            TableKind::Distances => "distances",
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Errors that can occur anywhere between the caller and the routing engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Config, engine or request construction failed.
    #[error("{0}")]
    Construction(String),

    /// Bulk request input or a setter argument was malformed.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// A response did not have the expected shape.
    #[error("Unexpected response structure: {0}")]
    Structure(String),

    /// A panic was caught before it could cross the C boundary.
    #[error("Panic: {0}")]
    Panic(String),

    /// The engine reported a failure status.
    #[error("{message}")]
    Engine {
        /// Machine-readable code from the failure payload.
        code: String,
        /// Human-readable message from the failure payload.
        message: String,
    },

    /// The requested matrix was not part of the table request.
    #[error("Table request not configured to return {0}")]
    NoTable(TableKind),

    /// The engine found no route between a pair of points.
    #[error("Impossible route between points")]
    NoRoute,
}

impl Error {
    /// Builds an error from an engine failure payload.
    ///
    /// An absent or empty code becomes [`UNKNOWN_CODE`] and an absent message is empty.
    /// A field present with a non-string value degrades to a structural error.
    pub fn from_engine_payload(payload: &Object) -> Error {
        fn field<'a>(payload: &'a Object, key: &str) -> Result<&'a str> {
            match payload.get(key) {
                Some(value) => value.as_str(key),
                None => Ok(""),
            }
        }

        let fields = field(payload, "code")
            .and_then(|code| Ok((code, field(payload, "message")?)));
        match fields {
            Ok((code, message)) => {
                let code = if code.is_empty() { UNKNOWN_CODE } else { code };
                Error::Engine {
                    code: code.to_string(),
                    message: message.to_string(),
                }
            }
            Err(e) => e,
        }
    }

    /// Machine-matchable code. Never empty.
    pub fn code(&self) -> &str {
        match self {
            Error::Engine { code, .. } => code,
            Error::NoTable(_) => "NoTable",
            Error::NoRoute => "NoRoute",
            Error::Construction(_)
            | Error::InvalidParameter(_)
            | Error::Structure(_)
            | Error::Panic(_) => EXCEPTION_CODE,
        }
    }

    /// Human-readable message for diagnostics.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::InvalidParameter(e.to_string())
    }
}
