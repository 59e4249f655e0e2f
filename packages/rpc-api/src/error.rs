//! JSON-RPC error object.

use serde::{Deserialize, Serialize};

/// The `error` member of a failed response.
///
/// ```json
/// { "code": -32601, "message": "method not found" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RpcErrorObject {
    /// Machine-readable error code. See [`codes`].
    pub code: i64,

    /// Human-readable description of the problem.
    pub message: String,
}

impl RpcErrorObject {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for RpcErrorObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}

/// Error codes a ZionLayer node returns.
pub mod codes {
    pub const PARSE_ERROR: i64 = -32700;
    pub const METHOD_NOT_FOUND: i64 = -32601;
    pub const INVALID_PARAMS: i64 = -32602;
    /// Application-level rejection; the message carries the reason.
    pub const SERVER_ERROR: i64 = -32000;
}
