//! SDK error type.

use zionlayer_rpc_api::RpcErrorObject;

/// Everything that can go wrong between building a request and decoding its
/// result.
#[derive(Debug, thiserror::Error)]
pub enum SdkError {
    /// The HTTP request could not be sent or its body could not be read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The node answered with a non-2xx HTTP status.
    #[error("node returned HTTP status {0}")]
    Status(u16),

    /// The node answered with a JSON-RPC `error` object.
    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// A payload could not be encoded, or the response body was not JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The `result` did not have the shape the method promises.
    #[error("unexpected result from {method}: {detail}")]
    UnexpectedResult { method: String, detail: String },
}

impl From<RpcErrorObject> for SdkError {
    fn from(e: RpcErrorObject) -> Self {
        SdkError::Rpc {
            code: e.code,
            message: e.message,
        }
    }
}

impl SdkError {
    /// The JSON-RPC error code, when the node rejected the call.
    pub fn rpc_code(&self) -> Option<i64> {
        match self {
            SdkError::Rpc { code, .. } => Some(*code),
            _ => None,
        }
    }
}
