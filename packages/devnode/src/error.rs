//! JSON-RPC failure type returned by method handlers.
//!
//! Every variant maps to an [`RpcErrorObject`] with the standard JSON-RPC
//! code; state rejections become `-32000` carrying the reason.

use zionlayer_rpc_api::error::codes;
use zionlayer_rpc_api::RpcErrorObject;

use crate::state::StateError;

/// A failed method call.
#[derive(Debug, PartialEq)]
pub enum RpcFailure {
    Parse,
    MethodNotFound,
    InvalidParams,
    Server(String),
}

impl From<RpcFailure> for RpcErrorObject {
    fn from(f: RpcFailure) -> Self {
        match f {
            RpcFailure::Parse => RpcErrorObject::new(codes::PARSE_ERROR, "parse error"),
            RpcFailure::MethodNotFound => {
                RpcErrorObject::new(codes::METHOD_NOT_FOUND, "method not found")
            }
            RpcFailure::InvalidParams => RpcErrorObject::new(codes::INVALID_PARAMS, "invalid params"),
            RpcFailure::Server(msg) => RpcErrorObject::new(codes::SERVER_ERROR, msg),
        }
    }
}

impl From<StateError> for RpcFailure {
    fn from(e: StateError) -> Self {
        RpcFailure::Server(e.to_string())
    }
}
