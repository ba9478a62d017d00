//! Purpose: Define the stable public Rust API boundary for reqwire.
//! Exports: Option builders, `execute`, the transport seam, errors, and `AgentTransport`.
//! Role: Public, additive-only surface; callers should not reach into `core` directly.
//! Invariants: `execute` signature stays fixed as new `RequestOption` variants are added.

mod agent;

pub use crate::core::error::to_exit_code;
pub use crate::core::error::{Error, ErrorKind};
pub use crate::core::options::{
    JSON_CONTENT_TYPE, RequestConfig, RequestOption, with_body, with_header, with_json_body,
};
pub use crate::core::request::{SUCCESS_STATUS, build_request, execute};
pub use crate::core::transport::{
    Body, InvalidMethod, Method, Request, Response, Transport, TransportError,
};
pub use agent::{AgentTransport, AgentTransportConfig};
