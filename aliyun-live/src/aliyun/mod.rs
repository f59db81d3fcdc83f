//! Aliyun RPC plumbing
//!
//! Product-independent pieces: credentials, request signing, the HTTP client
//! and the common response/error shapes.

pub mod client;
pub mod credentials;
pub mod request;
pub mod response;
pub mod sign;

pub use client::Client;
pub use credentials::Credentials;
pub use request::{Request, RpcRequest};
pub use response::{ErrorResponse, Response};
