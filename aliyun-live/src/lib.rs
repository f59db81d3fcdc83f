// Aliyun Live API Client
//
// Typed async client for the ApsaraVideo Live RPC API plus signed
// publish/play URL generation.
//
// Architecture:
// - aliyun: product-independent RPC plumbing (credentials, signing, HTTP client)
// - live: live actions, the `Live` controller and stream URL signing
// - config / logging: loading settings and installing a tracing subscriber

pub mod aliyun;
pub mod config;
pub mod error;
pub mod live;
pub mod logging;

pub use aliyun::{Client, Credentials, ErrorResponse, Response};
pub use crate::config::LiveConfig;
pub use error::{LiveError, Result};
pub use live::{Live, LiveRequest, LiveStreamType, Stream, StreamCredentials};

// Controller and client are shared across tasks.
const _: () = {
    const fn assert_send_sync<T: Send + Sync>() {}
    let _ = assert_send_sync::<Live>;
    let _ = assert_send_sync::<LiveError>;
};
