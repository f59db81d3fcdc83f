//! ApsaraVideo Live
//!
//! # Features
//! - Stream publish/online/block lists and control history
//! - Forbid and resume streams
//! - Viewer counts and frame rate / bit rate data
//! - Record and snapshot configuration
//! - Publish and play URLs with URL auth

pub mod action;
pub mod controller;
pub mod request;
pub mod stream;
pub mod types;

pub use controller::{Live, LiveDefaults};
pub use request::LiveRequest;
pub use stream::{PlayUrls, Stream, StreamCredentials};
pub use types::*;
