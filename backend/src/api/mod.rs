//! HTTP API module.
//!
//! The HTTP server, its wire types, and the log broadcaster the pipeline
//! reports through.

pub mod logs;
pub mod server;
pub mod types;

pub use logs::*;
pub use server::{router, start_server, AppState};
pub use types::*;
