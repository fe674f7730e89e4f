//! Quoteforge API Server module
//!
//! HTTP delivery of rendered quotations.
//! Run with `quoteforge-server`.

pub mod handlers;
pub mod server;

pub use server::{build_router, run_api_server};
