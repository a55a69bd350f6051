//! Runtime module
//!
//! Provides spawned-task and streaming primitives.

pub mod async_task;

pub use async_task::{AsyncStream, AsyncTask};
