//! # Paimon Server
//!
//! HTTP API for the FAQ pipeline: question answering and the model control
//! panel.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod api;
pub mod server;

pub use server::{Server, ServerConfig};
