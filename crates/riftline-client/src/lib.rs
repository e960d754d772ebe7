//! In-process dispatch core for the riftline client.
//!
//! The daemon transport is not built yet; this crate holds the pieces that
//! transport will feed: a kind-keyed handler registry with snapshot dispatch
//! semantics, and the client façade that owns it together with its
//! configuration.

pub mod client;
pub mod config;
pub mod dispatch;

pub use client::Client;
pub use config::ClientConfig;
pub use dispatch::{Dispatcher, EventHandler, Subscription};
pub use riftline_model::{Event, EventKind, SchemaError, SchemaResult};
