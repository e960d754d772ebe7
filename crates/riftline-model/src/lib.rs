#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Telemetry event schema shared between the riftline client and the daemon.
//!
//! Layout: `event.rs` (kinds, payload variants, envelope), `error.rs`
//! (validation errors), `parse.rs` (wire-shape validation and
//! serialization), `schema.rs` (JSON-schema export).

pub mod error;
pub mod event;
pub mod parse;
pub mod schema;

pub use error::{SchemaError, SchemaResult};
pub use event::{
    CustomEvent, Event, EventBatch, EventKind, EventPayload, GoldEvent, HeartbeatEvent, ItemEvent,
    LevelEvent, PhaseEvent, PlayerEvent, PlayerRef, SkillLevelEvent, TimestampMs,
};
pub use parse::{parse_event, serialize_event};
