//! JSON-schema export for the wire contract.
//!
//! Integrations that cannot link the crate consume these documents instead;
//! the daemon publishes the batch schema next to its release artifacts.

use std::fs::File;
use std::io;
use std::path::Path;

use schemars::schema::RootSchema;
use schemars::schema_for;

use crate::event::{Event, EventBatch};

/// JSON schema for a single [`Event`] envelope.
#[must_use]
pub fn event_schema() -> RootSchema {
    schema_for!(Event)
}

/// JSON schema for an [`EventBatch`].
#[must_use]
pub fn event_batch_schema() -> RootSchema {
    schema_for!(EventBatch)
}

/// Write the [`EventBatch`] schema to `path`, creating parent directories
/// when missing.
///
/// # Errors
///
/// Returns any filesystem error raised while creating directories or writing
/// the schema document.
pub fn write_event_batch_schema(path: impl AsRef<Path>) -> io::Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, &event_batch_schema()).map_err(io::Error::other)
}
