//! Cache metadata stamps.
//!
//! Every cached asset has a small JSON stamp written alongside it
//! (`{pack}/{name}.json`) recording the schema version in force when the
//! asset was fetched. An asset counts as valid only while its stamp is
//! present, readable, and carries the current version; bumping
//! [`SCHEMA_VERSION`] therefore forces a re-fetch of all previously
//! cached assets on next access, with no explicit migration step.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{IconifyError, Result};
use crate::store::IconStore;

/// Schema version written into new stamps.
pub const SCHEMA_VERSION: u32 = 1;

/// Persisted stamp for one cached asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IconMetadata {
    /// Version of the fetched representation (post-processing rules etc.).
    pub schema_version: u32,
    /// When the asset was fetched.
    pub fetched_at: DateTime<Utc>,
}

impl IconMetadata {
    /// A stamp at the current schema version, fetched now.
    pub fn current() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            fetched_at: Utc::now(),
        }
    }

    /// Whether this stamp carries the current schema version.
    pub fn is_current(&self) -> bool {
        self.schema_version == SCHEMA_VERSION
    }
}

/// Read the stamp at `path`.
///
/// Fails with [`IconifyError::MetadataCorrupt`] when the stamp exists but
/// cannot be parsed.
pub fn read(store: &dyn IconStore, path: &str) -> Result<IconMetadata> {
    let json = store.read_text(path)?;
    serde_json::from_str(&json).map_err(|e| {
        tracing::debug!("Discarding corrupt metadata stamp at {}: {}", path, e);
        IconifyError::MetadataCorrupt { path: path.into() }
    })
}

/// Whether the asset stamped at `path` is still valid.
///
/// Missing, unreadable, unparsable, and version-mismatched stamps all
/// count as invalid, so the next resolution re-fetches.
pub fn is_valid(store: &dyn IconStore, path: &str) -> bool {
    matches!(read(store, path), Ok(meta) if meta.is_current())
}

/// Persist a fresh stamp at `path`.
///
/// Callers invoke this only after the asset write succeeds, never before,
/// so an asset is never marked valid without existing.
pub fn write(store: &dyn IconStore, path: &str) -> Result<()> {
    let json = serde_json::to_string_pretty(&IconMetadata::current())?;
    store.write_text(path, &json)
}
