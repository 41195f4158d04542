//! Icon identifier parsing.
//!
//! An icon is named by a `pack:name` token, e.g. `mdi:home`. The pack is
//! the icon set namespace; the name addresses one icon within it. Both
//! cache paths for an icon derive deterministically from its identifier.

use std::fmt;
use std::str::FromStr;

use crate::error::{IconifyError, Result};

/// A validated `pack:name` icon identifier.
///
/// Immutable once constructed; created per lookup request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IconIdentifier {
    pack: String,
    name: String,
}

impl IconIdentifier {
    /// Parse a raw `pack:name` string.
    ///
    /// Fails with [`IconifyError::InvalidIdentifier`] when the string has
    /// no `:`, splits into anything other than exactly two non-empty
    /// segments, or either segment is empty after trimming.
    pub fn parse(raw: &str) -> Result<Self> {
        if !raw.contains(':') {
            return Err(IconifyError::InvalidIdentifier { input: raw.into() });
        }

        let segments: Vec<&str> = raw.split(':').filter(|s| !s.is_empty()).collect();
        if segments.len() != 2 {
            return Err(IconifyError::InvalidIdentifier { input: raw.into() });
        }

        let pack = segments[0].trim();
        let name = segments[1].trim();

        if pack.is_empty() || name.is_empty() {
            return Err(IconifyError::InvalidIdentifier { input: raw.into() });
        }

        Ok(Self {
            pack: pack.to_string(),
            name: name.to_string(),
        })
    }

    /// The icon set namespace.
    pub fn pack(&self) -> &str {
        &self.pack
    }

    /// The icon name within the pack.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Store-relative path of the cached SVG document.
    pub fn asset_path(&self) -> String {
        format!("{}/{}.svg", self.pack, self.name)
    }

    /// Store-relative path of the metadata stamp written alongside it.
    pub fn metadata_path(&self) -> String {
        format!("{}/{}.json", self.pack, self.name)
    }
}

impl FromStr for IconIdentifier {
    type Err = IconifyError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for IconIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.pack, self.name)
    }
}
