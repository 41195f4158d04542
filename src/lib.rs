//! iconify-cache - Fetch-then-cache resolver for Iconify icon identifiers.
//!
//! Resolves a symbolic `pack:name` identifier to renderable image data,
//! transparently fetching the SVG from the remote Iconify API on first use
//! and persisting it to a local cache so subsequent lookups are offline
//! and fast. Callers receive a loadable asset reference (path plus render
//! query parameters) and a tintability flag; materializing a displayable
//! image from it is the caller's concern.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`error`] - Error types and result aliases
//! - [`fetch`] - Remote icon API client and payload normalization
//! - [`icon`] - `pack:name` identifier parsing
//! - [`metadata`] - Versioned cache metadata stamps
//! - [`resolver`] - Resolution orchestration and render parameters
//! - [`store`] - Pluggable cache storage (disk and in-memory)
//!
//! # Example
//!
//! ```no_run
//! use iconify_cache::{IconResolver, RenderRect};
//!
//! let resolver = IconResolver::with_default_store();
//! let icon = "mdi:home".parse()?;
//! let reference = resolver.resolve(&icon, RenderRect::new(48, 48), Some("#112233"))?;
//! println!("load {}", reference.uri());
//! # Ok::<(), iconify_cache::IconifyError>(())
//! ```

pub mod cli;
pub mod error;
pub mod fetch;
pub mod icon;
pub mod metadata;
pub mod resolver;
pub mod store;

pub use error::{IconifyError, Result};
pub use icon::IconIdentifier;
pub use resolver::{AssetReference, IconResolver, RenderRect};
