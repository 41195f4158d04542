//! Command-line interface.
//!
//! Argument parsing uses clap's derive macros; each subcommand maps onto
//! one resolver operation. The resolver itself is constructed here from
//! the global flags (cache directory and endpoint overrides), never from
//! hidden process-wide state.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::error::Result;
use crate::fetch::RemoteFetcher;
use crate::icon::IconIdentifier;
use crate::resolver::IconResolver;
use crate::store::{default_cache_root, DiskStore};

#[derive(Debug, Parser)]
#[command(
    name = "iconify-cache",
    version,
    about = "Fetch-then-cache resolver for Iconify icon identifiers"
)]
pub struct Cli {
    /// Cache directory (defaults to the platform data dir + `iconify`).
    #[arg(long, global = true)]
    pub cache_dir: Option<PathBuf>,

    /// Remote icon API endpoint.
    #[arg(long, global = true, env = "ICONIFY_API")]
    pub endpoint: Option<String>,

    /// Enable debug logging.
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Resolve an icon and print its loadable asset reference.
    Resolve {
        /// Icon identifier in `pack:name` form, e.g. `mdi:home`.
        icon: String,

        /// Requested render width.
        #[arg(long, default_value_t = 32)]
        width: u32,

        /// Requested render height.
        #[arg(long, default_value_t = 32)]
        height: u32,

        /// Tint color as a hex string, e.g. `#112233`.
        #[arg(long)]
        color: Option<String>,
    },

    /// Warm the cache for one or more icons.
    Prefetch {
        /// Icon identifiers in `pack:name` form.
        #[arg(required = true)]
        icons: Vec<String>,
    },
}

/// Run the parsed command to completion.
pub fn run(cli: &Cli) -> Result<()> {
    let root = cli.cache_dir.clone().unwrap_or_else(default_cache_root);
    let fetcher = match &cli.endpoint {
        Some(endpoint) => RemoteFetcher::with_endpoint(endpoint),
        None => RemoteFetcher::new(),
    };
    let resolver = IconResolver::new(Box::new(DiskStore::new(root)), fetcher);

    match &cli.command {
        Commands::Resolve {
            icon,
            width,
            height,
            color,
        } => {
            let reference = resolver.resolve_path(icon, *width, *height, color.as_deref())?;
            println!("{}", reference.uri());
            Ok(())
        }
        Commands::Prefetch { icons } => {
            for raw in icons {
                let icon = IconIdentifier::parse(raw)?;
                resolver.ensure_cached(&icon)?;
                tracing::info!("Cached {}", icon);
            }
            Ok(())
        }
    }
}
