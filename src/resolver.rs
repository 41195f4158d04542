//! Icon resolution orchestration.
//!
//! [`IconResolver`] ties the pieces together: given an identifier and a
//! desired render context it ensures the cache holds a valid copy of the
//! asset (fetching on miss or stale metadata), detects tintability from
//! the cached payload, and computes the render parameters layered onto
//! the asset path. Callers receive an [`AssetReference`] to hand to their
//! image loader; the resolver never returns raw bytes.

use crate::error::Result;
use crate::fetch::RemoteFetcher;
use crate::icon::IconIdentifier;
use crate::metadata;
use crate::store::{default_cache_root, DiskStore, IconStore};

/// Marker scanned for in cached payloads to decide tintability. Assets
/// authored against CSS `currentColor` accept a caller-supplied tint.
const TINT_MARKER: &str = "currentColor";

/// Floor applied to requested render dimensions, guarding against
/// degenerate zero-size render contexts.
const MIN_DIMENSION: u32 = 32;

/// Requested render dimensions for an icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderRect {
    pub width: u32,
    pub height: u32,
}

impl RenderRect {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// A loadable reference to a cached asset: the store-relative path plus
/// the query parameters the loader applies when materializing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetReference {
    /// Store-relative asset path, e.g. `mdi/home.svg`.
    pub path: String,
    /// Render parameters, e.g. `color=%23112233&w=48&h=48`.
    pub query: String,
    /// Whether the asset accepts a caller-supplied tint.
    pub tintable: bool,
}

impl AssetReference {
    /// Path and query joined for handing to an image loader.
    pub fn uri(&self) -> String {
        format!("{}?{}", self.path, self.query)
    }
}

/// Resolves icon identifiers to cached, render-parameterized assets.
///
/// Holds a store and a fetcher; no other state. Distinct identifiers may
/// be resolved concurrently from multiple threads. Concurrent resolves of
/// the same identifier may redundantly fetch and overwrite the same entry,
/// which is an accepted idempotent race.
pub struct IconResolver {
    store: Box<dyn IconStore>,
    fetcher: RemoteFetcher,
}

impl IconResolver {
    /// Resolver over a caller-supplied store and fetcher.
    pub fn new(store: Box<dyn IconStore>, fetcher: RemoteFetcher) -> Self {
        Self { store, fetcher }
    }

    /// Resolver over a disk store at the platform default cache location.
    pub fn with_default_store() -> Self {
        Self::new(
            Box::new(DiskStore::new(default_cache_root())),
            RemoteFetcher::new(),
        )
    }

    /// The backing store.
    pub fn store(&self) -> &dyn IconStore {
        self.store.as_ref()
    }

    /// Ensure the store holds the asset with a current metadata stamp.
    ///
    /// Fetches when the asset is absent or its stamp is missing, corrupt,
    /// or carries an outdated schema version. On fetch failure no cache
    /// mutation occurs; the identifier's prior state is left untouched.
    pub fn ensure_cached(&self, icon: &IconIdentifier) -> Result<()> {
        let asset_path = icon.asset_path();
        let needs_fetch = !self.store.exists(&asset_path)
            || !metadata::is_valid(self.store.as_ref(), &icon.metadata_path());

        if !needs_fetch {
            return Ok(());
        }

        tracing::debug!("Cache miss for icon '{}', fetching from API", icon);

        self.store.create_dir(icon.pack())?;
        let contents = self.fetcher.fetch(icon)?;

        // Asset first, stamp second: a failure between the two writes
        // leaves the entry invalid, so the next lookup re-fetches instead
        // of trusting a half-written cache.
        self.store.write_text(&asset_path, &contents)?;
        metadata::write(self.store.as_ref(), &icon.metadata_path())?;

        Ok(())
    }

    /// Resolve an icon to a loadable asset reference.
    ///
    /// Tintability is recomputed from the cached text on every call
    /// rather than persisted, so it can never go stale. The `color`
    /// parameter appears only when the asset is tintable and the caller
    /// supplied a tint; `w` and `h` are always present, clamped to a
    /// floor of 32.
    pub fn resolve(
        &self,
        icon: &IconIdentifier,
        rect: RenderRect,
        tint: Option<&str>,
    ) -> Result<AssetReference> {
        self.ensure_cached(icon)?;

        let contents = self.store.read_text(&icon.asset_path())?;
        let tintable = contents.contains(TINT_MARKER);

        let width = rect.width.max(MIN_DIMENSION);
        let height = rect.height.max(MIN_DIMENSION);

        let mut query = String::new();
        if let Some(color) = tint.filter(|_| tintable) {
            query.push_str(&format!("color={}&", urlencoding::encode(color)));
        }
        query.push_str(&format!("w={width}&h={height}"));

        Ok(AssetReference {
            path: icon.asset_path(),
            query,
            tintable,
        })
    }

    /// Parse and resolve in one call.
    pub fn resolve_path(
        &self,
        raw: &str,
        width: u32,
        height: u32,
        tint: Option<&str>,
    ) -> Result<AssetReference> {
        let icon = IconIdentifier::parse(raw)?;
        self.resolve(&icon, RenderRect::new(width, height), tint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IconifyError;
    use crate::metadata::SCHEMA_VERSION;
    use crate::store::MemoryStore;
    use httpmock::prelude::*;

    const TINTABLE_SVG: &str = "<svg><path fill=\"currentColor\" d=\"M0 0\"/></svg>";
    const PLAIN_SVG: &str = "<svg><path fill=\"#f00\" d=\"M0 0\"/></svg>";

    fn resolver_for(server: &MockServer) -> IconResolver {
        IconResolver::new(
            Box::new(MemoryStore::new()),
            RemoteFetcher::with_endpoint(server.base_url()),
        )
    }

    fn icon(raw: &str) -> IconIdentifier {
        IconIdentifier::parse(raw).unwrap()
    }

    #[test]
    fn ensure_cached_fetches_once_and_stamps() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/mdi/home.svg");
            then.status(200).body(PLAIN_SVG);
        });

        let resolver = resolver_for(&server);
        resolver.ensure_cached(&icon("mdi:home")).unwrap();

        assert!(resolver.store().exists("mdi/home.svg"));
        assert!(metadata::is_valid(resolver.store(), "mdi/home.json"));
        mock.assert_calls(1);
    }

    #[test]
    fn warm_cache_performs_no_network_calls() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/mdi/home.svg");
            then.status(200).body(PLAIN_SVG);
        });

        let resolver = resolver_for(&server);
        resolver.ensure_cached(&icon("mdi:home")).unwrap();
        resolver.ensure_cached(&icon("mdi:home")).unwrap();

        mock.assert_calls(1);
    }

    #[test]
    fn outdated_schema_version_triggers_refetch() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/mdi/home.svg");
            then.status(200).body(PLAIN_SVG);
        });

        let resolver = resolver_for(&server);
        resolver.ensure_cached(&icon("mdi:home")).unwrap();

        let stale = serde_json::json!({
            "schema_version": SCHEMA_VERSION - 1,
            "fetched_at": chrono::Utc::now(),
        });
        resolver
            .store()
            .write_text("mdi/home.json", &stale.to_string())
            .unwrap();

        resolver.ensure_cached(&icon("mdi:home")).unwrap();
        mock.assert_calls(2);
        assert!(metadata::is_valid(resolver.store(), "mdi/home.json"));
    }

    #[test]
    fn corrupt_metadata_triggers_refetch() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/mdi/home.svg");
            then.status(200).body(PLAIN_SVG);
        });

        let resolver = resolver_for(&server);
        resolver.ensure_cached(&icon("mdi:home")).unwrap();

        resolver
            .store()
            .write_text("mdi/home.json", "garbage {")
            .unwrap();

        resolver.ensure_cached(&icon("mdi:home")).unwrap();
        mock.assert_calls(2);
    }

    #[test]
    fn missing_asset_with_valid_stamp_triggers_refetch() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/mdi/home.svg");
            then.status(200).body(PLAIN_SVG);
        });

        let resolver = resolver_for(&server);
        metadata::write(resolver.store(), "mdi/home.json").unwrap();

        resolver.ensure_cached(&icon("mdi:home")).unwrap();
        mock.assert_calls(1);
        assert!(resolver.store().exists("mdi/home.svg"));
    }

    #[test]
    fn failed_fetch_leaves_cache_unmutated() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/mdi/missing.svg");
            then.status(404).body("Not Found");
        });

        let resolver = resolver_for(&server);
        let result = resolver.ensure_cached(&icon("mdi:missing"));

        assert!(matches!(result, Err(IconifyError::IconNotFound { .. })));
        assert!(!resolver.store().exists("mdi/missing.svg"));
        assert!(!resolver.store().exists("mdi/missing.json"));
    }

    #[test]
    fn resolve_clamps_degenerate_dimensions() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/mdi/home.svg");
            then.status(200).body(PLAIN_SVG);
        });

        let resolver = resolver_for(&server);
        let reference = resolver
            .resolve(&icon("mdi:home"), RenderRect::new(10, 5), None)
            .unwrap();

        assert_eq!(reference.query, "w=32&h=32");
    }

    #[test]
    fn resolve_keeps_dimensions_above_floor() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/mdi/home.svg");
            then.status(200).body(PLAIN_SVG);
        });

        let resolver = resolver_for(&server);
        let reference = resolver
            .resolve(&icon("mdi:home"), RenderRect::new(64, 48), None)
            .unwrap();

        assert_eq!(reference.query, "w=64&h=48");
    }

    #[test]
    fn tintable_asset_with_tint_includes_encoded_color() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/mdi/home.svg");
            then.status(200).body(TINTABLE_SVG);
        });

        let resolver = resolver_for(&server);
        let reference = resolver
            .resolve(&icon("mdi:home"), RenderRect::new(48, 48), Some("#112233"))
            .unwrap();

        assert!(reference.tintable);
        assert_eq!(reference.query, "color=%23112233&w=48&h=48");
    }

    #[test]
    fn tintable_asset_without_tint_omits_color() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/mdi/home.svg");
            then.status(200).body(TINTABLE_SVG);
        });

        let resolver = resolver_for(&server);
        let reference = resolver
            .resolve(&icon("mdi:home"), RenderRect::new(48, 48), None)
            .unwrap();

        assert!(reference.tintable);
        assert_eq!(reference.query, "w=48&h=48");
    }

    #[test]
    fn non_tintable_asset_ignores_tint() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/mdi/home.svg");
            then.status(200).body(PLAIN_SVG);
        });

        let resolver = resolver_for(&server);
        let reference = resolver
            .resolve(&icon("mdi:home"), RenderRect::new(48, 48), Some("#112233"))
            .unwrap();

        assert!(!reference.tintable);
        assert_eq!(reference.query, "w=48&h=48");
    }

    #[test]
    fn asset_reference_uri_joins_path_and_query() {
        let reference = AssetReference {
            path: "mdi/home.svg".into(),
            query: "w=32&h=32".into(),
            tintable: false,
        };
        assert_eq!(reference.uri(), "mdi/home.svg?w=32&h=32");
    }

    #[test]
    fn resolve_path_parses_then_resolves() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/mdi/home.svg");
            then.status(200).body(PLAIN_SVG);
        });

        let resolver = resolver_for(&server);
        let reference = resolver.resolve_path("mdi:home", 40, 40, None).unwrap();

        assert_eq!(reference.uri(), "mdi/home.svg?w=40&h=40");
    }

    #[test]
    fn resolve_path_rejects_malformed_identifier_without_io() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET);
            then.status(200).body(PLAIN_SVG);
        });

        let resolver = resolver_for(&server);
        let result = resolver.resolve_path("not-an-icon", 32, 32, None);

        assert!(matches!(
            result,
            Err(IconifyError::InvalidIdentifier { .. })
        ));
        mock.assert_calls(0);
    }
}
