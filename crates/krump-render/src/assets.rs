//! Branding assets (logo, mascot) embedded as `data:` URIs.
//!
//! Assets are resolved before layout starts. All fetches run concurrently
//! and any single failure aborts the report.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use futures::future::try_join_all;
use reqwest::{Client, StatusCode};
use rustc_hash::FxHashMap;
use tracing::{debug, instrument, warn};

use crate::error::{RenderError, RenderResult};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
/// Default number of retries after the first attempt.
pub const DEFAULT_RETRIES: u32 = 2;
/// Upper bound on retries after the first attempt.
pub const MAX_RETRIES: u32 = 5;
/// Delay before the first retry; doubles per attempt.
const BASE_BACKOFF: Duration = Duration::from_millis(250);
/// Longest delay between two attempts.
pub const MAX_BACKOFF: Duration = Duration::from_secs(4);
/// Deadline for resolving every asset of one report.
pub const RESOLVE_TIMEOUT: Duration = Duration::from_secs(60);
/// MIME type assumed when neither the response nor the name says otherwise.
pub const DEFAULT_IMAGE_MIME: &str = "image/png";

/// Where an asset appears in the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetSlot {
    /// Left of the header title.
    Logo,
    /// Right side of the footer.
    Mascot,
}

impl fmt::Display for AssetSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetSlot::Logo => f.write_str("logo"),
            AssetSlot::Mascot => f.write_str("mascot"),
        }
    }
}

/// An asset to fetch: a URL or a local path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetSpec {
    pub slot: AssetSlot,
    pub source: String,
}

impl AssetSpec {
    pub fn new(slot: AssetSlot, source: impl Into<String>) -> Self {
        Self {
            slot,
            source: source.into(),
        }
    }
}

/// Raw bytes returned by a fetcher.
#[derive(Clone)]
pub struct FetchedAsset {
    pub bytes: Vec<u8>,
    /// `Content-Type` as reported by the source, if any.
    pub content_type: Option<String>,
}

impl fmt::Debug for FetchedAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchedAsset")
            .field("bytes", &self.bytes.len())
            .field("content_type", &self.content_type)
            .finish()
    }
}

/// An asset ready to embed.
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedAsset {
    pub slot: AssetSlot,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl ResolvedAsset {
    /// `data:{mime};base64,{payload}`.
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime, STANDARD.encode(&self.bytes))
    }
}

impl fmt::Debug for ResolvedAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedAsset")
            .field("slot", &self.slot)
            .field("mime", &self.mime)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

/// Assets by slot. The default has none, which renders without images.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedAssets {
    pub logo: Option<ResolvedAsset>,
    pub mascot: Option<ResolvedAsset>,
}

impl ResolvedAssets {
    /// Whether no asset is present.
    pub fn is_empty(&self) -> bool {
        self.logo.is_none() && self.mascot.is_none()
    }

    fn insert(&mut self, asset: ResolvedAsset) {
        match asset.slot {
            AssetSlot::Logo => self.logo = Some(asset),
            AssetSlot::Mascot => self.mascot = Some(asset),
        }
    }
}

/// Loads asset bytes from some source.
#[async_trait]
pub trait AssetFetcher: Send + Sync {
    /// Fetch the bytes behind `source`.
    async fn fetch(&self, source: &str) -> RenderResult<FetchedAsset>;
}

/// Fetches `http(s)://` URLs with reqwest and everything else from disk.
#[derive(Debug, Clone)]
pub struct HttpAssetFetcher {
    client: Client,
    retries: u32,
}

impl HttpAssetFetcher {
    /// Create a fetcher with a per-request timeout and a retry budget.
    ///
    /// `retries` is capped at [`MAX_RETRIES`].
    pub fn new(timeout: Duration, retries: u32) -> RenderResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("krump-render/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RenderError::Http(e.to_string()))?;
        Ok(Self {
            client,
            retries: retries.min(MAX_RETRIES),
        })
    }

    /// Retries after the first attempt.
    pub fn retries(&self) -> u32 {
        self.retries
    }

    /// Fetcher with [`DEFAULT_TIMEOUT`] and [`DEFAULT_RETRIES`].
    pub fn with_defaults() -> RenderResult<Self> {
        Self::new(DEFAULT_TIMEOUT, DEFAULT_RETRIES)
    }

    async fn fetch_url(&self, url: &str) -> RenderResult<FetchedAsset> {
        let max_attempts = self.retries + 1;
        let mut last_error = String::from("no attempt made");

        for attempt in 0..max_attempts {
            if attempt > 0 {
                let backoff = backoff_delay(attempt);
                warn!(
                    url,
                    attempt = attempt + 1,
                    "Retrying asset fetch (backoff {:?})",
                    backoff
                );
                tokio::time::sleep(backoff).await;
            }

            match self.get_once(url).await {
                Ok(asset) => return Ok(asset),
                Err(Attempt::Transient(reason)) => {
                    debug!(url, %reason, "Transient asset fetch failure");
                    last_error = reason;
                }
                Err(Attempt::Permanent(reason)) => {
                    return Err(RenderError::asset(url, reason));
                }
            }
        }

        Err(RenderError::asset(
            url,
            format!("{last_error} (after {max_attempts} attempts)"),
        ))
    }

    async fn get_once(&self, url: &str) -> Result<FetchedAsset, Attempt> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Attempt::from_reqwest(&e))?;

        let status = response.status();
        if !status.is_success() {
            let reason = format!("HTTP {status}");
            return Err(if is_transient_status(status) {
                Attempt::Transient(reason)
            } else {
                Attempt::Permanent(reason)
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response
            .bytes()
            .await
            .map_err(|e| Attempt::from_reqwest(&e))?;

        Ok(FetchedAsset {
            bytes: bytes.to_vec(),
            content_type,
        })
    }
}

#[async_trait]
impl AssetFetcher for HttpAssetFetcher {
    #[instrument(skip(self))]
    async fn fetch(&self, source: &str) -> RenderResult<FetchedAsset> {
        if is_url(source) {
            return self.fetch_url(source).await;
        }

        let path = source.strip_prefix("file://").unwrap_or(source);
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| RenderError::asset(source, e))?;
        debug!("Read {} bytes from {}", bytes.len(), path);
        Ok(FetchedAsset {
            bytes,
            content_type: None,
        })
    }
}

enum Attempt {
    Transient(String),
    Permanent(String),
}

impl Attempt {
    fn from_reqwest(e: &reqwest::Error) -> Self {
        if e.is_timeout() || e.is_connect() || e.is_request() || e.is_body() {
            Attempt::Transient(e.to_string())
        } else {
            Attempt::Permanent(e.to_string())
        }
    }
}

/// Delay before `attempt` (1-based retry count), capped at [`MAX_BACKOFF`].
fn backoff_delay(attempt: u32) -> Duration {
    1u32.checked_shl(attempt.saturating_sub(1))
        .and_then(|factor| BASE_BACKOFF.checked_mul(factor))
        .map_or(MAX_BACKOFF, |delay| delay.min(MAX_BACKOFF))
}

fn is_transient_status(status: StatusCode) -> bool {
    status.is_server_error()
        || status == StatusCode::TOO_MANY_REQUESTS
        || status == StatusCode::REQUEST_TIMEOUT
}

fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Serves assets from memory, keyed by source string.
#[derive(Debug, Clone, Default)]
pub struct MapAssetFetcher {
    assets: FxHashMap<String, FetchedAsset>,
}

impl MapAssetFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register bytes for `source`.
    pub fn insert(
        &mut self,
        source: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
        content_type: Option<&str>,
    ) {
        self.assets.insert(
            source.into(),
            FetchedAsset {
                bytes: bytes.into(),
                content_type: content_type.map(str::to_string),
            },
        );
    }

    /// Builder form of [`MapAssetFetcher::insert`].
    pub fn with(
        mut self,
        source: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
        content_type: Option<&str>,
    ) -> Self {
        self.insert(source, bytes, content_type);
        self
    }
}

#[async_trait]
impl AssetFetcher for MapAssetFetcher {
    async fn fetch(&self, source: &str) -> RenderResult<FetchedAsset> {
        self.assets
            .get(source)
            .cloned()
            .ok_or_else(|| RenderError::asset(source, "not found"))
    }
}

/// Fetch every spec concurrently within [`RESOLVE_TIMEOUT`].
///
/// Fails on the first error, including an empty body. A later spec for the
/// same slot replaces an earlier one.
pub async fn resolve_assets(
    fetcher: &dyn AssetFetcher,
    specs: &[AssetSpec],
) -> RenderResult<ResolvedAssets> {
    resolve_assets_within(fetcher, specs, RESOLVE_TIMEOUT).await
}

/// [`resolve_assets`] with an explicit overall deadline.
pub async fn resolve_assets_within(
    fetcher: &dyn AssetFetcher,
    specs: &[AssetSpec],
    deadline: Duration,
) -> RenderResult<ResolvedAssets> {
    if specs.is_empty() {
        return Ok(ResolvedAssets::default());
    }

    let pending = try_join_all(specs.iter().map(|spec| async move {
        let asset = fetcher.fetch(&spec.source).await?;
        if asset.bytes.is_empty() {
            return Err(RenderError::asset(&spec.source, "empty response body"));
        }
        let mime = detect_mime(asset.content_type.as_deref(), &spec.source);
        debug!(
            "Resolved {} from {} ({} bytes, {})",
            spec.slot,
            spec.source,
            asset.bytes.len(),
            mime
        );
        Ok(ResolvedAsset {
            slot: spec.slot,
            mime,
            bytes: asset.bytes,
        })
    }));

    let fetched = tokio::time::timeout(deadline, pending).await.map_err(|_| {
        let sources: Vec<&str> = specs.iter().map(|s| s.source.as_str()).collect();
        RenderError::asset(sources.join(", "), format!("timed out after {deadline:?}"))
    })??;

    let mut resolved = ResolvedAssets::default();
    for asset in fetched {
        resolved.insert(asset);
    }
    Ok(resolved)
}

/// MIME type from a `Content-Type` header, then the file extension.
pub fn detect_mime(content_type: Option<&str>, source: &str) -> String {
    if let Some(mime) = content_type
        .and_then(|ct| ct.split(';').next())
        .map(|ct| ct.trim().to_ascii_lowercase())
        .filter(|ct| ct.starts_with("image/"))
    {
        return mime;
    }

    let name = source.split(['?', '#']).next().unwrap_or(source);
    let extension = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => DEFAULT_IMAGE_MIME,
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_mime() {
        assert_eq!(
            detect_mime(Some("image/jpeg; charset=binary"), "x.png"),
            "image/jpeg"
        );
        assert_eq!(detect_mime(Some("text/html"), "logo.svg"), "image/svg+xml");
        assert_eq!(
            detect_mime(None, "https://cdn.test/m.GIF?v=2"),
            "image/gif"
        );
        assert_eq!(detect_mime(None, "mascot"), "image/png");
    }

    #[test]
    fn test_data_uri() {
        let asset = ResolvedAsset {
            slot: AssetSlot::Logo,
            mime: "image/png".to_string(),
            bytes: b"hi".to_vec(),
        };
        assert_eq!(asset.data_uri(), "data:image/png;base64,aGk=");
    }

    #[tokio::test]
    async fn test_resolve_fills_slots() {
        let fetcher = MapAssetFetcher::new()
            .with("logo.png", b"L".to_vec(), None)
            .with("mascot", b"M".to_vec(), Some("image/webp"));
        let specs = [
            AssetSpec::new(AssetSlot::Logo, "logo.png"),
            AssetSpec::new(AssetSlot::Mascot, "mascot"),
        ];

        let resolved = resolve_assets(&fetcher, &specs).await.unwrap();
        assert_eq!(resolved.logo.as_ref().unwrap().mime, "image/png");
        assert_eq!(resolved.mascot.as_ref().unwrap().mime, "image/webp");
    }

    #[tokio::test]
    async fn test_resolve_aborts_on_any_failure() {
        let fetcher = MapAssetFetcher::new().with("logo.png", b"L".to_vec(), None);
        let specs = [
            AssetSpec::new(AssetSlot::Logo, "logo.png"),
            AssetSpec::new(AssetSlot::Mascot, "missing.png"),
        ];

        let err = resolve_assets(&fetcher, &specs).await.unwrap_err();
        assert!(matches!(err, RenderError::Asset { ref source_ref, .. } if source_ref == "missing.png"));
    }

    #[tokio::test]
    async fn test_resolve_rejects_empty_body() {
        let fetcher = MapAssetFetcher::new().with("blank.png", Vec::new(), None);
        let specs = [AssetSpec::new(AssetSlot::Logo, "blank.png")];
        assert!(resolve_assets(&fetcher, &specs).await.is_err());
    }

    #[tokio::test]
    async fn test_http_fetcher_reads_local_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.svg");
        std::fs::write(&path, "<svg/>").unwrap();

        let fetcher = HttpAssetFetcher::with_defaults().unwrap();
        let source = path.to_string_lossy().into_owned();
        let resolved = resolve_assets(&fetcher, &[AssetSpec::new(AssetSlot::Logo, source)])
            .await
            .unwrap();
        assert_eq!(resolved.logo.unwrap().mime, "image/svg+xml");
    }

    #[test]
    fn test_backoff_doubles_then_caps() {
        assert_eq!(backoff_delay(1), Duration::from_millis(250));
        assert_eq!(backoff_delay(2), Duration::from_millis(500));
        assert_eq!(backoff_delay(3), Duration::from_secs(1));
        assert_eq!(backoff_delay(6), MAX_BACKOFF);
        assert_eq!(backoff_delay(64), MAX_BACKOFF);
        assert_eq!(backoff_delay(u32::MAX), MAX_BACKOFF);
    }

    #[test]
    fn test_http_fetcher_caps_retries() {
        let fetcher = HttpAssetFetcher::new(Duration::from_secs(1), 70).unwrap();
        assert_eq!(fetcher.retries(), MAX_RETRIES);

        let fetcher = HttpAssetFetcher::new(Duration::from_secs(1), 1).unwrap();
        assert_eq!(fetcher.retries(), 1);
    }

    /// Never answers.
    struct StalledFetcher;

    #[async_trait]
    impl AssetFetcher for StalledFetcher {
        async fn fetch(&self, _source: &str) -> RenderResult<FetchedAsset> {
            tokio::time::sleep(Duration::from_secs(24 * 60 * 60)).await;
            Err(RenderError::asset("stalled", "unreachable"))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_resolve_times_out_on_stalled_fetch() {
        let specs = [AssetSpec::new(AssetSlot::Logo, "https://slow.test/logo.png")];
        let started = tokio::time::Instant::now();

        let err = resolve_assets(&StalledFetcher, &specs).await.unwrap_err();

        assert!(matches!(
            err,
            RenderError::Asset { ref source_ref, ref reason }
                if source_ref == "https://slow.test/logo.png" && reason.contains("timed out")
        ));
        let elapsed = started.elapsed();
        assert!(elapsed >= RESOLVE_TIMEOUT && elapsed < RESOLVE_TIMEOUT + Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_resolve_within_custom_deadline() {
        let specs = [AssetSpec::new(AssetSlot::Mascot, "mascot.png")];
        let deadline = Duration::from_secs(3);
        let started = tokio::time::Instant::now();

        assert!(
            resolve_assets_within(&StalledFetcher, &specs, deadline)
                .await
                .is_err()
        );
        let elapsed = started.elapsed();
        assert!(elapsed >= deadline && elapsed < deadline + Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_http_fetcher_missing_file_is_asset_error() {
        let fetcher = HttpAssetFetcher::with_defaults().unwrap();
        let err = fetcher.fetch("/definitely/not/here.png").await.unwrap_err();
        assert!(matches!(err, RenderError::Asset { .. }));
    }
}
