use reqwest::Client;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncReadExt};
use url::Url;

use crate::constants::DEFAULT_MANIFEST_PATH;
use crate::error::{FaviconError, Result};
use crate::extract::{parse_manifest, parse_markup, fetch_well_known};
use crate::filter::{self, Filter, apply_filters};
use crate::http::{Fetch, Fetched, HttpFetcher};
use crate::icon::Icon;
use crate::logger::{Logger, NullLogger};
use crate::rank::sort_icons;
use crate::utils::{decode_markup, file_ext, icon_hash, mime_type_for_url, resolve_url, site_root, size_from_url};

/// Discovers icons for web pages.
///
/// A finder looks at
/// - `<link>` icons, Open Graph and Twitter images in the page markup,
/// - the web app manifest linked from the page, or `/manifest.json`,
/// - `/favicon.ico` and `/apple-touch-icon.png` on the server.
///
/// Results are deduplicated by URL and size, filtered, and ordered widest
/// first. A finder holds no per-request state and can be shared across tasks.
pub struct Finder {
    ignore_manifest: bool,
    ignore_well_known: bool,
    logger: Arc<dyn Logger>,
    fetcher: Arc<dyn Fetch>,
    filters: Vec<Filter>,
}

impl Default for Finder {
    fn default() -> Self {
        Self::new()
    }
}

impl Finder {
    pub fn new() -> Self {
        FinderBuilder::default().build()
    }

    pub fn builder() -> FinderBuilder {
        FinderBuilder::default()
    }

    /// Retrieve the page at `url` and find its icons.
    ///
    /// Fails only when `url` is invalid or the page cannot be retrieved.
    pub async fn find(&self, url: &str) -> Result<Vec<Icon>> {
        let document_url = parse_url(url)?;
        let page = self.fetch(document_url.as_str()).await?;
        let base = Url::parse(&page.url).unwrap_or(document_url);
        let markup = decode_markup(&page.body, page.content_type.as_deref());
        Ok(self.discover(&markup, Some(base)).await)
    }

    /// Find icons in `markup`, resolving relative URLs against `base_url`.
    ///
    /// The markup is decoded per its `<meta>` charset, defaulting to UTF-8.
    ///
    /// Without a base URL, relative icon URLs are kept as written and the
    /// server is not asked for well-known files.
    pub async fn find_html(&self, markup: impl AsRef<[u8]>, base_url: Option<&str>) -> Result<Vec<Icon>> {
        let base = base_url.map(parse_url).transpose()?;
        let markup = decode_markup(markup.as_ref(), None);
        Ok(self.discover(&markup, base).await)
    }

    /// Like [`find_html`](Self::find_html), reading the markup from `reader`.
    pub async fn find_reader<R>(&self, mut reader: R, base_url: Option<&str>) -> Result<Vec<Icon>>
    where
        R: AsyncRead + Unpin,
    {
        let base = base_url.map(parse_url).transpose()?;
        let mut markup = Vec::new();
        reader.read_to_end(&mut markup).await?;
        let markup = decode_markup(&markup, None);
        Ok(self.discover(&markup, base).await)
    }

    async fn discover(&self, markup: &str, document_url: Option<Url>) -> Vec<Icon> {
        let found = parse_markup(markup, document_url.as_ref());
        self.logger
            .record(&format!("(markup) {} icon(s)", found.icons.len()));
        let mut candidates = found.icons;

        if !self.ignore_manifest {
            let icons = self
                .manifest_icons(
                    found.manifest.as_deref(),
                    found.base_url.as_ref(),
                    document_url.as_ref(),
                )
                .await;
            candidates.extend(icons);
        }

        if !self.ignore_well_known
            && let Some(url) = &document_url
        {
            let icons = fetch_well_known(self.fetcher.as_ref(), self.logger.as_ref(), url).await;
            candidates.extend(icons);
        }

        self.post_process(candidates, found.base_url.as_ref())
    }

    /// Icons from the linked manifest, or from `/manifest.json` when the page
    /// links none. Any failure yields no icons.
    async fn manifest_icons(
        &self,
        href: Option<&str>,
        markup_base: Option<&Url>,
        document_url: Option<&Url>,
    ) -> Vec<Icon> {
        let location = match href {
            Some(href) => resolve_url(href, markup_base),
            None => match document_url.and_then(site_root) {
                Some(root) => format!("{}{}", root, DEFAULT_MANIFEST_PATH),
                None => return Vec::new(),
            },
        };
        let Ok(manifest_url) = Url::parse(&location) else {
            self.logger
                .record(&format!("(manifest) cannot resolve {:?}", location));
            return Vec::new();
        };

        let Ok(page) = self.fetch(manifest_url.as_str()).await else {
            return Vec::new();
        };
        let manifest_url = Url::parse(&page.url).unwrap_or(manifest_url);

        match parse_manifest(&page.body, Some(&manifest_url)) {
            Ok(icons) => {
                self.logger.record(&format!(
                    "(manifest) {} icon(s) in {}",
                    icons.len(),
                    manifest_url
                ));
                icons
            }
            Err(e) => {
                self.logger
                    .record(&format!("(manifest) {}: {}", manifest_url, e));
                Vec::new()
            }
        }
    }

    /// Fill in missing metadata, drop incomplete icons, deduplicate, filter
    /// and sort.
    fn post_process(&self, candidates: Vec<Icon>, base: Option<&Url>) -> Vec<Icon> {
        let mut by_hash: BTreeMap<String, Icon> = BTreeMap::new();

        for mut icon in candidates {
            icon.url = resolve_url(&icon.url, base);
            icon.mime_type = icon.mime_type.trim().to_ascii_lowercase();
            if icon.mime_type.is_empty() {
                icon.mime_type = mime_type_for_url(&icon.url);
            }
            if icon.url.is_empty() || icon.mime_type.is_empty() {
                self.logger
                    .record(&format!("(drop) no URL or MIME type: {:?}", icon.url));
                continue;
            }

            if icon.file_ext.is_empty() {
                icon.file_ext = file_ext(&icon.url);
            }
            if !icon.has_known_size()
                && let Some((width, height)) = size_from_url(&icon.url)
            {
                icon.width = width;
                icon.height = height;
            }

            icon.hash = icon_hash(&icon.url, icon.width, icon.height);
            // Later sources win.
            by_hash.insert(icon.hash.clone(), icon);
        }

        let mut icons: Vec<Icon> = by_hash
            .into_values()
            .filter_map(|icon| {
                let url = icon.url.clone();
                let kept = apply_filters(icon, &self.filters);
                if kept.is_none() {
                    self.logger.record(&format!("(filter) rejected {}", url));
                }
                kept
            })
            .collect();

        sort_icons(&mut icons);
        icons
    }

    async fn fetch(&self, url: &str) -> Result<Fetched> {
        let result = self.fetcher.fetch(url).await;
        match &result {
            Ok(page) => self.logger.record(&format!("[{}] {}", page.status, url)),
            Err(e) => self.logger.record(&e.to_string()),
        }
        result
    }
}

fn parse_url(url: &str) -> Result<Url> {
    Url::parse(url).map_err(|source| FaviconError::InvalidUrl {
        url: url.to_string(),
        source,
    })
}

/// Configures a [`Finder`]. Options compose; filters run in the order added.
#[derive(Default)]
pub struct FinderBuilder {
    ignore_manifest: bool,
    ignore_well_known: bool,
    logger: Option<Arc<dyn Logger>>,
    fetcher: Option<Arc<dyn Fetch>>,
    filters: Vec<Filter>,
}

impl FinderBuilder {
    pub fn logger(mut self, logger: impl Logger + 'static) -> Self {
        self.logger = Some(Arc::new(logger));
        self
    }

    pub fn fetcher(mut self, fetcher: impl Fetch + 'static) -> Self {
        self.fetcher = Some(Arc::new(fetcher));
        self
    }

    /// Retrieve pages with `client`, e.g. one configured with a proxy or timeout.
    pub fn client(self, client: Client) -> Self {
        self.fetcher(HttpFetcher::new(client))
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn filters(mut self, filters: impl IntoIterator<Item = Filter>) -> Self {
        self.filters.extend(filters);
        self
    }

    pub fn only_mime_types<I, S>(self, mime_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filter(filter::only_mime_types(mime_types))
    }

    pub fn only_png(self) -> Self {
        self.filter(filter::only_png())
    }

    pub fn only_ico(self) -> Self {
        self.filter(filter::only_ico())
    }

    /// Skip non-square icons. Icons of unknown size are kept.
    pub fn only_square(self) -> Self {
        self.filter(filter::only_square())
    }

    pub fn ignore_no_size(self) -> Self {
        self.filter(filter::ignore_no_size())
    }

    pub fn min_width(self, width: u32) -> Self {
        self.filter(filter::min_width(width))
    }

    pub fn max_width(self, width: u32) -> Self {
        self.filter(filter::max_width(width))
    }

    pub fn min_height(self, height: u32) -> Self {
        self.filter(filter::min_height(height))
    }

    pub fn max_height(self, height: u32) -> Self {
        self.filter(filter::max_height(height))
    }

    /// Skip `/favicon.ico` and friends.
    pub fn ignore_well_known(mut self) -> Self {
        self.ignore_well_known = true;
        self
    }

    /// Don't retrieve web app manifests.
    pub fn ignore_manifest(mut self) -> Self {
        self.ignore_manifest = true;
        self
    }

    pub fn build(self) -> Finder {
        Finder {
            ignore_manifest: self.ignore_manifest,
            ignore_well_known: self.ignore_well_known,
            logger: self.logger.unwrap_or_else(|| Arc::new(NullLogger)),
            fetcher: self
                .fetcher
                .unwrap_or_else(|| Arc::new(HttpFetcher::default())),
            filters: self.filters,
        }
    }
}

/// Find icons for `url` with a default [`Finder`].
pub async fn find(url: &str) -> Result<Vec<Icon>> {
    Finder::new().find(url).await
}

/// Find icons in `markup` with a default [`Finder`].
pub async fn find_html(markup: impl AsRef<[u8]>, base_url: Option<&str>) -> Result<Vec<Icon>> {
    Finder::new().find_html(markup, base_url).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::MemoryFetcher;
    use std::sync::Mutex;

    const PAGE: &str = r#"
        <html><head>
        <link rel="icon" sizes="32x32" href="/i.png">
        <link rel="manifest" href="/manifest.json">
        </head></html>
    "#;
    const MANIFEST: &str =
        r#"{"icons": [{"src": "/icon-192.png", "sizes": "192x192", "type": "image/png"}]}"#;

    fn site() -> MemoryFetcher {
        MemoryFetcher::new()
            .with("https://a.com/", PAGE)
            .with("https://a.com/manifest.json", MANIFEST)
            .with("https://a.com/favicon.ico", vec![0u8; 8])
    }

    fn urls_of(icons: &[Icon]) -> Vec<&str> {
        icons.iter().map(|i| i.url.as_str()).collect()
    }

    fn summary(icons: &[Icon]) -> Vec<(String, u32, u32, String)> {
        icons
            .iter()
            .map(|i| (i.url.clone(), i.width, i.height, i.mime_type.clone()))
            .collect()
    }

    #[tokio::test]
    async fn test_markup_and_manifest() {
        let finder = Finder::builder().fetcher(site()).ignore_well_known().build();
        let icons = finder.find("https://a.com/").await.unwrap();
        assert_eq!(
            summary(&icons),
            vec![
                ("https://a.com/icon-192.png".to_string(), 192, 192, "image/png".to_string()),
                ("https://a.com/i.png".to_string(), 32, 32, "image/png".to_string()),
            ]
        );
        assert_eq!(icons[1].file_ext, ".png");
        assert_eq!(icons[1].hash, icon_hash("https://a.com/i.png", 32, 32));
    }

    #[tokio::test]
    async fn test_well_known_icons() {
        let finder = Finder::builder().fetcher(site()).build();
        let icons = finder.find("https://a.com/").await.unwrap();
        assert_eq!(icons.len(), 3);
        let ico = icons.last().unwrap();
        assert_eq!(ico.url, "https://a.com/favicon.ico");
        assert_eq!(ico.mime_type, "image/x-icon");
        assert_eq!((ico.width, ico.height), (0, 0));
    }

    #[tokio::test]
    async fn test_ignore_manifest() {
        let finder = Finder::builder()
            .fetcher(site())
            .ignore_manifest()
            .ignore_well_known()
            .build();
        let icons = finder.find("https://a.com/").await.unwrap();
        assert_eq!(icons.len(), 1);
        assert_eq!(icons[0].url, "https://a.com/i.png");
    }

    #[tokio::test]
    async fn test_manifest_fallback_without_link() {
        let fetcher = MemoryFetcher::new()
            .with("https://a.com/page", "<html><body>no markup</body></html>")
            .with("https://a.com/manifest.json", MANIFEST);

        let finder = Finder::builder()
            .fetcher(fetcher.clone())
            .ignore_well_known()
            .build();
        let icons = finder.find("https://a.com/page").await.unwrap();
        assert_eq!(icons.len(), 1);
        assert_eq!(icons[0].url, "https://a.com/icon-192.png");

        let finder = Finder::builder()
            .fetcher(fetcher)
            .ignore_well_known()
            .ignore_manifest()
            .build();
        assert!(finder.find("https://a.com/page").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_broken_sources_are_skipped() {
        let fetcher = MemoryFetcher::new()
            .with("https://a.com/", PAGE)
            .with("https://a.com/manifest.json", "{ not json");
        let finder = Finder::builder().fetcher(fetcher).build();
        let icons = finder.find("https://a.com/").await.unwrap();
        assert_eq!(summary(&icons).len(), 1);
        assert_eq!(icons[0].url, "https://a.com/i.png");
    }

    #[tokio::test]
    async fn test_document_errors() {
        let finder = Finder::builder().fetcher(site()).build();
        let err = finder.find("https://a.com/missing").await.unwrap_err();
        assert!(matches!(err, FaviconError::Status { status: 404, .. }));

        let err = finder.find("not a url").await.unwrap_err();
        assert!(matches!(err, FaviconError::InvalidUrl { .. }));
    }

    #[tokio::test]
    async fn test_find_html_invalid_base() {
        let finder = Finder::builder().fetcher(MemoryFetcher::new()).build();
        let err = finder.find_html(PAGE, Some("::bad")).await.unwrap_err();
        assert!(matches!(err, FaviconError::InvalidUrl { .. }));
    }

    #[tokio::test]
    async fn test_find_html_without_base() {
        let finder = Finder::builder().fetcher(MemoryFetcher::new()).build();
        let icons = finder.find_html(PAGE, None).await.unwrap();
        assert_eq!(summary(&icons), vec![("/i.png".to_string(), 32, 32, "image/png".to_string())]);
    }

    #[tokio::test]
    async fn test_find_reader() {
        let finder = Finder::builder()
            .fetcher(site())
            .ignore_well_known()
            .build();
        let icons = finder
            .find_reader(PAGE.as_bytes(), Some("https://a.com"))
            .await
            .unwrap();
        assert_eq!(icons.len(), 2);
        assert_eq!(icons[0].width, 192);
    }

    #[tokio::test]
    async fn test_duplicates_collapse_last_wins() {
        let html = r#"
            <link rel="icon" href="/a.png" sizes="32x32" type="image/x-custom">
            <link rel="apple-touch-icon" href="https://a.com/a.png" sizes="32x32">
            <link rel="icon" href="/a.png" sizes="16x16">
        "#;
        let finder = Finder::builder()
            .fetcher(MemoryFetcher::new())
            .ignore_manifest()
            .build();
        let icons = finder.find_html(html, Some("https://a.com/")).await.unwrap();
        assert_eq!(
            summary(&icons),
            vec![
                ("https://a.com/a.png".to_string(), 32, 32, "image/png".to_string()),
                ("https://a.com/a.png".to_string(), 16, 16, "image/png".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_incomplete_icons_dropped() {
        let html = r#"
            <link rel="icon" href="/icon.php?id=1">
            <link rel="icon" href="">
            <link rel="icon" href="/icon.php?id=2" type="image/png">
            <link rel="icon" href="/favicon-96x96.png">
        "#;
        let finder = Finder::builder()
            .fetcher(MemoryFetcher::new())
            .ignore_manifest()
            .build();
        let icons = finder.find_html(html, Some("https://a.com/")).await.unwrap();
        assert_eq!(
            summary(&icons),
            vec![
                ("https://a.com/favicon-96x96.png".to_string(), 96, 96, "image/png".to_string()),
                ("https://a.com/icon.php?id=2".to_string(), 0, 0, "image/png".to_string()),
            ]
        );
        assert_eq!(icons[1].file_ext, ".php");
    }

    #[tokio::test]
    async fn test_base_href_rebases_markup_urls() {
        let html = r#"
            <base href="https://cdn.b.com/s/">
            <link rel="icon" href="i.png" sizes="32x32">
        "#;
        let finder = Finder::builder()
            .fetcher(MemoryFetcher::new())
            .ignore_manifest()
            .ignore_well_known()
            .build();
        let icons = finder.find_html(html, Some("https://a.com/")).await.unwrap();
        assert_eq!(urls_of(&icons), vec!["https://cdn.b.com/s/i.png"]);
    }

    #[tokio::test]
    async fn test_latin1_markup_keeps_href() {
        let mut html = br#"<meta charset="iso-8859-1"><link rel="icon" href="/ic"#.to_vec();
        html.push(0xF4);
        html.extend_from_slice(br#"ne.png">"#);
        let finder = Finder::builder()
            .fetcher(MemoryFetcher::new())
            .ignore_manifest()
            .ignore_well_known()
            .build();
        let icons = finder.find_html(html, Some("https://a.com/")).await.unwrap();
        assert_eq!(urls_of(&icons), vec!["https://a.com/ic%C3%B4ne.png"]);
    }

    #[tokio::test]
    async fn test_filters_apply_in_order() {
        let html = r#"
            <link rel="icon" href="/a-16x16.png">
            <link rel="icon" href="/a-100x100.png">
            <link rel="icon" href="/a-150x300.png">
            <link rel="icon" href="/a-200x200.jpg">
            <link rel="icon" href="/favicon.ico">
        "#;
        let finder = Finder::builder()
            .fetcher(MemoryFetcher::new())
            .ignore_manifest()
            .min_width(100)
            .max_width(200)
            .build();
        let icons = finder.find_html(html, Some("https://a.com/")).await.unwrap();
        let widths: Vec<u32> = icons.iter().map(|i| i.width).collect();
        assert_eq!(widths, vec![200, 150, 100]);

        let finder = Finder::builder()
            .fetcher(MemoryFetcher::new())
            .ignore_manifest()
            .only_png()
            .only_square()
            .build();
        let icons = finder.find_html(html, Some("https://a.com/")).await.unwrap();
        let urls: Vec<&str> = icons.iter().map(|i| i.url.as_str()).collect();
        assert_eq!(urls, vec!["https://a.com/a-100x100.png", "https://a.com/a-16x16.png"]);
    }

    #[tokio::test]
    async fn test_deterministic_output() {
        let finder = Finder::builder().fetcher(site()).build();
        let first = finder.find("https://a.com/").await.unwrap();
        for _ in 0..5 {
            assert_eq!(finder.find("https://a.com/").await.unwrap(), first);
        }
    }

    #[tokio::test]
    async fn test_logger_receives_records() {
        let lines = Arc::new(Mutex::new(Vec::<String>::new()));
        let sink = lines.clone();
        let finder = Finder::builder()
            .fetcher(site())
            .logger(move |msg: &str| sink.lock().unwrap().push(msg.to_string()))
            .build();
        finder.find("https://a.com/").await.unwrap();

        let lines = lines.lock().unwrap();
        assert!(lines.iter().any(|l| l == "[200] https://a.com/"));
        assert!(lines.iter().any(|l| l == "(well-known) https://a.com/favicon.ico"));
        assert!(lines.iter().any(|l| l.starts_with("(well-known) [404]")));
    }
}
