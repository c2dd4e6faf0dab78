use scraper::{Html, Selector};
use url::Url;

use crate::constants::{BASE_SELECTOR, ICON_RELATIONS, LINK_SELECTOR, META_SELECTOR};
use crate::extract::push_sized;
use crate::icon::Icon;
use crate::utils::{parse_sizes, resolve_url};

/// What the markup of a page says about its icons.
#[derive(Debug, Default)]
pub struct MarkupIcons {
    /// Candidates in document order, URLs as written in the markup.
    pub icons: Vec<Icon>,
    /// `href` of the first `<link rel="manifest">`, unresolved.
    pub manifest: Option<String>,
    /// Base for resolving the markup's URLs: the document URL, re-based by
    /// `<base href>` when present.
    pub base_url: Option<Url>,
}

fn selector(css: &str) -> Option<Selector> {
    Selector::parse(css).ok()
}

/// Scan `<link>` and `<meta>` elements for icons and a manifest reference.
///
/// Pages without any of these produce an empty result.
pub fn parse_markup(markup: &str, document_url: Option<&Url>) -> MarkupIcons {
    let document = Html::parse_document(markup);
    let mut found = MarkupIcons {
        base_url: document_url.cloned(),
        ..MarkupIcons::default()
    };

    if let Some(sel) = selector(BASE_SELECTOR)
        && let Some(href) = document.select(&sel).next().and_then(|b| b.value().attr("href"))
        && let Ok(base) = Url::parse(&resolve_url(href, document_url))
    {
        found.base_url = Some(base);
    }

    if let Some(sel) = selector(LINK_SELECTOR) {
        for link in document.select(&sel) {
            let el = link.value();
            let href = el.attr("href").unwrap_or_default().trim();
            if href.is_empty() {
                continue;
            }
            let rel = el.attr("rel").unwrap_or_default().to_ascii_lowercase();
            let rels: Vec<&str> = rel.split_whitespace().collect();

            if rels.contains(&"manifest") {
                if found.manifest.is_none() {
                    found.manifest = Some(href.to_string());
                }
                continue;
            }
            if !rels.iter().any(|r| ICON_RELATIONS.contains(r)) {
                continue;
            }

            let mime_type = el.attr("type").unwrap_or_default().trim();
            let sizes = el.attr("sizes").map(parse_sizes).unwrap_or_default();
            push_sized(&mut found.icons, href, mime_type, &sizes);
        }
    }

    if let Some(sel) = selector(META_SELECTOR) {
        // Index of the og:image that og:image:* properties refer to.
        let mut og_image: Option<usize> = None;

        for meta in document.select(&sel) {
            let el = meta.value();
            let key = el
                .attr("property")
                .or_else(|| el.attr("name"))
                .unwrap_or_default()
                .trim()
                .to_ascii_lowercase();
            let content = el.attr("content").unwrap_or_default().trim();
            if content.is_empty() {
                continue;
            }

            match key.as_str() {
                "og:image" | "og:image:url" => {
                    og_image = Some(found.icons.len());
                    found.icons.push(Icon::new(content));
                }
                "og:image:width" | "og:image:height" | "og:image:type" => {
                    let Some(icon) = og_image.and_then(|i| found.icons.get_mut(i)) else {
                        continue;
                    };
                    match key.as_str() {
                        "og:image:type" => icon.mime_type = content.to_string(),
                        "og:image:width" => icon.width = content.parse().unwrap_or(0),
                        _ => icon.height = content.parse().unwrap_or(0),
                    }
                }
                "twitter:image" | "twitter:image:src" => {
                    found.icons.push(Icon::new(content));
                }
                _ => {}
            }
        }
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_icons() {
        let html = r#"
            <html><head>
            <link rel="icon" sizes="32x32" href="/i.png">
            <link rel="shortcut icon" href="/favicon.ico" type="image/x-icon">
            <link rel="apple-touch-icon" href="/apple.png" sizes="180x180">
            <link rel="stylesheet" href="/style.css">
            </head></html>
        "#;
        let found = parse_markup(html, None);
        let urls: Vec<&str> = found.icons.iter().map(|i| i.url.as_str()).collect();
        assert_eq!(urls, vec!["/i.png", "/favicon.ico", "/apple.png"]);
        assert_eq!((found.icons[0].width, found.icons[0].height), (32, 32));
        assert_eq!(found.icons[1].mime_type, "image/x-icon");
        assert_eq!(found.icons[2].width, 180);
        assert!(found.manifest.is_none());
    }

    #[test]
    fn test_multiple_sizes_expand() {
        let html = r#"<link rel="icon" sizes="16x16 24x24 48x48" href="/multi.ico">"#;
        let found = parse_markup(html, None);
        let sizes: Vec<(u32, u32)> = found.icons.iter().map(|i| (i.width, i.height)).collect();
        assert_eq!(sizes, vec![(16, 16), (24, 24), (48, 48)]);
        assert!(found.icons.iter().all(|i| i.url == "/multi.ico"));
    }

    #[test]
    fn test_manifest_reference() {
        let html = r#"
            <link rel="manifest" href="/site.webmanifest">
            <link rel="manifest" href="/other.json">
        "#;
        let found = parse_markup(html, None);
        assert_eq!(found.manifest.as_deref(), Some("/site.webmanifest"));
        assert!(found.icons.is_empty());
    }

    #[test]
    fn test_open_graph_and_twitter() {
        let html = r#"
            <meta property="og:image" content="https://a.com/og.png">
            <meta property="og:image:width" content="1200">
            <meta property="og:image:height" content="630">
            <meta property="og:image:type" content="image/png">
            <meta name="twitter:image" content="https://a.com/card.jpg">
            <meta name="description" content="not an image">
        "#;
        let found = parse_markup(html, None);
        assert_eq!(found.icons.len(), 2);
        let og = &found.icons[0];
        assert_eq!(og.url, "https://a.com/og.png");
        assert_eq!((og.width, og.height), (1200, 630));
        assert_eq!(og.mime_type, "image/png");
        assert_eq!(found.icons[1].url, "https://a.com/card.jpg");
    }

    #[test]
    fn test_base_href() {
        let doc = Url::parse("https://a.com/blog/post.html").unwrap();
        let found = parse_markup(r#"<base href="/static/">"#, Some(&doc));
        assert_eq!(
            found.base_url.map(|u| u.to_string()).as_deref(),
            Some("https://a.com/static/")
        );

        let found = parse_markup("<p>hi</p>", Some(&doc));
        assert_eq!(found.base_url, Some(doc));
    }

    #[test]
    fn test_no_icons() {
        let found = parse_markup("<html><body><h1>Hello</h1></body></html>", None);
        assert!(found.icons.is_empty());
        assert!(found.manifest.is_none());
        assert!(found.base_url.is_none());
    }
}
