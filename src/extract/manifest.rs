use serde::Deserialize;
use url::Url;

use crate::extract::push_sized;
use crate::icon::Icon;
use crate::utils::{parse_sizes, resolve_url};

// Members may be missing or `null`; either leaves them unset.
#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(default)]
    icons: Option<Vec<ManifestIcon>>,
}

#[derive(Debug, Deserialize)]
struct ManifestIcon {
    #[serde(default)]
    src: Option<String>,
    #[serde(default)]
    sizes: Option<String>,
    #[serde(default, rename = "type")]
    mime_type: Option<String>,
}

/// Icons listed in a web app manifest, one per declared size.
///
/// `src` values are resolved against the manifest's own URL when known.
pub fn parse_manifest(body: &[u8], manifest_url: Option<&Url>) -> serde_json::Result<Vec<Icon>> {
    let manifest: Manifest = serde_json::from_slice(body)?;

    let mut icons = Vec::new();
    for entry in manifest.icons.unwrap_or_default() {
        let src = resolve_url(entry.src.as_deref().unwrap_or_default(), manifest_url);
        if src.is_empty() {
            continue;
        }
        push_sized(
            &mut icons,
            &src,
            entry.mime_type.as_deref().unwrap_or_default().trim(),
            &parse_sizes(entry.sizes.as_deref().unwrap_or_default()),
        );
    }
    Ok(icons)
}
