/// HTTP constants
pub const DEFAULT_REDIRECT_LIMIT: usize = 10;
pub const USER_AGENT: &str = concat!("favicon-finder/", env!("CARGO_PKG_VERSION"));

/// Files conventionally hosted in a server root, tried in this order.
pub const WELL_KNOWN_ICONS: [&str; 2] = ["favicon.ico", "apple-touch-icon.png"];

/// Manifest location tried when the markup does not link one.
pub const DEFAULT_MANIFEST_PATH: &str = "manifest.json";

/// `rel` tokens that mark a `<link>` as an icon.
pub const ICON_RELATIONS: [&str; 5] = [
    "icon",
    "apple-touch-icon",
    "apple-touch-icon-precomposed",
    "fluid-icon",
    "mask-icon",
];

/// HTML parsing constants
pub const BASE_SELECTOR: &str = "base[href]";
pub const LINK_SELECTOR: &str = "link[rel][href]";
pub const META_SELECTOR: &str = "meta[content]";

/// MIME types
pub const MIME_PNG: &str = "image/png";
pub const MIME_JPEG: &str = "image/jpeg";
pub const MIME_SVG: &str = "image/svg+xml";
pub const MIME_ICO: &str = "image/x-icon";
pub const MIME_ICO_MS: &str = "image/vnd.microsoft.icon";
