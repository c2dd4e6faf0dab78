use url::Url;

use crate::constants::{MIME_ICO, MIME_JPEG, MIME_PNG, MIME_SVG};

/// Image types recognised by file extension.
const EXTENSION_MIME_TYPES: [(&str, &str); 11] = [
    (".png", MIME_PNG),
    (".jpg", MIME_JPEG),
    (".jpeg", MIME_JPEG),
    (".svg", MIME_SVG),
    (".ico", MIME_ICO),
    (".gif", "image/gif"),
    (".webp", "image/webp"),
    (".avif", "image/avif"),
    (".bmp", "image/bmp"),
    (".tif", "image/tiff"),
    (".tiff", "image/tiff"),
];

/// Path component of `url`, which may be absolute or root-relative.
fn url_path(url: &str) -> Option<String> {
    match Url::parse(url) {
        Ok(parsed) => Some(parsed.path().to_string()),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            url.split(['?', '#']).next().map(str::to_string)
        }
        Err(_) => None,
    }
}

/// Lowercased extension of the last path segment, including the dot.
pub fn file_ext(url: &str) -> String {
    let Some(path) = url_path(url) else {
        return String::new();
    };
    let name = path.rsplit('/').next().unwrap_or_default();
    match name.rfind('.') {
        Some(dot) if dot + 1 < name.len() => name[dot..].to_ascii_lowercase(),
        _ => String::new(),
    }
}

/// MIME type for an extension such as `.png`.
pub fn mime_type_for_ext(ext: &str) -> Option<&'static str> {
    EXTENSION_MIME_TYPES
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(ext))
        .map(|(_, mime)| *mime)
}

/// MIME type guessed from the extension in `url`'s path; empty when unknown.
pub fn mime_type_for_url(url: &str) -> String {
    mime_type_for_ext(&file_ext(url))
        .map(str::to_string)
        .unwrap_or_default()
}
