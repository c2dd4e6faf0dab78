use std::cmp::Ordering;

use crate::constants::{MIME_ICO, MIME_ICO_MS, MIME_JPEG, MIME_PNG, MIME_SVG};
use crate::icon::Icon;

/// Format preference; higher is better.
pub fn format_rank(mime_type: &str) -> u8 {
    match mime_type {
        MIME_PNG => 10,
        MIME_JPEG => 9,
        MIME_SVG | "image/svg" => 8,
        MIME_ICO | MIME_ICO_MS => 7,
        _ => 0,
    }
}

/// Total order for results: widest first, then PNG > JPEG > SVG > ICO > other,
/// then URL ascending.
pub fn compare_icons(a: &Icon, b: &Icon) -> Ordering {
    b.width
        .cmp(&a.width)
        .then_with(|| format_rank(&b.mime_type).cmp(&format_rank(&a.mime_type)))
        .then_with(|| a.url.cmp(&b.url))
}

/// Sort icons in place. The sort is stable.
pub fn sort_icons(icons: &mut [Icon]) {
    icons.sort_by(compare_icons);
}
