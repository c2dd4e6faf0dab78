pub mod html;
pub mod manifest;
pub mod well_known;

pub use html::{MarkupIcons, parse_markup};
pub use manifest::parse_manifest;
pub use well_known::fetch_well_known;

use crate::icon::Icon;

/// Push one candidate per size, or a single unsized one.
pub(crate) fn push_sized(icons: &mut Vec<Icon>, url: &str, mime_type: &str, sizes: &[(u32, u32)]) {
    if sizes.is_empty() {
        icons.push(Icon::new(url).with_mime_type(mime_type));
        return;
    }
    for &(width, height) in sizes {
        icons.push(Icon::new(url).with_mime_type(mime_type).with_size(width, height));
    }
}
