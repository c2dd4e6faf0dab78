pub mod charset;
pub mod hash;
pub mod mime;
pub mod size;
pub mod url;

pub use charset::decode_markup;
pub use hash::icon_hash;
pub use mime::{file_ext, mime_type_for_ext, mime_type_for_url};
pub use size::{parse_size, parse_sizes, size_from_url};
pub use url::{normalize_url_scheme, resolve_url, site_root};
