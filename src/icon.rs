use serde::{Deserialize, Serialize};
use std::fmt;

/// An icon found in markup, a manifest or at a well-known path.
///
/// Extractors create bare candidates; the finder fills in the remaining
/// metadata. Icons returned by a [`Finder`](crate::Finder) always have a
/// non-empty `url` and `mime_type`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Icon {
    pub url: String,
    #[serde(rename = "mimetype")]
    pub mime_type: String,
    /// File extension including the dot; may be empty.
    #[serde(rename = "extension")]
    pub file_ext: String,
    /// Declared or inferred dimensions; 0 means unknown.
    pub width: u32,
    pub height: u32,
    /// Digest of URL and dimensions identifying this icon.
    pub hash: String,
}

impl Icon {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = mime_type.into();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Equal sides. Icons of unknown size (0x0) count as square.
    pub fn is_square(&self) -> bool {
        self.width == self.height
    }

    pub fn has_known_size(&self) -> bool {
        self.width != 0 && self.height != 0
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {}x{})",
            self.url, self.mime_type, self.width, self.height
        )
    }
}
