use sha2::{Digest, Sha256};

/// Identity of an icon: SHA-256 hex digest of `"<url>-<width>x<height>"`.
pub fn icon_hash(url: &str, width: u32, height: u32) -> String {
    let mut hasher = Sha256::new();
    hasher.update(format!("{}-{}x{}", url, width, height).as_bytes());
    format!("{:x}", hasher.finalize())
}
