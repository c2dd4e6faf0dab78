use url::Url;

/// Resolve a possibly-relative reference against `base`.
///
/// Empty input stays empty, and without a base the input is returned untouched.
/// A reference that cannot be parsed yields an empty string, which later drops
/// the candidate.
pub fn resolve_url(reference: &str, base: Option<&Url>) -> String {
    let reference = reference.trim();
    if reference.is_empty() {
        return String::new();
    }
    let Some(base) = base else {
        return reference.to_string();
    };
    match base.join(reference) {
        Ok(resolved) => resolved.to_string(),
        Err(_) => String::new(),
    }
}

/// `scheme://host[:port]/` for `base`, or `None` when it has no host.
pub fn site_root(base: &Url) -> Option<String> {
    let host = base.host_str().filter(|h| !h.is_empty())?;
    Some(match base.port() {
        Some(port) => format!("{}://{}:{}/", base.scheme(), host, port),
        None => format!("{}://{}/", base.scheme(), host),
    })
}

/// Normalize URL by adding the appropriate scheme if missing
pub fn normalize_url_scheme(url_str: &str) -> String {
    let trimmed_url = url_str.trim();
    if trimmed_url.starts_with("http://") || trimmed_url.starts_with("https://") {
        return trimmed_url.to_string();
    }

    if let Some(colon_pos) = trimmed_url.rfind(':')
        && let Some(port_str) = trimmed_url.get(colon_pos + 1..)
    {
        let port_str = port_str.split('/').next().unwrap_or_default();
        if !port_str.is_empty() && port_str.chars().all(|c| c.is_ascii_digit()) {
            if port_str == "80" {
                return format!("http://{}", trimmed_url);
            }
            return format!("https://{}", trimmed_url);
        }
    }

    format!("https://{}", trimmed_url)
}
