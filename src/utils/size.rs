use regex::Regex;
use std::sync::LazyLock;

/// `WxH` tokens in a URL, e.g. `favicon-196x196.png`. Greedy digit runs keep
/// each side whole, so `1234567x8` is one token and never `34567x8`.
static URL_SIZE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)[xX×](\d+)").expect("size pattern is valid"));

/// Longest side accepted from a URL token.
const MAX_URL_SIDE_DIGITS: usize = 5;

/// Parse a single `WxH` size token. Zero-sized tokens count as unknown.
pub fn parse_size(token: &str) -> Option<(u32, u32)> {
    let token = token.trim().to_ascii_lowercase();
    let (w, h) = token.split_once('x')?;
    let width = w.parse::<u32>().ok()?;
    let height = h.parse::<u32>().ok()?;
    if width == 0 || height == 0 {
        return None;
    }
    Some((width, height))
}

/// Parse a space-delimited `sizes` attribute, keeping each distinct size once.
///
/// Tokens like `any` are skipped.
pub fn parse_sizes(sizes: &str) -> Vec<(u32, u32)> {
    let mut parsed = Vec::new();
    for size in sizes.split_whitespace().filter_map(parse_size) {
        if !parsed.contains(&size) {
            parsed.push(size);
        }
    }
    parsed
}

/// Dimensions embedded in a URL, used when markup declares none.
///
/// The first token with two non-zero sides of at most five digits wins.
pub fn size_from_url(url: &str) -> Option<(u32, u32)> {
    URL_SIZE.captures_iter(url).find_map(|caps| {
        let side = |i: usize| {
            let digits = caps.get(i)?.as_str();
            if digits.len() > MAX_URL_SIDE_DIGITS {
                return None;
            }
            digits.parse::<u32>().ok().filter(|n| *n > 0)
        };
        Some((side(1)?, side(2)?))
    })
}
