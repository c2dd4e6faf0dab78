use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

/// `charset` in `<meta charset=..>` or `<meta http-equiv content="..; charset=..">`.
static META_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta\s[^>]*charset\s*=\s*["']?\s*([a-z0-9_:.\-]+)"#)
        .expect("charset pattern is valid")
});

/// How far into the document a `<meta>` charset is looked for.
const META_PREFIX_LEN: usize = 1024;

/// `charset` parameter of a `Content-Type` value.
pub fn charset_from_content_type(content_type: &str) -> Option<&str> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        if !name.trim().eq_ignore_ascii_case("charset") {
            return None;
        }
        let label = value.trim().trim_matches(['"', '\'']);
        (!label.is_empty()).then_some(label)
    })
}

/// Charset declared by a `<meta>` element near the start of the markup.
pub fn charset_from_meta(body: &[u8]) -> Option<String> {
    let prefix = String::from_utf8_lossy(&body[..body.len().min(META_PREFIX_LEN)]);
    META_CHARSET
        .captures(&prefix)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Decode markup to text.
///
/// A byte order mark wins, then the `Content-Type` charset, then a `<meta>`
/// declaration. Unknown or missing labels fall back to UTF-8.
pub fn decode_markup<'a>(body: &'a [u8], content_type: Option<&str>) -> Cow<'a, str> {
    let declared = content_type
        .and_then(charset_from_content_type)
        .map(str::to_string)
        .or_else(|| charset_from_meta(body));
    let encoding = declared
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .unwrap_or(UTF_8);
    // `decode` sniffs a BOM before using `encoding`.
    let (text, _, _) = encoding.decode(body);
    text
}
