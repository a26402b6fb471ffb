//! Wire encoding for bulk request bodies.
//!
//! The bulk-delete endpoint takes a plain-text body of percent-escaped
//! paths joined by single newlines. Escaping follows the service's
//! URL-fragment rules: characters valid in a fragment pass through
//! (notably `/`, so `container/object` stays readable), everything else
//! is escaped as `%XX` per UTF-8 byte. A literal newline in a path is
//! escaped like any other unsafe byte, so batch framing cannot be
//! corrupted by path content.

/// Bytes the service accepts unescaped in a bulk path entry.
///
/// Unreserved characters plus the fragment sub-delimiters, `:`, `@`,
/// `/` and `?`. The service treats `&` as unsafe despite RFC 3986
/// allowing it in fragments.
fn is_fragment_safe(byte: u8) -> bool {
    matches!(byte,
        b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-' | b'.' | b'_' | b'~'
            | b'!' | b'$' | b'\'' | b'(' | b')' | b'*' | b'+' | b',' | b';' | b'='
            | b':' | b'@' | b'/' | b'?')
}

fn percent_escape(input: &str, is_safe: fn(u8) -> bool) -> String {
    let mut escaped = String::with_capacity(input.len());
    for byte in input.bytes() {
        if is_safe(byte) {
            escaped.push(byte as char);
        } else {
            escaped.push_str(&format!("%{byte:02X}"));
        }
    }
    escaped
}

/// Escapes a single container or object path for a bulk-delete body.
pub fn escape_url_fragment(path: &str) -> String {
    percent_escape(path, is_fragment_safe)
}

/// Escapes a caller-supplied prefix for embedding in a request path.
///
/// Same safe set as [`escape_url_fragment`] minus `?`, which would start
/// the query string early. `/` is preserved so multi-segment prefixes
/// keep their shape.
pub fn escape_url_path(path: &str) -> String {
    percent_escape(path, |byte| byte != b'?' && is_fragment_safe(byte))
}

/// Encodes an ordered path list into the bulk-delete wire body.
///
/// Each path is escaped with [`escape_url_fragment`] and the results are
/// joined with single `\n` separators. No trailing newline, no
/// reordering, no deduplication, no trimming. An empty list produces an
/// empty body; a single path produces no separator.
pub fn encode_paths<I, S>(paths: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let escaped: Vec<String> = paths
        .into_iter()
        .map(|path| escape_url_fragment(path.as_ref()))
        .collect();
    escaped.join("\n")
}
