use url::Url;

/// Strips one layer of wrapping double quotes, the way `^"(.*)"$` would.
///
/// The inner text must not contain a line terminator, otherwise the value is
/// returned untouched.
pub fn strip_wrapping_quotes(value: &str) -> &str {
    match value
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    {
        Some(inner) if !inner.contains(['\n', '\r', '\u{2028}', '\u{2029}']) => inner,
        _ => value,
    }
}

/// Reads a query parameter from `url`.
///
/// Absent parameters read as the empty string. Percent and `+` decoding is
/// done by the URL layer; the only extra step is quote stripping.
pub fn read_param(url: &Url, name: &str) -> String {
    url.query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| strip_wrapping_quotes(&value).to_string())
        .unwrap_or_default()
}

/// Returns `url` with `name` set to `value`, or removed when `value` is
/// empty or all whitespace.
///
/// Setting keeps the position of the first existing occurrence and drops any
/// later duplicates; a new parameter is appended. Other parameters keep their
/// order.
pub fn write_param(url: &Url, name: &str, value: &str) -> Url {
    let replacement = (!value.trim().is_empty()).then_some(value);
    let mut pairs: Vec<(String, String)> = Vec::new();
    let mut placed = false;
    for (key, existing) in url.query_pairs() {
        if key != name {
            pairs.push((key.into_owned(), existing.into_owned()));
            continue;
        }
        if let (Some(new_value), false) = (replacement, placed) {
            pairs.push((key.into_owned(), new_value.to_string()));
            placed = true;
        }
    }
    if let (Some(new_value), false) = (replacement, placed) {
        pairs.push((name.to_string(), new_value.to_string()));
    }

    let mut next = url.clone();
    if pairs.is_empty() {
        next.set_query(None);
    } else {
        next.query_pairs_mut().clear().extend_pairs(pairs);
    }
    next
}
