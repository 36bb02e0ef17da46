use url::Url;

/// Joins `base` and `suffix` with exactly one `/` between them.
pub fn single_joining_slash(base: &str, suffix: &str) -> String {
    match (base.ends_with('/'), suffix.starts_with('/')) {
        (true, true) => format!("{base}{}", &suffix[1..]),
        (false, false) => format!("{base}/{suffix}"),
        _ => format!("{base}{suffix}"),
    }
}

/// Renders a URL without the root `/` the parser adds to an empty path.
///
/// `https://idp.example.com` parses to `https://idp.example.com/`; issuers and
/// referers are compared as text, so the original form is kept.
pub fn url_text(url: &Url) -> String {
    let raw = url.as_str();
    if url.path() == "/" && url.query().is_none() && url.fragment().is_none() {
        if let Some(trimmed) = raw.strip_suffix('/') {
            return trimmed.to_string();
        }
    }
    raw.to_string()
}
