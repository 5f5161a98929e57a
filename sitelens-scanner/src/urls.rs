use url::Url;

/// Resolves `href` against `base`, skipping non-navigable schemes and bare fragments.
/// The fragment of the resolved URL is stripped.
pub fn resolve_link(base: &str, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty()
        || href.starts_with('#')
        || href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    let base_url = Url::parse(base).ok()?;
    let mut resolved = base_url.join(href).ok()?;
    resolved.set_fragment(None);

    Some(resolved.to_string())
}

/// The authority (`host[:port]`) of a URL, or an empty string if it has none.
pub fn domain_of(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| {
            u.host_str().map(|host| match u.port() {
                Some(port) => format!("{}:{}", host, port),
                None => host.to_string(),
            })
        })
        .unwrap_or_default()
}

/// Substring containment between a domain string and a link. Not public-suffix aware:
/// `a.test` also matches `https://other.test/?ref=a.test`.
pub fn is_same_domain(domain: &str, link: &str) -> bool {
    !domain.is_empty() && link.contains(domain)
}
