//! URL helpers.

/// Keeps the scheme and host of `url` and hides everything after it.
///
/// Provider endpoints carry API keys in their path or query, so they are
/// passed through this before being logged.
///
/// - `https://rpc.helius.xyz/?api-key=abc` → `https://rpc.helius.xyz/***`
/// - `http://localhost:8899` → `http://localhost:8899`
/// - `not-a-url` → `***`
pub fn mask_url(url: &str) -> String {
    let Some(scheme_end) = url.find("://") else {
        return "***".to_string();
    };

    let host_start = scheme_end + 3;
    let host_end = url[host_start..]
        .find(['/', '?'])
        .map(|offset| host_start + offset)
        .unwrap_or(url.len());

    let (origin, rest) = url.split_at(host_end);
    if rest.is_empty() || rest == "/" {
        url.to_string()
    } else {
        format!("{origin}/***")
    }
}
