use sha2::Digest as _;

use crate::assemble::params::QueryParams;

/// Hex digits kept from the SHA-256 of the cache key.
pub const ETAG_LEN: usize = 16;

/// Canonical identity of a sprite request.
///
/// Pairs are sorted by name, so parameter order never changes the key. Empty values stay in as
/// `name=`: `body=Body_color_light&hat=&sex=male`.
pub fn cache_key(params: &QueryParams) -> String {
    let mut pairs: Vec<(&str, &str)> = params.iter().collect();
    pairs.sort_by(|a, b| a.0.cmp(b.0));
    pairs
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// Unquoted entity tag for a cache key.
pub fn etag(cache_key: &str) -> String {
    let mut hex = sha256_hex(cache_key.as_bytes());
    hex.truncate(ETAG_LEN);
    hex
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{b:02x}"));
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/server/cache.rs"]
mod tests;
