//! IPFS gateway URL normalization
//!
//! Token metadata references images through a mix of `ipfs://` URIs, ipfs.io
//! gateway links, and plain HTTPS URLs. Everything IPFS-shaped is rewritten
//! to a single HTTPS gateway so the card grid shows one consistent host.

use crate::constants::{IPFS_IO_GATEWAY_PREFIX, IPFS_SCHEME_PREFIX, PINATA_GATEWAY_PREFIX};

/// Rewrites the two known IPFS URL forms to the pinned HTTPS gateway.
/// Any other URL passes through unchanged; no well-formedness checks.
pub fn sanitize_ipfs_url(url: &str) -> String {
    if let Some(path) = url.strip_prefix(IPFS_SCHEME_PREFIX) {
        return format!("{}{}", PINATA_GATEWAY_PREFIX, path);
    }
    if let Some(path) = url.strip_prefix(IPFS_IO_GATEWAY_PREFIX) {
        return format!("{}{}", PINATA_GATEWAY_PREFIX, path);
    }
    url.to_string()
}

/// Rewrites a normalized gateway URL to a local IPFS gateway, for
/// development setups running their own node. The `/ipfs` prefix is
/// stripped, matching the usual local gateway reverse-proxy layout.
pub fn rewrite_to_local_gateway(url: &str, gateway: &str) -> String {
    match url.strip_prefix(PINATA_GATEWAY_PREFIX) {
        Some(path) => format!("{}/{}", gateway.trim_end_matches('/'), path),
        None => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rewrites_ipfs_scheme() {
        assert_eq!(
            sanitize_ipfs_url("ipfs://abc"),
            "https://gateway.pinata.cloud/ipfs/abc"
        );
    }

    #[test]
    fn rewrites_ipfs_io_gateway() {
        assert_eq!(
            sanitize_ipfs_url("https://ipfs.io/ipfs/abc"),
            "https://gateway.pinata.cloud/ipfs/abc"
        );
    }

    #[test]
    fn passes_through_other_urls() {
        assert_eq!(
            sanitize_ipfs_url("https://example.com/x.png"),
            "https://example.com/x.png"
        );
        assert_eq!(sanitize_ipfs_url(""), "");
    }

    #[test]
    fn local_gateway_strips_ipfs_prefix() {
        assert_eq!(
            rewrite_to_local_gateway(
                "https://gateway.pinata.cloud/ipfs/abc",
                "http://127.0.0.1:8080/"
            ),
            "http://127.0.0.1:8080/abc"
        );
    }

    #[test]
    fn local_gateway_leaves_foreign_urls_alone() {
        assert_eq!(
            rewrite_to_local_gateway("https://example.com/x.png", "http://127.0.0.1:8080"),
            "https://example.com/x.png"
        );
    }
}
