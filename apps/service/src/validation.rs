//! Startup validation for registry entries.

use anyhow::{Result, anyhow};
use url::Url;

use crate::monitoring::types::Endpoint;

/// Validate one registry entry
pub fn validate_endpoint(endpoint: &Endpoint) -> Result<()> {
    if endpoint.provider.trim().is_empty() {
        return Err(anyhow!("provider name is empty"));
    }

    let url = Url::parse(&endpoint.url).map_err(|e| anyhow!("invalid URL: {}", e))?;

    match url.scheme() {
        "http" | "https" => {}
        other => return Err(anyhow!("invalid scheme for RPC endpoint: {}", other)),
    }

    if url.host_str().is_none() {
        return Err(anyhow!("URL has no host: {}", endpoint.url));
    }

    Ok(())
}

/// Drop invalid registry entries, warning about each one
pub fn retain_valid(endpoints: Vec<Endpoint>) -> Vec<Endpoint> {
    endpoints
        .into_iter()
        .filter(|endpoint| match validate_endpoint(endpoint) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    provider = %endpoint.provider,
                    url = %endpoint.url,
                    "skipping invalid registry entry: {e}"
                );
                false
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitoring::types::Network;

    fn endpoint(provider: &str, url: &str) -> Endpoint {
        Endpoint { provider: provider.to_string(), network: Network::Mainnet, url: url.to_string() }
    }

    #[test]
    fn test_validate_endpoint() {
        // Valid
        assert!(validate_endpoint(&endpoint("Helius", "https://mainnet.helius-rpc.com")).is_ok());
        assert!(validate_endpoint(&endpoint("Local", "http://rpc.example.com:8899")).is_ok());

        // Invalid - scheme
        assert!(validate_endpoint(&endpoint("Bad", "ws://rpc.example.com")).is_err());

        // Invalid - not a URL
        assert!(validate_endpoint(&endpoint("Bad", "not a url")).is_err());

        // Invalid - empty provider
        assert!(validate_endpoint(&endpoint("  ", "https://rpc.example.com")).is_err());
    }

    #[test]
    fn test_retain_valid_drops_bad_entries() {
        let endpoints = vec![
            endpoint("Good", "https://rpc.example.com"),
            endpoint("Bad", "ftp://rpc.example.com"),
        ];

        let kept = retain_valid(endpoints);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].provider, "Good");
    }
}
