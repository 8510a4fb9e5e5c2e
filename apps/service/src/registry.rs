//! Static registry of the monitored RPC providers.
//!
//! Loaded once at startup; immutable for the process lifetime. A provider
//! may expose up to three network variants.

use crate::monitoring::types::{Endpoint, Network};

/// One RPC provider and its network-specific URLs
#[derive(Debug, Clone)]
pub struct Provider {
    pub name: &'static str,
    pub mainnet: Option<&'static str>,
    pub devnet: Option<&'static str>,
    pub testnet: Option<&'static str>,
    pub website: &'static str,
}

/// The monitored provider set
pub fn default_providers() -> Vec<Provider> {
    vec![
        Provider {
            name: "Solana Labs",
            mainnet: Some("https://api.mainnet-beta.solana.com"),
            devnet: Some("https://api.devnet.solana.com"),
            testnet: Some("https://api.testnet.solana.com"),
            website: "https://solana.com",
        },
        Provider {
            name: "Alchemy",
            mainnet: Some("https://solana-mainnet.g.alchemy.com/v2/demo"),
            devnet: Some("https://solana-devnet.g.alchemy.com/v2/demo"),
            testnet: None,
            website: "https://alchemy.com",
        },
        Provider {
            name: "QuickNode",
            mainnet: Some("https://api.mainnet-beta.solana.com"),
            devnet: Some("https://api.devnet.solana.com"),
            testnet: None,
            website: "https://quicknode.com",
        },
        Provider {
            name: "Helius",
            mainnet: Some("https://mainnet.helius-rpc.com"),
            devnet: Some("https://devnet.helius-rpc.com"),
            testnet: None,
            website: "https://helius.xyz",
        },
        Provider {
            name: "GenesysGo",
            mainnet: Some("https://ssc-dao.genesysgo.net"),
            devnet: Some("https://devnet.genesysgo.net"),
            testnet: None,
            website: "https://genesysgo.com",
        },
        Provider {
            name: "Ankr",
            mainnet: Some("https://rpc.ankr.com/solana"),
            devnet: Some("https://rpc.ankr.com/solana_devnet"),
            testnet: None,
            website: "https://ankr.com",
        },
        Provider {
            name: "Syndica",
            mainnet: Some("https://solana-api.syndica.io/access-token/YOUR_ACCESS_TOKEN/rpc"),
            devnet: Some("https://solana-devnet.syndica.io/access-token/YOUR_ACCESS_TOKEN/rpc"),
            testnet: None,
            website: "https://syndica.io",
        },
        Provider {
            name: "Triton",
            mainnet: Some("https://solana-mainnet-rpc.allthatnode.com"),
            devnet: Some("https://solana-devnet-rpc.allthatnode.com"),
            testnet: None,
            website: "https://triton.one",
        },
    ]
}

/// Flatten providers into the endpoint list, in declaration order
/// (mainnet, devnet, testnet per provider)
pub fn endpoints(providers: &[Provider]) -> Vec<Endpoint> {
    let mut endpoints = Vec::new();

    for provider in providers {
        let mut push = |network: Network, url: Option<&'static str>| {
            if let Some(url) = url {
                endpoints.push(Endpoint {
                    provider: provider.name.to_string(),
                    network,
                    url: url.to_string(),
                });
            }
        };

        push(Network::Mainnet, provider.mainnet);
        push(Network::Devnet, provider.devnet);
        push(Network::Testnet, provider.testnet);
    }

    endpoints
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flattening_preserves_declaration_order() {
        let providers = default_providers();
        let endpoints = endpoints(&providers);

        assert_eq!(endpoints[0].provider, "Solana Labs");
        assert_eq!(endpoints[0].network, Network::Mainnet);
        assert_eq!(endpoints[1].network, Network::Devnet);
        assert_eq!(endpoints[2].network, Network::Testnet);
        assert_eq!(endpoints[3].provider, "Alchemy");
    }

    #[test]
    fn test_missing_variants_are_skipped() {
        let providers = vec![Provider {
            name: "OnlyMainnet",
            mainnet: Some("https://rpc.example.com"),
            devnet: None,
            testnet: None,
            website: "https://example.com",
        }];

        let endpoints = endpoints(&providers);
        assert_eq!(endpoints.len(), 1);
        assert_eq!(endpoints[0].network, Network::Mainnet);
    }

    #[test]
    fn test_default_registry_size() {
        // 8 providers, all with mainnet+devnet, one with testnet
        assert_eq!(endpoints(&default_providers()).len(), 17);
    }
}
