//! Decorative resolution of spender addresses to human-readable labels

use alloy_primitives::Address;
use async_trait::async_trait;
use common::types::{chain::Chain, registry::lookup_spender_app};
use util::hex::shorten_address;

/// A resolver mapping a spender address to a human-readable label
///
/// Purely decorative: implementations may consult reverse-name services or
/// static registries, a missing label is always tolerated, and a resolver
/// failure must never surface into the allowance flow
#[async_trait]
pub trait SpenderResolver: Send + Sync {
    /// Resolve a label for the given spender, if one is known
    async fn resolve(&self, spender: Address) -> Option<String>;
}

/// A resolver backed by the process-global known-application registry
#[derive(Copy, Clone, Debug)]
pub struct RegistryResolver {
    /// The chain whose registry entries apply
    chain: Chain,
}

impl RegistryResolver {
    /// Construct a resolver for the given chain
    pub fn new(chain: Chain) -> Self {
        Self { chain }
    }
}

#[async_trait]
impl SpenderResolver for RegistryResolver {
    async fn resolve(&self, spender: Address) -> Option<String> {
        lookup_spender_app(self.chain, &spender)
    }
}

/// The display label for a spender: its resolved name where one exists, the
/// shortened address form otherwise
pub fn display_spender(spender: &Address, resolved: Option<String>) -> String {
    resolved.unwrap_or_else(|| shorten_address(spender))
}
