//! A process-global registry of known spender applications
//!
//! Maps spender contract addresses to the human-readable name of the
//! application they belong to, keyed per chain. Purely decorative: lookups
//! that miss fall back to a shortened address form at the display layer.

use std::{
    collections::HashMap,
    sync::OnceLock,
};

use alloy_primitives::Address;

use crate::types::chain::Chain;

/// The known-application registry for the process, maps a spender contract
/// address to its application name per chain
///
/// Initialized once at startup from whatever dapp listing the host ships
pub static SPENDER_REMAPS: OnceLock<HashMap<Chain, HashMap<Address, String>>> = OnceLock::new();

/// Install the known-spender registry
///
/// Errors if the registry was already initialized
pub fn set_spender_remaps(
    remaps: HashMap<Chain, HashMap<Address, String>>,
) -> Result<(), String> {
    SPENDER_REMAPS.set(remaps).map_err(|_| "spender registry already initialized".to_string())
}

/// Look up the application name of a spender on the given chain, if known
pub fn lookup_spender_app(chain: Chain, spender: &Address) -> Option<String> {
    SPENDER_REMAPS.get()?.get(&chain)?.get(spender).cloned()
}
