//! Provides a client for inspecting and revoking the spending allowances
//! granted over a token holder's ERC20 and ERC721 assets.
//!
//! This contains abstractions for handling configuration details like the
//! RPC endpoint and token address; reconstructing the effective allowance
//! set from a contract's historical approval log; and driving the
//! approve/revoke transaction flow, including recognition of non-standard
//! approval behavior and classification of submission failures.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]

pub mod abi;
pub mod client;
pub mod erc20;
pub mod erc721;
pub mod errors;
pub mod resolution;
pub mod traits;

/// The allowance client over an ERC20 token contract
pub type Erc20AllowanceClient = client::AllowanceClientInner<erc20::Erc20Contract>;
/// The allowance client over an ERC721 collection
pub type Erc721AllowanceClient = client::AllowanceClientInner<erc721::Erc721Contract>;
