//! The definition of the allowance client, which holds the configuration
//! details, along with a lower-level handle for the token contract

use std::{str::FromStr, time::Duration};

use alloy::{
    providers::{
        DynProvider, Provider, ProviderBuilder,
        fillers::{BlobGasFiller, ChainIdFiller, GasFiller},
    },
    signers::local::PrivateKeySigner,
    transports::http::reqwest::Url,
};
use alloy_contract::{CallBuilder, Event};
use alloy_primitives::{Address, BlockNumber, ChainId};
use alloy_sol_types::SolEvent;
use common::types::chain::Chain;
use util::err_str;

use crate::{
    errors::{AllowanceClientConfigError, AllowanceClientError},
    traits::TokenContract,
};

mod contract_interaction;
mod event_indexing;

pub use event_indexing::{collect_effective_allowances, collect_effective_erc721_allowances};

/// A type alias for the RPC client, which is an alloy middleware stack that
/// includes an optional signer derived from a raw private key, and a
/// provider that connects to the RPC endpoint over HTTP.
pub type AllowanceProvider = DynProvider;
/// A token approval call builder type
pub type TokenCallBuilder<'a, C> = CallBuilder<&'a DynProvider, C>;

/// A configuration struct for the allowance client, consists of the token
/// contract address, an endpoint for setting up an RPC client, and an
/// optional private key for signing transactions.
pub struct AllowanceClientConfig {
    /// The address of the token contract under inspection.
    ///
    /// Every event query and approval call the client makes targets this
    /// contract.
    pub token_addr: String,
    /// Which chain the client should interact with,
    /// e.g. mainnet, sepolia, etc.
    pub chain: Chain,
    /// HTTP-addressable RPC endpoint for the client to connect to
    pub rpc_url: String,
    /// The private key of the holder's account, if one is connected
    ///
    /// Absent for read-only sessions; mutating calls then fail fast with
    /// `NoSigner` before reaching the network
    pub signing_key: Option<PrivateKeySigner>,
    /// The interval at which to poll for event filters and pending
    /// transactions
    pub block_polling_interval: Duration,
    /// The block from which to scan the token's approval log
    ///
    /// Typically the token's deploy block; earlier is correct but slower
    pub start_block: BlockNumber,
}

impl AllowanceClientConfig {
    /// Constructs an RPC client from the configuration, signing-capable when
    /// a key is present
    fn get_provider(&self) -> Result<AllowanceProvider, AllowanceClientConfigError> {
        let url = Url::parse(&self.rpc_url)
            .map_err(err_str!(AllowanceClientConfigError::RpcClientInitialization))?;
        let builder = ProviderBuilder::new()
            .disable_recommended_fillers()
            .with_simple_nonce_management()
            .filler(ChainIdFiller::default())
            .filler(GasFiller)
            .filler(BlobGasFiller);

        let provider = match self.signing_key.clone() {
            Some(key) => DynProvider::new(builder.wallet(key).connect_http(url)),
            None => DynProvider::new(builder.connect_http(url)),
        };
        provider.client().set_poll_interval(self.block_polling_interval);

        Ok(provider)
    }

    /// Parses the token contract address from the configuration,
    /// returning an [`alloy_primitives::Address`]
    fn get_token_address(&self) -> Result<Address, AllowanceClientConfigError> {
        Address::from_str(&self.token_addr)
            .map_err(|e| AllowanceClientConfigError::AddressParsing(e.to_string()))
    }
}

/// The allowance client, which provides a higher-level interface to a token
/// contract's approval surface.
#[derive(Clone)]
pub struct AllowanceClientInner<T: TokenContract> {
    /// The token contract instance
    token: T,
    /// The chain environment the client operates in
    chain: Chain,
    /// The address of the connected signing identity, if any
    signer_address: Option<Address>,
    /// The block from which to scan the token's approval log
    start_block: BlockNumber,
}

impl<T: TokenContract> AllowanceClientInner<T> {
    /// Constructs a new allowance client from the given configuration
    #[allow(clippy::needless_pass_by_value)]
    pub fn new(config: AllowanceClientConfig) -> Result<Self, AllowanceClientError> {
        let token_address = config.get_token_address()?;
        let signer_address = config.signing_key.as_ref().map(|key| key.address());
        let provider = config.get_provider()?;
        let token = T::new(token_address, provider);

        Ok(Self { token, chain: config.chain, signer_address, start_block: config.start_block })
    }

    /// Get the token contract handle
    pub fn token(&self) -> &T {
        &self.token
    }

    /// Get an alloy address for the token contract
    pub fn token_addr(&self) -> Address {
        self.token.address()
    }

    /// Get a reference to some underlying RPC client
    pub fn provider(&self) -> &AllowanceProvider {
        self.token.provider()
    }

    /// Get the chain environment the client operates in
    pub fn chain(&self) -> Chain {
        self.chain
    }

    /// Get the connected signing identity, or `NoSigner` for a read-only
    /// client
    pub fn signer_address(&self) -> Result<Address, AllowanceClientError> {
        self.signer_address.ok_or(AllowanceClientError::NoSigner)
    }

    /// Get the chain ID
    pub async fn chain_id(&self) -> Result<ChainId, AllowanceClientError> {
        self.provider().get_chain_id().await.map_err(err_str!(AllowanceClientError::Rpc))
    }

    /// Get the current block number
    pub async fn block_number(&self) -> Result<BlockNumber, AllowanceClientError> {
        self.provider().get_block_number().await.map_err(err_str!(AllowanceClientError::Rpc))
    }

    /// Create an event filter over the token contract
    pub fn event_filter<E: SolEvent>(&self) -> Event<&AllowanceProvider, E> {
        let provider = self.provider();
        let address = self.token_addr();
        Event::new_sol(provider, &address)
    }
}
