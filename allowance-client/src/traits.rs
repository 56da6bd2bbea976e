//! Trait definitions for the allowance client

use std::time::Duration;

use alloy::providers::Provider;
use alloy::rpc::types::TransactionReceipt;
use alloy_contract::CallDecoder;
use alloy_primitives::{Address, U256};
use alloy_sol_types::SolEvent;
use async_trait::async_trait;
use tracing::info;

use crate::client::{AllowanceProvider, TokenCallBuilder};
use crate::errors::{classify_receipt_error, classify_submission_error, AllowanceClientError};

// -------------
// | Constants |
// -------------

/// The timeout for awaiting the receipt of a pending transaction
///
/// Expiry is classified as a timeout and surfaced like a rejection
const TX_RECEIPT_TIMEOUT: Duration = Duration::from_secs(15);

/// The multiple of the gas price estimate we use for submitting a transaction
const GAS_PRICE_MULTIPLIER: u128 = 2;

/// The `TokenContract` trait defines the contract-handle plumbing shared by
/// every token standard the client drives
pub trait TokenContract: Clone {
    /// Create a new token contract handle
    fn new(token_addr: Address, provider: AllowanceProvider) -> Self;

    /// Get the address of the token contract
    fn address(&self) -> Address;

    /// Get a reference to the provider
    fn provider(&self) -> &AllowanceProvider;
}

/// A trait defining useful methods automatically implemented for all token
/// contract handles
#[async_trait]
pub trait TokenContractExt: TokenContract {
    // ----------------
    // | Transactions |
    // ----------------

    /// Send an approval-style txn, awaiting its confirmation and returning
    /// the receipt
    ///
    /// Failures are classified here, at the mutation boundary: the
    /// recognized non-standard-approval rejection surfaces as its own error
    /// kind, a confirmation wait past the timeout surfaces as a timeout,
    /// and everything else is a plain rejection
    async fn send_tx<'a, C>(
        &self,
        tx: TokenCallBuilder<'a, C>,
    ) -> Result<TransactionReceipt, AllowanceClientError>
    where
        C: CallDecoder + Send + Sync,
    {
        let gas_price = self.get_adjusted_gas_price().await?;
        let pending_tx =
            tx.gas_price(gas_price).send().await.map_err(classify_submission_error)?;

        info!("Pending approval tx hash: {:#x}", pending_tx.tx_hash());
        let receipt = pending_tx
            .with_timeout(Some(TX_RECEIPT_TIMEOUT))
            .get_receipt()
            .await
            .map_err(classify_receipt_error)?;

        // Check for failure
        if !receipt.status() {
            let error_msg = format!("tx ({:#x}) failed with status 0", receipt.transaction_hash);
            return Err(AllowanceClientError::tx_rejected(error_msg));
        }

        Ok(receipt)
    }

    /// Get the adjusted gas price for submitting a transaction
    ///
    /// We double the latest gas price estimate to prevent reverts
    async fn get_adjusted_gas_price(&self) -> Result<u128, AllowanceClientError> {
        let gas_price = self.provider().get_gas_price().await.map_err(AllowanceClientError::rpc)?;
        let adjusted_gas_price = gas_price * GAS_PRICE_MULTIPLIER;
        Ok(adjusted_gas_price)
    }
}
impl<T: TokenContract> TokenContractExt for T {}

// ----------------
// | Event Traits |
// ----------------

/// A trait for the ERC20 `Approval` event
pub trait ApprovalEventData: SolEvent {
    /// The owner granting the allowance
    fn owner(&self) -> Address;
    /// The spender receiving the allowance
    fn spender(&self) -> Address;
    /// The granted amount
    fn amount(&self) -> U256;
}

/// A trait for the ERC721 single-token `Approval` event
pub trait Erc721ApprovalEventData: SolEvent {
    /// The owner of the approved token
    fn owner(&self) -> Address;
    /// The approved address; the zero address clears the grant
    fn approved(&self) -> Address;
    /// The token the approval covers
    fn token_id(&self) -> U256;
}

/// A trait for the ERC721 `ApprovalForAll` event
pub trait ApprovalForAllEventData: SolEvent {
    /// The owner granting or revoking the operator
    fn owner(&self) -> Address;
    /// The operator the grant covers
    fn operator(&self) -> Address;
    /// Whether the operator is granted or revoked
    fn approved(&self) -> bool;
}
