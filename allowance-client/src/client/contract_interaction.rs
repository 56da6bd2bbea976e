//! Defines `AllowanceClient` helpers that allow for interacting with the
//! token contract: metadata reads and the approve/revoke mutation flow

use alloy_primitives::{Address, U256};
use common::types::allowance::{Erc721MutationOutcome, MutationOutcome};
use common::types::token::{parse_amount, TokenInfo};
use tracing::{info, instrument};

use crate::erc20::Erc20Contract;
use crate::erc721::Erc721Contract;
use crate::errors::AllowanceClientError;
use crate::traits::TokenContractExt;

use super::AllowanceClientInner;

impl AllowanceClientInner<Erc20Contract> {
    // -----------
    // | GETTERS |
    // -----------

    /// Read the token's static metadata
    #[instrument(skip_all, err)]
    pub async fn token_info(&self) -> Result<TokenInfo, AllowanceClientError> {
        let token = self.token().instance();
        let symbol = token
            .symbol()
            .call()
            .await
            .map_err(AllowanceClientError::contract_interaction)?;
        let decimals = token
            .decimals()
            .call()
            .await
            .map_err(AllowanceClientError::contract_interaction)?;
        let total_supply = token
            .totalSupply()
            .call()
            .await
            .map_err(AllowanceClientError::contract_interaction)?;

        Ok(TokenInfo::new(self.token_addr(), symbol, decimals, total_supply))
    }

    /// Get the owner's balance of the token
    #[instrument(skip_all, err, fields(owner = %owner))]
    pub async fn balance_of(&self, owner: Address) -> Result<U256, AllowanceClientError> {
        self.token()
            .instance()
            .balanceOf(owner)
            .call()
            .await
            .map_err(AllowanceClientError::contract_interaction)
    }

    /// Get the contract's current view of a single (owner, spender)
    /// allowance
    ///
    /// The event-derived projection is authoritative for display; this read
    /// lets callers reconcile it against ground truth on a full reload
    #[instrument(skip_all, err, fields(owner = %owner, spender = %spender))]
    pub async fn current_allowance(
        &self,
        owner: Address,
        spender: Address,
    ) -> Result<U256, AllowanceClientError> {
        self.token()
            .instance()
            .allowance(owner, spender)
            .call()
            .await
            .map_err(AllowanceClientError::contract_interaction)
    }

    // -----------
    // | SETTERS |
    // -----------

    /// Set the connected holder's allowance for a spender from a
    /// user-entered display amount
    ///
    /// Parses and validates locally before any network call, submits the
    /// approval, and awaits one confirmation. Returns the single outcome
    /// the caller folds into its displayed list; no local state is mutated
    /// here, so a failed or abandoned mutation leaves the projection
    /// untouched.
    #[instrument(skip_all, err, fields(
        tx_hash,
        spender = %spender,
        new_amount = %new_display_amount
    ))]
    pub async fn update_allowance(
        &self,
        token: &TokenInfo,
        spender: Address,
        new_display_amount: &str,
    ) -> Result<MutationOutcome, AllowanceClientError> {
        let raw_amount = parse_amount(new_display_amount, token.decimals)
            .map_err(AllowanceClientError::InvalidAmount)?;
        self.signer_address()?;

        let call = self.token().instance().approve(spender, raw_amount);
        let receipt = self.token().send_tx(call).await?;

        let tx_hash = format!("{:#x}", receipt.transaction_hash);
        tracing::Span::current().record("tx_hash", tx_hash.as_str());
        info!("`approve` tx hash: {}", tx_hash);

        Ok(MutationOutcome::from_confirmed(spender, raw_amount))
    }

    /// Revoke the connected holder's allowance for a spender
    pub async fn revoke_allowance(
        &self,
        token: &TokenInfo,
        spender: Address,
    ) -> Result<MutationOutcome, AllowanceClientError> {
        self.update_allowance(token, spender, "0").await
    }
}

impl AllowanceClientInner<Erc721Contract> {
    // -----------
    // | GETTERS |
    // -----------

    /// Read the collection's ticker symbol
    #[instrument(skip_all, err)]
    pub async fn collection_symbol(&self) -> Result<String, AllowanceClientError> {
        self.token()
            .instance()
            .symbol()
            .call()
            .await
            .map_err(AllowanceClientError::contract_interaction)
    }

    /// Get the owner's balance of the collection
    #[instrument(skip_all, err, fields(owner = %owner))]
    pub async fn collection_balance_of(
        &self,
        owner: Address,
    ) -> Result<U256, AllowanceClientError> {
        self.token()
            .instance()
            .balanceOf(owner)
            .call()
            .await
            .map_err(AllowanceClientError::contract_interaction)
    }

    /// Get the currently approved address for a token, if any
    #[instrument(skip_all, err, fields(token_id = %token_id))]
    pub async fn get_approved(&self, token_id: U256) -> Result<Address, AllowanceClientError> {
        self.token()
            .instance()
            .getApproved(token_id)
            .call()
            .await
            .map_err(AllowanceClientError::contract_interaction)
    }

    /// Check whether an operator holds a collection-wide grant from the
    /// owner
    #[instrument(skip_all, err, fields(owner = %owner, operator = %operator))]
    pub async fn is_approved_for_all(
        &self,
        owner: Address,
        operator: Address,
    ) -> Result<bool, AllowanceClientError> {
        self.token()
            .instance()
            .isApprovedForAll(owner, operator)
            .call()
            .await
            .map_err(AllowanceClientError::contract_interaction)
    }

    // -----------
    // | SETTERS |
    // -----------

    /// Clear the single-token approval for the given token
    ///
    /// ERC721 grants have no partial amounts; revocation approves the zero
    /// address
    #[instrument(skip_all, err, fields(tx_hash, token_id = %token_id))]
    pub async fn revoke_erc721_approval(
        &self,
        token_id: U256,
    ) -> Result<Erc721MutationOutcome, AllowanceClientError> {
        self.signer_address()?;

        let call = self.token().instance().approve(Address::ZERO, token_id);
        let receipt = self.token().send_tx(call).await?;

        let tx_hash = format!("{:#x}", receipt.transaction_hash);
        tracing::Span::current().record("tx_hash", tx_hash.as_str());
        info!("`approve(0)` tx hash: {}", tx_hash);

        Ok(Erc721MutationOutcome::ApprovalCleared { token_id })
    }

    /// Revoke an operator's collection-wide grant
    #[instrument(skip_all, err, fields(tx_hash, operator = %operator))]
    pub async fn revoke_erc721_operator(
        &self,
        operator: Address,
    ) -> Result<Erc721MutationOutcome, AllowanceClientError> {
        self.signer_address()?;

        let call = self.token().instance().setApprovalForAll(operator, false);
        let receipt = self.token().send_tx(call).await?;

        let tx_hash = format!("{:#x}", receipt.transaction_hash);
        tracing::Span::current().record("tx_hash", tx_hash.as_str());
        info!("`setApprovalForAll(false)` tx hash: {}", tx_hash);

        Ok(Erc721MutationOutcome::OperatorRevoked { operator })
    }
}
