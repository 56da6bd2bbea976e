//! The ERC721 implementation of the token contract seam

use alloy_primitives::{Address, U256};

use crate::abi::Erc721::{
    Approval as AbiApproval, ApprovalForAll as AbiApprovalForAll, Erc721Instance,
};
use crate::client::AllowanceProvider;
use crate::traits::{ApprovalForAllEventData, Erc721ApprovalEventData, TokenContract};

/// The handle for an ERC721 collection contract
#[derive(Clone)]
pub struct Erc721Contract {
    /// The collection contract instance
    token: Erc721Instance<AllowanceProvider>,
}

impl Erc721Contract {
    /// Get a reference to the collection instance
    pub fn instance(&self) -> &Erc721Instance<AllowanceProvider> {
        &self.token
    }
}

impl TokenContract for Erc721Contract {
    fn new(token_addr: Address, provider: AllowanceProvider) -> Self {
        Self { token: Erc721Instance::new(token_addr, provider) }
    }

    fn address(&self) -> Address {
        *self.token.address()
    }

    fn provider(&self) -> &AllowanceProvider {
        self.token.provider()
    }
}

// ----------
// | Events |
// ----------

impl Erc721ApprovalEventData for AbiApproval {
    fn owner(&self) -> Address {
        self.owner
    }

    fn approved(&self) -> Address {
        self.approved
    }

    fn token_id(&self) -> U256 {
        self.tokenId
    }
}

impl ApprovalForAllEventData for AbiApprovalForAll {
    fn owner(&self) -> Address {
        self.owner
    }

    fn operator(&self) -> Address {
        self.operator
    }

    fn approved(&self) -> bool {
        self.approved
    }
}
