//! The ERC20 implementation of the token contract seam

use alloy_primitives::{Address, U256};

use crate::abi::Erc20::{Approval as AbiApproval, Erc20Instance};
use crate::client::AllowanceProvider;
use crate::traits::{ApprovalEventData, TokenContract};

/// The handle for an ERC20 token contract
#[derive(Clone)]
pub struct Erc20Contract {
    /// The token contract instance
    token: Erc20Instance<AllowanceProvider>,
}

impl Erc20Contract {
    /// Get a reference to the token instance
    pub fn instance(&self) -> &Erc20Instance<AllowanceProvider> {
        &self.token
    }
}

impl TokenContract for Erc20Contract {
    fn new(token_addr: Address, provider: AllowanceProvider) -> Self {
        Self { token: Erc20Instance::new(token_addr, provider) }
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

impl ApprovalEventData for AbiApproval {
    fn owner(&self) -> Address {
        self.owner
    }

    fn spender(&self) -> Address {
        self.spender
    }

    fn amount(&self) -> U256 {
        self.value
    }
}
