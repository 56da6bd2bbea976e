//! Approval records, effective allowances, and the pure projection and
//! reducer logic applied to them.
//!
//! Everything here is plain data transformation: reconstruction input types,
//! the presentation filter/sort, and the reducer that patches a displayed
//! list with a confirmed mutation outcome. The network-facing halves live in
//! the allowance client crate.

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::types::token::TokenInfo;
use constants::ZERO_ALLOWANCE_DISPLAY;

// -----------------
// | Approval Logs |
// -----------------

/// The position of an event within the chain's log stream
///
/// Orders lexicographically by block number, then by log index within the
/// block; this is the tie-break for approvals landing in the same block
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct BlockOrder {
    /// The number of the block the event was emitted in
    pub block_number: u64,
    /// The index of the event's log within the block
    pub log_index: u64,
}

impl BlockOrder {
    /// Construct a block order from its components
    pub fn new(block_number: u64, log_index: u64) -> Self {
        Self { block_number, log_index }
    }
}

/// A single ERC20 `Approval` event as observed in the token's log
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalRecord {
    /// The owner granting the allowance
    pub owner: Address,
    /// The spender receiving the allowance
    pub spender: Address,
    /// The granted amount; zero clears the allowance
    pub amount: U256,
    /// The event's position in the log stream
    pub block_order: BlockOrder,
}

/// A single ERC721 approval event as observed in the collection's log
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Erc721ApprovalRecord {
    /// A single-token approval; approving the zero address clears the grant
    Token {
        /// The owner of the approved token
        owner: Address,
        /// The address approved to move the token
        approved: Address,
        /// The token the approval covers
        token_id: U256,
        /// The event's position in the log stream
        block_order: BlockOrder,
    },
    /// A collection-wide operator grant or revocation
    Operator {
        /// The owner granting or revoking the operator
        owner: Address,
        /// The operator the grant covers
        operator: Address,
        /// Whether the operator is granted or revoked
        approved: bool,
        /// The event's position in the log stream
        block_order: BlockOrder,
    },
}

impl Erc721ApprovalRecord {
    /// The owner that emitted the approval
    pub fn owner(&self) -> Address {
        match self {
            Erc721ApprovalRecord::Token { owner, .. } => *owner,
            Erc721ApprovalRecord::Operator { owner, .. } => *owner,
        }
    }

    /// The event's position in the log stream
    pub fn block_order(&self) -> BlockOrder {
        match self {
            Erc721ApprovalRecord::Token { block_order, .. } => *block_order,
            Erc721ApprovalRecord::Operator { block_order, .. } => *block_order,
        }
    }
}

// ------------------------
// | Effective Allowances |
// ------------------------

/// An effective ERC20 allowance; derived from the approval log, never
/// independently created
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allowance {
    /// The spender holding the grant
    pub spender: Address,
    /// The currently effective amount
    pub amount: U256,
}

/// An effective ERC721 grant
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Erc721Allowance {
    /// A live single-token approval
    Token {
        /// The address approved to move the token
        spender: Address,
        /// The approved token
        token_id: U256,
    },
    /// A live collection-wide operator grant
    Operator {
        /// The operator holding the grant
        spender: Address,
    },
}

impl Erc721Allowance {
    /// The spender holding the grant
    pub fn spender(&self) -> Address {
        match self {
            Erc721Allowance::Token { spender, .. } => *spender,
            Erc721Allowance::Operator { spender } => *spender,
        }
    }
}

// --------------------
// | Mutation Outcome |
// --------------------

/// The outcome of a confirmed ERC20 allowance mutation
///
/// Returned by the mutation orchestrator exactly once per confirmed
/// transaction; the owning view applies it with [`apply_outcome`]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MutationOutcome {
    /// The spender's allowance was zeroed
    Revoked {
        /// The spender whose grant was removed
        spender: Address,
    },
    /// The spender's allowance was set to a new nonzero amount
    Updated {
        /// The spender whose grant changed
        spender: Address,
        /// The new raw allowance amount
        new_amount: U256,
    },
}

impl MutationOutcome {
    /// The outcome of a confirmed approval at the given raw amount
    ///
    /// A zero amount is a revocation; anything else is an in-place update
    pub fn from_confirmed(spender: Address, new_amount: U256) -> Self {
        if new_amount.is_zero() {
            Self::Revoked { spender }
        } else {
            Self::Updated { spender, new_amount }
        }
    }
}

/// The outcome of a confirmed ERC721 revocation
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Erc721MutationOutcome {
    /// A single-token approval was cleared
    ApprovalCleared {
        /// The token whose approval was cleared
        token_id: U256,
    },
    /// A collection-wide operator grant was revoked
    OperatorRevoked {
        /// The operator whose grant was revoked
        operator: Address,
    },
}

// --------------
// | Projection |
// --------------

/// Project an effective allowance set into its display list
///
/// Drops entries whose formatted amount reads as zero (a nonzero raw amount
/// can still truncate to the zero display at low enough magnitude), then
/// sorts descending by raw amount. The sort is stable, so entries with equal
/// amounts keep their log order.
pub fn displayable_allowances(allowances: Vec<Allowance>, token: &TokenInfo) -> Vec<Allowance> {
    let mut displayable: Vec<Allowance> = allowances
        .into_iter()
        .filter(|allowance| token.format_allowance(allowance.amount) != ZERO_ALLOWANCE_DISPLAY)
        .collect();

    displayable.sort_by(|a, b| b.amount.cmp(&a.amount));
    displayable
}

// -----------
// | Reducer |
// -----------

/// Apply a confirmed mutation outcome to a displayed allowance list
///
/// A revocation removes the spender's entry; an update patches the amount in
/// place without reordering. Applying an outcome twice is a no-op, so a
/// caller that races a reload against an in-flight mutation stays
/// consistent.
pub fn apply_outcome(allowances: Vec<Allowance>, outcome: &MutationOutcome) -> Vec<Allowance> {
    match outcome {
        MutationOutcome::Revoked { spender } => {
            allowances.into_iter().filter(|allowance| allowance.spender != *spender).collect()
        },
        MutationOutcome::Updated { spender, new_amount } => allowances
            .into_iter()
            .map(|mut allowance| {
                if allowance.spender == *spender {
                    allowance.amount = *new_amount;
                }
                allowance
            })
            .collect(),
    }
}

/// Apply a confirmed ERC721 revocation outcome to a displayed grant list
pub fn apply_erc721_outcome(
    allowances: Vec<Erc721Allowance>,
    outcome: &Erc721MutationOutcome,
) -> Vec<Erc721Allowance> {
    allowances
        .into_iter()
        .filter(|allowance| match (allowance, outcome) {
            (
                Erc721Allowance::Token { token_id, .. },
                Erc721MutationOutcome::ApprovalCleared { token_id: cleared },
            ) => token_id != cleared,
            (
                Erc721Allowance::Operator { spender },
                Erc721MutationOutcome::OperatorRevoked { operator },
            ) => spender != operator,
            _ => true,
        })
        .collect()
}

#[cfg(test)]
mod test {
    use alloy_primitives::{Address, U256};

    use crate::types::token::TokenInfo;

    use super::{
        apply_erc721_outcome, apply_outcome, displayable_allowances, Allowance, Erc721Allowance,
        Erc721MutationOutcome, MutationOutcome,
    };

    /// A test token with 18 decimals and a large supply
    fn test_token() -> TokenInfo {
        TokenInfo::new(Address::ZERO, "TEST".to_string(), 18, U256::MAX - U256::from(1u8))
    }

    /// A whole-token amount at 18 decimals
    fn tokens(n: u64) -> U256 {
        U256::from(n) * U256::from(10u8).pow(U256::from(18u8))
    }

    /// An allowance for a deterministic per-index spender
    fn allowance(index: u8, amount: U256) -> Allowance {
        Allowance { spender: Address::repeat_byte(index), amount }
    }

    /// Tests that the projection filters zero-display entries and sorts
    /// descending
    #[test]
    fn test_projection_filters_and_sorts() {
        let token = test_token();
        let allowances = vec![
            allowance(1, tokens(5)),
            allowance(2, tokens(100)),
            allowance(3, tokens(50)),
        ];

        let displayed = displayable_allowances(allowances, &token);
        let amounts: Vec<U256> = displayed.iter().map(|a| a.amount).collect();
        assert_eq!(amounts, vec![tokens(100), tokens(50), tokens(5)]);
    }

    /// Tests that a nonzero raw amount below the display precision is hidden
    #[test]
    fn test_projection_hides_dust() {
        let token = test_token();

        // One raw unit of an 18-decimal token formats as "0.000"
        let allowances = vec![allowance(1, U256::from(1u8)), allowance(2, tokens(1))];
        let displayed = displayable_allowances(allowances, &token);

        assert_eq!(displayed.len(), 1);
        assert_eq!(displayed[0].spender, Address::repeat_byte(2));
    }

    /// Tests that equal amounts keep their input order through the sort
    #[test]
    fn test_projection_stable_on_ties() {
        let token = test_token();
        let allowances =
            vec![allowance(1, tokens(10)), allowance(2, tokens(10)), allowance(3, tokens(20))];

        let displayed = displayable_allowances(allowances, &token);
        let spenders: Vec<Address> = displayed.iter().map(|a| a.spender).collect();
        assert_eq!(
            spenders,
            vec![Address::repeat_byte(3), Address::repeat_byte(1), Address::repeat_byte(2)]
        );
    }

    /// Tests that a revocation outcome removes the spender's entry and is
    /// idempotent
    #[test]
    fn test_apply_revoked() {
        let spender = Address::repeat_byte(1);
        let list = vec![allowance(1, tokens(5)), allowance(2, tokens(10))];

        let outcome = MutationOutcome::Revoked { spender };
        let patched = apply_outcome(list, &outcome);
        assert_eq!(patched, vec![allowance(2, tokens(10))]);

        // Re-applying the outcome for the removed spender is a no-op
        let patched_again = apply_outcome(patched.clone(), &outcome);
        assert_eq!(patched_again, patched);
    }

    /// Tests that an update outcome patches the amount in place without
    /// reordering
    #[test]
    fn test_apply_updated() {
        let list = vec![allowance(1, tokens(5)), allowance(2, tokens(10))];

        let outcome = MutationOutcome::Updated {
            spender: Address::repeat_byte(1),
            new_amount: tokens(50),
        };
        let patched = apply_outcome(list, &outcome);
        assert_eq!(patched, vec![allowance(1, tokens(50)), allowance(2, tokens(10))]);
    }

    /// Tests that a confirmed zero-amount approval yields exactly a
    /// revocation outcome
    #[test]
    fn test_outcome_from_confirmed() {
        let spender = Address::repeat_byte(1);
        assert_eq!(
            MutationOutcome::from_confirmed(spender, U256::ZERO),
            MutationOutcome::Revoked { spender }
        );
        assert_eq!(
            MutationOutcome::from_confirmed(spender, tokens(5)),
            MutationOutcome::Updated { spender, new_amount: tokens(5) }
        );
    }

    /// Tests that ERC721 outcomes remove only the matching grant kind
    #[test]
    fn test_apply_erc721_outcomes() {
        let spender = Address::repeat_byte(1);
        let token_id = U256::from(7u8);
        let list = vec![
            Erc721Allowance::Token { spender, token_id },
            Erc721Allowance::Operator { spender },
        ];

        // Clearing the token approval leaves the operator grant
        let cleared =
            apply_erc721_outcome(list.clone(), &Erc721MutationOutcome::ApprovalCleared { token_id });
        assert_eq!(cleared, vec![Erc721Allowance::Operator { spender }]);

        // Revoking the operator leaves the token approval
        let revoked = apply_erc721_outcome(
            list,
            &Erc721MutationOutcome::OperatorRevoked { operator: spender },
        );
        assert_eq!(revoked, vec![Erc721Allowance::Token { spender, token_id }]);
    }
}
