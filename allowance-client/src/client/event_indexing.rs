//! Defines `AllowanceClient` helpers that allow for indexing approval
//! events emitted by the token contract, along with the pure folds that
//! reconstruct the effective allowance set from them

use alloy::rpc::types::Log as RpcLog;
use alloy_primitives::{Address, U256};
use alloy_sol_types::SolEvent;
use common::types::allowance::{
    Allowance, ApprovalRecord, BlockOrder, Erc721Allowance, Erc721ApprovalRecord,
};
use indexmap::IndexMap;
use tracing::instrument;

use crate::abi::{Erc20, Erc721};
use crate::erc20::Erc20Contract;
use crate::erc721::Erc721Contract;
use crate::errors::AllowanceClientError;
use crate::traits::{
    ApprovalEventData, ApprovalForAllEventData, Erc721ApprovalEventData, TokenContract,
};

use super::AllowanceClientInner;

/// The number of blocks covered by a single event filter page
const EVENT_PAGE_BLOCK_RANGE: u64 = 10_000;

/// The error message emitted when a log carries no block number
const ERR_NO_BLOCK_NUMBER: &str = "no block number for log";
/// The error message emitted when a log carries no log index
const ERR_NO_LOG_INDEX: &str = "no log index for log";

impl<T: TokenContract> AllowanceClientInner<T> {
    /// Query all events matching a filter from the configured start block up
    /// to the chain head, paging forward by a fixed block range
    ///
    /// Events come back in the RPC's log order: ascending by block number,
    /// then by log index within each block
    async fn query_all_events<E: SolEvent>(
        &self,
    ) -> Result<Vec<(E, RpcLog)>, AllowanceClientError> {
        let head = self.block_number().await?;
        let mut events = Vec::new();
        let mut start = self.start_block;

        while start <= head {
            let end = head.min(start + EVENT_PAGE_BLOCK_RANGE - 1);
            let filter = self.event_filter::<E>().from_block(start).to_block(end);
            let page = filter.query().await.map_err(AllowanceClientError::event_querying)?;
            events.extend(page);

            start = end + 1;
        }

        Ok(events)
    }

    /// Extract the block order of a decoded event's log
    fn block_order(log: &RpcLog) -> Result<BlockOrder, AllowanceClientError> {
        let block_number = log
            .block_number
            .ok_or(AllowanceClientError::EventQuerying(ERR_NO_BLOCK_NUMBER.to_string()))?;
        let log_index =
            log.log_index.ok_or(AllowanceClientError::EventQuerying(ERR_NO_LOG_INDEX.to_string()))?;

        Ok(BlockOrder::new(block_number, log_index))
    }
}

impl AllowanceClientInner<Erc20Contract> {
    /// Fetch the owner's effective allowance set from the token's approval
    /// log
    ///
    /// Replays the full log in block order, keeping the latest grant per
    /// spender and dropping grants whose final amount is zero
    #[instrument(skip_all, err, fields(owner = %owner))]
    pub async fn fetch_effective_allowances(
        &self,
        owner: Address,
    ) -> Result<Vec<Allowance>, AllowanceClientError> {
        let raw_events = self.query_all_events::<Erc20::Approval>().await?;

        let mut records = Vec::with_capacity(raw_events.len());
        for (event, log) in raw_events.iter() {
            records.push(ApprovalRecord {
                owner: event.owner(),
                spender: event.spender(),
                amount: event.amount(),
                block_order: Self::block_order(log)?,
            });
        }

        Ok(collect_effective_allowances(&records, owner))
    }
}

impl AllowanceClientInner<Erc721Contract> {
    /// Fetch the owner's effective grant set from the collection's approval
    /// and operator logs
    #[instrument(skip_all, err, fields(owner = %owner))]
    pub async fn fetch_effective_erc721_allowances(
        &self,
        owner: Address,
    ) -> Result<Vec<Erc721Allowance>, AllowanceClientError> {
        let token_events = self.query_all_events::<Erc721::Approval>().await?;
        let operator_events = self.query_all_events::<Erc721::ApprovalForAll>().await?;

        let mut records = Vec::with_capacity(token_events.len() + operator_events.len());
        for (event, log) in token_events.iter() {
            records.push(Erc721ApprovalRecord::Token {
                owner: event.owner(),
                approved: event.approved(),
                token_id: event.token_id(),
                block_order: Self::block_order(log)?,
            });
        }

        for (event, log) in operator_events.iter() {
            records.push(Erc721ApprovalRecord::Operator {
                owner: event.owner(),
                operator: event.operator(),
                approved: event.approved(),
                block_order: Self::block_order(log)?,
            });
        }

        // Interleave the two event streams back into chain order
        records.sort_by_key(|record| record.block_order());

        Ok(collect_effective_erc721_allowances(&records, owner))
    }
}

// -----------
// | Helpers |
// -----------

/// Fold an ERC20 approval log into the owner's effective allowance set
///
/// The log must be sorted ascending by block order; behavior on misordered
/// input is undefined. Later events unconditionally supersede earlier ones
/// for the same spender, regardless of relative magnitude, and pairs whose
/// final amount is zero are dropped. Events for other owners are ignored.
/// Surviving entries keep the order in which their spender first appeared
/// in the log.
pub fn collect_effective_allowances(
    records: &[ApprovalRecord],
    owner: Address,
) -> Vec<Allowance> {
    let mut latest: IndexMap<Address, U256> = IndexMap::new();
    for record in records.iter().filter(|record| record.owner == owner) {
        latest.insert(record.spender, record.amount);
    }

    latest
        .into_iter()
        .filter(|(_, amount)| !amount.is_zero())
        .map(|(spender, amount)| Allowance { spender, amount })
        .collect()
}

/// Fold an ERC721 approval log into the owner's effective grant set
///
/// Single-token approvals are keyed by token: ERC721 carries exactly one
/// live approved address per token, and approving the zero address clears
/// it. Operator grants are keyed by operator and cleared by an
/// `approved = false` event, which leaves single-token approvals from other
/// events untouched. The same ordering contract as the ERC20 fold applies.
pub fn collect_effective_erc721_allowances(
    records: &[Erc721ApprovalRecord],
    owner: Address,
) -> Vec<Erc721Allowance> {
    let mut token_grants: IndexMap<U256, Address> = IndexMap::new();
    let mut operator_grants: IndexMap<Address, bool> = IndexMap::new();

    for record in records.iter().filter(|record| record.owner() == owner) {
        match record {
            Erc721ApprovalRecord::Token { approved, token_id, .. } => {
                token_grants.insert(*token_id, *approved);
            },
            Erc721ApprovalRecord::Operator { operator, approved, .. } => {
                operator_grants.insert(*operator, *approved);
            },
        }
    }

    let token_allowances = token_grants
        .into_iter()
        .filter(|(_, approved)| *approved != Address::ZERO)
        .map(|(token_id, spender)| Erc721Allowance::Token { spender, token_id });
    let operator_allowances = operator_grants
        .into_iter()
        .filter(|(_, approved)| *approved)
        .map(|(operator, _)| Erc721Allowance::Operator { spender: operator });

    token_allowances.chain(operator_allowances).collect()
}

#[cfg(test)]
mod test {
    use alloy_primitives::{Address, U256};
    use common::types::allowance::{
        Allowance, ApprovalRecord, BlockOrder, Erc721Allowance, Erc721ApprovalRecord,
    };

    use super::{collect_effective_allowances, collect_effective_erc721_allowances};

    /// The owner under inspection in the tests
    fn owner() -> Address {
        Address::repeat_byte(0xaa)
    }

    /// Build an approval record for the inspected owner
    fn approval(spender: Address, amount: u64, order: u64) -> ApprovalRecord {
        ApprovalRecord {
            owner: owner(),
            spender,
            amount: U256::from(amount),
            block_order: BlockOrder::new(order, 0),
        }
    }

    /// Tests that a later zero approval removes the spender from the
    /// effective set
    #[test]
    fn test_zero_amount_removes_spender() {
        let spender = Address::repeat_byte(1);
        let records = vec![approval(spender, 100, 1), approval(spender, 0, 2)];

        let effective = collect_effective_allowances(&records, owner());
        assert!(effective.is_empty());
    }

    /// Tests that a later, smaller approval supersedes an earlier one
    #[test]
    fn test_later_event_supersedes() {
        let spender = Address::repeat_byte(1);
        let records = vec![approval(spender, 50, 1), approval(spender, 30, 2)];

        let effective = collect_effective_allowances(&records, owner());
        assert_eq!(effective, vec![Allowance { spender, amount: U256::from(30u8) }]);
    }

    /// Tests that replaying the same log twice yields identical output
    #[test]
    fn test_fold_deterministic() {
        let records = vec![
            approval(Address::repeat_byte(1), 5, 1),
            approval(Address::repeat_byte(2), 100, 2),
            approval(Address::repeat_byte(1), 7, 3),
            approval(Address::repeat_byte(3), 0, 4),
        ];

        let first = collect_effective_allowances(&records, owner());
        let second = collect_effective_allowances(&records, owner());
        assert_eq!(first, second);
    }

    /// Tests that events emitted by other owners are ignored
    #[test]
    fn test_foreign_owners_ignored() {
        let spender = Address::repeat_byte(1);
        let mut foreign = approval(spender, 500, 2);
        foreign.owner = Address::repeat_byte(0xbb);

        let records = vec![approval(spender, 100, 1), foreign];
        let effective = collect_effective_allowances(&records, owner());
        assert_eq!(effective, vec![Allowance { spender, amount: U256::from(100u8) }]);
    }

    /// Tests that surviving entries keep first-seen log order
    #[test]
    fn test_fold_preserves_log_order() {
        let records = vec![
            approval(Address::repeat_byte(1), 5, 1),
            approval(Address::repeat_byte(2), 100, 2),
            approval(Address::repeat_byte(3), 50, 3),
            approval(Address::repeat_byte(1), 10, 4),
        ];

        let effective = collect_effective_allowances(&records, owner());
        let spenders: Vec<Address> = effective.iter().map(|a| a.spender).collect();
        assert_eq!(
            spenders,
            vec![Address::repeat_byte(1), Address::repeat_byte(2), Address::repeat_byte(3)]
        );
    }

    /// Tests that revoking an operator clears only the blanket grant
    #[test]
    fn test_operator_revocation_scope() {
        let operator = Address::repeat_byte(1);
        let token_id = U256::from(7u8);
        let records = vec![
            Erc721ApprovalRecord::Token {
                owner: owner(),
                approved: operator,
                token_id,
                block_order: BlockOrder::new(1, 0),
            },
            Erc721ApprovalRecord::Operator {
                owner: owner(),
                operator,
                approved: true,
                block_order: BlockOrder::new(2, 0),
            },
            Erc721ApprovalRecord::Operator {
                owner: owner(),
                operator,
                approved: false,
                block_order: BlockOrder::new(3, 0),
            },
        ];

        // The blanket grant is gone, the single-token approval remains
        let effective = collect_effective_erc721_allowances(&records, owner());
        assert_eq!(effective, vec![Erc721Allowance::Token { spender: operator, token_id }]);
    }

    /// Tests that the latest approval per token wins, and the zero address
    /// clears it
    #[test]
    fn test_token_approval_supersession() {
        let token_id = U256::from(7u8);
        let first = Address::repeat_byte(1);
        let second = Address::repeat_byte(2);

        let approve = |approved, order| Erc721ApprovalRecord::Token {
            owner: owner(),
            approved,
            token_id,
            block_order: BlockOrder::new(order, 0),
        };

        // A newer approval replaces the older one
        let records = vec![approve(first, 1), approve(second, 2)];
        let effective = collect_effective_erc721_allowances(&records, owner());
        assert_eq!(effective, vec![Erc721Allowance::Token { spender: second, token_id }]);

        // Approving the zero address clears the grant
        let records = vec![approve(first, 1), approve(Address::ZERO, 2)];
        let effective = collect_effective_erc721_allowances(&records, owner());
        assert!(effective.is_empty());
    }
}
