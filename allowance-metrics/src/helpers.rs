//! Helpers for recording mutation metrics
//!
//! Recording is fire-and-forget over the `metrics` facade: nothing here is
//! awaited and a missing recorder makes every call a no-op, so the mutation
//! flow can never block or fail on analytics.

use common::types::allowance::{Erc721MutationOutcome, MutationOutcome};

use crate::labels::{
    ERC20_REVOKE_METRIC, ERC20_UPDATE_METRIC, ERC721_REVOKE_METRIC, TOKEN_METRIC_TAG,
};

/// Record a confirmed ERC20 mutation outcome for the given token symbol
pub fn record_erc20_outcome(outcome: &MutationOutcome, token: &str) {
    let metric_name = match outcome {
        MutationOutcome::Revoked { .. } => ERC20_REVOKE_METRIC,
        MutationOutcome::Updated { .. } => ERC20_UPDATE_METRIC,
    };

    metrics::counter!(metric_name, TOKEN_METRIC_TAG => token.to_string()).increment(1);
}

/// Record a confirmed ERC721 revocation for the given collection symbol
pub fn record_erc721_outcome(_outcome: &Erc721MutationOutcome, token: &str) {
    metrics::counter!(ERC721_REVOKE_METRIC, TOKEN_METRIC_TAG => token.to_string()).increment(1);
}
