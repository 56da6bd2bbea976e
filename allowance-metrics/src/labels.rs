//! Metric names and tags

// ----------------
// | METRIC NAMES |
// ----------------

// Mutation metrics

/// Metric describing the number of ERC20 allowances revoked
pub const ERC20_REVOKE_METRIC: &str = "erc20_revoke";
/// Metric describing the number of ERC20 allowances resized
pub const ERC20_UPDATE_METRIC: &str = "erc20_update";
/// Metric describing the number of ERC721 approvals and operator grants
/// revoked
pub const ERC721_REVOKE_METRIC: &str = "erc721_revoke";

// ---------------
// | METRIC TAGS |
// ---------------

/// Metric tag for the token a mutation was applied to
pub const TOKEN_METRIC_TAG: &str = "token";
