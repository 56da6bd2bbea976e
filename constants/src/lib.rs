//! Defines system-wide constants for allowance display and classification

#![deny(unsafe_code)]
#![deny(clippy::missing_docs_in_private_items)]
#![deny(missing_docs)]

// -------------------------
// | System-Wide Constants |
// -------------------------

/// The number of fractional digits rendered when displaying a token amount
///
/// Display formatting truncates to this precision, it never rounds
pub const DISPLAY_DECIMALS: u32 = 3;

/// The display string of an allowance that truncates to zero
pub const ZERO_ALLOWANCE_DISPLAY: &str = "0.000";

/// The display marker for an economically unbounded allowance
pub const UNLIMITED_ALLOWANCE_DISPLAY: &str = "Unlimited";

/// The JSON-RPC error code emitted by token contracts that reject a direct
/// nonzero-to-nonzero approval change
///
/// Such contracts require the allowance to be zeroed before a new value is
/// set; see the classification in the allowance client's error module
pub const NON_STANDARD_APPROVAL_ERROR_CODE: i64 = -32000;

// ----------------------
// | Address Formatting |
// ----------------------

/// The number of bytes in an Ethereum address
pub const ADDRESS_BYTE_LENGTH: usize = 20;

/// The number of leading hex characters kept when shortening an address for
/// display, including the `0x` prefix
pub const SHORT_ADDRESS_PREFIX_LENGTH: usize = 6;

/// The number of trailing hex characters kept when shortening an address for
/// display
pub const SHORT_ADDRESS_SUFFIX_LENGTH: usize = 4;
