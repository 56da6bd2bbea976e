//! The token metadata abstraction and exact display-scaling helpers.
//!
//! Raw ERC20 amounts are 256-bit fixed-point values offset by the token's
//! `decimals` field. All display scaling here is exact integer arithmetic:
//! truncating a display value must never increase an approval beyond what
//! the holder intended, so no float conversion is used on this path.

use std::fmt::{self, Display};

use alloy_primitives::{Address, U256};
use constants::{DISPLAY_DECIMALS, UNLIMITED_ALLOWANCE_DISPLAY};
use serde::{Deserialize, Serialize};

/// The metadata of an ERC20 token under inspection
///
/// Read once per token from the contract; read-only to the engine
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenInfo {
    /// The contract address of the token
    pub address: Address,
    /// The token's ticker symbol
    pub symbol: String,
    /// The fixed-point offset of raw token amounts
    pub decimals: u8,
    /// The total supply of the token
    pub total_supply: U256,
}

impl Display for TokenInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

impl TokenInfo {
    /// Construct token metadata from its fields
    pub fn new(address: Address, symbol: String, decimals: u8, total_supply: U256) -> Self {
        Self { address, symbol, decimals, total_supply }
    }

    /// Whether the given raw amount sits in the economically unbounded band
    ///
    /// Anything above the token's total supply can never be fully spent, so
    /// it is displayed as unlimited regardless of its literal magnitude
    pub fn is_unlimited(&self, raw_amount: U256) -> bool {
        raw_amount == U256::MAX || raw_amount > self.total_supply
    }

    /// Format a raw allowance amount for display
    ///
    /// Amounts in the unlimited band render as the unlimited marker; all
    /// others are scaled by `10^-decimals` and truncated to the display
    /// precision
    pub fn format_allowance(&self, raw_amount: U256) -> String {
        if self.is_unlimited(raw_amount) {
            return UNLIMITED_ALLOWANCE_DISPLAY.to_string();
        }

        format_amount(raw_amount, self.decimals)
    }
}

// -----------
// | HELPERS |
// -----------

/// Scale a raw amount by `10^-decimals` and render it truncated to the
/// display precision
///
/// Truncation (rather than rounding) keeps the displayed value from ever
/// overstating the underlying grant
pub fn format_amount(raw_amount: U256, decimals: u8) -> String {
    let ten = U256::from(10u8);
    let scale = ten.pow(U256::from(decimals));

    let integer = raw_amount / scale;
    let frac = raw_amount % scale;

    // Reduce the fractional remainder to the display precision
    let display_decimals = DISPLAY_DECIMALS as usize;
    let frac_scaled = if u32::from(decimals) >= DISPLAY_DECIMALS {
        frac / ten.pow(U256::from(u32::from(decimals) - DISPLAY_DECIMALS))
    } else {
        frac * ten.pow(U256::from(DISPLAY_DECIMALS - u32::from(decimals)))
    };

    format!("{integer}.{frac_scaled:0>display_decimals$}")
}

/// Parse a user-entered decimal string into a raw amount at the given
/// fixed-point offset
///
/// Rejects anything that is not a plain non-negative decimal, as well as
/// inputs carrying more fractional digits than the token supports
pub fn parse_amount(value: &str, decimals: u8) -> Result<U256, String> {
    let (integer_part, frac_part) = match value.split_once('.') {
        Some((integer, frac)) => (integer, frac),
        None => (value, ""),
    };

    if integer_part.is_empty() && frac_part.is_empty() {
        return Err(format!("invalid amount: {value}"));
    }

    let all_digits =
        |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if !all_digits(integer_part) || !all_digits(frac_part) {
        return Err(format!("invalid amount: {value}"));
    }

    if frac_part.len() > decimals as usize {
        return Err(format!(
            "amount {value} has more than {decimals} fractional digits"
        ));
    }

    let ten = U256::from(10u8);
    let integer = parse_digits(integer_part)?;
    let frac = parse_digits(frac_part)?;

    let frac_offset = decimals as usize - frac_part.len();
    let scaled_integer = integer
        .checked_mul(ten.pow(U256::from(decimals)))
        .ok_or_else(|| format!("amount {value} overflows a uint256"))?;
    let scaled_frac = frac * ten.pow(U256::from(frac_offset));

    scaled_integer
        .checked_add(scaled_frac)
        .ok_or_else(|| format!("amount {value} overflows a uint256"))
}

/// Parse a (possibly empty) run of decimal digits into a `U256`
fn parse_digits(digits: &str) -> Result<U256, String> {
    if digits.is_empty() {
        return Ok(U256::ZERO);
    }

    U256::from_str_radix(digits, 10)
        .map_err(|e| format!("error parsing decimal digits: {e}"))
}

#[cfg(test)]
mod test {
    use alloy_primitives::{Address, U256};
    use constants::UNLIMITED_ALLOWANCE_DISPLAY;

    use super::{format_amount, parse_amount, TokenInfo};

    /// A test token with 18 decimals and a 1M-token supply
    fn test_token() -> TokenInfo {
        let supply = U256::from(1_000_000u64) * U256::from(10u8).pow(U256::from(18u8));
        TokenInfo::new(Address::ZERO, "TEST".to_string(), 18, supply)
    }

    /// Tests basic display scaling at 18 decimals
    #[test]
    fn test_format_amount_basic() {
        let one_token = U256::from(10u8).pow(U256::from(18u8));
        assert_eq!(format_amount(one_token, 18), "1.000");

        let half = one_token / U256::from(2u8);
        assert_eq!(format_amount(half, 18), "0.500");

        assert_eq!(format_amount(U256::ZERO, 18), "0.000");
    }

    /// Tests that display scaling truncates rather than rounds
    #[test]
    fn test_format_amount_truncates() {
        // 1.9999 tokens renders as 1.999, not 2.000
        let amount = U256::from(19_999u64) * U256::from(10u8).pow(U256::from(14u8));
        assert_eq!(format_amount(amount, 18), "1.999");
    }

    /// Tests formatting at a fixed-point offset below the display precision
    #[test]
    fn test_format_amount_small_decimals() {
        // 5 raw units of a 1-decimal token is 0.5
        assert_eq!(format_amount(U256::from(5u8), 1), "0.500");
        // A 0-decimal token has no fractional component
        assert_eq!(format_amount(U256::from(42u8), 0), "42.000");
    }

    /// Tests that formatting is numerically monotonic
    #[test]
    fn test_format_amount_monotonic() {
        let amounts =
            [0u64, 1, 999, 1_000, 5_000_000, 123_456_789, u64::MAX].map(U256::from);
        let displays: Vec<f64> =
            amounts.iter().map(|a| format_amount(*a, 6).parse().unwrap()).collect();

        for pair in displays.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
    }

    /// Tests the unlimited display band
    #[test]
    fn test_unlimited_band() {
        let token = test_token();

        // The max uint256 renders as unlimited, not a 78-digit number
        assert_eq!(token.format_allowance(U256::MAX), UNLIMITED_ALLOWANCE_DISPLAY);

        // Anything above the total supply renders as unlimited
        let above_supply = token.total_supply + U256::from(1u8);
        assert_eq!(token.format_allowance(above_supply), UNLIMITED_ALLOWANCE_DISPLAY);

        // The total supply itself formats normally
        assert_eq!(token.format_allowance(token.total_supply), "1000000.000");
    }

    /// Tests parsing of user-entered decimal strings
    #[test]
    fn test_parse_amount() {
        let one_token = U256::from(10u8).pow(U256::from(18u8));
        assert_eq!(parse_amount("1", 18).unwrap(), one_token);
        assert_eq!(parse_amount("1.5", 18).unwrap(), one_token * U256::from(3u8) / U256::from(2u8));
        assert_eq!(parse_amount("0", 18).unwrap(), U256::ZERO);
        assert_eq!(parse_amount(".5", 18).unwrap(), one_token / U256::from(2u8));
    }

    /// Tests that malformed amounts are rejected
    #[test]
    fn test_parse_amount_rejects_invalid() {
        assert!(parse_amount("", 18).is_err());
        assert!(parse_amount(".", 18).is_err());
        assert!(parse_amount("-1", 18).is_err());
        assert!(parse_amount("1.2.3", 18).is_err());
        assert!(parse_amount("abc", 18).is_err());
        assert!(parse_amount("1,5", 18).is_err());
    }

    /// Tests that excess fractional digits are rejected rather than rounded
    #[test]
    fn test_parse_amount_rejects_excess_precision() {
        assert!(parse_amount("1.1234", 3).is_err());
        assert!(parse_amount("0.5", 0).is_err());
    }

    /// Tests the display round trip for values exactly representable at the
    /// display precision
    #[test]
    fn test_display_round_trip() {
        let decimals = 18u8;
        let quantum = U256::from(10u8).pow(U256::from(15u8));

        for multiple in [0u64, 1, 2, 999, 1_000, 123_456] {
            let raw = U256::from(multiple) * quantum;
            let display = format_amount(raw, decimals);
            assert_eq!(parse_amount(&display, decimals).unwrap(), raw);
        }
    }
}
