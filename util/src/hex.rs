//! Helpers for converting values to and from hex strings
use alloy_primitives::Address;
use constants::{
    ADDRESS_BYTE_LENGTH, SHORT_ADDRESS_PREFIX_LENGTH, SHORT_ADDRESS_SUFFIX_LENGTH,
};

use crate::raw_err_str;

/// Convert a byte array to a hex string
pub fn bytes_to_hex_string(bytes: &[u8]) -> String {
    let encoded = hex::encode(bytes);
    format!("0x{encoded}")
}

/// Convert a hex string to a byte array
pub fn bytes_from_hex_string(hex: &str) -> Result<Vec<u8>, String> {
    let hex = hex.strip_prefix("0x").unwrap_or(hex);
    hex::decode(hex).map_err(raw_err_str!("error deserializing bytes from hex string: {}"))
}

/// Parse an address from a hex string
pub fn address_from_hex_string(hex: &str) -> Result<Address, String> {
    let bytes = bytes_from_hex_string(hex)?;
    if bytes.len() != ADDRESS_BYTE_LENGTH {
        return Err(format!("expected {ADDRESS_BYTE_LENGTH} address bytes, got {}", bytes.len()));
    }

    Ok(Address::from_slice(&bytes))
}

/// From an address, get a lowercase hex string with a 0x prefix
pub fn address_to_hex_string(addr: &Address) -> String {
    format!("{addr:#x}")
}

/// Shorten an address to its `0x1234...abcd` display form
///
/// Used as the display fallback for spenders that no resolver could name
pub fn shorten_address(addr: &Address) -> String {
    let hex_str = address_to_hex_string(addr);
    let suffix_start = hex_str.len() - SHORT_ADDRESS_SUFFIX_LENGTH;
    format!("{}...{}", &hex_str[..SHORT_ADDRESS_PREFIX_LENGTH], &hex_str[suffix_start..])
}

#[cfg(test)]
mod test {
    use alloy_primitives::Address;

    use super::{address_from_hex_string, bytes_from_hex_string, bytes_to_hex_string,
        shorten_address};

    /// Tests a hex string round trip through the byte helpers
    #[test]
    fn test_bytes_hex_round_trip() {
        let bytes = vec![0xde, 0xad, 0xbe, 0xef];
        let hex_str = bytes_to_hex_string(&bytes);
        assert_eq!(hex_str, "0xdeadbeef");
        assert_eq!(bytes_from_hex_string(&hex_str).unwrap(), bytes);
    }

    /// Tests that an invalid hex string is rejected
    #[test]
    fn test_invalid_hex_rejected() {
        assert!(bytes_from_hex_string("0xzz").is_err());
        assert!(address_from_hex_string("0x1234").is_err());
    }

    /// Tests the shortened display form of an address
    #[test]
    fn test_shorten_address() {
        let addr = Address::repeat_byte(0xab);
        assert_eq!(shorten_address(&addr), "0xabab...abab");
    }
}
