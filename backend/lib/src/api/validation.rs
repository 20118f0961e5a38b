//! Request field validation helpers shared by the API handlers.

use alloy_core::primitives::Address;

use crate::error::Error;

/// Returns the trimmed value of a required request field, or a `BadRequest`
/// error naming the field that was missing or blank.
pub fn require<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str, Error> {
    match value.map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(Error::BadRequest(format!(
            "Missing required field: {field}"
        ))),
    }
}

/// Parses an Ethereum address, requiring:
///
/// * a leading `0x`
/// * 42 characters in total (`0x` plus 20 bytes of hex)
/// * only ascii hex digits after the prefix
pub fn parse_eth_address(address: &str) -> Result<Address, Error> {
    let invalid = || Error::BadRequest("Invalid Ethereum address".to_string());

    if !address.starts_with("0x")
        || address.len() != 42
        || !address[2..].chars().all(|c| c.is_ascii_hexdigit())
    {
        return Err(invalid());
    }

    address.parse().map_err(|_| invalid())
}
