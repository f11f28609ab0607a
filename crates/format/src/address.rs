//! Address display helpers.

use alloy_primitives::Address;

/// Shortens an address to `0x1234...abcd`.
///
/// Empty input yields an empty string; inputs too short to shorten are returned as-is.
pub fn truncate_address(address: &str) -> String {
    if address.len() <= 10 || !address.is_ascii() {
        return address.to_string();
    }
    format!("{}...{}", &address[..6], &address[address.len() - 4..])
}

/// Shortens an optional address, rendering `N/A` when absent.
pub fn format_address(address: Option<&str>) -> String {
    match address {
        Some(address) if !address.is_empty() => truncate_address(address),
        _ => "N/A".to_string(),
    }
}

/// Returns true for a 20-byte hex address.
///
/// Mixed-case input must carry a valid EIP-55 checksum.
pub fn is_valid_address(address: &str) -> bool {
    let Ok(parsed) = address.parse::<Address>() else {
        return false;
    };
    let hex = address.strip_prefix("0x").unwrap_or(address);
    let all_lower = !hex.chars().any(|c| c.is_ascii_uppercase());
    let all_upper = !hex.chars().any(|c| c.is_ascii_lowercase());
    all_lower || all_upper || parsed.to_checksum(None)[2..] == *hex
}
