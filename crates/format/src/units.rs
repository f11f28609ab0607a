//! Conversion between base units and display units of the native token.

use alloy_primitives::{U256, utils};

/// Decimals of the native token.
pub const NATIVE_DECIMALS: u8 = 18;

/// Decimals shown for balances, goals and raised amounts.
const DISPLAY_DECIMALS: u32 = 4;

/// Errors that can occur when parsing a display amount.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnitsError {
    /// The input was empty.
    #[error("amount is empty")]
    Empty,

    /// The input was negative.
    #[error("amount must not be negative: {0}")]
    Negative(String),

    /// The input could not be parsed as an ether amount.
    #[error("invalid amount {input}: {reason}")]
    Invalid {
        /// The rejected input.
        input: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// Formats base units as an ether string with trailing zeros trimmed.
///
/// At least one fractional digit is kept, so one ether renders as `1.0`.
pub fn format_ether(wei: U256) -> String {
    let full = utils::format_ether(wei);
    match full.split_once('.') {
        Some((whole, frac)) => {
            let frac = frac.trim_end_matches('0');
            if frac.is_empty() { format!("{whole}.0") } else { format!("{whole}.{frac}") }
        }
        None => format!("{full}.0"),
    }
}

/// Parses an ether display amount into base units.
pub fn parse_ether(amount: &str) -> Result<U256, UnitsError> {
    let amount = amount.trim();
    if amount.is_empty() {
        return Err(UnitsError::Empty);
    }
    if amount.starts_with('-') {
        return Err(UnitsError::Negative(amount.to_string()));
    }
    utils::parse_ether(amount)
        .map_err(|e| UnitsError::Invalid { input: amount.to_string(), reason: e.to_string() })
}

/// Formats base units with exactly four decimals, rounding half up.
pub fn format_display(wei: U256) -> String {
    let step = U256::from(10u64).pow(U256::from(u32::from(NATIVE_DECIMALS) - DISPLAY_DECIMALS));
    let scale = U256::from(10u64.pow(DISPLAY_DECIMALS));
    let rounded = wei.saturating_add(step / U256::from(2u8)) / step;
    let whole = rounded / scale;
    let frac = rounded % scale;
    format!("{whole}.{:0>width$}", frac.to_string(), width = DISPLAY_DECIMALS as usize)
}

/// Percentage of `goal` covered by `raised`, with two decimals.
///
/// A zero goal yields `"0.00"`.
pub fn calculate_percentage(raised: U256, goal: U256) -> String {
    if goal.is_zero() {
        return "0.00".to_string();
    }
    let scaled = raised.saturating_mul(U256::from(10_000u64));
    let basis_points = scaled.saturating_add(goal / U256::from(2u8)) / goal;
    let whole = basis_points / U256::from(100u8);
    let frac = basis_points % U256::from(100u8);
    format!("{whole}.{:0>2}", frac.to_string())
}

/// Width of a progress bar in percent, capped at 100.
pub fn progress_width(raised: U256, goal: U256) -> u8 {
    if goal.is_zero() {
        return 0;
    }
    let pct = raised.saturating_mul(U256::from(100u8)) / goal;
    if pct >= U256::from(100u8) { 100 } else { pct.to::<u8>() }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn ether(s: &str) -> U256 {
        parse_ether(s).expect("valid amount")
    }

    #[rstest]
    #[case("1", "1.0")]
    #[case("2.5", "2.5")]
    #[case("0", "0.0")]
    #[case("0.000000000000000001", "0.000000000000000001")]
    #[case("1234.5678", "1234.5678")]
    fn test_format_ether(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(format_ether(ether(input)), expected);
    }

    #[test]
    fn test_parse_ether_one() {
        assert_eq!(ether("1"), U256::from(1_000_000_000_000_000_000u128));
    }

    #[test]
    fn test_parse_ether_trims_whitespace() {
        assert_eq!(ether(" 0.5 "), U256::from(500_000_000_000_000_000u128));
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn test_parse_ether_empty(#[case] input: &str) {
        assert_eq!(parse_ether(input), Err(UnitsError::Empty));
    }

    #[test]
    fn test_parse_ether_negative() {
        assert!(matches!(parse_ether("-1"), Err(UnitsError::Negative(_))));
    }

    #[rstest]
    #[case("abc")]
    #[case("1.x")]
    fn test_parse_ether_invalid(#[case] input: &str) {
        assert!(matches!(parse_ether(input), Err(UnitsError::Invalid { .. })));
    }

    #[rstest]
    #[case("0", "0.0000")]
    #[case("1", "1.0000")]
    #[case("2.5", "2.5000")]
    #[case("0.00004", "0.0000")]
    #[case("0.00005", "0.0001")]
    #[case("9.99996", "10.0000")]
    fn test_format_display(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(format_display(ether(input)), expected);
    }

    #[rstest]
    #[case("1.2345")]
    #[case("0.0001")]
    #[case("100")]
    #[case("42.4200")]
    fn test_display_round_trip(#[case] shown: &str) {
        let wei = ether(shown);
        let back = format_display(wei);
        assert_eq!(ether(&back), wei);
        assert_eq!(format_display(ether(&back)), back);
    }

    #[test]
    fn test_percentage_zero_goal() {
        assert_eq!(calculate_percentage(ether("5"), U256::ZERO), "0.00");
        assert_eq!(calculate_percentage(U256::ZERO, U256::ZERO), "0.00");
    }

    #[rstest]
    #[case("2.5", "10", "25.00")]
    #[case("0", "10", "0.00")]
    #[case("10", "10", "100.00")]
    #[case("15", "10", "150.00")]
    #[case("1", "3", "33.33")]
    #[case("2", "3", "66.67")]
    fn test_percentage(#[case] raised: &str, #[case] goal: &str, #[case] expected: &str) {
        assert_eq!(calculate_percentage(ether(raised), ether(goal)), expected);
    }

    #[rstest]
    #[case("2.5", "10", 25)]
    #[case("15", "10", 100)]
    #[case("0", "0", 0)]
    fn test_progress_width(#[case] raised: &str, #[case] goal: &str, #[case] expected: u8) {
        assert_eq!(progress_width(ether(raised), ether(goal)), expected);
    }
}
