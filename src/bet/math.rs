//! Bet-return arithmetic and display helpers.
//!
//! Money enters as decimal reais and is converted to integer cents before
//! any arithmetic that has to be exact. Prices are decimals in `(0, 1]`.
//!
//! Everything here is a total function: it runs on every keystroke of a
//! half-typed number, so invalid input maps to a neutral value (zero
//! quote, `0`, `"0"`) instead of an error.
//!
//! # Example
//!
//! ```rust
//! use zest_markets::bet::math::{calculate_bet_returns, format_cents_to_reais};
//!
//! let quote = calculate_bet_returns(100.0, 0.65);
//! assert_eq!(quote.stake_cents, 10_000);
//! assert_eq!(quote.payout_cents, 15_385);
//! assert_eq!(format_cents_to_reais(quote.payout_cents, true), "153,85");
//! ```

use serde::Serialize;

use crate::config::Locale;
use crate::types::{Cents, Price};

/// Largest cent amount that survives a round trip through `f64`
pub const MAX_SAFE_CENTS: f64 = 9_007_199_254_740_991.0;

/// Economics of a stake at a given contract price
///
/// Recomputed from scratch on every input change. A zeroed value means the
/// input was not a valid bet.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct BetCalculation {
    /// Stake in cents
    pub stake_cents: Cents,
    /// Price of one contract in cents (0-100)
    pub price_cents: Price,
    /// Contracts bought (fractional)
    pub contracts: f64,
    /// Payout if the outcome wins, in cents
    pub payout_cents: Cents,
    /// `payout_cents - stake_cents`
    pub profit_cents: Cents,
    /// Profit as a percentage of the stake
    pub profit_percent: f64,
}

impl BetCalculation {
    /// The invalid-input result
    pub const ZERO: Self = Self {
        stake_cents: 0,
        price_cents: 0,
        contracts: 0.0,
        payout_cents: 0,
        profit_cents: 0,
        profit_percent: 0.0,
    };

    /// Whether this is the invalid-input result
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Whether this quote buys at least part of a contract
    pub fn is_viable(&self) -> bool {
        self.price_cents > 0 && self.payout_cents > 0
    }

    /// Payout rendered with two decimals, e.g. `"153,85"`
    pub fn payout_display(&self) -> String {
        format_cents_to_reais(self.payout_cents, true)
    }

    /// Profit rendered with two decimals, e.g. `"53,85"`
    pub fn profit_display(&self) -> String {
        format_cents_to_reais(self.profit_cents, true)
    }

    /// Return rendered with one decimal, e.g. `"53,8"`
    pub fn profit_percent_display(&self) -> String {
        format_percentage(self.profit_percent, 1)
    }
}

/// Convert a stake and a contract price into contracts, payout and profit.
///
/// Returns [`BetCalculation::ZERO`] when the stake is not a finite positive
/// number, when the price is outside `(0, 1]`, or when any intermediate
/// value stops being finite.
///
/// A price that rounds to zero cents buys nothing: the result carries the
/// stake with a total loss (`profit_cents == -stake_cents`,
/// `profit_percent == -100`).
pub fn calculate_bet_returns(stake_reais: f64, price_decimal: f64) -> BetCalculation {
    if !stake_reais.is_finite() || stake_reais <= 0.0 {
        return BetCalculation::ZERO;
    }
    if !price_decimal.is_finite() || price_decimal <= 0.0 || price_decimal > 1.0 {
        return BetCalculation::ZERO;
    }

    let stake_cents = match round_to_cents(stake_reais * 100.0) {
        Some(cents) if cents > 0 => cents,
        _ => return BetCalculation::ZERO,
    };
    // price is in (0, 1] so this lands in 0..=100
    let price_cents = (price_decimal * 100.0).round() as Price;

    if price_cents == 0 {
        return BetCalculation {
            stake_cents,
            price_cents: 0,
            contracts: 0.0,
            payout_cents: 0,
            profit_cents: -stake_cents,
            profit_percent: -100.0,
        };
    }

    let contracts = stake_cents as f64 / f64::from(price_cents);
    if !contracts.is_finite() {
        return BetCalculation::ZERO;
    }

    let payout_cents = match round_to_cents(contracts * 100.0) {
        Some(cents) => cents,
        None => return BetCalculation::ZERO,
    };
    let profit_cents = payout_cents - stake_cents;
    let profit_percent = profit_cents as f64 / stake_cents as f64 * 100.0;
    if !profit_percent.is_finite() {
        return BetCalculation::ZERO;
    }

    BetCalculation {
        stake_cents,
        price_cents,
        contracts,
        payout_cents,
        profit_cents,
        profit_percent,
    }
}

/// Round a cent value held in `f64` to whole cents, rejecting anything that
/// is not finite or too large to be exact.
fn round_to_cents(value: f64) -> Option<Cents> {
    let rounded = value.round();
    if rounded.is_finite() && rounded.abs() <= MAX_SAFE_CENTS {
        Some(rounded as Cents)
    } else {
        None
    }
}

/// Convert decimal reais to whole cents. Invalid input gives `0`.
pub fn reais_to_cents(reais: f64) -> Cents {
    if !reais.is_finite() {
        return 0;
    }
    round_to_cents(reais * 100.0).unwrap_or(0)
}

/// Convert whole cents to decimal reais
pub fn cents_to_reais(cents: Cents) -> f64 {
    cents as f64 / 100.0
}

/// Render cents as Brazilian-locale reais.
///
/// With `show_decimals` the value keeps both cent digits (`"1.234,50"`);
/// without, it is rounded half-up to whole reais (`"1.235"`). Negative
/// values carry a leading `-` on both paths, unless they render as zero.
pub fn format_cents_to_reais(cents: Cents, show_decimals: bool) -> String {
    let locale = Locale::PtBr;
    let magnitude = cents.unsigned_abs();

    let (body, is_zero) = if show_decimals {
        let whole = magnitude / 100;
        let frac = magnitude % 100;
        (
            format!(
                "{}{}{:02}",
                group_thousands(whole, locale.group_separator()),
                locale.decimal_separator(),
                frac
            ),
            magnitude == 0,
        )
    } else {
        let whole = magnitude / 100 + u64::from(magnitude % 100 >= 50);
        (group_thousands(whole, locale.group_separator()), whole == 0)
    };

    if cents < 0 && !is_zero {
        format!("-{}", body)
    } else {
        body
    }
}

/// Render cents with the locale's currency symbol, e.g. `"R$ 1.234,56"`
pub fn format_currency(cents: Cents, locale: Locale) -> String {
    let amount = format_cents_to_reais(cents, true);
    match amount.strip_prefix('-') {
        Some(positive) => format!("-{} {}", locale.currency_symbol(), positive),
        None => format!("{} {}", locale.currency_symbol(), amount),
    }
}

fn group_thousands(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

/// Convert a decimal probability to a whole percentage in `0..=100`.
///
/// Out-of-range input is clamped; non-finite input gives `0`.
pub fn decimal_to_percent(decimal: f64) -> u8 {
    if !decimal.is_finite() {
        return 0;
    }
    (decimal * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Raw numeric input: either a number or the text of an input field
#[derive(Debug, Clone, PartialEq)]
pub enum NumericInput {
    /// An already-parsed number
    Number(f64),
    /// Text as typed, possibly with a decimal comma
    Text(String),
}

impl From<f64> for NumericInput {
    fn from(value: f64) -> Self {
        NumericInput::Number(value)
    }
}

impl From<i64> for NumericInput {
    fn from(value: i64) -> Self {
        NumericInput::Number(value as f64)
    }
}

impl From<&str> for NumericInput {
    fn from(value: &str) -> Self {
        NumericInput::Text(value.to_string())
    }
}

impl From<String> for NumericInput {
    fn from(value: String) -> Self {
        NumericInput::Text(value)
    }
}

impl NumericInput {
    /// Parse to a finite number, `0` when that is not possible
    pub fn value(&self) -> f64 {
        match self {
            NumericInput::Number(n) if n.is_finite() => *n,
            NumericInput::Number(_) => 0.0,
            NumericInput::Text(text) => parse_decimal_text(text),
        }
    }
}

/// Parse a number or typed text, never failing.
///
/// Text is trimmed and a decimal comma is read as a dot. The longest
/// numeric prefix is used, so `"12,5"` gives `12.5` and `"10,"` gives
/// `10`. Empty, unparseable or non-finite input gives `0`.
pub fn safe_parse_float(value: impl Into<NumericInput>) -> f64 {
    value.into().value()
}

fn parse_decimal_text(text: &str) -> f64 {
    let normalized = text.trim().replace(',', ".");
    let prefix = numeric_prefix(&normalized);
    if prefix.is_empty() {
        return 0.0;
    }
    match prefix.parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => 0.0,
    }
}

/// Longest prefix of `s` shaped like `[+-]digits[.digits][e[+-]digits]`
fn numeric_prefix(s: &str) -> &str {
    let bytes = s.as_bytes();
    let mut i = 0;
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    let mut mantissa_digits = false;
    let mut seen_dot = false;
    while let Some(&b) = bytes.get(i) {
        match b {
            b'0'..=b'9' => {
                mantissa_digits = true;
                i += 1;
                end = i;
            }
            b'.' if !seen_dot => {
                seen_dot = true;
                i += 1;
            }
            _ => break,
        }
    }
    if !mantissa_digits {
        return "";
    }

    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_start = j;
        while matches!(bytes.get(j), Some(b'0'..=b'9')) {
            j += 1;
        }
        if j > exp_start {
            end = j;
        }
    }

    &s[..end]
}

/// Most fractional digits [`format_percentage`] renders
pub const MAX_PERCENT_DECIMALS: usize = 10;

/// Render a percentage with a decimal comma, e.g. `53.846` → `"53,8"`.
///
/// The magnitude is rounded half-up to `decimals` places (at most
/// [`MAX_PERCENT_DECIMALS`]) and a negative value gets a leading `-`
/// (dropped when it rounds to zero). Non-finite input gives `"0"`.
pub fn format_percentage(percent: f64, decimals: usize) -> String {
    if !percent.is_finite() {
        return "0".to_string();
    }
    let decimals = decimals.min(MAX_PERCENT_DECIMALS);
    let factor = 10f64.powi(decimals as i32);
    // half-up on the magnitude; `{:.*}` alone breaks ties toward even
    let scaled = (percent.abs() * factor).round() / factor;
    let magnitude = if scaled.is_finite() { scaled } else { percent.abs() };
    let body = format!("{:.*}", decimals, magnitude).replace('.', ",");
    let rounds_to_zero = body.chars().all(|c| c == '0' || c == ',');
    if percent < 0.0 && !rounds_to_zero {
        format!("-{}", body)
    } else {
        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_quote() {
        let calc = calculate_bet_returns(100.0, 0.65);
        assert_eq!(calc.stake_cents, 10_000);
        assert_eq!(calc.price_cents, 65);
        assert!((calc.contracts - 153.846).abs() < 0.001);
        assert_eq!(calc.payout_cents, 15_385);
        assert_eq!(calc.profit_cents, 5_385);
        assert!((calc.profit_percent - 53.85).abs() < 1e-9);
        assert!(calc.is_viable());
    }

    #[test]
    fn test_penny_contract() {
        let calc = calculate_bet_returns(10.0, 0.01);
        assert_eq!(calc.stake_cents, 1_000);
        assert_eq!(calc.price_cents, 1);
        assert_eq!(calc.contracts, 1_000.0);
        assert_eq!(calc.payout_cents, 100_000);
        assert_eq!(calc.profit_cents, 99_000);
        assert_eq!(calc.profit_percent, 9_900.0);
    }

    #[test]
    fn test_certain_contract_breaks_even() {
        let calc = calculate_bet_returns(25.0, 1.0);
        assert_eq!(calc.price_cents, 100);
        assert_eq!(calc.payout_cents, 2_500);
        assert_eq!(calc.profit_cents, 0);
        assert_eq!(calc.profit_percent, 0.0);
    }

    #[test]
    fn test_invalid_stake() {
        for stake in [0.0, -5.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY, 0.004] {
            assert!(calculate_bet_returns(stake, 0.5).is_zero(), "stake {stake}");
        }
    }

    #[test]
    fn test_invalid_price() {
        for price in [0.0, -0.1, 1.5, 1.0001, f64::NAN, f64::INFINITY] {
            assert!(calculate_bet_returns(100.0, price).is_zero(), "price {price}");
        }
    }

    #[test]
    fn test_price_rounding_to_zero_is_total_loss() {
        let calc = calculate_bet_returns(20.0, 0.004);
        assert_eq!(calc.stake_cents, 2_000);
        assert_eq!(calc.price_cents, 0);
        assert_eq!(calc.contracts, 0.0);
        assert_eq!(calc.payout_cents, 0);
        assert_eq!(calc.profit_cents, -2_000);
        assert_eq!(calc.profit_percent, -100.0);
        assert!(!calc.is_viable());
    }

    #[test]
    fn test_huge_stake_collapses() {
        assert!(calculate_bet_returns(1e300, 0.5).is_zero());
    }

    #[test]
    fn test_quote_displays() {
        let calc = calculate_bet_returns(100.0, 0.65);
        assert_eq!(calc.payout_display(), "153,85");
        assert_eq!(calc.profit_display(), "53,85");
        assert!(calc.profit_percent_display().starts_with("53,"));

        let penny = calculate_bet_returns(10.0, 0.01);
        assert_eq!(penny.profit_percent_display(), "9900,0");
    }

    #[test]
    fn test_format_cents_to_reais() {
        assert_eq!(format_cents_to_reais(0, false), "0");
        assert_eq!(format_cents_to_reais(0, true), "0,00");
        assert_eq!(format_cents_to_reais(5, true), "0,05");
        assert_eq!(format_cents_to_reais(123_456, true), "1.234,56");
        assert_eq!(format_cents_to_reais(123_456, false), "1.235");
        assert_eq!(format_cents_to_reais(123_449, false), "1.234");
        assert_eq!(format_cents_to_reais(100_000_000, false), "1.000.000");
    }

    #[test]
    fn test_format_negative_cents() {
        assert_eq!(format_cents_to_reais(-2_000, true), "-20,00");
        assert_eq!(format_cents_to_reais(-2_000, false), "-20");
        assert_eq!(format_cents_to_reais(-40, false), "0");
        assert_eq!(format_cents_to_reais(i64::MIN, false), "-92.233.720.368.547.758");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(123_456, Locale::PtBr), "R$ 1.234,56");
        assert_eq!(format_currency(-150, Locale::PtBr), "-R$ 1,50");
    }

    #[test]
    fn test_cents_conversion() {
        assert_eq!(reais_to_cents(12.34), 1_234);
        assert_eq!(reais_to_cents(f64::NAN), 0);
        assert_eq!(reais_to_cents(-1.5), -150);
        assert_eq!(cents_to_reais(1_234), 12.34);
    }

    #[test]
    fn test_decimal_to_percent() {
        assert_eq!(decimal_to_percent(0.655), 66);
        assert_eq!(decimal_to_percent(1.5), 100);
        assert_eq!(decimal_to_percent(-0.5), 0);
        assert_eq!(decimal_to_percent(f64::NAN), 0);
        assert_eq!(decimal_to_percent(f64::INFINITY), 0);
    }

    #[test]
    fn test_safe_parse_float() {
        assert_eq!(safe_parse_float("12,5"), 12.5);
        assert_eq!(safe_parse_float("  7.25 "), 7.25);
        assert_eq!(safe_parse_float("10,"), 10.0);
        assert_eq!(safe_parse_float(",5"), 0.5);
        assert_eq!(safe_parse_float("-3"), -3.0);
        assert_eq!(safe_parse_float("1e2"), 100.0);
        assert_eq!(safe_parse_float("1e"), 1.0);
        assert_eq!(safe_parse_float("12abc"), 12.0);
        assert_eq!(safe_parse_float(42.0), 42.0);
        assert_eq!(safe_parse_float(3_i64), 3.0);
    }

    #[test]
    fn test_safe_parse_float_rejects() {
        for text in ["", "   ", "abc", "-", ",", "R$ 10", "1e999", "inf", "NaN"] {
            assert_eq!(safe_parse_float(text), 0.0, "text {text:?}");
        }
        assert_eq!(safe_parse_float(f64::NAN), 0.0);
        assert_eq!(safe_parse_float(f64::NEG_INFINITY), 0.0);
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(53.846, 1), "53,8");
        assert_eq!(format_percentage(53.846, 2), "53,85");
        assert_eq!(format_percentage(-100.0, 1), "-100,0");
        assert_eq!(format_percentage(12.0, 0), "12");
        assert_eq!(format_percentage(-0.01, 1), "0,0");
        assert_eq!(format_percentage(f64::NAN, 1), "0");
        assert_eq!(format_percentage(f64::INFINITY, 1), "0");
    }

    #[test]
    fn test_format_percentage_rounds_ties_up() {
        assert_eq!(format_percentage(0.25, 1), "0,3");
        assert_eq!(format_percentage(2.5, 0), "3");
        assert_eq!(format_percentage(12.5, 0), "13");
        assert_eq!(format_percentage(-2.5, 0), "-3");
        assert_eq!(format_percentage(1.5, 400), "1,5000000000");
    }
}
