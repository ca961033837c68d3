use std::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

/// Money is represented as an exact decimal so that amounts keep the
/// textual form they were entered with (e.g. "12.50" stays "12.50").
pub type Amount = Decimal;

/// Largest amount a single expense (or limit) may carry: one quadrillion.
/// Keeps ledger totals far away from `Decimal::MAX`.
pub const MAX_AMOUNT: Amount = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

/// Format an amount for display with two decimal places.
/// Example: 50 -> "50.00", 12.345 -> "12.35"
pub fn format_amount(amount: Amount) -> String {
    format!(
        "{:.2}",
        amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}

/// Parse a decimal string into a non-negative amount.
/// Example: "50.00" -> 50.00, "12.5" -> 12.5, "100" -> 100
pub fn parse_amount(input: &str) -> Result<Amount, ParseAmountError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ParseAmountError::Empty);
    }

    let amount = Decimal::from_str(input).map_err(|_| ParseAmountError::InvalidFormat)?;
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(ParseAmountError::Negative);
    }

    if amount > MAX_AMOUNT {
        return Err(ParseAmountError::TooLarge);
    }

    // "-0" parses as a negative zero
    Ok(amount.abs())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseAmountError {
    Empty,
    InvalidFormat,
    Negative,
    TooLarge,
}

impl fmt::Display for ParseAmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseAmountError::Empty => write!(f, "amount is empty"),
            ParseAmountError::InvalidFormat => write!(f, "invalid money format"),
            ParseAmountError::Negative => write!(f, "amount cannot be negative"),
            ParseAmountError::TooLarge => write!(f, "amount cannot exceed {}", MAX_AMOUNT),
        }
    }
}

impl std::error::Error for ParseAmountError {}
