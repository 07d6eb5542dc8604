//! Amounts and platform commission for the finance widgets

use std::fmt;

use serde::{Deserialize, Serialize};

/// Amount in minor units (cents) of a currency with two decimals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    pub minor: i64,
    pub currency: String,
}

impl Money {
    pub fn new(minor: i64, currency: impl Into<String>) -> Self {
        Self {
            minor,
            currency: currency.into(),
        }
    }

    /// Parse a decimal string such as `"12.5"` into minor units
    pub fn parse(amount: &str, currency: impl Into<String>) -> Option<Self> {
        let amount = amount.trim();
        let (negative, digits) = match amount.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, amount),
        };
        let (whole, frac) = digits.split_once('.').unwrap_or((digits, ""));
        let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if whole.is_empty() || frac.len() > 2 || !all_digits(whole) || !all_digits(frac) {
            return None;
        }
        let whole: i64 = whole.parse().ok()?;
        let frac: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().ok()? * 10,
            _ => frac.parse().ok()?,
        };
        let minor = whole.checked_mul(100)?.checked_add(frac)?;
        Some(Self::new(if negative { -minor } else { minor }, currency))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.minor < 0 { "-" } else { "" };
        let abs = self.minor.unsigned_abs();
        write!(f, "{}{}.{:02} {}", sign, abs / 100, abs % 100, self.currency)
    }
}

/// Platform commission expressed in basis points (1/100 of a percent)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commission {
    pub basis_points: u32,
}

impl Commission {
    pub fn from_percent(percent: f64) -> Self {
        Self {
            basis_points: (percent * 100.0).round().max(0.0) as u32,
        }
    }

    /// Fee taken from `amount`, rounded half-up; zero for non-positive amounts
    pub fn fee_for(&self, amount: &Money) -> Money {
        if amount.minor <= 0 {
            return Money::new(0, amount.currency.clone());
        }
        let scaled = i128::from(amount.minor) * i128::from(self.basis_points);
        let fee = (scaled + 5_000) / 10_000;
        Money::new(fee.min(i128::from(amount.minor)) as i64, amount.currency.clone())
    }

    /// What the merchant keeps after the fee, never below zero
    pub fn net_of(&self, amount: &Money) -> Money {
        let fee = self.fee_for(amount);
        Money::new((amount.minor - fee.minor).max(0), amount.currency.clone())
    }
}
