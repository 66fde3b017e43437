//! Number, percentage, and timestamp formatting for markdown reports.

use chrono::DateTime;
use rust_decimal::{Decimal, RoundingStrategy};

const BILLION: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);
const MILLION: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);
const THOUSAND: Decimal = Decimal::from_parts(1_000, 0, 0, false, 0);

/// Placeholder for absent values.
pub const NOT_AVAILABLE: &str = "N/A";

/// Fixed-point with thousands separators, e.g. `50000.125` at 2 dp -> `50,000.12`.
///
/// Digits come from the mantissa, so any representable value formats at any
/// precision.
pub fn grouped(value: Decimal, decimals: u32) -> String {
    let rounded = value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointNearestEven);
    let scale = rounded.scale() as usize;
    let width = decimals as usize;

    let mut digits = rounded.mantissa().unsigned_abs().to_string();
    if digits.len() <= scale {
        digits.insert_str(0, &"0".repeat(scale + 1 - digits.len()));
    }
    let (int_part, frac_part) = digits.split_at(digits.len() - scale);

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + width + 2);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if width > 0 {
        out.push('.');
        out.push_str(frac_part);
        out.push_str(&"0".repeat(width.saturating_sub(frac_part.len())));
    }
    out
}

/// Comma-separate an unsigned run of digits, e.g. `25000` -> `25,000`.
pub fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Dollar amount at 2 dp, e.g. `$50,000.12`.
pub fn usd(value: Decimal) -> String {
    format!("${}", grouped(value, 2))
}

/// Dollar amount or `N/A`.
pub fn usd_or_na(value: Option<Decimal>) -> String {
    value.map(usd).unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Abbreviated dollar aggregate: `$1.23B`, `$4.56M`, `$7.89K`, or the full
/// grouped value at `decimals` below one thousand.
pub fn compact_usd(value: Decimal, decimals: u32) -> String {
    let scaled = |divisor: Decimal, suffix: &str| {
        let v = value.checked_div(divisor).unwrap_or_default();
        format!("${}{}", grouped(v, 2), suffix)
    };
    if value >= BILLION {
        scaled(BILLION, "B")
    } else if value >= MILLION {
        scaled(MILLION, "M")
    } else if value >= THOUSAND {
        scaled(THOUSAND, "K")
    } else {
        format!("${}", grouped(value, decimals))
    }
}

/// Signed percentage at 2 dp, e.g. `+1.25%`.
pub fn signed_percent(value: Decimal) -> String {
    let formatted = grouped(value, 2);
    if formatted.starts_with('-') {
        format!("{formatted}%")
    } else {
        format!("+{formatted}%")
    }
}

/// Directional indicator from the strict sign of a change.
pub fn trend_indicator(change: Decimal) -> &'static str {
    if change > Decimal::ZERO {
        "📈"
    } else if change < Decimal::ZERO {
        "📉"
    } else {
        "➡️"
    }
}

/// `part / whole × 100`, or zero when `whole` is zero.
pub fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or_default()
}

/// Relative change from `from` to `to` in percent, zero unless `from > 0`.
pub fn percent_change(from: Decimal, to: Decimal) -> Decimal {
    if from <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    to.checked_sub(from)
        .map(|delta| percent_of(delta, from))
        .unwrap_or_default()
}

/// Milliseconds since epoch as `YYYY-MM-DD HH:MM:SS UTC`.
pub fn timestamp(ms: i64) -> String {
    DateTime::from_timestamp_millis(ms)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Best bid/ask spread.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spread {
    /// `best_ask - best_bid`, saturating at the representable range
    pub absolute: Decimal,
    /// `absolute / best_bid × 100`; absent when the best bid is zero
    pub percent: Option<Decimal>,
}

impl Spread {
    pub fn between(best_bid: Decimal, best_ask: Decimal) -> Self {
        let absolute = best_ask.saturating_sub(best_bid);
        let percent = if best_bid.is_zero() {
            None
        } else {
            Some(percent_of(absolute, best_bid))
        };
        Self { absolute, percent }
    }

    /// `$1.50 (0.003%)`, or `$1.50 (N/A)` without a percentage.
    pub fn describe(&self) -> String {
        let percent = self
            .percent
            .map(|p| format!("{}%", grouped(p, 3)))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());
        format!("{} ({})", usd(self.absolute), percent)
    }
}
