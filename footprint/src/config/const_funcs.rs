use crate::config::calculator_config::RoundingMode;
use crate::config::constants::*;

/// Round `value` to `places` decimal places using the given tie-breaking rule.
///
/// Rounds the exact binary value of `value`, so 0.085 (stored as
/// 0.08500000000000000611...) goes to 0.09. Only values whose binary
/// expansion ends exactly on a 5 are ties.
pub fn round_to_places(value: f64, places: u32, mode: RoundingMode) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let places = places.min(MAX_DECIMAL_PLACES) as usize;

    // `{:.N}` formats the exact expansion and breaks exact ties towards even
    let nearest = parse_decimal(&format!("{:.*}", places, value), value);
    match mode {
        RoundingMode::HalfEven => nearest,
        RoundingMode::HalfUp => {
            if nearest.abs() < value.abs() && is_exact_tie(value, places) {
                let step = 10f64.powi(places as i32).recip().copysign(value);
                parse_decimal(&format!("{:.*}", places, nearest + step), value)
            } else {
                nearest
            }
        }
    }
}

fn parse_decimal(formatted: &str, fallback: f64) -> f64 {
    formatted.parse().unwrap_or(fallback)
}

/// True when the exact decimal expansion of `value` is a 5 directly after
/// `places` fractional digits with nothing following it.
fn is_exact_tie(value: f64, places: usize) -> bool {
    let exact = format!("{:.*}", F64_MAX_FRACTION_DIGITS, value.abs());
    let Some((_, fraction)) = exact.split_once('.') else {
        return false;
    };
    let digits = fraction.as_bytes();
    digits.len() > places
        && digits[places] == b'5'
        && digits[places + 1..].iter().all(|d| *d == b'0')
}

pub fn kg_to_tonnes(kg: f64) -> f64 {
    kg / KG_PER_TONNE
}

/// Daily rate to an annual total.
pub fn annualize_daily(daily: f64) -> f64 {
    if daily > 0.0 {
        daily * DAYS_PER_YEAR
    } else {
        daily
    }
}

/// Monthly rate to an annual total.
pub fn annualize_monthly(monthly: f64) -> f64 {
    if monthly > 0.0 {
        monthly * MONTHS_PER_YEAR
    } else {
        monthly
    }
}

/// Share of `part` in `whole` as a percentage, 0 when `whole` is zero.
pub fn percentage_of(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        (part / whole) * 100.0
    } else {
        0.0
    }
}
