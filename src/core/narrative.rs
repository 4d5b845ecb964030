//! Display text for a comparison: rupee formatting and the summary lines shown
//! under the chart.

use super::engine::BASE_PRICE;
use super::types::{Regime, Summary};

pub const FORMULA_LINES: [&str; 3] = [
    "Old Tax = Max(0, (Sell Price - Indexed Cost)) * 20%",
    "New Tax = Max(0, (Sell Price - Purchase Price) * 12.5%)",
    "Indexed Cost = Purchase Price * (1 + Indexation Rate)^Years",
];

const MAX_FRACTION_DIGITS: usize = 3;

/// Formats an amount with Indian digit grouping (lakh/crore), e.g.
/// `12345678.5` -> `1,23,45,678.5`. At most three fraction digits are kept,
/// ties round away from zero, and trailing zeros are dropped. Negative values,
/// including ones that round to zero, keep their `-` like `toLocaleString`.
pub fn format_inr(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        let symbol = if value > 0.0 { "∞" } else { "-∞" };
        return symbol.to_string();
    }

    let fixed = fixed_half_away(value.abs());
    let (int_digits, frac_digits) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_digits = frac_digits.trim_end_matches('0');

    let mut out = String::with_capacity(fixed.len() + fixed.len() / 2 + 1);
    if value.is_sign_negative() {
        out.push('-');
    }
    out.push_str(&group_indian(int_digits));
    if !frac_digits.is_empty() {
        out.push('.');
        out.push_str(frac_digits);
    }
    out
}

// `{:.3}` rounds exact ties to even. The only f64 values that tie at the third
// decimal are odd multiples of 1/16, whose four-digit expansion is exact, so
// those get their last kept digit carried up by hand.
fn fixed_half_away(abs: f64) -> String {
    if (abs * 16.0) % 2.0 != 1.0 {
        return format!("{:.*}", MAX_FRACTION_DIGITS, abs);
    }

    let exact = format!("{:.*}", MAX_FRACTION_DIGITS + 1, abs);
    let mut digits: Vec<u8> = exact.bytes().take(exact.len() - 1).collect();
    let mut idx = digits.len();
    loop {
        if idx == 0 {
            digits.insert(0, b'1');
            break;
        }
        idx -= 1;
        match digits[idx] {
            b'.' => continue,
            b'9' => digits[idx] = b'0',
            d => {
                digits[idx] = d + 1;
                break;
            }
        }
    }
    digits.into_iter().map(char::from).collect()
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

pub fn rupees(value: f64) -> String {
    format!("₹{}", format_inr(value))
}

pub fn base_price_line() -> String {
    format!("Base property value: {} (1 Crore)", rupees(BASE_PRICE))
}

pub fn summary_lines(summary: &Summary) -> Vec<String> {
    match *summary {
        Summary::Crossover {
            year,
            sell_price,
            indexed_cost,
            old_tax,
            new_tax,
        } => vec![
            format!("Crossover Point: {year} years"),
            "At crossover:".to_string(),
            format!("- Sell Price: {}", rupees(sell_price)),
            format!("- Indexed Cost: {}", rupees(indexed_cost)),
            format!("- Old Tax: {}", rupees(old_tax)),
            format!("- New Tax: {}", rupees(new_tax)),
        ],
        Summary::Throughout { favoured, .. } => {
            let system = match favoured {
                Regime::Old => "Old",
                Regime::New => "New",
            };
            vec![format!(
                "{system} tax system remains more advantageous throughout the selected holding period."
            )]
        }
    }
}
