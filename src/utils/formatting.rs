//! Formatting utilities used for CLI and export outputs.

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// Amount with currency symbol and thousands separators: `R 12,345.50`.
pub fn money(amount: f64, symbol: &str) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", amount.abs());
    let (int_part, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if symbol.is_empty() {
        format!("{sign}{grouped}.{frac}")
    } else {
        format!("{sign}{symbol} {grouped}.{frac}")
    }
}

/// Percentage with two decimals: `33.33%`.
pub fn percent(value: f64) -> String {
    format!("{:.2}%", value)
}

/// "1 person" / "3 people" style pluralisation.
pub fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}
