//! Formatting utilities used for CLI outputs.

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// Two decimals with thousands separators: `1234567.5` → `1,234,567.50`.
pub fn amount(v: f64) -> String {
    let raw = format!("{:.2}", v.abs());
    let (int_part, frac) = raw.split_once('.').unwrap_or((raw.as_str(), "00"));

    let mut grouped = String::new();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if v < 0.0 && raw != "0.00" { "-" } else { "" };
    format!("{sign}{grouped}.{frac}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_are_grouped() {
        assert_eq!(amount(0.0), "0.00");
        assert_eq!(amount(999.999), "1,000.00");
        assert_eq!(amount(1234567.5), "1,234,567.50");
        assert_eq!(amount(-4200.0), "-4,200.00");
    }
}
