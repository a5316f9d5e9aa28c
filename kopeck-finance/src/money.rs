/// Whole-unit rendering with a space as thousands separator: 1234567.6 -> "1 234 568".
pub fn fmt_money(v: f64) -> String {
    let rounded = format!("{:.0}", v);
    let (sign, digits) = match rounded.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", rounded.as_str()),
    };

    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(ch);
    }

    if sign.is_empty() || out.chars().all(|c| c == '0') {
        out
    } else {
        format!("{sign}{out}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_money() {
        assert_eq!(fmt_money(0.0), "0");
        assert_eq!(fmt_money(130.0), "130");
        assert_eq!(fmt_money(1500.0), "1 500");
        assert_eq!(fmt_money(85000.0), "85 000");
        assert_eq!(fmt_money(1234567.6), "1 234 568");
        assert_eq!(fmt_money(-2500.0), "-2 500");
        assert_eq!(fmt_money(-0.2), "0");
    }
}
