//! Input masks for the lead-capture fields.
//!
//! Each mask keeps only digits, then applies the pattern once enough digits
//! are present; shorter input stays as bare digits so typing is not fought.

/// Digits of `value`, in order
pub fn digits(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// CPF: `000.000.000-00`
pub fn format_tax_id(value: &str) -> String {
    mask(value, &[(3, ""), (3, "."), (3, "."), (2, "-")], 14)
}

/// Mobile phone: `(00) 00000-0000`
pub fn format_phone(value: &str) -> String {
    let digits = digits(value);
    if digits.len() < 11 {
        return truncate(&digits, 15);
    }
    format!("({}) {}-{}", &digits[..2], &digits[2..7], &digits[7..11])
}

/// CEP: `00000-000`
pub fn format_postal_code(value: &str) -> String {
    mask(value, &[(5, ""), (3, "-")], 9)
}

/// Apply `groups` of `(width, separator-before)` once every group is filled
fn mask(value: &str, groups: &[(usize, &str)], max_len: usize) -> String {
    let digits = digits(value);
    let needed: usize = groups.iter().map(|(width, _)| width).sum();
    if digits.len() < needed {
        return truncate(&digits, max_len);
    }

    let mut out = String::with_capacity(max_len);
    let mut start = 0;
    for (width, separator) in groups {
        out.push_str(separator);
        out.push_str(&digits[start..start + width]);
        start += width;
    }
    out
}

fn truncate(value: &str, max_len: usize) -> String {
    value.chars().take(max_len).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_id() {
        assert_eq!(format_tax_id("12345678901"), "123.456.789-01");
        assert_eq!(format_tax_id("123.456.789-01"), "123.456.789-01");
        assert_eq!(format_tax_id("1234567890123"), "123.456.789-01");
        assert_eq!(format_tax_id("1234"), "1234");
    }

    #[test]
    fn test_phone() {
        assert_eq!(format_phone("11987654321"), "(11) 98765-4321");
        assert_eq!(format_phone("+55 11 98765-4321"), "(55) 11987-6543");
        assert_eq!(format_phone("1198765"), "1198765");
    }

    #[test]
    fn test_postal_code() {
        assert_eq!(format_postal_code("01310100"), "01310-100");
        assert_eq!(format_postal_code("01310-100"), "01310-100");
        assert_eq!(format_postal_code("0131"), "0131");
    }
}
