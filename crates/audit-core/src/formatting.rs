/// Format an integer count with thousands separators.
///
/// # Examples
///
/// ```
/// use audit_core::formatting::format_count;
///
/// assert_eq!(format_count(0), "0");
/// assert_eq!(format_count(9_531), "9,531");
/// assert_eq!(format_count(1_234_567), "1,234,567");
/// ```
pub fn format_count(value: u64) -> String {
    group_thousands(&value.to_string())
}

/// Format a rupee amount in the Indian numbering system.
///
/// Groups the last three digits, then pairs: one lakh is `₹1,00,000` and one
/// crore is `₹1,00,00,000`.
///
/// # Examples
///
/// ```
/// use audit_core::formatting::format_inr;
///
/// assert_eq!(format_inr(50_000), "₹50,000");
/// assert_eq!(format_inr(550_000), "₹5,50,000");
/// assert_eq!(format_inr(1_000_000), "₹10,00,000");
/// ```
pub fn format_inr(amount: u64) -> String {
    format!("₹{}", group_indian(&amount.to_string()))
}

/// Format a drop-rate fraction as a percent string.
///
/// # Examples
///
/// ```
/// use audit_core::formatting::format_rate;
///
/// assert_eq!(format_rate(0.02, 2), "2.00%");
/// assert_eq!(format_rate(5.0 / 17.0, 2), "29.41%");
/// assert_eq!(format_rate(0.1, 1), "10.0%");
/// ```
pub fn format_rate(rate: f64, decimals: u32) -> String {
    format!("{:.prec$}%", rate * 100.0, prec = decimals as usize)
}

/// Calculate `(part / whole) * 100`, rounded to `decimal_places`.
///
/// Returns `0.0` if `whole` is zero to avoid division by zero.
///
/// # Examples
///
/// ```
/// use audit_core::formatting::percentage;
///
/// assert!((percentage(3.0, 150.0, 1) - 2.0).abs() < 1e-9);
/// assert_eq!(percentage(0.0, 0.0, 2), 0.0);
/// ```
pub fn percentage(part: f64, whole: f64, decimal_places: u32) -> f64 {
    if whole == 0.0 {
        return 0.0;
    }
    let factor = 10_f64.powi(decimal_places as i32);
    ((part / whole) * 100.0 * factor).round() / factor
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Insert commas every three digits from the right of an integer string.
fn group_thousands(s: &str) -> String {
    if s.len() <= 3 {
        return s.to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    let remainder = chars.len() % 3;
    for (i, &c) in chars.iter().enumerate() {
        if i != 0 && (i % 3 == remainder) {
            result.push(',');
        }
        result.push(c);
    }
    result
}

/// Indian-system grouping: the rightmost group takes three digits, every
/// group left of it takes two.
fn group_indian(s: &str) -> String {
    if s.len() <= 3 {
        return s.to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    let split = chars.len() - 3;
    let tail: String = chars[split..].iter().collect();

    let mut groups: Vec<String> = Vec::new();
    let mut end = split;
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(chars[start..end].iter().collect());
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
