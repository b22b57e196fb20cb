//! JavaScript number notation.

/// Formats `n` the way `JSON.stringify` prints a number, which is what
/// astring emits for numeric literals. Non-finite values have no JSON form
/// and print as `null`.
///
/// ```rust
/// use sigil::codegen::format_number;
/// assert_eq!(format_number(42.0), "42");
/// assert_eq!(format_number(0.5), "0.5");
/// assert_eq!(format_number(1e21), "1e+21");
/// assert_eq!(format_number(f64::INFINITY), "null");
/// ```
pub fn format_number(n: f64) -> String {
    if !n.is_finite() {
        return "null".to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }
    let magnitude = n.abs();
    if (1e-6..1e21).contains(&magnitude) {
        n.to_string()
    } else {
        exponential(n)
    }
}

/// Rust writes `1e21`, JavaScript writes `1e+21`.
fn exponential(n: f64) -> String {
    let formatted = format!("{:e}", n);
    match formatted.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
        _ => formatted,
    }
}
