/// Render a number with thousands separators in the integer part.
///
/// `1234567` → `"1,234,567"`, `-9876.5` → `"-9,876.5"`. Non-finite values use
/// the labels a browser would print (`NaN`, `Infinity`).
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let text = format_plain(value);
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Shortest display form: integral values print without a decimal point.
pub fn format_plain(value: f64) -> String {
    if value == 0.0 {
        // Collapses -0 to 0.
        return "0".to_string();
    }
    format!("{value}")
}

/// Change rate with one decimal and a percent sign, as printed in reports.
pub fn format_percent_fixed(value: f64) -> String {
    if value.is_finite() {
        format!("{value:.1}%")
    } else {
        format!("{}%", format_number(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(999.0), "999");
        assert_eq!(format_number(1000.0), "1,000");
        assert_eq!(format_number(14_910_352.0), "14,910,352");
        assert_eq!(format_number(-1_234_567.0), "-1,234,567");
    }

    #[test]
    fn leaves_fraction_ungrouped() {
        assert_eq!(format_number(1234.5678), "1,234.5678");
    }

    #[test]
    fn non_finite_values() {
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
    }

    #[test]
    fn plain_form_drops_trailing_zero() {
        assert_eq!(format_plain(1000.0), "1000");
        assert_eq!(format_plain(-16.7), "-16.7");
        assert_eq!(format_plain(-0.0), "0");
    }

    #[test]
    fn fixed_percent() {
        assert_eq!(format_percent_fixed(25.0), "25.0%");
        assert_eq!(format_percent_fixed(-16.66), "-16.7%");
        assert_eq!(format_percent_fixed(f64::NAN), "NaN%");
    }
}
