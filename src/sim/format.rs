use std::time::Duration;

const SUFFIXES: [&str; 11] = ["", "K", "M", "B", "T", "Qu", "Qi", "S", "O", "N", "D"];

/// Abbreviate a quantity for display, e.g. `1500.0` becomes `"1.5K"`.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let mut scaled = value.abs();
    let mut index = 0;
    while scaled >= 1000.0 && index + 1 < SUFFIXES.len() {
        scaled /= 1000.0;
        index += 1;
    }
    let mut text = render_scaled(scaled);
    // 999.96 rounds up to "1000"; carry into the next suffix.
    if index + 1 < SUFFIXES.len() && text.parse::<f64>().is_ok_and(|shown| shown >= 1000.0) {
        scaled /= 1000.0;
        index += 1;
        text = render_scaled(scaled);
    }
    let sign = if value < 0.0 && text != "0" { "-" } else { "" };
    format!("{sign}{text}{}", SUFFIXES[index])
}

fn render_scaled(scaled: f64) -> String {
    if scaled.fract() == 0.0 {
        return format!("{scaled:.0}");
    }
    let decimals = if scaled < 10.0 { 2 } else { 1 };
    let text = format!("{scaled:.decimals$}");
    let trimmed = text.trim_end_matches('0').trim_end_matches('.');
    trimmed.to_string()
}

/// Render a duration as `1d 2h 3m 4s`, omitting zero components.
pub fn format_duration(duration: Duration) -> String {
    let total = duration.as_secs();
    let parts = [
        (total / 86_400, "d"),
        ((total % 86_400) / 3_600, "h"),
        ((total % 3_600) / 60, "m"),
        (total % 60, "s"),
    ];
    let text: Vec<String> = parts
        .iter()
        .filter(|(value, _)| *value > 0)
        .map(|(value, unit)| format!("{value}{unit}"))
        .collect();
    if text.is_empty() {
        "0s".to_string()
    } else {
        text.join(" ")
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_sign_is_preserved(n in 1.0f64..1e20) {
            let positive = format_number(n);
            let negative = format_number(-n);
            prop_assert!(!positive.starts_with('-'), "got: {}", positive);
            prop_assert_eq!(negative, format!("-{positive}"));
        }

        #[test]
        fn prop_shown_mantissa_below_one_thousand(n in 1000.0f64..1e30) {
            let s = format_number(n);
            let mantissa: String = s.chars().take_while(|c| c.is_ascii_digit() || *c == '.').collect();
            let shown: f64 = mantissa.parse().expect("numeric prefix");
            prop_assert!(shown < 1000.0, "got: {}", s);
        }
    }
}
