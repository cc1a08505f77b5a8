//! Shared formatting helpers for terminal output

/// Format a currency amount held as `f64` units, e.g. `$9.00` or `-$2.50`
pub fn format_money_f64(value: f64, symbol: &str) -> String {
    if value < 0.0 {
        format!("-{}{:.2}", symbol, value.abs())
    } else {
        format!("{}{:.2}", symbol, value)
    }
}

/// Format a percentage with precision that shrinks as the value grows
pub fn format_percentage(pct: f64) -> String {
    if pct > 0.0 && pct < 0.1 {
        format!("{:.2}%", pct)
    } else if pct < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// A `width`-cell bar filled in proportion to `value / max_value`, capped at full
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return "░".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Truncate to `max_chars` characters, ending in `...` when shortened
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    if max_chars <= 3 {
        return ".".repeat(max_chars);
    }
    let head: String = s.chars().take(max_chars - 3).collect();
    format!("{}...", head)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money_f64() {
        assert_eq!(format_money_f64(9.0, "$"), "$9.00");
        assert_eq!(format_money_f64(-2.5, "$"), "-$2.50");
        assert_eq!(format_money_f64(10.0 / 3.0, "€"), "€3.33");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(0.05), "0.05%");
        assert_eq!(format_percentage(5.5), "5.5%");
        assert_eq!(format_percentage(50.0), "50%");
    }

    #[test]
    fn test_format_bar() {
        let bar = format_bar(50.0, 100.0, 10);
        assert_eq!(bar.chars().filter(|c| *c == '█').count(), 5);

        let over = format_bar(150.0, 100.0, 10);
        assert_eq!(over, "█".repeat(10));

        assert_eq!(format_bar(0.0, 100.0, 4), "░░░░");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Weekly groceries", 10), "Weekly ...");
        assert_eq!(truncate("Café", 4), "Café");
        assert_eq!(truncate("Coffee", 2), "..");
    }
}
