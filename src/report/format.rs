//! Display formatting for headline values and timestamps.
//!
//! The literal formats are fixed:
//! - numbers: two decimals, `.` thousands grouping, `,` decimals (`1.234,56`)
//! - timestamps: `DD.MM.YYYY HH:MM` on the wall clock
//! - percentage change: two decimals with a `.` point, wrapped in parentheses

use crate::io::temporal::wall_clock;
use crate::report::headline::Headline;

/// Unit appended to the headline value.
pub const VALUE_UNIT: &str = "Punkte";

/// Presentation tone of the change figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Positive,
    Negative,
}

/// Ready-to-display headline strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlineText {
    /// `1.234,56 Punkte`
    pub value: String,
    /// `Stand: 05.03.2024 09:30`
    pub stamp: String,
    /// `+10,00`
    pub change_abs: String,
    /// `(+10.00%)`
    pub change_pct: String,
    pub tone: Tone,
}

/// German-locale number with exactly two decimals.
pub fn format_number_de(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    let fixed = format!("{:.2}", n.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if n < 0.0 { "-" } else { "" };
    format!("{sign}{},{frac_part}", group_thousands(int_part, '.'))
}

/// Two-decimal percentage figure (`12.34`, `-0.50`, `Infinity`, `NaN`).
pub fn format_percent(pct: f64) -> String {
    if pct.is_nan() {
        "NaN".to_string()
    } else if pct.is_infinite() {
        let s = if pct > 0.0 { "Infinity" } else { "-Infinity" };
        s.to_string()
    } else {
        format!("{pct:.2}")
    }
}

/// `DD.MM.YYYY HH:MM`; `-` for timestamps outside the calendar.
pub fn format_timestamp_de(ts: i64) -> String {
    wall_clock(ts)
        .map(|wall| wall.format("%d.%m.%Y %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Short axis label for a timestamp (`05.03.24`).
pub fn format_axis_date(ts: i64) -> String {
    wall_clock(ts)
        .map(|wall| wall.format("%d.%m.%y").to_string())
        .unwrap_or_default()
}

pub fn format_headline(headline: &Headline) -> HeadlineText {
    let sign = if headline.is_non_negative { "+" } else { "" };
    HeadlineText {
        value: format!("{} {VALUE_UNIT}", format_number_de(headline.last_value)),
        stamp: format!("Stand: {}", format_timestamp_de(headline.last_time)),
        change_abs: format!("{sign}{}", format_number_de(headline.change_abs)),
        change_pct: format!("({sign}{}%)", format_percent(headline.change_pct)),
        tone: if headline.is_non_negative {
            Tone::Positive
        } else {
            Tone::Negative
        },
    }
}

/// Text block printed by `points show`.
pub fn format_summary(range_label: &str, shown: usize, total: usize, headline: Option<&Headline>) -> String {
    let mut out = String::new();
    out.push_str(&format!("Range: {range_label} ({shown} of {total} points)\n"));

    match headline {
        Some(h) => {
            let text = format_headline(h);
            out.push_str(&format!("{}  {} {}\n", text.value, text.change_abs, text.change_pct));
            out.push_str(&text.stamp);
            out.push('\n');
        }
        None => out.push_str("No data in this range.\n"),
    }

    out
}

fn group_thousands(digits: &str, sep: char) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(sep);
        }
        out.push(ch);
    }
    out
}
