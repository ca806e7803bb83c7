//! Terminal rendering: bordered two-column tables and per-command reports.

use kanga_core::{EggStats, FlipStats, MistyStats};

const LABEL_WIDTH: usize = 24;
const VALUE_WIDTH: usize = 6;

/// One table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelValue {
    pub label: String,
    pub value: String,
}

impl LabelValue {
    pub fn new(label: impl Into<String>, value: impl ToString) -> Self {
        Self {
            label: label.into(),
            value: value.to_string(),
        }
    }
}

/// `part / total * 100`, or 0 when `total` is 0.
pub fn percentage(part: i64, total: i64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    part as f64 / total as f64 * 100.0
}

pub fn format_percentage(part: i64, total: i64) -> String {
    format!("{:.2}%", percentage(part, total))
}

/// Renders `rows` under a centred `title`.
///
/// Every line is `width + 3` characters wide, where `width` is the longest
/// `| label | value ` prefix. Odd title padding puts the extra space on the
/// right.
pub fn render_table(title: &str, rows: &[LabelValue]) -> String {
    let lines: Vec<String> = rows
        .iter()
        .map(|row| {
            format!(
                "| {:<label$} | {:>value$} ",
                row.label,
                row.value,
                label = LABEL_WIDTH,
                value = VALUE_WIDTH
            )
        })
        .collect();

    let width = lines
        .iter()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0);
    let title_len = title.chars().count();
    let left = width.saturating_sub(title_len) / 2;
    let right = width.saturating_sub(title_len + left);

    let border = format!("+{}+", "-".repeat(width + 1));
    let mut out = String::new();
    out.push_str(&border);
    out.push('\n');
    out.push_str(&format!("|{}{}{} |\n", " ".repeat(left), title, " ".repeat(right)));
    out.push_str(&border);
    out.push('\n');
    for line in &lines {
        let pad = width - line.chars().count() + 2;
        out.push_str(&format!("{line}{}|\n", " ".repeat(pad)));
    }
    out.push_str(&border);
    out.push('\n');
    out
}

pub fn print_table(title: &str, rows: &[LabelValue]) {
    print!("{}", render_table(title, rows));
}

pub fn heads_report(stats: &FlipStats) -> Vec<LabelValue> {
    vec![
        LabelValue::new("Total flips", stats.total),
        LabelValue::new("Heads count", stats.total_heads),
        LabelValue::new(
            "Heads percentage",
            format_percentage(stats.total_heads, stats.total),
        ),
    ]
}

pub fn tails_report(stats: &FlipStats) -> Vec<LabelValue> {
    vec![
        LabelValue::new("Total flips", stats.total),
        LabelValue::new("Tails count", stats.total_tails),
        LabelValue::new(
            "Tails percentage",
            format_percentage(stats.total_tails, stats.total),
        ),
    ]
}

pub fn flip_report(stats: &FlipStats) -> Vec<LabelValue> {
    vec![
        LabelValue::new("Total flips", stats.total),
        LabelValue::new("Double heads", stats.double_heads),
        LabelValue::new("Double tails", stats.double_tails),
        LabelValue::new("Total heads", stats.total_heads),
        LabelValue::new("Total tails", stats.total_tails),
        LabelValue::new(
            "Heads percentage",
            format_percentage(stats.total_heads, stats.total),
        ),
        LabelValue::new(
            "Tails percentage",
            format_percentage(stats.total_tails, stats.total),
        ),
        LabelValue::new(
            "Double heads percentage",
            format_percentage(stats.double_heads, stats.total),
        ),
        LabelValue::new(
            "Double tails percentage",
            format_percentage(stats.double_tails, stats.total),
        ),
    ]
}

pub fn egg_report(stats: &EggStats) -> Vec<LabelValue> {
    vec![
        LabelValue::new("Total flips", stats.total_entries),
        LabelValue::new("Total heads", stats.total_heads),
        LabelValue::new("Total tails", stats.total_tails),
        LabelValue::new(
            "Heads percentage",
            format_percentage(stats.total_heads, stats.total_entries),
        ),
        LabelValue::new(
            "Tails percentage",
            format_percentage(stats.total_tails, stats.total_entries),
        ),
        LabelValue::new("Heads that mattered", stats.heads_mattered),
        LabelValue::new(
            "Percent when it mattered",
            format_percentage(stats.heads_mattered, stats.mattered_entries()),
        ),
        LabelValue::new("Average damage", stats.average_damage()),
    ]
}

pub fn misty_report(stats: &MistyStats) -> Vec<LabelValue> {
    let verdict = if stats.total_entries == 0 {
        LabelValue::new("Soul", "clean")
    } else {
        LabelValue::new("Sins", "infinite")
    };

    vec![
        LabelValue::new("Total attempts", stats.total_entries),
        LabelValue::new("Total heads", stats.total_heads),
        verdict,
    ]
}
