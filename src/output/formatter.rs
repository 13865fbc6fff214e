use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use super::report::ScoreReport;
use crate::scoring::{CredibilityFactor, ScoreLevel, SCORE_RANGES};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a numeric value without trailing zeros ("1700", "12.5", "NaN" as "n/a")
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return "n/a".to_string();
    }
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        let formatted = format!("{:.2}", value);
        formatted.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Color a level name by tier
pub fn format_level(level: ScoreLevel, use_colors: bool) -> String {
    let name = level.as_str();
    if !use_colors {
        return name.to_string();
    }
    match level {
        ScoreLevel::Untrusted => name.red().bold().to_string(),
        ScoreLevel::Questionable => name.yellow().to_string(),
        ScoreLevel::Neutral => name.to_string(),
        ScoreLevel::Reputable => name.green().to_string(),
        ScoreLevel::Exemplary => name.cyan().bold().to_string(),
    }
}

/// One-line summary: "Score: 1700  reputable  XP x1.25"
pub fn format_summary(report: &ScoreReport, use_colors: bool) -> String {
    let score = report.score.map_or_else(|| "n/a".to_string(), format_number);
    let score = if use_colors {
        score.bold().to_string()
    } else {
        score
    };

    match (report.level, report.xp_multiplier) {
        (Some(level), Some(multiplier)) => format!(
            "Score: {}  {}  XP x{}",
            score,
            format_level(level, use_colors),
            format_number(multiplier)
        ),
        _ => format!("Score: {}  (no level)", score),
    }
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format credibility factors as a table: name, raw value, weighted value, impact range.
/// No headers; the name column is padded to the longest name and truncated on
/// narrow terminals.
pub fn format_factors_table(factors: &[CredibilityFactor], use_colors: bool) -> String {
    if factors.is_empty() {
        return "No credibility factors.".to_string();
    }

    let value_width = 9;
    let weighted_width = 9;
    let separator = "  ";
    let longest = factors.iter().map(|f| f.name.chars().count()).max().unwrap_or(0);

    // value + weighted + range (~16) + separators
    let fixed_width = value_width + weighted_width + 16 + separator.len() * 3;
    let name_width = match get_terminal_width() {
        Some(width) if width > fixed_width + 10 => longest.min(width - fixed_width),
        Some(_) => longest.min(20),
        None => longest,
    };

    factors
        .iter()
        .map(|factor| {
            let name = truncate_name(&factor.name, name_width);
            let name = format!("{:<width$}", name, width = name_width);
            let value = format!("{:>width$}", format_number(factor.value), width = value_width);
            let weighted = format!("{:>width$}", format_weighted(factor.weighted), width = weighted_width);
            let range = format!(
                "[{}..{}]",
                format_number(factor.range.min),
                format_number(factor.range.max)
            );

            if use_colors {
                let weighted = if factor.weighted > 0.0 {
                    weighted.green().to_string()
                } else if factor.weighted < 0.0 {
                    weighted.red().to_string()
                } else {
                    weighted.dimmed().to_string()
                };
                format!(
                    "{}{}{}{}{}{}{}",
                    name,
                    separator,
                    value,
                    separator,
                    weighted,
                    separator,
                    range.dimmed()
                )
            } else {
                format!("{}{}{}{}{}{}{}", name, separator, value, separator, weighted, separator, range)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_weighted(weighted: f64) -> String {
    if weighted > 0.0 {
        format!("+{}", format_number(weighted))
    } else {
        format_number(weighted)
    }
}

/// Format credibility factors as tab-separated values for scripting
/// Columns: name, value, weighted, min, max (no headers, no colors)
pub fn format_tsv(factors: &[CredibilityFactor]) -> String {
    factors
        .iter()
        .map(|factor| {
            format!(
                "{}\t{}\t{}\t{}\t{}",
                factor.name,
                format_number(factor.value),
                format_number(factor.weighted),
                format_number(factor.range.min),
                format_number(factor.range.max)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Full human-readable report: summary, factor table, then any errors
pub fn format_report(report: &ScoreReport, use_colors: bool) -> String {
    let mut out = format_summary(report, use_colors);
    out.push_str("\n\n");
    out.push_str(&format_factors_table(&report.factors, use_colors));

    if !report.errors.is_empty() {
        out.push_str("\n\n");
        let heading = "Missing or invalid inputs:";
        if use_colors {
            out.push_str(&heading.red().to_string());
        } else {
            out.push_str(heading);
        }
        for name in &report.errors {
            out.push_str(&format!("\n  - {}", name));
        }
    }
    out
}

/// The score level table: level, bounds, XP multiplier
pub fn format_ranges(use_colors: bool) -> String {
    SCORE_RANGES
        .iter()
        .map(|range| {
            // Pad outside the color codes so columns line up
            let padding = " ".repeat(12 - range.level.as_str().len());
            let name = format!("{}{}", format_level(range.level, use_colors), padding);
            format!(
                "{}  {:>4} - {:<4}  XP x{}",
                name,
                format_number(range.min),
                format_number(range.max),
                format_number(range.level.xp_multiplier())
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
