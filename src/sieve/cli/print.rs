use chrono::{DateTime, Utc};
use colored::Colorize;
use sieve::api::{CmdMessage, MessageLevel};
use sieve::model::{Column, Condition, LoadedView, SavedFilter};
use sieve::operators::{get_operator, OperatorSpec};
use sieve::records::{json_field, JsonRecord};
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const MAX_CELL_WIDTH: usize = 28;
const DEFAULT_MARKER: &str = "★";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => eprintln!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => eprintln!("{}", message.content.yellow()),
            MessageLevel::Error => eprintln!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_views(views: &[SavedFilter]) {
    if views.is_empty() {
        return;
    }

    let name_width = views
        .iter()
        .map(|v| v.name.width())
        .max()
        .unwrap_or(0)
        .min(MAX_CELL_WIDTH);

    for (i, view) in views.iter().enumerate() {
        let marker = if view.is_default() {
            DEFAULT_MARKER.yellow().to_string()
        } else {
            " ".to_string()
        };
        let name = truncate_to_width(&view.name, name_width);
        let padding = name_width.saturating_sub(name.width());
        let count = match view.conditions.len() {
            1 => "1 condition".to_string(),
            n => format!("{} conditions", n),
        };
        let age = view.created_at.map(format_time_ago).unwrap_or_default();

        println!(
            "{} {} {}{}  {}  {}",
            marker,
            format!("{}.", i + 1).yellow(),
            name.bold(),
            " ".repeat(padding),
            count,
            age.dimmed()
        );
    }
}

pub(super) fn print_loaded(view: &SavedFilter, loaded: &LoadedView) {
    let default = if view.is_default() { " (default)" } else { "" };
    println!("{}{}", view.name.bold(), default.yellow());
    println!("{}", format!("id: {}", view.id).dimmed());
    for condition in &loaded.conditions {
        println!("  {}", describe_condition(condition));
    }
    if !loaded.filter_state.is_empty() {
        println!("{}", "filters:".dimmed());
        for (field, value) in &loaded.filter_state {
            println!("  {} = {}", field, value);
        }
    }
}

pub(super) fn describe_condition(condition: &Condition) -> String {
    let op = get_operator(&condition.operator)
        .map(|op| op.label.to_lowercase())
        .unwrap_or_else(|| format!("{} (unknown)", condition.operator));
    format!(
        "{} {} {}",
        condition.field.cyan(),
        op,
        format!("\"{}\"", condition.value).green()
    )
}

pub(super) fn print_operators(operators: &[OperatorSpec]) {
    let width = operators.iter().map(|op| op.id.len()).max().unwrap_or(0);
    for op in operators {
        println!("{:<width$}  {}", op.id, op.label.dimmed(), width = width);
    }
}

pub(super) fn print_columns(columns: &[Column]) {
    let width = columns.iter().map(|c| c.id.width()).max().unwrap_or(0);
    for column in columns {
        let padding = width.saturating_sub(column.id.width());
        let kind = if column.numeric {
            "numeric, not filterable".dimmed().to_string()
        } else {
            String::new()
        };
        println!(
            "{}{}  {}  {}",
            column.id,
            " ".repeat(padding),
            column.label,
            kind
        );
    }
}

pub(super) fn print_values<'a>(values: impl IntoIterator<Item = &'a String>) {
    for value in values {
        println!("{}", value);
    }
}

pub(super) fn print_records(columns: &[Column], records: &[&JsonRecord]) {
    if records.is_empty() {
        println!("No records match.");
        return;
    }

    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|r| {
            columns
                .iter()
                .map(|c| truncate_to_width(&json_field(r, &c.id).unwrap_or_default(), MAX_CELL_WIDTH))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, c)| {
            rows.iter()
                .map(|row| row[i].width())
                .chain(std::iter::once(c.label.width().min(MAX_CELL_WIDTH)))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let header: Vec<String> = columns
        .iter()
        .zip(&widths)
        .map(|(c, w)| pad(&truncate_to_width(&c.label, MAX_CELL_WIDTH), *w))
        .collect();
    println!("{}", header.join("  ").trim_end().bold());

    for row in rows {
        let cells: Vec<String> = row.iter().zip(&widths).map(|(v, w)| pad(v, *w)).collect();
        println!("{}", cells.join("  ").trim_end());
    }
}

pub(super) fn print_records_json(records: &[&JsonRecord]) -> serde_json::Result<()> {
    println!("{}", serde_json::to_string_pretty(records)?);
    Ok(())
}

fn pad(s: &str, width: usize) -> String {
    format!("{}{}", s, " ".repeat(width.saturating_sub(s.width())))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }
    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    Formatter::new().convert(duration.to_std().unwrap_or_default())
}
