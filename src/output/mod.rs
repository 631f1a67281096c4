pub mod report;

use serde::Serialize;

use crate::controller::ControlState;
use crate::records::{CountTable, Record};
use crate::utils::{sanitize_input, strip_control};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Html,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "text" | "txt" => Some(Self::Text),
            "json" => Some(Self::Json),
            "html" | "htm" => Some(Self::Html),
            _ => None,
        }
    }
}

pub fn infer_format_from_path(path: &str) -> Option<OutputFormat> {
    let lower = path.trim().to_lowercase();
    if lower.ends_with(".json") {
        return Some(OutputFormat::Json);
    }
    if lower.ends_with(".html") || lower.ends_with(".htm") {
        return Some(OutputFormat::Html);
    }
    if lower.ends_with(".txt") {
        return Some(OutputFormat::Text);
    }
    None
}

/// One entry of a filter select.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub count: usize,
}

impl SelectOption {
    pub fn label(&self) -> String {
        format!("{} ({})", self.value, self.count)
    }

    pub fn to_html(&self, selected: bool) -> String {
        let value = sanitize_input(&self.value);
        let selected = if selected { " selected" } else { "" };
        format!(
            r#"<option value="{value}"{selected}>{value} ({})</option>"#,
            self.count
        )
    }
}

/// Everything the page shows for one render cycle.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct View {
    pub loading: bool,
    pub controls: ControlState,
    pub country_options: Vec<SelectOption>,
    pub industry_options: Vec<SelectOption>,
    pub results: Vec<String>,
}

pub fn select_options(counts: &CountTable) -> Vec<SelectOption> {
    counts
        .sorted_entries()
        .into_iter()
        .map(|(value, count)| SelectOption {
            value: value.to_string(),
            count,
        })
        .collect()
}

pub fn list_item(record: &Record) -> String {
    format!(
        "{} · {} · {} · {}",
        record.name, record.country, record.industry, record.number_of_employees
    )
}

pub fn list_items(records: &[Record]) -> Vec<String> {
    records.iter().map(list_item).collect()
}

/// Option markup for a select, led by the catch-all `All` entry.
pub fn render_options_html(options: &[SelectOption], selected: &str) -> String {
    let mut out = String::new();
    let all = if selected.is_empty() { " selected" } else { "" };
    out.push_str(&format!(r#"<option value=""{all}>All</option>"#));
    for opt in options {
        out.push('\n');
        out.push_str(&opt.to_html(opt.value == selected));
    }
    out
}

pub fn render_items_html(items: &[String]) -> String {
    let mut out = String::new();
    for item in items {
        out.push_str(&format!(r#"<li class="py-2">{}</li>"#, sanitize_input(item)));
        out.push('\n');
    }
    out
}

/// One result per line, with control characters removed.
pub fn render_text(view: &View) -> Vec<u8> {
    let mut out = String::new();
    for item in &view.results {
        out.push_str(&strip_control(item));
        out.push('\n');
    }
    out.into_bytes()
}

pub fn render_json(view: &View) -> Vec<u8> {
    let mut out = serde_json::to_vec_pretty(view).unwrap_or_else(|_| b"{}".to_vec());
    out.push(b'\n');
    out
}

pub fn render_html(view: &View) -> Vec<u8> {
    report::render_html(view)
}

pub fn render(view: &View, format: OutputFormat) -> Vec<u8> {
    match format {
        OutputFormat::Text => render_text(view),
        OutputFormat::Json => render_json(view),
        OutputFormat::Html => render_html(view),
    }
}
