use crate::cli::args::CliArgs;
use crate::output::OutputFormat;
use crate::records::{SortField, SortOrder};

pub fn validate(args: &CliArgs) -> Result<(), String> {
    if let Some(attempts) = args.attempts {
        if attempts == 0 {
            return Err("invalid --attempts, expected positive integer".to_string());
        }
    }
    if let Some(timeout) = args.timeout {
        if timeout == 0 {
            return Err("invalid --timeout, expected positive integer".to_string());
        }
    }
    if let Some(raw) = args.sort.as_deref() {
        if SortField::parse(raw).is_none() {
            return Err(format!("invalid --sort '{raw}', expected name or employees"));
        }
    }
    if let Some(raw) = args.order.as_deref() {
        if SortOrder::parse(raw).is_none() {
            return Err(format!("invalid --order '{raw}', expected asc or desc"));
        }
    }
    if let Some(raw) = args.output_format.as_deref() {
        if OutputFormat::parse(raw).is_none() {
            return Err(format!(
                "invalid --output-format '{raw}', expected text, json or html"
            ));
        }
    }
    if let Some(raw) = args.url.as_deref() {
        reqwest::Url::parse(raw.trim()).map_err(|e| format!("invalid --url '{raw}': {e}"))?;
    }
    Ok(())
}
