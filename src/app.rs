use std::time::Duration;

use clap::{error::ErrorKind, Parser};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tokio::io::BufReader;
use tracing::error;

use crate::cli::args::CliArgs;
use crate::cli::validation;
use crate::config::{self, ConfigFile};
use crate::controller::ControlState;
use crate::output::{self, OutputFormat, View};
use crate::records::{SortField, SortOrder};
use crate::runner::{Options, Runner, DEFAULT_URL};
use crate::telemetry;

fn print_banner() {
    eprintln!(
        "{} {}",
        "company-finder".bold().cyan(),
        format!("v{}", env!("CARGO_PKG_VERSION")).white()
    );
    eprintln!();
}

fn format_kv_line(label: &str, value: &str) {
    eprintln!(":: {:<10}: {}", label, value);
}

fn format_opt_value<'a>(v: &'a str, default: &'a str) -> &'a str {
    if v.trim().is_empty() {
        default
    } else {
        v
    }
}

#[derive(Clone, Debug)]
struct RunConfig {
    url: String,
    attempts: u32,
    timeout: u64,
    debounce_ms: u64,
    controls: ControlState,
    output: Option<String>,
    output_format: OutputFormat,
    interactive: bool,
    no_color: bool,
    quiet: bool,
    log_level: String,
}

fn build_run_config(args: CliArgs, cfg: ConfigFile) -> Result<RunConfig, String> {
    validation::validate(&args)?;

    let no_color = if args.color {
        false
    } else {
        args.no_color || cfg.no_color.unwrap_or(false)
    };

    let url = args
        .url
        .or(cfg.url)
        .map(|u| u.trim().to_string())
        .unwrap_or_else(|| DEFAULT_URL.to_string());
    reqwest::Url::parse(&url).map_err(|e| format!("invalid url '{url}': {e}"))?;

    let attempts = args.attempts.or(cfg.attempts).unwrap_or(3);
    if attempts == 0 {
        return Err("invalid attempts, expected positive integer".to_string());
    }
    let timeout = args.timeout.or(cfg.timeout).unwrap_or(5);
    if timeout == 0 {
        return Err("invalid timeout, expected positive integer".to_string());
    }
    let debounce_ms = args.debounce.or(cfg.debounce_ms).unwrap_or(300);

    let sort_raw = args
        .sort
        .or(cfg.sort)
        .unwrap_or_else(|| "name".to_string());
    let sort = SortField::parse(&sort_raw)
        .ok_or_else(|| format!("invalid sort '{sort_raw}', expected name or employees"))?;
    let order_raw = args
        .order
        .or(cfg.order)
        .unwrap_or_else(|| "asc".to_string());
    let order = SortOrder::parse(&order_raw)
        .ok_or_else(|| format!("invalid order '{order_raw}', expected asc or desc"))?;

    let controls = ControlState {
        country: args.country.or(cfg.country).unwrap_or_default(),
        industry: args.industry.or(cfg.industry).unwrap_or_default(),
        sort,
        order,
    };

    let output = args
        .output
        .or(cfg.output)
        .map(|p| config::expand_tilde(&p).to_string_lossy().into_owned());
    let output_format = match args.output_format.or(cfg.output_format) {
        Some(raw) => OutputFormat::parse(&raw)
            .ok_or_else(|| format!("invalid output format '{raw}', expected text, json or html"))?,
        None => output
            .as_deref()
            .and_then(output::infer_format_from_path)
            .unwrap_or(OutputFormat::Text),
    };

    let interactive = args.interactive || cfg.interactive.unwrap_or(false);
    let log_level = telemetry::level_for_verbosity(args.verbose, cfg.log_level.as_deref());

    Ok(RunConfig {
        url,
        attempts,
        timeout,
        debounce_ms,
        controls,
        output,
        output_format,
        interactive,
        no_color,
        quiet: args.quiet,
        log_level,
    })
}

fn build_spinner(quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    pb.set_draw_target(ProgressDrawTarget::stderr());
    pb.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message("loading companies");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn emit(run: &RunConfig, view: &View) -> Result<(), String> {
    let rendered = output::render(view, run.output_format);
    match run.output.as_deref() {
        Some(path) => std::fs::write(path, &rendered)
            .map_err(|e| format!("failed to write output file '{path}': {e}")),
        None => {
            use std::io::Write;
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(&rendered)
                .and_then(|_| stdout.flush())
                .map_err(|e| format!("failed to write to stdout: {e}"))
        }
    }
}

fn print_summary(run: &RunConfig, view: &View) {
    if run.quiet {
        return;
    }
    format_kv_line(
        "Results",
        &format!("{} shown", view.results.len()).green().to_string(),
    );
    if let Some(path) = run.output.as_deref() {
        format_kv_line("Written", path);
    }
}

async fn run_async(run: RunConfig) -> Result<(), String> {
    if run.no_color {
        colored::control::set_override(false);
    }
    if !run.quiet {
        print_banner();
        format_kv_line("URL", &run.url);
        format_kv_line(
            "HTTP",
            &format!("attempts={} timeout={}s", run.attempts, run.timeout),
        );
        format_kv_line(
            "Filters",
            &format!(
                "country={} industry={}",
                format_opt_value(&run.controls.country, "all"),
                format_opt_value(&run.controls.industry, "all")
            ),
        );
        format_kv_line(
            "Sort",
            &format!(
                "{} {}",
                run.controls.sort.control_value(),
                run.controls.order.control_value()
            ),
        );
        eprintln!();
    }

    let runner = Runner::new(Options {
        url: run.url.clone(),
        attempts: run.attempts,
        timeout_seconds: run.timeout,
        debounce_ms: run.debounce_ms,
        controls: run.controls.clone(),
    })
    .map_err(|e| e.to_string())?;

    let spinner = build_spinner(run.quiet);
    let mut controller = match runner.start().await {
        Ok(controller) => {
            spinner.finish_and_clear();
            controller
        }
        Err(e) => {
            spinner.abandon_with_message("loading companies (failed)");
            return Err(e.to_string());
        }
    };

    emit(&run, controller.view())?;
    print_summary(&run, controller.view());

    if run.interactive {
        if !run.quiet {
            format_kv_line(
                "Session",
                "type country=.., industry=.., sort=.., order=.., reset or quit",
            );
        }
        let stdin = BufReader::new(tokio::io::stdin());
        runner
            .drive(&mut controller, stdin, |view| {
                if let Err(e) = emit(&run, view) {
                    error!(error = %e, "failed to render view");
                }
                print_summary(&run, view);
            })
            .await
            .map_err(|e| e.to_string())?;
    }

    Ok(())
}

pub fn run_cli() -> Result<(), String> {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                let _ = e.print();
                return Ok(());
            }
            _ => return Err(e.to_string()),
        },
    };

    let user_config_path = args.config.clone().map(|p| config::expand_tilde(&p));

    if args.init_config {
        let path = user_config_path
            .or_else(config::default_config_path)
            .ok_or_else(|| "unable to determine a config path".to_string())?;
        config::ensure_default_config_file(&path)?;
        println!("{}", path.display());
        return Ok(());
    }

    let cfg = match user_config_path.as_ref() {
        Some(path) => config::load_config(path, false)?,
        None => match config::default_config_path() {
            Some(path) => config::load_config(&path, true)?,
            None => ConfigFile::default(),
        },
    };

    let run = build_run_config(args, cfg)?;

    telemetry::init(&run.log_level, !run.no_color).map_err(|e| e.to_string())?;

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to build runtime: {e}"))?;

    rt.block_on(run_async(run))?;
    Ok(())
}
