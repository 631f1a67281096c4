use clap::{ArgAction, Parser};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "company-finder",
    version,
    about = "fetch, filter and sort a company directory",
    long_about = "Company finder fetches a company directory over HTTP (with timeout and retry), filters it by country and industry, sorts it by name or employee count, and renders the list as text, JSON or an HTML page.\n\nExamples:\n  company-finder\n  company-finder --country US --sort employees --order desc\n  company-finder -o companies.html\n  company-finder --interactive\n\nIn interactive mode, type control changes such as 'country=US', 'industry=', 'sort=employees', 'order=desc', 'reset' or 'quit'."
)]
pub struct CliArgs {
    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::Count,
        help_heading = "Output",
        help = "Increase log verbosity (-v, -vv)."
    )]
    pub verbose: u8,

    #[arg(
        short = 'c',
        long = "color",
        help_heading = "Output",
        help = "Enable colored output (overrides --no-color)."
    )]
    pub color: bool,

    #[arg(
        short = 'n',
        long = "no-color",
        help_heading = "Output",
        help = "Disable colored output."
    )]
    pub no_color: bool,

    #[arg(
        short = 'q',
        long = "quiet",
        help_heading = "Output",
        help = "Do not print the banner and summary."
    )]
    pub quiet: bool,

    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help_heading = "Output",
        help = "Write the rendered list to a file instead of stdout."
    )]
    pub output: Option<String>,

    #[arg(
        short = 'A',
        long = "output-format",
        visible_alias = "of",
        value_name = "FORMAT",
        help_heading = "Output",
        help = "Output format (text, json, html). Inferred from --output when omitted."
    )]
    pub output_format: Option<String>,

    #[arg(
        short = 'u',
        long = "url",
        visible_alias = "endpoint",
        value_name = "URL",
        help_heading = "Input",
        help = "Data endpoint returning a JSON array of companies."
    )]
    pub url: Option<String>,

    #[arg(
        short = 'C',
        long = "config",
        value_name = "FILE",
        help_heading = "Input",
        help = "Path to config file (defaults to ~/.company-finder/config.yml)."
    )]
    pub config: Option<String>,

    #[arg(
        long = "init-config",
        help_heading = "Input",
        help = "Write a commented default config file (at --config or the default path) and exit."
    )]
    pub init_config: bool,

    #[arg(
        short = 'T',
        long = "timeout",
        value_name = "SECONDS",
        help_heading = "HTTP",
        help = "Per-attempt timeout in seconds."
    )]
    pub timeout: Option<u64>,

    #[arg(
        short = 'a',
        long = "attempts",
        value_name = "N",
        help_heading = "HTTP",
        help = "Maximum fetch attempts, the first one included."
    )]
    pub attempts: Option<u32>,

    #[arg(
        long = "country",
        value_name = "VALUE",
        help_heading = "Filters",
        help = "Only show companies from this country (case-insensitive, exact)."
    )]
    pub country: Option<String>,

    #[arg(
        long = "industry",
        value_name = "VALUE",
        help_heading = "Filters",
        help = "Only show companies in this industry (case-insensitive, exact)."
    )]
    pub industry: Option<String>,

    #[arg(
        short = 's',
        long = "sort",
        value_name = "FIELD",
        help_heading = "Sorting",
        help = "Sort field (name or employees)."
    )]
    pub sort: Option<String>,

    #[arg(
        short = 'O',
        long = "order",
        value_name = "ORDER",
        help_heading = "Sorting",
        help = "Sort order (asc or desc)."
    )]
    pub order: Option<String>,

    #[arg(
        short = 'i',
        long = "interactive",
        help_heading = "Session",
        help = "Read control changes from stdin and re-render after each pause."
    )]
    pub interactive: bool,

    #[arg(
        short = 'd',
        long = "debounce",
        value_name = "MS",
        help_heading = "Session",
        help = "Quiet period in milliseconds before re-rendering in interactive mode."
    )]
    pub debounce: Option<u64>,
}
