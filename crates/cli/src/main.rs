use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use anyhow::Context;
use clap::{ArgGroup, Parser};
use lingua_core::{
    Document, Entry, ExtractionRules, FetchConfig, Lookup, LookupConfig, Mode, STDIN_MARKER, fetch_url, read_page,
};
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

mod echo;

pub(crate) const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Output format for a found entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid format: {}. Valid options: text, json", s)),
        }
    }
}

/// Look up Italian words on Treccani and sinonimi.it from the terminal
#[derive(Parser, Debug)]
#[command(name = "lingua")]
#[command(author = "Lingua Contributors")]
#[command(version = VERSION)]
#[command(about = "Look up definitions, encyclopedia entries and synonyms", long_about = None)]
#[command(group(ArgGroup::new("mode").args(["vocabolario", "sinonimo", "enciclopedia"])))]
struct Args {
    /// Word to look up
    #[arg(value_name = "WORD")]
    word: String,

    /// Dictionary definition from the Treccani vocabolario (default)
    #[arg(short = 'v', long)]
    vocabolario: bool,

    /// Synonyms from sinonimi.it
    #[arg(short, long)]
    sinonimo: bool,

    /// Entry from the Treccani enciclopedia
    #[arg(short, long)]
    enciclopedia: bool,

    /// Read a saved page from FILE (or "-" for stdin) instead of fetching
    #[arg(long, value_name = "FILE")]
    input: Option<String>,

    /// Extraction rules JSON file
    #[arg(long, value_name = "FILE")]
    rules: Option<PathBuf>,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "30", value_name = "SECS")]
    timeout: u64,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Disable bold and italic escapes in the output
    #[arg(long)]
    plain: bool,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text", value_name = "FORMAT")]
    format: OutputFormat,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    verbose: bool,
}

impl Args {
    fn mode(&self) -> Mode {
        if self.sinonimo {
            Mode::Synonym
        } else if self.enciclopedia {
            Mode::Encyclopedia
        } else {
            Mode::Dictionary
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "lingua=debug,lingua_core=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Reads and extracts a saved page.
fn lookup_input(args: &Args, lookup: &Lookup, input: &str) -> anyhow::Result<Option<Entry>> {
    if args.verbose {
        let source = if input == STDIN_MARKER { "stdin".to_string() } else { input.bright_white().to_string() };
        echo::print_step(1, 3, &format!("Reading page from {}", source));
    }

    let html = read_page(input).with_context(|| format!("Failed to read page: {}", input))?;

    let doc = Document::parse(&html).context("Failed to parse HTML")?;

    if args.verbose {
        eprintln!("  {} {}", "Size:".dimmed(), echo::format_size(html.len()).bright_white());
        if let Some(title) = doc.title() {
            eprintln!("  {} {}", "Title:".dimmed(), title.bright_white());
        }
        eprintln!();
        echo::print_step(2, 3, "Extracting entry");
    }

    lookup
        .extract(&doc, args.mode(), &args.word, None)
        .context("Failed to extract entry")
}

/// Fetches the page for the word and extracts it.
async fn lookup_remote(args: &Args, lookup: &Lookup) -> anyhow::Result<Option<Entry>> {
    let mode = args.mode();
    let url = mode.url_for(&args.word)?;

    if args.verbose {
        echo::print_step(1, 3, &format!("Fetching from {}", url.as_str().bright_white().underline()));
    }

    let config = FetchConfig {
        timeout: args.timeout,
        user_agent: args.user_agent.clone().unwrap_or_else(|| FetchConfig::default().user_agent),
    };

    let html = fetch_url(url.as_str(), &config).await.context("Failed to fetch page")?;
    let doc = Document::parse(&html).context("Failed to parse HTML")?;

    if args.verbose {
        eprintln!("  {} {}", "Size:".dimmed(), echo::format_size(html.len()).bright_white());
        eprintln!();
        echo::print_step(2, 3, "Extracting entry");
    }

    lookup
        .extract(&doc, mode, &args.word, Some(url.to_string()))
        .context("Failed to extract entry")
}

/// Returns `Ok(false)` when the page holds no entry.
async fn run(args: Args) -> anyhow::Result<bool> {
    if args.verbose {
        echo::print_banner();
        echo::print_info(&format!("Looking up '{}' in {}", args.word, args.mode()));
        eprintln!();
    }

    let rules = ExtractionRules::load(args.rules.as_deref()).context("Failed to load extraction rules")?;
    let lookup = Lookup::with_config(LookupConfig::builder().rules(rules).styled(!args.plain).build());

    let entry = match args.input.as_deref() {
        Some(input) => lookup_input(&args, &lookup, input)?,
        None => lookup_remote(&args, &lookup).await?,
    };

    let Some(entry) = entry else {
        return Ok(false);
    };

    let output = match args.format {
        OutputFormat::Text => format!("{}\n", entry.text),
        OutputFormat::Json => format!("{:#}\n", entry.to_json().context("Failed to serialize entry")?),
    };

    if args.verbose {
        echo::print_step(3, 3, "Writing output");
        eprintln!("  {} {}", "Format:".dimmed(), format!("{:?}", args.format).bright_white());
        eprintln!();
    }

    match args.output {
        Some(path) => {
            fs::write(&path, output).with_context(|| format!("Failed to write to file: {}", path.display()))?;
            echo::print_success(&format!("Output written to {}", path.display().bright_white()));
        }
        None => print!("{}", output),
    }

    Ok(true)
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(args).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => {
            echo::print_error("Error: Definition not found");
            ExitCode::FAILURE
        }
        Err(e) => {
            echo::print_error(&format!("Error: {:#}", e));
            ExitCode::FAILURE
        }
    }
}
