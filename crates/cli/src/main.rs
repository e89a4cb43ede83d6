use std::fs;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use expositor_core::{
    CsvConfig, DEFAULT_URL, DirectoryPage, FetchConfig, Harvest, HarvestConfig, Harvester,
    JsonConfig, ScrollOutcome, SiteProfile, StaticPage, WebDriverConfig, WebDriverPage, fetch_file,
    fetch_stdin, fetch_url_with_config, records_to_csv, records_to_json,
};
use owo_colors::OwoColorize;
use url::Url;

mod echo;

use echo::{CliProgress, print_banner, print_info, print_step, print_success, print_warning};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// How a URL input is rendered before harvesting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Driver {
    WebDriver,
    Fetch,
}

impl FromStr for Driver {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "webdriver" | "wd" => Ok(Self::WebDriver),
            "fetch" | "http" => Ok(Self::Fetch),
            _ => Err(format!("Invalid driver: {}. Valid options: webdriver, fetch", s)),
        }
    }
}

/// Output files to write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Json,
    Csv,
    Both,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "both" | "all" => Ok(Self::Both),
            _ => Err(format!("Invalid format: {}. Valid options: json, csv, both", s)),
        }
    }
}

/// Harvest exhibitor listings from infinitely scrolling directory pages
#[derive(Parser, Debug)]
#[command(name = "expositor")]
#[command(author = "Expositor Contributors")]
#[command(version = VERSION)]
#[command(about = "Harvest exhibitor listings from scrolling directory pages", long_about = None)]
struct Args {
    /// Directory URL to harvest, local HTML file, or "-" for stdin
    #[arg(value_name = "INPUT", default_value = DEFAULT_URL)]
    input: String,

    /// Site profile: auto, a built-in name (imts, interphex, generic), or a JSON file
    #[arg(long, default_value = "auto", value_name = "PROFILE")]
    profile: String,

    /// Override the profile's card selector
    #[arg(long, value_name = "SELECTOR")]
    card_selector: Option<String>,

    /// Override the origin prefixed onto relative profile links
    #[arg(long, value_name = "URL")]
    origin: Option<String>,

    /// Pause between scroll probes in seconds
    #[arg(long, default_value = "2.0", value_name = "SECS")]
    scroll_pause: f64,

    /// Maximum scroll probe rounds
    #[arg(long, default_value = "100", value_name = "NUM")]
    max_scrolls: u32,

    /// How long to wait for the first card in seconds
    #[arg(long, default_value = "30", value_name = "SECS")]
    ready_timeout: u64,

    /// Grace period after the first card appears in seconds
    #[arg(long, default_value = "3.0", value_name = "SECS")]
    settle: f64,

    /// Renderer for URL inputs (webdriver, fetch)
    #[arg(long, default_value = "webdriver", value_name = "DRIVER")]
    driver: Driver,

    /// WebDriver server to connect to
    #[arg(long, default_value = "http://localhost:9515", value_name = "URL")]
    webdriver: String,

    /// Output directory
    #[arg(short, long, default_value = "output", value_name = "DIR")]
    out_dir: PathBuf,

    /// Output files to write (json, csv, both)
    #[arg(short, long, default_value = "both", value_name = "FORMAT")]
    format: OutputFormat,

    /// Write compact JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,

    /// HTTP timeout in seconds (fetch driver)
    #[arg(long, default_value = "30", value_name = "SECS")]
    timeout: u64,

    /// Custom User-Agent for HTTP requests (fetch driver)
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Show progress while harvesting
    #[arg(short, long)]
    verbose: bool,
}

/// Resolve the site profile from the --profile flag.
fn resolve_profile(args: &Args) -> anyhow::Result<SiteProfile> {
    match args.profile.as_str() {
        "auto" => Ok(SiteProfile::for_url(&args.input)),
        name => match SiteProfile::builtin(name) {
            Some(profile) => Ok(profile),
            None => SiteProfile::from_json_file(name)
                .with_context(|| format!("Failed to load site profile: {}", name)),
        },
    }
}

/// Drive the harvest over whichever page adapter the input selected.
async fn run_harvest<P: DirectoryPage>(
    page: &P, config: HarvestConfig, verbose: bool,
) -> anyhow::Result<Harvest> {
    if verbose {
        print_step(2, 3, "Harvesting listings");
    }

    let harvester = Harvester::with_config(config);
    let harvest = if verbose {
        let mut progress = CliProgress::new();
        harvester.run_with_progress(page, &mut progress).await?
    } else {
        harvester.run(page).await?
    };
    Ok(harvest)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.verbose {
        print_banner();
    }

    anyhow::ensure!(args.scroll_pause >= 0.0, "scroll pause must be non-negative");
    anyhow::ensure!(args.settle >= 0.0, "settle must be non-negative");

    let mut profile = resolve_profile(&args)?;
    if let Some(selector) = &args.card_selector {
        profile.card_selector = selector.clone();
    }
    if let Some(origin) = &args.origin {
        profile.origin = origin.clone();
    }

    if args.verbose {
        print_info(&format!("Profile: {} (cards: {})", profile.name, profile.card_selector));
        eprintln!();
    }

    let config = HarvestConfig::builder()
        .url(args.input.clone())
        .profile(profile)
        .scroll_pause(Duration::from_secs_f64(args.scroll_pause))
        .max_attempts(args.max_scrolls)
        .ready_timeout(Duration::from_secs(args.ready_timeout))
        .settle(Duration::from_secs_f64(args.settle))
        .build();

    let harvest = if args.input == "-" {
        if args.verbose {
            print_step(1, 3, "Reading from stdin");
        }
        let html = fetch_stdin().context("Failed to read from stdin")?;
        run_harvest(&StaticPage::new(html), config, args.verbose).await?
    } else if args.input.starts_with("http://") || args.input.starts_with("https://") {
        match args.driver {
            Driver::WebDriver => {
                if args.verbose {
                    print_step(1, 3, &format!("Connecting to WebDriver at {}", args.webdriver));
                }
                Url::parse(&args.webdriver).context("Invalid WebDriver server URL")?;

                let page = WebDriverPage::with_config(WebDriverConfig {
                    server: args.webdriver.clone(),
                    ..WebDriverConfig::default()
                })
                .await
                .context("Failed to connect to WebDriver server")?;

                // End the session even when the harvest fails.
                let outcome = run_harvest(&page, config, args.verbose).await;
                let _ = page.close().await;
                outcome?
            }
            Driver::Fetch => {
                if args.verbose {
                    print_step(1, 3, &format!("Fetching {}", args.input.bright_white().underline()));
                }
                let mut fetch_config = FetchConfig { timeout: args.timeout, ..FetchConfig::default() };
                if let Some(user_agent) = &args.user_agent {
                    fetch_config.user_agent = user_agent.clone();
                }
                let html = fetch_url_with_config(&args.input, &fetch_config)
                    .await
                    .context("Failed to fetch URL")?;
                run_harvest(&StaticPage::new(html), config, args.verbose).await?
            }
        }
    } else {
        if args.verbose {
            print_step(1, 3, &format!("Reading from file {}", args.input.bright_white()));
        }
        let html =
            fetch_file(&args.input).with_context(|| format!("Failed to read file: {}", args.input))?;
        run_harvest(&StaticPage::new(html), config, args.verbose).await?
    };

    if harvest.outcome == ScrollOutcome::Exhausted {
        print_warning("Scroll limit reached before the card count settled; results may be partial");
    }

    if args.verbose {
        print_step(3, 3, "Writing output");
        eprintln!("  {} {}", "Rounds:".dimmed(), harvest.stats.rounds.to_string().bright_white());
        eprintln!("  {} {}", "Cards:".dimmed(), harvest.stats.cards.to_string().bright_white());
        eprintln!(
            "  {} {}",
            "Duplicates:".dimmed(),
            harvest.stats.duplicates.to_string().bright_white()
        );
        eprintln!(
            "  {} {}",
            "Skipped:".dimmed(),
            (harvest.stats.unnamed + harvest.stats.faults).to_string().bright_white()
        );
        eprintln!();
    }

    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("Failed to create output directory: {}", args.out_dir.display()))?;

    if matches!(args.format, OutputFormat::Json | OutputFormat::Both) {
        let json = records_to_json(&harvest.records, &JsonConfig { pretty: !args.compact })
            .context("Failed to render JSON")?;
        let path = args.out_dir.join("exhibitors.json");
        fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;
        print_success(&format!("JSON written to {}", path.display()));
    }

    if matches!(args.format, OutputFormat::Csv | OutputFormat::Both) {
        if harvest.records.is_empty() {
            print_info("No records harvested; skipping CSV");
        } else {
            let csv = records_to_csv(&harvest.records, &CsvConfig::default());
            let path = args.out_dir.join("exhibitors.csv");
            fs::write(&path, csv).with_context(|| format!("Failed to write {}", path.display()))?;
            print_success(&format!("CSV written to {}", path.display()));
        }
    }

    print_success(&format!("Done: {} companies", harvest.records.len()));

    Ok(())
}
