use clap::{Args, Parser, Subcommand};
use price_scout::search::{best_deal, filter_rows};
use price_scout::{run_scout, AppConfig, CsvStreamReader, OutputLayout};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    name = "price-scout",
    version,
    about = "Grocery price comparison with translated product names"
)]
struct Cli {
    #[arg(long, global = true, default_value = "config.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch the feed, translate new names and export the CSV
    Run(RunArgs),
    /// Search an exported CSV by original or translated name
    Search(SearchArgs),
}

#[derive(Args, Debug)]
struct RunArgs {
    #[arg(long)]
    output: Option<PathBuf>,

    /// Include unit price and URL columns
    #[arg(long, default_value_t = false)]
    extended: bool,

    #[arg(long)]
    session_limit: Option<usize>,
}

#[derive(Args, Debug)]
struct SearchArgs {
    #[arg(long)]
    input: Option<PathBuf>,

    query: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(Some(cli.config.as_str()))?;

    let directive = format!("price_scout={}", config.logging.level);
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(directive.parse()?))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Run(args) => {
            if let Some(output) = args.output {
                config.output.path = output;
            }
            if args.extended {
                config.output.layout = OutputLayout::Extended;
            }
            if let Some(limit) = args.session_limit {
                config.translation.session_limit = limit;
            }
            run(&config).await
        }
        Commands::Search(args) => {
            let input = args.input.unwrap_or_else(|| config.output.path.clone());
            search(input, &args.query)
        }
    }
}

async fn run(config: &AppConfig) -> anyhow::Result<()> {
    let summary = run_scout(config).await?;
    let report = &summary.output.translation;

    println!("Rows written:       {}", summary.rows_written);
    println!("Output file:        {}", summary.output_path.display());
    println!("Unique names:       {}", summary.output.unique_names);
    println!("Translated now:     {}", report.names_translated);
    println!("Still untranslated: {}", report.names_pending);
    println!("Cache entries:      {}", summary.cache_entries);
    if report.batches_failed > 0 {
        println!(
            "Failed batches:     {} of {}",
            report.batches_failed, report.batches_attempted
        );
    }
    if report.limit_reached {
        println!("Session limit reached, run again to continue translating.");
    }
    for name in &report.flagged {
        println!("Not translated (contains delimiter): {}", name);
    }

    Ok(())
}

fn search(input: PathBuf, query: &str) -> anyhow::Result<()> {
    let rows = CsvStreamReader::new(input).read_rows()?;
    let matches = filter_rows(&rows, query);

    println!("{} of {} products match \"{}\"", matches.len(), rows.len(), query);
    for row in &matches {
        println!(
            "{} | {} | current {} | min {} | gap {}",
            row.translated_name,
            row.name,
            fmt_price(row.current_price),
            fmt_price(row.min_price),
            fmt_price(row.price_gap),
        );
    }

    if let Some(deal) = best_deal(&matches) {
        println!(
            "Best deal found: {} at ${}",
            deal.name,
            fmt_price(deal.current_price)
        );
    }

    Ok(())
}

fn fmt_price(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.2}", v))
        .unwrap_or_else(|| "-".to_string())
}
